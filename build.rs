fn main() {
    // Emits the ESP-IDF link arguments when building for the espidf target;
    // on host builds the sysenv is absent and this is a no-op.
    embuild::espidf::sysenv::output();
}
