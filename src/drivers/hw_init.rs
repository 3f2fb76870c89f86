//! One-shot hardware peripheral initialisation.
//!
//! Configures the ADC1 oneshot unit for the three dials and the GPIO
//! directions/pulls for the float switch, relays, and lamps, using raw
//! ESP-IDF sys calls. Called once from `main()` before the control loop
//! starts.
//!
//! On non-ESP targets every helper is an in-memory no-op so the rest of the
//! crate builds and tests on the host.

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;

#[cfg(target_os = "espidf")]
use log::info;

#[cfg(target_os = "espidf")]
use crate::pins;

// ── Error type ────────────────────────────────────────────────

/// Errors during one-shot peripheral initialisation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HwInitError {
    AdcInitFailed(i32),
    GpioConfigFailed(i32),
}

impl core::fmt::Display for HwInitError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::AdcInitFailed(rc) => write!(f, "ADC1 init failed (rc={})", rc),
            Self::GpioConfigFailed(rc) => write!(f, "GPIO config failed (rc={})", rc),
        }
    }
}

/// ADC1 channel numbers for the dials, in [`crate::sensors::pots::PotChannel`]
/// order (GPIO 5/6/7 on the ESP32-S3).
pub const POT_ADC_CHANNELS: [u32; 3] = [4, 5, 6];

#[cfg(target_os = "espidf")]
pub fn init_peripherals() -> Result<(), HwInitError> {
    // SAFETY: called once from main() before the control loop; single-threaded.
    unsafe {
        init_adc()?;
        init_gpio()?;
    }
    info!("hw_init: all peripherals configured");
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
pub fn init_peripherals() -> Result<(), HwInitError> {
    log::info!("hw_init(sim): peripheral init skipped");
    Ok(())
}

// ── ADC (oneshot) ─────────────────────────────────────────────

#[cfg(target_os = "espidf")]
static mut ADC1_HANDLE: adc_oneshot_unit_handle_t = core::ptr::null_mut();

/// SAFETY: `ADC1_HANDLE` is written once in `init_adc()` before the control
/// loop starts and only read afterwards, all from the single main task.
#[cfg(target_os = "espidf")]
unsafe fn adc1_handle() -> adc_oneshot_unit_handle_t {
    unsafe { ADC1_HANDLE }
}

#[cfg(target_os = "espidf")]
unsafe fn init_adc() -> Result<(), HwInitError> {
    let init_cfg = adc_oneshot_unit_init_cfg_t {
        unit_id: adc_unit_t_ADC_UNIT_1,
        ulp_mode: adc_ulp_mode_t_ADC_ULP_MODE_DISABLE,
        ..Default::default()
    };
    // SAFETY: ADC1_HANDLE is only written here, once at boot.
    let ret = unsafe { adc_oneshot_new_unit(&init_cfg, &raw mut ADC1_HANDLE) };
    if ret != ESP_OK {
        return Err(HwInitError::AdcInitFailed(ret));
    }

    let chan_cfg = adc_oneshot_chan_cfg_t {
        atten: pins::POT_ADC_ATTEN,
        bitwidth: adc_bitwidth_t_ADC_BITWIDTH_DEFAULT,
    };
    for ch in POT_ADC_CHANNELS {
        let ret = unsafe { adc_oneshot_config_channel(ADC1_HANDLE, ch as adc_channel_t, &chan_cfg) };
        if ret != ESP_OK {
            return Err(HwInitError::AdcInitFailed(ret));
        }
    }
    Ok(())
}

/// One blocking oneshot conversion, scaled to the 10-bit counts the dial
/// calibration is expressed in.
#[cfg(target_os = "espidf")]
pub fn adc1_read(channel: u32) -> u16 {
    let mut raw: i32 = 0;
    // SAFETY: handle initialised at boot; adc_oneshot_read blocks until the
    // conversion completes.
    let ret = unsafe { adc_oneshot_read(adc1_handle(), channel as adc_channel_t, &raw mut raw) };
    if ret != ESP_OK {
        return 0;
    }
    (raw.clamp(0, 4095) as u16) >> 2
}

#[cfg(not(target_os = "espidf"))]
pub fn adc1_read(_channel: u32) -> u16 {
    0
}

// ── GPIO ──────────────────────────────────────────────────────

#[cfg(target_os = "espidf")]
unsafe fn init_gpio() -> Result<(), HwInitError> {
    unsafe {
        // Float switch: input with pull-up; the switch closes to ground.
        gpio_check(gpio_set_direction(
            pins::FLOAT_SWITCH_GPIO,
            gpio_mode_t_GPIO_MODE_INPUT,
        ))?;
        gpio_check(gpio_set_pull_mode(
            pins::FLOAT_SWITCH_GPIO,
            gpio_pull_mode_t_GPIO_PULLUP_ONLY,
        ))?;

        // Relays: outputs, released at boot. The relay board inputs are
        // active-LOW, so released = HIGH.
        for pin in [pins::FILL_RELAY_GPIO, pins::DRAIN_RELAY_GPIO] {
            gpio_check(gpio_set_direction(pin, gpio_mode_t_GPIO_MODE_OUTPUT))?;
            gpio_check(gpio_set_level(pin, 1))?;
        }

        // Lamps: outputs, dark at boot.
        for pin in [
            pins::FILL_LED_GPIO,
            pins::DRAIN_LED_GPIO,
            pins::LEVEL_LED_GPIO,
            pins::STATUS_LED_GPIO,
        ] {
            gpio_check(gpio_set_direction(pin, gpio_mode_t_GPIO_MODE_OUTPUT))?;
            gpio_check(gpio_set_level(pin, 0))?;
        }
    }
    Ok(())
}

#[cfg(target_os = "espidf")]
fn gpio_check(ret: i32) -> Result<(), HwInitError> {
    if ret == ESP_OK {
        Ok(())
    } else {
        Err(HwInitError::GpioConfigFailed(ret))
    }
}

/// Read a GPIO input level. Safe to call from the timer callback.
#[cfg(target_os = "espidf")]
pub fn gpio_read(pin: i32) -> bool {
    unsafe { gpio_get_level(pin) != 0 }
}

#[cfg(not(target_os = "espidf"))]
pub fn gpio_read(_pin: i32) -> bool {
    true
}

/// Drive a GPIO output level. Safe to call from the timer callback.
#[cfg(target_os = "espidf")]
pub fn gpio_write(pin: i32, high: bool) {
    unsafe {
        let _ = gpio_set_level(pin, u32::from(high));
    }
}

#[cfg(not(target_os = "espidf"))]
pub fn gpio_write(_pin: i32, _high: bool) {}
