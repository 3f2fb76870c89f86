//! Periodic 1 ms tick timer driving the time base.
//!
//! Uses ESP-IDF's esp_timer API. The callback executes in the ESP timer
//! task context (not a raw ISR), so it can safely call
//! [`crate::timebase::tick`] (atomics only) and toggle the heartbeat LED
//! via the GPIO helper. It performs no application logic.
//!
//! On simulation targets the timer is not started; host tests drive time
//! explicitly through the service API.

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;

#[cfg(target_os = "espidf")]
use crate::{pins, timebase};

#[cfg(target_os = "espidf")]
static mut TICK_TIMER: esp_timer_handle_t = core::ptr::null_mut();

#[cfg(target_os = "espidf")]
unsafe extern "C" fn tick_cb(_arg: *mut core::ffi::c_void) {
    if let Some(level) = timebase::tick() {
        crate::drivers::hw_init::gpio_write(pins::STATUS_LED_GPIO, level);
    }
}

/// Start the 1 kHz tick timer.
#[cfg(target_os = "espidf")]
pub fn start_tick_timer() {
    // SAFETY: TICK_TIMER is written here once at boot from the single
    // main-task context before the callback can fire. The callback itself
    // only touches atomics and a GPIO level.
    unsafe {
        let args = esp_timer_create_args_t {
            callback: Some(tick_cb),
            arg: core::ptr::null_mut(),
            dispatch_method: esp_timer_dispatch_t_ESP_TIMER_TASK,
            name: b"tick\0".as_ptr() as *const _,
            skip_unhandled_events: true,
        };
        let ret = esp_timer_create(&args, &raw mut TICK_TIMER);
        if ret != ESP_OK {
            log::error!("hw_timer: tick timer create failed (rc={}) — controller cannot run", ret);
            return;
        }
        let ret = esp_timer_start_periodic(TICK_TIMER, 1_000); // 1 ms
        if ret != ESP_OK {
            log::error!("hw_timer: tick timer start failed (rc={})", ret);
            return;
        }
    }
    log::info!("hw_timer: 1 ms tick started");
}

#[cfg(not(target_os = "espidf"))]
pub fn start_tick_timer() {
    log::info!("hw_timer(sim): tick timer not started (tests drive time explicitly)");
}

/// Stop the tick timer.
#[cfg(target_os = "espidf")]
pub fn stop_tick_timer() {
    // SAFETY: TICK_TIMER is a valid handle if start_tick_timer() succeeded;
    // null-check prevents acting on a failed init.
    unsafe {
        let t = TICK_TIMER;
        if !t.is_null() {
            esp_timer_stop(t);
        }
    }
}

#[cfg(not(target_os = "espidf"))]
pub fn stop_tick_timer() {}
