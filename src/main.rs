//! Livewell Controller Firmware — Main Entry Point
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────┐
//! │                    Adapters (outer ring)                   │
//! │                                                            │
//! │   HardwareAdapter                  LogEventSink            │
//! │   (Sensor+Actuator+Delay)          (EventSink)             │
//! │                                                            │
//! │  ───────────────── Port Trait Boundary ──────────────────  │
//! │                                                            │
//! │  ┌──────────────────────────────────────────────────────┐  │
//! │  │            LivewellService (pure logic)              │  │
//! │  │  Filter · Mapper · Debounce · DrainOverride · FSM    │  │
//! │  └──────────────────────────────────────────────────────┘  │
//! │                                                            │
//! │  timebase (1 ms tick + countdown, fed by hw_timer)         │
//! └────────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

// ── Module declarations ───────────────────────────────────────
pub mod app;
pub mod config;
pub mod control;
pub mod fsm;
pub mod safety;
pub mod sensors;
pub mod timebase;

mod adapters;
mod drivers;
mod pins;

// ── Imports ───────────────────────────────────────────────────
use anyhow::Result;
use log::info;

use adapters::hardware::HardwareAdapter;
use adapters::log_sink::LogEventSink;
use app::events::AppEvent;
use app::service::LivewellService;
use config::SystemConfig;

// ── Main ──────────────────────────────────────────────────────

fn main() -> Result<()> {
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("livewell controller v{}", env!("CARGO_PKG_VERSION"));

    if let Err(e) = drivers::hw_init::init_peripherals() {
        // Peripheral init failure is critical — log and halt. The relays
        // are still in their released boot posture.
        log::error!("HAL init failed: {} — halting", e);
        #[allow(clippy::empty_loop)]
        loop {}
    }
    drivers::hw_timer::start_tick_timer();

    // No persistence by design: every boot runs on the defaults, and the
    // dials are re-read continuously anyway.
    let config = SystemConfig::default();

    let mut hw = HardwareAdapter::new();
    let mut sink = LogEventSink::new();
    let mut service = LivewellService::new(&config);

    // Boot: one full dial pass, then the debounced level picks the state.
    service.start(timebase::now_ms(), &mut hw, &mut sink);

    info!("system ready, entering control loop");

    let mut last_telemetry = timebase::now_ms();
    loop {
        let now = timebase::now_ms();
        service.tick(now, &mut hw, &mut sink);

        if timebase::elapsed_ms(now, last_telemetry) >= config.telemetry_interval_ms {
            sink.emit(&AppEvent::Telemetry(service.telemetry()));
            last_telemetry = now;
        }

        // The core is pure polling; yield one RTOS tick per pass so the
        // idle task stays fed.
        #[cfg(target_os = "espidf")]
        // SAFETY: plain FreeRTOS delay from task context.
        unsafe {
            esp_idf_svc::sys::vTaskDelay(1);
        }
        #[cfg(not(target_os = "espidf"))]
        std::thread::sleep(std::time::Duration::from_millis(1));
    }
}
