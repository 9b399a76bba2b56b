//! Drowsiness alarm entry point.
//!
//! Polls the remote verdict endpoint over WiFi and drives the buzzer
//! according to the configured [`BuzzerPolicy`](fieldnode::control::buzzer::BuzzerPolicy).
//! Build with `FIELDNODE_CONFIG_JSON='{"alarm":{"policy":{"Pulse":{"duration_ms":2000}}}}'`
//! (or any other override) to select the trigger board behaviour.

use std::time::Duration;

use anyhow::Result;
use esp_idf_hal::peripherals::Peripherals;
use esp_idf_svc::eventloop::EspSystemEventLoop;
use esp_idf_svc::nvs::EspDefaultNvsPartition;
use esp_idf_svc::wifi::EspWifi;
use log::info;

use fieldnode::adapters::hardware::AlarmHardware;
use fieldnode::adapters::http_client::EspHttpClient;
use fieldnode::adapters::log_sink::LogEventSink;
use fieldnode::adapters::time::Clock;
use fieldnode::adapters::wifi::{ConnectivityPort, WifiAdapter};
use fieldnode::app::alarm::AlarmService;
use fieldnode::config::NodeConfig;
use fieldnode::drivers::watchdog::Watchdog;

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;
    info!("FieldNode drowsiness alarm v{}", env!("CARGO_PKG_VERSION"));

    // ── 2. Configuration ──────────────────────────────────────
    let config = NodeConfig::load()?;
    config.alarm.validate()?;

    // ── 3. Peripherals ────────────────────────────────────────
    let peripherals = Peripherals::take()?;
    let sysloop = EspSystemEventLoop::take()?;
    let nvs = EspDefaultNvsPartition::take()?;

    let mut hw = AlarmHardware::new(&config.alarm);
    hw.init()?;
    let mut sink = LogEventSink::new();
    let mut client = EspHttpClient::new();
    let clock = Clock::new();
    let watchdog = Watchdog::new(config.watchdog_timeout_ms);

    // ── 4. Alarm service: buzzer off ──────────────────────────
    let mut alarm = AlarmService::new(&config.alarm);
    alarm.start(&mut hw, &mut sink);

    // ── 5. WiFi ───────────────────────────────────────────────
    let driver = EspWifi::new(peripherals.modem, sysloop, Some(nvs))?;
    let mut wifi = WifiAdapter::new(driver, config.wifi.connect_timeout_ms);
    wifi.set_credentials(&config.wifi.ssid, &config.wifi.password)?;
    info!("Connecting to WiFi '{}'", config.wifi.ssid);

    // ── 6. Control loop ───────────────────────────────────────
    let tick = Duration::from_millis(u64::from(config.alarm.tick_ms));
    loop {
        let now_ms = clock.uptime_ms();
        wifi.poll(now_ms);
        alarm.tick(now_ms, wifi.is_connected(), &mut client, &mut hw, &mut sink);

        watchdog.feed();
        std::thread::sleep(tick);
    }
}
