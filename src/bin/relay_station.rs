//! Relay station entry point.
//!
//! ```text
//!   LCD1602 ◀─ I²C ─┐                         ┌─▶ Relay 1 / Relay 2 (active-low)
//!                   │   ┌─────────────────┐   │
//!   ACS712 ──ADC1──▶├──▶│ StationService  │──▶┤
//!   IR sensor ─GPIO─┘   └────────▲────────┘   └─▶ LogEventSink
//!                                │
//!                      EspHttpServer (httpd task)
//! ```
//!
//! Boot order: relays off and banner first, then WiFi, then the HTTP
//! server.  The main task afterwards only keeps the link alive.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::Result;
use esp_idf_hal::delay::Delay;
use esp_idf_hal::gpio::AnyIOPin;
use esp_idf_hal::i2c::{I2cConfig, I2cDriver};
use esp_idf_hal::peripherals::Peripherals;
use esp_idf_hal::units::Hertz;
use esp_idf_svc::eventloop::EspSystemEventLoop;
use esp_idf_svc::nvs::EspDefaultNvsPartition;
use esp_idf_svc::wifi::EspWifi;
use log::{info, warn};

use fieldnode::adapters::hardware::StationHardware;
use fieldnode::adapters::http_server::{self, StationNode};
use fieldnode::adapters::log_sink::LogEventSink;
use fieldnode::adapters::time::Clock;
use fieldnode::adapters::wifi::{ConnectivityPort, LinkState, WifiAdapter};
use fieldnode::app::station::StationService;
use fieldnode::config::NodeConfig;
use fieldnode::drivers::lcd::Lcd1602;
use fieldnode::drivers::watchdog::Watchdog;

/// Main task period while it only supervises the WiFi link.
const SUPERVISE_MS: u64 = 100;

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;
    info!("FieldNode relay station v{}", env!("CARGO_PKG_VERSION"));

    // ── 2. Configuration ──────────────────────────────────────
    let config = NodeConfig::load()?;
    config.station.validate()?;
    let station = &config.station;

    // ── 3. Peripherals ────────────────────────────────────────
    let peripherals = Peripherals::take()?;
    let sysloop = EspSystemEventLoop::take()?;
    let nvs = EspDefaultNvsPartition::take()?;

    // SAFETY: the LCD pins come from a validated config and are claimed
    // by nothing else in this firmware.
    let (sda, scl) = unsafe {
        (
            AnyIOPin::new(station.lcd_sda_gpio as _),
            AnyIOPin::new(station.lcd_scl_gpio as _),
        )
    };
    let i2c_config = I2cConfig::new().baudrate(Hertz(station.lcd_i2c_baud_hz));
    let i2c = I2cDriver::new(peripherals.i2c0, sda, scl, &i2c_config)?;
    let lcd = Lcd1602::new(i2c, Delay::new_default(), station.lcd_i2c_addr);

    let mut hw = StationHardware::new(station, lcd);
    hw.init()?;
    if !hw.lcd_ready() {
        warn!("Continuing without LCD");
    }

    let clock = Clock::new();
    let watchdog = Watchdog::new(config.watchdog_timeout_ms);

    // ── 4. Station service: relays off, banner ────────────────
    let service = StationService::new(station, clock.uptime_ms());
    let node = Arc::new(Mutex::new(StationNode::new(service, hw, LogEventSink::new(), clock)));
    if let Ok(mut node) = node.lock() {
        node.start();
    }

    // ── 5. WiFi ───────────────────────────────────────────────
    let driver = EspWifi::new(peripherals.modem, sysloop, Some(nvs))?;
    let mut wifi = WifiAdapter::new(driver, config.wifi.connect_timeout_ms);
    wifi.set_credentials(&config.wifi.ssid, &config.wifi.password)?;

    info!("Connecting to WiFi '{}'", config.wifi.ssid);
    while wifi.poll(clock.uptime_ms()) != LinkState::Connected {
        watchdog.feed();
        std::thread::sleep(Duration::from_millis(SUPERVISE_MS));
    }
    match wifi.ip_address() {
        Some(ip) => info!("Station ready at http://{}", ip),
        None => warn!("Connected, but no IP address reported yet"),
    }

    // ── 6. HTTP server ────────────────────────────────────────
    let _server = http_server::serve(Arc::clone(&node), station.http_port)?;
    if let Ok(mut node) = node.lock() {
        node.refresh_display();
    }

    // ── 7. Supervise ──────────────────────────────────────────
    let mut was_connected = true;
    loop {
        wifi.poll(clock.uptime_ms());
        let connected = wifi.is_connected();
        if connected && !was_connected {
            if let Some(ip) = wifi.ip_address() {
                info!("WiFi restored, station at http://{}", ip);
            }
        }
        was_connected = connected;

        watchdog.feed();
        std::thread::sleep(Duration::from_millis(SUPERVISE_MS));
    }
}
