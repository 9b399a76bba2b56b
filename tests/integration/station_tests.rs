//! Integration tests for the web request → StationService → relays/LCD
//! pipeline.
//!
//! Requests go through the same `Route::parse` + `dispatch` path the
//! ESP-IDF httpd handlers use, with the clock supplied by the test.

use super::mock_hw::{ActuatorCall, MockHardware, RecordingSink};

use fieldnode::app::events::AppEvent;
use fieldnode::app::state::{Actuator, RelayId, RelayState};
use fieldnode::app::station::StationService;
use fieldnode::config::StationConfig;
use fieldnode::error::{DisplayError, RequestError};
use fieldnode::http::{self, Response, Route};
use fieldnode::sensors::current::CurrentSensor;

struct Station {
    service: StationService,
    hw: MockHardware,
    sink: RecordingSink,
}

impl Station {
    fn boot() -> Self {
        let mut station = Self {
            service: StationService::new(&StationConfig::default(), 0),
            hw: MockHardware::new(),
            sink: RecordingSink::new(),
        };
        station.service.start(&mut station.hw, &mut station.sink);
        station
    }

    fn get(&mut self, uri: &str, now_ms: u64) -> Response {
        http::dispatch(Route::parse(uri), now_ms, &mut self.service, &mut self.hw, &mut self.sink)
    }
}

// ── Boot ──────────────────────────────────────────────────────

#[test]
fn boot_drives_relays_off_and_shows_banner() {
    let s = Station::boot();
    assert_eq!(s.hw.calls.first(), Some(&ActuatorCall::AllOff));
    assert_eq!(s.hw.last_screen(), Some(("Initializing...", "")));
    assert!(!s.service.actuator_state().relay(RelayId::Relay1).is_on());
    assert!(!s.service.actuator_state().relay(RelayId::Relay2).is_on());
}

// ── Relay control ─────────────────────────────────────────────

#[test]
fn relay_on_is_reflected_in_lcd_after_power_request() {
    let mut s = Station::boot();

    let r = s.get("/relay?relay=relay1&state=ON", 100);
    assert_eq!(r.status, 200);
    assert_eq!(r.body, "Relay 1 turned ON");
    assert!(s.hw.is_on(Actuator::Relay1));
    assert!(!s.hw.is_on(Actuator::Relay2));

    let r = s.get("/power", 200);
    assert_eq!(r.status, 200);
    assert_eq!(s.hw.last_screen(), Some(("R1: ON  R2: OFF", "Energy: 0.0 Wh")));
}

#[test]
fn relay_off_follows_on() {
    let mut s = Station::boot();
    s.get("/relay?relay=relay2&state=ON", 0);
    let r = s.get("/relay?relay=relay2&state=OFF", 10);

    assert_eq!(r.body, "Relay 2 turned OFF");
    assert!(!s.hw.is_on(Actuator::Relay2));
    assert_eq!(s.service.actuator_state().relay(RelayId::Relay2), RelayState::Off);
    assert!(s.sink.contains(&AppEvent::RelaySwitched { relay: RelayId::Relay2, state: RelayState::Off }));
}

#[test]
fn unknown_relay_is_rejected_without_actuator_change() {
    let mut s = Station::boot();
    let screens_before = s.hw.screens.len();

    let r = s.get("/relay?relay=relay3&state=ON", 0);

    assert_eq!(r.status, 400);
    assert_eq!(r.body, "Invalid relay");
    assert_eq!(s.hw.set_calls(Actuator::Relay1) + s.hw.set_calls(Actuator::Relay2), 0);
    assert!(s.sink.contains(&AppEvent::RequestRejected(RequestError::UnknownRelay)));
    // The LCD is still refreshed after a rejected request.
    assert_eq!(s.hw.screens.len(), screens_before + 1);
}

#[test]
fn bad_state_is_rejected_for_a_known_relay() {
    let mut s = Station::boot();

    let r = s.get("/relay?relay=relay2&state=MAYBE", 0);
    assert_eq!(r.status, 400);
    assert_eq!(r.body, "Invalid request for relay 2");

    let r = s.get("/relay?relay=relay1", 0);
    assert_eq!(r.status, 400);
    assert_eq!(r.body, "Invalid request for relay 1");

    assert_eq!(s.hw.set_calls(Actuator::Relay1) + s.hw.set_calls(Actuator::Relay2), 0);
}

#[test]
fn missing_relay_parameter_is_rejected() {
    let mut s = Station::boot();
    let r = s.get("/relay?state=ON", 0);
    assert_eq!((r.status, r.body.as_ref()), (400, "Invalid relay"));
}

// ── Power and energy ──────────────────────────────────────────

#[test]
fn energy_accumulates_only_once_the_interval_has_elapsed() {
    let mut s = Station::boot();
    s.hw.current_code = 2458;
    let power_w = CurrentSensor::default().power_w(2458);
    assert!(power_w > 100.0, "sample should be well above idle, got {power_w}");

    let r = s.get("/power", 1_000);
    assert!(r.body.ends_with("Energy: 0.00 Wh"), "{}", r.body);
    assert_eq!(s.service.energy().total_wh(), 0.0);

    s.get("/power", 30_000);
    let expected = f64::from(power_w) * 30_000.0 / 3_600_000.0;
    assert!((s.service.energy().total_wh() - expected).abs() < 1e-9);
    assert_eq!(
        s.sink.count(|e| matches!(e, AppEvent::EnergyAccumulated { .. })),
        1
    );

    // A second request inside the next interval adds nothing.
    s.get("/power", 45_000);
    assert!((s.service.energy().total_wh() - expected).abs() < 1e-9);
}

#[test]
fn power_text_reports_watts_and_energy() {
    let mut s = Station::boot();
    s.hw.current_code = 2048;
    let r = s.get("/power", 0);
    assert_eq!(r.content_type, "text/html");
    assert_eq!(r.body, "Power: 0.00 W<br>Energy: 0.00 Wh");
}

// ── Presence ──────────────────────────────────────────────────

#[test]
fn presence_is_active_low() {
    let mut s = Station::boot();

    s.hw.presence_high = false;
    assert_eq!(s.get("/object", 0).body, "Object detected");

    s.hw.presence_high = true;
    assert_eq!(s.get("/object", 0).body, "No object detected");
}

// ── Routing and display faults ────────────────────────────────

#[test]
fn unknown_path_is_not_found() {
    let mut s = Station::boot();
    let r = s.get("/status", 0);
    assert_eq!(r.status, 404);
    assert_eq!(s.hw.calls, vec![ActuatorCall::AllOff], "no actuator call beyond boot");
}

#[test]
fn index_is_served_verbatim() {
    let mut s = Station::boot();
    let r = s.get("/", 0);
    assert_eq!(r.status, 200);
    assert_eq!(r.body, http::INDEX_HTML);
}

#[test]
fn broken_lcd_does_not_block_relay_control() {
    let mut s = Station::boot();
    s.hw.lcd_broken = true;

    let r = s.get("/relay?relay=relay1&state=ON", 0);

    assert_eq!(r.status, 200);
    assert!(s.hw.is_on(Actuator::Relay1));
    assert!(s.sink.contains(&AppEvent::DisplayFailed(DisplayError::Bus)));
}
