//! Integration tests for the poll → decode → buzzer pipeline.
//!
//! The alarm is ticked with explicit timestamps against a scripted HTTP
//! client, covering both buzzer policies.

use super::mock_hw::{ActuatorCall, MockHardware, MockHttpClient, RecordingSink};

use fieldnode::app::alarm::{AlarmService, TickOutcome};
use fieldnode::app::events::{AppEvent, NodeKind};
use fieldnode::app::state::Actuator;
use fieldnode::config::AlarmConfig;
use fieldnode::control::decision::RemoteDecision;
use fieldnode::error::{FetchError, TransportError};

const ENDPOINT: &str = "http://192.168.1.50:5000/status";

fn with_endpoint(mut config: AlarmConfig) -> AlarmConfig {
    config.endpoint.clear();
    config.endpoint.push_str(ENDPOINT).unwrap();
    config
}

struct Alarm {
    service: AlarmService,
    client: MockHttpClient,
    hw: MockHardware,
    sink: RecordingSink,
}

impl Alarm {
    fn boot(config: AlarmConfig, client: MockHttpClient) -> Self {
        let config = with_endpoint(config);
        config.validate().unwrap();
        let mut alarm = Self {
            service: AlarmService::new(&config),
            client,
            hw: MockHardware::new(),
            sink: RecordingSink::new(),
        };
        alarm.service.start(&mut alarm.hw, &mut alarm.sink);
        alarm
    }

    fn tick(&mut self, now_ms: u64) -> TickOutcome {
        self.service.tick(now_ms, true, &mut self.client, &mut self.hw, &mut self.sink)
    }

    fn buzzer(&self) -> bool {
        self.hw.is_on(Actuator::Buzzer)
    }
}

// ── Boot ──────────────────────────────────────────────────────

#[test]
fn boot_silences_the_buzzer() {
    let a = Alarm::boot(AlarmConfig::mirror(), MockHttpClient::new());
    assert_eq!(a.hw.calls, vec![ActuatorCall::AllOff]);
    assert!(a.sink.contains(&AppEvent::Started(NodeKind::DrowsinessAlarm)));
    assert!(!a.service.buzzer_on());
}

// ── Mirror policy ─────────────────────────────────────────────

#[test]
fn mirror_buzzer_follows_each_verdict() {
    let client = MockHttpClient::new()
        .reply(200, "drowsy")
        .reply(200, "normal")
        .reply(200, "yawn")
        .reply(200, "both");
    let mut a = Alarm::boot(AlarmConfig::mirror(), client);

    assert_eq!(a.tick(0), TickOutcome::Polled(Some(RemoteDecision::Drowsy)));
    assert!(a.buzzer());

    assert_eq!(a.tick(1_000), TickOutcome::Idle);
    assert_eq!(a.client.requests.len(), 1);

    assert_eq!(a.tick(2_000), TickOutcome::Polled(Some(RemoteDecision::Normal)));
    assert!(!a.buzzer());

    a.tick(4_000);
    assert!(a.buzzer());
    a.tick(6_000);
    assert!(a.buzzer());

    // ON, OFF, ON: "both" after "yawn" is not a change.
    assert_eq!(a.sink.count(|e| matches!(e, AppEvent::BuzzerChanged { .. })), 3);
    assert!(a.client.requests.iter().all(|url| url == ENDPOINT));
}

#[test]
fn mirror_treats_unknown_verdict_as_no_alert() {
    let client = MockHttpClient::new().reply(200, "drowsy").reply(200, "sleepy?");
    let mut a = Alarm::boot(AlarmConfig::mirror(), client);

    a.tick(0);
    assert!(a.buzzer());

    assert_eq!(a.tick(2_000), TickOutcome::Polled(None));
    assert!(!a.buzzer());
    assert!(a.sink.contains(&AppEvent::UnknownDecision));
    assert_eq!(a.service.last_decision(), None);
}

#[test]
fn verdict_body_whitespace_is_ignored() {
    let client = MockHttpClient::new().reply(200, "drowsy\r\n");
    let mut a = Alarm::boot(AlarmConfig::mirror(), client);
    assert_eq!(a.tick(0), TickOutcome::Polled(Some(RemoteDecision::Drowsy)));
}

#[test]
fn over_long_body_is_not_read_as_a_verdict() {
    let body = format!("drowsy{}", " ".repeat(100));
    let client = MockHttpClient::new().reply(200, &body);
    let mut a = Alarm::boot(AlarmConfig::mirror(), client);

    assert_eq!(a.tick(0), TickOutcome::Polled(None));
    assert!(!a.buzzer());
    assert!(a.sink.contains(&AppEvent::UnknownDecision));
}

// ── Pulse policy ──────────────────────────────────────────────

#[test]
fn pulse_sounds_for_fixed_duration_then_waits_a_full_interval() {
    let client = MockHttpClient::new().reply(200, "1").reply(200, "0").reply(200, "1");
    let mut a = Alarm::boot(AlarmConfig::pulse(), client);

    assert_eq!(a.tick(0), TickOutcome::Polled(Some(RemoteDecision::Triggered)));
    assert!(a.buzzer());

    // Polls are suspended while the pulse runs.
    for t in [500, 1_000, 1_999] {
        assert_eq!(a.tick(t), TickOutcome::Pulsing);
    }
    assert_eq!(a.client.requests.len(), 1);

    assert_eq!(a.tick(2_000), TickOutcome::PulseEnded);
    assert!(!a.buzzer());

    assert_eq!(a.tick(2_100), TickOutcome::Idle);
    assert_eq!(a.tick(2_500), TickOutcome::Polled(Some(RemoteDecision::Clear)));
    assert!(!a.buzzer());

    assert_eq!(a.tick(3_000), TickOutcome::Polled(Some(RemoteDecision::Triggered)));
    assert!(a.buzzer());
}

#[test]
fn pulse_ignores_non_alert_verdicts() {
    let client = MockHttpClient::new().reply(200, "0").reply(200, "normal");
    let mut a = Alarm::boot(AlarmConfig::pulse(), client);

    a.tick(0);
    a.tick(500);

    assert_eq!(a.hw.set_calls(Actuator::Buzzer), 0);
    assert!(!a.service.buzzer_on());
}

#[test]
fn corrupt_body_does_not_trigger_a_pulse() {
    let client = MockHttpClient::new().reply_bytes(200, b"1\xFF\xFE").reply(200, "1");
    let mut a = Alarm::boot(AlarmConfig::pulse(), client);

    assert_eq!(a.tick(0), TickOutcome::Polled(None));
    assert_eq!(a.hw.set_calls(Actuator::Buzzer), 0);

    assert_eq!(a.tick(500), TickOutcome::Polled(Some(RemoteDecision::Triggered)));
    assert!(a.buzzer());
}

// ── Failures ──────────────────────────────────────────────────

#[test]
fn transport_failure_leaves_buzzer_unchanged() {
    let client = MockHttpClient::new()
        .reply(200, "drowsy")
        .fail(TransportError::Connect)
        .reply(503, "normal");
    let mut a = Alarm::boot(AlarmConfig::mirror(), client);

    a.tick(0);
    let calls = a.hw.calls.len();

    assert_eq!(
        a.tick(2_000),
        TickOutcome::FetchFailed(FetchError::Transport(TransportError::Connect))
    );
    assert_eq!(a.tick(4_000), TickOutcome::FetchFailed(FetchError::Status(503)));

    assert_eq!(a.hw.calls.len(), calls);
    assert!(a.buzzer());
    assert_eq!(a.sink.count(|e| matches!(e, AppEvent::FetchFailed(_))), 2);
}

#[test]
fn link_down_skips_the_fetch_and_keeps_the_interval() {
    let client = MockHttpClient::new().reply(200, "drowsy");
    let mut a = Alarm::boot(AlarmConfig::mirror(), client);

    let outcome = a.service.tick(0, false, &mut a.client, &mut a.hw, &mut a.sink);
    assert_eq!(outcome, TickOutcome::LinkDown);
    assert!(a.client.requests.is_empty());
    assert!(a.sink.contains(&AppEvent::LinkDown));

    assert_eq!(a.tick(1_000), TickOutcome::Idle);
    assert_eq!(a.tick(2_000), TickOutcome::Polled(Some(RemoteDecision::Drowsy)));
    assert!(a.buzzer());
}
