//! HTTP server adapter for the relay station.
//!
//! [`StationNode`] bundles the station service with its hardware and
//! event sink so one lock covers a whole request.  The device registers a
//! single wildcard handler that locks the shared `Arc<Mutex<StationNode>>`
//! and leaves routing to [`http::dispatch`].

#[cfg(target_os = "espidf")]
use std::sync::Arc;
use std::sync::Mutex;

#[cfg(target_os = "espidf")]
use embedded_svc::http::Query;
#[cfg(target_os = "espidf")]
use embedded_svc::io::Write;
#[cfg(target_os = "espidf")]
use esp_idf_svc::http::Method;
#[cfg(target_os = "espidf")]
use esp_idf_svc::http::server::{Configuration, EspHttpServer};
#[cfg(target_os = "espidf")]
use log::info;

use crate::adapters::time::Clock;
use crate::app::ports::{ActuatorPort, DisplayPort, EventSink, SensorPort};
use crate::app::station::StationService;
use crate::http::{self, Response, Route};

pub struct StationNode<H, S> {
    service: StationService,
    hw: H,
    sink: S,
    clock: Clock,
}

impl<H, S> StationNode<H, S>
where
    H: SensorPort + ActuatorPort + DisplayPort,
    S: EventSink,
{
    pub fn new(service: StationService, hw: H, sink: S, clock: Clock) -> Self {
        Self { service, hw, sink, clock }
    }

    /// Relays off, boot banner.
    pub fn start(&mut self) {
        self.service.start(&mut self.hw, &mut self.sink);
    }

    /// Redraw the LCD from current state.
    pub fn refresh_display(&mut self) {
        self.service.refresh_display(&mut self.hw, &mut self.sink);
    }

    /// Serve one request target (path plus optional query string).
    pub fn handle(&mut self, uri: &str) -> Response {
        let now_ms = self.clock.uptime_ms();
        http::dispatch(Route::parse(uri), now_ms, &mut self.service, &mut self.hw, &mut self.sink)
    }

    pub fn hardware(&self) -> &H {
        &self.hw
    }
}

/// Serve one request under the node lock.  A poisoned lock answers 500.
pub fn respond<H, S>(node: &Mutex<StationNode<H, S>>, uri: &str) -> Response
where
    H: SensorPort + ActuatorPort + DisplayPort,
    S: EventSink,
{
    match node.lock() {
        Ok(mut node) => node.handle(uri),
        Err(_) => Response {
            status: 500,
            content_type: "text/plain",
            body: "Internal error".into(),
        },
    }
}

/// Start a server whose one `/*` handler feeds every request to
/// [`respond`].  The server stops when the returned handle is dropped.
#[cfg(target_os = "espidf")]
pub fn serve<H, S>(node: Arc<Mutex<StationNode<H, S>>>, port: u16) -> anyhow::Result<EspHttpServer<'static>>
where
    H: SensorPort + ActuatorPort + DisplayPort + Send + 'static,
    S: EventSink + Send + 'static,
{
    let mut server = EspHttpServer::new(&Configuration {
        http_port: port,
        uri_match_wildcard: true,
        ..Default::default()
    })?;

    server.fn_handler("/*", Method::Get, move |req| -> anyhow::Result<()> {
        let response = respond(&node, req.uri());
        let mut out = req.into_response(response.status, None, &[("Content-Type", response.content_type)])?;
        out.write_all(response.body.as_bytes())?;
        Ok(())
    })?;

    info!("HTTP server listening on port {}", port);
    Ok(server)
}

#[cfg(all(test, not(target_os = "espidf")))]
mod tests {
    use super::*;
    use crate::app::events::AppEvent;
    use crate::app::state::Actuator;
    use crate::app::status::DisplayText;
    use crate::config::StationConfig;
    use crate::error::DisplayError;
    use crate::sensors::{InputChannel, SensorSample};

    #[derive(Default)]
    struct Rig {
        relays: [bool; 2],
        lcd: Option<DisplayText>,
    }

    impl SensorPort for Rig {
        fn sample(&mut self, channel: InputChannel, now_ms: u64) -> SensorSample {
            match channel {
                InputChannel::Current => SensorSample::analog(2048, now_ms),
                InputChannel::Presence => SensorSample::digital(true, now_ms),
            }
        }
    }

    impl ActuatorPort for Rig {
        fn set_actuator(&mut self, actuator: Actuator, on: bool) {
            match actuator {
                Actuator::Relay1 => self.relays[0] = on,
                Actuator::Relay2 => self.relays[1] = on,
                Actuator::Buzzer => {}
            }
        }
        fn all_off(&mut self) {
            self.relays = [false; 2];
        }
    }

    impl DisplayPort for Rig {
        fn show(&mut self, text: &DisplayText) -> Result<(), DisplayError> {
            self.lcd = Some(text.clone());
            Ok(())
        }
    }

    struct Quiet;

    impl EventSink for Quiet {
        fn emit(&mut self, _event: &AppEvent) {}
    }

    fn node() -> StationNode<Rig, Quiet> {
        let service = StationService::new(&StationConfig::default(), 0);
        let mut node = StationNode::new(service, Rig::default(), Quiet, Clock::new());
        node.start();
        node
    }

    #[test]
    fn routes_end_to_end() {
        let mut n = node();
        assert_eq!(n.hardware().lcd.as_ref().map(|t| t.lines[0].as_str()), Some("Initializing..."));

        let r = n.handle("/relay?relay=relay1&state=ON");
        assert_eq!((r.status, r.body.as_ref()), (200, "Relay 1 turned ON"));
        assert!(n.hardware().relays[0]);

        let r = n.handle("/object");
        assert_eq!(r.body, "No object detected");

        let r = n.handle("/power");
        assert!(r.body.starts_with("Power: 0.0"), "{}", r.body);
        assert_eq!(n.hardware().lcd.as_ref().map(|t| t.lines[0].as_str()), Some("R1: ON  R2: OFF"));

        assert_eq!(n.handle("/nope").status, 404);
        assert_eq!(n.handle("/").content_type, "text/html");
    }

    #[test]
    fn one_entry_point_serves_every_path() {
        let shared = Mutex::new(node());
        assert_eq!(respond(&shared, "/").status, 200);
        assert_eq!(respond(&shared, "/relay?relay=relay2&state=ON").status, 200);
        assert_eq!(respond(&shared, "/relay?relay=relay3&state=ON").status, 400);
        assert_eq!(respond(&shared, "/power").status, 200);
        assert_eq!(respond(&shared, "/object").status, 200);
        assert_eq!(respond(&shared, "/favicon.ico").status, 404);
        assert!(shared.lock().unwrap().hardware().relays[1]);
    }

    #[test]
    fn poisoned_lock_answers_500() {
        let shared = Mutex::new(node());
        let _ = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _guard = shared.lock().unwrap();
            panic!("handler panicked");
        }));
        let r = respond(&shared, "/power");
        assert_eq!((r.status, r.body.as_ref()), (500, "Internal error"));
    }
}
