//! Web UI of the relay station: routing and response rendering.
//!
//! [`dispatch`] maps a parsed [`Route`] onto [`StationService`] calls and
//! renders the result.  It knows nothing about the HTTP server; the
//! ESP-IDF adapter feeds it URIs and writes the [`Response`] back.

pub mod response;
pub mod route;

pub use response::Response;
pub use route::Route;

use crate::app::ports::{ActuatorPort, DisplayPort, EventSink, SensorPort};
use crate::app::station::StationService;
use crate::app::status;

/// Control page served at `/`.
pub const INDEX_HTML: &str = include_str!("../../assets/index.html");

pub fn dispatch(
    route: Route<'_>,
    now_ms: u64,
    station: &mut StationService,
    hw: &mut (impl SensorPort + ActuatorPort + DisplayPort),
    sink: &mut impl EventSink,
) -> Response {
    match route {
        Route::Index => Response::html(INDEX_HTML),
        Route::Relay { relay, state } => match station.handle_relay_request(relay, state, hw, sink) {
            Ok(cmd) => Response::text(status::relay_text(cmd.relay, cmd.state.is_on())),
            Err(e) => Response::bad_request(e.message()),
        },
        Route::Power => {
            let power = station.sample_power(now_ms, hw, sink);
            Response::html(status::power_text(power.power_w, power.energy_wh))
        }
        Route::Object => {
            let presence = station.sample_presence(now_ms, hw, sink);
            Response::html(status::presence_text(presence))
        }
        Route::NotFound => Response::not_found(),
    }
}
