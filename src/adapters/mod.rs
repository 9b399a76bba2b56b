//! Adapters: concrete implementations of the hexagonal port traits.
//!
//! | Adapter        | Implements         | Connects to                |
//! |----------------|--------------------|----------------------------|
//! | `hardware`     | SensorPort         | ESP32 ADC1, GPIO           |
//! |                | ActuatorPort       | Relay / buzzer GPIO        |
//! |                | DisplayPort        | LCD1602 over I²C           |
//! | `http_client`  | HttpClientPort     | ESP-IDF HTTP client        |
//! | `http_server`  | (dispatcher)       | ESP-IDF httpd              |
//! | `log_sink`     | EventSink          | Serial log output          |
//! | `time`         | (clock)            | ESP32 system timer         |
//! | `wifi`         | ConnectivityPort   | ESP-IDF WiFi STA           |

pub mod hardware;
#[cfg(target_os = "espidf")]
pub mod http_client;
pub mod http_server;
pub mod log_sink;
pub mod time;
pub mod wifi;
