//! HTTP client adapter for the drowsiness alarm.
//!
//! Every [`get`](HttpClientPort::get) opens a fresh connection with the
//! transport's default timeout, submits one GET, reads the body up to one
//! byte past [`HTTP_BODY_MAX`] and closes.  No keep-alive and no retry: the
//! alarm polls again on its next interval.

use embedded_svc::http::Status;
use embedded_svc::http::client::Client;
use embedded_svc::io::Read;
use esp_idf_svc::http::client::{Configuration, EspHttpConnection};

use crate::app::ports::{HttpClientPort, HttpReply, HTTP_BODY_MAX};
use crate::error::TransportError;

#[derive(Debug, Default)]
pub struct EspHttpClient;

impl EspHttpClient {
    pub fn new() -> Self {
        Self
    }
}

impl HttpClientPort for EspHttpClient {
    fn get(&mut self, url: &str) -> Result<HttpReply, TransportError> {
        let connection = EspHttpConnection::new(&Configuration::default())
            .map_err(|_| TransportError::Connect)?;
        let mut client = Client::wrap(connection);

        let request = client.get(url).map_err(|_| TransportError::Connect)?;
        let mut response = request.submit().map_err(|_| TransportError::Request)?;
        let status = response.status();

        // The extra byte tells a full-size body from an over-long one.
        let mut buf = [0u8; HTTP_BODY_MAX + 1];
        let mut len = 0;
        while len < buf.len() {
            let n = response.read(&mut buf[len..]).map_err(|_| TransportError::Read)?;
            if n == 0 {
                break;
            }
            len += n;
        }

        Ok(HttpReply::new(status, &buf[..len]))
    }
}
