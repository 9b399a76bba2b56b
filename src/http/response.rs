//! Transport-independent HTTP response.

use std::borrow::Cow;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub status: u16,
    pub content_type: &'static str,
    pub body: Cow<'static, str>,
}

impl Response {
    pub fn html(body: impl Into<Cow<'static, str>>) -> Self {
        Self { status: 200, content_type: "text/html", body: body.into() }
    }

    pub fn text(body: impl Into<Cow<'static, str>>) -> Self {
        Self { status: 200, content_type: "text/plain", body: body.into() }
    }

    pub fn bad_request(message: &'static str) -> Self {
        Self { status: 400, content_type: "text/plain", body: Cow::Borrowed(message) }
    }

    pub fn not_found() -> Self {
        Self { status: 404, content_type: "text/plain", body: Cow::Borrowed("Not found") }
    }
}
