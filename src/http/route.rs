//! Request-target parsing for the relay station's web UI.

/// Routes the station serves.  Borrowed from the request URI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route<'a> {
    Index,
    Relay {
        relay: Option<&'a str>,
        state: Option<&'a str>,
    },
    Power,
    Object,
    NotFound,
}

impl<'a> Route<'a> {
    /// Match the path exactly; only `/relay` looks at the query string.
    pub fn parse(uri: &'a str) -> Self {
        let (path, query) = match uri.split_once('?') {
            Some((path, query)) => (path, query),
            None => (uri, ""),
        };
        match path {
            "/" => Self::Index,
            "/relay" => Self::Relay {
                relay: query_param(query, "relay"),
                state: query_param(query, "state"),
            },
            "/power" => Self::Power,
            "/object" => Self::Object,
            _ => Self::NotFound,
        }
    }
}

/// First value of `key` in an `a=1&b=2` query string.  A key without `=`
/// yields an empty value.  No percent-decoding: every value the UI sends
/// is plain ASCII.
pub fn query_param<'a>(query: &'a str, key: &str) -> Option<&'a str> {
    query
        .split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| pair.split_once('=').unwrap_or((pair, "")))
        .find(|(k, _)| *k == key)
        .map(|(_, v)| v)
}
