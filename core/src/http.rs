//! HTTP request/response shapes and the injected transport seam.
//!
//! # Design
//! The translators describe HTTP traffic as plain data; the only component
//! that touches the network is whatever implements [`HttpClient`]. The
//! adapter never interprets status codes — a client implementation decides
//! what counts as a transport failure and reports it as `Error::Transport`.
//!
//! All fields use owned types (`String`, `Vec`) so values can move freely
//! across task boundaries during the `GET_MANY` fan-out.

use async_trait::async_trait;
use serde_json::Value;

use crate::error::Error;

/// HTTP method for a translated request. `Get` is the default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum HttpMethod {
    #[default]
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }
}

/// Method and optional serialized JSON body for a translated request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestOptions {
    pub method: HttpMethod,
    pub body: Option<String>,
}

/// Target of a translated request: a single URL, or an ordered list when one
/// abstract operation fans out into several HTTP calls (`GET_MANY` only).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestUrl {
    One(String),
    Many(Vec<String>),
}

/// A fully translated request, ready for the injected client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub url: RequestUrl,
    pub options: RequestOptions,
}

/// A response as delivered by the injected client: headers plus the parsed
/// JSON body.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponse {
    pub headers: Vec<(String, String)>,
    pub json: Value,
}

impl HttpResponse {
    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// The injected HTTP transport.
///
/// Implementations own everything network-related: connection handling,
/// timeouts, and the decision of which responses are failures. The adapter
/// passes `Error::Transport` values through unmodified.
#[async_trait]
pub trait HttpClient: Send + Sync {
    async fn fetch(&self, url: &str, options: &RequestOptions) -> Result<HttpResponse, Error>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn header_lookup_is_case_insensitive() {
        let response = HttpResponse {
            headers: vec![("Content-Range".to_string(), "items 0-9/100".to_string())],
            json: json!([]),
        };
        assert_eq!(response.header("content-range"), Some("items 0-9/100"));
        assert_eq!(response.header("CONTENT-RANGE"), Some("items 0-9/100"));
        assert_eq!(response.header("x-total-count"), None);
    }

    #[test]
    fn default_options_are_get_without_body() {
        let options = RequestOptions::default();
        assert_eq!(options.method, HttpMethod::Get);
        assert!(options.body.is_none());
    }
}
