//! Request/response descriptors and the blocking transport that exchanges them.
//!
//! # Design
//! `HttpRequest` and `HttpResponse` describe one exchange as plain data. They
//! are built per call and dropped once the status policy has looked at them.
//! The `Transport` trait is the only place the client touches the network;
//! everything above it works on these values, so tests can swap in a
//! scripted transport and never open a socket.
//!
//! `UreqTransport` is the default executor. It owns one long-lived
//! `ureq::Agent` (and therefore its connection pool), makes a single attempt
//! per call and hands non-2xx responses back as data rather than errors.
//! Redirects are not followed: a 3xx is returned as-is so the status policy
//! sees it.

use std::io;

use thiserror::Error;

use crate::config::ClientConfig;

pub const APPLICATION_JSON: &str = "application/json";

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }
}

/// An HTTP request described as plain data.
///
/// `path` holds the absolute URL (`base_url` joined with the resource path).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub path: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl HttpRequest {
    /// Build a request with the JSON headers every call carries.
    ///
    /// `Accept` is always set; `Content-Type` only when there is a payload.
    pub fn json(method: HttpMethod, url: String, body: Option<String>) -> Self {
        let mut headers = vec![("accept".to_string(), APPLICATION_JSON.to_string())];
        if body.is_some() {
            headers.push(("content-type".to_string(), APPLICATION_JSON.to_string()));
        }
        Self {
            method,
            path: url,
            headers,
            body,
        }
    }
}

/// An HTTP response described as plain data. An empty `body` means no content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            headers: Vec::new(),
            body: body.into(),
        }
    }
}

/// Raw failures of a single exchange. Interpretation happens in the client.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Name resolution, refused connection, timeout or a failed body read.
    #[error("connection failed: {0}")]
    Connection(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// The blocking wait was interrupted before a response arrived.
    #[error("interrupted while waiting for the response")]
    Interrupted(#[source] io::Error),

    /// A status line arrived but the body was larger than the configured limit.
    #[error("response body with status {status} exceeds {limit} bytes")]
    BodyTooLarge { status: u16, limit: u64 },
}

/// Executes one blocking request/response exchange.
///
/// Implementations must be safe to share across threads; the client holds a
/// single instance for its whole lifetime.
pub trait Transport: Send + Sync {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError>;
}

impl<T: Transport + ?Sized> Transport for std::sync::Arc<T> {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        (**self).execute(request)
    }
}

/// Default transport backed by a `ureq::Agent`.
///
/// Bodies are read up to `ClientConfig::max_body_size` (10 MiB unless
/// configured); a longer body fails with `TransportError::BodyTooLarge`.
#[derive(Clone)]
pub struct UreqTransport {
    agent: ureq::Agent,
    max_body_size: u64,
}

impl UreqTransport {
    pub fn new(config: &ClientConfig) -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .max_redirects(0)
            .timeout_connect(Some(config.connect_timeout()))
            .build()
            .new_agent();
        Self {
            agent,
            max_body_size: config.max_body_size(),
        }
    }
}

impl Transport for UreqTransport {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        let url = request.path.as_str();
        let result = match (request.method, request.body.as_deref()) {
            (HttpMethod::Get, _) => with_headers(self.agent.get(url), request).call(),
            (HttpMethod::Delete, _) => with_headers(self.agent.delete(url), request).call(),
            (HttpMethod::Post, Some(body)) => {
                with_headers(self.agent.post(url), request).send(body.as_bytes())
            }
            (HttpMethod::Post, None) => with_headers(self.agent.post(url), request).send_empty(),
            (HttpMethod::Put, Some(body)) => {
                with_headers(self.agent.put(url), request).send(body.as_bytes())
            }
            (HttpMethod::Put, None) => with_headers(self.agent.put(url), request).send_empty(),
        };

        let mut response = result.map_err(map_ureq_error)?;
        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_string(), v.to_string()))
            })
            .collect();
        let body = response
            .body_mut()
            .with_config()
            .limit(self.max_body_size)
            .read_to_string()
            .map_err(|err| match err {
                ureq::Error::BodyExceedsLimit(limit) => {
                    TransportError::BodyTooLarge { status, limit }
                }
                other => map_ureq_error(other),
            })?;

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}

/// Apply the descriptor's headers to a ureq request builder.
fn with_headers<B>(
    mut builder: ureq::RequestBuilder<B>,
    request: &HttpRequest,
) -> ureq::RequestBuilder<B> {
    for (name, value) in &request.headers {
        builder = builder.header(name.as_str(), value.as_str());
    }
    builder
}

fn map_ureq_error(err: ureq::Error) -> TransportError {
    match err {
        ureq::Error::Io(io_err) if io_err.kind() == io::ErrorKind::Interrupted => {
            TransportError::Interrupted(io_err)
        }
        other => TransportError::Connection(Box::new(other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_request_carries_accept_only() {
        let req = HttpRequest::json(HttpMethod::Get, "http://h/api/drinks".to_string(), None);
        assert_eq!(
            req.headers,
            vec![("accept".to_string(), "application/json".to_string())]
        );
        assert!(req.body.is_none());
    }

    #[test]
    fn payload_request_adds_content_type() {
        let req = HttpRequest::json(
            HttpMethod::Post,
            "http://h/api/drinks".to_string(),
            Some("{}".to_string()),
        );
        assert!(req
            .headers
            .contains(&("content-type".to_string(), "application/json".to_string())));
        assert!(req
            .headers
            .contains(&("accept".to_string(), "application/json".to_string())));
    }

    #[test]
    fn method_names_match_the_wire() {
        assert_eq!(HttpMethod::Get.as_str(), "GET");
        assert_eq!(HttpMethod::Post.as_str(), "POST");
        assert_eq!(HttpMethod::Put.as_str(), "PUT");
        assert_eq!(HttpMethod::Delete.as_str(), "DELETE");
    }

    #[test]
    fn interrupted_io_maps_to_interrupted() {
        let err = ureq::Error::Io(io::Error::new(io::ErrorKind::Interrupted, "signal"));
        assert!(matches!(map_ureq_error(err), TransportError::Interrupted(_)));
    }

    #[test]
    fn other_io_maps_to_connection() {
        let err = ureq::Error::Io(io::Error::new(io::ErrorKind::ConnectionRefused, "refused"));
        assert!(matches!(map_ureq_error(err), TransportError::Connection(_)));
    }
}
