//! Generic verb templates over a blocking transport.
//!
//! # Design
//! `ApiClient` holds a normalized `base_url`, a `Transport` and a `Codec`, and
//! nothing else; it is immutable after construction and can be shared across
//! threads without locking. Every call runs the same sequence:
//!
//! 1. `build_request` encodes the payload (if any) into an `HttpRequest`;
//! 2. the transport performs exactly one exchange;
//! 3. the template's handler asks `policy::interpret` what the
//!    `(status, body)` pair means;
//! 4. the body is decoded, or the call fails with a `ClientError`.
//!
//! The resource-specific methods in `facade` are one-line calls into the five
//! templates here, so the behavior of the whole client reduces to these
//! functions plus the status policy.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::codec::{Codec, JsonCodec};
use crate::config::{normalize_base_url, ClientConfig};
use crate::error::ClientError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse, Transport, UreqTransport};
use crate::policy::{self, Disposition, Expectation};

/// Blocking JSON client for the restaurant backend.
#[derive(Debug, Clone)]
pub struct ApiClient<T = UreqTransport, C = JsonCodec> {
    base_url: String,
    transport: T,
    codec: C,
}

impl ApiClient {
    /// Client over `ureq` and JSON with the default 5 second connect timeout.
    pub fn new(base_url: &str) -> Self {
        Self::with_config(&ClientConfig::new(base_url))
    }

    pub fn with_config(config: &ClientConfig) -> Self {
        Self {
            base_url: config.base_url().to_string(),
            transport: UreqTransport::new(config),
            codec: JsonCodec,
        }
    }
}

impl<T: Transport, C: Codec> ApiClient<T, C> {
    /// Assemble a client from explicit parts, e.g. a scripted transport or a
    /// failing codec in tests.
    pub fn with_parts(base_url: &str, transport: T, codec: C) -> Self {
        Self {
            base_url: normalize_base_url(base_url),
            transport,
            codec,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// `GET path`; `None` on 204 or an empty body.
    pub fn get<R: DeserializeOwned>(&self, path: &str) -> Result<Option<R>, ClientError> {
        let request = self.build_request(HttpMethod::Get, path, None::<&()>)?;
        self.send_and_handle(request, path, |exchange| {
            match exchange.disposition(Expectation::Optional) {
                Disposition::Absent => Ok(None),
                Disposition::Reject => Err(exchange.rejected()),
                _ => exchange.decode(&self.codec).map(Some),
            }
        })
    }

    /// `GET path` for a collection; an empty list on 204 or an empty body.
    pub fn get_list<R: DeserializeOwned>(&self, path: &str) -> Result<Vec<R>, ClientError> {
        let request = self.build_request(HttpMethod::Get, path, None::<&()>)?;
        self.send_and_handle(request, path, |exchange| {
            match exchange.disposition(Expectation::Collection) {
                Disposition::Absent => Ok(Vec::new()),
                Disposition::Reject => Err(exchange.rejected()),
                _ => exchange.decode(&self.codec),
            }
        })
    }

    pub fn post<B, R>(&self, path: &str, body: &B) -> Result<R, ClientError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let request = self.build_request(HttpMethod::Post, path, Some(body))?;
        self.send_for_value(request, path)
    }

    pub fn put<B, R>(&self, path: &str, body: &B) -> Result<R, ClientError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let request = self.build_request(HttpMethod::Put, path, Some(body))?;
        self.send_for_value(request, path)
    }

    /// `DELETE path`; any 2xx is success and the body is ignored.
    pub fn delete(&self, path: &str) -> Result<(), ClientError> {
        let request = self.build_request(HttpMethod::Delete, path, None::<&()>)?;
        self.send_and_handle(request, path, |exchange| {
            match exchange.disposition(Expectation::Nothing) {
                Disposition::Reject => Err(exchange.rejected()),
                _ => Ok(()),
            }
        })
    }

    /// Build the descriptor for one call, encoding `body` when present.
    pub fn build_request<B>(
        &self,
        method: HttpMethod,
        path: &str,
        body: Option<&B>,
    ) -> Result<HttpRequest, ClientError>
    where
        B: Serialize + ?Sized,
    {
        let payload = match body {
            Some(value) => Some(
                self.codec
                    .encode(value)
                    .map_err(|e| ClientError::encode(&action(method, path), path, e))?,
            ),
            None => None,
        };
        Ok(HttpRequest::json(
            method,
            format!("{}{path}", self.base_url),
            payload,
        ))
    }

    /// `post`/`put`: every non-rejected response must carry a value.
    fn send_for_value<R: DeserializeOwned>(
        &self,
        request: HttpRequest,
        path: &str,
    ) -> Result<R, ClientError> {
        self.send_and_handle(request, path, |exchange| {
            match exchange.disposition(Expectation::Required) {
                Disposition::Reject => Err(exchange.rejected()),
                _ => exchange.decode(&self.codec),
            }
        })
    }

    /// Run one exchange and hand the response to `handler`. Transport failures
    /// are wrapped here so no template has to deal with them.
    fn send_and_handle<R>(
        &self,
        request: HttpRequest,
        path: &str,
        handler: impl FnOnce(&Exchange<'_>) -> Result<R, ClientError>,
    ) -> Result<R, ClientError> {
        let action = action(request.method, path);
        let response = self
            .transport
            .execute(&request)
            .map_err(|e| ClientError::transport(&action, path, e))?;

        tracing::debug!(
            action = %action,
            status = response.status,
            body = %response.body,
            "received response"
        );

        handler(&Exchange {
            action: &action,
            path,
            response: &response,
        })
    }
}

/// One completed request/response pair, as seen by a template's handler.
struct Exchange<'a> {
    action: &'a str,
    path: &'a str,
    response: &'a HttpResponse,
}

impl Exchange<'_> {
    fn disposition(&self, expectation: Expectation) -> Disposition {
        policy::interpret(expectation, self.response.status, &self.response.body)
    }

    fn decode<R: DeserializeOwned>(&self, codec: &impl Codec) -> Result<R, ClientError> {
        codec.decode(&self.response.body).map_err(|e| {
            ClientError::decode(
                self.action,
                self.path,
                self.response.status,
                &self.response.body,
                e,
            )
        })
    }

    fn rejected(&self) -> ClientError {
        ClientError::server_status(
            self.action,
            self.path,
            self.response.status,
            &self.response.body,
        )
    }
}

fn action(method: HttpMethod, path: &str) -> String {
    format!("{} {path}", method.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::CodecError;
    use crate::error::ErrorKind;
    use crate::http::TransportError;
    use std::sync::Mutex;

    /// Replays one canned response and records the request it was given.
    struct Scripted {
        reply: Mutex<Option<Result<HttpResponse, TransportError>>>,
        seen: Mutex<Vec<HttpRequest>>,
    }

    impl Scripted {
        fn status(status: u16, body: &str) -> Self {
            Self::reply(Ok(HttpResponse::new(status, body)))
        }

        fn reply(reply: Result<HttpResponse, TransportError>) -> Self {
            Self {
                reply: Mutex::new(Some(reply)),
                seen: Mutex::new(Vec::new()),
            }
        }
    }

    impl Transport for Scripted {
        fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
            self.seen.lock().unwrap().push(request.clone());
            self.reply.lock().unwrap().take().expect("one exchange per test")
        }
    }

    struct FailingCodec;

    impl Codec for FailingCodec {
        fn encode<T: Serialize + ?Sized>(&self, _value: &T) -> Result<String, CodecError> {
            Err(CodecError::new("encode refused"))
        }

        fn decode<R: DeserializeOwned>(&self, _body: &str) -> Result<R, CodecError> {
            Err(CodecError::new("decode refused"))
        }
    }

    fn client(transport: Scripted) -> ApiClient<Scripted> {
        ApiClient::with_parts("http://localhost:8080/", transport, JsonCodec)
    }

    #[derive(Debug, serde::Deserialize, PartialEq)]
    struct Item {
        id: i64,
    }

    #[test]
    fn get_returns_decoded_value() {
        let c = client(Scripted::status(200, r#"{"id":7}"#));
        let item: Option<Item> = c.get("/api/items/7").unwrap();
        assert_eq!(item, Some(Item { id: 7 }));

        let seen = c.transport.seen.lock().unwrap();
        assert_eq!(seen[0].method, HttpMethod::Get);
        assert_eq!(seen[0].path, "http://localhost:8080/api/items/7");
        assert!(seen[0].body.is_none());
    }

    #[test]
    fn get_on_no_content_is_none() {
        let c = client(Scripted::status(204, ""));
        assert_eq!(c.get::<Item>("/api/items/1").unwrap(), None);
    }

    #[test]
    fn get_list_on_empty_body_is_empty() {
        let c = client(Scripted::status(200, "  "));
        assert!(c.get_list::<Item>("/api/items").unwrap().is_empty());
    }

    #[test]
    fn get_list_decodes_in_order() {
        let c = client(Scripted::status(200, r#"[{"id":2},{"id":1}]"#));
        let items: Vec<Item> = c.get_list("/api/items").unwrap();
        assert_eq!(items, vec![Item { id: 2 }, Item { id: 1 }]);
    }

    #[test]
    fn post_sends_encoded_body_with_json_headers() {
        let c = client(Scripted::status(201, r#"{"id":3}"#));
        let created: Item = c.post("/api/items", &serde_json::json!({"name": "x"})).unwrap();
        assert_eq!(created, Item { id: 3 });

        let seen = c.transport.seen.lock().unwrap();
        assert_eq!(seen[0].method, HttpMethod::Post);
        assert_eq!(seen[0].body.as_deref(), Some(r#"{"name":"x"}"#));
        assert!(seen[0]
            .headers
            .contains(&("content-type".to_string(), "application/json".to_string())));
    }

    #[test]
    fn put_with_empty_success_body_is_a_parse_error() {
        let c = client(Scripted::status(200, ""));
        let err = c.put::<_, Item>("/api/items/3", &serde_json::json!({})).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Parse);
        assert_eq!(err.status(), Some(200));
    }

    #[test]
    fn non_success_status_is_server_status() {
        let c = client(Scripted::status(500, "boom"));
        let err = c.get::<Item>("/api/items/1").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ServerStatus);
        assert_eq!(err.action(), "GET /api/items/1");
        assert!(err.to_string().contains("GET /api/items/1 failed with HTTP 500 body: boom"));
    }

    #[test]
    fn redirect_status_is_not_success() {
        let c = client(Scripted::status(302, "moved"));
        let err = c.post::<_, Item>("/api/items", &serde_json::json!({})).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ServerStatus);
        assert_eq!(err.status(), Some(302));
    }

    #[test]
    fn get_with_undecodable_body_is_a_parse_error() {
        let c = client(Scripted::status(200, "not json"));
        let err = c.get::<Item>("/api/items/1").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Parse);
        assert_eq!(err.body(), Some("not json"));

        let c = client(Scripted::status(200, "not json"));
        let err = c.get_list::<Item>("/api/items").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Parse);
    }

    #[test]
    fn delete_ignores_success_body() {
        let c = client(Scripted::status(200, "whatever, not json"));
        c.delete("/api/items/1").unwrap();
    }

    #[test]
    fn delete_not_found_is_server_status() {
        let c = client(Scripted::status(404, ""));
        let err = c.delete("/api/items/1").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ServerStatus);
        assert!(err.to_string().contains("404"));
    }

    #[test]
    fn decode_failure_from_injected_codec() {
        let c = ApiClient::with_parts("http://h", Scripted::status(200, r#"{"id":1}"#), FailingCodec);
        let err = c.get::<Item>("/api/items/1").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Parse);
        assert_eq!(err.body(), Some(r#"{"id":1}"#));
    }

    #[test]
    fn encode_failure_sends_nothing() {
        let c = ApiClient::with_parts("http://h", Scripted::status(200, "{}"), FailingCodec);
        let err = c.post::<_, Item>("/api/items", &1).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Parse);
        assert_eq!(err.status(), None);
        assert!(c.transport.seen.lock().unwrap().is_empty());
    }

    #[test]
    fn connection_failure_is_transport() {
        let c = client(Scripted::reply(Err(TransportError::Connection("refused".into()))));
        let err = c.get_list::<Item>("/api/items").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Transport);
        assert_eq!(err.to_string(), "I/O error during GET /api/items");
    }

    #[test]
    fn interruption_is_reported_and_not_swallowed() {
        use std::error::Error as _;

        let signal = std::io::Error::new(std::io::ErrorKind::Interrupted, "interrupted");
        let c = client(Scripted::reply(Err(TransportError::Interrupted(signal))));
        let err = c.get::<Item>("/api/items/1").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Interrupted);
        assert!(err.is_interrupted());
        let cause = err.source().unwrap().downcast_ref::<std::io::Error>().unwrap();
        assert_eq!(cause.kind(), std::io::ErrorKind::Interrupted);
    }

    #[test]
    fn client_is_shareable_across_threads() {
        fn assert_send_sync<S: Send + Sync>() {}
        assert_send_sync::<ApiClient>();
    }
}
