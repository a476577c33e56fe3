//! Blocking REST client core for the restaurant point-of-sale backend.
//!
//! # Overview
//! Five generic verb templates (`get`, `get_list`, `post`, `put`, `delete`)
//! turn any serde type into a JSON call against the backend. A single status
//! policy decides what each `(status, body)` pair means, and every failure
//! surfaces as one `ClientError` tagged by `ErrorKind`. The resource
//! methods (`list_drinks`, `update_cashier`, `login`, ...) are one-line
//! delegations to those templates.
//!
//! # Design
//! - `ApiClient` is immutable after construction and holds no per-call
//!   state, so one instance can serve many threads.
//! - Each call blocks the calling thread for exactly one exchange; there is
//!   no retry, backoff or per-call deadline. The only timeout is the connect
//!   timeout in `ClientConfig`.
//! - `Transport` and `Codec` are traits so tests can script responses or
//!   force decode failures without a server.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod client;
pub mod codec;
pub mod config;
pub mod error;
mod facade;
pub mod http;
pub mod policy;
pub mod types;

pub use client::ApiClient;
pub use codec::{Codec, CodecError, JsonCodec};
pub use config::ClientConfig;
pub use error::{ClientError, ErrorKind};
pub use http::{HttpMethod, HttpRequest, HttpResponse, Transport, TransportError, UreqTransport};
pub use types::{Appetizer, Cashier, Drink, HealthStatus, MainCourse, Menu, User};
