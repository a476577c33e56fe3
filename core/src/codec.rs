//! Payload serialization behind a swappable interface.
//!
//! # Design
//! The client is generic over `Codec` so the decode-failure path can be
//! exercised on its own. The target shape is the type parameter: a record
//! type for `get`/`post`/`put`, `Vec<R>` for `get_list`.

use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

/// A payload could not be encoded or a body could not be decoded.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct CodecError {
    message: String,
    #[source]
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl CodecError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    pub fn wrap(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self {
            message: err.to_string(),
            source: Some(Box::new(err)),
        }
    }
}

pub trait Codec: Send + Sync {
    fn encode<T: Serialize + ?Sized>(&self, value: &T) -> Result<String, CodecError>;

    fn decode<R: DeserializeOwned>(&self, body: &str) -> Result<R, CodecError>;
}

/// JSON codec backed by `serde_json`.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

impl Codec for JsonCodec {
    fn encode<T: Serialize + ?Sized>(&self, value: &T) -> Result<String, CodecError> {
        serde_json::to_string(value).map_err(CodecError::wrap)
    }

    fn decode<R: DeserializeOwned>(&self, body: &str) -> Result<R, CodecError> {
        serde_json::from_str(body).map_err(CodecError::wrap)
    }
}
