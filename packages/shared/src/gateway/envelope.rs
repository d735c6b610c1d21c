//! Response envelope normalization.
//!
//! The gateway does not answer with a consistent shape. A payload may arrive as
//! a plain JSON object, as a JSON string that holds the object, or as a
//! Lambda-proxy object whose `body` field is itself a JSON string (possibly
//! string-encoded again). Everything is unwrapped here, once, before any
//! service looks at a `success` flag.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::repositories::errors::gateway_errors::GatewayError;

/// A decoded gateway response together with its HTTP status.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse<T> {
    pub status: u16,
    pub body: T,
}

impl<T> ApiResponse<T> {
    pub fn new(status: u16, body: T) -> Self {
        ApiResponse { status, body }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn is_created(&self) -> bool {
        self.status == 201
    }
}

/// Unwraps string encoding and `body` nesting until a non-envelope value remains.
pub fn normalize_envelope(raw: &str) -> Result<Value, serde_json::Error> {
    let mut value: Value = serde_json::from_str(raw)?;
    loop {
        value = match value {
            Value::String(inner) => serde_json::from_str(&inner)?,
            Value::Object(mut map) => match map.remove("body") {
                Some(Value::String(inner)) => serde_json::from_str(&inner)?,
                Some(other) => {
                    map.insert("body".to_string(), other);
                    return Ok(Value::Object(map));
                }
                None => return Ok(Value::Object(map)),
            },
            other => return Ok(other),
        };
    }
}

/// Turns a raw HTTP exchange into a typed response.
///
/// 5xx is always an error. Anything else is decoded and returned with its
/// status so callers can apply their own acceptance rule. An empty body
/// decodes to `T::default()`.
pub fn decode_response<T>(status: u16, raw: &str) -> Result<ApiResponse<T>, GatewayError>
where
    T: DeserializeOwned + Default,
{
    if status >= 500 {
        return Err(GatewayError::Server {
            status,
            message: raw.chars().take(200).collect(),
        });
    }

    if raw.trim().is_empty() {
        return Ok(ApiResponse::new(status, T::default()));
    }

    let value = normalize_envelope(raw).map_err(|e| GatewayError::Decode(e.to_string()))?;
    let body = serde_json::from_value(value).map_err(|e| GatewayError::Decode(e.to_string()))?;
    Ok(ApiResponse::new(status, body))
}
