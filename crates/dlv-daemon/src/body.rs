//! Body decoding shared by the handlers.

use axum::body::Bytes;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::ApiError;

/// Decode a body whose fields are only echoed.
///
/// Objects are read field by field. Any other non-null JSON value carries no
/// fields, so every field comes back missing. `null` and invalid JSON fail.
pub(crate) fn decode_echo_body<T>(bytes: &Bytes) -> Result<T, ApiError>
where
    T: DeserializeOwned + Default,
{
    match serde_json::from_slice::<Value>(bytes)? {
        Value::Null => Err(ApiError::NullBody),
        v @ Value::Object(_) => Ok(serde_json::from_value(v)?),
        _ => Ok(T::default()),
    }
}

/// Logout takes no body, but one that is sent must still be JSON.
pub(crate) fn check_optional_json(bytes: &Bytes) -> Result<(), ApiError> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(());
    }
    serde_json::from_slice::<serde::de::IgnoredAny>(bytes)?;
    Ok(())
}
