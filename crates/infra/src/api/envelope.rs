//! Response envelope unwrapping
//!
//! Every endpoint answers `{ success, message, data? }`. List endpoints nest
//! `{ <resource>: [...], pagination: {...} }` inside `data`, but not all of
//! them consistently, so all unwrapping goes through [`normalize_payload`].

use dealerdesk_domain::{Paginated, Pagination};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use super::errors::ApiError;

/// The `{success, message, data}` wrapper
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope<T = Value> {
    /// Absent on a few legacy endpoints; treated as success
    #[serde(default = "default_success")]
    pub success: bool,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub message: String,
    #[serde(default)]
    pub data: Option<T>,
}

fn default_success() -> bool {
    true
}

fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

impl<T> Envelope<T> {
    /// `data` on success; a rejection carrying `message` otherwise, even
    /// when `data` is present.
    pub fn into_data(self) -> Result<Option<T>, ApiError> {
        if self.success {
            Ok(self.data)
        } else if self.message.trim().is_empty() {
            Err(ApiError::Rejected("The request was not successful.".to_string()))
        } else {
            Err(ApiError::Rejected(self.message))
        }
    }
}

impl Envelope<Value> {
    /// Parse a raw body. An empty body (204, 304) is an empty success.
    pub fn parse(body: &[u8]) -> Result<Self, ApiError> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self { success: true, message: String::new(), data: None });
        }

        match serde_json::from_slice::<Value>(body) {
            Ok(Value::Object(map)) if map.contains_key("success") || map.contains_key("data") => {
                serde_json::from_value(Value::Object(map))
                    .map_err(|err| ApiError::Decode(err.to_string()))
            }
            // Bare payload without an envelope
            Ok(other) => Ok(Self { success: true, message: String::new(), data: Some(other) }),
            Err(err) => Err(ApiError::Decode(err.to_string())),
        }
    }
}

/// Select the payload for one resource out of an unwrapped `data` value.
///
/// Precedence, first match wins:
/// 1. `data[resource_key]` when that value is an object or array
/// 2. `data` itself
///
/// A scalar under `resource_key` is a field of the entity, not a wrapper
/// (a remark's `remark` text), so it does not match rule 1. A missing or
/// null `data` normalizes to `Value::Null`.
pub fn normalize_payload(data: Option<Value>, resource_key: Option<&str>) -> Value {
    let Some(data) = data else {
        return Value::Null;
    };

    match (resource_key, data) {
        (Some(key), Value::Object(mut map)) if is_wrapper(map.get(key)) => {
            map.remove(key).unwrap_or(Value::Null)
        }
        (_, other) => other,
    }
}

fn is_wrapper(value: Option<&Value>) -> bool {
    matches!(value, Some(Value::Object(_) | Value::Array(_)))
}

/// Decode a list payload into items plus optional pagination.
///
/// Accepts a bare array, or an object holding the array under
/// `resource_key` (then `items`) next to an optional `pagination` object.
/// Anything else is an empty page.
pub fn decode_page<T: DeserializeOwned>(
    data: Option<Value>,
    resource_key: &str,
) -> Result<Paginated<T>, ApiError> {
    let (items, pagination) = match data {
        Some(Value::Array(items)) => (Value::Array(items), None),
        Some(Value::Object(mut map)) => {
            let pagination = map.remove("pagination");
            let items = map
                .remove(resource_key)
                .or_else(|| map.remove("items"))
                .unwrap_or(Value::Array(Vec::new()));
            (items, pagination)
        }
        _ => (Value::Array(Vec::new()), None),
    };

    let items: Vec<T> = match items {
        Value::Null => Vec::new(),
        other => serde_json::from_value(other).map_err(|err| ApiError::Decode(err.to_string()))?,
    };

    let pagination = match pagination {
        Some(Value::Null) | None => None,
        Some(value) => Some(
            serde_json::from_value::<Pagination>(value)
                .map_err(|err| ApiError::Decode(err.to_string()))?,
        ),
    };

    Ok(Paginated { items, pagination })
}

/// Decode a normalized payload into `T`
pub fn decode<T: DeserializeOwned>(value: Value) -> Result<T, ApiError> {
    serde_json::from_value(value).map_err(|err| ApiError::Decode(err.to_string()))
}

/// Decode a normalized payload, substituting `T::default()` when absent
pub fn decode_or_default<T: DeserializeOwned + Default>(value: Value) -> Result<T, ApiError> {
    if value.is_null() {
        return Ok(T::default());
    }
    decode(value)
}
