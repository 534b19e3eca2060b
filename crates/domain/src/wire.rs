//! Lenient JSON decoding shared by daemon verdicts and policy documents.
//!
//! Both producers marshal Go structs, so decoding follows `encoding/json`:
//! object keys match case-insensitively and `null` reads as the zero value.

use serde::de::{DeserializeOwned, Error as _};
use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

/// Decodes `T` from an object whose keys are lower-cased first.
///
/// `T` must name its fields in lower case. A `null` object decodes as an
/// empty one, leaving every field at its default.
pub(crate) fn decode_folded<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let folded = match Value::deserialize(deserializer)? {
        Value::Object(fields) => fold_keys(fields),
        Value::Null => Map::new(),
        other => {
            return Err(D::Error::custom(format!(
                "invalid type: {}, expected an object",
                kind(&other)
            )))
        }
    };

    T::deserialize(Value::Object(folded)).map_err(D::Error::custom)
}

/// Reads an explicit `null` as `T::default()`.
pub(crate) fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn fold_keys(fields: Map<String, Value>) -> Map<String, Value> {
    fields
        .into_iter()
        .map(|(key, value)| (key.to_ascii_lowercase(), value))
        .collect()
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "sequence",
        Value::Object(_) => "map",
    }
}
