//! Numeric IDs that arrive as JSON numbers in some payloads and as strings in
//! others (the `users` map of direct message deliveries uses strings).

use serde::{de, Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrString {
    Number(u64),
    String(String),
}

/// Deserialize a numeric ID from a number, a decimal string or `null`.
///
/// `null` and the empty string decode to `0`, like an absent field.
pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
    match Option::<NumberOrString>::deserialize(deserializer)? {
        None => Ok(0),
        Some(NumberOrString::Number(id)) => Ok(id),
        Some(NumberOrString::String(s)) if s.is_empty() => Ok(0),
        Some(NumberOrString::String(s)) => s
            .parse()
            .map_err(|_| de::Error::custom(format!("invalid numeric id {s:?}"))),
    }
}
