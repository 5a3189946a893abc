//! Lenient field deserializers for loosely typed API attributes.

use serde::de::{DeserializeOwned, Error};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Treat `null` like a missing value.
pub fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Accept a string or a number, keeping its textual form.
pub fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(other) => Err(D::Error::custom(format!("expected string or number, got {other}"))),
    }
}

/// Parse an object that may arrive embedded as a JSON string.
///
/// The extended metadata attribute (`E`) is a serialized JSON document on
/// older API versions and an object on newer ones.
pub fn embedded_json<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) if s.trim().is_empty() => Ok(None),
        Some(Value::String(s)) => serde_json::from_str(&s).map(Some).map_err(D::Error::custom),
        Some(value) => serde_json::from_value(value).map(Some).map_err(D::Error::custom),
    }
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Inner {
        a: i32,
    }

    #[derive(Debug, Deserialize)]
    struct Outer {
        #[serde(default, deserialize_with = "super::string_or_number")]
        volume: Option<String>,
        #[serde(default, deserialize_with = "super::embedded_json")]
        inner: Option<Inner>,
        #[serde(default, deserialize_with = "super::nullable")]
        list: Vec<u32>,
    }

    #[test]
    fn test_string_or_number() {
        let outer: Outer = serde_json::from_str(r#"{"volume": 12}"#).unwrap();
        assert_eq!(outer.volume.as_deref(), Some("12"));

        let outer: Outer = serde_json::from_str(r#"{"volume": "12a"}"#).unwrap();
        assert_eq!(outer.volume.as_deref(), Some("12a"));

        assert!(serde_json::from_str::<Outer>(r#"{"volume": [1]}"#).is_err());
    }

    #[test]
    fn test_embedded_json_accepts_string_and_object() {
        let outer: Outer = serde_json::from_str(r#"{"inner": "{\"a\": 3}"}"#).unwrap();
        assert_eq!(outer.inner, Some(Inner { a: 3 }));

        let outer: Outer = serde_json::from_str(r#"{"inner": {"a": 4}}"#).unwrap();
        assert_eq!(outer.inner, Some(Inner { a: 4 }));

        let outer: Outer = serde_json::from_str(r#"{"inner": ""}"#).unwrap();
        assert_eq!(outer.inner, None);

        assert!(serde_json::from_str::<Outer>(r#"{"inner": "{broken"}"#).is_err());
    }

    #[test]
    fn test_nullable_list() {
        let outer: Outer = serde_json::from_str(r#"{"list": null}"#).unwrap();
        assert!(outer.list.is_empty());

        let outer: Outer = serde_json::from_str("{}").unwrap();
        assert!(outer.list.is_empty());
    }
}
