//! Field decoders that never reject a record.
//!
//! The backend is loose about types (numbers as strings, flags as strings,
//! ids as null), so each decoder accepts any JSON value and turns what it
//! cannot use into `None` (or 0 for ids).

use serde::{Deserialize, Deserializer};
use serde_json::Value;

pub(crate) fn id<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(integer(deserializer)?.unwrap_or(0))
}

pub(crate) fn integer<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Value>::deserialize(deserializer)?
        .as_ref()
        .and_then(integer_from_value))
}

pub(crate) fn string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        Some(Value::Bool(b)) => Some(b.to_string()),
        _ => None,
    })
}

pub(crate) fn boolean<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Bool(b)) => Some(b),
        Some(Value::Number(n)) => n.as_f64().map(|f| f != 0.0),
        Some(Value::String(s)) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "1" => Some(true),
            "false" | "0" => Some(false),
            _ => None,
        },
        _ => None,
    })
}

/// Any value but `null` is kept raw for the item mappers to coerce.
pub(crate) fn raw<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Value>::deserialize(deserializer)?.filter(|v| !v.is_null()))
}

fn integer_from_value(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f.trunc() as i64)),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<i64>().ok().or_else(|| {
                s.parse::<f64>()
                    .ok()
                    .filter(|f| f.is_finite())
                    .map(|f| f.trunc() as i64)
            })
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Deserialize, Default, Debug)]
    #[serde(default)]
    struct Fields {
        #[serde(deserialize_with = "super::id")]
        id: i64,
        #[serde(deserialize_with = "super::integer")]
        n: Option<i64>,
        #[serde(deserialize_with = "super::string")]
        s: Option<String>,
        #[serde(deserialize_with = "super::boolean")]
        b: Option<bool>,
    }

    fn decode(value: serde_json::Value) -> Fields {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn integers_from_numbers_and_strings() {
        assert_eq!(decode(json!({"n": 45})).n, Some(45));
        assert_eq!(decode(json!({"n": "45"})).n, Some(45));
        assert_eq!(decode(json!({"n": 12.7})).n, Some(12));
        assert_eq!(decode(json!({"n": "soon"})).n, None);
        assert_eq!(decode(json!({"n": [1]})).n, None);
        assert_eq!(decode(json!({"n": null})).n, None);
    }

    #[test]
    fn ids_default_to_zero() {
        assert_eq!(decode(json!({"id": null})).id, 0);
        assert_eq!(decode(json!({"id": "9"})).id, 9);
        assert_eq!(decode(json!({})).id, 0);
    }

    #[test]
    fn strings_accept_scalars() {
        assert_eq!(decode(json!({"s": 7})).s.as_deref(), Some("7"));
        assert_eq!(decode(json!({"s": "Mona"})).s.as_deref(), Some("Mona"));
        assert_eq!(decode(json!({"s": {"name": "x"}})).s, None);
    }

    #[test]
    fn booleans_from_strings_and_numbers() {
        assert_eq!(decode(json!({"b": "true"})).b, Some(true));
        assert_eq!(decode(json!({"b": "False"})).b, Some(false));
        assert_eq!(decode(json!({"b": 1})).b, Some(true));
        assert_eq!(decode(json!({"b": "maybe"})).b, None);
    }
}
