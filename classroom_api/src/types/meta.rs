use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Cursor-style page envelope returned by every list endpoint.
///
/// `count` falls back to 0 when missing, null, negative or not a number,
/// and `results` falls back to an empty list when missing, null or not a
/// list. A record that cannot be decoded is replaced by `T::default()` so
/// the rest of the page survives and page sizes stay accurate.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(bound(deserialize = "T: DeserializeOwned + Default"))]
pub struct PaginatedResponse<T> {
    #[serde(default, deserialize_with = "lenient_count")]
    pub count: u64,
    #[serde(default)]
    pub next: Option<String>,
    #[serde(default)]
    pub previous: Option<String>,
    #[serde(default = "Vec::new", deserialize_with = "lenient_results")]
    pub results: Vec<T>,
}

impl<T> Default for PaginatedResponse<T> {
    fn default() -> Self {
        Self {
            count: 0,
            next: None,
            previous: None,
            results: Vec::new(),
        }
    }
}

impl<T> PaginatedResponse<T> {
    pub fn has_next(&self) -> bool {
        self.next.is_some()
    }

    pub fn has_previous(&self) -> bool {
        self.previous.is_some()
    }
}

fn lenient_count<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(count_from_value).unwrap_or(0))
}

fn count_from_value(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n.as_u64().or_else(|| {
            n.as_f64()
                .filter(|f| f.is_finite() && *f >= 0.0)
                .map(|f| f as u64)
        }),
        Value::String(s) => s.trim().parse::<u64>().ok(),
        _ => None,
    }
}

fn lenient_results<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let records = match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Array(records)) => records,
        _ => return Ok(Vec::new()),
    };
    Ok(records
        .into_iter()
        .enumerate()
        .map(|(position, record)| {
            T::deserialize(record).unwrap_or_else(|e| {
                tracing::warn!("Skipping undecodable record at position {}: {}", position, e);
                T::default()
            })
        })
        .collect())
}
