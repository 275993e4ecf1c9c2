use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::lenient;

pub type CourseID = i64;

/// A course as returned by `/courses/courses/`.
///
/// Every field is optional on the wire and decoded leniently; `price` and
/// `student_count` arrive either as numbers or as decimal strings, so they
/// are kept raw.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(default)]
pub struct CourseRecord {
    #[serde(deserialize_with = "lenient::id")]
    pub id: CourseID,
    #[serde(deserialize_with = "lenient::string")]
    pub title: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub description: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub difficulty_level: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub published_at: Option<String>,
    #[serde(deserialize_with = "lenient::raw")]
    pub price: Option<Value>,
    #[serde(deserialize_with = "lenient::string")]
    pub category: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub thumbnail: Option<String>,
    #[serde(deserialize_with = "lenient::raw")]
    pub student_count: Option<Value>,
    #[serde(deserialize_with = "lenient::string")]
    pub status: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub instructor_name: Option<String>,
    #[serde(deserialize_with = "lenient::boolean")]
    pub is_price_locked: Option<bool>,
}
