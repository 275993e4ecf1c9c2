use serde::{Deserialize, Serialize};

use super::{lenient, CourseID};

pub type LectureID = i64;

/// A lecture as returned by `/courses/lectures/`.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(default)]
pub struct LectureRecord {
    #[serde(deserialize_with = "lenient::id")]
    pub id: LectureID,
    #[serde(deserialize_with = "lenient::integer")]
    pub course: Option<CourseID>,
    #[serde(deserialize_with = "lenient::string")]
    pub title: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub description: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub lecture_type: Option<String>,
    #[serde(deserialize_with = "lenient::boolean")]
    pub is_free: Option<bool>,
    #[serde(deserialize_with = "lenient::integer")]
    pub duration_minutes: Option<i64>,
    #[serde(deserialize_with = "lenient::integer")]
    pub order: Option<i64>,
    #[serde(deserialize_with = "lenient::string")]
    pub video_url: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub created_at: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub updated_at: Option<String>,
}
