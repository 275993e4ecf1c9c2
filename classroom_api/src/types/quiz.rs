use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{lenient, LectureID};

pub type QuizID = i64;
pub type QuestionID = i64;
pub type AttemptID = i64;

/// A quiz as returned by `/quizzes/quizzes/`.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(default)]
pub struct QuizRecord {
    #[serde(deserialize_with = "lenient::id")]
    pub id: QuizID,
    #[serde(deserialize_with = "lenient::integer")]
    pub lecture: Option<LectureID>,
    #[serde(deserialize_with = "lenient::string")]
    pub title: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub description: Option<String>,
    #[serde(deserialize_with = "lenient::boolean")]
    pub is_mandatory: Option<bool>,
    #[serde(deserialize_with = "lenient::raw")]
    pub passing_grade: Option<Value>,
    #[serde(deserialize_with = "lenient::integer")]
    pub max_attempts: Option<i64>,
    #[serde(deserialize_with = "lenient::string")]
    pub grading_method: Option<String>,
    #[serde(deserialize_with = "lenient::integer")]
    pub time_limit_minutes: Option<i64>,
    #[serde(deserialize_with = "lenient::boolean")]
    pub is_published: Option<bool>,
}

/// A student's attempt at a quiz.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(default)]
pub struct AttemptRecord {
    #[serde(deserialize_with = "lenient::id")]
    pub id: AttemptID,
    #[serde(deserialize_with = "lenient::integer")]
    pub quiz: Option<QuizID>,
    #[serde(deserialize_with = "lenient::string")]
    pub student_name: Option<String>,
    #[serde(deserialize_with = "lenient::raw")]
    pub score: Option<Value>,
    #[serde(deserialize_with = "lenient::string")]
    pub status: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub submitted_at: Option<String>,
}
