//! Display items built from wire records.
//!
//! Every mapper is total: absent or malformed fields become an empty
//! string, zero, `false` or `None`, never an error.

use chrono::{DateTime, NaiveDate};
use classroom_api::types::{AttemptRecord, CourseRecord, LectureRecord, QuizRecord};
use serde::Serialize;
use serde_json::Value;

/// Thumbnail shown for courses without one.
pub const DEFAULT_COURSE_IMAGE: &str = "/images/home.webp";

const DATE_FORMAT: &str = "%-d %B %Y";

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Course {
    pub id: i64,
    pub title: String,
    pub description: String,
    /// Raw difficulty level, e.g. `beginner`.
    pub grade: String,
    /// Difficulty level with its first letter capitalised.
    pub grade_text: String,
    /// Publication date, e.g. `5 March 2024`; empty when unpublished.
    pub date: String,
    pub price: f64,
    /// Lower-cased category, for matching.
    pub category: String,
    /// Category as the server spelled it.
    pub category_text: String,
    pub image: String,
    pub students_count: i64,
    pub status: String,
    pub instructor: String,
    pub price_locked: bool,
}

pub fn map_course(_position: usize, record: CourseRecord) -> Course {
    let grade = record.difficulty_level.unwrap_or_default();
    let category_text = record.category.unwrap_or_default();
    Course {
        id: record.id,
        title: record.title.unwrap_or_default(),
        description: record.description.unwrap_or_default(),
        grade_text: capitalize_first(&grade),
        grade,
        date: format_date(record.published_at.as_deref()),
        price: coerce_f64(record.price.as_ref()),
        category: category_text.to_lowercase(),
        category_text,
        image: record
            .thumbnail
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| DEFAULT_COURSE_IMAGE.to_string()),
        students_count: coerce_i64(record.student_count.as_ref()),
        status: record.status.unwrap_or_default(),
        instructor: record.instructor_name.unwrap_or_default(),
        price_locked: record.is_price_locked.unwrap_or(false),
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Lecture {
    pub id: i64,
    pub course_id: Option<i64>,
    /// `Lecture {order}: {title}`.
    pub label: String,
    pub title: String,
    pub description: String,
    pub lecture_type: String,
    pub is_free: bool,
    pub duration_minutes: Option<i64>,
    pub order: i64,
    pub video_url: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

/// Lectures without an `order` are numbered by their position on the page.
pub fn map_lecture(position: usize, record: LectureRecord) -> Lecture {
    let title = record.title.unwrap_or_default();
    let number = record.order.unwrap_or(position as i64 + 1);
    Lecture {
        id: record.id,
        course_id: record.course,
        label: format!("Lecture {}: {}", number, title),
        title,
        description: record.description.unwrap_or_default(),
        lecture_type: record.lecture_type.unwrap_or_default(),
        is_free: record.is_free.unwrap_or(false),
        duration_minutes: record.duration_minutes,
        order: record.order.unwrap_or(position as i64),
        video_url: record.video_url.filter(|u| !u.is_empty()),
        created_at: record.created_at,
        updated_at: record.updated_at,
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Quiz {
    pub id: i64,
    pub lecture_id: Option<i64>,
    pub title: String,
    pub description: String,
    pub is_mandatory: bool,
    pub passing_grade: f64,
    pub max_attempts: i64,
    pub grading_method: String,
    pub time_limit_minutes: Option<i64>,
    pub is_published: bool,
    /// `published` or `draft`.
    pub status: String,
}

pub fn map_quiz(_position: usize, record: QuizRecord) -> Quiz {
    let is_published = record.is_published.unwrap_or(false);
    Quiz {
        id: record.id,
        lecture_id: record.lecture,
        title: record.title.unwrap_or_default(),
        description: record.description.unwrap_or_default(),
        is_mandatory: record.is_mandatory.unwrap_or(false),
        passing_grade: coerce_f64(record.passing_grade.as_ref()),
        max_attempts: record.max_attempts.unwrap_or(0),
        grading_method: record
            .grading_method
            .unwrap_or_else(|| "highest".to_string()),
        time_limit_minutes: record.time_limit_minutes,
        is_published,
        status: if is_published { "published" } else { "draft" }.to_string(),
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Attempt {
    pub id: i64,
    pub quiz_id: Option<i64>,
    pub student_name: String,
    pub score: f64,
    pub status: String,
    pub submitted: String,
}

pub fn map_attempt(_position: usize, record: AttemptRecord) -> Attempt {
    Attempt {
        id: record.id,
        quiz_id: record.quiz,
        student_name: record.student_name.unwrap_or_default(),
        score: coerce_f64(record.score.as_ref()),
        status: record.status.unwrap_or_default(),
        submitted: format_date(record.submitted_at.as_deref()),
    }
}

/// Upper-cases the first character.
pub fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Formats an RFC 3339 timestamp or `YYYY-MM-DD` date for display.
/// Anything else yields an empty string.
pub fn format_date(raw: Option<&str>) -> String {
    let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return String::new();
    };
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return dt.date_naive().format(DATE_FORMAT).to_string();
    }
    match NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        Ok(date) => date.format(DATE_FORMAT).to_string(),
        Err(_) => String::new(),
    }
}

/// Number or numeric string as `f64`; 0 otherwise.
pub fn coerce_f64(value: Option<&Value>) -> f64 {
    let parsed = match value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed.filter(|f| f.is_finite()).unwrap_or(0.0)
}

/// Number or numeric string truncated to `i64`; 0 otherwise.
pub fn coerce_i64(value: Option<&Value>) -> i64 {
    match value {
        Some(Value::Number(n)) => n.as_i64().unwrap_or_else(|| truncate(n.as_f64())),
        Some(Value::String(s)) => {
            let s = s.trim();
            s.parse::<i64>()
                .unwrap_or_else(|_| truncate(s.parse::<f64>().ok()))
        }
        _ => 0,
    }
}

fn truncate(value: Option<f64>) -> i64 {
    value
        .filter(|f| f.is_finite())
        .map(|f| f.trunc() as i64)
        .unwrap_or(0)
}
