//! Filters the server cannot apply, run over an already fetched page.
//!
//! They only narrow the items on screen; pagination numbers still describe
//! the unfiltered collection.

use crate::items::{Attempt, Lecture};

pub trait LocalFilter<I> {
    fn matches(&self, item: &I) -> bool;

    /// Items of `items` that pass the filter, in order.
    fn apply(&self, items: &[I]) -> Vec<I>
    where
        I: Clone,
    {
        items
            .iter()
            .filter(|item| self.matches(item))
            .cloned()
            .collect()
    }
}

/// Lectures belonging to one course.
#[derive(Clone, Debug, Default)]
pub struct LectureFilter {
    pub course_id: Option<i64>,
}

impl LocalFilter<Lecture> for LectureFilter {
    fn matches(&self, item: &Lecture) -> bool {
        match self.course_id {
            Some(course_id) => item.course_id == Some(course_id),
            None => true,
        }
    }
}

/// Attempts by student name substring and exact status.
#[derive(Clone, Debug, Default)]
pub struct AttemptFilter {
    pub student_name: Option<String>,
    pub status: Option<String>,
}

impl LocalFilter<Attempt> for AttemptFilter {
    fn matches(&self, item: &Attempt) -> bool {
        let name_ok = self
            .student_name
            .as_deref()
            .map_or(true, |needle| contains_ignore_case(&item.student_name, needle));
        let status_ok = self
            .status
            .as_deref()
            .map_or(true, |status| item.status == status);
        name_ok && status_ok
    }
}

/// Case-insensitive substring test.
pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}
