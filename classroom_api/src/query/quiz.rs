use crate::types::CourseID;

use super::common::{non_empty, Query, QueryCommon};

/// Filters accepted by the quiz listing.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct QuizQuery {
    pub common: QueryCommon,
    pub course: Option<CourseID>,
    pub status: Option<String>,
}

impl Query for QuizQuery {
    fn to_params(&self) -> Vec<(String, String)> {
        let mut params = Vec::new();
        self.common.push_params(&mut params);
        if let Some(course) = self.course {
            params.push(("course".to_string(), course.to_string()));
        }
        if let Some(status) = &self.status {
            params.push(("status".to_string(), status.clone()));
        }
        params
    }
    fn common(&self) -> &QueryCommon {
        &self.common
    }
    fn get_common(&mut self) -> &mut QueryCommon {
        &mut self.common
    }
}

impl QuizQuery {
    pub fn with_course(mut self, course: CourseID) -> Self {
        self.course = Some(course);
        self
    }

    pub fn with_status(mut self, status: &str) -> Self {
        self.status = non_empty(status);
        self
    }
}
