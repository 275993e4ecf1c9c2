use super::common::{non_empty, Query, QueryCommon};

/// Filters accepted by the course listing.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CourseQuery {
    pub common: QueryCommon,
    pub status: Option<String>,
    pub category: Option<String>,
}

impl Query for CourseQuery {
    fn to_params(&self) -> Vec<(String, String)> {
        let mut params = Vec::new();
        self.common.push_params(&mut params);
        if let Some(status) = &self.status {
            params.push(("status".to_string(), status.clone()));
        }
        if let Some(category) = &self.category {
            params.push(("category".to_string(), category.clone()));
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

impl CourseQuery {
    pub fn with_status(mut self, status: &str) -> Self {
        self.status = non_empty(status);
        self
    }

    pub fn with_category(mut self, category: &str) -> Self {
        self.category = non_empty(category);
        self
    }
}
