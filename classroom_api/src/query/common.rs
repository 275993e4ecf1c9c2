//! Shared query infrastructure: the [`Query`] trait, [`QueryCommon`] fields, and [`PageQuery`].

use url::Url;

/// Trait implemented by all query builders. Provides parameter
/// serialization and shared builder methods for pagination and search.
pub trait Query {
    /// Query parameters in the order they are sent. Unset and empty
    /// filters are omitted.
    fn to_params(&self) -> Vec<(String, String)>;

    /// Returns a reference to the common query fields.
    fn common(&self) -> &QueryCommon;

    /// Returns a mutable reference to the common query fields.
    fn get_common(&mut self) -> &mut QueryCommon;

    /// Appends this query's parameters to the given URL, returning the modified URL.
    fn add_to_url(&self, url: &Url) -> Url {
        let mut url = url.clone();
        let params = self.to_params();
        if !params.is_empty() {
            url.query_pairs_mut().extend_pairs(params.iter());
        }
        url
    }

    /// Requested page number (1-indexed).
    fn page(&self) -> i64 {
        self.common().page
    }

    /// Sets the page number (1-indexed).
    fn with_page(mut self, page: i64) -> Self
    where
        Self: Sized,
    {
        self.get_common().page = page;
        self
    }

    /// Sets the free-text search forwarded to the server.
    fn with_search(mut self, search: &str) -> Self
    where
        Self: Sized,
    {
        self.get_common().search = non_empty(search);
        self
    }
}

/// Fields shared by all query types.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QueryCommon {
    /// Page number (1-indexed). Defaults to 1.
    pub page: i64,
    /// Server-side search text.
    pub search: Option<String>,
}

impl Default for QueryCommon {
    fn default() -> QueryCommon {
        QueryCommon {
            page: 1,
            search: None,
        }
    }
}

impl QueryCommon {
    /// Pushes the page and search parameters.
    pub fn push_params(&self, params: &mut Vec<(String, String)>) {
        params.push(("page".to_string(), self.page.to_string()));
        if let Some(search) = &self.search {
            params.push(("search".to_string(), search.clone()));
        }
    }
}

/// Query for collections that only paginate (lectures, attempts, questions).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PageQuery {
    pub common: QueryCommon,
}

impl PageQuery {
    pub fn for_page(page: i64) -> Self {
        Self::default().with_page(page)
    }
}

impl Query for PageQuery {
    fn to_params(&self) -> Vec<(String, String)> {
        let mut params = Vec::new();
        self.common.push_params(&mut params);
        params
    }
    fn common(&self) -> &QueryCommon {
        &self.common
    }
    fn get_common(&mut self) -> &mut QueryCommon {
        &mut self.common
    }
}

/// Trims `value`, mapping blank strings to `None`.
pub(crate) fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
