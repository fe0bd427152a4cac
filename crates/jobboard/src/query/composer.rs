use serde::{Deserialize, Serialize};

use super::predicate::{and, or, FieldPath, Predicate};

pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_PER_PAGE: u32 = 5;

/// Pagination and free-text search parameters of a listing request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListParams {
    #[serde(default)]
    pub page: Option<u32>,
    #[serde(default)]
    pub per_page: Option<u32>,
    #[serde(default)]
    pub search: Option<String>,
}

impl ListParams {
    pub fn page(page: u32, per_page: u32) -> Self {
        Self {
            page: Some(page),
            per_page: Some(per_page),
            search: None,
        }
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    /// Rejects explicit zero values; absent values fall back to the defaults later.
    pub fn validate(&self) -> Result<(), ListParamsError> {
        if self.page == Some(0) {
            return Err(ListParamsError::PageOutOfRange);
        }
        if self.per_page == Some(0) {
            return Err(ListParamsError::PerPageOutOfRange);
        }
        Ok(())
    }

    fn search_term(&self) -> Option<&str> {
        self.search.as_deref().filter(|term| !term.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ListParamsError {
    #[error("page must be greater than or equal to 1")]
    PageOutOfRange,
    #[error("per_page must be greater than or equal to 1")]
    PerPageOutOfRange,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    Asc,
    Desc,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SortOrder {
    pub field: FieldPath,
    pub direction: SortDirection,
}

/// Filtered, sorted and paginated read handed to a persistence executor.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuerySpec {
    pub filter: Predicate,
    pub skip: u64,
    pub take: u64,
    pub order: Vec<SortOrder>,
}

impl QuerySpec {
    /// Exact-match lookup of a single page holding everything that matches `filter`.
    pub fn filtered(filter: Predicate, take: u64) -> Self {
        Self {
            filter,
            skip: 0,
            take,
            order: Vec::new(),
        }
    }

    pub fn page_number(&self) -> u64 {
        if self.take == 0 {
            return u64::from(DEFAULT_PAGE);
        }
        self.skip / self.take + 1
    }
}

/// Per-call-site listing configuration: which fields the search term spans and
/// the default ordering.
#[derive(Debug, Clone)]
pub struct QueryComposer {
    search_fields: Vec<FieldPath>,
    order: Vec<SortOrder>,
}

impl QueryComposer {
    pub fn new(search_fields: &[&str]) -> Self {
        Self {
            search_fields: search_fields.iter().map(|path| FieldPath::parse(path)).collect(),
            order: Vec::new(),
        }
    }

    pub fn order_by(mut self, path: &str, direction: SortDirection) -> Self {
        self.order.push(SortOrder {
            field: FieldPath::parse(path),
            direction,
        });
        self
    }

    /// Resolve pagination defaults and expand the search term.
    ///
    /// With a search term the result is `mandatory AND field_n CONTAINS term`
    /// for every configured field, OR-ed together. The mandatory filter is
    /// copied into each branch so no branch can widen the base scope.
    pub fn build(&self, params: &ListParams, mandatory: Option<Predicate>) -> QuerySpec {
        let page = u64::from(params.page.unwrap_or(DEFAULT_PAGE));
        let per_page = u64::from(params.per_page.unwrap_or(DEFAULT_PER_PAGE));

        let filter = match params.search_term() {
            Some(term) if !self.search_fields.is_empty() => or(self
                .search_fields
                .iter()
                .map(|path| {
                    let matched = path.contains(term);
                    match &mandatory {
                        Some(base) => and([base.clone(), matched]),
                        None => matched,
                    }
                })),
            _ => mandatory.unwrap_or(Predicate::All),
        };

        QuerySpec {
            filter,
            skip: page.saturating_sub(1).saturating_mul(per_page),
            take: per_page,
            order: self.order.clone(),
        }
    }
}
