//! Listing queries: a typed predicate builder, the search/pagination composer
//! used by every list endpoint, and the pagination metadata of responses.

pub mod composer;
pub mod memory;
pub mod pagination;
pub mod predicate;

pub use composer::{
    ListParams, ListParamsError, QueryComposer, QuerySpec, SortDirection, SortOrder,
    DEFAULT_PAGE, DEFAULT_PER_PAGE,
};
pub use pagination::{Paginated, PaginationMeta};
pub use predicate::{and, field, or, Condition, FieldPath, FieldValue, Predicate, Queryable};
