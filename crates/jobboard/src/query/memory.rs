use std::cmp::Ordering;

use super::composer::{QuerySpec, SortDirection};
use super::predicate::Queryable;

/// Run a [`QuerySpec`] against an in-memory collection.
///
/// Returns the requested page and the number of records matching the filter
/// before pagination.
pub fn execute<T: Queryable>(
    records: impl IntoIterator<Item = T>,
    spec: &QuerySpec,
) -> (Vec<T>, u64) {
    let mut matched: Vec<T> = records
        .into_iter()
        .filter(|record| spec.filter.matches(record))
        .collect();
    let total = matched.len() as u64;

    if !spec.order.is_empty() {
        matched.sort_by(|left, right| {
            spec.order
                .iter()
                .map(|order| {
                    let left = left.resolve(&order.field);
                    let right = right.resolve(&order.field);
                    let ordering = left.partial_cmp(&right).unwrap_or(Ordering::Equal);
                    match order.direction {
                        SortDirection::Asc => ordering,
                        SortDirection::Desc => ordering.reverse(),
                    }
                })
                .find(|ordering| ordering.is_ne())
                .unwrap_or(Ordering::Equal)
        });
    }

    let skip = usize::try_from(spec.skip).unwrap_or(usize::MAX);
    let take = usize::try_from(spec.take).unwrap_or(usize::MAX);
    let page = matched.into_iter().skip(skip).take(take).collect();

    (page, total)
}
