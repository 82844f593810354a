//! Trend filtering
//!
//! The filtered view is always a pure function of (trends, filter);
//! it is never mutated independently of its inputs.

use crate::data::{Trend, TrendFilter};

/// Narrow a trend collection by the given criteria.
///
/// Steps apply in order: category equality (skipped for "All"),
/// momentum equality (skipped for "All"), then a case-insensitive
/// substring match against title or description (skipped when the
/// search string is empty). Input order is preserved.
pub fn apply(trends: &[Trend], filter: &TrendFilter) -> Vec<Trend> {
    let search = filter.search.to_lowercase();

    trends
        .iter()
        .filter(|trend| filter.category == TrendFilter::ALL || trend.category == filter.category)
        .filter(|trend| {
            filter.momentum == TrendFilter::ALL || trend.momentum.as_str() == filter.momentum
        })
        .filter(|trend| {
            search.is_empty()
                || trend.title.to_lowercase().contains(&search)
                || trend.description.to_lowercase().contains(&search)
        })
        .cloned()
        .collect()
}
