//! Deduplication and website filtering for place candidates.

use std::collections::HashSet;

use zipscout_core::ResultRow;

use crate::types::{PlaceCandidate, PlaceDetail};

/// Distinct place identifiers in first-seen order.
///
/// Overlapping grid cells report the same place more than once; candidates
/// without an identifier (or with an empty one) are dropped.
#[must_use]
pub fn unique_place_ids(candidates: &[PlaceCandidate]) -> Vec<&str> {
    let mut seen = HashSet::new();
    candidates
        .iter()
        .filter_map(|c| c.place_id.as_deref())
        .filter(|id| !id.is_empty())
        .filter(|id| seen.insert(*id))
        .collect()
}

/// Builds the export row for `detail`, or `None` if the listing has a
/// `website` key.
#[must_use]
pub fn row_without_website(detail: &PlaceDetail, zip_code: &str) -> Option<ResultRow> {
    if detail.has_website() {
        return None;
    }
    Some(ResultRow::new(
        zip_code,
        detail.name.as_deref(),
        detail.formatted_address.as_deref(),
        detail.international_phone_number.as_deref(),
        detail.url.as_deref(),
    ))
}
