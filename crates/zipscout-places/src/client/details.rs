//! Place details lookup and the website filter built on it.

use zipscout_core::ResultRow;

use crate::error::PlacesError;
use crate::filter::{row_without_website, unique_place_ids};
use crate::rate_limit::RateGate;
use crate::types::{PlaceCandidate, PlaceDetail, PlaceDetailsResponse};

use super::PlacesClient;

/// The only detail fields the scan reads.
pub const DETAIL_FIELDS: &str = "name,website,formatted_address,international_phone_number,url";

impl<T: RateGate, D: RateGate> PlacesClient<T, D> {
    /// Fetches [`DETAIL_FIELDS`] for one place, after the details gate.
    ///
    /// A response without a `result` object yields an empty detail.
    ///
    /// # Errors
    ///
    /// Propagates any transport, status, parse or envelope error.
    pub async fn place_details(&self, place_id: &str) -> Result<PlaceDetail, PlacesError> {
        self.details_gate.wait().await;

        let url = self.build_url(
            &self.endpoints.details,
            &[("place_id", place_id), ("fields", DETAIL_FIELDS)],
        );
        let response: PlaceDetailsResponse = self.request_json(url).await?;
        Ok(response.result.unwrap_or_default())
    }

    /// Looks up each distinct candidate once and keeps those without a
    /// `website` key, tagged with `zip_code`.
    ///
    /// Rows come back in the order the identifiers were first seen.
    ///
    /// # Errors
    ///
    /// Stops at the first failed details call and returns its error.
    pub async fn places_without_website(
        &self,
        candidates: &[PlaceCandidate],
        zip_code: &str,
    ) -> Result<Vec<ResultRow>, PlacesError> {
        let ids = unique_place_ids(candidates);
        tracing::info!(
            zip_code,
            candidates = candidates.len(),
            unique = ids.len(),
            "fetching place details"
        );

        let mut rows = Vec::new();
        for place_id in ids {
            let detail = self.place_details(place_id).await?;
            match row_without_website(&detail, zip_code) {
                Some(row) => rows.push(row),
                None => tracing::trace!(place_id, "place lists a website"),
            }
        }

        Ok(rows)
    }
}
