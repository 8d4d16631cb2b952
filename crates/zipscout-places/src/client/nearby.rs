//! Paginated nearby search around one grid point.

use crate::error::PlacesError;
use crate::grid::GridPoint;
use crate::rate_limit::RateGate;
use crate::types::{NearbySearchResponse, PlaceCandidate};

use super::PlacesClient;

/// Nearby search never serves more than three pages for one query.
pub const MAX_NEARBY_PAGES: usize = 3;

impl<T: RateGate, D: RateGate> PlacesClient<T, D> {
    /// Collects every result page for a radius search around `point`.
    ///
    /// Follows `next_page_token` for up to [`MAX_NEARBY_PAGES`] pages in
    /// total, awaiting the page-token gate before each follow-up request.
    /// Results are returned in API order across pages.
    ///
    /// # Errors
    ///
    /// Propagates any transport, status, parse or envelope error. Results
    /// from earlier pages are discarded in that case.
    pub async fn nearby_places(
        &self,
        point: GridPoint,
        radius_meters: u32,
    ) -> Result<Vec<PlaceCandidate>, PlacesError> {
        let location = point.location_param();
        let radius = radius_meters.to_string();

        let mut places = Vec::new();
        let mut page_token: Option<String> = None;

        for page in 1..=MAX_NEARBY_PAGES {
            let mut params = vec![("location", location.as_str()), ("radius", radius.as_str())];
            if let Some(token) = page_token.as_deref() {
                self.page_token_gate.wait().await;
                params.push(("pagetoken", token));
            }
            let url = self.build_url(&self.endpoints.nearby_search, &params);
            let response: NearbySearchResponse = self.request_json(url).await?;

            tracing::debug!(
                location = %location,
                page,
                results = response.results.len(),
                "nearby search page"
            );
            places.extend(response.results);

            page_token = response.next_page_token.filter(|t| !t.is_empty());
            if page_token.is_none() {
                break;
            }
        }

        Ok(places)
    }
}
