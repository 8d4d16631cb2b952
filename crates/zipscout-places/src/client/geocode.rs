//! Postal code to bounding box.

use crate::error::PlacesError;
use crate::grid::BoundingBox;
use crate::rate_limit::RateGate;
use crate::types::GeocodeResponse;

use super::PlacesClient;

impl<T: RateGate, D: RateGate> PlacesClient<T, D> {
    /// Geocodes `postal_code` and returns the first result's extent.
    ///
    /// Uses the result's `bounds`, falling back to its `viewport`.
    ///
    /// # Errors
    ///
    /// - [`PlacesError::NoGeocodeResult`] if the API returned no results.
    /// - [`PlacesError::NoBounds`] if the first result has neither rectangle.
    /// - [`PlacesError::InvalidBounds`] if the rectangle is inverted or not finite.
    /// - Any transport or envelope error from the request itself.
    pub async fn geocode_bounds(&self, postal_code: &str) -> Result<BoundingBox, PlacesError> {
        let url = self.build_url(&self.endpoints.geocode, &[("address", postal_code)]);
        let response: GeocodeResponse = self.request_json(url).await?;

        let Some(first) = response.results.into_iter().next() else {
            return Err(PlacesError::NoGeocodeResult {
                postal_code: postal_code.to_owned(),
            });
        };

        let rect = first
            .geometry
            .and_then(|g| g.bounds.or(g.viewport))
            .ok_or_else(|| PlacesError::NoBounds {
                postal_code: postal_code.to_owned(),
            })?;

        let (sw, ne) = (rect.southwest, rect.northeast);
        let bounds = BoundingBox::new(sw.lat, ne.lat, sw.lng, ne.lng).ok_or_else(|| {
            PlacesError::InvalidBounds {
                postal_code: postal_code.to_owned(),
                reason: format!(
                    "southwest ({}, {}) is not below and left of northeast ({}, {})",
                    sw.lat, sw.lng, ne.lat, ne.lng
                ),
            }
        })?;

        tracing::debug!(postal_code, ?bounds, "geocoded postal code");
        Ok(bounds)
    }
}
