//! Maps API response types.
//!
//! Each endpoint gets a partial structure holding only the fields the scan
//! reads. Every field is optional so a sparse payload deserializes cleanly;
//! defaults are applied where rows are built, not here.

use serde::{Deserialize, Deserializer};

/// Envelope statuses that mean the request itself was refused.
///
/// `OK`, `ZERO_RESULTS`, `INVALID_REQUEST` (e.g. a page token that is not
/// active yet) and a missing status all fall through to the payload.
pub(crate) const REFUSED_STATUSES: &[&str] =
    &["REQUEST_DENIED", "OVER_QUERY_LIMIT", "OVER_DAILY_LIMIT"];

/// Access to the `status` / `error_message` pair every endpoint returns.
pub(crate) trait ApiEnvelope {
    fn status(&self) -> Option<&str>;
    fn error_message(&self) -> Option<&str>;
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

/// A `bounds` or `viewport` rectangle.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct Viewport {
    pub northeast: LatLng,
    pub southwest: LatLng,
}

#[derive(Debug, Default, Deserialize)]
pub struct Geometry {
    #[serde(default)]
    pub bounds: Option<Viewport>,
    #[serde(default)]
    pub viewport: Option<Viewport>,
}

#[derive(Debug, Deserialize)]
pub struct GeocodeResult {
    #[serde(default)]
    pub geometry: Option<Geometry>,
}

/// `geocode/json` response.
#[derive(Debug, Deserialize)]
pub struct GeocodeResponse {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub error_message: Option<String>,
    #[serde(default)]
    pub results: Vec<GeocodeResult>,
}

/// One hit from nearby search. Only the identifier matters downstream.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PlaceCandidate {
    #[serde(default)]
    pub place_id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub vicinity: Option<String>,
}

/// `place/nearbysearch/json` response.
#[derive(Debug, Deserialize)]
pub struct NearbySearchResponse {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub error_message: Option<String>,
    #[serde(default)]
    pub results: Vec<PlaceCandidate>,
    #[serde(default)]
    pub next_page_token: Option<String>,
}

/// Fields requested from `place/details/json`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PlaceDetail {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub formatted_address: Option<String>,
    #[serde(default)]
    pub international_phone_number: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    /// `Some` whenever the key appears in the payload, including `null` and `""`.
    #[serde(default, deserialize_with = "key_present")]
    pub website: Option<serde_json::Value>,
}

impl PlaceDetail {
    /// Whether the listing carries a `website` key at all.
    ///
    /// This is a presence test: an empty string still counts as a website.
    #[must_use]
    pub fn has_website(&self) -> bool {
        self.website.is_some()
    }
}

/// `place/details/json` response.
#[derive(Debug, Deserialize)]
pub struct PlaceDetailsResponse {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub error_message: Option<String>,
    #[serde(default)]
    pub result: Option<PlaceDetail>,
}

fn key_present<'de, D>(deserializer: D) -> Result<Option<serde_json::Value>, D::Error>
where
    D: Deserializer<'de>,
{
    serde_json::Value::deserialize(deserializer).map(Some)
}

impl ApiEnvelope for GeocodeResponse {
    fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }
    fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }
}

impl ApiEnvelope for NearbySearchResponse {
    fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }
    fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }
}

impl ApiEnvelope for PlaceDetailsResponse {
    fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }
    fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }
}
