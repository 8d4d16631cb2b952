use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlacesError {
    #[error("HTTP error: {0}")]
    Http(reqwest::Error),

    #[error("unexpected HTTP status {status} from {endpoint}")]
    UnexpectedStatus { status: u16, endpoint: String },

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("maps API returned {status}: {message}")]
    ApiError { status: String, message: String },

    #[error("no geocoding result for {postal_code}")]
    NoGeocodeResult { postal_code: String },

    #[error("geocoding result for {postal_code} has neither bounds nor viewport")]
    NoBounds { postal_code: String },

    #[error("geocoding result for {postal_code} has unusable bounds: {reason}")]
    InvalidBounds { postal_code: String, reason: String },

    #[error("invalid base URL \"{base_url}\": {reason}")]
    InvalidBaseUrl { base_url: String, reason: String },
}

impl PlacesError {
    /// `true` when geocoding produced nothing usable for a postal code.
    ///
    /// These are the only failures the scan treats as "skip this code"
    /// unconditionally; everything else is a transport or API fault.
    #[must_use]
    pub fn is_no_result(&self) -> bool {
        matches!(
            self,
            Self::NoGeocodeResult { .. } | Self::NoBounds { .. } | Self::InvalidBounds { .. }
        )
    }
}

// Request URLs carry the API key in the query string.
impl From<reqwest::Error> for PlacesError {
    fn from(err: reqwest::Error) -> Self {
        Self::Http(err.without_url())
    }
}
