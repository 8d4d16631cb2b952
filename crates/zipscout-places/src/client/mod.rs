//! HTTP client for the Google Maps geocoding and places endpoints.
//!
//! Wraps `reqwest` with API key management, typed partial responses and
//! envelope-status checks. Pacing is delegated to two injected
//! [`RateGate`]s: one awaited before every page-token request, one before
//! every place-details request.

mod details;
mod geocode;
mod nearby;

use std::time::Duration;

use reqwest::{Client, Url};
use serde::de::DeserializeOwned;

use crate::error::PlacesError;
use crate::rate_limit::{FixedDelay, IntervalGate, RateGate};
use crate::types::{ApiEnvelope, REFUSED_STATUSES};

pub use details::DETAIL_FIELDS;
pub use nearby::MAX_NEARBY_PAGES;

const DEFAULT_BASE_URL: &str = "https://maps.googleapis.com/maps/api/";
const DEFAULT_USER_AGENT: &str = "zipscout/0.1 (business-discovery)";

const GEOCODE_PATH: &str = "geocode/json";
const NEARBY_SEARCH_PATH: &str = "place/nearbysearch/json";
const DETAILS_PATH: &str = "place/details/json";

/// A page token needs roughly two seconds before the API accepts it.
pub const DEFAULT_PAGE_TOKEN_DELAY: Duration = Duration::from_secs(2);
/// Spacing between details calls that keeps well under per-second quotas.
pub const DEFAULT_DETAILS_INTERVAL: Duration = Duration::from_millis(100);

struct Endpoints {
    geocode: Url,
    nearby_search: Url,
    details: Url,
}

/// Client for the maps geocoding, nearby-search and place-details APIs.
///
/// Use [`PlacesClient::new`] for production or [`PlacesClient::with_base_url`]
/// to point at a mock server in tests. Both start with the default pacing;
/// [`PlacesClient::with_gates`] replaces it.
pub struct PlacesClient<T = FixedDelay, D = IntervalGate> {
    client: Client,
    api_key: String,
    endpoints: Endpoints,
    page_token_gate: T,
    details_gate: D,
}

impl PlacesClient {
    /// Creates a client pointed at the production maps API.
    ///
    /// # Errors
    ///
    /// Returns [`PlacesError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(api_key: &str, timeout_secs: u64) -> Result<Self, PlacesError> {
        Self::with_base_url(api_key, timeout_secs, DEFAULT_USER_AGENT, DEFAULT_BASE_URL)
    }

    /// Creates a client with a custom user agent and base URL.
    ///
    /// # Errors
    ///
    /// Returns [`PlacesError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`PlacesError::InvalidBaseUrl`] if
    /// `base_url` cannot serve as a base for the endpoint paths.
    pub fn with_base_url(
        api_key: &str,
        timeout_secs: u64,
        user_agent: &str,
        base_url: &str,
    ) -> Result<Self, PlacesError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            endpoints: Self::endpoints(base_url)?,
            page_token_gate: FixedDelay::new(DEFAULT_PAGE_TOKEN_DELAY),
            details_gate: IntervalGate::new(DEFAULT_DETAILS_INTERVAL),
        })
    }

    /// Resolves the three endpoint URLs against `base_url`.
    ///
    /// The base is normalised to end in exactly one slash so that joining
    /// appends to its path rather than replacing the last segment.
    fn endpoints(base_url: &str) -> Result<Endpoints, PlacesError> {
        let invalid = |reason: String| PlacesError::InvalidBaseUrl {
            base_url: base_url.to_owned(),
            reason,
        };

        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base = Url::parse(&normalised).map_err(|e| invalid(e.to_string()))?;
        if base.cannot_be_a_base() {
            return Err(invalid("URL cannot be used as a base".to_owned()));
        }

        let join = |path: &str| base.join(path).map_err(|e| invalid(e.to_string()));
        Ok(Endpoints {
            geocode: join(GEOCODE_PATH)?,
            nearby_search: join(NEARBY_SEARCH_PATH)?,
            details: join(DETAILS_PATH)?,
        })
    }
}

impl<T: RateGate, D: RateGate> PlacesClient<T, D> {
    /// Replaces the page-token and details gates.
    pub fn with_gates<T2: RateGate, D2: RateGate>(
        self,
        page_token_gate: T2,
        details_gate: D2,
    ) -> PlacesClient<T2, D2> {
        PlacesClient {
            client: self.client,
            api_key: self.api_key,
            endpoints: self.endpoints,
            page_token_gate,
            details_gate,
        }
    }

    /// Appends `key` and `params` to a copy of `endpoint`, percent-encoding
    /// every value.
    fn build_url(&self, endpoint: &Url, params: &[(&str, &str)]) -> Url {
        let mut url = endpoint.clone();
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("key", &self.api_key);
            for (k, v) in params {
                pairs.append_pair(k, v);
            }
        }
        url
    }

    /// Sends a GET request, asserts a 2xx status, parses the body into `R`
    /// and rejects refused envelope statuses.
    ///
    /// Errors never carry the full URL, which includes the API key; only the
    /// endpoint path is reported.
    ///
    /// # Errors
    ///
    /// - [`PlacesError::Http`] on network failure.
    /// - [`PlacesError::UnexpectedStatus`] on a non-2xx status.
    /// - [`PlacesError::Deserialize`] if the body does not match `R`.
    /// - [`PlacesError::ApiError`] if the envelope status is a refusal.
    async fn request_json<R>(&self, url: Url) -> Result<R, PlacesError>
    where
        R: DeserializeOwned + ApiEnvelope,
    {
        let endpoint = url.path().to_owned();
        tracing::debug!(%endpoint, "maps API request");

        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(PlacesError::UnexpectedStatus {
                status: status.as_u16(),
                endpoint,
            });
        }

        let body = response.text().await?;
        let parsed: R = serde_json::from_str(&body).map_err(|e| PlacesError::Deserialize {
            context: endpoint.clone(),
            source: e,
        })?;

        Self::check_api_status(&parsed)?;
        Ok(parsed)
    }

    /// Returns an error when the envelope status says the request was refused.
    fn check_api_status(body: &impl ApiEnvelope) -> Result<(), PlacesError> {
        match body.status() {
            Some(status) if REFUSED_STATUSES.contains(&status) => Err(PlacesError::ApiError {
                status: status.to_owned(),
                message: body
                    .error_message()
                    .unwrap_or("no error message")
                    .to_owned(),
            }),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
#[path = "../client_test.rs"]
mod tests;
