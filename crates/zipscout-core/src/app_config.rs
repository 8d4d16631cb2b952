use std::path::PathBuf;

pub const DEFAULT_API_BASE_URL: &str = "https://maps.googleapis.com/maps/api/";
pub const DEFAULT_OUTPUT_PATH: &str = "businesses_without_website_multi_zip.csv";

#[derive(Clone)]
pub struct AppConfig {
    pub google_maps_api_key: String,
    pub api_base_url: String,
    pub log_level: String,
    /// Angular distance between adjacent grid points, in degrees.
    pub grid_step_degrees: f64,
    pub search_radius_meters: u32,
    /// Wait before each `pagetoken` request; the token is not usable right away.
    pub page_token_delay_ms: u64,
    /// Minimum spacing between place-details calls.
    pub details_interval_ms: u64,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    pub output_path: PathBuf,
    pub skip_failed_zips: bool,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("google_maps_api_key", &"[redacted]")
            .field("api_base_url", &self.api_base_url)
            .field("log_level", &self.log_level)
            .field("grid_step_degrees", &self.grid_step_degrees)
            .field("search_radius_meters", &self.search_radius_meters)
            .field("page_token_delay_ms", &self.page_token_delay_ms)
            .field("details_interval_ms", &self.details_interval_ms)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("user_agent", &self.user_agent)
            .field("output_path", &self.output_path)
            .field("skip_failed_zips", &self.skip_failed_zips)
            .finish()
    }
}
