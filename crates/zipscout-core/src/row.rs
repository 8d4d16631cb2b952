use serde::{Deserialize, Serialize};

/// Placeholder written for any detail field the API did not return.
pub const MISSING_FIELD: &str = "N/A";

/// Column names of the exported CSV, in order.
pub const CSV_HEADER: [&str; 5] = [
    "ZIP Code",
    "Name",
    "Address",
    "Phone Number",
    "Google Business Page",
];

/// One exported business: a place that has no website listed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultRow {
    #[serde(rename = "ZIP Code")]
    pub zip_code: String,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Address")]
    pub address: String,
    #[serde(rename = "Phone Number")]
    pub phone: String,
    #[serde(rename = "Google Business Page")]
    pub business_page_url: String,
}

impl ResultRow {
    /// Builds a row from optional detail fields, substituting [`MISSING_FIELD`]
    /// for anything absent.
    #[must_use]
    pub fn new(
        zip_code: &str,
        name: Option<&str>,
        address: Option<&str>,
        phone: Option<&str>,
        business_page_url: Option<&str>,
    ) -> Self {
        let or_missing = |v: Option<&str>| v.unwrap_or(MISSING_FIELD).to_owned();
        Self {
            zip_code: zip_code.to_owned(),
            name: or_missing(name),
            address: or_missing(address),
            phone: or_missing(phone),
            business_page_url: or_missing(business_page_url),
        }
    }
}
