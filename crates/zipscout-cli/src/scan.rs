//! Postal-code scan orchestration.
//!
//! For each postal code, in entry order: geocode it, tile its bounding box
//! into a grid, run a nearby search around every grid point, then keep the
//! distinct places that list no website. Everything runs sequentially and
//! the combined rows are written to one CSV at the end of the run.

use std::path::PathBuf;

use zipscout_core::ResultRow;
use zipscout_places::{generate_grid, PlacesClient, PlacesError, RateGate};

use crate::export::write_csv;

/// Most postal codes a single run accepts.
pub(crate) const MAX_ZIP_CODES: usize = 5;

/// What to do when a postal code fails for a reason other than "no
/// geocoding result" (which is always skipped).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FailurePolicy {
    /// Stop the run; nothing is written.
    Abort,
    /// Report the postal code and move on to the next one.
    Skip,
}

#[derive(Debug, Clone)]
pub(crate) struct ScanSettings {
    pub(crate) grid_step_degrees: f64,
    pub(crate) search_radius_meters: u32,
    pub(crate) on_failure: FailurePolicy,
    pub(crate) output_path: PathBuf,
}

#[derive(Debug, PartialEq, Eq)]
pub(crate) struct ScanSummary {
    pub(crate) processed: usize,
    pub(crate) skipped: Vec<String>,
    pub(crate) rows_written: usize,
}

/// Scans every postal code and writes the combined CSV.
///
/// Returns `Ok(None)` without touching the network or the filesystem when
/// `zip_codes` is empty.
///
/// # Errors
///
/// Returns an error if a postal code fails under [`FailurePolicy::Abort`]
/// or the CSV cannot be written. Rows from earlier postal codes are lost in
/// the first case.
pub(crate) async fn run_scan<T, D>(
    client: &PlacesClient<T, D>,
    settings: &ScanSettings,
    zip_codes: &[String],
) -> anyhow::Result<Option<ScanSummary>>
where
    T: RateGate,
    D: RateGate,
{
    if zip_codes.is_empty() {
        println!("\u{274c} No ZIP codes provided.");
        return Ok(None);
    }

    println!(
        "\nProcessing {} ZIP codes: {}",
        zip_codes.len(),
        zip_codes.join(", ")
    );

    let mut all_rows: Vec<ResultRow> = Vec::new();
    let mut skipped: Vec<String> = Vec::new();

    for zip_code in zip_codes {
        match scan_zip_code(client, settings, zip_code).await {
            Ok(rows) => {
                tracing::info!(zip_code = %zip_code, rows = rows.len(), "postal code done");
                all_rows.extend(rows);
            }
            Err(err) if err.is_no_result() => {
                println!("\u{274c} Could not get bounds for ZIP {zip_code}");
                tracing::warn!(zip_code = %zip_code, error = %err, "skipping postal code");
                skipped.push(zip_code.clone());
            }
            Err(err) if settings.on_failure == FailurePolicy::Skip => {
                println!("\u{274c} Skipping ZIP {zip_code}: {err}");
                tracing::warn!(zip_code = %zip_code, error = %err, "skipping failed postal code");
                skipped.push(zip_code.clone());
            }
            Err(err) => {
                return Err(anyhow::Error::new(err).context(format!("scan of ZIP {zip_code} failed")));
            }
        }
    }

    println!(
        "\n\u{2705} Found {} businesses without websites across all ZIP codes:\n",
        all_rows.len()
    );
    if !skipped.is_empty() {
        println!(
            "Skipped {} of {} ZIP codes: {}",
            skipped.len(),
            zip_codes.len(),
            skipped.join(", ")
        );
    }

    write_csv(&settings.output_path, &all_rows)?;
    println!("\n\u{2705} Data written to {}", settings.output_path.display());

    Ok(Some(ScanSummary {
        processed: zip_codes.len() - skipped.len(),
        skipped,
        rows_written: all_rows.len(),
    }))
}

/// Geocode, grid, nearby search and website filter for one postal code.
async fn scan_zip_code<T, D>(
    client: &PlacesClient<T, D>,
    settings: &ScanSettings,
    zip_code: &str,
) -> Result<Vec<ResultRow>, PlacesError>
where
    T: RateGate,
    D: RateGate,
{
    let bounds = client.geocode_bounds(zip_code).await?;
    let grid = generate_grid(&bounds, settings.grid_step_degrees);
    if grid.is_empty() {
        tracing::warn!(
            zip_code = %zip_code,
            step = settings.grid_step_degrees,
            "grid step too small for this area, no points searched"
        );
    }

    println!(
        "\u{1f9ed} Scanning {} grid points inside ZIP code {zip_code}...\n",
        grid.len()
    );

    let mut candidates = Vec::new();
    for (i, point) in grid.iter().enumerate() {
        println!(
            "\u{1f50d} ZIP {zip_code} - Point {}/{}: ({}, {})",
            i + 1,
            grid.len(),
            point.lat,
            point.lng
        );
        candidates.extend(
            client
                .nearby_places(*point, settings.search_radius_meters)
                .await?,
        );
    }

    println!("\n\u{1f9f9} Filtering businesses without websites for ZIP {zip_code}...");
    client.places_without_website(&candidates, zip_code).await
}

#[cfg(test)]
#[path = "scan_test.rs"]
mod tests;
