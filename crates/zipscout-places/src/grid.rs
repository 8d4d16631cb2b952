//! Search grid over a postal code's bounding box.
//!
//! Nearby search only takes a point and a radius, so area coverage is
//! approximated by sampling a regular lattice of points at a fixed angular
//! step and searching around each one.

/// Slack added to the sample count so a bound that sits exactly on a step
/// boundary is not lost to floating-point rounding (40.70 + 0.02 > 40.72).
const BOUNDARY_TOLERANCE: f64 = 1e-9;

/// Upper bound on points in one grid. A step small enough to exceed it
/// yields an empty grid instead of an unbounded allocation.
pub const MAX_GRID_POINTS: usize = 1_000_000;

/// Rectangular lat/lng region, in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub south: f64,
    pub north: f64,
    pub west: f64,
    pub east: f64,
}

impl BoundingBox {
    /// Returns `None` unless all edges are finite, `south <= north` and
    /// `west <= east`.
    #[must_use]
    pub fn new(south: f64, north: f64, west: f64, east: f64) -> Option<Self> {
        let finite = [south, north, west, east].iter().all(|v| v.is_finite());
        (finite && south <= north && west <= east).then_some(Self {
            south,
            north,
            west,
            east,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridPoint {
    pub lat: f64,
    pub lng: f64,
}

impl GridPoint {
    /// The `"lat,lng"` form the nearby-search `location` parameter expects.
    #[must_use]
    pub fn location_param(&self) -> String {
        format!("{},{}", self.lat, self.lng)
    }
}

/// Tile `bounds` into grid points `step_degrees` apart.
///
/// Latitudes run `south, south + step, ...` up to `north`; longitudes the
/// same from `west` to `east`. Points are latitude-major: every longitude of
/// the first row, then the next row. A side shorter than one step still
/// yields its start value. A non-positive or non-finite step yields nothing,
/// as does a step so small that the grid would exceed [`MAX_GRID_POINTS`].
#[must_use]
pub fn generate_grid(bounds: &BoundingBox, step_degrees: f64) -> Vec<GridPoint> {
    let lats = axis_samples(bounds.south, bounds.north, step_degrees);
    let lngs = axis_samples(bounds.west, bounds.east, step_degrees);
    if lats.len().saturating_mul(lngs.len()) > MAX_GRID_POINTS {
        return Vec::new();
    }

    lats.iter()
        .flat_map(|&lat| lngs.iter().map(move |&lng| GridPoint { lat, lng }))
        .collect()
}

/// Samples `start + i * step` for every `i` that stays within `end`.
///
/// Computed from the index rather than by repeated addition so error does
/// not accumulate along long rows; the last sample is clamped to `end`.
/// Empty when the axis alone would exceed [`MAX_GRID_POINTS`].
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
fn axis_samples(start: f64, end: f64, step: f64) -> Vec<f64> {
    if !(step.is_finite() && step > 0.0) || !start.is_finite() || !end.is_finite() || end < start
    {
        return Vec::new();
    }

    let steps = ((end - start) / step + BOUNDARY_TOLERANCE).floor();
    if !steps.is_finite() || steps >= MAX_GRID_POINTS as f64 {
        return Vec::new();
    }
    (0..=steps as usize)
        .map(|i| (start + i as f64 * step).min(end))
        .collect()
}
