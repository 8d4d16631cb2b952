pub mod client;
pub mod error;
pub mod filter;
pub mod grid;
pub mod rate_limit;
pub mod types;

pub use client::PlacesClient;
pub use error::PlacesError;
pub use grid::{generate_grid, BoundingBox, GridPoint};
pub use rate_limit::{FixedDelay, IntervalGate, NoDelay, RateGate};
pub use types::{PlaceCandidate, PlaceDetail};
