//! Store discovery: the filtering, distance, and ranking pipeline behind the
//! marketplace's store listing.
//!
//! The engine is a pure function over an in-memory catalog snapshot. It holds
//! no state, performs no I/O, and never fails: absent numeric fields degrade
//! via documented fallbacks instead of erroring. Callers fetch the eligible
//! catalog from `mercado-db` and resolve the customer's position through
//! `mercado-geo` before invoking [`discover`].

mod distance;
mod engine;
mod sort;

pub use distance::{haversine_km, EARTH_RADIUS_KM};
pub use engine::discover;
pub use sort::effective_sort;
