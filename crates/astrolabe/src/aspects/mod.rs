pub mod calculator;
pub mod types;

pub use calculator::{angular_separation, classify, closest_aspect, count_by_kind, AspectCalculator};
pub use types::{AspectKind, AspectMatch, AspectRecord, OrbPolicy, ASPECT_TABLE};
