pub mod adapter;
pub mod types;

pub use adapter::{parse_house_system, Ephemeris, EphemerisError, SwissEphemerisAdapter};
pub use types::{
    normalize_degrees, Body, GeoLocation, HouseCusps, HouseSystem, PlanetPosition,
};
