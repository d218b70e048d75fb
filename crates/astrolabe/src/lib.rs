//! Chart computation: ephemeris access, aspects, signs and houses, chart
//! composition (natal, transit, forecast, synastry, horary) and wheel rendering.

pub mod aspects;
pub mod chart;
pub mod ephemeris;
pub mod geocode;
pub mod rendering;
pub mod western;

pub use aspects::{AspectCalculator, AspectKind, AspectRecord, OrbPolicy};
pub use chart::{BirthData, Chart, ChartError, ChartService, ChartSettings};
pub use ephemeris::{Body, Ephemeris, EphemerisError, GeoLocation, SwissEphemerisAdapter};
pub use geocode::{GeocodeError, Geocoder, GeocoderSettings, NominatimGeocoder};
pub use rendering::{ChartRenderer, ChartSpecGenerator, PngRenderer, RenderError};
