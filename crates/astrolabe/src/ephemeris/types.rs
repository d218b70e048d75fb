use serde::{Deserialize, Serialize};
use std::fmt;

/// Geographic location coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoLocation {
    pub lat: f64,
    pub lon: f64,
}

/// Bodies tracked by every chart, in Swiss Ephemeris order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Body {
    Sun,
    Moon,
    Mercury,
    Venus,
    Mars,
    Jupiter,
    Saturn,
    Uranus,
    Neptune,
    Pluto,
}

impl Body {
    pub const ALL: [Body; 10] = [
        Body::Sun,
        Body::Moon,
        Body::Mercury,
        Body::Venus,
        Body::Mars,
        Body::Jupiter,
        Body::Saturn,
        Body::Uranus,
        Body::Neptune,
        Body::Pluto,
    ];

    /// Bodies whose natal house is tracked in daily transit snapshots
    pub const HOUSE_TRACKED: [Body; 3] = [Body::Sun, Body::Mars, Body::Jupiter];

    pub fn name(self) -> &'static str {
        match self {
            Body::Sun => "Sun",
            Body::Moon => "Moon",
            Body::Mercury => "Mercury",
            Body::Venus => "Venus",
            Body::Mars => "Mars",
            Body::Jupiter => "Jupiter",
            Body::Saturn => "Saturn",
            Body::Uranus => "Uranus",
            Body::Neptune => "Neptune",
            Body::Pluto => "Pluto",
        }
    }

    /// Swiss Ephemeris planet number (SE_SUN = 0 .. SE_PLUTO = 9)
    pub fn swe_code(self) -> i32 {
        self as i32
    }

    pub fn glyph(self) -> &'static str {
        match self {
            Body::Sun => "☉",
            Body::Moon => "☽",
            Body::Mercury => "☿",
            Body::Venus => "♀",
            Body::Mars => "♂",
            Body::Jupiter => "♃",
            Body::Saturn => "♄",
            Body::Uranus => "♅",
            Body::Neptune => "♆",
            Body::Pluto => "♇",
        }
    }

    pub fn is_luminary(self) -> bool {
        matches!(self, Body::Sun | Body::Moon)
    }

    pub fn is_personal(self) -> bool {
        matches!(
            self,
            Body::Sun | Body::Moon | Body::Mercury | Body::Venus | Body::Mars
        )
    }

    /// Jupiter through Pluto
    pub fn is_slow(self) -> bool {
        matches!(
            self,
            Body::Jupiter | Body::Saturn | Body::Uranus | Body::Neptune | Body::Pluto
        )
    }
}

impl fmt::Display for Body {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Planetary position data
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlanetPosition {
    /// Longitude in degrees (0-360)
    pub lon: f64,
    /// Latitude in degrees
    pub lat: f64,
    /// Speed in longitude (degrees per day)
    pub speed_lon: f64,
    /// Whether the planet is retrograde
    pub retrograde: bool,
}

impl PlanetPosition {
    /// Build a position from raw ephemeris output; retrograde follows the speed sign.
    pub fn from_raw(lon: f64, lat: f64, speed_lon: f64) -> Self {
        Self {
            lon: normalize_degrees(lon),
            lat,
            speed_lon,
            retrograde: speed_lon < 0.0,
        }
    }
}

/// House cusps (1..12, index 0 is the Ascendant cusp) plus the chart angles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HouseCusps {
    pub cusps: [f64; 12],
    pub ascendant: f64,
    pub midheaven: f64,
}

impl HouseCusps {
    /// Cusps only; angles are taken from cusps 1 and 10.
    pub fn from_cusps(cusps: [f64; 12]) -> Self {
        let cusps = cusps.map(normalize_degrees);
        Self {
            ascendant: cusps[0],
            midheaven: cusps[9],
            cusps,
        }
    }

    /// Evenly spaced cusps starting at `start`, mostly useful for equal-house charts.
    pub fn evenly_spaced(start: f64) -> Self {
        let mut cusps = [0.0; 12];
        for (i, cusp) in cusps.iter_mut().enumerate() {
            *cusp = start + i as f64 * 30.0;
        }
        Self::from_cusps(cusps)
    }
}

/// House systems understood by the Swiss Ephemeris adapter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HouseSystem {
    #[default]
    Placidus,
    WholeSign,
    Koch,
    Equal,
    Regiomontanus,
    Campanus,
    Alcabitius,
    Morinus,
}

/// House system mapping
const HOUSE_SYSTEMS: &[(&str, HouseSystem, u8)] = &[
    ("placidus", HouseSystem::Placidus, b'P'),
    ("whole_sign", HouseSystem::WholeSign, b'W'),
    ("koch", HouseSystem::Koch, b'K'),
    ("equal", HouseSystem::Equal, b'E'),
    ("regiomontanus", HouseSystem::Regiomontanus, b'R'),
    ("campanus", HouseSystem::Campanus, b'C'),
    ("alcabitius", HouseSystem::Alcabitius, b'A'),
    ("morinus", HouseSystem::Morinus, b'M'),
];

impl HouseSystem {
    pub fn from_name(name: &str) -> Option<Self> {
        let lower = name.to_lowercase();
        HOUSE_SYSTEMS
            .iter()
            .find(|(n, _, _)| *n == lower)
            .map(|(_, system, _)| *system)
    }

    pub fn name(self) -> &'static str {
        HOUSE_SYSTEMS
            .iter()
            .find(|(_, system, _)| *system == self)
            .map(|(n, _, _)| *n)
            .unwrap_or("placidus")
    }

    /// Single-letter code passed to `swe_houses`
    pub fn code(self) -> u8 {
        HOUSE_SYSTEMS
            .iter()
            .find(|(_, system, _)| *system == self)
            .map(|(_, _, code)| *code)
            .unwrap_or(b'P')
    }

    pub fn valid_names() -> Vec<String> {
        HOUSE_SYSTEMS.iter().map(|(n, _, _)| n.to_string()).collect()
    }
}

/// Normalize any real angle to [0, 360).
pub fn normalize_degrees(deg: f64) -> f64 {
    let n = deg.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360.0 for tiny negative inputs
    if n >= 360.0 {
        0.0
    } else {
        n
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_degrees() {
        assert_eq!(normalize_degrees(0.0), 0.0);
        assert_eq!(normalize_degrees(360.0), 0.0);
        assert_eq!(normalize_degrees(-30.0), 330.0);
        assert_eq!(normalize_degrees(725.0), 5.0);
        assert!(normalize_degrees(-1e-18) < 360.0);
    }

    #[test]
    fn test_body_classes() {
        assert!(Body::Sun.is_luminary());
        assert!(!Body::Mercury.is_luminary());
        assert!(Body::Mars.is_personal());
        assert!(!Body::Jupiter.is_personal());
        assert!(Body::Jupiter.is_slow());
        assert!(!Body::Mars.is_slow());
        assert_eq!(Body::Pluto.swe_code(), 9);
    }

    #[test]
    fn test_retrograde_follows_speed() {
        assert!(PlanetPosition::from_raw(10.0, 0.0, -0.2).retrograde);
        assert!(!PlanetPosition::from_raw(10.0, 0.0, 0.9).retrograde);
    }

    #[test]
    fn test_house_system_codes() {
        assert_eq!(HouseSystem::default().code(), b'P');
        assert_eq!(HouseSystem::from_name("Whole_Sign"), Some(HouseSystem::WholeSign));
        assert_eq!(HouseSystem::Koch.name(), "koch");
        assert!(HouseSystem::from_name("topocentric").is_none());
    }
}
