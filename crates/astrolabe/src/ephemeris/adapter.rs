use crate::ephemeris::types::{
    normalize_degrees, Body, GeoLocation, HouseCusps, HouseSystem, PlanetPosition,
};
use chrono::{Datelike, NaiveDateTime, Timelike};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use swisseph::swe::{calc_ut, houses_ex, julday, set_ephe_path};
use thiserror::Error;

/// Errors that can occur during ephemeris calculations
#[derive(Error, Debug)]
pub enum EphemerisError {
    #[error("Ephemeris file not found at path: {path}. {message}")]
    FileNotFound { path: String, message: String },
    #[error("Invalid house system: {system}. Valid systems: {valid:?}")]
    InvalidHouseSystem { system: String, valid: Vec<String> },
    #[error("Failed to calculate position for {body} at JD {jd}: {message}")]
    CalculationFailed { body: Body, jd: f64, message: String },
    #[error("House calculation failed: {message}")]
    HouseCalculationFailed { message: String },
}

/// Source of body positions and house cusps.
///
/// Implementations must be callable from several request tasks at once.
pub trait Ephemeris: Send + Sync {
    /// Julian Day (UT) for a UTC civil date-time.
    fn julian_day(&self, ut: NaiveDateTime) -> f64;

    fn body_position(&self, jd: f64, body: Body) -> Result<PlanetPosition, EphemerisError>;

    fn house_cusps(
        &self,
        jd: f64,
        location: &GeoLocation,
        system: HouseSystem,
    ) -> Result<HouseCusps, EphemerisError>;
}

/// FLG_SWIEPH | FLG_SPEED
const CALC_FLAGS: i32 = 2 | 256;
/// SE_GREG_CAL
const GREG_CAL: u32 = 1;

/// Swiss Ephemeris adapter implementation
pub struct SwissEphemerisAdapter {
    ephemeris_path: Option<PathBuf>,
    // The C library keeps global state between calls
    lock: Mutex<()>,
}

impl SwissEphemerisAdapter {
    /// Create a new adapter with an optional ephemeris data directory.
    ///
    /// Without a directory the library falls back to its built-in Moshier
    /// theory. A directory that is given but missing is an error.
    pub fn new(ephemeris_path: Option<PathBuf>) -> Result<Self, EphemerisError> {
        if let Some(path) = &ephemeris_path {
            if !path.exists() {
                return Err(EphemerisError::FileNotFound {
                    path: path.display().to_string(),
                    message: "Ephemeris path does not exist. Please ensure Swiss Ephemeris data files are installed.".to_string(),
                });
            }
        }

        let adapter = Self {
            ephemeris_path,
            lock: Mutex::new(()),
        };
        if let Some(path) = &adapter.ephemeris_path {
            let dir = path.to_str().ok_or_else(|| EphemerisError::FileNotFound {
                path: path.display().to_string(),
                message: "Ephemeris path is not valid UTF-8.".to_string(),
            })?;
            let _guard = adapter.guard();
            set_ephe_path(dir);
            log::info!("Swiss Ephemeris data directory: {}", dir);
        }
        Ok(adapter)
    }

    pub fn ephemeris_path(&self) -> Option<&Path> {
        self.ephemeris_path.as_deref()
    }

    fn guard(&self) -> std::sync::MutexGuard<'_, ()> {
        // A panic while holding the lock leaves no state worth protecting
        self.lock.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Ephemeris for SwissEphemerisAdapter {
    fn julian_day(&self, ut: NaiveDateTime) -> f64 {
        let hour_decimal =
            ut.hour() as f64 + ut.minute() as f64 / 60.0 + ut.second() as f64 / 3600.0;
        let _guard = self.guard();
        julday(ut.year(), ut.month() as i32, ut.day() as i32, hour_decimal, GREG_CAL)
    }

    fn body_position(&self, jd: f64, body: Body) -> Result<PlanetPosition, EphemerisError> {
        let result = {
            let _guard = self.guard();
            calc_ut(jd, body.swe_code() as u32, CALC_FLAGS as u32)
        }
        .map_err(|e| EphemerisError::CalculationFailed {
            body,
            jd,
            message: format!("Swiss Ephemeris error: {}", e),
        })?;

        let out = result.out;
        if !out[0].is_finite() {
            return Err(EphemerisError::CalculationFailed {
                body,
                jd,
                message: "non-finite longitude".to_string(),
            });
        }
        log::debug!("{} at JD {:.5}: lon={:.4} speed={:.4}", body, jd, out[0], out[3]);

        Ok(PlanetPosition::from_raw(out[0], out[1], out[3]))
    }

    fn house_cusps(
        &self,
        jd: f64,
        location: &GeoLocation,
        system: HouseSystem,
    ) -> Result<HouseCusps, EphemerisError> {
        use swisseph::{AscMc, Cusp};

        let (c, a) = {
            let _guard = self.guard();
            houses_ex(jd, CALC_FLAGS, location.lat, location.lon, system.code() as i32)
        };
        let cusps = Cusp::from_array(c);
        let ascmc = AscMc::from_array(a);

        let cusp_values = [
            cusps.first, cusps.second, cusps.third, cusps.fourth,
            cusps.fifth, cusps.sixth, cusps.seventh, cusps.eighth,
            cusps.ninth, cusps.tenth, cusps.eleventh, cusps.twelfth,
        ];
        if cusp_values.iter().any(|c| !c.is_finite()) {
            return Err(EphemerisError::HouseCalculationFailed {
                message: format!(
                    "{} houses undefined at lat {:.2}",
                    system.name(),
                    location.lat
                ),
            });
        }

        let mut houses = HouseCusps::from_cusps(cusp_values);
        houses.ascendant = normalize_degrees(ascmc.ascendant);
        houses.midheaven = normalize_degrees(ascmc.mc);
        Ok(houses)
    }
}

/// Convert house system string to the adapter's enum
pub fn parse_house_system(house_system: &str) -> Result<HouseSystem, EphemerisError> {
    HouseSystem::from_name(house_system).ok_or_else(|| EphemerisError::InvalidHouseSystem {
        system: house_system.to_string(),
        valid: HouseSystem::valid_names(),
    })
}
