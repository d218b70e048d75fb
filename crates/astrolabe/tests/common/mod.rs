#![allow(dead_code)]

use astrolabe::ephemeris::{
    Body, Ephemeris, EphemerisError, GeoLocation, HouseCusps, HouseSystem, PlanetPosition,
};
use astrolabe::geocode::{GeocodeError, Geocoder};
use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};
use std::sync::atomic::{AtomicUsize, Ordering};

/// Bodies fixed at 0, 30, .., 270 in body order; Saturn retrograde.
pub struct FixedEphemeris;

impl Ephemeris for FixedEphemeris {
    fn julian_day(&self, ut: NaiveDateTime) -> f64 {
        let epoch = NaiveDate::from_ymd_opt(1970, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        2440587.5 + (ut - epoch).num_seconds() as f64 / 86400.0
    }

    fn body_position(&self, _jd: f64, body: Body) -> Result<PlanetPosition, EphemerisError> {
        let speed = if body == Body::Saturn { -0.05 } else { 0.5 };
        Ok(PlanetPosition::from_raw(body as usize as f64 * 30.0, 0.0, speed))
    }

    fn house_cusps(
        &self,
        _jd: f64,
        _location: &GeoLocation,
        _system: HouseSystem,
    ) -> Result<HouseCusps, EphemerisError> {
        Ok(HouseCusps::evenly_spaced(0.0))
    }
}

/// Knows a couple of cities; "Offline" simulates a transport failure.
#[derive(Default)]
pub struct TableGeocoder {
    pub calls: AtomicUsize,
}

impl TableGeocoder {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Geocoder for TableGeocoder {
    async fn locate(&self, place: &str) -> Result<Option<GeoLocation>, GeocodeError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match place {
            "Moscow" => Ok(Some(GeoLocation { lat: 55.75, lon: 37.62 })),
            "Paris" => Ok(Some(GeoLocation { lat: 48.85, lon: 2.35 })),
            "Offline" => Err(GeocodeError::Status { status: 503 }),
            _ => Ok(None),
        }
    }
}
