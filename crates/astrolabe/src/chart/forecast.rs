//! Day-by-day transits against a natal chart, and the weekly digest built from them.

use crate::aspects::AspectRecord;
use crate::chart::assembler::ChartAssembler;
use crate::chart::data::{round2, Chart};
use crate::chart::transit::TransitAspect;
use crate::ephemeris::{Body, EphemerisError, PlanetPosition};
use crate::western::{get_sign_index, get_sign_name};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

pub const DAYS_PER_WEEK: usize = 7;

/// Transits for one day against a natal chart
#[derive(Debug, Clone, PartialEq)]
pub struct DailySnapshot {
    pub jd: f64,
    pub transits: BTreeMap<Body, PlanetPosition>,
    /// Transiting body first, natal body second
    pub aspects: Vec<AspectRecord>,
    /// Natal house of each house-tracked transiting body
    pub houses: BTreeMap<Body, u8>,
}

/// One snapshot per day at `start_jd + i` for `days` days.
pub fn daily_snapshots(
    assembler: &ChartAssembler<'_>,
    natal: &Chart,
    start_jd: f64,
    days: usize,
) -> Result<Vec<DailySnapshot>, EphemerisError> {
    (0..days)
        .map(|i| {
            let jd = start_jd + i as f64;
            let transits = assembler.positions_at(jd)?;
            let aspects = assembler
                .calculator()
                .cross_aspects(&transits, &natal.positions);
            let houses = Body::HOUSE_TRACKED
                .iter()
                .filter_map(|body| {
                    let lon = transits.get(body)?.lon;
                    natal.house_of(lon).map(|house| (*body, house))
                })
                .collect();

            Ok(DailySnapshot {
                jd,
                transits,
                aspects,
                houses,
            })
        })
        .collect()
}

#[derive(Debug, Clone, Serialize)]
pub struct Focus {
    pub planet: Body,
    pub house: Option<u8>,
}

#[derive(Debug, Clone, Serialize)]
pub struct MoonDay {
    pub day_index: usize,
    pub degree: f64,
    pub sign: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct ActiveHouse {
    pub house: u8,
}

#[derive(Debug, Clone, Serialize)]
pub struct WeeklyForecast {
    pub start_of_week: String,
    pub focus: Focus,
    pub moon_by_day: Vec<MoonDay>,
    pub aspects: Vec<TransitAspect>,
    pub slow_planets: Vec<TransitAspect>,
    pub active_houses: Vec<ActiveHouse>,
}

impl WeeklyForecast {
    pub fn from_snapshots(start_of_week: &str, snapshots: &[DailySnapshot]) -> Self {
        let focus = Focus {
            planet: Body::Sun,
            house: snapshots
                .first()
                .and_then(|day| day.houses.get(&Body::Sun).copied()),
        };

        let moon_by_day = snapshots
            .iter()
            .enumerate()
            .filter_map(|(day_index, day)| {
                let moon = day.transits.get(&Body::Moon)?.lon;
                Some(MoonDay {
                    day_index,
                    degree: round2(moon),
                    sign: get_sign_name(get_sign_index(moon)),
                })
            })
            .collect();

        let records: Vec<&AspectRecord> = snapshots.iter().flat_map(|day| &day.aspects).collect();
        let aspects = records.iter().map(|r| TransitAspect::from(*r)).collect();
        let slow_planets = records
            .iter()
            .filter(|r| r.first.is_slow())
            .map(|r| TransitAspect::from(*r))
            .collect();

        let active: BTreeSet<u8> = snapshots
            .iter()
            .flat_map(|day| day.houses.values().copied())
            .collect();

        Self {
            start_of_week: start_of_week.to_string(),
            focus,
            moon_by_day,
            aspects,
            slow_planets,
            active_houses: active.into_iter().map(|house| ActiveHouse { house }).collect(),
        }
    }
}
