use crate::aspects::{AspectCalculator, OrbPolicy};
use crate::chart::data::Chart;
use crate::ephemeris::{Body, Ephemeris, EphemerisError, GeoLocation, HouseSystem, PlanetPosition};
use crate::western::{house_rulers, RulerConvention};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Calculation settings shared by every chart of a request
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ChartSettings {
    pub house_system: HouseSystem,
    pub orbs: OrbPolicy,
    pub rulers: RulerConvention,
}

/// Builds [`Chart`] values from an ephemeris source.
pub struct ChartAssembler<'a> {
    ephemeris: &'a dyn Ephemeris,
    settings: ChartSettings,
    calculator: AspectCalculator,
}

impl<'a> ChartAssembler<'a> {
    pub fn new(ephemeris: &'a dyn Ephemeris, settings: ChartSettings) -> Self {
        Self {
            ephemeris,
            settings,
            calculator: AspectCalculator::new(settings.orbs),
        }
    }

    pub fn calculator(&self) -> &AspectCalculator {
        &self.calculator
    }

    pub fn settings(&self) -> &ChartSettings {
        &self.settings
    }

    pub fn julian_day(&self, ut: NaiveDateTime) -> f64 {
        self.ephemeris.julian_day(ut)
    }

    /// Positions of every body at `jd`
    pub fn positions_at(&self, jd: f64) -> Result<BTreeMap<Body, PlanetPosition>, EphemerisError> {
        Body::ALL
            .iter()
            .map(|body| Ok((*body, self.ephemeris.body_position(jd, *body)?)))
            .collect()
    }

    pub fn assemble(&self, ut: NaiveDateTime, location: GeoLocation) -> Result<Chart, EphemerisError> {
        self.assemble_at(self.julian_day(ut), location)
    }

    pub fn assemble_at(&self, jd: f64, location: GeoLocation) -> Result<Chart, EphemerisError> {
        let positions = self.positions_at(jd)?;
        let houses = self
            .ephemeris
            .house_cusps(jd, &location, self.settings.house_system)?;

        let aspects = self.calculator.chart_aspects(&positions);
        let retrograde = positions
            .iter()
            .filter(|(_, p)| p.retrograde)
            .map(|(b, _)| *b)
            .collect();
        let rulers = house_rulers(&houses.cusps, &positions, self.settings.rulers);

        log::debug!(
            "Assembled chart at JD {:.5}: {} aspects, asc {:.2}",
            jd,
            aspects.len(),
            houses.ascendant
        );

        Ok(Chart {
            jd,
            location,
            positions,
            houses,
            aspects,
            retrograde,
            house_rulers: rulers,
        })
    }
}
