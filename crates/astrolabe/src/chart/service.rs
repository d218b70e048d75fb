use crate::chart::assembler::{ChartAssembler, ChartSettings};
use crate::chart::data::{Chart, NatalSummary};
use crate::chart::forecast::{daily_snapshots, WeeklyForecast, DAYS_PER_WEEK};
use crate::chart::horary::HoraryChart;
use crate::chart::input::{parse_date, BirthData, ValidationError};
use crate::chart::synastry::{SynastryAnalytics, SynastryReport};
use crate::chart::transit::TransitReport;
use crate::ephemeris::{Ephemeris, EphemerisError, GeoLocation};
use crate::geocode::{GeocodeError, Geocoder};
use chrono::{NaiveDateTime, NaiveTime};
use std::sync::Arc;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ChartError {
    #[error("Invalid place name")]
    InvalidPlace(String),
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Ephemeris(#[from] EphemerisError),
    #[error("Geocoding failed: {0}")]
    Geocode(#[from] GeocodeError),
}

/// Chart computations behind place resolution.
///
/// Every operation validates its input before the first external call and
/// fails as a whole; there are no partial results.
#[derive(Clone)]
pub struct ChartService {
    ephemeris: Arc<dyn Ephemeris>,
    geocoder: Arc<dyn Geocoder>,
    settings: ChartSettings,
}

impl ChartService {
    pub fn new(ephemeris: Arc<dyn Ephemeris>, geocoder: Arc<dyn Geocoder>, settings: ChartSettings) -> Self {
        Self {
            ephemeris,
            geocoder,
            settings,
        }
    }

    pub fn settings(&self) -> &ChartSettings {
        &self.settings
    }

    pub fn assembler(&self) -> ChartAssembler<'_> {
        ChartAssembler::new(self.ephemeris.as_ref(), self.settings)
    }

    pub async fn resolve_place(&self, place: &str) -> Result<GeoLocation, ChartError> {
        match self.geocoder.locate(place).await? {
            Some(location) => {
                log::debug!("Resolved '{}' to ({:.4}, {:.4})", place, location.lat, location.lon);
                Ok(location)
            }
            None => {
                log::info!("No geocoding result for '{}'", place);
                Err(ChartError::InvalidPlace(place.to_string()))
            }
        }
    }

    pub async fn natal_chart(&self, input: &BirthData) -> Result<Chart, ChartError> {
        let ut = input.moment_ut()?;
        let location = self.resolve_place(&input.place).await?;
        Ok(self.assembler().assemble(ut, location)?)
    }

    pub async fn natal_summary(&self, input: &BirthData) -> Result<NatalSummary, ChartError> {
        let chart = self.natal_chart(input).await?;
        Ok(NatalSummary::new(input, &chart))
    }

    pub async fn horary_chart(&self, question: &BirthData) -> Result<HoraryChart, ChartError> {
        let chart = self.natal_chart(question).await?;
        Ok(HoraryChart::new(question, chart))
    }

    /// Transits at `transit_date`/`transit_time`, in the natal time zone and place.
    pub async fn transits(
        &self,
        natal_input: &BirthData,
        transit_date: &str,
        transit_time: &str,
    ) -> Result<TransitReport, ChartError> {
        let transit_input = natal_input.at(transit_date, transit_time);
        let natal_ut = natal_input.moment_ut()?;
        let transit_ut = transit_input.moment_ut()?;

        let location = self.resolve_place(&natal_input.place).await?;
        let assembler = self.assembler();
        let natal = assembler.assemble(natal_ut, location)?;
        let transit = assembler.assemble(transit_ut, location)?;

        Ok(TransitReport::build(
            assembler.calculator(),
            natal_input,
            &natal,
            &transit_input,
            &transit,
        ))
    }

    /// Seven daily snapshots from `start_date` 00:00 UT against the natal chart.
    pub async fn weekly_forecast(
        &self,
        natal_input: &BirthData,
        start_date: &str,
    ) -> Result<WeeklyForecast, ChartError> {
        let natal_ut = natal_input.moment_ut()?;
        let start = NaiveDateTime::new(parse_date(start_date)?, NaiveTime::default());

        let location = self.resolve_place(&natal_input.place).await?;
        let assembler = self.assembler();
        let natal = assembler.assemble(natal_ut, location)?;
        let snapshots = daily_snapshots(&assembler, &natal, assembler.julian_day(start), DAYS_PER_WEEK)?;

        Ok(WeeklyForecast::from_snapshots(start_date, &snapshots))
    }

    /// Both charts of a synastry pair; identical places are geocoded once.
    pub async fn synastry_charts(
        &self,
        first: &BirthData,
        second: &BirthData,
    ) -> Result<(Chart, Chart), ChartError> {
        let ut1 = first.moment_ut()?;
        let ut2 = second.moment_ut()?;

        let loc1 = self.resolve_place(&first.place).await?;
        let loc2 = if second.place == first.place {
            loc1
        } else {
            self.resolve_place(&second.place).await?
        };

        let assembler = self.assembler();
        Ok((assembler.assemble(ut1, loc1)?, assembler.assemble(ut2, loc2)?))
    }

    pub async fn synastry(&self, first: &BirthData, second: &BirthData) -> Result<SynastryReport, ChartError> {
        let (chart1, chart2) = self.synastry_charts(first, second).await?;
        Ok(SynastryReport::build(self.assembler().calculator(), &chart1, &chart2))
    }

    pub async fn synastry_analytics(
        &self,
        first: &BirthData,
        second: &BirthData,
    ) -> Result<SynastryAnalytics, ChartError> {
        let (chart1, chart2) = self.synastry_charts(first, second).await?;
        Ok(SynastryAnalytics::build(self.assembler().calculator(), &chart1, &chart2))
    }
}
