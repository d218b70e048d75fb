use crate::aspects::{AspectKind, AspectRecord};
use crate::chart::input::BirthData;
use crate::ephemeris::{Body, GeoLocation, HouseCusps, PlanetPosition};
use crate::western::{house_of, HouseRuler};
use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;
use std::collections::BTreeMap;

/// Round to two decimals for presentation.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// A fully computed chart. Values keep full precision; the JSON form rounds.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(into = "ChartSummary")]
pub struct Chart {
    /// Julian Day (UT)
    pub jd: f64,
    pub location: GeoLocation,
    pub positions: BTreeMap<Body, PlanetPosition>,
    pub houses: HouseCusps,
    pub aspects: Vec<AspectRecord>,
    pub retrograde: Vec<Body>,
    pub house_rulers: Vec<HouseRuler>,
}

impl Chart {
    pub fn longitude(&self, body: Body) -> Option<f64> {
        self.positions.get(&body).map(|p| p.lon)
    }

    /// Body longitudes rounded for output
    pub fn planet_degrees(&self) -> BTreeMap<Body, f64> {
        self.positions
            .iter()
            .map(|(body, pos)| (*body, round2(pos.lon)))
            .collect()
    }

    /// House of this chart that contains `longitude`
    pub fn house_of(&self, longitude: f64) -> Option<u8> {
        house_of(longitude, &self.houses.cusps)
    }
}

/// Single-chart aspect as rendered in JSON
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AspectEntry {
    pub between: String,
    #[serde(rename = "type")]
    pub kind: AspectKind,
    pub symbol: &'static str,
    pub angle: f64,
}

impl From<&AspectRecord> for AspectEntry {
    fn from(record: &AspectRecord) -> Self {
        Self {
            between: format!("{} - {}", record.first, record.second),
            kind: record.kind,
            symbol: record.kind.symbol(),
            angle: round2(record.separation),
        }
    }
}

/// JSON form of a [`Chart`]
#[derive(Debug, Clone, Serialize)]
pub struct ChartSummary {
    pub jd: f64,
    pub lat: f64,
    pub lon: f64,
    pub planet_degrees: BTreeMap<Body, f64>,
    pub houses: Vec<f64>,
    pub ascendant: f64,
    pub midheaven: f64,
    pub aspects: Vec<AspectEntry>,
    pub retrograde_planets: Vec<Body>,
    pub house_rulers: Vec<HouseRuler>,
}

impl From<Chart> for ChartSummary {
    fn from(chart: Chart) -> Self {
        Self {
            jd: chart.jd,
            lat: chart.location.lat,
            lon: chart.location.lon,
            planet_degrees: chart.planet_degrees(),
            houses: chart.houses.cusps.iter().map(|c| round2(*c)).collect(),
            ascendant: round2(chart.houses.ascendant),
            midheaven: round2(chart.houses.midheaven),
            aspects: chart.aspects.iter().map(AspectEntry::from).collect(),
            retrograde_planets: chart.retrograde,
            house_rulers: chart
                .house_rulers
                .into_iter()
                .map(|r| HouseRuler {
                    ruler_degree: r.ruler_degree.map(round2),
                    ..r
                })
                .collect(),
        }
    }
}

/// Cusps keyed "House 1" .. "House 12", in house order
#[derive(Debug, Clone, PartialEq)]
pub struct HouseMap(pub [f64; 12]);

impl Serialize for HouseMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(12))?;
        for (i, cusp) in self.0.iter().enumerate() {
            map.serialize_entry(&format!("House {}", i + 1), &round2(*cusp))?;
        }
        map.end()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct InputEcho {
    pub date: String,
    pub time: String,
    pub place: String,
    pub coordinates: GeoLocation,
    pub tz_offset: i32,
}

/// Compact natal chart: input echo, positions, aspects and a named house map.
#[derive(Debug, Clone, Serialize)]
pub struct NatalSummary {
    pub input: InputEcho,
    pub planet_positions: BTreeMap<Body, f64>,
    pub aspects: Vec<AspectEntry>,
    pub houses: HouseMap,
    pub ascendant: f64,
    pub midheaven: f64,
}

impl NatalSummary {
    pub fn new(input: &BirthData, chart: &Chart) -> Self {
        Self {
            input: InputEcho {
                date: input.date.clone(),
                time: input.time.clone(),
                place: input.place.clone(),
                coordinates: chart.location,
                tz_offset: input.tz_offset,
            },
            planet_positions: chart.planet_degrees(),
            aspects: chart.aspects.iter().map(AspectEntry::from).collect(),
            houses: HouseMap(chart.houses.cusps),
            ascendant: round2(chart.houses.ascendant),
            midheaven: round2(chart.houses.midheaven),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round2() {
        assert_eq!(round2(12.3456), 12.35);
        assert_eq!(round2(-0.004), -0.0);
        assert_eq!(round2(359.999), 360.0);
    }

    #[test]
    fn test_house_map_keeps_house_order() {
        let mut cusps = [0.0; 12];
        for (i, c) in cusps.iter_mut().enumerate() {
            *c = i as f64 * 30.0 + 0.123;
        }
        let json = serde_json::to_string(&HouseMap(cusps)).unwrap();
        let h2 = json.find("\"House 2\"").unwrap();
        let h10 = json.find("\"House 10\"").unwrap();
        assert!(h2 < h10);
        assert!(json.starts_with("{\"House 1\":0.12,"));
    }

    #[test]
    fn test_aspect_entry_format() {
        let record = AspectRecord {
            first: Body::Sun,
            second: Body::Moon,
            kind: AspectKind::Square,
            separation: 91.237,
        };
        let value = serde_json::to_value(AspectEntry::from(&record)).unwrap();
        assert_eq!(value["between"], "Sun - Moon");
        assert_eq!(value["type"], "Square");
        assert_eq!(value["symbol"], "□");
        assert_eq!(value["angle"], 91.24);
    }
}
