use crate::aspects::{AspectCalculator, AspectKind, AspectRecord};
use crate::chart::data::{round2, Chart};
use crate::chart::input::BirthData;
use crate::ephemeris::Body;
use serde::Serialize;
use std::collections::BTreeMap;

/// Transit-to-natal aspect as rendered in JSON.
///
/// `personal` is set when either body is a personal planet.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransitAspect {
    pub transit: Body,
    pub natal: Body,
    #[serde(rename = "type")]
    pub kind: AspectKind,
    pub symbol: &'static str,
    pub angle: f64,
    pub personal: bool,
}

impl From<&AspectRecord> for TransitAspect {
    fn from(record: &AspectRecord) -> Self {
        Self {
            transit: record.first,
            natal: record.second,
            kind: record.kind,
            symbol: record.kind.symbol(),
            angle: round2(record.separation),
            personal: record.involves_personal(),
        }
    }
}

/// Aspects from the transiting bodies (first) to the natal bodies (second)
pub fn transit_aspects(
    calculator: &AspectCalculator,
    transit: &Chart,
    natal: &Chart,
) -> Vec<AspectRecord> {
    calculator.cross_aspects(&transit.positions, &natal.positions)
}

#[derive(Debug, Clone, Serialize)]
pub struct NatalMoment {
    pub date: String,
    pub time: String,
    pub place: String,
    pub planet_degrees: BTreeMap<Body, f64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TransitMoment {
    pub date: String,
    pub time: String,
    pub planet_degrees: BTreeMap<Body, f64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TransitReport {
    pub natal: NatalMoment,
    pub transit: TransitMoment,
    pub aspects: Vec<TransitAspect>,
}

impl TransitReport {
    pub fn build(
        calculator: &AspectCalculator,
        natal_input: &BirthData,
        natal: &Chart,
        transit_input: &BirthData,
        transit: &Chart,
    ) -> Self {
        let aspects = transit_aspects(calculator, transit, natal)
            .iter()
            .map(TransitAspect::from)
            .collect();

        Self {
            natal: NatalMoment {
                date: natal_input.date.clone(),
                time: natal_input.time.clone(),
                place: natal_input.place.clone(),
                planet_degrees: natal.planet_degrees(),
            },
            transit: TransitMoment {
                date: transit_input.date.clone(),
                time: transit_input.time.clone(),
                planet_degrees: transit.planet_degrees(),
            },
            aspects,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transit_aspect_personal_when_either_body_is() {
        let record = AspectRecord {
            first: Body::Saturn,
            second: Body::Moon,
            kind: AspectKind::Opposition,
            separation: 177.456,
        };
        let aspect = TransitAspect::from(&record);
        assert!(aspect.personal);
        assert_eq!(aspect.angle, 177.46);
        assert_eq!(aspect.transit, Body::Saturn);

        let slow = TransitAspect::from(&AspectRecord {
            second: Body::Pluto,
            ..record
        });
        assert!(!slow.personal);
    }
}
