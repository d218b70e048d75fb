//! Cross-chart comparison of two people.

use crate::aspects::{count_by_kind, AspectCalculator, AspectKind, AspectRecord};
use crate::chart::data::{round2, Chart};
use crate::ephemeris::Body;
use serde::Serialize;
use std::collections::BTreeMap;

/// Aspects between chart 1 (first) and chart 2 (second)
pub fn synastry_aspects(calculator: &AspectCalculator, chart1: &Chart, chart2: &Chart) -> Vec<AspectRecord> {
    calculator.cross_aspects(&chart1.positions, &chart2.positions)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SynastryAspect {
    pub between: String,
    #[serde(rename = "type")]
    pub kind: AspectKind,
    pub symbol: &'static str,
    pub angle: f64,
    /// Both bodies are personal planets
    pub personal: bool,
    pub harmonious: bool,
    pub tense: bool,
}

impl From<&AspectRecord> for SynastryAspect {
    fn from(record: &AspectRecord) -> Self {
        Self {
            between: format!("{} (1) - {} (2)", record.first, record.second),
            kind: record.kind,
            symbol: record.kind.symbol(),
            angle: round2(record.separation),
            personal: record.is_personal(),
            harmonious: record.is_harmonious(),
            tense: record.is_tense(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct SynastrySummary {
    pub harmonious: usize,
    pub tense: usize,
    pub personal_harmonious: usize,
    pub personal_tense: usize,
    pub total: usize,
}

impl SynastrySummary {
    pub fn from_records(records: &[AspectRecord]) -> Self {
        records.iter().fold(
            Self {
                total: records.len(),
                ..Self::default()
            },
            |mut summary, r| {
                if r.is_harmonious() {
                    summary.harmonious += 1;
                    if r.is_personal() {
                        summary.personal_harmonious += 1;
                    }
                }
                if r.is_tense() {
                    summary.tense += 1;
                    if r.is_personal() {
                        summary.personal_tense += 1;
                    }
                }
                summary
            },
        )
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PersonDegrees {
    pub planet_degrees: BTreeMap<Body, f64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SynastryReport {
    pub person1: PersonDegrees,
    pub person2: PersonDegrees,
    pub synastry_aspects: Vec<SynastryAspect>,
    pub summary: SynastrySummary,
}

impl SynastryReport {
    pub fn build(calculator: &AspectCalculator, chart1: &Chart, chart2: &Chart) -> Self {
        let records = synastry_aspects(calculator, chart1, chart2);
        Self {
            person1: PersonDegrees {
                planet_degrees: chart1.planet_degrees(),
            },
            person2: PersonDegrees {
                planet_degrees: chart2.planet_degrees(),
            },
            synastry_aspects: records.iter().map(SynastryAspect::from).collect(),
            summary: SynastrySummary::from_records(&records),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SynastryAnalytics {
    /// Body of chart 1 -> body of chart 2 -> aspect symbol
    pub aspect_matrix: BTreeMap<Body, BTreeMap<Body, &'static str>>,
    pub personal_aspects: Vec<SynastryAspect>,
    pub most_exact_aspect: Option<SynastryAspect>,
    pub aspect_type_count: BTreeMap<AspectKind, usize>,
    pub harmonious_details: Vec<SynastryAspect>,
    pub tense_details: Vec<SynastryAspect>,
    pub total_aspects: usize,
}

impl SynastryAnalytics {
    pub fn build(calculator: &AspectCalculator, chart1: &Chart, chart2: &Chart) -> Self {
        Self::from_records(&synastry_aspects(calculator, chart1, chart2))
    }

    pub fn from_records(records: &[AspectRecord]) -> Self {
        let mut aspect_matrix: BTreeMap<Body, BTreeMap<Body, &'static str>> = BTreeMap::new();
        for r in records {
            aspect_matrix
                .entry(r.first)
                .or_default()
                .insert(r.second, r.kind.symbol());
        }

        // First record wins ties
        let most_exact = records
            .iter()
            .reduce(|best, r| if r.deviation() < best.deviation() { r } else { best });

        let select = |keep: fn(&AspectRecord) -> bool| -> Vec<SynastryAspect> {
            records.iter().filter(|r| keep(r)).map(SynastryAspect::from).collect()
        };

        Self {
            aspect_matrix,
            personal_aspects: select(AspectRecord::is_personal),
            most_exact_aspect: most_exact.map(SynastryAspect::from),
            aspect_type_count: count_by_kind(records),
            harmonious_details: select(AspectRecord::is_harmonious),
            tense_details: select(AspectRecord::is_tense),
            total_aspects: records.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(first: Body, second: Body, kind: AspectKind, separation: f64) -> AspectRecord {
        AspectRecord {
            first,
            second,
            kind,
            separation,
        }
    }

    #[test]
    fn test_venus_mars_trine_tags() {
        let aspect = SynastryAspect::from(&rec(Body::Venus, Body::Mars, AspectKind::Trine, 118.0));
        assert_eq!(aspect.between, "Venus (1) - Mars (2)");
        assert!(aspect.personal);
        assert!(aspect.harmonious);
        assert!(!aspect.tense);
    }

    #[test]
    fn test_summary_counts() {
        let records = vec![
            rec(Body::Venus, Body::Mars, AspectKind::Trine, 118.0),
            rec(Body::Sun, Body::Saturn, AspectKind::Square, 93.0),
            rec(Body::Moon, Body::Mercury, AspectKind::Opposition, 179.0),
            rec(Body::Jupiter, Body::Sun, AspectKind::Conjunction, 1.0),
        ];
        let summary = SynastrySummary::from_records(&records);
        assert_eq!(
            summary,
            SynastrySummary {
                harmonious: 1,
                tense: 2,
                personal_harmonious: 1,
                personal_tense: 1,
                total: 4,
            }
        );
    }

    #[test]
    fn test_analytics_most_exact_uses_own_angle() {
        let records = vec![
            rec(Body::Sun, Body::Moon, AspectKind::Trine, 123.0),
            rec(Body::Venus, Body::Pluto, AspectKind::Opposition, 179.5),
            rec(Body::Mars, Body::Mars, AspectKind::Square, 90.5),
        ];
        let analytics = SynastryAnalytics::from_records(&records);
        let exact = analytics.most_exact_aspect.unwrap();
        assert_eq!(exact.between, "Venus (1) - Pluto (2)");
        assert_eq!(analytics.aspect_matrix[&Body::Sun][&Body::Moon], "△");
        assert_eq!(analytics.aspect_type_count[&AspectKind::Square], 1);
        assert_eq!(analytics.personal_aspects.len(), 2);
        assert_eq!(analytics.tense_details.len(), 2);
        assert_eq!(analytics.harmonious_details.len(), 1);
        assert_eq!(analytics.total_aspects, 3);
    }

    #[test]
    fn test_analytics_empty() {
        let analytics = SynastryAnalytics::from_records(&[]);
        assert!(analytics.most_exact_aspect.is_none());
        assert!(analytics.aspect_matrix.is_empty());
        let json = serde_json::to_value(&analytics).unwrap();
        assert!(json["most_exact_aspect"].is_null());
    }
}
