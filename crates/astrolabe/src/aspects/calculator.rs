use crate::aspects::types::{AspectKind, AspectMatch, AspectRecord, OrbPolicy, ASPECT_TABLE};
use crate::ephemeris::{Body, PlanetPosition};
use std::collections::BTreeMap;

/// Shortest angular separation between two longitudes, in [0, 180].
///
/// Inputs may be any real angle; 359° and 1° are 2° apart.
pub fn angular_separation(a: f64, b: f64) -> f64 {
    ((a - b + 180.0).rem_euclid(360.0) - 180.0).abs()
}

/// Every aspect whose window `[angle - orb, angle + orb]` contains `separation`.
///
/// Results follow table order.
pub fn classify(separation: f64, orb: f64) -> Vec<AspectMatch> {
    ASPECT_TABLE
        .iter()
        .filter_map(|(kind, angle, _)| {
            let deviation = (separation - angle).abs();
            (deviation <= orb).then_some(AspectMatch {
                kind: *kind,
                separation,
                deviation,
            })
        })
        .collect()
}

/// The matching aspect closest to its exact angle; ties keep table order.
pub fn closest_aspect(separation: f64, orb: f64) -> Option<AspectMatch> {
    classify(separation, orb)
        .into_iter()
        .reduce(|best, m| if m.deviation < best.deviation { m } else { best })
}

/// Aspect calculator
#[derive(Debug, Clone, Default)]
pub struct AspectCalculator {
    orbs: OrbPolicy,
}

impl AspectCalculator {
    pub fn new(orbs: OrbPolicy) -> Self {
        Self { orbs }
    }

    pub fn orbs(&self) -> &OrbPolicy {
        &self.orbs
    }

    /// Aspect between two longitudes for a given orb
    pub fn calculate_aspect(&self, lon1: f64, lon2: f64, orb: f64) -> Option<AspectMatch> {
        closest_aspect(angular_separation(lon1, lon2), orb)
    }

    /// Aspects within a single chart: each unordered pair once (i < j), default orb.
    pub fn chart_aspects(&self, positions: &BTreeMap<Body, PlanetPosition>) -> Vec<AspectRecord> {
        let bodies: Vec<(&Body, &PlanetPosition)> = positions.iter().collect();
        let mut records = Vec::new();

        for i in 0..bodies.len() {
            for j in (i + 1)..bodies.len() {
                let (b1, p1) = bodies[i];
                let (b2, p2) = bodies[j];
                let orb = self.orbs.single_chart_orb(*b1, *b2);

                if let Some(m) = self.calculate_aspect(p1.lon, p2.lon, orb) {
                    records.push(record(*b1, *b2, m));
                }
            }
        }

        records
    }

    /// Aspects between two charts: the full cross-product, with the
    /// luminary orb applied when either body is the Sun or Moon.
    ///
    /// `first` of every record comes from `outer`, `second` from `inner`.
    pub fn cross_aspects(
        &self,
        outer: &BTreeMap<Body, PlanetPosition>,
        inner: &BTreeMap<Body, PlanetPosition>,
    ) -> Vec<AspectRecord> {
        let mut records = Vec::new();

        for (b1, p1) in outer {
            for (b2, p2) in inner {
                let orb = self.orbs.cross_chart_orb(*b1, *b2);
                if let Some(m) = self.calculate_aspect(p1.lon, p2.lon, orb) {
                    records.push(record(*b1, *b2, m));
                }
            }
        }

        records
    }
}

fn record(first: Body, second: Body, m: AspectMatch) -> AspectRecord {
    AspectRecord {
        first,
        second,
        kind: m.kind,
        separation: m.separation,
    }
}

/// Count records per aspect kind, in table order
pub fn count_by_kind(records: &[AspectRecord]) -> BTreeMap<AspectKind, usize> {
    let mut counts = BTreeMap::new();
    for r in records {
        *counts.entry(r.kind).or_insert(0) += 1;
    }
    counts
}
