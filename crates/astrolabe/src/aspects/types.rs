use crate::ephemeris::Body;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Major aspect kinds, in table order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AspectKind {
    Conjunction,
    Sextile,
    Square,
    Trine,
    Opposition,
}

/// Aspect table: (kind, exact angle, symbol)
pub const ASPECT_TABLE: [(AspectKind, f64, &str); 5] = [
    (AspectKind::Conjunction, 0.0, "☌"),
    (AspectKind::Sextile, 60.0, "✶"),
    (AspectKind::Square, 90.0, "□"),
    (AspectKind::Trine, 120.0, "△"),
    (AspectKind::Opposition, 180.0, "☍"),
];

impl AspectKind {
    pub const ALL: [AspectKind; 5] = [
        AspectKind::Conjunction,
        AspectKind::Sextile,
        AspectKind::Square,
        AspectKind::Trine,
        AspectKind::Opposition,
    ];

    pub fn angle(self) -> f64 {
        ASPECT_TABLE[self as usize].1
    }

    pub fn symbol(self) -> &'static str {
        ASPECT_TABLE[self as usize].2
    }

    pub fn name(self) -> &'static str {
        match self {
            AspectKind::Conjunction => "Conjunction",
            AspectKind::Sextile => "Sextile",
            AspectKind::Square => "Square",
            AspectKind::Trine => "Trine",
            AspectKind::Opposition => "Opposition",
        }
    }

    pub fn is_harmonious(self) -> bool {
        matches!(self, AspectKind::Trine | AspectKind::Sextile)
    }

    pub fn is_tense(self) -> bool {
        matches!(self, AspectKind::Square | AspectKind::Opposition)
    }
}

impl fmt::Display for AspectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One table entry matched by a measured separation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AspectMatch {
    pub kind: AspectKind,
    /// Measured separation (0-180)
    pub separation: f64,
    /// |separation - exact angle|
    pub deviation: f64,
}

/// An aspect between two bodies, either inside one chart or across two.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AspectRecord {
    pub first: Body,
    pub second: Body,
    pub kind: AspectKind,
    pub separation: f64,
}

impl AspectRecord {
    /// Deviation from this record's own exact angle
    pub fn deviation(&self) -> f64 {
        (self.separation - self.kind.angle()).abs()
    }

    /// Both bodies are personal planets
    pub fn is_personal(&self) -> bool {
        self.first.is_personal() && self.second.is_personal()
    }

    /// At least one body is a personal planet
    pub fn involves_personal(&self) -> bool {
        self.first.is_personal() || self.second.is_personal()
    }

    pub fn is_harmonious(&self) -> bool {
        self.kind.is_harmonious()
    }

    pub fn is_tense(&self) -> bool {
        self.kind.is_tense()
    }
}

/// Orb tolerances
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OrbPolicy {
    /// Orb for every pair inside one chart, and for non-luminary cross-chart pairs
    pub default_orb: f64,
    /// Orb for cross-chart pairs where either body is the Sun or Moon
    pub luminary_orb: f64,
}

impl Default for OrbPolicy {
    fn default() -> Self {
        Self {
            default_orb: 6.0,
            luminary_orb: 8.0,
        }
    }
}

impl OrbPolicy {
    pub fn single_chart_orb(&self, _first: Body, _second: Body) -> f64 {
        self.default_orb
    }

    pub fn cross_chart_orb(&self, first: Body, second: Body) -> f64 {
        if first.is_luminary() || second.is_luminary() {
            self.luminary_orb
        } else {
            self.default_orb
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_order_matches_kinds() {
        for (i, kind) in AspectKind::ALL.iter().enumerate() {
            assert_eq!(ASPECT_TABLE[i].0, *kind);
        }
        assert_eq!(AspectKind::Trine.angle(), 120.0);
        assert_eq!(AspectKind::Opposition.symbol(), "☍");
    }

    #[test]
    fn test_cross_chart_orb_widens_for_luminaries() {
        let orbs = OrbPolicy::default();
        assert_eq!(orbs.cross_chart_orb(Body::Moon, Body::Pluto), 8.0);
        assert_eq!(orbs.cross_chart_orb(Body::Venus, Body::Sun), 8.0);
        assert_eq!(orbs.cross_chart_orb(Body::Venus, Body::Mars), 6.0);
        assert_eq!(orbs.single_chart_orb(Body::Sun, Body::Moon), 6.0);
    }

    #[test]
    fn test_record_tags() {
        let record = AspectRecord {
            first: Body::Venus,
            second: Body::Mars,
            kind: AspectKind::Trine,
            separation: 117.5,
        };
        assert!(record.is_personal());
        assert!(record.is_harmonious());
        assert!(!record.is_tense());
        assert!((record.deviation() - 2.5).abs() < 1e-12);

        let outer = AspectRecord { first: Body::Saturn, ..record };
        assert!(!outer.is_personal());
        assert!(outer.involves_personal());
    }
}
