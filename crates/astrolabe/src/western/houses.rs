//! House placement over unevenly spaced cusps.

use crate::ephemeris::{normalize_degrees, Body, PlanetPosition};
use crate::western::rulers::{get_sign_index, get_sign_ruler, RulerConvention};
use serde::Serialize;
use std::collections::BTreeMap;

/// House (1-12) whose circular interval `[cusps[i], cusps[i + 1 mod 12])` contains `longitude`.
///
/// An interval that crosses 0° (start > end) matches `lon >= start || lon < end`.
/// Zero-width intervals match nothing, so degenerate cusp sets yield `None`.
pub fn house_of(longitude: f64, cusps: &[f64; 12]) -> Option<u8> {
    let lon = normalize_degrees(longitude);

    (0..12).find_map(|i| {
        let start = cusps[i];
        let end = cusps[(i + 1) % 12];
        let inside = if start < end {
            start <= lon && lon < end
        } else if start > end {
            lon >= start || lon < end
        } else {
            false
        };
        inside.then_some(i as u8 + 1)
    })
}

/// Ruler annotation for one house cusp
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HouseRuler {
    pub house: u8,
    /// Sign on the cusp, 1-based (1 = Aries)
    pub sign: u8,
    pub ruler: Body,
    /// Longitude of the ruling body, when it is part of the chart
    pub ruler_degree: Option<f64>,
}

pub fn house_rulers(
    cusps: &[f64; 12],
    positions: &BTreeMap<Body, PlanetPosition>,
    convention: RulerConvention,
) -> Vec<HouseRuler> {
    cusps
        .iter()
        .enumerate()
        .map(|(i, cusp)| {
            let sign_index = get_sign_index(*cusp);
            let ruler = get_sign_ruler(sign_index, convention);
            HouseRuler {
                house: i as u8 + 1,
                sign: sign_index + 1,
                ruler,
                ruler_degree: positions.get(&ruler).map(|p| p.lon),
            }
        })
        .collect()
}
