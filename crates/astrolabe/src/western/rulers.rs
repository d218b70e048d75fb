//! Zodiac signs and their planetary rulers (traditional and modern).

use crate::ephemeris::{normalize_degrees, Body};
use serde::{Deserialize, Serialize};

pub const SIGN_NAMES: [&str; 12] = [
    "Aries", "Taurus", "Gemini", "Cancer",
    "Leo", "Virgo", "Libra", "Scorpio",
    "Sagittarius", "Capricorn", "Aquarius", "Pisces",
];

pub const SIGN_GLYPHS: [&str; 12] = [
    "♈", "♉", "♊", "♋", "♌", "♍", "♎", "♏", "♐", "♑", "♒", "♓",
];

const MODERN_RULERS: [Body; 12] = [
    Body::Mars,    // Aries
    Body::Venus,   // Taurus
    Body::Mercury, // Gemini
    Body::Moon,    // Cancer
    Body::Sun,     // Leo
    Body::Mercury, // Virgo
    Body::Venus,   // Libra
    Body::Pluto,   // Scorpio
    Body::Jupiter, // Sagittarius
    Body::Saturn,  // Capricorn
    Body::Uranus,  // Aquarius
    Body::Neptune, // Pisces
];

const TRADITIONAL_RULERS: [Body; 12] = [
    Body::Mars,    // Aries
    Body::Venus,   // Taurus
    Body::Mercury, // Gemini
    Body::Moon,    // Cancer
    Body::Sun,     // Leo
    Body::Mercury, // Virgo
    Body::Venus,   // Libra
    Body::Mars,    // Scorpio
    Body::Jupiter, // Sagittarius
    Body::Saturn,  // Capricorn
    Body::Saturn,  // Aquarius
    Body::Jupiter, // Pisces
];

/// Which rulership table to use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RulerConvention {
    #[default]
    Modern,
    Traditional,
}

impl RulerConvention {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "modern" => Some(RulerConvention::Modern),
            "traditional" => Some(RulerConvention::Traditional),
            _ => None,
        }
    }
}

/// Get sign index (0-11) from longitude; a boundary belongs to the next sign.
pub fn get_sign_index(longitude: f64) -> u8 {
    ((normalize_degrees(longitude) / 30.0).floor() as u8) % 12
}

pub fn get_sign_name(sign_index: u8) -> &'static str {
    SIGN_NAMES[(sign_index % 12) as usize]
}

pub fn get_sign_ruler(sign_index: u8, convention: RulerConvention) -> Body {
    let idx = (sign_index % 12) as usize;
    match convention {
        RulerConvention::Modern => MODERN_RULERS[idx],
        RulerConvention::Traditional => TRADITIONAL_RULERS[idx],
    }
}
