use astrolabe::aspects::{angular_separation, AspectCalculator, AspectKind, OrbPolicy};
use astrolabe::ephemeris::{Body, PlanetPosition};
use std::collections::BTreeMap;

fn positions(lons: &[(Body, f64)]) -> BTreeMap<Body, PlanetPosition> {
    lons.iter()
        .map(|(b, lon)| (*b, PlanetPosition::from_raw(*lon, 0.0, 1.0)))
        .collect()
}

#[test]
fn test_calculate_aspect_conjunction_across_zero() {
    let calculator = AspectCalculator::default();
    let aspect = calculator.calculate_aspect(358.0, 3.0, 6.0).unwrap();
    assert_eq!(aspect.kind, AspectKind::Conjunction);
    assert!((aspect.separation - 5.0).abs() < 1e-9);
}

#[test]
fn test_calculate_aspect_opposition() {
    let calculator = AspectCalculator::default();
    let aspect = calculator.calculate_aspect(100.0, 278.0, 6.0).unwrap();
    assert_eq!(aspect.kind, AspectKind::Opposition);
    assert!((aspect.deviation - 2.0).abs() < 1e-9);
}

#[test]
fn test_chart_aspects_use_default_orb_for_luminaries() {
    let calculator = AspectCalculator::default();
    // 7° off a trine: outside the 6° single-chart orb even for the Sun
    let chart = positions(&[(Body::Sun, 10.0), (Body::Jupiter, 137.0)]);
    assert!(calculator.chart_aspects(&chart).is_empty());
}

#[test]
fn test_cross_aspects_widen_orb_for_luminaries() {
    let calculator = AspectCalculator::default();
    let transit = positions(&[(Body::Sun, 10.0), (Body::Venus, 10.0)]);
    let natal = positions(&[(Body::Jupiter, 137.0)]);

    let records = calculator.cross_aspects(&transit, &natal);
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].first, Body::Sun);
    assert_eq!(records[0].second, Body::Jupiter);
    assert_eq!(records[0].kind, AspectKind::Trine);
}

#[test]
fn test_cross_aspects_include_same_body() {
    let calculator = AspectCalculator::default();
    let a = positions(&[(Body::Mars, 200.0)]);
    let b = positions(&[(Body::Mars, 203.5)]);
    let records = calculator.cross_aspects(&a, &b);
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].kind, AspectKind::Conjunction);
}

#[test]
fn test_custom_orbs() {
    let calculator = AspectCalculator::new(OrbPolicy {
        default_orb: 2.0,
        luminary_orb: 3.0,
    });
    let chart = positions(&[(Body::Mercury, 0.0), (Body::Mars, 92.5)]);
    assert!(calculator.chart_aspects(&chart).is_empty());

    let other = positions(&[(Body::Moon, 92.5)]);
    let records = calculator.cross_aspects(&chart, &other);
    assert_eq!(records.len(), 2);
    assert_eq!((records[0].first, records[0].kind), (Body::Mercury, AspectKind::Square));
    assert_eq!((records[1].first, records[1].kind), (Body::Mars, AspectKind::Conjunction));
}

#[test]
fn test_separation_table() {
    let cases = [
        (0.0, 0.0, 0.0),
        (10.0, 350.0, 20.0),
        (90.0, 270.0, 180.0),
        (45.0, 315.0, 90.0),
        (123.4, 3.4, 120.0),
    ];
    for (a, b, expected) in cases {
        assert!((angular_separation(a, b) - expected).abs() < 1e-9, "{} {}", a, b);
    }
}
