use astrolabe::chart::{ChartAssembler, ChartSettings};
use astrolabe::ephemeris::{Body, Ephemeris, GeoLocation, SwissEphemerisAdapter};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

const J2000: f64 = 2451545.0;

fn bench_body_position(c: &mut Criterion) {
    let adapter = SwissEphemerisAdapter::new(None).unwrap();

    c.bench_function("body_position_moon", |b| {
        b.iter(|| adapter.body_position(black_box(J2000), Body::Moon))
    });
}

fn bench_assemble_chart(c: &mut Criterion) {
    let adapter = SwissEphemerisAdapter::new(None).unwrap();
    let assembler = ChartAssembler::new(&adapter, ChartSettings::default());
    let location = GeoLocation {
        lat: 40.7128,
        lon: -74.0060,
    };

    c.bench_function("assemble_chart", |b| {
        b.iter(|| assembler.assemble_at(black_box(J2000), location))
    });
}

criterion_group!(benches, bench_body_position, bench_assemble_chart);
criterion_main!(benches);
