//! Benchmarks for the one-port calibration hot path
//!
//! Measures standard synthesis, the per-frequency error-term solve, and
//! correction over dense frequency grids.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use ndarray::Array1;
use num_complex::Complex64;
use rfcal_core::calibration::{CalSession, OnePortSol};
use rfcal_core::frequency::{Frequency, FrequencyUnit, SweepType};
use rfcal_core::kits::{sol_triple, Connector, KitId};
use rfcal_core::network::Network;
use rfcal_core::standards::synthesize_standard;

fn make_ideals(nfreq: usize) -> (Frequency, [Network; 3]) {
    let freq = Frequency::new(0.5, 50.0, nfreq, FrequencyUnit::GHz, SweepType::Linear);
    let ideals = sol_triple(KitId::Keysight85056D, Connector::Female)
        .unwrap()
        .map(|d| synthesize_standard(&freq, &d.line, &d.termination).unwrap());
    (freq, ideals)
}

fn distort(net: &Network) -> Network {
    let e00 = Complex64::new(0.05, 0.02);
    let e11 = Complex64::new(-0.03, 0.01);
    let tr = Complex64::new(0.97, -0.05);
    let gamma = Array1::from_shape_fn(net.nfreq(), |f| {
        let gs = net.s11(f);
        e00 + tr * gs / (Complex64::new(1.0, 0.0) - e11 * gs)
    });
    Network::one_port(net.frequency.clone(), gamma, 50.0)
}

fn bench_synthesis(c: &mut Criterion) {
    let mut group = c.benchmark_group("synthesize_standard");

    for nfreq in [101, 1001, 10001].iter() {
        let freq = Frequency::new(0.5, 50.0, *nfreq, FrequencyUnit::GHz, SweepType::Linear);
        let [short, _, _] = sol_triple(KitId::Keysight85056D, Connector::Female).unwrap();

        group.bench_with_input(BenchmarkId::new("short", nfreq), nfreq, |b, _| {
            b.iter(|| {
                black_box(synthesize_standard(&freq, &short.line, &short.termination).unwrap())
            })
        });
    }

    group.finish();
}

fn bench_solve(c: &mut Criterion) {
    let mut group = c.benchmark_group("error_term_solve");

    for nfreq in [101, 1001, 10001].iter() {
        let (_, ideals) = make_ideals(*nfreq);
        let cal = OnePortSol::new(
            distort(&ideals[0]),
            distort(&ideals[1]),
            distort(&ideals[2]),
            ideals[0].clone(),
            ideals[1].clone(),
            ideals[2].clone(),
        );

        group.bench_with_input(BenchmarkId::from_parameter(nfreq), nfreq, |b, _| {
            b.iter(|| black_box(cal.solve().unwrap()))
        });
    }

    group.finish();
}

fn bench_apply(c: &mut Criterion) {
    let mut group = c.benchmark_group("correction_apply");

    for nfreq in [101, 1001, 10001].iter() {
        let (freq, ideals) = make_ideals(*nfreq);
        let measured = [
            distort(&ideals[0]),
            distort(&ideals[1]),
            distort(&ideals[2]),
        ];
        let session = CalSession::run(ideals, measured).unwrap();
        let dut = Network::one_port(
            freq.clone(),
            Array1::from_shape_fn(*nfreq, |f| Complex64::from_polar(0.6, -0.11 * f as f64)),
            50.0,
        );
        let raw = distort(&dut);

        group.bench_with_input(BenchmarkId::from_parameter(nfreq), nfreq, |b, _| {
            b.iter(|| black_box(session.correct(&raw).unwrap()))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_synthesis, bench_solve, bench_apply);
criterion_main!(benches);
