//! End-to-end pricing on an upward-sloping term-structure market.
//!
//! Market: valuation 2022-02-24, spot 36, zero rates 1% today and 1.5% in
//! six months, Black vols 20% at three months and 25% at six months, no
//! dividends. Options expire on 2022-05-24, before the first vol pillar, so
//! the local volatility is flat at 20% over the whole simulation and the
//! European price has an exact Black-Scholes value at the zero rate to
//! maturity.
//!
//! # Test Coverage
//!
//! - European, average-strike Asian and barrier puts, with and without
//!   constant parameters
//! - Tolerance stopping rule, sample cap and parallel chunking
//! - Frozen versus full European prices in a flat market, and the error
//!   estimate shrinking with the sample count
//! - Short market data surfacing as errors

use std::sync::Arc;

use pricer_core::market_data::{
    BlackVarianceCurve, CurveEnum, CurveInterpolation, InterpolatedCurve, VolSurfaceEnum,
    YieldCurve,
};
use pricer_core::types::{Date, DayCountConvention, PricingError};
use pricer_models::analytical::{barrier_price, BlackScholes};
use pricer_models::instruments::{
    BarrierOption, BarrierType, DiscreteAveragingAsianOption, EuropeanOption, Exercise,
    OptionType, Payoff, PricingEngine,
};
use pricer_models::models::{BlackScholesProcess, FreezePolicy};
use pricer_pricing::{ConfigError, LowDiscrepancy, McEngineBuilder};

fn year_fraction(y: i32, m: u32, d: u32) -> f64 {
    let today = Date::from_ymd(2022, 2, 24).unwrap();
    let date = Date::from_ymd(y, m, d).unwrap();
    DayCountConvention::ActualActual365.year_fraction_dates(today, date)
}

fn maturity() -> f64 {
    year_fraction(2022, 5, 24)
}

fn rates() -> CurveEnum<f64> {
    CurveEnum::from(
        InterpolatedCurve::new(
            &[0.0, year_fraction(2022, 8, 24)],
            &[0.01, 0.015],
            CurveInterpolation::Linear,
            true,
        )
        .unwrap(),
    )
}

fn process() -> BlackScholesProcess {
    let vols = BlackVarianceCurve::new(&[0.25, 0.5], &[0.20, 0.25]).unwrap();
    BlackScholesProcess::new(
        36.0,
        Arc::new(rates()),
        Arc::new(CurveEnum::flat(0.0)),
        Arc::new(VolSurfaceEnum::from(vols)),
    )
}

/// Black-Scholes at the zero rate to maturity and 20% vol.
fn flat_equivalent() -> BlackScholes {
    let r = rates().zero_rate(maturity()).unwrap();
    BlackScholes::new(36.0, r, 0.0, 0.2).unwrap()
}

fn put_payoff() -> Payoff {
    Payoff::plain_vanilla(OptionType::Put, 40.0).unwrap()
}

fn exercise() -> Exercise {
    Exercise::european(maturity()).unwrap()
}

fn fixing_times() -> Vec<f64> {
    let mut times: Vec<f64> = (1..=8).map(|i| i as f64 * 10.0 / 365.0).collect();
    times.push(maturity());
    times
}

// ============================================================================
// European
// ============================================================================

#[test]
fn test_european_term_structure_and_constant_agree_with_flat_equivalent() {
    let option = EuropeanOption::new(put_payoff(), exercise()).unwrap();
    let expected = flat_equivalent().price_put(40.0, maturity());
    for constant in [false, true] {
        let engine = McEngineBuilder::new(process())
            .with_steps(10)
            .with_samples(40_000)
            .with_seed(42)
            .with_constant_parameters(constant)
            .with_freeze_policy(FreezePolicy::AtMaturity)
            .build_european()
            .unwrap();
        let results = engine.calculate(&option).unwrap();
        let err = results.error_estimate.unwrap();
        assert!(
            (results.value - expected).abs() < 4.0 * err,
            "constant={} value={} expected={} err={}",
            constant,
            results.value,
            expected,
            err
        );
    }
}

#[test]
fn test_tolerance_rule_reaches_target() {
    let option = EuropeanOption::new(put_payoff(), exercise()).unwrap();
    let engine = McEngineBuilder::new(process())
        .with_steps(4)
        .with_absolute_tolerance(0.02)
        .with_seed(1)
        .build_european()
        .unwrap();
    let results = engine.calculate(&option).unwrap();
    assert!(results.converged);
    assert!(results.error_estimate.unwrap() <= 0.02);
    assert!(results.samples >= 1023);
}

#[test]
fn test_tolerance_rule_stops_at_cap() {
    let option = EuropeanOption::new(put_payoff(), exercise()).unwrap();
    let engine = McEngineBuilder::new(process())
        .with_steps(4)
        .with_absolute_tolerance(1e-4)
        .with_max_samples(3000)
        .build_european()
        .unwrap();
    let results = engine.calculate(&option).unwrap();
    assert!(!results.converged);
    assert_eq!(results.samples, 3000);
    assert!(results.error_estimate.unwrap() > 1e-4);
}

#[test]
fn test_tolerance_needs_error_estimate() {
    let err = McEngineBuilder::new(process())
        .with_random_policy::<LowDiscrepancy>()
        .with_steps(4)
        .with_absolute_tolerance(0.01)
        .build_european()
        .unwrap_err();
    assert!(matches!(err, ConfigError::ErrorEstimateUnavailable { .. }));
}

#[test]
fn test_parallel_tolerance_reproducible() {
    let option = EuropeanOption::new(put_payoff(), exercise()).unwrap();
    let build = || {
        McEngineBuilder::new(process())
            .with_steps(4)
            .with_absolute_tolerance(0.03)
            .with_seed(17)
            .with_parallel(true)
            .with_chunk_size(512)
            .build_european()
            .unwrap()
    };
    let a = build().calculate(&option).unwrap();
    let b = build().calculate(&option).unwrap();
    assert_eq!(a, b);
    assert!(a.converged);
    assert!(a.error_estimate.unwrap() <= 0.03);
}

// ============================================================================
// Flat Market
// ============================================================================

/// Spot 36, r = 1%, q = 0, σ = 20%.
fn flat_process() -> BlackScholesProcess {
    BlackScholesProcess::new(
        36.0,
        Arc::new(CurveEnum::flat(0.01)),
        Arc::new(CurveEnum::flat(0.0)),
        Arc::new(VolSurfaceEnum::flat(0.2)),
    )
}

#[test]
fn test_flat_market_frozen_and_full_european_within_one_percent() {
    let option =
        EuropeanOption::new(put_payoff(), Exercise::european(0.25).unwrap()).unwrap();
    let price = |constant| {
        McEngineBuilder::new(flat_process())
            .with_steps(10)
            .with_samples(100_000)
            .with_seed(42)
            .with_constant_parameters(constant)
            .build_european()
            .unwrap()
            .calculate(&option)
            .unwrap()
    };
    let full = price(false);
    let frozen = price(true);
    let relative = (frozen.value - full.value).abs() / full.value;
    assert!(
        relative < 0.01,
        "full={} frozen={} relative={}",
        full.value,
        frozen.value,
        relative
    );

    let expected = BlackScholes::new(36.0, 0.01, 0.0, 0.2)
        .unwrap()
        .price_put(40.0, 0.25);
    let err = full.error_estimate.unwrap();
    assert!((full.value - expected).abs() < 4.0 * err);
}

#[test]
fn test_error_estimate_shrinks_with_sample_count() {
    let option =
        EuropeanOption::new(put_payoff(), Exercise::european(0.25).unwrap()).unwrap();
    let errors: Vec<(usize, f64)> = [1_000, 4_000, 16_000, 64_000]
        .iter()
        .map(|&n| {
            let results = McEngineBuilder::new(flat_process())
                .with_steps(10)
                .with_samples(n)
                .with_seed(42)
                .build_european()
                .unwrap()
                .calculate(&option)
                .unwrap();
            (n, results.error_estimate.unwrap())
        })
        .collect();

    for pair in errors.windows(2) {
        assert!(pair[1].1 < pair[0].1, "{:?}", errors);
    }
    // err * sqrt(N) estimates the payoff's standard deviation
    let (n0, e0) = errors[0];
    let scale = e0 * (n0 as f64).sqrt();
    for &(n, e) in &errors[1..] {
        let ratio = e * (n as f64).sqrt() / scale;
        assert!(ratio > 0.8 && ratio < 1.25, "{:?}", errors);
    }
}

// ============================================================================
// Asian
// ============================================================================

#[test]
fn test_asian_constant_close_to_term_structure() {
    let option =
        DiscreteAveragingAsianOption::new(put_payoff(), exercise(), fixing_times()).unwrap();
    let price = |constant| {
        McEngineBuilder::new(process())
            .with_samples(30_000)
            .with_seed(42)
            .with_constant_parameters(constant)
            .build_asian()
            .unwrap()
            .calculate(&option)
            .unwrap()
    };
    let full = price(false);
    let frozen = price(true);
    let err = full
        .error_estimate
        .unwrap()
        .hypot(frozen.error_estimate.unwrap());
    assert!(full.value > 0.0);
    // the frozen drift ignores the slope of the forward curve
    assert!(
        (full.value - frozen.value).abs() < 4.0 * err + 5e-3,
        "full={} frozen={} err={}",
        full.value,
        frozen.value,
        err
    );
}

// ============================================================================
// Barrier
// ============================================================================

#[test]
fn test_up_in_put_near_continuous_value() {
    let option =
        BarrierOption::new(BarrierType::UpIn, 40.0, 0.0, put_payoff(), exercise()).unwrap();
    let expected = barrier_price(
        &flat_equivalent(),
        BarrierType::UpIn,
        OptionType::Put,
        40.0,
        40.0,
        0.0,
        maturity(),
    )
    .unwrap();
    for constant in [false, true] {
        let engine = McEngineBuilder::new(process())
            .with_steps(10)
            .with_samples(40_000)
            .with_seed(42)
            .with_constant_parameters(constant)
            .build_barrier()
            .unwrap();
        let results = engine.calculate(&option).unwrap();
        let err = results.error_estimate.unwrap();
        assert!(
            (results.value - expected).abs() < 4.0 * err + 5e-3,
            "constant={} value={} expected={} err={}",
            constant,
            results.value,
            expected,
            err
        );
    }
}

// ============================================================================
// Market Data Failures
// ============================================================================

#[test]
fn test_vol_curve_without_extrapolation_too_short() {
    let vols = BlackVarianceCurve::new(&[0.1], &[0.2])
        .unwrap()
        .with_extrapolation(false);
    let process = BlackScholesProcess::new(
        36.0,
        Arc::new(rates()),
        Arc::new(CurveEnum::flat(0.0)),
        Arc::new(VolSurfaceEnum::from(vols)),
    );
    let option = EuropeanOption::new(put_payoff(), exercise()).unwrap();
    for constant in [false, true] {
        let engine = McEngineBuilder::new(process.clone())
            .with_steps(4)
            .with_samples(100)
            .with_constant_parameters(constant)
            .build_european()
            .unwrap();
        assert!(matches!(
            engine.calculate(&option),
            Err(PricingError::MarketData(_))
        ));
    }
}
