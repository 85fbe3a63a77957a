//! Continuously monitored single-barrier options (Reiner-Rubinstein).
//!
//! Every one of the eight barrier/option combinations is a sum of the
//! building blocks A-F (Haug, *The Complete Guide to Option Pricing
//! Formulas*, §4.17.1). With b = r − q, φ = ±1 for call/put and η = ±1 for
//! down/up barriers:
//!
//! ```text
//! μ = (b − σ²/2)/σ²,   λ = √(μ² + 2r/σ²)
//! x₁ = ln(S/K)/σ√T + (1+μ)σ√T     x₂ = ln(S/H)/σ√T + (1+μ)σ√T
//! y₁ = ln(H²/SK)/σ√T + (1+μ)σ√T   y₂ = ln(H/S)/σ√T + (1+μ)σ√T
//! z  = ln(H/S)/σ√T + λσ√T
//! ```
//!
//! E pays the rebate at expiry (knock-ins never activated); F pays it when
//! the barrier is hit (knock-outs).
//!
//! # In-Out Parity
//!
//! Without rebate, knock-in + knock-out = vanilla.

use super::black_scholes::BlackScholes;
use super::distributions::norm_cdf;
use super::error::AnalyticalError;
use crate::instruments::{
    BarrierOption, BarrierType, Instrument, OptionType, Payoff, PricingEngine, PricingResults,
};
use crate::models::ConstantBlackScholesProcess;
use pricer_core::types::PricingError;

/// Terms A-F of the closed form.
#[derive(Debug, Clone, Copy)]
struct Terms {
    a: f64,
    b: f64,
    c: f64,
    d: f64,
    e: f64,
    f: f64,
}

/// Closed-form barrier price for a plain vanilla payoff.
///
/// # Arguments
/// * `model` - Constant-parameter Black-Scholes model (spot, r, q, σ)
/// * `barrier_type` - Direction and knock type
/// * `option_type` - Call or put
/// * `strike` - Strike K
/// * `barrier` - Barrier level H
/// * `rebate` - Rebate paid when the option ends inactive
/// * `expiry` - Time to expiry in years
///
/// # Errors
/// * `AnalyticalError::BarrierTouched` - Spot already beyond the barrier
/// * `AnalyticalError::NumericalInstability` - λ² < 0 or a non-finite price
///
/// # Examples
/// ```
/// use pricer_models::analytical::{barrier_price, BlackScholes};
/// use pricer_models::instruments::{BarrierType, OptionType};
///
/// // Haug, Table 4-13
/// let model = BlackScholes::new(100.0, 0.08, 0.04, 0.25).unwrap();
/// let price = barrier_price(
///     &model, BarrierType::DownOut, OptionType::Call, 90.0, 95.0, 3.0, 0.5,
/// )
/// .unwrap();
/// assert!((price - 9.0246).abs() < 1e-3);
/// ```
pub fn barrier_price(
    model: &BlackScholes,
    barrier_type: BarrierType,
    option_type: OptionType,
    strike: f64,
    barrier: f64,
    rebate: f64,
    expiry: f64,
) -> Result<f64, AnalyticalError> {
    let spot = model.spot();
    if barrier_type.triggered(spot, barrier) {
        return Err(AnalyticalError::BarrierTouched);
    }

    let t = terms(model, barrier_type, option_type, strike, barrier, rebate, expiry)?;
    let above = strike >= barrier;

    let price = match (barrier_type, option_type) {
        (BarrierType::DownIn, OptionType::Call) if above => t.c + t.e,
        (BarrierType::DownIn, OptionType::Call) => t.a - t.b + t.d + t.e,
        (BarrierType::UpIn, OptionType::Call) if above => t.a + t.e,
        (BarrierType::UpIn, OptionType::Call) => t.b - t.c + t.d + t.e,
        (BarrierType::DownIn, OptionType::Put) if above => t.b - t.c + t.d + t.e,
        (BarrierType::DownIn, OptionType::Put) => t.a + t.e,
        (BarrierType::UpIn, OptionType::Put) if above => t.a - t.b + t.d + t.e,
        (BarrierType::UpIn, OptionType::Put) => t.c + t.e,
        (BarrierType::DownOut, OptionType::Call) if above => t.a - t.c + t.f,
        (BarrierType::DownOut, OptionType::Call) => t.b - t.d + t.f,
        (BarrierType::UpOut, OptionType::Call) if above => t.f,
        (BarrierType::UpOut, OptionType::Call) => t.a - t.b + t.c - t.d + t.f,
        (BarrierType::DownOut, OptionType::Put) if above => t.a - t.b + t.c - t.d + t.f,
        (BarrierType::DownOut, OptionType::Put) => t.f,
        (BarrierType::UpOut, OptionType::Put) if above => t.b - t.d + t.f,
        (BarrierType::UpOut, OptionType::Put) => t.a - t.c + t.f,
    };

    if !price.is_finite() {
        return Err(AnalyticalError::NumericalInstability {
            message: format!("non-finite barrier price {}", price),
        });
    }
    Ok(price)
}

fn terms(
    model: &BlackScholes,
    barrier_type: BarrierType,
    option_type: OptionType,
    strike: f64,
    barrier: f64,
    rebate: f64,
    expiry: f64,
) -> Result<Terms, AnalyticalError> {
    let (s, k, h) = (model.spot(), strike, barrier);
    let r = model.rate();
    let vol = model.volatility();
    let variance = vol * vol;
    let std_dev = vol * expiry.sqrt();
    let phi = option_type.sign();
    let eta = if barrier_type.is_up() { -1.0 } else { 1.0 };

    let mu = (r - model.dividend() - 0.5 * variance) / variance;
    let lambda_sq = mu * mu + 2.0 * r / variance;
    if lambda_sq < 0.0 {
        return Err(AnalyticalError::NumericalInstability {
            message: format!("negative λ² = {}", lambda_sq),
        });
    }
    let lambda = lambda_sq.sqrt();

    let drift_term = (1.0 + mu) * std_dev;
    let x1 = (s / k).ln() / std_dev + drift_term;
    let x2 = (s / h).ln() / std_dev + drift_term;
    let y1 = (h * h / (s * k)).ln() / std_dev + drift_term;
    let y2 = (h / s).ln() / std_dev + drift_term;
    let z = (h / s).ln() / std_dev + lambda * std_dev;

    let df_q = (-model.dividend() * expiry).exp();
    let df_r = (-r * expiry).exp();
    let hs = h / s;
    let hs_2mu = hs.powf(2.0 * mu);
    let hs_2mu1 = hs.powf(2.0 * (mu + 1.0));

    let vanilla_like = |x: f64| {
        phi * s * df_q * norm_cdf(phi * x) - phi * k * df_r * norm_cdf(phi * x - phi * std_dev)
    };
    let reflected = |y: f64| {
        phi * s * df_q * hs_2mu1 * norm_cdf(eta * y)
            - phi * k * df_r * hs_2mu * norm_cdf(eta * y - eta * std_dev)
    };

    Ok(Terms {
        a: vanilla_like(x1),
        b: vanilla_like(x2),
        c: reflected(y1),
        d: reflected(y2),
        e: rebate
            * df_r
            * (norm_cdf(eta * x2 - eta * std_dev) - hs_2mu * norm_cdf(eta * y2 - eta * std_dev)),
        f: rebate
            * (hs.powf(mu + lambda) * norm_cdf(eta * z)
                + hs.powf(mu - lambda) * norm_cdf(eta * z - 2.0 * eta * lambda * std_dev)),
    })
}

/// Closed-form engine for barrier options under constant parameters.
///
/// Prices continuous monitoring; the unbiased Monte Carlo barrier pricer
/// converges to this value when driven by the same constant process.
#[derive(Debug, Clone, Copy)]
pub struct AnalyticBarrierEngine {
    process: ConstantBlackScholesProcess,
}

impl AnalyticBarrierEngine {
    /// Build from a constant-parameter process.
    pub fn new(process: ConstantBlackScholesProcess) -> Self {
        Self { process }
    }
}

impl PricingEngine<BarrierOption> for AnalyticBarrierEngine {
    fn calculate(&self, option: &BarrierOption) -> Result<PricingResults, PricingError> {
        if !option.exercise().is_european() {
            return Err(AnalyticalError::UnsupportedExerciseStyle {
                style: option.exercise().name().to_string(),
            }
            .into());
        }
        let (option_type, strike) = match *option.payoff() {
            Payoff::PlainVanilla {
                option_type,
                strike,
            } => (option_type, strike),
            ref other => {
                return Err(AnalyticalError::UnsupportedPayoff {
                    payoff: other.name().to_string(),
                }
                .into())
            }
        };
        let model = BlackScholes::from_process(&self.process)?;
        let value = barrier_price(
            &model,
            option.barrier_type(),
            option_type,
            strike,
            option.barrier(),
            option.rebate(),
            option.maturity(),
        )?;
        Ok(PricingResults::exact(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instruments::Exercise;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    fn haug_model() -> BlackScholes {
        BlackScholes::new(100.0, 0.08, 0.04, 0.25).unwrap()
    }

    // ==========================================================
    // Haug reference values: S=100, r=8%, q=4%, σ=25%, T=0.5, rebate 3
    // ==========================================================

    #[test]
    fn test_haug_table_calls() {
        let m = haug_model();
        let cases = [
            (BarrierType::DownOut, 95.0, 90.0, 9.0246),
            (BarrierType::DownOut, 95.0, 110.0, 4.8759),
            (BarrierType::DownIn, 95.0, 100.0, 4.0109),
            (BarrierType::UpIn, 105.0, 90.0, 14.1112),
            (BarrierType::UpOut, 105.0, 110.0, 2.3453),
        ];
        for (bt, h, k, expected) in cases {
            let price = barrier_price(&m, bt, OptionType::Call, k, h, 3.0, 0.5).unwrap();
            assert_relative_eq!(price, expected, epsilon = 1e-3);
        }
    }

    #[test]
    fn test_haug_table_puts() {
        let m = haug_model();
        let cases = [
            (BarrierType::DownOut, 95.0, 100.0, 2.2947),
            (BarrierType::DownIn, 95.0, 110.0, 11.9752),
            (BarrierType::UpIn, 105.0, 100.0, 3.3721),
            (BarrierType::UpOut, 105.0, 90.0, 3.7760),
            (BarrierType::UpOut, 105.0, 110.0, 7.5187),
        ];
        for (bt, h, k, expected) in cases {
            let price = barrier_price(&m, bt, OptionType::Put, k, h, 3.0, 0.5).unwrap();
            assert_relative_eq!(price, expected, epsilon = 1e-3);
        }
    }

    #[test]
    fn test_touched_barrier_rejected() {
        let m = haug_model();
        let result = barrier_price(&m, BarrierType::UpIn, OptionType::Put, 100.0, 99.0, 0.0, 0.5);
        assert_eq!(result, Err(AnalyticalError::BarrierTouched));
    }

    #[test]
    fn test_engine_rejects_digital() {
        let process = ConstantBlackScholesProcess::new(36.0, 0.0, 0.01, 0.2);
        let option = BarrierOption::new(
            BarrierType::UpIn,
            40.0,
            0.0,
            Payoff::cash_or_nothing(OptionType::Put, 40.0, 1.0).unwrap(),
            Exercise::European(0.25),
        )
        .unwrap();
        let result = AnalyticBarrierEngine::new(process).calculate(&option);
        assert!(matches!(result, Err(PricingError::UnsupportedInstrument(_))));
    }

    #[test]
    fn test_engine_touched_is_precondition_failure() {
        let process = ConstantBlackScholesProcess::new(41.0, 0.0, 0.01, 0.2);
        let option = BarrierOption::new(
            BarrierType::UpIn,
            40.0,
            0.0,
            Payoff::plain_vanilla(OptionType::Put, 40.0).unwrap(),
            Exercise::European(0.25),
        )
        .unwrap();
        let result = AnalyticBarrierEngine::new(process).calculate(&option);
        assert!(matches!(result, Err(PricingError::PreconditionFailed(_))));
    }

    proptest! {
        #[test]
        fn prop_in_out_parity(
            strike in 60.0f64..140.0,
            down_barrier in 60.0f64..99.0,
            up_barrier in 101.0f64..140.0,
            is_call in proptest::bool::ANY,
        ) {
            let m = haug_model();
            let option_type = if is_call { OptionType::Call } else { OptionType::Put };
            let vanilla = m.price(option_type, strike, 0.5);
            for (knock_in, knock_out, h) in [
                (BarrierType::DownIn, BarrierType::DownOut, down_barrier),
                (BarrierType::UpIn, BarrierType::UpOut, up_barrier),
            ] {
                let pin = barrier_price(&m, knock_in, option_type, strike, h, 0.0, 0.5).unwrap();
                let pout = barrier_price(&m, knock_out, option_type, strike, h, 0.0, 0.5).unwrap();
                prop_assert!((pin + pout - vanilla).abs() < 1e-5);
                prop_assert!(pin >= -1e-3);
                prop_assert!(pout >= -1e-3);
            }
        }
    }
}
