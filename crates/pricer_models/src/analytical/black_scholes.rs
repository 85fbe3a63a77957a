//! Black-Scholes closed form with continuous dividend yield.
//!
//! **Call**: C = S·e^(−qT)·N(d₁) − K·e^(−rT)·N(d₂)
//! **Put**:  P = K·e^(−rT)·N(−d₂) − S·e^(−qT)·N(−d₁)
//!
//! with d₁ = (ln(S/K) + (r − q + σ²/2)T) / (σ√T) and d₂ = d₁ − σ√T.

use super::distributions::norm_cdf;
use super::error::AnalyticalError;
use crate::instruments::{
    EuropeanOption, Instrument, OptionType, Payoff, PricingEngine, PricingResults,
};
use crate::models::{ConstantBlackScholesProcess, StochasticProcess1D};
use pricer_core::types::PricingError;

/// Black-Scholes model with constant parameters.
///
/// # Examples
/// ```
/// use pricer_models::analytical::BlackScholes;
///
/// let bs = BlackScholes::new(100.0, 0.05, 0.0, 0.2).unwrap();
/// let call = bs.price_call(100.0, 1.0);
/// let put = bs.price_put(100.0, 1.0);
///
/// // Put-call parity: C − P = S − K·exp(−rT)
/// let parity = call - put - (100.0 - 100.0 * (-0.05_f64).exp());
/// assert!(parity.abs() < 1e-10);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlackScholes {
    spot: f64,
    rate: f64,
    dividend: f64,
    volatility: f64,
}

impl BlackScholes {
    /// Build from spot, risk-free rate, dividend yield and volatility.
    ///
    /// # Errors
    /// - `AnalyticalError::InvalidSpot` if spot <= 0 or not finite
    /// - `AnalyticalError::InvalidVolatility` if volatility <= 0 or not finite
    pub fn new(
        spot: f64,
        rate: f64,
        dividend: f64,
        volatility: f64,
    ) -> Result<Self, AnalyticalError> {
        if !spot.is_finite() || spot <= 0.0 {
            return Err(AnalyticalError::InvalidSpot { spot });
        }
        if !volatility.is_finite() || volatility <= 0.0 {
            return Err(AnalyticalError::InvalidVolatility { volatility });
        }
        Ok(Self {
            spot,
            rate,
            dividend,
            volatility,
        })
    }

    /// Build from a constant-parameter process.
    pub fn from_process(process: &ConstantBlackScholesProcess) -> Result<Self, AnalyticalError> {
        Self::new(
            process.x0(),
            process.risk_free_rate(),
            process.dividend_yield(),
            process.volatility(),
        )
    }

    /// Spot price.
    #[inline]
    pub fn spot(&self) -> f64 {
        self.spot
    }

    /// Risk-free rate.
    #[inline]
    pub fn rate(&self) -> f64 {
        self.rate
    }

    /// Dividend yield.
    #[inline]
    pub fn dividend(&self) -> f64 {
        self.dividend
    }

    /// Volatility.
    #[inline]
    pub fn volatility(&self) -> f64 {
        self.volatility
    }

    /// Forward price S·e^((r − q)T).
    #[inline]
    pub fn forward(&self, expiry: f64) -> f64 {
        self.spot * ((self.rate - self.dividend) * expiry).exp()
    }

    /// d₁ term. Returns ±∞ at zero expiry away from the money.
    pub fn d1(&self, strike: f64, expiry: f64) -> f64 {
        let std_dev = self.volatility * expiry.max(0.0).sqrt();
        if std_dev == 0.0 {
            return match self.forward(expiry).partial_cmp(&strike) {
                Some(std::cmp::Ordering::Greater) => f64::INFINITY,
                Some(std::cmp::Ordering::Less) => f64::NEG_INFINITY,
                _ => 0.0,
            };
        }
        ((self.spot / strike).ln() + (self.rate - self.dividend) * expiry) / std_dev
            + 0.5 * std_dev
    }

    /// d₂ = d₁ − σ√T.
    #[inline]
    pub fn d2(&self, strike: f64, expiry: f64) -> f64 {
        self.d1(strike, expiry) - self.volatility * expiry.max(0.0).sqrt()
    }

    /// European call price.
    pub fn price_call(&self, strike: f64, expiry: f64) -> f64 {
        self.price(OptionType::Call, strike, expiry)
    }

    /// European put price.
    pub fn price_put(&self, strike: f64, expiry: f64) -> f64 {
        self.price(OptionType::Put, strike, expiry)
    }

    /// European vanilla price for either option type.
    pub fn price(&self, option_type: OptionType, strike: f64, expiry: f64) -> f64 {
        let w = option_type.sign();
        let df_q = (-self.dividend * expiry).exp();
        let df_r = (-self.rate * expiry).exp();
        let d1 = self.d1(strike, expiry);
        let d2 = self.d2(strike, expiry);
        w * (self.spot * df_q * norm_cdf(w * d1) - strike * df_r * norm_cdf(w * d2))
    }

    /// Cash-or-nothing digital price: cash·e^(−rT)·N(ω·d₂).
    pub fn price_cash_or_nothing(
        &self,
        option_type: OptionType,
        strike: f64,
        cash: f64,
        expiry: f64,
    ) -> f64 {
        let w = option_type.sign();
        cash * (-self.rate * expiry).exp() * norm_cdf(w * self.d2(strike, expiry))
    }

    /// Price any supported payoff.
    pub fn price_payoff(&self, payoff: &Payoff, expiry: f64) -> f64 {
        match *payoff {
            Payoff::PlainVanilla {
                option_type,
                strike,
            } => self.price(option_type, strike, expiry),
            Payoff::CashOrNothing {
                option_type,
                strike,
                cash,
            } => self.price_cash_or_nothing(option_type, strike, cash, expiry),
        }
    }
}

/// Closed-form engine for European options under constant parameters.
///
/// Used as the reference against which Monte Carlo engines are checked.
#[derive(Debug, Clone, Copy)]
pub struct AnalyticEuropeanEngine {
    process: ConstantBlackScholesProcess,
}

impl AnalyticEuropeanEngine {
    /// Build from a constant-parameter process.
    pub fn new(process: ConstantBlackScholesProcess) -> Self {
        Self { process }
    }
}

impl PricingEngine<EuropeanOption> for AnalyticEuropeanEngine {
    fn calculate(&self, option: &EuropeanOption) -> Result<PricingResults, PricingError> {
        if !option.exercise().is_european() {
            return Err(AnalyticalError::UnsupportedExerciseStyle {
                style: option.exercise().name().to_string(),
            }
            .into());
        }
        let model = BlackScholes::from_process(&self.process)?;
        let value = model.price_payoff(option.payoff(), option.maturity());
        if !value.is_finite() {
            return Err(AnalyticalError::NumericalInstability {
                message: format!("non-finite price {}", value),
            }
            .into());
        }
        Ok(PricingResults::exact(value))
    }
}
