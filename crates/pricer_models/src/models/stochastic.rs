//! StochasticProcess1D trait for one-factor diffusions.
//!
//! A process is described by its initial level, an instantaneous drift and
//! diffusion in the variable `apply` works on, and the `apply` map that turns
//! an increment into the next level. For Black-Scholes dynamics the drift and
//! diffusion are those of `ln S` and `apply(x, dx) = x·exp(dx)`.
//!
//! ## Design Philosophy
//!
//! - **Static dispatch only**: engines hold a [`ProcessEnum`](super::ProcessEnum),
//!   never `Box<dyn StochasticProcess1D>`
//! - **Fallible queries**: term-structure lookups can fail, so drift and
//!   diffusion return `Result`; constant processes always return `Ok`

use pricer_core::market_data::MarketDataError;

/// One-factor stochastic process.
///
/// # Discretisation
///
/// [`evolve`](StochasticProcess1D::evolve) takes an Euler step in the
/// process variable:
///
/// ```text
/// x(t + Δt) = apply(x, μ(t, x)·Δt + σ(t, x)·√Δt·Δw),   Δw ~ N(0, 1)
/// ```
pub trait StochasticProcess1D {
    /// Initial level of the process.
    fn x0(&self) -> f64;

    /// Instantaneous drift μ(t, x).
    fn drift(&self, t: f64, x: f64) -> Result<f64, MarketDataError>;

    /// Instantaneous diffusion σ(t, x).
    fn diffusion(&self, t: f64, x: f64) -> Result<f64, MarketDataError>;

    /// Map an increment onto a level. Default: `x0 · exp(dx)`.
    #[inline]
    fn apply(&self, x0: f64, dx: f64) -> f64 {
        x0 * dx.exp()
    }

    /// Number of Brownian factors driving the process.
    #[inline]
    fn factors(&self) -> usize {
        1
    }

    /// Level at `t0 + dt` given level `x0` at `t0` and a standard normal draw `dw`.
    #[inline]
    fn evolve(&self, t0: f64, x0: f64, dt: f64, dw: f64) -> Result<f64, MarketDataError> {
        let mu = self.drift(t0, x0)?;
        let sigma = self.diffusion(t0, x0)?;
        Ok(self.apply(x0, mu * dt + sigma * dt.sqrt() * dw))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    struct ZeroVol {
        x0: f64,
        mu: f64,
    }

    impl StochasticProcess1D for ZeroVol {
        fn x0(&self) -> f64 {
            self.x0
        }

        fn drift(&self, _t: f64, _x: f64) -> Result<f64, MarketDataError> {
            Ok(self.mu)
        }

        fn diffusion(&self, _t: f64, _x: f64) -> Result<f64, MarketDataError> {
            Ok(0.0)
        }
    }

    #[test]
    fn test_default_apply_is_exponential() {
        let p = ZeroVol { x0: 10.0, mu: 0.0 };
        assert_relative_eq!(p.apply(10.0, 0.5_f64.ln()), 5.0, epsilon = 1e-12);
    }

    #[test]
    fn test_evolve_without_diffusion_is_deterministic() {
        let p = ZeroVol { x0: 100.0, mu: 0.05 };
        let x1 = p.evolve(0.0, p.x0(), 1.0, 3.0).unwrap();
        assert_relative_eq!(x1, 100.0 * 0.05_f64.exp(), epsilon = 1e-10);
    }

    #[test]
    fn test_single_factor_default() {
        let p = ZeroVol { x0: 1.0, mu: 0.0 };
        assert_eq!(p.factors(), 1);
    }
}
