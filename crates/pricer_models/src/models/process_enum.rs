//! Static dispatch over the supported Black-Scholes process variants.

use super::{BlackScholesProcess, ConstantBlackScholesProcess, StochasticProcess1D};
use pricer_core::market_data::MarketDataError;

/// Process handed to path generators.
///
/// Engines pick the variant once per pricing call from their
/// `constant_parameters` flag; the path loop then dispatches through a
/// `match` rather than a trait object.
#[derive(Debug, Clone)]
pub enum ProcessEnum {
    /// Term-structure process, queried at every step.
    TermStructure(BlackScholesProcess),
    /// Frozen scalar parameters.
    Constant(ConstantBlackScholesProcess),
}

impl ProcessEnum {
    /// Short label used in logs and reports.
    pub fn name(&self) -> &'static str {
        match self {
            ProcessEnum::TermStructure(_) => "term_structure",
            ProcessEnum::Constant(_) => "constant",
        }
    }

    /// Whether this is the frozen variant.
    #[inline]
    pub fn is_constant(&self) -> bool {
        matches!(self, ProcessEnum::Constant(_))
    }
}

impl StochasticProcess1D for ProcessEnum {
    #[inline]
    fn x0(&self) -> f64 {
        match self {
            ProcessEnum::TermStructure(p) => p.x0(),
            ProcessEnum::Constant(p) => p.x0(),
        }
    }

    #[inline]
    fn drift(&self, t: f64, x: f64) -> Result<f64, MarketDataError> {
        match self {
            ProcessEnum::TermStructure(p) => p.drift(t, x),
            ProcessEnum::Constant(p) => p.drift(t, x),
        }
    }

    #[inline]
    fn diffusion(&self, t: f64, x: f64) -> Result<f64, MarketDataError> {
        match self {
            ProcessEnum::TermStructure(p) => p.diffusion(t, x),
            ProcessEnum::Constant(p) => p.diffusion(t, x),
        }
    }

    #[inline]
    fn evolve(&self, t0: f64, x0: f64, dt: f64, dw: f64) -> Result<f64, MarketDataError> {
        match self {
            ProcessEnum::TermStructure(p) => p.evolve(t0, x0, dt, dw),
            ProcessEnum::Constant(p) => p.evolve(t0, x0, dt, dw),
        }
    }
}

impl From<BlackScholesProcess> for ProcessEnum {
    fn from(p: BlackScholesProcess) -> Self {
        ProcessEnum::TermStructure(p)
    }
}

impl From<ConstantBlackScholesProcess> for ProcessEnum {
    fn from(p: ConstantBlackScholesProcess) -> Self {
        ProcessEnum::Constant(p)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pricer_core::market_data::{CurveEnum, VolSurfaceEnum};
    use std::sync::Arc;

    #[test]
    fn test_dispatch_matches_inner() {
        let inner = ConstantBlackScholesProcess::new(36.0, 0.0, 0.01, 0.2);
        let wrapped = ProcessEnum::from(inner);
        assert!(wrapped.is_constant());
        assert_eq!(wrapped.name(), "constant");
        assert_eq!(wrapped.x0(), 36.0);
        assert_eq!(
            wrapped.drift(0.3, 30.0).unwrap(),
            inner.drift(0.3, 30.0).unwrap()
        );
        assert_eq!(
            wrapped.evolve(0.0, 36.0, 0.1, 0.5).unwrap(),
            inner.evolve(0.0, 36.0, 0.1, 0.5).unwrap()
        );
    }

    #[test]
    fn test_term_structure_variant() {
        let p = BlackScholesProcess::new(
            36.0,
            Arc::new(CurveEnum::flat(0.01)),
            Arc::new(CurveEnum::flat(0.0)),
            Arc::new(VolSurfaceEnum::flat(0.2)),
        );
        let wrapped = ProcessEnum::from(p);
        assert!(!wrapped.is_constant());
        assert_eq!(wrapped.name(), "term_structure");
        assert_eq!(wrapped.diffusion(0.1, 36.0).unwrap(), 0.2);
    }
}
