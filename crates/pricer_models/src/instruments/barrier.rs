//! Single-barrier options with rebate.

use super::{Exercise, Instrument, InstrumentError, Payoff, PricingResults};

/// Barrier direction and effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum BarrierType {
    /// Activated when the underlying falls to the barrier
    DownIn,
    /// Activated when the underlying rises to the barrier
    UpIn,
    /// Extinguished when the underlying falls to the barrier
    DownOut,
    /// Extinguished when the underlying rises to the barrier
    UpOut,
}

impl BarrierType {
    /// Barrier sits above spot.
    #[inline]
    pub fn is_up(&self) -> bool {
        matches!(self, BarrierType::UpIn | BarrierType::UpOut)
    }

    /// Knock-in variants.
    #[inline]
    pub fn is_knock_in(&self) -> bool {
        matches!(self, BarrierType::DownIn | BarrierType::UpIn)
    }

    /// Whether a level lies strictly beyond the barrier.
    ///
    /// # Examples
    /// ```
    /// use pricer_models::instruments::BarrierType;
    ///
    /// assert!(BarrierType::UpIn.triggered(41.0, 40.0));
    /// assert!(!BarrierType::UpIn.triggered(40.0, 40.0));
    /// assert!(BarrierType::DownOut.triggered(39.0, 40.0));
    /// ```
    #[inline]
    pub fn triggered(&self, spot: f64, barrier: f64) -> bool {
        if self.is_up() {
            spot > barrier
        } else {
            spot < barrier
        }
    }
}

impl std::fmt::Display for BarrierType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            BarrierType::DownIn => "down-and-in",
            BarrierType::UpIn => "up-and-in",
            BarrierType::DownOut => "down-and-out",
            BarrierType::UpOut => "up-and-out",
        };
        write!(f, "{}", s)
    }
}

/// European option knocked in or out by a continuously monitored barrier.
///
/// A knock-in that never triggers, or a knock-out that does, pays `rebate`.
#[derive(Debug, Clone, PartialEq)]
pub struct BarrierOption {
    barrier_type: BarrierType,
    barrier: f64,
    rebate: f64,
    payoff: Payoff,
    exercise: Exercise,
    results: Option<PricingResults>,
}

impl BarrierOption {
    /// Build a barrier option.
    ///
    /// # Errors
    /// * `InvalidBarrier` - Non-positive or non-finite barrier
    /// * `InvalidParameter` - Negative or non-finite rebate
    /// * `InvalidExpiry` - Non-positive maturity
    ///
    /// # Examples
    /// ```
    /// use pricer_models::instruments::{
    ///     BarrierOption, BarrierType, Exercise, OptionType, Payoff,
    /// };
    ///
    /// let option = BarrierOption::new(
    ///     BarrierType::UpIn,
    ///     40.0,
    ///     0.0,
    ///     Payoff::plain_vanilla(OptionType::Put, 40.0).unwrap(),
    ///     Exercise::european(0.25).unwrap(),
    /// )
    /// .unwrap();
    /// assert_eq!(option.barrier(), 40.0);
    /// ```
    pub fn new(
        barrier_type: BarrierType,
        barrier: f64,
        rebate: f64,
        payoff: Payoff,
        exercise: Exercise,
    ) -> Result<Self, InstrumentError> {
        if !barrier.is_finite() || barrier <= 0.0 {
            return Err(InstrumentError::InvalidBarrier { barrier });
        }
        if !rebate.is_finite() || rebate < 0.0 {
            return Err(InstrumentError::InvalidParameter {
                message: format!("rebate must be finite and non-negative, got {}", rebate),
            });
        }
        let expiry = exercise.last_time();
        if !expiry.is_finite() || expiry <= 0.0 {
            return Err(InstrumentError::InvalidExpiry { expiry });
        }
        Ok(Self {
            barrier_type,
            barrier,
            rebate,
            payoff,
            exercise,
            results: None,
        })
    }

    /// Barrier type.
    #[inline]
    pub fn barrier_type(&self) -> BarrierType {
        self.barrier_type
    }

    /// Barrier level H.
    #[inline]
    pub fn barrier(&self) -> f64 {
        self.barrier
    }

    /// Rebate paid when the option ends inactive.
    #[inline]
    pub fn rebate(&self) -> f64 {
        self.rebate
    }

    /// Last exercise time.
    #[inline]
    pub fn maturity(&self) -> f64 {
        self.exercise.last_time()
    }
}

impl Instrument for BarrierOption {
    fn payoff(&self) -> &Payoff {
        &self.payoff
    }

    fn exercise(&self) -> &Exercise {
        &self.exercise
    }

    fn results(&self) -> Option<&PricingResults> {
        self.results.as_ref()
    }

    fn results_slot(&mut self) -> &mut Option<PricingResults> {
        &mut self.results
    }
}
