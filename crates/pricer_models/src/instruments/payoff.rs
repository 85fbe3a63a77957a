//! Striked payoffs.

use super::InstrumentError;

/// Call or put.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum OptionType {
    /// Right to buy
    Call,
    /// Right to sell
    Put,
}

impl OptionType {
    /// +1 for calls, −1 for puts.
    #[inline]
    pub fn sign(&self) -> f64 {
        match self {
            OptionType::Call => 1.0,
            OptionType::Put => -1.0,
        }
    }
}

impl std::fmt::Display for OptionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OptionType::Call => write!(f, "call"),
            OptionType::Put => write!(f, "put"),
        }
    }
}

/// Payoff at exercise as a function of the underlying level.
///
/// Every variant carries a strike, so anything that needs one (the parameter
/// freezer, closed-form references) can read it without downcasting.
///
/// # Examples
/// ```
/// use pricer_models::instruments::{OptionType, Payoff};
///
/// let put = Payoff::plain_vanilla(OptionType::Put, 40.0).unwrap();
/// assert_eq!(put.value(36.0), 4.0);
/// assert_eq!(put.value(44.0), 0.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Payoff {
    /// max(ω(S − K), 0)
    PlainVanilla {
        /// Call or put
        option_type: OptionType,
        /// Strike K
        strike: f64,
    },
    /// `cash` if ω(S − K) > 0, else 0
    CashOrNothing {
        /// Call or put
        option_type: OptionType,
        /// Strike K
        strike: f64,
        /// Cash amount paid in the money
        cash: f64,
    },
}

fn check_strike(strike: f64) -> Result<(), InstrumentError> {
    if strike.is_finite() && strike > 0.0 {
        Ok(())
    } else {
        Err(InstrumentError::InvalidStrike { strike })
    }
}

impl Payoff {
    /// Plain vanilla payoff with a positive strike.
    pub fn plain_vanilla(option_type: OptionType, strike: f64) -> Result<Self, InstrumentError> {
        check_strike(strike)?;
        Ok(Payoff::PlainVanilla {
            option_type,
            strike,
        })
    }

    /// Cash-or-nothing digital payoff.
    pub fn cash_or_nothing(
        option_type: OptionType,
        strike: f64,
        cash: f64,
    ) -> Result<Self, InstrumentError> {
        check_strike(strike)?;
        if !cash.is_finite() {
            return Err(InstrumentError::InvalidParameter {
                message: format!("cash amount must be finite, got {}", cash),
            });
        }
        Ok(Payoff::CashOrNothing {
            option_type,
            strike,
            cash,
        })
    }

    /// Strike K.
    #[inline]
    pub fn strike(&self) -> f64 {
        match *self {
            Payoff::PlainVanilla { strike, .. } | Payoff::CashOrNothing { strike, .. } => strike,
        }
    }

    /// Call or put.
    #[inline]
    pub fn option_type(&self) -> OptionType {
        match *self {
            Payoff::PlainVanilla { option_type, .. }
            | Payoff::CashOrNothing { option_type, .. } => option_type,
        }
    }

    /// Whether this is a plain vanilla payoff.
    #[inline]
    pub fn is_plain_vanilla(&self) -> bool {
        matches!(self, Payoff::PlainVanilla { .. })
    }

    /// Short description used in error messages.
    pub fn name(&self) -> &'static str {
        match self {
            Payoff::PlainVanilla { .. } => "plain vanilla",
            Payoff::CashOrNothing { .. } => "cash-or-nothing",
        }
    }

    /// Payoff for underlying level `spot`.
    #[inline]
    pub fn value(&self, spot: f64) -> f64 {
        match *self {
            Payoff::PlainVanilla {
                option_type,
                strike,
            } => (option_type.sign() * (spot - strike)).max(0.0),
            Payoff::CashOrNothing {
                option_type,
                strike,
                cash,
            } => {
                if option_type.sign() * (spot - strike) > 0.0 {
                    cash
                } else {
                    0.0
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_plain_vanilla_values() {
        let call = Payoff::plain_vanilla(OptionType::Call, 100.0).unwrap();
        assert_eq!(call.value(110.0), 10.0);
        assert_eq!(call.value(90.0), 0.0);
        assert_eq!(call.strike(), 100.0);
        assert_eq!(call.option_type(), OptionType::Call);
        assert!(call.is_plain_vanilla());
    }

    #[test]
    fn test_cash_or_nothing_values() {
        let digital = Payoff::cash_or_nothing(OptionType::Put, 40.0, 5.0).unwrap();
        assert_eq!(digital.value(39.0), 5.0);
        assert_eq!(digital.value(40.0), 0.0);
        assert!(!digital.is_plain_vanilla());
        assert_eq!(digital.name(), "cash-or-nothing");
    }

    #[test]
    fn test_rejects_bad_strike() {
        assert_eq!(
            Payoff::plain_vanilla(OptionType::Call, 0.0),
            Err(InstrumentError::InvalidStrike { strike: 0.0 })
        );
        assert!(Payoff::plain_vanilla(OptionType::Call, f64::INFINITY).is_err());
        assert!(Payoff::cash_or_nothing(OptionType::Call, 10.0, f64::NAN).is_err());
    }

    #[test]
    fn test_option_type_sign_and_display() {
        assert_eq!(OptionType::Call.sign(), 1.0);
        assert_eq!(OptionType::Put.sign(), -1.0);
        assert_eq!(OptionType::Put.to_string(), "put");
    }

    proptest! {
        #[test]
        fn prop_call_minus_put_is_forward(spot in 0.01f64..500.0, strike in 0.01f64..500.0) {
            let call = Payoff::plain_vanilla(OptionType::Call, strike).unwrap();
            let put = Payoff::plain_vanilla(OptionType::Put, strike).unwrap();
            prop_assert!((call.value(spot) - put.value(spot) - (spot - strike)).abs() < 1e-9);
        }
    }
}
