//! Exercise schedules.
//!
//! Times are year fractions from the evaluation date.

use super::InstrumentError;

/// When the holder may exercise.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Exercise {
    /// Single exercise at expiry.
    European(f64),
    /// Any time within `[earliest, latest]`.
    American {
        /// First exercise time
        earliest: f64,
        /// Last exercise time
        latest: f64,
    },
    /// On any of the listed times.
    Bermudan(Vec<f64>),
}

impl Exercise {
    /// European exercise at `expiry`, which must be positive.
    ///
    /// # Examples
    /// ```
    /// use pricer_models::instruments::Exercise;
    ///
    /// let ex = Exercise::european(0.25).unwrap();
    /// assert_eq!(ex.last_time(), 0.25);
    /// assert!(Exercise::european(0.0).is_err());
    /// ```
    pub fn european(expiry: f64) -> Result<Self, InstrumentError> {
        if expiry.is_finite() && expiry > 0.0 {
            Ok(Exercise::European(expiry))
        } else {
            Err(InstrumentError::InvalidExpiry { expiry })
        }
    }

    /// Last time the option can be exercised.
    pub fn last_time(&self) -> f64 {
        match self {
            Exercise::European(t) => *t,
            Exercise::American { latest, .. } => *latest,
            Exercise::Bermudan(times) => times.iter().copied().fold(f64::NEG_INFINITY, f64::max),
        }
    }

    /// Whether this is European exercise.
    #[inline]
    pub fn is_european(&self) -> bool {
        matches!(self, Exercise::European(_))
    }

    /// Short description used in error messages.
    pub fn name(&self) -> &'static str {
        match self {
            Exercise::European(_) => "European",
            Exercise::American { .. } => "American",
            Exercise::Bermudan(_) => "Bermudan",
        }
    }
}
