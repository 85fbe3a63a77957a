//! Monte Carlo engine configuration.
//!
//! [`McEngineBuilder`] collects named options and validates them when an
//! engine is built. Options that exclude each other (a step count or a
//! step density; a sample count or a tolerance) are resolved into the
//! [`TimeStepping`] and [`StoppingRule`] enums so a built engine can only
//! hold one of each.

use std::marker::PhantomData;

use pricer_models::models::{BlackScholesProcess, FreezePolicy};

use super::error::ConfigError;
use crate::rng::{PseudoRandom, RandomPolicy};

/// Samples per chunk in parallel runs unless overridden.
pub const DEFAULT_CHUNK_SIZE: usize = 16_384;

/// How the simulation grid is sized.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum TimeStepping {
    /// Fixed number of steps.
    Steps(usize),
    /// Steps per year of residual time, truncated and floored at one.
    StepsPerYear(usize),
}

impl TimeStepping {
    /// Number of steps over `horizon` years.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use pricer_pricing::mc::TimeStepping;
    ///
    /// assert_eq!(TimeStepping::Steps(10).steps_for(0.25), 10);
    /// assert_eq!(TimeStepping::StepsPerYear(52).steps_for(0.25), 13);
    /// assert_eq!(TimeStepping::StepsPerYear(2).steps_for(0.1), 1);
    /// ```
    pub fn steps_for(&self, horizon: f64) -> usize {
        match *self {
            TimeStepping::Steps(n) => n,
            TimeStepping::StepsPerYear(n) => ((n as f64 * horizon) as usize).max(1),
        }
    }
}

/// When the simulation stops drawing samples.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum StoppingRule {
    /// Exactly this many samples.
    Samples(usize),
    /// Until the error estimate is at most `tolerance`, drawing no more
    /// than `max_samples`.
    Tolerance {
        /// Absolute tolerance on the standard error.
        tolerance: f64,
        /// Sample cap.
        max_samples: usize,
    },
}

/// Validated settings shared by all Monte Carlo engines.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct McSettings {
    pub(crate) time_stepping: Option<TimeStepping>,
    pub(crate) brownian_bridge: bool,
    pub(crate) antithetic_variate: bool,
    pub(crate) stopping_rule: StoppingRule,
    pub(crate) seed: u64,
    pub(crate) constant_parameters: bool,
    pub(crate) freeze_policy: FreezePolicy,
    pub(crate) parallel: Option<usize>,
}

impl McSettings {
    /// Grid sizing; `None` only for engines whose grid comes from fixings.
    #[inline]
    pub fn time_stepping(&self) -> Option<TimeStepping> {
        self.time_stepping
    }

    /// Whether draws go through a Brownian bridge.
    #[inline]
    pub fn brownian_bridge(&self) -> bool {
        self.brownian_bridge
    }

    /// Whether each sample averages a path with its antithetic twin.
    #[inline]
    pub fn antithetic_variate(&self) -> bool {
        self.antithetic_variate
    }

    /// Stopping rule.
    #[inline]
    pub fn stopping_rule(&self) -> StoppingRule {
        self.stopping_rule
    }

    /// Base seed.
    #[inline]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Whether paths are generated from the frozen process.
    #[inline]
    pub fn constant_parameters(&self) -> bool {
        self.constant_parameters
    }

    /// Sampling time used when freezing.
    #[inline]
    pub fn freeze_policy(&self) -> FreezePolicy {
        self.freeze_policy
    }

    /// Chunk size when running in parallel.
    #[inline]
    pub fn parallel(&self) -> Option<usize> {
        self.parallel
    }
}

/// Per-engine defaults applied by [`McEngineBuilder`].
#[derive(Clone, Copy, Debug)]
pub(crate) struct EngineDefaults {
    pub(crate) requires_steps: bool,
    pub(crate) brownian_bridge: bool,
    pub(crate) freeze_policy: FreezePolicy,
}

/// Builder for the Monte Carlo engines.
///
/// Every option is optional until `build_*` is called; the build step
/// applies the engine's defaults and checks the options against each other.
///
/// # Examples
///
/// ```rust
/// use std::sync::Arc;
/// use pricer_core::market_data::{CurveEnum, VolSurfaceEnum};
/// use pricer_models::models::BlackScholesProcess;
/// use pricer_pricing::mc::{ConfigError, McEngineBuilder};
/// use pricer_pricing::rng::LowDiscrepancy;
///
/// let process = BlackScholesProcess::new(
///     36.0,
///     Arc::new(CurveEnum::flat(0.01)),
///     Arc::new(CurveEnum::flat(0.0)),
///     Arc::new(VolSurfaceEnum::flat(0.2)),
/// );
///
/// let engine = McEngineBuilder::new(process.clone())
///     .with_steps(10)
///     .with_samples(10_000)
///     .with_seed(42)
///     .with_constant_parameters(true)
///     .build_european();
/// assert!(engine.is_ok());
///
/// let err = McEngineBuilder::new(process)
///     .with_random_policy::<LowDiscrepancy>()
///     .with_steps(10)
///     .with_absolute_tolerance(1e-3)
///     .build_european()
///     .unwrap_err();
/// assert!(matches!(err, ConfigError::ErrorEstimateUnavailable { .. }));
/// ```
#[derive(Clone, Debug)]
pub struct McEngineBuilder<R = PseudoRandom> {
    pub(crate) process: BlackScholesProcess,
    time_steps: Option<usize>,
    time_steps_per_year: Option<usize>,
    brownian_bridge: Option<bool>,
    antithetic_variate: bool,
    samples: Option<usize>,
    absolute_tolerance: Option<f64>,
    max_samples: Option<usize>,
    pub(crate) bias: bool,
    seed: u64,
    constant_parameters: bool,
    freeze_policy: Option<FreezePolicy>,
    parallel: bool,
    chunk_size: usize,
    _policy: PhantomData<R>,
}

impl McEngineBuilder<PseudoRandom> {
    /// Builder for pseudo-random engines simulating `process`.
    pub fn new(process: BlackScholesProcess) -> Self {
        Self {
            process,
            time_steps: None,
            time_steps_per_year: None,
            brownian_bridge: None,
            antithetic_variate: false,
            samples: None,
            absolute_tolerance: None,
            max_samples: None,
            bias: false,
            seed: 0,
            constant_parameters: false,
            freeze_policy: None,
            parallel: false,
            chunk_size: DEFAULT_CHUNK_SIZE,
            _policy: PhantomData,
        }
    }
}

impl<R: RandomPolicy> McEngineBuilder<R> {
    /// Same options with a different random policy.
    pub fn with_random_policy<S: RandomPolicy>(self) -> McEngineBuilder<S> {
        McEngineBuilder {
            process: self.process,
            time_steps: self.time_steps,
            time_steps_per_year: self.time_steps_per_year,
            brownian_bridge: self.brownian_bridge,
            antithetic_variate: self.antithetic_variate,
            samples: self.samples,
            absolute_tolerance: self.absolute_tolerance,
            max_samples: self.max_samples,
            bias: self.bias,
            seed: self.seed,
            constant_parameters: self.constant_parameters,
            freeze_policy: self.freeze_policy,
            parallel: self.parallel,
            chunk_size: self.chunk_size,
            _policy: PhantomData,
        }
    }

    /// Fixed number of time steps.
    pub fn with_steps(mut self, steps: usize) -> Self {
        self.time_steps = Some(steps);
        self
    }

    /// Time steps per year of residual maturity.
    pub fn with_steps_per_year(mut self, steps: usize) -> Self {
        self.time_steps_per_year = Some(steps);
        self
    }

    /// Route draws through a Brownian bridge.
    pub fn with_brownian_bridge(mut self, enabled: bool) -> Self {
        self.brownian_bridge = Some(enabled);
        self
    }

    /// Average every path with its antithetic twin.
    pub fn with_antithetic_variate(mut self, enabled: bool) -> Self {
        self.antithetic_variate = enabled;
        self
    }

    /// Draw exactly `samples` samples.
    pub fn with_samples(mut self, samples: usize) -> Self {
        self.samples = Some(samples);
        self
    }

    /// Draw until the standard error falls to `tolerance`.
    pub fn with_absolute_tolerance(mut self, tolerance: f64) -> Self {
        self.absolute_tolerance = Some(tolerance);
        self
    }

    /// Cap on the number of samples under a tolerance target.
    pub fn with_max_samples(mut self, max_samples: usize) -> Self {
        self.max_samples = Some(max_samples);
        self
    }

    /// Monitor barriers on grid points only (barrier engine).
    pub fn with_bias(mut self, biased: bool) -> Self {
        self.bias = biased;
        self
    }

    /// Base seed of the random sequence.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Simulate the frozen process instead of the term-structure one.
    pub fn with_constant_parameters(mut self, enabled: bool) -> Self {
        self.constant_parameters = enabled;
        self
    }

    /// Sampling time used when freezing parameters.
    pub fn with_freeze_policy(mut self, policy: FreezePolicy) -> Self {
        self.freeze_policy = Some(policy);
        self
    }

    /// Split samples into independently seeded chunks run on the rayon pool.
    pub fn with_parallel(mut self, enabled: bool) -> Self {
        self.parallel = enabled;
        self
    }

    /// Samples per chunk in parallel runs.
    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size;
        self
    }

    pub(crate) fn settings(&self, defaults: EngineDefaults) -> Result<McSettings, ConfigError> {
        let time_stepping = match (self.time_steps, self.time_steps_per_year) {
            (Some(_), Some(_)) => return Err(ConfigError::StepsOverspecified),
            (Some(0), None) => return Err(ConfigError::ZeroSteps { name: "time steps" }),
            (None, Some(0)) => {
                return Err(ConfigError::ZeroSteps {
                    name: "time steps per year",
                })
            }
            (Some(n), None) => Some(TimeStepping::Steps(n)),
            (None, Some(n)) => Some(TimeStepping::StepsPerYear(n)),
            (None, None) if defaults.requires_steps => return Err(ConfigError::NoTimeSteps),
            (None, None) => None,
        };

        let stopping_rule = match (self.samples, self.absolute_tolerance) {
            (Some(_), Some(_)) => return Err(ConfigError::SamplesAndTolerance),
            (None, None) => return Err(ConfigError::NoStoppingRule),
            (Some(0), None) => return Err(ConfigError::ZeroSamples { name: "samples" }),
            (Some(n), None) => StoppingRule::Samples(n),
            (None, Some(tolerance)) => {
                if !R::ALLOWS_ERROR_ESTIMATE {
                    return Err(ConfigError::ErrorEstimateUnavailable { policy: R::NAME });
                }
                if !tolerance.is_finite() || tolerance <= 0.0 {
                    return Err(ConfigError::NonPositiveTolerance { tolerance });
                }
                let max_samples = self.max_samples.unwrap_or(usize::MAX);
                if max_samples == 0 {
                    return Err(ConfigError::ZeroSamples {
                        name: "max samples",
                    });
                }
                StoppingRule::Tolerance {
                    tolerance,
                    max_samples,
                }
            }
        };

        let freeze_policy = self.freeze_policy.unwrap_or(defaults.freeze_policy);
        if let FreezePolicy::Offset(offset) = freeze_policy {
            if !offset.is_finite() || offset < 0.0 {
                return Err(ConfigError::InvalidFreezeOffset { offset });
            }
        }

        let parallel = if self.parallel {
            if self.chunk_size == 0 {
                return Err(ConfigError::ZeroSamples { name: "chunk size" });
            }
            Some(self.chunk_size)
        } else {
            None
        };

        Ok(McSettings {
            time_stepping,
            brownian_bridge: self.brownian_bridge.unwrap_or(defaults.brownian_bridge),
            antithetic_variate: self.antithetic_variate,
            stopping_rule,
            seed: self.seed,
            constant_parameters: self.constant_parameters,
            freeze_policy,
            parallel,
        })
    }
}
