//! Temperature schedules for simulated annealing
//!
//! A [`Schedule`] is a lazy iterator of temperatures. Nothing is precomputed, so a
//! schedule of `10^10` steps costs no more memory than one of ten. A schedule is
//! restarted by building (or cloning) it again.

use std::iter::FusedIterator;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{LocalSearchError, OptModel};

/// Number of steps of the schedule synthesised when the caller supplies none
pub const DEFAULT_SCHEDULE_LIMIT: usize = if usize::BITS >= 64 {
    10_000_000_000u64 as usize
} else {
    usize::MAX
};

/// Cooling policy, a pure function from the 0-based step `i` to a temperature
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum CoolingPolicy {
    /// `T(i) = k * exp(-delta * i)`
    Exponential {
        /// temperature at step 0
        k: f64,
        /// decay rate, `4 * delta` steps divide `k` by about ten
        delta: f64,
    },
    /// `T(i) = t0 * alpha^i`, with `0 < alpha < 1` (0.8 or more in practice)
    Geometric {
        /// temperature at step 0
        t0: f64,
        /// cooling factor
        alpha: f64,
    },
    /// `T(i) = t0 / (1 + alpha * ln(1 + i))`, with `alpha > 1` in practice
    Logarithmic {
        /// temperature at step 0
        t0: f64,
        /// cooling speed
        alpha: f64,
    },
    /// `T(i) = t0 / (1 + alpha * i)`, with `alpha > 0`
    Linear {
        /// temperature at step 0
        t0: f64,
        /// cooling speed
        alpha: f64,
    },
}

impl Default for CoolingPolicy {
    fn default() -> Self {
        Self::Exponential {
            k: 100.0,
            delta: 7e-4,
        }
    }
}

impl CoolingPolicy {
    /// Temperature at step `i`.
    ///
    /// Valid policies always give a non-negative value; an undefined value is
    /// reported as 0.0 so that consumers see it as fully cooled.
    pub fn temperature(&self, i: usize) -> f64 {
        let i = i as f64;
        let t = match *self {
            Self::Exponential { k, delta } => k * (-delta * i).exp(),
            Self::Geometric { t0, alpha } => t0 * alpha.powf(i),
            Self::Logarithmic { t0, alpha } => t0 / (1.0 + alpha * i.ln_1p()),
            Self::Linear { t0, alpha } => t0 / (1.0 + alpha * i),
        };
        if t.is_nan() { 0.0 } else { t }
    }

    /// Temperature at step 0
    pub fn initial_temperature(&self) -> f64 {
        match *self {
            Self::Exponential { k, .. } => k,
            Self::Geometric { t0, .. } | Self::Logarithmic { t0, .. } | Self::Linear { t0, .. } => {
                t0
            }
        }
    }

    /// Same policy starting from temperature `t0`
    pub fn with_initial_temperature(self, t0: f64) -> Self {
        match self {
            Self::Exponential { delta, .. } => Self::Exponential { k: t0, delta },
            Self::Geometric { alpha, .. } => Self::Geometric { t0, alpha },
            Self::Logarithmic { alpha, .. } => Self::Logarithmic { t0, alpha },
            Self::Linear { alpha, .. } => Self::Linear { t0, alpha },
        }
    }

    /// Check that the parameters give a non-negative, non-increasing sequence
    pub fn validate(&self) -> Result<(), LocalSearchError> {
        let t0 = self.initial_temperature();
        if !(t0.is_finite() && t0 >= 0.0) {
            return Err(LocalSearchError::invalid(
                "t0",
                format!("initial temperature must be finite and non-negative, got {t0}"),
            ));
        }
        match *self {
            Self::Exponential { delta, .. } => {
                if !(delta.is_finite() && delta >= 0.0) {
                    return Err(LocalSearchError::invalid(
                        "delta",
                        format!("must be finite and non-negative, got {delta}"),
                    ));
                }
            }
            Self::Geometric { alpha, .. } => {
                if !(alpha > 0.0 && alpha < 1.0) {
                    return Err(LocalSearchError::invalid(
                        "alpha",
                        format!("geometric alpha must be in (0, 1), got {alpha}"),
                    ));
                }
            }
            Self::Logarithmic { alpha, .. } | Self::Linear { alpha, .. } => {
                if !(alpha.is_finite() && alpha > 0.0) {
                    return Err(LocalSearchError::invalid(
                        "alpha",
                        format!("must be finite and positive, got {alpha}"),
                    ));
                }
            }
        }
        Ok(())
    }
}

/// Lazy sequence of temperatures following a [`CoolingPolicy`]
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Schedule {
    policy: CoolingPolicy,
    step: usize,
    limit: Option<usize>,
}

impl Default for Schedule {
    fn default() -> Self {
        Self::new(CoolingPolicy::default())
    }
}

impl Schedule {
    /// Unbounded schedule following `policy`
    pub fn new(policy: CoolingPolicy) -> Self {
        Self {
            policy,
            step: 0,
            limit: None,
        }
    }

    /// `T(i) = k * exp(-delta * i)`
    pub fn exponential(k: f64, delta: f64) -> Self {
        Self::new(CoolingPolicy::Exponential { k, delta })
    }

    /// `T(i) = t0 * alpha^i`
    pub fn geometric(t0: f64, alpha: f64) -> Self {
        Self::new(CoolingPolicy::Geometric { t0, alpha })
    }

    /// `T(i) = t0 / (1 + alpha * ln(1 + i))`
    pub fn logarithmic(t0: f64, alpha: f64) -> Self {
        Self::new(CoolingPolicy::Logarithmic { t0, alpha })
    }

    /// `T(i) = t0 / (1 + alpha * i)`
    pub fn linear(t0: f64, alpha: f64) -> Self {
        Self::new(CoolingPolicy::Linear { t0, alpha })
    }

    /// `policy` started from a temperature estimated by sampling `model`,
    /// see [`estimate_initial_temperature`]
    pub fn adaptive<M: OptModel + ?Sized>(model: &mut M, policy: CoolingPolicy) -> Self {
        let t0 = estimate_initial_temperature(model);
        Self::new(policy.with_initial_temperature(t0))
    }

    /// Schedule used by simulated annealing when none is given:
    /// `T(i) = t0 / (1 + i)` with an estimated `t0`, for at most
    /// [`DEFAULT_SCHEDULE_LIMIT`] steps
    pub fn default_for<M: OptModel + ?Sized>(model: &mut M) -> Self {
        Self::adaptive(model, CoolingPolicy::Linear { t0: 1.0, alpha: 1.0 })
            .with_limit(DEFAULT_SCHEDULE_LIMIT)
    }

    /// Stop after `limit` temperatures in total
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Cooling policy of this schedule
    pub fn policy(&self) -> &CoolingPolicy {
        &self.policy
    }

    /// Index of the next temperature to be produced
    pub fn step(&self) -> usize {
        self.step
    }

    /// Check the parameters of the underlying policy
    pub fn validate(&self) -> Result<(), LocalSearchError> {
        self.policy.validate()
    }
}

impl Iterator for Schedule {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        if self.limit.is_some_and(|limit| self.step >= limit) {
            return None;
        }
        let t = self.policy.temperature(self.step);
        self.step = self.step.saturating_add(1);
        Some(t)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self.limit {
            Some(limit) => {
                let remaining = limit.saturating_sub(self.step);
                (remaining, Some(remaining))
            }
            None => (usize::MAX, None),
        }
    }
}

impl FusedIterator for Schedule {}

/// Estimate an initial temperature from the cost spread of random states.
///
/// Draws `10 * model.dimension()` random states and returns
/// `2 * (max_cost - min_cost)`. The result is never negative: no samples or an
/// undefined spread give 0.0, an infinite spread saturates at `f64::MAX`.
pub fn estimate_initial_temperature<M: OptModel + ?Sized>(model: &mut M) -> f64 {
    let n_samples = model.dimension().saturating_mul(10);
    let mut min_cost = f64::INFINITY;
    let mut max_cost = f64::NEG_INFINITY;
    for _ in 0..n_samples {
        let state = model.initial_random_state();
        let cost = model.cost(&state);
        min_cost = min_cost.min(cost);
        max_cost = max_cost.max(cost);
    }
    if n_samples == 0 {
        return 0.0;
    }
    let t0 = 2.0 * (max_cost - min_cost);
    if t0.is_nan() { 0.0 } else { t0.clamp(0.0, f64::MAX) }
}
