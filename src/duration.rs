//! Target duration bookkeeping.
//!
//! The [`Controller`] owns the requested countdown length and turns a change
//! of that length into a shift of the remaining time rather than a reset. A
//! countdown with 8s left of 10s that is re-targeted to 20s ends up with 18s
//! left, not 20s.

use crate::tick::TICKS_PER_SECOND;

/// Smallest duration a countdown may have, in seconds.
pub const MIN_TARGET_SECONDS: f64 = 1.0;

/// Normalizes a requested duration. Anything below one second, and NaN,
/// becomes one second.
pub fn normalize_target(seconds: f64) -> f64 {
    if seconds.is_nan() || seconds < MIN_TARGET_SECONDS {
        MIN_TARGET_SECONDS
    } else {
        seconds
    }
}

/// Converts a duration in seconds to whole ticks, never less than one.
pub fn seconds_to_ticks(seconds: f64) -> u64 {
    let ticks = (seconds * TICKS_PER_SECOND as f64).round();
    if ticks < 1.0 {
        1
    } else if ticks >= u64::MAX as f64 {
        u64::MAX
    } else {
        ticks as u64
    }
}

/// Outcome of applying a new target to a running countdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reconciliation {
    /// Remaining ticks after the shift, already clamped to `[0, total_ticks]`.
    pub remaining_ticks: u64,
    /// Denominator for the new target.
    pub total_ticks: u64,
    /// Signed shift that was applied before clamping.
    pub delta_ticks: i64,
}

/// Owns the authoritative target duration.
#[derive(Debug, Clone, PartialEq)]
pub struct Controller {
    target_seconds: f64,
    previous_target_seconds: Option<f64>,
}

impl Controller {
    /// Creates a controller for an initial target. This is a plain
    /// initialization: no delta is ever derived from it.
    pub fn new(target_seconds: f64) -> Self {
        let target_seconds = normalize_target(target_seconds);
        Self {
            target_seconds,
            previous_target_seconds: Some(target_seconds),
        }
    }

    /// Creates a controller that has not seen any target yet.
    pub fn unset() -> Self {
        Self {
            target_seconds: MIN_TARGET_SECONDS,
            previous_target_seconds: None,
        }
    }

    /// Current normalized target in seconds.
    pub fn target_seconds(&self) -> f64 {
        self.target_seconds
    }

    /// Last target that was reconciled, if any.
    pub fn previous_target_seconds(&self) -> Option<f64> {
        self.previous_target_seconds
    }

    /// Ticks in a full run of the current target.
    pub fn total_ticks(&self) -> u64 {
        seconds_to_ticks(self.target_seconds)
    }

    /// Applies a new requested target to `remaining_ticks`.
    ///
    /// Returns `None` when the normalized target equals the last reconciled
    /// one, since nothing has to move. The first assignment on an
    /// [`unset`](Self::unset) controller initializes without a delta and
    /// reports a full run.
    pub fn reconcile(&mut self, requested_seconds: f64, remaining_ticks: u64) -> Option<Reconciliation> {
        let target = normalize_target(requested_seconds);

        let Some(previous) = self.previous_target_seconds else {
            self.target_seconds = target;
            self.previous_target_seconds = Some(target);
            let total_ticks = self.total_ticks();
            return Some(Reconciliation {
                remaining_ticks: total_ticks,
                total_ticks,
                delta_ticks: 0,
            });
        };

        if target == previous {
            return None;
        }

        // delta is taken between rounded totals so it always matches them
        let previous_ticks = i128::from(seconds_to_ticks(previous));
        self.target_seconds = target;
        self.previous_target_seconds = Some(target);

        let total_ticks = self.total_ticks();
        let delta = i128::from(total_ticks) - previous_ticks;
        let shifted = i128::from(remaining_ticks) + delta;
        let remaining_ticks = shifted.clamp(0, i128::from(total_ticks)) as u64;
        let delta_ticks = delta.clamp(i128::from(i64::MIN), i128::from(i64::MAX)) as i64;

        Some(Reconciliation {
            remaining_ticks,
            total_ticks,
            delta_ticks,
        })
    }
}
