use crate::foundation::error::{GridFxError, GridFxResult};

/// Spacing between readiness checks.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Backoff {
    #[default]
    Fixed,
    /// Multiply the interval by `factor` after every failed check, capped at `max_ms`.
    Exponential { factor: f64, max_ms: f64 },
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct RetryPolicy {
    pub interval_ms: f64,
    /// Total number of checks before giving up, including the first.
    pub max_attempts: u32,
    pub backoff: Backoff,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            interval_ms: 100.0,
            max_attempts: 50,
            backoff: Backoff::Fixed,
        }
    }
}

impl RetryPolicy {
    pub fn validate(&self) -> GridFxResult<()> {
        if !(self.interval_ms.is_finite() && self.interval_ms >= 0.0) {
            return Err(GridFxError::validation(
                "retry interval_ms must be finite and >= 0",
            ));
        }
        if self.max_attempts == 0 {
            return Err(GridFxError::validation("retry max_attempts must be >= 1"));
        }
        if let Backoff::Exponential { factor, max_ms } = self.backoff
            && !(factor.is_finite() && factor >= 1.0 && max_ms.is_finite() && max_ms >= 0.0)
        {
            return Err(GridFxError::validation(
                "exponential backoff needs factor >= 1 and a finite max_ms",
            ));
        }
        Ok(())
    }

    /// Delay before the check following failed check number `failed` (1-based).
    pub fn delay_after(&self, failed: u32) -> f64 {
        match self.backoff {
            Backoff::Fixed => self.interval_ms,
            Backoff::Exponential { factor, max_ms } => {
                let exp = i32::try_from(failed.saturating_sub(1)).unwrap_or(i32::MAX);
                (self.interval_ms * factor.powi(exp)).min(max_ms)
            }
        }
    }
}

/// Readiness of a deferred setup step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Readiness {
    Pending { failed: u32 },
    Ready,
    Abandoned { attempts: u32 },
}

impl Default for Readiness {
    fn default() -> Self {
        Self::Pending { failed: 0 }
    }
}

impl Readiness {
    pub fn is_pending(self) -> bool {
        matches!(self, Self::Pending { .. })
    }

    /// Record the outcome of one check.
    ///
    /// Returns the delay before the next check while still pending, `None` once settled.
    pub fn record(&mut self, ready: bool, policy: &RetryPolicy) -> Option<f64> {
        let Self::Pending { failed } = *self else {
            return None;
        };
        if ready {
            *self = Self::Ready;
            return None;
        }

        let failed = failed + 1;
        if failed >= policy.max_attempts {
            *self = Self::Abandoned { attempts: failed };
            return None;
        }
        *self = Self::Pending { failed };
        Some(policy.delay_after(failed))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/runtime/retry.rs"]
mod tests;
