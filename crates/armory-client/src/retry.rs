//! Retry policy for transient upstream failures
//!
//! The backoff strategy is an explicit value rather than a hardcoded
//! formula, so delays can be asserted on directly in tests instead of being
//! observed through real sleeps.

use std::time::Duration;

use reqwest::StatusCode;

/// Default number of retries after the initial attempt
const DEFAULT_MAX_RETRIES: u32 = 2;

/// Default base delay for linear backoff
const DEFAULT_LINEAR_BASE: Duration = Duration::from_millis(250);

/// Backoff strategy for spacing retry attempts
#[derive(Debug, Clone)]
pub enum Backoff {
    /// `base * (attempt + 1)`: the first retry waits one base interval
    Linear { base: Duration },
    /// `initial * multiplier^attempt`, capped at `max`, with a jitter factor
    /// between 0.0 and 1.0 to avoid thundering herds
    Exponential {
        initial: Duration,
        multiplier: f64,
        max: Duration,
        jitter: f64,
    },
}

impl Backoff {
    /// Delay before retry `attempt` (0-based)
    #[allow(
        clippy::cast_precision_loss,
        clippy::cast_possible_wrap,
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss
    )]
    pub fn delay(&self, attempt: u32) -> Duration {
        match self {
            Self::Linear { base } => *base * (attempt + 1),
            Self::Exponential {
                initial,
                multiplier,
                max,
                jitter,
            } => {
                let base = initial.as_millis() as f64 * multiplier.powi(attempt as i32);
                let capped = base.min(max.as_millis() as f64);

                let jitter_range = capped * jitter.clamp(0.0, 1.0);
                let jitter = rand::random::<f64>() * 2.0 * jitter_range - jitter_range;
                Duration::from_millis((capped + jitter).max(0.0) as u64)
            }
        }
    }
}

/// Bounded retry policy: `max_retries` re-attempts after the initial one,
/// spaced by the backoff strategy.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub backoff: Backoff,
}

impl RetryPolicy {
    /// Create a policy with an explicit bound and backoff
    pub fn new(max_retries: u32, backoff: Backoff) -> Self {
        Self {
            max_retries,
            backoff,
        }
    }

    /// Disable retries entirely
    pub fn none() -> Self {
        Self::new(0, Backoff::Linear { base: Duration::ZERO })
    }

    /// Whether a status is transient and worth retrying
    pub fn is_transient(status: StatusCode) -> bool {
        matches!(status.as_u16(), 429 | 500 | 502 | 503 | 504)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_RETRIES, Backoff::Linear { base: DEFAULT_LINEAR_BASE })
    }
}
