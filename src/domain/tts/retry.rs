use async_trait::async_trait;
use std::time::Duration;

/// Delay applied after a failed attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backoff {
    /// `base * attempt`: 2s, 4s, 6s, ... for a 2s base
    Linear { base: Duration },
}

impl Backoff {
    /// Delay after the given 1-based attempt
    pub fn delay(&self, attempt: u32) -> Duration {
        match self {
            Backoff::Linear { base } => base.saturating_mul(attempt),
        }
    }
}

/// How many times a synthesis is tried and how long to wait in between.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    max_attempts: u32,
    backoff: Backoff,
}

impl RetryPolicy {
    pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;
    pub const DEFAULT_BACKOFF_BASE: Duration = Duration::from_secs(2);

    /// `max_attempts` below 1 is raised to 1.
    pub fn new(max_attempts: u32, backoff: Backoff) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            backoff,
        }
    }

    pub fn linear(max_attempts: u32, base: Duration) -> Self {
        Self::new(max_attempts, Backoff::Linear { base })
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    pub fn backoff(&self, attempt: u32) -> Duration {
        self.backoff.delay(attempt)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::linear(Self::DEFAULT_MAX_ATTEMPTS, Self::DEFAULT_BACKOFF_BASE)
    }
}

/// Waits between retry attempts. Swapped out in tests.
#[async_trait]
pub trait Sleeper: Send + Sync {
    async fn sleep(&self, duration: Duration);
}

pub struct TokioSleeper;

#[async_trait]
impl Sleeper for TokioSleeper {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}
