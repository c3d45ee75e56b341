//! Pacing policies for catalog searches
//!
//! The resolver awaits `Pacer::pace` immediately before every search, so a
//! policy sees the start of each call and can space them out to stay under
//! the catalog service's rate limit.

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::Instant;

use crate::config::PacingPolicy;
use crate::types::Pacer;

impl PacingPolicy {
    /// Build the pacer implementing this policy
    pub fn pacer(&self) -> Arc<dyn Pacer> {
        match *self {
            PacingPolicy::FixedDelay(delay) => Arc::new(FixedDelay::new(delay)),
            PacingPolicy::MinInterval(interval) => Arc::new(MinInterval::new(interval)),
        }
    }
}

/// Sleep a fixed delay before every search
#[derive(Debug, Clone, Copy)]
pub struct FixedDelay {
    delay: Duration,
}

impl FixedDelay {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

#[async_trait]
impl Pacer for FixedDelay {
    async fn pace(&self) {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
    }
}

/// Keep consecutive search starts at least `interval` apart
///
/// The first search goes out immediately; each later one waits only for
/// the part of the interval not already spent elsewhere.
pub struct MinInterval {
    interval: Duration,
    /// Earliest instant the next search may start
    next_slot: Mutex<Option<Instant>>,
}

impl MinInterval {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            next_slot: Mutex::new(None),
        }
    }
}

#[async_trait]
impl Pacer for MinInterval {
    async fn pace(&self) {
        let mut next_slot = self.next_slot.lock().await;

        if let Some(slot) = *next_slot {
            let wait = slot.saturating_duration_since(Instant::now());
            if !wait.is_zero() {
                tracing::debug!(?wait, "Pacing catalog search");
                tokio::time::sleep_until(slot).await;
            }
        }

        *next_slot = Some(Instant::now() + self.interval);
    }
}
