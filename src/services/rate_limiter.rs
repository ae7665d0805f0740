use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::{OwnedSemaphorePermit, Semaphore};
use tokio::time::{Duration, Instant};

/// Caps in-flight upstream requests and optionally spaces them out.
///
/// Twelve Data's free tier allows 8 requests per minute; a portfolio with
/// more holdings than that would otherwise burn the quota in one burst.
#[derive(Clone)]
pub struct RateLimiter {
    semaphore: Arc<Semaphore>,
    next_slot: Arc<Mutex<Instant>>,
    min_delay: Option<Duration>,
}

impl RateLimiter {
    /// `requests_per_minute` of `None` (or zero) disables spacing.
    pub fn new(max_concurrent: usize, requests_per_minute: Option<u32>) -> Self {
        let min_delay = requests_per_minute
            .filter(|rpm| *rpm > 0)
            .map(|rpm| Duration::from_millis(60_000 / rpm as u64));
        Self {
            semaphore: Arc::new(Semaphore::new(max_concurrent.max(1))),
            next_slot: Arc::new(Mutex::new(Instant::now())),
            min_delay,
        }
    }

    /// Waits for a free slot. The permit is released when the guard drops.
    pub async fn acquire(&self) -> RateLimitGuard {
        let permit = self.semaphore.clone().acquire_owned().await.ok();

        if let Some(delay) = self.min_delay {
            // Reserve the next start time under the lock, sleep outside it.
            let start_at = {
                let mut next = self.next_slot.lock();
                let now = Instant::now();
                let start_at = if *next > now { *next } else { now };
                *next = start_at + delay;
                start_at
            };
            tokio::time::sleep_until(start_at).await;
        }

        RateLimitGuard { _permit: permit }
    }

    #[cfg(test)]
    pub fn available_permits(&self) -> usize {
        self.semaphore.available_permits()
    }
}

pub struct RateLimitGuard {
    _permit: Option<OwnedSemaphorePermit>,
}
