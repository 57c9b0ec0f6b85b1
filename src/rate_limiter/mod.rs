use std::sync::Mutex;
use std::time::Duration;
use tokio::time::{Instant, sleep_until};

/// Controls the rate of requests to prevent overloading the site.
///
/// Grants are spaced at least one interval apart globally, across every
/// task sharing the limiter. There is no burst allowance.
pub struct RateLimiter {
    interval: Duration,
    next_slot: Mutex<Option<Instant>>,
}

impl RateLimiter {
    pub fn per_second(rate: u32) -> Self {
        Self::with_interval(Duration::from_secs(1) / rate.max(1))
    }

    pub fn with_interval(interval: Duration) -> Self {
        Self {
            interval,
            next_slot: Mutex::new(None),
        }
    }

    /// Wait until the next request slot opens.
    ///
    /// The slot is reserved under the lock; the wait happens outside it,
    /// so a sleeping caller never holds up slot reservation for others.
    pub async fn acquire(&self) {
        let slot = self.reserve_slot();
        sleep_until(slot).await;
    }

    fn reserve_slot(&self) -> Instant {
        let mut next = self.next_slot.lock().expect("rate limiter lock poisoned");
        let now = Instant::now();
        let slot = match *next {
            Some(at) if at > now => at,
            _ => now,
        };
        *next = Some(slot + self.interval);
        slot
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::future::join_all;
    use std::sync::Arc;

    #[tokio::test(start_paused = true)]
    async fn test_first_acquisition_is_immediate() {
        let limiter = RateLimiter::per_second(10);
        let start = Instant::now();

        limiter.acquire().await;

        assert_eq!(Instant::now() - start, Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn test_concurrent_grants_are_spaced_by_interval() {
        let limiter = Arc::new(RateLimiter::per_second(10));
        let start = Instant::now();

        let tasks: Vec<_> = (0..5)
            .map(|_| {
                let limiter = Arc::clone(&limiter);
                tokio::spawn(async move {
                    limiter.acquire().await;
                    Instant::now()
                })
            })
            .collect();

        let mut grants: Vec<Instant> = join_all(tasks)
            .await
            .into_iter()
            .map(|handle| handle.unwrap())
            .collect();
        grants.sort();

        for pair in grants.windows(2) {
            assert!(pair[1] - pair[0] >= Duration::from_millis(100));
        }
        assert_eq!(grants[4] - start, Duration::from_millis(400));
    }

    #[tokio::test(start_paused = true)]
    async fn test_sequential_acquisitions_keep_spacing() {
        let limiter = RateLimiter::with_interval(Duration::from_millis(250));
        let start = Instant::now();

        for _ in 0..3 {
            limiter.acquire().await;
        }

        assert_eq!(Instant::now() - start, Duration::from_millis(500));
    }
}
