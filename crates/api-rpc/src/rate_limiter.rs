//! Rate Limiter (Token Bucket Algorithm)
//!
//! Caps requests per second on the public surface.
//! Uses atomic operations to avoid lock contention under load.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

/// Rate limiter using token bucket algorithm with atomic operations
pub struct RateLimiter {
    state: Arc<AtomicState>,
    max_tokens: u32,
    refill_rate: u32, // tokens per second
}

struct AtomicState {
    // Pack tokens and last_refill_ms into one u64:
    // upper 32 bits tokens, lower 32 bits milliseconds since creation
    packed: AtomicU64,
    creation_time: Instant,
}

impl RateLimiter {
    /// Create a new rate limiter
    ///
    /// # Arguments
    /// * `max_tokens` - Maximum burst size
    /// * `refill_rate` - Tokens added per second
    pub fn new(max_tokens: u32, refill_rate: u32) -> Self {
        let tokens_fixed = (max_tokens as u64) << 32;
        Self {
            state: Arc::new(AtomicState {
                packed: AtomicU64::new(tokens_fixed),
                creation_time: Instant::now(),
            }),
            max_tokens,
            refill_rate,
        }
    }

    /// Check if request is allowed (consumes 1 token)
    ///
    /// Returns true if allowed, false if rate limited.
    /// CAS loop instead of a lock.
    pub async fn check(&self) -> bool {
        loop {
            let packed = self.state.packed.load(Ordering::Acquire);
            let tokens = (packed >> 32) as u32;
            let last_refill_ms = (packed & 0xFFFFFFFF) as u32;

            let elapsed_ms = Instant::now()
                .duration_since(self.state.creation_time)
                .as_millis() as u32;
            let delta_ms = elapsed_ms.saturating_sub(last_refill_ms);

            // Refill tokens
            let tokens_to_add = (delta_ms as u64 * self.refill_rate as u64) / 1000;
            let new_tokens = ((tokens as u64 + tokens_to_add).min(self.max_tokens as u64)) as u32;

            if new_tokens >= 1 {
                let consumed = new_tokens - 1;
                let new_packed = ((consumed as u64) << 32) | (elapsed_ms as u64);

                match self.state.packed.compare_exchange(
                    packed,
                    new_packed,
                    Ordering::Release,
                    Ordering::Acquire,
                ) {
                    Ok(_) => return true,
                    Err(_) => continue, // Retry
                }
            } else {
                // Not enough tokens; still advance the refill timestamp
                let new_packed = ((new_tokens as u64) << 32) | (elapsed_ms as u64);
                let _ = self.state.packed.compare_exchange(
                    packed,
                    new_packed,
                    Ordering::Release,
                    Ordering::Acquire,
                );
                return false;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::{sleep, Duration};

    #[tokio::test]
    async fn test_rate_limiter_allows_within_limit() {
        let limiter = RateLimiter::new(10, 10);

        for _ in 0..10 {
            assert!(limiter.check().await);
        }

        // 11th should be denied
        assert!(!limiter.check().await);
    }

    #[tokio::test]
    async fn test_rate_limiter_refills() {
        let limiter = RateLimiter::new(5, 10); // 10 tokens/sec

        for _ in 0..5 {
            assert!(limiter.check().await);
        }
        assert!(!limiter.check().await);

        sleep(Duration::from_secs(1)).await;

        assert!(limiter.check().await);
    }

    #[tokio::test]
    async fn test_rate_limiter_concurrent() {
        let limiter = Arc::new(RateLimiter::new(100, 50));

        let mut handles = vec![];
        for _ in 0..10 {
            let limiter = Arc::clone(&limiter);
            handles.push(tokio::spawn(async move {
                let mut allowed = 0;
                for _ in 0..20 {
                    if limiter.check().await {
                        allowed += 1;
                    }
                }
                allowed
            }));
        }

        let mut total_allowed = 0;
        for handle in handles {
            total_allowed += handle.await.unwrap();
        }

        // 200 attempts against a burst of 100
        assert!(
            total_allowed <= 100,
            "Expected at most 100 allowed, got {}",
            total_allowed
        );
        assert!(
            total_allowed >= 90,
            "Expected at least 90 allowed (some tolerance), got {}",
            total_allowed
        );
    }
}
