// Time Provider Port (for testability)
//
// Deadline and window checks must never read the system clock ad hoc;
// "now" is always injected so tests can pin it.

/// Clock interface (allows fixed clocks in tests)
pub trait TimeProvider: Send + Sync {
    /// Get current time in milliseconds since epoch
    fn now_millis(&self) -> i64;
}

/// System clock (production)
pub struct SystemTimeProvider;

impl TimeProvider for SystemTimeProvider {
    fn now_millis(&self) -> i64 {
        chrono::Utc::now().timestamp_millis()
    }
}
