//! Cached capability flags.
//!
//! Premium status lives outside the document model. It is fetched from a
//! subscription-check collaborator, cached for a fixed TTL and revalidated
//! explicitly or on first read after expiry.

use crate::persistence::GatewayError;
use once_cell::sync::Lazy;
use std::sync::Mutex;
use std::time::{Duration, Instant};

pub const DEFAULT_CAPABILITY_TTL: Duration = Duration::from_secs(300);

/// Asks the subscription service whether a capability is enabled
pub trait SubscriptionCheck {
    fn check(&self) -> Result<bool, GatewayError>;
}

impl<F> SubscriptionCheck for F
where
    F: Fn() -> Result<bool, GatewayError>,
{
    fn check(&self) -> Result<bool, GatewayError> {
        self()
    }
}

#[derive(Debug, Clone, Copy)]
struct Cached {
    enabled: bool,
    checked_at: Instant,
}

/// A boolean capability with a time-to-live
#[derive(Debug)]
pub struct CapabilityCache {
    ttl: Duration,
    state: Mutex<Option<Cached>>,
}

static PREMIUM: Lazy<CapabilityCache> = Lazy::new(|| CapabilityCache::new(DEFAULT_CAPABILITY_TTL));

/// Process-wide premium flag
pub fn premium() -> &'static CapabilityCache {
    &PREMIUM
}

impl CapabilityCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            state: Mutex::new(None),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Cached value if it has not expired
    pub fn cached(&self) -> Option<bool> {
        let state = *self.lock();
        state
            .filter(|c| c.checked_at.elapsed() < self.ttl)
            .map(|c| c.enabled)
    }

    /// Cached value, revalidating through `checker` when stale or missing
    pub fn is_enabled(&self, checker: &dyn SubscriptionCheck) -> bool {
        match self.cached() {
            Some(enabled) => enabled,
            None => self.revalidate(checker),
        }
    }

    /// Ask the collaborator now and cache the answer.
    ///
    /// When the check fails the previous value (even if expired) is kept,
    /// and without one the capability reads as disabled.
    pub fn revalidate(&self, checker: &dyn SubscriptionCheck) -> bool {
        match checker.check() {
            Ok(enabled) => {
                *self.lock() = Some(Cached {
                    enabled,
                    checked_at: Instant::now(),
                });
                tracing::debug!(enabled, "capability revalidated");
                enabled
            }
            Err(error) => {
                let previous = (*self.lock()).map(|c| c.enabled).unwrap_or(false);
                tracing::warn!(%error, fallback = previous, "capability check failed");
                previous
            }
        }
    }

    /// Forget the cached value
    pub fn invalidate(&self) {
        *self.lock() = None;
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Option<Cached>> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    struct Counting {
        answer: bool,
        calls: AtomicU32,
    }

    impl SubscriptionCheck for Counting {
        fn check(&self) -> Result<bool, GatewayError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.answer)
        }
    }

    #[test]
    fn test_value_is_cached_within_ttl() {
        let cache = CapabilityCache::new(Duration::from_secs(60));
        let checker = Counting {
            answer: true,
            calls: AtomicU32::new(0),
        };

        assert!(cache.is_enabled(&checker));
        assert!(cache.is_enabled(&checker));
        assert_eq!(checker.calls.load(Ordering::SeqCst), 1);
        assert_eq!(cache.cached(), Some(true));
    }

    #[test]
    fn test_expired_value_is_revalidated() {
        let cache = CapabilityCache::new(Duration::ZERO);
        let checker = Counting {
            answer: false,
            calls: AtomicU32::new(0),
        };

        assert!(!cache.is_enabled(&checker));
        assert!(!cache.is_enabled(&checker));
        assert_eq!(checker.calls.load(Ordering::SeqCst), 2);
        assert_eq!(cache.cached(), None);
    }

    #[test]
    fn test_failed_check_keeps_previous_value() {
        let cache = CapabilityCache::new(Duration::ZERO);
        let ok = || -> Result<bool, GatewayError> { Ok(true) };
        let failing =
            || -> Result<bool, GatewayError> { Err(GatewayError::Transport("timeout".to_string())) };

        assert!(!cache.revalidate(&failing));
        assert!(cache.revalidate(&ok));
        assert!(cache.revalidate(&failing));

        cache.invalidate();
        assert!(!cache.revalidate(&failing));
    }

    #[test]
    fn test_process_wide_cache_uses_default_ttl() {
        assert_eq!(premium().ttl(), DEFAULT_CAPABILITY_TTL);
    }
}
