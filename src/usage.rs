//! Session-scoped usage accounting.
//!
//! One `UsageCounters` instance is owned per client session and shared by
//! every concurrently running chunk and section request. Nothing here
//! persists; counters reset when the process exits.

use serde::Serialize;
use std::sync::atomic::{AtomicU32, AtomicU64, Ordering};

/// Request and token counters for one client session.
///
/// Increments are atomic so concurrent successes never lose updates. The
/// daily-limit check is deliberately not atomic with the increment: callers
/// check before issuing, so a race between concurrent checks can overshoot
/// the limit by a few requests. It is a soft limit.
#[derive(Debug)]
pub struct UsageCounters {
    requests: AtomicU32,
    tokens: AtomicU64,
    daily_limit: u32,
}

impl UsageCounters {
    pub const fn new(daily_limit: u32) -> Self {
        Self {
            requests: AtomicU32::new(0),
            tokens: AtomicU64::new(0),
            daily_limit,
        }
    }

    /// Record one successful request and its approximate token yield
    /// (whitespace-delimited word count of the response text).
    pub fn record_success(&self, approx_tokens: u64) {
        self.requests.fetch_add(1, Ordering::Relaxed);
        self.tokens.fetch_add(approx_tokens, Ordering::Relaxed);
    }

    pub fn request_count(&self) -> u32 {
        self.requests.load(Ordering::Relaxed)
    }

    pub fn token_count(&self) -> u64 {
        self.tokens.load(Ordering::Relaxed)
    }

    pub const fn daily_limit(&self) -> u32 {
        self.daily_limit
    }

    /// Pre-issuance check. See the struct docs for the non-atomicity caveat.
    pub fn limit_reached(&self) -> bool {
        self.request_count() >= self.daily_limit
    }

    /// Point-in-time snapshot for display
    pub fn stats(&self) -> UsageStats {
        let request_count = self.request_count();
        UsageStats {
            request_count,
            token_count: self.token_count(),
            daily_limit: self.daily_limit,
            remaining_requests: self.daily_limit.saturating_sub(request_count),
        }
    }
}

/// Snapshot of session usage, safe to hand to the UI layer
#[derive(Debug, Clone, Copy, Serialize)]
pub struct UsageStats {
    pub request_count: u32,
    pub token_count: u64,
    pub daily_limit: u32,
    pub remaining_requests: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_and_snapshots() {
        let counters = UsageCounters::new(60);
        counters.record_success(120);
        counters.record_success(80);

        let stats = counters.stats();
        assert_eq!(stats.request_count, 2);
        assert_eq!(stats.token_count, 200);
        assert_eq!(stats.daily_limit, 60);
        assert_eq!(stats.remaining_requests, 58);
    }

    #[test]
    fn remaining_never_goes_negative() {
        let counters = UsageCounters::new(1);
        counters.record_success(10);
        counters.record_success(10);
        assert!(counters.limit_reached());
        assert_eq!(counters.stats().remaining_requests, 0);
    }
}
