//! Chunking request dispatcher.
//!
//! The dispatcher owns the path between a prompt and the generation
//! service: it enforces the session request budget, splits long prompts
//! into parallel chunk requests, retries transient failures with
//! exponential backoff, and reassembles chunk output in original order.
//! All requests issued through one dispatcher share one bounded worker
//! pool, whether they come from chunking or from concurrent section
//! submissions.

use crate::client::{GenerationRequest, TextGenerator};
use crate::config::{Config, GenerationOptions};
use crate::error::GenerationError;
use crate::log_debug;
use crate::usage::{UsageCounters, UsageStats};

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tokio::time::sleep;
use tokio_retry::strategy::ExponentialBackoff;

/// Tuning knobs for one dispatcher instance
#[derive(Debug, Clone)]
pub struct DispatcherSettings {
    /// Worker pool size and chunk count for long prompts
    pub max_parallel_requests: usize,
    /// Prompts below this word count are issued as a single request
    pub chunk_word_threshold: usize,
    /// Disable to force every prompt down the single-request path
    pub chunking_enabled: bool,
    /// Soft per-session request budget
    pub daily_limit: u32,
    /// Delay inserted between accepted chunk results
    pub pacing_delay: Duration,
    /// Gate for the pacing delay
    pub pace_requests: bool,
    /// Base unit for the 2^attempt backoff sleep; one second in production
    pub backoff_unit: Duration,
}

impl Default for DispatcherSettings {
    fn default() -> Self {
        Self {
            max_parallel_requests: 3,
            chunk_word_threshold: 100,
            chunking_enabled: true,
            daily_limit: 60,
            pacing_delay: Duration::from_secs(1),
            pace_requests: true,
            backoff_unit: Duration::from_secs(1),
        }
    }
}

impl DispatcherSettings {
    /// Derive dispatcher settings from the application configuration
    pub fn from_config(config: &Config) -> Self {
        Self {
            max_parallel_requests: config.max_parallel_requests.max(1),
            chunk_word_threshold: config.chunk_word_threshold,
            chunking_enabled: config.section_chunking,
            daily_limit: config.daily_limit,
            pacing_delay: config.rate_limit.delay(),
            ..Self::default()
        }
    }

    pub const fn with_pacing(mut self, pace_requests: bool) -> Self {
        self.pace_requests = pace_requests;
        self
    }
}

/// Issues generation requests with chunking, retry, and usage accounting.
///
/// Cheap to clone; clones share the same worker pool and usage counters.
#[derive(Clone)]
pub struct Dispatcher {
    generator: Arc<dyn TextGenerator>,
    usage: Arc<UsageCounters>,
    settings: DispatcherSettings,
    pool: Arc<Semaphore>,
    /// Latched once the service reports quota exhaustion; pending work
    /// short-circuits instead of issuing doomed requests
    quota_hit: Arc<AtomicBool>,
}

impl Dispatcher {
    pub fn new(generator: Arc<dyn TextGenerator>, settings: DispatcherSettings) -> Self {
        let usage = Arc::new(UsageCounters::new(settings.daily_limit));
        let pool = Arc::new(Semaphore::new(settings.max_parallel_requests.max(1)));
        Self {
            generator,
            usage,
            settings,
            pool,
            quota_hit: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Session usage counters shared by every request issued through here
    pub fn usage(&self) -> &UsageCounters {
        &self.usage
    }

    pub fn usage_stats(&self) -> UsageStats {
        self.usage.stats()
    }

    /// Generate the full text for one prompt.
    ///
    /// Short prompts (and everything when chunking is disabled) are issued
    /// as a single retried request. Long prompts are split into
    /// `max_parallel_requests` word-contiguous chunks, issued concurrently
    /// through the shared pool, and reassembled in original chunk order.
    ///
    /// Fails fast with `DailyLimitReached` when the session budget is
    /// already spent; the check is not atomic with the increment, so the
    /// budget is a soft limit under concurrency.
    pub async fn generate(
        &self,
        prompt: &str,
        options: &GenerationOptions,
    ) -> Result<String, GenerationError> {
        if self.usage.limit_reached() {
            return Err(GenerationError::DailyLimitReached {
                limit: self.usage.daily_limit(),
            });
        }

        let words: Vec<&str> = prompt.split_whitespace().collect();
        let chunk_count = self.settings.max_parallel_requests;

        if words.len() < self.settings.chunk_word_threshold
            || !self.settings.chunking_enabled
            || chunk_count <= 1
            || words.len() < chunk_count
        {
            return self.request_with_retry(prompt.to_string(), options).await;
        }

        let chunks = split_into_chunks(&words, chunk_count);
        log_debug!(
            "Splitting {}-word prompt into {} chunks",
            words.len(),
            chunks.len()
        );

        let mut tasks: JoinSet<(usize, Result<String, GenerationError>)> = JoinSet::new();
        for (index, chunk) in chunks.into_iter().enumerate() {
            let dispatcher = self.clone();
            let options = options.clone();
            tasks.spawn(async move {
                let result = dispatcher.request_with_retry(chunk, &options).await;
                (index, result)
            });
        }

        let mut results: Vec<Option<String>> = vec![None; chunk_count];
        let mut remaining = chunk_count;
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((index, Ok(text))) => {
                    results[index] = Some(text);
                    remaining -= 1;
                    // Crude inter-request pacing between accepted results
                    if remaining > 0 && self.settings.pace_requests {
                        sleep(self.settings.pacing_delay).await;
                    }
                }
                Ok((_, Err(error))) => {
                    // Quota and exhausted-retry failures sink the whole
                    // prompt; drop whatever work is still in flight.
                    tasks.abort_all();
                    return Err(error);
                }
                Err(join_error) if join_error.is_cancelled() => {}
                Err(join_error) => {
                    tasks.abort_all();
                    return Err(GenerationError::Internal(join_error.to_string()));
                }
            }
        }

        let mut pieces = Vec::with_capacity(chunk_count);
        for (index, piece) in results.into_iter().enumerate() {
            match piece {
                Some(text) => pieces.push(text),
                None => {
                    return Err(GenerationError::Internal(format!(
                        "chunk {index} completed without a result"
                    )));
                }
            }
        }
        Ok(pieces.join(" "))
    }

    /// Issue one request with up to `retry_count` attempts, sleeping
    /// 2^attempt backoff units between failures. Quota exhaustion is never
    /// retried. After the last attempt the final error is wrapped in
    /// `RetryExhausted`.
    async fn request_with_retry(
        &self,
        prompt: String,
        options: &GenerationOptions,
    ) -> Result<String, GenerationError> {
        let attempts = options.retry_count.max(1);
        let unit_ms = self.settings.backoff_unit.as_millis().max(2);
        #[allow(clippy::cast_possible_truncation)]
        let mut backoff = ExponentialBackoff::from_millis(2).factor(unit_ms as u64 / 2);

        let mut last_error: Option<GenerationError> = None;
        for attempt in 0..attempts {
            match self.issue_request(&prompt, options).await {
                Ok(text) => return Ok(text),
                Err(error) if error.is_quota() => return Err(error),
                Err(error) => {
                    log_debug!("Attempt {} failed: {}", attempt + 1, error);
                    last_error = Some(error);
                    if attempt + 1 < attempts
                        && let Some(delay) = backoff.next()
                    {
                        sleep(delay).await;
                    }
                }
            }
        }

        let source = last_error.unwrap_or_else(|| {
            GenerationError::Internal("retry loop ended without an error".to_string())
        });
        Err(GenerationError::RetryExhausted {
            attempts,
            source: Box::new(source),
        })
    }

    /// Exactly one service call through the shared worker pool. Counters
    /// are updated on success only: one request, plus the word count of
    /// the response as the approximate token yield.
    async fn issue_request(
        &self,
        prompt: &str,
        options: &GenerationOptions,
    ) -> Result<String, GenerationError> {
        let permit = self
            .pool
            .acquire()
            .await
            .map_err(|e| GenerationError::Internal(e.to_string()))?;

        // Checked after acquiring so a quota failure observed by an earlier
        // request stops queued work before it reaches the service
        if self.quota_hit.load(Ordering::SeqCst) {
            return Err(GenerationError::QuotaExceeded);
        }

        let request = GenerationRequest::new(prompt, options);
        let result = self.generator.generate(&request).await;
        if let Err(error) = &result
            && error.is_quota()
        {
            self.quota_hit.store(true, Ordering::SeqCst);
        }
        drop(permit);

        match result {
            Ok(text) => {
                let approx_tokens = text.split_whitespace().count();
                self.usage.record_success(approx_tokens.try_into().unwrap_or(u64::MAX));
                Ok(text)
            }
            Err(error) => Err(error),
        }
    }
}

/// Positional word-range split: equal-sized chunks, final chunk absorbs the
/// remainder, original word order preserved within and across chunks.
fn split_into_chunks(words: &[&str], chunk_count: usize) -> Vec<String> {
    let chunk_size = words.len() / chunk_count;
    (0..chunk_count)
        .map(|i| {
            let start = i * chunk_size;
            let end = if i + 1 == chunk_count {
                words.len()
            } else {
                (i + 1) * chunk_size
            };
            words[start..end].join(" ")
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chunks_are_equal_with_remainder_in_last() {
        let words: Vec<&str> = "a b c d e f g h i j".split_whitespace().collect();
        let chunks = split_into_chunks(&words, 3);
        assert_eq!(chunks, vec!["a b c", "d e f", "g h i j"]);
    }

    #[test]
    fn chunk_split_preserves_word_order() {
        let text: Vec<String> = (0..107).map(|i| format!("w{i}")).collect();
        let words: Vec<&str> = text.iter().map(String::as_str).collect();
        let chunks = split_into_chunks(&words, 3);
        assert_eq!(chunks.len(), 3);
        let rejoined = chunks.join(" ");
        assert_eq!(rejoined, text.join(" "));
    }
}
