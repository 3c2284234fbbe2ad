#![allow(dead_code)]

use async_trait::async_trait;
use paperforge::client::{GenerationRequest, TextGenerator};
use paperforge::dispatcher::DispatcherSettings;
use paperforge::error::GenerationError;
use parking_lot::Mutex;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// Scripted stand-in for the generation service
pub enum MockBehavior {
    /// Return the request prompt verbatim
    Echo,
    /// Return a fixed response for every call
    Respond(String),
    /// Fail the first `failures` calls with a transient error, then echo
    FailThenEcho { failures: usize },
    /// Fail every call with a transient error
    AlwaysFail,
    /// Fail every call with quota exhaustion
    Quota,
}

pub struct MockGenerator {
    behavior: MockBehavior,
    calls: AtomicUsize,
    prompts: Mutex<Vec<String>>,
}

impl MockGenerator {
    pub fn with_behavior(behavior: MockBehavior) -> Arc<Self> {
        Arc::new(Self {
            behavior,
            calls: AtomicUsize::new(0),
            prompts: Mutex::new(Vec::new()),
        })
    }

    pub fn echo() -> Arc<Self> {
        Self::with_behavior(MockBehavior::Echo)
    }

    pub fn respond(text: &str) -> Arc<Self> {
        Self::with_behavior(MockBehavior::Respond(text.to_string()))
    }

    pub fn fail_times(failures: usize) -> Arc<Self> {
        Self::with_behavior(MockBehavior::FailThenEcho { failures })
    }

    pub fn always_fail() -> Arc<Self> {
        Self::with_behavior(MockBehavior::AlwaysFail)
    }

    pub fn quota() -> Arc<Self> {
        Self::with_behavior(MockBehavior::Quota)
    }

    /// Number of underlying requests issued so far
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Every prompt received, in arrival order
    pub fn received_prompts(&self) -> Vec<String> {
        self.prompts.lock().clone()
    }
}

fn transient_error() -> GenerationError {
    GenerationError::Api {
        status: 503,
        message: "service unavailable".to_string(),
    }
}

#[async_trait]
impl TextGenerator for MockGenerator {
    async fn generate(&self, request: &GenerationRequest) -> Result<String, GenerationError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        self.prompts.lock().push(request.prompt.clone());

        match &self.behavior {
            MockBehavior::Echo => Ok(request.prompt.clone()),
            MockBehavior::Respond(text) => Ok(text.clone()),
            MockBehavior::FailThenEcho { failures } => {
                if call < *failures {
                    Err(transient_error())
                } else {
                    Ok(request.prompt.clone())
                }
            }
            MockBehavior::AlwaysFail => Err(transient_error()),
            MockBehavior::Quota => Err(GenerationError::QuotaExceeded),
        }
    }
}

/// Dispatcher settings tuned for fast tests: no pacing, millisecond backoff
pub fn fast_settings() -> DispatcherSettings {
    DispatcherSettings {
        pacing_delay: Duration::from_millis(1),
        pace_requests: false,
        backoff_unit: Duration::from_millis(2),
        ..DispatcherSettings::default()
    }
}

/// A prompt guaranteed to cross the chunking threshold
pub fn long_prompt(words: usize) -> String {
    (0..words)
        .map(|i| format!("word{i}"))
        .collect::<Vec<_>>()
        .join(" ")
}
