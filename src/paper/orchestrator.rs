//! Concurrent section orchestration.
//!
//! Submits one dispatcher call per section, collects results keyed by
//! section as they complete, and aborts the whole run on the first section
//! failure. No partial paper ever leaves this module.

use crate::config::GenerationOptions;
use crate::dispatcher::Dispatcher;
use crate::error::GenerationError;
use crate::log_debug;
use crate::paper::prompts::{PaperType, Section, section_prompts};

use std::collections::HashMap;
use std::time::Instant;
use tokio::task::JoinSet;

/// Generated text per section, keyed by section rather than by completion
/// order; the assembler looks sections up by key, so document ordering is
/// deterministic regardless of which request finished first.
pub type SectionResults = HashMap<Section, String>;

/// Everything the caller supplies for one paper run.
///
/// Fields are expected to be validated/clamped before construction; see
/// `crate::validation` and `Config::clamp_target_length`.
#[derive(Debug, Clone)]
pub struct PaperRequest {
    pub topic: String,
    pub paper_type: PaperType,
    pub author: String,
    pub target_length: u32,
    pub include_citations: bool,
}

/// Fans section prompts out through one shared dispatcher
pub struct Orchestrator {
    dispatcher: Dispatcher,
}

impl Orchestrator {
    pub const fn new(dispatcher: Dispatcher) -> Self {
        Self { dispatcher }
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    /// Generate text for every fixed section of the paper.
    ///
    /// All seven section prompts are submitted concurrently; the underlying
    /// request concurrency is still bounded by the dispatcher's worker
    /// pool. `on_progress` is invoked after each completed section with a
    /// fraction in [0, 1] and a human-readable status line.
    ///
    /// On the first section failure the remaining work is aborted and the
    /// error names the failing section.
    pub async fn generate_sections<F>(
        &self,
        request: &PaperRequest,
        options: &GenerationOptions,
        mut on_progress: F,
    ) -> Result<SectionResults, GenerationError>
    where
        F: FnMut(f64, &str),
    {
        let prompts = section_prompts(
            &request.topic,
            request.paper_type,
            request.include_citations,
        );
        let total = u32::try_from(prompts.len()).unwrap_or(u32::MAX);
        let started = Instant::now();

        let mut tasks: JoinSet<(Section, Result<String, GenerationError>)> = JoinSet::new();
        for (section, prompt) in prompts {
            let dispatcher = self.dispatcher.clone();
            let options = options.clone();
            tasks.spawn(async move {
                let result = dispatcher.generate(&prompt, &options).await;
                (section, result)
            });
        }

        let mut sections = SectionResults::new();
        let mut completed: u32 = 0;
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((section, Ok(text))) => {
                    log_debug!(
                        "Section '{}' completed ({} words)",
                        section.key(),
                        text.split_whitespace().count()
                    );
                    sections.insert(section, text);
                    completed += 1;
                    let status = format!(
                        "Finished: {} | Elapsed: {}s",
                        section.display_name(),
                        started.elapsed().as_secs()
                    );
                    on_progress(f64::from(completed) / f64::from(total), &status);
                }
                Ok((section, Err(error))) => {
                    tasks.abort_all();
                    return Err(GenerationError::SectionFailed {
                        section: section.key(),
                        source: Box::new(error),
                    });
                }
                Err(join_error) if join_error.is_cancelled() => {}
                Err(join_error) => {
                    tasks.abort_all();
                    return Err(GenerationError::Internal(join_error.to_string()));
                }
            }
        }

        Ok(sections)
    }
}
