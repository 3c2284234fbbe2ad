//! Paperforge - AI-powered research paper drafting
//!
//! This library generates structured academic paper drafts by fanning a fixed
//! set of section prompts out to a generative-text API, with chunked parallel
//! dispatch, retry with backoff, and session usage accounting.

// Allow certain clippy warnings that are either stylistic or from external dependencies
#![allow(clippy::uninlined_format_args)] // Style preference
#![allow(clippy::return_self_not_must_use)] // Builder pattern is clear enough
#![allow(clippy::items_after_statements)] // Locally-scoped use statements are fine

pub mod cli;
pub mod client;
pub mod commands;
pub mod config;
pub mod dispatcher;
pub mod error;
pub mod logger;
pub mod models;
pub mod paper;
pub mod ui;
pub mod usage;
pub mod validation;

// Re-export important structs and functions for easier testing
pub use config::{Config, GenerationOptions};
pub use dispatcher::{Dispatcher, DispatcherSettings};
pub use error::GenerationError;
pub use models::Model;

// Re-exports from the paper pipeline
pub use paper::{Document, Orchestrator, PaperRequest, PaperType, Section};
