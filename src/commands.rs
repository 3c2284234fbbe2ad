use crate::client::GeminiClient;
use crate::config::{Config, GenerationOptions};
use crate::dispatcher::{Dispatcher, DispatcherSettings};
use crate::log_debug;
use crate::models::Model;
use crate::paper::{Document, Orchestrator, PaperRequest, PaperType, Section};
use crate::ui;
use crate::validation::{validate_api_key, validate_topic};

use anyhow::{Context, Result};
use colored::Colorize;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

/// Arguments for the `generate` subcommand
pub struct GenerateArgs {
    pub topic: String,
    pub paper_type: String,
    pub length: u32,
    pub author: String,
    pub temperature: f32,
    pub model: Option<String>,
    pub retries: u32,
    pub no_citations: bool,
    pub no_delays: bool,
    pub api_key: String,
    pub output_dir: Option<PathBuf>,
    pub print: bool,
}

/// Handle the `generate` command: validate input, fan out the section
/// requests, assemble the document, and write both artifacts.
pub async fn handle_generate_command(args: GenerateArgs) -> Result<()> {
    let config = Config::load()?;

    validate_api_key(&args.api_key).map_err(|e| {
        ui::print_error(&format!("Error: {e}"));
        anyhow::anyhow!(e)
    })?;
    let topic = validate_topic(&args.topic).map_err(|e| {
        ui::print_error(&format!("Topic validation error: {e}"));
        anyhow::anyhow!(e)
    })?;

    let paper_type: PaperType = args
        .paper_type
        .parse()
        .map_err(|e: String| anyhow::anyhow!(e))?;
    let model = match &args.model {
        Some(name) => name.parse::<Model>()?,
        None => config.default_model,
    };
    let target_length = config.clamp_target_length(args.length);
    if target_length != args.length {
        ui::print_warning(&format!(
            "Target length clamped to {target_length} words (allowed range {}-{})",
            config.min_paper_length, config.max_paper_length
        ));
    }

    let request = PaperRequest {
        topic,
        paper_type,
        author: args.author.clone(),
        target_length,
        include_citations: !args.no_citations,
    };
    let options = GenerationOptions::from_config(&config)
        .with_temperature(args.temperature)
        .with_model(model)
        .with_retry_count(args.retries);

    log_debug!(
        "Generating {} on '{}' ({} words targeted, model {})",
        paper_type,
        request.topic,
        target_length,
        model.id()
    );

    let client = Arc::new(GeminiClient::new(args.api_key.clone())?);
    let settings = DispatcherSettings::from_config(&config).with_pacing(!args.no_delays);
    let dispatcher = Dispatcher::new(client, settings);
    let orchestrator = Orchestrator::new(dispatcher);

    let section_count = u64::try_from(Section::ALL.len()).unwrap_or(7);
    let progress = ui::create_section_progress(section_count);
    progress.set_message("Generating your research paper...");

    let sections = orchestrator
        .generate_sections(&request, &options, |_fraction, status| {
            progress.inc(1);
            progress.set_message(status.to_string());
        })
        .await
        .map_err(|e| {
            progress.abandon();
            ui::print_error(&format!("An error occurred: {e}"));
            anyhow::anyhow!(e)
        })?;

    progress.finish_with_message("Paper generation complete!");

    let document = Document::assemble(&sections, &request.topic, &request.author);

    let output_dir = args.output_dir.unwrap_or_else(|| PathBuf::from("."));
    fs::create_dir_all(&output_dir)
        .with_context(|| format!("Failed to create output directory {}", output_dir.display()))?;

    let markdown_path = output_dir.join(document.markdown_filename());
    let text_path = output_dir.join(document.text_filename());
    fs::write(&markdown_path, document.as_markdown())
        .with_context(|| format!("Failed to write {}", markdown_path.display()))?;
    fs::write(&text_path, document.as_markdown())
        .with_context(|| format!("Failed to write {}", text_path.display()))?;

    ui::print_success("Research paper generated successfully!");
    ui::print_info(&format!("Word count: {}", document.word_count()));
    ui::print_info(&format!(
        "Saved: {} and {}",
        markdown_path.display(),
        text_path.display()
    ));

    let stats = orchestrator.dispatcher().usage_stats();
    ui::print_dim(&format!(
        "Usage: {} requests, ~{} tokens, {} of {} remaining today",
        stats.request_count, stats.token_count, stats.remaining_requests, stats.daily_limit
    ));

    if args.print {
        println!("\n{}", document.as_markdown());
    }

    Ok(())
}

/// Handle the `models` command: list models and paper types
pub fn handle_models_command() -> Result<()> {
    println!("{}", "Available models:".bold());
    for model in Model::ALL {
        println!("  {} {}", model.label().bold(), format!("({})", model.id()).dimmed());
    }

    println!();
    println!("{}", "Paper types:".bold());
    for paper_type in PaperType::ALL {
        println!("  {}", paper_type.label());
    }

    Ok(())
}

/// Handle the `limits` command: show configured budgets and rate settings
pub fn handle_limits_command() -> Result<()> {
    let config = Config::load()?;

    println!("{}", "Configured limits:".bold());
    println!("  Daily request limit: {}", config.daily_limit);
    println!("  Max output tokens per request: {}", config.max_output_tokens);
    println!("  Parallel requests: {}", config.max_parallel_requests);
    println!(
        "  Section chunking: {} (threshold {} words)",
        if config.section_chunking { "enabled" } else { "disabled" },
        config.chunk_word_threshold
    );
    println!(
        "  Target length range: {}-{} words",
        config.min_paper_length, config.max_paper_length
    );
    println!(
        "  Free tier: {} requests/min, {} tokens/min, {}ms between requests",
        config.rate_limit.requests_per_minute,
        config.rate_limit.tokens_per_minute,
        config.rate_limit.delay_between_requests_ms
    );

    Ok(())
}
