use crate::commands;
use crate::models::Model;
use crate::paper::PaperType;
use crate::ui;
use clap::builder::{Styles, styling::AnsiColor};
use clap::{Parser, Subcommand, crate_version};
use colored::Colorize;
use std::path::PathBuf;

const LOG_FILE: &str = "paperforge-debug.log";

/// CLI structure defining the available commands and global arguments
#[derive(Parser)]
#[command(
    author,
    version = crate_version!(),
    about = "Paperforge: AI-powered research paper drafting",
    long_about = "Paperforge drafts structured academic papers by generating every section concurrently through a generative-text API, with chunking, retry, and usage accounting.",
    disable_version_flag = true,
    after_help = get_dynamic_help(),
    styles = get_styles(),
)]
pub struct Cli {
    /// Subcommands available for the CLI
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Log debug messages to a file
    #[arg(
        short = 'l',
        long = "log",
        global = true,
        help = "Log debug messages to a file"
    )]
    pub log: bool,

    /// Specify a custom log file path
    #[arg(
        long = "log-file",
        global = true,
        help = "Specify a custom log file path"
    )]
    pub log_file: Option<String>,

    /// Suppress non-essential output (spinners, progress bars, etc.)
    #[arg(
        short = 'q',
        long = "quiet",
        global = true,
        help = "Suppress non-essential output"
    )]
    pub quiet: bool,

    /// Display the version
    #[arg(
        short = 'v',
        long = "version",
        global = true,
        help = "Display the version"
    )]
    pub version: bool,
}

/// Enumeration of available subcommands
#[derive(Subcommand)]
pub enum Commands {
    /// Generate a research paper draft
    #[command(
        about = "Generate a research paper draft",
        long_about = "Generate a complete paper draft for a topic. All seven sections are requested concurrently; the finished document is written as both a markdown and a plain-text artifact.",
        after_help = get_dynamic_help()
    )]
    Generate {
        /// Research topic (10-200 characters)
        #[arg(help = "Research topic (10-200 characters)")]
        topic: String,

        /// Paper type to draft
        #[arg(
            short = 't',
            long = "type",
            default_value = "research paper",
            value_parser = paper_type_parser,
            help = "Paper type (research paper, review paper, case study, technical report)"
        )]
        paper_type: String,

        /// Target length in words (clamped to the configured range)
        #[arg(
            long,
            default_value_t = 3000,
            help = "Target length in words (clamped to the configured range)"
        )]
        length: u32,

        /// Author name rendered in the document header
        #[arg(
            long,
            default_value = "AI Generated",
            help = "Author name rendered in the document header"
        )]
        author: String,

        /// Sampling temperature (clamped to 0.1-1.0)
        #[arg(
            long,
            default_value_t = 0.7,
            help = "Sampling temperature (clamped to 0.1-1.0); higher is more creative, less focused"
        )]
        temperature: f32,

        /// Generation model to use
        #[arg(
            short = 'm',
            long,
            value_parser = model_parser,
            help = "Generation model to use (defaults to the configured fast model)"
        )]
        model: Option<String>,

        /// Attempts per request before giving up
        #[arg(long, default_value_t = 3, help = "Attempts per request before giving up")]
        retries: u32,

        /// Skip citation instructions in section prompts
        #[arg(long, help = "Skip citation instructions in section prompts")]
        no_citations: bool,

        /// Disable pacing delays between chunk results
        #[arg(long, help = "Disable pacing delays between chunk results")]
        no_delays: bool,

        /// API key for the generation service (falls back to GEMINI_API_KEY)
        #[arg(
            long,
            env = "GEMINI_API_KEY",
            hide_env_values = true,
            help = "API key for the generation service"
        )]
        api_key: String,

        /// Directory to write the generated artifacts into
        #[arg(
            short = 'o',
            long,
            help = "Directory to write the generated artifacts into (defaults to the current directory)"
        )]
        output_dir: Option<PathBuf>,

        /// Print the generated paper to stdout as well
        #[arg(short, long, help = "Print the generated paper to stdout as well")]
        print: bool,
    },

    /// List available generation models and paper types
    #[command(about = "List available generation models and paper types")]
    Models,

    /// Show the configured limits and rate settings
    #[command(about = "Show the configured limits and rate settings")]
    Limits,
}

/// Define custom styles for Clap
fn get_styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::Magenta.on_default().bold())
        .usage(AnsiColor::Cyan.on_default().bold())
        .literal(AnsiColor::Green.on_default().bold())
        .placeholder(AnsiColor::Yellow.on_default())
        .valid(AnsiColor::Blue.on_default().bold())
        .invalid(AnsiColor::Red.on_default().bold())
        .error(AnsiColor::Red.on_default().bold())
}

/// Parse the command-line arguments
pub fn parse_args() -> Cli {
    Cli::parse()
}

/// Validate a paper type argument, listing the options on error
fn paper_type_parser(value: &str) -> Result<String, String> {
    value.parse::<PaperType>().map(|_| value.to_string())
}

/// Validate a model argument, listing the options on error
fn model_parser(value: &str) -> Result<String, String> {
    value
        .parse::<Model>()
        .map(|_| value.to_string())
        .map_err(|e| e.to_string())
}

/// Generate dynamic help including the available models
fn get_dynamic_help() -> String {
    let models_list = Model::ALL
        .iter()
        .map(|m| format!("{}", m.id().bold()))
        .collect::<Vec<_>>()
        .join(" • ");

    format!("\nAvailable models: {models_list}")
}

/// Main function to parse arguments and handle the command
pub async fn main() -> anyhow::Result<()> {
    let cli = parse_args();

    if cli.version {
        ui::print_version(crate_version!());
        return Ok(());
    }

    if cli.log {
        crate::logger::enable_logging();
        let log_file = cli.log_file.as_deref().unwrap_or(LOG_FILE);
        crate::logger::set_log_file(log_file)?;
    } else {
        crate::logger::disable_logging();
    }

    if cli.quiet {
        crate::ui::set_quiet_mode(true);
    }

    if let Some(command) = cli.command {
        handle_command(command).await
    } else {
        // If no subcommand is provided, print the help
        let _ = Cli::parse_from(["paperforge", "--help"]);
        Ok(())
    }
}

/// Dispatch a parsed subcommand to its handler
async fn handle_command(command: Commands) -> anyhow::Result<()> {
    match command {
        Commands::Generate {
            topic,
            paper_type,
            length,
            author,
            temperature,
            model,
            retries,
            no_citations,
            no_delays,
            api_key,
            output_dir,
            print,
        } => {
            commands::handle_generate_command(commands::GenerateArgs {
                topic,
                paper_type,
                length,
                author,
                temperature,
                model,
                retries,
                no_citations,
                no_delays,
                api_key,
                output_dir,
                print,
            })
            .await
        }
        Commands::Models => commands::handle_models_command(),
        Commands::Limits => commands::handle_limits_command(),
    }
}
