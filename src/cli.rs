//! Command-line interface definition and entry glue.

use crate::commands::{self, GenerateOptions};
use crate::config::Config;
use crate::error::DeckError;
use crate::llm::OpenAiClient;
use crate::search::{DuckDuckGo, SearchProvider};
use crate::{log_debug, log_warn, logger, ui};
use clap::builder::{Styles, styling::AnsiColor};
use clap::{Parser, crate_version};
use std::io::Write;

const LOG_FILE: &str = "autodeck-debug.log";

/// CLI structure defining the available flags
#[derive(Parser)]
#[command(
    author,
    version = crate_version!(),
    about = "autodeck: auto-generate slide decks with LLM + web search",
    long_about = "Generates a styled 7-slide PPTX deck for a topic by combining web snippets with an LLM outline.",
    styles = get_styles(),
)]
pub struct Cli {
    /// Topic for the deck; prompted interactively when omitted
    #[arg(short, long, help = "Topic for the deck")]
    pub topic: Option<String>,

    /// Chat model identifier (also via env AUTODECK_MODEL)
    #[arg(short, long, help = "Chat model identifier (also via env AUTODECK_MODEL)")]
    pub model: Option<String>,

    /// Web search results to fetch
    #[arg(long, default_value_t = 8, help = "Web search results to fetch")]
    pub max_results: usize,

    /// Output .pptx filename
    #[arg(short, long, help = "Output .pptx filename")]
    pub outfile: Option<String>,

    /// Print the validated deck JSON instead of writing a file
    #[arg(long, help = "Print the validated deck JSON, do not create a PPTX")]
    pub dry_run: bool,

    /// Skip web search, rely on the model alone
    #[arg(long, help = "Skip web search, rely on the model alone")]
    pub no_web: bool,

    /// Log debug messages to a file
    #[arg(short = 'l', long = "log", help = "Log debug messages to a file")]
    pub log: bool,

    /// Specify a custom log file path
    #[arg(long = "log-file", help = "Specify a custom log file path")]
    pub log_file: Option<String>,

    /// Suppress non-essential output
    #[arg(short = 'q', long = "quiet", help = "Suppress non-essential output")]
    pub quiet: bool,
}

/// Defines the styles for the help display
pub fn get_styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::Magenta.on_default().bold())
        .usage(AnsiColor::Cyan.on_default().bold())
        .literal(AnsiColor::Green.on_default().bold())
        .placeholder(AnsiColor::Yellow.on_default())
}

/// Parses arguments, sets up logging/quiet mode, and runs the pipeline.
/// Returns the process exit code.
pub async fn main() -> i32 {
    let cli = Cli::parse();

    if cli.log {
        logger::enable_logging();
        let log_file = cli.log_file.as_deref().unwrap_or(LOG_FILE);
        if let Err(e) = logger::set_log_file(log_file) {
            eprintln!("Failed to open log file {log_file}: {e}");
        }
    } else {
        logger::disable_logging();
    }

    if cli.quiet {
        ui::set_quiet_mode(true);
    }

    match run(cli).await {
        Ok(()) => 0,
        Err(e) => {
            ui::print_error(&format!("[{}] {e}", e.stage()));
            e.exit_code()
        }
    }
}

async fn run(cli: Cli) -> Result<(), DeckError> {
    let topic = match cli.topic {
        Some(topic) => topic,
        None => prompt_for_topic(),
    };

    // Credential check happens here, before any collaborator is built or
    // contacted.
    let config = Config::from_env(cli.model.as_deref())?;
    log_debug!("Generating deck for topic: {topic}");

    let search: Option<DuckDuckGo> = if cli.no_web {
        None
    } else {
        match DuckDuckGo::new(config.request_timeout) {
            Ok(provider) => Some(provider),
            Err(e) => {
                log_warn!("Search collaborator unavailable: {e}");
                None
            }
        }
    };
    let chat = OpenAiClient::new(&config)?;

    let options = GenerateOptions {
        topic,
        max_results: cli.max_results,
        outfile: cli.outfile,
        dry_run: cli.dry_run,
        no_web: cli.no_web,
    };

    let outcome = commands::generate_deck(
        &config,
        search.as_ref().map(|s| s as &dyn SearchProvider),
        &chat,
        &options,
    )
    .await?;

    if let Some(path) = outcome.outfile {
        ui::print_success(&format!("Deck generated: {}", path.display()));
    } else {
        let json = serde_json::to_string_pretty(&outcome.deck.to_json())
            .expect("deck JSON should serialize");
        println!("{json}");
        ui::print_info("(dry-run complete; no PPTX created)");
    }

    Ok(())
}

fn prompt_for_topic() -> String {
    print!("Enter topic: ");
    let _ = std::io::stdout().flush();
    let mut line = String::new();
    let _ = std::io::stdin().read_line(&mut line);
    line.trim().to_string()
}
