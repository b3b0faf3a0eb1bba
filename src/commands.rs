//! Pipeline orchestration: search, prompt, LLM call, validation, render.
//!
//! Each run is stateless and strictly sequential. The only stage that is
//! ever re-entered is the LLM call, under the configured retry policy.

use crate::config::Config;
use crate::context::build_context;
use crate::error::DeckError;
use crate::llm::{ChatModel, generate_outline};
use crate::prompt::{SYSTEM_PROMPT, build_user_prompt};
use crate::pptx::{default_outfile, sanitize_filename, with_pptx_suffix, write_pptx};
use crate::schema::{ValidatedDeck, validate_deck};
use crate::search::SearchProvider;
use crate::{log_debug, log_warn, ui};
use std::path::PathBuf;

/// Per-run options resolved from the CLI.
#[derive(Debug, Clone, Default)]
pub struct GenerateOptions {
    pub topic: String,
    pub max_results: usize,
    pub outfile: Option<String>,
    pub dry_run: bool,
    pub no_web: bool,
}

/// Result of one run: the validated deck, and the output path unless this
/// was a dry run.
#[derive(Debug)]
pub struct DeckOutcome {
    pub deck: ValidatedDeck,
    pub outfile: Option<PathBuf>,
}

/// Runs the full pipeline. `search` is `None` when web context is disabled
/// or the collaborator is unavailable; that degrades the run, never aborts
/// it. Everything after the search is fatal on error.
pub async fn generate_deck(
    config: &Config,
    search: Option<&dyn SearchProvider>,
    chat: &dyn ChatModel,
    options: &GenerateOptions,
) -> Result<DeckOutcome, DeckError> {
    let topic = options.topic.trim();
    if topic.is_empty() {
        return Err(DeckError::EmptyTopic);
    }

    let web_context = match search {
        Some(provider) if !options.no_web => {
            fetch_context(provider, topic, options.max_results, config.max_context_chars).await
        }
        _ => String::new(),
    };

    let user_prompt = build_user_prompt(topic, &web_context);

    let spinner = ui::create_spinner("Generating slide outline...");
    let raw = generate_outline(chat, config.retry, SYSTEM_PROMPT, &user_prompt).await;
    spinner.finish_and_clear();
    let raw = raw?;

    let deck = validate_deck(&raw)?;
    for warning in deck.warnings() {
        log_warn!("Deck repaired: {warning}");
        ui::print_warning(&format!("Warning: {warning}"));
    }

    if options.dry_run {
        return Ok(DeckOutcome {
            deck,
            outfile: None,
        });
    }

    let outfile = resolve_outfile(options.outfile.as_deref(), topic);
    write_pptx(&deck, topic, &outfile)?;

    Ok(DeckOutcome {
        deck,
        outfile: Some(outfile),
    })
}

/// Best-effort web context: failures and empty result sets degrade to an
/// empty block.
async fn fetch_context(
    provider: &dyn SearchProvider,
    topic: &str,
    max_results: usize,
    max_chars: usize,
) -> String {
    let spinner = ui::create_spinner("Fetching web snippets...");
    let results = provider.search(topic, max_results).await;
    spinner.finish_and_clear();

    match results {
        Ok(results) if results.is_empty() => {
            log_warn!("Search returned no results; continuing without web context");
            String::new()
        }
        Ok(results) => {
            log_debug!("Search returned {} results", results.len());
            build_context(&results, max_chars)
        }
        Err(e) => {
            log_warn!("Search unavailable ({e}); continuing without web context");
            ui::print_warning("Web search unavailable; generating from model knowledge only");
            String::new()
        }
    }
}

/// Sanitization applies to the file name only; a caller-specified parent
/// directory is kept as-is.
fn resolve_outfile(requested: Option<&str>, topic: &str) -> PathBuf {
    let Some(requested) = requested else {
        return PathBuf::from(default_outfile(topic));
    };

    let path = PathBuf::from(requested);
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| default_outfile(topic));
    let name = with_pptx_suffix(&sanitize_filename(&name));
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.join(name),
        _ => PathBuf::from(name),
    }
}
