//! autodeck - AI-powered slide deck generator
//!
//! Builds a fixed 7-slide PPTX deck for a topic: optional web search context,
//! one retry-wrapped LLM call, strict JSON validation with best-effort
//! repair, and a styled OOXML render.

#![allow(clippy::uninlined_format_args)] // Style preference
#![allow(clippy::format_push_string)] // Performance improvement but stylistic

pub mod cli;
pub mod commands;
pub mod config;
pub mod context;
pub mod error;
pub mod llm;
pub mod logger;
pub mod pptx;
pub mod prompt;
pub mod schema;
pub mod search;
pub mod ui;

// Re-export important structs and functions for easier testing
pub use config::{Config, RetryPolicy};
pub use error::{DeckError, LlmErrorKind, SchemaError};
pub use schema::{DECK_LEN, Deck, Slide, ValidatedDeck, validate_deck};
