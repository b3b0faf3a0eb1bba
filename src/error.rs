//! Classified error types for the deck generation pipeline.
//!
//! Every fatal condition maps to a distinct exit code so scripts can tell
//! a bad credential from a schema failure without parsing stderr.

use std::path::PathBuf;
use thiserror::Error;

/// Whether an LLM call failure is worth retrying.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LlmErrorKind {
    /// Rate limits, timeouts, transient network failures. Retried under backoff.
    Transient,
    /// Auth failures, malformed requests. Retrying cannot help.
    Permanent,
}

/// Structural problems with the model's JSON output.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    #[error("model output is not parseable JSON, even after cleanup: {0}")]
    Unparseable(String),

    #[error("model output has no 'slides' list")]
    MissingSlidesField,

    #[error("slide {index} has an empty title and cannot be repaired")]
    InvalidSlide { index: usize },
}

/// Top-level error for a deck generation run.
#[derive(Debug, Error)]
pub enum DeckError {
    #[error("OPENAI_API_KEY environment variable is not set")]
    MissingCredential,

    #[error("topic must not be empty")]
    EmptyTopic,

    #[error("LLM call failed ({kind:?}): {message}")]
    Llm { kind: LlmErrorKind, message: String },

    #[error("slide outline validation failed: {0}")]
    Schema(#[from] SchemaError),

    #[error("failed to write deck to {path}: {source}")]
    FileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl DeckError {
    /// Constructs a transient LLM error.
    pub fn transient(message: impl Into<String>) -> Self {
        Self::Llm {
            kind: LlmErrorKind::Transient,
            message: message.into(),
        }
    }

    /// Constructs a permanent LLM error.
    pub fn permanent(message: impl Into<String>) -> Self {
        Self::Llm {
            kind: LlmErrorKind::Permanent,
            message: message.into(),
        }
    }

    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            Self::Llm {
                kind: LlmErrorKind::Transient,
                ..
            }
        )
    }

    /// Process exit code for this error. Zero is reserved for success.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::MissingCredential => 2,
            Self::EmptyTopic => 3,
            Self::Llm { .. } => 4,
            Self::Schema(_) => 5,
            Self::FileWrite { .. } => 6,
        }
    }

    /// Pipeline stage name used in user-facing error messages.
    pub fn stage(&self) -> &'static str {
        match self {
            Self::MissingCredential | Self::EmptyTopic => "configuration",
            Self::Llm { .. } => "llm",
            Self::Schema(_) => "validation",
            Self::FileWrite { .. } => "render",
        }
    }
}
