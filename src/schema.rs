//! Slide schema types and the JSON validation/repair pass.
//!
//! The model is asked for strict JSON, but in practice responses arrive
//! wrapped in prose, fenced in markdown, keyed as `Slides`, or short a few
//! slides. Validation runs an ordered chain of repairs and either produces a
//! [`ValidatedDeck`] holding exactly [`DECK_LEN`] well-formed slides, or a
//! classified [`SchemaError`]. No partially valid deck ever escapes.

use crate::error::SchemaError;
use crate::log_debug;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A deck always has exactly this many slides: title, overview, four themed
/// sections, conclusion.
pub const DECK_LEN: usize = 7;

/// One slide's structured content.
#[derive(Serialize, Deserialize, JsonSchema, Debug, Clone, PartialEq, Eq)]
pub struct Slide {
    /// Slide heading; never empty after validation.
    pub title: String,
    /// Short bullet lines; may be empty (the title slide has none).
    #[serde(default)]
    pub bullets: Vec<String>,
    /// Presenter notes; empty string when absent.
    #[serde(default)]
    pub notes: String,
}

/// The top-level shape the model is asked to return.
#[derive(Serialize, Deserialize, JsonSchema, Debug, Clone, PartialEq, Eq)]
pub struct Deck {
    pub slides: Vec<Slide>,
}

/// A deck that passed validation: exactly [`DECK_LEN`] slides, every title
/// non-empty, every bullet trimmed and non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedDeck {
    slides: Vec<Slide>,
    repaired: bool,
    warnings: Vec<String>,
}

impl ValidatedDeck {
    /// Builds a validated deck from already-shaped slides, re-checking the
    /// invariant. Used by callers that construct decks directly (tests,
    /// re-validation).
    pub fn new(slides: Vec<Slide>) -> Result<Self, SchemaError> {
        if slides.len() != DECK_LEN {
            return Err(SchemaError::MissingSlidesField);
        }
        for (index, slide) in slides.iter().enumerate() {
            if slide.title.trim().is_empty() {
                return Err(SchemaError::InvalidSlide { index });
            }
        }
        Ok(Self {
            slides,
            repaired: false,
            warnings: Vec::new(),
        })
    }

    pub fn slides(&self) -> &[Slide] {
        &self.slides
    }

    /// True when the repairer had to pad, truncate, or reshape the model
    /// output to satisfy the schema.
    pub fn repaired(&self) -> bool {
        self.repaired
    }

    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    /// The deck as the canonical `{"slides": [...]}` JSON value.
    pub fn to_json(&self) -> Value {
        serde_json::json!({ "slides": self.slides })
    }
}

/// Validates raw model output into a deck, repairing near-miss shapes.
///
/// Repair steps run in a fixed order: JSON cleanup, top-level shape
/// adaptation, slide count normalization, per-slide field coercion. Each
/// repair is recorded as a warning and flips the `repaired` flag so the CLI
/// can surface it.
pub fn validate_deck(raw: &str) -> Result<ValidatedDeck, SchemaError> {
    let value = parse_raw(raw)?;
    let items = extract_slides(value)?;

    let mut repaired = false;
    let mut warnings = Vec::new();

    // Count normalization before per-slide checks, so an InvalidSlide index
    // always refers to a slide that will actually appear in the deck.
    let mut items = items;
    if items.len() > DECK_LEN {
        warnings.push(format!(
            "model returned {} slides; truncated to {DECK_LEN}",
            items.len()
        ));
        items.truncate(DECK_LEN);
        repaired = true;
    }

    let mut slides = Vec::with_capacity(DECK_LEN);
    for (index, item) in items.into_iter().enumerate() {
        slides.push(normalize_slide(index, &item)?);
    }

    if slides.len() < DECK_LEN {
        warnings.push(format!(
            "model returned {} slides; padded to {DECK_LEN} with placeholders",
            slides.len()
        ));
        while slides.len() < DECK_LEN {
            slides.push(placeholder_slide(slides.len() + 1));
        }
        repaired = true;
    }

    Ok(ValidatedDeck {
        slides,
        repaired,
        warnings,
    })
}

/// Parse attempts, in order: strict, then once more after stripping the
/// wrapping artifacts models commonly add (prose, code fences).
fn parse_raw(raw: &str) -> Result<Value, SchemaError> {
    match serde_json::from_str(raw) {
        Ok(value) => Ok(value),
        Err(first_err) => {
            log_debug!("Strict JSON parse failed: {first_err}. Trying cleanup pass.");
            let cleaned = clean_json_from_llm(raw);
            serde_json::from_str(&cleaned)
                .map_err(|e| SchemaError::Unparseable(e.to_string()))
        }
    }
}

/// Strips surrounding prose and markdown fences, keeping the outermost JSON
/// object or array.
fn clean_json_from_llm(raw: &str) -> String {
    let trimmed = raw.trim();

    let without_fence = if trimmed.starts_with("```") {
        trimmed
            .trim_start_matches("```json")
            .trim_start_matches("```")
            .trim_end_matches("```")
            .trim()
    } else {
        trimmed
    };

    let obj_start = without_fence.find('{');
    let arr_start = without_fence.find('[');

    // Prefer whichever opener comes first; a bare array is a tolerated shape.
    let (start, close) = match (obj_start, arr_start) {
        (Some(o), Some(a)) if a < o => (a, ']'),
        (Some(o), _) => (o, '}'),
        (None, Some(a)) => (a, ']'),
        (None, None) => return without_fence.to_string(),
    };
    let end = without_fence.rfind(close).map_or(without_fence.len(), |i| i + 1);

    without_fence[start..end].trim().to_string()
}

/// Pulls the slide list out of the parsed value, adapting tolerated top-level
/// variants: a `Slides` key, or a bare array of slide objects.
fn extract_slides(value: Value) -> Result<Vec<Value>, SchemaError> {
    let items = match value {
        Value::Array(items) => items,
        Value::Object(mut map) => {
            let slides = map
                .remove("slides")
                .or_else(|| map.remove("Slides"))
                .ok_or(SchemaError::MissingSlidesField)?;
            match slides {
                Value::Array(items) => items,
                _ => return Err(SchemaError::MissingSlidesField),
            }
        }
        _ => return Err(SchemaError::MissingSlidesField),
    };

    if items.is_empty() {
        return Err(SchemaError::MissingSlidesField);
    }
    Ok(items)
}

/// Coerces one slide object into shape. Missing bullets become an empty
/// list, a scalar bullets value becomes a one-element list, missing notes
/// become an empty string. An empty title is not repairable.
fn normalize_slide(index: usize, item: &Value) -> Result<Slide, SchemaError> {
    let Value::Object(map) = item else {
        return Err(SchemaError::InvalidSlide { index });
    };

    let title = map
        .get("title")
        .and_then(scalar_as_string)
        .map(|t| t.trim().to_string())
        .unwrap_or_default();
    if title.is_empty() {
        return Err(SchemaError::InvalidSlide { index });
    }

    let bullets = match map.get("bullets") {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(scalar_as_string)
            .map(|b| b.trim().to_string())
            .filter(|b| !b.is_empty())
            .collect(),
        Some(other) => scalar_as_string(other)
            .map(|b| b.trim().to_string())
            .filter(|b| !b.is_empty())
            .into_iter()
            .collect(),
    };

    let notes = map
        .get("notes")
        .and_then(scalar_as_string)
        .map(|n| n.trim().to_string())
        .unwrap_or_default();

    Ok(Slide {
        title,
        bullets,
        notes,
    })
}

fn scalar_as_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Placeholder for a slide the model failed to produce. Title and notes
/// mark it clearly; bullets are never invented.
fn placeholder_slide(position: usize) -> Slide {
    Slide {
        title: format!("Slide {position} (placeholder)"),
        bullets: Vec::new(),
        notes: "Added during repair: the model returned fewer slides than required.".to_string(),
    }
}
