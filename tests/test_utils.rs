//! Shared fixtures and counting mocks for the pipeline seams.
#![allow(dead_code)]

use async_trait::async_trait;
use autodeck::error::DeckError;
use autodeck::llm::ChatModel;
use autodeck::schema::{Slide, ValidatedDeck};
use autodeck::search::{SearchProvider, WebResult};
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};

/// A well-formed 7-slide response, as the model is supposed to return it.
pub fn seven_slide_json() -> String {
    let slides: Vec<serde_json::Value> = (1..=7)
        .map(|i| {
            let (title, bullets) = match i {
                1 => ("Solar Power".to_string(), vec![]),
                2 => (
                    "Overview".to_string(),
                    vec!["Photovoltaic basics", "Global capacity growth"],
                ),
                7 => (
                    "Conclusion".to_string(),
                    vec!["Costs keep falling", "Storage is the bottleneck"],
                ),
                n => (format!("Theme {n}"), vec!["Point A", "Point B"]),
            };
            serde_json::json!({
                "title": title,
                "bullets": bullets,
                "notes": if i == 2 { "Mention capacity doubling." } else { "" },
            })
        })
        .collect();
    serde_json::json!({ "slides": slides }).to_string()
}

/// Seven valid slides for renderer tests.
pub fn sample_slides() -> Vec<Slide> {
    (1..=7)
        .map(|i| Slide {
            title: if i == 1 {
                "Solar Power".to_string()
            } else {
                format!("Section {i}")
            },
            bullets: if i == 1 {
                vec![]
            } else {
                vec![format!("Bullet {i}.1"), format!("Bullet {i}.2")]
            },
            notes: if i == 2 {
                "Presenter note for section two".to_string()
            } else {
                String::new()
            },
        })
        .collect()
}

pub fn sample_deck() -> ValidatedDeck {
    ValidatedDeck::new(sample_slides()).expect("sample slides should validate")
}

/// Chat mock that pops queued responses and records call count plus the
/// last user prompt it saw.
pub struct MockChat {
    calls: AtomicUsize,
    responses: Mutex<VecDeque<Result<String, DeckError>>>,
    last_user_prompt: Mutex<Option<String>>,
}

impl MockChat {
    pub fn with_responses(responses: Vec<Result<String, DeckError>>) -> Self {
        Self {
            calls: AtomicUsize::new(0),
            responses: Mutex::new(responses.into()),
            last_user_prompt: Mutex::new(None),
        }
    }

    pub fn returning(text: impl Into<String>) -> Self {
        Self::with_responses(vec![Ok(text.into())])
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_user_prompt(&self) -> Option<String> {
        self.last_user_prompt.lock().clone()
    }
}

#[async_trait]
impl ChatModel for MockChat {
    async fn complete(
        &self,
        _system_prompt: &str,
        user_prompt: &str,
    ) -> Result<String, DeckError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_user_prompt.lock() = Some(user_prompt.to_string());
        self.responses
            .lock()
            .pop_front()
            .unwrap_or_else(|| Err(DeckError::permanent("mock response queue exhausted")))
    }
}

/// Search mock returning fixed results, with a call counter.
pub struct MockSearch {
    calls: AtomicUsize,
    results: Vec<WebResult>,
    fail: bool,
}

impl MockSearch {
    pub fn with_results(results: Vec<WebResult>) -> Self {
        Self {
            calls: AtomicUsize::new(0),
            results,
            fail: false,
        }
    }

    pub fn failing() -> Self {
        Self {
            calls: AtomicUsize::new(0),
            results: Vec::new(),
            fail: true,
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SearchProvider for MockSearch {
    async fn search(&self, _query: &str, _max_results: usize) -> anyhow::Result<Vec<WebResult>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            anyhow::bail!("search provider down");
        }
        Ok(self.results.clone())
    }
}
