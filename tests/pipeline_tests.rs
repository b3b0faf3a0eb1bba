use autodeck::commands::{GenerateOptions, generate_deck};
use autodeck::config::Config;
use autodeck::error::DeckError;
use autodeck::search::{SearchProvider, WebResult};
use tempfile::TempDir;

#[path = "test_utils.rs"]
mod test_utils;
use test_utils::{MockChat, MockSearch, seven_slide_json};

fn options(topic: &str) -> GenerateOptions {
    GenerateOptions {
        topic: topic.to_string(),
        max_results: 8,
        outfile: None,
        dry_run: false,
        no_web: false,
    }
}

#[tokio::test]
async fn test_end_to_end_no_web_writes_seven_slide_deck() {
    let temp = TempDir::new().expect("tempdir should create");
    let chat = MockChat::returning(seven_slide_json());
    let search = MockSearch::with_results(vec![]);

    let mut opts = options("Solar Power");
    opts.no_web = true;
    opts.outfile = Some(
        temp.path()
            .join("solar.pptx")
            .to_string_lossy()
            .into_owned(),
    );

    let outcome = generate_deck(
        &Config::with_api_key("test-key"),
        Some(&search),
        &chat,
        &opts,
    )
    .await
    .expect("pipeline should succeed");

    assert_eq!(search.calls(), 0, "no-web mode must skip the search call");
    assert_eq!(chat.calls(), 1);
    assert_eq!(outcome.deck.slides().len(), 7);
    assert_eq!(outcome.deck.slides()[0].title, "Solar Power");
    assert_eq!(
        outcome.deck.slides()[6].bullets,
        vec!["Costs keep falling", "Storage is the bottleneck"]
    );

    let path = outcome.outfile.expect("a file should be written");
    let written = std::fs::metadata(&path).expect("output file should exist");
    assert!(written.len() > 0);
}

#[tokio::test]
async fn test_dry_run_writes_no_file() {
    let temp = TempDir::new().expect("tempdir should create");
    let chat = MockChat::returning(seven_slide_json());

    let mut opts = options("X");
    opts.no_web = true;
    opts.dry_run = true;
    opts.outfile = Some(temp.path().join("x.pptx").to_string_lossy().into_owned());

    let outcome = generate_deck(&Config::with_api_key("test-key"), None, &chat, &opts)
        .await
        .expect("dry run should succeed");

    assert!(outcome.outfile.is_none());
    assert!(!temp.path().join("x.pptx").exists(), "dry run must not write");

    // The validated structure round-trips verbatim.
    let json = outcome.deck.to_json();
    assert_eq!(json["slides"].as_array().map(Vec::len), Some(7));
    assert_eq!(json["slides"][0]["title"], "Solar Power");
}

#[tokio::test]
async fn test_search_results_reach_the_prompt() {
    let chat = MockChat::returning(seven_slide_json());
    let search = MockSearch::with_results(vec![WebResult {
        title: "Solar trends".to_string(),
        snippet: "photovoltaic adoption is accelerating".to_string(),
        url: "https://example.com/solar".to_string(),
    }]);

    let mut opts = options("Solar Power");
    opts.dry_run = true;

    generate_deck(
        &Config::with_api_key("test-key"),
        Some(&search),
        &chat,
        &opts,
    )
    .await
    .expect("pipeline should succeed");

    assert_eq!(search.calls(), 1);
    let prompt = chat.last_user_prompt().expect("chat should be called");
    assert!(prompt.contains("photovoltaic adoption is accelerating"));
}

#[tokio::test]
async fn test_search_failure_degrades_to_empty_context() {
    let chat = MockChat::returning(seven_slide_json());
    let search = MockSearch::failing();

    let mut opts = options("Solar Power");
    opts.dry_run = true;

    let outcome = generate_deck(
        &Config::with_api_key("test-key"),
        Some(&search),
        &chat,
        &opts,
    )
    .await
    .expect("search failure must not abort the run");

    assert_eq!(search.calls(), 1);
    assert_eq!(chat.calls(), 1);
    assert_eq!(outcome.deck.slides().len(), 7);

    let prompt = chat.last_user_prompt().expect("chat should be called");
    assert!(prompt.contains("no web snippets available"));
}

#[tokio::test]
async fn test_short_deck_is_repaired_and_flagged() {
    let short = serde_json::json!({
        "slides": (1..=5).map(|i| serde_json::json!({
            "title": format!("Slide {i}"), "bullets": [], "notes": ""
        })).collect::<Vec<_>>()
    })
    .to_string();
    let chat = MockChat::returning(short);

    let mut opts = options("Solar Power");
    opts.no_web = true;
    opts.dry_run = true;

    let outcome = generate_deck(&Config::with_api_key("test-key"), None, &chat, &opts)
        .await
        .expect("short deck should be repaired");

    assert!(outcome.deck.repaired());
    assert_eq!(outcome.deck.slides().len(), 7);
}

#[tokio::test]
async fn test_blank_topic_fails_before_any_call() {
    let chat = MockChat::returning(seven_slide_json());
    let search = MockSearch::with_results(vec![]);

    let mut opts = options("   ");
    opts.dry_run = true;

    let err = generate_deck(
        &Config::with_api_key("test-key"),
        Some(&search),
        &chat,
        &opts,
    )
    .await
    .expect_err("blank topic must fail");

    assert!(matches!(err, DeckError::EmptyTopic));
    assert_eq!(search.calls(), 0);
    assert_eq!(chat.calls(), 0);
}

#[tokio::test]
async fn test_missing_credential_fails_preflight_without_network() {
    let chat = MockChat::returning(seven_slide_json());
    let search = MockSearch::with_results(vec![]);

    // Mirror of the CLI flow: config construction is the pre-flight gate,
    // collaborators are only invoked once it succeeds.
    let config = Config::from_lookup(|_| None, None);
    let err = match config {
        Err(e) => e,
        Ok(config) => generate_deck(&config, Some(&search), &chat, &options("Solar Power"))
            .await
            .expect_err("should not get here"),
    };

    assert!(matches!(err, DeckError::MissingCredential));
    assert_eq!(search.calls(), 0, "no search call before credential check");
    assert_eq!(chat.calls(), 0, "no LLM call before credential check");
}

#[tokio::test]
async fn test_unparseable_output_surfaces_schema_error() {
    let chat = MockChat::returning("I'm sorry, I cannot produce slides today.");

    let mut opts = options("Solar Power");
    opts.no_web = true;
    opts.dry_run = true;

    let err = generate_deck(&Config::with_api_key("test-key"), None, &chat, &opts)
        .await
        .expect_err("unusable output must fail");

    assert!(matches!(err, DeckError::Schema(_)));
}

#[tokio::test]
async fn test_permanent_llm_error_surfaces_after_single_attempt() {
    let chat = MockChat::with_responses(vec![Err(DeckError::permanent("bad request"))]);

    let mut opts = options("Solar Power");
    opts.no_web = true;

    let err = generate_deck(&Config::with_api_key("test-key"), None, &chat, &opts)
        .await
        .expect_err("permanent error must surface");

    assert!(matches!(err, DeckError::Llm { .. }));
    assert_eq!(chat.calls(), 1);
}

struct PanicSearch;

#[async_trait::async_trait]
impl SearchProvider for PanicSearch {
    async fn search(&self, _query: &str, _max: usize) -> anyhow::Result<Vec<WebResult>> {
        panic!("search must not be called in no-web mode");
    }
}

#[tokio::test]
async fn test_no_web_never_touches_the_search_collaborator() {
    let chat = MockChat::returning(seven_slide_json());

    let mut opts = options("Solar Power");
    opts.no_web = true;
    opts.dry_run = true;

    generate_deck(
        &Config::with_api_key("test-key"),
        Some(&PanicSearch),
        &chat,
        &opts,
    )
    .await
    .expect("pipeline should succeed without search");
}
