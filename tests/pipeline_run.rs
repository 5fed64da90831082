//! Driver-level tests: retry behavior and journal bookkeeping, with the
//! external services mocked in-process.

use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use tempfile::TempDir;

use autogram::assets::AssetStore;
use autogram::error::BotError;
use autogram::journal::PostJournal;
use autogram::pipeline::{PublishPipeline, RetryPolicy};
use autogram::prompt::PromptLibrary;
use autogram::providers::{ImageProvider, MediaHost, SocialNetwork, TextProvider};

/// Image service that fails a configured number of calls before succeeding.
struct FlakyImage {
    calls: AtomicUsize,
    failures: usize,
    fatal: bool,
}

impl FlakyImage {
    fn failing_first(failures: usize) -> Self {
        Self {
            calls: AtomicUsize::new(0),
            failures,
            fatal: false,
        }
    }

    fn fatal() -> Self {
        Self {
            calls: AtomicUsize::new(0),
            failures: usize::MAX,
            fatal: true,
        }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ImageProvider for FlakyImage {
    async fn generate(&self, _prompt: &str) -> Result<Vec<u8>, BotError> {
        let n = self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fatal {
            return Err(BotError::AuthError("key rejected".to_string()));
        }
        if n < self.failures {
            return Err(BotError::HttpError("connection reset".to_string()));
        }
        Ok(b"fake image".to_vec())
    }
}

struct StaticText;

#[async_trait]
impl TextProvider for StaticText {
    async fn complete(&self, _prompt: &str) -> Result<String, BotError> {
        Ok("Golden light, quiet minds #nature #calm".to_string())
    }
}

struct StaticHost;

#[async_trait]
impl MediaHost for StaticHost {
    async fn upload(&self, _path: &Path) -> Result<String, BotError> {
        Ok("https://img.example/hosted.png".to_string())
    }
}

struct CountingSocial {
    posts: AtomicUsize,
}

impl CountingSocial {
    fn new() -> Self {
        Self {
            posts: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl SocialNetwork for CountingSocial {
    async fn publish_photo(&self, _image_url: &str, _caption: &str) -> Result<String, BotError> {
        let n = self.posts.fetch_add(1, Ordering::SeqCst);
        Ok(format!("post-{n}"))
    }
}

fn quick_retry() -> RetryPolicy {
    RetryPolicy {
        max_attempts: 3,
        backoff: Duration::from_millis(1),
    }
}

struct Fixture {
    _tmp: TempDir,
    assets: AssetStore,
    journal: PostJournal,
    prompts: PromptLibrary,
}

fn fixture() -> Fixture {
    let tmp = tempfile::tempdir().unwrap();
    let assets = AssetStore::new(tmp.path().join("assets")).unwrap();
    let journal = PostJournal::open(tmp.path().join("log.csv")).unwrap();
    Fixture {
        _tmp: tmp,
        assets,
        journal,
        prompts: PromptLibrary::default(),
    }
}

#[tokio::test]
async fn recovers_on_the_third_attempt() {
    let fx = fixture();
    let image = FlakyImage::failing_first(2);
    let text = StaticText;
    let media = StaticHost;
    let social = CountingSocial::new();
    let pipeline = PublishPipeline::new(
        &fx.prompts,
        &image,
        &text,
        &media,
        &social,
        &fx.assets,
        &fx.journal,
        quick_retry(),
    );

    let record = pipeline.run().await.unwrap();

    assert_eq!(image.calls(), 3);
    assert_eq!(record.image_url, "https://img.example/hosted.png");
    let rows = fx.journal.read_all().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].image_url, record.image_url);
    assert_eq!(rows[0].caption, record.caption);
}

#[tokio::test]
async fn gives_up_after_the_attempt_ceiling() {
    let fx = fixture();
    let image = FlakyImage::failing_first(usize::MAX);
    let text = StaticText;
    let media = StaticHost;
    let social = CountingSocial::new();
    let pipeline = PublishPipeline::new(
        &fx.prompts,
        &image,
        &text,
        &media,
        &social,
        &fx.assets,
        &fx.journal,
        quick_retry(),
    );

    let err = pipeline.run().await.unwrap_err();

    assert_eq!(image.calls(), 3);
    match err {
        BotError::RetryExceeded {
            attempts,
            last_error,
        } => {
            assert_eq!(attempts, 3);
            assert!(last_error.contains("connection reset"));
        }
        other => panic!("expected RetryExceeded, got {other}"),
    }
    assert!(fx.journal.read_all().unwrap().is_empty());
}

#[tokio::test]
async fn fatal_errors_are_not_retried() {
    let fx = fixture();
    let image = FlakyImage::fatal();
    let text = StaticText;
    let media = StaticHost;
    let social = CountingSocial::new();
    let pipeline = PublishPipeline::new(
        &fx.prompts,
        &image,
        &text,
        &media,
        &social,
        &fx.assets,
        &fx.journal,
        quick_retry(),
    );

    let err = pipeline.run().await.unwrap_err();

    assert_eq!(image.calls(), 1);
    assert!(matches!(err, BotError::AuthError(_)), "got {err}");
    assert!(fx.journal.read_all().unwrap().is_empty());
}

#[tokio::test]
async fn each_successful_run_appends_exactly_one_row() {
    let fx = fixture();
    let image = FlakyImage::failing_first(0);
    let text = StaticText;
    let media = StaticHost;
    let social = CountingSocial::new();
    let pipeline = PublishPipeline::new(
        &fx.prompts,
        &image,
        &text,
        &media,
        &social,
        &fx.assets,
        &fx.journal,
        quick_retry(),
    );

    for _ in 0..4 {
        pipeline.run().await.unwrap();
    }

    let rows = fx.journal.read_all().unwrap();
    assert_eq!(rows.len(), 4);
    for row in &rows {
        assert_eq!(row.image_url, "https://img.example/hosted.png");
        assert_eq!(row.caption, "Golden light, quiet minds #nature #calm");
    }
}
