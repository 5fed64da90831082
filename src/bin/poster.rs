//! Scheduled posting bot: runs the publish pipeline on a fixed interval.
//!
//! Runs are strictly sequential; the loop awaits each pipeline run before
//! the next tick, so scheduled runs cannot overlap. An abandoned run is
//! logged and the schedule continues.

use tokio::time::MissedTickBehavior;

use autogram::assets::AssetStore;
use autogram::config::BotConfig;
use autogram::journal::PostJournal;
use autogram::pipeline::PublishPipeline;
use autogram::prompt::PromptLibrary;
use autogram::providers::{ImgbbHost, InstagramApi, OpenAiImage, OpenAiText};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _ = dotenvy::dotenv();
    autogram::init_logging();

    let cfg = BotConfig::from_env();
    let assets = AssetStore::new(&cfg.asset_dir)?;
    let journal = PostJournal::open(&cfg.journal_path)?;
    let prompts = PromptLibrary::default();

    let image = OpenAiImage::new(
        cfg.openai_api_key.clone(),
        cfg.image_model.clone(),
        cfg.image_size.clone(),
        None,
        cfg.openai_base_url.clone(),
    );
    let text = OpenAiText::new(
        cfg.openai_api_key.clone(),
        cfg.text_model.clone(),
        None,
        None,
        None,
        cfg.openai_base_url.clone(),
    );
    let media = ImgbbHost::new(cfg.imgbb_api_key.clone(), None, None);
    let social = InstagramApi::new(
        cfg.instagram_user_id.clone(),
        cfg.instagram_access_token.clone(),
        None,
        None,
    );

    let pipeline = PublishPipeline::new(
        &prompts,
        &image,
        &text,
        &media,
        &social,
        &assets,
        &journal,
        cfg.retry.clone(),
    );

    log::info!(
        "posting every {}s, journal at {}",
        cfg.post_interval.as_secs(),
        journal.path().display()
    );

    let mut ticker = tokio::time::interval(cfg.post_interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    loop {
        ticker.tick().await;
        match pipeline.run().await {
            Ok(record) => log::info!("posted {}", record.image_url),
            Err(e) => log::error!("pipeline run abandoned: {e}"),
        }
    }
}
