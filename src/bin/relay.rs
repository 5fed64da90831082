//! Chat relay server: one endpoint forwarding a message to the
//! text-generation service.

use std::sync::Arc;

use autogram::api::RelayServer;
use autogram::config::RelayConfig;
use autogram::providers::OpenAiText;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _ = dotenvy::dotenv();
    autogram::init_logging();

    let cfg = RelayConfig::from_env();
    let llm = OpenAiText::new(
        cfg.openai_api_key.clone(),
        cfg.model.clone(),
        None,
        None,
        None,
        cfg.openai_base_url.clone(),
    );

    let addr = format!("0.0.0.0:{}", cfg.port);
    log::info!("relay listening on {addr}");
    RelayServer::new(Arc::new(llm)).run(&addr).await?;
    Ok(())
}
