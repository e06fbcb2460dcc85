//! `chattr-server`: HTTP API for translation and conversation.
//!
//! All configuration comes from the environment (see
//! [`ServerConfig::from_lookup`]).  Missing API keys are not fatal: the
//! server starts and reports the degraded providers in the log.

use std::sync::Arc;

use chattr::{
    config::ServerConfig,
    conversation::ChatService,
    llm::{OpenAiGenerator, ReplyGenerator},
    server::{self, AppState},
    translate::DeepLTranslator,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Starting Chattr server v{}", env!("CARGO_PKG_VERSION"));

    let config = ServerConfig::from_env();

    let translator = DeepLTranslator::from_config(&config.translator);
    if translator.is_configured() {
        log::info!("Translation provider: {}", config.translator.base_url());
    } else {
        log::warn!("DEEPL_API_KEY is not set; translation requests will fail");
    }

    let generator = OpenAiGenerator::from_config(&config.llm);
    if generator.is_configured() {
        log::info!(
            "Language model: {} at {}",
            config.llm.model,
            config.llm.base_url
        );
    } else {
        log::warn!("OPENAI_API_KEY is not set; conversations fall back to translation only");
    }

    let service = ChatService::new(Arc::new(translator), Arc::new(generator));
    let state = AppState::new(service);

    tokio::select! {
        result = server::serve(state, config.http_addr) => {
            if let Err(e) = result {
                log::error!("HTTP server failed: {e}");
                return Err(e);
            }
        }
        _ = tokio::signal::ctrl_c() => {
            log::info!("Received Ctrl+C, shutting down");
        }
    }

    Ok(())
}
