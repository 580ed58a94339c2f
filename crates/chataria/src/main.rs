use std::sync::Arc;

use jobs::TokioRunner;
use storage::DownloadRoot;
use ::telegram::{telegram, BotConfig, BotState, LogFormat};
use teloxide::prelude::*;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

/// RUST_LOG directives win over TG_LOG_LEVEL when both are set
fn log_filter(level: LevelFilter, rust_log: Option<&str>) -> EnvFilter {
    EnvFilter::builder()
        .with_default_directive(level.into())
        .parse_lossy(rust_log.unwrap_or_default())
}

fn init_tracing(level: LevelFilter, format: LogFormat) {
    let rust_log = std::env::var("RUST_LOG").ok();
    let filter = log_filter(level, rust_log.as_deref());

    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    match format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Text => builder.init(),
    }
}

#[tokio::main]
async fn main() {
    // Load environment variables from .env file
    let _ = dotenv::dotenv();

    let config = match BotConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Invalid configuration: {}", e);
            eprintln!("Please check your .env file or environment");
            std::process::exit(1);
        }
    };

    init_tracing(config.log_level, config.log_format);

    let root = match DownloadRoot::open(&config.download_dir) {
        Ok(root) => root,
        Err(e) => {
            tracing::error!("Cannot use download directory: {}", e);
            std::process::exit(1);
        }
    };

    let bot = Bot::new(config.token.clone());
    let uploader = match telegram::upload_bot(&config.token, config.send_timeout) {
        Ok(uploader) => uploader,
        Err(e) => {
            tracing::error!("{}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = telegram::set_bot_commands(&bot).await {
        tracing::warn!("Failed to register bot commands: {}", e);
    }

    let state = BotState::new(&config, root, Arc::new(TokioRunner));
    tracing::info!(
        "Bot started for {} allowed user(s), downloads in {}",
        config.allowed_users.len(),
        state.root.path().display()
    );

    Dispatcher::builder(bot, telegram::schema())
        .dependencies(dptree::deps![state, uploader])
        .distribution_function(|_| None::<std::convert::Infallible>)
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;
}
