//! Mender - Ethiopian Telegram Communities Bot
//!
//! Helps users discover Telegram groups and channels in Ethiopia through
//! text search (English and Amharic), category browsing, location
//! filtering, and user-submitted listings.
//!
//! ## Architecture
//!
//! - `config` - Environment configuration + static catalogs
//! - `database` - MongoDB gateway (communities, users)
//! - `discovery` - Search-and-filter query layer
//! - `submission` - Listing validation pipeline
//! - `bot` - Dispatcher and polling/webhook runtime
//! - `plugins` - Command handlers
//! - `utils` - Display helpers

mod bot;
mod config;
mod database;
mod discovery;
mod plugins;
mod submission;
mod utils;

use std::sync::Arc;

use teloxide::adaptors::throttle::Limits;
use teloxide::prelude::*;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use config::Config;
use database::{CommunityRepo, Database};

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file first (before anything else)
    dotenvy::dotenv().ok();

    // Initialize logging with sensible defaults
    // If RUST_LOG is not set, default to "info" level for our crate
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("mender=info,teloxide=warn"));

    tracing_subscriber::fmt().with_env_filter(filter).init();

    info!("Starting Mender bot...");

    // Load configuration
    let config = Config::from_env();
    info!("Configuration loaded successfully");
    info!("Bot mode: {:?}", config.bot_mode);

    // Connect to MongoDB
    info!("Connecting to MongoDB...");
    let db = Database::connect(&config.mongodb_uri, &config.mongodb_database).await?;
    let db = Arc::new(db);
    info!("Database connected");

    // Bootstrap the communities collection. Failures here degrade search
    // quality but must not stop the bot.
    let communities = Arc::new(CommunityRepo::new(&db));
    if let Err(e) = communities.ensure_text_index().await {
        warn!("Text index setup failed, continuing with limited functionality: {}", e);
    }
    if let Err(e) = communities.seed_if_empty().await {
        warn!("Sample data seed failed: {}", e);
    }

    // Initialize bot with Throttle for automatic rate limiting
    let bot = Bot::new(&config.bot_token).throttle(Limits::default());
    info!("Bot initialized with rate limiting (Throttle)");

    // Get bot info (also verifies the token before dispatch starts)
    let me = bot.get_me().await?;
    info!("Bot username: @{}", me.username());

    // Build dispatcher
    let dispatcher = bot::build_dispatcher(bot.clone(), db, communities);

    // Run the bot
    bot::run(&config, dispatcher, bot).await;

    Ok(())
}
