//! /start command plugin.

use teloxide::prelude::*;

use crate::bot::dispatcher::{AppState, ThrottledBot};

/// Handle the /start command.
pub async fn start_command(
    bot: ThrottledBot,
    msg: Message,
    _state: AppState,
) -> anyhow::Result<()> {
    // User upsert already ran in the dispatcher's tracking inspector
    let welcome_text = "👋 Welcome to Ethiopian Telegram Communities Bot!\n\n\
        I can help you find Telegram groups and channels in Ethiopia based on your interests.\n\n\
        Commands:\n\
        /search - Search for communities\n\
        /categories - Browse by category\n\
        /location - Filter by location\n\
        /submit - Submit a new community\n\
        /help - Show help information";

    bot.send_message(msg.chat.id, welcome_text).await?;

    Ok(())
}
