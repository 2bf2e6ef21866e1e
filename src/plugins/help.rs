//! /help command plugin.

use teloxide::prelude::*;

use crate::bot::dispatcher::{AppState, ThrottledBot};

/// Handle the /help command.
pub async fn help_command(
    bot: ThrottledBot,
    msg: Message,
    _state: AppState,
) -> anyhow::Result<()> {
    let help_text = "Ethiopian Telegram Communities Bot Help:\n\n\
        • Use /search to find communities by keywords\n\
        • Use /categories to browse by category\n\
        • Use /location to filter by city/region\n\
        • Use /submit to add a new community\n\n\
        Examples:\n\
        - /search programming (find tech communities)\n\
        - /search ስፖርት (find fitness communities in Amharic)\n\
        - Search supports both English and Amharic";

    bot.send_message(msg.chat.id, help_text).await?;

    Ok(())
}
