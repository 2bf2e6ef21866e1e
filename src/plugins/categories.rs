//! Category browsing plugin.
//!
//! /categories shows the category keyboard; the `category_*` callback
//! lists approved communities in the chosen category.

use teloxide::prelude::*;
use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup};
use tracing::error;

use super::GENERIC_RETRY;
use crate::bot::dispatcher::{AppState, ThrottledBot};
use crate::config;
use crate::discovery::CommunityCard;
use crate::utils::capitalize_first;

/// Handle the /categories command.
pub async fn categories_command(
    bot: ThrottledBot,
    msg: Message,
    _state: AppState,
) -> anyhow::Result<()> {
    bot.send_message(msg.chat.id, "Select a category to browse:")
        .reply_markup(category_keyboard())
        .await?;

    Ok(())
}

fn category_keyboard() -> InlineKeyboardMarkup {
    let buttons: Vec<InlineKeyboardButton> = config::CATEGORIES
        .iter()
        .map(|category| {
            InlineKeyboardButton::callback(
                format!("{} {}", config::category_emoji(category), capitalize_first(category)),
                format!("category_{}", category),
            )
        })
        .collect();

    InlineKeyboardMarkup::new(super::two_per_row(buttons))
}

/// Handle a `category_*` button press.
pub async fn category_callback(
    bot: ThrottledBot,
    q: CallbackQuery,
    state: AppState,
) -> anyhow::Result<()> {
    bot.answer_callback_query(q.id.clone()).await?;

    let Some(chat_id) = q.message.as_ref().map(|m| m.chat().id) else {
        return Ok(());
    };
    let Some(category) = q.data.as_deref().and_then(|d| d.strip_prefix("category_")) else {
        return Ok(());
    };

    let results = match state.discovery.filter_by_category(category).await {
        Ok(results) => results,
        Err(e) => {
            error!("Category filter error for '{}': {}", category, e);
            bot.send_message(chat_id, GENERIC_RETRY).await?;
            return Ok(());
        }
    };

    if results.is_empty() {
        bot.send_message(
            chat_id,
            format!("No communities found in the {} category.", category),
        )
        .await?;
        return Ok(());
    }

    bot.send_message(
        chat_id,
        format!("Found {} communities in {}:", results.len(), category),
    )
    .await?;

    for community in &results {
        let card = CommunityCard::new(community);
        // Category is implied by the selection, show location only
        super::send_card(&bot, chat_id, &card, true, false).await?;
    }

    Ok(())
}
