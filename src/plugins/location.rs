//! Location filtering plugin.
//!
//! /location shows the city keyboard; the `location_*` callback lists
//! approved communities in the chosen city. The `location_all` sentinel is
//! a no-op selection that redirects to category browsing.

use teloxide::prelude::*;
use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup};
use tracing::error;

use super::GENERIC_RETRY;
use crate::bot::dispatcher::{AppState, ThrottledBot};
use crate::config;
use crate::discovery::{CommunityCard, LocationSelection};

/// Handle the /location command.
pub async fn location_command(
    bot: ThrottledBot,
    msg: Message,
    _state: AppState,
) -> anyhow::Result<()> {
    bot.send_message(msg.chat.id, "Select a location to filter communities:")
        .reply_markup(location_keyboard())
        .await?;

    Ok(())
}

fn location_keyboard() -> InlineKeyboardMarkup {
    let buttons: Vec<InlineKeyboardButton> = config::LOCATIONS
        .iter()
        .map(|location| {
            InlineKeyboardButton::callback(
                location.to_string(),
                format!("location_{}", config::location_code(location)),
            )
        })
        .collect();

    let mut rows = super::two_per_row(buttons);
    rows.push(vec![InlineKeyboardButton::callback(
        "All Locations",
        "location_all",
    )]);

    InlineKeyboardMarkup::new(rows)
}

/// Handle a `location_*` button press.
pub async fn location_callback(
    bot: ThrottledBot,
    q: CallbackQuery,
    state: AppState,
) -> anyhow::Result<()> {
    bot.answer_callback_query(q.id.clone()).await?;

    let Some(chat_id) = q.message.as_ref().map(|m| m.chat().id) else {
        return Ok(());
    };
    let Some(code) = q.data.as_deref().and_then(|d| d.strip_prefix("location_")) else {
        return Ok(());
    };

    let city = match LocationSelection::from_code(code) {
        Some(LocationSelection::All) => {
            bot.send_message(
                chat_id,
                "Showing communities from all locations. Use /categories to browse by interest.",
            )
            .await?;
            return Ok(());
        }
        Some(LocationSelection::City(city)) => city,
        None => {
            bot.send_message(chat_id, "Invalid location selected.").await?;
            return Ok(());
        }
    };

    let results = match state.discovery.filter_by_location(city).await {
        Ok(results) => results,
        Err(e) => {
            error!("Location filter error for '{}': {}", city, e);
            bot.send_message(chat_id, GENERIC_RETRY).await?;
            return Ok(());
        }
    };

    if results.is_empty() {
        bot.send_message(chat_id, format!("No communities found in {}.", city))
            .await?;
        return Ok(());
    }

    bot.send_message(
        chat_id,
        format!("Found {} communities in {}:", results.len(), city),
    )
    .await?;

    for community in &results {
        let card = CommunityCard::new(community);
        // Location is implied by the selection, show category only
        super::send_card(&bot, chat_id, &card, false, true).await?;
    }

    Ok(())
}
