//! Search plugin.
//!
//! Handles /search and bare text messages, which are treated as search
//! queries. Every query is appended to the user's search history before
//! the search runs.

use teloxide::prelude::*;
use tracing::error;

use super::GENERIC_RETRY;
use crate::bot::dispatcher::{AppState, ThrottledBot};
use crate::discovery::CommunityCard;

/// Handle the /search command.
pub async fn search_command(
    bot: ThrottledBot,
    msg: Message,
    state: AppState,
    query: String,
) -> anyhow::Result<()> {
    let chat_id = msg.chat.id;
    let query = query.trim();

    if query.is_empty() {
        bot.send_message(
            chat_id,
            "Please provide search terms after /search. For example:\n\
             /search programming\n\
             /search ስፖርት\n\
             You can search in both English and Amharic.",
        )
        .await?;
        return Ok(());
    }

    record_query(&state, &msg, query);
    perform_search(&bot, chat_id, &state, query).await
}

/// Handle a plain text message as a search query.
pub async fn text_message(
    bot: ThrottledBot,
    msg: Message,
    state: AppState,
) -> anyhow::Result<()> {
    let Some(text) = msg.text() else {
        return Ok(());
    };
    let query = text.trim();
    if query.is_empty() {
        return Ok(());
    }

    record_query(&state, &msg, query);
    perform_search(&bot, msg.chat.id, &state, query).await
}

/// Append the query to the sender's search history (non-blocking).
fn record_query(state: &AppState, msg: &Message, query: &str) {
    if let Some(user) = msg.from.as_ref() {
        state
            .users
            .clone()
            .record_search_background(user.id.0 as i64, query.to_string());
    }
}

/// Run the search and render up to five result cards.
async fn perform_search(
    bot: &ThrottledBot,
    chat_id: ChatId,
    state: &AppState,
    query: &str,
) -> anyhow::Result<()> {
    let results = match state.discovery.search_by_text(query).await {
        Ok(results) => results,
        Err(e) => {
            error!("Search error for '{}': {}", query, e);
            bot.send_message(chat_id, GENERIC_RETRY).await?;
            return Ok(());
        }
    };

    if results.is_empty() {
        bot.send_message(
            chat_id,
            format!(
                "No communities found for '{}'. Try different keywords or use /categories to browse.",
                query
            ),
        )
        .await?;
        return Ok(());
    }

    bot.send_message(
        chat_id,
        format!("Found {} communities matching '{}':", results.len(), query),
    )
    .await?;

    for community in &results {
        let card = CommunityCard::new(community);
        super::send_card(bot, chat_id, &card, true, true).await?;
    }

    Ok(())
}
