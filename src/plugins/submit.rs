//! Community submission plugin.
//!
//! /submit explains the expected format; /add runs the submission
//! pipeline. Validation errors go back to the user verbatim; store errors
//! are logged and answered with the generic retry message.

use teloxide::prelude::*;
use tracing::error;

use crate::bot::dispatcher::{AppState, ThrottledBot};
use crate::submission::{parse_submission, persist_draft, Submitter};

/// Handle the /submit command.
pub async fn submit_command(
    bot: ThrottledBot,
    msg: Message,
    _state: AppState,
) -> anyhow::Result<()> {
    let instructions = "To submit a new Telegram community, please provide the following information:\n\n\
        1. Group/Channel name\n\
        2. Description\n\
        3. Category (tech, fitness, etc.)\n\
        4. Language (English, Amharic, or both)\n\
        5. Location in Ethiopia\n\
        6. Invite link\n\n\
        Please format your submission as:\n\
        /add [name] | [description] | [category] | [language] | [location] | [link]";

    bot.send_message(msg.chat.id, instructions).await?;

    Ok(())
}

/// Handle the /add command - process a new community submission.
pub async fn add_command(
    bot: ThrottledBot,
    msg: Message,
    state: AppState,
    raw: String,
) -> anyhow::Result<()> {
    let chat_id = msg.chat.id;
    let Some(user) = msg.from.as_ref() else {
        return Ok(());
    };

    let submitter = Submitter::from_telegram(user);
    let now = chrono::Utc::now().timestamp();

    let draft = match parse_submission(&raw, &submitter, now) {
        Ok(draft) => draft,
        Err(e) => {
            // User error, not a system fault
            bot.send_message(chat_id, e.user_message()).await?;
            return Ok(());
        }
    };

    match persist_draft(&state.communities, &state.users, &draft).await {
        Ok(_) => {
            bot.send_message(
                chat_id,
                "✅ Thank you! Your community submission has been received and is pending approval.",
            )
            .await?;
        }
        Err(e) => {
            error!("Error adding community '{}': {}", draft.name, e);
            bot.send_message(
                chat_id,
                "Sorry, an error occurred while submitting the community. Please try again later.",
            )
            .await?;
        }
    }

    Ok(())
}
