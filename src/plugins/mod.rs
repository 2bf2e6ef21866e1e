//! Plugin system for command handlers.
//!
//! Add new plugins by:
//! 1. Creating a new file in this directory
//! 2. Adding `pub mod your_plugin;` below
//! 3. Adding the handler to `command_handler()`

pub mod categories;
pub mod help;
pub mod location;
pub mod search;
pub mod start;
pub mod submit;

use teloxide::dispatching::UpdateHandler;
use teloxide::prelude::*;
use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup, ParseMode};
use teloxide::utils::command::BotCommands;

use crate::bot::dispatcher::ThrottledBot;
use crate::discovery::CommunityCard;

/// Reply for unexpected store failures. Details go to the log, never to
/// the user.
pub const GENERIC_RETRY: &str = "Sorry, an error occurred. Please try again later.";

/// All bot commands.
#[derive(BotCommands, Clone)]
#[command(rename_rule = "lowercase", description = "Available commands:")]
pub enum Command {
    #[command(description = "Start the bot")]
    Start,

    #[command(description = "Show help information")]
    Help,

    #[command(description = "Search for communities")]
    Search(String),

    #[command(description = "Browse by category")]
    Categories,

    #[command(description = "Filter by location")]
    Location,

    #[command(description = "How to submit a new community")]
    Submit,

    #[command(description = "Add a new community listing")]
    Add(String),
}

/// Build the combined command handler.
pub fn command_handler() -> UpdateHandler<anyhow::Error> {
    use dptree::case;

    teloxide::filter_command::<Command, _>()
        .branch(case![Command::Start].endpoint(start::start_command))
        .branch(case![Command::Help].endpoint(help::help_command))
        .branch(case![Command::Search(query)].endpoint(search::search_command))
        .branch(case![Command::Categories].endpoint(categories::categories_command))
        .branch(case![Command::Location].endpoint(location::location_command))
        .branch(case![Command::Submit].endpoint(submit::submit_command))
        .branch(case![Command::Add(raw)].endpoint(submit::add_command))
}

/// Build the bare-text handler: any non-command message is a search query.
pub fn text_search_handler() -> UpdateHandler<anyhow::Error> {
    dptree::filter(|msg: Message| {
        msg.text().map(|t| !t.starts_with('/')).unwrap_or(false)
    })
    .endpoint(search::text_message)
}

/// Build the callback query handler (browse buttons).
pub fn callback_handler() -> UpdateHandler<anyhow::Error> {
    Update::filter_callback_query()
        .branch(
            dptree::filter(|q: CallbackQuery| {
                q.data.as_ref().map(|d| d.starts_with("category_")).unwrap_or(false)
            })
            .endpoint(categories::category_callback),
        )
        .branch(
            dptree::filter(|q: CallbackQuery| {
                q.data.as_ref().map(|d| d.starts_with("location_")).unwrap_or(false)
            })
            .endpoint(location::location_callback),
        )
}

/// Send one community card with its Join Group button.
pub(crate) async fn send_card(
    bot: &ThrottledBot,
    chat_id: ChatId,
    card: &CommunityCard,
    show_location: bool,
    show_category: bool,
) -> anyhow::Result<()> {
    let keyboard = InlineKeyboardMarkup::new(vec![vec![InlineKeyboardButton::url(
        "Join Group",
        card.join_url.parse()?,
    )]]);

    bot.send_message(chat_id, card.render(show_location, show_category))
        .parse_mode(ParseMode::Html)
        .reply_markup(keyboard)
        .await?;

    Ok(())
}

/// Lay buttons out two per row, the shape both browse keyboards use.
pub(crate) fn two_per_row(buttons: Vec<InlineKeyboardButton>) -> Vec<Vec<InlineKeyboardButton>> {
    buttons.chunks(2).map(|row| row.to_vec()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_two_per_row_layout() {
        let buttons: Vec<_> = (0..5)
            .map(|i| InlineKeyboardButton::callback(format!("b{i}"), format!("d{i}")))
            .collect();

        let rows = two_per_row(buttons);
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].len(), 2);
        assert_eq!(rows[2].len(), 1);
    }
}
