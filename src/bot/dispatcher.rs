//! Message dispatcher setup.
//!
//! Builds the dispatcher with all command, text-search and callback
//! handlers.

use std::sync::Arc;

use teloxide::adaptors::Throttle;
use teloxide::dispatching::UpdateHandler;
use teloxide::prelude::*;

use crate::database::{CommunityRepo, Database, UserRepo};
use crate::discovery::Discovery;
use crate::plugins;

/// Bot type with Throttle adaptor for automatic rate limiting.
pub type ThrottledBot = Throttle<Bot>;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Community listings gateway.
    pub communities: Arc<CommunityRepo>,

    /// User tracking and history.
    pub users: Arc<UserRepo>,

    /// Search-and-filter query layer.
    pub discovery: Discovery,
}

impl AppState {
    /// Create a new application state.
    pub fn new(db: &Database, communities: Arc<CommunityRepo>) -> Self {
        let users = Arc::new(UserRepo::new(db));
        let discovery = Discovery::new(Arc::clone(&communities));

        Self {
            communities,
            users,
            discovery,
        }
    }
}

/// Build the dispatcher with all handlers.
pub fn build_dispatcher(
    bot: ThrottledBot,
    db: Arc<Database>,
    communities: Arc<CommunityRepo>,
) -> Dispatcher<ThrottledBot, anyhow::Error, teloxide::dispatching::DefaultKey> {
    let state = AppState::new(&db, communities);

    Dispatcher::builder(bot, schema())
        .dependencies(dptree::deps![state])
        .enable_ctrlc_handler()
        .build()
}

/// Build the handler schema.
fn schema() -> UpdateHandler<anyhow::Error> {
    use teloxide::dispatching::UpdateFilterExt;

    // Messages: user tracking first, then commands, then bare text as a
    // search query
    let message_handler = Update::filter_message()
        .inspect_async(track_user)
        .branch(plugins::command_handler())
        .branch(plugins::text_search_handler());

    // Button presses (category/location browsing)
    let callback_handler = plugins::callback_handler();

    dptree::entry()
        .branch(message_handler)
        .branch(callback_handler)
}

/// Track user from message (runs before all handlers).
async fn track_user(msg: Message, state: AppState) {
    if let Some(user) = msg.from.as_ref() {
        state.users.clone().upsert_background(user.clone());
    }
}
