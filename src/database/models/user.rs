//! Bot user model.
//!
//! Tracks who talked to the bot, their search history, and the listings
//! they submitted. `telegramId` is the natural upsert key.

use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// One recorded search query.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchRecord {
    pub query: String,
    /// Unix seconds.
    pub timestamp: i64,
}

/// A user who has interacted with the bot.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BotUser {
    /// Telegram user ID.
    pub telegram_id: i64,
    #[serde(default)]
    pub username: Option<String>,
    pub first_name: String,
    #[serde(default)]
    pub last_name: Option<String>,

    /// Set once on first contact.
    pub joined_at: i64,
    /// Refreshed on every inbound interaction.
    pub last_active: i64,

    /// Append-only search log.
    #[serde(default)]
    pub search_history: Vec<SearchRecord>,

    /// Weak references to submitted communities.
    #[serde(default)]
    pub submitted_communities: Vec<ObjectId>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::{self, doc};

    #[test]
    fn test_user_deserializes_storage_names() {
        let doc = doc! {
            "telegramId": 7_i64,
            "username": "meskerem",
            "firstName": "Meskerem",
            "joinedAt": 1_700_000_000_i64,
            "lastActive": 1_700_000_500_i64,
            "searchHistory": [ { "query": "ስፖርት", "timestamp": 1_700_000_400_i64 } ],
        };

        let user: BotUser = bson::from_document(doc).unwrap();
        assert_eq!(user.telegram_id, 7);
        assert_eq!(user.search_history.len(), 1);
        assert_eq!(user.search_history[0].query, "ስፖርት");
        assert!(user.submitted_communities.is_empty());
        assert!(user.last_name.is_none());
    }
}
