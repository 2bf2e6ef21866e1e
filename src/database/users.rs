//! User repository.
//!
//! Tracks everyone who talks to the bot: display attributes, activity
//! timestamps, search history, and submitted listings. Writes on the hot
//! path (user tracking, search history) have fire-and-forget variants so
//! they never slow down or fail a reply.

use std::sync::Arc;

use anyhow::Result;
use mongodb::bson::oid::ObjectId;
use mongodb::bson::doc;
use mongodb::Collection;
use teloxide::types::User;
use tokio::spawn;
use tracing::warn;

use super::models::BotUser;
use super::Database;

/// Repository for bot users.
#[derive(Clone)]
pub struct UserRepo {
    collection: Collection<BotUser>,
}

impl UserRepo {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection("users"),
        }
    }

    /// Upsert a user from an inbound interaction.
    ///
    /// Refreshes display attributes and `lastActive` on every call;
    /// `joinedAt` is only written when the record is first created.
    pub async fn upsert(&self, user: &User, now: i64) -> Result<()> {
        let filter = doc! { "telegramId": user.id.0 as i64 };
        let update = doc! {
            "$set": {
                "username": user.username.as_deref(),
                "firstName": &user.first_name,
                "lastName": user.last_name.as_deref(),
                "lastActive": now,
            },
            "$setOnInsert": { "joinedAt": now },
        };
        let options = mongodb::options::UpdateOptions::builder()
            .upsert(true)
            .build();

        self.collection
            .update_one(filter, update)
            .with_options(options)
            .await?;
        Ok(())
    }

    /// Upsert user in background (non-blocking).
    pub fn upsert_background(self: Arc<Self>, user: User) {
        let now = chrono::Utc::now().timestamp();
        spawn(async move {
            if let Err(e) = self.upsert(&user, now).await {
                warn!("Failed to upsert user {}: {}", user.id, e);
            }
        });
    }

    /// Append a query to the user's search history.
    pub async fn record_search(&self, telegram_id: i64, query: &str, now: i64) -> Result<()> {
        let filter = doc! { "telegramId": telegram_id };
        let update = doc! {
            "$push": { "searchHistory": { "query": query, "timestamp": now } },
        };

        self.collection.update_one(filter, update).await?;
        Ok(())
    }

    /// Record a search in background (non-blocking).
    pub fn record_search_background(self: Arc<Self>, telegram_id: i64, query: String) {
        let now = chrono::Utc::now().timestamp();
        spawn(async move {
            if let Err(e) = self.record_search(telegram_id, &query, now).await {
                warn!("Failed to record search for user {}: {}", telegram_id, e);
            }
        });
    }

    /// Append a submitted community id to the user's record.
    pub async fn record_submission(&self, telegram_id: i64, community_id: ObjectId) -> Result<()> {
        let filter = doc! { "telegramId": telegram_id };
        let update = doc! {
            "$push": { "submittedCommunities": community_id },
        };

        self.collection.update_one(filter, update).await?;
        Ok(())
    }
}
