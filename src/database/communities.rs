//! Community repository - the persistence gateway for listings.
//!
//! Owns the `communities` collection: text search, approval-gated browse
//! filters, metric increments, inserts, and startup bootstrap (text index
//! and first-run seed data).

use anyhow::Result;
use futures::TryStreamExt;
use mongodb::bson::oid::ObjectId;
use mongodb::bson::{doc, Document};
use mongodb::options::{FindOptions, IndexOptions};
use mongodb::{Collection, IndexModel};
use tracing::{debug, info};

use super::models::{Community, LocationRef, Metrics};
use super::Database;

/// Repository for community listings.
#[derive(Clone)]
pub struct CommunityRepo {
    collection: Collection<Community>,
}

impl CommunityRepo {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection("communities"),
        }
    }

    /// Full-text search over name, description and keywords.
    ///
    /// Results come back in the store's own order for `$text` queries and
    /// are capped at `limit`. Approval is intentionally not enforced here;
    /// only the browse filters gate on it.
    pub async fn find_text(&self, query: &str, limit: i64) -> Result<Vec<Community>> {
        let cursor = self
            .collection
            .find(text_filter(query))
            .with_options(search_options(limit))
            .await?;
        let results: Vec<Community> = cursor.try_collect().await?;

        debug!("Text search '{}' matched {} communities", query, results.len());
        Ok(results)
    }

    /// All approved communities in a category, in the store's natural
    /// (insertion) order.
    pub async fn find_approved_by_category(&self, category: &str) -> Result<Vec<Community>> {
        let cursor = self.collection.find(approved_category_filter(category)).await?;
        Ok(cursor.try_collect().await?)
    }

    /// All approved communities in a city, matching both the legacy flat
    /// `location` string and the structured `location.city` field.
    pub async fn find_approved_in_city(&self, city: &str) -> Result<Vec<Community>> {
        let cursor = self.collection.find(approved_city_filter(city)).await?;
        Ok(cursor.try_collect().await?)
    }

    /// Record that a community showed up in a text-search result.
    pub async fn bump_search_hits(&self, id: ObjectId) -> Result<()> {
        self.collection
            .update_one(
                doc! { "_id": id },
                doc! { "$inc": { "metrics.searchHits": 1 } },
            )
            .await?;
        Ok(())
    }

    /// Record that a community showed up in a browse result.
    pub async fn bump_clicks(&self, id: ObjectId) -> Result<()> {
        self.collection
            .update_one(doc! { "_id": id }, doc! { "$inc": { "metrics.clicks": 1 } })
            .await?;
        Ok(())
    }

    /// Insert a new listing and return the store-assigned id.
    pub async fn insert(&self, community: &Community) -> Result<ObjectId> {
        let result = self.collection.insert_one(community).await?;
        result
            .inserted_id
            .as_object_id()
            .ok_or_else(|| anyhow::anyhow!("insert did not return an ObjectId"))
    }

    /// Count documents matching a filter.
    pub async fn count(&self, filter: Document) -> Result<u64> {
        Ok(self.collection.count_documents(filter).await?)
    }

    /// Create the text index over name, description and keywords.
    ///
    /// `default_language: "none"` disables language-specific stemming;
    /// listings mix Latin and Ge'ez scripts and neither should be stemmed
    /// with English rules.
    pub async fn ensure_text_index(&self) -> Result<()> {
        let index = IndexModel::builder()
            .keys(doc! { "name": "text", "description": "text", "keywords": "text" })
            .options(
                IndexOptions::builder()
                    .default_language("none".to_string())
                    .build(),
            )
            .build();

        self.collection.create_index(index).await?;
        info!("Text index ready on communities (language: none)");
        Ok(())
    }

    /// Seed two pre-approved listings on a fresh database so the first
    /// search has something to find.
    pub async fn seed_if_empty(&self) -> Result<()> {
        if self.count(doc! {}).await? > 0 {
            return Ok(());
        }

        for community in sample_communities() {
            self.insert(&community).await?;
            info!("Seeded community: {}", community.name);
        }

        Ok(())
    }
}

/// `$text` query filter. Deliberately carries no approval gate.
fn text_filter(query: &str) -> Document {
    doc! { "$text": { "$search": query } }
}

/// Options for a text search: result cap only, store-defined order.
fn search_options(limit: i64) -> FindOptions {
    FindOptions::builder().limit(limit).build()
}

/// Browse filter for a category. Only approved listings are eligible.
fn approved_category_filter(category: &str) -> Document {
    doc! { "category": category, "approved": true }
}

/// Browse filter for a city, matching both stored location shapes.
/// Only approved listings are eligible.
fn approved_city_filter(city: &str) -> Document {
    doc! {
        "$or": [
            { "location": city },
            { "location.city": city },
        ],
        "approved": true,
    }
}

/// Administrative seed data. Pre-approved, unlike user submissions.
fn sample_communities() -> Vec<Community> {
    let now = chrono::Utc::now().timestamp();

    let base = |name: &str,
                description: &str,
                category: &str,
                language: &str,
                link: &str,
                members: i64,
                keywords: &[&str]| Community {
        id: None,
        name: name.to_string(),
        description: description.to_string(),
        category: category.to_string(),
        language: language.to_string(),
        location: LocationRef::Structured {
            city: "Addis Ababa".to_string(),
            region: "Addis Ababa".to_string(),
        },
        link: link.to_string(),
        keywords: keywords.iter().map(|k| k.to_string()).collect(),
        members,
        approved: true,
        verified_status: false,
        activity_level: "medium".to_string(),
        metrics: Metrics::default(),
        submitted_by: None,
        created_at: now,
        updated_at: now,
    };

    vec![
        base(
            "Ethiopian Tech Hub",
            "Community for tech enthusiasts in Ethiopia",
            "tech",
            "english",
            "https://t.me/ethiotechhub",
            1200,
            &["programming", "startup", "innovation", "code"],
        ),
        base(
            "ፊትነስ አዲስ",
            "የአካል ብቃት እና ጤናማ አኗኗር ማህበረሰብ",
            "fitness",
            "amharic",
            "https://t.me/fitnessaddis",
            850,
            &["ስፖርት", "ጤና", "fitness", "workout"],
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::discovery::SEARCH_RESULT_LIMIT;

    #[test]
    fn test_category_filter_requires_approval() {
        let filter = approved_category_filter("tech");
        assert!(filter.get_bool("approved").unwrap());
        assert_eq!(filter.get_str("category").unwrap(), "tech");
    }

    #[test]
    fn test_city_filter_requires_approval_and_matches_both_shapes() {
        let filter = approved_city_filter("Addis Ababa");
        assert!(filter.get_bool("approved").unwrap());

        let shapes = filter.get_array("$or").unwrap();
        assert_eq!(shapes.len(), 2);
        assert_eq!(
            shapes[0].as_document().unwrap().get_str("location").unwrap(),
            "Addis Ababa"
        );
        assert_eq!(
            shapes[1].as_document().unwrap().get_str("location.city").unwrap(),
            "Addis Ababa"
        );
    }

    #[test]
    fn test_text_filter_has_no_approval_gate() {
        let filter = text_filter("ስፖርት");
        assert!(!filter.contains_key("approved"));
        assert_eq!(
            filter.get_document("$text").unwrap().get_str("$search").unwrap(),
            "ስፖርት"
        );
    }

    #[test]
    fn test_search_is_capped_at_five_results() {
        assert_eq!(search_options(SEARCH_RESULT_LIMIT).limit, Some(5));
    }

    #[test]
    fn test_seed_data_is_pre_approved() {
        for community in sample_communities() {
            assert!(community.approved);
            assert_eq!(community.city(), "Addis Ababa");
            assert!(community.link.starts_with("https://t.me/"));
        }
    }
}
