//! Discovery - the search-and-filter query layer.
//!
//! Maps the three user-facing intents (free-text search, category
//! selection, location selection) to repository queries and records usage
//! metrics as fire-and-forget side effects.
//!
//! Free-text search deliberately does not gate on `approved` (pending
//! listings stay discoverable by search), while both browse filters do.

mod card;

pub use card::CommunityCard;

use std::sync::Arc;

use anyhow::Result;
use tracing::warn;

use crate::config;
use crate::database::{Community, CommunityRepo};

/// Maximum hits returned by a text search.
pub const SEARCH_RESULT_LIMIT: i64 = 5;

/// A resolved location button press.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocationSelection {
    /// The "All Locations" sentinel. Not a match-everything query; the
    /// caller redirects the user to category browsing instead.
    All,
    /// A configured city.
    City(&'static str),
}

impl LocationSelection {
    /// Resolve a callback code (`all` or a compact city code).
    pub fn from_code(code: &str) -> Option<Self> {
        if code == "all" {
            return Some(Self::All);
        }
        config::resolve_location(code).map(Self::City)
    }
}

/// Query layer over the community repository.
#[derive(Clone)]
pub struct Discovery {
    communities: Arc<CommunityRepo>,
}

impl Discovery {
    pub fn new(communities: Arc<CommunityRepo>) -> Self {
        Self { communities }
    }

    /// Relevance search over name, description and keywords.
    ///
    /// Returns at most [`SEARCH_RESULT_LIMIT`] hits; an empty result is not
    /// an error. Each returned hit gets one best-effort `searchHits`
    /// increment that can neither slow down nor fail the search.
    pub async fn search_by_text(&self, query: &str) -> Result<Vec<Community>> {
        let results = self
            .communities
            .find_text(query, SEARCH_RESULT_LIMIT)
            .await?;

        for community in &results {
            self.bump_background(community, Metric::SearchHit);
        }

        Ok(results)
    }

    /// Approved communities in a category, store insertion order.
    /// Each returned hit gets one best-effort `clicks` increment.
    pub async fn filter_by_category(&self, category: &str) -> Result<Vec<Community>> {
        let results = self.communities.find_approved_by_category(category).await?;

        for community in &results {
            self.bump_background(community, Metric::Click);
        }

        Ok(results)
    }

    /// Approved communities in a city (matching both stored location
    /// shapes), store insertion order. Each returned hit gets one
    /// best-effort `clicks` increment.
    pub async fn filter_by_location(&self, city: &str) -> Result<Vec<Community>> {
        let results = self.communities.find_approved_in_city(city).await?;

        for community in &results {
            self.bump_background(community, Metric::Click);
        }

        Ok(results)
    }

    /// Spawn a metric increment that is never awaited by the read path.
    fn bump_background(&self, community: &Community, metric: Metric) {
        let Some(id) = community.id else {
            return;
        };
        let repo = Arc::clone(&self.communities);
        tokio::spawn(async move {
            let result = match metric {
                Metric::SearchHit => repo.bump_search_hits(id).await,
                Metric::Click => repo.bump_clicks(id).await,
            };
            if let Err(e) = result {
                warn!("Failed to record {:?} for community {}: {}", metric, id, e);
            }
        });
    }
}

#[derive(Debug, Clone, Copy)]
enum Metric {
    SearchHit,
    Click,
}
