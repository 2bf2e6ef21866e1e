//! Community listing model.
//!
//! Field names are part of the storage contract (camelCase, nested
//! `location.city` and `metrics.*`) and must stay stable so existing
//! documents keep deserializing.

use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// Where a community is based.
///
/// Early records stored `location` as a plain city string; newer records
/// store a `{city, region}` document. Both shapes live side by side in the
/// collection, so every read path normalizes through [`LocationRef::city`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum LocationRef {
    /// Structured form, `city` is the canonical field read by filters.
    Structured {
        city: String,
        #[serde(default)]
        region: String,
    },
    /// Legacy flat city string.
    Legacy(String),
}

impl LocationRef {
    /// Create the structured form with an empty region.
    pub fn city_only(city: impl Into<String>) -> Self {
        Self::Structured {
            city: city.into(),
            region: String::new(),
        }
    }

    /// Canonical city name regardless of stored shape.
    pub fn city(&self) -> &str {
        match self {
            Self::Structured { city, .. } => city,
            Self::Legacy(city) => city,
        }
    }
}

/// Read-path usage counters. Monotonically incremented, never decremented.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Metrics {
    /// Times this community appeared in a text-search result.
    #[serde(default)]
    pub search_hits: i64,
    /// Times this community appeared in a category/location browse.
    #[serde(default)]
    pub clicks: i64,
    #[serde(default)]
    pub user_rating: i64,
}

/// Weak reference to the submitting user. Confers no ownership.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SubmittedBy {
    pub user_id: i64,
    #[serde(default)]
    pub username: Option<String>,
}

/// A Telegram group/channel listing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Community {
    /// Assigned by the store on insert.
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,

    pub name: String,
    pub description: String,

    /// Lowercased member of the configured category catalog.
    pub category: String,
    /// Lowercased member of the configured language catalog.
    pub language: String,

    pub location: LocationRef,

    /// Invite link, always starts with `https://t.me/`.
    pub link: String,

    /// Extra terms feeding the text index.
    #[serde(default)]
    pub keywords: Vec<String>,

    /// Member count, maintained by an administrative process.
    #[serde(default)]
    pub members: i64,

    /// Moderation gate. Only approved communities appear in browse results.
    #[serde(default)]
    pub approved: bool,

    #[serde(default)]
    pub verified_status: bool,

    #[serde(default = "default_activity_level")]
    pub activity_level: String,

    #[serde(default)]
    pub metrics: Metrics,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub submitted_by: Option<SubmittedBy>,

    /// Unix seconds. `updated_at` is set at submission and not refreshed
    /// on later mutation.
    #[serde(default)]
    pub created_at: i64,
    #[serde(default)]
    pub updated_at: i64,
}

fn default_activity_level() -> String {
    "medium".to_string()
}

impl Community {
    /// Canonical city name for display and filtering.
    pub fn city(&self) -> &str {
        self.location.city()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::{self, doc};

    #[test]
    fn test_location_deserializes_legacy_string() {
        let loc: LocationRef = bson::from_bson(bson::Bson::String("Addis Ababa".into())).unwrap();
        assert_eq!(loc, LocationRef::Legacy("Addis Ababa".into()));
        assert_eq!(loc.city(), "Addis Ababa");
    }

    #[test]
    fn test_location_deserializes_structured_doc() {
        let loc: LocationRef =
            bson::from_document(doc! { "city": "Hawassa", "region": "Sidama" }).unwrap();
        assert_eq!(loc.city(), "Hawassa");
        // Region may be absent in older structured records
        let loc: LocationRef = bson::from_document(doc! { "city": "Adama" }).unwrap();
        assert_eq!(loc.city(), "Adama");
    }

    #[test]
    fn test_community_deserializes_minimal_document() {
        // Seeded/legacy documents lack metrics, approval and timestamps
        let doc = doc! {
            "name": "Ethiopian Tech Hub",
            "description": "Community for tech enthusiasts in Ethiopia",
            "category": "tech",
            "language": "english",
            "location": "Addis Ababa",
            "link": "https://t.me/ethiotechhub",
        };

        let community: Community = bson::from_document(doc).unwrap();
        assert_eq!(community.city(), "Addis Ababa");
        assert!(!community.approved);
        assert_eq!(community.members, 0);
        assert_eq!(community.metrics, Metrics::default());
        assert_eq!(community.activity_level, "medium");
        assert!(community.submitted_by.is_none());
    }

    #[test]
    fn test_community_serializes_storage_contract_names() {
        let community = Community {
            id: None,
            name: "Addis Coders".into(),
            description: "Learn to code".into(),
            category: "tech".into(),
            language: "english".into(),
            location: LocationRef::city_only("Addis Ababa"),
            link: "https://t.me/addiscoders".into(),
            keywords: vec!["tech".into()],
            members: 0,
            approved: false,
            verified_status: false,
            activity_level: "medium".into(),
            metrics: Metrics::default(),
            submitted_by: Some(SubmittedBy {
                user_id: 42,
                username: Some("abel".into()),
            }),
            created_at: 1_700_000_000,
            updated_at: 1_700_000_000,
        };

        let doc = bson::to_document(&community).unwrap();
        assert!(doc.contains_key("activityLevel"));
        assert!(doc.contains_key("verifiedStatus"));
        assert!(doc.contains_key("createdAt"));
        assert_eq!(
            doc.get_document("location").unwrap().get_str("city").unwrap(),
            "Addis Ababa"
        );
        assert_eq!(
            doc.get_document("metrics").unwrap().get_i64("searchHits").unwrap(),
            0
        );
        assert_eq!(
            doc.get_document("submittedBy").unwrap().get_i64("userId").unwrap(),
            42
        );
        // _id must not be written for drafts so the store can assign one
        assert!(!doc.contains_key("_id"));
    }
}
