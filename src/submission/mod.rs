//! Submission pipeline.
//!
//! Turns a pipe-delimited free-text submission into a validated, pending
//! community draft and persists it. Validation failures are user errors,
//! surfaced verbatim with a corrective instruction and never logged as
//! system faults.

use anyhow::Result;
use mongodb::bson::oid::ObjectId;
use teloxide::types::User;
use thiserror::Error;
use tracing::warn;

use crate::config;
use crate::database::{Community, CommunityRepo, LocationRef, Metrics, SubmittedBy, UserRepo};

/// Number of pipe-separated fields a submission must contain.
const FIELD_COUNT: usize = 6;

/// Why a submission was rejected.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SubmissionError {
    #[error("submission does not have 6 pipe-separated fields")]
    MalformedSubmission,
    #[error("link does not start with https://t.me/")]
    InvalidLink,
    #[error("category is not in the configured catalog")]
    InvalidCategory,
    #[error("language is not in the configured catalog")]
    InvalidLanguage,
}

impl SubmissionError {
    /// The corrective instruction sent back to the submitter.
    pub fn user_message(&self) -> String {
        match self {
            Self::MalformedSubmission => "❌ Invalid format. Please use:\n\
                 /add [name] | [description] | [category] | [language] | [location] | [link]"
                .to_string(),
            Self::InvalidLink => {
                "❌ Invalid Telegram link. It should start with https://t.me/".to_string()
            }
            Self::InvalidCategory => format!(
                "❌ Invalid category. Please use one of: {}",
                config::CATEGORIES.join(", ")
            ),
            Self::InvalidLanguage => format!(
                "❌ Invalid language. Please use one of: {}",
                config::LANGUAGES.join(", ")
            ),
        }
    }
}

/// Identity of the submitting user.
#[derive(Debug, Clone)]
pub struct Submitter {
    pub user_id: i64,
    pub username: Option<String>,
}

impl Submitter {
    pub fn from_telegram(user: &User) -> Self {
        Self {
            user_id: user.id.0 as i64,
            username: user.username.clone(),
        }
    }
}

/// Parse and validate a raw submission into a pending draft.
///
/// Expected shape (whitespace around fields is trimmed):
/// `name | description | category | language | location | link`
///
/// On success the draft is normalized: category and language lowercased,
/// location wrapped as `{city, region: ""}`, keywords seeded with the
/// category, zero members and metrics, `approved = false`.
pub fn parse_submission(
    raw: &str,
    submitter: &Submitter,
    now: i64,
) -> Result<Community, SubmissionError> {
    let fields: Vec<&str> = raw.split('|').map(str::trim).collect();
    if fields.len() != FIELD_COUNT {
        return Err(SubmissionError::MalformedSubmission);
    }

    let (name, description, category, language, location, link) =
        (fields[0], fields[1], fields[2], fields[3], fields[4], fields[5]);

    if !link.starts_with("https://t.me/") {
        return Err(SubmissionError::InvalidLink);
    }
    if !config::is_valid_category(category) {
        return Err(SubmissionError::InvalidCategory);
    }
    if !config::is_valid_language(language) {
        return Err(SubmissionError::InvalidLanguage);
    }

    let category = category.to_lowercase();
    let language = language.to_lowercase();

    Ok(Community {
        id: None,
        name: name.to_string(),
        description: description.to_string(),
        keywords: vec![category.clone()],
        category,
        language,
        location: LocationRef::city_only(location),
        link: link.to_string(),
        members: 0,
        approved: false,
        verified_status: false,
        activity_level: "medium".to_string(),
        metrics: Metrics::default(),
        submitted_by: Some(SubmittedBy {
            user_id: submitter.user_id,
            username: submitter.username.clone(),
        }),
        created_at: now,
        updated_at: now,
    })
}

/// Insert a draft and link it to the submitter's record.
///
/// Two related writes with no transaction: if appending to the user's
/// `submittedCommunities` fails after the insert succeeded, the community
/// stands and the failure is only logged.
pub async fn persist_draft(
    communities: &CommunityRepo,
    users: &UserRepo,
    draft: &Community,
) -> Result<ObjectId> {
    let id = communities.insert(draft).await?;

    if let Some(submitter) = &draft.submitted_by {
        if let Err(e) = users.record_submission(submitter.user_id, id).await {
            warn!(
                "Community {} inserted but linking to user {} failed: {}",
                id, submitter.user_id, e
            );
        }
    }

    Ok(id)
}

#[cfg(test)]
mod tests {
    use super::*;

    const NOW: i64 = 1_700_000_000;

    fn submitter() -> Submitter {
        Submitter {
            user_id: 42,
            username: Some("abel".to_string()),
        }
    }

    #[test]
    fn test_valid_submission() {
        let raw = "Addis Coders | Learn to code | tech | English | Addis Ababa | https://t.me/addiscoders";
        let draft = parse_submission(raw, &submitter(), NOW).unwrap();

        assert_eq!(draft.name, "Addis Coders");
        assert_eq!(draft.description, "Learn to code");
        assert_eq!(draft.category, "tech");
        assert_eq!(draft.language, "english");
        assert_eq!(draft.location, LocationRef::city_only("Addis Ababa"));
        assert_eq!(draft.link, "https://t.me/addiscoders");

        // Moderation and metric defaults
        assert!(!draft.approved);
        assert!(!draft.verified_status);
        assert_eq!(draft.members, 0);
        assert_eq!(draft.keywords, vec!["tech"]);
        assert_eq!(draft.metrics, Metrics::default());
        assert_eq!(draft.activity_level, "medium");
        assert_eq!(draft.created_at, NOW);
        assert_eq!(draft.updated_at, NOW);
        assert_eq!(
            draft.submitted_by,
            Some(SubmittedBy {
                user_id: 42,
                username: Some("abel".to_string())
            })
        );
    }

    #[test]
    fn test_wrong_field_count_is_malformed() {
        let too_few = "Addis Coders | Learn to code | tech | English | Addis Ababa";
        let too_many =
            "Addis Coders | Learn to code | tech | English | Addis Ababa | https://t.me/x | extra";

        assert_eq!(
            parse_submission(too_few, &submitter(), NOW),
            Err(SubmissionError::MalformedSubmission)
        );
        assert_eq!(
            parse_submission(too_many, &submitter(), NOW),
            Err(SubmissionError::MalformedSubmission)
        );
        assert_eq!(
            parse_submission("", &submitter(), NOW),
            Err(SubmissionError::MalformedSubmission)
        );
    }

    #[test]
    fn test_link_without_scheme_is_rejected() {
        let raw = "Addis Coders | Learn to code | tech | English | Addis Ababa | t.me/addiscoders";
        assert_eq!(
            parse_submission(raw, &submitter(), NOW),
            Err(SubmissionError::InvalidLink)
        );
    }

    #[test]
    fn test_link_checked_before_category() {
        let raw = "Name | Desc | sports | English | Addis Ababa | t.me/x";
        assert_eq!(
            parse_submission(raw, &submitter(), NOW),
            Err(SubmissionError::InvalidLink)
        );
    }

    #[test]
    fn test_unknown_category_is_rejected() {
        let raw = "Name | Desc | sports | English | Addis Ababa | https://t.me/x";
        let err = parse_submission(raw, &submitter(), NOW).unwrap_err();
        assert_eq!(err, SubmissionError::InvalidCategory);
        assert!(err.user_message().contains("tech, fitness, education"));
    }

    #[test]
    fn test_unknown_language_is_rejected() {
        let raw = "Name | Desc | tech | Oromo | Addis Ababa | https://t.me/x";
        let err = parse_submission(raw, &submitter(), NOW).unwrap_err();
        assert_eq!(err, SubmissionError::InvalidLanguage);
        assert!(err.user_message().contains("english, amharic, both"));
    }

    #[test]
    fn test_category_and_language_case_insensitive() {
        let raw = "Name | Desc | TECH | AMHARIC | Gondar | https://t.me/x";
        let draft = parse_submission(raw, &submitter(), NOW).unwrap();
        assert_eq!(draft.category, "tech");
        assert_eq!(draft.language, "amharic");
    }

    #[test]
    fn test_draft_round_trips_through_storage_unchanged() {
        use mongodb::bson;

        let raw = "Addis Coders | Learn to code | tech | English | Addis Ababa | https://t.me/addiscoders";
        let draft = parse_submission(raw, &submitter(), NOW).unwrap();

        // External moderation flips the gate; every other field must
        // survive the BSON round trip untouched
        let mut doc = bson::to_document(&draft).unwrap();
        doc.insert("approved", true);

        let fetched: Community = bson::from_document(doc).unwrap();
        assert!(fetched.approved);
        assert_eq!(
            fetched,
            Community {
                approved: true,
                ..draft
            }
        );
    }

    #[test]
    fn test_fields_are_trimmed() {
        let raw = "  Name  |Desc|tech|both|  Mekelle  |https://t.me/x  ";
        let draft = parse_submission(raw, &submitter(), NOW).unwrap();
        assert_eq!(draft.name, "Name");
        assert_eq!(draft.location, LocationRef::city_only("Mekelle"));
        assert_eq!(draft.link, "https://t.me/x");
    }
}
