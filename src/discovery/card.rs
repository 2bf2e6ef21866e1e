//! Presentation-ready community summaries.

use crate::database::Community;
use crate::utils::{capitalize_first, format_thousands, html_escape};

/// A community shaped for display: formatted member count, normalized
/// location, and the join URL for the inline button.
#[derive(Debug, Clone, PartialEq)]
pub struct CommunityCard {
    pub name: String,
    pub description: String,
    pub member_count: String,
    pub language: String,
    pub location: String,
    pub category: String,
    pub join_url: String,
}

impl CommunityCard {
    pub fn new(community: &Community) -> Self {
        Self {
            name: community.name.clone(),
            description: community.description.clone(),
            member_count: format_thousands(community.members),
            language: capitalize_first(&community.language),
            location: community.city().to_string(),
            category: capitalize_first(&community.category),
            join_url: community.link.clone(),
        }
    }

    /// Render the card as an HTML message body.
    ///
    /// Search results show both location and category; category browsing
    /// drops the category line (it is implied), location browsing drops the
    /// location line.
    pub fn render(&self, show_location: bool, show_category: bool) -> String {
        let mut text = format!(
            "📱 <b>{}</b>\n📝 {}\n👥 Members: {}\n🗣️ Language: {}",
            html_escape(&self.name),
            html_escape(&self.description),
            self.member_count,
            html_escape(&self.language),
        );

        if show_location {
            text.push_str(&format!("\n📍 Location: {}", html_escape(&self.location)));
        }
        if show_category {
            text.push_str(&format!("\n🏷️ Category: {}", html_escape(&self.category)));
        }

        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::{LocationRef, Metrics};

    fn community() -> Community {
        Community {
            id: None,
            name: "Addis <Coders>".into(),
            description: "Learn to code".into(),
            category: "tech".into(),
            language: "english".into(),
            location: LocationRef::Legacy("Addis Ababa".into()),
            link: "https://t.me/addiscoders".into(),
            keywords: vec!["tech".into()],
            members: 1200,
            approved: true,
            verified_status: false,
            activity_level: "medium".into(),
            metrics: Metrics::default(),
            submitted_by: None,
            created_at: 0,
            updated_at: 0,
        }
    }

    #[test]
    fn test_card_shapes_presentation_fields() {
        let card = CommunityCard::new(&community());
        assert_eq!(card.member_count, "1,200");
        assert_eq!(card.language, "English");
        assert_eq!(card.category, "Tech");
        assert_eq!(card.location, "Addis Ababa");
        assert_eq!(card.join_url, "https://t.me/addiscoders");
    }

    #[test]
    fn test_render_escapes_html_and_toggles_lines() {
        let card = CommunityCard::new(&community());

        let full = card.render(true, true);
        assert!(full.contains("Addis &lt;Coders&gt;"));
        assert!(full.contains("📍 Location: Addis Ababa"));
        assert!(full.contains("🏷️ Category: Tech"));

        let browse = card.render(true, false);
        assert!(!browse.contains("🏷️ Category"));

        let by_city = card.render(false, true);
        assert!(!by_city.contains("📍 Location"));
    }
}
