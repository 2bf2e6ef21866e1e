//! Configuration module for the Mender bot.
//!
//! Loads runtime configuration from environment variables and owns the
//! static catalogs (categories, languages, locations) that submissions and
//! browse keyboards are validated against.

use serde::Deserialize;
use std::env;

/// Bot running mode
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BotMode {
    Polling,
    Webhook,
}

impl Default for BotMode {
    fn default() -> Self {
        Self::Polling
    }
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    // Telegram
    pub bot_token: String,
    pub bot_mode: BotMode,
    pub webhook_url: Option<String>,
    pub webhook_port: u16,
    pub webhook_secret: Option<String>,

    // MongoDB
    pub mongodb_uri: String,
    pub mongodb_database: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Panics
    /// Panics if required environment variables are not set.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let bot_mode = env::var("BOT_MODE")
            .unwrap_or_else(|_| "polling".to_string())
            .to_lowercase();

        let bot_mode = match bot_mode.as_str() {
            "webhook" => BotMode::Webhook,
            _ => BotMode::Polling,
        };

        let webhook_url = env::var("WEBHOOK_URL").ok();

        // Validate webhook URL is set if mode is webhook
        if bot_mode == BotMode::Webhook && webhook_url.is_none() {
            panic!("WEBHOOK_URL must be set when BOT_MODE is webhook");
        }

        let webhook_port = env::var("WEBHOOK_PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(8443);

        let webhook_secret = env::var("WEBHOOK_SECRET").ok().filter(|s| !s.is_empty());

        Self {
            bot_token: env::var("BOT_TOKEN").expect("BOT_TOKEN must be set"),
            bot_mode,
            webhook_url,
            webhook_port,
            webhook_secret,
            mongodb_uri: env::var("MONGODB_URI").expect("MONGODB_URI must be set"),
            mongodb_database: env::var("MONGODB_DATABASE")
                .unwrap_or_else(|_| "eth_telegram_communities".to_string()),
        }
    }
}

/// Community categories accepted by submissions and shown in /categories.
pub const CATEGORIES: &[&str] = &[
    "tech",
    "fitness",
    "education",
    "business",
    "arts",
    "entertainment",
];

/// Languages a community can declare.
pub const LANGUAGES: &[&str] = &["english", "amharic", "both"];

/// Ethiopian cities offered by the /location keyboard.
pub const LOCATIONS: &[&str] = &[
    "Addis Ababa",
    "Bahir Dar",
    "Hawassa",
    "Dire Dawa",
    "Mekelle",
    "Gondar",
    "Adama",
];

/// Check whether `category` is a configured category (case-insensitive).
pub fn is_valid_category(category: &str) -> bool {
    CATEGORIES.iter().any(|c| c.eq_ignore_ascii_case(category))
}

/// Check whether `language` is a configured language (case-insensitive).
pub fn is_valid_language(language: &str) -> bool {
    LANGUAGES.iter().any(|l| l.eq_ignore_ascii_case(language))
}

/// Emoji shown next to a category on the browse keyboard.
pub fn category_emoji(category: &str) -> &'static str {
    match category {
        "tech" => "💻",
        "fitness" => "💪",
        "education" => "📚",
        "business" => "💼",
        "arts" => "🎨",
        "entertainment" => "🎮",
        _ => "📌",
    }
}

/// Callback-data code for a location (lowercase, spaces stripped).
///
/// Location names go through Telegram callback data, which has a 64-byte
/// limit, so buttons carry a compact code that is resolved back to the
/// display name on the way in.
pub fn location_code(location: &str) -> String {
    location
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_lowercase()
}

/// Resolve a callback code back to the configured location name.
pub fn resolve_location(code: &str) -> Option<&'static str> {
    LOCATIONS
        .iter()
        .find(|loc| location_code(loc) == code)
        .copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_membership_case_insensitive() {
        assert!(is_valid_category("tech"));
        assert!(is_valid_category("Tech"));
        assert!(is_valid_category("ENTERTAINMENT"));
        assert!(!is_valid_category("sports"));
    }

    #[test]
    fn test_language_membership_case_insensitive() {
        assert!(is_valid_language("English"));
        assert!(is_valid_language("amharic"));
        assert!(is_valid_language("BOTH"));
        assert!(!is_valid_language("oromo"));
    }

    #[test]
    fn test_location_code_round_trip() {
        for loc in LOCATIONS {
            assert_eq!(resolve_location(&location_code(loc)), Some(*loc));
        }
        assert_eq!(location_code("Addis Ababa"), "addisababa");
        assert_eq!(resolve_location("nowhere"), None);
    }

    #[test]
    fn test_category_emoji_has_default() {
        for cat in CATEGORIES {
            assert_ne!(category_emoji(cat), "📌");
        }
        assert_eq!(category_emoji("unknown"), "📌");
    }
}
