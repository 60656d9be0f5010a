//! Fixed vocabularies mapping public keys to provider constants.

use std::fmt;

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

/// A provider constant: either a string token or a numeric code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum VocabValue {
    Number(i64),
    Text(String),
}

impl VocabValue {
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }
}

impl fmt::Display for VocabValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

/// Ordered mapping of canonical key to provider value.
///
/// Serializes as a JSON object in declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Vocabulary {
    entries: Vec<(String, VocabValue)>,
}

impl Vocabulary {
    pub fn new(entries: Vec<(String, VocabValue)>) -> Self {
        Self { entries }
    }

    /// Vocabulary whose values are the keys themselves.
    pub fn from_keys(keys: &[&str]) -> Self {
        keys.iter()
            .map(|k| (k.to_string(), VocabValue::text(*k)))
            .collect()
    }

    pub fn get(&self, key: &str) -> Option<&VocabValue> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn values(&self) -> impl Iterator<Item = &VocabValue> {
        self.entries.iter().map(|(_, v)| v)
    }
}

impl FromIterator<(String, VocabValue)> for Vocabulary {
    fn from_iter<I: IntoIterator<Item = (String, VocabValue)>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl Serialize for Vocabulary {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

/// The provider vocabularies, loaded once at startup and shared read-only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vocabularies {
    pub collection: Vocabulary,
    pub category: Vocabulary,
    pub sort: Vocabulary,
    pub price: Vocabulary,
}

impl Vocabularies {
    /// Constants exposed by the Google Play scraper.
    pub fn google_play() -> Self {
        Self {
            collection: Vocabulary::from_keys(COLLECTIONS),
            category: Vocabulary::from_keys(CATEGORIES),
            sort: Vocabulary::new(
                SORT_ORDERS
                    .iter()
                    .map(|(k, v)| (k.to_string(), VocabValue::Number(*v)))
                    .collect(),
            ),
            price: Vocabulary::from_keys(PRICES),
        }
    }
}

impl Default for Vocabularies {
    fn default() -> Self {
        Self::google_play()
    }
}

/// Collection used by list browsing when none is requested.
pub const DEFAULT_COLLECTION: &str = "TOP_FREE";

const COLLECTIONS: &[&str] = &["TOP_FREE", "TOP_PAID", "GROSSING"];

const SORT_ORDERS: &[(&str, i64)] = &[("NEWEST", 2), ("RATING", 3), ("HELPFULNESS", 1)];

const PRICES: &[&str] = &["all", "free", "paid"];

const CATEGORIES: &[&str] = &[
    "APPLICATION",
    "ANDROID_WEAR",
    "ART_AND_DESIGN",
    "AUTO_AND_VEHICLES",
    "BEAUTY",
    "BOOKS_AND_REFERENCE",
    "BUSINESS",
    "COMICS",
    "COMMUNICATION",
    "DATING",
    "EDUCATION",
    "ENTERTAINMENT",
    "EVENTS",
    "FINANCE",
    "FOOD_AND_DRINK",
    "HEALTH_AND_FITNESS",
    "HOUSE_AND_HOME",
    "LIBRARIES_AND_DEMO",
    "LIFESTYLE",
    "MAPS_AND_NAVIGATION",
    "MEDICAL",
    "MUSIC_AND_AUDIO",
    "NEWS_AND_MAGAZINES",
    "PARENTING",
    "PERSONALIZATION",
    "PHOTOGRAPHY",
    "PRODUCTIVITY",
    "SHOPPING",
    "SOCIAL",
    "SPORTS",
    "TOOLS",
    "TRAVEL_AND_LOCAL",
    "VIDEO_PLAYERS",
    "WATCH_FACE",
    "WEATHER",
    "GAME",
    "GAME_ACTION",
    "GAME_ADVENTURE",
    "GAME_ARCADE",
    "GAME_BOARD",
    "GAME_CARD",
    "GAME_CASINO",
    "GAME_CASUAL",
    "GAME_EDUCATIONAL",
    "GAME_MUSIC",
    "GAME_PUZZLE",
    "GAME_RACING",
    "GAME_ROLE_PLAYING",
    "GAME_SIMULATION",
    "GAME_SPORTS",
    "GAME_STRATEGY",
    "GAME_TRIVIA",
    "GAME_WORD",
    "FAMILY",
];
