//! Read-only catalog of devotion, prayer, meditation, and accountability
//! content, plus inspiration items.
//!
//! ```rust
//! use sprogram::{CatalogKind, ContentCatalog, StaticCatalog};
//!
//! let catalog = StaticCatalog::embedded().expect("embedded catalog parses");
//! let topics = catalog.topics(CatalogKind::Devotions);
//! assert_eq!(topics[0].id, "stress");
//! assert!(catalog.entry(CatalogKind::Prayers, "missing").is_err());
//! ```

use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::ProgramError;

const EMBEDDED_CATALOG: &str = include_str!("../data/catalog.json");

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CatalogKind {
    Devotions,
    Prayers,
    Meditations,
    Accountability,
}

impl CatalogKind {
    pub const ALL: [CatalogKind; 4] = [
        Self::Devotions,
        Self::Prayers,
        Self::Meditations,
        Self::Accountability,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Devotions => "devotions",
            Self::Prayers => "prayers",
            Self::Meditations => "meditations",
            Self::Accountability => "accountability",
        }
    }

    /// Envelope key for a single entry response.
    pub fn entry_key(self) -> &'static str {
        match self {
            Self::Devotions => "devotion",
            Self::Prayers => "prayer",
            Self::Meditations => "meditation",
            Self::Accountability => "area",
        }
    }

    /// Envelope key for a listing response.
    pub fn list_key(self) -> &'static str {
        match self {
            Self::Accountability => "areas",
            _ => "topics",
        }
    }

    fn not_found_message(self) -> &'static str {
        match self {
            Self::Devotions => "Devotion topic not found",
            Self::Prayers => "Prayer topic not found",
            Self::Meditations => "Meditation topic not found",
            Self::Accountability => "Accountability area not found",
        }
    }

    fn describe(self, title: &str) -> String {
        match self {
            Self::Devotions => "5-minute Bible reading with prayer and reflection".to_string(),
            Self::Prayers => format!("Structured prayer using the {} model", title.to_lowercase()),
            Self::Meditations => "Scripture focus with reflection and breathing guides".to_string(),
            Self::Accountability => "Strength through scripture and truth declarations".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TopicSummary {
    pub id: String,
    pub title: String,
    pub category: String,
    pub description: String,
}

/// One catalog entry. Content beyond the identifying fields is opaque.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub id: String,
    pub title: String,
    pub category: String,
    #[serde(flatten)]
    pub content: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InspirationItem {
    pub id: u32,
    #[serde(rename = "type")]
    pub kind: String,
    pub title: String,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    pub category: String,
}

pub trait ContentCatalog: Send + Sync {
    /// Summaries in catalog order.
    fn topics(&self, kind: CatalogKind) -> Vec<TopicSummary>;

    fn entry(&self, kind: CatalogKind, id: &str) -> Result<CatalogEntry, ProgramError>;

    /// Inspiration items in a fresh random order on each call.
    fn inspiration(&self) -> Vec<InspirationItem>;
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct StaticCatalog {
    #[serde(default)]
    devotions: Vec<CatalogEntry>,
    #[serde(default)]
    prayers: Vec<CatalogEntry>,
    #[serde(default)]
    meditations: Vec<CatalogEntry>,
    #[serde(default)]
    accountability: Vec<CatalogEntry>,
    #[serde(default)]
    inspiration: Vec<InspirationItem>,
}

impl StaticCatalog {
    pub fn embedded() -> Result<Self, ProgramError> {
        Self::from_json(EMBEDDED_CATALOG)
    }

    pub fn from_json(document: &str) -> Result<Self, ProgramError> {
        serde_json::from_str(document)
            .map_err(|err| ProgramError::validation(format!("invalid catalog document: {err}")))
    }

    fn entries(&self, kind: CatalogKind) -> &[CatalogEntry] {
        match kind {
            CatalogKind::Devotions => &self.devotions,
            CatalogKind::Prayers => &self.prayers,
            CatalogKind::Meditations => &self.meditations,
            CatalogKind::Accountability => &self.accountability,
        }
    }
}

impl ContentCatalog for StaticCatalog {
    fn topics(&self, kind: CatalogKind) -> Vec<TopicSummary> {
        self.entries(kind)
            .iter()
            .map(|entry| TopicSummary {
                id: entry.id.clone(),
                title: entry.title.clone(),
                category: entry.category.clone(),
                description: kind.describe(&entry.title),
            })
            .collect()
    }

    fn entry(&self, kind: CatalogKind, id: &str) -> Result<CatalogEntry, ProgramError> {
        self.entries(kind)
            .iter()
            .find(|entry| entry.id == id)
            .cloned()
            .ok_or_else(|| ProgramError::not_found(kind.not_found_message()))
    }

    fn inspiration(&self) -> Vec<InspirationItem> {
        let mut items = self.inspiration.clone();
        items.shuffle(&mut rand::rng());
        items
    }
}
