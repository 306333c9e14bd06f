use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Inspection categories with a dedicated prompt and evidence block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    General,
    RefugioAnden,
    Senal,
}

impl Category {
    /// Categories that must be saved before table extraction can run
    pub const BASELINE: [Category; 3] = [Category::General, Category::RefugioAnden, Category::Senal];

    pub fn key(&self) -> &'static str {
        match self {
            Category::General => "general",
            Category::RefugioAnden => "refugio_anden",
            Category::Senal => "senal",
        }
    }

    /// Parse a category key; unknown keys are not an error at the call sites,
    /// they simply have no dedicated prompt or evidence block.
    pub fn from_key(key: &str) -> Option<Self> {
        match key.trim() {
            "general" => Some(Category::General),
            "refugio_anden" => Some(Category::RefugioAnden),
            "senal" => Some(Category::Senal),
            _ => None,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// A saved description together with the images it describes
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisEntry {
    #[serde(default)]
    pub description: String,

    /// Drive file ids, in display order
    #[serde(default, deserialize_with = "nullable_ids")]
    pub image_ids: Vec<String>,
}

impl AnalysisEntry {
    pub fn new(description: impl Into<String>, image_ids: Vec<String>) -> Self {
        Self {
            description: description.into(),
            image_ids,
        }
    }
}

fn nullable_ids<'de, D>(deserializer: D) -> std::result::Result<Vec<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Category key -> saved analysis. Ordered so serialized drafts are stable.
pub type AnalysisMap = BTreeMap<String, AnalysisEntry>;

/// Server-issued identifier of an analysis draft
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DraftId(pub Uuid);

impl DraftId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for DraftId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for DraftId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for DraftId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Uuid::parse_str(s.trim()).map(DraftId)
    }
}

/// Analysis context owned by one caller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Draft {
    pub id: DraftId,
    pub created_at: DateTime<Utc>,
    pub analisis: AnalysisMap,
}

impl Draft {
    pub fn new() -> Self {
        Self {
            id: DraftId::new(),
            created_at: Utc::now(),
            analisis: AnalysisMap::new(),
        }
    }

    /// Replace the entry for one category, leaving the others untouched
    pub fn save(&mut self, category: impl Into<String>, entry: AnalysisEntry) {
        self.analisis.insert(category.into(), entry);
    }
}

impl Default for Draft {
    fn default() -> Self {
        Self::new()
    }
}

/// Overlay saved entries on top of AI-provided ones. Saved entries win on
/// key collision; keys only present in `base` are kept.
pub fn merge_saved(base: &AnalysisMap, saved: &AnalysisMap) -> AnalysisMap {
    let mut merged = base.clone();
    for (key, entry) in saved {
        merged.insert(key.clone(), entry.clone());
    }
    merged
}

/// Baseline categories absent from `analysis`
pub fn missing_baseline(analysis: &AnalysisMap) -> Vec<Category> {
    Category::BASELINE
        .iter()
        .copied()
        .filter(|c| !analysis.contains_key(c.key()))
        .collect()
}
