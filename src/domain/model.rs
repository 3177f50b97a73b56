use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Level {
    Beginner,
    Intermediate,
    Advanced,
    Other(String),
}

impl From<String> for Level {
    fn from(value: String) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "beginner" => Level::Beginner,
            "intermediate" => Level::Intermediate,
            "advanced" => Level::Advanced,
            _ => Level::Other(value),
        }
    }
}

impl From<&str> for Level {
    fn from(value: &str) -> Self {
        Level::from(value.to_string())
    }
}

impl From<Level> for String {
    fn from(level: Level) -> Self {
        level.to_string()
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Level::Beginner => f.write_str("Beginner"),
            Level::Intermediate => f.write_str("Intermediate"),
            Level::Advanced => f.write_str("Advanced"),
            Level::Other(other) => f.write_str(other),
        }
    }
}

/// 一個課程模組的中繼資料
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModuleRecord {
    pub id: u32,
    pub title: String,
    pub slug: String,
    pub level: Option<Level>,
    pub duration: Option<String>,
    pub overview: Option<String>,
    /// `None` 表示資料中沒有此欄位，`Some(vec![])` 表示明確為空
    pub prerequisites: Option<Vec<String>>,
    pub outcomes: Option<Vec<String>>,
}

impl ModuleRecord {
    pub fn new(id: u32, title: impl Into<String>, slug: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            slug: slug.into(),
            level: None,
            duration: None,
            overview: None,
            prerequisites: None,
            outcomes: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentFragment {
    pub components: Vec<String>,
    pub theory: String,
    pub code: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationOutcome {
    Created,
    Overwritten,
    Skipped,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub created: usize,
    pub overwritten: usize,
    pub skipped: usize,
    pub total: usize,
}

impl RunSummary {
    pub fn record(&mut self, outcome: GenerationOutcome) {
        match outcome {
            GenerationOutcome::Created => self.created += 1,
            GenerationOutcome::Overwritten => self.overwritten += 1,
            GenerationOutcome::Skipped => self.skipped += 1,
        }
        self.total += 1;
    }

    pub fn created_or_updated(&self) -> usize {
        self.created + self.overwritten
    }
}
