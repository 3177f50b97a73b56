use crate::domain::model::{Level, ModuleRecord};
use crate::domain::ports::ModuleSource;
use crate::utils::error::{CurriculumError, Result};
use crate::utils::validation::is_path_segment;
use serde::Deserialize;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// 編譯時內嵌的模組表 (Arduino 初階課程 4-20)
const INLINE_MODULES: &str = include_str!("../../content/modules.json");

#[derive(Debug, Deserialize)]
struct CurriculumDocument {
    curriculum: CurriculumSection,
}

#[derive(Debug, Deserialize)]
struct CurriculumSection {
    modules: Vec<RawModule>,
}

// 必填欄位也先用 Option 接，才能回報是哪一筆缺了哪個欄位
#[derive(Debug, Deserialize)]
struct RawModule {
    id: Option<u32>,
    title: Option<String>,
    slug: Option<String>,
    level: Option<Level>,
    duration: Option<String>,
    // 舊資料檔用 time，兩者並存時以 duration 為準
    time: Option<String>,
    overview: Option<String>,
    prerequisites: Option<Vec<String>>,
    outcomes: Option<Vec<String>>,
}

impl RawModule {
    fn into_record(self, index: usize) -> Result<ModuleRecord> {
        let id = self
            .id
            .ok_or_else(|| CurriculumError::schema(index, "id", "is missing"))?;
        let title = required_text(index, "title", self.title)?;
        let slug = required_text(index, "slug", self.slug)?;

        if !is_path_segment(&slug) {
            return Err(CurriculumError::schema(
                index,
                "slug",
                format!("'{}' is not a single path segment", slug),
            ));
        }

        Ok(ModuleRecord {
            id,
            title,
            slug,
            level: self.level,
            duration: self.duration.or(self.time),
            overview: self.overview,
            prerequisites: self.prerequisites,
            outcomes: self.outcomes,
        })
    }
}

fn required_text(index: usize, field: &str, value: Option<String>) -> Result<String> {
    match value {
        Some(text) if !text.trim().is_empty() => Ok(text),
        Some(_) => Err(CurriculumError::schema(index, field, "is empty")),
        None => Err(CurriculumError::schema(index, field, "is missing")),
    }
}

/// 解析課程 JSON 並檢查必填欄位與 id/slug 唯一性
pub fn parse_curriculum(content: &str, origin: &Path) -> Result<Vec<ModuleRecord>> {
    let document: CurriculumDocument =
        serde_json::from_str(content).map_err(|source| CurriculumError::DataParseError {
            path: origin.to_path_buf(),
            source,
        })?;

    let mut ids = HashSet::new();
    let mut slugs = HashSet::new();
    let mut records = Vec::with_capacity(document.curriculum.modules.len());

    for (index, raw) in document.curriculum.modules.into_iter().enumerate() {
        let record = raw.into_record(index)?;

        if !ids.insert(record.id) {
            return Err(CurriculumError::schema(
                index,
                "id",
                format!("duplicates id {}", record.id),
            ));
        }
        if !slugs.insert(record.slug.clone()) {
            return Err(CurriculumError::schema(
                index,
                "slug",
                format!("duplicates slug '{}'", record.slug),
            ));
        }

        records.push(record);
    }

    tracing::debug!("Parsed {} modules from {}", records.len(), origin.display());
    Ok(records)
}

#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ModuleSource for JsonFileSource {
    fn load(&self) -> Result<Vec<ModuleRecord>> {
        tracing::debug!("Reading curriculum data from {}", self.path.display());
        let content = std::fs::read_to_string(&self.path).map_err(|source| {
            CurriculumError::DataSourceError {
                path: self.path.clone(),
                source,
            }
        })?;
        parse_curriculum(&content, &self.path)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct InlineSource;

impl ModuleSource for InlineSource {
    fn load(&self) -> Result<Vec<ModuleRecord>> {
        parse_curriculum(INLINE_MODULES, Path::new("<inline>"))
    }
}
