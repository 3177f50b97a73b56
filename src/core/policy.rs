use crate::domain::ports::Storage;
use crate::utils::error::Result;
use serde::{Deserialize, Serialize};

pub const OVERVIEW_FILE: &str = "overview.md";
pub const LESSON_FILE: &str = "lesson.md";

pub const DEFAULT_SKIP_CUTOFF: u32 = 3;
pub const DEFAULT_MIN_LESSON_CHARS: usize = 500;
pub const DEFAULT_FALLBACK_MARKER: &str = "Introduction content will";

pub fn module_file(folder: &str, name: &str) -> String {
    if folder.is_empty() {
        name.to_string()
    } else {
        format!("{}/{}", folder.trim_end_matches('/'), name)
    }
}

/// 判斷模組是否已有手寫完整內容，可以略過不重新產生
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegenerationPolicy {
    /// id 小於等於此值的模組才可能被略過
    pub skip_cutoff: u32,
    /// lesson.md 字元數必須大於此值
    pub min_lesson_chars: usize,
    pub fallback_marker: String,
}

impl Default for RegenerationPolicy {
    fn default() -> Self {
        Self {
            skip_cutoff: DEFAULT_SKIP_CUTOFF,
            min_lesson_chars: DEFAULT_MIN_LESSON_CHARS,
            fallback_marker: DEFAULT_FALLBACK_MARKER.to_string(),
        }
    }
}

impl RegenerationPolicy {
    pub fn with_skip_cutoff(mut self, skip_cutoff: u32) -> Self {
        self.skip_cutoff = skip_cutoff;
        self
    }

    pub fn is_complete_lesson(&self, content: &str) -> bool {
        content.chars().count() > self.min_lesson_chars && !content.contains(&self.fallback_marker)
    }

    pub fn should_skip<S: Storage>(&self, storage: &S, folder: &str, module_id: u32) -> Result<bool> {
        if module_id > self.skip_cutoff {
            return Ok(false);
        }

        let overview_path = module_file(folder, OVERVIEW_FILE);
        let lesson_path = module_file(folder, LESSON_FILE);

        if !storage.exists(&overview_path) || !storage.exists(&lesson_path) {
            tracing::debug!("Module {} in '{}' is missing files", module_id, folder);
            return Ok(false);
        }

        let lesson = storage.read_to_string(&lesson_path)?;
        let complete = self.is_complete_lesson(&lesson);
        tracing::debug!(
            "Module {} lesson has {} chars, complete: {}",
            module_id,
            lesson.chars().count(),
            complete
        );
        Ok(complete)
    }
}
