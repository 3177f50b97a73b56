use crate::core::policy::{module_file, LESSON_FILE, OVERVIEW_FILE};
use crate::domain::model::GenerationOutcome;
use crate::domain::ports::Storage;
use crate::utils::error::Result;

pub struct FileWriter<'a, S: Storage> {
    storage: &'a S,
}

impl<'a, S: Storage> FileWriter<'a, S> {
    pub fn new(storage: &'a S) -> Self {
        Self { storage }
    }

    /// 建立模組目錄並依序寫入 overview.md 與 lesson.md
    ///
    /// 兩個檔案不是原子寫入：lesson.md 寫入失敗時，已寫好的 overview.md 會留在磁碟上。
    pub fn write(&self, folder: &str, overview: &str, lesson: &str) -> Result<GenerationOutcome> {
        let overview_path = module_file(folder, OVERVIEW_FILE);
        let lesson_path = module_file(folder, LESSON_FILE);

        let existed = self.storage.exists(&overview_path) || self.storage.exists(&lesson_path);

        self.storage.create_dir_all(folder)?;
        self.storage.write_file(&overview_path, overview.as_bytes())?;
        self.storage.write_file(&lesson_path, lesson.as_bytes())?;

        tracing::debug!(
            "Wrote {} ({} bytes) and {} ({} bytes)",
            overview_path,
            overview.len(),
            lesson_path,
            lesson.len()
        );

        Ok(if existed {
            GenerationOutcome::Overwritten
        } else {
            GenerationOutcome::Created
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::test_support::MockStorage;
    use crate::utils::error::CurriculumError;

    #[test]
    fn test_write_creates_both_files() {
        let storage = MockStorage::default();
        let outcome = FileWriter::new(&storage)
            .write("intro", "# Intro\n", "# Intro lesson\n")
            .unwrap();

        assert_eq!(outcome, GenerationOutcome::Created);
        assert_eq!(storage.dirs.borrow().as_slice(), ["intro".to_string()]);
        assert_eq!(storage.get_file("intro/overview.md").as_deref(), Some("# Intro\n"));
        assert_eq!(storage.get_file("intro/lesson.md").as_deref(), Some("# Intro lesson\n"));
    }

    #[test]
    fn test_write_overwrites_existing_files() {
        let storage = MockStorage::default().with_file("intro/lesson.md", "old lesson");
        let outcome = FileWriter::new(&storage)
            .write("intro", "new overview", "new lesson")
            .unwrap();

        assert_eq!(outcome, GenerationOutcome::Overwritten);
        assert_eq!(storage.get_file("intro/lesson.md").as_deref(), Some("new lesson"));
    }

    #[test]
    fn test_failed_lesson_write_leaves_overview() {
        let storage = MockStorage {
            fail_writes_to: Some("intro/lesson.md".to_string()),
            ..MockStorage::default()
        };

        let err = FileWriter::new(&storage)
            .write("intro", "overview", "lesson")
            .unwrap_err();

        assert!(matches!(err, CurriculumError::IoError { .. }));
        assert_eq!(storage.get_file("intro/overview.md").as_deref(), Some("overview"));
        assert!(storage.get_file("intro/lesson.md").is_none());
    }
}
