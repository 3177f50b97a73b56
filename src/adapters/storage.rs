use crate::domain::ports::Storage;
use crate::utils::error::{CurriculumError, Result};
use std::fs;
use std::path::PathBuf;

/// 以輸出根目錄為基準的本機檔案系統
#[derive(Debug, Clone)]
pub struct LocalStorage {
    base_path: PathBuf,
}

impl LocalStorage {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    fn full_path(&self, path: &str) -> PathBuf {
        self.base_path.join(path)
    }
}

impl Storage for LocalStorage {
    fn exists(&self, path: &str) -> bool {
        self.full_path(path).is_file()
    }

    fn read_to_string(&self, path: &str) -> Result<String> {
        let full_path = self.full_path(path);
        fs::read_to_string(&full_path).map_err(|e| CurriculumError::io(full_path, e))
    }

    fn create_dir_all(&self, path: &str) -> Result<()> {
        let full_path = self.full_path(path);
        fs::create_dir_all(&full_path).map_err(|e| CurriculumError::io(full_path, e))
    }

    fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
        let full_path = self.full_path(path);

        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).map_err(|e| CurriculumError::io(parent, e))?;
        }

        fs::write(&full_path, data).map_err(|e| CurriculumError::io(full_path, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_write_and_read_under_base_path() {
        let temp_dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(temp_dir.path().join("curriculum"));

        storage.create_dir_all("intro").unwrap();
        storage.write_file("intro/overview.md", "# Intro\n".as_bytes()).unwrap();

        assert!(storage.exists("intro/overview.md"));
        assert!(!storage.exists("intro/lesson.md"));
        assert!(!storage.exists("intro"));
        assert_eq!(storage.read_to_string("intro/overview.md").unwrap(), "# Intro\n");
        assert!(temp_dir.path().join("curriculum/intro/overview.md").is_file());
    }

    #[test]
    fn test_read_missing_file_reports_path() {
        let temp_dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(temp_dir.path());

        match storage.read_to_string("missing/lesson.md") {
            Err(CurriculumError::IoError { path, .. }) => {
                assert!(path.ends_with("missing/lesson.md"));
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }
}
