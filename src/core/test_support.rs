//! In-memory storage shared by unit tests

use crate::domain::ports::Storage;
use crate::utils::error::{CurriculumError, Result};
use std::cell::RefCell;
use std::collections::HashMap;

#[derive(Default)]
pub(crate) struct MockStorage {
    pub files: RefCell<HashMap<String, Vec<u8>>>,
    pub dirs: RefCell<Vec<String>>,
    pub fail_writes_to: Option<String>,
}

impl MockStorage {
    pub fn with_file(self, path: &str, content: &str) -> Self {
        self.files
            .borrow_mut()
            .insert(path.to_string(), content.as_bytes().to_vec());
        self
    }

    pub fn get_file(&self, path: &str) -> Option<String> {
        self.files
            .borrow()
            .get(path)
            .map(|data| String::from_utf8_lossy(data).into_owned())
    }
}

impl Storage for MockStorage {
    fn exists(&self, path: &str) -> bool {
        self.files.borrow().contains_key(path)
    }

    fn read_to_string(&self, path: &str) -> Result<String> {
        self.get_file(path).ok_or_else(|| {
            CurriculumError::io(
                path,
                std::io::Error::new(std::io::ErrorKind::NotFound, "file not found"),
            )
        })
    }

    fn create_dir_all(&self, path: &str) -> Result<()> {
        self.dirs.borrow_mut().push(path.to_string());
        Ok(())
    }

    fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
        if self.fail_writes_to.as_deref() == Some(path) {
            return Err(CurriculumError::io(
                path,
                std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only"),
            ));
        }
        self.files.borrow_mut().insert(path.to_string(), data.to_vec());
        Ok(())
    }
}
