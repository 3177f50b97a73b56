use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CurriculumError {
    #[error("Failed to read curriculum data at {path}: {source}")]
    DataSourceError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse curriculum data at {path}: {source}")]
    DataParseError {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Schema error in module #{index}: field '{field}' {reason}")]
    SchemaError {
        index: usize,
        field: String,
        reason: String,
    },

    #[error("IO error at {path}: {source}")]
    IoError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Module {id} ({title}) failed: {source}")]
    ModuleError {
        id: u32,
        title: String,
        #[source]
        source: Box<CurriculumError>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    DataSource,
    Schema,
    FileSystem,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl CurriculumError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::IoError {
            path: path.into(),
            source,
        }
    }

    pub fn schema(index: usize, field: &str, reason: impl Into<String>) -> Self {
        Self::SchemaError {
            index,
            field: field.to_string(),
            reason: reason.into(),
        }
    }

    /// 包裝單一模組的失敗，保留模組 id 與標題
    pub fn for_module(self, id: u32, title: &str) -> Self {
        Self::ModuleError {
            id,
            title: title.to_string(),
            source: Box::new(self),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::DataSourceError { .. } | Self::DataParseError { .. } => ErrorCategory::DataSource,
            Self::SchemaError { .. } => ErrorCategory::Schema,
            Self::IoError { .. } => ErrorCategory::FileSystem,
            Self::ConfigError { .. } | Self::InvalidConfigValueError { .. } => {
                ErrorCategory::Configuration
            }
            Self::ModuleError { source, .. } => source.category(),
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::InvalidConfigValueError { .. } => ErrorSeverity::Medium,
            Self::ConfigError { .. }
            | Self::DataSourceError { .. }
            | Self::DataParseError { .. }
            | Self::SchemaError { .. } => ErrorSeverity::High,
            Self::IoError { .. } => ErrorSeverity::Critical,
            Self::ModuleError { source, .. } => source.severity(),
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            Self::DataSourceError { path, .. } => format!(
                "Check that {} exists and is readable, or run with --inline",
                path.display()
            ),
            Self::DataParseError { .. } => {
                "The data file must be JSON shaped like {\"curriculum\": {\"modules\": [...]}}"
                    .to_string()
            }
            Self::SchemaError { field, .. } => format!(
                "Every module needs a unique id, a title and a slug; fix '{}' in the data file",
                field
            ),
            Self::IoError { .. } => {
                "Check permissions and free disk space for the output directory".to_string()
            }
            Self::ConfigError { .. } => "Check the TOML configuration file syntax".to_string(),
            Self::InvalidConfigValueError { field, .. } => {
                format!("Correct the value of '{}' and run again", field)
            }
            Self::ModuleError { source, .. } => source.recovery_suggestion(),
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::ModuleError { id, title, source } => {
                format!("Module {} ({}): {}", id, title, source.user_friendly_message())
            }
            Self::DataSourceError { path, .. } => {
                format!("Could not read curriculum data from {}", path.display())
            }
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, CurriculumError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_module_error_keeps_inner_classification() {
        let inner = CurriculumError::io(
            "curriculum/intro/lesson.md",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        let err = inner.for_module(7, "Serial Monitor Basics");

        assert_eq!(err.category(), ErrorCategory::FileSystem);
        assert_eq!(err.severity(), ErrorSeverity::Critical);
        let message = err.user_friendly_message();
        assert!(message.contains("Module 7"));
        assert!(message.contains("Serial Monitor Basics"));
    }

    #[test]
    fn test_schema_error_message_names_field() {
        let err = CurriculumError::schema(2, "slug", "is missing");
        assert_eq!(err.to_string(), "Schema error in module #2: field 'slug' is missing");
        assert_eq!(err.severity(), ErrorSeverity::High);
    }
}
