use crate::core::policy::RegenerationPolicy;
use crate::core::{ConfigProvider, SourceKind};
use crate::utils::error::{CurriculumError, Result};
use crate::utils::validation::{
    validate_non_empty_string, validate_path, validate_positive_number, Validate,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_OUTPUT_ROOT: &str = "curriculum";
pub const DEFAULT_DATA_PATH: &str = "curriculum/curriculum-data.json";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    pub generator: GeneratorSection,
    pub source: SourceConfig,
    pub content: ContentConfig,
    pub regeneration: RegenerationPolicy,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorSection {
    pub output_root: String,
    pub dry_run: bool,
}

impl Default for GeneratorSection {
    fn default() -> Self {
        Self {
            output_root: DEFAULT_OUTPUT_ROOT.to_string(),
            dry_run: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    /// "json" 或 "inline"
    pub r#type: String,
    pub path: String,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            r#type: "json".to_string(),
            path: DEFAULT_DATA_PATH.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentConfig {
    /// 是否使用內建的手寫模組內容
    pub authored: bool,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self { authored: true }
    }
}

impl GeneratorConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        // 讀不到配置檔屬於配置錯誤，不是輸出目錄的檔案系統錯誤
        let content =
            std::fs::read_to_string(path).map_err(|e| CurriculumError::ConfigError {
                message: format!("Cannot read config file {}: {}", path.display(), e),
            })?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| CurriculumError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${CURRICULUM_ROOT})，未設定的變數保留原樣
    fn substitute_env_vars(content: &str) -> String {
        use regex::Regex;
        use std::sync::OnceLock;

        static ENV_VAR: OnceLock<Regex> = OnceLock::new();
        let re = ENV_VAR.get_or_init(|| Regex::new(r"\$\{([^}]+)\}").unwrap());

        re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        })
        .into_owned()
    }

    pub fn validate_config(&self) -> Result<()> {
        validate_path("generator.output_root", &self.generator.output_root)?;

        match self.source.r#type.as_str() {
            "json" => validate_path("source.path", &self.source.path)?,
            "inline" => {}
            other => {
                return Err(CurriculumError::InvalidConfigValueError {
                    field: "source.type".to_string(),
                    value: other.to_string(),
                    reason: "Supported source types: json, inline".to_string(),
                })
            }
        }

        validate_positive_number(
            "regeneration.min_lesson_chars",
            self.regeneration.min_lesson_chars,
            1,
        )?;
        validate_non_empty_string(
            "regeneration.fallback_marker",
            &self.regeneration.fallback_marker,
        )?;

        Ok(())
    }
}

impl ConfigProvider for GeneratorConfig {
    fn output_root(&self) -> &str {
        &self.generator.output_root
    }

    fn source(&self) -> SourceKind {
        if self.source.r#type == "inline" {
            SourceKind::Inline
        } else {
            SourceKind::JsonFile(self.source.path.clone())
        }
    }

    fn use_authored_content(&self) -> bool {
        self.content.authored
    }

    fn regeneration_policy(&self) -> RegenerationPolicy {
        self.regeneration.clone()
    }

    fn dry_run(&self) -> bool {
        self.generator.dry_run
    }
}

impl Validate for GeneratorConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
