use crate::config::toml_config::{GeneratorConfig, DEFAULT_DATA_PATH, DEFAULT_OUTPUT_ROOT};
use crate::core::policy::RegenerationPolicy;
use crate::core::{ConfigProvider, SourceKind};
use crate::utils::error::Result;
use crate::utils::validation::{validate_path, Validate};
use clap::Parser;

#[derive(Debug, Clone, Default, Parser)]
#[command(name = "curriculum-gen")]
#[command(about = "Generate overview.md and lesson.md for every Arduino curriculum module")]
pub struct CliConfig {
    /// Path to a TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Curriculum data file (JSON with curriculum.modules)
    #[arg(long, conflicts_with = "inline")]
    pub data: Option<String>,

    /// Use the module table compiled into the binary
    #[arg(long)]
    pub inline: bool,

    /// Directory that receives one folder per module slug
    #[arg(long)]
    pub output_root: Option<String>,

    /// Highest module id that may be skipped when already complete
    #[arg(long)]
    pub skip_cutoff: Option<u32>,

    /// Always use the generic template instead of built-in authored content
    #[arg(long)]
    pub no_authored_content: bool,

    /// Show what would be generated without writing files
    #[arg(long)]
    pub dry_run: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl CliConfig {
    /// 命令列參數覆蓋 TOML 設定
    pub fn apply_overrides(&self, config: &mut GeneratorConfig) {
        if let Some(data) = &self.data {
            config.source.r#type = "json".to_string();
            config.source.path = data.clone();
        }
        if self.inline {
            config.source.r#type = "inline".to_string();
        }
        if let Some(output_root) = &self.output_root {
            config.generator.output_root = output_root.clone();
        }
        if let Some(skip_cutoff) = self.skip_cutoff {
            config.regeneration.skip_cutoff = skip_cutoff;
        }
        if self.no_authored_content {
            config.content.authored = false;
        }
        if self.dry_run {
            config.generator.dry_run = true;
        }
    }
}

impl ConfigProvider for CliConfig {
    fn output_root(&self) -> &str {
        self.output_root.as_deref().unwrap_or(DEFAULT_OUTPUT_ROOT)
    }

    fn source(&self) -> SourceKind {
        if self.inline {
            SourceKind::Inline
        } else {
            SourceKind::JsonFile(
                self.data
                    .clone()
                    .unwrap_or_else(|| DEFAULT_DATA_PATH.to_string()),
            )
        }
    }

    fn use_authored_content(&self) -> bool {
        !self.no_authored_content
    }

    fn regeneration_policy(&self) -> RegenerationPolicy {
        match self.skip_cutoff {
            Some(cutoff) => RegenerationPolicy::default().with_skip_cutoff(cutoff),
            None => RegenerationPolicy::default(),
        }
    }

    fn dry_run(&self) -> bool {
        self.dry_run
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_path("output_root", self.output_root())?;
        if let SourceKind::JsonFile(path) = self.source() {
            validate_path("data", &path)?;
        }
        if let Some(config) = &self.config {
            validate_path("config", config)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_arguments_use_defaults() {
        let config = CliConfig::try_parse_from(["curriculum-gen"]).unwrap();

        assert_eq!(config.output_root(), "curriculum");
        assert_eq!(
            config.source(),
            SourceKind::JsonFile("curriculum/curriculum-data.json".to_string())
        );
        assert!(config.use_authored_content());
        assert_eq!(config.regeneration_policy().skip_cutoff, 3);
        assert!(!config.dry_run());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_flags_select_inline_source_and_cutoff() {
        let config = CliConfig::try_parse_from([
            "curriculum-gen",
            "--inline",
            "--skip-cutoff",
            "5",
            "--no-authored-content",
        ])
        .unwrap();

        assert_eq!(config.source(), SourceKind::Inline);
        assert_eq!(config.regeneration_policy().skip_cutoff, 5);
        assert!(!config.use_authored_content());
    }

    #[test]
    fn test_data_conflicts_with_inline() {
        assert!(CliConfig::try_parse_from(["curriculum-gen", "--inline", "--data", "x.json"]).is_err());
    }

    #[test]
    fn test_overrides_win_over_file_values() {
        let mut file_config = GeneratorConfig::from_toml_str(
            "[generator]\noutput_root = \"from-file\"\n[regeneration]\nskip_cutoff = 9\n",
        )
        .unwrap();
        let cli = CliConfig::try_parse_from(["curriculum-gen", "--skip-cutoff", "2", "--dry-run"]).unwrap();

        cli.apply_overrides(&mut file_config);

        assert_eq!(file_config.output_root(), "from-file");
        assert_eq!(file_config.regeneration_policy().skip_cutoff, 2);
        assert!(file_config.dry_run());
    }
}
