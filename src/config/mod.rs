#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::core::content::ContentLibrary;
use crate::core::registry::{InlineSource, JsonFileSource};
use crate::core::{ConfigProvider, ModuleRecord, ModuleSource, Result, SourceKind};

#[cfg(feature = "cli")]
pub use cli::CliConfig;
pub use toml_config::GeneratorConfig;

/// 依配置選擇的資料來源載入模組
pub fn load_modules<C: ConfigProvider + ?Sized>(config: &C) -> Result<Vec<ModuleRecord>> {
    match config.source() {
        SourceKind::JsonFile(path) => JsonFileSource::new(path).load(),
        SourceKind::Inline => InlineSource.load(),
    }
}

pub fn content_library<C: ConfigProvider + ?Sized>(config: &C) -> ContentLibrary {
    if config.use_authored_content() {
        ContentLibrary::builtin()
    } else {
        ContentLibrary::empty()
    }
}
