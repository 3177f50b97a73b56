pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use adapters::storage::LocalStorage;
#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::GeneratorConfig;

pub use core::content::ContentLibrary;
pub use core::generator::CurriculumGenerator;
pub use core::policy::RegenerationPolicy;
pub use domain::model::{ContentFragment, GenerationOutcome, Level, ModuleRecord, RunSummary};
pub use utils::error::{CurriculumError, Result};
