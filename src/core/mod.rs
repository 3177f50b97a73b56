pub mod content;
pub mod generator;
pub mod policy;
pub mod registry;
pub mod render;
pub mod writer;

#[cfg(test)]
pub(crate) mod test_support;

pub use crate::domain::model::{ContentFragment, GenerationOutcome, ModuleRecord, RunSummary};
pub use crate::domain::ports::{ConfigProvider, ModuleSource, SourceKind, Storage};
pub use crate::utils::error::Result;
