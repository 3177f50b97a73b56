use crate::domain::model::ModuleRecord;
use crate::core::policy::RegenerationPolicy;
use crate::utils::error::Result;

pub trait Storage {
    fn exists(&self, path: &str) -> bool;
    fn read_to_string(&self, path: &str) -> Result<String>;
    fn create_dir_all(&self, path: &str) -> Result<()>;
    fn write_file(&self, path: &str, data: &[u8]) -> Result<()>;
}

pub trait ModuleSource {
    /// 依資料順序回傳所有模組，之後的流程不再重新排序
    fn load(&self) -> Result<Vec<ModuleRecord>>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceKind {
    JsonFile(String),
    Inline,
}

pub trait ConfigProvider {
    fn output_root(&self) -> &str;
    fn source(&self) -> SourceKind;
    fn use_authored_content(&self) -> bool;
    fn regeneration_policy(&self) -> RegenerationPolicy;
    fn dry_run(&self) -> bool;
}
