use super::category::HelperCategory;

/// An external program that can serve one category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Helper {
    pub id: String,
    pub name: String,
    pub category: HelperCategory,
    pub commands: Vec<String>,
    pub icon: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum HelperError {
    #[error("failed to read file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to create directory {path}: {source}")]
    CreateDir {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write file {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to encode yaml for {path}: {source}")]
    Encode {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },
    #[error("invalid yaml in {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },
    #[error("no helper `{id}` is registered as {category}")]
    UnknownHelper { category: &'static str, id: String },
    #[error("failed to resolve configuration directory for helper preferences")]
    ConfigDirUnavailable,
}

/// Lookup and selection of preferred helpers.
pub trait HelperRegistry {
    /// Usable helpers of `category`, in a stable order.
    fn helpers(&self, category: HelperCategory) -> Vec<Helper>;

    fn default_helper(&self, category: HelperCategory) -> Option<Helper>;

    fn set_default(&mut self, category: HelperCategory, id: &str) -> Result<(), HelperError>;
}
