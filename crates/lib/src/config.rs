use camino::{Utf8Path, Utf8PathBuf};
use serde::Deserialize;
use tracing::warn;

use crate::metadata::MetadataFormat;

pub const DEFAULT_PER_PAGE: usize = 10;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("Path is non-UTF-8: {0}")]
    NonUtf8Path(#[from] camino::FromPathBufError),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl From<&str> for SortOrder {
    fn from(name: &str) -> Self {
        match name {
            "asc" => SortOrder::Asc,
            "desc" => SortOrder::Desc,
            unknown => {
                warn!("Unknown sort order {unknown:?}, using desc");
                SortOrder::Desc
            }
        }
    }
}

impl From<String> for SortOrder {
    fn from(name: String) -> Self {
        name.as_str().into()
    }
}

fn default_true() -> bool {
    true
}

fn default_per_page() -> usize {
    DEFAULT_PER_PAGE
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogConfig {
    pub source_directory: Utf8PathBuf,
    #[serde(default = "default_true")]
    pub cache_enabled: bool,
    #[serde(default)]
    pub metadata_format: MetadataFormat,
    #[serde(default)]
    pub sort_order: SortOrder,
    #[serde(default = "default_per_page")]
    pub default_per_page: usize,
}

fn absolute(path: &Utf8Path) -> Result<Utf8PathBuf, ConfigError> {
    let path = std::path::absolute(path.as_std_path())?;
    Ok(Utf8PathBuf::try_from(path)?)
}

impl BlogConfig {
    /// Default configuration for `source_directory`, made absolute against
    /// the current directory. The directory does not need to exist.
    pub fn new(source_directory: impl AsRef<Utf8Path>) -> Result<Self, ConfigError> {
        Ok(BlogConfig {
            source_directory: absolute(source_directory.as_ref())?,
            cache_enabled: true,
            metadata_format: MetadataFormat::default(),
            sort_order: SortOrder::default(),
            default_per_page: DEFAULT_PER_PAGE,
        })
    }

    #[must_use]
    pub fn with_cache_enabled(mut self, cache_enabled: bool) -> Self {
        self.cache_enabled = cache_enabled;
        self
    }

    #[must_use]
    pub fn with_metadata_format(mut self, metadata_format: MetadataFormat) -> Self {
        self.metadata_format = metadata_format;
        self
    }

    #[must_use]
    pub fn with_sort_order(mut self, sort_order: SortOrder) -> Self {
        self.sort_order = sort_order;
        self
    }

    #[must_use]
    pub fn with_default_per_page(mut self, default_per_page: usize) -> Self {
        self.default_per_page = if default_per_page == 0 {
            DEFAULT_PER_PAGE
        } else {
            default_per_page
        };
        self
    }

    /// Parses YAML configuration. A relative `sourceDirectory` is resolved
    /// against `base`.
    pub fn from_yaml_str(yaml: &str, base: &Utf8Path) -> Result<Self, ConfigError> {
        let mut config: BlogConfig = serde_yaml::from_str(yaml)?;
        config.source_directory = absolute(&base.join(&config.source_directory))?;
        let default_per_page = config.default_per_page;
        Ok(config.with_default_per_page(default_per_page))
    }

    /// Loads a YAML config file; a relative `sourceDirectory` is taken
    /// relative to the file's own directory.
    pub fn from_yaml_path(path: &Utf8Path) -> Result<Self, ConfigError> {
        let yaml = std::fs::read_to_string(path)?;
        let base = path.parent().unwrap_or(Utf8Path::new("."));
        Self::from_yaml_str(&yaml, base)
    }
}
