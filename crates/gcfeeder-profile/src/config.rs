//! Profile store configuration

use std::path::PathBuf;
use std::sync::Arc;

use gcfeeder_inputs::ReloadFlag;

/// Profile store configuration
#[derive(Debug, Clone)]
pub struct ProfileStoreConfig {
    /// Location of the store document
    pub path: PathBuf,
    /// Base URL the `$schema` reference is built from
    pub schema_base_url: Option<String>,
    /// Schema path relative to [`schema_base_url`](Self::schema_base_url)
    pub schema_rel_path: Option<String>,
    /// Write to a temporary file, then rename over the target
    pub atomic_writes: bool,
    /// Flag raised after every successful save or load
    pub reload: Option<Arc<ReloadFlag>>,
}

impl Default for ProfileStoreConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("config.json"),
            schema_base_url: None,
            schema_rel_path: None,
            atomic_writes: true,
            reload: None,
        }
    }
}

impl ProfileStoreConfig {
    /// Create a configuration for the document at `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            ..Default::default()
        }
    }

    /// Set the `$schema` base URL and relative path
    #[must_use]
    pub fn with_schema_url(mut self, base_url: impl Into<String>, rel_path: impl Into<String>) -> Self {
        self.schema_base_url = Some(base_url.into());
        self.schema_rel_path = Some(rel_path.into());
        self
    }

    /// Set atomic writes option
    #[must_use]
    pub fn with_atomic_writes(mut self, enabled: bool) -> Self {
        self.atomic_writes = enabled;
        self
    }

    /// Share a reload flag with the feeder
    #[must_use]
    pub fn with_reload_flag(mut self, flag: Arc<ReloadFlag>) -> Self {
        self.reload = Some(flag);
        self
    }

    /// `<base>/<rel>`, if both parts are configured
    pub fn schema_url(&self) -> Option<String> {
        match (&self.schema_base_url, &self.schema_rel_path) {
            (Some(base), Some(rel)) => Some(format!("{base}/{rel}")),
            _ => None,
        }
    }
}
