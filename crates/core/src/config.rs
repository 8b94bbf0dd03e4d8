use crate::error::Result;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use smol_str::SmolStr;
use std::path::Path;

/// Key under which the globals mapping carries the builtins mapping.
pub const DEFAULT_BUILTINS_KEY: &str = "__builtins__";

static SHARED: Lazy<ScopeConfig> = Lazy::new(ScopeConfig::default);

/// Tunables for scope resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScopeConfig {
    /// Reserved globals key holding the builtins mapping.
    pub builtins_key: SmolStr,
    /// Maximum number of owners a single hierarchy walk may probe.
    /// `None` walks until the root.
    pub walk_limit: Option<usize>,
}

impl Default for ScopeConfig {
    fn default() -> Self {
        Self {
            builtins_key: SmolStr::new_static(DEFAULT_BUILTINS_KEY),
            walk_limit: None,
        }
    }
}

impl ScopeConfig {
    /// The process-wide default configuration.
    pub fn shared() -> &'static ScopeConfig {
        &SHARED
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }
}
