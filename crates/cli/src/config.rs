//! Optional TOML configuration for `graphdb`.
//!
//! ```toml
//! [decode]
//! max_depth = 32
//! pretty = false
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Top-level configuration, loaded via `graphdb --config graphdb.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CliConfig {
    #[serde(default)]
    pub decode: DecodeSettings,
}

/// `[decode]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DecodeSettings {
    /// Inputs nested deeper than this are rejected before decoding.
    pub max_depth: usize,
    /// Pretty-print JSON output.
    pub pretty: bool,
}

impl Default for DecodeSettings {
    fn default() -> Self {
        DecodeSettings {
            max_depth: 64,
            pretty: true,
        }
    }
}

/// Read and parse a config TOML file from `path`.
///
/// Returns a human-readable error string on failure.
pub fn read_config(path: &Path) -> Result<CliConfig, String> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("could not read '{}': {}", path.display(), e))?;

    toml::from_str(&content).map_err(|e| format!("could not parse '{}': {}", path.display(), e))
}
