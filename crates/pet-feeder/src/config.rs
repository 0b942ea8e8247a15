//! Model configuration.
//!
//! Configuration is read from TOML. Every key is optional:
//!
//! ```toml
//! # What happens to the current pet when it is removed:
//! # "clear" (default), "neighbor" or "retain".
//! selection_on_remove = "neighbor"
//!
//! # Make each newly added pet the current pet.
//! select_added = true
//! ```

use std::path::Path;

use pet_feeder_core::logging::targets;
use serde::Deserialize;

use crate::error::ConfigError;

/// What the selection pointer does when the selected pet is removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionPolicy {
    /// Clear the selection.
    #[default]
    Clear,
    /// Select the pet that moved into the removed index, or the new last
    /// pet if the removed one was last. Clears when the collection empties
    /// or is reset.
    Neighbor,
    /// Keep pointing at the removed pet. Lookups with it report "not found".
    Retain,
}

/// Settings for an [`AppModel`](crate::model::AppModel).
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ModelConfig {
    /// Selection behavior when the current pet is removed.
    pub selection_on_remove: SelectionPolicy,
    /// Whether `add_new_pet` makes the new pet current.
    pub select_added: bool,
}

impl ModelConfig {
    /// Parses a configuration from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Reads and parses a TOML configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&text)?;
        tracing::debug!(target: targets::CONFIG, path = %path.display(), ?config, "loaded model config");
        Ok(config)
    }

    /// Sets the removal policy.
    pub fn with_selection_on_remove(mut self, policy: SelectionPolicy) -> Self {
        self.selection_on_remove = policy;
        self
    }

    /// Sets whether new pets become current.
    pub fn with_select_added(mut self, select_added: bool) -> Self {
        self.select_added = select_added;
        self
    }
}
