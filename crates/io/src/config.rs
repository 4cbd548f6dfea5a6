use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use treeflat_core::FlattenConfig;

/// Seed file locations
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeedConfig {
    /// Seed computed from the full hierarchy (usually private data)
    pub primary: Option<PathBuf>,

    /// Used when `primary` does not exist
    pub fallback: Option<PathBuf>,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            primary: Some(PathBuf::from("input/starting_tree_structure.json")),
            fallback: Some(PathBuf::from("input/starting_tree_structure_example.json")),
        }
    }
}

/// Everything a run needs besides the input and output paths
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    pub tree: FlattenConfig,
    pub seed: SeedConfig,
}

impl RunConfig {
    /// Load config from a TOML file. Missing keys take their defaults.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config = Self::from_toml(&content)?;
        log::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.tree.validate()?;
        Ok(config)
    }

    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use treeflat_core::SortStrategy;

    #[test]
    fn partial_file_keeps_defaults() {
        let config = RunConfig::from_toml(
            r#"
[tree]
max_depth = 4
sort = "natural"

[tree.columns]
id = "Id"
"#,
        )
        .unwrap();

        assert_eq!(config.tree.max_depth, 4);
        assert_eq!(config.tree.sort, SortStrategy::Natural);
        assert_eq!(config.tree.columns.id, "Id");
        assert_eq!(
            config.tree.columns.parent_id,
            "Superior functional location"
        );
        assert_eq!(config.tree.deletion_value, "DLFL");
        assert_eq!(config.seed, SeedConfig::default());
    }

    #[test]
    fn default_config_round_trips_through_toml() {
        let text = RunConfig::default().to_toml().unwrap();
        assert_eq!(RunConfig::from_toml(&text).unwrap(), RunConfig::default());
    }

    #[test]
    fn invalid_values_are_rejected() {
        assert!(RunConfig::from_toml("[tree]\nmax_depth = 0\n").is_err());
        assert!(RunConfig::from_toml("[tree]\nsort = \"random\"\n").is_err());
    }
}
