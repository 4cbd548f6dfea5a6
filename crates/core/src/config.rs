use crate::error::{FlattenError, Result};
use serde::{Deserialize, Serialize};

/// Separator placed between ids in the `MaterialisedPath` column
pub const PATH_SEPARATOR: &str = " > ";

/// Description given to nodes whose ancestry could not be resolved
pub const ORPHAN_DESCRIPTION: &str = "(Orphan node)";

/// Names of the input columns the flattener reads
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnConfig {
    /// Primary key column
    pub id: String,

    /// Node description column
    pub description: String,

    /// Parent id column (foreign key into the same table)
    pub parent_id: String,

    /// Column holding the deletion status
    pub deletion_flag: String,
}

impl Default for ColumnConfig {
    fn default() -> Self {
        // Field names of the standard English SAP functional location export
        Self {
            id: "Functional Location".to_string(),
            description: "Description of functional location".to_string(),
            parent_id: "Superior functional location".to_string(),
            deletion_flag: "System status".to_string(),
        }
    }
}

/// How the output rows are ordered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortStrategy {
    /// Plain string ordering of the joined path ("R > C1 > G1").
    /// Ids with different digit counts sort lexicographically ("10" < "9").
    #[default]
    JoinedPath,

    /// Depth-first order comparing path segments one by one with a
    /// numeric-aware comparison ("9" < "10"). Ids may contain the separator.
    Natural,
}

/// Configuration for flattening a hierarchy
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlattenConfig {
    /// Input column names
    pub columns: ColumnConfig,

    /// Deletion status value marking a deleted node
    pub deletion_value: String,

    /// Deepest level that gets its own pair of level columns. Also sets the
    /// resolver pass cap to `2 * max_depth`.
    pub max_depth: usize,

    /// Output row ordering
    pub sort: SortStrategy,
}

impl Default for FlattenConfig {
    fn default() -> Self {
        Self {
            columns: ColumnConfig::default(),
            deletion_value: "DLFL".to_string(),
            max_depth: 12,
            sort: SortStrategy::default(),
        }
    }
}

impl FlattenConfig {
    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.max_depth == 0 {
            return Err(FlattenError::invalid_config("max_depth must be > 0"));
        }

        let columns = [
            ("id", &self.columns.id),
            ("description", &self.columns.description),
            ("parent_id", &self.columns.parent_id),
            ("deletion_flag", &self.columns.deletion_flag),
        ];
        for (name, value) in columns {
            if value.trim().is_empty() {
                return Err(FlattenError::invalid_config(format!(
                    "column name for {name} must not be empty"
                )));
            }
        }

        if self.columns.id == self.columns.parent_id {
            return Err(FlattenError::invalid_config(format!(
                "id and parent_id columns must differ (both are {:?})",
                self.columns.id
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_valid() {
        let config = FlattenConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.max_depth, 12);
        assert_eq!(config.deletion_value, "DLFL");
    }

    #[test]
    fn test_config_validation() {
        let mut config = FlattenConfig {
            max_depth: 0,
            ..FlattenConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(FlattenError::InvalidConfig(_))
        ));

        config.max_depth = 3;
        config.columns.parent_id = config.columns.id.clone();
        assert!(config.validate().is_err());

        config.columns.parent_id = "Parent".to_string();
        config.columns.description = "  ".to_string();
        assert!(config.validate().is_err());

        config.columns.description = "Desc".to_string();
        assert!(config.validate().is_ok());
    }
}
