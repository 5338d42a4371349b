//! Column spec: the four static tables driving the reshape.
//!
//! A [`ColumnSpec`] is built once (from JSON or [`ColumnSpec::default_recipe`]),
//! validated, and then shared read-only by every file the pipeline touches.
//!
//! ```json
//! {
//!   "drop_columns": ["[SortByZone]"],
//!   "renames": { "[v__SHOP]": "[NberShopActivity]" },
//!   "new_columns": ["[NberNoShopActivity]"],
//!   "column_order": ["[IsGrandTotalRowTotal]", "[NberShopActivity]", "[NberNoShopActivity]"]
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{ConfigError, ConfigResult};

/// Column flagging aggregate rows in SFS exports
pub const DEFAULT_INDICATOR_COLUMN: &str = "[IsGrandTotalRowTotal]";

/// Default directory scanned for input files
pub const DEFAULT_INPUT_DIR: &str = "inputs";

/// Default directory receiving reshaped files
pub const DEFAULT_OUTPUT_DIR: &str = "outputs";

/// The four column artifacts plus the row-filter indicator.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnSpec {
    /// Columns removed before renaming
    pub drop_columns: Vec<String>,
    /// Old name -> new name, applied in place
    pub renames: BTreeMap<String, String>,
    /// Placeholder columns, all empty
    pub new_columns: Vec<String>,
    /// Exact exported header
    pub column_order: Vec<String>,
    /// Rows where this column is true are removed
    pub indicator_column: String,
}

/// On-disk shape. Every artifact is optional here so that an absent key
/// surfaces as [`ConfigError::MissingArtifact`].
#[derive(Debug, Deserialize)]
struct RawColumnSpec {
    drop_columns: Option<Vec<String>>,
    renames: Option<BTreeMap<String, String>>,
    new_columns: Option<Vec<String>>,
    column_order: Option<Vec<String>>,
    #[serde(default = "default_indicator_column")]
    indicator_column: String,
}

fn default_indicator_column() -> String {
    DEFAULT_INDICATOR_COLUMN.to_string()
}

impl TryFrom<RawColumnSpec> for ColumnSpec {
    type Error = ConfigError;

    fn try_from(raw: RawColumnSpec) -> ConfigResult<Self> {
        let spec = ColumnSpec {
            drop_columns: raw.drop_columns.ok_or(ConfigError::MissingArtifact("drop_columns"))?,
            renames: raw.renames.ok_or(ConfigError::MissingArtifact("renames"))?,
            new_columns: raw.new_columns.ok_or(ConfigError::MissingArtifact("new_columns"))?,
            column_order: raw.column_order.ok_or(ConfigError::MissingArtifact("column_order"))?,
            indicator_column: raw.indicator_column,
        };
        spec.validate()?;
        Ok(spec)
    }
}

impl ColumnSpec {
    /// Parse and validate a spec from a JSON string
    pub fn from_json(json: &str) -> ConfigResult<Self> {
        let raw: RawColumnSpec = serde_json::from_str(json)?;
        raw.try_into()
    }

    /// Load and validate a spec from a JSON file
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        Self::from_json(&content)
    }

    /// Serialize to pretty JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Reject specs that would break column-name uniqueness.
    ///
    /// Checked before the first file so a bad spec never produces partial output.
    pub fn validate(&self) -> ConfigResult<()> {
        ensure_unique("drop_columns", self.drop_columns.iter())?;
        ensure_unique("renames", self.renames.values())?;
        ensure_unique("new_columns", self.new_columns.iter())?;
        ensure_unique("column_order", self.column_order.iter())?;
        Ok(())
    }

    /// Recipe for SFS histo exports (site activity by zone / sub zone / affiliate).
    ///
    /// Geography columns keep their source names. The placeholders are
    /// inserted but not part of the exported layout.
    pub fn default_recipe() -> Self {
        let renames = BTreeMap::from([("[v__SHOP]".to_string(), "[NberShopActivity]".to_string())]);

        let activities = ["Shop", "FoodServices", "HotBeverage", "CarServices", "CarWash", "Services"];
        let new_columns = activities
            .iter()
            .flat_map(|&a| {
                // "Carwash" is lower-case in the NotDeclared columns
                let nd = if a == "CarWash" { "Carwash" } else { a };
                [
                    format!("[NberNo{}Activity]", a),
                    format!("[PerNo{}Activity]", a),
                    format!("[NberNotDeclared{}Activity]", nd),
                    format!("[PerNotDeclared{}Activity]", nd),
                ]
            })
            .collect();

        let column_order = [
            DEFAULT_INDICATOR_COLUMN,
            "[TotalSitesActive]",
            "[NberShopActivity]",
            "[PerShopActivity]",
            "[NberFoodServicesActivity]",
            "[PerFoodServicesActivity]",
            "[NberCarServicesActivity]",
            "[PerCarServicesActivity]",
            "[NberCarWashActivity]",
            "[PerCarWashActivity]",
            "Geography[Zone]",
            "Geography[Sub Zone]",
            "Geography[Affiliates]",
        ]
        .map(String::from)
        .to_vec();

        Self {
            drop_columns: Vec::new(),
            renames,
            new_columns,
            column_order,
            indicator_column: DEFAULT_INDICATOR_COLUMN.to_string(),
        }
    }
}

fn ensure_unique<'a>(artifact: &'static str, names: impl Iterator<Item = &'a String>) -> ConfigResult<()> {
    let mut seen = HashSet::new();
    for name in names {
        if !seen.insert(name) {
            return Err(ConfigError::DuplicateEntry { artifact, column: name.clone() });
        }
    }
    Ok(())
}

/// Where the batch reads from and writes to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineConfig {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from(DEFAULT_INPUT_DIR),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    const FULL: &str = r#"{
        "drop_columns": ["[SortByZone]"],
        "renames": { "[v__SHOP]": "[NberShopActivity]" },
        "new_columns": ["[NberNoShopActivity]"],
        "column_order": ["[IsGrandTotalRowTotal]", "[NberShopActivity]"]
    }"#;

    #[test]
    fn test_from_json() {
        let spec = ColumnSpec::from_json(FULL).unwrap();
        assert_eq!(spec.drop_columns, vec!["[SortByZone]"]);
        assert_eq!(spec.renames["[v__SHOP]"], "[NberShopActivity]");
        assert_eq!(spec.indicator_column, DEFAULT_INDICATOR_COLUMN);
    }

    #[test]
    fn test_missing_artifact() {
        let json = r#"{ "drop_columns": [], "renames": {}, "new_columns": [] }"#;
        match ColumnSpec::from_json(json) {
            Err(ConfigError::MissingArtifact(name)) => assert_eq!(name, "column_order"),
            other => panic!("expected MissingArtifact, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_artifacts_are_present() {
        let json = r#"{ "drop_columns": [], "renames": {}, "new_columns": [], "column_order": [] }"#;
        assert!(ColumnSpec::from_json(json).is_ok());
    }

    #[test]
    fn test_duplicate_rename_targets_rejected() {
        let json = r#"{
            "drop_columns": [],
            "renames": { "a": "x", "b": "x" },
            "new_columns": [],
            "column_order": ["x"]
        }"#;
        assert!(matches!(
            ColumnSpec::from_json(json),
            Err(ConfigError::DuplicateEntry { artifact: "renames", .. })
        ));
    }

    #[test]
    fn test_default_recipe_is_valid() {
        let spec = ColumnSpec::default_recipe();
        spec.validate().unwrap();
        assert_eq!(spec.new_columns.len(), 24);
        assert_eq!(spec.column_order.first().map(String::as_str), Some(DEFAULT_INDICATOR_COLUMN));
        assert_eq!(spec.new_columns[18], "[NberNotDeclaredCarwashActivity]");
        assert_eq!(spec.column_order.len(), 13);
        assert!(spec.column_order.contains(&"[NberShopActivity]".to_string()));
        assert_eq!(spec.column_order.last().map(String::as_str), Some("Geography[Affiliates]"));
        assert!(spec.drop_columns.is_empty());
    }

    #[test]
    fn test_load_roundtrip_through_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("columns.json");
        let spec = ColumnSpec::default_recipe();
        fs::write(&path, spec.to_json().unwrap()).unwrap();

        assert_eq!(ColumnSpec::load(&path).unwrap(), spec);
    }
}
