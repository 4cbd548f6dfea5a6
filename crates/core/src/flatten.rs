use crate::children::ChildCounts;
use crate::config::FlattenConfig;
use crate::error::{FlattenError, Result};
use crate::levels::{level_column_names, LevelCells};
use crate::orphan::place_records;
use crate::resolver::PathResolver;
use crate::sequencer::depth_first_order;
use crate::types::{Record, ResolutionState};
use serde::Serialize;
use std::collections::HashSet;

pub const DEPTH_COLUMN: &str = "Depth";
pub const PATH_COLUMN: &str = "MaterialisedPath";
pub const CHILDREN_COLUMN: &str = "NumChildren";

/// One output row: the input record plus its derived hierarchy columns
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlatRow {
    pub record: Record,
    pub depth: usize,

    /// Path ids joined with `" > "`
    pub materialised_path: String,

    pub levels: LevelCells,
    pub num_children: usize,
    pub in_deleted_branch: bool,
    pub orphan: bool,
}

impl FlatRow {
    /// Derived cells in the order of [`FlatTable::derived_column_names`]
    pub fn derived_cells(&self) -> Vec<Option<String>> {
        let mut cells = Vec::with_capacity(self.levels.ids.len() * 2 + 3);
        cells.push(Some(self.depth.to_string()));
        cells.push(Some(self.materialised_path.clone()));
        cells.extend(self.levels.cells().map(|cell| cell.map(str::to_string)));
        cells.push(Some(self.num_children.to_string()));
        cells
    }
}

/// Flattened hierarchy in depth-first order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlatTable {
    pub max_depth: usize,
    pub rows: Vec<FlatRow>,
}

impl FlatTable {
    /// Columns appended after the input columns
    pub fn derived_column_names(&self) -> Vec<String> {
        let mut names = vec![DEPTH_COLUMN.to_string(), PATH_COLUMN.to_string()];
        names.extend(level_column_names(self.max_depth));
        names.push(CHILDREN_COLUMN.to_string());
        names
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn row(&self, id: &str) -> Option<&FlatRow> {
        self.rows.iter().find(|row| row.record.id == id)
    }
}

/// Run summary
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FlattenReport {
    pub rows: usize,
    pub resolved: usize,
    pub orphans: usize,
    pub passes: usize,
    pub hit_cap: bool,
    pub in_deleted_branch: usize,
}

/// Result of [`Flattener::flatten`]
#[derive(Debug, Clone)]
pub struct Flattened {
    pub table: FlatTable,
    pub report: FlattenReport,

    /// Final resolution state; can seed the next run
    pub state: ResolutionState,
}

/// Turns adjacency-list records into a [`FlatTable`]
///
/// Pipeline: validate → resolve paths → orphan fallback → depth-first order →
/// level columns → child counts.
#[derive(Debug, Clone)]
pub struct Flattener {
    config: FlattenConfig,
}

impl Flattener {
    pub fn new(config: FlattenConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Flatten `records`, priming the resolver with `seed`
    pub fn flatten(&self, records: Vec<Record>, seed: ResolutionState) -> Result<Flattened> {
        validate_records(&records)?;

        let resolver = PathResolver::new(&self.config.deletion_value, self.config.max_depth);
        let outcome = resolver.resolve(&records, seed);
        let placements = place_records(&records, &outcome.state);

        log::info!("Sorting {} nodes in depth-first order", records.len());
        let order = depth_first_order(&placements, self.config.sort);

        let child_counts = ChildCounts::from_records(&records);

        let mut slots: Vec<Option<_>> = records.into_iter().zip(placements).map(Some).collect();
        let rows: Vec<FlatRow> = order
            .into_iter()
            .filter_map(|index| slots[index].take())
            .map(|(record, placement)| FlatRow {
                depth: placement.depth(),
                materialised_path: placement.path.joined(),
                levels: LevelCells::from_path(&placement.path, self.config.max_depth),
                num_children: child_counts.get(&record.id),
                in_deleted_branch: placement.in_deleted_branch,
                orphan: placement.orphan,
                record,
            })
            .collect();

        let orphans = outcome.unresolved_count();
        let report = FlattenReport {
            rows: rows.len(),
            resolved: rows.len() - orphans,
            orphans,
            passes: outcome.passes,
            hit_cap: outcome.hit_cap,
            in_deleted_branch: rows.iter().filter(|row| row.in_deleted_branch).count(),
        };
        log::info!("Done processing {} nodes ({} orphans)", report.rows, report.orphans);

        Ok(Flattened {
            table: FlatTable {
                max_depth: self.config.max_depth,
                rows,
            },
            report,
            state: outcome.state,
        })
    }
}

/// Reject records without an id and repeated ids. `row` in errors is 1-based.
pub fn validate_records(records: &[Record]) -> Result<()> {
    let mut seen = HashSet::with_capacity(records.len());
    for (index, record) in records.iter().enumerate() {
        let row = index + 1;
        if record.id.trim().is_empty() {
            return Err(FlattenError::invalid_record(row, "missing identifier"));
        }
        if !seen.insert(record.id.as_str()) {
            return Err(FlattenError::invalid_record(
                row,
                format!("duplicate identifier {:?}", record.id),
            ));
        }
    }
    Ok(())
}
