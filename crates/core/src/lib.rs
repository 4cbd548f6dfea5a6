//! # Treeflat Core
//!
//! Flattens a self-referential hierarchy (adjacency list: every record names
//! its parent) into a denormalized table for reporting.
//!
//! Every record gains:
//!
//! - **Materialised path** - root-first chain of ancestor ids
//! - **Depth** - number of ancestors
//! - **Level columns** - `L00..Lnn` ids and `L00_desc..Lnn_desc` labels
//! - **Child count** - direct children declared in the input
//!
//! and the rows come out in depth-first order.
//!
//! ## Architecture
//!
//! ```text
//! Record[] + seed ResolutionState
//!     │
//!     ├──> PathResolver (bounded fixed-point passes)
//!     │      └─ id → (path, in deleted branch), write-once
//!     │
//!     ├──> Orphan fallback
//!     │      └─ unresolved ids become "(Orphan node)" roots
//!     │
//!     ├──> Depth-first sequencer
//!     │
//!     ├──> Level columns (L00..Lmax, L00_desc..Lmax_desc)
//!     │
//!     └──> Child counts (over the raw records)
//! ```
//!
//! ## Example
//!
//! ```rust
//! use treeflat_core::{FlattenConfig, Flattener, Record, ResolutionState};
//!
//! let records = vec![
//!     Record::new("R", "Plant"),
//!     Record::new("C1", "Line 1").with_parent("R"),
//!     Record::new("C2", "Line 2").with_parent("R"),
//!     Record::new("G1", "Pump").with_parent("C1"),
//! ];
//!
//! let flattener = Flattener::new(FlattenConfig::default()).unwrap();
//! let flattened = flattener.flatten(records, ResolutionState::new()).unwrap();
//!
//! let order: Vec<_> = flattened.table.rows.iter().map(|r| r.record.id.as_str()).collect();
//! assert_eq!(order, vec!["R", "C1", "G1", "C2"]);
//! ```

mod children;
mod config;
mod error;
mod flatten;
mod levels;
mod orphan;
mod resolver;
mod seed;
mod sequencer;
mod types;

pub use children::ChildCounts;
pub use config::{ColumnConfig, FlattenConfig, SortStrategy, ORPHAN_DESCRIPTION, PATH_SEPARATOR};
pub use error::{FlattenError, Result};
pub use flatten::{
    validate_records, FlatRow, FlatTable, FlattenReport, Flattened, Flattener, CHILDREN_COLUMN,
    DEPTH_COLUMN, PATH_COLUMN,
};
pub use levels::{level_column_name, level_column_names, level_desc_column_name, LevelCells};
pub use orphan::{place_records, Placement};
pub use resolver::{PathResolver, ResolveOutcome};
pub use sequencer::depth_first_order;
pub use types::{MaterializedPath, PathEntry, Record, ResolutionState, ResolvedNode};
