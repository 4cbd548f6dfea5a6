use crate::config::ORPHAN_DESCRIPTION;
use crate::types::{MaterializedPath, PathEntry, Record, ResolutionState};

/// Where a record ends up in the flattened hierarchy
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placement {
    pub path: MaterializedPath,
    pub in_deleted_branch: bool,

    /// The resolver could not place this record; it is shown as a root
    pub orphan: bool,
}

impl Placement {
    pub fn depth(&self) -> usize {
        self.path.depth()
    }
}

/// Place every record, turning unresolved ones into synthetic roots.
///
/// The result is aligned with `records`. Orphans get the single entry
/// `(id, "(Orphan node)")` and are never reported as deleted, whatever their
/// own status. The resolver's state is only read.
pub fn place_records(records: &[Record], state: &ResolutionState) -> Vec<Placement> {
    records
        .iter()
        .map(|record| match state.get(&record.id) {
            Some(node) => Placement {
                path: node.path.clone(),
                in_deleted_branch: node.in_deleted_branch,
                orphan: false,
            },
            None => orphan_placement(&record.id),
        })
        .collect()
}

fn orphan_placement(id: &str) -> Placement {
    Placement {
        path: MaterializedPath::root(PathEntry::new(id, ORPHAN_DESCRIPTION)),
        in_deleted_branch: false,
        orphan: true,
    }
}
