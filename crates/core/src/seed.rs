//! Priming the resolver with paths computed by an earlier run.
//!
//! A seed is a list of materialized paths. Each path is registered under the
//! id of its last entry; the ancestors it lists do not get entries of their
//! own unless they appear as separate paths.

use crate::types::{MaterializedPath, ResolutionState, ResolvedNode};
use std::collections::HashMap;

impl ResolutionState {
    /// Build an initial state from seed paths.
    ///
    /// Seeded nodes are never in a deleted branch since the seed format does
    /// not carry the flag. When two paths end with the same id the later one
    /// replaces the earlier.
    pub fn from_seed<I>(paths: I) -> Self
    where
        I: IntoIterator<Item = MaterializedPath>,
    {
        let mut by_terminus: HashMap<String, MaterializedPath> = HashMap::new();
        let mut replaced = 0usize;

        for path in paths {
            let id = path.terminus().id.clone();
            if by_terminus.insert(id, path).is_some() {
                replaced += 1;
            }
        }

        if replaced > 0 {
            log::warn!("Seed lists {replaced} later path(s) for already seeded ids; kept the last");
        }

        let mut state = ResolutionState::new();
        for (id, path) in by_terminus {
            state.insert(
                id,
                ResolvedNode {
                    path,
                    in_deleted_branch: false,
                },
            );
        }
        log::debug!("Seeded resolution state with {} nodes", state.len());

        state
    }

    /// Export every resolved path, ordered by joined path so the output is stable
    pub fn to_seed(&self) -> Vec<MaterializedPath> {
        let mut paths: Vec<(String, MaterializedPath)> = self
            .iter()
            .map(|(_, node)| (node.path.joined(), node.path.clone()))
            .collect();
        paths.sort_by(|a, b| a.0.cmp(&b.0));
        paths.into_iter().map(|(_, path)| path).collect()
    }
}
