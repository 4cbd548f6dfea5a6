use crate::types::{MaterializedPath, Record, ResolutionState, ResolvedNode};

/// Resolves materialized paths by repeated passes over the records
///
/// A record resolves once its parent is in the state. Every pass scans all
/// records; passes continue while at least one new record resolves, up to
/// `2 * max_depth` passes. Whatever is still unresolved after that (broken
/// links, cycles, chains deeper than the cap) is reported, not an error.
///
/// Below the cap the resolved paths do not depend on record order. Once the
/// cap is reached they do: a chain listed parent-first resolves in one pass,
/// the same chain listed child-first needs one pass per level.
#[derive(Debug, Clone)]
pub struct PathResolver<'a> {
    deletion_value: &'a str,
    max_passes: usize,
}

/// Final state of a resolver run
#[derive(Debug, Clone)]
pub struct ResolveOutcome {
    /// Seeded plus newly resolved nodes
    pub state: ResolutionState,

    /// Number of passes performed, including the final unproductive one
    pub passes: usize,

    /// Stopped because the pass cap was reached, not because a pass resolved nothing
    pub hit_cap: bool,

    /// Ids of records left unresolved, in input order
    pub unresolved: Vec<String>,
}

impl ResolveOutcome {
    pub fn unresolved_count(&self) -> usize {
        self.unresolved.len()
    }
}

impl<'a> PathResolver<'a> {
    pub fn new(deletion_value: &'a str, max_depth: usize) -> Self {
        Self {
            deletion_value,
            max_passes: max_depth * 2,
        }
    }

    /// Run one pass over `records`.
    ///
    /// Returns the number of newly resolved records together with the
    /// updated state. A record resolved earlier in the pass can already act
    /// as parent for records scanned after it.
    pub fn resolve_pass(
        &self,
        records: &[Record],
        mut state: ResolutionState,
    ) -> (usize, ResolutionState) {
        let mut resolved = 0;

        for record in records {
            if state.contains(&record.id) {
                continue;
            }

            let deleted = record.is_deleted(self.deletion_value);
            let node = match record.parent_id.as_deref() {
                None => ResolvedNode {
                    path: MaterializedPath::root(record.entry()),
                    in_deleted_branch: deleted,
                },
                Some(parent_id) => match state.get(parent_id) {
                    Some(parent) => ResolvedNode {
                        path: parent.path.child(record.entry()),
                        in_deleted_branch: deleted || parent.in_deleted_branch,
                    },
                    None => continue,
                },
            };

            if state.insert(record.id.clone(), node) {
                resolved += 1;
            }
        }

        (resolved, state)
    }

    /// Run passes until one resolves nothing or the pass cap is reached
    pub fn resolve(&self, records: &[Record], initial: ResolutionState) -> ResolveOutcome {
        let mut state = initial;
        let mut passes = 0;
        let mut hit_cap = false;

        log::info!(
            "Building materialised paths for {} records (seeded with {}, at most {} passes)",
            records.len(),
            state.len(),
            self.max_passes
        );

        loop {
            if passes >= self.max_passes {
                hit_cap = true;
                break;
            }

            let (resolved, next) = self.resolve_pass(records, state);
            state = next;
            passes += 1;
            log::debug!("Pass {passes}: resolved {resolved} records");

            if resolved == 0 {
                break;
            }
        }

        let unresolved: Vec<String> = records
            .iter()
            .filter(|record| !state.contains(&record.id))
            .map(|record| record.id.clone())
            .collect();

        // Reaching the cap with nothing left to resolve is a clean finish
        let hit_cap = hit_cap && !unresolved.is_empty();

        if unresolved.is_empty() {
            log::info!("Resolved all records in {passes} passes");
        } else {
            log::warn!(
                "{} records unresolved after {passes} passes{}",
                unresolved.len(),
                if hit_cap { " (pass cap reached)" } else { "" }
            );
        }

        ResolveOutcome {
            state,
            passes,
            hit_cap,
            unresolved,
        }
    }
}
