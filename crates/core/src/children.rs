use crate::types::Record;
use std::collections::HashMap;

/// Number of records naming each id as their parent
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChildCounts {
    counts: HashMap<String, usize>,
}

impl ChildCounts {
    /// Count parent pointers over the raw records, orphans and deleted
    /// nodes included
    pub fn from_records(records: &[Record]) -> Self {
        let counts = records
            .iter()
            .filter_map(|record| record.parent_id.as_deref())
            .fold(HashMap::new(), |mut counts, parent_id| {
                *counts.entry(parent_id.to_string()).or_insert(0) += 1;
                counts
            });
        Self { counts }
    }

    pub fn get(&self, id: &str) -> usize {
        self.counts.get(id).copied().unwrap_or(0)
    }
}
