use crate::config::PATH_SEPARATOR;
use std::collections::hash_map::Entry;
use std::collections::HashMap;

/// Input row of the adjacency list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    /// Node id (required, unique)
    pub id: String,

    /// Node description
    pub description: String,

    /// Parent id; `None` marks a root
    pub parent_id: Option<String>,

    /// Deletion status, compared against the configured deletion value
    pub deletion_marker: Option<String>,

    /// Raw cells of every input column, passed through to the output
    pub extra: Vec<String>,
}

impl Record {
    pub fn new(id: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            description: description.into(),
            parent_id: None,
            deletion_marker: None,
            extra: Vec::new(),
        }
    }

    pub fn with_parent(mut self, parent_id: impl Into<String>) -> Self {
        self.parent_id = Some(parent_id.into());
        self
    }

    pub fn with_deletion_marker(mut self, marker: impl Into<String>) -> Self {
        self.deletion_marker = Some(marker.into());
        self
    }

    /// Whether this record itself carries the deletion value
    pub fn is_deleted(&self, deletion_value: &str) -> bool {
        self.deletion_marker.as_deref() == Some(deletion_value)
    }

    pub fn entry(&self) -> PathEntry {
        PathEntry::new(&self.id, &self.description)
    }
}

/// One step of a materialized path
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PathEntry {
    pub id: String,
    pub description: String,
}

impl PathEntry {
    pub fn new(id: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            description: description.into(),
        }
    }

    /// Level label, e.g. `"C1 - Pump station"`
    pub fn label(&self) -> String {
        format!("{} - {}", self.id, self.description)
    }
}

/// Root-first chain of entries ending with the node itself
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MaterializedPath(Vec<PathEntry>);

impl MaterializedPath {
    /// Path of a root node
    pub fn root(entry: PathEntry) -> Self {
        Self(vec![entry])
    }

    /// Path of a child of `self`
    pub fn child(&self, entry: PathEntry) -> Self {
        let mut entries = Vec::with_capacity(self.0.len() + 1);
        entries.extend_from_slice(&self.0);
        entries.push(entry);
        Self(entries)
    }

    /// Build a path from raw entries. Returns `None` for an empty list.
    pub fn from_entries(entries: Vec<PathEntry>) -> Option<Self> {
        if entries.is_empty() {
            None
        } else {
            Some(Self(entries))
        }
    }

    pub fn entries(&self) -> &[PathEntry] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false: a path holds at least the node's own entry
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of ancestors; roots have depth 0
    pub fn depth(&self) -> usize {
        self.0.len().saturating_sub(1)
    }

    /// The node the path leads to
    pub fn terminus(&self) -> &PathEntry {
        // Constructors never produce an empty path
        &self.0[self.0.len() - 1]
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|entry| entry.id.as_str())
    }

    /// Ids joined with [`PATH_SEPARATOR`]
    pub fn joined(&self) -> String {
        self.ids().collect::<Vec<_>>().join(PATH_SEPARATOR)
    }
}

/// Resolution result for one id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedNode {
    pub path: MaterializedPath,

    /// The node or one of its ancestors is marked deleted
    pub in_deleted_branch: bool,
}

/// Write-once mapping from id to its resolved path
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolutionState {
    nodes: HashMap<String, ResolvedNode>,
}

impl ResolutionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: &str) -> Option<&ResolvedNode> {
        self.nodes.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.nodes.contains_key(id)
    }

    /// Record a resolution. The first resolution of an id is final:
    /// returns `false` and leaves the state untouched if `id` is present.
    pub fn insert(&mut self, id: impl Into<String>, node: ResolvedNode) -> bool {
        match self.nodes.entry(id.into()) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                slot.insert(node);
                true
            }
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ResolvedNode)> {
        self.nodes.iter().map(|(id, node)| (id.as_str(), node))
    }
}
