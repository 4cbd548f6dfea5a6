use crate::types::MaterializedPath;

/// Name of the id column for `level`, e.g. `L03`
pub fn level_column_name(level: usize) -> String {
    format!("L{level:02}")
}

/// Name of the label column for `level`, e.g. `L03_desc`
pub fn level_desc_column_name(level: usize) -> String {
    format!("L{level:02}_desc")
}

/// All level column names: every id column first, then every label column,
/// so that similar columns sit next to each other
pub fn level_column_names(max_depth: usize) -> Vec<String> {
    (0..=max_depth)
        .map(level_column_name)
        .chain((0..=max_depth).map(level_desc_column_name))
        .collect()
}

/// Per-level cells of one row, for levels `0..=max_depth`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LevelCells {
    pub ids: Vec<Option<String>>,
    pub labels: Vec<Option<String>>,
}

impl LevelCells {
    /// Derive the level cells from a path. Levels past the end of the path
    /// are empty; entries deeper than `max_depth` are dropped.
    pub fn from_path(path: &MaterializedPath, max_depth: usize) -> Self {
        let (ids, labels): (Vec<_>, Vec<_>) = (0..=max_depth)
            .map(|level| match path.entries().get(level) {
                Some(entry) => (Some(entry.id.clone()), Some(entry.label())),
                None => (None, None),
            })
            .unzip();
        Self { ids, labels }
    }

    /// Cells in the order of [`level_column_names`]
    pub fn cells(&self) -> impl Iterator<Item = Option<&str>> {
        self.ids
            .iter()
            .chain(self.labels.iter())
            .map(|cell| cell.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PathEntry;
    use pretty_assertions::assert_eq;

    fn path(ids: &[&str]) -> MaterializedPath {
        let entries = ids
            .iter()
            .map(|id| PathEntry::new(*id, format!("{id} desc")))
            .collect();
        MaterializedPath::from_entries(entries).unwrap()
    }

    #[test]
    fn column_names_are_grouped_by_kind() {
        assert_eq!(
            level_column_names(2),
            vec!["L00", "L01", "L02", "L00_desc", "L01_desc", "L02_desc"]
        );
        assert_eq!(level_column_names(12).len(), 26);
        assert_eq!(level_column_name(12), "L12");
    }

    #[test]
    fn fills_levels_along_the_path() {
        let cells = LevelCells::from_path(&path(&["R", "C1", "G1"]), 3);

        assert_eq!(
            cells.ids,
            vec![
                Some("R".to_string()),
                Some("C1".to_string()),
                Some("G1".to_string()),
                None
            ]
        );
        assert_eq!(cells.labels[1].as_deref(), Some("C1 - C1 desc"));
        assert_eq!(cells.labels[3], None);
    }

    #[test]
    fn deeper_entries_are_truncated() {
        let cells = LevelCells::from_path(&path(&["A", "B", "C"]), 1);
        assert_eq!(cells.ids.len(), 2);
        assert_eq!(cells.labels.len(), 2);
        assert_eq!(cells.ids[1].as_deref(), Some("B"));
    }

    #[test]
    fn cells_follow_column_order() {
        let cells = LevelCells::from_path(&path(&["R"]), 1);
        let flat: Vec<_> = cells.cells().collect();
        assert_eq!(flat, vec![Some("R"), None, Some("R - R desc"), None]);
    }
}
