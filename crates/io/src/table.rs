use crate::error::{IoError, Result};
use std::collections::HashSet;
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;
use treeflat_core::{ColumnConfig, FlatTable, Record};

/// Records read from a CSV file, with the header row kept for output
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputTable {
    pub headers: Vec<String>,
    pub records: Vec<Record>,
}

struct ColumnIndices {
    id: usize,
    description: usize,
    parent_id: usize,
    deletion_flag: usize,
}

impl ColumnIndices {
    fn locate(
        headers: &csv::StringRecord,
        columns: &ColumnConfig,
        source_name: &str,
    ) -> Result<Self> {
        let find = |name: &str| -> Result<usize> {
            headers
                .iter()
                .position(|h| h.trim() == name)
                .ok_or_else(|| IoError::MissingColumn {
                    column: name.to_string(),
                    source_name: source_name.to_string(),
                })
        };

        Ok(Self {
            id: find(&columns.id)?,
            description: find(&columns.description)?,
            parent_id: find(&columns.parent_id)?,
            deletion_flag: find(&columns.deletion_flag)?,
        })
    }
}

/// Trimmed cell value; blank and whitespace-only cells are `None`
fn cell(row: &csv::StringRecord, index: usize) -> Option<String> {
    row.get(index)
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

/// Read records from CSV with a header row.
///
/// Empty or whitespace-only parent cells mark roots. Empty ids are kept as
/// empty strings so that validation can report the row.
pub fn read_records<R: Read>(
    reader: R,
    columns: &ColumnConfig,
    source_name: &str,
) -> Result<InputTable> {
    let mut reader = csv::Reader::from_reader(reader);
    let header_record = reader.headers()?.clone();
    let indices = ColumnIndices::locate(&header_record, columns, source_name)?;

    let mut records = Vec::new();
    for result in reader.records() {
        let row = result?;
        records.push(Record {
            id: cell(&row, indices.id).unwrap_or_default(),
            description: cell(&row, indices.description).unwrap_or_default(),
            parent_id: cell(&row, indices.parent_id),
            deletion_marker: cell(&row, indices.deletion_flag),
            extra: row.iter().map(str::to_string).collect(),
        });
    }

    log::info!("Read {} records from {source_name}", records.len());

    Ok(InputTable {
        headers: header_record.iter().map(str::to_string).collect(),
        records,
    })
}

pub fn read_records_from_path(path: &Path, columns: &ColumnConfig) -> Result<InputTable> {
    let file = File::open(path)?;
    read_records(file, columns, &path.display().to_string())
}

/// Write the flattened table: input columns, then the derived columns.
///
/// Input columns named like a derived column are left out; the derived
/// value replaces them.
pub fn write_table<W: Write>(writer: W, headers: &[String], table: &FlatTable) -> Result<()> {
    let derived = table.derived_column_names();
    let derived_names: HashSet<&str> = derived.iter().map(String::as_str).collect();

    let kept: Vec<usize> = headers
        .iter()
        .enumerate()
        .filter(|(_, name)| {
            let collides = derived_names.contains(name.as_str());
            if collides {
                log::warn!(
                    "Input column {name:?} is replaced by the derived column of the same name"
                );
            }
            !collides
        })
        .map(|(index, _)| index)
        .collect();

    let mut writer = csv::Writer::from_writer(writer);
    writer.write_record(
        kept.iter()
            .map(|&index| headers[index].as_str())
            .chain(derived.iter().map(String::as_str)),
    )?;

    for row in &table.rows {
        let input_cells = kept
            .iter()
            .map(|&index| row.record.extra.get(index).cloned().unwrap_or_default());
        let derived_cells = row.derived_cells().into_iter().map(Option::unwrap_or_default);
        writer.write_record(input_cells.chain(derived_cells))?;
    }

    writer.flush()?;
    Ok(())
}

/// Write the table to `path`, creating parent directories. The file is
/// written next to the target and renamed into place.
pub fn write_table_to_path(path: &Path, headers: &[String], table: &FlatTable) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    let tmp = path.with_extension("csv.tmp");
    let written = File::create(&tmp)
        .map_err(IoError::from)
        .and_then(|file| write_table(file, headers, table))
        .and_then(|()| std::fs::rename(&tmp, path).map_err(IoError::from));
    if let Err(err) = written {
        let _ = std::fs::remove_file(&tmp);
        return Err(err);
    }

    log::info!("Wrote {} rows to {}", table.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;
    use treeflat_core::{FlattenConfig, Flattener, ResolutionState};

    fn columns() -> ColumnConfig {
        ColumnConfig {
            id: "Id".to_string(),
            description: "Name".to_string(),
            parent_id: "Parent".to_string(),
            deletion_flag: "Status".to_string(),
        }
    }

    const INPUT: &str = "\
Id,Name,Parent,Status,Cost
R,Root,,,100
C1,Child 1,R,DLFL,20
 C2 , Child 2 ,R,,
";

    #[test]
    fn reads_records_and_keeps_raw_cells() {
        let table = read_records(INPUT.as_bytes(), &columns(), "input.csv").unwrap();

        assert_eq!(table.headers, vec!["Id", "Name", "Parent", "Status", "Cost"]);
        assert_eq!(table.records.len(), 3);

        let root = &table.records[0];
        assert_eq!(root.parent_id, None);
        assert_eq!(root.deletion_marker, None);

        let deleted = &table.records[1];
        assert_eq!(deleted.parent_id.as_deref(), Some("R"));
        assert!(deleted.is_deleted("DLFL"));

        let trimmed = &table.records[2];
        assert_eq!(trimmed.id, "C2");
        assert_eq!(trimmed.description, "Child 2");
        assert_eq!(trimmed.extra[0], " C2 ");
    }

    #[test]
    fn whitespace_only_parent_is_a_root() {
        let csv_text = "Id,Name,Parent,Status\nR,Root,   ,\nC,Child,R,\n";
        let table = read_records(csv_text.as_bytes(), &columns(), "input.csv").unwrap();

        assert_eq!(table.records[0].parent_id, None);
        assert_eq!(table.records[0].extra[2], "   ");
        assert_eq!(table.records[1].parent_id.as_deref(), Some("R"));
    }

    #[test]
    fn failed_write_leaves_no_temp_file() {
        let dir = tempdir().unwrap();
        let target = dir.path().join("flat.csv");
        std::fs::create_dir(&target).unwrap();

        let input = read_records(INPUT.as_bytes(), &columns(), "input.csv").unwrap();
        let flattened = Flattener::new(FlattenConfig {
            columns: columns(),
            ..FlattenConfig::default()
        })
        .unwrap()
        .flatten(input.records, ResolutionState::new())
        .unwrap();

        assert!(write_table_to_path(&target, &input.headers, &flattened.table).is_err());
        assert!(!dir.path().join("flat.csv.tmp").exists());
        assert!(target.is_dir());
    }

    #[test]
    fn missing_column_is_reported() {
        let err = read_records("Id,Name,Parent\nA,a,\n".as_bytes(), &columns(), "input.csv")
            .unwrap_err();
        match err {
            IoError::MissingColumn {
                column,
                source_name,
            } => {
                assert_eq!(column, "Status");
                assert_eq!(source_name, "input.csv");
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn writes_input_then_derived_columns() {
        let input = read_records(INPUT.as_bytes(), &columns(), "input.csv").unwrap();
        let config = FlattenConfig {
            columns: columns(),
            max_depth: 1,
            ..FlattenConfig::default()
        };
        let flattened = Flattener::new(config)
            .unwrap()
            .flatten(input.records, ResolutionState::new())
            .unwrap();

        let mut out = Vec::new();
        write_table(&mut out, &input.headers, &flattened.table).unwrap();
        let text = String::from_utf8(out).unwrap();

        let expected = "\
Id,Name,Parent,Status,Cost,Depth,MaterialisedPath,L00,L01,L00_desc,L01_desc,NumChildren
R,Root,,,100,0,R,R,,R - Root,,2
C1,Child 1,R,DLFL,20,1,R > C1,R,C1,R - Root,C1 - Child 1,0
 C2 , Child 2 ,R,,,1,R > C2,R,C2,R - Root,C2 - Child 2,0
";
        assert_eq!(text, expected);
    }

    #[test]
    fn colliding_input_column_is_replaced() {
        let csv_text = "Id,Name,Parent,Status,Depth\nR,Root,,,99\n";
        let input = read_records(csv_text.as_bytes(), &columns(), "input.csv").unwrap();
        let config = FlattenConfig {
            columns: columns(),
            max_depth: 1,
            ..FlattenConfig::default()
        };
        let flattened = Flattener::new(config)
            .unwrap()
            .flatten(input.records, ResolutionState::new())
            .unwrap();

        let mut out = Vec::new();
        write_table(&mut out, &input.headers, &flattened.table).unwrap();
        let text = String::from_utf8(out).unwrap();
        let mut lines = text.lines();

        assert_eq!(
            lines.next(),
            Some("Id,Name,Parent,Status,Depth,MaterialisedPath,L00,L01,L00_desc,L01_desc,NumChildren")
        );
        assert_eq!(lines.next(), Some("R,Root,,,0,R,R,,R - Root,,0"));
    }
}
