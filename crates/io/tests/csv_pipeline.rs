use pretty_assertions::assert_eq;
use std::fs;
use tempfile::tempdir;
use treeflat_core::{ColumnConfig, FlattenConfig, Flattener};
use treeflat_io::{
    load_seed_with_fallback, read_records_from_path, write_seed, write_table_to_path, SeedSource,
};

const INPUT: &str = "\
Functional Location,Description of functional location,Superior functional location,System status
SITE-01,Pump house,PLANT,
SITE-01-P1,Pump 1,SITE-01,
SITE-01-P2,Pump 2,SITE-01,DLFL
SITE-01-P2-M,Motor,SITE-01-P2,
STRAY,Stray node,NOWHERE,
";

const SEED: &str = r#"[
    [{"CORP": "Corporation"}, {"PLANT": "Plant"}]
]"#;

fn flatten_dir(dir: &std::path::Path, seed_name: &str) -> String {
    let config = FlattenConfig::default();
    let input = read_records_from_path(&dir.join("IH06.csv"), &config.columns).unwrap();
    let (seed, _) = load_seed_with_fallback(
        Some(&dir.join(seed_name)),
        Some(&dir.join("starting_tree_structure_example.json")),
    )
    .unwrap();

    let flattened = Flattener::new(config)
        .unwrap()
        .flatten(input.records, seed)
        .unwrap();

    let output = dir.join("output").join("IH01.csv");
    write_table_to_path(&output, &input.headers, &flattened.table).unwrap();
    write_seed(&dir.join("next_seed.json"), &flattened.state).unwrap();
    fs::read_to_string(output).unwrap()
}

#[test]
fn flattens_sap_export_with_fallback_seed() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("IH06.csv"), INPUT).unwrap();
    fs::write(dir.path().join("starting_tree_structure_example.json"), SEED).unwrap();

    let text = flatten_dir(dir.path(), "starting_tree_structure.json");
    let mut lines = text.lines();

    let header = lines.next().unwrap();
    assert!(header.starts_with(
        "Functional Location,Description of functional location,Superior functional location,System status,Depth,MaterialisedPath,L00,L01"
    ));
    assert!(header.ends_with("L12_desc,NumChildren"));
    assert_eq!(header.split(',').count(), 4 + 2 + 26 + 1);

    let ids: Vec<&str> = lines.map(|line| line.split(',').next().unwrap()).collect();
    assert_eq!(
        ids,
        vec!["SITE-01", "SITE-01-P1", "SITE-01-P2", "SITE-01-P2-M", "STRAY"]
    );

    let row = text
        .lines()
        .find(|line| line.starts_with("SITE-01-P2-M,"))
        .unwrap();
    let cells: Vec<&str> = row.split(',').collect();
    assert_eq!(cells[4], "4");
    assert_eq!(cells[5], "CORP > PLANT > SITE-01 > SITE-01-P2 > SITE-01-P2-M");
    assert_eq!(cells[6], "CORP");
    assert_eq!(cells[6 + 13], "CORP - Corporation");

    let stray = text.lines().find(|line| line.starts_with("STRAY,")).unwrap();
    assert!(stray.contains(",0,STRAY,STRAY,"));
    assert!(stray.contains("STRAY - (Orphan node)"));
}

#[test]
fn reseeding_from_exported_state_gives_same_table() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("IH06.csv"), INPUT).unwrap();
    fs::write(dir.path().join("starting_tree_structure_example.json"), SEED).unwrap();

    let first = flatten_dir(dir.path(), "starting_tree_structure.json");
    fs::rename(
        dir.path().join("next_seed.json"),
        dir.path().join("reseed.json"),
    )
    .unwrap();
    let second = flatten_dir(dir.path(), "reseed.json");

    assert_eq!(second, first);
}

#[test]
fn custom_columns_and_missing_seed() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("assets.csv");
    fs::write(&input, "Tag,Label,Up,State\nA,Alpha,,\nB,Beta,A,\n").unwrap();

    let config = FlattenConfig {
        columns: ColumnConfig {
            id: "Tag".to_string(),
            description: "Label".to_string(),
            parent_id: "Up".to_string(),
            deletion_flag: "State".to_string(),
        },
        max_depth: 2,
        ..FlattenConfig::default()
    };
    let table = read_records_from_path(&input, &config.columns).unwrap();
    let (seed, source) = load_seed_with_fallback(Some(&dir.path().join("none.json")), None).unwrap();
    assert_eq!(source, SeedSource::Empty);

    let flattened = Flattener::new(config)
        .unwrap()
        .flatten(table.records, seed)
        .unwrap();
    assert_eq!(flattened.table.row("B").unwrap().materialised_path, "A > B");
    assert_eq!(flattened.table.row("A").unwrap().num_children, 1);
}
