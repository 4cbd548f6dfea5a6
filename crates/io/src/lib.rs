//! # Treeflat IO
//!
//! File-facing side of treeflat: CSV input/output tables, seed files and the
//! TOML run configuration. The flattening itself lives in `treeflat-core`.

mod config;
mod error;
mod seed;
mod table;

pub use config::{RunConfig, SeedConfig};
pub use error::{IoError, Result};
pub use seed::{
    load_seed, load_seed_with_fallback, parse_seed, seed_to_json, write_seed, SeedSource,
};
pub use table::{
    read_records, read_records_from_path, write_table, write_table_to_path, InputTable,
};
