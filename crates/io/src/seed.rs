//! Seed files: JSON list of paths, each path a list of single-entry
//! `{ "<id>": "<description>" }` objects, root first.
//!
//! ```json
//! [
//!   [{ "CORP": "Corporation" }],
//!   [{ "CORP": "Corporation" }, { "PLANT": "Plant" }]
//! ]
//! ```

use crate::error::{IoError, Result};
use serde_json::{Map, Value};
use std::path::Path;
use treeflat_core::{MaterializedPath, PathEntry, ResolutionState};

type SeedDocument = Vec<Vec<Map<String, Value>>>;

/// Where the seed is read from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedSource {
    Primary,
    Fallback,
    Empty,
}

fn invalid(path: &Path, reason: impl Into<String>) -> IoError {
    IoError::InvalidSeed {
        path: path.display().to_string(),
        reason: reason.into(),
    }
}

fn entry_from_object(path: &Path, object: Map<String, Value>) -> Result<PathEntry> {
    if object.len() != 1 {
        return Err(invalid(
            path,
            format!("path entries must have exactly one key, found {}", object.len()),
        ));
    }

    let Some((id, value)) = object.into_iter().next() else {
        return Err(invalid(path, "empty path entry"));
    };
    let description = match value {
        Value::String(text) => text,
        Value::Null => String::new(),
        other => other.to_string(),
    };
    Ok(PathEntry::new(id, description))
}

/// Parse seed JSON into a resolution state
pub fn parse_seed(bytes: &[u8], path: &Path) -> Result<ResolutionState> {
    let document: SeedDocument = serde_json::from_slice(bytes)?;

    let mut paths = Vec::with_capacity(document.len());
    for (index, objects) in document.into_iter().enumerate() {
        let entries = objects
            .into_iter()
            .map(|object| entry_from_object(path, object))
            .collect::<Result<Vec<_>>>()?;
        let seed_path = MaterializedPath::from_entries(entries)
            .ok_or_else(|| invalid(path, format!("path {index} is empty")))?;
        paths.push(seed_path);
    }

    Ok(ResolutionState::from_seed(paths))
}

pub fn load_seed(path: &Path) -> Result<ResolutionState> {
    let bytes = std::fs::read(path)?;
    let state = parse_seed(&bytes, path)?;
    log::info!("Loaded {} seeded nodes from {}", state.len(), path.display());
    Ok(state)
}

/// Load the primary seed, or the fallback seed when the primary file does
/// not exist. With neither available the seed is empty.
///
/// A seed file that exists but cannot be parsed is an error.
pub fn load_seed_with_fallback(
    primary: Option<&Path>,
    fallback: Option<&Path>,
) -> Result<(ResolutionState, SeedSource)> {
    if let Some(path) = primary {
        if path.exists() {
            return Ok((load_seed(path)?, SeedSource::Primary));
        }
        log::warn!("Seed file {} not found", path.display());
    }

    if let Some(path) = fallback {
        if path.exists() {
            log::info!("Using fallback seed {}", path.display());
            return Ok((load_seed(path)?, SeedSource::Fallback));
        }
        log::warn!("Fallback seed file {} not found", path.display());
    }

    if primary.is_some() || fallback.is_some() {
        log::warn!("No seed file available, starting from an empty seed");
    }
    Ok((ResolutionState::new(), SeedSource::Empty))
}

/// Serialize a state in seed format, paths sorted by joined id path
pub fn seed_to_json(state: &ResolutionState) -> Result<String> {
    let document: SeedDocument = state
        .to_seed()
        .iter()
        .map(|path| {
            path.entries()
                .iter()
                .map(|entry| {
                    let mut object = Map::new();
                    object.insert(entry.id.clone(), Value::String(entry.description.clone()));
                    object
                })
                .collect()
        })
        .collect();
    Ok(serde_json::to_string_pretty(&document)?)
}

/// Write a seed file, replacing `path` atomically
pub fn write_seed(path: &Path, state: &ResolutionState) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    let json = seed_to_json(state)?;
    let tmp = path.with_extension("json.tmp");
    let written = std::fs::write(&tmp, json).and_then(|()| std::fs::rename(&tmp, path));
    if let Err(err) = written {
        let _ = std::fs::remove_file(&tmp);
        return Err(err.into());
    }

    log::info!("Wrote {} seed paths to {}", state.len(), path.display());
    Ok(())
}
