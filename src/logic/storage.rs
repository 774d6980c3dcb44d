//! Backing document: best-effort load and atomic whole-file save.

use crate::models::{Player, PlayerId};
use serde_json::Value;
use std::collections::HashSet;
use std::fs::{self, File, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Failure writing the backing document.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Failed writing '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize roster: {0}")]
    Encode(#[from] serde_json::Error),
}

impl StorageError {
    fn io(path: &Path, source: std::io::Error) -> Self {
        StorageError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Read the roster from `path`, in document order.
///
/// Never fails: a missing file is an empty roster, and unreadable or malformed
/// content is logged and yields whatever records could be parsed. Duplicate
/// nicknames and duplicate ids keep the first record seen. Every loaded
/// player comes back online, whatever the document says.
pub fn load_roster(path: &Path) -> Vec<Player> {
    let data = match fs::read_to_string(path) {
        Ok(data) => data,
        Err(e) if e.kind() == ErrorKind::NotFound => return Vec::new(),
        Err(e) => {
            log::warn!("Failed reading {}: {e}; starting with an empty roster", path.display());
            return Vec::new();
        }
    };
    // Guard against leading NULs left by an interrupted write
    let cleaned = data.trim_start_matches('\0');
    if cleaned.trim().is_empty() {
        return Vec::new();
    }
    let document: Value = match serde_json::from_str(cleaned) {
        Ok(v) => v,
        Err(e) => {
            log::warn!("Failed to parse {}: {e}; starting with an empty roster", path.display());
            return Vec::new();
        }
    };
    dedup(parse_records(document))
}

fn parse_records(document: Value) -> Vec<Player> {
    let entries = match document {
        Value::Array(items) => items,
        Value::Object(mut map) => match map.remove("players") {
            Some(Value::Array(items)) => items,
            _ => vec![Value::Object(map)],
        },
        other => {
            log::warn!("Backing document is a JSON {}, expected an array", json_kind(&other));
            return Vec::new();
        }
    };

    let total = entries.len();
    let players: Vec<Player> = entries
        .into_iter()
        .filter_map(|entry| match serde_json::from_value::<Player>(entry) {
            Ok(p) if p.id == 0 || p.nickname.is_empty() => None,
            Ok(p) => Some(Player { online: true, ..p }),
            Err(e) => {
                log::debug!("Skipping record: {e}");
                None
            }
        })
        .collect();
    if players.len() < total {
        log::warn!("Skipped {} invalid player record(s)", total - players.len());
    }
    players
}

fn dedup(players: Vec<Player>) -> Vec<Player> {
    let mut ids: HashSet<PlayerId> = HashSet::new();
    let mut nicknames: HashSet<String> = HashSet::new();
    let mut kept = Vec::with_capacity(players.len());
    for p in players {
        if ids.contains(&p.id) || nicknames.contains(&p.nickname) {
            log::warn!("Dropping duplicate player record {} '{}'", p.id, p.nickname);
            continue;
        }
        ids.insert(p.id);
        nicknames.insert(p.nickname.clone());
        kept.push(p);
    }
    kept
}

fn json_kind(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Overwrite `path` with the full roster.
///
/// Content goes to a sibling temp file first and is renamed over the
/// document, so a failed write leaves the previous roster intact.
pub fn save_roster<'a>(
    path: &Path,
    players: impl IntoIterator<Item = &'a Player>,
) -> Result<(), StorageError> {
    let list: Vec<&Player> = players.into_iter().collect();
    let content = serde_json::to_string_pretty(&list)?;

    let dir = match path.parent() {
        Some(d) if !d.as_os_str().is_empty() => d,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir).map_err(|e| StorageError::io(dir, e))?;

    let base = path.file_name().and_then(|s| s.to_str()).unwrap_or("data.json");
    let mut counter = 0u32;
    let tmp_path = loop {
        let candidate = dir.join(format!(".{}.tmp-{}-{}", base, std::process::id(), counter));
        match OpenOptions::new().write(true).create_new(true).open(&candidate) {
            Ok(mut tmp) => {
                let written = tmp
                    .write_all(content.as_bytes())
                    .and_then(|_| tmp.flush());
                if let Err(e) = written {
                    let _ = fs::remove_file(&candidate);
                    return Err(StorageError::io(&candidate, e));
                }
                let _ = tmp.sync_all();
                break candidate;
            }
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                counter = counter.saturating_add(1);
            }
            Err(e) => return Err(StorageError::io(&candidate, e)),
        }
    };

    if let Err(e) = fs::rename(&tmp_path, path) {
        let _ = fs::remove_file(&tmp_path);
        return Err(StorageError::io(path, e));
    }
    // Persist the rename (best-effort)
    if let Ok(dir_file) = File::open(dir) {
        let _ = dir_file.sync_all();
    }
    log::debug!("Saved {} player(s) to {}", list.len(), path.display());
    Ok(())
}
