//! Follower import/export as JSON
//!
//! Export writes `{ followers, date, version }`. Import only requires a
//! `followers` array; extra fields are ignored and entries are taken
//! leniently (non-string fields are stringified, missing ones become empty).

use std::path::Path;

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::follower::Follower;
use crate::core::{Error, Result};

/// Version tag written on export
pub const FORMAT_VERSION: &str = "1.0";

/// On-disk export document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportDocument {
    pub followers: Vec<Follower>,
    /// Export time, ISO-8601
    pub date: String,
    pub version: String,
}

impl ExportDocument {
    pub fn new(followers: &[Follower]) -> Self {
        Self {
            followers: followers.to_vec(),
            date: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            version: FORMAT_VERSION.to_string(),
        }
    }
}

/// Serialize followers to a pretty-printed export document
pub fn export_json(followers: &[Follower]) -> Result<String> {
    Ok(serde_json::to_string_pretty(&ExportDocument::new(followers))?)
}

/// Parse an import document. Fails only when the text is not JSON or has no
/// `followers` array.
pub fn parse_import(json: &str) -> Result<Vec<Follower>> {
    let value: Value = serde_json::from_str(json)
        .map_err(|e| Error::Import(format!("unparseable JSON: {}", e)))?;

    let entries = value
        .get("followers")
        .and_then(Value::as_array)
        .ok_or_else(|| Error::Import("missing `followers` array".into()))?;

    Ok(entries
        .iter()
        .map(|entry| Follower::new(field(entry, "name"), field(entry, "date")))
        .collect())
}

fn field(entry: &Value, key: &str) -> String {
    match entry.get(key) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
    }
}

/// Write an export document to disk
pub fn save(path: &Path, followers: &[Follower]) -> Result<()> {
    let json = export_json(followers)?;
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(path, json)?;
    Ok(())
}

/// Read and parse an import document from disk
pub fn load(path: &Path) -> Result<Vec<Follower>> {
    let json = std::fs::read_to_string(path)?;
    parse_import(&json)
}
