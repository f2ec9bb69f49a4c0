// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Spray-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Spray and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fs;
use std::io;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub const WALLS: &str = "walls";
pub const ROUTES: &str = "routes";

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("io error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("json error at {path:?}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum WriteDurability {
    /// Fast, best-effort persistence.
    ///
    /// - Writes a temp file and renames atomically into place.
    /// - Does not perform per-file fsync/sync.
    #[default]
    BestEffort,

    /// Slower, best-effort durability.
    ///
    /// Attempts to flush written file contents and rename operations to stable storage where
    /// possible. Exact guarantees are platform/filesystem-dependent.
    Durable,
}

/// The whole persisted database: collection name to ordered records.
///
/// Records are kept as raw JSON; nothing here knows what a wall or a route looks like beyond
/// the string `id` used for lookups. Top-level values that are not arrays are carried through
/// untouched and read as absent collections.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Document {
    collections: Map<String, Value>,
}

impl Document {
    /// The document written on first use: empty `walls` and `routes`.
    pub fn seeded() -> Self {
        let mut collections = Map::new();
        collections.insert(WALLS.to_owned(), Value::Array(Vec::new()));
        collections.insert(ROUTES.to_owned(), Value::Array(Vec::new()));
        Self { collections }
    }

    pub fn collection_names(&self) -> impl Iterator<Item = &str> {
        self.collections
            .iter()
            .filter(|(_, value)| value.is_array())
            .map(|(name, _)| name.as_str())
    }

    pub fn collection(&self, name: &str) -> Option<&[Value]> {
        self.collections
            .get(name)?
            .as_array()
            .map(Vec::as_slice)
    }

    pub fn collection_mut(&mut self, name: &str) -> Option<&mut Vec<Value>> {
        self.collections.get_mut(name)?.as_array_mut()
    }

    /// The named collection, created empty when missing. A non-array value under that name is
    /// replaced.
    pub fn collection_or_insert(&mut self, name: &str) -> &mut Vec<Value> {
        let slot = self
            .collections
            .entry(name.to_owned())
            .or_insert_with(|| Value::Array(Vec::new()));
        if !slot.is_array() {
            tracing::warn!(collection = name, "replacing non-array value with a collection");
            *slot = Value::Array(Vec::new());
        }
        match slot {
            Value::Array(records) => records,
            _ => unreachable!("collection slot holds an array"),
        }
    }

    pub fn position(&self, name: &str, id: &str) -> Option<usize> {
        self.collection(name)?
            .iter()
            .position(|record| record_id(record) == Some(id))
    }

    pub fn find(&self, name: &str, id: &str) -> Option<&Value> {
        let index = self.position(name, id)?;
        self.collection(name).map(|records| &records[index])
    }
}

/// The string `id` of a record, if it has one.
pub fn record_id(record: &Value) -> Option<&str> {
    record.get("id").and_then(Value::as_str)
}

/// The single JSON file holding the [`Document`].
#[derive(Debug, Clone)]
pub struct DataFile {
    path: PathBuf,
    durability: WriteDurability,
}

impl DataFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            durability: WriteDurability::default(),
        }
    }

    pub fn with_durability(mut self, durability: WriteDurability) -> Self {
        self.durability = durability;
        self
    }

    pub fn durability(&self) -> WriteDurability {
        self.durability
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the whole document, creating a seeded one when the file does not exist yet.
    pub fn read_all(&self) -> Result<Document, StoreError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(source) if source.kind() == io::ErrorKind::NotFound => {
                let document = Document::seeded();
                self.write_all(&document)?;
                tracing::info!(path = %self.path.display(), "created empty data file");
                return Ok(document);
            }
            Err(source) => {
                return Err(StoreError::Io {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        serde_json::from_str(&raw).map_err(|source| StoreError::Json {
            path: self.path.clone(),
            source,
        })
    }

    /// Replaces the whole document on disk.
    pub fn write_all(&self, document: &Document) -> Result<(), StoreError> {
        let raw = serde_json::to_string_pretty(document).map_err(|source| StoreError::Json {
            path: self.path.clone(),
            source,
        })?;
        write_atomic(&self.path, format!("{raw}\n").as_bytes(), self.durability)
    }
}

pub(crate) fn write_atomic(
    path: &Path,
    contents: &[u8],
    durability: WriteDurability,
) -> Result<(), StoreError> {
    let Some(parent) = path.parent() else {
        return Err(StoreError::Io {
            path: path.to_path_buf(),
            source: io::Error::other("path has no parent"),
        });
    };

    let Some(file_name) = path.file_name() else {
        return Err(StoreError::Io {
            path: path.to_path_buf(),
            source: io::Error::other("path has no file name"),
        });
    };

    let parent = if parent.as_os_str().is_empty() {
        Path::new(".")
    } else {
        parent
    };
    fs::create_dir_all(parent).map_err(|source| StoreError::Io {
        path: parent.to_path_buf(),
        source,
    })?;

    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    let tmp_path = parent.join(format!(
        ".spray.tmp.{}.{}",
        file_name.to_string_lossy(),
        nanos
    ));

    let mut file = fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&tmp_path)
        .map_err(|source| StoreError::Io {
            path: tmp_path.clone(),
            source,
        })?;

    file.write_all(contents).map_err(|source| StoreError::Io {
        path: tmp_path.clone(),
        source,
    })?;

    if durability == WriteDurability::Durable {
        file.sync_all().map_err(|source| StoreError::Io {
            path: tmp_path.clone(),
            source,
        })?;
    }
    drop(file);

    if let Err(source) = rename_overwrite(&tmp_path, path) {
        let _ = fs::remove_file(&tmp_path);
        return Err(StoreError::Io {
            path: path.to_path_buf(),
            source,
        });
    }

    if durability == WriteDurability::Durable {
        #[cfg(unix)]
        {
            let dir = fs::File::open(parent).map_err(|source| StoreError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
            dir.sync_all().map_err(|source| StoreError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
    }

    Ok(())
}

fn rename_overwrite(from: &Path, to: &Path) -> io::Result<()> {
    #[cfg(windows)]
    {
        match fs::rename(from, to) {
            Ok(()) => Ok(()),
            Err(err)
                if matches!(
                    err.kind(),
                    io::ErrorKind::AlreadyExists | io::ErrorKind::PermissionDenied
                ) =>
            {
                let _ = fs::remove_file(to);
                fs::rename(from, to)
            }
            Err(err) => Err(err),
        }
    }

    #[cfg(not(windows))]
    {
        fs::rename(from, to)
    }
}
