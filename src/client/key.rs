// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Spray-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Spray and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;
use std::str::FromStr;

/// A composite storage key `"<type>:<id>"`, e.g. `wall:1704067200000`.
///
/// The type names a record kind in the singular; its collection is the plural (`walls`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StorageKey {
    kind: String,
    id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid storage key {raw:?}: {reason}")]
pub struct ParseKeyError {
    raw: String,
    reason: &'static str,
}

impl StorageKey {
    pub fn new(kind: impl Into<String>, id: impl Into<String>) -> Result<Self, ParseKeyError> {
        let kind = kind.into();
        let id = id.into();
        let fail = |reason| ParseKeyError {
            raw: format!("{kind}:{id}"),
            reason,
        };

        validate_kind(&kind).map_err(fail)?;
        if id.is_empty() {
            return Err(fail("id must not be empty"));
        }
        if id.contains('/') {
            return Err(fail("id must not contain '/'"));
        }
        Ok(Self { kind, id })
    }

    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn collection(&self) -> String {
        collection_for_kind(&self.kind)
    }
}

impl fmt::Display for StorageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.kind, self.id)
    }
}

impl FromStr for StorageKey {
    type Err = ParseKeyError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let Some((kind, id)) = raw.split_once(':') else {
            return Err(ParseKeyError {
                raw: raw.to_owned(),
                reason: "missing ':' separator",
            });
        };
        Self::new(kind, id)
    }
}

/// The record kind named by a list prefix: `"wall:"` and `"wall"` both mean `wall`.
pub fn kind_from_prefix(prefix: &str) -> Result<&str, ParseKeyError> {
    let kind = prefix.strip_suffix(':').unwrap_or(prefix);
    validate_kind(kind).map_err(|reason| ParseKeyError {
        raw: prefix.to_owned(),
        reason,
    })?;
    Ok(kind)
}

pub fn collection_for_kind(kind: &str) -> String {
    format!("{kind}s")
}

fn validate_kind(kind: &str) -> Result<(), &'static str> {
    if kind.is_empty() {
        return Err("type must not be empty");
    }
    if kind.contains([':', '/']) {
        return Err("type must not contain ':' or '/'");
    }
    Ok(())
}
