// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Spray-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Spray and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Turns inline `data:image/...;base64,` wall photos into files under the uploads directory.

use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};
use std::sync::OnceLock;

use base64::alphabet;
use base64::engine::general_purpose::{GeneralPurpose, GeneralPurposeConfig};
use base64::engine::DecodePaddingMode;
use base64::Engine as _;
use regex::Regex;

use super::document::{write_atomic, StoreError, WriteDurability};
use crate::model::{ImageRef, UPLOADS_PREFIX};

const LENIENT_BASE64: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

fn data_uri_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^data:image/([a-zA-Z]+);base64,(.+)$").expect("data uri pattern is valid")
    })
}

/// The parts of a recognized inline image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DataUri<'a> {
    /// Declared image subtype, used verbatim as the file extension.
    pub ext: &'a str,
    pub payload: &'a str,
}

pub fn parse_data_uri(value: &str) -> Option<DataUri<'_>> {
    let captures = data_uri_pattern().captures(value)?;
    let ext = captures.get(1)?.as_str();
    let payload = captures.get(2)?.as_str();
    Some(DataUri { ext, payload })
}

pub fn stored_file_name(wall_id: &str, ext: &str) -> String {
    format!("wall-{wall_id}.{ext}")
}

/// Writes and removes wall photos in one flat directory.
#[derive(Debug, Clone)]
pub struct ImageMaterializer {
    uploads_dir: PathBuf,
    durability: WriteDurability,
}

impl ImageMaterializer {
    pub fn new(uploads_dir: impl Into<PathBuf>) -> Self {
        Self {
            uploads_dir: uploads_dir.into(),
            durability: WriteDurability::default(),
        }
    }

    pub fn with_durability(mut self, durability: WriteDurability) -> Self {
        self.durability = durability;
        self
    }

    pub fn uploads_dir(&self) -> &Path {
        &self.uploads_dir
    }

    /// Resolves a bare file name inside the uploads directory.
    ///
    /// Returns `None` for anything that is not exactly one plain path component.
    pub fn resolve(&self, file_name: &str) -> Option<PathBuf> {
        is_plain_file_name(file_name).then(|| self.uploads_dir.join(file_name))
    }

    /// Stores `image` for `wall_id` when it is an inline data URI and returns the reference to
    /// persist in its place. Any other value comes back unchanged.
    pub fn materialize(&self, wall_id: &str, image: &str) -> Result<String, StoreError> {
        let Some(data_uri) = parse_data_uri(image) else {
            return Ok(image.to_owned());
        };

        let file_name = stored_file_name(wall_id, data_uri.ext);
        let Some(path) = self.resolve(&file_name) else {
            tracing::warn!(wall_id, "wall id is not usable as a file name; keeping inline image");
            return Ok(image.to_owned());
        };

        let bytes = match LENIENT_BASE64.decode(data_uri.payload) {
            Ok(bytes) => bytes,
            Err(err) => {
                tracing::warn!(wall_id, error = %err, "malformed base64 image payload; keeping inline image");
                return Ok(image.to_owned());
            }
        };

        write_atomic(&path, &bytes, self.durability)?;
        tracing::debug!(wall_id, path = %path.display(), bytes = bytes.len(), "stored wall image");

        Ok(format!("{UPLOADS_PREFIX}{file_name}"))
    }

    /// Deletes the file behind a stored `/uploads/...` reference.
    ///
    /// Returns whether a file was removed; references of any other form are ignored.
    pub fn remove_stored(&self, image: &str) -> Result<bool, StoreError> {
        let ImageRef::Stored(file_name) = ImageRef::classify(image) else {
            return Ok(false);
        };
        let Some(path) = self.resolve(file_name) else {
            tracing::warn!(image, "refusing to remove image outside the uploads directory");
            return Ok(false);
        };

        match fs::remove_file(&path) {
            Ok(()) => {
                tracing::debug!(path = %path.display(), "removed wall image");
                Ok(true)
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(source) => Err(StoreError::Io { path, source }),
        }
    }
}

fn is_plain_file_name(file_name: &str) -> bool {
    if file_name.is_empty() || file_name.contains(['/', '\\']) {
        return false;
    }
    let mut components = Path::new(file_name).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    )
}
