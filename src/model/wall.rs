// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Spray-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Spray and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ids::WallId;

pub const UNNAMED_WALL_NAME: &str = "Unnamed Wall";

/// URL prefix under which stored wall photos are served.
pub const UPLOADS_PREFIX: &str = "/uploads/";

/// A saved wall photo as persisted in the `walls` collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Wall {
    pub id: WallId,
    pub image: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Wall {
    pub fn image_ref(&self) -> ImageRef<'_> {
        ImageRef::classify(&self.image)
    }
}

/// The two forms a wall `image` can take, plus anything else a caller chose to send.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageRef<'a> {
    /// A `data:` URI that has not been written to disk yet.
    Inline(&'a str),
    /// A file name under the uploads directory.
    Stored(&'a str),
    Other(&'a str),
}

impl<'a> ImageRef<'a> {
    pub fn classify(image: &'a str) -> Self {
        if image.starts_with("data:") {
            Self::Inline(image)
        } else if let Some(file_name) = image.strip_prefix(UPLOADS_PREFIX) {
            Self::Stored(file_name)
        } else {
            Self::Other(image)
        }
    }

    pub fn is_inline(self) -> bool {
        matches!(self, Self::Inline(_))
    }
}
