// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Spray-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Spray and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Persistence on disk.
//!
//! One JSON document holds every collection and is rewritten whole on each mutation; wall
//! photos live as individual files next to it.

pub mod document;
pub mod images;

pub use document::{record_id, DataFile, Document, StoreError, WriteDurability, ROUTES, WALLS};
pub use images::{parse_data_uri, stored_file_name, DataUri, ImageMaterializer};
