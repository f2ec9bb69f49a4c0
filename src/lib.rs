// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Spray-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Spray and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Spray: a climbing route designer.
//!
//! A JSON-file collection service for wall photos and routes (`store`, `api`), a key/value
//! client for it (`client`), and the route editor that places typed holds on a photo
//! (`editor`).

pub mod api;
pub mod client;
pub mod config;
pub mod editor;
pub mod model;
pub mod store;
