// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Spray-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Spray and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! The collection service: generic CRUD over the data file and its HTTP router.

pub mod collection;
pub mod http;

pub use collection::{ApiError, CollectionApi, Deleted};
pub use http::{router, router_with_body_limit, DEFAULT_BODY_LIMIT};
