// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Spray-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Spray and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Typed records: walls, routes and the holds placed on them.
//!
//! The service itself stores schemaless JSON; these types are what the editor reads and
//! writes through the storage adapter.

pub mod hold;
pub mod ids;
pub mod route;
pub mod wall;

pub use hold::{Hold, HoldType, ParseHoldTypeError, Point};
pub use ids::{Id, IdError, RouteId, WallId};
pub use route::{FootRule, Grade, ParseGradeError, Route, UNTITLED_ROUTE_NAME};
pub use wall::{ImageRef, Wall, UNNAMED_WALL_NAME, UPLOADS_PREFIX};
