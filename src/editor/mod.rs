// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Spray-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Spray and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

pub mod session;
pub mod state;

pub use hit_test::{
    nearest_hold, ImageRect, PendingTap, TapOutcome, TapToken, TapTracker, DOUBLE_TAP_WINDOW_MS,
    HIT_THRESHOLD,
};
pub use session::{DeleteRequest, DeleteTarget, EditorError, EditorSession};
pub use state::{wall_name_from_file, Action, ActiveWall, EditorState, Mode, RouteDraft};
