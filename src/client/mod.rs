// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Spray-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Spray and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Client side of the collection service: composite `type:id` keys on top of REST calls.

pub mod key;
pub mod storage;
pub mod transport;

pub use key::{ParseKeyError, StorageKey};
pub use storage::{StorageAdapter, StorageError};
pub use transport::{HttpTransport, LocalTransport, Reply, Request, Transport, TransportError};
