// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Spray-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Spray and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::hold::{Hold, HoldType};
use super::ids::{RouteId, WallId};

pub const UNTITLED_ROUTE_NAME: &str = "Untitled Route";

/// Bouldering difficulty on the V scale, `V0` through `V17`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Grade(u8);

impl Grade {
    pub const MAX_TIER: u8 = 17;
    pub const EASIEST: Grade = Grade(0);

    pub fn new(tier: u8) -> Option<Self> {
        (tier <= Self::MAX_TIER).then_some(Self(tier))
    }

    pub fn tier(self) -> u8 {
        self.0
    }

    pub fn all() -> impl Iterator<Item = Grade> {
        (0..=Self::MAX_TIER).map(Grade)
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "V{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid grade {0:?}: expected V0..V17")]
pub struct ParseGradeError(String);

impl FromStr for Grade {
    type Err = ParseGradeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.strip_prefix('V')
            .filter(|digits| !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()))
            .and_then(|digits| digits.parse::<u8>().ok())
            .and_then(Grade::new)
            .ok_or_else(|| ParseGradeError(s.to_owned()))
    }
}

impl Serialize for Grade {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Grade {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Whether feet are restricted to marked holds.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FootRule {
    #[default]
    Marked,
    Any,
}

impl FootRule {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Marked => "marked",
            Self::Any => "any",
        }
    }
}

/// A saved route as persisted in the `routes` collection.
///
/// Every field except `id` and `wallId` tolerates being absent on load and falls back to the
/// editor defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Route {
    pub id: RouteId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub setter: String,
    #[serde(default)]
    pub grade: Grade,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub foot_rule: FootRule,
    #[serde(default)]
    pub holds: Vec<Hold>,
    pub wall_id: WallId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Route {
    pub fn hold_count(&self, hold_type: HoldType) -> usize {
        self.holds.iter().filter(|hold| hold.hold_type == hold_type).count()
    }
}
