// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Spray-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Spray and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// What a marked hold is used for on a route.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HoldType {
    #[default]
    Start,
    Hand,
    Foot,
    Finish,
}

impl HoldType {
    pub const ALL: [HoldType; 4] = [Self::Start, Self::Hand, Self::Foot, Self::Finish];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Hand => "hand",
            Self::Foot => "foot",
            Self::Finish => "finish",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Start => "Start",
            Self::Hand => "Hand",
            Self::Foot => "Foot",
            Self::Finish => "Finish",
        }
    }
}

impl fmt::Display for HoldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown hold type: {0:?}")]
pub struct ParseHoldTypeError(String);

impl FromStr for HoldType {
    type Err = ParseHoldTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| ParseHoldTypeError(s.to_owned()))
    }
}

/// A position in image percentage space: `(0, 0)` is the top-left corner of the photo and
/// `(100, 100)` the bottom-right, independent of the rendered resolution.
#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(self, other: Point) -> f64 {
        let dx = (self.x - other.x).abs();
        let dy = (self.y - other.y).abs();
        (dx * dx + dy * dy).sqrt()
    }
}

/// A typed marker placed on a wall photo.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hold {
    pub x: f64,
    pub y: f64,
    #[serde(rename = "type")]
    pub hold_type: HoldType,
}

impl Hold {
    pub fn new(point: Point, hold_type: HoldType) -> Self {
        Self {
            x: point.x,
            y: point.y,
            hold_type,
        }
    }

    pub fn point(&self) -> Point {
        Point::new(self.x, self.y)
    }
}
