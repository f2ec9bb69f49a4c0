// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Spray-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Spray and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

#![allow(dead_code)]

// Shared deterministic benchmark fixtures (no RNG).

use spray::model::{FootRule, Grade, Hold, HoldType, Point, Route, RouteId, Wall, WallId};

pub use tempfile::TempDir;

pub fn temp_dir(prefix: &str) -> TempDir {
    tempfile::Builder::new()
        .prefix(&format!("spray_bench_{prefix}_"))
        .tempdir()
        .expect("create temp dir")
}

/// Cheap stable position generator in `[0, 100)`; walks the photo in a Weyl sequence.
fn spread(idx: usize, step: f64) -> f64 {
    (idx as f64 * step).fract() * 100.0
}

pub fn checksum_holds(holds: &[Hold]) -> u64 {
    let mut acc = 0u64;
    for hold in holds {
        acc = acc.wrapping_mul(131).wrapping_add(hold.x.to_bits());
        acc = acc.wrapping_mul(131).wrapping_add(hold.y.to_bits());
        acc = acc.wrapping_mul(131).wrapping_add(hold.hold_type as u64);
    }
    acc
}

pub mod holds {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum Case {
        /// A typical boulder problem.
        Sparse,
        /// A spray wall with every hold marked.
        Dense,
        Huge,
    }

    impl Case {
        pub const fn id(self) -> &'static str {
            match self {
                Self::Sparse => "sparse",
                Self::Dense => "dense",
                Self::Huge => "huge",
            }
        }

        pub const fn count(self) -> usize {
            match self {
                Self::Sparse => 12,
                Self::Dense => 200,
                Self::Huge => 2_000,
            }
        }
    }

    pub fn layout(count: usize) -> Vec<Hold> {
        (0..count)
            .map(|idx| {
                let point = Point::new(spread(idx, 0.618_033_988_75), spread(idx, 0.754_877_666_25));
                Hold::new(point, HoldType::ALL[idx % HoldType::ALL.len()])
            })
            .collect()
    }

    pub fn fixture(case: Case) -> Vec<Hold> {
        layout(case.count())
    }

    /// Tap positions that alternate between hitting existing holds and empty space.
    pub fn tap_points(holds: &[Hold], count: usize) -> Vec<Point> {
        (0..count)
            .map(|idx| match holds.get(idx % holds.len().max(1)) {
                Some(hold) if idx % 2 == 0 => Point::new(hold.x + 0.5, hold.y + 0.5),
                _ => Point::new(spread(idx, 0.414_213_562_37), spread(idx, 0.732_050_807_57)),
            })
            .collect()
    }
}

pub mod library {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Params {
        pub walls: usize,
        pub routes_per_wall: usize,
        pub holds_per_route: usize,
        /// Bytes of raw image payload per wall; `0` stores reference paths only.
        pub inline_image_bytes: usize,
    }

    impl Params {
        pub const fn new(
            walls: usize,
            routes_per_wall: usize,
            holds_per_route: usize,
            inline_image_bytes: usize,
        ) -> Self {
            Self {
                walls,
                routes_per_wall,
                holds_per_route,
                inline_image_bytes,
            }
        }
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum Case {
        Small,
        Medium,
        Large,
    }

    impl Case {
        pub const fn id(self) -> &'static str {
            match self {
                Self::Small => "small",
                Self::Medium => "medium",
                Self::Large => "large",
            }
        }

        pub const fn params(self) -> Params {
            match self {
                Self::Small => Params::new(2, 5, 12, 0),
                Self::Medium => Params::new(10, 20, 20, 0),
                Self::Large => Params::new(40, 50, 30, 0),
            }
        }
    }

    pub struct Library {
        pub walls: Vec<Wall>,
        pub routes: Vec<Route>,
    }

    fn wall_id(idx: usize) -> WallId {
        WallId::new(format!("wall_{idx:03}")).expect("valid wall id")
    }

    fn route_id(wall_idx: usize, idx: usize) -> RouteId {
        RouteId::new(format!("route_{wall_idx:03}_{idx:03}")).expect("valid route id")
    }

    /// `data:image/png;base64,...` of `len` raw bytes (deterministic content).
    pub fn data_uri(len: usize) -> String {
        use base64::Engine as _;
        let bytes: Vec<u8> = (0..len).map(|idx| (idx.wrapping_mul(31) % 251) as u8).collect();
        format!(
            "data:image/png;base64,{}",
            base64::engine::general_purpose::STANDARD.encode(bytes)
        )
    }

    pub fn build(params: Params) -> Library {
        let mut walls = Vec::with_capacity(params.walls);
        let mut routes = Vec::with_capacity(params.walls * params.routes_per_wall);

        for wall_idx in 0..params.walls {
            let id = wall_id(wall_idx);
            let image = if params.inline_image_bytes > 0 {
                data_uri(params.inline_image_bytes)
            } else {
                format!("/uploads/wall-{id}.jpeg")
            };
            walls.push(Wall {
                id: id.clone(),
                image,
                name: format!("Wall {wall_idx}"),
                created_at: None,
            });

            for idx in 0..params.routes_per_wall {
                routes.push(Route {
                    id: route_id(wall_idx, idx),
                    name: format!("Problem {idx}"),
                    setter: "bench".to_owned(),
                    grade: Grade::new((idx % usize::from(Grade::MAX_TIER + 1)) as u8)
                        .unwrap_or_default(),
                    notes: String::new(),
                    foot_rule: if idx % 3 == 0 { FootRule::Any } else { FootRule::Marked },
                    holds: holds::layout(params.holds_per_route),
                    wall_id: id.clone(),
                    created_at: None,
                    updated_at: None,
                });
            }
        }

        Library { walls, routes }
    }

    pub fn fixture(case: Case) -> Library {
        build(case.params())
    }
}
