// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Spray-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Spray and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Editor state for one wall and the route being viewed or built on it.
//!
//! Everything the editor shows lives in a single [`EditorState`] value. User intents are
//! [`Action`]s applied with [`EditorState::apply`]; actions that do not make sense in the
//! current [`Mode`] leave the state untouched.

use chrono::{DateTime, Utc};

use super::hit_test::{ImageRect, TapOutcome, TapToken, TapTracker};
use crate::model::{
    FootRule, Grade, Hold, HoldType, Route, RouteId, Wall, WallId, UNNAMED_WALL_NAME,
    UNTITLED_ROUTE_NAME,
};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    /// No photo loaded.
    #[default]
    NoWall,
    /// A wall is loaded; pick or start a route.
    Choose,
    /// Read-only display of a saved route.
    View,
    /// Building or editing a route.
    Create,
}

/// The wall currently on screen.
#[derive(Debug, Clone, PartialEq)]
pub struct ActiveWall {
    pub id: WallId,
    pub name: String,
    pub image: String,
    /// `None` until the wall has been saved or loaded from the library.
    pub created_at: Option<DateTime<Utc>>,
}

impl ActiveWall {
    pub fn from_wall(wall: Wall) -> Self {
        Self {
            id: wall.id,
            name: wall.name,
            image: wall.image,
            created_at: wall.created_at,
        }
    }

    /// The record to persist, filling in the default name and `now` for a first save.
    pub fn to_wall(&self, now: DateTime<Utc>) -> Wall {
        let name = if self.name.trim().is_empty() {
            UNNAMED_WALL_NAME.to_owned()
        } else {
            self.name.clone()
        };
        Wall {
            id: self.id.clone(),
            image: self.image.clone(),
            name,
            created_at: Some(self.created_at.unwrap_or(now)),
        }
    }
}

/// Route fields being edited.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct RouteDraft {
    /// Set once the route has been saved or loaded.
    pub id: Option<RouteId>,
    pub name: String,
    pub setter: String,
    pub grade: Grade,
    pub notes: String,
    pub foot_rule: FootRule,
    pub holds: Vec<Hold>,
    pub created_at: Option<DateTime<Utc>>,
}

impl RouteDraft {
    pub fn from_route(route: Route) -> Self {
        Self {
            id: Some(route.id),
            name: route.name,
            setter: route.setter,
            grade: route.grade,
            notes: route.notes,
            foot_rule: route.foot_rule,
            holds: route.holds,
            created_at: route.created_at,
        }
    }

    pub fn to_route(&self, id: RouteId, wall_id: WallId, now: DateTime<Utc>) -> Route {
        let name = if self.name.trim().is_empty() {
            UNTITLED_ROUTE_NAME.to_owned()
        } else {
            self.name.clone()
        };
        Route {
            id,
            name,
            setter: self.setter.clone(),
            grade: self.grade,
            notes: self.notes.clone(),
            foot_rule: self.foot_rule,
            holds: self.holds.clone(),
            wall_id,
            created_at: Some(self.created_at.unwrap_or(now)),
            updated_at: Some(now),
        }
    }

    pub fn hold_count(&self, hold_type: HoldType) -> usize {
        self.holds
            .iter()
            .filter(|hold| hold.hold_type == hold_type)
            .count()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// A new photo was chosen; starts an unsaved wall.
    PickImage {
        wall_id: WallId,
        file_name: String,
        image: String,
    },
    /// A saved wall was opened from the library.
    LoadWall(Wall),
    /// A saved route was opened. `wall` is the route's wall, needed when it differs from the
    /// active one.
    LoadRoute { route: Route, wall: Option<Wall> },
    StartRoute,
    BackToWall,
    /// Drops the wall and everything on it.
    Reset,
    /// Resets the route fields and the selected hold type.
    ClearRoute,
    SelectHoldType(HoldType),
    SetRouteName(String),
    SetSetter(String),
    SetGrade(Grade),
    SetNotes(String),
    SetFootRule(FootRule),
    Undo,
    RenameWall(String),
    ReplaceWallImage(String),
    /// The service stored the wall; adopts its image reference and creation time.
    WallSaved(Wall),
    /// The service stored the route; the draft now edits that record.
    RouteSaved(Route),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct EditorState {
    rev: u64,
    mode: Mode,
    wall: Option<ActiveWall>,
    route: RouteDraft,
    selected_type: HoldType,
    taps: TapTracker,
}

impl EditorState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bumped on every change, so drivers can skip redraws.
    pub fn rev(&self) -> u64 {
        self.rev
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn wall(&self) -> Option<&ActiveWall> {
        self.wall.as_ref()
    }

    pub fn wall_id(&self) -> Option<&WallId> {
        self.wall.as_ref().map(|wall| &wall.id)
    }

    pub fn route(&self) -> &RouteDraft {
        &self.route
    }

    pub fn holds(&self) -> &[Hold] {
        &self.route.holds
    }

    pub fn selected_type(&self) -> HoldType {
        self.selected_type
    }

    pub fn taps(&self) -> &TapTracker {
        &self.taps
    }

    pub fn hold_count(&self, hold_type: HoldType) -> usize {
        self.route.hold_count(hold_type)
    }

    pub fn apply(self, action: Action) -> Self {
        let mut next = self.clone().transition(action);
        if next != self {
            next.rev = self.rev.wrapping_add(1);
        }
        next
    }

    /// Pointer tap on the photo. Only reacts in [`Mode::Create`] with a laid-out image.
    pub fn tap(
        mut self,
        rect: ImageRect,
        client_x: f64,
        client_y: f64,
        now_ms: u64,
    ) -> (Self, Option<TapOutcome>) {
        if self.mode != Mode::Create {
            return (self, None);
        }
        let Some(point) = rect.to_percent(client_x, client_y) else {
            return (self, None);
        };
        let outcome = self
            .taps
            .tap(&mut self.route.holds, point, self.selected_type, now_ms);
        self.rev = self.rev.wrapping_add(1);
        (self, Some(outcome))
    }

    /// Double-tap timer elapsed for `token`; places the single-tap hold if still pending.
    pub fn fire_tap_timer(mut self, token: TapToken, now_ms: u64) -> (Self, Option<Hold>) {
        if self.mode != Mode::Create {
            return (self, None);
        }
        let added = self.taps.fire(&mut self.route.holds, token, now_ms);
        if added.is_some() {
            self.rev = self.rev.wrapping_add(1);
        }
        (self, added)
    }

    fn transition(mut self, action: Action) -> Self {
        match action {
            Action::PickImage {
                wall_id,
                file_name,
                image,
            } => {
                self.wall = Some(ActiveWall {
                    id: wall_id,
                    name: wall_name_from_file(&file_name),
                    image,
                    created_at: None,
                });
                self.reset_route();
                self.mode = Mode::Choose;
            }
            Action::LoadWall(wall) => {
                self.wall = Some(ActiveWall::from_wall(wall));
                self.reset_route();
                self.mode = Mode::Choose;
            }
            Action::LoadRoute { route, wall } => {
                let same_wall = self.wall_id() == Some(&route.wall_id);
                if !same_wall {
                    match wall {
                        Some(wall) if wall.id == route.wall_id => {
                            self.wall = Some(ActiveWall::from_wall(wall));
                        }
                        _ => return self,
                    }
                }
                self.taps.cancel();
                self.route = RouteDraft::from_route(route);
                if self.mode != Mode::Create {
                    self.mode = Mode::View;
                }
            }
            Action::StartRoute if self.mode == Mode::Choose => {
                self.reset_route();
                self.mode = Mode::Create;
            }
            Action::BackToWall => match self.mode {
                Mode::View => {
                    self.taps.cancel();
                    self.route.holds.clear();
                    self.route.id = None;
                    self.route.created_at = None;
                    self.mode = Mode::Choose;
                }
                Mode::Create => {
                    self.reset_route();
                    self.mode = Mode::Choose;
                }
                Mode::NoWall | Mode::Choose => {}
            },
            Action::Reset => {
                self.wall = None;
                self.reset_route();
                self.mode = Mode::NoWall;
            }
            Action::ClearRoute => self.reset_route(),
            Action::SelectHoldType(hold_type) if self.mode == Mode::Create => {
                self.selected_type = hold_type;
            }
            Action::SetRouteName(name) if self.mode == Mode::Create => self.route.name = name,
            Action::SetSetter(setter) if self.mode == Mode::Create => self.route.setter = setter,
            Action::SetGrade(grade) if self.mode == Mode::Create => self.route.grade = grade,
            Action::SetNotes(notes) if self.mode == Mode::Create => self.route.notes = notes,
            Action::SetFootRule(rule) if self.mode == Mode::Create => self.route.foot_rule = rule,
            Action::Undo if self.mode == Mode::Create => {
                self.taps.cancel();
                self.route.holds.pop();
            }
            Action::RenameWall(name) => {
                let name = name.trim();
                if let Some(wall) = self.wall.as_mut().filter(|_| !name.is_empty()) {
                    wall.name = name.to_owned();
                }
            }
            Action::ReplaceWallImage(image) => {
                if let Some(wall) = self.wall.as_mut() {
                    wall.image = image;
                }
            }
            Action::WallSaved(saved) => {
                if let Some(wall) = self.wall.as_mut().filter(|wall| wall.id == saved.id) {
                    wall.image = saved.image;
                    wall.name = saved.name;
                    wall.created_at = saved.created_at;
                }
            }
            Action::RouteSaved(saved) => {
                if self.wall_id() == Some(&saved.wall_id) {
                    self.route.id = Some(saved.id);
                    self.route.created_at = saved.created_at;
                }
            }
            Action::StartRoute
            | Action::SelectHoldType(_)
            | Action::SetRouteName(_)
            | Action::SetSetter(_)
            | Action::SetGrade(_)
            | Action::SetNotes(_)
            | Action::SetFootRule(_)
            | Action::Undo => {}
        }
        self
    }

    fn reset_route(&mut self) {
        self.taps.cancel();
        self.route = RouteDraft::default();
        self.selected_type = HoldType::Start;
    }
}

/// Wall name suggested by a picked file: the file name without its last extension.
pub fn wall_name_from_file(file_name: &str) -> String {
    let base = file_name.rsplit(['/', '\\']).next().unwrap_or(file_name);
    match base.rfind('.') {
        Some(dot) if dot > 0 => base[..dot].to_owned(),
        _ => base.to_owned(),
    }
}

#[cfg(test)]
mod tests;
