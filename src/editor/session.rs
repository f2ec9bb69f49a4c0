// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Spray-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Spray and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Drives [`EditorState`] against the storage service.
//!
//! Every persisting operation talks to the service first and only advances the editor state
//! once the call succeeded, so a failed save leaves the editor exactly as it was.

use std::cmp::Reverse;

use chrono::{DateTime, Utc};

use super::hit_test::{ImageRect, TapOutcome, TapToken};
use super::state::{Action, EditorState, Mode};
use crate::client::{StorageAdapter, StorageError, Transport};
use crate::model::{Hold, Route, RouteId, Wall, WallId};

#[derive(Debug, thiserror::Error)]
pub enum EditorError {
    #[error("no wall is loaded")]
    NoWall,
    #[error("no route is being edited")]
    NotEditing,
    #[error("{kind} {id} not found")]
    NotFound { kind: &'static str, id: String },
    #[error("nothing is waiting for confirmation")]
    NothingToConfirm,
    #[error(transparent)]
    Storage(#[from] StorageError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteTarget {
    Wall(WallId),
    Route(RouteId),
}

/// A delete the user still has to confirm.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteRequest {
    pub target: DeleteTarget,
    pub message: String,
}

#[derive(Debug)]
pub struct EditorSession<T> {
    storage: StorageAdapter<T>,
    state: EditorState,
    walls: Vec<Wall>,
    routes: Vec<Route>,
    pending_delete: Option<DeleteRequest>,
}

impl<T: Transport> EditorSession<T> {
    pub fn new(storage: StorageAdapter<T>) -> Self {
        Self {
            storage,
            state: EditorState::new(),
            walls: Vec::new(),
            routes: Vec::new(),
            pending_delete: None,
        }
    }

    pub fn storage(&self) -> &StorageAdapter<T> {
        &self.storage
    }

    pub fn state(&self) -> &EditorState {
        &self.state
    }

    /// Saved walls, newest first.
    pub fn walls(&self) -> &[Wall] {
        &self.walls
    }

    /// Saved routes across all walls, most recently updated first.
    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// Routes set on one wall, easiest first.
    pub fn routes_for_wall(&self, wall_id: &WallId) -> Vec<&Route> {
        let mut routes: Vec<&Route> = self
            .routes
            .iter()
            .filter(|route| &route.wall_id == wall_id)
            .collect();
        routes.sort_by_key(|route| route.grade);
        routes
    }

    pub fn route_count(&self, wall_id: &WallId) -> usize {
        self.routes
            .iter()
            .filter(|route| &route.wall_id == wall_id)
            .count()
    }

    pub fn pending_delete(&self) -> Option<&DeleteRequest> {
        self.pending_delete.as_ref()
    }

    /// Applies a local edit that needs no storage call.
    pub fn apply(&mut self, action: Action) {
        self.state = std::mem::take(&mut self.state).apply(action);
    }

    pub fn tap(
        &mut self,
        rect: ImageRect,
        client_x: f64,
        client_y: f64,
        now_ms: u64,
    ) -> Option<TapOutcome> {
        let (state, outcome) = std::mem::take(&mut self.state).tap(rect, client_x, client_y, now_ms);
        self.state = state;
        outcome
    }

    pub fn fire_tap_timer(&mut self, token: TapToken, now_ms: u64) -> Option<Hold> {
        let (state, added) = std::mem::take(&mut self.state).fire_tap_timer(token, now_ms);
        self.state = state;
        added
    }

    /// Reloads both libraries from the service.
    pub async fn load_library(&mut self) -> Result<(), EditorError> {
        let mut walls: Vec<Wall> = self.storage.records("wall:").await?;
        let mut routes: Vec<Route> = self.storage.records("route:").await?;
        walls.sort_by_key(|wall| Reverse(wall.created_at));
        routes.sort_by_key(|route| Reverse(route.updated_at));
        tracing::debug!(walls = walls.len(), routes = routes.len(), "library loaded");
        self.walls = walls;
        self.routes = routes;
        Ok(())
    }

    /// Starts a new, unsaved wall from a picked photo. The id is minted from `now`.
    pub fn pick_image(&mut self, file_name: &str, image: String, now: DateTime<Utc>) -> WallId {
        let wall_id = WallId::from_millis(now.timestamp_millis());
        self.apply(Action::PickImage {
            wall_id: wall_id.clone(),
            file_name: file_name.to_owned(),
            image,
        });
        wall_id
    }

    pub async fn save_wall(&mut self, now: DateTime<Utc>) -> Result<Wall, EditorError> {
        let wall = self.state.wall().ok_or(EditorError::NoWall)?.to_wall(now);
        let stored: Wall = self.storage.set_record(&wall_key(&wall.id), &wall).await?;
        tracing::info!(wall_id = %stored.id, "wall saved");

        upsert_wall(&mut self.walls, stored.clone());
        self.apply(Action::WallSaved(stored.clone()));
        Ok(stored)
    }

    /// Saves the wall, then the route on it. A route without an id gets one minted from `now`.
    ///
    /// Only a route in create mode can be saved.
    pub async fn save_route(&mut self, now: DateTime<Utc>) -> Result<Route, EditorError> {
        match self.state.mode() {
            Mode::Create => {}
            Mode::NoWall => return Err(EditorError::NoWall),
            Mode::Choose | Mode::View => return Err(EditorError::NotEditing),
        }
        let wall = self.save_wall(now).await?;
        let route_id = self
            .state
            .route()
            .id
            .clone()
            .unwrap_or_else(|| RouteId::from_millis(now.timestamp_millis()));
        let route = self.state.route().to_route(route_id, wall.id, now);

        let stored: Route = self
            .storage
            .set_record(&route_key(&route.id), &route)
            .await?;
        tracing::info!(route_id = %stored.id, wall_id = %stored.wall_id, "route saved");

        // Just updated, so it leads the library.
        self.routes.retain(|saved| saved.id != stored.id);
        self.routes.insert(0, stored.clone());
        self.apply(Action::RouteSaved(stored.clone()));
        Ok(stored)
    }

    pub async fn load_wall(&mut self, wall_id: &WallId) -> Result<(), EditorError> {
        let wall: Wall = self
            .storage
            .get_record(&wall_key(wall_id))
            .await?
            .ok_or_else(|| not_found("wall", wall_id.as_str()))?;
        self.apply(Action::LoadWall(wall));
        Ok(())
    }

    /// Opens a saved route, switching to its wall first when that is not the active one.
    pub async fn load_route(&mut self, route_id: &RouteId) -> Result<(), EditorError> {
        let route: Route = self
            .storage
            .get_record(&route_key(route_id))
            .await?
            .ok_or_else(|| not_found("route", route_id.as_str()))?;

        let wall = if self.state.wall_id() == Some(&route.wall_id) {
            None
        } else {
            let wall: Wall = self
                .storage
                .get_record(&wall_key(&route.wall_id))
                .await?
                .ok_or_else(|| not_found("wall", route.wall_id.as_str()))?;
            Some(wall)
        };
        self.apply(Action::LoadRoute { route, wall });
        Ok(())
    }

    /// Renames the active wall. Blank names are ignored. The stored record is only updated
    /// when the wall has been saved before; returns whether it was.
    pub async fn rename_wall(&mut self, name: &str) -> Result<bool, EditorError> {
        let wall_id = self.state.wall_id().ok_or(EditorError::NoWall)?.clone();
        let name = name.trim();
        if name.is_empty() {
            return Ok(false);
        }

        let key = wall_key(&wall_id);
        let Some(mut wall) = self.storage.get_record::<Wall>(&key).await? else {
            self.apply(Action::RenameWall(name.to_owned()));
            return Ok(false);
        };
        wall.name = name.to_owned();
        let stored: Wall = self.storage.set_record(&key, &wall).await?;

        upsert_wall(&mut self.walls, stored.clone());
        self.apply(Action::RenameWall(name.to_owned()));
        Ok(true)
    }

    /// Swaps the active wall's photo and saves the wall right away.
    pub async fn replace_wall_image(
        &mut self,
        image: String,
        now: DateTime<Utc>,
    ) -> Result<Wall, EditorError> {
        let active = self.state.wall().ok_or(EditorError::NoWall)?;
        let mut wall = active.to_wall(now);
        wall.image = image;
        let stored: Wall = self.storage.set_record(&wall_key(&wall.id), &wall).await?;
        tracing::info!(wall_id = %stored.id, "wall photo replaced");

        upsert_wall(&mut self.walls, stored.clone());
        self.apply(Action::WallSaved(stored.clone()));
        Ok(stored)
    }

    pub fn request_delete_wall(&mut self, wall_id: WallId) -> &DeleteRequest {
        let message = match self.route_count(&wall_id) {
            0 => "Delete this wall?".to_owned(),
            count => format!("Delete wall and {count} routes?"),
        };
        self.pending_delete.insert(DeleteRequest {
            target: DeleteTarget::Wall(wall_id),
            message,
        })
    }

    pub fn request_delete_route(&mut self, route_id: RouteId) -> &DeleteRequest {
        self.pending_delete.insert(DeleteRequest {
            target: DeleteTarget::Route(route_id),
            message: "Delete this route?".to_owned(),
        })
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    /// Carries out the pending delete. The request is consumed even when the call fails.
    ///
    /// Deleting a wall also drops its routes (the service cascades); deleting what is
    /// currently on screen resets the editor accordingly.
    pub async fn confirm_delete(&mut self) -> Result<bool, EditorError> {
        let request = self
            .pending_delete
            .take()
            .ok_or(EditorError::NothingToConfirm)?;

        match request.target {
            DeleteTarget::Wall(wall_id) => {
                let existed = self.storage.delete(&wall_key(&wall_id)).await?;
                tracing::info!(wall_id = %wall_id, existed, "wall deleted");
                self.walls.retain(|wall| wall.id != wall_id);
                self.routes.retain(|route| route.wall_id != wall_id);
                if self.state.wall_id() == Some(&wall_id) {
                    self.apply(Action::Reset);
                }
                Ok(existed)
            }
            DeleteTarget::Route(route_id) => {
                let existed = self.storage.delete(&route_key(&route_id)).await?;
                tracing::info!(route_id = %route_id, existed, "route deleted");
                self.routes.retain(|route| route.id != route_id);
                if self.state.route().id.as_ref() == Some(&route_id) {
                    self.apply(Action::ClearRoute);
                }
                Ok(existed)
            }
        }
    }
}

fn wall_key(id: &WallId) -> String {
    format!("wall:{id}")
}

fn route_key(id: &RouteId) -> String {
    format!("route:{id}")
}

fn not_found(kind: &'static str, id: &str) -> EditorError {
    EditorError::NotFound {
        kind,
        id: id.to_owned(),
    }
}

/// Replaces the wall in place (its creation time, and so its rank, is fixed), or inserts a
/// first-time save at the front.
fn upsert_wall(walls: &mut Vec<Wall>, wall: Wall) {
    match walls.iter().position(|saved| saved.id == wall.id) {
        Some(index) => walls[index] = wall,
        None => walls.insert(0, wall),
    }
}
