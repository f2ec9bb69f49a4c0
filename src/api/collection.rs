// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Spray-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Spray and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use serde_json::Value;

use crate::model::ImageRef;
use crate::store::{record_id, DataFile, Document, ImageMaterializer, StoreError, ROUTES, WALLS};

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Not found")]
    NotFound,
    #[error("record must be a JSON object")]
    NotAnObject,
    #[error(transparent)]
    Store(#[from] StoreError),
    /// The blocking worker running the call panicked or was cancelled.
    #[error("task failed: {0}")]
    Task(String),
}

/// Outcome of a successful delete.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Deleted {
    /// Routes removed together with a deleted wall.
    pub cascaded_routes: usize,
    pub removed_image: bool,
}

/// Generic CRUD over the named collections of one [`DataFile`].
///
/// Every call reads the whole document and every mutation writes it back whole. Records are
/// not validated; the only special cases are wall photos (see [`ImageMaterializer`]) and the
/// wall-to-route cascade on delete.
#[derive(Debug, Clone)]
pub struct CollectionApi {
    data: DataFile,
    images: ImageMaterializer,
}

impl CollectionApi {
    pub fn new(data: DataFile, images: ImageMaterializer) -> Self {
        Self { data, images }
    }

    pub fn data_file(&self) -> &DataFile {
        &self.data
    }

    pub fn images(&self) -> &ImageMaterializer {
        &self.images
    }

    pub fn list(&self, collection: &str) -> Result<Vec<Value>, ApiError> {
        let document = self.data.read_all()?;
        Ok(document
            .collection(collection)
            .map(<[Value]>::to_vec)
            .unwrap_or_default())
    }

    pub fn get(&self, collection: &str, id: &str) -> Result<Value, ApiError> {
        let document = self.data.read_all()?;
        document
            .find(collection, id)
            .cloned()
            .ok_or(ApiError::NotFound)
    }

    /// Appends `record`; the caller supplies its `id`.
    pub fn create(&self, collection: &str, mut record: Value) -> Result<Value, ApiError> {
        if !record.is_object() {
            return Err(ApiError::NotAnObject);
        }

        let mut document = self.data.read_all()?;

        if collection == WALLS {
            match record_id_lossy(&record) {
                Some(wall_id) => self.materialize_image(&wall_id, &mut record)?,
                None if has_inline_image(&record) => {
                    tracing::warn!("wall without id; keeping inline image");
                }
                None => {}
            }
        }
        if collection == ROUTES {
            warn_on_unknown_wall(&document, &record);
        }

        document.collection_or_insert(collection).push(record.clone());
        self.data.write_all(&document)?;

        tracing::debug!(collection, id = ?record_id(&record), "created record");
        Ok(record)
    }

    /// Replaces the record stored under `id` with `record` as a whole.
    pub fn update(&self, collection: &str, id: &str, mut record: Value) -> Result<Value, ApiError> {
        let Some(fields) = record.as_object_mut() else {
            return Err(ApiError::NotAnObject);
        };
        if !fields.contains_key("id") {
            fields.insert("id".to_owned(), Value::String(id.to_owned()));
        }

        let mut document = self.data.read_all()?;
        let index = document.position(collection, id).ok_or(ApiError::NotFound)?;

        if collection == WALLS && has_inline_image(&record) {
            if let Some(previous) = document
                .find(collection, id)
                .and_then(|previous| previous.get("image"))
                .and_then(Value::as_str)
            {
                self.images.remove_stored(previous)?;
            }
            self.materialize_image(id, &mut record)?;
        }
        if collection == ROUTES {
            warn_on_unknown_wall(&document, &record);
        }

        if let Some(records) = document.collection_mut(collection) {
            records[index] = record.clone();
        }
        self.data.write_all(&document)?;

        tracing::debug!(collection, id, "updated record");
        Ok(record)
    }

    /// Removes the record stored under `id`. Deleting a wall also deletes its photo and every
    /// route that references it.
    pub fn delete(&self, collection: &str, id: &str) -> Result<Deleted, ApiError> {
        let mut document = self.data.read_all()?;
        let index = document.position(collection, id).ok_or(ApiError::NotFound)?;

        let mut outcome = Deleted::default();
        let removed = match document.collection_mut(collection) {
            Some(records) => records.remove(index),
            None => return Err(ApiError::NotFound),
        };

        if collection == WALLS {
            if let Some(image) = removed.get("image").and_then(Value::as_str) {
                outcome.removed_image = self.images.remove_stored(image)?;
            }
            if let Some(routes) = document.collection_mut(ROUTES) {
                let before = routes.len();
                routes.retain(|route| route.get("wallId").and_then(Value::as_str) != Some(id));
                outcome.cascaded_routes = before - routes.len();
            }
        }

        self.data.write_all(&document)?;

        tracing::debug!(
            collection,
            id,
            cascaded_routes = outcome.cascaded_routes,
            "deleted record"
        );
        Ok(outcome)
    }

    fn materialize_image(&self, wall_id: &str, record: &mut Value) -> Result<(), StoreError> {
        let Some(image) = record.get("image").and_then(Value::as_str) else {
            return Ok(());
        };
        if !ImageRef::classify(image).is_inline() {
            return Ok(());
        }

        let stored = self.images.materialize(wall_id, image)?;
        if let Some(fields) = record.as_object_mut() {
            fields.insert("image".to_owned(), Value::String(stored));
        }
        Ok(())
    }
}

fn has_inline_image(record: &Value) -> bool {
    record
        .get("image")
        .and_then(Value::as_str)
        .is_some_and(|image| ImageRef::classify(image).is_inline())
}

/// Record id as a string, accepting numeric ids as well since the file name only needs text.
fn record_id_lossy(record: &Value) -> Option<String> {
    match record.get("id")? {
        Value::String(id) => Some(id.clone()),
        Value::Number(id) => Some(id.to_string()),
        _ => None,
    }
}

fn warn_on_unknown_wall(document: &Document, route: &Value) {
    let Some(wall_id) = route.get("wallId").and_then(Value::as_str) else {
        return;
    };
    if document.find(WALLS, wall_id).is_none() {
        tracing::warn!(
            route_id = ?record_id(route),
            wall_id,
            "route references a wall that does not exist"
        );
    }
}
