// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Spray-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Spray and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! HTTP surface: `/{collection}[/{id}]` CRUD plus `/uploads/{file}`.

use std::io;
use std::sync::Arc;

use axum::extract::{DefaultBodyLimit, Path, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};
use tokio::sync::Mutex;

use super::collection::{ApiError, CollectionApi};

/// Inline wall photos travel inside JSON bodies, so the default limit is far too small.
pub const DEFAULT_BODY_LIMIT: usize = 50 * 1024 * 1024;

#[derive(Clone)]
struct AppState {
    api: Arc<Mutex<CollectionApi>>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::NotAnObject => StatusCode::BAD_REQUEST,
            Self::Store(err) => {
                tracing::error!(error = %err, "storage failure");
                StatusCode::INTERNAL_SERVER_ERROR
            }
            Self::Task(err) => {
                tracing::error!(error = %err, "collection task failed");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

pub fn router(api: CollectionApi) -> Router {
    router_with_body_limit(api, DEFAULT_BODY_LIMIT)
}

pub fn router_with_body_limit(api: CollectionApi, body_limit: usize) -> Router {
    let state = AppState {
        api: Arc::new(Mutex::new(api)),
    };

    Router::new()
        .route("/uploads/{file_name}", get(serve_upload))
        .route("/{collection}", get(list_records).post(create_record))
        .route(
            "/{collection}/{id}",
            get(get_record).put(update_record).delete(delete_record),
        )
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}

/// Runs one blocking collection call on the blocking pool while holding the API lock, so
/// requests stay serialized without stalling the runtime on file I/O.
async fn with_api<R, F>(state: &AppState, call: F) -> Result<R, ApiError>
where
    F: FnOnce(&CollectionApi) -> Result<R, ApiError> + Send + 'static,
    R: Send + 'static,
{
    let guard = state.api.lock().await;
    let api = guard.clone();
    let joined = tokio::task::spawn_blocking(move || call(&api)).await;
    drop(guard);
    joined.map_err(|err| ApiError::Task(err.to_string()))?
}

async fn list_records(
    State(state): State<AppState>,
    Path(collection): Path<String>,
) -> Result<Json<Vec<Value>>, ApiError> {
    let records = with_api(&state, move |api| api.list(&collection)).await?;
    Ok(Json(records))
}

async fn get_record(
    State(state): State<AppState>,
    Path((collection, id)): Path<(String, String)>,
) -> Result<Json<Value>, ApiError> {
    let record = with_api(&state, move |api| api.get(&collection, &id)).await?;
    Ok(Json(record))
}

async fn create_record(
    State(state): State<AppState>,
    Path(collection): Path<String>,
    Json(record): Json<Value>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let created = with_api(&state, move |api| api.create(&collection, record)).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

async fn update_record(
    State(state): State<AppState>,
    Path((collection, id)): Path<(String, String)>,
    Json(record): Json<Value>,
) -> Result<Json<Value>, ApiError> {
    let updated = with_api(&state, move |api| api.update(&collection, &id, record)).await?;
    Ok(Json(updated))
}

async fn delete_record(
    State(state): State<AppState>,
    Path((collection, id)): Path<(String, String)>,
) -> Result<Json<Value>, ApiError> {
    let wall_id = id.clone();
    let deleted = with_api(&state, move |api| api.delete(&collection, &id)).await?;
    if deleted.cascaded_routes > 0 {
        tracing::info!(
            wall_id = %wall_id,
            routes = deleted.cascaded_routes,
            "deleted wall together with its routes"
        );
    }
    Ok(Json(json!({ "deleted": true })))
}

async fn serve_upload(
    State(state): State<AppState>,
    Path(file_name): Path<String>,
) -> Result<Response, ApiError> {
    let path = {
        let api = state.api.lock().await;
        api.images().resolve(&file_name)
    };
    let Some(path) = path else {
        return Err(ApiError::NotFound);
    };

    match tokio::fs::read(&path).await {
        Ok(bytes) => Ok(([(header::CONTENT_TYPE, content_type_for(&file_name))], bytes).into_response()),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Err(ApiError::NotFound),
        Err(source) => Err(ApiError::Store(crate::store::StoreError::Io { path, source })),
    }
}

fn content_type_for(file_name: &str) -> &'static str {
    let ext = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "bmp" => "image/bmp",
        "avif" => "image/avif",
        "heic" => "image/heic",
        "tiff" | "tif" => "image/tiff",
        _ => "application/octet-stream",
    }
}
