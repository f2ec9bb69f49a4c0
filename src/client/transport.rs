// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Spray-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Spray and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! How the storage adapter reaches the collection service.

use async_trait::async_trait;
use reqwest::{StatusCode, Url};
use serde_json::Value;

use crate::api::{ApiError, CollectionApi};

/// One collection-service call, mirroring the REST surface.
#[derive(Debug, Clone, Copy)]
pub enum Request<'a> {
    List { collection: &'a str },
    Get { collection: &'a str, id: &'a str },
    Create { collection: &'a str, record: &'a Value },
    Update { collection: &'a str, id: &'a str, record: &'a Value },
    Delete { collection: &'a str, id: &'a str },
}

#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    Found(Value),
    NotFound,
}

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("invalid service url {url:?}: {reason}")]
    InvalidUrl { url: String, reason: String },
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("unexpected status {status}: {message}")]
    Status { status: u16, message: String },
    #[error("service error: {0}")]
    Service(String),
}

#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: Request<'_>) -> Result<Reply, TransportError>;
}

/// Talks to a running service over HTTP.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    base_url: Url,
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new(base_url: &str) -> Result<Self, TransportError> {
        let base_url = Url::parse(base_url).map_err(|err| TransportError::InvalidUrl {
            url: base_url.to_owned(),
            reason: err.to_string(),
        })?;
        if base_url.cannot_be_a_base() {
            return Err(TransportError::InvalidUrl {
                url: base_url.to_string(),
                reason: "url cannot be a base".to_owned(),
            });
        }
        Ok(Self {
            base_url,
            client: reqwest::Client::new(),
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn url(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: Request<'_>) -> Result<Reply, TransportError> {
        let builder = match request {
            Request::List { collection } => self.client.get(self.url(&[collection])),
            Request::Get { collection, id } => self.client.get(self.url(&[collection, id])),
            Request::Create { collection, record } => {
                self.client.post(self.url(&[collection])).json(record)
            }
            Request::Update {
                collection,
                id,
                record,
            } => self.client.put(self.url(&[collection, id])).json(record),
            Request::Delete { collection, id } => self.client.delete(self.url(&[collection, id])),
        };

        let response = builder.send().await?;
        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Ok(Reply::NotFound);
        }
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(TransportError::Status {
                status: status.as_u16(),
                message,
            });
        }

        Ok(Reply::Found(response.json::<Value>().await?))
    }
}

/// Calls a [`CollectionApi`] in-process, without a server in between.
#[derive(Debug, Clone)]
pub struct LocalTransport {
    api: CollectionApi,
}

impl LocalTransport {
    pub fn new(api: CollectionApi) -> Self {
        Self { api }
    }
}

#[async_trait]
impl Transport for LocalTransport {
    async fn send(&self, request: Request<'_>) -> Result<Reply, TransportError> {
        let result = match request {
            Request::List { collection } => self.api.list(collection).map(Value::Array),
            Request::Get { collection, id } => self.api.get(collection, id),
            Request::Create { collection, record } => self.api.create(collection, record.clone()),
            Request::Update {
                collection,
                id,
                record,
            } => self.api.update(collection, id, record.clone()),
            Request::Delete { collection, id } => self
                .api
                .delete(collection, id)
                .map(|_| serde_json::json!({ "deleted": true })),
        };

        match result {
            Ok(value) => Ok(Reply::Found(value)),
            Err(ApiError::NotFound) => Ok(Reply::NotFound),
            Err(err @ ApiError::NotAnObject) => Err(TransportError::Status {
                status: 400,
                message: err.to_string(),
            }),
            Err(err @ (ApiError::Store(_) | ApiError::Task(_))) => {
                Err(TransportError::Service(err.to_string()))
            }
        }
    }
}
