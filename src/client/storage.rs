// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Spray-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Spray and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use super::key::{collection_for_kind, kind_from_prefix, ParseKeyError, StorageKey};
use super::transport::{Reply, Request, Transport, TransportError};
use crate::store::record_id;

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error(transparent)]
    InvalidKey(#[from] ParseKeyError),
    #[error("value for {key} must be a JSON object")]
    NotAnObject { key: String },
    #[error("{operation} {key}: {source}")]
    Transport {
        operation: &'static str,
        key: String,
        #[source]
        source: TransportError,
    },
    #[error("{operation} {key}: malformed response: {message}")]
    Malformed {
        operation: &'static str,
        key: String,
        message: String,
    },
}

/// Key/value facade over the collection service.
///
/// Unlike a fail-soft shim, every call says what happened: `Ok(None)` / `Ok(false)` mean the
/// service confirmed the record is absent, `Err` means the call did not go through. Failures
/// are logged before they are returned.
#[derive(Debug, Clone)]
pub struct StorageAdapter<T> {
    transport: T,
}

impl<T: Transport> StorageAdapter<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub async fn get(&self, key: &str) -> Result<Option<Value>, StorageError> {
        logged("get", key, self.get_inner(key).await)
    }

    /// Creates or replaces the record under `key` and returns it as the service stored it.
    ///
    /// The id from the key always wins over an `id` field inside `value`.
    pub async fn set(&self, key: &str, value: Value) -> Result<Value, StorageError> {
        logged("set", key, self.set_inner(key, value).await)
    }

    /// Deletes the record under `key`; `Ok(false)` when there was nothing to delete.
    pub async fn delete(&self, key: &str) -> Result<bool, StorageError> {
        logged("delete", key, self.delete_inner(key).await)
    }

    /// Keys (`<type>:<id>`) of every record of the kind named by `prefix`.
    pub async fn list(&self, prefix: &str) -> Result<Vec<String>, StorageError> {
        logged("list", prefix, self.list_inner(prefix).await)
    }

    pub async fn get_record<R: DeserializeOwned>(
        &self,
        key: &str,
    ) -> Result<Option<R>, StorageError> {
        let Some(value) = self.get(key).await? else {
            return Ok(None);
        };
        logged("get", key, decode(key, "get", value).map(Some))
    }

    pub async fn set_record<R: Serialize + DeserializeOwned>(
        &self,
        key: &str,
        record: &R,
    ) -> Result<R, StorageError> {
        let value = serde_json::to_value(record).map_err(|err| StorageError::Malformed {
            operation: "set",
            key: key.to_owned(),
            message: err.to_string(),
        });
        let stored = self.set(key, logged("set", key, value)?).await?;
        logged("set", key, decode(key, "set", stored))
    }

    /// Every record of a kind; records that do not decode as `R` are skipped with a warning.
    pub async fn records<R: DeserializeOwned>(&self, prefix: &str) -> Result<Vec<R>, StorageError> {
        let records = logged("list", prefix, self.records_inner(prefix).await)?;

        Ok(records
            .into_iter()
            .filter_map(|value| {
                let id = record_id(&value).map(ToOwned::to_owned);
                match serde_json::from_value(value) {
                    Ok(record) => Some(record),
                    Err(err) => {
                        tracing::warn!(prefix, id = ?id, error = %err, "skipping undecodable record");
                        None
                    }
                }
            })
            .collect())
    }

    async fn list_inner(&self, prefix: &str) -> Result<Vec<String>, StorageError> {
        let kind = kind_from_prefix(prefix)?;
        let records = self.fetch_collection(kind).await?;
        Ok(records
            .iter()
            .filter_map(record_id)
            .map(|id| format!("{kind}:{id}"))
            .collect())
    }

    async fn records_inner(&self, prefix: &str) -> Result<Vec<Value>, StorageError> {
        let kind = kind_from_prefix(prefix)?;
        self.fetch_collection(kind).await
    }

    async fn get_inner(&self, key: &str) -> Result<Option<Value>, StorageError> {
        let parsed: StorageKey = key.parse()?;
        let collection = parsed.collection();
        let reply = self
            .transport
            .send(Request::Get {
                collection: &collection,
                id: parsed.id(),
            })
            .await
            .map_err(|source| transport_error("get", key, source))?;

        Ok(match reply {
            Reply::Found(value) => Some(value),
            Reply::NotFound => None,
        })
    }

    async fn set_inner(&self, key: &str, value: Value) -> Result<Value, StorageError> {
        let parsed: StorageKey = key.parse()?;
        let Value::Object(fields) = value else {
            return Err(StorageError::NotAnObject {
                key: key.to_owned(),
            });
        };

        let mut record = serde_json::Map::with_capacity(fields.len() + 1);
        record.insert("id".to_owned(), Value::String(parsed.id().to_owned()));
        record.extend(fields.into_iter().filter(|(name, _)| name != "id"));
        let record = Value::Object(record);

        let exists = self.get_inner(key).await?.is_some();
        let collection = parsed.collection();
        let request = if exists {
            Request::Update {
                collection: &collection,
                id: parsed.id(),
                record: &record,
            }
        } else {
            Request::Create {
                collection: &collection,
                record: &record,
            }
        };

        match self
            .transport
            .send(request)
            .await
            .map_err(|source| transport_error("set", key, source))?
        {
            Reply::Found(stored) => Ok(stored),
            // Deleted between the existence check and the update.
            Reply::NotFound => Err(transport_error(
                "set",
                key,
                TransportError::Status {
                    status: 404,
                    message: "record disappeared before update".to_owned(),
                },
            )),
        }
    }

    async fn delete_inner(&self, key: &str) -> Result<bool, StorageError> {
        let parsed: StorageKey = key.parse()?;
        let collection = parsed.collection();
        let reply = self
            .transport
            .send(Request::Delete {
                collection: &collection,
                id: parsed.id(),
            })
            .await
            .map_err(|source| transport_error("delete", key, source))?;
        Ok(matches!(reply, Reply::Found(_)))
    }

    async fn fetch_collection(&self, kind: &str) -> Result<Vec<Value>, StorageError> {
        let collection = collection_for_kind(kind);
        let reply = self
            .transport
            .send(Request::List {
                collection: &collection,
            })
            .await
            .map_err(|source| transport_error("list", kind, source))?;

        match reply {
            Reply::Found(Value::Array(records)) => Ok(records),
            Reply::Found(other) => Err(StorageError::Malformed {
                operation: "list",
                key: kind.to_owned(),
                message: format!("expected an array, got {other}"),
            }),
            Reply::NotFound => Ok(Vec::new()),
        }
    }
}

fn transport_error(operation: &'static str, key: &str, source: TransportError) -> StorageError {
    StorageError::Transport {
        operation,
        key: key.to_owned(),
        source,
    }
}

fn decode<R: DeserializeOwned>(
    key: &str,
    operation: &'static str,
    value: Value,
) -> Result<R, StorageError> {
    serde_json::from_value(value).map_err(|err| StorageError::Malformed {
        operation,
        key: key.to_owned(),
        message: err.to_string(),
    })
}

fn logged<T>(
    operation: &'static str,
    key: &str,
    result: Result<T, StorageError>,
) -> Result<T, StorageError> {
    if let Err(err) = &result {
        tracing::warn!(operation, key, error = %err, "storage call failed");
    }
    result
}
