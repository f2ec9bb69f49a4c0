// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Spray-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Spray and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Server configuration: command-line values first, then `SPRAY_*` environment variables,
//! then defaults.

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use crate::api::{CollectionApi, DEFAULT_BODY_LIMIT};
use crate::store::{DataFile, ImageMaterializer, WriteDurability};

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 3001;
pub const DEFAULT_DATA_DIR: &str = ".";

pub const ENV_DATA_DIR: &str = "SPRAY_DATA_DIR";
pub const ENV_HOST: &str = "SPRAY_HOST";
pub const ENV_PORT: &str = "SPRAY_PORT";
pub const ENV_DURABLE_WRITES: &str = "SPRAY_DURABLE_WRITES";

const DB_FILE_NAME: &str = "db.json";
const UPLOADS_DIR_NAME: &str = "uploads";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid {name}={value:?}: {reason}")]
    InvalidEnv {
        name: &'static str,
        value: String,
        reason: String,
    },
    #[error("invalid host {host:?}: {source}")]
    InvalidHost {
        host: String,
        #[source]
        source: std::net::AddrParseError,
    },
}

/// Values given on the command line; `None`/`false` defers to the environment.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ConfigOverrides {
    pub data_dir: Option<String>,
    pub host: Option<String>,
    pub port: Option<u16>,
    pub durable_writes: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: IpAddr,
    /// `0` binds an ephemeral port.
    pub port: u16,
    pub data_dir: PathBuf,
    pub durability: WriteDurability,
    pub body_limit: usize,
}

impl ServerConfig {
    /// Defaults for a data directory: all interfaces, port 3001, best-effort writes.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            host: IpAddr::from([0, 0, 0, 0]),
            port: DEFAULT_PORT,
            data_dir: data_dir.into(),
            durability: WriteDurability::BestEffort,
            body_limit: DEFAULT_BODY_LIMIT,
        }
    }

    pub fn from_env(overrides: ConfigOverrides) -> Result<Self, ConfigError> {
        Self::resolve(overrides, |name| std::env::var(name).ok())
    }

    /// Resolves the configuration against an arbitrary variable lookup.
    pub fn resolve(
        overrides: ConfigOverrides,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let data_dir = overrides
            .data_dir
            .or_else(|| non_empty(env(ENV_DATA_DIR)))
            .unwrap_or_else(|| DEFAULT_DATA_DIR.to_owned());

        let host = overrides
            .host
            .or_else(|| non_empty(env(ENV_HOST)))
            .unwrap_or_else(|| DEFAULT_HOST.to_owned());
        let host = host
            .trim()
            .parse::<IpAddr>()
            .map_err(|source| ConfigError::InvalidHost { host, source })?;

        let port = match overrides.port {
            Some(port) => port,
            None => env_parsed(&env, ENV_PORT)?.unwrap_or(DEFAULT_PORT),
        };

        let durable = overrides.durable_writes || env_bool(&env, ENV_DURABLE_WRITES)?;

        Ok(Self {
            host,
            port,
            durability: if durable {
                WriteDurability::Durable
            } else {
                WriteDurability::BestEffort
            },
            ..Self::new(data_dir)
        })
    }

    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    pub fn db_path(&self) -> PathBuf {
        self.data_dir.join(DB_FILE_NAME)
    }

    pub fn uploads_dir(&self) -> PathBuf {
        self.data_dir.join(UPLOADS_DIR_NAME)
    }

    pub fn collection_api(&self) -> CollectionApi {
        CollectionApi::new(
            DataFile::new(self.db_path()).with_durability(self.durability),
            ImageMaterializer::new(self.uploads_dir()).with_durability(self.durability),
        )
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|value| !value.trim().is_empty())
}

fn env_parsed<T>(
    env: &impl Fn(&str) -> Option<String>,
    name: &'static str,
) -> Result<Option<T>, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    let Some(raw) = non_empty(env(name)) else {
        return Ok(None);
    };
    raw.trim()
        .parse::<T>()
        .map(Some)
        .map_err(|err| ConfigError::InvalidEnv {
            name,
            reason: err.to_string(),
            value: raw,
        })
}

fn env_bool(env: &impl Fn(&str) -> Option<String>, name: &'static str) -> Result<bool, ConfigError> {
    let Some(raw) = non_empty(env(name)) else {
        return Ok(false);
    };
    match raw.trim() {
        "1" | "true" | "TRUE" | "yes" | "YES" => Ok(true),
        "0" | "false" | "FALSE" | "no" | "NO" => Ok(false),
        _ => Err(ConfigError::InvalidEnv {
            name,
            value: raw,
            reason: "expected a boolean".to_owned(),
        }),
    }
}
