// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Spray-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Spray and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Spray collection server.
//!
//! Serves `walls` and `routes` from `<data-dir>/db.json` and stored wall photos from
//! `<data-dir>/uploads/` over HTTP.

use std::error::Error;

use spray::config::{ConfigOverrides, ServerConfig, DEFAULT_PORT};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn print_usage(program: &str) {
    eprintln!(
        "Usage:\n  {program} [<data-dir>] [--host <addr>] [--port <port>] [--durable-writes]\n  {program} [--data-dir <dir>] [--host <addr>] [--port <port>] [--durable-writes]\n\nServes the walls/routes collections from <data-dir>/db.json and photos from <data-dir>/uploads/.\nIf data-dir/--data-dir is omitted, $SPRAY_DATA_DIR or the current working directory is used.\n\n--host selects the listen address (default 0.0.0.0, or $SPRAY_HOST).\n--port selects the port (0 = ephemeral; default {DEFAULT_PORT}, or $SPRAY_PORT).\n--durable-writes opts into slower, best-effort durable persistence (fsync/sync where supported).\n\nLog verbosity follows RUST_LOG (default: info)."
    );
}

fn parse_options(mut args: impl Iterator<Item = String>) -> Result<ConfigOverrides, ()> {
    let mut options = ConfigOverrides::default();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--data-dir" => {
                if options.data_dir.is_some() {
                    return Err(());
                }
                let dir = args.next().ok_or(())?;
                options.data_dir = Some(dir);
            }
            "--host" => {
                if options.host.is_some() {
                    return Err(());
                }
                let host = args.next().ok_or(())?;
                options.host = Some(host);
            }
            "--port" => {
                if options.port.is_some() {
                    return Err(());
                }
                let raw = args.next().ok_or(())?;
                let port: u16 = raw.parse().map_err(|_| ())?;
                options.port = Some(port);
            }
            "--durable-writes" => {
                if options.durable_writes {
                    return Err(());
                }
                options.durable_writes = true;
            }
            _ if arg.starts_with('-') => return Err(()),
            _ => {
                if options.data_dir.is_some() {
                    return Err(());
                }
                options.data_dir = Some(arg);
            }
        }
    }

    Ok(options)
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %err, "failed to listen for ctrl-c; running until killed");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}

fn main() {
    let result = (|| -> Result<(), Box<dyn Error>> {
        let mut args = std::env::args();
        let program = args.next().unwrap_or_else(|| "spray".to_owned());

        let options = match parse_options(args) {
            Ok(options) => options,
            Err(()) => {
                print_usage(&program);
                std::process::exit(2);
            }
        };

        init_tracing();
        let config = ServerConfig::from_env(options)?;
        let api = config.collection_api();
        let router = spray::api::router_with_body_limit(api, config.body_limit);

        let runtime = tokio::runtime::Builder::new_current_thread().enable_all().build()?;

        runtime.block_on(async move {
            let listener = tokio::net::TcpListener::bind(config.bind_addr()).await?;
            tracing::info!(
                addr = %listener.local_addr()?,
                db = %config.db_path().display(),
                uploads = %config.uploads_dir().display(),
                durability = ?config.durability,
                "spray server listening"
            );

            axum::serve(listener, router)
                .with_graceful_shutdown(shutdown_signal())
                .await?;
            Ok::<(), Box<dyn Error>>(())
        })?;

        Ok(())
    })();

    if let Err(err) = result {
        eprintln!("spray: {err}");
        std::process::exit(1);
    }
}
