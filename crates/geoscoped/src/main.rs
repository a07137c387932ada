pub(crate) mod cli;

use api_geo::config::WebConfig;
use api_geo::control::register_control_udfs;
use api_geo::server::ServerController;
use clap::Parser;
use core_executor::{Database, DatabaseConfig};
use dotenv::dotenv;
use std::sync::Arc;
use tokio::signal;
use tracing_subscriber::filter::{LevelFilter, Targets};
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::{Layer, layer::SubscriberExt, util::SubscriberInitExt};

const TARGETS: [&str; 5] = [
    "geoscoped",
    "api_geo",
    "core_executor",
    "df_builtins",
    "tower_http",
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();

    let opts = cli::CliOpts::parse();

    setup_tracing(&opts);

    let db = Database::new(DatabaseConfig::default().with_spatial(!opts.no_spatial))?;
    let web_config = WebConfig {
        host: opts.host.clone(),
        port: opts.port,
        allow_origin: opts.cors_allow_origin.clone(),
        open_browser: opts.open_browser,
    };
    let controller = Arc::new(ServerController::new(db.clone(), web_config));

    // The init connection is never used to serve requests, so it may carry the control functions.
    let connection = db.connect();
    register_control_udfs(&connection, &controller);
    for table in &opts.tables {
        connection.register_file(&table.name, &table.path).await?;
        tracing::info!(table = %table.name, path = %table.path, "Registered table");
    }
    if let Some(script) = opts.init_sql.as_deref() {
        let statements = connection.execute_script(script).await?;
        tracing::info!(statements, "Executed init script");
    }

    // The init script may already have started the server itself.
    if !controller.is_running() {
        let message = controller.start(&opts.host, opts.port)?;
        tracing::info!("{message}");
    }

    shutdown_signal().await;

    let message = tokio::task::spawn_blocking(move || controller.stop()).await?;
    tracing::info!("{message}");
    Ok(())
}

fn setup_tracing(opts: &cli::CliOpts) {
    let targets_with_level = |level: LevelFilter| -> Vec<(&str, LevelFilter)> {
        TARGETS.iter().map(|t| ((*t), level)).collect()
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_span_events(FmtSpan::CLOSE)
                .with_filter(match std::env::var("RUST_LOG") {
                    Ok(val) => match val.parse::<Targets>() {
                        Ok(log_targets_from_env) => log_targets_from_env,
                        Err(err) => {
                            eprintln!("Failed to parse RUST_LOG: {err:?}");
                            Targets::default()
                                .with_targets(targets_with_level(LevelFilter::DEBUG))
                                .with_default(LevelFilter::WARN)
                        }
                    },
                    _ => Targets::default()
                        .with_targets(targets_with_level(opts.tracing_level.into()))
                        .with_default(LevelFilter::WARN),
                }),
        )
        .init();
}

#[allow(clippy::expect_used, clippy::redundant_pub_crate)]
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::warn!("Ctrl+C received, stopping server");
        },
        () = terminate => {
            tracing::warn!("SIGTERM received, stopping server");
        },
    }
}
