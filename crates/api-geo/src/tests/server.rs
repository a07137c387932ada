use crate::config::WebConfig;
use crate::router::make_app;
use core_executor::{Database, DatabaseConfig};
use std::net::SocketAddr;

#[allow(clippy::unwrap_used)]
pub async fn run_test_server_with_database(db: Database) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let app = make_app(
        db,
        &WebConfig {
            host: "127.0.0.1".to_string(),
            port: addr.port(),
            allow_origin: None,
            open_browser: false,
        },
    )
    .unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    addr
}

#[allow(clippy::unwrap_used)]
pub async fn run_test_server(script: &str) -> SocketAddr {
    let db = Database::in_memory().unwrap();
    seed(&db, script).await;
    run_test_server_with_database(db).await
}

#[allow(clippy::unwrap_used)]
pub async fn run_test_server_without_spatial(script: &str) -> SocketAddr {
    let db = Database::new(DatabaseConfig::default().with_spatial(false)).unwrap();
    seed(&db, script).await;
    run_test_server_with_database(db).await
}

#[allow(clippy::unwrap_used)]
async fn seed(db: &Database, script: &str) {
    if !script.trim().is_empty() {
        db.connect().execute_script(script).await.unwrap();
    }
}
