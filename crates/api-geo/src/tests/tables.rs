use super::common::get;
use super::server::run_test_server;
use reqwest::StatusCode;
use serde_json::json;

#[tokio::test]
async fn test_tables_empty() {
    let addr = run_test_server("").await;
    let res = get(addr, "/api/tables").await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.content_type.as_deref(), Some("application/json"));
    assert_eq!(res.body, "[]");
}

#[tokio::test]
async fn test_tables_lists_created_tables() {
    let addr = run_test_server(
        "CREATE TABLE parks (id INT, geom VARCHAR);
         CREATE TABLE roads (id INT);
         CREATE SCHEMA staging;
         CREATE TABLE staging.imports (line VARCHAR);",
    )
    .await;
    let res = get(addr, "/api/tables").await;
    assert_eq!(res.status, StatusCode::OK);

    let mut tables = res.json().as_array().cloned().unwrap_or_default();
    tables.sort_by_key(|table| table["table_name"].as_str().unwrap_or_default().to_string());
    assert_eq!(
        tables,
        vec![
            json!({"table_name": "imports", "table_schema": "staging"}),
            json!({"table_name": "parks", "table_schema": "public"}),
            json!({"table_name": "roads", "table_schema": "public"}),
        ]
    );
}
