use super::common::{get, post_body, post_sql};
use super::server::run_test_server;
use reqwest::StatusCode;

#[tokio::test]
async fn test_query_scalars() {
    let addr = run_test_server("").await;
    let res = post_sql(addr, "SELECT 1 AS id, 2.5 AS score, 'a' AS name, NULL AS nothing, true AS flag").await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.content_type.as_deref(), Some("application/json"));
    insta::assert_snapshot!(res.body, @r#"[{"id":1,"score":2.5,"name":"a","nothing":null,"flag":"true"}]"#);
}

#[tokio::test]
async fn test_query_table_rows_in_order() {
    let addr = run_test_server(
        "CREATE TABLE cities (name VARCHAR, population BIGINT);
         INSERT INTO cities VALUES ('Oslo', 709000), ('Bergen', 291000), ('Tromsø', NULL);",
    )
    .await;
    let res = post_sql(addr, "SELECT * FROM cities ORDER BY name").await;
    assert_eq!(res.status, StatusCode::OK);
    insta::assert_snapshot!(res.body, @r#"[{"name":"Bergen","population":291000},{"name":"Oslo","population":709000},{"name":"Tromsø","population":null}]"#);
}

#[tokio::test]
async fn test_query_escapes_names_and_values() {
    let addr = run_test_server("").await;
    let res = post_sql(
        addr,
        r#"SELECT 'say "hi"' AS "we""ird", 'back' || chr(92) || 'slash' AS path"#,
    )
    .await;
    assert_eq!(res.status, StatusCode::OK);
    insta::assert_snapshot!(res.body, @r#"[{"we\"ird":"say \"hi\"","path":"back\\slash"}]"#);
    assert_eq!(res.json()[0]["we\"ird"], "say \"hi\"");
}

#[tokio::test]
async fn test_query_empty_result() {
    let addr = run_test_server("CREATE TABLE empty_table (id INT)").await;
    let res = post_sql(addr, "SELECT * FROM empty_table").await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body, "[]");
}

#[tokio::test]
async fn test_query_error() {
    let addr = run_test_server("").await;

    let res = post_sql(addr, "SELEC 1").await;
    assert_eq!(res.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(res.content_type.as_deref(), Some("application/json"));
    assert!(res.body.starts_with(r#"{"error": "SQL parse error: "#), "{}", res.body);

    let res = post_sql(addr, "SELECT * FROM missing_table").await;
    assert_eq!(res.status, StatusCode::INTERNAL_SERVER_ERROR);
    let message = res.json()["error"].as_str().unwrap_or_default().to_string();
    assert!(message.contains("missing_table"), "{message}");
}

#[tokio::test]
async fn test_statements_share_catalog_across_requests() {
    let addr = run_test_server("").await;
    let res = post_sql(addr, "CREATE TABLE notes AS SELECT 'first' AS body").await;
    assert_eq!(res.status, StatusCode::OK);

    let res = post_sql(addr, "SELECT body FROM notes").await;
    insta::assert_snapshot!(res.body, @r#"[{"body":"first"}]"#);
}

#[tokio::test]
async fn test_index_and_health() {
    let addr = run_test_server("").await;

    let res = get(addr, "/").await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.content_type.as_deref(), Some("text/html; charset=utf-8"));
    assert!(res.body.contains("<title>geoscope</title>"));

    let res = get(addr, "/health").await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body, r#""OK""#);

    let res = get(addr, "/api/unknown").await;
    assert_eq!(res.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_query_body_not_utf8() {
    let addr = run_test_server("").await;
    let res = post_body(addr, b"SEL\xff\xfe".to_vec()).await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.content_type.as_deref(), Some("application/json"));
    let message = res.json()["error"].as_str().unwrap_or_default().to_string();
    assert!(message.starts_with("Request body is not valid UTF-8"), "{message}");
}

#[tokio::test]
async fn test_query_larger_than_default_body_limit() {
    let addr = run_test_server("").await;
    let big = "x".repeat(3 * 1024 * 1024);
    let res = post_sql(addr, &format!("SELECT '{big}' AS big")).await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.content_type.as_deref(), Some("application/json"));
    assert_eq!(res.json()[0]["big"].as_str().map(str::len), Some(big.len()));
}
