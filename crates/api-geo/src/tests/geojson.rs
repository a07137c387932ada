use super::common::get;
use super::server::{run_test_server, run_test_server_without_spatial};
use reqwest::StatusCode;
use serde_json::{Value, json};

const PARKS: &str = "CREATE TABLE parks (id BIGINT, name VARCHAR, geom VARCHAR);
    INSERT INTO parks VALUES
        (1, 'Frognerparken', 'POINT(10.70 59.92)'),
        (2, 'Nowhere', NULL),
        (3, 'Slottsparken', 'POLYGON((10.72 59.91, 10.73 59.91, 10.73 59.92, 10.72 59.91))');";

fn coordinates(value: &Value) -> Vec<f64> {
    match value {
        Value::Array(items) => items.iter().flat_map(coordinates).collect(),
        other => other.as_f64().into_iter().collect(),
    }
}

#[tokio::test]
async fn test_geojson_features() {
    let addr = run_test_server(PARKS).await;
    let res = get(addr, "/api/geojson/parks").await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.content_type.as_deref(), Some("application/json"));

    let collection = res.json();
    assert_eq!(collection["type"], "FeatureCollection");
    assert!(collection.get("error").is_none());

    let mut features = collection["features"].as_array().cloned().unwrap_or_default();
    features.sort_by_key(|feature| feature["properties"]["id"].as_i64());
    assert_eq!(features.len(), 2);

    assert_eq!(features[0]["type"], "Feature");
    assert_eq!(features[0]["geometry"]["type"], "Point");
    assert_eq!(coordinates(&features[0]["geometry"]["coordinates"]), vec![10.70, 59.92]);
    assert_eq!(
        features[0]["properties"],
        json!({"id": 1, "name": "Frognerparken"})
    );

    assert_eq!(features[1]["geometry"]["type"], "Polygon");
    assert_eq!(
        features[1]["properties"],
        json!({"id": 3, "name": "Slottsparken"})
    );
}

#[tokio::test]
async fn test_geojson_properties_keep_declared_order() {
    let addr = run_test_server(
        "CREATE TABLE stops (zone VARCHAR, geometry VARCHAR, code BIGINT, label VARCHAR);
         INSERT INTO stops VALUES ('A', 'POINT(1 2)', 7, 'Main \"Street\"');",
    )
    .await;
    let res = get(addr, "/api/geojson/stops").await;
    assert_eq!(res.status, StatusCode::OK);
    let properties = res.body.split(r#""properties":"#).nth(1).unwrap_or_default();
    insta::assert_snapshot!(properties, @r#"{"zone":"A","code":7,"label":"Main \"Street\""}}]}"#);
}

#[tokio::test]
async fn test_geojson_binary_geometry() {
    let addr = run_test_server(
        "CREATE TABLE wkb_points AS
         SELECT 'bin' AS name, decode('0101000000000000000000f03f0000000000000040', 'hex') AS the_geom;",
    )
    .await;
    let collection = get(addr, "/api/geojson/wkb_points").await.json();
    assert_eq!(collection["features"][0]["geometry"]["type"], "Point");
    assert_eq!(
        coordinates(&collection["features"][0]["geometry"]["coordinates"]),
        vec![1.0, 2.0]
    );
    assert_eq!(collection["features"][0]["properties"], json!({"name": "bin"}));
}

#[tokio::test]
async fn test_geojson_no_geometry_column() {
    let addr = run_test_server("CREATE TABLE plain (id BIGINT, label VARCHAR)").await;

    for path in ["/api/geojson/plain", "/api/geojson/does_not_exist"] {
        let res = get(addr, path).await;
        assert_eq!(res.status, StatusCode::OK);
        insta::allow_duplicates! {
            insta::assert_snapshot!(res.body, @r#"{"error":"No geometry column found","type":"FeatureCollection","features":[]}"#);
        }
    }
}

#[tokio::test]
async fn test_geojson_spatial_unavailable() {
    let addr = run_test_server_without_spatial(PARKS).await;
    let res = get(addr, "/api/geojson/parks").await;
    assert_eq!(res.status, StatusCode::OK);
    insta::assert_snapshot!(res.body, @r#"{"error":"Spatial extension not available","type":"FeatureCollection","features":[]}"#);
}

#[tokio::test]
async fn test_geojson_invalid_geometry_reports_error() {
    let addr = run_test_server(
        "CREATE TABLE broken (geom VARCHAR);
         INSERT INTO broken VALUES ('POINT(1 2)'), ('not wkt');",
    )
    .await;
    let res = get(addr, "/api/geojson/broken").await;
    assert_eq!(res.status, StatusCode::OK);

    let collection = res.json();
    assert_eq!(collection["type"], "FeatureCollection");
    assert_eq!(collection["features"], json!([]));
    let message = collection["error"].as_str().unwrap_or_default();
    assert!(message.contains("st_asgeojson"), "{message}");
}

#[tokio::test]
async fn test_geojson_quoted_table_name() {
    let addr = run_test_server(
        r#"CREATE TABLE "city ""parks""" (geom VARCHAR, name VARCHAR);
           INSERT INTO "city ""parks""" VALUES ('POINT(3 4)', 'quoted');"#,
    )
    .await;
    let res = get(addr, "/api/geojson/city%20%22parks%22").await;
    assert_eq!(res.status, StatusCode::OK);
    let collection = res.json();
    assert_eq!(collection["features"][0]["properties"], json!({"name": "quoted"}));
}

#[tokio::test]
async fn test_geojson_property_named_geojson() {
    let addr = run_test_server(
        "CREATE TABLE layers (geojson VARCHAR, geom VARCHAR);
         INSERT INTO layers VALUES ('kept as text', 'POINT(5 6)');",
    )
    .await;
    let res = get(addr, "/api/geojson/layers").await;
    assert_eq!(res.status, StatusCode::OK);

    let collection = res.json();
    assert!(collection.get("error").is_none(), "{}", res.body);
    assert_eq!(
        coordinates(&collection["features"][0]["geometry"]["coordinates"]),
        vec![5.0, 6.0]
    );
    assert_eq!(
        collection["features"][0]["properties"],
        json!({"geojson": "kept as text"})
    );
}
