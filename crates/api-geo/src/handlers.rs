use crate::geojson;
use crate::geometry::{self, GeometryResolution};
use crate::response::JsonText;
use crate::rows;
use crate::state::AppState;
use crate::web_assets::INDEX_HTML;
use axum::Json;
use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::response::Html;
use http::StatusCode;

pub const TABLES_QUERY: &str = "SELECT table_name, table_schema \
    FROM information_schema.tables \
    WHERE table_schema NOT IN ('information_schema', 'pg_catalog')";

pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

pub async fn health() -> Json<&'static str> {
    Json("OK")
}

/// Runs the request body as SQL.
#[tracing::instrument(name = "api_geo::query", level = "debug", skip_all, fields(len = body.len()))]
pub async fn query(State(state): State<AppState>, body: Bytes) -> JsonText {
    let sql = match String::from_utf8(body.to_vec()) {
        Ok(sql) => sql,
        Err(err) => {
            tracing::warn!(error = %err, "Query is not valid UTF-8");
            return JsonText::with_status(
                StatusCode::BAD_REQUEST,
                rows::error_object(&format!("Request body is not valid UTF-8: {err}")),
            );
        }
    };
    let outcome = match state.db.connect().query(&sql).await {
        Ok(result) => rows::try_to_json(result).await,
        Err(err) => Err(err.into()),
    };
    match outcome {
        Ok(body) => JsonText::ok(body),
        Err(err) => {
            tracing::warn!(error = %err, "Query failed");
            JsonText::with_status(
                StatusCode::INTERNAL_SERVER_ERROR,
                rows::error_object(&err.to_string()),
            )
        }
    }
}

/// Lists user tables. Failures are reported in the body with a 200 status.
#[tracing::instrument(name = "api_geo::tables", level = "debug", skip(state))]
pub async fn tables(State(state): State<AppState>) -> JsonText {
    let result = state.db.connect().query(TABLES_QUERY).await;
    JsonText::ok(rows::to_json(result).await)
}

/// Renders a whole table as a `FeatureCollection`. Every outcome is a 200 with a
/// collection body; failures carry an `error` member.
#[tracing::instrument(name = "api_geo::geojson", level = "debug", skip(state))]
pub async fn table_geojson(State(state): State<AppState>, Path(name): Path<String>) -> JsonText {
    let mut connection = state.db.connect();
    let body = match geometry::resolve(&mut connection, &name).await {
        GeometryResolution::Unavailable => {
            geojson::empty_collection("Spatial extension not available")
        }
        GeometryResolution::NotFound => geojson::empty_collection("No geometry column found"),
        GeometryResolution::Resolved { query, .. } => {
            geojson::to_geojson(connection.query(&query).await).await
        }
    };
    JsonText::ok(body)
}
