//! GeoJSON `FeatureCollection` rendering.
//!
//! The first result column carries each row's geometry as GeoJSON text and is emitted
//! verbatim; the remaining columns become feature properties.

use crate::error::{self as render_error, RenderResult};
use crate::json::{Cell, Field, Record, Rendering};
use core_executor::{ExecutionResult, ResultSet, Value};
use serde::ser::{Serialize, SerializeMap, Serializer};
use snafu::ResultExt;

const QUERY_FAILED: &str = "Query failed";

pub async fn to_geojson(result: ExecutionResult<ResultSet>) -> String {
    let outcome = match result {
        Ok(result) => try_to_geojson(result).await,
        Err(err) => Err(err.into()),
    };
    outcome.unwrap_or_else(|err| empty_collection(&err.to_string()))
}

/// Rows with a null geometry are skipped.
pub async fn try_to_geojson(mut result: ResultSet) -> RenderResult<String> {
    let properties = Field::for_columns(result.columns().get(1..).unwrap_or_default());

    let mut features = Vec::new();
    while let Some(chunk) = result.next_chunk().await {
        let chunk = chunk?;
        let cells = chunk.rows()?;
        for row in 0..cells.num_rows() {
            let mut values = cells.row(row)?.into_iter();
            match values.next() {
                None | Some(Value::Null) => {}
                Some(geometry) => features.push(FeatureRow {
                    geometry,
                    properties: values.collect(),
                }),
            }
        }
    }

    serde_json::to_string(&FeatureCollection {
        error: None,
        properties: &properties,
        features: &features,
    })
    .context(render_error::JsonSnafu)
}

/// An empty collection carrying an error message, so map clients can render it unchanged.
#[must_use]
pub fn empty_collection(message: &str) -> String {
    let message = if message.is_empty() {
        QUERY_FAILED
    } else {
        message
    };
    let collection = FeatureCollection {
        error: Some(message),
        properties: &[],
        features: &[],
    };
    serde_json::to_string(&collection).unwrap_or_else(|err| {
        tracing::error!(error = %err, "Failed to render error collection");
        format!(
            r#"{{"error":{},"type":"FeatureCollection","features":[]}}"#,
            crate::json::quote(QUERY_FAILED)
        )
    })
}

#[derive(Debug)]
struct FeatureRow {
    geometry: Value,
    properties: Vec<Value>,
}

struct FeatureCollection<'a> {
    error: Option<&'a str>,
    properties: &'a [Field],
    features: &'a [FeatureRow],
}

impl Serialize for FeatureCollection<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        if let Some(error) = self.error {
            map.serialize_entry("error", error)?;
        }
        map.serialize_entry("type", "FeatureCollection")?;
        map.serialize_entry(
            "features",
            &Features {
                properties: self.properties,
                features: self.features,
            },
        )?;
        map.end()
    }
}

struct Features<'a> {
    properties: &'a [Field],
    features: &'a [FeatureRow],
}

impl Serialize for Features<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.features.iter().map(|feature| Feature {
            properties: self.properties,
            row: feature,
        }))
    }
}

struct Feature<'a> {
    properties: &'a [Field],
    row: &'a FeatureRow,
}

impl Serialize for Feature<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(3))?;
        map.serialize_entry("type", "Feature")?;
        map.serialize_entry(
            "geometry",
            &Cell::new(&self.row.geometry, Rendering::Verbatim),
        )?;
        map.serialize_entry(
            "properties",
            &Record::new(self.properties, &self.row.properties),
        )?;
        map.end()
    }
}
