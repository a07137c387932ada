use core_executor::{Connection, ExecutionResult, Value};
use datafusion_common::ScalarValue;

/// Column names recognised as holding a table's geometry, compared case-sensitively.
pub const GEOMETRY_COLUMN_NAMES: [&str; 3] = ["geometry", "geom", "the_geom"];

const GEOJSON_ALIAS: &str = "geojson";

const TABLE_COLUMNS_QUERY: &str = "SELECT table_catalog, table_schema, column_name \
    FROM information_schema.columns \
    WHERE table_name = $1 \
    AND table_schema NOT IN ('information_schema', 'pg_catalog') \
    ORDER BY table_catalog, table_schema, ordinal_position";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GeometryResolution {
    /// `query` selects the geometry as GeoJSON in its first column, followed by every other
    /// column of the table in declared order.
    Resolved {
        geometry_column: String,
        query: String,
    },
    /// Spatial functions could not be loaded into the session.
    Unavailable,
    NotFound,
}

#[derive(Debug)]
struct TableColumn {
    catalog: String,
    schema: String,
    name: String,
}

/// Finds the geometry column of `table` and builds the query feeding the GeoJSON endpoint.
///
/// Loads the spatial functions into `connection` as a side effect. When several schemas hold
/// a table of that name, the first geometry column in catalog order wins.
#[tracing::instrument(level = "debug", skip(connection))]
pub async fn resolve(connection: &mut Connection, table: &str) -> GeometryResolution {
    if let Err(err) = connection.load_spatial() {
        tracing::warn!(error = %err, "Spatial functions unavailable");
        return GeometryResolution::Unavailable;
    }

    let columns = match table_columns(connection, table).await {
        Ok(columns) => columns,
        Err(err) => {
            tracing::warn!(error = %err, "Failed to list table columns");
            return GeometryResolution::NotFound;
        }
    };

    let Some(geometry) = columns
        .iter()
        .find(|column| GEOMETRY_COLUMN_NAMES.contains(&column.name.as_str()))
    else {
        return GeometryResolution::NotFound;
    };

    let properties: Vec<&str> = columns
        .iter()
        .filter(|column| {
            column.catalog == geometry.catalog
                && column.schema == geometry.schema
                && column.name != geometry.name
        })
        .map(|column| column.name.as_str())
        .collect();
    let mut projection = vec![format!(
        "st_asgeojson({}) AS {}",
        quote_ident(&geometry.name),
        quote_ident(&geometry_alias(&properties))
    )];
    projection.extend(properties.iter().map(|name| quote_ident(name)));
    let query = format!(
        "SELECT {} FROM {}.{}.{}",
        projection.join(", "),
        quote_ident(&geometry.catalog),
        quote_ident(&geometry.schema),
        quote_ident(table),
    );
    tracing::debug!(geometry_column = %geometry.name, %query, "Resolved geometry column");
    GeometryResolution::Resolved {
        geometry_column: geometry.name.clone(),
        query,
    }
}

/// Output name of the rendered geometry, distinct from every property column.
fn geometry_alias(properties: &[&str]) -> String {
    let mut alias = GEOJSON_ALIAS.to_string();
    while properties.contains(&alias.as_str()) {
        alias.insert(0, '_');
    }
    alias
}

/// Double-quotes an SQL identifier, doubling any embedded quotes.
#[must_use]
pub fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

async fn table_columns(connection: &Connection, table: &str) -> ExecutionResult<Vec<TableColumn>> {
    let mut result = connection
        .query_with_params(TABLE_COLUMNS_QUERY, vec![ScalarValue::from(table)])
        .await?;
    let mut columns = Vec::new();
    while let Some(chunk) = result.next_chunk().await {
        let chunk = chunk?;
        let rows = chunk.rows()?;
        for row in 0..rows.num_rows() {
            if let (Value::Text(catalog), Value::Text(schema), Value::Text(name)) =
                (rows.value(0, row)?, rows.value(1, row)?, rows.value(2, row)?)
            {
                columns.push(TableColumn {
                    catalog,
                    schema,
                    name,
                });
            }
        }
    }
    Ok(columns)
}
