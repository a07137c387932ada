
use crate::{Database, DatabaseConfig, ResultSet, Value};

#[allow(clippy::unwrap_used)]
pub async fn collect_rows(mut result: ResultSet) -> Vec<Vec<Value>> {
    let mut rows = Vec::new();
    while let Some(chunk) = result.next_chunk().await {
        let chunk = chunk.unwrap();
        let cells = chunk.rows().unwrap();
        for row in 0..cells.num_rows() {
            rows.push(cells.row(row).unwrap());
        }
    }
    rows
}

pub fn text(value: &str) -> Value {
    Value::Text(value.to_string())
}

#[allow(clippy::unwrap_used)]
pub fn test_database(spatial: bool) -> Database {
    Database::new(DatabaseConfig::default().with_spatial(spatial)).unwrap()
}
