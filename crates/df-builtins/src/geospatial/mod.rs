//! Spatial functions over geometries stored as WKT text or WKB binary.

pub mod as_geojson;
pub mod as_text;
pub mod data_types;
pub mod error;
pub mod geom_from_text;
pub mod point;

use datafusion::execution::FunctionRegistry;
use datafusion::logical_expr::ScalarUDF;
use datafusion_common::Result;
use std::sync::Arc;

pub fn register_udfs(registry: &mut dyn FunctionRegistry) -> Result<()> {
    let functions: Vec<Arc<ScalarUDF>> = vec![
        as_geojson::get_udf(),
        as_text::get_udf(),
        geom_from_text::get_udf(),
        point::get_udf(),
    ];
    for func in functions {
        registry.register_udf(func)?;
    }
    Ok(())
}
