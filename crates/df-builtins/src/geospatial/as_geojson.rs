use super::data_types::{GeometryRef, any_single_geometry_type_input, map_geometries};
use super::error::{self as geo_error, GeoDataFusionResult};
use datafusion::arrow::datatypes::DataType;
use datafusion::logical_expr::scalar_doc_sections::DOC_SECTION_OTHER;
use datafusion::logical_expr::{
    ColumnarValue, Documentation, ScalarFunctionArgs, ScalarUDFImpl, Signature,
};
use datafusion_common::Result;
use geozero::ToJson;
use geozero::wkb::Wkb;
use geozero::wkt::Wkt;
use snafu::ResultExt;
use std::any::Any;
use std::sync::OnceLock;

// st_asgeojson SQL function
// Renders a geometry as a GeoJSON geometry object.
// Syntax: ST_ASGEOJSON( <geometry> )
#[derive(Debug)]
pub struct AsGeoJson {
    signature: Signature,
}

impl Default for AsGeoJson {
    fn default() -> Self {
        Self::new()
    }
}

impl AsGeoJson {
    #[must_use]
    pub fn new() -> Self {
        Self {
            signature: any_single_geometry_type_input(),
        }
    }
}

static DOCUMENTATION: OnceLock<Documentation> = OnceLock::new();

impl ScalarUDFImpl for AsGeoJson {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn name(&self) -> &'static str {
        "st_asgeojson"
    }

    fn signature(&self) -> &Signature {
        &self.signature
    }

    fn return_type(&self, _arg_types: &[DataType]) -> Result<DataType> {
        Ok(DataType::Utf8)
    }

    fn invoke_with_args(&self, args: ScalarFunctionArgs) -> Result<ColumnarValue> {
        map_geometries(&args.args, self.name(), to_geojson)
    }

    fn documentation(&self) -> Option<&Documentation> {
        Some(DOCUMENTATION.get_or_init(|| {
            Documentation::builder(
                DOC_SECTION_OTHER,
                "Returns the GeoJSON representation of a geometry",
                "ST_AsGeoJSON(geometry)",
            )
            .with_argument("g1", "geometry as WKT text or WKB binary")
            .build()
        }))
    }
}

fn to_geojson(geometry: GeometryRef<'_>) -> GeoDataFusionResult<String> {
    match geometry {
        GeometryRef::Wkt(text) => Wkt(text).to_json(),
        GeometryRef::Wkb(bytes) => Wkb(bytes.to_vec()).to_json(),
    }
    .context(geo_error::GeozeroSnafu {
        function: "st_asgeojson",
    })
}

super::super::macros::make_udf_function!(AsGeoJson);
