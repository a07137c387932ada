use datafusion::error::DataFusionError;
use geozero::error::GeozeroError;
use snafu::Snafu;

#[derive(Snafu, Debug)]
#[snafu(visibility(pub))]
pub enum GeoDataFusionError {
    #[snafu(display("Invalid geometry in {function}: {source}"))]
    Geozero {
        function: &'static str,
        source: GeozeroError,
    },
}

pub type GeoDataFusionResult<T> = Result<T, GeoDataFusionError>;

impl From<GeoDataFusionError> for DataFusionError {
    fn from(value: GeoDataFusionError) -> Self {
        Self::Execution(value.to_string())
    }
}
