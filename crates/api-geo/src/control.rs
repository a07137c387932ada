//! SQL entry points for the server lifecycle: `geoscope_start(host, port)` and
//! `geoscope_stop()`.
//!
//! Register these only on connections that are not served by the controlled server,
//! otherwise `geoscope_stop()` would wait for the request that is running it.

use crate::server::ServerController;
use core_executor::Connection;
use datafusion::arrow::datatypes::DataType;
use datafusion::logical_expr::{
    ColumnarValue, ScalarFunctionArgs, ScalarUDF, ScalarUDFImpl, Signature, Volatility,
};
use datafusion_common::{Result, ScalarValue, exec_err};
use std::any::Any;
use std::sync::Arc;

pub fn register_control_udfs(connection: &Connection, controller: &Arc<ServerController>) {
    connection.register_udf(ScalarUDF::from(StartServerFunc::new(controller.clone())));
    connection.register_udf(ScalarUDF::from(StopServerFunc::new(controller.clone())));
}

#[derive(Debug)]
pub struct StartServerFunc {
    signature: Signature,
    controller: Arc<ServerController>,
}

impl StartServerFunc {
    #[must_use]
    pub fn new(controller: Arc<ServerController>) -> Self {
        Self {
            signature: Signature::exact(
                vec![DataType::Utf8, DataType::Int64],
                Volatility::Volatile,
            ),
            controller,
        }
    }
}

impl ScalarUDFImpl for StartServerFunc {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn name(&self) -> &'static str {
        "geoscope_start"
    }

    fn signature(&self) -> &Signature {
        &self.signature
    }

    fn return_type(&self, _arg_types: &[DataType]) -> Result<DataType> {
        Ok(DataType::Utf8)
    }

    fn invoke_with_args(&self, args: ScalarFunctionArgs) -> Result<ColumnarValue> {
        let (host, port) = match args.args.as_slice() {
            [
                ColumnarValue::Scalar(ScalarValue::Utf8(Some(host))),
                ColumnarValue::Scalar(ScalarValue::Int64(Some(port))),
            ] => (host.clone(), *port),
            _ => return exec_err!("geoscope_start expects a constant host and port"),
        };
        let Ok(port) = u16::try_from(port) else {
            return exec_err!("Invalid port {port}");
        };
        match self.controller.start(&host, port) {
            Ok(message) => Ok(ColumnarValue::Scalar(ScalarValue::from(message))),
            Err(err) => exec_err!("{err}"),
        }
    }
}

#[derive(Debug)]
pub struct StopServerFunc {
    signature: Signature,
    controller: Arc<ServerController>,
}

impl StopServerFunc {
    #[must_use]
    pub fn new(controller: Arc<ServerController>) -> Self {
        Self {
            signature: Signature::nullary(Volatility::Volatile),
            controller,
        }
    }
}

impl ScalarUDFImpl for StopServerFunc {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn name(&self) -> &'static str {
        "geoscope_stop"
    }

    fn signature(&self) -> &Signature {
        &self.signature
    }

    fn return_type(&self, _arg_types: &[DataType]) -> Result<DataType> {
        Ok(DataType::Utf8)
    }

    fn invoke_with_args(&self, _args: ScalarFunctionArgs) -> Result<ColumnarValue> {
        Ok(ColumnarValue::Scalar(ScalarValue::from(
            self.controller.stop(),
        )))
    }
}
