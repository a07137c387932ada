use crate::database::DatabaseConfig;
use crate::error::{self as ex_error, ExecutionError, ExecutionResult};
use crate::result_set::ResultSet;
use datafusion::catalog::CatalogProviderList;
use datafusion::execution::SessionStateBuilder;
use datafusion::execution::runtime_env::RuntimeEnv;
use datafusion::logical_expr::ScalarUDF;
use datafusion::prelude::{
    CsvReadOptions, DataFrame, NdJsonReadOptions, ParquetReadOptions, SessionConfig,
    SessionContext,
};
use datafusion::sql::parser::{DFParser, Statement};
use datafusion_common::ScalarValue;
use snafu::ResultExt;
use std::collections::VecDeque;
use std::fmt;
use std::path::Path;
use std::sync::Arc;

/// A session over the shared catalog.
///
/// Connections are cheap and meant to be opened per request. Functions registered on one
/// connection are invisible to the others; tables created through any of them are shared.
pub struct Connection {
    ctx: SessionContext,
    config: Arc<DatabaseConfig>,
}

impl Connection {
    pub(crate) fn new(
        catalogs: Arc<dyn CatalogProviderList>,
        runtime: Arc<RuntimeEnv>,
        config: Arc<DatabaseConfig>,
    ) -> Self {
        let state = SessionStateBuilder::new()
            .with_config(
                SessionConfig::new()
                    .with_information_schema(true)
                    // The shared catalog list already holds the default catalog.
                    .with_create_default_catalog_and_schema(false)
                    .with_default_catalog_and_schema(
                        &config.default_catalog,
                        &config.default_schema,
                    ),
            )
            .with_default_features()
            .with_runtime_env(runtime)
            .with_catalog_list(catalogs)
            .build();
        Self {
            ctx: SessionContext::new_with_state(state),
            config,
        }
    }

    /// Runs `sql` and returns the result of its last statement.
    ///
    /// Preceding statements are executed to completion and their output discarded.
    #[tracing::instrument(name = "Connection::query", level = "debug", skip(self), err)]
    pub async fn query(&self, sql: &str) -> ExecutionResult<ResultSet> {
        self.query_with_params(sql, Vec::new()).await
    }

    /// Same as [`Connection::query`], binding `params` to `$1`, `$2`, ... of the last statement.
    pub async fn query_with_params(
        &self,
        sql: &str,
        params: Vec<ScalarValue>,
    ) -> ExecutionResult<ResultSet> {
        let mut statements = parse(sql)?;
        let last = statements.pop_back().ok_or_else(|| ExecutionError::Parse {
            message: "No statement to execute".to_string(),
        })?;
        for statement in statements {
            self.run_to_completion(statement, sql).await?;
        }

        let mut df = self.plan(last, sql).await?;
        if !params.is_empty() {
            df = df
                .with_param_values(params)
                .context(ex_error::DataFusionQuerySnafu { query: sql })?;
        }
        let stream = df
            .execute_stream()
            .await
            .context(ex_error::DataFusionQuerySnafu { query: sql })?;
        Ok(ResultSet::new(stream))
    }

    /// Executes every statement of a `;`-separated script, returning how many ran.
    #[tracing::instrument(name = "Connection::execute_script", level = "debug", skip(self), err)]
    pub async fn execute_script(&self, script: &str) -> ExecutionResult<usize> {
        let statements = parse(script)?;
        let count = statements.len();
        for statement in statements {
            self.run_to_completion(statement, script).await?;
        }
        Ok(count)
    }

    /// Registers the spatial functions into this session.
    pub fn load_spatial(&mut self) -> ExecutionResult<()> {
        if !self.config.spatial {
            return ex_error::SpatialUnavailableSnafu.fail();
        }
        df_builtins::geospatial::register_udfs(&mut self.ctx).context(ex_error::RegisterUDFSnafu)
    }

    pub fn register_udf(&self, udf: ScalarUDF) {
        self.ctx.register_udf(udf);
    }

    /// Exposes a data file as table `name` in the default schema, picking the reader by
    /// file extension.
    #[tracing::instrument(name = "Connection::register_file", level = "debug", skip(self), err)]
    pub async fn register_file(&self, name: &str, path: &str) -> ExecutionResult<()> {
        let extension = Path::new(path)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);
        let registered = match extension.as_deref() {
            Some("csv") => {
                self.ctx
                    .register_csv(name, path, CsvReadOptions::new())
                    .await
            }
            Some("parquet") => {
                self.ctx
                    .register_parquet(name, path, ParquetReadOptions::default())
                    .await
            }
            Some(ext @ ("json" | "ndjson")) => {
                let file_extension = format!(".{ext}");
                self.ctx
                    .register_json(
                        name,
                        path,
                        NdJsonReadOptions::default().file_extension(&file_extension),
                    )
                    .await
            }
            _ => {
                return ex_error::UnsupportedFileFormatSnafu {
                    table: name,
                    path,
                }
                .fail();
            }
        };
        registered.context(ex_error::DataFusionSnafu)
    }

    async fn plan(&self, statement: Statement, sql: &str) -> ExecutionResult<DataFrame> {
        let state = self.ctx.state();
        let plan = state
            .statement_to_plan(statement)
            .await
            .context(ex_error::DataFusionQuerySnafu { query: sql })?;
        self.ctx
            .execute_logical_plan(plan)
            .await
            .context(ex_error::DataFusionQuerySnafu { query: sql })
    }

    async fn run_to_completion(&self, statement: Statement, sql: &str) -> ExecutionResult<()> {
        self.plan(statement, sql)
            .await?
            .collect()
            .await
            .context(ex_error::DataFusionQuerySnafu { query: sql })?;
        Ok(())
    }
}

fn parse(sql: &str) -> ExecutionResult<VecDeque<Statement>> {
    DFParser::parse_sql(sql).map_err(|err| ExecutionError::Parse {
        message: err.to_string(),
    })
}

impl fmt::Debug for Connection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Connection")
            .field("session_id", &self.ctx.session_id())
            .field("config", &self.config)
            .finish()
    }
}
