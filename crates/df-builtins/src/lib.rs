pub mod geospatial;

mod macros {
    // Defines a lazily built, shared `get_udf()` for a `ScalarUDFImpl` with a `Default` impl.
    macro_rules! make_udf_function {
        ($udf_type:ty) => {
            paste::paste! {
                static [< STATIC_ $udf_type:upper >]: std::sync::OnceLock<std::sync::Arc<datafusion::logical_expr::ScalarUDF>> =
                    std::sync::OnceLock::new();

                pub fn get_udf() -> std::sync::Arc<datafusion::logical_expr::ScalarUDF> {
                    [< STATIC_ $udf_type:upper >]
                        .get_or_init(|| {
                            std::sync::Arc::new(datafusion::logical_expr::ScalarUDF::new_from_impl(
                                <$udf_type>::default(),
                            ))
                        })
                        .clone()
                }
            }
        };
    }

    pub(crate) use make_udf_function;
}
