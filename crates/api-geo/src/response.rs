use axum::response::{IntoResponse, Response};
use http::{HeaderValue, StatusCode, header};

/// Pre-serialized JSON body.
///
/// Handlers build their JSON text by hand, so `axum::Json` would serialize it a second time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonText {
    pub status: StatusCode,
    pub body: String,
}

impl JsonText {
    #[must_use]
    pub const fn ok(body: String) -> Self {
        Self {
            status: StatusCode::OK,
            body,
        }
    }

    #[must_use]
    pub const fn with_status(status: StatusCode, body: String) -> Self {
        Self { status, body }
    }
}

impl IntoResponse for JsonText {
    fn into_response(self) -> Response {
        (
            self.status,
            [(
                header::CONTENT_TYPE,
                HeaderValue::from_static("application/json"),
            )],
            self.body,
        )
            .into_response()
    }
}
