#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebConfig {
    pub host: String,
    pub port: u16,
    pub allow_origin: Option<String>,
    /// Launch the system browser at the front end once the server is up.
    pub open_browser: bool,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 8080,
            allow_origin: None,
            open_browser: false,
        }
    }
}

impl WebConfig {
    #[must_use]
    pub fn with_address(&self, host: &str, port: u16) -> Self {
        Self {
            host: host.to_string(),
            port,
            ..self.clone()
        }
    }
}
