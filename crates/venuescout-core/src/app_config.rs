use std::path::PathBuf;

#[derive(Clone)]
pub struct AppConfig {
    pub places_api_key: Option<String>,
    pub log_level: String,
    pub config_path: PathBuf,
    pub output_path: PathBuf,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    pub page_token_delay_ms: u64,
    pub max_retries: u32,
    pub retry_backoff_base_ms: u64,
}

impl AppConfig {
    /// Returns the places API key, or the name of the missing variable.
    ///
    /// # Errors
    ///
    /// Returns [`crate::ConfigError::MissingEnvVar`] when
    /// `GOOGLE_PLACES_API_KEY` was not set.
    pub fn require_places_api_key(&self) -> Result<&str, crate::ConfigError> {
        self.places_api_key
            .as_deref()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| crate::ConfigError::MissingEnvVar("GOOGLE_PLACES_API_KEY".to_string()))
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field(
                "places_api_key",
                &self.places_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field("log_level", &self.log_level)
            .field("config_path", &self.config_path)
            .field("output_path", &self.output_path)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("user_agent", &self.user_agent)
            .field("page_token_delay_ms", &self.page_token_delay_ms)
            .field("max_retries", &self.max_retries)
            .field("retry_backoff_base_ms", &self.retry_backoff_base_ms)
            .finish()
    }
}
