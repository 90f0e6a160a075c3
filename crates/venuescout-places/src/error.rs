use thiserror::Error;

/// Errors returned by the places API client.
#[derive(Debug, Error)]
pub enum PlacesError {
    /// Network or TLS failure, or a non-2xx HTTP status.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a status other than `OK` / `ZERO_RESULTS`.
    #[error("places API returned {status}: {message}")]
    ApiStatus { status: String, message: String },

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// A search query was blank.
    #[error("search query must not be empty")]
    InvalidQuery,

    /// The base URL given to the client could not be parsed.
    #[error("invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    /// Guard against a page token that never runs out.
    #[error("pagination limit reached for query '{query}': exceeded {max_pages} pages")]
    PaginationLimit { query: String, max_pages: usize },
}
