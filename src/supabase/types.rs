use thiserror::Error;

/// Errors returned by the Supabase REST API client.
#[derive(Debug, Error)]
pub enum SupabaseError {
    #[error("HTTP request failed")]
    Http(#[from] reqwest::Error),

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("failed to decode response")]
    Decode(#[from] serde_json::Error),

    #[error("expected a JSON array of rows, got: {0}")]
    UnexpectedBody(String),

    #[error("invalid client configuration: {0}")]
    InvalidConfig(String),
}
