use thiserror::Error;

use crate::checkout::CheckoutError;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Not Found")]
    NotFound,

    #[error("Bad Request {0}")]
    BadRequest(String),

    #[error("Not logged in")]
    Unauthorized,

    #[error("Forbidden")]
    Forbidden,

    #[error("API error {status}: {}", message.as_deref().unwrap_or("no message"))]
    Api { status: u16, message: Option<String> },

    #[error("HTTP error")]
    Http(#[from] reqwest::Error),

    #[error("Storage error")]
    Storage(#[from] sqlx::Error),

    #[error("Migration error")]
    Migrate(#[from] sqlx::migrate::MigrateError),

    #[error("Serialization error")]
    Serde(#[from] serde_json::Error),

    #[error(transparent)]
    Checkout(#[from] CheckoutError),

    #[error("Internal error")]
    Internal(#[from] anyhow::Error),
}

impl ClientError {
    /// Text to show the user: the server's message when it sent one,
    /// local validation text for checkout errors, otherwise `fallback`.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            ClientError::Api {
                message: Some(message),
                ..
            } if !message.trim().is_empty() => message.clone(),
            ClientError::Checkout(err) => err.to_string(),
            ClientError::BadRequest(message) => message.clone(),
            _ => fallback.to_string(),
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            ClientError::Http(err) => err.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

pub type ClientResult<T> = Result<T, ClientError>;
