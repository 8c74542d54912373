//! Client-side error kinds.

use sellerlink_core::CoreError;
use thiserror::Error;

pub type ClientResult<T> = Result<T, ClientError>;

#[derive(Debug, Error)]
pub enum ClientError {
    /// No valid session for the seller; the caller should run `authenticate`.
    #[error("not authenticated - call the authenticate tool first")]
    NotAuthenticated,

    /// The remote rejected the credentials; stored state is left untouched.
    #[error("authentication failed: {0}")]
    Auth(String),

    /// A post-authentication remote call failed; the session may still be valid.
    #[error("API call failed: {message}")]
    Api { status: Option<u16>, message: String },

    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error(transparent)]
    Store(#[from] CoreError),
}

impl ClientError {
    pub fn api(status: Option<u16>, message: impl Into<String>) -> Self {
        ClientError::Api { status, message: message.into() }
    }
}
