//! Error type shared by the API client and the views built on it.

use dtl_model::ValidationError;
use thiserror::Error;

/// Client operation result type
pub type ClientResult<T> = Result<T, ClientError>;

/// Any failure of a client call or view action
#[derive(Debug, Error)]
pub enum ClientError {
    /// The request never produced an HTTP response
    #[error("{message}: {source}")]
    Network {
        message: &'static str,
        #[source]
        source: reqwest::Error,
    },

    /// Non-2xx response. `message` is the server's, or the operation fallback.
    #[error("{message} (HTTP {status})")]
    Api { status: u16, message: String },

    #[error("{message}: unexpected response body: {source}")]
    Decode {
        message: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// A required identifier was absent; raised before any request is made
    #[error("{0} not found")]
    MissingIdentifier(&'static str),

    /// No bearer token is stored
    #[error("Not logged in")]
    NotLoggedIn,

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Configuration error: {0}")]
    Config(String),

    /// A page-level failure wrapping the error that caused it
    #[error("{message}")]
    View {
        message: &'static str,
        #[source]
        source: Box<ClientError>,
    },
}

impl ClientError {
    pub(crate) fn view(message: &'static str, source: Self) -> Self {
        Self::View {
            message,
            source: Box::new(source),
        }
    }

    /// Text suitable for showing to the user. Never empty.
    pub fn user_message(&self) -> String {
        match self {
            Self::Network { message, .. }
            | Self::Decode { message, .. }
            | Self::View { message, .. } => (*message).to_string(),
            Self::Api { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }

    /// The innermost error behind any page-level wrapping
    pub fn root(&self) -> &Self {
        match self {
            Self::View { source, .. } => source.root(),
            other => other,
        }
    }

    /// HTTP status of a rejected request, if that is what happened
    pub fn status(&self) -> Option<u16> {
        match self.root() {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}
