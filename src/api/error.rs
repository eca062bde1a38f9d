use thiserror::Error;

/// Failures talking to the Major REST APIs.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum ApiError {
    #[error("unauthorized")]
    Unauthorized,

    #[error("forbidden")]
    Forbidden,

    #[error("not found")]
    NotFound,

    #[error("server error (HTTP {status})")]
    Server { status: u16 },

    #[error("unexpected HTTP {status}: {message}")]
    Status { status: u16, message: String },

    #[error("request timed out")]
    Timeout,

    #[error("network error: {0}")]
    Network(String),

    #[error("could not decode response: {0}")]
    Decode(String),
}

impl ApiError {
    /// Classifies a non-success HTTP response.
    pub fn from_status(status: u16, message: impl Into<String>) -> Self {
        match status {
            401 => Self::Unauthorized,
            403 => Self::Forbidden,
            404 => Self::NotFound,
            500..=599 => Self::Server { status },
            _ => Self::Status {
                status,
                message: message.into(),
            },
        }
    }

    /// Error code placed in the IPC error envelope.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Unauthorized => "unauthorized",
            Self::Forbidden => "forbidden",
            Self::NotFound => "not_found",
            Self::Server { .. } => "server_error",
            Self::Status { .. } => "api_error",
            Self::Timeout => "timeout",
            Self::Network(_) => "network_error",
            Self::Decode(_) => "bad_response",
        }
    }

    /// Catalog key of the user-facing message.
    pub fn message_key(&self) -> &'static str {
        match self {
            Self::Unauthorized => "error.unauthorized",
            Self::Forbidden => "error.forbidden",
            Self::NotFound => "error.notFound",
            Self::Server { .. } => "error.server",
            Self::Timeout | Self::Network(_) => "error.network",
            Self::Status { .. } | Self::Decode(_) => "error.unknown",
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Unauthorized => Some(401),
            Self::Forbidden => Some(403),
            Self::NotFound => Some(404),
            Self::Server { status } | Self::Status { status, .. } => Some(*status),
            Self::Timeout | Self::Network(_) | Self::Decode(_) => None,
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            Self::Timeout
        } else if e.is_decode() {
            Self::Decode(e.to_string())
        } else if let Some(status) = e.status() {
            Self::from_status(status.as_u16(), e.to_string())
        } else {
            Self::Network(e.to_string())
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        Self::Decode(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_statuses() {
        assert_eq!(ApiError::from_status(401, ""), ApiError::Unauthorized);
        assert_eq!(ApiError::from_status(403, ""), ApiError::Forbidden);
        assert_eq!(ApiError::from_status(404, ""), ApiError::NotFound);
        assert_eq!(
            ApiError::from_status(503, "down"),
            ApiError::Server { status: 503 }
        );
        assert_eq!(
            ApiError::from_status(422, "bad body"),
            ApiError::Status {
                status: 422,
                message: "bad body".into()
            }
        );
    }

    #[test]
    fn message_keys_cover_user_facing_categories() {
        assert_eq!(ApiError::Timeout.message_key(), "error.network");
        assert_eq!(
            ApiError::Network("refused".into()).message_key(),
            "error.network"
        );
        assert_eq!(ApiError::Server { status: 500 }.message_key(), "error.server");
        assert_eq!(ApiError::NotFound.status(), Some(404));
        assert_eq!(ApiError::Timeout.status(), None);
    }
}
