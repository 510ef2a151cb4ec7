use thiserror::Error;

/// Errors raised while talking to the document store
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("document store returned status {status}")]
    Status { status: u16 },

    #[error("document store rejected the request ({status}): {message}")]
    Rejected { status: u16, message: String },

    #[error("failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("invalid url: {0}")]
    InvalidUrl(String),

    #[error("unsupported file type: {0} (only PDF and DOCX files are supported)")]
    UnsupportedFileType(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl StoreError {
    /// HTTP status reported by the store, if the failure came from a response
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status } | Self::Rejected { status, .. } => Some(*status),
            Self::Http(err) => err.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

/// Errors raised while building a [`crate::ViewerConfig`]
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value}")]
    InvalidValue { key: &'static str, value: String },

    #[error("invalid api base url {0}")]
    InvalidApiBase(String),
}

pub type Result<T> = std::result::Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejected_carries_status() {
        let err = StoreError::Rejected {
            status: 400,
            message: "No file provided".into(),
        };
        assert_eq!(err.status(), Some(400));
        assert_eq!(
            err.to_string(),
            "document store rejected the request (400): No file provided"
        );
    }

    #[test]
    fn local_errors_have_no_status() {
        assert_eq!(StoreError::UnsupportedFileType("txt".into()).status(), None);
    }
}
