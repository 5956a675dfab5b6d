use thiserror::Error;

/// Client-side validation failures, surfaced to the user as a blocking alert.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("No file selected!")]
    NoFileSelected,

    #[error("Please select a valid PDF file!")]
    NotPdf { file_name: String, content_type: String },

    #[error("File is too large ({size} bytes, limit is {limit} bytes)")]
    TooLarge { size: u64, limit: u64 },

    #[error("Could not read {path}: {reason}")]
    Unreadable { path: String, reason: String },
}

/// Why a view refused to start a request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ViewError {
    /// The triggering control is disabled while a request is in flight.
    #[error("A request is already in progress")]
    Busy,

    #[error(transparent)]
    Invalid(#[from] ValidationError),
}

/// Request failures: transport errors, non-2xx responses, or undecodable bodies.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {detail}")]
    Status { status: u16, detail: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

impl ClientError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Status { status, .. } => Some(*status),
            ClientError::Http(e) => e.status().map(|s| s.as_u16()),
            ClientError::Parse(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_messages_match_alerts() {
        assert_eq!(ValidationError::NoFileSelected.to_string(), "No file selected!");
        let err = ValidationError::NotPdf {
            file_name: "cv.docx".into(),
            content_type: "application/octet-stream".into(),
        };
        assert_eq!(err.to_string(), "Please select a valid PDF file!");
    }

    #[test]
    fn test_view_error_is_transparent_over_validation() {
        let err = ViewError::from(ValidationError::NoFileSelected);
        assert_eq!(err.to_string(), "No file selected!");
    }

    #[test]
    fn test_status_error_reports_code() {
        let err = ClientError::Status {
            status: 500,
            detail: "boom".into(),
        };
        assert_eq!(err.status(), Some(500));
        assert_eq!(err.to_string(), "API error (status 500): boom");
    }
}
