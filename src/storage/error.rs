use std::error::Error;
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageErrorCode {
    InvalidHandle,
    BufferTooSmall,
    ResponseRetrievalError,
    InvalidResponse,
    InvalidArgument,
}

impl StorageErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            StorageErrorCode::InvalidHandle => "storage/invalid-handle",
            StorageErrorCode::BufferTooSmall => "storage/buffer-too-small",
            StorageErrorCode::ResponseRetrievalError => "storage/response-retrieval-error",
            StorageErrorCode::InvalidResponse => "storage/invalid-response",
            StorageErrorCode::InvalidArgument => "storage/invalid-argument",
        }
    }
}

#[derive(Debug, Clone)]
pub struct StorageError {
    pub code: StorageErrorCode,
    message: String,
    pub status: Option<u16>,
    pub server_response: Option<String>,
}

impl StorageError {
    pub fn new(code: StorageErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            status: None,
            server_response: None,
        }
    }

    pub fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_server_response(mut self, response: impl Into<String>) -> Self {
        self.server_response = Some(response.into());
        self
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn code_str(&self) -> &'static str {
        self.code.as_str()
    }
}

impl Display for StorageError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match (&self.status, &self.server_response) {
            (Some(status), Some(server)) => write!(
                f,
                "{} ({}, status {status}): {server}",
                self.message,
                self.code_str()
            ),
            (Some(status), None) => {
                write!(f, "{} ({}, status {status})", self.message, self.code_str())
            }
            (None, Some(server)) => write!(f, "{} ({}): {}", self.message, self.code_str(), server),
            (None, None) => write!(f, "{} ({})", self.message, self.code_str()),
        }
    }
}

impl Error for StorageError {}

pub type StorageResult<T> = Result<T, StorageError>;

pub fn invalid_handle() -> StorageError {
    StorageError::new(
        StorageErrorCode::InvalidHandle,
        "Upload response handle is missing; responses can only be built from a completed upload.",
    )
}

pub fn buffer_too_small(required: usize, capacity: usize) -> StorageError {
    StorageError::new(
        StorageErrorCode::BufferTooSmall,
        format!("Hash needs {required} bytes but the buffer holds {capacity}."),
    )
}

pub fn response_retrieval_error(message: impl Into<String>) -> StorageError {
    StorageError::new(StorageErrorCode::ResponseRetrievalError, message)
}

pub fn invalid_response(message: impl Into<String>) -> StorageError {
    StorageError::new(StorageErrorCode::InvalidResponse, message)
}

pub fn invalid_argument(message: impl Into<String>) -> StorageError {
    StorageError::new(StorageErrorCode::InvalidArgument, message)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_are_stable() {
        assert_eq!(invalid_handle().code_str(), "storage/invalid-handle");
        assert_eq!(buffer_too_small(300, 256).code_str(), "storage/buffer-too-small");
        assert_eq!(
            response_retrieval_error("boom").code_str(),
            "storage/response-retrieval-error"
        );
        assert_eq!(invalid_response("bad").code_str(), "storage/invalid-response");
        assert_eq!(invalid_argument("bad").code_str(), "storage/invalid-argument");
    }

    #[test]
    fn display_includes_status_and_server_response() {
        let err = invalid_response("upload failed")
            .with_status(614)
            .with_server_response("{\"error\":\"file exists\"}");
        assert_eq!(
            err.to_string(),
            "upload failed (storage/invalid-response, status 614): {\"error\":\"file exists\"}"
        );
        assert_eq!(err.status, Some(614));
    }

    #[test]
    fn buffer_too_small_reports_sizes() {
        let err = buffer_too_small(300, 256);
        assert_eq!(
            err.message(),
            "Hash needs 300 bytes but the buffer holds 256."
        );
    }
}
