use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug, Clone, Serialize, Deserialize)]
pub enum PdfsiftError {
    #[error("Validation error: {field} - {message}")]
    Validation { field: String, message: String },

    #[error("Error processing PDF: {message}")]
    DecodeFailure { message: String },

    #[error("Storage error: {message}")]
    Storage { message: String },

    #[error("Not found: {resource}")]
    NotFound { resource: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Internal server error: {message}")]
    Internal { message: String },
}

impl PdfsiftError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn decode_failure(message: impl Into<String>) -> Self {
        Self::DecodeFailure {
            message: message.into(),
        }
    }

    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }

    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::NotFound {
            resource: resource.into(),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Validation { .. } => "VALIDATION_ERROR",
            Self::DecodeFailure { .. } => "DECODE_FAILURE",
            Self::Storage { .. } => "STORAGE_ERROR",
            Self::NotFound { .. } => "NOT_FOUND",
            Self::Configuration { .. } => "CONFIGURATION_ERROR",
            Self::Internal { .. } => "INTERNAL_SERVER_ERROR",
        }
    }

    pub fn http_status_code(&self) -> u16 {
        match self {
            Self::Validation { .. } => 400,
            Self::DecodeFailure { .. } => 422,
            Self::Storage { .. } => 500,
            Self::NotFound { .. } => 404,
            Self::Configuration { .. } => 500,
            Self::Internal { .. } => 500,
        }
    }
}

pub type PdfsiftResult<T> = Result<T, PdfsiftError>;

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

impl From<PdfsiftError> for ErrorResponse {
    fn from(error: PdfsiftError) -> Self {
        Self {
            error: error.to_string(),
            code: error.error_code().to_string(),
        }
    }
}

impl From<std::io::Error> for PdfsiftError {
    fn from(error: std::io::Error) -> Self {
        Self::storage(error.to_string())
    }
}
