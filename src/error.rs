//! Unified error types for chainbalance
//!
//! All failure paths flow through this module so callers can tell a
//! malformed address apart from a transport fault or an upstream rejection.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Main error type for all balance operations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BalanceError {
    pub code: ErrorCode,
    pub message: String,
    pub details: Option<String>,
}

impl BalanceError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    // Convenience constructors

    pub fn invalid_address(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidAddress, msg)
    }

    pub fn network_error(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::NetworkError, msg)
    }

    pub fn http_status(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::HttpStatus, msg)
    }

    pub fn upstream(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::UpstreamError, msg)
    }

    pub fn parse_error(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::ParseError, msg)
    }

    pub fn missing_credential(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::MissingCredential, msg)
    }

    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidConfig, msg)
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::Internal, msg)
    }
}

impl fmt::Display for BalanceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)?;
        if let Some(ref details) = self.details {
            write!(f, " ({})", details)?;
        }
        Ok(())
    }
}

impl std::error::Error for BalanceError {}

/// Error codes for categorization
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    // Input errors
    InvalidAddress,

    // Transport errors
    NetworkError,
    Timeout,
    HttpStatus,

    // The API answered but reported a failure of its own
    UpstreamError,

    // Parse errors
    ParseError,
    JsonError,

    // Configuration
    MissingCredential,
    InvalidConfig,

    // Internal
    Internal,
}

/// Result type alias for balance operations
pub type BalanceResult<T> = Result<T, BalanceError>;

// Conversions from common error types

impl From<serde_json::Error> for BalanceError {
    fn from(e: serde_json::Error) -> Self {
        BalanceError::new(ErrorCode::JsonError, e.to_string())
    }
}

impl From<reqwest::Error> for BalanceError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            BalanceError::new(ErrorCode::Timeout, "Request timed out")
        } else if e.is_connect() {
            BalanceError::new(ErrorCode::NetworkError, "Connection failed")
        } else if e.is_decode() {
            BalanceError::new(ErrorCode::ParseError, e.to_string())
        } else {
            BalanceError::new(ErrorCode::NetworkError, e.to_string())
        }
    }
}
