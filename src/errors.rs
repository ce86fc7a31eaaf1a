use thiserror::Error;

use crate::decimal::Money;

#[derive(Error, Debug)]
pub enum LoanError {
    #[error("invalid parameter {field}: {message}")]
    InvalidParameter {
        field: &'static str,
        message: String,
    },

    #[error("invalid configuration: {message}")]
    InvalidConfiguration {
        message: String,
    },

    #[error("unsupported kfw amount: {amount} (expected 100000 or 220000)")]
    UnsupportedKfwAmount {
        amount: Money,
    },

    #[error("invalid date: {message}")]
    InvalidDate {
        message: String,
    },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl LoanError {
    pub(crate) fn invalid_parameter(field: &'static str, message: impl Into<String>) -> Self {
        LoanError::InvalidParameter {
            field,
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, LoanError>;
