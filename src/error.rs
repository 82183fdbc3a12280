//! Error types.
//!
//! [`AllocError`] covers everything that can go wrong while allocating a single
//! account and never aborts the other accounts of a run. [`AppError`] is fatal
//! for the whole run (unreadable files, broken documents, logger setup).

use crate::models::Ipv4;
use thiserror::Error;

/// Per-account allocation failure.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AllocError {
    #[error("invalid CIDR '{cidr}': {reason}")]
    InvalidCidr { cidr: String, reason: String },

    #[error("capacity exceeded in {parent}: {required} subnets required, only {available} available")]
    Capacity {
        parent: Ipv4,
        required: u64,
        available: u64,
    },

    #[error("duplicate slot for tier '{tier}' zone '{zone}'")]
    DuplicateSlot { tier: String, zone: String },

    #[error("configuration error: {message}")]
    ConfigShape { message: String },
}

impl AllocError {
    /// Short kind label used in summaries and logs.
    pub fn kind(&self) -> &'static str {
        match self {
            AllocError::InvalidCidr { .. } => "InvalidCidr",
            AllocError::Capacity { .. } => "Capacity",
            AllocError::DuplicateSlot { .. } => "DuplicateSlot",
            AllocError::ConfigShape { .. } => "ConfigShape",
        }
    }

    pub(crate) fn shape(message: impl Into<String>) -> Self {
        AllocError::ConfigShape {
            message: message.into(),
        }
    }

    pub(crate) fn invalid_cidr(cidr: impl Into<String>, reason: impl Into<String>) -> Self {
        AllocError::InvalidCidr {
            cidr: cidr.into(),
            reason: reason.into(),
        }
    }
}

/// Fatal run-level failure.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("IO error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("YAML error in {file} at '{path}': {message}")]
    Yaml {
        file: String,
        path: String,
        message: String,
    },

    #[error("YAML document error: {0}")]
    YamlDoc(#[from] serde_yaml::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("logging setup failed: {message}")]
    Logging { message: String },
}

pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capacity_message() {
        let err = AllocError::Capacity {
            parent: Ipv4::new("10.0.0.0/30").unwrap(),
            required: 10,
            available: 4,
        };
        assert_eq!(err.kind(), "Capacity");
        assert_eq!(
            err.to_string(),
            "capacity exceeded in 10.0.0.0/30: 10 subnets required, only 4 available"
        );
    }

    #[test]
    fn test_shape_helper() {
        let err = AllocError::shape("missing field 'cidr'");
        assert_eq!(err.kind(), "ConfigShape");
        assert_eq!(err.to_string(), "configuration error: missing field 'cidr'");
    }
}
