// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Remote object store adapters

mod azblob;
mod signing;

pub use azblob::AzureBlobStore;
pub use signing::SharedKeySigner;

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakeBlobStore, StoreCall, StoreOp};

use async_trait::async_trait;
use std::fmt;
use thiserror::Error;

/// Structured error category reported by the store (the `x-ms-error-code` header)
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ErrorCategory {
    BlobAlreadyExists,
    BlobNotFound,
    ContainerNotFound,
    LeaseAlreadyPresent,
    LeaseIdMissing,
    LeaseIdMismatch,
    LeaseNotPresent,
    ConditionNotMet,
    AuthenticationFailed,
    Other(String),
    /// Response carried no error code
    Unknown,
}

impl ErrorCategory {
    pub fn from_code(code: Option<&str>) -> Self {
        match code {
            None => ErrorCategory::Unknown,
            Some("BlobAlreadyExists") => ErrorCategory::BlobAlreadyExists,
            Some("BlobNotFound") => ErrorCategory::BlobNotFound,
            Some("ContainerNotFound") => ErrorCategory::ContainerNotFound,
            Some("LeaseAlreadyPresent") => ErrorCategory::LeaseAlreadyPresent,
            Some("LeaseIdMissing") => ErrorCategory::LeaseIdMissing,
            Some("LeaseIdMismatchWithLeaseOperation") => ErrorCategory::LeaseIdMismatch,
            Some("LeaseNotPresentWithLeaseOperation") => ErrorCategory::LeaseNotPresent,
            Some("ConditionNotMet") => ErrorCategory::ConditionNotMet,
            Some("AuthenticationFailed") => ErrorCategory::AuthenticationFailed,
            Some(other) => ErrorCategory::Other(other.to_string()),
        }
    }

    pub fn as_code(&self) -> &str {
        match self {
            ErrorCategory::BlobAlreadyExists => "BlobAlreadyExists",
            ErrorCategory::BlobNotFound => "BlobNotFound",
            ErrorCategory::ContainerNotFound => "ContainerNotFound",
            ErrorCategory::LeaseAlreadyPresent => "LeaseAlreadyPresent",
            ErrorCategory::LeaseIdMissing => "LeaseIdMissing",
            ErrorCategory::LeaseIdMismatch => "LeaseIdMismatchWithLeaseOperation",
            ErrorCategory::LeaseNotPresent => "LeaseNotPresentWithLeaseOperation",
            ErrorCategory::ConditionNotMet => "ConditionNotMet",
            ErrorCategory::AuthenticationFailed => "AuthenticationFailed",
            ErrorCategory::Other(code) => code,
            ErrorCategory::Unknown => "Unknown",
        }
    }

    /// A conditional create was refused because the object is already there.
    ///
    /// `LeaseIdMissing` means the object exists and is leased by someone else.
    pub fn means_already_exists(&self) -> bool {
        matches!(
            self,
            ErrorCategory::BlobAlreadyExists
                | ErrorCategory::ConditionNotMet
                | ErrorCategory::LeaseIdMissing
        )
    }

    /// A lease could not be taken because the object is missing or already leased
    pub fn means_lease_unavailable(&self) -> bool {
        matches!(
            self,
            ErrorCategory::LeaseAlreadyPresent | ErrorCategory::BlobNotFound
        )
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_code())
    }
}

/// Errors from object store operations
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{operation} '{blob}' failed with status {status} ({category})")]
    Service {
        operation: &'static str,
        blob: String,
        status: u16,
        category: ErrorCategory,
    },
    #[error("{operation} '{blob}' failed: {message}")]
    Transport {
        operation: &'static str,
        blob: String,
        message: String,
    },
    #[error("lease acquired on '{0}' but the response carried no lease id")]
    MissingLeaseId(String),
    #[error("invalid storage access key: {0}")]
    InvalidKey(String),
    #[error("invalid blob endpoint '{endpoint}': {message}")]
    InvalidEndpoint { endpoint: String, message: String },
}

impl StoreError {
    /// Structured category, when the store answered with an error response
    pub fn category(&self) -> Option<&ErrorCategory> {
        match self {
            StoreError::Service { category, .. } => Some(category),
            _ => None,
        }
    }
}

/// How a write treats an existing object
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WriteMode {
    /// Fail if the object exists
    CreateOnly,
    /// Replace any existing object
    Overwrite,
}

/// Adapter for the container holding stack state, lock placeholders included
#[async_trait]
pub trait BlobStore: Clone + Send + Sync + 'static {
    /// Whether an object exists at `blob`
    async fn exists(&self, blob: &str) -> Result<bool, StoreError>;

    /// Write `content` to `blob`
    async fn put(&self, blob: &str, content: Vec<u8>, mode: WriteMode) -> Result<(), StoreError>;

    /// Take an infinite lease on an existing object, returning the lease id
    async fn acquire_lease(&self, blob: &str) -> Result<String, StoreError>;

    /// Release a lease using the exact lease id returned by acquire
    async fn release_lease(&self, blob: &str, lease_id: &str) -> Result<(), StoreError>;
}
