// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use thiserror::Error;

/// Failures raised by a key-value backend.
///
/// These never reach callers of [`crate::storage::Storage`]; the adapter logs
/// them and carries on with the in-memory state.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage backend error: {0}")]
    Backend(#[from] rusqlite::Error),

    #[error("quota exceeded writing '{key}': {needed} bytes needed, limit is {limit}")]
    QuotaExceeded {
        key: String,
        needed: usize,
        limit: usize,
    },

    #[error("could not encode value for '{key}': {source}")]
    Encode {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Input rejected before it reaches the repository or preferences.
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("amount must be a positive number, got {0}")]
    InvalidAmount(String),

    #[error("'{category}' is not a valid {kind} category")]
    InvalidCategory { category: String, kind: String },

    #[error("invalid transaction type '{0}', expected income or expense")]
    InvalidType(String),

    #[error("unknown currency code '{0}'")]
    UnknownCurrency(String),
}
