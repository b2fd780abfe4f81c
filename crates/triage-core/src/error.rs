// SPDX-FileCopyrightText: 2026 Triage Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Triage routing engine.

use thiserror::Error;

/// The primary error type used across the Triage workspace.
#[derive(Debug, Error)]
pub enum TriageError {
    /// Configuration errors (invalid TOML, out-of-range values, type mismatches).
    #[error("configuration error: {0}")]
    Config(String),

    /// Completion backend errors (API failure, malformed response, auth).
    #[error("provider error: {message}")]
    Provider {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// No API key available for the completion backend.
    #[error("no API key configured for the completion backend")]
    MissingApiKey,

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}
