// SPDX-FileCopyrightText: 2026 Triage Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration system for the Triage routing engine.
//!
//! Provides TOML configuration parsing with strict validation
//! (`deny_unknown_fields`), XDG file hierarchy lookup, and environment
//! variable overrides via the `TRIAGE_` prefix.

pub mod loader;
pub mod model;
pub mod validation;

pub use loader::{load_config, load_config_from_path, load_config_from_str};
pub use model::TriageConfig;

use triage_core::TriageError;

/// Load configuration from the XDG hierarchy and validate it.
///
/// This is the high-level entry point: loads config from TOML files plus
/// env vars via Figment, then runs post-deserialization validation. All
/// validation violations are joined into one `TriageError::Config`.
pub fn load_and_validate() -> Result<TriageConfig, TriageError> {
    let config = loader::load_config().map_err(|e| TriageError::Config(e.to_string()))?;
    validation::validate_config(&config).map_err(|errors| TriageError::Config(errors.join("; ")))?;
    Ok(config)
}

/// Load configuration from a TOML string and validate it.
///
/// Useful for testing and explicit configuration.
pub fn load_and_validate_str(toml_content: &str) -> Result<TriageConfig, TriageError> {
    let config =
        loader::load_config_from_str(toml_content).map_err(|e| TriageError::Config(e.to_string()))?;
    validation::validate_config(&config).map_err(|errors| TriageError::Config(errors.join("; ")))?;
    Ok(config)
}
