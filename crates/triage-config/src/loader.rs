// SPDX-FileCopyrightText: 2026 Triage Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./triage.toml` > `~/.config/triage/triage.toml`
//! > `/etc/triage/triage.toml` with environment variable overrides via the
//! `TRIAGE_` prefix. Setting `TRIAGE_CONFIG` to a file path bypasses the
//! hierarchy entirely and loads that file alone (env overrides still apply).

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::{Path, PathBuf};

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};

use crate::model::TriageConfig;

/// Env var naming an explicit config file, replacing the XDG hierarchy.
const CONFIG_PATH_VAR: &str = "TRIAGE_CONFIG";

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/triage/triage.toml` (system-wide)
/// 3. `~/.config/triage/triage.toml` (user XDG config)
/// 4. `./triage.toml` (local directory)
/// 5. `TRIAGE_*` environment variables
///
/// When `TRIAGE_CONFIG` names a file, steps 2-4 are replaced by that single
/// file.
pub fn load_config() -> Result<TriageConfig, figment::Error> {
    if let Some(path) = explicit_config_path() {
        return load_config_from_path(&path);
    }
    Figment::new()
        .merge(Serialized::defaults(TriageConfig::default()))
        .merge(Toml::file("/etc/triage/triage.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("triage/triage.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("triage.toml"))
        .merge(env_provider())
        .extract()
}

/// Load configuration from a TOML string only (no XDG lookup).
///
/// Used for testing and explicit config specification.
pub fn load_config_from_str(toml_content: &str) -> Result<TriageConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(TriageConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<TriageConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(TriageConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Explicit config file path from `TRIAGE_CONFIG`, when set and non-empty.
fn explicit_config_path() -> Option<PathBuf> {
    std::env::var(CONFIG_PATH_VAR)
        .ok()
        .filter(|value| !value.trim().is_empty())
        .map(PathBuf::from)
}

/// Create the environment variable provider using explicit `map()` for
/// section-to-dot mapping.
///
/// Uses `Env::map()` rather than `Env::split("_")` to avoid ambiguity with
/// underscore-containing key names: `TRIAGE_OPENROUTER_API_KEY` must map to
/// `openrouter.api_key`, not `openrouter.api.key`. `TRIAGE_CONFIG` is a
/// loader directive, not a config key, so it is excluded from extraction.
fn env_provider() -> Env {
    Env::prefixed("TRIAGE_").ignore(&["config"]).map(|key| {
        // `key` is the env var name with the prefix stripped but its original
        // casing intact (figment lowercases only after this mapper runs), so
        // lowercase here before matching section prefixes.
        // Example: TRIAGE_OPENROUTER_API_KEY -> "openrouter_api_key"
        let key_str = key.as_str().to_ascii_lowercase();
        let mapped = key_str
            .replacen("agent_", "agent.", 1)
            .replacen("routing_", "routing.", 1)
            .replacen("classifier_", "classifier.", 1)
            .replacen("cost_", "cost.", 1)
            .replacen("openrouter_", "openrouter.", 1);
        mapped.into()
    })
}
