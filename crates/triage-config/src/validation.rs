// SPDX-FileCopyrightText: 2026 Triage Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde
//! attributes: threshold ranges, positive capacities, finite non-negative
//! costs. All violations are collected rather than failing fast.

use crate::model::TriageConfig;

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or all collected violation
/// messages.
pub fn validate_config(config: &TriageConfig) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    if config.agent.name.trim().is_empty() {
        errors.push("agent.name must not be empty".to_string());
    }

    const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];
    if !LOG_LEVELS.contains(&config.agent.log_level.as_str()) {
        errors.push(format!(
            "agent.log_level must be one of {LOG_LEVELS:?}, got `{}`",
            config.agent.log_level
        ));
    }

    let routing = &config.routing;
    for (key, model) in [
        ("routing.simple_model", &routing.simple_model),
        ("routing.code_gen_model", &routing.code_gen_model),
        ("routing.debug_model", &routing.debug_model),
        ("routing.architecture_model", &routing.architecture_model),
    ] {
        if model.trim().is_empty() {
            errors.push(format!("{key} must not be empty"));
        }
    }

    for (key, cost) in [
        ("routing.simple_cost", routing.simple_cost),
        ("routing.code_gen_cost", routing.code_gen_cost),
        ("routing.debug_cost", routing.debug_cost),
        ("routing.architecture_cost", routing.architecture_cost),
    ] {
        if !cost.is_finite() || cost < 0.0 {
            errors.push(format!("{key} must be finite and non-negative, got {cost}"));
        }
    }

    for (key, max_tokens) in [
        ("routing.simple_max_tokens", routing.simple_max_tokens),
        ("routing.code_gen_max_tokens", routing.code_gen_max_tokens),
        ("routing.debug_max_tokens", routing.debug_max_tokens),
        (
            "routing.architecture_max_tokens",
            routing.architecture_max_tokens,
        ),
    ] {
        if max_tokens == 0 {
            errors.push(format!("{key} must be positive"));
        }
    }

    let classifier = &config.classifier;
    if classifier.history_capacity == 0 {
        errors.push("classifier.history_capacity must be positive".to_string());
    }
    for (key, value) in [
        (
            "classifier.similarity_threshold",
            classifier.similarity_threshold,
        ),
        (
            "classifier.history_confidence",
            classifier.history_confidence,
        ),
        (
            "classifier.fallback_confidence",
            classifier.fallback_confidence,
        ),
    ] {
        if !value.is_finite() || value <= 0.0 || value > 1.0 {
            errors.push(format!("{key} must be in (0, 1], got {value}"));
        }
    }

    if config.cost.max_records == 0 {
        errors.push("cost.max_records must be positive".to_string());
    }

    let openrouter = &config.openrouter;
    if openrouter.base_url.trim().is_empty() {
        errors.push("openrouter.base_url must not be empty".to_string());
    }
    if openrouter.timeout_secs == 0 {
        errors.push("openrouter.timeout_secs must be positive".to_string());
    }
    if !openrouter.temperature.is_finite() || openrouter.temperature < 0.0 {
        errors.push(format!(
            "openrouter.temperature must be finite and non-negative, got {}",
            openrouter.temperature
        ));
    }

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = TriageConfig::default();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn zero_history_capacity_rejected() {
        let mut config = TriageConfig::default();
        config.classifier.history_capacity = 0;
        let errors = validate_config(&config).unwrap_err();
        assert!(errors.iter().any(|e| e.contains("history_capacity")));
    }

    #[test]
    fn out_of_range_threshold_rejected() {
        let mut config = TriageConfig::default();
        config.classifier.similarity_threshold = 1.5;
        let errors = validate_config(&config).unwrap_err();
        assert!(errors.iter().any(|e| e.contains("similarity_threshold")));
    }

    #[test]
    fn negative_cost_rejected() {
        let mut config = TriageConfig::default();
        config.routing.debug_cost = -0.5;
        let errors = validate_config(&config).unwrap_err();
        assert!(errors.iter().any(|e| e.contains("routing.debug_cost")));
    }

    #[test]
    fn multiple_violations_collected() {
        let mut config = TriageConfig::default();
        config.routing.simple_model = String::new();
        config.routing.simple_max_tokens = 0;
        config.cost.max_records = 0;
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 3, "all violations reported: {errors:?}");
    }

    #[test]
    fn bad_log_level_rejected() {
        let mut config = TriageConfig::default();
        config.agent.log_level = "verbose".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert!(errors.iter().any(|e| e.contains("log_level")));
    }
}
