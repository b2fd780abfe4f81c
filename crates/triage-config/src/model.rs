// SPDX-FileCopyrightText: 2026 Triage Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for Triage.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup. Every recognized option is enumerated here with
//! an explicit default; there are no loosely-typed nested properties.

use serde::{Deserialize, Serialize};

/// Top-level Triage configuration.
///
/// Loaded from TOML files following the XDG hierarchy, with environment
/// variable overrides. All sections are optional and default to sensible
/// values.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct TriageConfig {
    /// Identity and logging settings.
    #[serde(default)]
    pub agent: AgentConfig,

    /// Per-intent model routing overrides.
    #[serde(default)]
    pub routing: RoutingSettings,

    /// Adaptive classifier tuning.
    #[serde(default)]
    pub classifier: ClassifierSettings,

    /// Usage tracking settings.
    #[serde(default)]
    pub cost: CostSettings,

    /// OpenRouter completion backend settings.
    #[serde(default)]
    pub openrouter: OpenRouterSettings,
}

/// Identity and logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AgentConfig {
    /// Display name used in reports.
    #[serde(default = "default_agent_name")]
    pub name: String,

    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            name: default_agent_name(),
            log_level: default_log_level(),
        }
    }
}

fn default_agent_name() -> String {
    "triage".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Per-intent routing table overrides.
///
/// Defaults reproduce the fixed routing table; overriding a model string
/// changes which backend serves that intent without touching costs or
/// budgets unless those are overridden too.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct RoutingSettings {
    /// Model identifier for `simple` queries (free tier).
    #[serde(default = "default_simple_model")]
    pub simple_model: String,
    /// Model identifier for `code_gen` queries.
    #[serde(default = "default_code_gen_model")]
    pub code_gen_model: String,
    /// Model identifier for `debug` queries.
    #[serde(default = "default_debug_model")]
    pub debug_model: String,
    /// Model identifier for `architecture` queries (premium tier).
    #[serde(default = "default_architecture_model")]
    pub architecture_model: String,

    /// Per-request cost in USD for `simple` queries.
    #[serde(default = "default_simple_cost")]
    pub simple_cost: f64,
    /// Per-request cost in USD for `code_gen` queries.
    #[serde(default = "default_code_gen_cost")]
    pub code_gen_cost: f64,
    /// Per-request cost in USD for `debug` queries.
    #[serde(default = "default_debug_cost")]
    pub debug_cost: f64,
    /// Per-request cost in USD for `architecture` queries.
    #[serde(default = "default_architecture_cost")]
    pub architecture_cost: f64,

    /// Response token budget for `simple` queries.
    #[serde(default = "default_simple_max_tokens")]
    pub simple_max_tokens: u32,
    /// Response token budget for `code_gen` queries.
    #[serde(default = "default_code_gen_max_tokens")]
    pub code_gen_max_tokens: u32,
    /// Response token budget for `debug` queries.
    #[serde(default = "default_debug_max_tokens")]
    pub debug_max_tokens: u32,
    /// Response token budget for `architecture` queries.
    #[serde(default = "default_architecture_max_tokens")]
    pub architecture_max_tokens: u32,
}

impl Default for RoutingSettings {
    fn default() -> Self {
        Self {
            simple_model: default_simple_model(),
            code_gen_model: default_code_gen_model(),
            debug_model: default_debug_model(),
            architecture_model: default_architecture_model(),
            simple_cost: default_simple_cost(),
            code_gen_cost: default_code_gen_cost(),
            debug_cost: default_debug_cost(),
            architecture_cost: default_architecture_cost(),
            simple_max_tokens: default_simple_max_tokens(),
            code_gen_max_tokens: default_code_gen_max_tokens(),
            debug_max_tokens: default_debug_max_tokens(),
            architecture_max_tokens: default_architecture_max_tokens(),
        }
    }
}

fn default_simple_model() -> String {
    "xiaomi/mimo-v2-flash".to_string()
}

fn default_code_gen_model() -> String {
    "qwen/qwen3-235b-a22b".to_string()
}

fn default_debug_model() -> String {
    "minimax/minimax-m2.5".to_string()
}

fn default_architecture_model() -> String {
    "anthropic/claude-opus-4.6".to_string()
}

fn default_simple_cost() -> f64 {
    0.0
}

fn default_code_gen_cost() -> f64 {
    0.25
}

fn default_debug_cost() -> f64 {
    0.28
}

fn default_architecture_cost() -> f64 {
    5.0
}

fn default_simple_max_tokens() -> u32 {
    4096
}

fn default_code_gen_max_tokens() -> u32 {
    8192
}

fn default_debug_max_tokens() -> u32 {
    8192
}

fn default_architecture_max_tokens() -> u32 {
    1_000_000
}

/// Adaptive classifier tuning.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ClassifierSettings {
    /// Maximum number of pattern-history entries kept in memory. Oldest
    /// entries are evicted once this capacity is reached.
    #[serde(default = "default_history_capacity")]
    pub history_capacity: usize,

    /// Minimum Jaccard token overlap for a prior query's intent to be reused.
    #[serde(default = "default_similarity_threshold")]
    pub similarity_threshold: f32,

    /// Confidence assigned to history-similarity classifications.
    #[serde(default = "default_history_confidence")]
    pub history_confidence: f32,

    /// Confidence assigned to rule-based fallback classifications.
    #[serde(default = "default_fallback_confidence")]
    pub fallback_confidence: f32,
}

impl Default for ClassifierSettings {
    fn default() -> Self {
        Self {
            history_capacity: default_history_capacity(),
            similarity_threshold: default_similarity_threshold(),
            history_confidence: default_history_confidence(),
            fallback_confidence: default_fallback_confidence(),
        }
    }
}

fn default_history_capacity() -> usize {
    256
}

fn default_similarity_threshold() -> f32 {
    0.6
}

fn default_history_confidence() -> f32 {
    0.8
}

fn default_fallback_confidence() -> f32 {
    0.6
}

/// Usage tracking configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct CostSettings {
    /// Maximum usage records retained in the in-memory log. Aggregates are
    /// unaffected by record eviction.
    #[serde(default = "default_max_records")]
    pub max_records: usize,

    /// Whether to record token breakdowns alongside costs.
    #[serde(default = "default_track_tokens")]
    pub track_tokens: bool,
}

impl Default for CostSettings {
    fn default() -> Self {
        Self {
            max_records: default_max_records(),
            track_tokens: default_track_tokens(),
        }
    }
}

fn default_max_records() -> usize {
    1000
}

fn default_track_tokens() -> bool {
    true
}

/// OpenRouter completion backend configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct OpenRouterSettings {
    /// API key. Usually supplied via `TRIAGE_OPENROUTER_API_KEY` instead of
    /// the config file.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Base URL of the chat-completions API.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Sampling temperature passed to the backend.
    #[serde(default = "default_temperature")]
    pub temperature: f32,
}

impl Default for OpenRouterSettings {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            temperature: default_temperature(),
        }
    }
}

fn default_base_url() -> String {
    "https://openrouter.ai/api/v1/chat/completions".to_string()
}

fn default_timeout_secs() -> u64 {
    120
}

fn default_temperature() -> f32 {
    0.7
}
