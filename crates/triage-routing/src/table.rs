// SPDX-FileCopyrightText: 2026 Triage Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Static intent-to-model routing table.
//!
//! One [`RouteConfig`] per intent, held in named fields rather than a map so
//! `lookup` is total over the [`Intent`] set by construction: there is no
//! missing-entry case to handle. The table is read-only after construction
//! and safe to share across any number of concurrent readers.

use serde::Serialize;
use triage_config::model::RoutingSettings;
use triage_core::Intent;

/// Per-intent routing policy.
#[derive(Debug, Clone, Serialize)]
pub struct RouteConfig {
    /// Model identifier sent to the completion backend.
    pub model: String,
    /// Per-request cost in USD.
    pub cost_per_request: f64,
    /// Response token budget.
    pub max_tokens: u32,
}

/// Immutable mapping from intent to routing policy.
#[derive(Debug, Clone, Serialize)]
pub struct RoutingTable {
    simple: RouteConfig,
    code_gen: RouteConfig,
    debug: RouteConfig,
    architecture: RouteConfig,
}

impl RoutingTable {
    /// Build the table from (possibly overridden) routing settings.
    pub fn from_settings(settings: &RoutingSettings) -> Self {
        Self {
            simple: RouteConfig {
                model: settings.simple_model.clone(),
                cost_per_request: settings.simple_cost,
                max_tokens: settings.simple_max_tokens,
            },
            code_gen: RouteConfig {
                model: settings.code_gen_model.clone(),
                cost_per_request: settings.code_gen_cost,
                max_tokens: settings.code_gen_max_tokens,
            },
            debug: RouteConfig {
                model: settings.debug_model.clone(),
                cost_per_request: settings.debug_cost,
                max_tokens: settings.debug_max_tokens,
            },
            architecture: RouteConfig {
                model: settings.architecture_model.clone(),
                cost_per_request: settings.architecture_cost,
                max_tokens: settings.architecture_max_tokens,
            },
        }
    }

    /// The routing policy for an intent. Total: every intent has an entry.
    pub fn lookup(&self, intent: Intent) -> &RouteConfig {
        match intent {
            Intent::Simple => &self.simple,
            Intent::CodeGen => &self.code_gen,
            Intent::Debug => &self.debug,
            Intent::Architecture => &self.architecture,
        }
    }

    /// Per-request cost of the premium tier, used as the savings baseline.
    pub fn premium_cost_per_request(&self) -> f64 {
        self.architecture.cost_per_request
    }
}

impl Default for RoutingTable {
    fn default() -> Self {
        Self::from_settings(&RoutingSettings::default())
    }
}
