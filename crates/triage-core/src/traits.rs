// SPDX-FileCopyrightText: 2026 Triage Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Collaborator traits consumed by the routing core.
//!
//! The routing engine never reads configuration storage, performs network
//! I/O, or inspects the workspace directly. It talks to those concerns
//! through these narrow seams; the binary wires in implementations.

use async_trait::async_trait;

use crate::error::TriageError;
use crate::types::{ChatMessage, ProjectId, TokenUsage};

/// Read-only access to stored settings.
pub trait SettingsProvider: Send + Sync {
    /// API key for the completion backend, if configured.
    fn api_key(&self) -> Option<String>;
}

/// A request to a completion backend, assembled by the routing engine.
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    /// Model identifier from the routing table.
    pub model: String,
    /// Ordered conversation messages.
    pub messages: Vec<ChatMessage>,
    /// Response token budget from the routing table.
    pub max_tokens: u32,
    /// Sampling temperature.
    pub temperature: f32,
}

/// A resolved completion: response text plus the token counts fed into
/// usage tracking.
#[derive(Debug, Clone)]
pub struct CompletionResponse {
    /// Assistant response text.
    pub text: String,
    /// Model that actually served the request.
    pub model: String,
    /// Billed token counts.
    pub usage: TokenUsage,
}

/// Upstream completion API client. Blocking, retries, and timeouts live
/// behind this seam, not in the routing core.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    async fn complete(&self, request: CompletionRequest)
    -> Result<CompletionResponse, TriageError>;
}

/// Supplies the project identifier usage is aggregated under.
pub trait ProjectLocator: Send + Sync {
    fn active_project(&self) -> ProjectId;
}
