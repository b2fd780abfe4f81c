// SPDX-FileCopyrightText: 2026 Triage Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Dispatch engine: classify, route, complete, track.
//!
//! Composes the adaptive classifier, the routing table, the completion
//! collaborator, and the usage tracker. The routing decision is computed
//! before the upstream call and returned alongside the call's result, so a
//! failed or skipped completion can still report "would have routed to
//! model X at estimated cost Y". Dropping the dispatch future before the
//! upstream call resolves skips usage tracking, which is the intended
//! cancellation behavior.

use std::sync::Arc;
use std::time::Instant;

use tracing::{info, warn};
use triage_classifier::AdaptiveClassifier;
use triage_core::{
    ChatMessage, CompletionClient, CompletionRequest, CompletionResponse, Intent, TriageError,
};
use triage_cost::UsageTracker;

use crate::table::RoutingTable;

/// A fully computed routing decision for one query.
#[derive(Debug, Clone)]
pub struct RoutingDecision {
    /// Intent the query was classified as.
    pub intent: Intent,
    /// Classifier confidence in (0, 1].
    pub confidence: f32,
    /// Target model from the routing table.
    pub model: String,
    /// Response token budget.
    pub max_tokens: u32,
    /// Estimated cost of the request in USD.
    pub estimated_cost_usd: f64,
}

/// Result of dispatching one query: the decision is always present, the
/// completion may have failed.
#[derive(Debug)]
pub struct DispatchOutcome {
    pub decision: RoutingDecision,
    pub result: Result<CompletionResponse, TriageError>,
}

/// Routes queries end to end.
pub struct DispatchEngine {
    classifier: AdaptiveClassifier,
    table: RoutingTable,
    tracker: Arc<UsageTracker>,
    completion: Arc<dyn CompletionClient>,
    temperature: f32,
}

impl DispatchEngine {
    pub fn new(
        classifier: AdaptiveClassifier,
        table: RoutingTable,
        tracker: Arc<UsageTracker>,
        completion: Arc<dyn CompletionClient>,
        temperature: f32,
    ) -> Self {
        Self {
            classifier,
            table,
            tracker,
            completion,
            temperature,
        }
    }

    /// Classify a query and look up its route, without dispatching.
    pub async fn decide(&self, query: &str) -> RoutingDecision {
        let classification = self.classifier.classify(query).await;
        let route = self.table.lookup(classification.intent);
        RoutingDecision {
            intent: classification.intent,
            confidence: classification.confidence,
            model: route.model.clone(),
            max_tokens: route.max_tokens,
            estimated_cost_usd: route.cost_per_request,
        }
    }

    /// Dispatch a query to its routed model and track the completed usage.
    ///
    /// `source` labels the usage records (e.g. "chat"); `extra_cost_usd` is
    /// added on top of the route's per-request cost (surcharges reported by
    /// the collaborator). Tracking is best-effort and never fails the turn.
    pub async fn dispatch(&self, query: &str, source: &str, extra_cost_usd: f64) -> DispatchOutcome {
        let decision = self.decide(query).await;
        info!(
            intent = %decision.intent,
            confidence = decision.confidence,
            model = %decision.model,
            estimated_cost_usd = decision.estimated_cost_usd,
            "routing decision"
        );

        let request = CompletionRequest {
            model: decision.model.clone(),
            messages: vec![ChatMessage::user(query)],
            max_tokens: decision.max_tokens,
            temperature: self.temperature,
        };

        let started = Instant::now();
        let result = self.completion.complete(request).await;
        match &result {
            Ok(response) => {
                let latency_ms = started.elapsed().as_millis() as u64;
                self.tracker.track_usage(
                    decision.intent,
                    &response.model,
                    response.usage.total(),
                    source,
                    decision.estimated_cost_usd + extra_cost_usd,
                    Some(response.usage),
                    Some(latency_ms),
                );
            }
            Err(err) => {
                warn!(
                    error = %err,
                    model = %decision.model,
                    estimated_cost_usd = decision.estimated_cost_usd,
                    "completion failed; decision stands unbilled"
                );
            }
        }

        DispatchOutcome { decision, result }
    }

    /// Record an exact intent override for a query.
    pub fn set_preference(&self, query: &str, intent: Intent) {
        self.classifier.set_preference(query, intent);
    }

    /// The routing table the engine dispatches against.
    pub fn table(&self) -> &RoutingTable {
        &self.table
    }

    /// The usage tracker fed by this engine.
    pub fn tracker(&self) -> &UsageTracker {
        &self.tracker
    }
}
