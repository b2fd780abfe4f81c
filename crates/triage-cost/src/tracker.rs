// SPDX-FileCopyrightText: 2026 Triage Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory usage tracking with per-project aggregation.
//!
//! Every completed request produces one immutable [`UsageRecord`]. Records
//! are append-only; aggregates are keyed by project and only ever grow
//! within a session. Tracking is best-effort by contract: malformed input is
//! logged and sanitized, never propagated, so cost accounting can never fail
//! a user-facing chat turn.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use serde::Serialize;
use tracing::{info, warn};
use triage_config::model::CostSettings;
use triage_core::{Intent, ProjectId, ProjectLocator, TokenUsage};

/// An immutable log entry for one billed request.
#[derive(Debug, Clone, Serialize)]
pub struct UsageRecord {
    /// Unique record identifier (UUID v4).
    pub id: String,
    /// Project the request was billed under.
    pub project_id: ProjectId,
    /// Intent the query was classified as.
    pub intent: Intent,
    /// Model that served the request.
    pub model: String,
    /// Prompt-side token count, when a breakdown was reported.
    pub prompt_tokens: u32,
    /// Completion-side token count, when a breakdown was reported.
    pub completion_tokens: u32,
    /// Total tokens billed.
    pub total_tokens: u32,
    /// Cost in USD.
    pub cost_usd: f64,
    /// Label for what triggered the request (e.g. "chat", "cli").
    pub source: String,
    /// End-to-end request latency, when measured.
    pub latency_ms: Option<u64>,
    /// When the record was created.
    pub created_at: DateTime<Utc>,
}

/// Running per-project aggregate. Monotonically non-decreasing within a
/// session; unaffected by record-log eviction.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ProjectUsage {
    /// Total spend in USD.
    pub total_cost_usd: f64,
    /// Number of tracked requests.
    pub request_count: u64,
    /// Total tokens billed across requests.
    pub total_tokens: u64,
    /// Request counts per intent.
    pub by_intent: HashMap<Intent, u64>,
    /// Request counts per model.
    pub by_model: HashMap<String, u64>,
}

/// Tracks usage records and per-project aggregates in memory.
///
/// Aggregates use the dashmap entry API so concurrent completions increment
/// atomically; the bounded record log sits behind its own mutex.
pub struct UsageTracker {
    projects: Arc<dyn ProjectLocator>,
    aggregates: DashMap<ProjectId, ProjectUsage>,
    records: Mutex<VecDeque<UsageRecord>>,
    max_records: usize,
    track_tokens: bool,
}

impl UsageTracker {
    /// Create a tracker billing against the given project locator.
    pub fn new(settings: &CostSettings, projects: Arc<dyn ProjectLocator>) -> Self {
        Self {
            projects,
            aggregates: DashMap::new(),
            records: Mutex::new(VecDeque::with_capacity(settings.max_records.min(1024))),
            max_records: settings.max_records,
            track_tokens: settings.track_tokens,
        }
    }

    /// Record one completed request.
    ///
    /// Never fails: a negative or non-finite cost is clamped to zero with a
    /// warning, and a token breakdown that disagrees with `total_tokens` is
    /// reported but still tracked (the breakdown sum wins).
    #[allow(clippy::too_many_arguments)]
    pub fn track_usage(
        &self,
        intent: Intent,
        model: &str,
        total_tokens: u32,
        source: &str,
        cost_usd: f64,
        breakdown: Option<TokenUsage>,
        latency_ms: Option<u64>,
    ) {
        let cost_usd = if cost_usd.is_finite() && cost_usd >= 0.0 {
            cost_usd
        } else {
            warn!(model, cost_usd, "malformed cost value, clamping to 0");
            0.0
        };

        let breakdown = if self.track_tokens { breakdown } else { None };
        let (prompt_tokens, completion_tokens, total_tokens) = match breakdown {
            Some(usage) => {
                if usage.total() != total_tokens {
                    warn!(
                        reported = total_tokens,
                        breakdown = usage.total(),
                        "token breakdown disagrees with reported total"
                    );
                }
                (usage.prompt_tokens, usage.completion_tokens, usage.total())
            }
            None => (0, 0, total_tokens),
        };

        let project_id = self.projects.active_project();
        let record = UsageRecord {
            id: uuid::Uuid::new_v4().to_string(),
            project_id: project_id.clone(),
            intent,
            model: model.to_string(),
            prompt_tokens,
            completion_tokens,
            total_tokens,
            cost_usd,
            source: source.to_string(),
            latency_ms,
            created_at: Utc::now(),
        };

        {
            let mut agg = self.aggregates.entry(project_id.clone()).or_default();
            agg.total_cost_usd += cost_usd;
            agg.request_count += 1;
            agg.total_tokens += u64::from(total_tokens);
            *agg.by_intent.entry(intent).or_insert(0) += 1;
            *agg.by_model.entry(record.model.clone()).or_insert(0) += 1;
        }

        let mut records = self.lock_records();
        if records.len() >= self.max_records {
            records.pop_front();
        }
        records.push_back(record);
        drop(records);

        info!(
            project = %project_id,
            intent = %intent,
            model,
            total_tokens,
            cost_usd,
            source,
            "usage recorded"
        );
    }

    /// Snapshot of a project's aggregate, if anything was tracked for it.
    ///
    /// Reflects every record accepted before the call.
    pub fn project_usage(&self, project: &ProjectId) -> Option<ProjectUsage> {
        self.aggregates.get(project).map(|agg| agg.clone())
    }

    /// Total spend for a project (0 if nothing tracked).
    pub fn total_cost(&self, project: &ProjectId) -> f64 {
        self.aggregates
            .get(project)
            .map(|agg| agg.total_cost_usd)
            .unwrap_or(0.0)
    }

    /// Projects with tracked usage.
    pub fn projects(&self) -> Vec<ProjectId> {
        self.aggregates.iter().map(|e| e.key().clone()).collect()
    }

    /// Copy of the retained record log, oldest first.
    pub fn records(&self) -> Vec<UsageRecord> {
        self.lock_records().iter().cloned().collect()
    }

    fn lock_records(&self) -> MutexGuard<'_, VecDeque<UsageRecord>> {
        self.records.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
