// SPDX-FileCopyrightText: 2026 Triage Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Savings reporting: actual routed spend vs an all-premium baseline.

use serde::Serialize;
use triage_core::ProjectId;

use crate::tracker::UsageTracker;

/// What intent-based routing saved compared to sending every request to the
/// top-tier model.
#[derive(Debug, Clone, Serialize)]
pub struct SavingsReport {
    /// Project the report covers.
    pub project_id: ProjectId,
    /// Requests included.
    pub request_count: u64,
    /// Actual spend in USD.
    pub actual_cost_usd: f64,
    /// What the same requests would have cost on the premium tier.
    pub baseline_cost_usd: f64,
    /// Baseline minus actual.
    pub saved_usd: f64,
    /// Savings as a percentage of the baseline (0 when nothing was tracked).
    pub saved_pct: f64,
}

impl UsageTracker {
    /// Compute the savings report for a project.
    ///
    /// `premium_cost_per_request` is the per-request cost of the top-tier
    /// route; callers take it from the routing table's `architecture` entry.
    pub fn savings(&self, project: &ProjectId, premium_cost_per_request: f64) -> SavingsReport {
        let (request_count, actual_cost_usd) = self
            .project_usage(project)
            .map(|usage| (usage.request_count, usage.total_cost_usd))
            .unwrap_or((0, 0.0));

        let baseline_cost_usd = request_count as f64 * premium_cost_per_request;
        let saved_usd = baseline_cost_usd - actual_cost_usd;
        let saved_pct = if baseline_cost_usd > 0.0 {
            saved_usd / baseline_cost_usd * 100.0
        } else {
            0.0
        };

        SavingsReport {
            project_id: project.clone(),
            request_count,
            actual_cost_usd,
            baseline_cost_usd,
            saved_usd,
            saved_pct,
        }
    }
}

#[cfg(test)]
mod tests {
    use triage_core::Intent;

    use crate::tracker::test_support::{demo_project, tracker};

    #[test]
    fn savings_against_premium_baseline() {
        let tracker = tracker();
        // 3 simple (0), 3 code_gen (0.25), 2 debug (0.28), 2 architecture (5.0)
        for _ in 0..3 {
            tracker.track_usage(Intent::Simple, "free", 10, "chat", 0.0, None, None);
        }
        for _ in 0..3 {
            tracker.track_usage(Intent::CodeGen, "fast", 10, "chat", 0.25, None, None);
        }
        for _ in 0..2 {
            tracker.track_usage(Intent::Debug, "mid", 10, "chat", 0.28, None, None);
        }
        for _ in 0..2 {
            tracker.track_usage(Intent::Architecture, "premium", 10, "chat", 5.0, None, None);
        }

        let report = tracker.savings(&demo_project(), 5.0);
        assert_eq!(report.request_count, 10);
        assert!((report.actual_cost_usd - 11.31).abs() < 1e-9);
        assert!((report.baseline_cost_usd - 50.0).abs() < 1e-9);
        assert!((report.saved_usd - 38.69).abs() < 1e-9);
        assert!((report.saved_pct - 77.38).abs() < 0.01);
    }

    #[test]
    fn empty_project_reports_zero_savings() {
        let tracker = tracker();
        let report = tracker.savings(&demo_project(), 5.0);
        assert_eq!(report.request_count, 0);
        assert!((report.saved_usd - 0.0).abs() < f64::EPSILON);
        assert!((report.saved_pct - 0.0).abs() < f64::EPSILON);
    }
}
