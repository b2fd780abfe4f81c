// SPDX-FileCopyrightText: 2026 Triage Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Aggregate performance summary derived from the usage record log.

use chrono::{Duration, Utc};
use serde::Serialize;

use crate::tracker::UsageTracker;

/// External-facing latency/throughput/cost summary.
///
/// Derived entirely from retained usage records; eviction of old records
/// narrows the latency sample but never affects cost aggregates.
#[derive(Debug, Clone, Serialize)]
pub struct PerformanceSnapshot {
    /// Records currently retained.
    pub sampled_requests: usize,
    /// Requests tracked within the last 60 seconds.
    pub requests_last_minute: usize,
    /// Mean latency over records that carried a measurement.
    pub avg_latency_ms: Option<f64>,
    /// 95th-percentile latency over the same sample.
    pub p95_latency_ms: Option<u64>,
    /// Summed cost of retained records.
    pub sampled_cost_usd: f64,
}

impl UsageTracker {
    /// Compute a performance snapshot from the retained record log.
    pub fn performance_snapshot(&self) -> PerformanceSnapshot {
        let records = self.records();
        let minute_ago = Utc::now() - Duration::seconds(60);

        let requests_last_minute = records
            .iter()
            .filter(|r| r.created_at >= minute_ago)
            .count();

        let mut latencies: Vec<u64> = records.iter().filter_map(|r| r.latency_ms).collect();
        latencies.sort_unstable();

        let avg_latency_ms = if latencies.is_empty() {
            None
        } else {
            Some(latencies.iter().sum::<u64>() as f64 / latencies.len() as f64)
        };
        let p95_latency_ms = if latencies.is_empty() {
            None
        } else {
            let rank = (latencies.len() as f64 * 0.95).ceil() as usize;
            Some(latencies[rank.saturating_sub(1)])
        };

        PerformanceSnapshot {
            sampled_requests: records.len(),
            requests_last_minute,
            avg_latency_ms,
            p95_latency_ms,
            sampled_cost_usd: records.iter().map(|r| r.cost_usd).sum(),
        }
    }
}

#[cfg(test)]
mod tests {
    use triage_core::Intent;

    use crate::tracker::test_support::tracker;

    #[test]
    fn snapshot_of_empty_tracker() {
        let tracker = tracker();
        let snapshot = tracker.performance_snapshot();
        assert_eq!(snapshot.sampled_requests, 0);
        assert_eq!(snapshot.requests_last_minute, 0);
        assert!(snapshot.avg_latency_ms.is_none());
        assert!(snapshot.p95_latency_ms.is_none());
    }

    #[test]
    fn snapshot_latency_percentiles() {
        let tracker = tracker();
        for latency in [100u64, 200, 300, 400, 500] {
            tracker.track_usage(Intent::Simple, "m", 10, "chat", 0.0, None, Some(latency));
        }
        let snapshot = tracker.performance_snapshot();
        assert_eq!(snapshot.sampled_requests, 5);
        assert_eq!(snapshot.requests_last_minute, 5);
        assert!((snapshot.avg_latency_ms.unwrap() - 300.0).abs() < f64::EPSILON);
        // ceil(5 * 0.95) = 5 -> the 5th sorted value.
        assert_eq!(snapshot.p95_latency_ms.unwrap(), 500);
    }

    #[test]
    fn snapshot_skips_unmeasured_latencies() {
        let tracker = tracker();
        tracker.track_usage(Intent::Simple, "m", 10, "chat", 0.1, None, Some(80));
        tracker.track_usage(Intent::Simple, "m", 10, "chat", 0.1, None, None);
        let snapshot = tracker.performance_snapshot();
        assert_eq!(snapshot.sampled_requests, 2);
        assert!((snapshot.avg_latency_ms.unwrap() - 80.0).abs() < f64::EPSILON);
        assert!((snapshot.sampled_cost_usd - 0.2).abs() < 1e-10);
    }
}
