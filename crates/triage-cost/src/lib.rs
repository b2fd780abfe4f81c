// SPDX-FileCopyrightText: 2026 Triage Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Usage and cost tracking for the Triage routing engine.
//!
//! This crate provides:
//! - **Usage tracker**: append-only in-memory record log with monotone
//!   per-project aggregates
//! - **Savings report**: actual routed spend vs an all-premium baseline
//! - **Performance snapshot**: latency/throughput/cost summary derived from
//!   tracked usage
//!
//! Nothing here performs disk or network I/O; state lives for the process
//! lifetime only.

pub mod report;
pub mod snapshot;
pub mod tracker;

pub use report::SavingsReport;
pub use snapshot::PerformanceSnapshot;
pub use tracker::{ProjectUsage, UsageRecord, UsageTracker};
