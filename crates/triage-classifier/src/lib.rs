// SPDX-FileCopyrightText: 2026 Triage Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Intent classification for the Triage routing engine.
//!
//! This crate provides:
//! - [`rules`]: pure keyword scoring (zero-cost, zero-latency, no state)
//! - [`AdaptiveClassifier`]: preference overrides and similarity-based reuse
//!   of recent classifications, layered over the rules
//!
//! The classifier assigns exactly one [`triage_core::Intent`] per query; the
//! routing table in `triage-routing` maps that intent to a model tier.

pub mod adaptive;
pub mod rules;

pub use adaptive::{AdaptiveClassifier, ClassificationResult, HistoryEntry};
pub use rules::{classify, count_matches};
