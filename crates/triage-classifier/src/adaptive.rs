// SPDX-FileCopyrightText: 2026 Triage Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Adaptive intent classification with learned overrides and history reuse.
//!
//! Wraps the rule-based classifier with two earlier decision stages: exact
//! user-preference overrides and similarity reuse of recent classifications.
//! Decision order, first match wins:
//!
//! 1. exact preference override (confidence 1.0)
//! 2. history similarity via Jaccard token overlap (confidence 0.8)
//! 3. rule-based fallback (confidence 0.6)
//!
//! Every call appends the query to a bounded pattern history, evicting the
//! oldest entry at capacity. All mutable state sits behind one mutex so the
//! scan-then-append step is a single critical section; concurrent callers
//! cannot tear the history buffer.

use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::{Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, Utc};
use tracing::debug;
use triage_config::model::ClassifierSettings;
use triage_core::Intent;

use crate::rules;

/// Result of classifying a single query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClassificationResult {
    /// The assigned intent.
    pub intent: Intent,
    /// Confidence in the classification, in (0, 1].
    pub confidence: f32,
}

/// One remembered classification.
#[derive(Debug, Clone)]
pub struct HistoryEntry {
    /// Normalized query text.
    pub query: String,
    /// Intent the query was assigned.
    pub intent: Intent,
    /// When the classification happened.
    pub timestamp: DateTime<Utc>,
}

/// Mutable classifier state, guarded by a single mutex.
struct AdaptiveState {
    /// Exact-match overrides, keyed by normalized query.
    preferences: HashMap<String, Intent>,
    /// Bounded insertion-ordered recent classifications.
    history: VecDeque<HistoryEntry>,
}

/// Classifier that layers user preferences and pattern history over the
/// rule-based classifier.
///
/// `classify` is `async` so the contract can later grow a remote similarity
/// backend; the in-process algorithm completes without suspending.
pub struct AdaptiveClassifier {
    state: Mutex<AdaptiveState>,
    history_capacity: usize,
    similarity_threshold: f32,
    history_confidence: f32,
    fallback_confidence: f32,
}

impl AdaptiveClassifier {
    /// Create a classifier from configuration.
    pub fn new(settings: &ClassifierSettings) -> Self {
        Self {
            state: Mutex::new(AdaptiveState {
                preferences: HashMap::new(),
                history: VecDeque::with_capacity(settings.history_capacity),
            }),
            history_capacity: settings.history_capacity,
            similarity_threshold: settings.similarity_threshold,
            history_confidence: settings.history_confidence,
            fallback_confidence: settings.fallback_confidence,
        }
    }

    /// Classify a query, consulting preferences and history before falling
    /// back to the rule-based classifier, then remember the outcome.
    pub async fn classify(&self, query: &str) -> ClassificationResult {
        let normalized = normalize(query);
        let mut state = self.lock_state();

        let result = if let Some(&intent) = state.preferences.get(&normalized) {
            debug!(query = %normalized, intent = %intent, "preference override");
            ClassificationResult {
                intent,
                confidence: 1.0,
            }
        } else if let Some(entry) = self.find_similar(&state.history, &normalized) {
            debug!(
                query = %normalized,
                matched = %entry.query,
                intent = %entry.intent,
                "history similarity reuse"
            );
            ClassificationResult {
                intent: entry.intent,
                confidence: self.history_confidence,
            }
        } else {
            let intent = rules::classify(&normalized);
            debug!(query = %normalized, intent = %intent, "rule-based fallback");
            ClassificationResult {
                intent,
                confidence: self.fallback_confidence,
            }
        };

        if state.history.len() >= self.history_capacity {
            state.history.pop_front();
        }
        state.history.push_back(HistoryEntry {
            query: normalized,
            intent: result.intent,
            timestamp: Utc::now(),
        });

        result
    }

    /// Record an exact override for a query. Independent of `classify`; the
    /// key is normalized (lowercased, trimmed) before storage.
    pub fn set_preference(&self, query: &str, intent: Intent) {
        let normalized = normalize(query);
        self.lock_state().preferences.insert(normalized, intent);
    }

    /// Remove all stored preference overrides.
    pub fn clear_preferences(&self) {
        self.lock_state().preferences.clear();
    }

    /// Number of stored preference overrides.
    pub fn preference_count(&self) -> usize {
        self.lock_state().preferences.len()
    }

    /// Number of remembered classifications.
    pub fn history_len(&self) -> usize {
        self.lock_state().history.len()
    }

    /// Most recent history entry first, scanning for a sufficiently similar
    /// prior query.
    fn find_similar(
        &self,
        history: &VecDeque<HistoryEntry>,
        normalized: &str,
    ) -> Option<HistoryEntry> {
        history
            .iter()
            .rev()
            .find(|entry| token_overlap(&entry.query, normalized) >= self.similarity_threshold)
            .cloned()
    }

    fn lock_state(&self) -> MutexGuard<'_, AdaptiveState> {
        // Classification state stays usable even if a prior holder panicked.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Normalize a query for preference keys, history storage, and comparison.
fn normalize(query: &str) -> String {
    query.trim().to_lowercase()
}

/// Jaccard overlap of whitespace token sets: |common| / |union|.
///
/// Inputs are expected to be normalized already. Returns 0.0 when either
/// side has no tokens.
fn token_overlap(a: &str, b: &str) -> f32 {
    let tokens_a: HashSet<&str> = a.split_whitespace().collect();
    let tokens_b: HashSet<&str> = b.split_whitespace().collect();
    if tokens_a.is_empty() || tokens_b.is_empty() {
        return 0.0;
    }
    let common = tokens_a.intersection(&tokens_b).count();
    let union = tokens_a.union(&tokens_b).count();
    common as f32 / union as f32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classifier() -> AdaptiveClassifier {
        AdaptiveClassifier::new(&ClassifierSettings::default())
    }

    #[test]
    fn token_overlap_identical_queries() {
        assert!((token_overlap("create rest api", "create rest api") - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn token_overlap_partial() {
        // {create, rest, api, endpoint} vs {create, rest, api, service}:
        // 3 common / 5 union = 0.6
        let overlap = token_overlap("create rest api endpoint", "create rest api service");
        assert!((overlap - 0.6).abs() < 1e-6);
    }

    #[test]
    fn token_overlap_empty_side_is_zero() {
        assert_eq!(token_overlap("", "create api"), 0.0);
        assert_eq!(token_overlap("create api", ""), 0.0);
    }

    #[tokio::test]
    async fn preference_override_wins_with_full_confidence() {
        let classifier = classifier();
        classifier.set_preference("deploy app", Intent::CodeGen);
        let result = classifier.classify("deploy app").await;
        assert_eq!(result.intent, Intent::CodeGen);
        assert!((result.confidence - 1.0).abs() < f32::EPSILON);
    }

    #[tokio::test]
    async fn preference_key_is_normalized() {
        let classifier = classifier();
        classifier.set_preference("Deploy App", Intent::CodeGen);
        let result = classifier.classify("  deploy app  ").await;
        assert_eq!(result.intent, Intent::CodeGen);
        assert!((result.confidence - 1.0).abs() < f32::EPSILON);
    }

    #[tokio::test]
    async fn fallback_uses_rules_with_moderate_confidence() {
        let classifier = classifier();
        let result = classifier.classify("why is this failing").await;
        assert_eq!(result.intent, Intent::Debug);
        assert!((result.confidence - 0.6).abs() < f32::EPSILON);
    }

    #[tokio::test]
    async fn similar_history_is_reused() {
        let classifier = classifier();
        let first = classifier.classify("create rest api endpoint").await;
        assert_eq!(first.intent, Intent::CodeGen);

        // 3/5 token overlap meets the 0.6 threshold.
        let second = classifier.classify("create rest api service").await;
        assert_eq!(second.intent, Intent::CodeGen);
        assert!((second.confidence - 0.8).abs() < f32::EPSILON);
    }

    #[tokio::test]
    async fn exact_repeat_keeps_intent_and_raises_confidence() {
        let classifier = classifier();
        let first = classifier.classify("why is this failing").await;
        let second = classifier.classify("why is this failing").await;
        assert_eq!(first.intent, second.intent);
        assert!(second.confidence >= first.confidence);
    }

    #[tokio::test]
    async fn dissimilar_history_is_ignored() {
        let classifier = classifier();
        classifier.classify("design system architecture").await;
        let result = classifier.classify("git status").await;
        assert_eq!(result.intent, Intent::Simple);
        assert!((result.confidence - 0.6).abs() < f32::EPSILON);
    }

    #[tokio::test]
    async fn history_is_bounded_and_evicts_oldest() {
        let settings = ClassifierSettings {
            history_capacity: 2,
            ..ClassifierSettings::default()
        };
        let classifier = AdaptiveClassifier::new(&settings);
        classifier.classify("first query alpha").await;
        classifier.classify("second query beta").await;
        classifier.classify("third query gamma").await;
        assert_eq!(classifier.history_len(), 2);
    }

    #[tokio::test]
    async fn every_call_appends_history() {
        let classifier = classifier();
        assert_eq!(classifier.history_len(), 0);
        classifier.classify("git status").await;
        classifier.set_preference("deploy app", Intent::CodeGen);
        classifier.classify("deploy app").await;
        // Preference hits also land in history; the setter itself does not.
        assert_eq!(classifier.history_len(), 2);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_classify_appends_every_call() {
        let settings = ClassifierSettings {
            history_capacity: 4096,
            ..ClassifierSettings::default()
        };
        let classifier = std::sync::Arc::new(AdaptiveClassifier::new(&settings));

        let mut handles = Vec::new();
        for worker in 0..8 {
            let classifier = std::sync::Arc::clone(&classifier);
            handles.push(tokio::spawn(async move {
                for i in 0..100 {
                    classifier.classify(&format!("query {worker} item {i}")).await;
                }
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        // Scan-then-append is one critical section, so no append is lost
        // and the buffer never tears.
        assert_eq!(classifier.history_len(), 800);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_classify_respects_capacity() {
        let settings = ClassifierSettings {
            history_capacity: 16,
            ..ClassifierSettings::default()
        };
        let classifier = std::sync::Arc::new(AdaptiveClassifier::new(&settings));

        let mut handles = Vec::new();
        for worker in 0..4 {
            let classifier = std::sync::Arc::clone(&classifier);
            handles.push(tokio::spawn(async move {
                for i in 0..50 {
                    classifier.classify(&format!("entry {worker} number {i}")).await;
                }
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        assert_eq!(classifier.history_len(), 16);
    }

    #[tokio::test]
    async fn clear_preferences_removes_overrides() {
        let classifier = classifier();
        classifier.set_preference("deploy app", Intent::Architecture);
        assert_eq!(classifier.preference_count(), 1);
        classifier.clear_preferences();
        assert_eq!(classifier.preference_count(), 0);

        // Falls back to rules once the override is gone and history holds
        // nothing similar.
        let result = classifier.classify("deploy app").await;
        assert!((result.confidence - 0.6).abs() < f32::EPSILON);
    }

    #[tokio::test]
    async fn confidence_is_always_positive_and_at_most_one() {
        let classifier = classifier();
        for query in ["", "git status", "create api", "completely unrelated words"] {
            let result = classifier.classify(query).await;
            assert!(result.confidence > 0.0 && result.confidence <= 1.0);
        }
    }
}
