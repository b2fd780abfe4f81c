// SPDX-FileCopyrightText: 2026 Triage Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! CLI command implementations.

use std::sync::Arc;

use triage_classifier::AdaptiveClassifier;
use triage_config::TriageConfig;
use triage_core::{ProjectId, ProjectLocator, SettingsProvider, TriageError};
use triage_cost::UsageTracker;
use triage_openrouter::OpenRouterClient;
use triage_routing::{DispatchEngine, RoutingTable};

use crate::collaborators::{ConfigSettings, CwdProject};

/// Classify a query and print the routing decision without dispatching.
pub async fn classify(config: &TriageConfig, query: &str) -> Result<(), TriageError> {
    let classifier = AdaptiveClassifier::new(&config.classifier);
    let table = RoutingTable::from_settings(&config.routing);

    let result = classifier.classify(query).await;
    let route = table.lookup(result.intent);

    println!("intent:         {}", result.intent);
    println!("confidence:     {:.2}", result.confidence);
    println!("model:          {}", route.model);
    println!("max tokens:     {}", route.max_tokens);
    println!("estimated cost: ${:.2}", route.cost_per_request);
    Ok(())
}

/// Route a query to its model, print the response, and report the cost.
pub async fn ask(config: &TriageConfig, query: &str) -> Result<(), TriageError> {
    let settings = ConfigSettings::new(config);
    let table = RoutingTable::from_settings(&config.routing);

    let Some(api_key) = settings.api_key() else {
        // The routing decision is still computed and reportable.
        let classifier = AdaptiveClassifier::new(&config.classifier);
        let result = classifier.classify(query).await;
        let route = table.lookup(result.intent);
        eprintln!(
            "no API key configured; would have routed to {} at estimated cost ${:.2}",
            route.model, route.cost_per_request
        );
        eprintln!("set TRIAGE_OPENROUTER_API_KEY to enable dispatch");
        return Err(TriageError::MissingApiKey);
    };

    let client = Arc::new(OpenRouterClient::new(&config.openrouter, &api_key)?);
    let project = Arc::new(CwdProject);
    let tracker = Arc::new(UsageTracker::new(&config.cost, project.clone()));
    let engine = DispatchEngine::new(
        AdaptiveClassifier::new(&config.classifier),
        table,
        tracker,
        client,
        config.openrouter.temperature,
    );

    let outcome = engine.dispatch(query, "cli", 0.0).await;
    let decision = &outcome.decision;
    match outcome.result {
        Ok(response) => {
            println!("{}", response.text);
            println!();
            println!(
                "[{} -> {} | confidence {:.2} | {} tokens | ${:.2}]",
                decision.intent,
                decision.model,
                decision.confidence,
                response.usage.total(),
                decision.estimated_cost_usd
            );
            println!(
                "[{}]",
                session_summary(
                    engine.tracker(),
                    &project.active_project(),
                    engine.table().premium_cost_per_request(),
                )
            );
            Ok(())
        }
        Err(err) => {
            eprintln!(
                "request failed; would have routed to {} at estimated cost ${:.2}",
                decision.model, decision.estimated_cost_usd
            );
            Err(err)
        }
    }
}

/// One-line cost/latency summary for the current session's tracked usage.
fn session_summary(tracker: &UsageTracker, project: &ProjectId, premium_cost: f64) -> String {
    let report = tracker.savings(project, premium_cost);
    let snapshot = tracker.performance_snapshot();
    let latency = match snapshot.avg_latency_ms {
        Some(ms) => format!(" | avg latency {ms:.0} ms"),
        None => String::new(),
    };
    format!(
        "session: {} request(s) | ${:.2} spent | saved ${:.2} vs premium{}",
        report.request_count, report.actual_cost_usd, report.saved_usd, latency
    )
}

/// Print the effective configuration as TOML.
pub fn show_config(config: &TriageConfig) -> Result<(), TriageError> {
    let rendered =
        toml::to_string_pretty(config).map_err(|e| TriageError::Internal(e.to_string()))?;
    print!("{rendered}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn classify_runs_against_default_config() {
        let config = TriageConfig::default();
        classify(&config, "git status").await.unwrap();
    }

    #[tokio::test]
    async fn ask_without_api_key_reports_decision() {
        let config = TriageConfig::default();
        let err = ask(&config, "design system architecture").await.unwrap_err();
        assert!(matches!(err, TriageError::MissingApiKey));
    }

    #[test]
    fn show_config_renders_toml() {
        let config = TriageConfig::default();
        show_config(&config).unwrap();
    }

    #[test]
    fn session_summary_reports_spend_savings_and_latency() {
        let config = TriageConfig::default();
        let project = Arc::new(CwdProject);
        let tracker = UsageTracker::new(&config.cost, project.clone());
        tracker.track_usage(
            triage_core::Intent::CodeGen,
            "qwen/qwen3-235b-a22b",
            100,
            "cli",
            0.25,
            None,
            Some(120),
        );
        tracker.track_usage(
            triage_core::Intent::Debug,
            "minimax/minimax-m2.5",
            100,
            "cli",
            0.28,
            None,
            Some(80),
        );

        let summary = session_summary(&tracker, &project.active_project(), 5.0);
        assert!(summary.contains("2 request(s)"));
        assert!(summary.contains("$0.53 spent"));
        assert!(summary.contains("saved $9.47"));
        assert!(summary.contains("avg latency 100 ms"));
    }

    #[test]
    fn session_summary_without_latency_sample() {
        let config = TriageConfig::default();
        let project = Arc::new(CwdProject);
        let tracker = UsageTracker::new(&config.cost, project.clone());
        tracker.track_usage(triage_core::Intent::Simple, "m", 10, "cli", 0.0, None, None);

        let summary = session_summary(&tracker, &project.active_project(), 5.0);
        assert!(summary.contains("1 request(s)"));
        assert!(!summary.contains("avg latency"));
    }
}
