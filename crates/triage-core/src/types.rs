// SPDX-FileCopyrightText: 2026 Triage Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types shared across the Triage workspace.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// The closed set of query categories driving model choice.
///
/// Exactly one intent is assigned per query. Classifiers only ever produce
/// values from this set, so routing lookups are total.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    /// Quick lookups, shell-level questions, explanations.
    Simple,
    /// Writing or generating code.
    CodeGen,
    /// Diagnosing errors and failures.
    Debug,
    /// System design and planning discussions.
    Architecture,
}

impl Intent {
    /// All intents, in routing-table order.
    pub const ALL: [Intent; 4] = [
        Intent::Simple,
        Intent::CodeGen,
        Intent::Debug,
        Intent::Architecture,
    ];
}

/// Identifier for the logical project usage is aggregated under.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProjectId(pub String);

impl std::fmt::Display for ProjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Token counts reported by a completion backend for one request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsage {
    /// Tokens consumed by the prompt.
    pub prompt_tokens: u32,
    /// Tokens produced in the completion.
    pub completion_tokens: u32,
}

impl TokenUsage {
    /// Total tokens billed for the request.
    pub fn total(&self) -> u32 {
        self.prompt_tokens + self.completion_tokens
    }
}

/// Role of a chat message sent to a completion backend.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    System,
    User,
    Assistant,
}

/// One message in the ordered conversation sent to a completion backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

impl ChatMessage {
    /// Convenience constructor for a user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }

    /// Convenience constructor for a system message.
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::System,
            content: content.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn intent_display_matches_wire_form() {
        assert_eq!(Intent::Simple.to_string(), "simple");
        assert_eq!(Intent::CodeGen.to_string(), "code_gen");
        assert_eq!(Intent::Debug.to_string(), "debug");
        assert_eq!(Intent::Architecture.to_string(), "architecture");
    }

    #[test]
    fn intent_parses_from_wire_form() {
        assert_eq!(Intent::from_str("code_gen").unwrap(), Intent::CodeGen);
        assert_eq!(Intent::from_str("architecture").unwrap(), Intent::Architecture);
        assert!(Intent::from_str("unknown").is_err());
    }

    #[test]
    fn intent_serde_round_trip() {
        let json = serde_json::to_string(&Intent::Debug).unwrap();
        assert_eq!(json, "\"debug\"");
        let back: Intent = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Intent::Debug);
    }

    #[test]
    fn intent_all_covers_four_variants() {
        assert_eq!(Intent::ALL.len(), 4);
        let mut seen = std::collections::HashSet::new();
        for intent in Intent::ALL {
            seen.insert(intent);
        }
        assert_eq!(seen.len(), 4);
    }

    #[test]
    fn token_usage_total_sums_both_sides() {
        let usage = TokenUsage {
            prompt_tokens: 120,
            completion_tokens: 80,
        };
        assert_eq!(usage.total(), 200);
    }

    #[test]
    fn chat_role_lowercase_wire_form() {
        assert_eq!(ChatRole::User.to_string(), "user");
        assert_eq!(ChatRole::Assistant.to_string(), "assistant");
    }
}
