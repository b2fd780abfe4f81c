// SPDX-FileCopyrightText: 2026 Triage Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Rule-based intent classification.
//!
//! Pure keyword scoring with no hidden state: each intent carries an ordered
//! list of trigger terms, the intent with the most distinct terms present in
//! the query wins, and every tie (including the all-zero case) resolves to
//! [`Intent::Simple`]. Identical input always yields identical output.

use triage_core::Intent;

/// Trigger terms for `simple` queries (shell-level questions, lookups).
const SIMPLE_TERMS: &[&str] = &[
    "git", "status", "ls", "cd", "help", "what is", "list", "show", "check", "verify", "tell me",
    "explain", "describe",
];

/// Trigger terms for `code_gen` queries.
const CODE_GEN_TERMS: &[&str] = &[
    "create", "generate", "implement", "add", "build", "write", "make", "develop", "code",
    "function", "class", "api",
];

/// Trigger terms for `debug` queries.
const DEBUG_TERMS: &[&str] = &[
    "why", "error", "not working", "failed", "broken", "issue", "problem", "fix", "debug",
    "troubleshoot", "wrong",
];

/// Trigger terms for `architecture` queries.
const ARCHITECTURE_TERMS: &[&str] = &[
    "design", "plan", "should", "architecture", "structure", "pattern", "approach", "strategy",
    "best practice", "organize",
];

/// The trigger term list for a given intent.
pub fn terms_for(intent: Intent) -> &'static [&'static str] {
    match intent {
        Intent::Simple => SIMPLE_TERMS,
        Intent::CodeGen => CODE_GEN_TERMS,
        Intent::Debug => DEBUG_TERMS,
        Intent::Architecture => ARCHITECTURE_TERMS,
    }
}

/// Count how many distinct terms from `terms` appear in `query`.
///
/// Matching is case-insensitive substring containment; each term counts at
/// most once regardless of how often it appears.
pub fn count_matches(query: &str, terms: &[&str]) -> usize {
    let lower = query.to_lowercase();
    terms.iter().filter(|term| lower.contains(*term)).count()
}

/// Classify a query into exactly one intent.
///
/// Total and deterministic: empty or unmatched queries resolve to
/// [`Intent::Simple`], as does any tie for the highest match count.
pub fn classify(query: &str) -> Intent {
    if query.trim().is_empty() {
        return Intent::Simple;
    }

    let mut best = Intent::Simple;
    let mut best_score = 0;
    let mut tied = false;

    for intent in Intent::ALL {
        let score = count_matches(query, terms_for(intent));
        if score > best_score {
            best = intent;
            best_score = score;
            tied = false;
        } else if score == best_score && score > 0 && intent != best {
            tied = true;
        }
    }

    if best_score == 0 || tied {
        Intent::Simple
    } else {
        best
    }
}
