// SPDX-FileCopyrightText: 2026 Triage Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Triage query-routing engine.
//!
//! This crate provides the error type, common types (intents, token counts,
//! chat messages), and the collaborator traits the routing core consumes.
//! The decision logic lives in `triage-classifier`, `triage-routing`, and
//! `triage-cost`.

pub mod error;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::TriageError;
pub use traits::{
    CompletionClient, CompletionRequest, CompletionResponse, ProjectLocator, SettingsProvider,
};
pub use types::{ChatMessage, ChatRole, Intent, ProjectId, TokenUsage};
