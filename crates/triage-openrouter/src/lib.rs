// SPDX-FileCopyrightText: 2026 Triage Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! OpenRouter completion backend for the Triage routing engine.
//!
//! A thin client for the chat-completions endpoint: bearer auth, typed
//! request/response bodies, one retry on transient errors. The routing core
//! consumes this through the [`triage_core::CompletionClient`] trait.

pub mod client;
pub mod types;

pub use client::OpenRouterClient;
pub use types::{ChatCompletionRequest, ChatCompletionResponse};
