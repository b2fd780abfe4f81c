// SPDX-FileCopyrightText: 2026 Triage Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Intent-to-model routing for the Triage engine.
//!
//! This crate provides:
//! - [`RoutingTable`]: the static intent → model/cost/budget mapping, total
//!   over the intent set
//! - [`DispatchEngine`]: the classify → route → complete → track composition
//!
//! Callers combine [`RoutingDecision::confidence`] with
//! [`RouteConfig::cost_per_request`] to decide whether to proceed, escalate,
//! or surface the estimated cost before dispatch.

pub mod engine;
pub mod table;

pub use engine::{DispatchEngine, DispatchOutcome, RoutingDecision};
pub use table::{RouteConfig, RoutingTable};
