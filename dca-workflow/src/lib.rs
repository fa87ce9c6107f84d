//! Interactive decline-curve forecast workflow.
//!
//! This crate provides:
//! - `session`: the single owner of workflow state (series, anchors, result, errors)
//! - `selection`: the two-anchor selection state machine
//! - `stage`: the derived Upload / Select / Results stage
//! - `orchestrator`: one-at-a-time forecast requests with stale-response discard
//! - `plot`: ordered trace composition for a chart renderer

pub mod orchestrator;
pub mod plot;
pub mod selection;
pub mod session;
pub mod stage;
