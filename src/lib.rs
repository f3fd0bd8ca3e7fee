//! # split-engine
//!
//! Shared-expense settlement engine.
//!
//! Given an event, its members, and a set of fee records (each with a payer
//! and a set of beneficiaries), this engine computes each member's
//! net balance and a minimal, deterministic list of pairwise transfers that
//! settles every debt.
//!
//! ## Architecture
//!
//! - **core** — Foundational types: members, events, fee records
//! - **engine** — Validation, balance aggregation, settlement planning,
//!   expense summaries, error taxonomy
//! - **simulation** — Random scenario generation for stress testing
//!
//! The engine is a pure function of its inputs: no persistence, no I/O,
//! no state across calls. Callers own fetching inputs and rendering output.

pub mod core;
pub mod engine;
pub mod simulation;

/// Convenience re-exports for common usage.
pub mod prelude {
    pub use crate::core::event::{Event, EventId};
    pub use crate::core::fee::{FeeId, FeeRecord, FeeSet};
    pub use crate::core::member::{Member, MemberDirectory, MemberId};
    pub use crate::engine::balance::Balance;
    pub use crate::engine::settle::{Transfer, EPSILON};
    pub use crate::engine::{EngineOptions, SettlementEngine, SettlementReport};
}
