//! Foundational domain types for the settlement engine.

pub mod event;
pub mod fee;
pub mod member;
