//! Core types shared across CapVal facilities
//!
//! This crate provides the canonical field keys and event names used by the
//! structured logging macros and by log assertions in tests.

pub mod schema;
