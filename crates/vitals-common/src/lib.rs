//! # vitals-common
//!
//! Shared configuration and error handling used across all Vitals crates.
//! This is the foundation layer — no probing logic, just primitives and contracts.

pub mod config;
pub mod error;
