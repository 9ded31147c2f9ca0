//! # adv-core
//!
//! Core types, ID generation, and error types for the L ≡ T adversary.
//!
//! This crate provides the foundational types shared across all adversary crates:
//! - Input case records as read from the simulation table
//! - The seeded truth history every case is judged against
//! - The adversary verdict and its outcome/classification enums
//! - Verdict ID generation
//! - Cross-cutting error types

pub mod entities;
pub mod enums;
pub mod errors;
pub mod history;
pub mod ids;
