//! # vp-core
//!
//! Core types for valoparc, the attestation tracking system.
//!
//! This crate provides the foundational types shared across all valoparc
//! crates:
//! - Entity structs for the domain objects (students, attestations, audit
//!   entries, export rows)
//! - The review status enum with its state machine helpers
//! - The scoring schedule mapping (category, sub-category) to points
//! - Typed audit detail payloads
//! - ID prefix constants and formatting conventions

pub mod audit_detail;
pub mod entities;
pub mod enums;
pub mod ids;
pub mod scoring;
