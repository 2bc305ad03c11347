//! Repository modules implementing registry and store operations.
//!
//! Each module adds methods to `VpService` via `impl VpService` blocks.

pub mod attestation;
pub mod audit;
pub mod student;
