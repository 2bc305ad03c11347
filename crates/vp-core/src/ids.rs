//! ID prefix constants.
//!
//! Generated identifiers are `{prefix}-{8 hex chars}` (see
//! `VpDb::generate_id` in `vp-db`). Students carry no generated ID; the
//! student number handed out by the registrar is their natural key.

/// Prefix for attestation IDs, e.g. `att-a3f8b2c1`.
pub const PREFIX_ATTESTATION: &str = "att";

/// Prefix for audit trail entry IDs, e.g. `aud-4c1d9e02`.
pub const PREFIX_AUDIT: &str = "aud";

/// All known prefixes, for exhaustive generation tests.
pub const ALL_PREFIXES: &[&str] = &[PREFIX_ATTESTATION, PREFIX_AUDIT];
