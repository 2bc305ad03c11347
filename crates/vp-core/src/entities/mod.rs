//! Entity structs for the valoparc domain objects.
//!
//! Each entity maps to a table in the libSQL database, except [`ExportRow`],
//! which is the derived student × attestation join used by the export and
//! admin surfaces. All structs derive `Serialize` and `Deserialize` for JSON
//! roundtrip and audit detail payloads.

mod attestation;
mod audit;
mod export;
mod student;

pub use attestation::Attestation;
pub use audit::AuditEntry;
pub use export::ExportRow;
pub use student::Student;
