use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A registered student.
///
/// Created at registration with only the student number and credential hash;
/// the profile fields stay empty until the student fills them in. The student
/// number is the natural key and never changes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Student {
    pub student_number: String,
    pub surname: String,
    pub first_name: String,
    pub cohort: String,
    pub email: String,
    /// One-way digest of the credential. The raw credential is never stored.
    pub credential_hash: String,
    pub created_at: DateTime<Utc>,
}

impl Student {
    /// Whether the profile is filled in enough to submit attestations.
    ///
    /// Completeness is derived, not a constraint: a record with empty fields
    /// is valid, it just cannot submit yet.
    #[must_use]
    pub fn profile_complete(&self) -> bool {
        !self.surname.is_empty()
            && !self.first_name.is_empty()
            && !self.cohort.is_empty()
            && !self.email.is_empty()
    }
}
