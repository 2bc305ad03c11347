//! Proof document storage.
//!
//! Uploaded documents live under a single root directory, one subdirectory
//! per student, addressed as `{surname}_{first_name}/{filename}`. The
//! address is recorded on the attestation row verbatim, so the same string
//! locates the file later regardless of where the root is mounted.

use std::path::{Path, PathBuf};

use crate::error::StoreError;

/// Compose the storage address for a student's document.
///
/// Format: `{surname}_{first_name}/{filename}`. Two students sharing a
/// surname and first name share a directory; a re-upload of the same
/// filename overwrites (last write wins).
///
/// # Errors
///
/// Returns `StoreError::InvalidAddress` if any component would make the
/// address escape its per-student directory.
pub fn document_address(
    surname: &str,
    first_name: &str,
    filename: &str,
) -> Result<String, StoreError> {
    let address = format!("{surname}_{first_name}/{filename}");
    validate_address(&address)?;
    Ok(address)
}

/// Reject addresses that are not exactly `{directory}/{filename}` with
/// plain components. Catches `..`, absolute paths, backslashes, and
/// embedded NUL before anything touches the filesystem.
fn validate_address(address: &str) -> Result<(), StoreError> {
    let mut parts = address.split('/');
    let (Some(dir), Some(file), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(StoreError::InvalidAddress(address.to_string()));
    };
    for part in [dir, file] {
        if part.is_empty() || part == "." || part == ".." {
            return Err(StoreError::InvalidAddress(address.to_string()));
        }
        if part.contains('\\') || part.contains('\0') {
            return Err(StoreError::InvalidAddress(address.to_string()));
        }
    }
    Ok(())
}

/// Writes proof documents under a root directory.
///
/// The lifecycle submit path calls `put()` before inserting the attestation
/// row, so a failed write never leaves a dangling `file_ref`.
pub struct DocumentStore {
    root: PathBuf,
    enabled: bool,
}

impl DocumentStore {
    /// Create a new `DocumentStore` rooted at the given directory.
    ///
    /// Creates the directory if it doesn't exist.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the directory cannot be created.
    pub fn new(root: PathBuf) -> Result<Self, StoreError> {
        std::fs::create_dir_all(&root)?;
        Ok(Self {
            root,
            enabled: true,
        })
    }

    /// Create a disabled store (for tests that only need the address
    /// bookkeeping, not the bytes).
    #[must_use]
    pub const fn disabled() -> Self {
        Self {
            root: PathBuf::new(),
            enabled: false,
        }
    }

    /// Whether document writing is currently enabled.
    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// The root directory documents are stored under.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Write a document's bytes at the given address.
    ///
    /// Creates the per-student directory on first use. Writing the same
    /// address twice overwrites.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::InvalidAddress` for a malformed address, or
    /// `StoreError::Document` if the filesystem write fails.
    pub fn put(&self, address: &str, bytes: &[u8]) -> Result<(), StoreError> {
        if !self.enabled {
            return Ok(());
        }
        validate_address(address)?;

        let path = self.root.join(address);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&path, bytes)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[test]
    fn address_format() {
        let addr = document_address("Dupont", "Jean", "stage_erasmus.pdf").unwrap();
        assert_eq!(addr, "Dupont_Jean/stage_erasmus.pdf");
    }

    #[rstest]
    #[case("Dupont", "Jean", "../../etc/passwd")]
    #[case("Dupont", "Jean", "..")]
    #[case("Dupont", "Jean", ".")]
    #[case("Dupont", "Jean", "")]
    #[case("Dupont", "Jean", "a\\b.pdf")]
    #[case("Dupont", "Jean", "sub/dir.pdf")]
    #[case("Du/pont", "Jean", "f.pdf")]
    #[case("Dupont\\", "Jean", "f.pdf")]
    fn address_rejects_escapes(
        #[case] surname: &str,
        #[case] first_name: &str,
        #[case] filename: &str,
    ) {
        let result = document_address(surname, first_name, filename);
        assert!(matches!(result, Err(StoreError::InvalidAddress(_))));
    }

    #[test]
    fn address_allows_accents_and_spaces() {
        let addr = document_address("De La Rue", "Chloé", "attestation BAFA.pdf").unwrap();
        assert_eq!(addr, "De La Rue_Chloé/attestation BAFA.pdf");
    }

    #[test]
    fn put_writes_under_per_student_directory() {
        let dir = tempfile::tempdir().unwrap();
        let store = DocumentStore::new(dir.path().to_path_buf()).unwrap();

        store.put("Dupont_Jean/stage.pdf", b"%PDF-1.4").unwrap();

        let written = std::fs::read(dir.path().join("Dupont_Jean/stage.pdf")).unwrap();
        assert_eq!(written, b"%PDF-1.4");
    }

    #[test]
    fn put_overwrites_same_address() {
        let dir = tempfile::tempdir().unwrap();
        let store = DocumentStore::new(dir.path().to_path_buf()).unwrap();

        store.put("Dupont_Jean/stage.pdf", b"v1").unwrap();
        store.put("Dupont_Jean/stage.pdf", b"v2").unwrap();

        let written = std::fs::read(dir.path().join("Dupont_Jean/stage.pdf")).unwrap();
        assert_eq!(written, b"v2");
    }

    #[test]
    fn put_rejects_bad_address_before_touching_disk() {
        let dir = tempfile::tempdir().unwrap();
        let store = DocumentStore::new(dir.path().to_path_buf()).unwrap();

        let result = store.put("Dupont_Jean/../escape.pdf", b"x");
        assert!(matches!(result, Err(StoreError::InvalidAddress(_))));
    }

    #[test]
    fn disabled_store_is_a_no_op() {
        let store = DocumentStore::disabled();
        assert!(!store.is_enabled());
        // No root directory exists; a real write would fail
        store.put("Dupont_Jean/stage.pdf", b"x").unwrap();
    }
}
