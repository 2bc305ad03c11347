//! Snapshot serialization to spreadsheet-compatible CSV.
//!
//! The blob is prefixed with the UTF-8 BOM so Excel detects the encoding,
//! headers carry the French column names, and the status column renders the
//! French display labels rather than the storage strings.

use vp_core::entities::ExportRow;

use crate::ExportError;

/// Byte order mark Excel looks for when sniffing UTF-8.
const UTF8_BOM: &[u8] = b"\xef\xbb\xbf";

/// Column headers, in output order.
const HEADERS: [&str; 9] = [
    "Numéro Étudiant",
    "Nom",
    "Prénom",
    "Catégorie",
    "Sous-catégorie",
    "Points",
    "Fichier",
    "Validation",
    "Commentaire",
];

/// Serialize a snapshot to a CSV blob.
///
/// Rows are written in the order given (the snapshot query already sorts by
/// attestation creation). An empty snapshot still produces the BOM and the
/// header line.
///
/// # Errors
///
/// Returns [`ExportError::Csv`] if record serialization fails and
/// [`ExportError::Io`] if the final flush fails.
pub fn write_csv(rows: &[ExportRow]) -> Result<Vec<u8>, ExportError> {
    let mut buf = Vec::with_capacity(UTF8_BOM.len() + 128 * (rows.len() + 1));
    buf.extend_from_slice(UTF8_BOM);

    {
        let mut writer = csv::Writer::from_writer(&mut buf);
        writer.write_record(HEADERS)?;

        for row in rows {
            let points = row.points.to_string();
            writer.write_record([
                row.student_number.as_str(),
                row.surname.as_str(),
                row.first_name.as_str(),
                row.category.as_str(),
                row.sub_category.as_str(),
                points.as_str(),
                row.file_ref.as_str(),
                row.status.label(),
                row.comment.as_deref().unwrap_or(""),
            ])?;
        }

        writer.flush()?;
    }

    Ok(buf)
}
