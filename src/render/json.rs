//! Structured-document rendering

use crate::error::ExportResult;
use crate::types::Record;

/// Serialize the record sequence as one compact JSON document.
///
/// No pretty-printing and no escaping beyond what JSON itself mandates;
/// embedded markup comes out verbatim.
pub fn render(records: &[Record]) -> ExportResult<Vec<u8>> {
    let mut bytes = serde_json::to_vec(records)?;
    bytes.push(b'\n');
    Ok(bytes)
}
