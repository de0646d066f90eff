use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use log::info;

use crate::error::GenError;
use crate::transaction::TransactionEnvelope;

/// Writes `envelope` to `path` as pretty-printed JSON, replacing whatever was there.
///
/// # Errors
/// Errors when the file can't be created or written, or the envelope fails to serialize
pub fn write_envelope(
    path: impl AsRef<Path>,
    envelope: &TransactionEnvelope,
) -> Result<(), GenError> {
    let path = path.as_ref();
    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut writer, envelope)?;
    writer.flush()?;
    info!(
        "Wrote {} transactions to {}",
        envelope.data.transaction_count,
        path.display()
    );
    Ok(())
}

/// Reads an envelope previously written by [`write_envelope`].
///
/// # Errors
/// Errors when the file can't be opened or doesn't hold a valid envelope
pub fn read_envelope(path: impl AsRef<Path>) -> Result<TransactionEnvelope, GenError> {
    let reader = BufReader::new(File::open(path)?);
    Ok(serde_json::from_reader(reader)?)
}
