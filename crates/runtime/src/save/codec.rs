//! Base64 envelope around the JSON payload.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use showdown_core::Snapshot;

use super::SaveError;
use super::layout::RawSave;
use super::mapping::{from_snapshot, to_snapshot};

pub fn decode(contents: &str) -> Result<RawSave, SaveError> {
    let contents = contents.trim();
    if contents.is_empty() {
        return Err(SaveError::Empty);
    }
    let json = STANDARD.decode(contents)?;
    Ok(serde_json::from_slice(&json)?)
}

pub fn encode(raw: &RawSave) -> Result<String, SaveError> {
    let json = serde_json::to_vec(raw)?;
    Ok(STANDARD.encode(json))
}

/// Decodes save-file contents straight into a snapshot.
pub fn read_snapshot(contents: &str) -> Result<Snapshot, SaveError> {
    to_snapshot(&decode(contents)?)
}

pub fn write_snapshot(snapshot: &Snapshot) -> Result<String, SaveError> {
    encode(&from_snapshot(snapshot))
}
