//! Save-file decoding.
//!
//! The game writes its run state as base64 around a JSON document. [`codec`]
//! handles the envelope, [`layout`] mirrors the JSON and [`mapping`] turns it
//! into a core [`Snapshot`](showdown_core::Snapshot) and back.

pub mod codec;
pub mod layout;
pub mod mapping;

pub use codec::{decode, encode, read_snapshot, write_snapshot};
pub use layout::RawSave;

use thiserror::Error;

/// Errors raised while decoding or encoding a save file.
#[derive(Debug, Error)]
pub enum SaveError {
    #[error("save file is not valid base64: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("save payload is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("save file is empty")]
    Empty,

    #[error("unknown {field} value {value}")]
    UnknownValue { field: &'static str, value: String },

    #[error("{left} and {right} differ in length ({left_len} vs {right_len})")]
    LengthMismatch {
        left: &'static str,
        left_len: usize,
        right: &'static str,
        right_len: usize,
    },
}

impl SaveError {
    /// Whether the file was probably read while the game was still writing it.
    pub fn is_incomplete(&self) -> bool {
        match self {
            Self::Empty | Self::Base64(_) => true,
            Self::Json(err) => err.is_eof(),
            Self::UnknownValue { .. } | Self::LengthMismatch { .. } => false,
        }
    }
}
