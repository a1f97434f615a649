//! Fatal error taxonomy for the vgcolour driver.
//!
//! Only upstream I/O can fail a run: an unreadable log file, a valgrind
//! process that cannot be launched, or a broken pipe while streaming.
//! Everything downstream of line production (classification, parsing,
//! highlighting) resolves ambiguity with defined fallbacks and never
//! surfaces an error.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum VgError {
    #[error("cannot read log file '{path}': {source}")]
    ReadInput {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to launch '{command}': {source}")]
    Spawn {
        command: String,
        #[source]
        source: io::Error,
    },

    #[error("failed to read valgrind output: {source}")]
    ReadStream {
        #[source]
        source: io::Error,
    },

    #[error("failed to wait for valgrind: {source}")]
    Wait {
        #[source]
        source: io::Error,
    },
}
