//! Error types for the `mp4tags` crate.
//!
//! This module defines [`TagError`], the unified error type returned by all
//! fallible operations in the crate. Each variant maps onto one of the
//! process exit codes documented on [`TagError::exit_code`].

use std::{io::Error as IoError, path::PathBuf};

use clap::error::ErrorKind;
use thiserror::Error;

/// The unified error type for all `mp4tags` operations.
///
/// Argument and precondition errors are raised before any file is touched.
/// File errors carry the path that failed so the caller can name it.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum TagError {
    /// The command line could not be parsed, or help/version was requested.
    #[error("{0}")]
    Usage(#[from] clap::Error),

    /// A numeric option received an argument with no leading integer.
    #[error("option requires numeric argument -- {flag} (got {value:?})")]
    NumericArgument {
        /// Short flag character of the offending option.
        flag: char,
        /// The raw argument that failed to parse.
        value: String,
    },

    /// No container file was named on the command line.
    #[error("You must specify at least one MP4 file.")]
    MissingFile,

    /// No tag was set or removed on the command line.
    #[error("You must specify at least one tag modification.")]
    NoModification,

    /// The container could not be opened for modification.
    #[error("Could not open '{}'... aborting ({reason})", .path.display())]
    FileOpen {
        /// Path of the container file.
        path: PathBuf,
        /// Underlying reason the open failed.
        reason: String,
    },

    /// Edits to the container could not be committed.
    #[error("Could not write '{}'... aborting ({reason})", .path.display())]
    FileWrite {
        /// Path of the container file.
        path: PathBuf,
        /// Underlying reason the write failed.
        reason: String,
    },

    /// The cover-art image could not be loaded.
    #[error("Art file {} skipped: {reason}", .path.display())]
    CoverArt {
        /// Path of the image file.
        path: PathBuf,
        /// Underlying reason the image was rejected.
        reason: String,
    },

    /// A media type name did not resolve to a known kind.
    #[error("Unknown media type: {0}")]
    UnknownMediaType(String),

    /// An I/O error occurred while reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] IoError),
}

impl TagError {
    /// Process exit status for this error.
    ///
    /// | Code | Meaning |
    /// |------|---------|
    /// | 0 | help or version was printed |
    /// | 1 | unrecognised flag or other parse failure |
    /// | 2 | non-numeric argument to a numeric flag |
    /// | 3 | no file argument |
    /// | 4 | no modification requested |
    /// | 5 | a file could not be opened or written |
    pub fn exit_code(&self) -> i32 {
        match self {
            TagError::Usage(_) if self.is_informational() => 0,
            TagError::Usage(_) => 1,
            TagError::NumericArgument { .. } => 2,
            TagError::MissingFile => 3,
            TagError::NoModification => 4,
            TagError::FileOpen { .. } | TagError::FileWrite { .. } => 5,
            TagError::CoverArt { .. } | TagError::UnknownMediaType(_) | TagError::Io(_) => 1,
        }
    }

    /// Returns `true` when the "error" is a help or version request.
    pub fn is_informational(&self) -> bool {
        matches!(
            self,
            TagError::Usage(error)
                if matches!(error.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion)
        )
    }

    /// Returns `true` when usage text should follow the error message.
    pub fn wants_usage(&self) -> bool {
        matches!(self, TagError::MissingFile | TagError::NoModification)
    }
}
