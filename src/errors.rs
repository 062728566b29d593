//! Error types for heap reconstruction
//!
//! This module defines [`Error`], which covers every failure the pipeline can
//! hit: a malformed dump line, an unreadable input or unwritable image, a dump
//! whose addresses contradict the page geometry, or a geometry that cannot
//! describe a page at all.
//!
//! All errors are fatal. Nothing is retried and no partial image is written.

use std::path::PathBuf;
use thiserror::Error;

/// Coarse classification of an [`Error`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A dump line could not be decoded into a record
    Decode,
    /// Reading the dump or writing the image failed
    Io,
    /// The dump disagrees with the page geometry
    Consistency,
    /// The geometry constants are unusable
    Config,
}

#[derive(Debug, Error)]
pub enum Error {
    /// A line is not valid JSON or lacks a required field
    #[error("line {line}: malformed record: {source}")]
    Decode {
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    /// The `address` field is not a `0x`-prefixed 64-bit hex number
    #[error("line {line}: invalid address '{value}'")]
    BadAddress { line: usize, value: String },

    /// A heap object carries neither an address nor an object id
    #[error("line {line}: record has no address or object_id")]
    MissingAddress { line: usize },

    /// The dump could not be read past this line
    #[error("failed to read line {line}: {source}")]
    Read {
        line: usize,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to access '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write image '{}': {source}", .path.display())]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// Two records claim the same slot
    #[error("duplicate object at 0x{address:x} in page 0x{page:x}")]
    DuplicateAddress { address: u64, page: u64 },

    /// An occupied address does not line up with any slot of its page
    #[error("object at 0x{address:x} does not align with any slot of page 0x{page:x}")]
    MisalignedObject { address: u64, page: u64 },

    #[error("invalid geometry: {0}")]
    InvalidGeometry(String),

    /// The slot map would not fit in an image
    #[error("slot map of {columns} pages by {rows} slots is too large to draw")]
    GridTooLarge { columns: usize, rows: usize },
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Decode { .. } | Error::BadAddress { .. } | Error::MissingAddress { .. } => {
                ErrorKind::Decode
            }
            Error::Read { .. } | Error::Io { .. } | Error::Image { .. } => ErrorKind::Io,
            Error::DuplicateAddress { .. } | Error::MisalignedObject { .. } => {
                ErrorKind::Consistency
            }
            Error::InvalidGeometry(_) | Error::GridTooLarge { .. } => ErrorKind::Config,
        }
    }

    /// The page involved in a consistency error
    pub fn page(&self) -> Option<u64> {
        match self {
            Error::DuplicateAddress { page, .. } | Error::MisalignedObject { page, .. } => {
                Some(*page)
            }
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
