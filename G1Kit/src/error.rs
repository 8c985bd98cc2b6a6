//! Error types for `G1Kit`

use thiserror::Error;

use crate::formats::common::DataType;

/// The error type for `G1Kit` operations.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum Error {
    // ==================== IO Errors ====================
    /// IO error from file operations.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // ==================== Structural Format Errors ====================
    /// A magic tag did not match the structure being parsed.
    #[error("invalid magic: expected {expected}, found {found}")]
    InvalidMagic {
        /// The tag the parser expected.
        expected: DataType,
        /// The tag found in the data.
        found: DataType,
    },

    /// A read would have crossed the end of the available bytes.
    #[error("read of {len} bytes at offset {offset:#x} exceeds buffer of {size} bytes")]
    OutOfBounds {
        /// Offset of the attempted read.
        offset: usize,
        /// Length of the attempted read.
        len: usize,
        /// Size of the buffer being read.
        size: usize,
    },

    /// A section header declares a size that cannot be walked.
    #[error("section {magic} at offset {offset:#x} has invalid size {size}")]
    InvalidSectionSize {
        /// Tag of the offending section.
        magic: DataType,
        /// Offset of the section header.
        offset: usize,
        /// The declared size.
        size: u32,
    },

    /// The data table header or its offset tables are inconsistent.
    #[error("invalid data table: {message}")]
    InvalidTable {
        /// Description of what is invalid.
        message: String,
    },

    /// The texture group header or its offset table is inconsistent.
    #[error("invalid texture group: {message}")]
    InvalidTextureGroup {
        /// Description of what is invalid.
        message: String,
    },

    /// The buffer is neither a model nor a data table.
    #[error("unsupported container type: {0}")]
    UnsupportedContainer(DataType),

    /// No model was found in the loaded container.
    #[error("no G1M model found in container")]
    ModelNotFound,

    // ==================== Version Errors ====================
    /// The section version differs from the one this parser understands.
    #[error("{section} version {} is not supported (expected {expected})", version_label(.found, .raw))]
    VersionMismatch {
        /// Tag of the section.
        section: DataType,
        /// The supported version.
        expected: u32,
        /// The decoded version, if the code is four ASCII digits.
        found: Option<u32>,
        /// The raw version code as stored.
        raw: u32,
    },

    // ==================== Skeleton Errors ====================
    /// A bone references a parent that does not precede it.
    #[error("bone {bone} references parent {parent}, which is not calculated before it")]
    BoneOrder {
        /// Index of the offending bone.
        bone: usize,
        /// The parent index it references.
        parent: i32,
    },

    // ==================== Texture Errors ====================
    /// The texture format code has no decoder.
    #[error("unsupported texture format: {code:#04x}")]
    UnsupportedFormat {
        /// The raw G1T format code.
        code: u8,
    },

    /// Failed to encode PNG image.
    #[error("failed to encode PNG: {message}")]
    PngEncodeFailed {
        /// The encoding error message.
        message: String,
    },

    /// Failed to create a DDS texture.
    #[error("failed to create DDS: {message}")]
    DdsCreateFailed {
        /// The error message.
        message: String,
    },

    /// Failed to write DDS texture data.
    #[error("failed to write DDS: {message}")]
    DdsWriteFailed {
        /// The error message.
        message: String,
    },

    // ==================== Serialization Errors ====================
    /// JSON serialization error.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// Broad classification of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Magic mismatch or offset/size arithmetic beyond the buffer.
    Format,
    /// A section version is not the supported one.
    VersionMismatch,
    /// Structurally invalid data, such as out-of-order bones.
    InvalidOperation,
    /// A pixel format without a decoder; callers fall back to repackaging.
    UnsupportedFormat,
    /// Filesystem or encoder failures outside format decoding.
    Io,
}

impl Error {
    /// Classify this error.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::InvalidMagic { .. }
            | Error::OutOfBounds { .. }
            | Error::InvalidSectionSize { .. }
            | Error::InvalidTable { .. }
            | Error::InvalidTextureGroup { .. }
            | Error::UnsupportedContainer(_)
            | Error::ModelNotFound => ErrorKind::Format,
            Error::VersionMismatch { .. } => ErrorKind::VersionMismatch,
            Error::BoneOrder { .. } => ErrorKind::InvalidOperation,
            Error::UnsupportedFormat { .. } => ErrorKind::UnsupportedFormat,
            Error::Io(_)
            | Error::PngEncodeFailed { .. }
            | Error::DdsCreateFailed { .. }
            | Error::DdsWriteFailed { .. }
            | Error::JsonError(_) => ErrorKind::Io,
        }
    }
}

#[allow(clippy::ref_option, clippy::trivially_copy_pass_by_ref)]
fn version_label(found: &Option<u32>, raw: &u32) -> String {
    found.map_or_else(|| format!("{raw:#010x}"), |v| v.to_string())
}

/// A specialized Result type for `G1Kit` operations.
pub type Result<T> = std::result::Result<T, Error>;
