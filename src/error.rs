//! Contains the Error and Result type used when reading and writing tags.
use std::fmt::Display;

use crate::Tag;

/// Various errors that can occur while reading or writing NBT.
#[derive(Debug)]
pub struct Error {
    msg: String,
    kind: ErrorKind,
    source: Option<std::io::Error>,
}

/// The category of an [`Error`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ErrorKind {
    /// The stream ended before a declared length was satisfied, or a header
    /// was structurally invalid (negative length, bad UTF-8, missing root...).
    MalformedStream,

    /// A type id read from the stream has no registered variant. Contains the
    /// offending id.
    UnknownTagType(u8),

    /// A declared length or count is above the configured ceiling. The read
    /// was aborted before allocating.
    AllocationGuardExceeded { requested: usize, limit: usize },

    /// Compounds and lists were nested deeper than the configured ceiling.
    DepthLimitExceeded(usize),

    /// A variant specific operation was used on a tag of another variant.
    TypeMismatch { expected: Tag, found: Tag },

    /// A length did not fit the width of its prefix when writing.
    LengthOverflow,

    /// The underlying reader or writer failed. The original error is
    /// available through [`std::error::Error::source`].
    Io(std::io::ErrorKind),
}

/// Convenience type for Result.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Get the kind of error.
    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    /// Consume the error, returning the underlying I/O error if there is one.
    pub fn into_io(self) -> Option<std::io::Error> {
        self.source
    }

    pub(crate) fn malformed(msg: impl Into<String>) -> Self {
        Self::new(ErrorKind::MalformedStream, msg.into())
    }

    pub(crate) fn unknown_tag(id: u8) -> Self {
        Self::new(
            ErrorKind::UnknownTagType(id),
            format!("unknown nbt tag type: {}", id),
        )
    }

    pub(crate) fn guard_exceeded(requested: usize, limit: usize) -> Self {
        Self::new(
            ErrorKind::AllocationGuardExceeded { requested, limit },
            format!(
                "size ({}) greater than max sequence length ({})",
                requested, limit
            ),
        )
    }

    pub(crate) fn depth_exceeded(limit: usize) -> Self {
        Self::new(
            ErrorKind::DepthLimitExceeded(limit),
            format!("nbt nested deeper than {} levels", limit),
        )
    }

    pub(crate) fn type_mismatch(expected: Tag, found: Tag) -> Self {
        Self::new(
            ErrorKind::TypeMismatch { expected, found },
            format!("expected {:?} tag, found {:?}", expected, found),
        )
    }

    pub(crate) fn length_overflow(len: usize) -> Self {
        Self::new(
            ErrorKind::LengthOverflow,
            format!("len too large: {}", len),
        )
    }

    fn new(kind: ErrorKind, msg: String) -> Self {
        Self {
            msg,
            kind,
            source: None,
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e as &(dyn std::error::Error + 'static))
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.msg)
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        match e.kind() {
            // Running dry part way through a value is a property of the data,
            // not of the transport.
            std::io::ErrorKind::UnexpectedEof => {
                Self::malformed("eof: unexpectedly ran out of input")
            }
            kind => Self {
                msg: format!("io error: {}", e),
                kind: ErrorKind::Io(kind),
                source: Some(e),
            },
        }
    }
}
