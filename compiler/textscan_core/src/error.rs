//! The two failure modes a read primitive can report on its own (spec §4.1).
//!
//! This is deliberately smaller than the full `ScanError` taxonomy of
//! spec §7 — overflow and format-string errors are meaningless at this
//! layer, which never sees a format string or a numeric target type. The
//! `textscan` crate's `ScanError` has a `From<ReadError>` impl that maps
//! these onto its `end_of_range`/`invalid_scanned_value` variants.

/// A read primitive's own failure, before any driver-level context
/// (argument id, format spec) is attached.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReadError {
    /// The range was exhausted before the read could complete.
    Eof,
    /// The input did not match the shape the primitive required (a
    /// mismatched literal, an empty `read_while1`/`read_until1` match, or a
    /// failed `read_matching_*`).
    InvalidScannedValue,
}

impl std::fmt::Display for ReadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReadError::Eof => f.write_str("end of range"),
            ReadError::InvalidScannedValue => f.write_str("invalid scanned value"),
        }
    }
}

impl std::error::Error for ReadError {}

/// Result type returned by every fallible read primitive.
pub type ReadResult<T> = Result<T, ReadError>;
