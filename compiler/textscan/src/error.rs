//! The closed error taxonomy of spec §7.
//!
//! `ScanError` is a flat `thiserror`-derived enum, not the teacher's richer
//! `LexError { span, kind, context, suggestions }` shape (see
//! `ori_lexer::lex_error`) — the scan result is a plain success/failure
//! union for a single call, not a diagnostic-renderer target, so it carries
//! only what spec §7 lists: a kind and, where useful, the offending detail.

use textscan_core::ReadError;

/// Why a scan call failed, per the closed taxonomy of spec §7.
///
/// `good` (success) has no variant here: success is represented by `Ok` in
/// the `Result` that wraps this type everywhere it appears.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ScanError {
    /// Input exhausted before a required read completed.
    #[error("end of range")]
    EndOfRange,

    /// Grammar error, argument-index misuse, unsupported spec for this
    /// type, or out-of-range argument id.
    #[error("invalid format string: {0}")]
    InvalidFormatString(String),

    /// Input did not match the reader's required shape, or a width/
    /// precision constraint was violated.
    #[error("invalid scanned value: {0}")]
    InvalidScannedValue(String),

    /// Numeric value overflowed the target type on the positive side.
    #[error("value positive overflow")]
    ValuePositiveOverflow,

    /// Numeric value overflowed the target type on the negative side.
    #[error("value negative overflow")]
    ValueNegativeOverflow,

    /// The source iterator reported a hard I/O failure (spec: the external
    /// file-backed/buffering collaborator surfaces this; the in-memory
    /// sources in this crate never produce it themselves).
    #[error("invalid source state: {0}")]
    InvalidSourceState(String),
}

impl From<ReadError> for ScanError {
    /// Read primitives only ever report the two failure modes meaningful
    /// below the format-string layer; the driver attaches richer context
    /// (which placeholder, which spec) by replacing this mapping with a
    /// more specific `ScanError` before it escapes, where it has that
    /// context to add.
    fn from(e: ReadError) -> Self {
        match e {
            ReadError::Eof => ScanError::EndOfRange,
            ReadError::InvalidScannedValue => ScanError::InvalidScannedValue(e.to_string()),
        }
    }
}

/// Result type returned by every fallible operation in this crate.
pub type ScanResult<T> = Result<T, ScanError>;
