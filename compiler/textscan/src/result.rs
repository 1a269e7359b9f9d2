//! Result construction (spec §3, §4.5): projecting the scan driver's final
//! input iterator back into the caller's original range type.
//!
//! Two shapes exist, mirroring the contiguous/forward split of
//! `textscan_core::range`:
//!
//! - [`ScanOutcome`] — the contiguous case. The remainder is a genuine
//!   sub-slice of the caller's original `&str`, reconstructed from the byte
//!   distance the driver's final [`ContiguousRange::pos`] reports (spec
//!   §4.5: "the sub-range of `src` starting at byte distance ... from
//!   `begin(src)`").
//! - [`ForwardScanOutcome`] — the forward case. There is no byte distance to
//!   project through (a forward range is single-pass and may not even be
//!   re-addressable), so the remainder is the opaque advanced
//!   `ForwardRange` itself (spec §4.5: "an opaque sub-range formed from the
//!   raw iterator and sentinel").
//!
//! Neither shape carries the parsed values as a positional tuple the way
//! the prose spec describes (§3: "delivered alongside as a positional tuple
//! matching the placeholder order"). That tuple is realized instead as
//! writes through the caller's own `&mut` output variables via
//! [`crate::args::Arg`] — the Rust analogue of scnlib's output-parameter
//! binding, and the shape every example in spec §8's end-to-end table is
//! checked against in this crate's tests. See DESIGN.md's Open Question
//! ledger for the rationale.

use textscan_core::ContiguousRange;

use crate::error::ScanResult;

/// Outcome of a scan over a contiguous (`&str`) source.
#[derive(Debug)]
pub struct ScanOutcome<'s> {
    /// The unconsumed suffix of the original source string.
    pub remainder: &'s str,
    /// `Ok(())` on success, or the error the driver stopped at.
    pub result: ScanResult<()>,
}

impl<'s> ScanOutcome<'s> {
    /// Project the driver's final range, positioned somewhere inside
    /// `source`, back to a `&str` sub-slice of `source`.
    pub(crate) fn project(
        source: &'s str,
        final_range: ContiguousRange<'_, u8>,
        result: ScanResult<()>,
    ) -> Self {
        // `final_range` borrows from `source`'s bytes; `pos()` is the byte
        // distance already traveled from `source`'s start, which is always
        // a char boundary because every read primitive advances by whole
        // code units that the decoder itself validated.
        let remainder = &source[final_range.pos()..];
        Self { remainder, result }
    }

    /// `true` if the scan completed without error.
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}

/// Outcome of a scan over a single-pass forward source.
#[derive(Debug)]
pub struct ForwardScanOutcome<R> {
    /// The range positioned just after the last successfully consumed code
    /// unit — opaque because a forward source has no byte-offset projection
    /// back to an original buffer.
    pub remainder: R,
    /// `Ok(())` on success, or the error the driver stopped at.
    pub result: ScanResult<()>,
}

impl<R> ForwardScanOutcome<R> {
    /// `true` if the scan completed without error.
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ScanError;
    use textscan_core::InputRange;

    #[test]
    fn project_slices_the_original_string() {
        let source = "42 rest";
        let range = ContiguousRange::from_str(source).advance_by(2);
        let outcome = ScanOutcome::project(source, range, Ok(()));
        assert_eq!(outcome.remainder, " rest");
        assert!(outcome.is_ok());
    }

    #[test]
    fn project_on_failure_keeps_the_failure_point() {
        let source = "abc";
        let range = ContiguousRange::from_str(source);
        let outcome = ScanOutcome::project(
            source,
            range,
            Err(ScanError::InvalidScannedValue("boom".into())),
        );
        assert_eq!(outcome.remainder, "abc");
        assert!(!outcome.is_ok());
    }
}
