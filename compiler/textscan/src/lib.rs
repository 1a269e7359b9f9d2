//! Type-safe textual scanning: the format-string parser, argument table,
//! and scan driver built on top of [`textscan_core`]'s Unicode-aware input
//! ranges and read primitives.
//!
//! # Architecture
//!
//! - **`textscan_core`**: [`InputRange`](textscan_core::InputRange), Unicode
//!   primitives, and the `read_*` vocabulary. No knowledge of format
//!   strings, argument tables, or the scan driver.
//! - **`textscan`** (this crate): parses format strings ([`format_specs`]),
//!   resolves placeholder argument ids ([`parse_context`]), holds the
//!   caller's typed output destinations ([`args`]), and walks the scan
//!   driver ([`driver`]) that ties them together.
//!
//! # Usage
//!
//! ```
//! use textscan::{scan, Arg, ArgTable};
//!
//! let mut n = 0i64;
//! let mut word = String::new();
//! let outcome = scan("42 hello", "{} {}", ArgTable::new(vec![
//!     Arg::I64(&mut n),
//!     Arg::Str(&mut word),
//! ]));
//! outcome.result.expect("scan succeeds");
//! assert_eq!(n, 42);
//! assert_eq!(word, "hello");
//! assert_eq!(outcome.remainder, "");
//! ```
//!
//! # Stability
//!
//! - [`ScanError`]: closed taxonomy (spec §7); variants are additions only.
//! - [`ArgType`]: closed tag domain (spec §3); the CORE ships readers for a
//!   subset (see `reader` module docs) and is not a claim to cover every
//!   tag eventually.

pub mod args;
pub mod driver;
pub mod error;
pub mod format_specs;
pub mod parse_context;
pub mod reader;
pub mod result;

pub use args::{Arg, ArgTable, ArgType, CustomScan};
pub use error::{ScanError, ScanResult};
pub use format_specs::{Alignment, FormatSpecs};
pub use parse_context::{ConstParseContext, ParseContext};
pub use reader::{DefaultLocale, Locale, Reader};
pub use result::{ForwardScanOutcome, ScanOutcome};

use textscan_core::{ContiguousRange, ForwardRange};

/// Scan `source` against `format`, dispatching each placeholder to the
/// matching slot in `args` (spec §6's `scan(source, format_literal,
/// &out1, &out2, ...)`).
///
/// Unlike the prose spec's C++ rendering, parsed values are not returned as
/// part of the outcome tuple — they are written through the `&mut`
/// references already held by `args`'s [`Arg`] slots, matching Rust's
/// output-parameter idiom (see `result` module docs and DESIGN.md's Open
/// Question ledger). Uses the non-localized default conventions; for
/// locale-aware `L`-flagged specs use [`scan_localized`].
pub fn scan<'s>(source: &'s str, format: &str, mut args: ArgTable<'_>) -> ScanOutcome<'s> {
    scan_localized(source, &DefaultLocale, format, &mut args)
}

/// As [`scan`], threading an explicit [`Locale`] through for `L`-flagged
/// specs (spec §6's `scan_localized`).
pub fn scan_localized<'s>(
    source: &'s str,
    locale: &dyn Locale,
    format: &str,
    args: &mut ArgTable<'_>,
) -> ScanOutcome<'s> {
    vscan_localized(source, locale, format, args)
}

/// The non-generic kernel behind [`scan`] (spec §6): takes an already
/// type-erased [`ArgTable`] rather than a variadic list of typed
/// references. `scan` and `scan_localized` are thin wrappers around this.
pub fn vscan<'s>(source: &'s str, format: &str, args: &mut ArgTable<'_>) -> ScanOutcome<'s> {
    vscan_localized(source, &DefaultLocale, format, args)
}

/// As [`vscan`], with an explicit locale.
#[tracing::instrument(level = "debug", skip(source, locale, args), fields(source_len = source.len()))]
pub fn vscan_localized<'s>(
    source: &'s str,
    locale: &dyn Locale,
    format: &str,
    args: &mut ArgTable<'_>,
) -> ScanOutcome<'s> {
    let range = ContiguousRange::from_str(source);
    let (final_range, result) = driver::drive(range, format, args, locale);
    ScanOutcome::project(source, final_range, result)
}

/// The empty-format `vscan(source, n_args, args)` variant of spec §6:
/// treats the format as `"{} {} ..."` repeated `args.len()` times,
/// equivalent to whitespace-separated default reads.
pub fn vscan_default<'s>(source: &'s str, args: &mut ArgTable<'_>) -> ScanOutcome<'s> {
    let format = driver::synthesize_default_format(args.len());
    vscan(source, &format, args)
}

/// [`vscan`]'s counterpart over a single-pass forward source (spec §6:
/// "narrow forward (single-pass iterator + sentinel)"). The remainder is
/// opaque (spec §4.5): it cannot be projected back to a byte offset into
/// anything, since the only handle the caller gave us is the iterator
/// itself.
pub fn vscan_forward<I: Iterator<Item = u8> + Clone>(
    source: I,
    format: &str,
    args: &mut ArgTable<'_>,
) -> ForwardScanOutcome<ForwardRange<I>> {
    let range = ForwardRange::new(source);
    let (final_range, result) = driver::drive(range, format, args, &DefaultLocale);
    ForwardScanOutcome {
        remainder: final_range,
        result,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use textscan_core::InputRange;

    #[test]
    fn end_to_end_int_then_string() {
        let mut n = 0i64;
        let mut word = String::new();
        let outcome = scan(
            "42 hello",
            "{} {}",
            ArgTable::new(vec![Arg::I64(&mut n), Arg::Str(&mut word)]),
        );
        outcome.result.expect("scan succeeds");
        assert_eq!(n, 42);
        assert_eq!(word, "hello");
        assert_eq!(outcome.remainder, "");
    }

    #[test]
    fn end_to_end_leading_whitespace_and_remainder() {
        let mut n = 0i64;
        let outcome = scan("  42xyz", "{}", ArgTable::new(vec![Arg::I64(&mut n)]));
        outcome.result.expect("scan succeeds");
        assert_eq!(n, 42);
        assert_eq!(outcome.remainder, "xyz");
    }

    #[test]
    fn end_to_end_empty_source_is_end_of_range() {
        let mut n = 0i64;
        let outcome = scan("", "{}", ArgTable::new(vec![Arg::I64(&mut n)]));
        assert_eq!(outcome.result.unwrap_err(), ScanError::EndOfRange);
    }

    #[test]
    fn vscan_default_treats_empty_format_as_whitespace_separated() {
        let mut a = 0i64;
        let mut b = 0i64;
        let mut table = ArgTable::new(vec![Arg::I64(&mut a), Arg::I64(&mut b)]);
        let outcome = vscan_default("10   20", &mut table);
        outcome.result.expect("scan succeeds");
        assert_eq!(a, 10);
        assert_eq!(b, 20);
    }

    #[test]
    fn vscan_forward_scans_a_single_pass_iterator() {
        let mut n = 0i64;
        let mut table = ArgTable::new(vec![Arg::I64(&mut n)]);
        let outcome = vscan_forward("123 rest".bytes(), "{}", &mut table);
        outcome.result.expect("scan succeeds");
        assert_eq!(n, 123);
        assert_eq!(outcome.remainder.current(), Some(b' '));
    }

    #[test]
    fn scan_localized_accepts_a_custom_truthy_spelling() {
        struct YesNo;
        impl Locale for YesNo {
            fn truthy_literal(&self) -> &str {
                "yes"
            }
            fn falsy_literal(&self) -> &str {
                "no"
            }
        }
        let mut b = false;
        let outcome = scan_localized(
            "yes",
            &YesNo,
            "{}",
            &mut ArgTable::new(vec![Arg::Bool(&mut b)]),
        );
        outcome.result.expect("scan succeeds");
        assert!(b);
    }

    // === Property tests (spec §8's universal invariants) ===

    #[allow(
        clippy::disallowed_types,
        reason = "proptest macros internally use Arc"
    )]
    mod proptest_invariants {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Property 4: round-trip for printable ASCII with no
            /// whitespace and no format metacharacters — `scan(s, "{}",
            /// &out)` yields `out == s` with an empty remainder.
            #[test]
            fn round_trip_printable_ascii(s in "[!-zX&&[^{}]]{1,24}") {
                let mut out = String::new();
                let outcome = scan(&s, "{}", ArgTable::new(vec![Arg::Str(&mut out)]));
                outcome.result.expect("round-trip scan succeeds");
                prop_assert_eq!(&out, &s);
                prop_assert_eq!(outcome.remainder, "");
            }

            /// Property 5: a leading whitespace literal (`" {}"`) produces
            /// the same parsed value whether or not the input actually
            /// carries leading whitespace (spec OQ-2: zero-or-more).
            #[test]
            fn whitespace_literal_is_idempotent(s in "[!-zX&&[^{}]]{1,24}") {
                let mut a = String::new();
                let outcome_a = scan(&s, " {}", ArgTable::new(vec![Arg::Str(&mut a)]));

                let padded = format!(" {s}");
                let mut b = String::new();
                let outcome_b = scan(&padded, " {}", ArgTable::new(vec![Arg::Str(&mut b)]));

                outcome_a.result.expect("unpadded scan succeeds");
                outcome_b.result.expect("padded scan succeeds");
                prop_assert_eq!(a, b);
            }

            /// Property 3: no successful scan mixes automatic and manual
            /// argument indexing within one format string — a format that
            /// mixes `{}` and `{0}` never returns `Ok(())`, regardless of
            /// the input text (it may fail earlier, e.g. on a short read,
            /// but it can never succeed while mixing modes).
            #[test]
            fn mixed_indexing_never_succeeds(s in "[a-z]{1,8}") {
                let source = format!("{s} {s}");
                let mut a = String::new();
                let mut b = String::new();
                let outcome = scan(
                    &source,
                    "{} {0}",
                    ArgTable::new(vec![Arg::Str(&mut a), Arg::Str(&mut b)]),
                );
                prop_assert!(outcome.result.is_err());
            }

            /// Property 1: the remainder never starts before the source
            /// and is always a valid suffix of it, success or failure.
            #[test]
            fn remainder_is_always_a_suffix_of_source(s in "[!-zX&&[^{}]]{0,24}") {
                let mut n = 0i64;
                let outcome = scan(&s, "{}", ArgTable::new(vec![Arg::I64(&mut n)]));
                prop_assert!(s.ends_with(outcome.remainder));
            }
        }
    }
}
