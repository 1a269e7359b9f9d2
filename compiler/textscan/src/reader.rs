//! The typed reader contract (spec §4.4) plus the handful of leaf readers
//! the CORE ships to exercise the driver end-to-end: `bool`, `char`, an
//! unformatted `String`, and a minimal decimal `i64`.
//!
//! Per spec §1 these four are not a claim to be the full numeric/float/
//! regex/pointer reader suite (those stay external collaborators); they are
//! exactly enough leaf types to drive every branch the scan driver has
//! (alignment, fill, width, precision, overflow) — mirroring how the
//! teacher's `ori_lexer_core` ships a complete raw scanner but defers
//! semantic literal interpretation to `ori_lexer`.

use textscan_core::{read::*, width::text_width, InputRange};

use crate::error::{ScanError, ScanResult};
use crate::format_specs::FormatSpecs;

/// The narrow locale-bridge seam spec §4.4/§6 names (`scan_localized`).
///
/// A full locale facet bridge is explicitly out of scope; this
/// trait is the "narrow interface" the CORE keeps so a caller can plug in
/// locale-aware decimal points / truthy spellings without the library
/// carrying locale data tables itself.
pub trait Locale {
    /// The decimal point character for locale-aware float/decimal parsing.
    fn decimal_point(&self) -> char {
        '.'
    }
    /// The spelling a locale-aware bool reader accepts for `true`.
    fn truthy_literal(&self) -> &str {
        "true"
    }
    /// The spelling a locale-aware bool reader accepts for `false`.
    fn falsy_literal(&self) -> &str {
        "false"
    }
}

/// The non-localized default: classic ASCII/Unicode conventions.
#[derive(Clone, Copy, Debug, Default)]
pub struct DefaultLocale;

impl Locale for DefaultLocale {}

/// Collect the code units of a run of code points matching `pred` into an
/// owned `String`, advancing past them. Shared by [`StringReader`] and
/// [`DecIntReader`]'s digit scan — both need the *matched text*, not just
/// the advanced range, which the generic `read_while_code_point` primitive
/// alone doesn't hand back.
fn collect_while<R: InputRange<Unit = u8>>(r: R, pred: impl Fn(char) -> bool) -> (R, String) {
    let mut cur = r;
    let mut bytes = Vec::new();
    loop {
        match cur.decode_next() {
            Some(d) if pred(d.code_point) => {
                for _ in 0..d.consumed {
                    match cur.current() {
                        Some(u) => {
                            bytes.push(u);
                            cur = cur.advance_by(1);
                        }
                        None => break,
                    }
                }
            }
            _ => break,
        }
    }
    (cur, String::from_utf8_lossy(&bytes).into_owned())
}

/// Every typed reader (spec §4.4): whether it wants whitespace pre-skipped,
/// which specs it accepts, and how to read with or without non-default
/// specs applied.
pub trait Reader {
    /// The Rust type this reader populates.
    type Output;

    /// Whether the driver should skip leading classic whitespace before
    /// calling this reader when `align == none` (spec: default `true` for
    /// most readers; `false` for `char`/code-point/custom readers).
    fn skip_ws_before_read(&self) -> bool {
        true
    }

    /// Reject any spec this reader does not support. The default accepts
    /// everything; readers with a narrower type-letter domain override
    /// this.
    fn check_specs(&self, _specs: &FormatSpecs) -> ScanResult<()> {
        Ok(())
    }

    /// Read with no non-default specs in effect. Returns the advanced
    /// range, the parsed value, and the display width of the matched
    /// region (the driver needs the latter for width/precision
    /// enforcement, spec §4.3e; it is a bookkeeping addition the prose spec
    /// leaves implicit in "the reader returns a new iterator").
    fn read_default<R: InputRange<Unit = u8>>(
        &self,
        input: R,
        locale: &dyn Locale,
    ) -> ScanResult<(R, Self::Output, usize)>;

    /// Read honoring `specs` (type letter, locale flag, ...). The default
    /// forwards to [`Reader::read_default`], which is correct for readers
    /// whose only specs are the alignment/width/precision ones the driver
    /// already applies around the value read.
    fn read_specs<R: InputRange<Unit = u8>>(
        &self,
        input: R,
        specs: &FormatSpecs,
        locale: &dyn Locale,
    ) -> ScanResult<(R, Self::Output, usize)> {
        let _ = specs;
        self.read_default(input, locale)
    }
}

/// Stopping rule: one of `{"true","false","0","1"}` (spec §4.4).
#[derive(Clone, Copy, Debug, Default)]
pub struct BoolReader;

impl Reader for BoolReader {
    type Output = bool;

    fn check_specs(&self, specs: &FormatSpecs) -> ScanResult<()> {
        match specs.ty {
            None | Some('s') => Ok(()),
            Some(other) => Err(ScanError::InvalidFormatString(format!(
                "unsupported type specifier '{other}' for bool"
            ))),
        }
    }

    fn read_default<R: InputRange<Unit = u8>>(
        &self,
        input: R,
        locale: &dyn Locale,
    ) -> ScanResult<(R, bool, usize)> {
        if input.is_empty() {
            return Err(ScanError::EndOfRange);
        }
        let truthy = locale.truthy_literal();
        let falsy = locale.falsy_literal();
        if let Ok(r) = read_matching_string_classic_nocase(input.clone(), truthy) {
            return Ok((r, true, text_width(truthy.chars())));
        }
        if let Ok(r) = read_matching_string_classic_nocase(input.clone(), falsy) {
            return Ok((r, false, text_width(falsy.chars())));
        }
        if let Ok(r) = read_matching_code_unit(input.clone(), b'1') {
            return Ok((r, true, 1));
        }
        if let Ok(r) = read_matching_code_unit(input, b'0') {
            return Ok((r, false, 1));
        }
        Err(ScanError::InvalidScannedValue(
            "expected one of true/false/0/1".into(),
        ))
    }
}

/// Stopping rule: one code point (spec §4.4). Rust's `char` is always a
/// full Unicode scalar value, so this collapses the spec's `char` (one
/// code unit) vs. `char32` (one code point) distinction into a single
/// code-point reader — see SPEC_FULL.md / DESIGN.md for the rationale.
#[derive(Clone, Copy, Debug, Default)]
pub struct CharReader;

impl Reader for CharReader {
    type Output = char;

    fn skip_ws_before_read(&self) -> bool {
        false
    }

    fn check_specs(&self, specs: &FormatSpecs) -> ScanResult<()> {
        match specs.ty {
            None | Some('c') => Ok(()),
            Some(other) => Err(ScanError::InvalidFormatString(format!(
                "unsupported type specifier '{other}' for char"
            ))),
        }
    }

    fn read_default<R: InputRange<Unit = u8>>(
        &self,
        input: R,
        _locale: &dyn Locale,
    ) -> ScanResult<(R, char, usize)> {
        let (after, decoded) = read_code_point_into(input)?;
        let width = textscan_core::width::code_point_width(decoded.code_point);
        Ok((after, decoded.code_point, width))
    }
}

/// Stopping rule: the first classic-whitespace code point, or end of range
/// (spec §4.4, unformatted string).
#[derive(Clone, Copy, Debug, Default)]
pub struct StringReader;

impl Reader for StringReader {
    type Output = String;

    fn check_specs(&self, specs: &FormatSpecs) -> ScanResult<()> {
        match specs.ty {
            None | Some('s') => Ok(()),
            Some(other) => Err(ScanError::InvalidFormatString(format!(
                "unsupported type specifier '{other}' for string"
            ))),
        }
    }

    fn read_default<R: InputRange<Unit = u8>>(
        &self,
        input: R,
        _locale: &dyn Locale,
    ) -> ScanResult<(R, String, usize)> {
        if input.is_empty() {
            return Err(ScanError::EndOfRange);
        }
        let (after, s) = collect_while(input, |c| !textscan_core::unicode::is_classic_space(c));
        let width = text_width(s.chars());
        Ok((after, s, width))
    }
}

/// A minimal decimal `i64` reader: optional sign, then `>= 1` ASCII digits,
/// with range checking against `i64`. Sufficient to exercise the driver's
/// width/precision/alignment machinery end-to-end without claiming to be
/// the full numeric reader suite spec §1 places out of scope.
#[derive(Clone, Copy, Debug, Default)]
pub struct DecIntReader;

impl Reader for DecIntReader {
    type Output = i64;

    fn check_specs(&self, specs: &FormatSpecs) -> ScanResult<()> {
        match specs.ty {
            None | Some('d') => Ok(()),
            Some(other) => Err(ScanError::InvalidFormatString(format!(
                "unsupported type specifier '{other}' for integer (only decimal is implemented)"
            ))),
        }
    }

    fn read_default<R: InputRange<Unit = u8>>(
        &self,
        input: R,
        _locale: &dyn Locale,
    ) -> ScanResult<(R, i64, usize)> {
        if input.is_empty() {
            return Err(ScanError::EndOfRange);
        }
        let mut cur = input;
        let mut negative = false;
        let mut sign_width = 0usize;
        match cur.current() {
            Some(b'+') => {
                cur = cur.advance_by(1);
                sign_width = 1;
            }
            Some(b'-') => {
                negative = true;
                cur = cur.advance_by(1);
                sign_width = 1;
            }
            _ => {}
        }

        let (after, s) = collect_while(cur, |c| c.is_ascii_digit());
        if s.is_empty() {
            return Err(ScanError::InvalidScannedValue(
                "expected decimal digits".into(),
            ));
        }

        let magnitude: i128 = s.parse().map_err(|_| {
            if negative {
                ScanError::ValueNegativeOverflow
            } else {
                ScanError::ValuePositiveOverflow
            }
        })?;
        let signed = if negative { -magnitude } else { magnitude };
        if signed > i128::from(i64::MAX) {
            return Err(ScanError::ValuePositiveOverflow);
        }
        if signed < i128::from(i64::MIN) {
            return Err(ScanError::ValueNegativeOverflow);
        }
        #[allow(clippy::cast_possible_truncation)]
        let value = signed as i64;
        Ok((after, value, sign_width + s.chars().count()))
    }
}
