//! Read primitives: the vocabulary the scan driver composes to consume
//! input (spec §4.1).
//!
//! Every primitive here takes a range *by value* and returns a new range
//! representing "the range after this read" (or a `ReadError` on failure).
//! Callers never poke at a range's internals directly — this module is the
//! only place that calls [`InputRange::advance_by`] directly outside of
//! [`crate::range`] itself.

use crate::error::{ReadError, ReadResult};
use crate::range::InputRange;
use crate::unicode::{is_classic_space, Decoded};

/// Consume exactly one code unit. Fails on an empty range.
pub fn read_code_unit<R: InputRange>(r: R) -> ReadResult<(R, R::Unit)> {
    match r.current() {
        Some(u) => Ok((r.advance_by(1), u)),
        None => Err(ReadError::Eof),
    }
}

/// Consume one code point (spec: `read_code_point_into`).
///
/// A lead unit with nominal length 0 (cannot start a code point) clusters
/// together every immediately following zero-length unit into a single
/// opaque, one-replacement-character read, rather than stopping after the
/// first bad byte — this is what lets a run of stray continuation bytes be
/// treated as one malformed unit for width-counting purposes.
pub fn read_code_point_into<R: InputRange>(r: R) -> ReadResult<(R, Decoded)> {
    let lead = r.current().ok_or(ReadError::Eof)?;
    if lead.code_point_length() == 0 {
        let mut cur = r;
        let mut consumed = 0usize;
        while let Some(u) = cur.current() {
            if u.code_point_length() == 0 {
                cur = cur.advance_by(1);
                consumed += 1;
            } else {
                break;
            }
        }
        return Ok((
            cur,
            Decoded {
                code_point: char::REPLACEMENT_CHARACTER,
                consumed,
            },
        ));
    }
    let decoded = r.decode_next().ok_or(ReadError::Eof)?;
    Ok((r.advance_by(decoded.consumed), decoded))
}

/// Consume exactly `n` code points, or fail with [`ReadError::Eof`].
pub fn read_exactly_n_code_points<R: InputRange>(r: R, n: usize) -> ReadResult<R> {
    let mut cur = r;
    for _ in 0..n {
        let decoded = cur.decode_next().ok_or(ReadError::Eof)?;
        cur = cur.advance_by(decoded.consumed);
    }
    Ok(cur)
}

/// Consume code points while their accumulated display width stays `<= w`.
/// Stops *before* the code point that would exceed the budget. Never fails
/// (an empty result is a valid outcome, e.g. `w == 0`).
#[must_use]
pub fn read_exactly_n_width_units<R: InputRange>(r: R, w: usize) -> R {
    let mut cur = r;
    let mut total = 0usize;
    loop {
        let Some(decoded) = cur.decode_next() else {
            break;
        };
        let cw = crate::width::code_point_width(decoded.code_point);
        if total + cw > w {
            break;
        }
        total += cw;
        cur = cur.advance_by(decoded.consumed);
    }
    cur
}

/// Count (new range, number of units consumed) while `pred` holds, unit by
/// unit. Shared by the `_code_unit` while/until/while1/until1 family below.
fn scan_while_code_unit<R: InputRange>(r: R, pred: impl Fn(R::Unit) -> bool) -> (R, usize) {
    let mut cur = r;
    let mut n = 0usize;
    while let Some(u) = cur.current() {
        if pred(u) {
            cur = cur.advance_by(1);
            n += 1;
        } else {
            break;
        }
    }
    (cur, n)
}

/// Half-open: consume units while `pred` holds, stop at first mismatch.
#[must_use]
pub fn read_while_code_unit<R: InputRange>(r: R, pred: impl Fn(R::Unit) -> bool) -> R {
    scan_while_code_unit(r, pred).0
}

/// As [`read_while_code_unit`], requiring at least one match.
pub fn read_while1_code_unit<R: InputRange>(r: R, pred: impl Fn(R::Unit) -> bool) -> ReadResult<R> {
    let (cur, n) = scan_while_code_unit(r, pred);
    if n == 0 {
        Err(ReadError::InvalidScannedValue)
    } else {
        Ok(cur)
    }
}

/// Half-open: consume units until `pred` holds (i.e. while it does not).
#[must_use]
pub fn read_until_code_unit<R: InputRange>(r: R, pred: impl Fn(R::Unit) -> bool) -> R {
    scan_while_code_unit(r, |u| !pred(u)).0
}

/// As [`read_until_code_unit`], requiring at least one non-matching unit.
pub fn read_until1_code_unit<R: InputRange>(r: R, pred: impl Fn(R::Unit) -> bool) -> ReadResult<R> {
    let (cur, n) = scan_while_code_unit(r, |u| !pred(u));
    if n == 0 {
        Err(ReadError::InvalidScannedValue)
    } else {
        Ok(cur)
    }
}

/// Eager/segmented code-point scan (spec §4.1): decode up to 16 code points
/// ahead of time and apply `pred` to each before re-checking the range for
/// more. On a contiguous range this amortises the decode/advance dance into
/// batches; on a forward range (no contiguous slice to bound the lookahead)
/// it degrades to one code point at a time, which is still correct.
fn scan_while_code_point<R: InputRange>(r: R, pred: impl Fn(char) -> bool) -> (R, usize) {
    const BATCH: usize = 16;
    let mut cur = r;
    let mut total = 0usize;
    loop {
        let contiguous = cur.contiguous_slice().is_some();
        let mut probe = cur.clone();
        let mut batch_units = 0usize;
        let mut batch_count = 0usize;
        while batch_count < BATCH {
            match probe.decode_next() {
                Some(d) if pred(d.code_point) => {
                    probe = probe.advance_by(d.consumed);
                    batch_units += d.consumed;
                    batch_count += 1;
                }
                _ => break,
            }
        }
        if batch_units == 0 {
            return (cur, total);
        }
        cur = cur.advance_by(batch_units);
        total += batch_count;
        if !contiguous || batch_count < BATCH {
            return (cur, total);
        }
        // Batch was full on a contiguous range: loop for another batch.
    }
}

/// Consume code points while `pred32` holds.
#[must_use]
pub fn read_while_code_point<R: InputRange>(r: R, pred32: impl Fn(char) -> bool) -> R {
    scan_while_code_point(r, pred32).0
}

/// As [`read_while_code_point`], requiring at least one match.
pub fn read_while1_code_point<R: InputRange>(r: R, pred32: impl Fn(char) -> bool) -> ReadResult<R> {
    let (cur, n) = scan_while_code_point(r, pred32);
    if n == 0 {
        Err(ReadError::InvalidScannedValue)
    } else {
        Ok(cur)
    }
}

/// Consume code points until `pred32` holds.
#[must_use]
pub fn read_until_code_point<R: InputRange>(r: R, pred32: impl Fn(char) -> bool) -> R {
    scan_while_code_point(r, |c| !pred32(c)).0
}

/// As [`read_until_code_point`], requiring at least one non-matching code point.
pub fn read_until1_code_point<R: InputRange>(r: R, pred32: impl Fn(char) -> bool) -> ReadResult<R> {
    let (cur, n) = scan_while_code_point(r, |c| !pred32(c));
    if n == 0 {
        Err(ReadError::InvalidScannedValue)
    } else {
        Ok(cur)
    }
}

/// Substring search: advance to the start of the first occurrence of
/// `needle`, or to the end of the range if `needle` never occurs.
///
/// On a contiguous range this is `memchr::memmem::find` (the teacher's
/// `ori_lexer_core::cursor` reaches for `memchr` the same way for its own
/// substring scans); a forward range falls back to a unit-at-a-time sliding
/// window since it has no slice to hand `memchr`.
#[must_use]
pub fn read_until_code_units<R: InputRange<Unit = u8>>(r: R, needle: &[u8]) -> R {
    if needle.is_empty() {
        return r;
    }
    if let Some(hay) = r.contiguous_slice() {
        return match memchr::memmem::find(hay, needle) {
            Some(pos) => r.advance_by(pos),
            None => r.advance_by(hay.len()),
        };
    }
    let mut cur = r;
    loop {
        if cur.is_empty() {
            return cur;
        }
        let mut probe = cur.clone();
        let mut matched = true;
        for &want in needle {
            match probe.current() {
                Some(u) if u == want => probe = probe.advance_by(1),
                _ => {
                    matched = false;
                    break;
                }
            }
        }
        if matched {
            return cur;
        }
        cur = cur.advance_by(1);
    }
}

/// Consume a run of classic (Unicode `White_Space`) code points.
#[must_use]
pub fn read_while_classic_space<R: InputRange>(r: R) -> R {
    r.eat_classic_space()
}

/// Consume up to (but not including) the next classic-whitespace code point.
#[must_use]
pub fn read_until_classic_space<R: InputRange>(r: R) -> R {
    read_until_code_point(r, is_classic_space)
}

/// Match and consume exactly one code unit, or fail.
pub fn read_matching_code_unit<R: InputRange>(r: R, unit: R::Unit) -> ReadResult<R> {
    match r.current() {
        Some(u) if u == unit => Ok(r.advance_by(1)),
        _ => Err(ReadError::InvalidScannedValue),
    }
}

/// Match and consume exactly one code point, or fail.
pub fn read_matching_code_point<R: InputRange>(r: R, cp: char) -> ReadResult<R> {
    match r.decode_next() {
        Some(d) if d.code_point == cp => Ok(r.advance_by(d.consumed)),
        _ => Err(ReadError::InvalidScannedValue),
    }
}

/// Match and consume a literal string, code point by code point (Unicode
/// aware; the counterpart to [`read_matching_string_classic`] for literals
/// that may contain non-ASCII characters).
pub fn read_matching_string<R: InputRange<Unit = u8>>(r: R, s: &str) -> ReadResult<R> {
    let mut cur = r;
    for cp in s.chars() {
        cur = read_matching_code_point(cur, cp)?;
    }
    Ok(cur)
}

/// Match and consume an ASCII literal byte-for-byte (fast path for literals
/// known not to contain multi-byte code points, e.g. `"true"`/`"false"`).
pub fn read_matching_string_classic<R: InputRange<Unit = u8>>(r: R, s: &str) -> ReadResult<R> {
    let mut cur = r;
    for b in s.bytes() {
        cur = read_matching_code_unit(cur, b)?;
    }
    Ok(cur)
}

/// As [`read_matching_string_classic`], but folds ASCII `A..Z` to lowercase
/// on both sides before comparing; non-ASCII bytes compare verbatim.
pub fn read_matching_string_classic_nocase<R: InputRange<Unit = u8>>(
    r: R,
    s: &str,
) -> ReadResult<R> {
    let mut cur = r;
    for b in s.bytes() {
        let want = b.to_ascii_lowercase();
        match cur.current() {
            Some(u) if u.to_ascii_lowercase() == want => cur = cur.advance_by(1),
            _ => return Err(ReadError::InvalidScannedValue),
        }
    }
    Ok(cur)
}

/// Succeed iff the next unit equals any element of `charset`, consuming it.
pub fn read_one_of_code_unit<R: InputRange>(r: R, charset: &[R::Unit]) -> ReadResult<R> {
    match r.current() {
        Some(u) if charset.contains(&u) => Ok(r.advance_by(1)),
        _ => Err(ReadError::InvalidScannedValue),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::range::ContiguousRange;

    #[test]
    fn read_code_unit_advances_one() {
        let r = ContiguousRange::from_str("ab");
        let (r2, u) = read_code_unit(r).expect("non-empty");
        assert_eq!(u, b'a');
        assert_eq!(r2.current(), Some(b'b'));
    }

    #[test]
    fn read_code_unit_eof() {
        let r = ContiguousRange::from_str("");
        assert_eq!(read_code_unit(r).unwrap_err(), ReadError::Eof);
    }

    #[test]
    fn read_code_point_into_clusters_malformed_run() {
        // Two stray continuation bytes followed by an 'x'.
        let r = ContiguousRange::new(&[0x80u8, 0x81u8, b'x']);
        let (r2, d) = read_code_point_into(r).expect("non-empty");
        assert_eq!(d.code_point, char::REPLACEMENT_CHARACTER);
        assert_eq!(d.consumed, 2);
        assert_eq!(r2.current(), Some(b'x'));
    }

    #[test]
    fn read_exactly_n_code_points_counts_multibyte_as_one() {
        let r = ContiguousRange::from_str("€€x");
        let r2 = read_exactly_n_code_points(r, 2).expect("two code points present");
        assert_eq!(r2.current(), Some(b'x'));
    }

    #[test]
    fn read_exactly_n_code_points_fails_on_eof() {
        let r = ContiguousRange::from_str("a");
        assert_eq!(
            read_exactly_n_code_points(r, 2).unwrap_err(),
            ReadError::Eof
        );
    }

    #[test]
    fn read_exactly_n_width_units_stops_before_overflow() {
        let r = ContiguousRange::from_str("中x"); // widths 2, 1
        let r2 = read_exactly_n_width_units(r, 2);
        assert_eq!(r2.current(), Some(b'x'));
        let r3 = read_exactly_n_width_units(r, 1);
        assert_eq!(r3.current(), Some(0xE4)); // first byte of 中: nothing fit
    }

    #[test]
    fn while_until_code_unit_half_open() {
        let r = ContiguousRange::from_str("123abc");
        let digits = read_while_code_unit(r, |b| b.is_ascii_digit());
        assert_eq!(digits.current(), Some(b'a'));
        let until = read_until_code_unit(r, |b| b.is_ascii_alphabetic());
        assert_eq!(until.current(), Some(b'a'));
    }

    #[test]
    fn while1_fails_on_zero_matches() {
        let r = ContiguousRange::from_str("abc");
        assert_eq!(
            read_while1_code_unit(r, |b| b.is_ascii_digit()).unwrap_err(),
            ReadError::InvalidScannedValue
        );
    }

    #[test]
    fn while_code_point_batches_past_sixteen() {
        let s = "a".repeat(40);
        let r = ContiguousRange::from_str(&s);
        let r2 = read_while_code_point(r, |c| c == 'a');
        assert!(r2.is_empty());
    }

    #[test]
    fn until_code_units_finds_substring() {
        let r = ContiguousRange::from_str("hello world");
        let r2 = read_until_code_units(r, b"world");
        assert_eq!(r2.remaining(), b"world");
    }

    #[test]
    fn until_code_units_absent_goes_to_end() {
        let r = ContiguousRange::from_str("hello");
        let r2 = read_until_code_units(r, b"xyz");
        assert!(r2.is_empty());
    }

    #[test]
    fn matching_string_classic_nocase() {
        let r = ContiguousRange::from_str("TrUe rest");
        let r2 = read_matching_string_classic_nocase(r, "true").expect("case-insensitive match");
        assert_eq!(r2.current(), Some(b' '));
    }

    #[test]
    fn matching_string_unicode() {
        let r = ContiguousRange::from_str("αβrest");
        let r2 = read_matching_string(r, "αβ").expect("unicode literal match");
        assert_eq!(r2.current(), Some(b'r'));
    }

    #[test]
    fn one_of_code_unit() {
        let r = ContiguousRange::from_str("+42");
        let r2 = read_one_of_code_unit(r, &[b'+', b'-']).expect("sign present");
        assert_eq!(r2.current(), Some(b'4'));
    }
}
