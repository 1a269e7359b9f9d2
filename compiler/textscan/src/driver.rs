//! The scan driver / visitor (spec §4.3): walks the format string,
//! interleaves literal matching with placeholder reads, and applies
//! alignment/fill/width/precision around each typed value.

use textscan_core::read::{
    read_matching_code_point, read_matching_code_unit, read_while_classic_space,
};
use textscan_core::unicode::is_classic_space;
use textscan_core::width::code_point_width;
use textscan_core::{BoundedRange, ContiguousRange, InputRange};

use crate::args::{Arg, ArgTable};
use crate::error::{ScanError, ScanResult};
use crate::format_specs::{Alignment, FormatSpecs};
use crate::parse_context::ParseContext;
use crate::reader::{BoolReader, CharReader, DecIntReader, Locale, Reader, StringReader};

/// Consume code points equal to `fill`, while the running display width
/// stays within `width_budget`. Used for both the pre-value fill (spec
/// §4.3b, right/center alignment) and the post-value fill (§4.3d,
/// left/center alignment).
fn consume_matching_fill<R: InputRange<Unit = u8>>(r: R, fill: char, width_budget: usize) -> (R, usize) {
    let mut cur = r;
    let mut total = 0usize;
    loop {
        let Some(d) = cur.decode_next() else { break };
        if d.code_point != fill {
            break;
        }
        let w = code_point_width(d.code_point);
        if total + w > width_budget {
            break;
        }
        total += w;
        cur = cur.advance_by(d.consumed);
    }
    (cur, total)
}

/// As [`consume_matching_fill`], but for any classic-whitespace code point
/// rather than one specific fill character (spec §4.3d's "saturate" clause
/// for `align == none` readers that skip no leading whitespace themselves).
fn consume_classic_space_up_to_width<R: InputRange<Unit = u8>>(r: R, width_budget: usize) -> (R, usize) {
    let mut cur = r;
    let mut total = 0usize;
    loop {
        let Some(d) = cur.decode_next() else { break };
        if !is_classic_space(d.code_point) {
            break;
        }
        let w = code_point_width(d.code_point);
        if total + w > width_budget {
            break;
        }
        total += w;
        cur = cur.advance_by(d.consumed);
    }
    (cur, total)
}

/// The typed visitor arm (spec §4.3 steps a-f): prefix fill, bounded value
/// read, postfix fill, then width/precision enforcement. Generic over
/// which built-in [`Reader`] is dispatched to.
fn scan_placeholder<R, Rd>(
    reader: &Rd,
    mut input: R,
    specs: &FormatSpecs,
    locale: &dyn Locale,
) -> ScanResult<(R, Rd::Output)>
where
    R: InputRange<Unit = u8>,
    Rd: Reader,
{
    reader.check_specs(specs)?;

    // b. prefix handling
    let mut prefix_width = 0usize;
    match specs.align {
        None => {
            if reader.skip_ws_before_read() {
                input = read_while_classic_space(input);
            }
        }
        Some(Alignment::Right | Alignment::Center) => {
            let budget = if specs.precision != 0 {
                specs.precision
            } else {
                usize::MAX
            };
            let (after, w) = consume_matching_fill(input, specs.fill, budget);
            input = after;
            prefix_width = w;
        }
        Some(Alignment::Left) => {}
    }

    // c. value read, bounded by precision (minus what the prefix already spent)
    let value_cap = (specs.precision != 0).then(|| specs.precision.saturating_sub(prefix_width));
    let (after_value, value, value_width) = match value_cap {
        Some(cap) => {
            let bounded = BoundedRange::new(input, cap);
            let (after, value, w) = if specs.is_default() {
                reader.read_default(bounded, locale)?
            } else {
                reader.read_specs(bounded, specs, locale)?
            };
            (after.into_inner(), value, w)
        }
        None => {
            if specs.is_default() {
                reader.read_default(input, locale)?
            } else {
                reader.read_specs(input, specs, locale)?
            }
        }
    };
    input = after_value;

    // d. postfix handling
    let mut postfix_width = 0usize;
    match specs.align {
        Some(Alignment::Left | Alignment::Center) => {
            let budget = if specs.precision != 0 {
                specs.precision.saturating_sub(prefix_width + value_width)
            } else {
                usize::MAX
            };
            let (after, w) = consume_matching_fill(input, specs.fill, budget);
            input = after;
            postfix_width = w;
        }
        None if !reader.skip_ws_before_read() => {
            let so_far = prefix_width + value_width;
            let deficit = specs.width.saturating_sub(so_far);
            if deficit > 0 {
                let cap = if specs.precision != 0 {
                    specs.precision.saturating_sub(so_far)
                } else {
                    usize::MAX
                };
                let (after, w) = consume_classic_space_up_to_width(input, deficit.min(cap));
                input = after;
                postfix_width = w;
            }
        }
        _ => {}
    }

    // e. width/precision enforcement
    let total = prefix_width + value_width + postfix_width;
    if specs.width != 0 && total < specs.width {
        return Err(ScanError::InvalidScannedValue(format!(
            "matched width {total} is narrower than the required width {}",
            specs.width
        )));
    }
    if specs.precision != 0 && total > specs.precision {
        return Err(ScanError::InvalidScannedValue(format!(
            "matched width {total} exceeds precision {}",
            specs.precision
        )));
    }

    Ok((input, value))
}

/// Dispatch a custom type's user-supplied `scan` hook (spec §4.3 "Custom
/// types"). Requires the range to have a contiguous prefix to materialize
/// a `ContiguousRange` view for the hook; a forward range with no
/// contiguous slice at all cannot host a custom scan.
fn scan_custom<R: InputRange<Unit = u8>>(
    input: R,
    custom: &mut dyn crate::args::CustomScan,
) -> ScanResult<R> {
    let slice = input.contiguous_slice().ok_or_else(|| {
        ScanError::InvalidSourceState("custom scan requires a contiguous range".into())
    })?;
    let view = ContiguousRange::new(slice);
    let after = custom.scan(view)?;
    Ok(input.advance_by(after.pos()))
}

/// Resolve one placeholder's argument slot and dispatch to its reader.
#[tracing::instrument(level = "trace", skip(input, specs, args, locale))]
fn dispatch<R: InputRange<Unit = u8>>(
    input: R,
    arg_id: usize,
    specs: &FormatSpecs,
    args: &mut ArgTable<'_>,
    locale: &dyn Locale,
) -> ScanResult<R> {
    let slot = args.get_mut(arg_id).ok_or_else(|| {
        ScanError::InvalidFormatString(format!("argument id {arg_id} out of range"))
    })?;
    tracing::trace!(?arg_id, arg_type = ?slot.arg_type(), "dispatching placeholder");
    match slot {
        Arg::Bool(out) => {
            let (after, v) = scan_placeholder(&BoolReader, input, specs, locale)?;
            **out = v;
            Ok(after)
        }
        Arg::Char(out) => {
            let (after, v) = scan_placeholder(&CharReader, input, specs, locale)?;
            **out = v;
            Ok(after)
        }
        Arg::I64(out) => {
            let (after, v) = scan_placeholder(&DecIntReader, input, specs, locale)?;
            **out = v;
            Ok(after)
        }
        Arg::Str(out) => {
            let (after, v) = scan_placeholder(&StringReader, input, specs, locale)?;
            **out = v;
            Ok(after)
        }
        Arg::Custom(custom) => scan_custom(input, &mut **custom),
    }
}

/// Walk `format` against `input`, dispatching every placeholder to `args`
/// in placeholder order. This is the shared kernel behind `scan`,
/// `scan_localized`, and `vscan` (spec §4.3, §6).
#[tracing::instrument(level = "debug", skip(input, args, locale), fields(num_args = args.len()))]
pub fn drive<'f, R: InputRange<Unit = u8>>(
    mut input: R,
    format: &'f str,
    args: &mut ArgTable<'_>,
    locale: &dyn Locale,
) -> (R, ScanResult<()>) {
    let mut ctx = ParseContext::new(format);
    loop {
        let rem = ctx.remaining();
        let Some(c0) = rem.chars().next() else {
            tracing::trace!("format exhausted, scan complete");
            return (input, Ok(()));
        };
        match c0 {
            '{' if rem[1..].starts_with('{') => match read_matching_code_unit(input.clone(), b'{') {
                Ok(after) => {
                    input = after;
                    ctx.advance(2);
                }
                Err(e) => return (input, Err(e.into())),
            },
            '{' => {
                ctx.advance(1);
                let (arg_id, specs) = match crate::format_specs::parse_placeholder(&mut ctx, args.len()) {
                    Ok(v) => v,
                    Err(e) => return (input, Err(e)),
                };
                match dispatch(input.clone(), arg_id, &specs, args, locale) {
                    Ok(after) => input = after,
                    Err(e) => {
                        tracing::debug!(?arg_id, error = %e, "placeholder read failed");
                        return (input, Err(e));
                    }
                }
            }
            '}' if rem[1..].starts_with('}') => match read_matching_code_unit(input.clone(), b'}') {
                Ok(after) => {
                    input = after;
                    ctx.advance(2);
                }
                Err(e) => return (input, Err(e.into())),
            },
            '}' => {
                return (
                    input,
                    Err(ScanError::InvalidFormatString(
                        "unmatched '}' in format string".into(),
                    )),
                );
            }
            c if is_classic_space(c) => {
                input = read_while_classic_space(input);
                ctx.advance(c.len_utf8());
            }
            c => match read_matching_code_point(input.clone(), c) {
                Ok(after) => {
                    input = after;
                    ctx.advance(c.len_utf8());
                }
                Err(e) => {
                    tracing::trace!(literal = %c, "literal mismatch");
                    return (input, Err(e.into()));
                }
            },
        }
    }
}

/// Synthesize `"{} {} ... {}"` for `n` arguments — the empty-format
/// `vscan(source, n_args, args)` variant of spec §6 ("equivalent to
/// whitespace-separated default reads").
#[must_use]
pub fn synthesize_default_format(n: usize) -> String {
    std::iter::repeat("{}").take(n).collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::args::Arg;
    use crate::reader::DefaultLocale;

    fn table_for<'a>(args: Vec<Arg<'a>>) -> ArgTable<'a> {
        ArgTable::new(args)
    }

    #[test]
    fn scenario_int_then_string() {
        let mut n = 0i64;
        let mut s = String::new();
        let mut table = table_for(vec![Arg::I64(&mut n), Arg::Str(&mut s)]);
        let src = ContiguousRange::from_str("42 hello");
        let (rem, result) = drive(src, "{} {}", &mut table, &DefaultLocale);
        result.expect("scan succeeds");
        assert_eq!(n, 42);
        assert_eq!(s, "hello");
        assert!(rem.is_empty());
    }

    #[test]
    fn scenario_leading_whitespace_then_trailing_remainder() {
        let mut n = 0i64;
        let mut table = table_for(vec![Arg::I64(&mut n)]);
        let src = ContiguousRange::from_str("  42xyz");
        let (rem, result) = drive(src, "{}", &mut table, &DefaultLocale);
        result.expect("scan succeeds");
        assert_eq!(n, 42);
        assert_eq!(rem.remaining(), b"xyz");
    }

    #[test]
    fn scenario_fill_and_align() {
        let mut n = 0i64;
        let mut table = table_for(vec![Arg::I64(&mut n)]);
        let src = ContiguousRange::from_str("**42");
        let (_, result) = drive(src, "{:*>4}", &mut table, &DefaultLocale);
        result.expect("padded value scans");
        assert_eq!(n, 42);

        let mut n2 = 0i64;
        let mut table2 = table_for(vec![Arg::I64(&mut n2)]);
        let src2 = ContiguousRange::from_str("xx42");
        let (_, result2) = drive(src2, "{:*>4}", &mut table2, &DefaultLocale);
        assert!(result2.is_err(), "'x' does not match the '*' fill");
    }

    #[test]
    fn scenario_precision_is_display_width_cap() {
        let mut s = String::new();
        let mut table = table_for(vec![Arg::Str(&mut s)]);
        let src = ContiguousRange::from_str("αβγ");
        let (rem, result) = drive(src, "{:.2}", &mut table, &DefaultLocale);
        result.expect("precision-capped scan succeeds");
        assert_eq!(s, "αβ");
        assert_eq!(rem.remaining(), "γ".as_bytes());
    }

    #[test]
    fn scenario_empty_input_is_end_of_range() {
        let mut n = 0i64;
        let mut table = table_for(vec![Arg::I64(&mut n)]);
        let src = ContiguousRange::from_str("");
        let (_, result) = drive(src, "{}", &mut table, &DefaultLocale);
        assert_eq!(result.unwrap_err(), ScanError::EndOfRange);
    }

    #[test]
    fn scenario_bool_then_string() {
        let mut b = false;
        let mut s = String::new();
        let mut table = table_for(vec![Arg::Bool(&mut b), Arg::Str(&mut s)]);
        let src = ContiguousRange::from_str("true xyz");
        let (rem, result) = drive(src, "{} {}", &mut table, &DefaultLocale);
        result.expect("scan succeeds");
        assert!(b);
        assert_eq!(s, "xyz");
        assert!(rem.is_empty());
    }

    #[test]
    fn whitespace_literal_matches_zero_or_more() {
        let mut n = 0i64;
        let mut table = table_for(vec![Arg::I64(&mut n)]);
        let src = ContiguousRange::from_str("42"); // no leading space at all
        let (_, result) = drive(src, " {}", &mut table, &DefaultLocale);
        result.expect("whitespace literal accepts zero occurrences");
        assert_eq!(n, 42);
    }

    #[test]
    fn mixing_automatic_and_manual_ids_is_an_error() {
        let mut a = 0i64;
        let mut b = 0i64;
        let mut table = table_for(vec![Arg::I64(&mut a), Arg::I64(&mut b)]);
        let src = ContiguousRange::from_str("1 2");
        let (_, result) = drive(src, "{} {0}", &mut table, &DefaultLocale);
        assert!(result.is_err());
    }

    #[test]
    fn explicit_id_reuse_is_legal() {
        let mut a = 'x';
        let mut b = 'y';
        let mut table = table_for(vec![Arg::Char(&mut a), Arg::Char(&mut b)]);
        let src = ContiguousRange::from_str("zz");
        let (_, result) = drive(src, "{0}{0}", &mut table, &DefaultLocale);
        result.expect("reusing an explicit id is legal (OQ-1)");
        assert_eq!(a, 'z');
        // Both placeholders target id 0; id 1 (`b`) is never dispatched to,
        // so it keeps its initial value.
        assert_eq!(b, 'y');
    }

    #[test]
    fn literal_mismatch_reports_invalid_scanned_value() {
        let mut n = 0i64;
        let mut table = table_for(vec![Arg::I64(&mut n)]);
        let src = ContiguousRange::from_str("xyz");
        let (rem, result) = drive(src, "abc{}", &mut table, &DefaultLocale);
        assert!(result.is_err());
        // Remainder is the input at the point of failure, not advanced.
        assert_eq!(rem.remaining(), b"xyz");
    }

    #[test]
    fn synthesized_default_format_matches_expected_shape() {
        assert_eq!(synthesize_default_format(3), "{} {} {}");
        assert_eq!(synthesize_default_format(1), "{}");
        assert_eq!(synthesize_default_format(0), "");
    }
}
