//! Uniform view over contiguous or forward code-unit streams.
//!
//! A cheap, `Clone` value that never mutates the underlying buffer, where
//! "advancing" means producing a new value. Read primitives in
//! [`crate::read`] take a range by value and hand back an updated one;
//! callers never poke at the buffer directly.
//!
//! Two concrete implementors exist: [`ContiguousRange`] (random access over
//! a borrowed slice) and [`ForwardRange`] (single-pass, driven by any
//! `Iterator<Item = Unit>`). Both are plain structs behind one sealed trait
//! rather than trait objects — the set of range kinds is closed by design,
//! so there's no need for virtual dispatch.

use crate::code_unit::CodeUnit;
use crate::unicode::Decoded;

/// Uniform view over a code-unit stream.
///
/// Implementors are `Clone`: every read primitive takes a range by value and
/// returns a new value representing "the range after this read." Callers
/// that need to retry a read from the same starting point (e.g. the driver's
/// literal/placeholder dispatch) clone before the attempt; `Clone` rather
/// than `Copy` because a forward range's cursor is an arbitrary iterator
/// (e.g. `str::Bytes`), which in general isn't `Copy`.
pub trait InputRange: Clone {
    /// Narrow (`u8`) or wide (`u16`) code unit.
    type Unit: CodeUnit;

    /// `true` iff no code units remain.
    fn is_empty(&self) -> bool;

    /// The current code unit, or `None` at end of range.
    fn current(&self) -> Option<Self::Unit>;

    /// A new range advanced past the first `n` code units.
    ///
    /// # Panics
    /// May panic (contiguous) or loop forever consuming `None`s (forward)
    /// if `n` exceeds the number of remaining code units. Callers must not
    /// advance past what `current`/decoding has already confirmed present.
    fn advance_by(&self, n: usize) -> Self;

    /// `true` if [`contiguous_slice`](Self::contiguous_slice) can return the
    /// remainder of the range in one borrow (spec: `is_contiguous` probe).
    fn is_contiguous(&self) -> bool;

    /// The longest prefix of the remaining range that is contiguously
    /// addressable as a slice (spec: `contiguous_beginning`). `None` for a
    /// range with no addressable prefix at all (a forward range, which by
    /// construction never exposes one).
    fn contiguous_slice(&self) -> Option<&[Self::Unit]>;

    /// Decode the next code point without consuming it.
    ///
    /// Returns `None` at end of range. For a contiguous range this borrows
    /// `contiguous_slice`; for a forward range it pulls up to 4 (narrow) or
    /// 2 (wide) units one at a time via `current`/`advance_by`.
    fn decode_next(&self) -> Option<Decoded> {
        if self.is_empty() {
            return None;
        }
        if let Some(slice) = self.contiguous_slice() {
            return Some(Self::Unit::decode(slice));
        }
        // Forward path: stage up to 4 units into a small local buffer.
        let mut buf = [self.current()?; 4];
        let mut n = 1usize;
        let mut probe = self.advance_by(1);
        while n < buf.len() {
            match probe.current() {
                Some(u) => {
                    buf[n] = u;
                    n += 1;
                    probe = probe.advance_by(1);
                }
                None => break,
            }
        }
        Some(Self::Unit::decode(&buf[..n]))
    }

    /// Advance past a run of classic (Unicode `White_Space`) code points.
    ///
    /// The default implementation decodes one code point at a time; it is
    /// correct for every implementor. [`ContiguousRange<u8>`] overrides it
    /// with a table-driven ASCII fast path that produces an identical
    /// observable result.
    fn eat_classic_space(&self) -> Self {
        let mut cur = self.clone();
        loop {
            match cur.decode_next() {
                Some(d) if crate::unicode::is_classic_space(d.code_point) => {
                    cur = cur.advance_by(d.consumed);
                }
                _ => break,
            }
        }
        cur
    }
}

/// 256-entry lookup table: `true` for the ASCII bytes that are classic
/// whitespace on their own (space, tab, LF, CR, VT, FF). Non-ASCII classic
/// whitespace (NBSP, ideographic space, ...) is multi-byte in UTF-8 and is
/// handled by the generic decode fallback once this table stops matching.
const ASCII_CLASSIC_SPACE: [bool; 256] = {
    let mut table = [false; 256];
    table[b' ' as usize] = true;
    table[b'\t' as usize] = true;
    table[b'\n' as usize] = true;
    table[b'\r' as usize] = true;
    table[0x0B] = true;
    table[0x0C] = true;
    table
};

/// Random-access view over a borrowed, contiguous code-unit slice.
#[derive(Clone, Copy, Debug)]
pub struct ContiguousRange<'a, U: CodeUnit> {
    units: &'a [U],
    pos: usize,
}

impl<'a, U: CodeUnit> ContiguousRange<'a, U> {
    /// Create a range over the whole slice, starting at position 0.
    #[must_use]
    pub fn new(units: &'a [U]) -> Self {
        Self { units, pos: 0 }
    }

    /// Current byte/unit offset from the start of the original slice.
    #[must_use]
    pub fn pos(&self) -> usize {
        self.pos
    }

    /// The unconsumed code units as a slice.
    #[must_use]
    pub fn remaining(&self) -> &'a [U] {
        &self.units[self.pos..]
    }
}

impl<'a> ContiguousRange<'a, u8> {
    /// Create a narrow range over a `&str`'s UTF-8 bytes.
    #[must_use]
    pub fn from_str(s: &'a str) -> Self {
        Self::new(s.as_bytes())
    }
}

impl<'a, U: CodeUnit> ContiguousRange<'a, U> {
    fn is_empty_impl(&self) -> bool {
        self.pos >= self.units.len()
    }

    fn current_impl(&self) -> Option<U> {
        self.units.get(self.pos).copied()
    }

    fn advance_by_impl(&self, n: usize) -> Self {
        Self {
            units: self.units,
            pos: self.pos + n,
        }
    }
}

impl<'a> InputRange for ContiguousRange<'a, u8> {
    type Unit = u8;

    fn is_empty(&self) -> bool {
        self.is_empty_impl()
    }

    fn current(&self) -> Option<u8> {
        self.current_impl()
    }

    fn advance_by(&self, n: usize) -> Self {
        self.advance_by_impl(n)
    }

    fn is_contiguous(&self) -> bool {
        true
    }

    fn contiguous_slice(&self) -> Option<&[u8]> {
        Some(self.remaining())
    }

    /// Table-driven ASCII fast path with a generic-decode tail for any
    /// trailing non-ASCII classic-whitespace code points.
    fn eat_classic_space(&self) -> Self {
        let bytes = self.remaining();
        let mut i = 0;
        while i < bytes.len() && ASCII_CLASSIC_SPACE[bytes[i] as usize] {
            i += 1;
        }
        let mut cur = self.advance_by_impl(i);
        // bytes[i] (if any) is either non-whitespace ASCII or a non-ASCII
        // lead byte; only the latter can still be classic whitespace.
        while let Some(b) = cur.current_impl() {
            if b < 0x80 {
                break;
            }
            match cur.decode_next() {
                Some(d) if crate::unicode::is_classic_space(d.code_point) => {
                    cur = cur.advance_by_impl(d.consumed);
                }
                _ => break,
            }
        }
        cur
    }
}

impl<'a> InputRange for ContiguousRange<'a, u16> {
    type Unit = u16;

    fn is_empty(&self) -> bool {
        self.is_empty_impl()
    }

    fn current(&self) -> Option<u16> {
        self.current_impl()
    }

    fn advance_by(&self, n: usize) -> Self {
        self.advance_by_impl(n)
    }

    fn is_contiguous(&self) -> bool {
        true
    }

    fn contiguous_slice(&self) -> Option<&[u16]> {
        Some(self.remaining())
    }
}

/// Single-pass view driven by any cloneable code-unit iterator.
///
/// Has no contiguously addressable prefix: every read goes through
/// `Iterator::next`. `peeked` holds at most one already-pulled unit so that
/// `current()` can be queried without consuming it from the source
/// iterator; a forward range has no padded buffer to peek into, so it
/// caches the one unit explicitly instead.
#[derive(Clone, Debug)]
pub struct ForwardRange<I> {
    iter: I,
    peeked: Option<Option<u8>>,
}

// ForwardRange is specialized to `u8` items: a forward range of wide units
// would follow the same shape with `u16`, but the CORE exercises only the
// narrow forward path end-to-end (see DESIGN.md).
impl<I: Iterator<Item = u8> + Clone> ForwardRange<I> {
    /// Wrap an iterator of narrow code units as a forward range.
    pub fn new(iter: I) -> Self {
        Self { iter, peeked: None }
    }

    fn peek(&self) -> Option<u8> {
        match self.peeked {
            Some(v) => v,
            None => self.iter.clone().next(),
        }
    }
}

impl<I: Iterator<Item = u8> + Clone> InputRange for ForwardRange<I> {
    type Unit = u8;

    fn is_empty(&self) -> bool {
        self.peek().is_none()
    }

    fn current(&self) -> Option<u8> {
        self.peek()
    }

    fn advance_by(&self, n: usize) -> Self {
        let mut iter = self.iter.clone();
        for _ in 0..n {
            iter.next();
        }
        Self { iter, peeked: None }
    }

    fn is_contiguous(&self) -> bool {
        false
    }

    fn contiguous_slice(&self) -> Option<&[u8]> {
        None
    }
}

/// A range bounded to at most `width` of cumulative display width (spec:
/// `take_width`). Wraps any `InputRange` and stops reporting code units once
/// the width budget is exhausted, without touching the inner range's
/// position beyond what was actually decoded.
///
/// The budget is resolved to a fixed code-unit count up front, by walking a
/// clone of `inner` and summing `code_point_width` one code point at a time
/// (the same walk `read_exactly_n_width_units` in `crate::read` performs),
/// stopping before any code point whose width would overflow the budget.
/// From then on `advance_by`/`decode_next` only need to compare against a
/// plain code-unit counter, so the bound holds across however many calls it
/// takes a reader to consume those units — one per code point, or one per
/// code unit (`reader::collect_while` walks multi-byte code points a unit at
/// a time).
#[derive(Clone, Copy, Debug)]
pub struct BoundedRange<R> {
    inner: R,
    remaining_units: usize,
}

impl<R: InputRange> BoundedRange<R> {
    /// Bound `inner` to `width` of display width (spec: `take_width(v, w)`).
    /// A `width` of `0` bounds to nothing; callers that mean "unbounded"
    /// should not wrap at all.
    pub fn new(inner: R, width: usize) -> Self {
        let remaining_units = units_within_width(inner.clone(), width);
        Self {
            inner,
            remaining_units,
        }
    }

    /// Unwrap back to the inner range at its current position.
    pub fn into_inner(self) -> R {
        self.inner
    }
}

/// How many leading code units of `cur` fit within `width` of cumulative
/// display width, admitting a code point only if its full width still fits.
fn units_within_width<R: InputRange>(mut cur: R, width: usize) -> usize {
    if width == 0 {
        return 0;
    }
    let mut total_width = 0usize;
    let mut total_units = 0usize;
    loop {
        let Some(d) = cur.decode_next() else { break };
        let w = crate::width::code_point_width(d.code_point);
        if total_width + w > width {
            break;
        }
        total_width += w;
        total_units += d.consumed;
        cur = cur.advance_by(d.consumed);
    }
    total_units
}

impl<R: InputRange> InputRange for BoundedRange<R> {
    type Unit = R::Unit;

    fn is_empty(&self) -> bool {
        self.remaining_units == 0 || self.inner.is_empty()
    }

    fn current(&self) -> Option<Self::Unit> {
        if self.remaining_units == 0 {
            None
        } else {
            self.inner.current()
        }
    }

    fn advance_by(&self, n: usize) -> Self {
        Self {
            inner: self.inner.advance_by(n),
            remaining_units: self.remaining_units.saturating_sub(n),
        }
    }

    fn is_contiguous(&self) -> bool {
        self.inner.is_contiguous()
    }

    fn contiguous_slice(&self) -> Option<&[Self::Unit]> {
        self.inner
            .contiguous_slice()
            .map(|s| &s[..s.len().min(self.remaining_units)])
    }

    fn decode_next(&self) -> Option<Decoded> {
        if self.remaining_units == 0 {
            return None;
        }
        let decoded = self.inner.decode_next()?;
        if decoded.consumed > self.remaining_units {
            None
        } else {
            Some(decoded)
        }
    }
}
