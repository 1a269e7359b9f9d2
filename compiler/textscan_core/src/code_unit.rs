//! Code-unit classification for the narrow (UTF-8) and wide (UTF-16) encodings.
//!
//! A "code unit" is one element of the underlying encoded string: a byte for
//! narrow ranges, a `u16` for wide ranges. `code_point_length` tells the
//! reader how many further code units complete the code point that starts
//! at a given lead unit, without looking at the rest of the buffer.

use crate::unicode::Decoded;

/// One element of an encoded string: a narrow byte or a wide UTF-16 unit.
///
/// Closed to two implementors by design (spec: narrow/wide contiguous and
/// forward ranges); see `raw_scanner`-style dispatch in the sibling
/// `textscan` crate for why this stays a sealed trait rather than growing
/// generic code-unit widths.
pub trait CodeUnit: Copy + Eq + private::Sealed {
    /// Number of code units (including this lead unit) that make up the
    /// code point starting here. `0` means this unit cannot start a code
    /// point (e.g. a stray UTF-8 continuation byte or an unpaired UTF-16
    /// low surrogate).
    fn code_point_length(self) -> u8;

    /// `true` for the Unicode code points the ASCII-compatible subset of
    /// classic whitespace: space, tab, CR, LF, VT, FF.
    fn is_ascii_classic_space(self) -> bool;

    /// Decode one code point from `units`, which must be non-empty and
    /// start at a lead unit (as opposed to mid-sequence).
    fn decode(units: &[Self]) -> Decoded;
}

mod private {
    pub trait Sealed {}
    impl Sealed for u8 {}
    impl Sealed for u16 {}
}

impl CodeUnit for u8 {
    #[inline]
    fn code_point_length(self) -> u8 {
        match self {
            0x00..=0x7F => 1,
            0xC2..=0xDF => 2,
            0xE0..=0xEF => 3,
            0xF0..=0xF4 => 4,
            // 0x80..=0xC1 (continuation bytes / overlong lead) and 0xF5..=0xFF
            // can never start a well-formed UTF-8 sequence.
            _ => 0,
        }
    }

    #[inline]
    fn is_ascii_classic_space(self) -> bool {
        matches!(self, b' ' | b'\t' | b'\n' | b'\r' | 0x0B | 0x0C)
    }

    #[inline]
    fn decode(units: &[Self]) -> Decoded {
        crate::unicode::decode_utf8(units)
    }
}

impl CodeUnit for u16 {
    #[inline]
    fn code_point_length(self) -> u8 {
        match self {
            0xD800..=0xDBFF => 2, // high surrogate: needs a following low surrogate
            0xDC00..=0xDFFF => 0, // lone low surrogate: cannot start a code point
            _ => 1,
        }
    }

    #[inline]
    fn is_ascii_classic_space(self) -> bool {
        matches!(self, 0x20 | 0x09 | 0x0A | 0x0D | 0x0B | 0x0C)
    }

    #[inline]
    fn decode(units: &[Self]) -> Decoded {
        crate::unicode::decode_utf16(units)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn narrow_ascii_is_length_one() {
        assert_eq!(b'a'.code_point_length(), 1);
        assert_eq!(0u8.code_point_length(), 1);
    }

    #[test]
    fn narrow_multibyte_leads() {
        assert_eq!(0xC2u8.code_point_length(), 2); // U+0080 lead
        assert_eq!(0xE2u8.code_point_length(), 3); // e.g. '€'
        assert_eq!(0xF0u8.code_point_length(), 4); // e.g. emoji plane
    }

    #[test]
    fn narrow_invalid_leads_are_zero_length() {
        assert_eq!(0x80u8.code_point_length(), 0); // stray continuation byte
        assert_eq!(0xC0u8.code_point_length(), 0); // overlong-only lead
        assert_eq!(0xFFu8.code_point_length(), 0);
    }

    #[test]
    fn wide_surrogates() {
        assert_eq!(0xD800u16.code_point_length(), 2);
        assert_eq!(0xDC00u16.code_point_length(), 0);
        assert_eq!(0x0041u16.code_point_length(), 1);
    }
}
