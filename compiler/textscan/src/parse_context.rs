//! Parse context: the format-string cursor plus the automatic/manual
//! argument-indexing state machine (spec §3, §4.2).
//!
//! Two concrete variants exist, per the redesign note in spec §9
//! ("flatten the `is_constant_evaluated` upcast into two concrete
//! variants"): [`ParseContext`] for ordinary runtime scans, and
//! [`ConstParseContext`] which additionally carries `(num_args, type_tags)`
//! for the static bound/type checks a constant-expression format string
//! would get at compile time. Rust has no `constexpr`-evaluated scanning, so
//! the const variant here is the same state machine exercised against a
//! known argument shape up front rather than a real `const fn` entry point
//! (see SPEC_FULL.md's OQ-3 decision).

use crate::args::ArgType;
use crate::error::{ScanError, ScanResult};

/// Whether a parse context has committed to automatic or manual argument
/// indexing. The transition between the two, in either direction, is the
/// hard error spec §3 calls out ("a given parse context never mixes manual
/// and automatic indexing").
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum IndexMode {
    /// No placeholder has claimed an id yet.
    Unset,
    /// `{}`-style: the next unclaimed id to hand out.
    Automatic(usize),
    /// `{N}`-style: locked, no further automatic ids permitted.
    Manual,
}

/// `(remaining_format, next_arg_id)` from spec §3.
#[derive(Clone, Copy, Debug)]
pub struct ParseContext<'f> {
    remaining: &'f str,
    mode: IndexMode,
}

impl<'f> ParseContext<'f> {
    /// Begin parsing `format` from its first byte.
    #[must_use]
    pub fn new(format: &'f str) -> Self {
        Self {
            remaining: format,
            mode: IndexMode::Unset,
        }
    }

    /// The unparsed suffix of the format string.
    #[must_use]
    pub fn remaining(&self) -> &'f str {
        self.remaining
    }

    /// Drop the first `n` bytes of the remaining format string.
    ///
    /// # Panics
    /// Panics if `n` does not land on a UTF-8 boundary or exceeds the
    /// remaining length; callers only ever pass lengths they just measured
    /// from `self.remaining`.
    pub fn advance(&mut self, n: usize) {
        self.remaining = &self.remaining[n..];
    }

    /// Assign the next automatic id (for a placeholder with no explicit
    /// `{N}`), locking this context to automatic indexing.
    pub fn next_arg_id(&mut self) -> ScanResult<usize> {
        match self.mode {
            IndexMode::Manual => Err(ScanError::InvalidFormatString(
                "cannot switch from manual to automatic argument indexing".into(),
            )),
            IndexMode::Unset => {
                self.mode = IndexMode::Automatic(1);
                Ok(0)
            }
            IndexMode::Automatic(next) => {
                self.mode = IndexMode::Automatic(next + 1);
                Ok(next)
            }
        }
    }

    /// Validate an explicit `{N}` id against the argument count, locking
    /// this context to manual indexing.
    pub fn check_arg_id(&mut self, id: usize, num_args: usize) -> ScanResult<()> {
        if matches!(self.mode, IndexMode::Automatic(_)) {
            return Err(ScanError::InvalidFormatString(
                "cannot switch from automatic to manual argument indexing".into(),
            ));
        }
        self.mode = IndexMode::Manual;
        if id >= num_args {
            return Err(ScanError::InvalidFormatString(format!(
                "argument id {id} out of range (have {num_args} argument(s))"
            )));
        }
        Ok(())
    }

    /// `true` once any placeholder has assigned or validated an id.
    #[must_use]
    pub fn is_manual(&self) -> bool {
        matches!(self.mode, IndexMode::Manual)
    }
}

/// Compile-time-flavored parse context: the same state machine as
/// [`ParseContext`], plus `(num_args, type_tags)` so id and type mismatches
/// can be checked against the argument table's actual shape as each
/// placeholder is parsed, rather than only against a bare count.
#[derive(Debug)]
pub struct ConstParseContext<'f> {
    inner: ParseContext<'f>,
    type_tags: Vec<ArgType>,
}

impl<'f> ConstParseContext<'f> {
    /// Begin a const-checked parse of `format` against the given argument
    /// type shape, in placeholder order.
    #[must_use]
    pub fn new(format: &'f str, type_tags: Vec<ArgType>) -> Self {
        Self {
            inner: ParseContext::new(format),
            type_tags,
        }
    }

    #[must_use]
    pub fn remaining(&self) -> &'f str {
        self.inner.remaining()
    }

    pub fn advance(&mut self, n: usize) {
        self.inner.advance(n);
    }

    pub fn next_arg_id(&mut self) -> ScanResult<usize> {
        self.inner.next_arg_id()
    }

    /// As [`ParseContext::check_arg_id`], using the carried type-tag count
    /// as `num_args`.
    pub fn check_arg_id(&mut self, id: usize) -> ScanResult<()> {
        self.inner.check_arg_id(id, self.type_tags.len())
    }

    /// The argument type at `id`, or an `invalid_format_string` error if
    /// `id` is out of range (the static-bound-check half of spec §4.2's
    /// "out-of-range ids and type mismatches are rejected before
    /// execution").
    pub fn type_at(&self, id: usize) -> ScanResult<ArgType> {
        self.type_tags.get(id).copied().ok_or_else(|| {
            ScanError::InvalidFormatString(format!(
                "argument id {id} out of range (have {} argument(s))",
                self.type_tags.len()
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn automatic_ids_increment() {
        let mut ctx = ParseContext::new("");
        assert_eq!(ctx.next_arg_id().unwrap(), 0);
        assert_eq!(ctx.next_arg_id().unwrap(), 1);
        assert_eq!(ctx.next_arg_id().unwrap(), 2);
    }

    #[test]
    fn manual_then_automatic_is_an_error() {
        let mut ctx = ParseContext::new("");
        ctx.check_arg_id(0, 2).unwrap();
        assert!(ctx.next_arg_id().is_err());
    }

    #[test]
    fn automatic_then_manual_is_an_error() {
        let mut ctx = ParseContext::new("");
        ctx.next_arg_id().unwrap();
        assert!(ctx.check_arg_id(0, 2).is_err());
    }

    #[test]
    fn manual_id_reuse_is_allowed() {
        // OQ-1: the same explicit id may be checked twice; reuse across
        // placeholders is a property of the argument table, not the mode.
        let mut ctx = ParseContext::new("");
        ctx.check_arg_id(0, 2).unwrap();
        ctx.check_arg_id(0, 2).unwrap();
    }

    #[test]
    fn manual_id_out_of_range() {
        let mut ctx = ParseContext::new("");
        assert!(ctx.check_arg_id(5, 2).is_err());
    }

    #[test]
    fn const_context_type_lookup() {
        let ctx = ConstParseContext::new("{}", vec![ArgType::I64, ArgType::Str]);
        assert_eq!(ctx.type_at(0).unwrap(), ArgType::I64);
        assert_eq!(ctx.type_at(1).unwrap(), ArgType::Str);
        assert!(ctx.type_at(2).is_err());
    }
}
