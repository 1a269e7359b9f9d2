//! Format-string placeholder grammar and the parsed `format_specs` value
//! (spec §3, §4.2).
//!
//! ```text
//! placeholder ::= '{' [arg_id] [':' spec] '}'
//! spec        ::= [fill-and-align] [width] ['.' precision] ['L'] [type] [type-options]
//! fill-and-align ::= <any single code point> ('<' | '>' | '^')
//! ```
//!
//! The caller (the scan driver, spec §4.3) is responsible for recognizing
//! `{{`/`}}` escapes and the surrounding literal text; this module only
//! parses the body of a placeholder it has already been told starts one.

use crate::error::{ScanError, ScanResult};
use crate::parse_context::ParseContext;

/// `fill-and-align`'s alignment letter.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Alignment {
    Left,
    Right,
    Center,
}

impl Alignment {
    fn from_char(c: char) -> Option<Self> {
        match c {
            '<' => Some(Alignment::Left),
            '>' => Some(Alignment::Right),
            '^' => Some(Alignment::Center),
            _ => None,
        }
    }
}

/// The parsed body of one placeholder (spec §3's `format_specs` table).
#[derive(Clone, Debug, PartialEq)]
pub struct FormatSpecs {
    /// Fill code point for alignment padding. Default: `' '`.
    pub fill: char,
    /// Alignment, or `None` if unspecified.
    pub align: Option<Alignment>,
    /// Minimum display width (soft bound). `0` means unbounded.
    pub width: usize,
    /// Maximum display width (hard bound). `0` means unbounded.
    pub precision: usize,
    /// The single-letter type specifier (`'d'`, `'x'`, `'c'`, ...), or
    /// `None` for the reader's default behavior.
    pub ty: Option<char>,
    /// Whether the `L` locale-aware flag was present.
    pub localized: bool,
    /// Any trailing type-specific option characters after the type letter
    /// (reader-specific; the CORE's built-in readers ignore this, but the
    /// grammar reserves room for leaf readers like regex flags).
    pub options: String,
}

impl Default for FormatSpecs {
    fn default() -> Self {
        Self {
            fill: ' ',
            align: None,
            width: 0,
            precision: 0,
            ty: None,
            localized: false,
            options: String::new(),
        }
    }
}

impl FormatSpecs {
    /// `true` if this is exactly the no-op default (no non-default specs
    /// apply) — the driver dispatches such placeholders to
    /// `Reader::read_default` rather than `Reader::read_specs` (spec §4.3).
    #[must_use]
    pub fn is_default(&self) -> bool {
        self == &FormatSpecs::default()
    }
}

fn first_char(s: &str) -> Option<(char, &str)> {
    let c = s.chars().next()?;
    Some((c, &s[c.len_utf8()..]))
}

fn take_ascii_digits(s: &str) -> (&str, &str) {
    let end = s
        .char_indices()
        .find(|(_, c)| !c.is_ascii_digit())
        .map_or(s.len(), |(i, _)| i);
    s.split_at(end)
}

/// Parse the body between `:` and the closing `}` into a [`FormatSpecs`].
fn parse_spec_body(body: &str) -> ScanResult<FormatSpecs> {
    let mut specs = FormatSpecs::default();
    let mut rest = body;

    // fill-and-align: a code point followed by one of `<>^`.
    if let Some((fill_ch, after_fill)) = first_char(rest) {
        if let Some((align_ch, after_align)) = first_char(after_fill) {
            if let Some(a) = Alignment::from_char(align_ch) {
                specs.fill = fill_ch;
                specs.align = Some(a);
                rest = after_align;
            }
        }
    }

    // width
    let (width_digits, after_width) = take_ascii_digits(rest);
    if !width_digits.is_empty() {
        specs.width = width_digits.parse().map_err(|_| {
            ScanError::InvalidFormatString(format!("width '{width_digits}' out of range"))
        })?;
        rest = after_width;
    }

    // precision
    if let Some(after_dot) = rest.strip_prefix('.') {
        let (prec_digits, after_prec) = take_ascii_digits(after_dot);
        if prec_digits.is_empty() {
            return Err(ScanError::InvalidFormatString(
                "expected digits after '.' in precision".into(),
            ));
        }
        specs.precision = prec_digits.parse().map_err(|_| {
            ScanError::InvalidFormatString(format!("precision '{prec_digits}' out of range"))
        })?;
        rest = after_prec;
    }

    // locale flag
    if let Some(after_l) = rest.strip_prefix('L') {
        specs.localized = true;
        rest = after_l;
    }

    // type letter
    if let Some((c, after_ty)) = first_char(rest) {
        if c.is_ascii_alphabetic() {
            specs.ty = Some(c);
            rest = after_ty;
        }
    }

    specs.options = rest.to_string();
    Ok(specs)
}

/// Parse one placeholder body, given that the driver has already consumed
/// the opening `{`. Consumes through (and including) the closing `}` from
/// `ctx`, resolves the argument id (explicit or automatic) through `ctx`,
/// and returns `(arg_id, specs)`.
pub fn parse_placeholder(ctx: &mut ParseContext<'_>, num_args: usize) -> ScanResult<(usize, FormatSpecs)> {
    let body_start = ctx.remaining();
    let (id_digits, after_id) = take_ascii_digits(body_start);

    let explicit_id = if id_digits.is_empty() {
        None
    } else {
        let id: usize = id_digits
            .parse()
            .map_err(|_| ScanError::InvalidFormatString(format!("argument id '{id_digits}' out of range")))?;
        Some(id)
    };
    ctx.advance(id_digits.len());

    let after_colon = if let Some(stripped) = after_id.strip_prefix(':') {
        ctx.advance(1);
        stripped
    } else {
        after_id
    };

    let close = after_colon.find('}').ok_or_else(|| {
        ScanError::InvalidFormatString("unterminated placeholder: missing '}'".into())
    })?;
    let (spec_str, after_close) = after_colon.split_at(close);
    let specs = parse_spec_body(spec_str)?;
    ctx.advance(spec_str.len());

    debug_assert_eq!(ctx.remaining(), after_close);
    ctx.advance(1); // the closing '}'

    let arg_id = match explicit_id {
        Some(id) => {
            ctx.check_arg_id(id, num_args)?;
            id
        }
        None => ctx.next_arg_id()?,
    };
    if arg_id >= num_args {
        return Err(ScanError::InvalidFormatString(format!(
            "argument id {arg_id} out of range (have {num_args} argument(s))"
        )));
    }

    Ok((arg_id, specs))
}
