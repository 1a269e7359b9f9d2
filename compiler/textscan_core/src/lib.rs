//! Unicode-aware input-range abstraction and primitive readers, standalone
//! from the format-string parser and scan driver (`textscan`).
//!
//! This crate is the "raw" half of textscan's two-layer architecture:
//!
//! - **`textscan_core`** (this crate): [`InputRange`](range::InputRange),
//!   Unicode primitives, and the `read_*` vocabulary. No knowledge of format
//!   strings, argument tables, or the scan driver.
//! - **`textscan`**: parses format strings, walks the scan driver, and
//!   dispatches to typed readers built on top of these primitives.
//!
//! # Stability
//!
//! - [`range::InputRange`]: sealed to [`range::ContiguousRange`] and
//!   [`range::ForwardRange`] — the set of range kinds is closed by design.
//! - `read_*` primitives: stable names and signatures, additions only.

pub mod code_unit;
pub mod error;
pub mod range;
pub mod read;
pub mod unicode;
pub mod width;

pub use code_unit::CodeUnit;
pub use error::{ReadError, ReadResult};
pub use range::{BoundedRange, ContiguousRange, ForwardRange, InputRange};
pub use unicode::Decoded;
