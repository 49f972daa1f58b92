//! Optional convenience helpers for interpreting the verbatim literal
//! slices carried by [`JsonEvent::Integer`](crate::JsonEvent::Integer) and
//! [`JsonEvent::Float`](crate::JsonEvent::Float).
//!
//! The core never parses numbers itself. These functions are plain,
//! caller-invoked conveniences over an already-emitted slice.

use std::str::from_utf8;

use btoi::{btoi, ParseIntegerError};
use num_traits::{CheckedAdd, CheckedMul, CheckedSub, FromPrimitive, Zero};
use thiserror::Error;

/// An error parsing a [`JsonEvent::Float`](crate::JsonEvent::Float)
/// payload.
#[derive(Error, Debug)]
pub enum ParseFloatLiteralError {
    #[error("literal is not valid UTF-8: {0}")]
    Utf8(#[from] std::str::Utf8Error),

    #[error("literal does not parse as a float: {0}")]
    Float(#[from] std::num::ParseFloatError),
}

/// Parse the verbatim bytes of an [`JsonEvent::Integer`](crate::JsonEvent::Integer)
/// payload as an integer type.
///
/// ```
/// use jflow::numeric::parse_integer;
///
/// let n: i64 = parse_integer(b"-42").unwrap();
/// assert_eq!(n, -42);
/// ```
pub fn parse_integer<I>(literal: &[u8]) -> Result<I, ParseIntegerError>
where
    I: FromPrimitive + Zero + CheckedAdd + CheckedSub + CheckedMul,
{
    btoi(literal)
}

/// Parse the verbatim bytes of an [`JsonEvent::Float`](crate::JsonEvent::Float)
/// payload as an `f64`.
///
/// ```
/// use jflow::numeric::parse_float;
///
/// let n = parse_float(b"1.5e-3").unwrap();
/// assert!((n - 0.0015).abs() < 1e-12);
/// ```
pub fn parse_float(literal: &[u8]) -> Result<f64, ParseFloatLiteralError> {
    Ok(from_utf8(literal)?.parse()?)
}
