use thiserror::Error;

/// The class of input a state expected when it instead saw something else.
///
/// Kept as a separate enum (rather than one `ParserError::InvalidToken`
/// variant per expected character class, as the original C source does)
/// because a single "here's the expected class, here's the byte" shape is
/// both exhaustive and easy to test.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpectedClass {
    #[error("a value")]
    Value,
    #[error("whitespace")]
    Whitespace,
    #[error("']' or a value")]
    ArrayElementOrClose,
    #[error("']' or ','")]
    ArrayContinuation,
    #[error("a string or '}}'")]
    ObjectKeyOrClose,
    #[error("':'")]
    Colon,
    #[error("'}}' or ','")]
    ObjectContinuation,
    #[error("a hexadecimal digit")]
    HexDigit,
    #[error("the character '{0}'")]
    ExactChar(char),
    #[error("{0}")]
    Other(&'static str),
}

/// Fatal error codes returned by [`JsonParser`](crate::JsonParser).
///
/// Every variant is fatal and non-recoverable for the stream that produced
/// it: once a push-call returns `Err`, the parser is terminal and must be
/// discarded. `num_bytes` at the time of the error identifies the offending
/// byte for structural errors.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParserError {
    /// An input byte did not belong to the character class the current
    /// state expected.
    #[error("invalid token at byte {position}: expected {expected}, found {found:?}")]
    InvalidToken {
        expected: ExpectedClass,
        found: u8,
        position: u64,
    },

    /// A byte below `0x20` appeared inside a string outside of an escape.
    #[error("embedded control character 0x{0:02x} inside string at byte {1}")]
    EmbeddedControlChar(u8, u64),

    /// A direct (non-escaped) string byte was a UTF-8 lead byte rejected by
    /// RFC 3629 (`0xC0..=0xC1` or `0xF5..=0xFF`).
    #[error("invalid UTF-8 lead byte 0x{0:02x} at byte {1}")]
    BadUtf8LeadByte(u8, u64),

    /// A `\` escape was followed by a character that is not one of
    /// `" \ / b f n r t u`, or a `\uXXXX` escape decoded to an invalid or
    /// unpaired surrogate.
    #[error("invalid backslash escape at byte {0}")]
    BadEscape(u64),

    /// The state stack reached `STACK_CAP`; the document nests too deeply.
    #[error("stack overflow: nesting exceeds the configured maximum depth")]
    StackOverflow,

    /// An internal pop was attempted on an empty stack. Unreachable from
    /// well-formed input; indicates a parser bug if ever observed.
    #[error("stack underflow (internal parser error)")]
    StackUnderflow,

    /// A number literal exceeded `BUF_CAP` before a terminator was seen.
    #[error("number literal exceeds the configured scratch buffer size")]
    NumberTooBig,

    /// [`finalise`](crate::JsonParser::finalise) was called while nested
    /// inside an open object, array, or string.
    #[error("finalise called with an unclosed value still open")]
    StackTooBig,

    /// [`finalise`](crate::JsonParser::finalise) was called before any value
    /// was ever parsed.
    #[error("finalise called before any value was parsed")]
    StackTooSmall,

    /// Exactly one value was parsed but the parser is not in the expected
    /// post-value state (e.g. a pending number was never flushed -- this
    /// should not happen, since `finalise` flushes pending numbers first).
    #[error("finalise reached an unexpected parser state")]
    WrongFinalState,

    /// The [`EventSink`](crate::EventSink) asked the parser to stop.
    #[error("callback requested the parser stop")]
    CallbackStop,
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Every variant must produce a non-empty message -- this is the Rust
    /// equivalent of the original's `jf_strerror_r`.
    #[test]
    fn every_variant_has_a_message() {
        let variants = [
            ParserError::InvalidToken {
                expected: ExpectedClass::Value,
                found: b'x',
                position: 3,
            },
            ParserError::EmbeddedControlChar(0x01, 5),
            ParserError::BadUtf8LeadByte(0xC0, 7),
            ParserError::BadEscape(9),
            ParserError::StackOverflow,
            ParserError::StackUnderflow,
            ParserError::NumberTooBig,
            ParserError::StackTooBig,
            ParserError::StackTooSmall,
            ParserError::WrongFinalState,
            ParserError::CallbackStop,
        ];
        for v in variants {
            assert!(!v.to_string().is_empty());
        }
    }

    #[test]
    fn errors_are_copy_and_comparable() {
        let e1 = ParserError::StackOverflow;
        let e2 = e1;
        assert_eq!(e1, e2);
    }
}
