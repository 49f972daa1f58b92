use std::fmt;

/// One semantic event emitted by [`JsonParser`](crate::JsonParser) while it
/// consumes a byte stream.
///
/// Twelve tags cover the whole alphabet: begin/end of object, array, and
/// string, one fragment event for string bodies, integer, float, and the
/// three literal keywords. Every tag carries an empty slice except
/// [`StringFragment`](Self::StringFragment), [`Integer`](Self::Integer), and
/// [`Float`](Self::Float), whose slice borrows from the parser's internal
/// scratch buffer and must not be retained past the call that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JsonEvent<'a> {
    /// The start of a JSON object (`{`).
    BeginObject,

    /// The end of a JSON object (`}`).
    EndObject,

    /// The start of a JSON array (`[`).
    BeginArray,

    /// The end of a JSON array (`]`).
    EndArray,

    /// The start of a JSON string, whether object key or value.
    BeginString,

    /// A bounded slice of a string value's decoded bytes. A single string
    /// may be delivered as any number of fragments; concatenating all
    /// fragments between a `BeginString` and its matching `EndString`
    /// reconstructs the full decoded payload.
    StringFragment(&'a [u8]),

    /// The end of a JSON string.
    EndString,

    /// A complete integer literal, verbatim and unparsed, e.g. `b"-42"`.
    Integer(&'a [u8]),

    /// A complete floating-point literal, verbatim, e.g. `b"1.5e-3"`.
    Float(&'a [u8]),

    /// The literal `true`.
    True,

    /// The literal `false`.
    False,

    /// The literal `null`.
    Null,
}

impl fmt::Display for JsonEvent<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JsonEvent::BeginObject => write!(f, "begin object"),
            JsonEvent::EndObject => write!(f, "end object"),
            JsonEvent::BeginArray => write!(f, "begin array"),
            JsonEvent::EndArray => write!(f, "end array"),
            JsonEvent::BeginString => write!(f, "begin string"),
            JsonEvent::StringFragment(s) => write!(f, "string fragment ({} bytes)", s.len()),
            JsonEvent::EndString => write!(f, "end string"),
            JsonEvent::Integer(s) => write!(f, "integer ({} bytes)", s.len()),
            JsonEvent::Float(s) => write!(f, "float ({} bytes)", s.len()),
            JsonEvent::True => write!(f, "true"),
            JsonEvent::False => write!(f, "false"),
            JsonEvent::Null => write!(f, "null"),
        }
    }
}
