/// Static configuration for [`JsonParser`](crate::JsonParser).
///
/// Flags are set at construction and are immutable after the first byte is
/// pushed. Use [`ParserFlagsBuilder`] to construct non-default instances.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ParserFlags {
    pub(crate) ignore_rfc3629: bool,
}

impl ParserFlags {
    /// `true` if lead-byte UTF-8 validation on direct string bytes is
    /// disabled. See [`ParserFlagsBuilder::with_ignore_rfc3629`].
    pub fn ignore_rfc3629(&self) -> bool {
        self.ignore_rfc3629
    }
}

/// A builder for [`ParserFlags`].
///
/// ```rust
/// use jflow::ParserFlagsBuilder;
///
/// let flags = ParserFlagsBuilder::default()
///     .with_ignore_rfc3629(true)
///     .build();
/// assert!(flags.ignore_rfc3629());
/// ```
#[derive(Default, Clone, Copy, Debug, PartialEq, Eq)]
pub struct ParserFlagsBuilder {
    flags: ParserFlags,
}

impl ParserFlagsBuilder {
    /// Disable lead-byte UTF-8 validation on direct (non-escaped) string
    /// bytes with code `>= 0x80`. Enable this if the input stream is known
    /// to contain bytes that are not valid UTF-8.
    pub fn with_ignore_rfc3629(mut self, ignore: bool) -> Self {
        self.flags.ignore_rfc3629 = ignore;
        self
    }

    /// Build the final [`ParserFlags`].
    pub fn build(self) -> ParserFlags {
        self.flags
    }
}
