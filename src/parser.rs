use crate::buffer::FragmentBuffer;
use crate::error::{ExpectedClass, ParserError};
use crate::event::JsonEvent;
use crate::options::ParserFlags;
use crate::sink::{Control, EventSink};
use crate::stack::{StateStack, StateTag};
use crate::unicode::{
    encode_utf8, hex_value, is_forbidden_lead_byte, is_high_surrogate, is_low_surrogate,
    join_surrogates,
};

/// Whether a dispatch step consumed its input byte or wants it redelivered
/// under the (now different) top-of-stack state.
///
/// This is the explicit loop-based replacement for the `goto retry` in the
/// original C source (`jf_parse`'s `retry:` label).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Advance,
    Retry,
}

/// Outcome of trying to start a JSON value at the current byte.
enum Accept {
    /// The byte was whitespace and was ignored.
    Whitespace,
    /// The byte began a value; the state stack and scratch buffer were
    /// updated accordingly.
    Started,
    /// The byte does not belong to any value-starting character class.
    NotAValue,
}

fn is_whitespace(b: u8) -> bool {
    matches!(b, b' ' | 0x08 | 0x0c | b'\t' | b'\n' | b'\r' | 0x0b)
}

fn is_terminator(b: u8) -> bool {
    is_whitespace(b) || matches!(b, b',' | b']' | b'}' | b')')
}

/// A streaming, push-based JSON event tokenizer.
///
/// Feed successive byte chunks with [`push`](Self::push); call
/// [`finalise`](Self::finalise) once, after the last chunk, to validate
/// end-of-input invariants. Every structural and string event is delivered
/// synchronously to the `S: EventSink` supplied at construction.
///
/// `STACK_CAP` bounds nesting depth (default 1024); `BUF_CAP` bounds the
/// scratch buffer used for string-fragment accumulation and number
/// literals (default 128). Both are compile-time constants so embedded
/// callers can shrink them and server callers can grow them without any
/// runtime allocation.
///
/// The parser is allocation-free after construction, reentrant (distinct
/// instances share no state), and one-shot: once a call returns an error,
/// the instance is terminal and must be discarded.
pub struct JsonParser<S, const STACK_CAP: usize = 1024, const BUF_CAP: usize = 128> {
    sink: S,
    flags: ParserFlags,
    num_bytes: u64,
    stack: StateStack<STACK_CAP>,
    buf: FragmentBuffer<BUF_CAP>,
    hex_accum: u32,
    high_surrogate: Option<u32>,
    terminal_error: Option<ParserError>,
}

impl<S, const STACK_CAP: usize, const BUF_CAP: usize> JsonParser<S, STACK_CAP, BUF_CAP>
where
    S: EventSink,
{
    /// Create a new parser with default flags.
    pub fn new(sink: S) -> Self {
        Self::with_flags(sink, ParserFlags::default())
    }

    /// Create a new parser with the given [`ParserFlags`].
    pub fn with_flags(sink: S, flags: ParserFlags) -> Self {
        JsonParser {
            sink,
            flags,
            num_bytes: 0,
            stack: StateStack::new(),
            buf: FragmentBuffer::new(),
            hex_accum: 0,
            high_surrogate: None,
            terminal_error: None,
        }
    }

    /// The number of bytes consumed since construction.
    pub fn num_bytes(&self) -> u64 {
        self.num_bytes
    }

    /// The version of this crate.
    pub fn version() -> &'static str {
        env!("CARGO_PKG_VERSION")
    }

    /// Borrow the sink this parser was constructed with.
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Mutably borrow the sink this parser was constructed with.
    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// Consume the parser, returning its sink.
    pub fn into_sink(self) -> S {
        self.sink
    }

    /// Consume `bytes`, emitting events to the sink along the way.
    ///
    /// Any number of calls, each carrying an arbitrary slice of the
    /// stream, produce the same event sequence as one call with the
    /// concatenated bytes (chunking is semantically invisible). Once this
    /// returns `Err`, the parser is terminal: further calls return a copy
    /// of the same error without reprocessing input.
    pub fn push(&mut self, bytes: &[u8]) -> Result<(), ParserError> {
        if let Some(e) = self.terminal_error {
            return Err(e);
        }
        let mut i = 0;
        while i < bytes.len() {
            match self.step(bytes[i]) {
                Ok(Step::Advance) => {
                    self.num_bytes += 1;
                    i += 1;
                }
                Ok(Step::Retry) => {
                    // Same byte, now dispatched under the new top-of-stack
                    // state. The cursor must not advance: num_bytes and i
                    // are both left untouched.
                }
                Err(e) => {
                    self.terminal_error = Some(e);
                    return Err(e);
                }
            }
        }
        Ok(())
    }

    /// Equivalent to `push(&[])`: signal end-of-input and validate the
    /// end-of-input invariants (exactly one value was parsed and nothing
    /// is left open).
    pub fn finalise(&mut self) -> Result<(), ParserError> {
        if let Some(e) = self.terminal_error {
            return Err(e);
        }
        if let Err(e) = self.flush_pending_number() {
            self.terminal_error = Some(e);
            return Err(e);
        }
        let result = match self.stack.len() {
            0 => Err(ParserError::StackTooSmall),
            1 if self.stack.top() == Some(StateTag::PostValue) => Ok(()),
            1 => Err(ParserError::WrongFinalState),
            _ => Err(ParserError::StackTooBig),
        };
        if let Err(e) = result {
            self.terminal_error = Some(e);
        }
        result
    }

    /// A bare number at end-of-input has no trailing terminator byte to
    /// trigger its own flush, so `finalise` must flush it before checking
    /// the stack-depth invariant.
    fn flush_pending_number(&mut self) -> Result<(), ParserError> {
        match self.stack.top() {
            Some(StateTag::InNumberInt) => {
                self.emit_integer()?;
                self.stack.pop()?;
            }
            Some(StateTag::InNumberFrac) | Some(StateTag::InNumberExpDigits) => {
                self.emit_float()?;
                self.stack.pop()?;
            }
            _ => {}
        }
        Ok(())
    }

    fn apply_control(&self, ctrl: Control) -> Result<(), ParserError> {
        match ctrl {
            Control::Continue => Ok(()),
            Control::Stop => Err(ParserError::CallbackStop),
        }
    }

    fn emit_plain(&mut self, event: JsonEvent<'static>) -> Result<(), ParserError> {
        let ctrl = self.sink.event(event);
        self.apply_control(ctrl)
    }

    fn emit_integer(&mut self) -> Result<(), ParserError> {
        let ctrl = self.sink.event(JsonEvent::Integer(self.buf.as_slice()));
        self.buf.clear();
        self.apply_control(ctrl)
    }

    fn emit_float(&mut self) -> Result<(), ParserError> {
        let ctrl = self.sink.event(JsonEvent::Float(self.buf.as_slice()));
        self.buf.clear();
        self.apply_control(ctrl)
    }

    fn flush_fragment(&mut self) -> Result<(), ParserError> {
        if self.buf.is_empty() {
            return Ok(());
        }
        let ctrl = self.sink.event(JsonEvent::StringFragment(self.buf.as_slice()));
        self.buf.clear();
        self.apply_control(ctrl)
    }

    fn push_string_byte(&mut self, b: u8) -> Result<(), ParserError> {
        if self.buf.is_full() {
            self.flush_fragment()?;
        }
        self.buf.push_string_byte(b);
        Ok(())
    }

    fn push_string_bytes(&mut self, bytes: &[u8]) -> Result<(), ParserError> {
        if self.buf.remaining() < bytes.len() {
            self.flush_fragment()?;
        }
        self.buf.push_string_bytes(bytes);
        Ok(())
    }

    fn err_invalid(&self, expected: ExpectedClass, found: u8) -> ParserError {
        ParserError::InvalidToken {
            expected,
            found,
            position: self.num_bytes,
        }
    }

    /// Try to start a value at `b`. `follow_up`, if given, is pushed
    /// *before* the value's own child state so that when the value
    /// completes, control returns to the right containing context.
    fn accept_value(
        &mut self,
        b: u8,
        follow_up: Option<StateTag>,
    ) -> Result<Accept, ParserError> {
        if is_whitespace(b) {
            return Ok(Accept::Whitespace);
        }
        match b {
            b'{' => {
                if let Some(f) = follow_up {
                    self.stack.push(f)?;
                }
                self.stack.push(StateTag::InObject)?;
                self.emit_plain(JsonEvent::BeginObject)?;
                Ok(Accept::Started)
            }
            b'[' => {
                if let Some(f) = follow_up {
                    self.stack.push(f)?;
                }
                self.stack.push(StateTag::InArray)?;
                self.emit_plain(JsonEvent::BeginArray)?;
                Ok(Accept::Started)
            }
            b'"' => {
                if let Some(f) = follow_up {
                    self.stack.push(f)?;
                }
                self.stack.push(StateTag::InString)?;
                self.buf.clear();
                self.emit_plain(JsonEvent::BeginString)?;
                Ok(Accept::Started)
            }
            b't' => {
                if let Some(f) = follow_up {
                    self.stack.push(f)?;
                }
                self.stack.push(StateTag::LitT1)?;
                Ok(Accept::Started)
            }
            b'f' => {
                if let Some(f) = follow_up {
                    self.stack.push(f)?;
                }
                self.stack.push(StateTag::LitF1)?;
                Ok(Accept::Started)
            }
            b'n' => {
                if let Some(f) = follow_up {
                    self.stack.push(f)?;
                }
                self.stack.push(StateTag::LitN1)?;
                Ok(Accept::Started)
            }
            b'-' | b'0'..=b'9' => {
                if let Some(f) = follow_up {
                    self.stack.push(f)?;
                }
                self.stack.push(StateTag::InNumberInt)?;
                self.buf.clear();
                self.buf.push_number_byte(b)?;
                Ok(Accept::Started)
            }
            _ => Ok(Accept::NotAValue),
        }
    }

    /// Dispatch one input byte in the context of the current top-of-stack
    /// tag (or the empty stack, the document-start state).
    fn step(&mut self, b: u8) -> Result<Step, ParserError> {
        match self.stack.top() {
            None => self.dispatch_top_value(b),
            Some(StateTag::TopValue) => self.dispatch_top_value(b),
            Some(StateTag::PostValue) => self.dispatch_post_value(b),
            Some(StateTag::InArray) => self.dispatch_in_array(b),
            Some(StateTag::AfterArrayElem) => self.dispatch_after_array_elem(b),
            Some(StateTag::InObject) => self.dispatch_in_object(b),
            Some(StateTag::AfterKey) => self.dispatch_after_key(b),
            Some(StateTag::AfterColon) => self.dispatch_after_colon(b),
            Some(StateTag::AfterObjectValue) => self.dispatch_after_object_value(b),
            Some(StateTag::InString) => self.dispatch_in_string(b),
            Some(StateTag::InEscape) => self.dispatch_in_escape(b),
            Some(StateTag::InUescape1) => self.dispatch_uescape(b, 1),
            Some(StateTag::InUescape2) => self.dispatch_uescape(b, 2),
            Some(StateTag::InUescape3) => self.dispatch_uescape(b, 3),
            Some(StateTag::InUescape4) => self.dispatch_uescape(b, 4),
            Some(StateTag::InNumberInt) => self.dispatch_number_int(b),
            Some(StateTag::InNumberFrac) => self.dispatch_number_frac(b),
            Some(StateTag::InNumberExpSign) => self.dispatch_number_exp_sign(b),
            Some(StateTag::InNumberExpDigits) => self.dispatch_number_exp_digits(b),
            Some(StateTag::LitT1) => self.dispatch_lit_t1(b),
            Some(StateTag::LitT2) => self.dispatch_lit_t2(b),
            Some(StateTag::LitT3) => self.dispatch_lit_t3(b),
            Some(StateTag::LitF1) => self.dispatch_lit_f1(b),
            Some(StateTag::LitF2) => self.dispatch_lit_f2(b),
            Some(StateTag::LitF3) => self.dispatch_lit_f3(b),
            Some(StateTag::LitF4) => self.dispatch_lit_f4(b),
            Some(StateTag::LitN1) => self.dispatch_lit_n1(b),
            Some(StateTag::LitN2) => self.dispatch_lit_n2(b),
            Some(StateTag::LitN3) => self.dispatch_lit_n3(b),
        }
    }

    fn dispatch_top_value(&mut self, b: u8) -> Result<Step, ParserError> {
        match self.accept_value(b, Some(StateTag::PostValue))? {
            Accept::Whitespace | Accept::Started => Ok(Step::Advance),
            Accept::NotAValue => Err(self.err_invalid(ExpectedClass::Value, b)),
        }
    }

    fn dispatch_post_value(&mut self, b: u8) -> Result<Step, ParserError> {
        if is_whitespace(b) {
            Ok(Step::Advance)
        } else {
            Err(self.err_invalid(ExpectedClass::Whitespace, b))
        }
    }

    fn dispatch_in_array(&mut self, b: u8) -> Result<Step, ParserError> {
        if b == b']' {
            self.stack.pop()?;
            self.emit_plain(JsonEvent::EndArray)?;
            return Ok(Step::Advance);
        }
        match self.accept_value(b, Some(StateTag::AfterArrayElem))? {
            Accept::Whitespace | Accept::Started => Ok(Step::Advance),
            Accept::NotAValue => Err(self.err_invalid(ExpectedClass::ArrayElementOrClose, b)),
        }
    }

    fn dispatch_after_array_elem(&mut self, b: u8) -> Result<Step, ParserError> {
        if is_whitespace(b) {
            return Ok(Step::Advance);
        }
        match b {
            b',' => {
                self.stack.pop()?;
                Ok(Step::Advance)
            }
            b']' => {
                self.stack.pop()?;
                Ok(Step::Retry)
            }
            _ => Err(self.err_invalid(ExpectedClass::ArrayContinuation, b)),
        }
    }

    fn dispatch_in_object(&mut self, b: u8) -> Result<Step, ParserError> {
        if is_whitespace(b) {
            return Ok(Step::Advance);
        }
        match b {
            b'"' => {
                self.stack.push(StateTag::AfterKey)?;
                self.stack.push(StateTag::InString)?;
                self.buf.clear();
                self.emit_plain(JsonEvent::BeginString)?;
                Ok(Step::Advance)
            }
            b'}' => {
                self.stack.pop()?;
                self.emit_plain(JsonEvent::EndObject)?;
                Ok(Step::Advance)
            }
            _ => Err(self.err_invalid(ExpectedClass::ObjectKeyOrClose, b)),
        }
    }

    fn dispatch_after_key(&mut self, b: u8) -> Result<Step, ParserError> {
        if is_whitespace(b) {
            return Ok(Step::Advance);
        }
        if b == b':' {
            self.stack.push(StateTag::AfterColon)?;
            Ok(Step::Advance)
        } else {
            Err(self.err_invalid(ExpectedClass::Colon, b))
        }
    }

    fn dispatch_after_colon(&mut self, b: u8) -> Result<Step, ParserError> {
        match self.accept_value(b, Some(StateTag::AfterObjectValue))? {
            Accept::Whitespace | Accept::Started => Ok(Step::Advance),
            Accept::NotAValue => Err(self.err_invalid(ExpectedClass::Value, b)),
        }
    }

    fn dispatch_after_object_value(&mut self, b: u8) -> Result<Step, ParserError> {
        if is_whitespace(b) {
            return Ok(Step::Advance);
        }
        match b {
            b',' => {
                self.stack.pop()?;
                self.stack.pop()?;
                self.stack.pop()?;
                Ok(Step::Advance)
            }
            b'}' => {
                self.stack.pop()?;
                self.stack.pop()?;
                self.stack.pop()?;
                Ok(Step::Retry)
            }
            _ => Err(self.err_invalid(ExpectedClass::ObjectContinuation, b)),
        }
    }

    fn dispatch_in_string(&mut self, b: u8) -> Result<Step, ParserError> {
        if b < 0x20 {
            return Err(ParserError::EmbeddedControlChar(b, self.num_bytes));
        }
        if b == b'"' {
            if self.high_surrogate.is_some() {
                return Err(ParserError::BadEscape(self.num_bytes));
            }
            self.flush_fragment()?;
            self.emit_plain(JsonEvent::EndString)?;
            self.stack.pop()?;
            return Ok(Step::Advance);
        }
        if b == b'\\' {
            self.stack.push(StateTag::InEscape)?;
            return Ok(Step::Advance);
        }
        if self.high_surrogate.is_some() {
            return Err(ParserError::BadEscape(self.num_bytes));
        }
        if b >= 0x80 && !self.flags.ignore_rfc3629() && is_forbidden_lead_byte(b) {
            return Err(ParserError::BadUtf8LeadByte(b, self.num_bytes));
        }
        self.push_string_byte(b)?;
        Ok(Step::Advance)
    }

    fn dispatch_in_escape(&mut self, b: u8) -> Result<Step, ParserError> {
        if self.high_surrogate.is_some() && b != b'u' {
            return Err(ParserError::BadEscape(self.num_bytes));
        }
        match b {
            b'"' | b'/' | b'\\' => {
                self.push_string_byte(b)?;
                self.stack.pop()?;
                Ok(Step::Advance)
            }
            b'b' => {
                self.push_string_byte(0x08)?;
                self.stack.pop()?;
                Ok(Step::Advance)
            }
            b'f' => {
                self.push_string_byte(0x0c)?;
                self.stack.pop()?;
                Ok(Step::Advance)
            }
            b'n' => {
                self.push_string_byte(b'\n')?;
                self.stack.pop()?;
                Ok(Step::Advance)
            }
            b'r' => {
                self.push_string_byte(b'\r')?;
                self.stack.pop()?;
                Ok(Step::Advance)
            }
            b't' => {
                self.push_string_byte(b'\t')?;
                self.stack.pop()?;
                Ok(Step::Advance)
            }
            b'u' => {
                self.stack.pop()?;
                self.stack.push(StateTag::InUescape1)?;
                self.hex_accum = 0;
                Ok(Step::Advance)
            }
            _ => Err(ParserError::BadEscape(self.num_bytes)),
        }
    }

    /// `digit` is 1..=4, the position of the hex digit within `\uXXXX`.
    fn dispatch_uescape(&mut self, b: u8, digit: u8) -> Result<Step, ParserError> {
        let Some(value) = hex_value(b) else {
            return Err(self.err_invalid(ExpectedClass::HexDigit, b));
        };
        if digit == 1 {
            // Force a flush so the decoded multi-byte sequence below can
            // never straddle a fragment boundary.
            self.flush_fragment()?;
            self.hex_accum = 0;
        }
        self.hex_accum = (self.hex_accum << 4) | u32::from(value);
        match digit {
            1 => {
                self.stack.swap_top(StateTag::InUescape2)?;
                Ok(Step::Advance)
            }
            2 => {
                self.stack.swap_top(StateTag::InUescape3)?;
                Ok(Step::Advance)
            }
            3 => {
                self.stack.swap_top(StateTag::InUescape4)?;
                Ok(Step::Advance)
            }
            _ => {
                self.finish_uescape()?;
                self.stack.pop()?;
                Ok(Step::Advance)
            }
        }
    }

    fn finish_uescape(&mut self) -> Result<(), ParserError> {
        let cp = self.hex_accum;
        if is_high_surrogate(cp) {
            if self.high_surrogate.is_some() {
                return Err(ParserError::BadEscape(self.num_bytes));
            }
            self.high_surrogate = Some(cp);
            return Ok(());
        }
        if is_low_surrogate(cp) {
            let Some(high) = self.high_surrogate.take() else {
                return Err(ParserError::BadEscape(self.num_bytes));
            };
            let combined = join_surrogates(high, cp);
            let mut tmp = [0u8; 4];
            let n = encode_utf8(combined, &mut tmp);
            return self.push_string_bytes(&tmp[..n]);
        }
        if self.high_surrogate.take().is_some() {
            return Err(ParserError::BadEscape(self.num_bytes));
        }
        let mut tmp = [0u8; 4];
        let n = encode_utf8(cp, &mut tmp);
        self.push_string_bytes(&tmp[..n])
    }

    fn dispatch_number_int(&mut self, b: u8) -> Result<Step, ParserError> {
        match b {
            b'0'..=b'9' => {
                self.buf.push_number_byte(b)?;
                Ok(Step::Advance)
            }
            b'.' => {
                self.stack.swap_top(StateTag::InNumberFrac)?;
                self.buf.push_number_byte(b)?;
                Ok(Step::Advance)
            }
            b'e' | b'E' => {
                self.stack.swap_top(StateTag::InNumberExpSign)?;
                self.buf.push_number_byte(b'e')?;
                Ok(Step::Advance)
            }
            _ if is_terminator(b) => {
                self.emit_integer()?;
                self.stack.pop()?;
                Ok(Step::Retry)
            }
            _ => Err(self.err_invalid(
                ExpectedClass::Other("a digit, '.', 'e'/'E', or a terminator"),
                b,
            )),
        }
    }

    fn dispatch_number_frac(&mut self, b: u8) -> Result<Step, ParserError> {
        match b {
            b'0'..=b'9' => {
                self.buf.push_number_byte(b)?;
                Ok(Step::Advance)
            }
            b'e' | b'E' => {
                self.stack.swap_top(StateTag::InNumberExpSign)?;
                self.buf.push_number_byte(b'e')?;
                Ok(Step::Advance)
            }
            _ if is_terminator(b) => {
                self.emit_float()?;
                self.stack.pop()?;
                Ok(Step::Retry)
            }
            _ => Err(self.err_invalid(ExpectedClass::Other("a digit, 'e'/'E', or a terminator"), b)),
        }
    }

    fn dispatch_number_exp_sign(&mut self, b: u8) -> Result<Step, ParserError> {
        match b {
            b'0'..=b'9' | b'+' | b'-' => {
                self.stack.swap_top(StateTag::InNumberExpDigits)?;
                self.buf.push_number_byte(b)?;
                Ok(Step::Advance)
            }
            _ => Err(self.err_invalid(ExpectedClass::Other("a digit, '+', or '-'"), b)),
        }
    }

    fn dispatch_number_exp_digits(&mut self, b: u8) -> Result<Step, ParserError> {
        match b {
            b'0'..=b'9' => {
                self.buf.push_number_byte(b)?;
                Ok(Step::Advance)
            }
            _ if is_terminator(b) => {
                self.emit_float()?;
                self.stack.pop()?;
                Ok(Step::Retry)
            }
            _ => Err(self.err_invalid(ExpectedClass::Other("a digit or a terminator"), b)),
        }
    }

    fn dispatch_lit_t1(&mut self, b: u8) -> Result<Step, ParserError> {
        if b == b'r' {
            self.stack.push(StateTag::LitT2)?;
            Ok(Step::Advance)
        } else {
            Err(self.err_invalid(ExpectedClass::ExactChar('r'), b))
        }
    }

    fn dispatch_lit_t2(&mut self, b: u8) -> Result<Step, ParserError> {
        if b == b'u' {
            self.stack.push(StateTag::LitT3)?;
            Ok(Step::Advance)
        } else {
            Err(self.err_invalid(ExpectedClass::ExactChar('u'), b))
        }
    }

    fn dispatch_lit_t3(&mut self, b: u8) -> Result<Step, ParserError> {
        if b == b'e' {
            self.stack.pop()?;
            self.stack.pop()?;
            self.stack.pop()?;
            self.emit_plain(JsonEvent::True)?;
            Ok(Step::Advance)
        } else {
            Err(self.err_invalid(ExpectedClass::ExactChar('e'), b))
        }
    }

    fn dispatch_lit_f1(&mut self, b: u8) -> Result<Step, ParserError> {
        if b == b'a' {
            self.stack.push(StateTag::LitF2)?;
            Ok(Step::Advance)
        } else {
            Err(self.err_invalid(ExpectedClass::ExactChar('a'), b))
        }
    }

    fn dispatch_lit_f2(&mut self, b: u8) -> Result<Step, ParserError> {
        if b == b'l' {
            self.stack.push(StateTag::LitF3)?;
            Ok(Step::Advance)
        } else {
            Err(self.err_invalid(ExpectedClass::ExactChar('l'), b))
        }
    }

    fn dispatch_lit_f3(&mut self, b: u8) -> Result<Step, ParserError> {
        if b == b's' {
            self.stack.push(StateTag::LitF4)?;
            Ok(Step::Advance)
        } else {
            Err(self.err_invalid(ExpectedClass::ExactChar('s'), b))
        }
    }

    fn dispatch_lit_f4(&mut self, b: u8) -> Result<Step, ParserError> {
        if b == b'e' {
            self.stack.pop()?;
            self.stack.pop()?;
            self.stack.pop()?;
            self.stack.pop()?;
            self.emit_plain(JsonEvent::False)?;
            Ok(Step::Advance)
        } else {
            Err(self.err_invalid(ExpectedClass::ExactChar('e'), b))
        }
    }

    fn dispatch_lit_n1(&mut self, b: u8) -> Result<Step, ParserError> {
        if b == b'u' {
            self.stack.push(StateTag::LitN2)?;
            Ok(Step::Advance)
        } else {
            Err(self.err_invalid(ExpectedClass::ExactChar('u'), b))
        }
    }

    fn dispatch_lit_n2(&mut self, b: u8) -> Result<Step, ParserError> {
        if b == b'l' {
            self.stack.push(StateTag::LitN3)?;
            Ok(Step::Advance)
        } else {
            Err(self.err_invalid(ExpectedClass::ExactChar('l'), b))
        }
    }

    fn dispatch_lit_n3(&mut self, b: u8) -> Result<Step, ParserError> {
        if b == b'l' {
            self.stack.pop()?;
            self.stack.pop()?;
            self.stack.pop()?;
            self.emit_plain(JsonEvent::Null)?;
            Ok(Step::Advance)
        } else {
            Err(self.err_invalid(ExpectedClass::ExactChar('l'), b))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::{CollectingSink, OwnedEvent};

    fn run(json: &[u8]) -> Vec<OwnedEvent> {
        let mut parser: JsonParser<CollectingSink> = JsonParser::new(CollectingSink::new());
        parser.push(json).unwrap();
        parser.finalise().unwrap();
        parser.sink.events
    }

    #[test]
    fn simple_array_of_integers() {
        let events = run(b"[1,2,3]");
        assert_eq!(
            events,
            vec![
                OwnedEvent::BeginArray,
                OwnedEvent::Integer(b"1".to_vec()),
                OwnedEvent::Integer(b"2".to_vec()),
                OwnedEvent::Integer(b"3".to_vec()),
                OwnedEvent::EndArray,
            ]
        );
    }

    #[test]
    fn simple_object_with_bool() {
        let events = run(br#"{"a":true}"#);
        assert_eq!(
            events,
            vec![
                OwnedEvent::BeginObject,
                OwnedEvent::BeginString,
                OwnedEvent::StringFragment(b"a".to_vec()),
                OwnedEvent::EndString,
                OwnedEvent::True,
                OwnedEvent::EndObject,
            ]
        );
    }

    #[test]
    fn num_bytes_tracks_consumed_input() {
        let mut parser: JsonParser<CollectingSink> = JsonParser::new(CollectingSink::new());
        parser.push(b"[1,2,3]").unwrap();
        assert_eq!(parser.num_bytes(), 7);
        parser.finalise().unwrap();
    }

    #[test]
    fn chunked_string_reassembles() {
        let mut parser: JsonParser<CollectingSink> = JsonParser::new(CollectingSink::new());
        parser.push(br#""hel"#).unwrap();
        parser.push(br#"lo""#).unwrap();
        parser.finalise().unwrap();
        let s: Vec<u8> = parser
            .sink
            .events
            .iter()
            .filter_map(|e| match e {
                OwnedEvent::StringFragment(b) => Some(b.clone()),
                _ => None,
            })
            .flatten()
            .collect();
        assert_eq!(s, b"hello");
    }

    #[test]
    fn unicode_escape_decodes_to_utf8() {
        let events = run(br#""\u00e9""#);
        assert_eq!(
            events,
            vec![
                OwnedEvent::BeginString,
                OwnedEvent::StringFragment(vec![0xC3, 0xA9]),
                OwnedEvent::EndString,
            ]
        );
    }

    #[test]
    fn float_with_exponent() {
        let events = run(b"123.45e-6");
        assert_eq!(events, vec![OwnedEvent::Float(b"123.45e-6".to_vec())]);
    }

    #[test]
    fn stack_overflow_on_deep_nesting() {
        let json = "[".repeat(1025);
        let mut parser: JsonParser<CollectingSink, 1024, 128> =
            JsonParser::new(CollectingSink::new());
        assert_eq!(parser.push(json.as_bytes()), Err(ParserError::StackOverflow));
    }

    #[test]
    fn number_too_big_with_small_buffer() {
        let digits = "1".repeat(200);
        let mut parser: JsonParser<CollectingSink, 1024, 128> =
            JsonParser::new(CollectingSink::new());
        assert_eq!(parser.push(digits.as_bytes()), Err(ParserError::NumberTooBig));
    }

    #[test]
    fn finalise_on_empty_stream_is_stack_too_small() {
        let mut parser: JsonParser<CollectingSink> = JsonParser::new(CollectingSink::new());
        assert_eq!(parser.finalise(), Err(ParserError::StackTooSmall));
    }

    #[test]
    fn finalise_mid_array_is_stack_too_big() {
        let mut parser: JsonParser<CollectingSink> = JsonParser::new(CollectingSink::new());
        parser.push(b"[1,").unwrap();
        assert_eq!(parser.finalise(), Err(ParserError::StackTooBig));
    }

    #[test]
    fn finalise_flushes_bare_trailing_number() {
        let mut parser: JsonParser<CollectingSink> = JsonParser::new(CollectingSink::new());
        parser.push(b"42").unwrap();
        parser.finalise().unwrap();
        assert_eq!(
            parser.sink.events,
            vec![OwnedEvent::Integer(b"42".to_vec())]
        );
    }

    #[test]
    fn embedded_control_char_is_rejected() {
        let mut parser: JsonParser<CollectingSink> = JsonParser::new(CollectingSink::new());
        let result = parser.push(b"\"a\nb\"");
        assert!(matches!(result, Err(ParserError::EmbeddedControlChar(0x0a, _))));
    }

    #[test]
    fn invalid_literal_prefix_is_rejected() {
        let mut parser: JsonParser<CollectingSink> = JsonParser::new(CollectingSink::new());
        let result = parser.push(b"trux");
        assert!(matches!(result, Err(ParserError::InvalidToken { .. })));
    }

    #[test]
    fn surrogate_pair_joins_into_one_codepoint() {
        let events = run(br#""\ud83d\ude00""#);
        assert_eq!(
            events,
            vec![
                OwnedEvent::BeginString,
                OwnedEvent::StringFragment("\u{1F600}".as_bytes().to_vec()),
                OwnedEvent::EndString,
            ]
        );
    }

    #[test]
    fn lone_high_surrogate_is_bad_escape() {
        let mut parser: JsonParser<CollectingSink> = JsonParser::new(CollectingSink::new());
        let result = parser.push(br#""\ud83d""#);
        assert!(matches!(result, Err(ParserError::BadEscape(_))));
    }

    #[test]
    fn ignore_rfc3629_flag_allows_invalid_lead_byte() {
        let flags = crate::options::ParserFlagsBuilder::default()
            .with_ignore_rfc3629(true)
            .build();
        let mut parser: JsonParser<CollectingSink> =
            JsonParser::with_flags(CollectingSink::new(), flags);
        parser.push(&[b'"', 0xC0, b'"']).unwrap();
        parser.finalise().unwrap();
    }

    #[test]
    fn rejects_invalid_lead_byte_by_default() {
        let mut parser: JsonParser<CollectingSink> = JsonParser::new(CollectingSink::new());
        let result = parser.push(&[b'"', 0xC0]);
        assert!(matches!(result, Err(ParserError::BadUtf8LeadByte(0xC0, _))));
    }

    #[test]
    fn callback_stop_aborts_push() {
        use crate::sink::Control;
        let mut parser: JsonParser<_> = JsonParser::new(|_event: JsonEvent<'_>| Control::Stop);
        let result = parser.push(b"[1]");
        assert_eq!(result, Err(ParserError::CallbackStop));
    }

    #[test]
    fn terminal_error_is_sticky() {
        let mut parser: JsonParser<CollectingSink> = JsonParser::new(CollectingSink::new());
        let first = parser.push(b"@");
        let second = parser.push(b"1");
        assert_eq!(first, second);
    }
}
