use crate::event::JsonEvent;

/// Whether the parser should keep going after a sink call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    /// Keep feeding bytes and emitting events.
    Continue,

    /// Abort the current push-call with
    /// [`ParserError::CallbackStop`](crate::ParserError::CallbackStop).
    Stop,
}

/// A capability that receives one [`JsonEvent`] at a time.
///
/// The parser calls [`event`](Self::event) synchronously, inline, from
/// within [`JsonParser::push`](crate::JsonParser::push). A sink must not
/// call back into the same parser instance; it may inspect whatever state
/// it closes over.
pub trait EventSink {
    fn event(&mut self, event: JsonEvent<'_>) -> Control;
}

impl<F> EventSink for F
where
    F: FnMut(JsonEvent<'_>) -> Control,
{
    fn event(&mut self, event: JsonEvent<'_>) -> Control {
        self(event)
    }
}

/// A sink that collects every event into a `Vec`, owning its payload slices
/// as `Vec<u8>`. Convenient for tests and for small documents; not
/// allocation-free, so production use should prefer a custom
/// [`EventSink`].
#[derive(Debug, Default)]
pub struct CollectingSink {
    pub events: Vec<OwnedEvent>,
}

/// An owned copy of a [`JsonEvent`], for sinks (like [`CollectingSink`])
/// that must outlive the borrow the parser hands to [`EventSink::event`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OwnedEvent {
    BeginObject,
    EndObject,
    BeginArray,
    EndArray,
    BeginString,
    StringFragment(Vec<u8>),
    EndString,
    Integer(Vec<u8>),
    Float(Vec<u8>),
    True,
    False,
    Null,
}

impl From<JsonEvent<'_>> for OwnedEvent {
    fn from(e: JsonEvent<'_>) -> Self {
        match e {
            JsonEvent::BeginObject => OwnedEvent::BeginObject,
            JsonEvent::EndObject => OwnedEvent::EndObject,
            JsonEvent::BeginArray => OwnedEvent::BeginArray,
            JsonEvent::EndArray => OwnedEvent::EndArray,
            JsonEvent::BeginString => OwnedEvent::BeginString,
            JsonEvent::StringFragment(s) => OwnedEvent::StringFragment(s.to_vec()),
            JsonEvent::EndString => OwnedEvent::EndString,
            JsonEvent::Integer(s) => OwnedEvent::Integer(s.to_vec()),
            JsonEvent::Float(s) => OwnedEvent::Float(s.to_vec()),
            JsonEvent::True => OwnedEvent::True,
            JsonEvent::False => OwnedEvent::False,
            JsonEvent::Null => OwnedEvent::Null,
        }
    }
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }
}

impl EventSink for CollectingSink {
    fn event(&mut self, event: JsonEvent<'_>) -> Control {
        self.events.push(event.into());
        Control::Continue
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closure_sink_works() {
        let mut seen = Vec::new();
        let mut sink = |e: JsonEvent<'_>| {
            seen.push(OwnedEvent::from(e));
            Control::Continue
        };
        assert_eq!(sink.event(JsonEvent::True), Control::Continue);
        assert_eq!(seen, vec![OwnedEvent::True]);
    }

    #[test]
    fn collecting_sink_copies_fragments() {
        let mut sink = CollectingSink::new();
        sink.event(JsonEvent::StringFragment(b"hi"));
        assert_eq!(
            sink.events,
            vec![OwnedEvent::StringFragment(b"hi".to_vec())]
        );
    }
}
