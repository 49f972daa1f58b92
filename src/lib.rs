//! # jflow
//!
//! A streaming, push-based, allocation-free JSON event tokenizer.
//!
//! Unlike a DOM parser, `jflow` never builds a tree: it walks a byte
//! stream one chunk at a time and emits a flat sequence of structural and
//! string events to an [`EventSink`] as it goes. Chunk boundaries are
//! invisible to the event sequence -- splitting the same document
//! differently across [`push`](JsonParser::push) calls always produces the
//! same events.
//!
//! ## Example
//!
//! ```
//! use jflow::{JsonParser, JsonEvent, CollectingSink};
//!
//! let json = br#"{"name": "Elvis"}"#;
//!
//! let mut parser: JsonParser<CollectingSink> = JsonParser::new(CollectingSink::new());
//! parser.push(json).unwrap();
//! parser.finalise().unwrap();
//!
//! for event in &parser.sink().events {
//!     // do something useful with `event`
//! }
//! ```
//!
//! ## Chunked input
//!
//! Bytes may arrive in arbitrarily small pieces, e.g. from a socket:
//!
//! ```
//! use jflow::{JsonParser, Control, JsonEvent};
//!
//! let mut seen_name = false;
//! let mut parser: JsonParser<_> = JsonParser::new(|event: JsonEvent<'_>| {
//!     if let JsonEvent::StringFragment(_) = event {
//!         seen_name = true;
//!     }
//!     Control::Continue
//! });
//!
//! for chunk in [br#"{"na"#.as_slice(), br#"me": "#.as_slice(), br#""Elvis"}"#.as_slice()] {
//!     parser.push(chunk).unwrap();
//! }
//! parser.finalise().unwrap();
//! assert!(seen_name);
//! ```
//!
//! ## Numeric interpretation
//!
//! The core tokenizer never interprets number literals -- it hands back
//! the verbatim bytes via [`JsonEvent::Integer`]/[`JsonEvent::Float`].
//! Callers who need an actual `i64` or `f64` can reach for
//! [`numeric::parse_integer`]/[`numeric::parse_float`].

mod buffer;
mod error;
mod event;
mod options;
mod parser;
mod sink;
mod stack;
mod unicode;

pub mod numeric;

pub use error::{ExpectedClass, ParserError};
pub use event::JsonEvent;
pub use options::{ParserFlags, ParserFlagsBuilder};
pub use parser::JsonParser;
pub use sink::{CollectingSink, Control, EventSink, OwnedEvent};
