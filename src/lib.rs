//! A small zero-copy JSON reader for API response bodies.
//!
//! A document is parsed into a [JsonValue] tree whose strings and object keys borrow
//! from the input buffer. Objects are stored in a [RadixMap], a prefix-compressed trie,
//! and arrays in a [DynamicArray].
//!
//! ```
//! let body = br#"{"current":{"temp_f":72.5,"condition":{"text":"Sunny"}}}"#;
//! let doc = radix_json::parse(body).unwrap();
//!
//! let text = doc.get_path(&["current", "condition", "text"]).unwrap();
//! assert_eq!(text.as_str(), Some("Sunny"));
//! assert_eq!(doc.get_path(&["current", "temp_f"]).unwrap().as_f64(), Some(72.5));
//! ```
mod array;
mod config;
mod data;
pub mod display;
mod errors;
mod map;
mod parser;
pub mod response;
mod scanner;

pub use array::DynamicArray;
pub use config::{ParseOptions, DEFAULT_MAX_DEPTH, DEFAULT_MAX_INPUT_LEN};
pub use data::{JsonStr, JsonValue, Position};
pub use errors::{AllocError, ErrorKind, ParseError};
pub use map::RadixMap;

/// Parses a document into a [JsonValue], or returns a [ParseError].
///
/// The document must be a single object. It ends at the first NUL byte or at the end of
/// the buffer, whichever comes first.
pub fn parse<S: AsRef<[u8]> + ?Sized>(source: &S) -> Result<JsonValue<'_>, ParseError> {
    parse_with(source, &ParseOptions::default())
}

/// Like [parse], with explicit limits.
pub fn parse_with<'a, S: AsRef<[u8]> + ?Sized>(
    source: &'a S,
    options: &ParseOptions,
) -> Result<JsonValue<'a>, ParseError> {
    let source = source.as_ref();
    let result = parser::JsonParser::new(source, options).parse();

    match &result {
        Ok(_) => tracing::trace!(len = source.len(), "parsed document"),
        Err(e) => tracing::debug!(
            kind = %e.kind,
            line = e.line,
            column = e.column,
            msg = %e.msg,
            "failed to parse document"
        ),
    }
    result
}
