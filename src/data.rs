/* Data models */

use crate::array::DynamicArray;
use crate::map::RadixMap;
use std::fmt;
use std::str;

/// A parsed JSON value. Strings and object keys borrow from the parsed buffer.
#[derive(Debug, Clone, PartialEq)]
pub enum JsonValue<'a> {
    Null,
    Boolean(bool),
    Number(f64),
    String(JsonStr<'a>),
    Array(DynamicArray<JsonValue<'a>>),
    Object(RadixMap<'a, JsonValue<'a>>),
}

/// The raw source bytes of a string, without the surrounding quotes.
///
/// Escape sequences are validated during parsing but kept as they appear in the source,
/// so `"a\n"` is seen here as the three bytes `a`, `\` and `n`, and its length is 3.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct JsonStr<'a> {
    raw: &'a [u8],
}

/// Location of a byte in the source. Line is 1-based, column and offset are 0-based,
/// and columns are counted in bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub line: usize,
    pub column: usize,
    pub offset: usize,
}

impl<'a> JsonValue<'a> {
    /// Looks up `key` in an object. Any other kind of value has no keys.
    pub fn get(&self, key: impl AsRef<[u8]>) -> Option<&JsonValue<'a>> {
        match self {
            JsonValue::Object(map) => map.get(key.as_ref()),
            _ => None,
        }
    }

    /// Follows a chain of object keys, e.g. `["current", "condition", "text"]`.
    pub fn get_path<K: AsRef<[u8]>>(&self, path: &[K]) -> Option<&JsonValue<'a>> {
        path.iter().try_fold(self, |value, key| value.get(key))
    }

    /// Element `index` of an array.
    pub fn index(&self, index: usize) -> Option<&JsonValue<'a>> {
        match self {
            JsonValue::Array(array) => array.get(index),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            JsonValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            JsonValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_json_str(&self) -> Option<JsonStr<'a>> {
        match self {
            JsonValue::String(s) => Some(*s),
            _ => None,
        }
    }

    /// The raw contents of a string value, if they are valid UTF-8.
    pub fn as_str(&self) -> Option<&'a str> {
        self.as_json_str()?.as_str()
    }

    pub fn as_array(&self) -> Option<&DynamicArray<JsonValue<'a>>> {
        match self {
            JsonValue::Array(array) => Some(array),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&RadixMap<'a, JsonValue<'a>>> {
        match self {
            JsonValue::Object(map) => Some(map),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, JsonValue::Null)
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            JsonValue::Null => "null",
            JsonValue::Boolean(_) => "boolean",
            JsonValue::Number(_) => "number",
            JsonValue::String(_) => "string",
            JsonValue::Array(_) => "array",
            JsonValue::Object(_) => "object",
        }
    }
}

impl<'a> JsonStr<'a> {
    pub(crate) fn new(raw: &'a [u8]) -> Self {
        Self { raw }
    }

    pub fn as_bytes(&self) -> &'a [u8] {
        self.raw
    }

    pub fn as_str(&self) -> Option<&'a str> {
        str::from_utf8(self.raw).ok()
    }

    /// Length in source bytes, counting every byte of an escape sequence.
    pub fn len(&self) -> usize {
        self.raw.len()
    }

    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }
}

impl fmt::Debug for JsonStr<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", String::from_utf8_lossy(self.raw))
    }
}

impl fmt::Display for JsonStr<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&String::from_utf8_lossy(self.raw))
    }
}

impl PartialEq<str> for JsonStr<'_> {
    fn eq(&self, other: &str) -> bool {
        self.raw == other.as_bytes()
    }
}

impl PartialEq<&str> for JsonStr<'_> {
    fn eq(&self, other: &&str) -> bool {
        self.raw == other.as_bytes()
    }
}

impl Default for Position {
    fn default() -> Self {
        Self {
            line: 1,
            column: 0,
            offset: 0,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}
