use crate::array::DynamicArray;
use crate::config::ParseOptions;
use crate::data::{JsonValue, Position};
use crate::errors::{ErrorKind, ParseError};
use crate::map::RadixMap;
use crate::scanner::{describe, Scanner};

/// Recursive-descent parser over a single document. The root must be an object.
pub struct JsonParser<'a> {
    scanner: Scanner<'a>,
    max_input_len: usize,
}

impl<'a> JsonParser<'a> {
    pub fn new(source: &'a [u8], options: &ParseOptions) -> Self {
        Self {
            scanner: Scanner::new(source, options.max_depth),
            max_input_len: options.max_input_len,
        }
    }

    pub fn parse(mut self) -> Result<JsonValue<'a>, ParseError> {
        /* The document is exactly one object, starting at the first byte and followed by
         * nothing but the end of the buffer. */
        if self.scanner.len() > self.max_input_len {
            let msg = format!(
                "The input is {} bytes long, the limit is {}",
                self.scanner.len(),
                self.max_input_len
            );
            return Err(ParseError::new(ErrorKind::InputTooLarge, msg, Position::default()));
        }

        let root = self.parse_object()?;
        self.scanner.expect_end()?;
        Ok(root)
    }

    fn parse_value(&mut self) -> Result<JsonValue<'a>, ParseError> {
        self.scanner.skip_whitespace();
        let value = match self.scanner.peek() {
            b'{' => self.parse_object()?,
            b'[' => self.parse_array()?,
            b'"' => JsonValue::String(self.scanner.scan_string()?),
            b'-' | b'0'..=b'9' => JsonValue::Number(self.scanner.scan_number()?),
            b't' => {
                self.scanner.scan_literal("true")?;
                JsonValue::Boolean(true)
            }
            b'f' => {
                self.scanner.scan_literal("false")?;
                JsonValue::Boolean(false)
            }
            b'n' => {
                self.scanner.scan_literal("null")?;
                JsonValue::Null
            }
            x if x.is_ascii_alphabetic() => return self.scanner.unknown_keyword(),
            x => {
                let msg = format!("Expected a value, found {}", describe(x));
                return self.scanner.make_error_here(msg);
            }
        };
        self.scanner.skip_whitespace();
        Ok(value)
    }

    fn parse_object(&mut self) -> Result<JsonValue<'a>, ParseError> {
        self.scanner.expect(b'{', "to open an object")?;
        self.scanner.enter()?;
        let mut map = RadixMap::new();

        self.scanner.skip_whitespace();
        if !self.scanner.matches(b'}') {
            loop {
                self.scanner.skip_whitespace();
                let key = self.scanner.scan_string()?;
                self.scanner.skip_whitespace();
                self.scanner.expect(b':', "after an object key")?;
                let value = self.parse_value()?;

                // Keys borrow from the source, so they outlive the map
                if map.insert(key.as_bytes(), value).is_err() {
                    return self.scanner.make_alloc_error();
                }

                if !self.scanner.matches(b',') {
                    self.scanner.expect(b'}', "or ',' after an object member")?;
                    break;
                }
            }
        }

        self.scanner.leave();
        Ok(JsonValue::Object(map))
    }

    fn parse_array(&mut self) -> Result<JsonValue<'a>, ParseError> {
        self.scanner.expect(b'[', "to open an array")?;
        self.scanner.enter()?;
        let mut array = DynamicArray::new();

        self.scanner.skip_whitespace();
        if !self.scanner.matches(b']') {
            loop {
                let value = self.parse_value()?;
                if array.append(value).is_err() {
                    return self.scanner.make_alloc_error();
                }

                if !self.scanner.matches(b',') {
                    self.scanner.expect(b']', "or ',' after an array element")?;
                    break;
                }
            }
        }

        self.scanner.leave();
        Ok(JsonValue::Array(array))
    }
}
