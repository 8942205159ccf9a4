use crate::data::{JsonStr, Position};
use crate::errors::{ErrorKind, ParseError};

/// Parsing state for a single document: the cursor and everything needed to report where
/// it is. Each parse owns its own scanner, so independent buffers can be parsed at the
/// same time.
pub struct Scanner<'a> {
    // The document up to (excluding) the first NUL byte. Running off the end of this slice
    // reads as a NUL, which no production ever expects.
    source: &'a [u8],
    // Byte index of the next unread byte.
    current: usize,
    // Where the token currently being scanned started, used for errors that point at the
    // whole token rather than at the byte that broke it.
    start_position: Position,
    // User-facing position of `current`, and of the byte before it. Keeping the previous one
    // around is simpler than walking backwards over a line break.
    position: Position,
    prev_position: Position,
    depth: usize,
    max_depth: usize,
}

impl<'a> Scanner<'a> {
    pub fn new(source: &'a [u8], max_depth: usize) -> Self {
        let end = source.iter().position(|&b| b == 0).unwrap_or(source.len());
        Self {
            source: &source[..end],
            current: 0,
            start_position: Position::default(),
            position: Position::default(),
            prev_position: Position::default(),
            depth: 0,
            max_depth,
        }
    }

    pub fn len(&self) -> usize {
        self.source.len()
    }

    ///////////////////////////////////////////////////////////////////////////////////////////////////////////
    // String scanning

    pub fn scan_string(&mut self) -> Result<JsonStr<'a>, ParseError> {
        /* Scans a quoted string and returns a view of the bytes between the quotes.
         * Escape sequences are checked but left as they are. */
        self.begin_token();
        if !self.matches(b'"') {
            let msg = format!("Expected a string, found {}", describe(self.peek()));
            return self.make_error_here(msg);
        }
        let contents_start = self.current;

        loop {
            if self.is_at_end() {
                return self.make_error_at_start("Unterminated string");
            }

            match self.consume() {
                b'"' => break,
                b'\\' => self.scan_escape()?,
                x if x < 0x20 => return self.make_error_behind(string_error_msg(x)),
                _ => {}
            }
        }

        Ok(JsonStr::new(&self.source[contents_start..self.current - 1]))
    }

    fn scan_escape(&mut self) -> Result<(), ParseError> {
        match self.consume() {
            b'"' | b'\\' | b'/' | b'b' | b'f' | b'n' | b'r' | b't' => Ok(()),
            b'u' => self.scan_unicode_escape(),
            0 => self.make_error_at_start("Unterminated string"),
            x => {
                let msg = if x == b' ' {
                    "A lone \\ is not allowed inside a string (hint: you can escape it with \\\\)"
                        .into()
                } else {
                    format!("Invalid escape sequence: \\{}", x.escape_ascii())
                };
                self.make_error_behind(msg)
            }
        }
    }

    fn scan_unicode_escape(&mut self) -> Result<(), ParseError> {
        /* The \u prefix has been consumed, exactly four hex digits must follow.
         * The code point is not decoded. */
        let end = (self.current + 4).min(self.source.len());
        let seq = &self.source[self.current..end];

        if seq.len() < 4 || !seq.iter().all(u8::is_ascii_hexdigit) {
            return self.make_error_here(format!(
                "Invalid Unicode escape sequence: '{}' (should be a 4-character hex code)",
                seq.escape_ascii()
            ));
        }

        for _ in 0..4 {
            self.advance();
        }
        Ok(())
    }

    ///////////////////////////////////////////////////////////////////////////////////////////////////////////
    // Number scanning

    pub fn scan_number(&mut self) -> Result<f64, ParseError> {
        /* Scans and evaluates a number as sign * (integer + fraction) * 10^exponent.
         * The fraction is accumulated one digit at a time, so long fractions may pick up
         * some floating point rounding. */
        self.begin_token();
        let sign = if self.matches(b'-') { -1.0 } else { 1.0 };
        let integer = self.scan_integer()?;
        let fraction = self.scan_fraction()?;
        let exponent = self.scan_exponent()?;

        let mantissa = integer + fraction;
        if mantissa == 0.0 {
            // Keeps 0e+999999 at zero instead of 0 * inf
            return Ok(sign * 0.0);
        }
        Ok(sign * mantissa * 10f64.powi(exponent))
    }

    fn scan_integer(&mut self) -> Result<f64, ParseError> {
        /* Either a single 0, or a non-zero digit followed by any number of digits.
         * A digit right after a leading 0 is not part of the number. */
        match self.peek() {
            b'0' => {
                self.advance();
                Ok(0.0)
            }
            b'1'..=b'9' => {
                let mut integer = 0.0;
                while let Some(digit) = self.peek_digit() {
                    integer = integer * 10.0 + f64::from(digit);
                    self.advance();
                }
                Ok(integer)
            }
            x => {
                let msg = if self.current > 0 && self.source[self.current - 1] == b'-' {
                    "At least a digit is expected after '-'".to_string()
                } else {
                    format!("Expected a digit, found {}", describe(x))
                };
                self.make_error_here(msg)
            }
        }
    }

    fn scan_fraction(&mut self) -> Result<f64, ParseError> {
        /* Scans an optional fraction part, consisting of a dot and at least one digit. */
        let mut fraction = 0.0;
        if self.matches(b'.') {
            if self.peek_digit().is_none() {
                return self.make_error_here("At least a digit is expected after a fraction dot");
            }
            let mut divisor = 10.0;
            while let Some(digit) = self.peek_digit() {
                fraction += f64::from(digit) / divisor;
                divisor *= 10.0;
                self.advance();
            }
        }

        Ok(fraction)
    }

    fn scan_exponent(&mut self) -> Result<i32, ParseError> {
        /* Scans an optional exponent part, consisting of 'e|E', a mandatory sign,
         * and at least one digit. */
        if !matches!(self.peek(), b'e' | b'E') {
            return Ok(0);
        }
        self.advance();

        let sign = match self.peek() {
            b'+' => 1,
            b'-' => -1,
            _ => {
                return self.make_error_here(
                    "An exponent must start with an explicit sign (hint: write e+N or e-N)",
                )
            }
        };
        self.advance();

        if self.peek_digit().is_none() {
            return self.make_error_here("At least a digit is expected after an exponent");
        }
        let mut exponent: i32 = 0;
        while let Some(digit) = self.peek_digit() {
            exponent = exponent.saturating_mul(10).saturating_add(i32::from(digit));
            self.advance();
        }

        Ok(sign * exponent)
    }

    ///////////////////////////////////////////////////////////////////////////////////////////////////////////
    // Other

    pub fn scan_literal(&mut self, word: &str) -> Result<(), ParseError> {
        /* Matches `word` by looking ahead first, so a mismatch leaves the cursor untouched
         * and the error points at the first letter. */
        if self.source[self.current..].starts_with(word.as_bytes()) {
            for _ in 0..word.len() {
                self.advance();
            }
            return Ok(());
        }
        self.unknown_keyword()
    }

    pub fn unknown_keyword<T>(&self) -> Result<T, ParseError> {
        /* Reports the run of letters at the cursor as a keyword that isn't one */
        let rest = &self.source[self.current..];
        let letters = rest.iter().take_while(|b| b.is_ascii_alphabetic()).count();
        let found = String::from_utf8_lossy(&rest[..letters]);
        let hint = match found.to_lowercase().as_str() {
            "true" => " (hint: maybe you meant 'true')",
            "false" => " (hint: maybe you meant 'false')",
            "null" => " (hint: maybe you meant 'null')",
            _ => "",
        };
        self.make_error_here(format!("Unknown keyword '{found}'{hint}"))
    }

    pub fn expect(&mut self, expected: u8, context: &str) -> Result<(), ParseError> {
        if self.matches(expected) {
            return Ok(());
        }
        let msg = format!(
            "Expected '{}' {context}, found {}",
            expected as char,
            describe(self.peek())
        );
        self.make_error_here(msg)
    }

    pub fn expect_end(&mut self) -> Result<(), ParseError> {
        if self.is_at_end() {
            return Ok(());
        }
        let msg = format!(
            "Unexpected {} after the end of the document",
            describe(self.peek())
        );
        self.make_error_here(msg)
    }

    pub fn enter(&mut self) -> Result<(), ParseError> {
        /* Called when an object or array opens. Fails once the nesting limit is exceeded. */
        self.depth += 1;
        if self.depth > self.max_depth {
            let msg = format!("Nesting is deeper than the limit of {}", self.max_depth);
            return self.make_error_at(ErrorKind::DepthLimitExceeded, msg, self.prev_position);
        }
        Ok(())
    }

    pub fn leave(&mut self) {
        self.depth -= 1;
    }

    pub fn make_error_here<T, S: Into<String>>(&self, msg: S) -> Result<T, ParseError> {
        /* Creates a ParseError at the current byte */
        self.make_error_at(ErrorKind::UnexpectedCharacter, msg, self.position)
    }

    pub fn make_error_behind<T, S: Into<String>>(&self, msg: S) -> Result<T, ParseError> {
        /* Creates a ParseError at the previous byte */
        self.make_error_at(ErrorKind::UnexpectedCharacter, msg, self.prev_position)
    }

    pub fn make_error_at_start<T, S: Into<String>>(&self, msg: S) -> Result<T, ParseError> {
        /* Creates a ParseError at the first byte of the current token */
        self.make_error_at(ErrorKind::UnexpectedCharacter, msg, self.start_position)
    }

    pub fn make_alloc_error<T>(&self) -> Result<T, ParseError> {
        self.make_error_at(
            ErrorKind::AllocationFailure,
            "Ran out of memory while building the document",
            self.prev_position,
        )
    }

    fn make_error_at<T, S: Into<String>>(
        &self,
        kind: ErrorKind,
        msg: S,
        pos: Position,
    ) -> Result<T, ParseError> {
        Err(ParseError::new(kind, msg.into(), pos))
    }

    ///////////////////////////////////////////////////////////////////////////////////////////////////////////
    // Scanning control

    fn begin_token(&mut self) {
        self.start_position = self.position;
    }

    fn advance(&mut self) {
        let Some(&byte) = self.source.get(self.current) else {
            return;
        };
        self.prev_position = self.position;
        self.current += 1;
        self.position.offset = self.current;
        if byte == b'\n' {
            self.position.line += 1;
            self.position.column = 0;
        } else {
            self.position.column += 1;
        }
    }

    fn consume(&mut self) -> u8 {
        let byte = self.peek();
        self.advance();
        byte
    }

    pub fn peek(&self) -> u8 {
        self.source.get(self.current).copied().unwrap_or(0)
    }

    fn peek_digit(&self) -> Option<u8> {
        let byte = self.peek();
        byte.is_ascii_digit().then(|| byte - b'0')
    }

    pub fn matches(&mut self, expected: u8) -> bool {
        let matched = !self.is_at_end() && self.peek() == expected;
        if matched {
            self.advance();
        }
        matched
    }

    pub fn skip_whitespace(&mut self) {
        while matches!(self.peek(), b' ' | b'\n' | b'\r' | b'\t') {
            self.advance();
        }
    }

    fn is_at_end(&self) -> bool {
        self.current >= self.source.len()
    }
}

pub fn describe(byte: u8) -> String {
    match byte {
        0 => "end of input".into(),
        0x20..=0x7E => format!("'{}'", byte as char),
        _ => format!("byte 0x{byte:02X}"),
    }
}

fn string_error_msg(byte: u8) -> String {
    // Only called for control characters, lone \'s are handled by scan_escape()
    match byte {
        b'\n' => "Line breaks are not allowed inside a string (hint: you can escape them as \\n)".into(),
        b'\t' => "Literal tabs are not allowed inside a string (hint: you can escape them as \\t)".into(),
        b'\r' => "Carriage return line breaks are not allowed inside a string (hint: you can escape them as \\r)".into(),
        0x08 => "Backspace control characters are not allowed inside a string (hint: you can escape them as \\b)".into(),
        0x0C => "Form-feed control characters are not allowed inside a string (hint: you can escape them as \\f)".into(),
        _ => {
            let hex = format!("{byte:04X}");
            format!("The control character U+{hex} is not allowed inside a string (hint: you can escape it as \\u{hex})")
        }
    }
}
