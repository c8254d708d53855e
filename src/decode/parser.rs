use indexmap::IndexSet;

use crate::error::ContentError;
use crate::options::{ArrayOptions, DictionaryOptions, LineFeedEscaping, StringOptions, Utf8Policy};
use crate::types::{is_unquoted_literal_byte, ByteString, Dictionary, Key, Value};

const LINE_SEPARATOR: &[u8] = b"\xE2\x80\xA8";
const PARAGRAPH_SEPARATOR: &[u8] = b"\xE2\x80\xA9";

/// A [`ContentError`] plus the byte offset it was raised at. The public
/// entry points convert the offset into a line and column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ParseError {
    pub kind: ContentError,
    pub offset: usize,
}

type ParseResult<T> = Result<T, ParseError>;

/// Byte-oriented recursive-descent parser.
///
/// While `skipping` is set the grammar is checked exactly as usual but
/// nothing is materialized: string buffers stay empty, data and array
/// payloads are not collected, dictionary entries are not inserted.
pub(crate) struct Parser<'de> {
    bytes: &'de [u8],
    pos: usize,
    skipping: bool,
    utf8: Utf8Policy,
}

impl<'de> Parser<'de> {
    pub fn new(bytes: &'de [u8], utf8: Utf8Policy) -> Self {
        Self {
            bytes,
            pos: 0,
            skipping: false,
            utf8,
        }
    }

    /// A parser that validates the whole input without building a tree.
    pub fn validator(bytes: &'de [u8], utf8: Utf8Policy) -> Self {
        let mut parser = Self::new(bytes, utf8);
        parser.skipping = true;
        parser
    }

    fn err_at(&self, kind: ContentError, offset: usize) -> ParseError {
        ParseError { kind, offset }
    }

    fn err_here(&self, kind: ContentError) -> ParseError {
        self.err_at(kind, self.pos)
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn at_line_separator(&self) -> bool {
        let rest = &self.bytes[self.pos.min(self.bytes.len())..];
        rest.starts_with(LINE_SEPARATOR) || rest.starts_with(PARAGRAPH_SEPARATOR)
    }

    pub fn parse_document(
        &mut self,
        top_level_keys: Option<&IndexSet<ByteString>>,
    ) -> ParseResult<Value> {
        self.skip_trivia()?;
        if self.peek().is_none() {
            return Err(self.err_here(ContentError::MissingContent));
        }
        let value = self.parse_value(top_level_keys)?;
        self.skip_trivia()?;
        if self.peek().is_some() {
            return Err(self.err_here(ContentError::OversuppliedContent));
        }
        Ok(value)
    }

    fn parse_value(
        &mut self,
        top_level_keys: Option<&IndexSet<ByteString>>,
    ) -> ParseResult<Value> {
        match self.peek() {
            Some(b'(') => self.parse_array(),
            Some(b'{') => self.parse_dictionary(top_level_keys),
            Some(b'"') | Some(b'\'') => self.parse_quoted_string(),
            Some(b'<') => self.parse_data(),
            Some(byte) if is_unquoted_literal_byte(byte) => Ok(self.parse_unquoted_string()),
            None => Err(self.err_here(ContentError::MissingContent)),
            Some(byte) => Err(self.err_here(ContentError::IllegalContent(byte))),
        }
    }

    // Trivia and comments

    fn skip_trivia(&mut self) -> ParseResult<()> {
        loop {
            match self.peek() {
                Some(byte) if matches!(byte, 0x09..=0x0D | 0x20) => self.pos += 1,
                Some(0xE2) if self.at_line_separator() => self.pos += 3,
                Some(b'/') => self.skip_comment()?,
                _ => return Ok(()),
            }
        }
    }

    /// Whitespace only, as used inside data values. Comments and the
    /// Unicode separators are not recognized here.
    fn skip_data_whitespace(&mut self) {
        while let Some(byte) = self.peek() {
            if matches!(byte, 0x09..=0x0D | 0x20) {
                self.pos += 1;
            } else {
                break;
            }
        }
    }

    fn skip_comment(&mut self) -> ParseResult<()> {
        let start = self.pos;
        match self.bytes.get(self.pos + 1).copied() {
            None => Err(self.err_at(ContentError::IncompleteCommentStart, start)),
            Some(b'/') => {
                self.pos += 2;
                // The terminator stays put for the next trivia pass.
                while let Some(byte) = self.peek() {
                    if matches!(byte, b'\n' | b'\r') || self.at_line_separator() {
                        break;
                    }
                    self.pos += 1;
                }
                Ok(())
            }
            Some(b'*') => {
                self.pos += 2;
                while self.pos < self.bytes.len() {
                    if self.bytes[self.pos..].starts_with(b"*/") {
                        self.pos += 2;
                        return Ok(());
                    }
                    self.pos += 1;
                }
                Err(self.err_at(ContentError::MissingCommentEnd, start))
            }
            Some(byte) => Err(self.err_at(ContentError::IllegalCommentStart(byte), start)),
        }
    }

    // Strings

    fn parse_unquoted_string(&mut self) -> Value {
        let start = self.pos;
        while let Some(byte) = self.peek() {
            if is_unquoted_literal_byte(byte) {
                self.pos += 1;
            } else {
                break;
            }
        }
        let string = if self.skipping {
            ByteString::default()
        } else {
            let literal = std::str::from_utf8(&self.bytes[start..self.pos])
                .expect("unquoted literals are ASCII");
            ByteString::from(literal)
        };
        Value::String(string, StringOptions::UNQUOTED)
    }

    fn parse_quoted_string(&mut self) -> ParseResult<Value> {
        let open = self.pos;
        let delimiter = self.bytes[self.pos];
        self.pos += 1;

        let mut buffer = String::new();
        let mut options = StringOptions::empty();
        loop {
            let chunk_start = self.pos;
            while let Some(byte) = self.peek() {
                if byte == delimiter || byte == b'\\' {
                    break;
                }
                self.pos += 1;
            }
            self.take_chunk(chunk_start, &mut buffer)?;
            match self.peek() {
                None => return Err(self.err_at(ContentError::MissingClosingQuote, open)),
                Some(byte) if byte == delimiter => {
                    self.pos += 1;
                    break;
                }
                Some(_) => self.parse_escape(open, &mut buffer, &mut options)?,
            }
        }

        let string = if self.skipping {
            ByteString::default()
        } else {
            ByteString::from(buffer)
        };
        Ok(Value::String(string, options))
    }

    /// Validate and append the raw bytes since `chunk_start`.
    fn take_chunk(&mut self, chunk_start: usize, buffer: &mut String) -> ParseResult<()> {
        let chunk = &self.bytes[chunk_start..self.pos];
        if chunk.is_empty() {
            return Ok(());
        }
        match self.utf8 {
            Utf8Policy::Strict => match std::str::from_utf8(chunk) {
                Ok(text) => {
                    if !self.skipping {
                        buffer.push_str(text);
                    }
                    Ok(())
                }
                Err(error) => Err(self.err_at(
                    ContentError::NonUtf8StringContents,
                    chunk_start + error.valid_up_to(),
                )),
            },
            Utf8Policy::Replace => {
                if !self.skipping {
                    buffer.push_str(&String::from_utf8_lossy(chunk));
                }
                Ok(())
            }
        }
    }

    fn push_char(&self, buffer: &mut String, ch: char) {
        if !self.skipping {
            buffer.push(ch);
        }
    }

    /// Record which line-feed spelling appeared. Only the first form seen
    /// sticks, keeping the three flags mutually exclusive.
    fn record_line_feed(options: &mut StringOptions, flag: StringOptions) {
        if options.line_feed_escaping() == LineFeedEscaping::None {
            options.insert(flag);
        }
    }

    fn parse_escape(
        &mut self,
        open: usize,
        buffer: &mut String,
        options: &mut StringOptions,
    ) -> ParseResult<()> {
        let escape_start = self.pos;
        self.pos += 1;
        let Some(selector) = self.peek() else {
            return Err(self.err_at(ContentError::MissingClosingQuote, open));
        };
        self.pos += 1;

        match selector {
            b'\\' => self.push_char(buffer, '\\'),
            b'a' => self.push_char(buffer, '\u{07}'),
            b'b' => self.push_char(buffer, '\u{08}'),
            b'e' => self.push_char(buffer, '\u{1B}'),
            b'f' => self.push_char(buffer, '\u{0C}'),
            b'n' => {
                self.push_char(buffer, '\n');
                Self::record_line_feed(options, StringOptions::ESCAPED_LINE_FEEDS_NAMED);
            }
            b'r' => self.push_char(buffer, '\r'),
            b't' => self.push_char(buffer, '\t'),
            b'v' => self.push_char(buffer, '\u{0B}'),
            b'\n' => {
                self.push_char(buffer, '\n');
                Self::record_line_feed(options, StringOptions::ESCAPED_LINE_FEEDS_LITERAL);
            }
            b'0'..=b'7' => self.parse_octal_escape(escape_start, selector, buffer, options)?,
            b'U' => self.parse_hex_escape(escape_start, buffer)?,
            other => self.push_char(buffer, other as char),
        }
        Ok(())
    }

    fn parse_octal_escape(
        &mut self,
        escape_start: usize,
        first: u8,
        buffer: &mut String,
        options: &mut StringOptions,
    ) -> ParseResult<()> {
        let mut digits = [first - b'0', 0, 0];
        let mut count = 1;
        while count < 3 {
            match self.peek() {
                Some(byte @ b'0'..=b'7') => {
                    digits[count] = byte - b'0';
                    count += 1;
                    self.pos += 1;
                }
                _ => break,
            }
        }

        if count == 3 {
            let (d1, d2, d3) = (digits[0], digits[1], digits[2]);
            if d1 >= 4 {
                return Err(self.err_at(
                    ContentError::OctalCodeOverflowStringEscapeSequence(d1, d2, d3),
                    escape_start,
                ));
            }
            if d1 >= 2 {
                return Err(self.err_at(
                    ContentError::NonAsciiOctalCodeStringEscapeSequence(d1, d2, d3),
                    escape_start,
                ));
            }
        }

        let mut code: u8 = 0;
        for digit in &digits[..count] {
            code = code << 3 | digit;
        }
        if code == 0o011 {
            options.insert(StringOptions::ESCAPED_HORIZONTAL_TABS_OCTAL);
        }
        if code == 0o012 {
            Self::record_line_feed(options, StringOptions::ESCAPED_LINE_FEEDS_OCTAL);
        }
        self.push_char(buffer, char::from(code));
        Ok(())
    }

    fn parse_hex_escape(&mut self, escape_start: usize, buffer: &mut String) -> ParseResult<()> {
        let mut code: u16 = 0;
        for _ in 0..4 {
            let digit = self.peek().and_then(hex_digit_value).ok_or_else(|| {
                self.err_at(
                    ContentError::IncompleteHexadecimalCodeStringEscapeSequence,
                    escape_start,
                )
            })?;
            code = code << 4 | u16::from(digit);
            self.pos += 1;
        }
        match char::from_u32(u32::from(code)) {
            Some(ch) => {
                self.push_char(buffer, ch);
                Ok(())
            }
            None => Err(self.err_at(
                ContentError::NonUnicodeScalarHexadecimalCodeStringEscapeSequence(code),
                escape_start,
            )),
        }
    }

    // Data

    fn parse_data(&mut self) -> ParseResult<Value> {
        let open = self.pos;
        self.pos += 1;

        let mut bytes = Vec::new();
        loop {
            self.skip_data_whitespace();
            match self.peek() {
                None => return Err(self.err_at(ContentError::MissingDataEnd, open)),
                Some(b'>') => {
                    self.pos += 1;
                    break;
                }
                Some(byte) => {
                    let Some(high) = hex_digit_value(byte) else {
                        return Err(self.err_here(ContentError::NonHexadecimalHighByteData(byte)));
                    };
                    self.pos += 1;
                    self.skip_data_whitespace();
                    match self.peek() {
                        None | Some(b'>') => {
                            return Err(
                                self.err_here(ContentError::MissingHexadecimalLowByteData)
                            );
                        }
                        Some(second) => {
                            let Some(low) = hex_digit_value(second) else {
                                return Err(self.err_here(
                                    ContentError::NonHexadecimalLowByteData(second),
                                ));
                            };
                            self.pos += 1;
                            if !self.skipping {
                                bytes.push(high << 4 | low);
                            }
                        }
                    }
                }
            }
        }
        Ok(Value::Data(bytes))
    }

    // Arrays

    fn parse_array(&mut self) -> ParseResult<Value> {
        self.pos += 1;
        let mut options = ArrayOptions::empty();
        if self.peek() == Some(b'\n') {
            options.insert(ArrayOptions::BREAK_ELEMENTS_ONTO_LINES);
        }

        let mut items = Vec::new();
        let mut ended_on_comma = false;
        loop {
            self.skip_trivia()?;
            if self.peek() == Some(b')') {
                break;
            }
            let value = self.parse_value(None)?;
            if !self.skipping {
                items.push(value);
            }
            self.skip_trivia()?;
            if self.peek() == Some(b',') {
                self.pos += 1;
                if self.peek() == Some(b' ') {
                    options.insert(ArrayOptions::SPACE_SEPARATOR);
                }
                ended_on_comma = true;
            } else {
                ended_on_comma = false;
                break;
            }
        }

        if self.peek() != Some(b')') {
            return Err(self.err_here(ContentError::MissingClosingParenthesis));
        }
        self.pos += 1;
        if ended_on_comma {
            options.insert(ArrayOptions::TRAILING_COMMA);
        }
        Ok(Value::Array(items, options))
    }

    // Dictionaries

    fn parse_dictionary(
        &mut self,
        top_level_keys: Option<&IndexSet<ByteString>>,
    ) -> ParseResult<Value> {
        self.pos += 1;
        let mut dictionary = Dictionary::new();
        if self.peek() == Some(b'\n') {
            dictionary
                .options
                .insert(DictionaryOptions::BREAK_ELEMENTS_ONTO_LINES);
        }

        loop {
            self.skip_trivia()?;
            match self.peek() {
                Some(b'}') => break,
                None => return Err(self.err_here(ContentError::MissingClosingBrace)),
                Some(_) => {}
            }

            let key_offset = self.pos;
            let Value::String(key_string, key_options) = self.parse_value(None)? else {
                return Err(self.err_at(ContentError::NonStringKey, key_offset));
            };

            self.skip_trivia()?;
            if self.peek() != Some(b'=') {
                return Err(self.err_here(ContentError::MissingEqualSignInDictionary));
            }
            self.pos += 1;
            self.skip_trivia()?;

            let retain = match top_level_keys {
                Some(keys) if !self.skipping => keys.contains(&key_string),
                _ => true,
            };
            let value = if retain {
                self.parse_value(None)?
            } else {
                self.parse_skipped_value()?
            };

            self.skip_trivia()?;
            if self.peek() != Some(b';') {
                return Err(self.err_here(ContentError::MissingSemicolonInDictionary));
            }
            self.pos += 1;

            if retain && !self.skipping {
                // A repeated key keeps its first position and spelling;
                // the later value wins.
                dictionary.insert(Key::new(key_string, key_options), value);
            }
        }
        self.pos += 1;

        if !self.skipping && !dictionary.insertion_order_is_ascending() {
            let order = dictionary.keys().map(|key| key.string.clone()).collect();
            dictionary.set_explicit_order(Some(order));
        }
        Ok(Value::Dictionary(dictionary))
    }

    /// Parse a value for syntax only, materializing nothing.
    fn parse_skipped_value(&mut self) -> ParseResult<Value> {
        let was_skipping = self.skipping;
        self.skipping = true;
        let result = self.parse_value(None);
        self.skipping = was_skipping;
        result
    }
}

fn hex_digit_value(byte: u8) -> Option<u8> {
    match byte {
        b'0'..=b'9' => Some(byte - b'0'),
        b'a'..=b'f' => Some(byte - b'a' + 10),
        b'A'..=b'F' => Some(byte - b'A' + 10),
        _ => None,
    }
}
