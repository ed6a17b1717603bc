//! Recursive-descent JSON reader
//!
//! Builds the flat tree in [`TreeBuf`] in a single pass over the input.
//! Strings are unescaped straight into the shared text arena; number tokens
//! are validated against the RFC 8259 grammar and stored as raw text so the
//! typed coercions can parse them at the exact width they need.
//!
//! The input must already be validated as UTF-8. Every chunk copied into the
//! arena starts and ends at an ASCII byte, so chunk boundaries always fall on
//! character boundaries.

use memchr::memchr2;
use smallvec::SmallVec;

use super::tree::{Member, NodeData, NodeId, Span, TreeBuf};
use crate::error::{Error, Result};

pub(crate) struct Reader<'a> {
    input: &'a [u8],
    pos: usize,
    max_depth: usize,
}

impl<'a> Reader<'a> {
    pub(crate) fn new(input: &'a [u8], max_depth: usize) -> Self {
        Self {
            input,
            pos: 0,
            max_depth,
        }
    }

    /// Read one complete document: a single value with nothing but
    /// whitespace around it.
    pub(crate) fn read_document(mut self, tree: &mut TreeBuf) -> Result<NodeId> {
        self.skip_ws();
        let root = self.read_value(tree, 0)?;
        self.skip_ws();
        if self.pos < self.input.len() {
            return Err(Error::TrailingData { position: self.pos });
        }
        Ok(root)
    }

    fn read_value(&mut self, tree: &mut TreeBuf, depth: usize) -> Result<NodeId> {
        match self.peek() {
            None => Err(Error::unexpected_eof(self.pos)),
            Some(b'{') => self.read_object(tree, depth),
            Some(b'[') => self.read_array(tree, depth),
            Some(b'"') => {
                let span = self.read_string(tree)?;
                Ok(tree.push_node(NodeData::String(span)))
            }
            Some(b't') => {
                self.expect_keyword(b"true")?;
                Ok(tree.push_node(NodeData::Bool(true)))
            }
            Some(b'f') => {
                self.expect_keyword(b"false")?;
                Ok(tree.push_node(NodeData::Bool(false)))
            }
            Some(b'n') => {
                self.expect_keyword(b"null")?;
                Ok(tree.push_node(NodeData::Null))
            }
            Some(b'-') | Some(b'0'..=b'9') => {
                let span = self.read_number(tree)?;
                Ok(tree.push_node(NodeData::Number(span)))
            }
            Some(_) => Err(Error::unexpected_char(self.pos, self.peek_char())),
        }
    }

    fn read_object(&mut self, tree: &mut TreeBuf, depth: usize) -> Result<NodeId> {
        if depth >= self.max_depth {
            return Err(Error::DepthLimitExceeded {
                limit: self.max_depth,
            });
        }
        self.pos += 1; // consume '{'
        let mut members: SmallVec<[Member; 8]> = SmallVec::new();

        self.skip_ws();
        if self.peek() == Some(b'}') {
            self.pos += 1;
        } else {
            loop {
                self.skip_ws();
                match self.peek() {
                    Some(b'"') => {}
                    Some(_) => return Err(Error::unexpected_char(self.pos, self.peek_char())),
                    None => return Err(Error::unexpected_eof(self.pos)),
                }
                let key = self.read_string(tree)?;

                self.skip_ws();
                match self.peek() {
                    Some(b':') => self.pos += 1,
                    Some(_) => return Err(Error::unexpected_char(self.pos, self.peek_char())),
                    None => return Err(Error::unexpected_eof(self.pos)),
                }

                self.skip_ws();
                let value = self.read_value(tree, depth + 1)?;
                members.push(Member { key, value });

                self.skip_ws();
                match self.peek() {
                    Some(b',') => self.pos += 1,
                    Some(b'}') => {
                        self.pos += 1;
                        break;
                    }
                    Some(_) => return Err(Error::unexpected_char(self.pos, self.peek_char())),
                    None => return Err(Error::unexpected_eof(self.pos)),
                }
            }
        }

        let range = tree.push_members(&members);
        Ok(tree.push_node(NodeData::Object(range)))
    }

    fn read_array(&mut self, tree: &mut TreeBuf, depth: usize) -> Result<NodeId> {
        if depth >= self.max_depth {
            return Err(Error::DepthLimitExceeded {
                limit: self.max_depth,
            });
        }
        self.pos += 1; // consume '['
        let mut children: SmallVec<[NodeId; 16]> = SmallVec::new();

        self.skip_ws();
        if self.peek() == Some(b']') {
            self.pos += 1;
        } else {
            loop {
                self.skip_ws();
                children.push(self.read_value(tree, depth + 1)?);

                self.skip_ws();
                match self.peek() {
                    Some(b',') => self.pos += 1,
                    Some(b']') => {
                        self.pos += 1;
                        break;
                    }
                    Some(_) => return Err(Error::unexpected_char(self.pos, self.peek_char())),
                    None => return Err(Error::unexpected_eof(self.pos)),
                }
            }
        }

        let range = tree.push_elems(&children);
        Ok(tree.push_node(NodeData::Array(range)))
    }

    /// Read a string token starting at the opening quote, unescaping into
    /// the text arena. Returns the span of the unescaped content.
    fn read_string(&mut self, tree: &mut TreeBuf) -> Result<Span> {
        self.pos += 1; // consume '"'
        let start = tree.text.len() as u32;

        loop {
            let rest = &self.input[self.pos..];
            let stop = match memchr2(b'"', b'\\', rest) {
                Some(i) => i,
                None => return Err(Error::unexpected_eof(self.input.len())),
            };

            let chunk = &rest[..stop];
            if let Some(bad) = chunk.iter().position(|&b| b < 0x20) {
                return Err(Error::unexpected_char(
                    self.pos + bad,
                    chunk[bad] as char,
                ));
            }
            tree.text.push_str(std::str::from_utf8(chunk)?);
            self.pos += stop;

            if self.input[self.pos] == b'"' {
                self.pos += 1;
                break;
            }
            self.read_escape(tree)?;
        }

        Ok(Span {
            start,
            end: tree.text.len() as u32,
        })
    }

    /// Decode one backslash escape, appending the result to the arena.
    /// Position is on the backslash at entry.
    fn read_escape(&mut self, tree: &mut TreeBuf) -> Result<()> {
        let esc_pos = self.pos;
        self.pos += 1; // consume '\'

        let byte = match self.peek() {
            Some(b) => b,
            None => return Err(Error::unexpected_eof(self.pos)),
        };
        self.pos += 1;

        let decoded = match byte {
            b'"' => '"',
            b'\\' => '\\',
            b'/' => '/',
            b'b' => '\u{8}',
            b'f' => '\u{c}',
            b'n' => '\n',
            b'r' => '\r',
            b't' => '\t',
            b'u' => {
                let unit = self.read_hex_unit(esc_pos)?;
                self.decode_unicode_escape(unit, esc_pos)?
            }
            _ => return Err(Error::invalid_escape(esc_pos)),
        };
        tree.text.push(decoded);
        Ok(())
    }

    /// Turn a `\u` code unit into a character, pairing surrogates when the
    /// next escape supplies the low half. Unpaired surrogates fold to
    /// U+FFFD rather than failing the parse.
    fn decode_unicode_escape(&mut self, unit: u32, esc_pos: usize) -> Result<char> {
        match unit {
            0xD800..=0xDBFF => {
                let followed_by_escape = self.input.get(self.pos) == Some(&b'\\')
                    && self.input.get(self.pos + 1) == Some(&b'u');
                if !followed_by_escape {
                    return Ok(char::REPLACEMENT_CHARACTER);
                }
                let rewind = self.pos;
                self.pos += 2;
                let low = self.read_hex_unit(rewind)?;
                if (0xDC00..=0xDFFF).contains(&low) {
                    let combined = 0x10000 + ((unit - 0xD800) << 10) + (low - 0xDC00);
                    // Combined surrogate pairs are always valid scalars
                    char::from_u32(combined).ok_or_else(|| Error::invalid_escape(esc_pos))
                } else {
                    // Second escape was not a low surrogate; let the main
                    // loop decode it on its own.
                    self.pos = rewind;
                    Ok(char::REPLACEMENT_CHARACTER)
                }
            }
            0xDC00..=0xDFFF => Ok(char::REPLACEMENT_CHARACTER),
            _ => char::from_u32(unit).ok_or_else(|| Error::invalid_escape(esc_pos)),
        }
    }

    /// Read exactly four hex digits after `\u`.
    fn read_hex_unit(&mut self, esc_pos: usize) -> Result<u32> {
        if self.pos + 4 > self.input.len() {
            return Err(Error::unexpected_eof(self.input.len()));
        }
        let mut unit = 0u32;
        for _ in 0..4 {
            let digit = match self.input[self.pos] {
                b @ b'0'..=b'9' => (b - b'0') as u32,
                b @ b'a'..=b'f' => (b - b'a' + 10) as u32,
                b @ b'A'..=b'F' => (b - b'A' + 10) as u32,
                _ => return Err(Error::invalid_escape(esc_pos)),
            };
            unit = unit * 16 + digit;
            self.pos += 1;
        }
        Ok(unit)
    }

    /// Validate a number token and intern its raw text.
    fn read_number(&mut self, tree: &mut TreeBuf) -> Result<Span> {
        let start = self.pos;

        if self.peek() == Some(b'-') {
            self.pos += 1;
        }

        // Integer part: a lone 0, or a nonzero digit followed by more digits
        match self.peek() {
            Some(b'0') => self.pos += 1,
            Some(b'1'..=b'9') => self.skip_digits(),
            _ => return Err(Error::invalid_number(start)),
        }

        if self.peek() == Some(b'.') {
            self.pos += 1;
            if !matches!(self.peek(), Some(b'0'..=b'9')) {
                return Err(Error::invalid_number(start));
            }
            self.skip_digits();
        }

        if matches!(self.peek(), Some(b'e') | Some(b'E')) {
            self.pos += 1;
            if matches!(self.peek(), Some(b'+') | Some(b'-')) {
                self.pos += 1;
            }
            if !matches!(self.peek(), Some(b'0'..=b'9')) {
                return Err(Error::invalid_number(start));
            }
            self.skip_digits();
        }

        let token = std::str::from_utf8(&self.input[start..self.pos])?;
        Ok(tree.intern(token))
    }

    fn expect_keyword(&mut self, keyword: &'static [u8]) -> Result<()> {
        if self.input[self.pos..].starts_with(keyword) {
            self.pos += keyword.len();
            Ok(())
        } else if self.input.len() - self.pos < keyword.len() {
            Err(Error::unexpected_eof(self.input.len()))
        } else {
            Err(Error::unexpected_char(self.pos, self.peek_char()))
        }
    }

    fn skip_digits(&mut self) {
        while matches!(self.peek(), Some(b'0'..=b'9')) {
            self.pos += 1;
        }
    }

    fn skip_ws(&mut self) {
        while matches!(
            self.peek(),
            Some(b' ') | Some(b'\t') | Some(b'\n') | Some(b'\r')
        ) {
            self.pos += 1;
        }
    }

    fn peek(&self) -> Option<u8> {
        self.input.get(self.pos).copied()
    }

    /// Decode the character at the cursor for error reporting. The cursor
    /// only ever stops on character boundaries because all consumed bytes
    /// are ASCII.
    fn peek_char(&self) -> char {
        std::str::from_utf8(&self.input[self.pos..])
            .ok()
            .and_then(|s| s.chars().next())
            .unwrap_or(char::REPLACEMENT_CHARACTER)
    }
}
