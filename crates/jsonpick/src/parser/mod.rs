//! Reusable JSON parser and one-shot parse entry points
//!
//! [`Parser`] owns all backing storage for the tree it produces; parsing
//! returns a [`Value`] borrowing that storage, so starting a new parse
//! invalidates the previous result at compile time. One parser pulled from
//! the [`pool`](crate::pool) can serve any number of sequential parses
//! without reallocating.
//!
//! The free functions [`parse`]/[`parse_bytes`] trade reuse for ownership:
//! they run a private parser and hand back a self-contained [`Document`].

pub(crate) mod read;
pub(crate) mod tree;

use crate::error::{Error, Result};
use crate::value::Value;
use read::Reader;
use tree::TreeBuf;

/// Limits applied while parsing
#[derive(Debug, Clone)]
pub struct ParserConfig {
    /// Maximum container nesting depth
    pub max_depth: usize,
    /// Maximum input size in bytes
    pub max_input_len: usize,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            max_depth: 128,
            max_input_len: 100 * 1024 * 1024, // 100MB
        }
    }
}

/// Reusable JSON parser
///
/// Holds the node tables and text arena that parse results point into.
/// Exactly one parse result is live per parser; the `&mut self` receiver on
/// [`Parser::parse`] makes an earlier result unusable once the parser is
/// reused or returned to the pool.
#[derive(Debug, Default)]
pub struct Parser {
    config: ParserConfig,
    tree: TreeBuf,
}

impl Parser {
    /// Create a parser with default limits
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a parser with custom limits
    pub fn with_config(config: ParserConfig) -> Self {
        Self {
            config,
            tree: TreeBuf::new(),
        }
    }

    /// Parse a JSON string, returning the root value
    ///
    /// The result borrows this parser's buffers. Copy anything you need to
    /// keep before parsing again or releasing the parser.
    pub fn parse(&mut self, input: &str) -> Result<Value<'_>> {
        self.parse_validated(input.as_bytes())
    }

    /// Parse JSON bytes, returning the root value
    ///
    /// The input must be valid UTF-8.
    pub fn parse_bytes(&mut self, input: &[u8]) -> Result<Value<'_>> {
        std::str::from_utf8(input)?;
        self.parse_validated(input)
    }

    /// Drop the current parse result, keeping allocated capacity
    pub fn reset(&mut self) {
        self.tree.clear();
    }

    fn parse_validated(&mut self, input: &[u8]) -> Result<Value<'_>> {
        if input.len() > self.config.max_input_len {
            return Err(Error::InputTooLarge {
                len: input.len(),
                limit: self.config.max_input_len,
            });
        }
        self.tree.clear();
        let root = Reader::new(input, self.config.max_depth).read_document(&mut self.tree)?;
        self.tree.root = root;
        Ok(Value::new(&self.tree, root))
    }
}

/// An owned parse result
///
/// Unlike the borrowed [`Value`] returned by [`Parser::parse`], a `Document`
/// carries its own storage and can outlive the parser that built it.
#[derive(Debug)]
pub struct Document {
    tree: TreeBuf,
}

impl Document {
    /// The root value of the document
    pub fn root(&self) -> Value<'_> {
        Value::new(&self.tree, self.tree.root)
    }

    /// Navigate from the root, see [`Value::get`]
    pub fn get(&self, path: &[&str]) -> Option<Value<'_>> {
        self.root().get(path)
    }

    /// Whether a value exists at `path`, see [`Value::exists`]
    pub fn exists(&self, path: &[&str]) -> bool {
        self.root().exists(path)
    }
}

/// Parse a JSON string into an owned [`Document`]
///
/// Allocates a private parser per call; for many small independent lookups
/// the pooled accessors in [`crate::access`] are cheaper.
pub fn parse(input: &str) -> Result<Document> {
    let mut parser = Parser::new();
    parser.parse(input)?;
    Ok(Document { tree: parser.tree })
}

/// Parse JSON bytes into an owned [`Document`]
pub fn parse_bytes(input: &[u8]) -> Result<Document> {
    let mut parser = Parser::new();
    parser.parse_bytes(input)?;
    Ok(Document { tree: parser.tree })
}

/// Parse a JSON string, panicking on malformed input
///
/// For call sites where a malformed document is a programming error rather
/// than a runtime condition. The panic message carries the parse error.
pub fn must_parse(input: &str) -> Document {
    match parse(input) {
        Ok(doc) => doc,
        Err(err) => panic!("cannot parse JSON: {err}"),
    }
}

/// Parse JSON bytes, panicking on malformed input
pub fn must_parse_bytes(input: &[u8]) -> Document {
    match parse_bytes(input) {
        Ok(doc) => doc,
        Err(err) => panic!("cannot parse JSON: {err}"),
    }
}
