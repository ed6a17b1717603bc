//! # jsonpick
//!
//! Pooled, path-based extraction of single typed values from JSON documents.
//!
//! The convenience accessors fetch one field in one call, with parser
//! allocation amortized across calls through a process-wide parser pool:
//!
//! ```
//! let data = br#"{"user": {"id": 42, "name": "ada", "admin": true}}"#;
//!
//! assert_eq!(jsonpick::get_int(data, &["user", "id"]), 42);
//! assert_eq!(jsonpick::get_string(data, &["user", "name"]), "ada");
//! assert!(jsonpick::get_bool(data, &["user", "admin"]));
//! assert!(!jsonpick::exists(data, &["user", "email"]));
//! ```
//!
//! Accessors never return errors: malformed input, a missing path and a
//! wrong-typed field all yield the accessor's default value. When failures
//! must be told apart, or when many fields are read from one document, use
//! the checked layer instead:
//!
//! ```
//! let doc = jsonpick::parse(r#"{"a": {"b": [1, 2, 3]}}"#)?;
//! let b = doc.get(&["a", "b"]).ok_or("missing")?;
//! assert_eq!(b.len(), Some(3));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! [`Parser`] is reusable and can be pooled explicitly via [`ParserPool`];
//! parse results borrow the parser, so the borrow checker guarantees that
//! no data escapes a parser that has been reused or released.

#![warn(rust_2018_idioms)]

pub mod access;
pub mod error;
pub mod parser;
pub mod pool;
pub mod value;

pub use access::{
    exists, get_bigint, get_bool, get_bytes, get_float64, get_hex, get_int, get_string,
};
pub use error::{Error, Result};
pub use parser::{
    Document, Parser, ParserConfig, must_parse, must_parse_bytes, parse, parse_bytes,
};
pub use pool::{ParserPool, PoolStats, PooledParser, default_pool};
pub use value::{Value, ValueKind};
