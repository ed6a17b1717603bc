//! Read-only views over parsed documents
//!
//! [`Value`] is a copyable handle (tree reference plus node index) whose
//! lifetime is tied to the [`Parser`](crate::Parser) or
//! [`Document`](crate::Document) that produced it. All typed accessors
//! return `Option`: a value of the wrong shape is "no value", never an
//! error and never a panic.

use num_bigint::BigInt;

use crate::parser::tree::{ListRange, NodeData, NodeId, TreeBuf};

/// Classification of a JSON value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Object,
    Array,
    String,
    Number,
    Bool,
    Null,
}

/// A position within a parsed document
#[derive(Debug, Clone, Copy)]
pub struct Value<'a> {
    tree: &'a TreeBuf,
    node: NodeId,
}

impl<'a> Value<'a> {
    pub(crate) fn new(tree: &'a TreeBuf, node: NodeId) -> Self {
        Self { tree, node }
    }

    /// The kind of this value
    pub fn kind(&self) -> ValueKind {
        match self.tree.node(self.node) {
            NodeData::Object(_) => ValueKind::Object,
            NodeData::Array(_) => ValueKind::Array,
            NodeData::String(_) => ValueKind::String,
            NodeData::Number(_) => ValueKind::Number,
            NodeData::Bool(_) => ValueKind::Bool,
            NodeData::Null => ValueKind::Null,
        }
    }

    /// Navigate to the value at `path`, one segment per nesting level.
    ///
    /// A segment made only of ASCII decimal digits indexes the current value
    /// when it is an array; every other combination treats the segment as an
    /// object key. The empty path resolves to `self`. Returns `None` when a
    /// key is missing, an index is out of range, or the path descends
    /// through a non-container value.
    pub fn get(&self, path: &[&str]) -> Option<Value<'a>> {
        let mut current = self.node;
        for segment in path {
            current = match self.tree.node(current) {
                NodeData::Object(range) => self.lookup_key(range, segment)?,
                NodeData::Array(range) => {
                    let index = parse_index(segment)?;
                    *self.tree.elems_at(range).get(index)?
                }
                _ => return None,
            };
        }
        Some(Value::new(self.tree, current))
    }

    /// Whether a value exists at `path`. A JSON `null` at the path exists;
    /// a missing key does not.
    pub fn exists(&self, path: &[&str]) -> bool {
        self.get(path).is_some()
    }

    /// String content, for string values
    pub fn as_str(&self) -> Option<&'a str> {
        match self.tree.node(self.node) {
            NodeData::String(span) => Some(self.tree.str_at(span)),
            _ => None,
        }
    }

    /// UTF-8 bytes of the string content, for string values
    pub fn string_bytes(&self) -> Option<&'a [u8]> {
        self.as_str().map(str::as_bytes)
    }

    /// String content when it consists solely of ASCII hex digits
    pub fn as_hex(&self) -> Option<&'a str> {
        let s = self.as_str()?;
        if !s.is_empty() && s.bytes().all(|b| b.is_ascii_hexdigit()) {
            Some(s)
        } else {
            None
        }
    }

    /// Signed 64-bit integer, for numbers written as integer literals
    /// representable in an `i64`
    pub fn as_i64(&self) -> Option<i64> {
        self.number_token()?.parse().ok()
    }

    /// Arbitrary-precision integer, for numbers written as integer
    /// literals. Never truncates.
    pub fn as_bigint(&self) -> Option<BigInt> {
        self.number_token()?.parse().ok()
    }

    /// Double-precision float, for any number value
    pub fn as_f64(&self) -> Option<f64> {
        self.number_token()?.parse().ok()
    }

    /// Boolean content, for boolean values
    pub fn as_bool(&self) -> Option<bool> {
        match self.tree.node(self.node) {
            NodeData::Bool(b) => Some(b),
            _ => None,
        }
    }

    /// Whether this value is JSON `null`
    pub fn is_null(&self) -> bool {
        matches!(self.tree.node(self.node), NodeData::Null)
    }

    /// Number of elements for arrays, members for objects, `None` otherwise
    pub fn len(&self) -> Option<usize> {
        match self.tree.node(self.node) {
            NodeData::Array(range) | NodeData::Object(range) => Some(range.len()),
            _ => None,
        }
    }

    /// Iterate over array elements. Empty for non-arrays.
    pub fn items(&self) -> impl Iterator<Item = Value<'a>> + use<'a> {
        let tree = self.tree;
        let ids = match self.tree.node(self.node) {
            NodeData::Array(range) => self.tree.elems_at(range),
            _ => &[],
        };
        ids.iter().map(move |&id| Value::new(tree, id))
    }

    /// Iterate over object members in document order. Empty for non-objects.
    pub fn entries(&self) -> impl Iterator<Item = (&'a str, Value<'a>)> + use<'a> {
        let tree = self.tree;
        let members = match self.tree.node(self.node) {
            NodeData::Object(range) => self.tree.members_at(range),
            _ => &[],
        };
        members
            .iter()
            .map(move |m| (tree.str_at(m.key), Value::new(tree, m.value)))
    }

    /// Linear key scan. Objects here are lookup targets for a handful of
    /// path segments, not general maps; a hash table would cost more to
    /// build than it saves.
    fn lookup_key(&self, range: ListRange, key: &str) -> Option<NodeId> {
        self.tree
            .members_at(range)
            .iter()
            .find(|m| self.tree.str_at(m.key) == key)
            .map(|m| m.value)
    }

    fn number_token(&self) -> Option<&'a str> {
        match self.tree.node(self.node) {
            NodeData::Number(span) => Some(self.tree.str_at(span)),
            _ => None,
        }
    }
}

/// Strict array-index parse: ASCII digits only, so `"+1"`, `"-0"` and
/// `" 1"` never index an array.
fn parse_index(segment: &str) -> Option<usize> {
    if segment.is_empty() || !segment.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    segment.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::Parser;

    #[test]
    fn test_navigation_by_key_and_index() {
        let mut parser = Parser::new();
        let root = parser
            .parse(r#"{"a": {"b": [10, 20, 30]}, "1": "one"}"#)
            .unwrap();

        assert_eq!(root.get(&["a", "b", "1"]).unwrap().as_i64(), Some(20));
        // Digit segments are plain keys on objects
        assert_eq!(root.get(&["1"]).unwrap().as_str(), Some("one"));
        assert!(root.get(&["a", "b", "3"]).is_none());
        assert!(root.get(&["a", "missing"]).is_none());
    }

    #[test]
    fn test_non_digit_segments_never_index_arrays() {
        let mut parser = Parser::new();
        let root = parser.parse(r#"[1, 2, 3]"#).unwrap();
        assert!(root.get(&["+1"]).is_none());
        assert!(root.get(&["-0"]).is_none());
        assert!(root.get(&["x"]).is_none());
        assert_eq!(root.get(&["01"]).unwrap().as_i64(), Some(2));
    }

    #[test]
    fn test_empty_path_is_root() {
        let mut parser = Parser::new();
        let root = parser.parse("42").unwrap();
        assert_eq!(root.get(&[]).unwrap().as_i64(), Some(42));
        assert!(root.exists(&[]));
    }

    #[test]
    fn test_descend_through_scalar_is_absent() {
        let mut parser = Parser::new();
        let root = parser.parse(r#"{"a": 1}"#).unwrap();
        assert!(root.get(&["a", "x"]).is_none());
        assert!(!root.exists(&["a", "x"]));
    }

    #[test]
    fn test_null_exists_but_coerces_to_nothing() {
        let mut parser = Parser::new();
        let root = parser.parse(r#"{"n": null}"#).unwrap();
        let n = root.get(&["n"]).unwrap();
        assert!(n.is_null());
        assert!(root.exists(&["n"]));
        assert_eq!(n.as_str(), None);
        assert_eq!(n.as_i64(), None);
        assert_eq!(n.as_bool(), None);
    }

    #[test]
    fn test_numeric_coercions() {
        let mut parser = Parser::new();
        let root = parser
            .parse(r#"{"i": 42, "f": 3.5, "neg": -7, "e": 2e3}"#)
            .unwrap();

        let i = root.get(&["i"]).unwrap();
        assert_eq!(i.kind(), ValueKind::Number);
        assert_eq!(i.as_i64(), Some(42));
        assert_eq!(i.as_f64(), Some(42.0));
        assert_eq!(i.as_bigint(), Some(BigInt::from(42)));

        let f = root.get(&["f"]).unwrap();
        assert_eq!(f.as_i64(), None);
        assert_eq!(f.as_bigint(), None);
        assert_eq!(f.as_f64(), Some(3.5));

        assert_eq!(root.get(&["neg"]).unwrap().as_i64(), Some(-7));
        assert_eq!(root.get(&["e"]).unwrap().as_f64(), Some(2000.0));
    }

    #[test]
    fn test_bigint_beyond_machine_width() {
        let mut parser = Parser::new();
        let root = parser
            .parse(r#"{"big": 123456789012345678901234567890}"#)
            .unwrap();
        let big = root.get(&["big"]).unwrap();
        assert_eq!(big.as_i64(), None);
        assert_eq!(
            big.as_bigint(),
            Some("123456789012345678901234567890".parse().unwrap())
        );
    }

    #[test]
    fn test_hex_coercion() {
        let mut parser = Parser::new();
        let root = parser
            .parse(r#"{"h": "1f", "H": "DEADBEEF", "no": "xyz", "empty": "", "num": 31}"#)
            .unwrap();
        assert_eq!(root.get(&["h"]).unwrap().as_hex(), Some("1f"));
        assert_eq!(root.get(&["H"]).unwrap().as_hex(), Some("DEADBEEF"));
        assert_eq!(root.get(&["no"]).unwrap().as_hex(), None);
        assert_eq!(root.get(&["empty"]).unwrap().as_hex(), None);
        assert_eq!(root.get(&["num"]).unwrap().as_hex(), None);
    }

    #[test]
    fn test_type_mismatches_are_none() {
        let mut parser = Parser::new();
        let root = parser.parse(r#"{"s": "text", "b": true}"#).unwrap();
        let s = root.get(&["s"]).unwrap();
        assert_eq!(s.as_i64(), None);
        assert_eq!(s.as_f64(), None);
        assert_eq!(s.as_bool(), None);
        let b = root.get(&["b"]).unwrap();
        assert_eq!(b.as_bool(), Some(true));
        assert_eq!(b.as_str(), None);
    }

    #[test]
    fn test_iteration() {
        let mut parser = Parser::new();
        let root = parser.parse(r#"{"arr": [1, 2], "x": true}"#).unwrap();

        let arr = root.get(&["arr"]).unwrap();
        assert_eq!(arr.len(), Some(2));
        let collected: Vec<i64> = arr.items().filter_map(|v| v.as_i64()).collect();
        assert_eq!(collected, vec![1, 2]);

        let keys: Vec<&str> = root.entries().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["arr", "x"]);

        // Wrong shapes iterate as empty
        assert_eq!(root.get(&["x"]).unwrap().items().count(), 0);
        assert_eq!(arr.entries().count(), 0);
    }

    #[test]
    fn test_string_bytes_matches_str() {
        let mut parser = Parser::new();
        let root = parser.parse("{\"s\": \"caf\\u00e9\"}").unwrap();
        let s = root.get(&["s"]).unwrap();
        assert_eq!(s.as_str(), Some("café"));
        assert_eq!(s.string_bytes(), Some("café".as_bytes()));
    }
}
