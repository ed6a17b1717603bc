//! Single-call typed field extraction
//!
//! Each function here fetches one value out of a JSON document by a path of
//! keys and array indices: acquire a pooled parser, parse, navigate, coerce,
//! copy anything that borrows the parser's buffers, and return a plain
//! value. The parser goes back to the pool when the guard drops, on every
//! exit path.
//!
//! These functions have no error channel by design. A parse error, a missing
//! path and a type mismatch all produce the same default value, trading
//! diagnosability for call-site ergonomics. Callers who need to tell those
//! apart use [`crate::parse`] and [`Value`](crate::Value) directly; that
//! checked layer is also what everything here is built on.
//!
//! Array indexes may be written as decimal numbers in path segments:
//!
//! ```
//! assert_eq!(jsonpick::get_int(br#"{"arr": [10, 20, 30]}"#, &["arr", "1"]), 20);
//! assert_eq!(jsonpick::get_string(br#"{"a": {"b": "hi"}}"#, &["a", "b"]), "hi");
//! ```

use num_bigint::BigInt;
use tracing::trace;

use crate::pool::default_pool;
use crate::value::Value;

/// Run `coerce` on the value at `path`, folding every failure into `None`.
fn with_value<T>(
    data: &[u8],
    path: &[&str],
    coerce: impl for<'v> FnOnce(Value<'v>) -> Option<T>,
) -> Option<T> {
    let mut parser = default_pool().get();
    let root = match parser.parse_bytes(data) {
        Ok(root) => root,
        Err(err) => {
            trace!(%err, "accessor parse failed, returning default");
            return None;
        }
    };
    root.get(path).and_then(coerce)
}

/// String value at `path`, or `""` on any failure
///
/// The returned string is an owned copy; it stays valid after the pooled
/// parser has been reused.
pub fn get_string(data: &[u8], path: &[&str]) -> String {
    with_value(data, path, |v| v.as_str().map(str::to_owned)).unwrap_or_default()
}

/// UTF-8 bytes of the string value at `path`, or `None` on any failure
///
/// `None` is distinct from `Some(vec![])`: an empty-but-present string
/// yields the latter.
pub fn get_bytes(data: &[u8], path: &[&str]) -> Option<Vec<u8>> {
    with_value(data, path, |v| v.string_bytes().map(<[u8]>::to_vec))
}

/// Integer value at `path`, or `0` on any failure
///
/// Numbers with a fractional or exponent part do not coerce.
pub fn get_int(data: &[u8], path: &[&str]) -> i64 {
    with_value(data, path, |v| v.as_i64()).unwrap_or(0)
}

/// Hex-digit string value at `path`, or `""` on any failure
///
/// The value must be a string consisting solely of ASCII hex digits; it is
/// returned verbatim, not decoded.
pub fn get_hex(data: &[u8], path: &[&str]) -> String {
    with_value(data, path, |v| v.as_hex().map(str::to_owned)).unwrap_or_default()
}

/// Arbitrary-precision integer value at `path`, or `0` on any failure
///
/// Integer literals of any magnitude are preserved exactly.
pub fn get_bigint(data: &[u8], path: &[&str]) -> BigInt {
    with_value(data, path, |v| v.as_bigint()).unwrap_or_default()
}

/// Floating point value at `path`, or `0.0` on any failure
pub fn get_float64(data: &[u8], path: &[&str]) -> f64 {
    with_value(data, path, |v| v.as_f64()).unwrap_or(0.0)
}

/// Boolean value at `path`, or `false` on any failure
pub fn get_bool(data: &[u8], path: &[&str]) -> bool {
    with_value(data, path, |v| v.as_bool()).unwrap_or(false)
}

/// Whether a value exists at `path`
///
/// Checks navigation only: a JSON `null` at the path exists, and the
/// value's type is never inspected. `false` for malformed documents.
pub fn exists(data: &[u8], path: &[&str]) -> bool {
    with_value(data, path, |_| Some(())).is_some()
}
