//! Flat querystring text to and from [`Multimap`].
//!
//! Only the flat form is supported: `key=value` pairs joined by `&`, with a
//! repeated key carrying multiple values. Keys and values are
//! percent-encoded; `+` decodes to a space.

mod decode;
mod encode;

use crate::error::Result;
use crate::multimap::Multimap;

/// Renders a multimap as a querystring, keys in insertion order and values
/// in order within each key.
///
/// A key bound to no values is left out.
///
/// ```
/// use qs_form::{Multimap, query};
///
/// let map: Multimap = [("q", "a b"), ("tag", "x&y"), ("tag", "z")].into_iter().collect();
/// assert_eq!(query::to_string(&map, false), "q=a+b&tag=x%26y&tag=z");
/// assert_eq!(query::to_string(&map, true), "q=a%20b&tag=x%26y&tag=z");
/// ```
pub fn to_string(input: &Multimap, use_form_encoding: bool) -> String {
    let mut output = String::new();
    for (key, values) in input {
        for value in values {
            if !output.is_empty() {
                output.push('&');
            }
            encode::encode_into(&mut output, key, use_form_encoding);
            output.push('=');
            encode::encode_into(&mut output, value, use_form_encoding);
        }
    }
    output
}

/// Parses a querystring into a multimap.
///
/// Empty segments are skipped and a segment without `=` binds its key to
/// the empty string. Malformed percent escapes are kept as literal text.
///
/// ```
/// use qs_form::query;
///
/// let map = query::parse("a=1&&b&a=2&c=%7E+x").unwrap();
/// assert_eq!(map.get("a"), Some(&["1".to_owned(), "2".to_owned()][..]));
/// assert_eq!(map.first("b"), Some(""));
/// assert_eq!(map.first("c"), Some("~ x"));
/// ```
pub fn parse(input: &str) -> Result<Multimap> {
    let mut output = Multimap::new();
    for segment in input.split('&').filter(|segment| !segment.is_empty()) {
        let (key, value) = segment.split_once('=').unwrap_or((segment, ""));
        let key = decode::decode(key)?;
        let value = decode::decode(value)?;
        output.append(&key, value);
    }
    Ok(output)
}
