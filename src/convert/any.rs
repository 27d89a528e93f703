use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Untyped leaf value.
///
/// Any variant renders through its natural text form, but decoding always
/// produces [`Any::String`]: the multimap carries no type information, so an
/// `Any::Int(1)` comes back as `Any::String("1")`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(untagged))]
pub enum Any {
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
}

impl Any {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Any::String(s) => Some(s),
            _ => None,
        }
    }
}

impl Default for Any {
    fn default() -> Self {
        Any::String(String::new())
    }
}

impl fmt::Display for Any {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Any::Bool(v) => f.write_str(if *v { "true" } else { "false" }),
            Any::Int(v) => f.write_str(itoa::Buffer::new().format(*v)),
            Any::Float(v) => {
                let mut buffer = ryu::Buffer::new();
                let text = buffer.format(*v);
                // integral values print without a fraction, `1` rather than `1.0`
                f.write_str(text.strip_suffix(".0").unwrap_or(text))
            }
            Any::String(v) => f.write_str(v),
        }
    }
}

impl From<bool> for Any {
    fn from(v: bool) -> Self {
        Any::Bool(v)
    }
}

impl From<i32> for Any {
    fn from(v: i32) -> Self {
        Any::Int(v.into())
    }
}

impl From<i64> for Any {
    fn from(v: i64) -> Self {
        Any::Int(v)
    }
}

impl From<f64> for Any {
    fn from(v: f64) -> Self {
        Any::Float(v)
    }
}

impl From<&str> for Any {
    fn from(v: &str) -> Self {
        Any::String(v.to_owned())
    }
}

impl From<String> for Any {
    fn from(v: String) -> Self {
        Any::String(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display() {
        assert_eq!(Any::from(true).to_string(), "true");
        assert_eq!(Any::from(-12).to_string(), "-12");
        assert_eq!(Any::from(0.5).to_string(), "0.5");
        assert_eq!(Any::from(1.0).to_string(), "1");
        assert_eq!(Any::from(-20.0).to_string(), "-20");
        assert_eq!(Any::from(1e-7).to_string(), "1e-7");
        assert_eq!(Any::from("b").to_string(), "b");
    }
}
