//! Errors produced while encoding and decoding records.

use std::str::Utf8Error;

use thiserror::Error;

/// Boxed error type carried by [`Error::Custom`].
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Error type for `qs_form`.
#[derive(Debug, Error)]
pub enum Error {
    /// The top-level value handed to `encode`/`decode` is not a record.
    #[error("expected a record, found `{0}`")]
    Type(&'static str),

    /// A leaf type has no string conversion for the requested direction.
    #[error("no string conversion found for `{0}`")]
    ConversionNotFound(&'static str),

    /// Malformed numeric or boolean text.
    #[error("failed to parse {kind} from {value:?}: {message}")]
    Parse {
        kind: &'static str,
        value: String,
        message: String,
    },

    /// Error returned verbatim by a type's own `Marshal`/`Unmarshal`.
    #[error(transparent)]
    Custom(BoxError),

    /// The record declaration is invalid.
    #[error("invalid record declaration: {0}")]
    Descriptor(#[from] DescriptorError),

    /// Percent-decoded query text is not valid UTF-8.
    #[error(transparent)]
    Utf8(#[from] Utf8Error),
}

impl Error {
    /// Wraps an arbitrary error so it passes through the engine untouched.
    pub fn custom<E>(err: E) -> Self
    where
        E: Into<BoxError>,
    {
        Error::Custom(err.into())
    }

    pub(crate) fn parse<E: std::fmt::Display>(kind: &'static str, value: &str, err: E) -> Self {
        Error::Parse {
            kind,
            value: value.to_owned(),
            message: err.to_string(),
        }
    }

    /// Returns the inner error of a [`Error::Custom`].
    pub fn as_custom(&self) -> Option<&(dyn std::error::Error + Send + Sync + 'static)> {
        match self {
            Error::Custom(err) => Some(err.as_ref()),
            _ => None,
        }
    }
}

/// Problems found while building a record's descriptor.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum DescriptorError {
    #[error("`{record}` reaches {count} catch-all map fields, at most one is allowed")]
    DuplicateCatchAll { record: &'static str, count: usize },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn custom_error_is_transparent() {
        let err = Error::custom("boom");
        assert_eq!(err.to_string(), "boom");
        assert_eq!(err.as_custom().map(|e| e.to_string()), Some("boom".into()));
    }

    #[test]
    fn parse_error_names_kind_and_value() {
        let err = Error::parse("bool", "yes", "invalid syntax");
        assert_eq!(
            err.to_string(),
            "failed to parse bool from \"yes\": invalid syntax"
        );
    }
}
