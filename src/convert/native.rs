//! The native scalar table.

use super::{Any, Scalar, ScalarMut};
use crate::config::FloatFormat;
use crate::error::{Error, Result};

pub(super) fn format(scalar: Scalar<'_>, float_format: FloatFormat) -> String {
    match scalar {
        Scalar::Bool(v) => if v { "true" } else { "false" }.to_owned(),
        Scalar::Int(v) => itoa::Buffer::new().format(v).to_owned(),
        Scalar::Uint(v) => itoa::Buffer::new().format(v).to_owned(),
        Scalar::F32(v) => match float_format {
            FloatFormat::Fixed => format!("{v:.16}"),
            FloatFormat::Shortest => ryu::Buffer::new().format(v).to_owned(),
        },
        Scalar::F64(v) => match float_format {
            FloatFormat::Fixed => format!("{v:.32}"),
            FloatFormat::Shortest => ryu::Buffer::new().format(v).to_owned(),
        },
        Scalar::Str(v) => v.to_owned(),
        Scalar::Any(v) => v.to_string(),
    }
}

/// Parses `src` into `slot`.
///
/// Empty input leaves numeric and boolean slots unmodified. Strings and
/// `Any` take the input as-is and never fail.
pub(super) fn parse(slot: ScalarMut<'_>, src: &str) -> Result<()> {
    match slot {
        ScalarMut::Str(s) => src.clone_into(s),
        ScalarMut::Any(v) => *v = Any::String(src.to_owned()),
        _ if src.is_empty() => {}
        ScalarMut::Bool(v) => *v = parse_bool(src)?,
        ScalarMut::Int(slot) => {
            let value = src
                .parse::<i64>()
                .map_err(|err| Error::parse("integer", src, err))?;
            slot.set(value);
        }
        ScalarMut::Uint(_) if src.starts_with('+') => {
            return Err(Error::parse("unsigned integer", src, "invalid syntax"));
        }
        ScalarMut::Uint(slot) => {
            let value = src
                .parse::<u64>()
                .map_err(|err| Error::parse("unsigned integer", src, err))?;
            slot.set(value);
        }
        ScalarMut::F32(v) => {
            *v = src
                .parse::<f32>()
                .map_err(|err| Error::parse("float", src, err))?;
        }
        ScalarMut::F64(v) => {
            *v = src
                .parse::<f64>()
                .map_err(|err| Error::parse("float", src, err))?;
        }
    }
    Ok(())
}

fn parse_bool(src: &str) -> Result<bool> {
    match src {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Ok(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Ok(false),
        _ => Err(Error::parse("bool", src, "invalid syntax")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::convert::IntSlot;

    #[test]
    fn fixed_floats() {
        assert_eq!(
            format(Scalar::F32(std::f32::consts::E), FloatFormat::Fixed),
            "2.7182817459106445"
        );
        assert_eq!(
            format(Scalar::F64(std::f64::consts::PI), FloatFormat::Fixed),
            "3.14159265358979311599796346854419"
        );
    }

    #[test]
    fn shortest_floats() {
        assert_eq!(format(Scalar::F32(0.1), FloatFormat::Shortest), "0.1");
        assert_eq!(format(Scalar::F64(2.5), FloatFormat::Shortest), "2.5");
    }

    #[test]
    fn empty_input_keeps_value() {
        let mut flag = true;
        parse(ScalarMut::Bool(&mut flag), "").unwrap();
        assert!(flag);

        let mut n = 7i32;
        parse(ScalarMut::Int(IntSlot::I32(&mut n)), "").unwrap();
        assert_eq!(n, 7);

        let mut s = "keep".to_string();
        parse(ScalarMut::Str(&mut s), "").unwrap();
        assert_eq!(s, "");
    }

    #[test]
    fn bool_spellings() {
        for (src, expected) in [("1", true), ("T", true), ("True", true), ("f", false), ("FALSE", false)] {
            assert_eq!(parse_bool(src).unwrap(), expected, "{src}");
        }
        assert!(matches!(
            parse_bool("yes"),
            Err(Error::Parse { kind: "bool", .. })
        ));
    }

    #[test]
    fn malformed_numbers() {
        let mut n = 0i64;
        let err = parse(ScalarMut::Int(IntSlot::I64(&mut n)), "a").unwrap_err();
        assert!(matches!(err, Error::Parse { kind: "integer", .. }));

        let mut f = 0f64;
        assert!(parse(ScalarMut::F64(&mut f), "x1").is_err());
        parse(ScalarMut::F64(&mut f), "2.25").unwrap();
        assert_eq!(f, 2.25);
    }
}
