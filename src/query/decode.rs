use std::borrow::Cow;
use std::str::Utf8Error;

#[inline(always)]
fn hex_digit(c: u8) -> Option<u8> {
    char::from(c).to_digit(16).map(|d| d as u8)
}

/// Decodes one key or value: `+` becomes a space and `%XX` escapes become
/// bytes. A `%` not followed by two hex digits is kept as is.
///
/// Borrows the input when there is nothing to decode.
pub fn decode(input: &str) -> Result<Cow<'_, str>, Utf8Error> {
    let bytes = input.as_bytes();
    if !bytes.iter().any(|&b| b == b'+' || b == b'%') {
        return Ok(Cow::Borrowed(input));
    }

    let mut decoded = Vec::with_capacity(bytes.len());
    let mut idx = 0;
    while idx < bytes.len() {
        match bytes[idx] {
            b'+' => {
                decoded.push(b' ');
                idx += 1;
            }
            b'%' => {
                let escape = bytes
                    .get(idx + 1)
                    .and_then(|&h| hex_digit(h))
                    .zip(bytes.get(idx + 2).and_then(|&l| hex_digit(l)));
                match escape {
                    Some((h, l)) => {
                        decoded.push(h * 0x10 + l);
                        idx += 3;
                    }
                    None => {
                        decoded.push(b'%');
                        idx += 1;
                    }
                }
            }
            b => {
                decoded.push(b);
                idx += 1;
            }
        }
    }

    match String::from_utf8(decoded) {
        Ok(decoded) => Ok(Cow::Owned(decoded)),
        Err(err) => Err(err.utf8_error()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn borrows_plain_input() {
        assert!(matches!(decode("plain").unwrap(), Cow::Borrowed("plain")));
    }

    #[test]
    fn decodes_escapes_and_plus() {
        assert_eq!(decode("a+b%20c%C3%A9").unwrap(), "a b cé");
    }

    #[test]
    fn malformed_escapes_are_literal() {
        assert_eq!(decode("100%").unwrap(), "100%");
        assert_eq!(decode("%zz%4").unwrap(), "%zz%4");
        assert_eq!(decode("%%41").unwrap(), "%A");
    }
}
