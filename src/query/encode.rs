use percent_encoding::AsciiSet;

/// As defined in https://url.spec.whatwg.org/#query-percent-encode-set
///
/// The minimal set for a query: controls, space (written as `+`), `"`, `#`,
/// `<` and `>`. On top of that come the characters that would otherwise be
/// read back as querystring syntax, since only keys and values pass through
/// here.
const MINIMAL_QS_SET: &AsciiSet = &percent_encoding::CONTROLS
    .add(b'"')
    .add(b'#')
    .add(b'<')
    .add(b'>')
    // `+` stands for a space
    .add(b'+')
    // escape introducer
    .add(b'%')
    .add(b'[')
    .add(b']')
    // key, value separator
    .add(b'=')
    // pair separator
    .add(b'&');

/// As defined in https://url.spec.whatwg.org/#application-x-www-form-urlencoded-percent-encode-set
///
/// Everything except ASCII alphanumerics, `*`, `-`, `.` and `_`.
const FORM_URLENCODED_SET: &AsciiSet = &percent_encoding::NON_ALPHANUMERIC
    .remove(b'*')
    .remove(b'-')
    .remove(b'.')
    .remove(b'_');

/// Appends `input` to `output`, percent-encoded.
///
/// With the minimal set spaces become `+`; form encoding writes them as
/// `%20`.
pub fn encode_into(output: &mut String, input: &str, use_form_encoding: bool) {
    let set = if use_form_encoding {
        FORM_URLENCODED_SET
    } else {
        MINIMAL_QS_SET
    };
    for chunk in percent_encoding::utf8_percent_encode(input, set) {
        if !use_form_encoding && chunk.contains(' ') {
            output.extend(chunk.chars().map(|c| if c == ' ' { '+' } else { c }));
        } else {
            output.push_str(chunk);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode(input: &str, use_form_encoding: bool) -> String {
        let mut output = String::new();
        encode_into(&mut output, input, use_form_encoding);
        output
    }

    #[test]
    fn minimal_set_keeps_punctuation() {
        assert_eq!(encode("a b/c,d", false), "a+b/c,d");
        assert_eq!(encode("é", false), "%C3%A9");
        assert_eq!(encode("100%", false), "100%25");
    }

    #[test]
    fn form_set_escapes_punctuation() {
        assert_eq!(encode("a b/c,d", true), "a%20b%2Fc%2Cd");
        assert_eq!(encode("x-y_z.*", true), "x-y_z.*");
    }
}
