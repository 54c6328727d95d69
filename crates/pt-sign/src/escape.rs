//! Path-segment percent-encoding.
//!
//! The vendor's reference client escapes both `RequestData` and `DataSign`
//! as URL path segments, which keeps `$ & + : = @` literal but escapes
//! `/ ; , ?`. Generic form/query encoders disagree on several of these
//! bytes, so the set is spelled out here.

use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Bytes escaped inside a path segment.
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~')
    .remove(b'$')
    .remove(b'&')
    .remove(b'+')
    .remove(b':')
    .remove(b'=')
    .remove(b'@');

/// Error returned when an escaped string does not decode to UTF-8.
#[derive(Debug, thiserror::Error)]
#[error("invalid percent-encoded UTF-8: {0}")]
pub struct DecodeError(#[from] std::str::Utf8Error);

/// Escape `input` so it can be placed in a URL path segment.
///
/// Non-ASCII text is encoded as its UTF-8 bytes, each as `%XX` with
/// uppercase hex.
#[must_use]
pub fn escape_path_segment(input: &str) -> String {
    utf8_percent_encode(input, PATH_SEGMENT).to_string()
}

/// Reverse [`escape_path_segment`].
///
/// `+` is left as a literal plus sign, matching path (not query) semantics.
///
/// # Errors
/// Returns `DecodeError` if the decoded bytes are not valid UTF-8.
pub fn unescape_path_segment(input: &str) -> Result<String, DecodeError> {
    let decoded = percent_decode_str(input).decode_utf8()?;
    Ok(decoded.into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_json_payload() {
        let escaped = escape_path_segment(r#"{"OrderCode":"A1","Name":"张三 x/y"}"#);
        assert_eq!(
            escaped,
            "%7B%22OrderCode%22:%22A1%22%2C%22Name%22:%22%E5%BC%A0%E4%B8%89%20x%2Fy%22%7D"
        );
    }

    #[test]
    fn keeps_path_safe_reserved_chars() {
        assert_eq!(escape_path_segment("$&+:=@-_.~"), "$&+:=@-_.~");
    }

    #[test]
    fn escapes_segment_delimiters() {
        assert_eq!(escape_path_segment("a b;c?d,e/f"), "a%20b%3Bc%3Fd%2Ce%2Ff");
    }

    #[test]
    fn leaves_base64_untouched() {
        let b64 = "YmFiYWQzYjY3Njc3ZGE5MTM1NjkyZmU3YWRjYzQyM2M=";
        assert_eq!(escape_path_segment(b64), b64);
    }

    #[test]
    fn unescape_reverses_escape() {
        let original = r#"{"CustomerName":"李四, 1+1"}"#;
        let decoded = unescape_path_segment(&escape_path_segment(original)).expect("decode");
        assert_eq!(decoded, original);
    }

    #[test]
    fn unescape_keeps_plus_literal() {
        assert_eq!(unescape_path_segment("1+1").expect("decode"), "1+1");
    }

    #[test]
    fn unescape_rejects_invalid_utf8() {
        assert!(unescape_path_segment("%FF%FE").is_err());
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Any string survives escape + unescape unchanged
        #[test]
        fn roundtrip_escape_unescape(input: String) {
            let decoded = unescape_path_segment(&escape_path_segment(&input)).unwrap();
            prop_assert_eq!(decoded, input);
        }

        /// Escaped output only contains path-safe characters and escapes
        #[test]
        fn escape_produces_path_safe_chars(input: String) {
            let escaped = escape_path_segment(&input);
            prop_assert!(escaped.chars().all(|c|
                c.is_ascii_alphanumeric() || "-_.~$&+:=@%".contains(c)
            ));
        }
    }
}
