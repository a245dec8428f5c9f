// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use pct_str::{PctStr, PctString};

use crate::ComponentType;
use crate::error::EncodingError;

/// Percent-encodes `source` for use in the given URI component.
///
/// The string is processed as UTF-8 bytes. Bytes allowed by `component` are copied,
/// every other byte becomes `%` followed by two uppercase hex digits. The result is
/// always ASCII.
///
/// # Errors
///
/// Returns an [`EncodingError`] if `source` is empty.
///
/// # Examples
///
/// ```
/// use couch_uri::{ComponentType, encode};
///
/// assert_eq!(encode("a/b c", ComponentType::PathSegment)?, "a%2Fb%20c");
/// assert_eq!(encode("a/b c", ComponentType::Path)?, "a/b%20c");
/// assert_eq!(encode("x=1&y", ComponentType::QueryParam)?, "x%3D1%26y");
/// assert_eq!(encode("é", ComponentType::Uri)?, "%C3%A9");
/// # Ok::<_, couch_uri::EncodingError>(())
/// ```
pub fn encode(source: &str, component: ComponentType) -> Result<String, EncodingError> {
    if source.is_empty() {
        return Err(EncodingError::caused_by("cannot percent-encode an empty string"));
    }

    Ok(PctString::encode(source.chars(), component).into_string())
}

/// Like [`encode`], but takes the name of the text encoding of `source`.
///
/// Only UTF-8 is supported, spelled `UTF-8` or `utf8` in any case.
///
/// # Errors
///
/// Returns an [`EncodingError`] if `charset` names any other encoding or `source` is empty.
///
/// # Examples
///
/// ```
/// use couch_uri::{ComponentType, encode_with_charset};
///
/// assert_eq!(encode_with_charset("a b", "UTF-8", ComponentType::Query)?, "a%20b");
/// assert!(encode_with_charset("a b", "ISO-8859-1", ComponentType::Query).is_err());
/// # Ok::<_, couch_uri::EncodingError>(())
/// ```
pub fn encode_with_charset(source: &str, charset: &str, component: ComponentType) -> Result<String, EncodingError> {
    if !is_utf8(charset) {
        return Err(EncodingError::caused_by(format!("unsupported charset: {charset}")));
    }

    encode(source, component)
}

/// Reverses percent-encoding, yielding the original UTF-8 text.
///
/// # Errors
///
/// Returns an [`EncodingError`] if `encoded` contains a `%` that is not followed by
/// two hex digits, or if the decoded bytes are not valid UTF-8.
///
/// # Examples
///
/// ```
/// use couch_uri::decode;
///
/// assert_eq!(decode("_design%2Ffoo%20bar")?, "_design/foo bar");
/// assert!(decode("100%").is_err());
/// # Ok::<_, couch_uri::EncodingError>(())
/// ```
pub fn decode(encoded: &str) -> Result<String, EncodingError> {
    let Ok(pct) = PctStr::new(encoded) else {
        return Err(EncodingError::caused_by(format!("malformed percent-encoded text: {encoded}")));
    };

    Ok(pct.decode())
}

fn is_utf8(charset: &str) -> bool {
    charset.eq_ignore_ascii_case("utf-8") || charset.eq_ignore_ascii_case("utf8")
}
