// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use http::uri::{InvalidUri, InvalidUriParts};

/// A required identifier or argument was empty or otherwise unusable.
///
/// Raised before any encoding happens, for example when a document ID,
/// attachment ID or database name is empty.
#[ohno::error]
pub struct InvalidArgumentError;

/// Text could not be percent-encoded or decoded.
///
/// Encoding always works on UTF-8 bytes, so in practice this surfaces only for
/// empty input, an unsupported charset name, or malformed percent-encoded text.
#[ohno::error]
pub struct EncodingError;

/// The assembled text is not a syntactically valid URI.
///
/// Wraps the `http` crate's parse error, available through `source()`.
#[ohno::error]
#[from(http::Error)]
pub struct InvalidUriError;

/// `InvalidUri` is a flavor of `http::Error`
impl From<InvalidUri> for InvalidUriError {
    fn from(err: InvalidUri) -> Self {
        Self::from(http::Error::from(err))
    }
}

/// `InvalidUriParts` is a flavor of `http::Error`
impl From<InvalidUriParts> for InvalidUriError {
    fn from(err: InvalidUriParts) -> Self {
        Self::from(http::Error::from(err))
    }
}

/// Errors returned by the URI builders.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum UriError {
    /// See [`InvalidArgumentError`].
    #[error(transparent)]
    InvalidArgument(#[from] InvalidArgumentError),
    /// See [`EncodingError`].
    #[error(transparent)]
    Encoding(#[from] EncodingError),
    /// See [`InvalidUriError`].
    #[error(transparent)]
    InvalidUri(#[from] InvalidUriError),
}

impl UriError {
    /// Returns `true` if this is an [`InvalidArgumentError`].
    #[must_use]
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument(_))
    }

    /// Returns `true` if this is an [`EncodingError`].
    #[must_use]
    pub fn is_encoding(&self) -> bool {
        matches!(self, Self::Encoding(_))
    }

    /// Returns `true` if this is an [`InvalidUriError`].
    #[must_use]
    pub fn is_invalid_uri(&self) -> bool {
        matches!(self, Self::InvalidUri(_))
    }
}

impl From<InvalidUri> for UriError {
    fn from(err: InvalidUri) -> Self {
        Self::InvalidUri(err.into())
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error;

    use super::*;

    #[test]
    fn invalid_argument_display() {
        let error = InvalidArgumentError::caused_by("document ID must not be empty");
        let display = error.to_string();
        assert!(display.starts_with("document ID must not be empty"), "Unexpected message: {display}");
    }

    #[test]
    fn invalid_uri_from_http_error_has_source() {
        let invalid_uri = "http://[::1:invalid".parse::<http::Uri>().unwrap_err();
        let error = InvalidUriError::from(invalid_uri);

        assert!(!error.to_string().is_empty());
        assert!(error.source().is_some(), "should expose the http error as source");
    }

    #[test]
    fn uri_error_is_transparent() {
        let error = UriError::from(EncodingError::caused_by("unsupported charset: latin1"));
        assert!(error.is_encoding());
        assert!(!error.is_invalid_argument());
        assert!(!error.is_invalid_uri());
        assert!(error.to_string().starts_with("unsupported charset: latin1"));
    }

    #[test]
    fn uri_error_from_invalid_uri() {
        let invalid_uri = "http://exa mple.com".parse::<http::Uri>().unwrap_err();
        let error = UriError::from(invalid_uri);
        assert!(error.is_invalid_uri());
    }
}
