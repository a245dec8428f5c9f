// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Per-component character rules from [RFC 3986, appendix A](https://www.rfc-editor.org/rfc/rfc3986#appendix-A).

use pct_str::Encoder;

/// Identifies the part of a URI a string will occupy.
///
/// Each component allows a different set of bytes to appear unencoded. Using the
/// wrong component either leaves separators unescaped or escapes characters that
/// the server would otherwise treat as part of an identifier.
///
/// All rules follow RFC 3986 with one deliberate deviation:
/// [`QueryParam`](Self::QueryParam) always encodes `=`, `+`, `&` and `;`, since
/// the server reads the query as `application/x-www-form-urlencoded` pairs.
///
/// # Examples
///
/// ```
/// use couch_uri::ComponentType;
///
/// assert!(ComponentType::PathSegment.is_allowed(b'@'));
/// assert!(!ComponentType::PathSegment.is_allowed(b'/'));
/// assert!(ComponentType::Path.is_allowed(b'/'));
/// assert!(!ComponentType::QueryParam.is_allowed(b'+'));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentType {
    /// `scheme = ALPHA *( ALPHA / DIGIT / "+" / "-" / "." )`
    Scheme,
    /// `authority = [ userinfo "@" ] host [ ":" port ]`
    Authority,
    /// `userinfo = *( unreserved / pct-encoded / sub-delims / ":" )`
    UserInfo,
    /// An IPv4 address or registered name.
    HostIpv4,
    /// An IP literal, brackets included.
    HostIpv6,
    /// `port = *DIGIT`
    Port,
    /// A full path, `/` separators included.
    Path,
    /// A single path segment, `pchar` only.
    PathSegment,
    /// A full query component.
    Query,
    /// A single query parameter name or value.
    QueryParam,
    /// `fragment = *( pchar / "/" / "?" )`
    Fragment,
    /// Unreserved characters only.
    Uri,
}

impl ComponentType {
    /// Every component type, in declaration order.
    pub const ALL: [Self; 12] = [
        Self::Scheme,
        Self::Authority,
        Self::UserInfo,
        Self::HostIpv4,
        Self::HostIpv6,
        Self::Port,
        Self::Path,
        Self::PathSegment,
        Self::Query,
        Self::QueryParam,
        Self::Fragment,
        Self::Uri,
    ];

    /// Returns `true` if `byte` may appear unencoded in this component.
    #[must_use]
    pub const fn is_allowed(self, byte: u8) -> bool {
        match self {
            Self::Scheme => is_alpha(byte) || is_digit(byte) || matches!(byte, b'+' | b'-' | b'.'),
            Self::Authority => is_unreserved(byte) || is_sub_delimiter(byte) || matches!(byte, b':' | b'@'),
            Self::UserInfo => is_unreserved(byte) || is_sub_delimiter(byte) || byte == b':',
            Self::HostIpv4 => is_unreserved(byte) || is_sub_delimiter(byte),
            Self::HostIpv6 => is_unreserved(byte) || is_sub_delimiter(byte) || matches!(byte, b'[' | b']' | b':'),
            Self::Port => is_digit(byte),
            Self::Path => is_pchar(byte) || byte == b'/',
            Self::PathSegment => is_pchar(byte),
            Self::Query | Self::Fragment => is_pchar(byte) || matches!(byte, b'/' | b'?'),
            Self::QueryParam => !matches!(byte, b'=' | b'+' | b'&' | b';') && (is_pchar(byte) || matches!(byte, b'/' | b'?')),
            Self::Uri => is_unreserved(byte),
        }
    }
}

impl Encoder for ComponentType {
    fn encode(&self, c: char) -> bool {
        // Multi-byte characters never consist of allowed bytes.
        !u8::try_from(c).is_ok_and(|byte| byte.is_ascii() && self.is_allowed(byte))
    }
}

/// `ALPHA`
#[must_use]
pub const fn is_alpha(byte: u8) -> bool {
    byte.is_ascii_alphabetic()
}

/// `DIGIT`
#[must_use]
pub const fn is_digit(byte: u8) -> bool {
    byte.is_ascii_digit()
}

/// `gen-delims = ":" / "/" / "?" / "#" / "[" / "]" / "@"`
#[must_use]
pub const fn is_generic_delimiter(byte: u8) -> bool {
    matches!(byte, b':' | b'/' | b'?' | b'#' | b'[' | b']' | b'@')
}

/// `sub-delims = "!" / "$" / "&" / "'" / "(" / ")" / "*" / "+" / "," / ";" / "="`
#[must_use]
pub const fn is_sub_delimiter(byte: u8) -> bool {
    matches!(byte, b'!' | b'$' | b'&' | b'\'' | b'(' | b')' | b'*' | b'+' | b',' | b';' | b'=')
}

/// `reserved = gen-delims / sub-delims`
#[must_use]
pub const fn is_reserved(byte: u8) -> bool {
    is_generic_delimiter(byte) || is_sub_delimiter(byte)
}

/// `unreserved = ALPHA / DIGIT / "-" / "." / "_" / "~"`
#[must_use]
pub const fn is_unreserved(byte: u8) -> bool {
    is_alpha(byte) || is_digit(byte) || matches!(byte, b'-' | b'.' | b'_' | b'~')
}

/// `pchar = unreserved / pct-encoded / sub-delims / ":" / "@"`
///
/// `pct-encoded` is not listed: a literal `%` is always encoded.
#[must_use]
pub const fn is_pchar(byte: u8) -> bool {
    is_unreserved(byte) || is_sub_delimiter(byte) || matches!(byte, b':' | b'@')
}
