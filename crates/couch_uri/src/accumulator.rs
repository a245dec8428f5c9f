// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use http::Uri;
use pct_str::PctString;

use crate::error::{InvalidUriError, UriError};
use crate::{ComponentType, QueryParams};

const RESERVED_PREFIXES: [&str; 2] = ["_design%2F", "_local%2F"];

/// Shared state behind [`AccountUri`](crate::AccountUri) and [`DatabaseUri`](crate::DatabaseUri).
///
/// `base` never ends with `/`, and `path` is either empty or a sequence of
/// `/`-prefixed, already encoded segments.
#[derive(Debug, Clone)]
pub(crate) struct UriAccumulator {
    base_uri: Uri,
    base: String,
    path: String,
    params: QueryParams,
    raw_query: Option<String>,
}

impl UriAccumulator {
    /// Starts from `base_uri`, keeping its path as a prefix and dropping any query.
    pub(crate) fn new(base_uri: &Uri) -> Result<Self, InvalidUriError> {
        let (Some(scheme), Some(authority)) = (base_uri.scheme_str(), base_uri.authority()) else {
            return Err(InvalidUriError::caused_by("base URI must have a scheme and an authority"));
        };

        let base = format!("{scheme}://{authority}{}", base_uri.path().trim_end_matches('/'));

        Ok(Self {
            base_uri: base_uri.clone(),
            base,
            path: String::new(),
            params: QueryParams::new(),
            raw_query: None,
        })
    }

    pub(crate) fn base_uri(&self) -> &Uri {
        &self.base_uri
    }

    /// Appends one encoded path segment. Empty segments are ignored.
    pub(crate) fn push_segment(&mut self, segment: &str) {
        if segment.is_empty() {
            return;
        }

        self.path.push('/');
        self.path.push_str(&encode_segment(segment));
    }

    /// Appends a keyword such as `_changes` as-is.
    pub(crate) fn push_literal_segment(&mut self, keyword: &'static str) {
        self.path.push('/');
        self.path.push_str(keyword);
    }

    pub(crate) fn query(&mut self, name: impl Into<String>, value: impl Into<String>, replace: bool) {
        if replace {
            self.params.replace_or_add(name, value);
        } else {
            self.params.add_param(name, value);
        }
    }

    pub(crate) fn merge_params(&mut self, params: QueryParams) {
        self.params.merge(params);
    }

    pub(crate) fn raw_query(&mut self, query: String) {
        self.raw_query = Some(query);
    }

    pub(crate) fn build(self) -> Result<Uri, UriError> {
        #[cfg(any(feature = "logs", test))]
        tracing::event!(
            name: "couch_uri.build",
            tracing::Level::DEBUG,
            uri.path_length = self.path.len(),
            uri.param_count = self.params.len(),
            uri.has_raw_query = self.raw_query.is_some(),
        );

        let mut text = self.base;
        text.push_str(&self.path);

        if !self.params.is_empty() {
            text.push('?');
            text.push_str(&self.params.serialize());
        }

        if let Some(raw_query) = self.raw_query.as_deref().filter(|q| !q.is_empty()) {
            text.push(if self.params.is_empty() { '?' } else { '&' });
            text.push_str(raw_query);
        }

        text.parse::<Uri>().map_err(UriError::from)
    }
}

/// `PathSegment` encoding that keeps the `/` after a leading `_design` or `_local`.
pub(crate) fn encode_segment(segment: &str) -> String {
    restore_reserved_prefix(PctString::encode(segment.chars(), ComponentType::PathSegment).into_string())
}

pub(crate) fn restore_reserved_prefix(mut encoded: String) -> String {
    if let Some(prefix) = RESERVED_PREFIXES.iter().find(|prefix| encoded.starts_with(*prefix)) {
        let slash = prefix.len() - "%2F".len();
        encoded.replace_range(slash..prefix.len(), "/");
    }
    encoded
}
