// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use http::Uri;

use crate::accumulator::UriAccumulator;
use crate::error::{InvalidUriError, UriError};
use crate::QueryParams;
use crate::validate::require_non_empty;

/// Builds request URIs below an account (server) root.
///
/// The base URI may carry a path, for example when the server sits behind a proxy
/// at `/api/couch/account_2128459498a75498`. Every segment added with
/// [`path`](Self::path) is percent-encoded as a single path segment, and empty
/// segments are skipped.
///
/// # Examples
///
/// ```
/// use couch_uri::AccountUri;
///
/// let uri = AccountUri::from_uri_str("https://db.example.com")?
///     .path("")
///     .path("api")
///     .path("couch")
///     .query("descending", "true")
///     .build()?;
///
/// assert_eq!(uri, "https://db.example.com/api/couch?descending=true");
///
/// let all_dbs = AccountUri::from_uri_str("https://db.example.com")?.all_dbs_uri()?;
/// assert_eq!(all_dbs, "https://db.example.com/_all_dbs");
/// # Ok::<_, couch_uri::UriError>(())
/// ```
#[derive(Debug, Clone)]
pub struct AccountUri {
    inner: UriAccumulator,
}

impl AccountUri {
    /// Creates a builder rooted at `base`.
    ///
    /// # Errors
    ///
    /// Returns an [`InvalidUriError`] if `base` has no scheme or no authority.
    pub fn new(base: &Uri) -> Result<Self, UriError> {
        Ok(Self {
            inner: UriAccumulator::new(base)?,
        })
    }

    /// Parses `base` and creates a builder rooted at it.
    ///
    /// # Errors
    ///
    /// Returns an [`InvalidUriError`] if `base` does not parse or has no scheme or authority.
    pub fn from_uri_str(base: &str) -> Result<Self, UriError> {
        let base = base.parse::<Uri>().map_err(InvalidUriError::from)?;
        Self::new(&base)
    }

    /// The URI this builder was created from.
    #[must_use]
    pub fn base_uri(&self) -> &Uri {
        self.inner.base_uri()
    }

    /// Appends a path segment, percent-encoding `/` and other reserved characters.
    #[must_use]
    pub fn path(mut self, segment: impl AsRef<str>) -> Self {
        self.inner.push_segment(segment.as_ref());
        self
    }

    /// Sets a query parameter, replacing an earlier one with the same name.
    #[must_use]
    pub fn query(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.inner.query(name, value, true);
        self
    }

    /// Adds a query parameter, keeping earlier ones with the same name.
    #[must_use]
    pub fn add_query(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.inner.query(name, value, false);
        self
    }

    /// Adds or replaces a query parameter if `value` is present.
    #[must_use]
    pub fn query_param<V: Into<String>>(mut self, name: impl Into<String>, value: Option<V>, replace: bool) -> Self {
        if let Some(value) = value {
            self.inner.query(name, value, replace);
        }
        self
    }

    /// Appends all of `params` after the parameters added so far.
    #[must_use]
    pub fn query_params(mut self, params: QueryParams) -> Self {
        self.inner.merge_params(params);
        self
    }

    /// Appends already encoded query text after the other parameters.
    #[must_use]
    pub fn raw_query(mut self, query: impl Into<String>) -> Self {
        self.inner.raw_query(query.into());
        self
    }

    /// Assembles and validates the URI.
    ///
    /// # Errors
    ///
    /// Returns an [`InvalidUriError`] if the result is not a valid [`http::Uri`]: a raw
    /// query contains characters a URI cannot hold, or the assembled URI exceeds the
    /// length limit of `http::Uri` (just under 64 KiB).
    pub fn build(self) -> Result<Uri, UriError> {
        self.inner.build()
    }

    /// `{base}/_all_dbs`
    ///
    /// # Errors
    ///
    /// See [`build`](Self::build).
    pub fn all_dbs_uri(self) -> Result<Uri, UriError> {
        self.keyword("_all_dbs").build()
    }

    /// `{base}/_active_tasks`
    ///
    /// # Errors
    ///
    /// See [`build`](Self::build).
    pub fn active_tasks_uri(self) -> Result<Uri, UriError> {
        self.keyword("_active_tasks").build()
    }

    /// `{base}/_membership`
    ///
    /// # Errors
    ///
    /// See [`build`](Self::build).
    pub fn membership_uri(self) -> Result<Uri, UriError> {
        self.keyword("_membership").build()
    }

    /// `{base}/_replicate`
    ///
    /// # Errors
    ///
    /// See [`build`](Self::build).
    pub fn replicate_uri(self) -> Result<Uri, UriError> {
        self.keyword("_replicate").build()
    }

    /// `{base}/_uuids?count={count}`
    ///
    /// # Errors
    ///
    /// See [`build`](Self::build).
    pub fn uuids_uri(self, count: u32) -> Result<Uri, UriError> {
        self.keyword("_uuids").query("count", count.to_string()).build()
    }

    /// `{base}/_api/v2/api_keys`, the endpoint that generates API keys.
    ///
    /// # Errors
    ///
    /// See [`build`](Self::build).
    pub fn api_keys_uri(self) -> Result<Uri, UriError> {
        self.keyword("_api").path("v2").path("api_keys").build()
    }

    /// `{base}/_api/v2/db/{db}/_security`, where the account-level permissions of a database live.
    ///
    /// # Errors
    ///
    /// Returns an [`InvalidArgumentError`](crate::InvalidArgumentError) if `db_name` is empty.
    pub fn db_security_uri(self, db_name: &str) -> Result<Uri, UriError> {
        let db_name = require_non_empty(db_name, "database name")?;
        self.keyword("_api")
            .path("v2")
            .path("db")
            .path(db_name)
            .keyword("_security")
            .build()
    }

    /// `{base}/_scheduler/jobs`
    ///
    /// # Errors
    ///
    /// See [`build`](Self::build).
    pub fn scheduler_jobs_uri(self) -> Result<Uri, UriError> {
        self.keyword("_scheduler").path("jobs").build()
    }

    /// `{base}/_scheduler/docs`
    ///
    /// # Errors
    ///
    /// See [`build`](Self::build).
    pub fn scheduler_docs_uri(self) -> Result<Uri, UriError> {
        self.keyword("_scheduler").path("docs").build()
    }

    /// `{base}/_scheduler/docs/{replicator_db}/{doc_id}`, the state of one replication document.
    ///
    /// # Errors
    ///
    /// Returns an [`InvalidArgumentError`](crate::InvalidArgumentError) if either name is empty.
    pub fn scheduler_doc_uri(self, replicator_db: &str, doc_id: &str) -> Result<Uri, UriError> {
        let replicator_db = require_non_empty(replicator_db, "replicator database name")?;
        let doc_id = require_non_empty(doc_id, "document ID")?;
        self.keyword("_scheduler")
            .path("docs")
            .path(replicator_db)
            .path(doc_id)
            .build()
    }

    fn keyword(mut self, keyword: &'static str) -> Self {
        self.inner.push_literal_segment(keyword);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "http://127.0.0.1:5984";

    fn account() -> AccountUri {
        AccountUri::from_uri_str(BASE).unwrap()
    }

    #[test]
    fn bare_base_builds_root() {
        assert_eq!(account().build().unwrap().to_string(), "http://127.0.0.1:5984/");
    }

    #[test]
    fn empty_path_segments_do_not_double_slashes() {
        let uri = account().path("").path("api").path("couch").build().unwrap();
        assert_eq!(uri.to_string(), "http://127.0.0.1:5984/api/couch");
    }

    #[test]
    fn base_without_authority_is_rejected() {
        let err = AccountUri::new(&Uri::from_static("/relative")).unwrap_err();
        assert!(err.is_invalid_uri());

        let err = AccountUri::from_uri_str("http://exa mple.com").unwrap_err();
        assert!(err.is_invalid_uri());
    }

    #[test]
    fn base_uri_is_kept() {
        let base: Uri = "http://127.0.0.1:5984/prefix".parse().unwrap();
        let account = AccountUri::new(&base).unwrap().path("x");
        assert_eq!(account.base_uri(), &base);
    }

    #[test]
    fn query_param_none_is_noop() {
        let uri = account()
            .query_param("rev", None::<&str>, true)
            .query_param("limit", Some("5"), false)
            .build()
            .unwrap();
        assert_eq!(uri.query(), Some("limit=5"));
    }

    #[test]
    fn query_replaces_add_query_appends() {
        let uri = account()
            .query("a", "1")
            .query("a", "2")
            .add_query("b", "1")
            .add_query("b", "2")
            .build()
            .unwrap();
        assert_eq!(uri.query(), Some("a=2&b=1&b=2"));
    }

    #[test]
    fn query_params_merge() {
        let mut params = QueryParams::new();
        params.conflicts().rev("1-x");
        let uri = account().query("a", "1").query_params(params).build().unwrap();
        assert_eq!(uri.query(), Some("a=1&conflicts=true&rev=1-x"));
    }

    #[test]
    fn raw_query_invalid_characters_fail() {
        let err = account().raw_query("a=b c").build().unwrap_err();
        assert!(err.is_invalid_uri());
    }

    #[test]
    fn endpoints() {
        assert_eq!(account().all_dbs_uri().unwrap(), "http://127.0.0.1:5984/_all_dbs");
        assert_eq!(account().active_tasks_uri().unwrap(), "http://127.0.0.1:5984/_active_tasks");
        assert_eq!(account().membership_uri().unwrap(), "http://127.0.0.1:5984/_membership");
        assert_eq!(account().replicate_uri().unwrap(), "http://127.0.0.1:5984/_replicate");
        assert_eq!(account().uuids_uri(3).unwrap(), "http://127.0.0.1:5984/_uuids?count=3");
        assert_eq!(account().api_keys_uri().unwrap(), "http://127.0.0.1:5984/_api/v2/api_keys");
        assert_eq!(account().scheduler_jobs_uri().unwrap(), "http://127.0.0.1:5984/_scheduler/jobs");
        assert_eq!(account().scheduler_docs_uri().unwrap(), "http://127.0.0.1:5984/_scheduler/docs");
    }

    #[test]
    fn endpoints_reject_empty_names() {
        assert!(account().db_security_uri("").unwrap_err().is_invalid_argument());
        assert!(account().scheduler_doc_uri("", "doc").unwrap_err().is_invalid_argument());
        assert!(account().scheduler_doc_uri("_replicator", "").unwrap_err().is_invalid_argument());
        assert!(account().scheduler_doc_uri("", "").unwrap_err().is_invalid_argument());
    }

    #[test]
    fn oversized_uri_is_invalid() {
        let err = account().path("k".repeat(70_000)).build().unwrap_err();
        assert!(err.is_invalid_uri(), "{err}");
    }

    #[test]
    fn endpoints_encode_names() {
        assert_eq!(
            account().db_security_uri("team/db").unwrap(),
            "http://127.0.0.1:5984/_api/v2/db/team%2Fdb/_security"
        );
        assert_eq!(
            account().scheduler_doc_uri("_replicator", "my doc").unwrap(),
            "http://127.0.0.1:5984/_scheduler/docs/_replicator/my%20doc"
        );
    }
}
