// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use http::Uri;
use serde_json::Value;

use crate::accumulator::{UriAccumulator, restore_reserved_prefix};
use crate::error::UriError;
use crate::validate::require_non_empty;
use crate::{ComponentType, QueryParams, encode, json_param_value};

const DESIGN_PREFIX: &str = "_design/";

/// Builds request URIs below a single database.
///
/// Document IDs keep the `/` after a leading `_design` or `_local`, so
/// `_design/app` addresses a design document rather than a document whose ID
/// contains an encoded slash. Every other `/` in an ID is percent-encoded.
///
/// Builders are consumed by the terminal operations ([`build`](Self::build),
/// [`document_uri`](Self::document_uri), ...). Clone the builder to reuse a prefix.
///
/// # Examples
///
/// ```
/// use couch_uri::DatabaseUri;
///
/// let base: http::Uri = "http://127.0.0.1:5984".parse()?;
/// let db = DatabaseUri::new(&base, "db_name")?;
///
/// let doc = db.clone().document_uri("_local/mylocaldoc", None)?;
/// assert_eq!(doc, "http://127.0.0.1:5984/db_name/_local/mylocaldoc");
///
/// let doc = db.document_uri("path1/path2", Some("1-967a00dff5e02add41819138abb3284d"))?;
/// assert_eq!(
///     doc,
///     "http://127.0.0.1:5984/db_name/path1%2Fpath2?rev=1-967a00dff5e02add41819138abb3284d"
/// );
/// # Ok::<_, Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone)]
pub struct DatabaseUri {
    inner: UriAccumulator,
}

impl DatabaseUri {
    /// Creates a builder for database `db_name` on the account at `account`.
    ///
    /// The name is encoded as a single path segment, so `team/db` becomes `team%2Fdb`.
    ///
    /// # Errors
    ///
    /// Returns an [`InvalidArgumentError`](crate::InvalidArgumentError) if `db_name` is empty,
    /// or an [`InvalidUriError`](crate::InvalidUriError) if `account` has no scheme or authority.
    pub fn new(account: &Uri, db_name: &str) -> Result<Self, UriError> {
        let db_name = require_non_empty(db_name, "database name")?;

        let mut inner = UriAccumulator::new(account)?;
        inner.push_segment(db_name);
        Self::from_database_uri(&inner.build()?)
    }

    /// Creates a builder from the full URI of a database.
    ///
    /// # Errors
    ///
    /// Returns an [`InvalidUriError`](crate::InvalidUriError) if `database_uri` has no scheme or authority.
    pub fn from_database_uri(database_uri: &Uri) -> Result<Self, UriError> {
        Ok(Self {
            inner: UriAccumulator::new(database_uri)?,
        })
    }

    /// The URI of the database itself.
    #[must_use]
    pub fn database_uri(&self) -> &Uri {
        self.inner.base_uri()
    }

    /// Encodes a document ID as a path segment, keeping the `/` of a leading
    /// `_design/` or `_local/`.
    ///
    /// # Errors
    ///
    /// Returns an [`EncodingError`](crate::EncodingError) if `id` is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use couch_uri::DatabaseUri;
    ///
    /// assert_eq!(DatabaseUri::encode_id("/path1/path2")?, "%2Fpath1%2Fpath2");
    /// assert_eq!(DatabaseUri::encode_id("_design/app/x")?, "_design/app%2Fx");
    /// # Ok::<_, couch_uri::UriError>(())
    /// ```
    pub fn encode_id(id: &str) -> Result<String, UriError> {
        Ok(restore_reserved_prefix(encode(id, ComponentType::PathSegment)?))
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

    /// Adds every `(name, value)` pair, in iteration order.
    #[must_use]
    pub fn query_all<I, N, V>(mut self, params: I) -> Self
    where
        I: IntoIterator<Item = (N, V)>,
        N: Into<String>,
        V: Into<String>,
    {
        for (name, value) in params {
            self.inner.query(name, value, false);
        }
        self
    }

    /// Adds every `(name, value)` pair with the value rendered by [`json_param_value`].
    #[must_use]
    pub fn query_json<I, N>(mut self, params: I) -> Self
    where
        I: IntoIterator<Item = (N, Value)>,
        N: Into<String>,
    {
        for (name, value) in params {
            self.inner.query(name, json_param_value(&value), false);
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

    /// Appends a document ID to the path.
    ///
    /// `_design/{name}` becomes the `_design` keyword followed by `name` encoded as
    /// one segment. Any other ID is encoded as one segment, with the `/` of a
    /// leading `_local/` kept.
    ///
    /// # Errors
    ///
    /// Returns an [`InvalidArgumentError`](crate::InvalidArgumentError) if `id` is empty
    /// or is `_design/` with nothing after it.
    pub fn document_id(mut self, id: &str) -> Result<Self, UriError> {
        let id = require_non_empty(id, "document ID")?;

        if let Some(name) = id.strip_prefix(DESIGN_PREFIX) {
            let name = require_non_empty(name, "design document name")?;
            self.inner.push_literal_segment("_design");
            self.inner.push_segment(name);
        } else {
            self.inner.push_segment(id);
        }
        Ok(self)
    }

    /// Appends an attachment name to the path.
    ///
    /// # Errors
    ///
    /// Returns an [`InvalidArgumentError`](crate::InvalidArgumentError) if `id` is empty.
    pub fn attachment_id(mut self, id: &str) -> Result<Self, UriError> {
        let id = require_non_empty(id, "attachment ID")?;
        self.inner.push_segment(id);
        Ok(self)
    }

    /// Targets the view `view` of design document `design_doc`.
    ///
    /// A leading `_design/` on `design_doc` is ignored.
    ///
    /// # Errors
    ///
    /// Returns an [`InvalidArgumentError`](crate::InvalidArgumentError) if the design
    /// document name or `view` is empty.
    pub fn view(self, design_doc: &str, view: &str) -> Result<Self, UriError> {
        self.design_function(design_doc, "_view", require_non_empty(view, "view name")?)
    }

    /// Targets the search index `index` of design document `design_doc`.
    ///
    /// # Errors
    ///
    /// Returns an [`InvalidArgumentError`](crate::InvalidArgumentError) if the design
    /// document name or `index` is empty.
    pub fn search(self, design_doc: &str, index: &str) -> Result<Self, UriError> {
        self.design_function(design_doc, "_search", require_non_empty(index, "search index name")?)
    }

    /// Targets the update handler `function` of design document `design_doc`.
    ///
    /// # Errors
    ///
    /// Returns an [`InvalidArgumentError`](crate::InvalidArgumentError) if the design
    /// document name or `function` is empty.
    pub fn update_handler(self, design_doc: &str, function: &str) -> Result<Self, UriError> {
        self.design_function(design_doc, "_update", require_non_empty(function, "update handler name")?)
    }

    /// Assembles and validates the URI.
    ///
    /// # Errors
    ///
    /// Returns an [`InvalidUriError`](crate::InvalidUriError) if the result is not a valid
    /// [`http::Uri`]: a raw query contains characters a URI cannot hold, or the assembled
    /// URI exceeds the length limit of `http::Uri` (just under 64 KiB). Large key lists
    /// belong in a request body instead.
    pub fn build(self) -> Result<Uri, UriError> {
        self.inner.build()
    }

    /// `{db}/{id}`, with `?rev={rev}` when a revision is given.
    ///
    /// # Errors
    ///
    /// Returns an [`InvalidArgumentError`](crate::InvalidArgumentError) if `id` is empty.
    pub fn document_uri(self, id: &str, rev: Option<&str>) -> Result<Uri, UriError> {
        self.document_id(id)?.query_param("rev", rev, true).build()
    }

    /// `{db}/{id}?{name}={value}`
    ///
    /// # Errors
    ///
    /// Returns an [`InvalidArgumentError`](crate::InvalidArgumentError) if `id` is empty.
    pub fn document_uri_with_query(self, id: &str, name: &str, value: &str) -> Result<Uri, UriError> {
        self.document_id(id)?.query(name, value).build()
    }

    /// `{db}/{id}?{params}`
    ///
    /// # Errors
    ///
    /// Returns an [`InvalidArgumentError`](crate::InvalidArgumentError) if `id` is empty.
    pub fn document_uri_with_params(self, id: &str, params: QueryParams) -> Result<Uri, UriError> {
        self.document_id(id)?.query_params(params).build()
    }

    /// `{db}/{doc_id}/{attachment_id}`, with `?rev={rev}` when a revision is given.
    ///
    /// # Errors
    ///
    /// Returns an [`InvalidArgumentError`](crate::InvalidArgumentError) if either ID is empty.
    pub fn attachment_uri(self, doc_id: &str, rev: Option<&str>, attachment_id: &str) -> Result<Uri, UriError> {
        self.document_id(doc_id)?
            .attachment_id(attachment_id)?
            .query_param("rev", rev, true)
            .build()
    }

    /// `{db}/_changes` with one query parameter per pair.
    ///
    /// Values are rendered by [`json_param_value`], except `since`: a string token is
    /// sent verbatim, and any other token (a number or an array) is sent as a quoted
    /// JSON string. A repeated name replaces the earlier value.
    ///
    /// # Errors
    ///
    /// See [`build`](Self::build).
    ///
    /// # Examples
    ///
    /// ```
    /// use couch_uri::DatabaseUri;
    /// use serde_json::json;
    ///
    /// let base: http::Uri = "http://127.0.0.1:5984".parse()?;
    /// let uri = DatabaseUri::new(&base, "test")?
    ///     .changes_uri([("limit", json!(100)), ("since", json!("\"[]\""))])?;
    ///
    /// assert_eq!(uri, "http://127.0.0.1:5984/test/_changes?limit=100&since=%22%5B%5D%22");
    /// # Ok::<_, Box<dyn std::error::Error>>(())
    /// ```
    pub fn changes_uri<I, N>(mut self, params: I) -> Result<Uri, UriError>
    where
        I: IntoIterator<Item = (N, Value)>,
        N: Into<String>,
    {
        self.inner.push_literal_segment("_changes");
        for (name, value) in params {
            self.changes_param(name.into(), &value);
        }
        self.inner.build()
    }

    /// `{db}/_changes?{name}={value}`, with `value` rendered as in [`changes_uri`](Self::changes_uri).
    ///
    /// # Errors
    ///
    /// See [`build`](Self::build).
    pub fn changes_uri_param(self, name: &str, value: Value) -> Result<Uri, UriError> {
        self.changes_uri([(name, value)])
    }

    /// `{db}/_bulk_docs`
    ///
    /// # Errors
    ///
    /// See [`build`](Self::build).
    pub fn bulk_docs_uri(self) -> Result<Uri, UriError> {
        self.keyword("_bulk_docs").build()
    }

    /// `{db}/_revs_diff`
    ///
    /// # Errors
    ///
    /// See [`build`](Self::build).
    pub fn revs_diff_uri(self) -> Result<Uri, UriError> {
        self.keyword("_revs_diff").build()
    }

    /// `{db}/_all_docs`
    ///
    /// # Errors
    ///
    /// See [`build`](Self::build).
    pub fn all_docs_uri(self) -> Result<Uri, UriError> {
        self.keyword("_all_docs").build()
    }

    /// `{db}/_find`
    ///
    /// # Errors
    ///
    /// See [`build`](Self::build).
    pub fn find_uri(self) -> Result<Uri, UriError> {
        self.keyword("_find").build()
    }

    /// `{db}/_index`
    ///
    /// # Errors
    ///
    /// See [`build`](Self::build).
    pub fn index_uri(self) -> Result<Uri, UriError> {
        self.keyword("_index").build()
    }

    /// `{db}/_index/{design_doc}/json/{name}`, used to delete a JSON index.
    ///
    /// # Errors
    ///
    /// Returns an [`InvalidArgumentError`](crate::InvalidArgumentError) if either name is empty.
    pub fn json_index_uri(self, design_doc: &str, name: &str) -> Result<Uri, UriError> {
        let design_doc = require_non_empty(design_doc, "design document")?;
        let name = require_non_empty(name, "index name")?;
        self.keyword("_index").path(design_doc).keyword("json").path(name).build()
    }

    /// `{db}/_shards`
    ///
    /// # Errors
    ///
    /// See [`build`](Self::build).
    pub fn shards_uri(self) -> Result<Uri, UriError> {
        self.keyword("_shards").build()
    }

    /// `{db}/_shards/{doc_id}`
    ///
    /// # Errors
    ///
    /// Returns an [`InvalidArgumentError`](crate::InvalidArgumentError) if `doc_id` is empty.
    pub fn document_shards_uri(self, doc_id: &str) -> Result<Uri, UriError> {
        let doc_id = require_non_empty(doc_id, "document ID")?;
        self.keyword("_shards").path(doc_id).build()
    }

    /// `{db}/_compact`
    ///
    /// # Errors
    ///
    /// See [`build`](Self::build).
    pub fn compact_uri(self) -> Result<Uri, UriError> {
        self.keyword("_compact").build()
    }

    /// `{db}/_ensure_full_commit`
    ///
    /// # Errors
    ///
    /// See [`build`](Self::build).
    pub fn ensure_full_commit_uri(self) -> Result<Uri, UriError> {
        self.keyword("_ensure_full_commit").build()
    }

    fn keyword(mut self, keyword: &'static str) -> Self {
        self.inner.push_literal_segment(keyword);
        self
    }

    fn design_function(self, design_doc: &str, kind: &'static str, name: &str) -> Result<Self, UriError> {
        let design_doc = design_doc.strip_prefix(DESIGN_PREFIX).unwrap_or(design_doc);
        let design_doc = require_non_empty(design_doc, "design document name")?;
        Ok(self.keyword("_design").path(design_doc).keyword(kind).path(name))
    }

    // Both `_changes` forms go through here so `since` is rendered the same way.
    fn changes_param(&mut self, name: String, value: &Value) {
        let value = if name == "since" { since_value(value) } else { json_param_value(value) };
        self.inner.query(name, value, true);
    }
}

/// A string token is sent verbatim. Any other token is sent as a JSON string
/// holding its JSON text, so `12` becomes `"12"`.
fn since_value(value: &Value) -> String {
    match value {
        Value::String(token) => token.clone(),
        other => Value::String(other.to_string()).to_string(),
    }
}
