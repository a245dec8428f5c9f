// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
#![cfg_attr(docsrs, feature(doc_cfg))]

#![doc(
    html_logo_url = "https://media.githubusercontent.com/media/microsoft/oxidizer/refs/heads/main/crates/couch_uri/logo.png"
)]
#![doc(
    html_favicon_url = "https://media.githubusercontent.com/media/microsoft/oxidizer/refs/heads/main/crates/couch_uri/favicon.ico"
)]

//! Request URIs for CouchDB-style document database APIs.
//!
//! Document databases put user-chosen identifiers straight into the request path:
//! database names, document IDs, attachment names, design document functions. This
//! crate turns those identifiers into validated [`http::Uri`] values, percent-encoding
//! each one for the exact part of the URI it lands in.
//!
//! # Core Types
//!
//! - [`AccountUri`] - builder for account-level endpoints such as `_all_dbs` or `_replicate`
//! - [`DatabaseUri`] - builder for a database and its documents, attachments, views and `_changes` feed
//! - [`QueryParams`] - ordered query parameters, encoded on serialization
//! - [`ComponentType`] and [`encode`] - per-component percent-encoding
//!
//! # Examples
//!
//! ```rust
//! use couch_uri::{DatabaseUri, QueryParams};
//!
//! let account: http::Uri = "https://db.example.com/api/couch/account_2128459498a75498".parse()?;
//! let db = DatabaseUri::new(&account, "orders")?;
//!
//! let mut params = QueryParams::new();
//! params.revs_info().conflicts();
//!
//! let uri = db.document_uri_with_params("_design/reports", params)?;
//! assert_eq!(
//!     uri,
//!     "https://db.example.com/api/couch/account_2128459498a75498/orders/_design/reports?revs_info=true&conflicts=true"
//! );
//! # Ok::<_, Box<dyn std::error::Error>>(())
//! ```
//!
//! # Encoding rules
//!
//! Path segments encode `/`, so `path1/path2` stays one document ID
//! (`path1%2Fpath2`). The exceptions are a leading `_design/` or `_local/`, whose
//! `/` is kept so the server sees a design or local document. Query parameter
//! names and values also encode `=`, `+`, `&` and `;`.
//!
//! Raw query text passed to `raw_query` is appended as-is and must already be encoded.
//!
//! Every builder ends by parsing the text into an [`http::Uri`], which caps the length
//! of a URI just under 64 KiB. Longer URIs fail with [`InvalidUriError`], so large key
//! lists belong in a request body.
//!
//! # Features
//!
//! - `logs` - emits a `couch_uri.build` debug event through `tracing` for every
//!   assembled URI, carrying its shape but never its text.
//! - `serde` - `Serialize` and `Deserialize` for [`QueryParam`] and [`QueryParams`].

mod account;
mod accumulator;
pub mod component;
mod database;
mod encode;
mod error;
mod query;
#[cfg(test)]
mod testing;
pub mod validate;

pub use account::AccountUri;
pub use component::ComponentType;
pub use database::DatabaseUri;
pub use encode::{decode, encode, encode_with_charset};
pub use error::{EncodingError, InvalidArgumentError, InvalidUriError, UriError};
pub use query::{QueryParam, QueryParams, json_param_value};
