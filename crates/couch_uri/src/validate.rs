// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Argument checks for identifiers sent to the server.
//!
//! The URI builders only reject empty identifiers. Callers that create or update
//! documents can use [`check_document_id`] and [`check_attachment_name`] to reject
//! names the server reserves for itself.

use crate::error::InvalidArgumentError;

const DESIGN_PREFIX: &str = "_design/";
const LOCAL_PREFIX: &str = "_local/";

/// Returns `value` unchanged if it is not empty.
///
/// # Errors
///
/// Returns an [`InvalidArgumentError`] naming `what` if `value` is empty.
///
/// # Examples
///
/// ```
/// use couch_uri::validate::require_non_empty;
///
/// assert_eq!(require_non_empty("users", "database name")?, "users");
/// assert!(require_non_empty("", "database name").is_err());
/// # Ok::<_, couch_uri::InvalidArgumentError>(())
/// ```
pub fn require_non_empty<'a>(value: &'a str, what: &str) -> Result<&'a str, InvalidArgumentError> {
    if value.is_empty() {
        return Err(InvalidArgumentError::caused_by(format!("{what} must not be empty")));
    }

    Ok(value)
}

/// Checks that `id` may be used as a document ID.
///
/// IDs starting with `_` are reserved, except for design documents (`_design/...`)
/// and local documents (`_local/...`) that have a name after the prefix.
///
/// # Errors
///
/// Returns an [`InvalidArgumentError`] if `id` is empty or uses a reserved prefix.
///
/// # Examples
///
/// ```
/// use couch_uri::validate::check_document_id;
///
/// assert!(check_document_id("invoice-42").is_ok());
/// assert!(check_document_id("_design/reports").is_ok());
/// assert!(check_document_id("_local/checkpoint").is_ok());
/// assert!(check_document_id("_design/").is_err());
/// assert!(check_document_id("_users").is_err());
/// ```
pub fn check_document_id(id: &str) -> Result<(), InvalidArgumentError> {
    require_non_empty(id, "document ID")?;

    if !id.starts_with('_') {
        return Ok(());
    }

    let name = id.strip_prefix(DESIGN_PREFIX).or_else(|| id.strip_prefix(LOCAL_PREFIX));
    match name {
        Some(name) if !name.is_empty() => Ok(()),
        Some(_) => Err(InvalidArgumentError::caused_by(
            "design and local document IDs need a name after the prefix",
        )),
        None => Err(InvalidArgumentError::caused_by(
            "document IDs starting with '_' are reserved, except '_design/' and '_local/'",
        )),
    }
}

/// Checks that `name` may be used as an attachment name.
///
/// # Errors
///
/// Returns an [`InvalidArgumentError`] if `name` is empty or starts with `_`.
pub fn check_attachment_name(name: &str) -> Result<(), InvalidArgumentError> {
    require_non_empty(name, "attachment name")?;

    if name.starts_with('_') {
        return Err(InvalidArgumentError::caused_by("attachment names starting with '_' are reserved"));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn require_non_empty_names_the_argument() {
        let err = require_non_empty("", "attachment ID").unwrap_err();
        assert!(err.to_string().starts_with("attachment ID must not be empty"));
    }

    #[test]
    fn document_ids() {
        assert!(check_document_id("plain").is_ok());
        assert!(check_document_id("with/slash").is_ok());
        assert!(check_document_id("_local/x").is_ok());
        assert!(check_document_id("_design/x/y").is_ok());

        assert!(check_document_id("").is_err());
        assert!(check_document_id("_foo").is_err());
        assert!(check_document_id("_local/").is_err());
        assert!(check_document_id("_design").is_err());

        let err = check_document_id("_design/").unwrap_err();
        assert!(err.to_string().starts_with("design and local document IDs need a name"));
    }

    #[test]
    fn attachment_names() {
        assert!(check_attachment_name("photo.jpg").is_ok());
        assert!(check_attachment_name("a_b").is_ok());
        assert!(check_attachment_name("_photo.jpg").is_err());
        assert!(check_attachment_name("").is_err());
    }
}
