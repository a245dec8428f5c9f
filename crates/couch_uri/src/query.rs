// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::borrow::Cow;
use std::fmt;
use std::fmt::Display;

use pct_str::PctString;

use crate::ComponentType;

/// A single `name=value` query parameter.
///
/// Values are stored unencoded and encoded on serialization.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct QueryParam {
    name: String,
    value: String,
}

impl QueryParam {
    /// Creates a new parameter.
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    /// The unencoded parameter name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The unencoded parameter value.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Returns `name=value` with both sides percent-encoded for a query parameter.
    ///
    /// ```
    /// use couch_uri::QueryParam;
    ///
    /// let param = QueryParam::new("q", "class:mammal+with+plusses");
    /// assert_eq!(param.to_url_encoded(), "q=class:mammal%2Bwith%2Bplusses");
    /// assert_eq!(QueryParam::new("key", "").to_url_encoded(), "key=");
    /// ```
    #[must_use]
    pub fn to_url_encoded(&self) -> String {
        self.to_string()
    }
}

impl Display for QueryParam {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", encode_param(&self.name), encode_param(&self.value))
    }
}

// Empty text stays empty so that `name=` survives serialization.
fn encode_param(text: &str) -> Cow<'_, str> {
    if text.is_empty() {
        Cow::Borrowed(text)
    } else {
        Cow::Owned(PctString::encode(text.chars(), ComponentType::QueryParam).into_string())
    }
}

/// An ordered list of query parameters.
///
/// Names need not be unique. Insertion order is kept, except that
/// [`replace_or_add`](Self::replace_or_add) moves the replaced parameter to the end.
///
/// # Examples
///
/// ```
/// use couch_uri::QueryParams;
///
/// let mut params = QueryParams::new();
/// params.rev("1-a").conflicts();
/// params.replace_or_add("rev", "2-b");
///
/// assert_eq!(params.serialize(), "conflicts=true&rev=2-b");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct QueryParams {
    params: Vec<QueryParam>,
}

impl QueryParams {
    /// Creates an empty collection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a parameter, keeping any existing ones with the same name.
    pub fn add_param(&mut self, name: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.params.push(QueryParam::new(name, value));
        self
    }

    /// Removes the first parameter called `name`, if any, then appends the new one.
    pub fn replace_or_add(&mut self, name: impl Into<String>, value: impl Into<String>) -> &mut Self {
        let name = name.into();
        if let Some(index) = self.params.iter().position(|p| p.name == name) {
            self.params.remove(index);
        }
        self.add_param(name, value)
    }

    /// Appends every parameter of `other`, in order.
    pub fn merge(&mut self, other: Self) -> &mut Self {
        self.params.extend(other.params);
        self
    }

    /// Returns the value of the first parameter called `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.params.iter().find(|p| p.name == name).map(QueryParam::value)
    }

    /// Number of parameters, duplicates included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.params.len()
    }

    /// Returns `true` if there are no parameters.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Iterates over the parameters in order.
    pub fn iter(&self) -> std::slice::Iter<'_, QueryParam> {
        self.params.iter()
    }

    /// Serializes to `name=value` pairs joined by `&`, without a leading `?`.
    #[must_use]
    pub fn serialize(&self) -> String {
        self.to_string()
    }

    /// Adds `revs_info=true`.
    pub fn revs_info(&mut self) -> &mut Self {
        self.add_param("revs_info", "true")
    }

    /// Adds `attachments=true`.
    pub fn attachments(&mut self) -> &mut Self {
        self.add_param("attachments", "true")
    }

    /// Adds `revs=true`.
    pub fn revisions(&mut self) -> &mut Self {
        self.add_param("revs", "true")
    }

    /// Adds `conflicts=true`.
    pub fn conflicts(&mut self) -> &mut Self {
        self.add_param("conflicts", "true")
    }

    /// Adds `local_seq=true`.
    pub fn local_seq(&mut self) -> &mut Self {
        self.add_param("local_seq", "true")
    }

    /// Adds `rev={rev}`.
    pub fn rev(&mut self, rev: impl Into<String>) -> &mut Self {
        self.add_param("rev", rev)
    }

    /// Adds `r={quorum}`, the number of replicas that must answer a read.
    pub fn read_quorum(&mut self, quorum: u32) -> &mut Self {
        self.add_param("r", quorum.to_string())
    }
}

impl Display for QueryParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, param) in self.params.iter().enumerate() {
            if i > 0 {
                f.write_str("&")?;
            }
            Display::fmt(param, f)?;
        }
        Ok(())
    }
}

impl<N, V> FromIterator<(N, V)> for QueryParams
where
    N: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (N, V)>>(iter: I) -> Self {
        let mut params = Self::new();
        params.extend(iter);
        params
    }
}

impl<N, V> Extend<(N, V)> for QueryParams
where
    N: Into<String>,
    V: Into<String>,
{
    fn extend<I: IntoIterator<Item = (N, V)>>(&mut self, iter: I) {
        self.params.extend(iter.into_iter().map(|(name, value)| QueryParam::new(name, value)));
    }
}

impl IntoIterator for QueryParams {
    type Item = QueryParam;
    type IntoIter = std::vec::IntoIter<QueryParam>;

    fn into_iter(self) -> Self::IntoIter {
        self.params.into_iter()
    }
}

impl<'a> IntoIterator for &'a QueryParams {
    type Item = &'a QueryParam;
    type IntoIter = std::slice::Iter<'a, QueryParam>;

    fn into_iter(self) -> Self::IntoIter {
        self.params.iter()
    }
}

/// Renders a JSON value as query parameter text.
///
/// JSON strings are used as-is, without quotes. Everything else (numbers, booleans,
/// `null`, arrays, objects) becomes compact JSON text.
///
/// ```
/// use couch_uri::json_param_value;
/// use serde_json::json;
///
/// assert_eq!(json_param_value(&json!("abc")), "abc");
/// assert_eq!(json_param_value(&json!(100)), "100");
/// assert_eq!(json_param_value(&json!(true)), "true");
/// assert_eq!(json_param_value(&json!(["a", 1])), r#"["a",1]"#);
/// ```
#[must_use]
pub fn json_param_value(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn add_keeps_duplicates_in_order() {
        let mut params = QueryParams::new();
        params.add_param("key", "a").add_param("other", "b").add_param("key", "c");

        assert_eq!(params.len(), 3);
        assert_eq!(params.serialize(), "key=a&other=b&key=c");
        assert_eq!(params.get("key"), Some("a"));
    }

    #[test]
    fn replace_or_add_keeps_single_entry() {
        let mut params = QueryParams::new();
        params.replace_or_add("rev", "1-a");
        params.replace_or_add("rev", "2-b");

        let query = params.serialize();
        assert_eq!(query, "rev=2-b");
        assert_eq!(query.matches("rev=").count(), 1);
    }

    #[test]
    fn replace_or_add_moves_to_end_and_removes_first_only() {
        let mut params = QueryParams::new();
        params.add_param("a", "1").add_param("b", "2").add_param("a", "3");
        params.replace_or_add("a", "4");

        assert_eq!(params.serialize(), "b=2&a=3&a=4");
    }

    #[test]
    fn replace_or_add_without_match_appends() {
        let mut params = QueryParams::new();
        params.add_param("a", "1");
        params.replace_or_add("b", "2");

        assert_eq!(params.serialize(), "a=1&b=2");
    }

    #[test]
    fn merge_appends_in_order() {
        let mut first: QueryParams = [("a", "1"), ("b", "2")].into_iter().collect();
        let second: QueryParams = [("b", "3"), ("c", "4")].into_iter().collect();
        first.merge(second);

        assert_eq!(first.serialize(), "a=1&b=2&b=3&c=4");
    }

    #[test]
    fn names_and_values_are_encoded() {
        let params: QueryParams = [("d&etail=", "&==ds&"), ("revs", "[1-2]")].into_iter().collect();
        assert_eq!(params.serialize(), "d%26etail%3D=%26%3D%3Dds%26&revs=%5B1-2%5D");
    }

    #[test]
    fn empty_values_serialize_as_bare_name() {
        let params: QueryParams = [("startkey", ""), ("limit", "10")].into_iter().collect();
        assert_eq!(params.serialize(), "startkey=&limit=10");
    }

    #[test]
    fn empty_collection_serializes_to_empty_string() {
        assert_eq!(QueryParams::new().serialize(), "");
        assert!(QueryParams::new().is_empty());
    }

    #[test]
    fn presets() {
        let mut params = QueryParams::new();
        params
            .revs_info()
            .attachments()
            .revisions()
            .conflicts()
            .local_seq()
            .rev("3-abc")
            .read_quorum(2);

        assert_eq!(
            params.serialize(),
            "revs_info=true&attachments=true&revs=true&conflicts=true&local_seq=true&rev=3-abc&r=2"
        );
    }

    #[test]
    fn iteration() {
        let params: QueryParams = [("a", "1"), ("b", "2")].into_iter().collect();
        let names: Vec<_> = params.iter().map(QueryParam::name).collect();
        assert_eq!(names, ["a", "b"]);

        let values: Vec<_> = params.into_iter().map(|p| p.value().to_owned()).collect();
        assert_eq!(values, ["1", "2"]);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serde_shape() {
        let params: QueryParams = [("rev", "1-a")].into_iter().collect();
        let text = serde_json::to_string(&params).unwrap();
        assert_eq!(text, r#"[{"name":"rev","value":"1-a"}]"#);

        let back: QueryParams = serde_json::from_str(&text).unwrap();
        assert_eq!(back, params);
    }

    #[test]
    fn url_encoded_matches_display() {
        let param = QueryParam::new("a b", "c&d");
        assert_eq!(param.to_url_encoded(), "a%20b=c%26d");
        assert_eq!(param.to_url_encoded(), param.to_string());
    }

    #[test]
    fn json_values() {
        assert_eq!(json_param_value(&json!("\"[]\"")), "\"[]\"");
        assert_eq!(json_param_value(&json!(null)), "null");
        assert_eq!(json_param_value(&json!({"a": 1})), r#"{"a":1}"#);
    }
}
