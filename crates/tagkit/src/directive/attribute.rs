//! Element attributes and typed binding.
//!
//! Attribute values arrive already bound by the host. Directives read their
//! inputs through the typed getters on [`Attributes`]; a value of the wrong
//! shape is reported as [`DirectiveError::InvalidAttribute`].

use std::fmt;

use serde_json::{Map, Value};

use super::DirectiveError;
use crate::util::{escape_attribute, token_eq};

/// Value of a single element attribute.
#[derive(Clone, Debug, PartialEq)]
pub enum AttrValue {
    /// Literal markup text.
    Text(String),
    /// Boolean bound by the host.
    Bool(bool),
    /// Arbitrary value bound by the host (models, data bags).
    Json(Value),
}

impl AttrValue {
    /// Read the value as a boolean.
    ///
    /// Accepts [`Bool`](Self::Bool), JSON booleans, and the texts `true` /
    /// `false` in any ASCII case.
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) | Self::Json(Value::Bool(b)) => Some(*b),
            Self::Text(s) => parse_bool(s),
            Self::Json(Value::String(s)) => parse_bool(s),
            Self::Json(_) => None,
        }
    }

    /// Read the value as a string.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) | Self::Json(Value::String(s)) => Some(s),
            _ => None,
        }
    }

    /// Convert the value to JSON, the shape models are passed on in.
    #[must_use]
    pub fn to_json(&self) -> Value {
        match self {
            Self::Text(s) => Value::String(s.clone()),
            Self::Bool(b) => Value::Bool(*b),
            Self::Json(v) => v.clone(),
        }
    }

    /// Textual form used when the attribute is written into markup.
    fn to_markup(&self) -> String {
        match self {
            Self::Text(s) | Self::Json(Value::String(s)) => s.clone(),
            Self::Bool(b) => b.to_string(),
            Self::Json(v) => v.to_string(),
        }
    }
}

fn parse_bool(s: &str) -> Option<bool> {
    if s.trim().eq_ignore_ascii_case("true") {
        Some(true)
    } else if s.trim().eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}

impl From<&str> for AttrValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_owned())
    }
}

impl From<String> for AttrValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<bool> for AttrValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<Value> for AttrValue {
    fn from(v: Value) -> Self {
        Self::Json(v)
    }
}

/// Ordered attribute bag of one element.
///
/// Lookups are ASCII case-insensitive. Declaration order is preserved for
/// output.
///
/// # Example
///
/// ```
/// use tagkit::directive::{AttrValue, Attributes};
///
/// let mut attrs = Attributes::new();
/// attrs.push("class", "card");
/// attrs.push("include-if", false);
///
/// assert_eq!(attrs.get("Class"), Some(&AttrValue::from("card")));
/// assert_eq!(attrs.get_bool("div", "include-if").unwrap(), Some(false));
///
/// attrs.remove_all("include-if");
/// assert_eq!(attrs.to_markup(), r#" class="card""#);
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Attributes {
    items: Vec<(String, AttrValue)>,
}

impl Attributes {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an attribute.
    pub fn push(&mut self, name: impl Into<String>, value: impl Into<AttrValue>) {
        self.items.push((name.into(), value.into()));
    }

    /// First value for `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&AttrValue> {
        self.items
            .iter()
            .find(|(n, _)| token_eq(n, name))
            .map(|(_, v)| v)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Remove every attribute called `name`. Returns how many were removed.
    pub fn remove_all(&mut self, name: &str) -> usize {
        let before = self.items.len();
        self.items.retain(|(n, _)| !token_eq(n, name));
        before - self.items.len()
    }

    /// Iterate attributes in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &AttrValue)> {
        self.items.iter().map(|(n, v)| (n.as_str(), v))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Bind an optional boolean attribute.
    ///
    /// Returns `Ok(None)` when the attribute is absent.
    pub fn get_bool(&self, element: &str, name: &str) -> Result<Option<bool>, DirectiveError> {
        self.get(name)
            .map(|value| {
                value
                    .as_bool()
                    .ok_or_else(|| DirectiveError::invalid_attribute(element, name, "a boolean"))
            })
            .transpose()
    }

    /// Bind an optional string attribute.
    pub fn get_str(&self, element: &str, name: &str) -> Result<Option<&str>, DirectiveError> {
        self.get(name)
            .map(|value| {
                value
                    .as_str()
                    .ok_or_else(|| DirectiveError::invalid_attribute(element, name, "a string"))
            })
            .transpose()
    }

    /// Bind an optional value of any shape, converted to JSON.
    ///
    /// An explicit JSON `null` counts as absent.
    #[must_use]
    pub fn get_json(&self, name: &str) -> Option<Value> {
        match self.get(name)? {
            AttrValue::Json(Value::Null) => None,
            value => Some(value.to_json()),
        }
    }

    /// Bind an optional key/value bag.
    ///
    /// Accepts a JSON object, or JSON text that parses to one. An explicit
    /// JSON `null` counts as absent. An empty object is returned as an empty
    /// map, never collapsed to `None`.
    pub fn get_object(
        &self,
        element: &str,
        name: &str,
    ) -> Result<Option<Map<String, Value>>, DirectiveError> {
        let invalid = || DirectiveError::invalid_attribute(element, name, "an object");
        match self.get(name) {
            None | Some(AttrValue::Json(Value::Null)) => Ok(None),
            Some(AttrValue::Json(Value::Object(map))) => Ok(Some(map.clone())),
            Some(AttrValue::Text(text)) => match serde_json::from_str::<Value>(text) {
                Ok(Value::Object(map)) => Ok(Some(map)),
                _ => Err(invalid()),
            },
            Some(_) => Err(invalid()),
        }
    }

    /// Render the attributes as they appear inside a start tag, each preceded
    /// by a space.
    #[must_use]
    pub fn to_markup(&self) -> String {
        let mut out = String::new();
        for (name, value) in &self.items {
            out.push(' ');
            out.push_str(name);
            out.push_str("=\"");
            out.push_str(&escape_attribute(&value.to_markup()));
            out.push('"');
        }
        out
    }
}

impl fmt::Display for Attributes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_markup())
    }
}

impl<N: Into<String>, V: Into<AttrValue>> FromIterator<(N, V)> for Attributes {
    fn from_iter<I: IntoIterator<Item = (N, V)>>(iter: I) -> Self {
        Self {
            items: iter
                .into_iter()
                .map(|(n, v)| (n.into(), v.into()))
                .collect(),
        }
    }
}
