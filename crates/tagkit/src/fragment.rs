//! Fragment rendering capability.
//!
//! The host's view engine resolves a fragment name to renderable content and
//! executes it. This crate only consumes that capability through the
//! [`FragmentRenderer`] trait; it never looks inside the returned
//! [`HtmlContent`].

use std::fmt;

use serde_json::{Map, Value};

/// Rendered markup produced by a [`FragmentRenderer`].
///
/// The content is already encoded and is emitted verbatim.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HtmlContent(String);

impl HtmlContent {
    /// Wrap already-encoded markup.
    #[must_use]
    pub fn new(html: impl Into<String>) -> Self {
        Self(html.into())
    }

    /// Borrow the markup.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the content and return the markup.
    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<String> for HtmlContent {
    fn from(html: String) -> Self {
        Self(html)
    }
}

impl From<&str> for HtmlContent {
    fn from(html: &str) -> Self {
        Self(html.to_owned())
    }
}

impl fmt::Display for HtmlContent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// How a fragment's output reaches the page.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RenderMode {
    /// Render into an [`HtmlContent`] value and install it as the element's content.
    #[default]
    Buffered,
    /// Write straight to the ambient output stream, bypassing the element's content.
    Direct,
}

impl fmt::Display for RenderMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Buffered => f.write_str("buffered"),
            Self::Direct => f.write_str("direct"),
        }
    }
}

/// Which of the optional fragment arguments a request carries.
///
/// View engines commonly expose one rendering entry point per combination;
/// renderers can dispatch on this instead of re-checking the options.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FragmentArgs {
    /// Name only.
    NameOnly,
    /// Name and model.
    Model,
    /// Name and data context.
    Data,
    /// Name, model, and data context.
    ModelAndData,
}

impl fmt::Display for FragmentArgs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NameOnly => f.write_str("name"),
            Self::Model => f.write_str("name+model"),
            Self::Data => f.write_str("name+data"),
            Self::ModelAndData => f.write_str("name+model+data"),
        }
    }
}

/// A request to render one named fragment.
///
/// Only the arguments the caller actually supplied are present. A missing data
/// context stays `None`; it is never replaced with an empty map, since a
/// renderer may treat "no context" and "empty context" differently.
///
/// # Example
///
/// ```
/// use serde_json::json;
/// use tagkit::{FragmentArgs, FragmentRequest};
///
/// let model = json!({ "id": 1 });
/// let request = FragmentRequest::new("row").with_model(&model);
///
/// assert_eq!(request.name(), "row");
/// assert_eq!(request.model(), Some(&model));
/// assert!(request.data().is_none());
/// assert_eq!(request.shape(), FragmentArgs::Model);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FragmentRequest<'a> {
    name: &'a str,
    model: Option<&'a Value>,
    data: Option<&'a Map<String, Value>>,
}

impl<'a> FragmentRequest<'a> {
    /// Create a request for a fragment with no model and no data context.
    #[must_use]
    pub fn new(name: &'a str) -> Self {
        Self {
            name,
            model: None,
            data: None,
        }
    }

    /// Attach a model, passed through to the renderer untouched.
    #[must_use]
    pub fn with_model(mut self, model: &'a Value) -> Self {
        self.model = Some(model);
        self
    }

    /// Attach a named data context.
    #[must_use]
    pub fn with_data(mut self, data: &'a Map<String, Value>) -> Self {
        self.data = Some(data);
        self
    }

    #[must_use]
    pub fn name(&self) -> &'a str {
        self.name
    }

    #[must_use]
    pub fn model(&self) -> Option<&'a Value> {
        self.model
    }

    #[must_use]
    pub fn data(&self) -> Option<&'a Map<String, Value>> {
        self.data
    }

    /// Which combination of optional arguments this request carries.
    #[must_use]
    pub fn shape(&self) -> FragmentArgs {
        match (self.model.is_some(), self.data.is_some()) {
            (false, false) => FragmentArgs::NameOnly,
            (true, false) => FragmentArgs::Model,
            (false, true) => FragmentArgs::Data,
            (true, true) => FragmentArgs::ModelAndData,
        }
    }
}

/// Error raised by a [`FragmentRenderer`].
///
/// Directives never catch or translate these; they reach the caller as-is.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum RenderError {
    /// No fragment is registered under the requested name.
    #[error("fragment not found: {name}")]
    NotFound {
        /// Requested fragment name.
        name: String,
    },
    /// Writing to the ambient output stream failed.
    #[error("failed to write fragment output")]
    Write(#[from] fmt::Error),
    /// The fragment was found but rendering it failed.
    #[error("failed to render fragment {name}")]
    Failed {
        /// Requested fragment name.
        name: String,
        /// Underlying failure from the view engine.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

/// Capability that renders named fragments.
///
/// Implemented by the host's view engine. Both methods are single-attempt:
/// the directive layer performs no retry and no fallback rendering.
///
/// # Example
///
/// ```
/// use tagkit::{FragmentRenderer, FragmentRequest, HtmlContent, RenderError};
///
/// struct Greeting;
///
/// impl FragmentRenderer for Greeting {
///     fn render(&self, request: &FragmentRequest<'_>) -> Result<HtmlContent, RenderError> {
///         match request.name() {
///             "hello" => Ok(HtmlContent::new("<p>Hello</p>")),
///             name => Err(RenderError::NotFound { name: name.to_owned() }),
///         }
///     }
/// }
///
/// let mut page = String::new();
/// Greeting.render_to(&FragmentRequest::new("hello"), &mut page).unwrap();
/// assert_eq!(page, "<p>Hello</p>");
/// ```
pub trait FragmentRenderer {
    /// Render a fragment into an in-memory value.
    fn render(&self, request: &FragmentRequest<'_>) -> Result<HtmlContent, RenderError>;

    /// Render a fragment straight into the ambient output stream.
    ///
    /// The default implementation renders into a buffer and copies it out.
    /// Engines that can stream should override this.
    fn render_to(
        &self,
        request: &FragmentRequest<'_>,
        writer: &mut dyn fmt::Write,
    ) -> Result<(), RenderError> {
        let content = self.render(request)?;
        writer.write_str(content.as_str())?;
        Ok(())
    }
}

impl<R: FragmentRenderer + ?Sized> FragmentRenderer for &R {
    fn render(&self, request: &FragmentRequest<'_>) -> Result<HtmlContent, RenderError> {
        (**self).render(request)
    }

    fn render_to(
        &self,
        request: &FragmentRequest<'_>,
        writer: &mut dyn fmt::Write,
    ) -> Result<(), RenderError> {
        (**self).render_to(request, writer)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    struct Echo;

    impl FragmentRenderer for Echo {
        fn render(&self, request: &FragmentRequest<'_>) -> Result<HtmlContent, RenderError> {
            Ok(HtmlContent::new(format!("<{}>", request.name())))
        }
    }

    #[test]
    fn test_request_shapes() {
        let model = json!({ "id": 1 });
        let data = json!({ "title": "x" }).as_object().cloned().unwrap();

        assert_eq!(FragmentRequest::new("row").shape(), FragmentArgs::NameOnly);
        assert_eq!(
            FragmentRequest::new("row").with_model(&model).shape(),
            FragmentArgs::Model
        );
        assert_eq!(
            FragmentRequest::new("row").with_data(&data).shape(),
            FragmentArgs::Data
        );
        assert_eq!(
            FragmentRequest::new("row")
                .with_model(&model)
                .with_data(&data)
                .shape(),
            FragmentArgs::ModelAndData
        );
    }

    #[test]
    fn test_empty_data_is_still_present() {
        let data = Map::new();
        let request = FragmentRequest::new("row").with_data(&data);
        assert_eq!(request.data(), Some(&Map::new()));
        assert_eq!(request.shape(), FragmentArgs::Data);
    }

    #[test]
    fn test_default_render_to_writes_content() {
        let mut out = String::from("before ");
        Echo.render_to(&FragmentRequest::new("row"), &mut out).unwrap();
        assert_eq!(out, "before <row>");
    }

    #[test]
    fn test_render_through_reference() {
        fn render_with<R: FragmentRenderer>(renderer: R) -> HtmlContent {
            renderer.render(&FragmentRequest::new("a")).unwrap()
        }

        let renderer: &dyn FragmentRenderer = &Echo;
        assert_eq!(render_with(renderer).as_str(), "<a>");
    }

    #[test]
    fn test_render_error_messages() {
        let err = RenderError::NotFound {
            name: "missing".to_owned(),
        };
        assert_eq!(err.to_string(), "fragment not found: missing");

        let err = RenderError::Failed {
            name: "row".to_owned(),
            source: "boom".into(),
        };
        assert_eq!(err.to_string(), "failed to render fragment row");
        assert_eq!(
            std::error::Error::source(&err).map(ToString::to_string),
            Some("boom".to_owned())
        );
    }

    #[test]
    fn test_render_mode_display() {
        assert_eq!(RenderMode::default(), RenderMode::Buffered);
        assert_eq!(RenderMode::Direct.to_string(), "direct");
    }
}
