//! Mock fragment renderer for testing.
//!
//! Provides [`MockFragments`] for unit testing without a view engine.

use std::collections::HashMap;
use std::fmt;
use std::sync::RwLock;

use serde_json::{Map, Value};

use crate::fragment::{
    FragmentArgs, FragmentRenderer, FragmentRequest, HtmlContent, RenderError, RenderMode,
};

/// A call received by [`MockFragments`].
#[derive(Clone, Debug, PartialEq)]
pub struct RecordedCall {
    /// Requested fragment name.
    pub name: String,
    /// Model as received.
    pub model: Option<Value>,
    /// Data context as received.
    pub data: Option<Map<String, Value>>,
    /// Which optional arguments were present.
    pub shape: FragmentArgs,
    /// `Buffered` for [`render`](FragmentRenderer::render), `Direct` for
    /// [`render_to`](FragmentRenderer::render_to).
    pub mode: RenderMode,
}

/// Mock fragment renderer for testing.
///
/// Serves fixed markup per fragment name and records every call. Unknown
/// names fail with [`RenderError::NotFound`]. Use the builder methods to
/// configure the mock with test data.
///
/// # Example
///
/// ```
/// use tagkit::{FragmentRenderer, FragmentRequest, MockFragments, RenderMode};
///
/// let fragments = MockFragments::new().with_fragment("footer", "<footer></footer>");
///
/// let content = fragments.render(&FragmentRequest::new("footer")).unwrap();
/// assert_eq!(content.as_str(), "<footer></footer>");
///
/// let calls = fragments.calls();
/// assert_eq!(calls.len(), 1);
/// assert_eq!(calls[0].mode, RenderMode::Buffered);
/// ```
#[derive(Debug, Default)]
pub struct MockFragments {
    fragments: HashMap<String, String>,
    failures: HashMap<String, String>,
    calls: RwLock<Vec<RecordedCall>>,
}

impl MockFragments {
    /// Create a new mock with no fragments.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `html` for fragment `name`.
    #[must_use]
    pub fn with_fragment(mut self, name: impl Into<String>, html: impl Into<String>) -> Self {
        self.fragments.insert(name.into(), html.into());
        self
    }

    /// Fail rendering of fragment `name` with [`RenderError::Failed`].
    #[must_use]
    pub fn with_failure(mut self, name: impl Into<String>, message: impl Into<String>) -> Self {
        self.failures.insert(name.into(), message.into());
        self
    }

    /// All calls received so far, in order.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.read().unwrap().clone()
    }

    fn record(&self, request: &FragmentRequest<'_>, mode: RenderMode) {
        self.calls.write().unwrap().push(RecordedCall {
            name: request.name().to_owned(),
            model: request.model().cloned(),
            data: request.data().cloned(),
            shape: request.shape(),
            mode,
        });
    }

    fn lookup(&self, name: &str) -> Result<&str, RenderError> {
        if let Some(message) = self.failures.get(name) {
            return Err(RenderError::Failed {
                name: name.to_owned(),
                source: message.clone().into(),
            });
        }
        self.fragments
            .get(name)
            .map(String::as_str)
            .ok_or_else(|| RenderError::NotFound {
                name: name.to_owned(),
            })
    }
}

impl FragmentRenderer for MockFragments {
    fn render(&self, request: &FragmentRequest<'_>) -> Result<HtmlContent, RenderError> {
        self.record(request, RenderMode::Buffered);
        self.lookup(request.name()).map(HtmlContent::from)
    }

    fn render_to(
        &self,
        request: &FragmentRequest<'_>,
        writer: &mut dyn fmt::Write,
    ) -> Result<(), RenderError> {
        self.record(request, RenderMode::Direct);
        writer.write_str(self.lookup(request.name())?)?;
        Ok(())
    }
}
