//! Directive processing context.
//!
//! Provides the element snapshot and the ambient view to directive handlers.

use std::fmt;

use super::Attributes;
use crate::fragment::FragmentRenderer;

/// Immutable snapshot of the element a directive is processing.
///
/// The context is created by [`TagProcessor`](super::TagProcessor) once per
/// element visit and provides:
///
/// - The element name as written in the markup
/// - The element's attributes, including directive attributes
/// - Sequencing position (document-order index and nesting depth)
///
/// # Example
///
/// ```
/// use tagkit::directive::{Attributes, TagContext};
///
/// let attrs: Attributes = [("include-if", false)].into_iter().collect();
/// let ctx = TagContext {
///     element: "div",
///     attributes: &attrs,
///     index: 3,
///     depth: 1,
/// };
///
/// assert_eq!(ctx.unique_id(), "tag-3");
/// assert!(ctx.has_attribute("INCLUDE-IF"));
/// ```
#[derive(Clone, Copy, Debug)]
pub struct TagContext<'a> {
    /// Element name as written in the markup.
    pub element: &'a str,
    /// All attributes declared on the element.
    pub attributes: &'a Attributes,
    /// Position of the element in document order within the render pass (0-indexed).
    pub index: usize,
    /// Nesting depth of the element (0 for top-level elements).
    pub depth: usize,
}

impl TagContext<'_> {
    /// Identifier unique to this element within the render pass.
    #[must_use]
    pub fn unique_id(&self) -> String {
        format!("tag-{}", self.index)
    }

    #[must_use]
    pub fn has_attribute(&self, name: &str) -> bool {
        self.attributes.contains(name)
    }
}

/// The ambient view a directive renders into.
///
/// Holds the fragment rendering capability and the output stream that the
/// surrounding markup is being written to. Directives normally leave the
/// stream alone and modify their [`TagOutput`](super::TagOutput); only direct
/// fragment rendering writes to it.
pub struct ViewContext<'a> {
    renderer: &'a dyn FragmentRenderer,
    writer: &'a mut dyn fmt::Write,
}

impl<'a> ViewContext<'a> {
    pub fn new(renderer: &'a dyn FragmentRenderer, writer: &'a mut dyn fmt::Write) -> Self {
        Self { renderer, writer }
    }

    /// The fragment rendering capability.
    #[must_use]
    pub fn renderer(&self) -> &'a dyn FragmentRenderer {
        self.renderer
    }

    /// The ambient output stream.
    pub fn writer(&mut self) -> &mut dyn fmt::Write {
        &mut *self.writer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fragment::{FragmentRequest, HtmlContent, RenderError};

    struct Fixed;

    impl FragmentRenderer for Fixed {
        fn render(&self, _request: &FragmentRequest<'_>) -> Result<HtmlContent, RenderError> {
            Ok(HtmlContent::new("fixed"))
        }
    }

    #[test]
    fn test_unique_id_follows_index() {
        let attrs = Attributes::new();
        let ctx = TagContext {
            element: "p",
            attributes: &attrs,
            index: 0,
            depth: 0,
        };
        assert_eq!(ctx.unique_id(), "tag-0");
        assert!(!ctx.has_attribute("include-if"));
    }

    #[test]
    fn test_view_context_writes_to_ambient_stream() {
        let mut out = String::new();
        let mut view = ViewContext::new(&Fixed, &mut out);

        write!(view.writer(), "<p>").unwrap();
        let content = view
            .renderer()
            .render(&FragmentRequest::new("any"))
            .unwrap();
        view.writer().write_str(content.as_str()).unwrap();

        assert_eq!(out, "<p>fixed");
    }
}
