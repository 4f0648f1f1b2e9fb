//! Element output handle.
//!
//! Directives modify a [`TagOutput`] instead of writing markup themselves; the
//! processor assembles the final markup once every directive has run.

use std::fmt;

use super::Attributes;
use crate::fragment::HtmlContent;

/// How an element's tag is written.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TagMode {
    /// `<name>content</name>`
    #[default]
    StartTagAndEndTag,
    /// `<name />`
    SelfClosing,
    /// `<name>` with no end tag.
    StartTagOnly,
}

/// Mutable output of one element.
///
/// The output is exclusively owned by the directives processing the element
/// during the current pass. Assembly order is: pre-element, start tag,
/// pre-content, content, post-content, end tag, post-element.
///
/// # Example
///
/// ```
/// use tagkit::directive::{Attributes, TagMode, TagOutput};
///
/// let mut output = TagOutput::new("div", Attributes::new(), TagMode::StartTagAndEndTag);
/// output.pre_element().push_str("<!-- card -->");
/// output.set_content("Hello");
///
/// let mut html = String::new();
/// output.write_to(&mut html, "ignored child content").unwrap();
/// assert_eq!(html, "<!-- card --><div>Hello</div>");
///
/// output.suppress_output();
/// assert!(output.is_suppressed());
/// assert_eq!(output.tag_name(), None);
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TagOutput {
    tag_name: Option<String>,
    mode: TagMode,
    attributes: Attributes,
    pre_element: String,
    pre_content: String,
    content: Option<HtmlContent>,
    post_content: String,
    post_element: String,
    suppressed: bool,
}

impl TagOutput {
    /// Create the output for an element, initially rendering it unchanged.
    #[must_use]
    pub fn new(tag_name: impl Into<String>, attributes: Attributes, mode: TagMode) -> Self {
        Self {
            tag_name: Some(tag_name.into()),
            mode,
            attributes,
            ..Self::default()
        }
    }

    /// Tag name to write, or `None` to write the content without a wrapping tag.
    #[must_use]
    pub fn tag_name(&self) -> Option<&str> {
        self.tag_name.as_deref()
    }

    pub fn set_tag_name(&mut self, tag_name: Option<String>) {
        self.tag_name = tag_name;
    }

    /// Drop the wrapping tag; only the content is written.
    pub fn clear_tag_name(&mut self) {
        self.tag_name = None;
    }

    #[must_use]
    pub fn mode(&self) -> TagMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: TagMode) {
        self.mode = mode;
    }

    /// Attributes written into the start tag.
    #[must_use]
    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    pub fn attributes_mut(&mut self) -> &mut Attributes {
        &mut self.attributes
    }

    /// Markup written before the start tag.
    pub fn pre_element(&mut self) -> &mut String {
        &mut self.pre_element
    }

    /// Markup written after the start tag, before the content.
    pub fn pre_content(&mut self) -> &mut String {
        &mut self.pre_content
    }

    /// Markup written after the content, before the end tag.
    pub fn post_content(&mut self) -> &mut String {
        &mut self.post_content
    }

    /// Markup written after the end tag.
    pub fn post_element(&mut self) -> &mut String {
        &mut self.post_element
    }

    /// Content installed by a directive, replacing the element's children.
    #[must_use]
    pub fn content(&self) -> Option<&HtmlContent> {
        self.content.as_ref()
    }

    /// Replace the element's children with `content`.
    pub fn set_content(&mut self, content: impl Into<HtmlContent>) {
        self.content = Some(content.into());
    }

    /// Whether a directive replaced the element's children.
    #[must_use]
    pub fn is_content_modified(&self) -> bool {
        self.content.is_some()
    }

    /// Omit the element entirely: tag, content, and all wrappers.
    ///
    /// The element's children are never rendered once the output is suppressed.
    pub fn suppress_output(&mut self) {
        self.tag_name = None;
        self.pre_element.clear();
        self.pre_content.clear();
        self.content = Some(HtmlContent::default());
        self.post_content.clear();
        self.post_element.clear();
        self.suppressed = true;
    }

    #[must_use]
    pub fn is_suppressed(&self) -> bool {
        self.suppressed
    }

    /// Assemble the element's markup.
    ///
    /// `child_content` is used when no directive installed content. Suppressed
    /// outputs write nothing.
    pub fn write_to(&self, out: &mut dyn fmt::Write, child_content: &str) -> fmt::Result {
        if self.suppressed {
            return Ok(());
        }

        out.write_str(&self.pre_element)?;

        let Some(tag) = self.tag_name.as_deref() else {
            out.write_str(&self.pre_content)?;
            out.write_str(self.body(child_content))?;
            out.write_str(&self.post_content)?;
            return out.write_str(&self.post_element);
        };

        match self.mode {
            TagMode::SelfClosing => {
                write!(out, "<{tag}{} />", self.attributes)?;
            }
            TagMode::StartTagOnly => {
                write!(out, "<{tag}{}>", self.attributes)?;
            }
            TagMode::StartTagAndEndTag => {
                write!(out, "<{tag}{}>", self.attributes)?;
                out.write_str(&self.pre_content)?;
                out.write_str(self.body(child_content))?;
                out.write_str(&self.post_content)?;
                write!(out, "</{tag}>")?;
            }
        }

        out.write_str(&self.post_element)
    }

    fn body<'a>(&'a self, child_content: &'a str) -> &'a str {
        self.content.as_ref().map_or(child_content, HtmlContent::as_str)
    }
}
