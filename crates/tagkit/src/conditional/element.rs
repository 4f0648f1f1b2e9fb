//! The `<if>` wrapper element.

use super::{EXCLUDE_IF_ATTRIBUTE, IF_ELEMENT, INCLUDE_IF_ATTRIBUTE};
use crate::directive::{
    DirectiveError, GATING_ORDER, TagContext, TagDirective, TagOutput, Target, ViewContext,
};

/// Decision rule for the element form.
///
/// Content renders only when `include && !exclude`.
#[must_use]
pub fn element_renders(include: bool, exclude: bool) -> bool {
    include && !exclude
}

/// Conditionally renders the content of an `<if>` element.
///
/// The `<if>` tag itself is never written. `include-if` defaults to `true`,
/// `exclude-if` to `false`.
///
/// # Example
///
/// ```
/// use tagkit::{Element, TagProcessor};
/// use tagkit::conditional::IfDirective;
/// # use tagkit::{FragmentRenderer, FragmentRequest, HtmlContent, RenderError};
/// # struct NoFragments;
/// # impl FragmentRenderer for NoFragments {
/// #     fn render(&self, r: &FragmentRequest<'_>) -> Result<HtmlContent, RenderError> {
/// #         Err(RenderError::NotFound { name: r.name().to_owned() })
/// #     }
/// # }
///
/// let block = Element::new("if").attr("include-if", true).text("<p>admin</p>");
///
/// let mut processor = TagProcessor::new().with_directive(IfDirective);
/// let html = processor.render(&[block.into()], &NoFragments).unwrap();
/// assert_eq!(html, "<p>admin</p>");
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct IfDirective;

impl TagDirective for IfDirective {
    fn targets(&self) -> &[Target] {
        &[Target::Element(IF_ELEMENT)]
    }

    fn attributes(&self) -> &[&'static str] {
        &[INCLUDE_IF_ATTRIBUTE, EXCLUDE_IF_ATTRIBUTE]
    }

    fn order(&self) -> i32 {
        GATING_ORDER
    }

    fn name(&self) -> &'static str {
        "if"
    }

    fn process(
        &mut self,
        ctx: &TagContext<'_>,
        output: &mut TagOutput,
        _view: &mut ViewContext<'_>,
    ) -> Result<(), DirectiveError> {
        let include = ctx
            .attributes
            .get_bool(ctx.element, INCLUDE_IF_ATTRIBUTE)?
            .unwrap_or(true);
        let exclude = ctx
            .attributes
            .get_bool(ctx.element, EXCLUDE_IF_ATTRIBUTE)?
            .unwrap_or(false);

        // <if> is a grouping construct and never renders as an element
        output.clear_tag_name();

        if !element_renders(include, exclude) {
            output.suppress_output();
        }

        Ok(())
    }
}
