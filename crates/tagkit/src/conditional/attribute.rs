//! `include-if` / `exclude-if` on any element.

use super::{EXCLUDE_IF_ATTRIBUTE, INCLUDE_IF_ATTRIBUTE};
use crate::directive::{
    DirectiveError, GATING_ORDER, TagContext, TagDirective, TagOutput, Target, ViewContext,
};

/// Decision rule for the attribute form.
///
/// Suppress when `exclude` is set, or when `include` is explicitly `false`.
/// An unset `include` with `exclude == false` renders normally.
#[must_use]
pub fn attribute_suppresses(include: Option<bool>, exclude: bool) -> bool {
    exclude || include == Some(false)
}

/// Suppresses any element carrying `include-if="false"` or `exclude-if="true"`.
///
/// On suppression both the tag and the content are dropped; siblings are
/// unaffected. The directive attributes are stripped in every case.
///
/// # Example
///
/// ```
/// use tagkit::{Element, Node, TagProcessor};
/// use tagkit::conditional::IfAttributeDirective;
/// # use tagkit::{FragmentRenderer, FragmentRequest, HtmlContent, RenderError};
/// # struct NoFragments;
/// # impl FragmentRenderer for NoFragments {
/// #     fn render(&self, r: &FragmentRequest<'_>) -> Result<HtmlContent, RenderError> {
/// #         Err(RenderError::NotFound { name: r.name().to_owned() })
/// #     }
/// # }
///
/// let nodes = vec![
///     Node::from(Element::new("li").attr("include-if", true).text("a")),
///     Node::from(Element::new("li").attr("exclude-if", true).text("b")),
/// ];
///
/// let mut processor = TagProcessor::new().with_directive(IfAttributeDirective);
/// let html = processor.render(&nodes, &NoFragments).unwrap();
/// assert_eq!(html, "<li>a</li>");
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct IfAttributeDirective;

impl TagDirective for IfAttributeDirective {
    fn targets(&self) -> &[Target] {
        &[
            Target::Attribute(INCLUDE_IF_ATTRIBUTE),
            Target::Attribute(EXCLUDE_IF_ATTRIBUTE),
        ]
    }

    fn attributes(&self) -> &[&'static str] {
        &[INCLUDE_IF_ATTRIBUTE, EXCLUDE_IF_ATTRIBUTE]
    }

    fn order(&self) -> i32 {
        GATING_ORDER
    }

    fn name(&self) -> &'static str {
        "if-attribute"
    }

    fn process(
        &mut self,
        ctx: &TagContext<'_>,
        output: &mut TagOutput,
        _view: &mut ViewContext<'_>,
    ) -> Result<(), DirectiveError> {
        let include = ctx.attributes.get_bool(ctx.element, INCLUDE_IF_ATTRIBUTE)?;
        let exclude = ctx
            .attributes
            .get_bool(ctx.element, EXCLUDE_IF_ATTRIBUTE)?
            .unwrap_or(false);

        output.attributes_mut().remove_all(INCLUDE_IF_ATTRIBUTE);
        output.attributes_mut().remove_all(EXCLUDE_IF_ATTRIBUTE);

        if attribute_suppresses(include, exclude) {
            output.clear_tag_name();
            output.suppress_output();
        }

        Ok(())
    }
}
