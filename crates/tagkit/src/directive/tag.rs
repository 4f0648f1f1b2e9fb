//! Tag directive trait.
//!
//! A tag directive targets elements by element name or by the presence of an
//! attribute token: `<if>`, `<div include-if="...">`.

use super::{DirectiveError, TagContext, TagOutput, ViewContext};
use crate::util::token_eq;

/// Order of the gating phase.
///
/// Directives at or below this order run before any other directive on the
/// same element and may suppress it.
pub const GATING_ORDER: i32 = -1000;

/// Order of directives that do not ask for a specific position.
pub const DEFAULT_ORDER: i32 = 0;

/// What a directive is attached to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Target {
    /// Any element with this name: `<if>`.
    Element(&'static str),
    /// Any element carrying this attribute: `include-if`.
    Attribute(&'static str),
}

impl Target {
    /// Whether the element described by `ctx` is targeted.
    #[must_use]
    pub fn matches(&self, ctx: &TagContext<'_>) -> bool {
        match self {
            Self::Element(name) => token_eq(ctx.element, name),
            Self::Attribute(token) => ctx.has_attribute(token),
        }
    }
}

/// Handler for tag directives.
///
/// Directives read their inputs from [`TagContext::attributes`] on every
/// call and keep no per-element state between calls.
///
/// # Ordering
///
/// Matching directives run in ascending [`order`](Self::order), ties broken by
/// registration order. Directives with an order at or below [`GATING_ORDER`]
/// form the gating phase; once any directive suppresses the output, no further
/// directive runs for that element.
///
/// # Thread Safety
///
/// Handlers implement `Send` only (not `Sync`) since each render pass gets its
/// own processor instance.
///
/// # Example
///
/// ```
/// use tagkit::directive::{
///     DirectiveError, TagContext, TagDirective, TagOutput, Target, ViewContext,
/// };
///
/// struct UppercaseDirective;
///
/// impl TagDirective for UppercaseDirective {
///     fn targets(&self) -> &[Target] {
///         &[Target::Attribute("data-shout")]
///     }
///
///     fn attributes(&self) -> &[&'static str] {
///         &["data-shout"]
///     }
///
///     fn process(
///         &mut self,
///         ctx: &TagContext<'_>,
///         output: &mut TagOutput,
///         _view: &mut ViewContext<'_>,
///     ) -> Result<(), DirectiveError> {
///         output.set_tag_name(Some(ctx.element.to_uppercase()));
///         Ok(())
///     }
/// }
/// ```
pub trait TagDirective: Send {
    /// Elements or attributes this directive is attached to.
    fn targets(&self) -> &[Target];

    /// Attribute tokens bound by this directive.
    ///
    /// They are stripped from the element's output after processing, whether
    /// or not the directive ran.
    fn attributes(&self) -> &[&'static str] {
        &[]
    }

    /// Position among directives on the same element.
    fn order(&self) -> i32 {
        DEFAULT_ORDER
    }

    /// Name used in log output.
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }

    /// Process one element.
    fn process(
        &mut self,
        ctx: &TagContext<'_>,
        output: &mut TagOutput,
        view: &mut ViewContext<'_>,
    ) -> Result<(), DirectiveError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::directive::Attributes;

    #[test]
    fn test_element_target_is_case_insensitive() {
        let attrs = Attributes::new();
        let ctx = TagContext {
            element: "IF",
            attributes: &attrs,
            index: 0,
            depth: 0,
        };
        assert!(Target::Element("if").matches(&ctx));
        assert!(!Target::Element("partial").matches(&ctx));
    }

    #[test]
    fn test_attribute_target() {
        let attrs: Attributes = [("exclude-if", true)].into_iter().collect();
        let ctx = TagContext {
            element: "div",
            attributes: &attrs,
            index: 0,
            depth: 0,
        };
        assert!(Target::Attribute("exclude-if").matches(&ctx));
        assert!(!Target::Attribute("include-if").matches(&ctx));
    }
}
