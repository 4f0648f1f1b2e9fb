//! The `<partial>` fragment-substitution directive.
//!
//! `<partial name="row" model="..." view-data="..." render="false" />` asks the
//! host's [`FragmentRenderer`](crate::FragmentRenderer) for the named fragment
//! and substitutes it for the element.
//!
//! | Attribute   | Bound as                 | Default   |
//! |-------------|--------------------------|-----------|
//! | `name`      | string                   | required  |
//! | `model`     | any value, passed through| absent    |
//! | `view-data` | key/value object         | absent    |
//! | `render`    | boolean                  | `false`   |
//!
//! With `render="false"` the fragment is rendered into a buffer and installed
//! as the element's content. With `render="true"` it is written straight to the
//! ambient output stream instead, and the element's content is left alone.

use serde_json::{Map, Value};

use crate::directive::{
    DirectiveError, TagContext, TagDirective, TagOutput, Target, ViewContext,
};
use crate::fragment::{FragmentRequest, HtmlContent, RenderMode};

/// Name of the partial element.
pub const PARTIAL_ELEMENT: &str = "partial";

/// Attribute holding the fragment name.
pub const NAME_ATTRIBUTE: &str = "name";

/// Attribute holding the model passed to the fragment.
pub const MODEL_ATTRIBUTE: &str = "model";

/// Attribute holding the data context passed to the fragment.
pub const VIEW_DATA_ATTRIBUTE: &str = "view-data";

/// Attribute selecting direct rendering to the output stream.
pub const RENDER_ATTRIBUTE: &str = "render";

/// Inputs bound from a `<partial>` element.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PartialInputs {
    /// Fragment name. Empty means "render nothing".
    pub name: String,
    /// Model passed through to the renderer untouched.
    pub model: Option<Value>,
    /// Data context merged into the fragment's rendering context.
    pub data: Option<Map<String, Value>>,
    /// Whether the fragment is buffered or written to the stream.
    pub mode: RenderMode,
}

impl PartialInputs {
    /// Bind inputs from the element's attributes.
    pub fn bind(ctx: &TagContext<'_>) -> Result<Self, DirectiveError> {
        let attrs = ctx.attributes;
        let name = attrs
            .get_str(ctx.element, NAME_ATTRIBUTE)?
            .unwrap_or_default()
            .to_owned();
        let direct = attrs
            .get_bool(ctx.element, RENDER_ATTRIBUTE)?
            .unwrap_or(false);

        Ok(Self {
            name,
            model: attrs.get_json(MODEL_ATTRIBUTE),
            data: attrs.get_object(ctx.element, VIEW_DATA_ATTRIBUTE)?,
            mode: if direct {
                RenderMode::Direct
            } else {
                RenderMode::Buffered
            },
        })
    }

    /// Build the fragment request, carrying only the arguments supplied.
    #[must_use]
    pub fn request(&self) -> FragmentRequest<'_> {
        let mut request = FragmentRequest::new(&self.name);
        if let Some(model) = &self.model {
            request = request.with_model(model);
        }
        if let Some(data) = &self.data {
            request = request.with_data(data);
        }
        request
    }
}

/// Substitutes a `<partial>` element with a rendered fragment.
///
/// The `<partial>` tag itself is never written. Errors from the renderer are
/// returned unchanged; there is no retry and no fallback content.
///
/// # Example
///
/// ```
/// use serde_json::json;
/// use tagkit::{Element, FragmentRenderer, FragmentRequest, HtmlContent, RenderError, TagProcessor};
/// use tagkit::partial::PartialDirective;
///
/// struct Rows;
///
/// impl FragmentRenderer for Rows {
///     fn render(&self, request: &FragmentRequest<'_>) -> Result<HtmlContent, RenderError> {
///         let id = request.model().and_then(|m| m.get("id")).cloned().unwrap_or_default();
///         Ok(HtmlContent::new(format!("<tr data-id=\"{id}\"></tr>")))
///     }
/// }
///
/// let row = Element::new("partial")
///     .attr("name", "row")
///     .attr("model", json!({ "id": 7 }))
///     .self_closing();
///
/// let mut processor = TagProcessor::new().with_directive(PartialDirective);
/// let html = processor.render(&[row.into()], &Rows).unwrap();
/// assert_eq!(html, r#"<tr data-id="7"></tr>"#);
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct PartialDirective;

impl TagDirective for PartialDirective {
    fn targets(&self) -> &[Target] {
        &[Target::Element(PARTIAL_ELEMENT)]
    }

    fn attributes(&self) -> &[&'static str] {
        &[
            NAME_ATTRIBUTE,
            MODEL_ATTRIBUTE,
            VIEW_DATA_ATTRIBUTE,
            RENDER_ATTRIBUTE,
        ]
    }

    fn name(&self) -> &'static str {
        "partial"
    }

    fn process(
        &mut self,
        ctx: &TagContext<'_>,
        output: &mut TagOutput,
        view: &mut ViewContext<'_>,
    ) -> Result<(), DirectiveError> {
        let inputs = PartialInputs::bind(ctx)?;

        // <partial> never renders as an element, with or without a fragment
        output.clear_tag_name();

        if inputs.name.is_empty() {
            tracing::debug!(id = %ctx.unique_id(), "Partial without a name, skipping");
            // Empty content keeps the element's children out of the output
            output.set_content(HtmlContent::default());
            return Ok(());
        }

        let request = inputs.request();
        tracing::debug!(
            name = %inputs.name,
            mode = %inputs.mode,
            shape = %request.shape(),
            "Rendering partial"
        );

        match inputs.mode {
            RenderMode::Buffered => {
                let content = view.renderer().render(&request)?;
                output.set_content(content);
            }
            RenderMode::Direct => {
                view.renderer().render_to(&request, view.writer())?;
            }
        }

        Ok(())
    }
}
