//! Tag processor: directive registry and render pipeline.
//!
//! Walks a pre-parsed tree, runs the directives attached to each element in
//! two phases (gating, then default), and assembles the resulting markup.

use std::fmt;

use super::{
    DirectiveError, GATING_ORDER, TagContext, TagDirective, TagMode, TagOutput, ViewContext,
};
use crate::conditional::{IfAttributeDirective, IfDirective};
use crate::fragment::FragmentRenderer;
use crate::node::{Element, Node};
use crate::partial::PartialDirective;

/// Configuration for the tag processor.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TagProcessorConfig {
    /// Maximum element nesting depth.
    ///
    /// Default: 64
    pub max_depth: usize,
}

impl Default for TagProcessorConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl TagProcessorConfig {
    /// Create a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self { max_depth: 64 }
    }

    /// Set the maximum element nesting depth.
    #[must_use]
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }
}

/// Processor for tag directives.
///
/// Holds the registry mapping element names and attribute tokens to
/// directives. The registry is consulted once per element.
///
/// # Example
///
/// ```
/// use tagkit::{Element, FragmentRenderer, FragmentRequest, HtmlContent, Node, RenderError};
/// use tagkit::directive::TagProcessor;
///
/// struct Fragments;
///
/// impl FragmentRenderer for Fragments {
///     fn render(&self, request: &FragmentRequest<'_>) -> Result<HtmlContent, RenderError> {
///         Ok(HtmlContent::new(format!("<footer>{}</footer>", request.name())))
///     }
/// }
///
/// let page = vec![
///     Node::from(Element::new("p").attr("include-if", false).text("hidden")),
///     Node::from(Element::new("if").attr("exclude-if", false).text("<p>shown</p>")),
///     Node::from(Element::new("partial").attr("name", "site").self_closing()),
/// ];
///
/// let mut processor = TagProcessor::new().with_builtin();
/// let html = processor.render(&page, &Fragments).unwrap();
/// assert_eq!(html, "<p>shown</p><footer>site</footer>");
/// ```
pub struct TagProcessor {
    config: TagProcessorConfig,
    directives: Vec<Box<dyn TagDirective>>,
}

impl Default for TagProcessor {
    fn default() -> Self {
        Self::new()
    }
}

impl TagProcessor {
    /// Create a new processor with default configuration and no directives.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(TagProcessorConfig::default())
    }

    /// Create a new processor with custom configuration.
    #[must_use]
    pub fn with_config(config: TagProcessorConfig) -> Self {
        Self {
            config,
            directives: Vec::new(),
        }
    }

    /// Register a directive.
    #[must_use]
    pub fn with_directive<D: TagDirective + 'static>(mut self, directive: D) -> Self {
        self.directives.push(Box::new(directive));
        self
    }

    /// Register the built-in directives: `include-if` / `exclude-if`, `<if>`,
    /// and `<partial>`.
    #[must_use]
    pub fn with_builtin(self) -> Self {
        self.with_directive(IfAttributeDirective)
            .with_directive(IfDirective)
            .with_directive(PartialDirective)
    }

    #[must_use]
    pub fn config(&self) -> &TagProcessorConfig {
        &self.config
    }

    /// Render a tree to a string.
    pub fn render(
        &mut self,
        nodes: &[Node],
        renderer: &dyn FragmentRenderer,
    ) -> Result<String, DirectiveError> {
        let mut out = String::new();
        self.render_to(nodes, renderer, &mut out)?;
        Ok(out)
    }

    /// Render a tree into an output stream.
    ///
    /// The stream is the ambient output for top-level elements: directives that
    /// render fragments directly write into it at the element's position.
    pub fn render_to(
        &mut self,
        nodes: &[Node],
        renderer: &dyn FragmentRenderer,
        out: &mut dyn fmt::Write,
    ) -> Result<(), DirectiveError> {
        let mut index = 0;
        self.render_nodes(nodes, renderer, out, 0, &mut index)
    }

    fn render_nodes(
        &mut self,
        nodes: &[Node],
        renderer: &dyn FragmentRenderer,
        out: &mut dyn fmt::Write,
        depth: usize,
        index: &mut usize,
    ) -> Result<(), DirectiveError> {
        for node in nodes {
            match node {
                Node::Text(text) => out.write_str(text)?,
                Node::Element(element) => {
                    self.render_element(element, renderer, out, depth, index)?;
                }
            }
        }
        Ok(())
    }

    fn render_element(
        &mut self,
        element: &Element,
        renderer: &dyn FragmentRenderer,
        out: &mut dyn fmt::Write,
        depth: usize,
        index: &mut usize,
    ) -> Result<(), DirectiveError> {
        if depth >= self.config.max_depth {
            return Err(DirectiveError::DepthExceeded {
                max: self.config.max_depth,
            });
        }

        let ctx = TagContext {
            element: element.name(),
            attributes: element.attributes(),
            index: *index,
            depth,
        };
        *index += 1;

        let mut output = TagOutput::new(
            element.name(),
            element.attributes().clone(),
            element.mode(),
        );
        self.process_element(&ctx, &mut output, &mut ViewContext::new(renderer, out))?;

        // Children are only rendered when they will be written: a suppressed
        // element's subtree never reaches its directives.
        let mut children = String::new();
        if !output.is_suppressed()
            && !output.is_content_modified()
            && element.mode() == TagMode::StartTagAndEndTag
        {
            self.render_nodes(element.children(), renderer, &mut children, depth + 1, index)?;
        }

        output.write_to(out, &children)?;
        Ok(())
    }

    /// Run the directives attached to one element.
    ///
    /// Hosts that walk their own tree call this per element. Gating directives
    /// run first; once the output is suppressed no further directive runs.
    /// Attribute tokens owned by every matched directive are stripped from
    /// the output afterwards, including those of directives that were skipped.
    pub fn process_element(
        &mut self,
        ctx: &TagContext<'_>,
        output: &mut TagOutput,
        view: &mut ViewContext<'_>,
    ) -> Result<(), DirectiveError> {
        let mut matched: Vec<usize> = self
            .directives
            .iter()
            .enumerate()
            .filter(|(_, d)| d.targets().iter().any(|t| t.matches(ctx)))
            .map(|(idx, _)| idx)
            .collect();

        // Stable sort: registration order breaks ties, attribute order never matters
        matched.sort_by_key(|&idx| self.directives[idx].order());

        tracing::trace!(
            element = ctx.element,
            id = %ctx.unique_id(),
            matched = matched.len(),
            "Processing element"
        );

        let split = matched.partition_point(|&idx| self.directives[idx].order() <= GATING_ORDER);
        let (gating, default) = matched.split_at(split);

        self.run_phase(gating, ctx, output, view)?;
        if !output.is_suppressed() {
            self.run_phase(default, ctx, output, view)?;
        }

        for &idx in &matched {
            for token in self.directives[idx].attributes() {
                output.attributes_mut().remove_all(token);
            }
        }

        Ok(())
    }

    fn run_phase(
        &mut self,
        phase: &[usize],
        ctx: &TagContext<'_>,
        output: &mut TagOutput,
        view: &mut ViewContext<'_>,
    ) -> Result<(), DirectiveError> {
        for &idx in phase {
            let directive = &mut self.directives[idx];
            directive.process(ctx, output, view)?;

            if output.is_suppressed() {
                tracing::debug!(
                    element = ctx.element,
                    id = %ctx.unique_id(),
                    directive = directive.name(),
                    "Element suppressed"
                );
                break;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::directive::{Attributes, DEFAULT_ORDER, Target};
    use crate::fragment::{FragmentRequest, HtmlContent, RenderError};

    struct NoFragments;

    impl FragmentRenderer for NoFragments {
        fn render(&self, request: &FragmentRequest<'_>) -> Result<HtmlContent, RenderError> {
            Err(RenderError::NotFound {
                name: request.name().to_owned(),
            })
        }
    }

    type Log = Arc<Mutex<Vec<String>>>;

    // Records every call, optionally suppressing
    struct Recorder {
        label: &'static str,
        targets: Vec<Target>,
        attributes: Vec<&'static str>,
        order: i32,
        suppress: bool,
        log: Log,
    }

    impl Recorder {
        fn new(label: &'static str, target: Target, order: i32, log: &Log) -> Self {
            let attributes = match target {
                Target::Attribute(token) => vec![token],
                Target::Element(_) => Vec::new(),
            };
            Self {
                label,
                targets: vec![target],
                attributes,
                order,
                suppress: false,
                log: Arc::clone(log),
            }
        }

        fn suppressing(mut self) -> Self {
            self.suppress = true;
            self
        }
    }

    impl TagDirective for Recorder {
        fn targets(&self) -> &[Target] {
            &self.targets
        }

        fn attributes(&self) -> &[&'static str] {
            &self.attributes
        }

        fn order(&self) -> i32 {
            self.order
        }

        fn process(
            &mut self,
            ctx: &TagContext<'_>,
            output: &mut TagOutput,
            _view: &mut ViewContext<'_>,
        ) -> Result<(), DirectiveError> {
            self.log
                .lock()
                .unwrap()
                .push(format!("{}@{}", self.label, ctx.unique_id()));
            if self.suppress {
                output.suppress_output();
            }
            Ok(())
        }
    }

    // Writes a marker straight to the ambient stream
    struct Streamer;

    impl TagDirective for Streamer {
        fn targets(&self) -> &[Target] {
            &[Target::Element("stream")]
        }

        fn process(
            &mut self,
            _ctx: &TagContext<'_>,
            output: &mut TagOutput,
            view: &mut ViewContext<'_>,
        ) -> Result<(), DirectiveError> {
            view.writer().write_str("[streamed]")?;
            output.clear_tag_name();
            Ok(())
        }
    }

    fn log() -> Log {
        Arc::new(Mutex::new(Vec::new()))
    }

    fn entries(log: &Log) -> Vec<String> {
        log.lock().unwrap().clone()
    }

    #[test]
    fn test_plain_tree_passthrough() {
        let nodes = vec![
            Node::text("<!doctype html>"),
            Node::from(
                Element::new("div")
                    .attr("class", "card")
                    .child(Element::new("br").start_tag_only())
                    .text("text"),
            ),
        ];

        let html = TagProcessor::new().render(&nodes, &NoFragments).unwrap();
        assert_eq!(html, r#"<!doctype html><div class="card"><br>text</div>"#);
    }

    #[test]
    fn test_order_independent_of_attribute_order() {
        let log = log();
        let mut processor = TagProcessor::new()
            .with_directive(Recorder::new("late", Target::Attribute("data-late"), DEFAULT_ORDER, &log))
            .with_directive(Recorder::new("gate", Target::Attribute("data-gate"), GATING_ORDER, &log));

        let first = Element::new("div").attr("data-late", "1").attr("data-gate", "1");
        let second = Element::new("div").attr("data-gate", "1").attr("data-late", "1");
        processor
            .render(&[first.into(), second.into()], &NoFragments)
            .unwrap();

        assert_eq!(
            entries(&log),
            vec!["gate@tag-0", "late@tag-0", "gate@tag-1", "late@tag-1"]
        );
    }

    #[test]
    fn test_ties_keep_registration_order() {
        let log = log();
        let mut processor = TagProcessor::new()
            .with_directive(Recorder::new("b", Target::Element("x"), DEFAULT_ORDER, &log))
            .with_directive(Recorder::new("a", Target::Element("x"), DEFAULT_ORDER, &log));

        processor
            .render(&[Element::new("x").into()], &NoFragments)
            .unwrap();

        assert_eq!(entries(&log), vec!["b@tag-0", "a@tag-0"]);
    }

    #[test]
    fn test_suppression_skips_later_directives() {
        let log = log();
        let mut processor = TagProcessor::new()
            .with_directive(
                Recorder::new("gate", Target::Attribute("data-gate"), GATING_ORDER, &log)
                    .suppressing(),
            )
            .with_directive(Recorder::new("side", Target::Attribute("data-side"), DEFAULT_ORDER, &log));

        let element = Element::new("div")
            .attr("data-side", "1")
            .attr("data-gate", "1")
            .text("content");
        let html = processor.render(&[element.into()], &NoFragments).unwrap();

        assert_eq!(html, "");
        assert_eq!(entries(&log), vec!["gate@tag-0"]);
    }

    #[test]
    fn test_suppression_in_gating_phase_stops_remaining_gating() {
        let log = log();
        let mut processor = TagProcessor::new()
            .with_directive(
                Recorder::new("first", Target::Element("x"), GATING_ORDER - 1, &log).suppressing(),
            )
            .with_directive(Recorder::new("second", Target::Element("x"), GATING_ORDER, &log));

        processor
            .render(&[Element::new("x").into()], &NoFragments)
            .unwrap();

        assert_eq!(entries(&log), vec!["first@tag-0"]);
    }

    #[test]
    fn test_suppressed_children_never_processed() {
        let log = log();
        let mut processor = TagProcessor::new()
            .with_directive(
                Recorder::new("gate", Target::Attribute("data-gate"), GATING_ORDER, &log)
                    .suppressing(),
            )
            .with_directive(Recorder::new("child", Target::Element("span"), DEFAULT_ORDER, &log));

        let nodes = vec![
            Node::from(
                Element::new("div")
                    .attr("data-gate", "1")
                    .child(Element::new("span").text("inner")),
            ),
            Node::from(Element::new("span").text("sibling")),
        ];
        let html = processor.render(&nodes, &NoFragments).unwrap();

        assert_eq!(html, "<span>sibling</span>");
        assert_eq!(entries(&log), vec!["gate@tag-0", "child@tag-1"]);
    }

    #[test]
    fn test_directive_attributes_stripped_even_when_skipped() {
        let log = log();
        let mut processor = TagProcessor::new()
            .with_directive(
                Recorder::new("gate", Target::Attribute("data-gate"), GATING_ORDER, &log)
                    .suppressing(),
            )
            .with_directive(Recorder::new("side", Target::Attribute("data-side"), DEFAULT_ORDER, &log));

        let ctx_attrs: Attributes = [("data-gate", "1"), ("data-side", "1"), ("id", "keep")]
            .into_iter()
            .collect();
        let ctx = TagContext {
            element: "div",
            attributes: &ctx_attrs,
            index: 0,
            depth: 0,
        };
        let mut output = TagOutput::new("div", ctx_attrs.clone(), TagMode::StartTagAndEndTag);
        let mut sink = String::new();
        processor
            .process_element(&ctx, &mut output, &mut ViewContext::new(&NoFragments, &mut sink))
            .unwrap();

        assert!(output.is_suppressed());
        assert_eq!(entries(&log), vec!["gate@tag-0"]);
        assert_eq!(output.attributes().to_markup(), r#" id="keep""#);
    }

    #[test]
    fn test_unknown_attributes_untouched() {
        let mut processor = TagProcessor::new();
        let element = Element::new("div").attr("include-if", "false").text("x");
        let html = processor.render(&[element.into()], &NoFragments).unwrap();

        assert_eq!(html, r#"<div include-if="false">x</div>"#);
    }

    #[test]
    fn test_direct_writes_land_at_element_position() {
        let mut processor = TagProcessor::new().with_directive(Streamer);
        let nodes = vec![
            Node::text("<ul>"),
            Node::from(
                Element::new("li").child(Element::new("stream").text("(child)")),
            ),
            Node::text("</ul>"),
        ];

        let html = processor.render(&nodes, &NoFragments).unwrap();
        assert_eq!(html, "<ul><li>[streamed](child)</li></ul>");
    }

    #[test]
    fn test_depth_limit() {
        let config = TagProcessorConfig::new().with_max_depth(2);
        let mut processor = TagProcessor::with_config(config);

        let shallow = Element::new("a").child(Element::new("b"));
        assert!(processor.render(&[shallow.into()], &NoFragments).is_ok());

        let deep = Element::new("a").child(Element::new("b").child(Element::new("c")));
        let err = processor.render(&[deep.into()], &NoFragments).unwrap_err();
        assert!(matches!(err, DirectiveError::DepthExceeded { max: 2 }));
    }

    #[test]
    fn test_config_builder() {
        let config = TagProcessorConfig::new().with_max_depth(8);
        assert_eq!(config.max_depth, 8);
        assert_eq!(TagProcessorConfig::default().max_depth, 64);

        let processor = TagProcessor::with_config(config.clone());
        assert_eq!(processor.config(), &config);
    }

    #[test]
    fn test_directive_error_aborts_render() {
        struct Failing;

        impl TagDirective for Failing {
            fn targets(&self) -> &[Target] {
                &[Target::Element("boom")]
            }

            fn process(
                &mut self,
                ctx: &TagContext<'_>,
                _output: &mut TagOutput,
                _view: &mut ViewContext<'_>,
            ) -> Result<(), DirectiveError> {
                Err(DirectiveError::invalid_attribute(ctx.element, "x", "a boolean"))
            }
        }

        let mut processor = TagProcessor::new().with_directive(Failing);
        let err = processor
            .render(&[Element::new("boom").into()], &NoFragments)
            .unwrap_err();
        assert!(matches!(err, DirectiveError::InvalidAttribute { .. }));
    }
}
