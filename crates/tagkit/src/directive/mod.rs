//! Pluggable tag directive API.
//!
//! This module provides a trait-based extensibility system for directives
//! attached to markup elements, either by element name (`<if>`, `<partial>`)
//! or by attribute token (`include-if`, `exclude-if`).
//!
//! # Architecture
//!
//! Each element is handled in two phases by [`TagProcessor`]:
//!
//! 1. **Gating** (order at or below [`GATING_ORDER`]): directives that may
//!    suppress the element. Once the element is suppressed, nothing else runs
//!    for it and its children are never visited.
//!
//! 2. **Default**: every other matching directive, in ascending order.
//!
//! Directives modify a [`TagOutput`] rather than writing markup. The processor
//! assembles the markup afterwards, with every directive attribute stripped.
//!
//! # Example
//!
//! ```
//! use tagkit::directive::{
//!     DirectiveError, TagContext, TagDirective, TagOutput, TagProcessor, Target, ViewContext,
//! };
//! use tagkit::{Element, MockFragments};
//!
//! struct CommentOut;
//!
//! impl TagDirective for CommentOut {
//!     fn targets(&self) -> &[Target] { &[Target::Attribute("comment-out")] }
//!
//!     fn attributes(&self) -> &[&'static str] { &["comment-out"] }
//!
//!     fn process(
//!         &mut self,
//!         _ctx: &TagContext<'_>,
//!         output: &mut TagOutput,
//!         _view: &mut ViewContext<'_>,
//!     ) -> Result<(), DirectiveError> {
//!         output.pre_element().push_str("<!--");
//!         output.post_element().push_str("-->");
//!         Ok(())
//!     }
//! }
//!
//! let mut processor = TagProcessor::new().with_builtin().with_directive(CommentOut);
//! let html = processor
//!     .render(&[Element::new("b").attr("comment-out", "").text("x").into()], &MockFragments::new())
//!     .unwrap();
//! assert_eq!(html, "<!--<b>x</b>-->");
//! ```

mod attribute;
mod context;
mod error;
mod output;
mod processor;
mod tag;

pub use attribute::{AttrValue, Attributes};
pub use context::{TagContext, ViewContext};
pub use error::DirectiveError;
pub use output::{TagMode, TagOutput};
pub use processor::{TagProcessor, TagProcessorConfig};
pub use tag::{DEFAULT_ORDER, GATING_ORDER, TagDirective, Target};
