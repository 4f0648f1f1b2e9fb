//! Server-side template directives for conditional rendering and partial
//! substitution.
//!
//! This crate walks a pre-parsed markup tree and decides, per element, whether
//! it is emitted and which stored fragment is substituted in its place.
//!
//! # Architecture
//!
//! - [`directive`]: the [`TagDirective`] trait, element context and output
//!   handles, and the two-phase [`TagProcessor`] pipeline.
//! - [`conditional`]: `include-if` / `exclude-if` on any element, and the
//!   `<if>` wrapper element.
//! - [`partial`]: the `<partial>` element, rendered through the host's
//!   [`FragmentRenderer`].
//!
//! Rendering fragments is the host's job: implement [`FragmentRenderer`] on
//! top of the view engine. [`MockFragments`] (behind the `mock` feature) serves
//! fixed markup for tests.
//!
//! # Example
//!
//! ```
//! use serde_json::json;
//! use tagkit::{Element, MockFragments, Node, TagProcessor};
//!
//! let fragments = MockFragments::new().with_fragment("nav", "<nav></nav>");
//!
//! let page = vec![
//!     Node::from(Element::new("partial").attr("name", "nav").self_closing()),
//!     Node::from(
//!         Element::new("aside")
//!             .attr("include-if", json!(false))
//!             .text("debug panel"),
//!     ),
//!     Node::from(Element::new("main").attr("id", "content").text("Hello")),
//! ];
//!
//! let mut processor = TagProcessor::new().with_builtin();
//! let html = processor.render(&page, &fragments).unwrap();
//! assert_eq!(html, r#"<nav></nav><main id="content">Hello</main>"#);
//! ```

pub mod conditional;
pub mod directive;
mod fragment;
#[cfg(any(test, feature = "mock"))]
mod mock;
mod node;
pub mod partial;
mod util;

pub use directive::{DirectiveError, TagDirective, TagProcessor, TagProcessorConfig};
pub use fragment::{
    FragmentArgs, FragmentRenderer, FragmentRequest, HtmlContent, RenderError, RenderMode,
};
#[cfg(any(test, feature = "mock"))]
pub use mock::{MockFragments, RecordedCall};
pub use node::{Element, Node};
pub use util::escape_attribute;
