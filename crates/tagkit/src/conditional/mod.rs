//! Conditional rendering directives.
//!
//! Two directives gate whether markup is emitted:
//!
//! - [`IfAttributeDirective`]: `include-if` / `exclude-if` on any element.
//!   Suppresses the whole element (tag and content) on a negative decision.
//! - [`IfDirective`]: a dedicated `<if>` element. Never writes its own tag,
//!   and suppresses its content on a negative decision.
//!
//! Both run in the gating phase, so a suppressed element never triggers the
//! other directives attached to it.
//!
//! The two decision rules differ on purpose: for the attribute form an absent
//! `include-if` means "no opinion", for the element form it defaults to `true`.
//! See [`attribute_suppresses`] and [`element_renders`].
//!
//! # Example
//!
//! ```
//! use tagkit::conditional::{attribute_suppresses, element_renders};
//!
//! // include-if unset: attribute form renders normally
//! assert!(!attribute_suppresses(None, false));
//! assert!(attribute_suppresses(Some(false), false));
//!
//! // element form: include defaults to true
//! assert!(element_renders(true, false));
//! assert!(!element_renders(true, true));
//! ```

mod attribute;
mod element;

pub use attribute::{IfAttributeDirective, attribute_suppresses};
pub use element::{IfDirective, element_renders};

/// Attribute holding the include flag.
pub const INCLUDE_IF_ATTRIBUTE: &str = "include-if";

/// Attribute holding the exclude flag.
pub const EXCLUDE_IF_ATTRIBUTE: &str = "exclude-if";

/// Name of the conditional wrapper element.
pub const IF_ELEMENT: &str = "if";
