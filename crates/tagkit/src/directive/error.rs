//! Error types for directive processing.

use std::fmt;

use crate::fragment::RenderError;

/// Error from directive processing.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum DirectiveError {
    /// A directive attribute holds a value of the wrong shape.
    #[error("attribute {attribute} on <{element}> must be {expected}")]
    InvalidAttribute {
        /// Element the attribute was found on.
        element: String,
        /// Attribute name as declared.
        attribute: String,
        /// Expected shape (e.g., "a boolean").
        expected: &'static str,
    },

    /// The fragment renderer failed. The original error is kept as-is.
    #[error(transparent)]
    Render(#[from] RenderError),

    /// Writing to the ambient output stream failed.
    #[error("failed to write output")]
    Write(#[from] fmt::Error),

    /// Element nesting exceeded the configured maximum depth.
    #[error("maximum element depth ({max}) exceeded")]
    DepthExceeded {
        /// Configured maximum depth.
        max: usize,
    },
}

impl DirectiveError {
    pub(crate) fn invalid_attribute(
        element: &str,
        attribute: &str,
        expected: &'static str,
    ) -> Self {
        Self::InvalidAttribute {
            element: element.to_owned(),
            attribute: attribute.to_owned(),
            expected,
        }
    }
}
