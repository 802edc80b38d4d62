#![deny(missing_docs)]
//! domjsx core: a JSX pragma runtime that builds element trees through a
//! pluggable document host.

/// Child appender.
pub mod children;
/// In-memory document host.
pub mod dom;
/// Error types for the in-memory document.
pub mod error;
/// Element factory.
pub mod factory;
/// Script-compatible string forms of numbers and dates.
pub mod format;
/// The document host abstraction.
pub mod host;
/// SVG tag set and attribute-name patches.
pub mod tables;
/// Tag, attribute and child value types.
pub mod value;

pub use children::append_child;
pub use error::DomError;
pub use factory::{create_element, event_name};
pub use host::DocumentHost;
pub use tables::{HTML_NAMESPACE, SVG_NAMESPACE, is_svg_tag, patch_attribute_name};
pub use value::{AttributeValue, Attributes, Child, Component, TagDescriptor, Thunk};
