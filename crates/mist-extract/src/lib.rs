//! MistCSS Extractor
//!
//! Recovers a component's structure from its compiled stylesheet: the class
//! name from `@scope (.name)`, the element from `tag:scope`, and variant props
//! from `[data-*]` attribute selectors.
//!
//! Extraction is a fold over a lazy traversal:
//!
//! ```text
//! Stylesheet → records() → fold(ComponentDescriptor::apply) → ComponentDescriptor
//! ```
//!
//! # Example
//!
//! ```
//! use mist_extract::{parse_input, AttributeKind};
//!
//! let d = parse_input("@scope (.button) { button:scope[data-disabled] {} }").unwrap();
//! assert_eq!(d.class_name, "button");
//! assert_eq!(d.tag_name, "button");
//! assert_eq!(d.attributes["disabled"], AttributeKind::Boolean);
//! ```

pub mod convention;
pub mod descriptor;
pub mod records;

pub use descriptor::{AttributeKind, ComponentDescriptor};
pub use mist_parser::ParseError;
pub use records::{records, ExtractionRecord, RecordKind, Records};

use mist_parser::Stylesheet;

/// Extract the component descriptor from a compiled stylesheet.
pub fn extract(sheet: &Stylesheet) -> ComponentDescriptor {
    let descriptor = records(sheet).fold(ComponentDescriptor::default(), ComponentDescriptor::apply);

    log::debug!(
        "extracted <{}> .{} with {} attribute(s)",
        descriptor.tag_name,
        descriptor.class_name,
        descriptor.attributes.len()
    );
    descriptor
}

/// Compile stylesheet source and extract its descriptor.
pub fn parse_input(source: &str) -> Result<ComponentDescriptor, ParseError> {
    let sheet = mist_parser::compile(source)?;
    Ok(extract(&sheet))
}
