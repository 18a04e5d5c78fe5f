//! TSX generator.
//!
//! Emits a typed wrapper component:
//!
//! ```text
//! type Props = { children?, <prop>?: 'a' | 'b' | boolean } & JSX.IntrinsicElements['<tag>']
//! export function <Name>({ children, <props>, ...props }: Props) { return <tag ...> }
//! ```

use crate::{CodegenError, RenderOptions};
use mist_extract::{AttributeKind, ComponentDescriptor};

/// JavaScript reserved words that cannot be destructured as bindings.
const RESERVED_WORDS: &[&str] = &[
    "break", "case", "catch", "class", "const", "continue", "debugger", "default", "delete",
    "do", "else", "enum", "export", "extends", "false", "finally", "for", "function", "if",
    "import", "in", "instanceof", "new", "null", "return", "super", "switch", "this", "throw",
    "true", "try", "typeof", "var", "void", "while", "with", "yield", "let", "static",
    "implements", "interface", "package", "private", "protected", "public", "await",
];

/// A variant prop and the `data-*` attribute it drives.
struct Prop<'d> {
    name: String,
    attribute: &'d str,
    kind: &'d AttributeKind,
}

/// Generate TSX source for the component `name`.
pub fn generate(
    name: &str,
    descriptor: &ComponentDescriptor,
    options: &RenderOptions,
) -> Result<String, CodegenError> {
    if !is_identifier(name) {
        return Err(CodegenError {
            message: format!("'{name}' is not a valid component name"),
        });
    }

    let tag = descriptor.tag_name.as_str();
    if tag.is_empty() {
        return Err(CodegenError {
            message: format!(
                "component '{name}' has no element, add a `<tag>:scope` rule to its @scope block"
            ),
        });
    }
    if !is_element_name(tag) {
        return Err(CodegenError {
            message: format!("component '{name}' has an invalid element name '{tag}'"),
        });
    }

    let props = collect_props(descriptor)?;
    log::debug!("rendering {name} as <{tag}> with {} prop(s)", props.len());

    let mut out = String::new();

    // Header and stylesheet import
    if !options.header.is_empty() {
        out.push_str(&options.header);
        out.push('\n');
    }
    if options.import_stylesheet {
        out.push_str(&format!("import './{name}{}'\n", crate::EXTENSION));
    }
    if !out.is_empty() {
        out.push('\n');
    }

    // Props type
    out.push_str("type Props = {\n");
    out.push_str("  children?: React.ReactNode\n");
    for prop in &props {
        out.push_str(&format!("  {}?: {}\n", prop.name, prop_type(prop.kind)));
    }
    out.push_str(&format!("}} & JSX.IntrinsicElements['{}']\n\n", escape(tag)));

    // Component
    let mut bindings = vec!["children".to_string()];
    bindings.extend(props.iter().map(|p| p.name.clone()));
    bindings.push("...props".into());

    let mut attributes = vec!["{...props}".to_string()];
    if !descriptor.class_name.is_empty() {
        attributes.push(format!("className=\"{}\"", descriptor.class_name));
    }
    attributes.extend(
        props
            .iter()
            .map(|p| format!("data-{}={{{}}}", p.attribute, p.name)),
    );

    out.push_str(&format!(
        "export function {name}({{ {} }}: Props) {{\n",
        bindings.join(", ")
    ));
    out.push_str("  return (\n");
    out.push_str(&format!("    <{tag} {}>\n", attributes.join(" ")));
    out.push_str("      {children}\n");
    out.push_str(&format!("    </{tag}>\n"));
    out.push_str("  )\n");
    out.push_str("}\n");

    Ok(out)
}

fn collect_props(descriptor: &ComponentDescriptor) -> Result<Vec<Prop<'_>>, CodegenError> {
    descriptor
        .attributes
        .iter()
        .map(|(attribute, kind)| {
            let name = prop_name(attribute);
            if !is_identifier(&name) || RESERVED_WORDS.contains(&name.as_str()) {
                return Err(CodegenError {
                    message: format!("data-{attribute} cannot be used as a prop named '{name}'"),
                });
            }
            Ok(Prop {
                name,
                attribute,
                kind,
            })
        })
        .collect()
}

/// `full-width` → `fullWidth`
pub fn prop_name(attribute: &str) -> String {
    let mut name = String::with_capacity(attribute.len());
    let mut upper = false;

    for c in attribute.chars() {
        if c == '-' {
            upper = !name.is_empty();
        } else if upper {
            name.push(c.to_ascii_uppercase());
            upper = false;
        } else {
            name.push(c);
        }
    }

    name
}

fn prop_type(kind: &AttributeKind) -> String {
    match kind {
        AttributeKind::Boolean => "boolean".into(),
        AttributeKind::Enum(values) if values.is_empty() => "string".into(),
        AttributeKind::Enum(values) => values
            .iter()
            .map(|v| format!("'{}'", escape(v)))
            .collect::<Vec<_>>()
            .join(" | "),
    }
}

/// Escape text for a single-quoted TypeScript string literal.
fn escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{2028}' | '\u{2029}' => out.push_str(&format!("\\u{:04x}", c as u32)),
            c if c.is_control() => out.push_str(&format!("\\u{{{:x}}}", c as u32)),
            c => out.push(c),
        }
    }
    out
}

/// JSX intrinsic element name: a letter followed by letters, digits or `-`.
fn is_element_name(tag: &str) -> bool {
    let mut chars = tag.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '-')
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}
