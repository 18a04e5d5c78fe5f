//! Compiled stylesheet tree.
//!
//! The tree keeps selector and prelude text verbatim (whitespace collapsed,
//! comments removed) so later stages can interpret it without reparsing
//! the whole stylesheet. Comments themselves are not kept.

use mist_lexer::Span;

/// A compiled stylesheet.
#[derive(Debug, Clone, PartialEq)]
pub struct Stylesheet {
    pub nodes: Vec<CompiledNode>,
}

/// Node classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    /// A style rule: `a:scope[data-size='sm'] { ... }`
    Rule,

    /// An at-rule, named without the `@` and lowercased: `@scope (.card) { ... }`
    AtRule(String),

    /// A `property: value` declaration.
    Declaration,
}

/// A node in the compiled tree.
///
/// `selector_parts` depends on the kind:
/// - `Rule`: the comma separated selectors, with nesting resolved
/// - `AtRule`: the comma separated prelude (`@scope (.card)` → `["(.card)"]`)
/// - `Declaration`: `[property, value]`
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledNode {
    pub kind: NodeKind,
    pub selector_parts: Vec<String>,
    pub children: Vec<CompiledNode>,
    pub span: Span,
}

impl CompiledNode {
    pub fn new(kind: NodeKind, selector_parts: Vec<String>, span: Span) -> Self {
        Self {
            kind,
            selector_parts,
            children: Vec::new(),
            span,
        }
    }

    pub fn with_children(mut self, children: Vec<CompiledNode>) -> Self {
        self.children = children;
        self
    }

    /// Whether this node is an `@scope` block.
    pub fn is_scope(&self) -> bool {
        matches!(&self.kind, NodeKind::AtRule(name) if name == "scope")
    }

    pub fn is_rule(&self) -> bool {
        self.kind == NodeKind::Rule
    }
}
