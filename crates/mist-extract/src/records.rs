//! Traversal of the compiled tree.
//!
//! Yields one [`ExtractionRecord`] per `@scope` block and style rule, in
//! pre-order (a parent before its children), so an outer `@scope` is seen
//! before the rules nested inside it. The walk keeps an explicit stack of
//! child iterators instead of recursing.

use mist_parser::{CompiledNode, Stylesheet};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    /// An `@scope` at-rule.
    Scope,
    /// A style rule.
    Rule,
}

impl RecordKind {
    /// The record kind for a node, or `None` for nodes that carry no structure.
    pub fn of(node: &CompiledNode) -> Option<Self> {
        if node.is_scope() {
            Some(RecordKind::Scope)
        } else if node.is_rule() {
            Some(RecordKind::Rule)
        } else {
            None
        }
    }
}

/// A node's kind and selector parts, borrowed from the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtractionRecord<'a> {
    pub kind: RecordKind,
    pub selector_parts: &'a [String],
}

impl<'a> ExtractionRecord<'a> {
    /// Only the first part carries meaning for the convention.
    pub fn first_part(&self) -> Option<&'a str> {
        self.selector_parts.first().map(String::as_str)
    }
}

/// Lazy pre-order iterator over the records of a tree.
#[derive(Debug)]
pub struct Records<'a> {
    stack: Vec<std::slice::Iter<'a, CompiledNode>>,
}

impl<'a> Records<'a> {
    pub fn new(nodes: &'a [CompiledNode]) -> Self {
        Self {
            stack: vec![nodes.iter()],
        }
    }
}

impl<'a> Iterator for Records<'a> {
    type Item = ExtractionRecord<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let level = self.stack.last_mut()?;
            let Some(node) = level.next() else {
                self.stack.pop();
                continue;
            };

            if !node.children.is_empty() {
                self.stack.push(node.children.iter());
            }

            if let Some(kind) = RecordKind::of(node) {
                log::trace!("record {kind:?} {:?}", node.selector_parts);
                return Some(ExtractionRecord {
                    kind,
                    selector_parts: &node.selector_parts,
                });
            }
        }
    }
}

/// Records of a whole stylesheet.
pub fn records(sheet: &Stylesheet) -> Records<'_> {
    Records::new(&sheet.nodes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn collect(source: &str) -> Vec<(RecordKind, Vec<String>)> {
        let sheet = mist_parser::compile(source).unwrap();
        records(&sheet)
            .map(|r| (r.kind, r.selector_parts.to_vec()))
            .collect()
    }

    fn rule(selector: &str) -> (RecordKind, Vec<String>) {
        (RecordKind::Rule, vec![selector.to_string()])
    }

    #[test]
    fn test_empty_stylesheet_has_no_records() {
        assert!(collect("").is_empty());
    }

    #[test]
    fn test_declarations_and_comments_are_skipped() {
        assert_eq!(collect("/* c */ a { color: red; /* d */ }"), vec![rule("a")]);
    }

    #[test]
    fn test_other_at_rules_are_skipped_but_walked() {
        assert_eq!(
            collect("@media (min-width: 1px) { a {} } @import 'x';"),
            vec![rule("a")]
        );
    }

    #[test]
    fn test_pre_order() {
        let records = collect("@scope (.card) { a:scope { &[data-x] {} } b {} } c {}");
        assert_eq!(
            records,
            vec![
                (RecordKind::Scope, vec!["(.card)".to_string()]),
                rule("a:scope"),
                rule("a:scope[data-x]"),
                rule("b"),
                rule("c"),
            ]
        );
    }

    #[test]
    fn test_scope_without_prelude() {
        let records = collect("@scope { a {} }");
        assert_eq!(records[0], (RecordKind::Scope, Vec::new()));
    }

    #[test]
    fn test_deep_nesting_is_fully_visited() {
        let depth = 64;
        let mut source = String::new();
        for _ in 0..depth {
            source.push_str("@media screen { ");
        }
        source.push_str("a:scope[data-deep] {}");
        for _ in 0..depth {
            source.push_str(" }");
        }

        assert_eq!(collect(&source), vec![rule("a:scope[data-deep]")]);
    }

    #[test]
    fn test_iterator_is_lazy() {
        let sheet = mist_parser::compile("a {} b {} c {}").unwrap();
        let mut iter = records(&sheet);
        assert_eq!(iter.next().and_then(|r| r.first_part()), Some("a"));
        assert_eq!(iter.next().and_then(|r| r.first_part()), Some("b"));
    }
}
