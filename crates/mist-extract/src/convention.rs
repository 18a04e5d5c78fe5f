//! The MistCSS authoring convention.
//!
//! Recognized shapes:
//! - `@scope (.name)`: the component's class name
//! - `tag:scope`, optionally followed by attribute selectors: the rendered element
//! - `[data-name='value']`: one value of an enum prop
//! - `[data-name]`: a boolean prop
//!
//! `name` is restricted to lowercase ASCII letters and hyphens. Enum values
//! must be single-quoted. Anything else is not part of the convention.

use mist_lexer::{QuoteStyle, Scanner, TokenKind};
use mist_parser::{FragmentKind, Selector};

/// Class name from an `@scope` designator such as `(.card)`. Only a single
/// class selector is accepted as the scope root; a `to (...)` limit is ignored.
pub fn scope_class(designator: &str) -> Option<String> {
    let tokens = Scanner::tokenize(designator).ok()?;
    let significant: Vec<&TokenKind> = tokens
        .iter()
        .map(|t| &t.kind)
        .filter(|k| !k.is_trivia())
        .collect();

    match significant.as_slice() {
        [TokenKind::LParen, TokenKind::Delim('.'), TokenKind::Ident(name), TokenKind::RParen, ..] => {
            Some(name.clone())
        }
        _ => None,
    }
}

/// Element name from a self-referencing selector: the text before a `:scope`
/// that is followed by nothing but attribute selectors. A bare `:scope`
/// yields the empty name.
pub fn self_tag(selector: &Selector) -> Option<&str> {
    let fragments = selector.fragments();
    let index = fragments
        .iter()
        .rposition(|f| matches!(&f.kind, FragmentKind::PseudoClass(name) if name == "scope"))?;

    if !fragments[index + 1..].iter().all(|f| f.kind.is_attribute()) {
        return None;
    }

    Some(selector.text_before(index))
}

/// Prop name for a `data-*` attribute name.
pub fn data_attribute(name: &str) -> Option<&str> {
    let attribute = name.strip_prefix("data-")?;
    let valid = !attribute.is_empty()
        && attribute
            .chars()
            .all(|c| c.is_ascii_lowercase() || c == '-');
    valid.then_some(attribute)
}

/// `(name, value)` for every `[data-name='value']` in the selector, in order.
pub fn enum_attributes(selector: &Selector) -> impl Iterator<Item = (&str, &str)> {
    selector.fragments().iter().filter_map(|f| match &f.kind {
        FragmentKind::AttributeEquals {
            name,
            value,
            quote: Some(QuoteStyle::Single),
        } => data_attribute(name).map(|attribute| (attribute, value.as_str())),
        _ => None,
    })
}

/// `name` for every `[data-name]` in the selector, in order.
pub fn boolean_attributes(selector: &Selector) -> impl Iterator<Item = &str> {
    selector.fragments().iter().filter_map(|f| match &f.kind {
        FragmentKind::AttributePresence { name } => data_attribute(name),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn tag(text: &str) -> Option<String> {
        self_tag(&Selector::parse(text)).map(str::to_string)
    }

    fn enums(text: &str) -> Vec<(String, String)> {
        enum_attributes(&Selector::parse(text))
            .map(|(n, v)| (n.to_string(), v.to_string()))
            .collect()
    }

    fn booleans(text: &str) -> Vec<String> {
        boolean_attributes(&Selector::parse(text))
            .map(str::to_string)
            .collect()
    }

    // =========================================================================
    // @scope designators
    // =========================================================================

    #[test]
    fn test_scope_class() {
        assert_eq!(scope_class("(.card)"), Some("card".into()));
        assert_eq!(scope_class("( .card )"), Some("card".into()));
        assert_eq!(scope_class("(.card-title)"), Some("card-title".into()));
    }

    #[test]
    fn test_scope_class_with_limit() {
        assert_eq!(scope_class("(.card) to (.content)"), Some("card".into()));
    }

    #[test]
    fn test_scope_class_rejects_other_roots() {
        assert_eq!(scope_class("(div)"), None);
        assert_eq!(scope_class("(.a .b)"), None);
        assert_eq!(scope_class(".card"), None);
        assert_eq!(scope_class(""), None);
    }

    // =========================================================================
    // Tag detection
    // =========================================================================

    #[test]
    fn test_tag_from_scope_suffix() {
        assert_eq!(tag("div:scope"), Some("div".into()));
        assert_eq!(tag("button:scope"), Some("button".into()));
    }

    #[test]
    fn test_tag_keeps_prefix_text() {
        assert_eq!(tag(".foo:scope"), Some(".foo".into()));
    }

    #[test]
    fn test_tag_with_trailing_attributes() {
        assert_eq!(
            tag("a:scope[data-variant='primary'][data-disabled]"),
            Some("a".into())
        );
    }

    #[test]
    fn test_bare_scope_has_empty_tag() {
        assert_eq!(tag(":scope"), Some(String::new()));
        assert_eq!(tag(":scope[data-x]"), Some(String::new()));
    }

    #[test]
    fn test_scope_not_at_end() {
        assert_eq!(tag("a:scope:hover"), None);
        assert_eq!(tag("a:scope > span"), None);
        assert_eq!(tag("a:scope::before"), None);
    }

    #[test]
    fn test_no_scope() {
        assert_eq!(tag("a[data-x]"), None);
    }

    // =========================================================================
    // Data attributes
    // =========================================================================

    #[test]
    fn test_data_attribute_names() {
        assert_eq!(data_attribute("data-size"), Some("size"));
        assert_eq!(data_attribute("data-full-width"), Some("full-width"));
        assert_eq!(data_attribute("data-"), None);
        assert_eq!(data_attribute("data-Size"), None);
        assert_eq!(data_attribute("data-size2"), None);
        assert_eq!(data_attribute("aria-pressed"), None);
    }

    #[test]
    fn test_enum_attributes() {
        assert_eq!(
            enums("a:scope[data-size='sm'][data-variant='primary']"),
            vec![
                ("size".to_string(), "sm".to_string()),
                ("variant".to_string(), "primary".to_string()),
            ]
        );
    }

    #[test]
    fn test_enum_attribute_empty_value() {
        assert_eq!(enums("[data-size='']"), vec![("size".to_string(), String::new())]);
    }

    #[test]
    fn test_enum_requires_single_quotes() {
        assert!(enums("[data-size=\"sm\"]").is_empty());
        assert!(enums("[data-size=sm]").is_empty());
    }

    #[test]
    fn test_enum_ignores_other_matchers() {
        assert!(enums("[data-size^='s']").is_empty());
        assert!(enums("[data-size='s' i]").is_empty());
        assert!(booleans("[data-size^='s']").is_empty());
    }

    #[test]
    fn test_boolean_attributes() {
        assert_eq!(booleans("a[data-disabled][data-loading]"), vec!["disabled", "loading"]);
    }

    #[test]
    fn test_mixed_attributes_in_one_selector() {
        let text = "a[data-a='1'][data-b]";
        assert_eq!(enums(text), vec![("a".to_string(), "1".to_string())]);
        assert_eq!(booleans(text), vec!["b"]);
    }

    #[test]
    fn test_non_data_attributes_ignored() {
        assert!(booleans("input[disabled]").is_empty());
        assert!(enums("a[href='#']").is_empty());
    }
}
