//! The component descriptor and the reducer that builds it.

use crate::convention;
use crate::records::{ExtractionRecord, RecordKind};
use indexmap::IndexMap;
use mist_parser::Selector;
use serde::{Serialize, Serializer};

/// The structure of a component as recovered from its stylesheet.
///
/// Serializes as `{ "className", "tagName", "attributes" }`, where an enum
/// attribute is an array of its values and a boolean attribute is `true`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentDescriptor {
    pub class_name: String,
    pub tag_name: String,
    /// In order of first registration.
    pub attributes: IndexMap<String, AttributeKind>,
}

/// How a `data-*` prop varies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttributeKind {
    /// Distinct values in first-seen order.
    Enum(Vec<String>),
    /// Presence only.
    Boolean,
}

impl AttributeKind {
    pub fn is_boolean(&self) -> bool {
        matches!(self, AttributeKind::Boolean)
    }
}

impl Serialize for AttributeKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            AttributeKind::Enum(values) => values.serialize(serializer),
            AttributeKind::Boolean => serializer.serialize_bool(true),
        }
    }
}

impl ComponentDescriptor {
    /// Fold step: interpret one record and return the updated descriptor.
    pub fn apply(mut self, record: ExtractionRecord<'_>) -> Self {
        self.record(&record);
        self
    }

    /// Interpret one record. Records without a first selector part are skipped.
    pub fn record(&mut self, record: &ExtractionRecord<'_>) {
        let Some(first) = record.first_part() else {
            log::trace!("skipping {:?} record without selector", record.kind);
            return;
        };

        match record.kind {
            RecordKind::Scope => self.record_scope(first),
            RecordKind::Rule => self.record_rule(first),
        }
    }

    /// The first usable `@scope` designator names the component.
    fn record_scope(&mut self, designator: &str) {
        if !self.class_name.is_empty() {
            log::debug!(
                "ignoring @scope {designator}, class name already set to '{}'",
                self.class_name
            );
            return;
        }

        match convention::scope_class(designator) {
            Some(class_name) => {
                log::debug!("class name '{class_name}'");
                self.class_name = class_name;
            }
            None => log::trace!("unrecognized @scope designator {designator:?}"),
        }
    }

    /// Tag, enum and boolean detection all run on every rule.
    fn record_rule(&mut self, text: &str) {
        let selector = Selector::parse(text);

        if let Some(tag) = convention::self_tag(&selector) {
            log::debug!("tag '{tag}' from {text:?}");
            self.tag_name = tag.to_string();
        }

        for (name, value) in convention::enum_attributes(&selector) {
            self.register_enum(name, value);
        }

        for name in convention::boolean_attributes(&selector) {
            self.register_boolean(name);
        }
    }

    /// Add `value` to the enum attribute `name`. A boolean attribute of the
    /// same name becomes an enum; duplicate values are dropped.
    pub fn register_enum(&mut self, name: &str, value: &str) {
        if let Some(kind) = self.attributes.get_mut(name) {
            match kind {
                AttributeKind::Enum(values) => {
                    if !values.iter().any(|v| v == value) {
                        log::debug!("enum '{name}' += '{value}'");
                        values.push(value.to_string());
                    }
                }
                AttributeKind::Boolean => {
                    log::debug!("boolean '{name}' becomes enum with '{value}'");
                    *kind = AttributeKind::Enum(vec![value.to_string()]);
                }
            }
            return;
        }

        log::debug!("enum '{name}' = ['{value}']");
        self.attributes
            .insert(name.to_string(), AttributeKind::Enum(vec![value.to_string()]));
    }

    /// Register `name` as boolean unless it is already known.
    pub fn register_boolean(&mut self, name: &str) {
        if self.attributes.contains_key(name) {
            return;
        }

        log::debug!("boolean '{name}'");
        self.attributes
            .insert(name.to_string(), AttributeKind::Boolean);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn enum_of(values: &[&str]) -> AttributeKind {
        AttributeKind::Enum(values.iter().map(|v| v.to_string()).collect())
    }

    fn rule(parts: &[String]) -> ExtractionRecord<'_> {
        ExtractionRecord {
            kind: RecordKind::Rule,
            selector_parts: parts,
        }
    }

    fn scope(parts: &[String]) -> ExtractionRecord<'_> {
        ExtractionRecord {
            kind: RecordKind::Scope,
            selector_parts: parts,
        }
    }

    // =========================================================================
    // Registration
    // =========================================================================

    #[test]
    fn test_enum_values_in_first_seen_order() {
        let mut d = ComponentDescriptor::default();
        d.register_enum("size", "sm");
        d.register_enum("size", "lg");
        d.register_enum("size", "sm");
        assert_eq!(d.attributes["size"], enum_of(&["sm", "lg"]));
    }

    #[test]
    fn test_empty_value_counts() {
        let mut d = ComponentDescriptor::default();
        d.register_enum("size", "");
        d.register_enum("size", "");
        assert_eq!(d.attributes["size"], enum_of(&[""]));
    }

    #[test]
    fn test_boolean_is_idempotent() {
        let mut d = ComponentDescriptor::default();
        d.register_boolean("disabled");
        d.register_boolean("disabled");
        assert_eq!(d.attributes.len(), 1);
        assert!(d.attributes["disabled"].is_boolean());
    }

    #[test]
    fn test_enum_then_boolean_stays_enum() {
        let mut d = ComponentDescriptor::default();
        d.register_enum("state", "open");
        d.register_boolean("state");
        assert_eq!(d.attributes["state"], enum_of(&["open"]));
    }

    #[test]
    fn test_boolean_then_enum_becomes_enum() {
        let mut d = ComponentDescriptor::default();
        d.register_boolean("state");
        d.register_enum("state", "open");
        d.register_enum("state", "closed");
        assert_eq!(d.attributes["state"], enum_of(&["open", "closed"]));
    }

    #[test]
    fn test_upgrade_keeps_position() {
        let mut d = ComponentDescriptor::default();
        d.register_boolean("a");
        d.register_boolean("b");
        d.register_enum("a", "x");
        let keys: Vec<&str> = d.attributes.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["a", "b"]);
    }

    // =========================================================================
    // Records
    // =========================================================================

    #[test]
    fn test_scope_record_sets_class_name() {
        let parts = vec!["(.card)".to_string()];
        let d = ComponentDescriptor::default().apply(scope(&parts));
        assert_eq!(d.class_name, "card");
    }

    #[test]
    fn test_first_usable_scope_wins() {
        let unusable = vec!["(div)".to_string()];
        let first = vec!["(.first)".to_string()];
        let second = vec!["(.second)".to_string()];

        let d = ComponentDescriptor::default()
            .apply(scope(&[]))
            .apply(scope(&unusable))
            .apply(scope(&first))
            .apply(scope(&second));
        assert_eq!(d.class_name, "first");
    }

    #[test]
    fn test_rule_record_without_parts_is_skipped() {
        let d = ComponentDescriptor::default().apply(rule(&[]));
        assert_eq!(d, ComponentDescriptor::default());
    }

    #[test]
    fn test_only_first_selector_part_is_read() {
        let parts = vec!["a:scope".to_string(), "b:scope[data-x]".to_string()];
        let d = ComponentDescriptor::default().apply(rule(&parts));
        assert_eq!(d.tag_name, "a");
        assert!(d.attributes.is_empty());
    }

    #[test]
    fn test_last_tag_wins() {
        let a = vec!["a:scope".to_string()];
        let button = vec!["button:scope".to_string()];
        let bare = vec![":scope".to_string()];
        let d = ComponentDescriptor::default()
            .apply(rule(&a))
            .apply(rule(&button));
        assert_eq!(d.tag_name, "button");

        let d = d.apply(rule(&bare));
        assert_eq!(d.tag_name, "");
    }

    // =========================================================================
    // Serialization
    // =========================================================================

    #[test]
    fn test_serializes_like_parsed_input() {
        let mut d = ComponentDescriptor {
            class_name: "button".into(),
            tag_name: "button".into(),
            ..Default::default()
        };
        d.register_enum("size", "sm");
        d.register_boolean("disabled");

        let json = serde_json::to_string(&d).unwrap();
        assert_eq!(
            json,
            r#"{"className":"button","tagName":"button","attributes":{"size":["sm"],"disabled":true}}"#
        );
    }
}
