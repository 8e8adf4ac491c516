//! Schema nodes, the rule composer and the re-wrappable `Schema` entry point.
//!
//! Compilation is eager: every keyword is checked when a document is wrapped,
//! so a malformed schema fails at `wrap` and never at validation time.
use std::sync::Arc;

use crate::error::{Result, SchemaError};
use crate::keywords::{Context, KeywordRegistry};
use crate::rule::{Rule, Validator};
use crate::value::Value;

/// Builds the composite rule for one schema document.
///
/// Object documents become the AND of their registered keywords in
/// declaration order; unregistered keys are ignored. `true`/`false` become
/// boolean schemas. Anything else is an invalid schema.
pub(crate) fn compile(document: &Value, path: &str, registry: &KeywordRegistry) -> Result<Rule> {
    match document {
        Value::Bool(accept) => Ok(Rule::Const(*accept)),
        Value::Object(node) => {
            let cx = Context { node, path, registry };
            let mut rules = Vec::with_capacity(node.len());
            for (name, value) in node {
                if let Some(ctor) = registry.get(name) {
                    rules.push(ctor(value, &cx)?);
                }
            }
            Ok(Rule::All(rules))
        }
        other => Err(SchemaError::invalid(
            path,
            "schema",
            format!("must be an object or a boolean, found {}", other.kind()),
        )),
    }
}

// ————————————————————————————————————————————————————————————————————————————
// SCHEMA NODE
// ————————————————————————————————————————————————————————————————————————————

/// A schema document together with its compiled rule.
///
/// The document is kept verbatim, unknown keywords included.
#[derive(Debug, Clone)]
pub struct SchemaNode {
    document: Value,
    validator: Validator,
}

impl SchemaNode {
    pub fn wrap(document: impl Into<Value>) -> Result<Self> {
        Self::wrap_with(document, &KeywordRegistry::shared())
    }

    pub fn wrap_with(document: impl Into<Value>, registry: &KeywordRegistry) -> Result<Self> {
        let document = document.into();
        let rule = compile(&document, "#", registry)?;
        Ok(Self { document, validator: Validator::new(rule) })
    }

    pub fn document(&self) -> &Value {
        &self.document
    }

    /// Raw value of a keyword, recognized or not.
    pub fn keyword(&self, name: &str) -> Option<&Value> {
        self.document.get(name)
    }

    pub fn validator(&self) -> &Validator {
        &self.validator
    }
}

// ————————————————————————————————————————————————————————————————————————————
// SCHEMA
// ————————————————————————————————————————————————————————————————————————————

/// Entry point. Holds at most one root node and can be re-bound with `wrap`.
///
/// An unwrapped schema accepts every value. If `wrap` fails, the previous
/// root (or the unwrapped state) is kept unchanged.
///
/// `wrap` takes `&mut self`, so sharing one `Schema` between threads needs
/// external synchronization; `Validator` handles are `Send + Sync`.
#[derive(Debug, Clone)]
pub struct Schema {
    registry: Arc<KeywordRegistry>,
    root: Option<SchemaNode>,
}

impl Default for Schema {
    fn default() -> Self {
        Self::new()
    }
}

impl Schema {
    pub fn new() -> Self {
        Self::with_registry(KeywordRegistry::shared())
    }

    pub fn with_registry(registry: Arc<KeywordRegistry>) -> Self {
        Self { registry, root: None }
    }

    pub fn from_document(document: impl Into<Value>) -> Result<Self> {
        let mut schema = Self::new();
        schema.wrap(document)?;
        Ok(schema)
    }

    /// Binds a new root document, replacing the previous rule tree.
    pub fn wrap(&mut self, document: impl Into<Value>) -> Result<&SchemaNode> {
        let node = SchemaNode::wrap_with(document, &self.registry).inspect_err(|err| {
            tracing::debug!(%err, "schema rejected; keeping previous root");
        })?;
        tracing::debug!(keywords = node.validator().rule().len(), "schema wrapped");
        Ok(self.root.insert(node))
    }

    /// Drops the root; the schema accepts everything again.
    pub fn unwrap_root(&mut self) -> Option<SchemaNode> {
        self.root.take()
    }

    pub fn root(&self) -> Option<&SchemaNode> {
        self.root.as_ref()
    }

    pub fn registry(&self) -> &KeywordRegistry {
        &self.registry
    }

    /// The composed rule of the current root, or an accept-all validator
    /// when nothing has been wrapped.
    pub fn default_validator(&self) -> Validator {
        self.root
            .as_ref()
            .map(|node| node.validator().clone())
            .unwrap_or_default()
    }

    pub fn is_valid(&self, instance: &Value) -> bool {
        match &self.root {
            Some(node) => node.validator().is_valid(instance),
            None => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rule::Keyword;
    use serde_json::json;

    fn corpus() -> Vec<Value> {
        [
            json!({"obj": {}, "arr": [], "num": 5, "str": "123456", "bool": true, "null": null}),
            json!({}),
            json!([]),
            json!(5),
            json!(6.8),
            json!("123456"),
            json!(true),
            json!(null),
        ]
        .into_iter()
        .map(Value::from)
        .collect()
    }

    #[test]
    fn unwrapped_schema_validates_all() {
        let schema = Schema::new();
        assert!(schema.root().is_none());
        for v in corpus() {
            assert!(schema.default_validator().is_valid(&v));
            assert!(schema.is_valid(&v));
        }
    }

    #[test]
    fn rewrap_replaces_the_rule_tree() {
        let mut schema = Schema::new();
        schema.wrap(json!({"type": "object"})).unwrap();
        let before = schema.default_validator();
        schema.wrap(json!({"type": "array"})).unwrap();
        let after = schema.default_validator();

        let arr = Value::from(json!([]));
        assert!(!before.is_valid(&arr), "earlier handles are snapshots");
        assert!(after.is_valid(&arr));
        assert!(schema.is_valid(&arr));
    }

    #[test]
    fn rewrap_with_the_same_document_is_idempotent() {
        let doc = json!({"type": "object", "required": ["obj"], "properties": {"num": {"multipleOf": 5}}});
        let mut schema = Schema::new();
        schema.wrap(doc.clone()).unwrap();
        let first: Vec<bool> = corpus().iter().map(|v| schema.default_validator().is_valid(v)).collect();
        schema.wrap(doc).unwrap();
        let second: Vec<bool> = corpus().iter().map(|v| schema.default_validator().is_valid(v)).collect();
        assert_eq!(first, second);
        assert_eq!(first[0], true);
        assert!(first[1..].iter().all(|ok| !ok));
    }

    #[test]
    fn failed_wrap_keeps_the_previous_root() {
        let mut schema = Schema::new();
        schema.wrap(json!({"type": "string"})).unwrap();
        let err = schema.wrap(json!({"multipleOf": -1})).unwrap_err();
        assert!(err.is_invalid_schema());
        assert_eq!(schema.root().unwrap().keyword("type"), Some(&Value::from("string")));
        assert!(schema.is_valid(&Value::from("still a string schema")));
        assert!(!schema.is_valid(&Value::from(1)));

        let mut fresh = Schema::new();
        assert!(fresh.wrap(json!([])).is_err());
        assert!(fresh.root().is_none());
        assert!(fresh.is_valid(&Value::from(1)));
    }

    #[test]
    fn documents_must_be_objects_or_booleans() {
        for doc in [json!([]), json!(1), json!("x"), json!(null)] {
            let err = SchemaNode::wrap(doc).unwrap_err();
            assert!(matches!(err, SchemaError::InvalidSchema { ref path, .. } if path == "#"));
        }
        assert!(SchemaNode::wrap(json!(true)).unwrap().validator().is_valid(&Value::Null));
        assert!(!SchemaNode::wrap(json!(false)).unwrap().validator().is_valid(&Value::Null));
    }

    #[test]
    fn unknown_keywords_are_kept_but_ignored() {
        let node = SchemaNode::wrap(json!({
            "$schema": "http://json-schema.org/draft-04/schema#",
            "title": "thing",
            "x-vendor": {"anything": [1, 2]},
            "type": "object"
        }))
        .unwrap();
        assert_eq!(node.keyword("title"), Some(&Value::from("thing")));
        assert_eq!(node.validator().rule().len(), 1);
        assert!(node.validator().is_valid(&Value::from(json!({}))));
    }

    #[test]
    fn failures_follow_declaration_order() {
        let v = Schema::from_document(json!({
            "required": ["a"],
            "type": "array",
            "minItems": 1
        }))
        .unwrap()
        .default_validator();
        let report = v.validate(&Value::from(json!({})));
        let keywords: Vec<&str> = report.failures.iter().map(|f| f.keyword.as_str()).collect();
        assert_eq!(keywords, vec!["required", "type"]);
    }

    #[derive(Debug)]
    struct MaxProperties(usize);

    impl Keyword for MaxProperties {
        fn name(&self) -> &str { "maxProperties" }
        fn is_valid(&self, instance: &Value) -> bool {
            instance.as_object().map_or(true, |m| m.len() <= self.0)
        }
    }

    fn compile_max_properties(value: &Value, cx: &Context<'_>) -> Result<Rule> {
        let n = cx.count("maxProperties", value)?;
        Ok(Rule::Extension(Arc::new(MaxProperties(n as usize))))
    }

    #[test]
    fn registered_keywords_compose_without_touching_the_composer() {
        let mut registry = KeywordRegistry::draft4();
        registry.register("maxProperties", compile_max_properties);
        let mut schema = Schema::with_registry(Arc::new(registry));
        schema
            .wrap(json!({"properties": {"inner": {"maxProperties": 1}}}))
            .unwrap();
        let v = schema.default_validator();
        assert!(v.is_valid(&Value::from(json!({"inner": {"a": 1}}))));
        let report = v.validate(&Value::from(json!({"inner": {"a": 1, "b": 2}})));
        assert_eq!(report.first().unwrap().path, "/inner");
        assert_eq!(report.first().unwrap().keyword, "maxProperties");

        // the shared draft-04 registry does not know it
        let plain = Schema::from_document(json!({"maxProperties": 1})).unwrap();
        assert!(plain.is_valid(&Value::from(json!({"a": 1, "b": 2}))));
    }
}
