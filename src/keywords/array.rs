//! Array keywords: `items`, `minItems`, `maxItems`.
use super::{Context, Limit};
use crate::error::Result;
use crate::report::{InstancePath, Report};
use crate::rule::{Keyword, Rule};
use crate::value::Value;

/// `items` is either one schema for every element or a list of positional
/// schemas. Elements past the end of the list are unconstrained.
#[derive(Debug, Clone)]
pub enum ItemsRule {
    Each(Box<Rule>),
    Tuple(Vec<Rule>),
}

impl ItemsRule {
    pub fn children(&self) -> impl Iterator<Item = &Rule> {
        match self {
            ItemsRule::Each(rule) => std::slice::from_ref(&**rule).iter(),
            ItemsRule::Tuple(rules) => rules.iter(),
        }
    }

    fn pairs<'a>(&'a self, elems: &'a [Value]) -> Box<dyn Iterator<Item = (&'a Rule, &'a Value)> + 'a> {
        match self {
            ItemsRule::Each(rule) => Box::new(elems.iter().map(move |e| (&**rule, e))),
            ItemsRule::Tuple(rules) => Box::new(rules.iter().zip(elems)),
        }
    }
}

impl Keyword for ItemsRule {
    fn name(&self) -> &str { "items" }

    fn is_valid(&self, instance: &Value) -> bool {
        let Value::Array(elems) = instance else { return true };
        self.pairs(elems).all(|(rule, elem)| rule.is_valid(elem))
    }

    fn validate(&self, instance: &Value, path: &mut InstancePath, report: &mut Report) {
        let Value::Array(elems) = instance else { return };
        for (i, (rule, elem)) in self.pairs(elems).enumerate() {
            path.push(i.to_string());
            rule.validate(elem, path, report);
            path.pop();
        }
    }
}

pub fn compile_items(value: &Value, cx: &Context<'_>) -> Result<Rule> {
    let rule = match value {
        Value::Array(schemas) => {
            let mut rules = Vec::with_capacity(schemas.len());
            for (i, schema) in schemas.iter().enumerate() {
                let index = i.to_string();
                rules.push(cx.compile_child(&["items", index.as_str()], schema)?);
            }
            ItemsRule::Tuple(rules)
        }
        schema => ItemsRule::Each(Box::new(cx.compile_child(&["items"], schema)?)),
    };
    Ok(Rule::Items(rule))
}

#[derive(Debug, Clone)]
pub struct CountRule {
    limit: Limit,
    items: u64,
}

impl Keyword for CountRule {
    fn name(&self) -> &str {
        match self.limit {
            Limit::Min => "minItems",
            Limit::Max => "maxItems",
        }
    }

    fn is_valid(&self, instance: &Value) -> bool {
        match instance {
            Value::Array(elems) => self.limit.admits(elems.len() as u64, self.items),
            _ => true,
        }
    }

    fn validate(&self, instance: &Value, path: &mut InstancePath, report: &mut Report) {
        if let Value::Array(elems) = instance {
            if !self.is_valid(instance) {
                let expected = format!("{} {} items", self.limit.describe(), self.items);
                report.fail(self.name(), path, format!("expected {expected}, found {}", elems.len()));
            }
        }
    }
}

pub fn compile_min_items(value: &Value, cx: &Context<'_>) -> Result<Rule> {
    let items = cx.count("minItems", value)?;
    Ok(Rule::ItemCount(CountRule { limit: Limit::Min, items }))
}

pub fn compile_max_items(value: &Value, cx: &Context<'_>) -> Result<Rule> {
    let items = cx.count("maxItems", value)?;
    Ok(Rule::ItemCount(CountRule { limit: Limit::Max, items }))
}

#[cfg(test)]
mod tests {
    use crate::error::SchemaError;
    use crate::schema::Schema;
    use crate::value::Value;
    use serde_json::json;

    #[test]
    fn items_schema_applies_to_every_element() {
        let v = Schema::from_document(json!({"items": {"type": "number", "multipleOf": 2}}))
            .unwrap()
            .default_validator();
        assert!(v.is_valid(&Value::from(json!([]))));
        assert!(v.is_valid(&Value::from(json!([2, 4, 6]))));
        let report = v.validate(&Value::from(json!([2, "x", 3])));
        let paths: Vec<(&str, &str)> =
            report.failures.iter().map(|f| (f.path.as_str(), f.keyword.as_str())).collect();
        assert_eq!(paths, vec![("/1", "type"), ("/2", "multipleOf")]);
        assert!(v.is_valid(&Value::from(json!({"0": "x"}))), "vacuous for objects");
    }

    #[test]
    fn positional_items_leave_the_tail_open() {
        let v = Schema::from_document(json!({"items": [{"type": "string"}, {"type": "boolean"}]}))
            .unwrap()
            .default_validator();
        assert!(v.is_valid(&Value::from(json!(["a", true, 1, null]))));
        assert!(v.is_valid(&Value::from(json!(["a"]))));
        assert!(!v.is_valid(&Value::from(json!([true, "a"]))));
    }

    #[test]
    fn item_counts() {
        let v = Schema::from_document(json!({"minItems": 1, "maxItems": 2})).unwrap().default_validator();
        assert!(!v.is_valid(&Value::from(json!([]))));
        assert!(v.is_valid(&Value::from(json!([null]))));
        assert!(!v.is_valid(&Value::from(json!([1, 2, 3]))));
        assert_eq!(
            v.validate(&Value::from(json!([]))).first().unwrap().message,
            "expected at least 1 items, found 0"
        );
        assert!(v.is_valid(&Value::from("")));
    }

    #[test]
    fn nested_item_errors_point_into_the_schema() {
        let err = Schema::from_document(json!({"items": [{}, {"minItems": "x"}]})).unwrap_err();
        assert_eq!(
            err,
            SchemaError::invalid("#/items/1", "minItems", "must be a non-negative integer, found \"x\"")
        );
        assert!(Schema::from_document(json!({"items": 3})).is_err());
    }
}
