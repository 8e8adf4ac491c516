//! `properties` and `required`. Both are vacuous for non-object instances.
use indexmap::{IndexMap, IndexSet};

use super::Context;
use crate::error::Result;
use crate::report::{InstancePath, Report};
use crate::rule::{Keyword, Rule};
use crate::value::Value;

#[derive(Debug, Clone)]
pub struct PropertiesRule {
    properties: IndexMap<String, Rule>,
}

impl PropertiesRule {
    pub fn children(&self) -> impl Iterator<Item = &Rule> {
        self.properties.values()
    }
}

impl Keyword for PropertiesRule {
    fn name(&self) -> &str { "properties" }

    fn is_valid(&self, instance: &Value) -> bool {
        let Value::Object(members) = instance else { return true };
        self.properties
            .iter()
            .all(|(name, rule)| members.get(name).is_none_or(|child| rule.is_valid(child)))
    }

    fn validate(&self, instance: &Value, path: &mut InstancePath, report: &mut Report) {
        let Value::Object(members) = instance else { return };
        for (name, rule) in &self.properties {
            if let Some(child) = members.get(name) {
                path.push(name.as_str());
                rule.validate(child, path, report);
                path.pop();
            }
        }
    }
}

pub fn compile_properties(value: &Value, cx: &Context<'_>) -> Result<Rule> {
    let declared = value
        .as_object()
        .map_err(|_| cx.invalid("properties", format!("must be an object, found {}", value.kind())))?;
    let mut properties = IndexMap::with_capacity(declared.len());
    for (name, child) in declared {
        let rule = cx.compile_child(&["properties", name], child)?;
        properties.insert(name.clone(), rule);
    }
    Ok(Rule::Properties(PropertiesRule { properties }))
}

#[derive(Debug, Clone)]
pub struct RequiredRule {
    names: IndexSet<String>,
}

impl RequiredRule {
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }
}

impl Keyword for RequiredRule {
    fn name(&self) -> &str { "required" }

    fn is_valid(&self, instance: &Value) -> bool {
        let Value::Object(members) = instance else { return true };
        self.names.iter().all(|n| members.contains_key(n))
    }

    fn validate(&self, instance: &Value, path: &mut InstancePath, report: &mut Report) {
        let Value::Object(members) = instance else { return };
        for name in self.names.iter().filter(|n| !members.contains_key(*n)) {
            report.fail("required", path, format!("missing required property `{name}`"));
        }
    }
}

pub fn compile_required(value: &Value, cx: &Context<'_>) -> Result<Rule> {
    let entries = value
        .as_array()
        .map_err(|_| cx.invalid("required", format!("must be an array, found {}", value.kind())))?;
    let mut names = IndexSet::with_capacity(entries.len());
    for entry in entries {
        let name = entry
            .as_str()
            .map_err(|_| cx.invalid("required", format!("entries must be strings, found {}", entry.kind())))?;
        if !names.insert(name.to_owned()) {
            return Err(cx.invalid("required", format!("lists \"{name}\" more than once")));
        }
    }
    Ok(Rule::Required(RequiredRule { names }))
}
