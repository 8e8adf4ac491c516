//! Rules and the validator handle.
//!
//! A `Rule` is either a leaf (one keyword check) or a composite (the AND of
//! every keyword found in a schema node). Composites nest: container keywords
//! such as `properties` and `items` hold the composite rule of each child
//! schema, so one `Rule` tree is the whole compiled schema.
//!
//! Rules hold no interior mutability, so a built tree can be shared across
//! threads and evaluated concurrently.
use std::fmt;
use std::sync::Arc;

use crate::keywords::array::{CountRule, ItemsRule};
use crate::keywords::number::{BoundRule, MultipleOfRule};
use crate::keywords::object::{PropertiesRule, RequiredRule};
use crate::keywords::string::{LengthRule, PatternRule};
use crate::keywords::types::{EnumRule, TypeRule};
use crate::report::{InstancePath, Report};
use crate::value::Value;

/// A single keyword check.
///
/// Built-in keywords implement this and are wrapped in their own `Rule`
/// variant; keywords added through the registry are carried as
/// `Rule::Extension`.
pub trait Keyword: fmt::Debug + Send + Sync {
    fn name(&self) -> &str;

    fn is_valid(&self, instance: &Value) -> bool;

    fn validate(&self, instance: &Value, path: &mut InstancePath, report: &mut Report) {
        if !self.is_valid(instance) {
            report.fail(self.name(), path, format!("does not satisfy `{}`", self.name()));
        }
    }
}

#[derive(Debug, Clone)]
pub enum Rule {
    /// Boolean schema: `true` accepts everything, `false` nothing.
    Const(bool),
    /// Conjunction of the keywords of one schema node, in declaration order.
    All(Vec<Rule>),
    Type(TypeRule),
    Enum(EnumRule),
    Properties(PropertiesRule),
    Required(RequiredRule),
    MultipleOf(MultipleOfRule),
    Bound(BoundRule),
    Length(LengthRule),
    Pattern(PatternRule),
    Items(ItemsRule),
    ItemCount(CountRule),
    Extension(Arc<dyn Keyword>),
}

impl Rule {
    pub fn accept_all() -> Self {
        Rule::All(Vec::new())
    }

    fn leaf(&self) -> Option<&dyn Keyword> {
        match self {
            Rule::Const(_) | Rule::All(_) => None,
            Rule::Type(r) => Some(r),
            Rule::Enum(r) => Some(r),
            Rule::Properties(r) => Some(r),
            Rule::Required(r) => Some(r),
            Rule::MultipleOf(r) => Some(r),
            Rule::Bound(r) => Some(r),
            Rule::Length(r) => Some(r),
            Rule::Pattern(r) => Some(r),
            Rule::Items(r) => Some(r),
            Rule::ItemCount(r) => Some(r),
            Rule::Extension(r) => Some(&**r),
        }
    }

    /// Keyword name for leaves; `None` for composites and boolean schemas.
    pub fn keyword(&self) -> Option<&str> {
        self.leaf().map(|k| k.name())
    }

    /// Number of leaf keyword checks in this tree, nested schemas included.
    pub fn len(&self) -> usize {
        match self {
            Rule::Const(_) => 0,
            Rule::All(rules) => rules.iter().map(Rule::len).sum(),
            Rule::Properties(r) => 1 + r.children().map(Rule::len).sum::<usize>(),
            Rule::Items(r) => 1 + r.children().map(Rule::len).sum::<usize>(),
            _ => 1,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_valid(&self, instance: &Value) -> bool {
        match self {
            Rule::Const(accept) => *accept,
            Rule::All(rules) => rules.iter().all(|r| r.is_valid(instance)),
            leaf => leaf.leaf().is_none_or(|k| k.is_valid(instance)),
        }
    }

    /// Like `is_valid` but records every failing keyword instead of stopping
    /// at the first one.
    pub fn validate(&self, instance: &Value, path: &mut InstancePath, report: &mut Report) {
        match self {
            Rule::Const(true) => {}
            Rule::Const(false) => report.fail("false", path, "no value satisfies the `false` schema"),
            Rule::All(rules) => {
                for rule in rules {
                    rule.validate(instance, path, report);
                }
            }
            leaf => {
                if let Some(k) = leaf.leaf() {
                    k.validate(instance, path, report);
                }
            }
        }
    }
}

/// The compiled form of a schema, cheap to clone and share.
///
/// A `Validator` is a snapshot: re-wrapping the `Schema` it came from builds a
/// new tree and leaves handles obtained earlier untouched.
#[derive(Debug, Clone)]
pub struct Validator {
    rule: Arc<Rule>,
}

impl Validator {
    pub fn new(rule: Rule) -> Self {
        Self { rule: Arc::new(rule) }
    }

    pub fn accept_all() -> Self {
        Self::new(Rule::accept_all())
    }

    pub fn rule(&self) -> &Rule {
        &self.rule
    }

    pub fn is_valid(&self, instance: &Value) -> bool {
        self.rule.is_valid(instance)
    }

    pub fn validate(&self, instance: &Value) -> Report {
        let mut report = Report::new();
        let mut path = InstancePath::root();
        self.rule.validate(instance, &mut path, &mut report);
        report
    }
}

impl Default for Validator {
    fn default() -> Self { Self::accept_all() }
}
