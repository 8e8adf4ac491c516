//! `type` and `enum`: the keywords that apply to every instance kind.
use std::fmt;

use super::Context;
use crate::error::Result;
use crate::report::{InstancePath, Report};
use crate::rule::{Keyword, Rule};
use crate::value::{Kind, Value};

/// The names accepted by `type`. One per `Kind`, plus draft-04 `integer`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeTag {
    Null,
    Boolean,
    Integer,
    Number,
    String,
    Array,
    Object,
}

impl TypeTag {
    pub fn parse(name: &str) -> Option<Self> {
        Some(match name {
            "null" => TypeTag::Null,
            "boolean" => TypeTag::Boolean,
            "integer" => TypeTag::Integer,
            "number" => TypeTag::Number,
            "string" => TypeTag::String,
            "array" => TypeTag::Array,
            "object" => TypeTag::Object,
            _ => return None,
        })
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TypeTag::Null => "null",
            TypeTag::Boolean => "boolean",
            TypeTag::Integer => "integer",
            TypeTag::Number => "number",
            TypeTag::String => "string",
            TypeTag::Array => "array",
            TypeTag::Object => "object",
        }
    }

    pub fn matches(&self, instance: &Value) -> bool {
        match (self, instance) {
            (TypeTag::Integer, Value::Number(n)) => n.is_integral(),
            (TypeTag::Integer, _) => false,
            (tag, v) => Kind::from(*tag) == v.kind(),
        }
    }
}

impl From<TypeTag> for Kind {
    fn from(tag: TypeTag) -> Self {
        match tag {
            TypeTag::Null => Kind::Null,
            TypeTag::Boolean => Kind::Boolean,
            TypeTag::Integer | TypeTag::Number => Kind::Number,
            TypeTag::String => Kind::String,
            TypeTag::Array => Kind::Array,
            TypeTag::Object => Kind::Object,
        }
    }
}

impl From<Kind> for TypeTag {
    fn from(kind: Kind) -> Self {
        match kind {
            Kind::Null => TypeTag::Null,
            Kind::Boolean => TypeTag::Boolean,
            Kind::Number => TypeTag::Number,
            Kind::String => TypeTag::String,
            Kind::Array => TypeTag::Array,
            Kind::Object => TypeTag::Object,
        }
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ————————————————————————————————————————————————————————————————————————————
// TYPE
// ————————————————————————————————————————————————————————————————————————————

#[derive(Debug, Clone)]
pub struct TypeRule {
    tags: Vec<TypeTag>,
}

impl TypeRule {
    pub fn new(tags: Vec<TypeTag>) -> Self {
        Self { tags }
    }

    pub fn tags(&self) -> &[TypeTag] {
        &self.tags
    }

    fn expected(&self) -> String {
        match self.tags.as_slice() {
            [one] => one.to_string(),
            tags => {
                let names: Vec<&str> = tags.iter().map(TypeTag::as_str).collect();
                format!("one of [{}]", names.join(", "))
            }
        }
    }
}

impl Keyword for TypeRule {
    fn name(&self) -> &str { "type" }

    fn is_valid(&self, instance: &Value) -> bool {
        self.tags.iter().any(|t| t.matches(instance))
    }

    fn validate(&self, instance: &Value, path: &mut InstancePath, report: &mut Report) {
        if !self.is_valid(instance) {
            report.fail("type", path, format!("expected {}, found {}", self.expected(), instance.kind()));
        }
    }
}

pub fn compile_type(value: &Value, cx: &Context<'_>) -> Result<Rule> {
    let parse = |v: &Value| -> Result<TypeTag> {
        let name = v
            .as_str()
            .map_err(|_| cx.invalid("type", format!("entries must be strings, found {}", v.kind())))?;
        TypeTag::parse(name).ok_or_else(|| cx.invalid("type", format!("unknown type name \"{name}\"")))
    };
    let tags = match value {
        Value::String(_) => vec![parse(value)?],
        Value::Array(xs) if !xs.is_empty() => {
            let mut tags = Vec::with_capacity(xs.len());
            for x in xs {
                let tag = parse(x)?;
                if tags.contains(&tag) {
                    return Err(cx.invalid("type", format!("lists \"{tag}\" more than once")));
                }
                tags.push(tag);
            }
            tags
        }
        Value::Array(_) => return Err(cx.invalid("type", "must not be an empty array")),
        other => {
            return Err(cx.invalid("type", format!("must be a string or an array, found {}", other.kind())));
        }
    };
    Ok(Rule::Type(TypeRule::new(tags)))
}

// ————————————————————————————————————————————————————————————————————————————
// ENUM
// ————————————————————————————————————————————————————————————————————————————

#[derive(Debug, Clone)]
pub struct EnumRule {
    members: Vec<Value>,
}

impl Keyword for EnumRule {
    fn name(&self) -> &str { "enum" }

    fn is_valid(&self, instance: &Value) -> bool {
        self.members.iter().any(|m| m == instance)
    }

    fn validate(&self, instance: &Value, path: &mut InstancePath, report: &mut Report) {
        if !self.is_valid(instance) {
            report.fail("enum", path, format!("{instance} is not one of the enumerated values"));
        }
    }
}

pub fn compile_enum(value: &Value, cx: &Context<'_>) -> Result<Rule> {
    let members = value
        .as_array()
        .map_err(|_| cx.invalid("enum", format!("must be an array, found {}", value.kind())))?;
    if members.is_empty() {
        return Err(cx.invalid("enum", "must not be an empty array"));
    }
    Ok(Rule::Enum(EnumRule { members: members.to_vec() }))
}
