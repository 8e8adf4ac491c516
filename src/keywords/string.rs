//! String keywords. Lengths count Unicode scalar values, not bytes.
use regex::Regex;

use super::{Context, Limit};
use crate::error::Result;
use crate::report::{InstancePath, Report};
use crate::rule::{Keyword, Rule};
use crate::value::Value;

#[derive(Debug, Clone)]
pub struct LengthRule {
    limit: Limit,
    chars: u64,
}

impl Keyword for LengthRule {
    fn name(&self) -> &str {
        match self.limit {
            Limit::Min => "minLength",
            Limit::Max => "maxLength",
        }
    }

    fn is_valid(&self, instance: &Value) -> bool {
        match instance {
            Value::String(s) => self.limit.admits(s.chars().count() as u64, self.chars),
            _ => true,
        }
    }

    fn validate(&self, instance: &Value, path: &mut InstancePath, report: &mut Report) {
        if let Value::String(s) = instance {
            let len = s.chars().count() as u64;
            if !self.limit.admits(len, self.chars) {
                let expected = format!("{} {} characters", self.limit.describe(), self.chars);
                report.fail(self.name(), path, format!("expected {expected}, found {len}"));
            }
        }
    }
}

pub fn compile_min_length(value: &Value, cx: &Context<'_>) -> Result<Rule> {
    let chars = cx.count("minLength", value)?;
    Ok(Rule::Length(LengthRule { limit: Limit::Min, chars }))
}

pub fn compile_max_length(value: &Value, cx: &Context<'_>) -> Result<Rule> {
    let chars = cx.count("maxLength", value)?;
    Ok(Rule::Length(LengthRule { limit: Limit::Max, chars }))
}

/// Unanchored search, as draft-04 prescribes.
#[derive(Debug, Clone)]
pub struct PatternRule {
    regex: Regex,
}

impl PatternRule {
    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }
}

impl Keyword for PatternRule {
    fn name(&self) -> &str { "pattern" }

    fn is_valid(&self, instance: &Value) -> bool {
        match instance {
            Value::String(s) => self.regex.is_match(s),
            _ => true,
        }
    }

    fn validate(&self, instance: &Value, path: &mut InstancePath, report: &mut Report) {
        if !self.is_valid(instance) {
            report.fail("pattern", path, format!("{instance} does not match /{}/", self.regex.as_str()));
        }
    }
}

pub fn compile_pattern(value: &Value, cx: &Context<'_>) -> Result<Rule> {
    let source = value
        .as_str()
        .map_err(|_| cx.invalid("pattern", format!("must be a string, found {}", value.kind())))?;
    let regex = Regex::new(source).map_err(|e| cx.invalid("pattern", format!("is not a valid regex: {e}")))?;
    Ok(Rule::Pattern(PatternRule { regex }))
}
