//! Numeric keywords: `multipleOf`, `minimum`, `maximum`.
//!
//! All of them pass any instance that is not a number.
use super::Context;
use crate::error::Result;
use crate::report::{InstancePath, Report};
use crate::rule::{Keyword, Rule};
use crate::value::{Number, Value};

#[derive(Debug, Clone)]
pub struct MultipleOfRule {
    divisor: Number,
}

impl MultipleOfRule {
    pub fn divisor(&self) -> &Number {
        &self.divisor
    }
}

impl Keyword for MultipleOfRule {
    fn name(&self) -> &str { "multipleOf" }

    fn is_valid(&self, instance: &Value) -> bool {
        match instance {
            Value::Number(n) => n.is_multiple_of(&self.divisor),
            _ => true,
        }
    }

    fn validate(&self, instance: &Value, path: &mut InstancePath, report: &mut Report) {
        if !self.is_valid(instance) {
            report.fail("multipleOf", path, format!("{instance} is not a multiple of {}", self.divisor));
        }
    }
}

pub fn compile_multiple_of(value: &Value, cx: &Context<'_>) -> Result<Rule> {
    let divisor = value
        .as_number()
        .map_err(|_| cx.invalid("multipleOf", format!("must be a number, found {}", value.kind())))?;
    if !divisor.is_positive() {
        return Err(cx.invalid("multipleOf", format!("must be greater than 0, found {divisor}")));
    }
    Ok(Rule::MultipleOf(MultipleOfRule { divisor: *divisor }))
}

/// Which side of the range a `BoundRule` guards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Minimum,
    Maximum,
}

#[derive(Debug, Clone)]
pub struct BoundRule {
    side: Side,
    limit: Number,
    exclusive: bool,
}

impl BoundRule {
    fn admits(&self, n: &Number) -> bool {
        match (self.side, self.exclusive) {
            (Side::Minimum, false) => *n >= self.limit,
            (Side::Minimum, true) => *n > self.limit,
            (Side::Maximum, false) => *n <= self.limit,
            (Side::Maximum, true) => *n < self.limit,
        }
    }
}

impl Keyword for BoundRule {
    fn name(&self) -> &str {
        match self.side {
            Side::Minimum => "minimum",
            Side::Maximum => "maximum",
        }
    }

    fn is_valid(&self, instance: &Value) -> bool {
        match instance {
            Value::Number(n) => self.admits(n),
            _ => true,
        }
    }

    fn validate(&self, instance: &Value, path: &mut InstancePath, report: &mut Report) {
        if self.is_valid(instance) {
            return;
        }
        let relation = match (self.side, self.exclusive) {
            (Side::Minimum, false) => "less than",
            (Side::Minimum, true) => "less than or equal to",
            (Side::Maximum, false) => "greater than",
            (Side::Maximum, true) => "greater than or equal to",
        };
        report.fail(self.name(), path, format!("{instance} is {relation} {}", self.limit));
    }
}

fn compile_bound(side: Side, keyword: &str, modifier: &str, value: &Value, cx: &Context<'_>) -> Result<Rule> {
    let limit = value
        .as_number()
        .map_err(|_| cx.invalid(keyword, format!("must be a number, found {}", value.kind())))?;
    let exclusive = cx.flag(modifier)?;
    Ok(Rule::Bound(BoundRule { side, limit: *limit, exclusive }))
}

pub fn compile_minimum(value: &Value, cx: &Context<'_>) -> Result<Rule> {
    compile_bound(Side::Minimum, "minimum", "exclusiveMinimum", value, cx)
}

pub fn compile_maximum(value: &Value, cx: &Context<'_>) -> Result<Rule> {
    compile_bound(Side::Maximum, "maximum", "exclusiveMaximum", value, cx)
}
