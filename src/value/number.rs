use std::cmp::Ordering;
use std::fmt;

use ordered_float::OrderedFloat;
use serde::Serialize;

/// Largest distance from the nearest integer a `multipleOf` quotient may have.
const MULTIPLE_OF_EPSILON: f64 = 1e-9;

/// 2^127; integral floats below this magnitude convert to `i128` exactly.
const I128_BOUND: f64 = 170141183460469231731687303715884105728.0;

/// A JSON number that remembers whether it was written as an integer.
///
/// Integers are kept exact (`PosInt` for `>= 0`, `NegInt` for `< 0`) so that
/// divisibility and equality on them never go through floating point.
#[derive(Clone, Copy, Debug, Serialize)]
#[serde(untagged)]
pub enum Number {
    PosInt(u64),
    NegInt(i64),
    Float(OrderedFloat<f64>),
}

impl Number {
    pub fn as_f64(&self) -> f64 {
        match *self {
            Number::PosInt(u) => u as f64,
            Number::NegInt(i) => i as f64,
            Number::Float(f) => f.0,
        }
    }

    /// Exact integer view; `None` for numbers written with a fraction or exponent.
    pub fn as_i128(&self) -> Option<i128> {
        match *self {
            Number::PosInt(u) => Some(u as i128),
            Number::NegInt(i) => Some(i as i128),
            Number::Float(_) => None,
        }
    }

    /// True when the value has no fractional part (`10` and `10.0` both qualify).
    pub fn is_integral(&self) -> bool {
        match *self {
            Number::PosInt(_) | Number::NegInt(_) => true,
            Number::Float(f) => f.0.is_finite() && f.0.fract() == 0.0,
        }
    }

    pub fn is_positive(&self) -> bool {
        match *self {
            Number::PosInt(u) => u > 0,
            Number::NegInt(_) => false,
            Number::Float(f) => f.0 > 0.0,
        }
    }

    /// Integer view that also covers floats with no fractional part.
    fn integral_i128(&self) -> Option<i128> {
        match *self {
            Number::Float(f) if f.0.fract() == 0.0 && f.0.abs() < I128_BOUND => Some(f.0 as i128),
            _ => self.as_i128(),
        }
    }

    /// Exact modulo when both sides are integral, otherwise checks that the
    /// quotient lies within a fixed epsilon of its nearest integer.
    pub fn is_multiple_of(&self, divisor: &Number) -> bool {
        if let (Some(x), Some(d)) = (self.integral_i128(), divisor.integral_i128()) {
            return d != 0 && x % d == 0;
        }
        let d = divisor.as_f64();
        if d == 0.0 {
            return false;
        }
        let q = self.as_f64() / d;
        if !q.is_finite() {
            return false;
        }
        (q - q.round()).abs() <= MULTIPLE_OF_EPSILON
    }
}

/// Orders an exact integer against a float without rounding the integer.
/// NaN sorts above everything, matching `OrderedFloat`.
fn cmp_int_float(a: i128, f: f64) -> Ordering {
    if f.is_nan() || f >= I128_BOUND {
        return Ordering::Less;
    }
    if f < -I128_BOUND {
        return Ordering::Greater;
    }
    let floor = f.floor();
    match a.cmp(&(floor as i128)) {
        Ordering::Equal if f > floor => Ordering::Less,
        ord => ord,
    }
}

impl PartialEq for Number {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Number {}

impl PartialOrd for Number {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Number {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.as_i128(), other.as_i128()) {
            (Some(a), Some(b)) => a.cmp(&b),
            (Some(a), None) => cmp_int_float(a, other.as_f64()),
            (None, Some(b)) => cmp_int_float(b, self.as_f64()).reverse(),
            (None, None) => OrderedFloat(self.as_f64()).cmp(&OrderedFloat(other.as_f64())),
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Number::PosInt(u) => write!(f, "{u}"),
            Number::NegInt(i) => write!(f, "{i}"),
            Number::Float(x) => write!(f, "{}", x.0),
        }
    }
}

impl From<u64> for Number {
    fn from(u: u64) -> Self { Number::PosInt(u) }
}

impl From<i64> for Number {
    fn from(i: i64) -> Self {
        if i >= 0 { Number::PosInt(i as u64) } else { Number::NegInt(i) }
    }
}

impl From<i32> for Number {
    fn from(i: i32) -> Self { Number::from(i as i64) }
}

impl From<f64> for Number {
    fn from(f: f64) -> Self { Number::Float(OrderedFloat(f)) }
}

impl From<&serde_json::Number> for Number {
    fn from(n: &serde_json::Number) -> Self {
        if let Some(u) = n.as_u64() {
            Number::PosInt(u)
        } else if let Some(i) = n.as_i64() {
            Number::NegInt(i)
        } else {
            Number::Float(OrderedFloat(n.as_f64().unwrap_or(f64::NAN)))
        }
    }
}
