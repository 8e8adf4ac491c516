//! Rich validation outcome.
//!
//! `Validator::is_valid` is the minimal boolean contract; `Validator::validate`
//! walks the whole instance and collects every failing keyword in schema
//! declaration order.
use std::fmt;

use serde::Serialize;

/// JSON Pointer to a location inside the instance being validated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InstancePath {
    segments: Vec<String>,
}

impl InstancePath {
    pub fn root() -> Self { Self::default() }

    pub fn push(&mut self, segment: impl Into<String>) {
        self.segments.push(segment.into());
    }

    pub fn pop(&mut self) {
        self.segments.pop();
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }
}

impl fmt::Display for InstancePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for seg in &self.segments {
            // RFC 6901 escaping
            write!(f, "/{}", seg.replace('~', "~0").replace('/', "~1"))?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Failure {
    pub keyword: String,
    /// Instance location; empty string is the document root.
    pub path: String,
    pub message: String,
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let path = if self.path.is_empty() { "/" } else { &self.path };
        write!(f, "{path}: {} ({})", self.message, self.keyword)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    pub valid: bool,
    pub failures: Vec<Failure>,
}

impl Default for Report {
    fn default() -> Self { Self::new() }
}

impl Report {
    pub fn new() -> Self {
        Self { valid: true, failures: Vec::new() }
    }

    pub fn fail(&mut self, keyword: &str, path: &InstancePath, message: impl Into<String>) {
        let message = message.into();
        tracing::trace!(keyword, path = %path, %message, "keyword failed");
        self.valid = false;
        self.failures.push(Failure {
            keyword: keyword.to_owned(),
            path: path.to_string(),
            message,
        });
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }

    pub fn first(&self) -> Option<&Failure> {
        self.failures.first()
    }
}
