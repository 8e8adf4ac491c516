//! Keyword rules and the registry that maps keyword names to constructors.
//!
//! The composer in `schema` never names a keyword: it walks a schema node in
//! declaration order and asks the registry for a constructor per key. Unknown
//! keys have no constructor and are skipped, which keeps schemas
//! forward-compatible. Supporting another keyword means writing its rule and
//! registering one more constructor.
pub mod array;
pub mod number;
pub mod object;
pub mod string;
pub mod types;

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use once_cell::sync::Lazy;

use crate::error::{Result, SchemaError};
use crate::rule::Rule;
use crate::value::{Map, Value};

/// Builds the rule for one keyword from its value in the schema node.
pub type KeywordCtor = fn(&Value, &Context<'_>) -> Result<Rule>;

static DRAFT4: Lazy<Arc<KeywordRegistry>> = Lazy::new(|| Arc::new(KeywordRegistry::draft4()));

// ————————————————————————————————————————————————————————————————————————————
// REGISTRY
// ————————————————————————————————————————————————————————————————————————————

#[derive(Clone, Default)]
pub struct KeywordRegistry {
    ctors: IndexMap<String, KeywordCtor>,
}

impl KeywordRegistry {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Every keyword this crate implements.
    pub fn draft4() -> Self {
        let mut reg = Self::empty();
        reg.register("type", types::compile_type);
        reg.register("enum", types::compile_enum);
        reg.register("properties", object::compile_properties);
        reg.register("required", object::compile_required);
        reg.register("multipleOf", number::compile_multiple_of);
        reg.register("minimum", number::compile_minimum);
        reg.register("maximum", number::compile_maximum);
        reg.register("minLength", string::compile_min_length);
        reg.register("maxLength", string::compile_max_length);
        reg.register("pattern", string::compile_pattern);
        reg.register("items", array::compile_items);
        reg.register("minItems", array::compile_min_items);
        reg.register("maxItems", array::compile_max_items);
        reg
    }

    /// Process-wide draft-04 registry.
    pub fn shared() -> Arc<Self> {
        Arc::clone(&DRAFT4)
    }

    /// Adds or replaces a keyword, returning the constructor it displaced.
    pub fn register(&mut self, name: impl Into<String>, ctor: KeywordCtor) -> Option<KeywordCtor> {
        self.ctors.insert(name.into(), ctor)
    }

    pub fn get(&self, name: &str) -> Option<KeywordCtor> {
        self.ctors.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.ctors.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.ctors.keys().map(String::as_str)
    }
}

impl fmt::Debug for KeywordRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.names()).finish()
    }
}

// ————————————————————————————————————————————————————————————————————————————
// COMPILE CONTEXT
// ————————————————————————————————————————————————————————————————————————————

/// What a keyword constructor can see while its node is being compiled.
pub struct Context<'a> {
    /// The whole schema node, so modifiers like `exclusiveMinimum` can be read.
    pub node: &'a Map,
    /// JSON Pointer of the node inside the schema document, `#` at the root.
    pub path: &'a str,
    pub registry: &'a KeywordRegistry,
}

impl Context<'_> {
    pub fn invalid(&self, keyword: &str, reason: impl Into<String>) -> SchemaError {
        SchemaError::invalid(self.path, keyword, reason)
    }

    /// Compiles a nested schema located at `segments` below this node.
    pub fn compile_child(&self, segments: &[&str], document: &Value) -> Result<Rule> {
        let mut path = self.path.to_owned();
        for seg in segments {
            path.push('/');
            path.push_str(&seg.replace('~', "~0").replace('/', "~1"));
        }
        crate::schema::compile(document, &path, self.registry)
    }

    /// Reads a sibling keyword that must be a boolean when present.
    pub fn flag(&self, keyword: &str) -> Result<bool> {
        match self.node.get(keyword) {
            None => Ok(false),
            Some(Value::Bool(b)) => Ok(*b),
            Some(other) => Err(self.invalid(keyword, format!("must be a boolean, found {}", other.kind()))),
        }
    }

    /// Reads a keyword value that must be a non-negative integer.
    pub fn count(&self, keyword: &str, value: &Value) -> Result<u64> {
        let reason = || format!("must be a non-negative integer, found {value}");
        let n = value.as_number().map_err(|_| self.invalid(keyword, reason()))?;
        match n.as_i128() {
            Some(i) if i >= 0 => u64::try_from(i).map_err(|_| self.invalid(keyword, reason())),
            _ if n.is_integral() && n.as_f64() >= 0.0 => Ok(n.as_f64() as u64),
            _ => Err(self.invalid(keyword, reason())),
        }
    }
}

/// Lower or upper limit on a count (characters, items).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Limit {
    Min,
    Max,
}

impl Limit {
    pub fn admits(&self, actual: u64, limit: u64) -> bool {
        match self {
            Limit::Min => actual >= limit,
            Limit::Max => actual <= limit,
        }
    }

    fn describe(&self) -> &'static str {
        match self {
            Limit::Min => "at least",
            Limit::Max => "at most",
        }
    }
}
