//! Draft-04 JSON Schema validation over an in-memory value tree.
//!
//! ```
//! use json_rules::{Schema, Value};
//! use serde_json::json;
//!
//! let mut schema = Schema::new();
//! schema.wrap(json!({"type": "object", "required": ["id"]})).unwrap();
//! let validator = schema.default_validator();
//! assert!(validator.is_valid(&Value::from(json!({"id": null}))));
//! assert!(!validator.is_valid(&Value::from(json!({"name": "x"}))));
//! ```
pub mod error;
pub mod keywords;
pub mod report;
pub mod rule;
pub mod schema;
pub mod value;

pub use error::{Result, SchemaError};
pub use keywords::{Context, KeywordCtor, KeywordRegistry};
pub use report::{Failure, InstancePath, Report};
pub use rule::{Keyword, Rule, Validator};
pub use schema::{Schema, SchemaNode};
pub use value::{Kind, Number, Value};
