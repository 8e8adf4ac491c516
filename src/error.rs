//! Error taxonomy.
//!
//! Only broken schema documents and misuse of `Value` accessors are errors.
//! An instance failing its constraints is a normal validation outcome and
//! never travels through this type.
use crate::value::Kind;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SchemaError {
    /// The schema document itself is malformed. Raised at wrap time.
    #[error("invalid schema at {path}: `{keyword}` {reason}")]
    InvalidSchema {
        /// JSON Pointer into the schema document, e.g. `#/properties/one`.
        path: String,
        keyword: String,
        reason: String,
    },
    /// A `Value` accessor was used against the wrong kind.
    #[error("type mismatch: expected {expected}, found {found}")]
    TypeMismatch { expected: Kind, found: Kind },
}

pub type Result<T> = std::result::Result<T, SchemaError>;

impl SchemaError {
    pub fn invalid(
        path: impl Into<String>,
        keyword: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidSchema {
            path: path.into(),
            keyword: keyword.into(),
            reason: reason.into(),
        }
    }

    pub fn mismatch(expected: Kind, found: Kind) -> Self {
        Self::TypeMismatch { expected, found }
    }

    pub fn is_invalid_schema(&self) -> bool {
        matches!(self, Self::InvalidSchema { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_offending_location() {
        let err = SchemaError::invalid("#/properties/one", "multipleOf", "must be greater than 0");
        assert_eq!(
            err.to_string(),
            "invalid schema at #/properties/one: `multipleOf` must be greater than 0"
        );
        assert!(err.is_invalid_schema());

        let err = SchemaError::mismatch(Kind::Number, Kind::String);
        assert_eq!(err.to_string(), "type mismatch: expected number, found string");
        assert!(!err.is_invalid_schema());
    }
}
