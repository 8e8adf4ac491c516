use json_rules::{Kind, Schema, SchemaError, Value};
use proptest::prelude::*;
use serde_json::json;

struct Fixture {
    schema: Schema,
    object: Value,
}

impl Fixture {
    fn new() -> Self {
        Self {
            schema: Schema::new(),
            object: Value::from(json!({
                "obj": {},
                "arr": [],
                "num": 5,
                "str": "123456",
                "bool": true,
                "null": null
            })),
        }
    }

    fn member(&self, name: &str) -> &Value {
        self.object.get(name).unwrap()
    }

    fn verdicts(&self) -> [bool; 5] {
        let v = self.schema.default_validator();
        ["obj", "arr", "num", "str", "bool"].map(|name| v.is_valid(self.member(name)))
    }
}

#[test]
fn validates_all() {
    let f = Fixture::new();
    for name in ["obj", "arr", "num", "str", "bool", "null"] {
        assert!(f.schema.default_validator().is_valid(f.member(name)), "{name}");
    }
}

#[test]
fn type_gate() {
    let mut f = Fixture::new();
    let cases = [
        ("object", [true, false, false, false, false]),
        ("array", [false, true, false, false, false]),
        ("number", [false, false, true, false, false]),
        ("string", [false, false, false, true, false]),
        ("boolean", [false, false, false, false, true]),
    ];
    for (name, expected) in cases {
        f.schema.wrap(json!({ "type": name })).unwrap();
        assert_eq!(f.verdicts(), expected, "type {name}");
    }
}

#[test]
fn properties() {
    let mut f = Fixture::new();
    f.schema
        .wrap(json!({
            "type": "object",
            "properties": {
                "one": {"type": "string"},
                "two": {"type": "object"}
            }
        }))
        .unwrap();
    let validator = f.schema.default_validator();
    assert!(!validator.is_valid(&Value::from(json!({"one": "string is good", "two": []}))));
    assert!(!validator.is_valid(&Value::from(json!({"two": "string is bad", "one": {}}))));
    assert!(validator.is_valid(&Value::from(json!({"one": "string is good"}))));
    assert!(validator.is_valid(&Value::from(json!({"two": {}}))));
    assert!(validator.is_valid(&Value::from(json!({"one": "string is good", "two": {}}))));
}

#[test]
fn required() {
    let mut f = Fixture::new();
    f.schema.wrap(json!({"required": ["other"]})).unwrap();
    assert!(!f.schema.default_validator().is_valid(&f.object));
    f.schema.wrap(json!({"required": ["obj"]})).unwrap();
    assert!(f.schema.default_validator().is_valid(&f.object));
    f.schema.wrap(json!({"required": ["obj", "another"]})).unwrap();
    assert!(!f.schema.default_validator().is_valid(&f.object));
    f.schema.wrap(json!({"required": ["obj", "arr"]})).unwrap();
    assert!(f.schema.default_validator().is_valid(&f.object));
}

#[test]
fn multiple_of() {
    let mut f = Fixture::new();
    f.schema
        .wrap(json!({
            "type": "object",
            "properties": {"one": {"type": "number", "multipleOf": 5}}
        }))
        .unwrap();
    let validator = f.schema.default_validator();
    assert!(!validator.is_valid(&Value::from(json!({"one": 1}))));
    assert!(validator.is_valid(&Value::from(json!({"one": 10}))));

    f.schema
        .wrap(json!({
            "type": "object",
            "properties": {"one": {"type": "number", "multipleOf": 3.4}}
        }))
        .unwrap();
    let validator = f.schema.default_validator();
    assert!(!validator.is_valid(&Value::from(json!({"one": 1}))));
    assert!(validator.is_valid(&Value::from(json!({"one": 6.8}))));
}

#[test]
fn end_to_end_report() {
    let f = Fixture::new();
    let schema = Schema::from_document(json!({"required": ["obj", "another"]})).unwrap();
    let report = schema.default_validator().validate(&f.object);
    assert!(!report.is_valid());
    assert_eq!(report.failures.len(), 1);
    let failure = &report.failures[0];
    assert_eq!(failure.keyword, "required");
    assert_eq!(failure.path, "");
    assert!(failure.message.contains("another"));

    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["valid"], json!(false));
    assert_eq!(json["failures"][0]["keyword"], json!("required"));
}

#[test]
fn invalid_schemas_fail_at_wrap() {
    let mut schema = Schema::new();
    let err = schema.wrap(json!({"properties": {"one": {"multipleOf": 0}}})).unwrap_err();
    assert_eq!(
        err,
        SchemaError::invalid("#/properties/one", "multipleOf", "must be greater than 0, found 0")
    );
    let err = schema.wrap(json!({"required": "obj"})).unwrap_err();
    assert!(err.is_invalid_schema());
    assert!(schema.root().is_none());
}

#[test]
fn accessors_report_type_mismatch() {
    let f = Fixture::new();
    assert_eq!(
        f.member("str").as_number().unwrap_err(),
        SchemaError::TypeMismatch { expected: Kind::Number, found: Kind::String }
    );
}

#[test]
fn validators_are_shareable_across_threads() {
    let schema = Schema::from_document(json!({"items": {"type": "integer", "minimum": 0}})).unwrap();
    let validator = schema.default_validator();
    let handles: Vec<_> = (0..4)
        .map(|t| {
            let validator = validator.clone();
            std::thread::spawn(move || {
                let good = Value::from(json!([t, t + 1, t + 2]));
                let bad = Value::from(json!([t, -1]));
                validator.is_valid(&good) && !validator.is_valid(&bad)
            })
        })
        .collect();
    for handle in handles {
        assert!(handle.join().unwrap());
    }
}

// ————————————————————————————————————————————————————————————————————————————
// PROPERTIES
// ————————————————————————————————————————————————————————————————————————————

fn arb_json() -> impl Strategy<Value = serde_json::Value> {
    let leaf = prop_oneof![
        Just(serde_json::Value::Null),
        any::<bool>().prop_map(serde_json::Value::from),
        any::<i64>().prop_map(serde_json::Value::from),
        (-1.0e6..1.0e6f64).prop_map(serde_json::Value::from),
        "[a-z]{0,8}".prop_map(serde_json::Value::from),
    ];
    leaf.prop_recursive(3, 32, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(serde_json::Value::from),
            prop::collection::btree_map("[a-e]", inner, 0..4)
                .prop_map(|m| serde_json::Value::Object(m.into_iter().collect())),
        ]
    })
}

proptest! {
    #[test]
    fn empty_schema_accepts_any_value(doc in arb_json()) {
        let v = Value::from(doc);
        prop_assert!(Schema::new().default_validator().is_valid(&v));
        let empty = Schema::from_document(json!({})).unwrap();
        prop_assert!(empty.default_validator().is_valid(&v));
    }

    #[test]
    fn type_matches_exactly_the_instance_kind(doc in arb_json()) {
        let v = Value::from(doc);
        for kind in Kind::ALL {
            let schema = Schema::from_document(json!({ "type": kind.as_str() })).unwrap();
            prop_assert_eq!(schema.default_validator().is_valid(&v), kind == v.kind());
        }
    }

    #[test]
    fn adding_required_names_never_helps(
        doc in prop::collection::btree_map("[a-f]", Just(serde_json::Value::Null), 0..6),
        base in prop::collection::btree_set("[a-f]", 0..4),
        extra in prop::collection::btree_set("[a-f]", 0..4),
    ) {
        let instance = Value::from(serde_json::Value::Object(doc.into_iter().collect()));
        let superset: Vec<String> = base.union(&extra).cloned().collect();
        let base: Vec<String> = base.into_iter().collect();
        let small = Schema::from_document(json!({ "required": base })).unwrap();
        let large = Schema::from_document(json!({ "required": superset })).unwrap();
        if large.default_validator().is_valid(&instance) {
            prop_assert!(small.default_validator().is_valid(&instance));
        }
    }

    #[test]
    fn integer_multiple_of_agrees_with_modulo(x in -100_000i64..100_000, d in 1i64..1_000) {
        let v = Schema::from_document(json!({ "multipleOf": d })).unwrap().default_validator();
        prop_assert_eq!(v.is_valid(&Value::from(x)), x % d == 0);
    }

    #[test]
    fn rewrap_is_idempotent(doc in arb_json()) {
        let schema_doc = json!({"type": "object", "required": ["a"], "properties": {"b": {"type": "string"}}});
        let instance = Value::from(doc);
        let mut schema = Schema::new();
        schema.wrap(schema_doc.clone()).unwrap();
        let first = schema.default_validator().is_valid(&instance);
        schema.wrap(schema_doc).unwrap();
        prop_assert_eq!(first, schema.default_validator().is_valid(&instance));
    }
}
