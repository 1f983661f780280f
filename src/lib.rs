//! An embeddable JsonLogic evaluator.
//!
//! A rule is any JSON value. A single-key object whose key names a
//! registered operator is a rule node and gets evaluated against a data
//! context; everything else is a literal. See [`apply_value`] for the
//! entry point most callers want, and [`add_operator`] to extend the
//! registry with custom operators at runtime.

use std::any::Any;
use std::io::{Read as IoRead, Write};
use std::panic::{self, AssertUnwindSafe};

use serde_json::{Map, Value};

mod data;
mod error;
pub mod js_op;
mod op;
mod registry;
mod value;

pub use error::Error;
pub use js_op::{
    abstract_eq, abstract_gt, abstract_gte, abstract_lt, abstract_lte, abstract_ne, strict_eq,
    strict_ne,
};
pub use registry::add_operator;
pub use value::Evaluated;

use value::Parsed;

/// The JSON `null` literal, used throughout as the default "not found"
/// value for variable/missing resolution.
pub const NULL: Value = Value::Null;

/// Recursively parse a raw JSON value into something evaluable.
///
/// Every node type that participates in evaluation (operators, `var`,
/// `missing`, raw literals) implements this once, rather than branching
/// on `serde_json::Value` shape at every call site.
pub(crate) trait Parser<'a>: Sized {
    /// Attempt to recognize `value` as this node type. Returns `Ok(None)`
    /// when `value` is not a match (not an error: the caller tries the
    /// next node type), and `Err` when it is a match but malformed (e.g.
    /// wrong argument count).
    fn from_value(value: &'a Value) -> Result<Option<Self>, Error>;

    /// Evaluate this node against `data`.
    fn evaluate(&self, data: &Value) -> Result<Evaluated<'_>, Error>;
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_string()
    }
}

/// Evaluate `rule` against `data`.
///
/// This is the core of the public API: parse `rule`, recursively
/// evaluate it, and return the resulting value. Panics raised while
/// evaluating (most likely from a user-registered operator; see
/// [`add_operator`]) are caught at this boundary and reported as
/// [`Error::EvaluationPanic`] rather than unwinding into the caller.
pub fn apply_value(rule: &Value, data: &Value) -> Result<Value, Error> {
    panic::catch_unwind(AssertUnwindSafe(|| {
        let parsed = Parsed::from_value(rule)?;
        parsed.evaluate(data).map(Value::from)
    }))
    .unwrap_or_else(|payload| Err(Error::EvaluationPanic(panic_message(payload))))
}

/// Like [`apply_value`], but reads and writes serialized JSON.
pub fn apply_raw(rule_bytes: &[u8], data_bytes: &[u8]) -> Result<Vec<u8>, Error> {
    let rule: Value =
        serde_json::from_slice(rule_bytes).map_err(|e| Error::MalformedInput(e.to_string()))?;
    let data: Value =
        serde_json::from_slice(data_bytes).map_err(|e| Error::MalformedInput(e.to_string()))?;
    let result = apply_value(&rule, &data)?;
    serde_json::to_vec(&result).map_err(|e| Error::MalformedInput(e.to_string()))
}

/// Like [`apply_value`], but reads rule and data as JSON from the given
/// readers and writes the serialized result to `writer`.
pub fn apply<R1: IoRead, R2: IoRead, W: Write>(
    rule_reader: R1,
    data_reader: R2,
    writer: W,
) -> Result<(), Error> {
    let rule: Value =
        serde_json::from_reader(rule_reader).map_err(|e| Error::MalformedInput(e.to_string()))?;
    let data: Value =
        serde_json::from_reader(data_reader).map_err(|e| Error::MalformedInput(e.to_string()))?;
    let result = apply_value(&rule, &data)?;
    serde_json::to_writer(writer, &result).map_err(|e| Error::MalformedInput(e.to_string()))
}

/// Check whether `rule_reader` contains JSON that parses as a
/// structurally valid rule (correct arity, known operators, well-formed
/// `var`/`missing` nodes), without evaluating it against any data.
pub fn is_valid<R: IoRead>(rule_reader: R) -> bool {
    let rule: Value = match serde_json::from_reader(rule_reader) {
        Ok(v) => v,
        Err(_) => return false,
    };
    panic::catch_unwind(AssertUnwindSafe(|| Parsed::from_value(&rule).is_ok())).unwrap_or(false)
}

/// Replace every resolvable `var` node in `rule` with its literal value
/// from `data`, leaving unresolved or path-relative references (`""`,
/// paths starting with `.`) untouched.
///
/// Unlike [`apply_value`], this does not evaluate operators - it's a
/// pure substitution pass over the rule tree, useful for partially
/// specializing a rule ahead of time.
pub fn solve_vars(rule: &Value, data: &Value) -> Value {
    match rule {
        Value::Object(obj) => {
            let mut result = Map::with_capacity(obj.len());
            for (key, val) in obj {
                if key == "var" {
                    let keep_unsolved =
                        matches!(val, Value::String(s) if s.is_empty() || s.starts_with('.'));
                    if keep_unsolved {
                        result.insert("var".into(), val.clone());
                        continue;
                    }
                    match get_var(val, data) {
                        Some(resolved) => return resolved,
                        None => {
                            result.insert("var".into(), val.clone());
                        }
                    }
                } else {
                    result.insert(key.clone(), solve_vars(val, data));
                }
            }
            Value::Object(result)
        }
        Value::Array(items) => Value::Array(items.iter().map(|v| solve_vars(v, data)).collect()),
        other => other.clone(),
    }
}

/// Resolve a `var` argument (path, `[path, default]`, number, or null)
/// against `data`. Returns `None` only when nothing, not even a
/// default, applies.
fn get_var(value: &Value, data: &Value) -> Option<Value> {
    if matches!(value, Value::Null) {
        return Some(data.clone());
    }
    if matches!(value, Value::String(s) if s.is_empty()) {
        return Some(data.clone());
    }

    let (path, default) = match value {
        Value::Number(n) => (n.to_string(), None),
        Value::String(s) => (s.clone(), None),
        Value::Array(arr) => {
            if arr.is_empty() {
                return Some(data.clone());
            }
            let default = if arr.len() == 2 {
                Some(arr[1].clone())
            } else {
                None
            };
            let path = match &arr[0] {
                Value::String(s) => s.clone(),
                Value::Number(n) => n.to_string(),
                _ => return default,
            };
            (path, default)
        }
        _ => return None,
    };

    if matches!(data, Value::Null) {
        return default;
    }

    let mut current = data.clone();
    let mut last_value: Option<Value> = None;
    for part in path.split('.') {
        if part.is_empty() {
            continue;
        }
        let next = match &current {
            Value::Object(map) => map.get(part).cloned(),
            Value::Array(arr) => part.parse::<usize>().ok().and_then(|i| arr.get(i).cloned()),
            _ => None,
        };
        match next {
            None => return default,
            Some(v) => {
                last_value = Some(v.clone());
                // A non-object/array intermediate value leaves `current`
                // unchanged for the remainder of the path walk.
                if matches!(v, Value::Object(_) | Value::Array(_)) {
                    current = v;
                }
            }
        }
    }

    last_value.or(default)
}

#[cfg(test)]
mod test_apply {
    use super::*;
    use serde_json::json;

    fn apply_cases() -> Vec<(Value, Value, Value)> {
        vec![
            (json!("foo"), json!({}), json!("foo")),
            (json!([1, 2]), json!({}), json!([1, 2])),
            (json!(null), json!({}), json!(null)),
            (json!({"a": 1, "b": 2}), json!({}), json!({"a": 1, "b": 2})),
            (json!({"==": [1, 1]}), json!({}), json!(true)),
            (json!({"==": [1, "1"]}), json!({}), json!(true)),
            (
                json!({"if": [{"==": [1, 1]}, "yes", "no"]}),
                json!({}),
                json!("yes"),
            ),
            (json!({"var": "a"}), json!({"a": 42}), json!(42)),
            (
                json!({"map": [{"var": "items"}, {"+": [{"var": ""}, 1]}]}),
                json!({"items": [1, 2, 3]}),
                json!([2, 3, 4]),
            ),
        ]
    }

    #[test]
    fn test_apply_value() {
        for (rule, data, expected) in apply_cases() {
            assert_eq!(apply_value(&rule, &data).unwrap(), expected);
        }
    }

    #[test]
    fn test_apply_raw_roundtrips_through_json() {
        let rule = serde_json::to_vec(&json!({"+": [1, 2]})).unwrap();
        let data = serde_json::to_vec(&json!(null)).unwrap();
        let result = apply_raw(&rule, &data).unwrap();
        assert_eq!(result, b"3");
    }

    #[test]
    fn test_apply_writes_to_writer() {
        let rule = json!({"+": [1, 2]}).to_string();
        let data = json!(null).to_string();
        let mut out = Vec::new();
        apply(rule.as_bytes(), data.as_bytes(), &mut out).unwrap();
        assert_eq!(out, b"3");
    }

    #[test]
    fn test_is_valid() {
        assert!(is_valid(json!({"==": [1, 1]}).to_string().as_bytes()));
        assert!(is_valid(json!({"var": "a"}).to_string().as_bytes()));
        assert!(!is_valid(b"not json".as_ref()));
        assert!(!is_valid(json!({"==": [1]}).to_string().as_bytes()));
    }

    #[test]
    fn test_user_operator_panic_becomes_evaluation_panic() {
        add_operator("test_panicking_op", |_arg, _data| panic!("boom"));
        let result = apply_value(&json!({"test_panicking_op": []}), &json!(null));
        assert!(matches!(result, Err(Error::EvaluationPanic(_))));
    }

    #[test]
    fn test_solve_vars_substitutes_resolvable_paths() {
        let rule = json!({"==": [{"var": "a"}, {"var": "b"}]});
        let data = json!({"a": 1, "b": 2});
        assert_eq!(solve_vars(&rule, &data), json!({"==": [1, 2]}));
    }

    #[test]
    fn test_solve_vars_leaves_unresolvable_and_relative_paths_untouched() {
        let rule = json!({"==": [{"var": "missing"}, {"var": ""}]});
        let data = json!({"a": 1});
        assert_eq!(
            solve_vars(&rule, &data),
            json!({"==": [{"var": "missing"}, {"var": ""}]})
        );
    }
}
