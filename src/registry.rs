//! Operator registry
//!
//! Unlike the compile-time operator tables this crate grew out of, the
//! registry here is a process-wide, runtime-mutable map: `add_operator`
//! lets a caller install or replace a handler after the process has
//! started, so the table lives behind a reader-writer lock rather than in
//! a `phf::Map`. Evaluation takes the read side of the lock; `add_operator`
//! takes the write side. No evaluation ever observes a partially-written
//! map.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, RwLock};

use once_cell::sync::Lazy;
use serde_json::Value;

use crate::error::Error;
use crate::op;

/// Arity contract for a built-in operator.
#[derive(Debug, Clone)]
pub enum NumParams {
    None,
    Any,
    Unary,
    Exactly(usize),
    AtLeast(usize),
    Variadic(std::ops::Range<usize>), // [inclusive, exclusive)
}
impl NumParams {
    pub(crate) fn is_valid_len(&self, len: &usize) -> bool {
        match self {
            Self::None => len == &0,
            Self::Any => true,
            Self::Unary => len == &1,
            Self::AtLeast(num) => len >= num,
            Self::Exactly(num) => len == num,
            Self::Variadic(range) => range.contains(len),
        }
    }
    pub(crate) fn check_len<'a>(&self, len: &'a usize) -> Result<&'a usize, Error> {
        match self.is_valid_len(len) {
            true => Ok(len),
            false => Err(Error::WrongArgumentCount {
                expected: self.clone(),
                actual: *len,
            }),
        }
    }
    pub(crate) fn can_accept_unary(&self) -> bool {
        match self {
            Self::None => false,
            Self::Any => true,
            Self::Unary => true,
            Self::AtLeast(num) => num <= &1,
            Self::Exactly(num) => num == &1,
            Self::Variadic(range) => range.contains(&1),
        }
    }
}

type EagerFn = fn(&Vec<&Value>) -> Result<Value, Error>;
type LazyFn = fn(&Value, &Vec<&Value>) -> Result<Value, Error>;
/// The signature spec.md gives user-registered handlers: the (already
/// evaluated) argument node and the data context, producing a value.
/// Handlers may panic; the façade's panic boundary turns that into
/// `Error::EvaluationPanic`.
pub type UserFn = Arc<dyn Fn(&Value, &Value) -> Value + Send + Sync>;

/// A single entry in the registry.
#[derive(Clone)]
pub enum RegisteredOp {
    /// A built-in whose argument array is fully pre-evaluated before the
    /// handler runs.
    BuiltinEager { operator: EagerFn, num_params: NumParams },
    /// A built-in that receives the raw, unevaluated argument nodes plus
    /// the data context, and decides for itself what and when to
    /// recursively evaluate (`and`, `or`, `if`, the higher-order
    /// operators).
    BuiltinLazy { operator: LazyFn, num_params: NumParams },
    /// A user-registered handler (`add_operator`). Arguments are always
    /// pre-evaluated, as spec'd.
    User(UserFn),
}
impl fmt::Debug for RegisteredOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BuiltinEager { num_params, .. } => f
                .debug_struct("BuiltinEager")
                .field("num_params", num_params)
                .finish(),
            Self::BuiltinLazy { num_params, .. } => f
                .debug_struct("BuiltinLazy")
                .field("num_params", num_params)
                .finish(),
            Self::User(_) => f.debug_struct("User").finish(),
        }
    }
}

pub struct Registry {
    operators: RwLock<HashMap<String, RegisteredOp>>,
}
impl Registry {
    fn with_builtins() -> Self {
        let operators = op::builtin_operators()
            .into_iter()
            .map(|(name, entry)| (name.to_string(), entry))
            .collect();
        Registry {
            operators: RwLock::new(operators),
        }
    }

    pub fn lookup(&self, name: &str) -> Option<RegisteredOp> {
        self.operators
            .read()
            .expect("jsonlogic operator registry lock poisoned")
            .get(name)
            .cloned()
    }

    pub fn add(&self, name: String, handler: UserFn) {
        self.operators
            .write()
            .expect("jsonlogic operator registry lock poisoned")
            .insert(name, RegisteredOp::User(handler));
    }
}

pub static OPERATORS: Lazy<Registry> = Lazy::new(Registry::with_builtins);

/// Install or replace the handler for `name`.
///
/// `handler` receives the rule's argument node already evaluated against
/// `data`, and the data context itself; it returns the result value
/// directly (no `Result`, matching spec.md's handler contract — a handler
/// that cannot cope with its input should panic, which the façade converts
/// to `Error::EvaluationPanic`).
pub fn add_operator<F>(name: impl Into<String>, handler: F)
where
    F: Fn(&Value, &Value) -> Value + Send + Sync + 'static,
{
    OPERATORS.add(name.into(), Arc::new(handler));
}

#[cfg(test)]
mod test_registry {
    use super::*;
    use serde_json::json;

    #[test]
    fn add_operator_overrides_existing_name() {
        add_operator("registry_test_op", |_arg, _data| json!("first"));
        assert_eq!(
            crate::apply_value(&json!({"registry_test_op": []}), &json!(null)).unwrap(),
            json!("first")
        );
        add_operator("registry_test_op", |_arg, _data| json!("second"));
        assert_eq!(
            crate::apply_value(&json!({"registry_test_op": []}), &json!(null)).unwrap(),
            json!("second")
        );
    }

    // Shadows "merge" rather than a more commonly-exercised builtin like
    // "+": tests across the crate run concurrently against the same
    // global registry, and a builtin touched by other tests would flake
    // under that shared mutable state.
    #[test]
    fn add_operator_can_shadow_a_builtin() {
        add_operator("merge", |_arg, _data| json!("shadowed"));
        assert_eq!(
            crate::apply_value(&json!({"merge": [1, 2]}), &json!(null)).unwrap(),
            json!("shadowed")
        );
        // restore, since tests in this module share the global registry
        add_operator("merge", |arg, _data| {
            let items: Vec<Value> = arg.as_array().cloned().unwrap_or_default();
            json!(items
                .into_iter()
                .flat_map(|v| match v {
                    Value::Array(a) => a,
                    other => vec![other],
                })
                .collect::<Vec<Value>>())
        });
    }
}
