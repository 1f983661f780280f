//! Built-in operators
//!
//! This module builds the table of built-in operators that seeds the
//! runtime registry (`crate::registry`). Note that some "operations",
//! notably data-related operations like `var` and `missing`, are not
//! included here, because they are implemented as parsers rather than
//! operators (see `crate::data`).

use serde_json::{Map, Value};

use crate::data;
use crate::error::Error;
use crate::registry::{NumParams, RegisteredOp};
use crate::value::{to_number_value, Evaluated, Parsed};
use crate::{js_op, Parser};

pub mod array;
pub mod impure;
pub mod logic;
pub mod numeric;
pub mod string;

/// The built-in operator table, consumed once at registry init time.
pub(crate) fn builtin_operators() -> Vec<(&'static str, RegisteredOp)> {
    vec![
        (
            "==",
            RegisteredOp::BuiltinEager {
                operator: |items| Ok(Value::Bool(js_op::abstract_eq(items[0], items[1]))),
                num_params: NumParams::Exactly(2),
            },
        ),
        (
            "!=",
            RegisteredOp::BuiltinEager {
                operator: |items| Ok(Value::Bool(js_op::abstract_ne(items[0], items[1]))),
                num_params: NumParams::Exactly(2),
            },
        ),
        (
            "===",
            RegisteredOp::BuiltinEager {
                operator: |items| Ok(Value::Bool(js_op::strict_eq(items[0], items[1]))),
                num_params: NumParams::Exactly(2),
            },
        ),
        (
            "!==",
            RegisteredOp::BuiltinEager {
                operator: |items| Ok(Value::Bool(js_op::strict_ne(items[0], items[1]))),
                num_params: NumParams::Exactly(2),
            },
        ),
        // Note: the ! and !! behavior conforms to the specification, but not
        // necessarily the reference implementation, which treats a non-array
        // argument to a non-unary operator as a single-element array. We
        // conform to the spec because it is less surprising and because
        // jsonlogic's own stated virtue is "Consistent.
        // `{"operator" : ["values" ... ]}` Always".
        (
            "!",
            RegisteredOp::BuiltinEager {
                operator: |items| Ok(Value::Bool(!js_op::truthy(items[0]))),
                num_params: NumParams::Unary,
            },
        ),
        (
            "!!",
            RegisteredOp::BuiltinEager {
                operator: |items| Ok(Value::Bool(js_op::truthy(items[0]))),
                num_params: NumParams::Unary,
            },
        ),
        (
            "<",
            RegisteredOp::BuiltinEager {
                operator: numeric::lt,
                num_params: NumParams::Variadic(2..4),
            },
        ),
        (
            "<=",
            RegisteredOp::BuiltinEager {
                operator: numeric::lte,
                num_params: NumParams::Variadic(2..4),
            },
        ),
        // Expansion on the spec/reference implementation: `<`/`<=` support
        // the 3-argument "between" form; we extend the same courtesy to
        // `>`/`>=` rather than silently ignoring a third argument.
        (
            ">",
            RegisteredOp::BuiltinEager {
                operator: numeric::gt,
                num_params: NumParams::Variadic(2..4),
            },
        ),
        (
            ">=",
            RegisteredOp::BuiltinEager {
                operator: numeric::gte,
                num_params: NumParams::Variadic(2..4),
            },
        ),
        (
            "+",
            RegisteredOp::BuiltinEager {
                operator: numeric::add,
                num_params: NumParams::Any,
            },
        ),
        (
            "-",
            RegisteredOp::BuiltinEager {
                operator: numeric::minus,
                num_params: NumParams::Any,
            },
        ),
        (
            "*",
            RegisteredOp::BuiltinEager {
                operator: numeric::mul,
                num_params: NumParams::Any,
            },
        ),
        (
            "/",
            RegisteredOp::BuiltinEager {
                operator: numeric::div,
                num_params: NumParams::Any,
            },
        ),
        (
            "%",
            RegisteredOp::BuiltinEager {
                operator: numeric::modulo,
                num_params: NumParams::Exactly(2),
            },
        ),
        (
            "abs",
            RegisteredOp::BuiltinEager {
                operator: |items| to_number_value(js_op::to_number(items[0]).abs()),
                num_params: NumParams::Unary,
            },
        ),
        (
            "max",
            RegisteredOp::BuiltinEager {
                operator: numeric::max,
                num_params: NumParams::Any,
            },
        ),
        (
            "min",
            RegisteredOp::BuiltinEager {
                operator: numeric::min,
                num_params: NumParams::Any,
            },
        ),
        (
            "merge",
            RegisteredOp::BuiltinEager {
                operator: array::merge,
                num_params: NumParams::Any,
            },
        ),
        (
            "in",
            RegisteredOp::BuiltinEager {
                operator: array::in_,
                num_params: NumParams::Exactly(2),
            },
        ),
        (
            "set",
            RegisteredOp::BuiltinEager {
                operator: data::set,
                num_params: NumParams::Exactly(3),
            },
        ),
        (
            "cat",
            RegisteredOp::BuiltinEager {
                operator: string::cat,
                num_params: NumParams::Any,
            },
        ),
        (
            "substr",
            RegisteredOp::BuiltinEager {
                operator: string::substr,
                num_params: NumParams::Variadic(2..4),
            },
        ),
        (
            "log",
            RegisteredOp::BuiltinEager {
                operator: impure::log,
                num_params: NumParams::Unary,
            },
        ),
        (
            "if",
            RegisteredOp::BuiltinLazy {
                operator: logic::if_,
                num_params: NumParams::Any,
            },
        ),
        (
            "?:",
            RegisteredOp::BuiltinLazy {
                operator: logic::if_,
                num_params: NumParams::Any,
            },
        ),
        (
            "or",
            RegisteredOp::BuiltinLazy {
                operator: logic::or,
                num_params: NumParams::Any,
            },
        ),
        (
            "and",
            RegisteredOp::BuiltinLazy {
                operator: logic::and,
                num_params: NumParams::Any,
            },
        ),
        (
            "map",
            RegisteredOp::BuiltinLazy {
                operator: array::map,
                num_params: NumParams::Exactly(2),
            },
        ),
        (
            "filter",
            RegisteredOp::BuiltinLazy {
                operator: array::filter,
                num_params: NumParams::Exactly(2),
            },
        ),
        (
            "reduce",
            RegisteredOp::BuiltinLazy {
                operator: array::reduce,
                num_params: NumParams::Exactly(3),
            },
        ),
        (
            "all",
            RegisteredOp::BuiltinLazy {
                operator: array::all,
                num_params: NumParams::Exactly(2),
            },
        ),
        (
            "some",
            RegisteredOp::BuiltinLazy {
                operator: array::some,
                num_params: NumParams::Exactly(2),
            },
        ),
        (
            "none",
            RegisteredOp::BuiltinLazy {
                operator: array::none,
                num_params: NumParams::Exactly(2),
            },
        ),
    ]
}

/// An operation that doesn't do any recursive parsing or evaluation.
///
/// Any operator functions used must handle parsing of values themselves.
#[derive(Debug)]
pub struct LazyOperation<'a> {
    symbol: String,
    operator: fn(&Value, &Vec<&Value>) -> Result<Value, Error>,
    arguments: Vec<Value>,
    _marker: std::marker::PhantomData<&'a ()>,
}
impl<'a> Parser<'a> for LazyOperation<'a> {
    fn from_value(value: &'a Value) -> Result<Option<Self>, Error> {
        let obj = match value {
            Value::Object(obj) => obj,
            _ => return Ok(None),
        };
        if obj.len() != 1 {
            return Ok(None);
        };

        let key = obj.keys().next().ok_or(Error::UnexpectedError(format!(
            "could not get first key from len(1) object: {:?}",
            obj
        )))?;
        let val = obj.get(key).ok_or(Error::UnexpectedError(format!(
            "could not get value for key '{}' from len(1) object: {:?}",
            key, obj
        )))?;

        let (operator, num_params) = match crate::registry::OPERATORS.lookup(key) {
            Some(RegisteredOp::BuiltinLazy {
                operator,
                num_params,
            }) => (operator, num_params),
            _ => return Ok(None),
        };

        let err_for_non_unary = || {
            Err(Error::InvalidOperation {
                key: key.clone(),
                reason: "Arguments to non-unary operations must be arrays".into(),
            })
        };

        let args = match val {
            Value::Array(args) => args.to_vec(),
            _ => match num_params.can_accept_unary() {
                true => vec![val.clone()],
                false => return err_for_non_unary(),
            },
        };

        num_params.check_len(&args.len())?;

        Ok(Some(LazyOperation {
            symbol: key.clone(),
            operator,
            arguments: args,
            _marker: std::marker::PhantomData,
        }))
    }

    fn evaluate(&self, data: &Value) -> Result<Evaluated<'_>, Error> {
        (self.operator)(data, &self.arguments.iter().collect()).map(Evaluated::New)
    }
}

impl From<LazyOperation<'_>> for Value {
    fn from(op: LazyOperation) -> Value {
        let mut rv = Map::with_capacity(1);
        rv.insert(op.symbol, Value::Array(op.arguments));
        Value::Object(rv)
    }
}

#[derive(Debug)]
pub struct Operation<'a> {
    symbol: String,
    operator: fn(&Vec<&Value>) -> Result<Value, Error>,
    num_params: NumParams,
    /// Whether the raw argument was a single non-array node, sugar for a
    /// one-element argument list. When such a node evaluates to an array
    /// (e.g. `{"min": {"map": [...]}}`), a variadic operator treats that
    /// array as its item list rather than as one item among others - see
    /// `evaluate` below.
    unary_wrapped: bool,
    arguments: Vec<Parsed<'a>>,
}
impl<'a> Parser<'a> for Operation<'a> {
    fn from_value(value: &'a Value) -> Result<Option<Self>, Error> {
        let obj = match value {
            Value::Object(obj) => obj,
            _ => return Ok(None),
        };
        if obj.len() != 1 {
            return Ok(None);
        };

        let key = obj.keys().next().ok_or(Error::UnexpectedError(format!(
            "could not get first key from len(1) object: {:?}",
            obj
        )))?;
        let val = obj.get(key).ok_or(Error::UnexpectedError(format!(
            "could not get value for key '{}' from len(1) object: {:?}",
            key, obj
        )))?;

        let (operator, num_params) = match crate::registry::OPERATORS.lookup(key) {
            Some(RegisteredOp::BuiltinEager {
                operator,
                num_params,
            }) => (operator, num_params),
            _ => return Ok(None),
        };

        let err_for_non_unary = || {
            Err(Error::InvalidOperation {
                key: key.clone(),
                reason: "Arguments to non-unary operations must be arrays".into(),
            })
        };

        let unary_wrapped = !matches!(val, Value::Array(_));
        let args = match val {
            Value::Array(args) => args.iter().collect::<Vec<&Value>>(),
            _ => match num_params.can_accept_unary() {
                true => vec![val],
                false => return err_for_non_unary(),
            },
        };

        num_params.check_len(&args.len())?;

        Ok(Some(Operation {
            symbol: key.clone(),
            operator,
            num_params,
            unary_wrapped,
            arguments: Parsed::from_values(args)?,
        }))
    }

    /// Evaluate the operation after recursively evaluating any nested operations
    fn evaluate(&self, data: &Value) -> Result<Evaluated<'_>, Error> {
        let mut arguments = self
            .arguments
            .iter()
            .map(|value| value.evaluate(data).map(Value::from))
            .collect::<Result<Vec<Value>, Error>>()?;

        if self.unary_wrapped && matches!(self.num_params, NumParams::Any) && arguments.len() == 1
        {
            if let Value::Array(_) = arguments[0] {
                arguments = match arguments.into_iter().next() {
                    Some(Value::Array(items)) => items,
                    _ => unreachable!(),
                };
            }
        }

        (self.operator)(&arguments.iter().collect()).map(Evaluated::New)
    }
}

impl From<Operation<'_>> for Value {
    fn from(op: Operation) -> Value {
        let mut rv = Map::with_capacity(1);
        let values = op
            .arguments
            .into_iter()
            .map(Value::from)
            .collect::<Vec<Value>>();
        rv.insert(op.symbol, Value::Array(values));
        Value::Object(rv)
    }
}

/// A user-registered operator node (`add_operator`).
///
/// Its argument is pre-evaluated (like `Operation`'s), then passed whole
/// to the user's `(argument: Value, data: Value) -> Value` handler. The
/// handler runs inside the façade's panic boundary, since it's arbitrary
/// third-party code.
pub struct UserOperation<'a> {
    symbol: String,
    handler: crate::registry::UserFn,
    argument: Box<Parsed<'a>>,
}
impl std::fmt::Debug for UserOperation<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserOperation")
            .field("symbol", &self.symbol)
            .field("argument", &self.argument)
            .finish()
    }
}
impl<'a> Parser<'a> for UserOperation<'a> {
    fn from_value(value: &'a Value) -> Result<Option<Self>, Error> {
        let obj = match value {
            Value::Object(obj) => obj,
            _ => return Ok(None),
        };
        if obj.len() != 1 {
            return Ok(None);
        };
        let key = obj.keys().next().expect("checked len == 1 above");
        let val = &obj[key];

        let handler = match crate::registry::OPERATORS.lookup(key) {
            Some(RegisteredOp::User(handler)) => handler,
            _ => return Ok(None),
        };

        Ok(Some(UserOperation {
            symbol: key.clone(),
            handler,
            argument: Box::new(Parsed::from_value(val)?),
        }))
    }

    fn evaluate(&self, data: &Value) -> Result<Evaluated<'_>, Error> {
        let evaluated_arg = self.argument.evaluate(data).map(Value::from)?;
        Ok(Evaluated::New((self.handler)(&evaluated_arg, data)))
    }
}
impl From<UserOperation<'_>> for Value {
    fn from(op: UserOperation) -> Value {
        let mut rv = Map::with_capacity(1);
        rv.insert(op.symbol, Value::from(*op.argument));
        Value::Object(rv)
    }
}

#[cfg(test)]
mod test_operators {
    use super::*;

    /// The built-in table must not define the same operator name twice.
    #[test]
    fn test_builtin_operators_unique_names() {
        let ops = builtin_operators();
        let mut names: Vec<&str> = ops.iter().map(|(name, _)| *name).collect();
        let original_len = names.len();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), original_len);
    }

    /// A variadic operator given a single non-array argument that itself
    /// evaluates to an array (e.g. the result of a `map`) treats that
    /// array as its item list, rather than as one item among others.
    #[test]
    fn test_variadic_op_flattens_single_evaluated_array_argument() {
        use serde_json::json;
        let rule = json!({"min": {"map": [{"var": "items"}, {"+": [{"var": ""}, 1]}]}});
        let data = json!({"items": [3, 1, 2]});
        assert_eq!(crate::apply_value(&rule, &data).unwrap(), json!(2));
    }

    /// A unary operator's single-value semantics are unaffected by the
    /// flattening rule above: `abs` never treats an array result as a
    /// list of items to reduce over.
    #[test]
    fn test_unary_op_does_not_flatten_array_argument() {
        use serde_json::json;
        let rule = json!({"abs": {"map": [[-1, -2], {"*": [{"var": ""}, 1]}]}});
        let result = crate::apply_value(&rule, &json!(null));
        assert!(result.is_err());
    }

    /// A dot-prefixed path inside a higher-order predicate resolves
    /// relative to the current iteration element, same as the bare path.
    #[test]
    fn test_dotted_path_resolves_relative_to_iteration_context() {
        use serde_json::json;
        let rule = json!({"map": [[{"age": 18}, {"age": 20}], {"var": ".age"}]});
        assert_eq!(
            crate::apply_value(&rule, &json!(null)).unwrap(),
            json!([18, 20])
        );
    }

    /// A single-key object whose key isn't a registered operator is a
    /// lookup miss, not a data literal - even though a ≥2-key object with
    /// the same unrecognized keys would be.
    #[test]
    fn test_unrecognized_single_key_object_is_unknown_operator() {
        use serde_json::json;
        let result = crate::apply_value(&json!({"totallyUnknownOp": [1, 2]}), &json!(null));
        assert!(matches!(result, Err(Error::UnknownOperator(ref k)) if k == "totallyUnknownOp"));
    }

    #[test]
    fn test_multi_key_object_with_unrecognized_keys_is_still_a_literal() {
        use serde_json::json;
        let rule = json!({"totallyUnknownOp": 1, "other": 2});
        assert_eq!(crate::apply_value(&rule, &json!(null)).unwrap(), rule);
    }
}
