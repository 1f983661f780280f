//! Array Operations
//!
//! Note that some array operations also operate on strings as arrays
//! of characters.

use serde_json::{Map, Value};

use crate::data;
use crate::error::Error;
use crate::js_op;
use crate::op::logic;
use crate::value::{to_number_value, Evaluated, Parsed};

const HIGHER_ORDER_OPS: &[&str] = &["map", "filter", "reduce", "all", "some", "none"];

/// Substitute fully-resolvable outer-context `var` references into a
/// higher-order predicate, before it is parsed and run once per element.
///
/// A bare `{"var": "name"}` (not empty, not dot-prefixed) is replaced by
/// its literal value resolved against `outer_data`, when that resolves to
/// something other than `Null`. `{"var": ""}` and dot-prefixed paths are
/// left untouched, since those are element-relative by construction. A
/// nested higher-order operator's *subject* position is recursed into
/// (it still runs against the same outer context); its *predicate*
/// position is left alone, since it forms its own local scope once it
/// runs.
pub fn resolve_outer_refs(predicate: &Value, outer_data: &Value) -> Value {
    let obj = match predicate {
        Value::Object(obj) if obj.len() == 1 => obj,
        _ => return predicate.clone(),
    };
    let key = obj.keys().next().expect("checked len == 1 above");
    let val = &obj[key];

    if key == "var" {
        if let Value::String(path) = val {
            if path.is_empty() || path.starts_with('.') {
                return predicate.clone();
            }
            if let Some(resolved) = data::resolve_path(outer_data, path) {
                if resolved != Value::Null {
                    return resolved;
                }
            }
        }
        return predicate.clone();
    }

    if HIGHER_ORDER_OPS.contains(&key.as_str()) {
        return match val {
            Value::Array(args) if !args.is_empty() => {
                let mut new_args = args.clone();
                new_args[0] = resolve_outer_refs(&args[0], outer_data);
                let mut new_obj = Map::with_capacity(1);
                new_obj.insert(key.clone(), Value::Array(new_args));
                Value::Object(new_obj)
            }
            _ => predicate.clone(),
        };
    }

    let mut new_obj = Map::with_capacity(1);
    let new_val = match val {
        Value::Array(args) => {
            Value::Array(args.iter().map(|a| resolve_outer_refs(a, outer_data)).collect())
        }
        other => resolve_outer_refs(other, outer_data),
    };
    new_obj.insert(key.clone(), new_val);
    Value::Object(new_obj)
}

/// Map an operation onto values
pub fn map(data: &Value, args: &Vec<&Value>) -> Result<Value, Error> {
    let (items, expression) = (args[0], args[1]);

    let _parsed = Parsed::from_value(items)?;
    let evaluated_items = _parsed.evaluate(data)?;

    let values: Vec<&Value> = match evaluated_items {
        Evaluated::New(Value::Array(ref vals)) => vals.iter().collect(),
        Evaluated::Raw(Value::Array(vals)) => vals.iter().collect(),
        // null is treated as an empty array in the reference tests,
        // for whatever reason
        Evaluated::New(Value::Null) => vec![],
        Evaluated::Raw(Value::Null) => vec![],
        _ => {
            return Err(Error::InvalidArgument {
                value: args[0].clone(),
                operation: "map".into(),
                reason: format!(
                    "First argument to map must evaluate to an array. Got {:?}",
                    evaluated_items
                ),
            })
        }
    };

    let resolved_expression = resolve_outer_refs(expression, data);
    let parsed_expression = Parsed::from_value(&resolved_expression)?;

    values
        .iter()
        .map(|v| parsed_expression.evaluate(v).map(Value::from))
        .collect::<Result<Vec<Value>, Error>>()
        .map(Value::Array)
}

/// Filter values by some predicate
pub fn filter(data: &Value, args: &Vec<&Value>) -> Result<Value, Error> {
    let (items, expression) = (args[0], args[1]);

    let _parsed = Parsed::from_value(items)?;
    let evaluated_items = _parsed.evaluate(data)?;

    let values: Vec<Value> = match evaluated_items {
        Evaluated::New(Value::Array(vals)) => vals,
        Evaluated::Raw(Value::Array(vals)) => {
            vals.into_iter().map(|v| v.clone()).collect()
        }
        // null is treated as an empty array in the reference tests,
        // for whatever reason
        Evaluated::New(Value::Null) => vec![],
        Evaluated::Raw(Value::Null) => vec![],
        _ => {
            return Err(Error::InvalidArgument {
                value: args[0].clone(),
                operation: "map".into(),
                reason: format!(
                    "First argument to filter must evaluate to an array. Got {:?}",
                    evaluated_items
                ),
            })
        }
    };

    let resolved_expression = resolve_outer_refs(expression, data);
    let parsed_expression = Parsed::from_value(&resolved_expression)?;

    let value_vec: Vec<Value> = Vec::with_capacity(values.len());
    values
        .into_iter()
        .fold(Ok(value_vec), |acc, cur| {
            let mut filtered = acc?;
            let predicate = parsed_expression.evaluate(&cur)?;

            match logic::truthy_from_evaluated(&predicate) {
                true => {
                    filtered.push(cur);
                    Ok(filtered)
                }
                false => Ok(filtered),
            }
        })
        .map(Value::Array)
}

/// The locked type of a `reduce` accumulator, fixed by its initial value.
enum AccumulatorType {
    Bool,
    Number,
    String,
}
impl AccumulatorType {
    fn of(value: &Value) -> Result<Self, Error> {
        match value {
            Value::Bool(_) => Ok(Self::Bool),
            Value::Number(_) => Ok(Self::Number),
            Value::String(_) => Ok(Self::String),
            other => Err(Error::UnsupportedAccumulatorType(
                match other {
                    Value::Null => "null".into(),
                    Value::Array(_) => "array".into(),
                    Value::Object(_) => "object".into(),
                    _ => unreachable!(),
                },
            )),
        }
    }

    fn coerce(&self, value: Value) -> Result<Value, Error> {
        match self {
            Self::Bool => Ok(Value::Bool(js_op::truthy(&value))),
            Self::Number => to_number_value(js_op::to_number(&value)),
            Self::String => Ok(Value::String(js_op::to_string(&value))),
        }
    }

    fn name(&self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::Number => "number",
            Self::String => "string",
        }
    }
}

/// Reduce values into a single result.
///
/// The initializer is evaluated against the outer data context, then its
/// type (bool, number, or string) is locked for the remainder of the
/// reduction: every iteration's result is coerced back to that type.
/// `Null` elements in the subject array are skipped entirely.
pub fn reduce(data: &Value, args: &Vec<&Value>) -> Result<Value, Error> {
    let (items, expression, initializer) = (args[0], args[1], args[2]);

    let _parsed_items = Parsed::from_value(items)?;
    let evaluated_items = _parsed_items.evaluate(data)?;

    let _parsed_initializer = Parsed::from_value(initializer)?;
    let evaluated_initializer = Value::from(_parsed_initializer.evaluate(data)?);

    let values: Vec<Value> = match evaluated_items {
        Evaluated::New(Value::Array(vals)) => vals,
        Evaluated::Raw(Value::Array(vals)) => vals.iter().map(|v| v.clone()).collect(),
        // null is treated as an empty array in the reference tests,
        // for whatever reason
        Evaluated::New(Value::Null) => vec![],
        Evaluated::Raw(Value::Null) => vec![],
        _ => {
            return Err(Error::InvalidArgument {
                value: args[0].clone(),
                operation: "reduce".into(),
                reason: format!(
                    "First argument to reduce must evaluate to an array. Got {:?}",
                    evaluated_items
                ),
            })
        }
    };

    let accumulator_type = AccumulatorType::of(&evaluated_initializer)?;
    let parsed_expression = Parsed::from_value(expression)?;

    values
        .into_iter()
        .filter(|v| !matches!(v, Value::Null))
        .fold(Ok(evaluated_initializer), |acc, cur| {
            let accumulator = acc?;
            let mut iteration_data = Map::with_capacity(3);
            iteration_data.insert("current".into(), cur);
            iteration_data.insert("accumulator".into(), accumulator);
            iteration_data.insert(
                "valueType".into(),
                Value::String(accumulator_type.name().into()),
            );

            let result = parsed_expression
                .evaluate(&Value::Object(iteration_data))
                .map(Value::from)?;
            accumulator_type.coerce(result)
        })
}

/// Return whether all members of an array or string satisfy a predicate.
///
/// The predicate does not need to return true or false explicitly. Its
/// return is evaluated using the "truthy" definition specified in the
/// jsonlogic spec.
pub fn all(data: &Value, args: &Vec<&Value>) -> Result<Value, Error> {
    let (first_arg, second_arg) = (args[0], args[1]);

    // The first argument must be an array of values or a string of chars
    // We won't bother parsing yet if the value is anything other than
    // an object, because we can short-circuit this function if any of
    // the items fail to match the predicate. However, we will parse
    // if it's an object, in case it evaluates to a string or array, which
    // we will then pass on

    // An item needs its own evaluation pass only when it's a raw,
    // unevaluated AST fragment straight out of the rule - i.e. `first_arg`
    // was itself a literal array. Once `first_arg` has gone through
    // `evaluate` (the `Object` branch below), its elements are final data
    // values and must not be re-parsed as rule nodes: a data element that
    // happens to be a single-key object (e.g. `{"B": 1}`) is not an
    // operator invocation.
    let needs_item_eval = matches!(first_arg, Value::Array(_));

    let _new_item: Value;
    let potentially_evaled_first_arg = match first_arg {
        Value::Object(_) => {
            let parsed = Parsed::from_value(first_arg)?;
            let evaluated = parsed.evaluate(data)?;
            _new_item = evaluated.into();
            &_new_item
        }
        _ => first_arg,
    };

    let _new_arr: Vec<Value>;
    let items = match potentially_evaled_first_arg {
        Value::Array(items) => items,
        Value::String(string) => {
            _new_arr = string
                .chars()
                .into_iter()
                .map(|c| Value::String(c.to_string()))
                .collect();
            &_new_arr
        }
        Value::Null => {
            _new_arr = Vec::new();
            &_new_arr
        }
        _ => {
            return Err(Error::InvalidArgument {
                value: first_arg.clone(),
                operation: "all".into(),
                reason: format!(
                "First argument to all must evaluate to an array, string, or null, got {}",
                potentially_evaled_first_arg
            ),
            })
        }
    };

    // Special-case the empty array, since it for some reason is specified
    // to return false.
    if items.len() == 0 {
        return Ok(Value::Bool(false));
    }

    // Note we _expect_ the predicate to be an operator, but it doesn't
    // necessarily have to be. all([1, 2, 3], 1) is a valid operation,
    // returning 1 for each of the items and thus evaluating to true.
    let resolved_second_arg = resolve_outer_refs(second_arg, data);
    let predicate = Parsed::from_value(&resolved_second_arg)?;

    let result = items.into_iter().fold(Ok(true), |acc, i| {
        acc.and_then(|res| {
            // "Short-circuit": return false if the previous eval was false
            if !res {
                return Ok(false);
            };
            let evaluated_item = if needs_item_eval {
                Parsed::from_value(i)?.evaluate(data).map(Value::from)?
            } else {
                i.clone()
            };
            Ok(logic::truthy_from_evaluated(
                &predicate.evaluate(&evaluated_item)?,
            ))
        })
    })?;

    Ok(Value::Bool(result))
}

/// Return whether some members of an array or string satisfy a predicate.
///
/// The predicate does not need to return true or false explicitly. Its
/// return is evaluated using the "truthy" definition specified in the
/// jsonlogic spec.
pub fn some(data: &Value, args: &Vec<&Value>) -> Result<Value, Error> {
    let (first_arg, second_arg) = (args[0], args[1]);

    // The first argument must be an array of values or a string of chars
    // We won't bother parsing yet if the value is anything other than
    // an object, because we can short-circuit this function if any of
    // the items fail to match the predicate. However, we will parse
    // if it's an object, in case it evaluates to a string or array, which
    // we will then pass on

    // See the matching comment in `all` above: items only need their own
    // evaluation pass when `first_arg` was a literal array straight out of
    // the rule, not when it's already-final data from evaluating a `var`
    // or other expression.
    let needs_item_eval = matches!(first_arg, Value::Array(_));

    let _new_item: Value;
    let potentially_evaled_first_arg = match first_arg {
        Value::Object(_) => {
            let parsed = Parsed::from_value(first_arg)?;
            let evaluated = parsed.evaluate(data)?;
            _new_item = evaluated.into();
            &_new_item
        }
        _ => first_arg,
    };

    let _new_arr: Vec<Value>;
    let items = match potentially_evaled_first_arg {
        Value::Array(items) => items,
        Value::String(string) => {
            _new_arr = string
                .chars()
                .into_iter()
                .map(|c| Value::String(c.to_string()))
                .collect();
            &_new_arr
        }
        Value::Null => {
            _new_arr = Vec::new();
            &_new_arr
        }
        _ => {
            return Err(Error::InvalidArgument {
                value: first_arg.clone(),
                operation: "all".into(),
                reason: format!(
                "First argument must evaluate to an array, a string, or null, got {}",
                potentially_evaled_first_arg
            ),
            })
        }
    };

    // Special-case the empty array, since it for some reason is specified
    // to return false.
    if items.len() == 0 {
        return Ok(Value::Bool(false));
    }

    // Note we _expect_ the predicate to be an operator, but it doesn't
    // necessarily have to be. all([1, 2, 3], 1) is a valid operation,
    // returning 1 for each of the items and thus evaluating to true.
    let resolved_second_arg = resolve_outer_refs(second_arg, data);
    let predicate = Parsed::from_value(&resolved_second_arg)?;

    let result = items.into_iter().fold(Ok(false), |acc, i| {
        acc.and_then(|res| {
            // "Short-circuit": return false if the previous eval was false
            if res {
                return Ok(true);
            };
            let evaluated_item = if needs_item_eval {
                Parsed::from_value(i)?.evaluate(data).map(Value::from)?
            } else {
                i.clone()
            };
            Ok(logic::truthy_from_evaluated(
                &predicate.evaluate(&evaluated_item)?,
            ))
        })
    })?;

    Ok(Value::Bool(result))
}

/// Return whether no members of an array or string satisfy a predicate.
///
/// The predicate does not need to return true or false explicitly. Its
/// return is evaluated using the "truthy" definition specified in the
/// jsonlogic spec.
pub fn none(data: &Value, args: &Vec<&Value>) -> Result<Value, Error> {
    some(data, args).and_then(|had_some| match had_some {
        Value::Bool(res) => Ok(Value::Bool(!res)),
        _ => Err(Error::UnexpectedError(
            "Unexpected return type from op_some".into(),
        )),
    })
}

/// Merge one to n arrays, flattening them by one level.
///
/// Values that are not arrays are (effectively) converted to arrays
/// before flattening.
pub fn merge(items: &Vec<&Value>) -> Result<Value, Error> {
    let rv_vec: Vec<Value> = Vec::new();
    Ok(Value::Array(items.into_iter().fold(
        rv_vec,
        |mut acc, i| {
            match i {
                Value::Array(i_vals) => {
                    i_vals.into_iter().for_each(|val| acc.push((*val).clone()));
                }
                _ => acc.push((**i).clone()),
            };
            acc
        },
    )))
}

/// Perform containment checks with "in"
// TODO: make this a lazy operator, since we don't need to parse things
// later on in the list if we find something that matches early.
pub fn in_(items: &Vec<&Value>) -> Result<Value, Error> {
    let needle = items[0];
    let haystack = items[1];

    match haystack {
        // Note: our containment check for array values is actually a bit
        // more robust than JS. This by default does array equality (e.g.
        // `[[1,2], [3,4]].contains([1,2]) == true`), as well as object
        // equality (e.g. `[{"a": "b"}].contains({"a": "b"}) == true`).
        // Given that anyone relying on this behavior in the existing jsonlogic
        // implementation is relying on broken, undefined behavior, it seems
        // okay to update that behavior to work in a more intuitive way.
        //
        // A haystack element that's itself a 2-element array is treated as
        // an inclusive numeric range when the needle is a number.
        Value::Null => Ok(Value::Bool(false)),
        Value::Array(possibles) => Ok(Value::Bool(possibles.iter().any(|p| {
            match (needle, p) {
                (Value::Number(_), Value::Array(range)) if range.len() == 2 => {
                    let n = js_op::to_number(needle);
                    let lo = js_op::to_number(&range[0]);
                    let hi = js_op::to_number(&range[1]);
                    n >= lo && n <= hi
                }
                _ => p == needle,
            }
        }))),
        Value::String(haystack_string) => {
            // Note: the reference implementation uses the regular old
            // String.prototype.indexOf() function to check for containment,
            // but that does JS type coercion, leading to crazy things like
            // `"foo[object Object]".indexOf({}) === 3`. Since the MDN docs
            // _explicitly_ say that the argument to indexOf should be a string,
            // we're going to take the same stance here, and throw an error
            // if the needle is a non-string for a haystack that's a string.
            let needle_string =
                match needle {
                    Value::String(needle_string) => needle_string,
                    _ => return Err(Error::InvalidArgument {
                        value: needle.clone(),
                        operation: "in".into(),
                        reason:
                            "If second argument is a string, first argument must also be a string."
                                .into(),
                    }),
                };
            Ok(Value::Bool(haystack_string.contains(needle_string)))
        }
        _ => Err(Error::InvalidArgument {
            value: haystack.clone(),
            operation: "in".into(),
            reason: "Second argument must be an array or a string".into(),
        }),
    }
}
