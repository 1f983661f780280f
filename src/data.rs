//! Data functions and operators
//!
//! Variable resolution (`var`), key-presence checks (`missing`,
//! `missing_some`), and the `set` operator all share the same notion of a
//! key path through a JSON value, so they live together here rather than
//! split between a parser module and an operator module.

use std::borrow::Cow;
use std::convert::TryFrom;
use std::convert::TryInto;

use serde_json::{Map, Value};

use crate::error::Error;
use crate::value::{Evaluated, Parsed};
use crate::{Parser, NULL};

/// Valid types of variable/missing/set keys.
#[derive(Debug)]
enum KeyType<'a> {
    Null,
    String(Cow<'a, str>),
    Number(i64),
}
impl<'a> TryFrom<&'a Value> for KeyType<'a> {
    type Error = Error;

    fn try_from(value: &'a Value) -> Result<Self, Self::Error> {
        match value {
            Value::Null => Ok(Self::Null),
            Value::String(s) => Ok(Self::String(Cow::from(s.as_str()))),
            Value::Number(n) => {
                Ok(Self::Number(n.as_i64().ok_or(Error::InvalidVariableKey {
                    value: value.clone(),
                    reason: "Numeric keys must be valid integers".into(),
                })?))
            }
            _ => Err(Error::InvalidVariableKey {
                value: value.clone(),
                reason: "Variable keys must be strings, integers, or null".into(),
            }),
        }
    }
}
impl From<&KeyType<'_>> for Value {
    fn from(key: &KeyType) -> Self {
        match key {
            KeyType::Null => Value::Null,
            KeyType::String(s) => Value::String(s.clone().into_owned()),
            KeyType::Number(n) => Value::Number((*n).into()),
        }
    }
}

/// A get operation that supports negative indexes, Python-slice-style.
fn get<T>(slice: &[T], idx: i64) -> Option<&T> {
    let vec_len = slice.len();
    let usize_idx: usize = idx.abs().try_into().ok()?;

    let adjusted_idx = if idx >= 0 {
        usize_idx
    } else {
        vec_len.checked_sub(usize_idx)?
    };

    slice.get(adjusted_idx)
}

/// Resolve a dotted path against `data`, returning `None` if any segment
/// is absent. Used by the higher-order operators' outer-scope pre-pass;
/// unlike `var`'s own resolution this never substitutes a default.
pub(crate) fn resolve_path(data: &Value, path: &str) -> Option<Value> {
    get_str_key(data, path)
}

fn get_str_key<K: AsRef<str>>(data: &Value, key: K) -> Option<Value> {
    // A leading "." is this-relative sugar inside a higher-order
    // operator's local scope (the iteration context already *is* the
    // referent); ".age" and "age" resolve identically against `data`.
    let k = key.as_ref().strip_prefix('.').unwrap_or(key.as_ref());
    if k == "" {
        return Some(data.clone());
    };
    match data {
        Value::Object(_) | Value::Array(_) | Value::String(_) => {
            k.split(".").fold(Some(data.clone()), |acc, i| match acc? {
                Value::Object(map) => map.get(i).map(Value::clone),
                Value::Array(arr) => i
                    .parse::<i64>()
                    .ok()
                    .and_then(|i| get(&arr, i))
                    .map(Value::clone),
                Value::String(s) => {
                    let s_chars: Vec<char> = s.chars().collect();
                    i.parse::<i64>()
                        .ok()
                        .and_then(|i| get(&s_chars, i))
                        .map(|c| c.to_string())
                        .map(Value::String)
                }
                _ => None,
            })
        }
        _ => None,
    }
}

fn get_key(data: &Value, key: &KeyType) -> Option<Value> {
    match key {
        // Null always refers to the whole data, even with a default present.
        KeyType::Null => Some(data.clone()),
        KeyType::String(k) => get_str_key(data, k.as_ref()),
        KeyType::Number(i) => match data {
            Value::Object(_) => get_str_key(data, i.to_string()),
            Value::Array(arr) => get(arr, *i).map(Value::clone),
            Value::String(s) => {
                let s_vec: Vec<char> = s.chars().collect();
                get(&s_vec, *i).map(|c| c.to_string()).map(Value::String)
            }
            _ => None,
        },
    }
}

fn keys_from_val<'a>(val: &'a Value) -> Result<Vec<KeyType<'a>>, Error> {
    match val {
        Value::Array(vals) => vals.iter().map(KeyType::try_from).collect(),
        _ => Err(Error::InvalidOperation {
            key: "missing".into(),
            reason: "Parameters to 'missing' must be an array.".into(),
        }),
    }
}

fn missing_keys(data: &Value, keys: &Vec<KeyType>) -> Vec<Value> {
    keys.iter()
        .filter(|key| get_key(data, key).is_none())
        .map(Value::from)
        .collect()
}

#[derive(Debug)]
pub struct Raw<'a> {
    value: &'a Value,
}
impl<'a> Parser<'a> for Raw<'a> {
    fn from_value(value: &'a Value) -> Result<Option<Self>, Error> {
        // A single-key object is always an operator invocation, never a
        // literal - if no other parser recognized it, `Parsed::from_value`
        // reports `UnknownOperator` rather than treating it as data.
        if matches!(value, Value::Object(obj) if obj.len() == 1) {
            return Ok(None);
        }
        Ok(Some(Self { value }))
    }
    fn evaluate(&self, _data: &Value) -> Result<Evaluated<'_>, Error> {
        Ok(Evaluated::Raw(self.value))
    }
}
impl From<Raw<'_>> for Value {
    fn from(raw: Raw) -> Self {
        raw.value.clone()
    }
}

/// A `{"var": path}` or `{"var": [path, default]}` node.
///
/// `path` is itself evaluated before use, so a computed path (e.g.
/// `{"var": {"cat": ["fo", "o"]}}`) resolves correctly.
#[derive(Debug)]
pub struct Variable<'a> {
    arg: &'a Value,
}
impl<'a> Parser<'a> for Variable<'a> {
    fn from_value(value: &'a Value) -> Result<Option<Self>, Error> {
        let obj = match value {
            Value::Object(obj) => obj,
            _ => return Ok(None),
        };
        if obj.len() != 1 {
            return Ok(None);
        }
        match obj.get("var") {
            Some(arg) => Ok(Some(Self { arg })),
            None => Ok(None),
        }
    }

    fn evaluate(&self, data: &Value) -> Result<Evaluated<'_>, Error> {
        let args: Vec<&Value> = match self.arg {
            Value::Array(vals) => vals.iter().collect(),
            other => vec![other],
        };

        let evaluated: Vec<Value> = args
            .iter()
            .map(|v| Parsed::from_value(v)?.evaluate(data).map(Value::from))
            .collect::<Result<Vec<Value>, Error>>()?;

        if evaluated.is_empty() {
            return Ok(Evaluated::New(data.clone()));
        }

        let key = KeyType::try_from(&evaluated[0])?;
        let resolved = get_key(data, &key);

        Ok(Evaluated::New(resolved.unwrap_or(if evaluated.len() < 2 {
            NULL
        } else {
            evaluated[1].clone()
        })))
    }
}
impl From<Variable<'_>> for Value {
    fn from(var: Variable) -> Self {
        let mut map = Map::with_capacity(1);
        map.insert("var".into(), var.arg.clone());
        Value::Object(map)
    }
}

#[derive(Debug)]
pub struct Missing<'a> {
    values: Vec<KeyType<'a>>,
}
impl<'a> Parser<'a> for Missing<'a> {
    fn from_value(value: &'a Value) -> Result<Option<Self>, Error> {
        match value {
            Value::Object(obj) => {
                if let Some(val) = obj.get("missing") {
                    let keys = keys_from_val(val)?;
                    Ok(Some(Missing { values: keys }))
                } else {
                    Ok(None)
                }
            }
            _ => Ok(None),
        }
    }

    fn evaluate(&self, data: &Value) -> Result<Evaluated<'_>, Error> {
        Ok(Evaluated::New(Value::Array(missing_keys(
            data,
            &self.values,
        ))))
    }
}
impl From<Missing<'_>> for Value {
    fn from(missing: Missing) -> Self {
        let mut map = Map::with_capacity(1);
        let keys = missing.values.iter().map(Value::from).collect();
        map.insert("missing".into(), Value::Array(keys));
        Self::Object(map)
    }
}

#[derive(Debug)]
pub struct MissingSome<'a> {
    minimum: u64,
    keys: Vec<KeyType<'a>>,
}
impl<'a> Parser<'a> for MissingSome<'a> {
    fn from_value(value: &'a Value) -> Result<Option<Self>, Error> {
        let obj = match value {
            Value::Object(obj) => obj,
            _ => return Ok(None),
        };
        let val = match obj.get("missing_some") {
            Some(val) => val,
            None => return Ok(None),
        };
        let (min_val, keys_val) = match val {
            Value::Array(vals) if vals.len() == 2 => (&vals[0], &vals[1]),
            _ => {
                return Err(Error::InvalidOperation {
                    key: "missing_some".into(),
                    reason: "missing_some parameters must be an array of len(2)".into(),
                })
            }
        };
        let minimum = match min_val {
            Value::Number(n) => n.as_u64().ok_or(Error::InvalidOperation {
                key: "missing_some".into(),
                reason: "Could not get unsigned 64-bit integer from first parameter".into(),
            }),
            _ => Err(Error::InvalidOperation {
                key: "missing_some".into(),
                reason: "First parameter to missing_some must be a number!".into(),
            }),
        }?;
        let keys = keys_from_val(keys_val)?;
        Ok(Some(Self { minimum, keys }))
    }
    fn evaluate(&self, data: &Value) -> Result<Evaluated<'_>, Error> {
        let missing = missing_keys(data, &self.keys);
        let present_keys = self.keys.len() - missing.len();
        let val = if (present_keys as u64) >= self.minimum {
            Value::Array(Vec::with_capacity(0))
        } else {
            Value::Array(missing)
        };
        Ok(Evaluated::New(val))
    }
}
impl<'a> From<MissingSome<'a>> for Value {
    fn from(missing: MissingSome) -> Self {
        let mut map = Map::with_capacity(1);
        let keys = missing.keys.iter().map(Value::from).collect();
        map.insert(
            "missing_some".into(),
            Value::Array(vec![Value::Number(missing.minimum.into()), Value::Array(keys)]),
        );
        Value::Object(map)
    }
}

/// Set a value at a dotted path within a deep copy of the subject.
///
/// Never mutates the input; intermediate object levels are created as
/// needed, matching the way `var` resolves dotted paths for reads.
pub fn set(items: &Vec<&Value>) -> Result<Value, Error> {
    let (subject, path, new_val) = (items[0], items[1], items[2]);

    if matches!(
        subject,
        Value::Bool(_) | Value::Number(_) | Value::String(_)
    ) {
        return Ok(subject.clone());
    }

    let path_str = match path {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        _ => {
            return Err(Error::InvalidArgument {
                value: path.clone(),
                operation: "set".into(),
                reason: "set path must be a string or number".into(),
            })
        }
    };
    let segments: Vec<&str> = path_str.split(".").collect();

    let mut root = subject.clone();
    set_path(&mut root, &segments, new_val.clone())?;
    Ok(root)
}

fn set_path(current: &mut Value, segments: &[&str], new_val: Value) -> Result<(), Error> {
    let (head, rest) = match segments.split_first() {
        Some(split) => split,
        None => return Ok(()),
    };

    if rest.is_empty() {
        match current {
            Value::Array(arr) => {
                let idx: usize = head.parse().map_err(|_| Error::InvalidArgument {
                    value: Value::String((*head).into()),
                    operation: "set".into(),
                    reason: "Cannot set a non-integer index on an array".into(),
                })?;
                if idx >= arr.len() {
                    arr.resize(idx + 1, Value::Null);
                }
                arr[idx] = new_val;
            }
            Value::Object(map) => {
                map.insert((*head).into(), new_val);
            }
            Value::Null => {
                let mut map = Map::new();
                map.insert((*head).into(), new_val);
                *current = Value::Object(map);
            }
            _ => {
                return Err(Error::InvalidArgument {
                    value: current.clone(),
                    operation: "set".into(),
                    reason: "Cannot set a key on a scalar value".into(),
                })
            }
        }
        return Ok(());
    }

    match current {
        Value::Array(arr) => {
            let idx: usize = head.parse().map_err(|_| Error::InvalidArgument {
                value: Value::String((*head).into()),
                operation: "set".into(),
                reason: "Cannot index an array with a non-integer key".into(),
            })?;
            if idx >= arr.len() {
                arr.resize(idx + 1, Value::Null);
            }
            set_path(&mut arr[idx], rest, new_val)
        }
        Value::Object(map) => {
            let entry = map.entry((*head).to_string()).or_insert(Value::Null);
            set_path(entry, rest, new_val)
        }
        Value::Null => {
            let mut map = Map::new();
            map.insert((*head).into(), Value::Null);
            *current = Value::Object(map);
            set_path(current, segments, new_val)
        }
        _ => Err(Error::InvalidArgument {
            value: current.clone(),
            operation: "set".into(),
            reason: "Cannot descend into a scalar value".into(),
        }),
    }
}

#[cfg(test)]
mod test_data {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_set_deep_copies_rather_than_mutates() {
        let subject = json!({"a": {"b": 1}});
        let path = json!("a.b");
        let new_val = json!(2);
        let result = set(&vec![&subject, &path, &new_val]).unwrap();
        assert_eq!(result, json!({"a": {"b": 2}}));
        // original subject is untouched
        assert_eq!(subject, json!({"a": {"b": 1}}));
    }

    #[test]
    fn test_set_creates_intermediate_objects() {
        let subject = json!({});
        let path = json!("a.b.c");
        let new_val = json!(1);
        let result = set(&vec![&subject, &path, &new_val]).unwrap();
        assert_eq!(result, json!({"a": {"b": {"c": 1}}}));
    }
}
