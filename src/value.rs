use serde_json::{Number, Value};

use crate::error::Error;
use crate::op::{LazyOperation, Operation, UserOperation};
use crate::{data, Parser};

/// Turn an `f64` arithmetic result into a JSON number, printing it without
/// a fractional component when the value is integral.
///
/// `{"+": [1, 1]}` must evaluate to `2`, not `2.0` — `serde_json`'s default
/// `Number::from_f64` would otherwise print a trailing `.0` for any float,
/// even an integral one.
pub fn to_number_value(value: f64) -> Result<Value, Error> {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 9.007_199_254_740_992e15 {
        Ok(Value::Number((value as i64).into()))
    } else {
        Number::from_f64(value)
            .ok_or_else(|| {
                Error::UnexpectedError(format!("could not convert {} into a JSON number", value))
            })
            .map(Value::Number)
    }
}

/// A Parsed JSON value
///
/// Parsed values are one of:
///   - A rule: a valid JSONLogic rule which can be evaluated
///   - A raw value: a non-rule, raw JSON value
#[derive(Debug)]
pub enum Parsed<'a> {
    Operation(Operation<'a>),
    LazyOperation(LazyOperation<'a>),
    UserOperation(UserOperation<'a>),
    Raw(data::Raw<'a>),
    Variable(data::Variable<'a>),
    Missing(data::Missing<'a>),
    MissingSome(data::MissingSome<'a>),
}
impl<'a> Parsed<'a> {
    /// Recursively parse a value
    pub fn from_value(value: &'a Value) -> Result<Self, Error> {
        data::Variable::from_value(value)?
            .map(Self::Variable)
            .or(data::Missing::from_value(value)?.map(Self::Missing))
            .or(data::MissingSome::from_value(value)?.map(Self::MissingSome))
            .or(Operation::from_value(value)?.map(Self::Operation))
            .or(LazyOperation::from_value(value)?.map(Self::LazyOperation))
            .or(UserOperation::from_value(value)?.map(Self::UserOperation))
            .or(data::Raw::from_value(value)?.map(Self::Raw))
            .ok_or_else(|| match value {
                Value::Object(obj) if obj.len() == 1 => Error::UnknownOperator(
                    obj.keys().next().expect("checked len == 1 above").clone(),
                ),
                _ => Error::UnexpectedError(format!("Failed to parse Value {:?}", value)),
            })
    }

    pub fn from_values(values: Vec<&'a Value>) -> Result<Vec<Self>, Error> {
        values
            .into_iter()
            .map(Self::from_value)
            .collect::<Result<Vec<Self>, Error>>()
    }

    pub fn evaluate(&self, data: &Value) -> Result<Evaluated<'_>, Error> {
        match self {
            Self::Operation(op) => op.evaluate(data),
            Self::LazyOperation(op) => op.evaluate(data),
            Self::UserOperation(op) => op.evaluate(data),
            Self::Raw(val) => val.evaluate(data),
            Self::Variable(var) => var.evaluate(data),
            Self::Missing(missing) => missing.evaluate(data),
            Self::MissingSome(missing) => missing.evaluate(data),
        }
    }
}
impl From<Parsed<'_>> for Value {
    fn from(item: Parsed) -> Value {
        match item {
            Parsed::Operation(op) => Value::from(op),
            Parsed::LazyOperation(op) => Value::from(op),
            Parsed::UserOperation(op) => Value::from(op),
            Parsed::Raw(raw) => Value::from(raw),
            Parsed::Variable(var) => Value::from(var),
            Parsed::Missing(missing) => Value::from(missing),
            Parsed::MissingSome(missing) => Value::from(missing),
        }
    }
}

/// An Evaluated JSON value
///
/// An evaluated value is one of:
///   - A new value: either a calculated Rule or a filled Variable
///   - A raw value: a non-rule, raw JSON value
#[derive(Debug)]
pub enum Evaluated<'a> {
    New(Value),
    Raw(&'a Value),
}

impl From<Evaluated<'_>> for Value {
    fn from(item: Evaluated) -> Self {
        match item {
            Evaluated::Raw(val) => val.clone(),
            Evaluated::New(val) => val,
        }
    }
}

#[cfg(test)]
mod test_to_number_value {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_integral_floats_print_without_fraction() {
        assert_eq!(to_number_value(2.0).unwrap(), json!(2));
        assert_eq!(to_number_value(-3.0).unwrap(), json!(-3));
    }

    #[test]
    fn test_fractional_floats_are_preserved() {
        assert_eq!(to_number_value(2.5).unwrap(), json!(2.5));
    }
}
