//! Numeric Operations

use serde_json::Value;

use crate::error::Error;
use crate::js_op;
use crate::value::to_number_value;

fn compare<F>(func: F, items: &Vec<&Value>) -> Result<Value, Error>
where
    F: Fn(&Value, &Value) -> bool,
{
    if items.len() == 2 {
        Ok(Value::Bool(func(items[0], items[1])))
    } else {
        Ok(Value::Bool(
            func(items[0], items[1]) && func(items[1], items[2]),
        ))
    }
}

/// Do < for either 2 or 3 values
pub fn lt(items: &Vec<&Value>) -> Result<Value, Error> {
    compare(js_op::abstract_lt, items)
}

/// Do <= for either 2 or 3 values
pub fn lte(items: &Vec<&Value>) -> Result<Value, Error> {
    compare(js_op::abstract_lte, items)
}

/// Do > for either 2 or 3 values
pub fn gt(items: &Vec<&Value>) -> Result<Value, Error> {
    compare(js_op::abstract_gt, items)
}

/// Do >= for either 2 or 3 values
pub fn gte(items: &Vec<&Value>) -> Result<Value, Error> {
    compare(js_op::abstract_gte, items)
}

/// Sum every item; `+ []` is `0`.
pub fn add(items: &Vec<&Value>) -> Result<Value, Error> {
    js_op::parse_float_add(items).and_then(to_number_value)
}

/// Multiply every item; `* []` is `1`.
pub fn mul(items: &Vec<&Value>) -> Result<Value, Error> {
    js_op::parse_float_mul(items).and_then(to_number_value)
}

/// Chained subtraction, unary negation, `- []` is `0`.
pub fn minus(items: &Vec<&Value>) -> Result<Value, Error> {
    js_op::chained_minus(items).and_then(to_number_value)
}

/// Chained division, `/ []` is `0`.
pub fn div(items: &Vec<&Value>) -> Result<Value, Error> {
    js_op::chained_div(items).and_then(to_number_value)
}

/// Pairwise modulo.
pub fn modulo(items: &Vec<&Value>) -> Result<Value, Error> {
    js_op::abstract_mod(items[0], items[1]).and_then(to_number_value)
}

/// Largest of the items; `max []` is `null`.
pub fn max(items: &Vec<&Value>) -> Result<Value, Error> {
    if items.is_empty() {
        return Ok(Value::Null);
    }
    js_op::abstract_max(items).and_then(to_number_value)
}

/// Smallest of the items; `min []` is `null`.
pub fn min(items: &Vec<&Value>) -> Result<Value, Error> {
    if items.is_empty() {
        return Ok(Value::Null);
    }
    js_op::abstract_min(items).and_then(to_number_value)
}

#[cfg(test)]
mod test_numeric {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_add_empty_is_zero() {
        assert_eq!(add(&vec![]).unwrap(), json!(0));
    }

    #[test]
    fn test_minus_unary_negates() {
        let five = json!(5);
        assert_eq!(minus(&vec![&five]).unwrap(), json!(-5));
    }

    #[test]
    fn test_div_empty_is_zero() {
        assert_eq!(div(&vec![]).unwrap(), json!(0));
    }

    #[test]
    fn test_max_empty_is_null() {
        assert_eq!(max(&vec![]).unwrap(), Value::Null);
    }

    #[test]
    fn test_min_empty_is_null() {
        assert_eq!(min(&vec![]).unwrap(), Value::Null);
    }

    #[test]
    fn test_integral_results_print_without_fraction() {
        let one = json!(1);
        let two = json!(1);
        assert_eq!(add(&vec![&one, &two]).unwrap(), json!(2));
    }
}
