//! String Operations

use serde_json::Value;

use crate::error::Error;
use crate::js_op;

/// Concatenate the to-string coercion of every argument.
///
/// A single argument is returned as its own to-string coercion, untouched.
/// Multiple arguments are concatenated and the final result is trimmed of
/// leading/trailing whitespace, matching the historical reference
/// implementation's behavior.
pub fn cat(items: &Vec<&Value>) -> Result<Value, Error> {
    match items.len() {
        0 => Ok(Value::String(String::new())),
        1 => Ok(Value::String(js_op::to_string(items[0]))),
        _ => {
            let mut rv = String::new();
            items.iter().for_each(|i| rv.push_str(&js_op::to_string(i)));
            Ok(Value::String(rv.trim().to_string()))
        }
    }
}

/// Extract a substring by Unicode code point, JS `String.prototype.substr`-
/// adjacent.
///
/// `from` may be negative to index from the end; if it's still negative
/// after that adjustment (or past the end of the string), the string is
/// returned unchanged rather than clamped to an empty result — preserved
/// for compatibility with the historical reference implementation, even
/// though it's a surprising contract.
pub fn substr(items: &Vec<&Value>) -> Result<Value, Error> {
    let runes: Vec<char> = js_op::to_string(items[0]).chars().collect();
    let len = runes.len() as i64;

    let mut from = js_op::to_number(items[1]) as i64;
    if from < 0 {
        from += len;
    }
    if from < 0 || from > len {
        return Ok(Value::String(runes.into_iter().collect()));
    }

    let length = if items.len() > 2 {
        js_op::to_number(items[2]) as i64
    } else {
        len
    };

    let to = if length < 0 { len + length } else { from + length };
    let to = to.min(len).max(from);

    Ok(Value::String(runes[from as usize..to as usize].iter().collect()))
}

#[cfg(test)]
mod test_string {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_cat_coerces_non_strings() {
        let one = json!(1);
        let two = json!(2);
        assert_eq!(cat(&vec![&one, &two]).unwrap(), json!("12"));
    }

    #[test]
    fn test_cat_trims_final_result() {
        let a = json!(" a ");
        let b = json!(" b ");
        assert_eq!(cat(&vec![&a, &b]).unwrap(), json!("a  b"));
    }

    #[test]
    fn test_substr_negative_from_past_start_is_unchanged() {
        let s = json!("abc");
        let from = json!(-10);
        assert_eq!(substr(&vec![&s, &from]).unwrap(), json!("abc"));
    }

    #[test]
    fn test_substr_positive_from_past_end_is_unchanged() {
        let s = json!("abc");
        let from = json!(10);
        assert_eq!(substr(&vec![&s, &from]).unwrap(), json!("abc"));
    }

    #[test]
    fn test_substr_negative_length_counts_from_end() {
        let s = json!("abcde");
        let from = json!(1);
        let length = json!(-2);
        assert_eq!(substr(&vec![&s, &from, &length]).unwrap(), json!("bc"));
    }
}
