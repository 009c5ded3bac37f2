//! resolve::coerce
//!
//! Loose primitive coercions.
//!
//! These follow the permissive casting rules configuration values are
//! usually written against: numeric strings become numbers, empty things
//! are false, scalars wrap into single-element arrays. None of them fail.

use serde_json::{Number, Value};

/// Boolean coercion.
///
/// False for null, `false`, zero, `""`, `"0"` and empty containers;
/// true for everything else.
pub fn boolean(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => number_is_truthy(n),
        Value::String(s) => !(s.is_empty() || s == "0"),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}

/// Integer coercion.
///
/// # Example
///
/// ```
/// use serde_json::json;
/// use svcreg::resolve::coerce;
///
/// assert_eq!(coerce::integer(&json!("12")), 12);
/// assert_eq!(coerce::integer(&json!("12abc")), 12);
/// assert_eq!(coerce::integer(&json!(3.9)), 3);
/// assert_eq!(coerce::integer(&json!(true)), 1);
/// assert_eq!(coerce::integer(&json!("abc")), 0);
/// ```
pub fn integer(value: &Value) -> i64 {
    match value {
        Value::Null => 0,
        Value::Bool(b) => i64::from(*b),
        Value::Number(n) => number_to_int(n),
        Value::String(s) => parse_leading_int(s),
        Value::Array(items) => i64::from(!items.is_empty()),
        Value::Object(map) => i64::from(!map.is_empty()),
    }
}

/// Container coercion.
///
/// Arrays and objects are returned unchanged, null becomes `[]`, any
/// other scalar is wrapped as `[scalar]`.
pub fn array(value: &Value) -> Value {
    match value {
        Value::Null => Value::Array(Vec::new()),
        Value::Array(_) | Value::Object(_) => value.clone(),
        scalar => Value::Array(vec![scalar.clone()]),
    }
}

/// String coercion.
///
/// `true` is `"1"`, `false` and null are `""`, integral floats drop their
/// fraction, containers render as compact JSON.
pub fn string(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(true) => "1".to_string(),
        Value::Bool(false) => String::new(),
        Value::Number(n) => number_to_string(n),
        Value::String(s) => s.clone(),
        Value::Array(_) | Value::Object(_) => value.to_string(),
    }
}

fn number_is_truthy(n: &Number) -> bool {
    if let Some(i) = n.as_i64() {
        i != 0
    } else if let Some(u) = n.as_u64() {
        u != 0
    } else {
        n.as_f64().is_some_and(|f| f != 0.0)
    }
}

fn number_to_int(n: &Number) -> i64 {
    if let Some(i) = n.as_i64() {
        i
    } else if n.as_u64().is_some() {
        // Only u64 values above i64::MAX reach this branch.
        i64::MAX
    } else {
        n.as_f64().map(float_to_int).unwrap_or(0)
    }
}

fn number_to_string(n: &Number) -> String {
    if let Some(i) = n.as_i64() {
        i.to_string()
    } else if let Some(u) = n.as_u64() {
        u.to_string()
    } else {
        n.as_f64().map(|f| f.to_string()).unwrap_or_default()
    }
}

/// Truncate toward zero; non-finite values become 0, the rest saturate.
fn float_to_int(f: f64) -> i64 {
    if f.is_finite() {
        f as i64
    } else {
        0
    }
}

/// Parse the longest numeric prefix after leading whitespace.
///
/// Accepts an optional sign, digits, an optional fraction and an optional
/// exponent. Anything else after the prefix is ignored; no prefix means 0.
fn parse_leading_int(input: &str) -> i64 {
    let s = input.trim_start_matches([' ', '\t', '\n', '\r', '\x0b', '\x0c']);
    let bytes = s.as_bytes();
    let mut end = 0;

    if end < bytes.len() && (bytes[end] == b'+' || bytes[end] == b'-') {
        end += 1;
    }
    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let int_digits = end - int_start;

    let mut is_float = false;
    let mut frac_digits = 0;
    if end < bytes.len() && bytes[end] == b'.' {
        let mut cursor = end + 1;
        while cursor < bytes.len() && bytes[cursor].is_ascii_digit() {
            cursor += 1;
        }
        frac_digits = cursor - end - 1;
        if int_digits > 0 || frac_digits > 0 {
            end = cursor;
            is_float = true;
        }
    }

    if int_digits == 0 && frac_digits == 0 {
        return 0;
    }

    if end < bytes.len() && (bytes[end] == b'e' || bytes[end] == b'E') {
        let mut cursor = end + 1;
        if cursor < bytes.len() && (bytes[cursor] == b'+' || bytes[cursor] == b'-') {
            cursor += 1;
        }
        let exp_start = cursor;
        while cursor < bytes.len() && bytes[cursor].is_ascii_digit() {
            cursor += 1;
        }
        if cursor > exp_start {
            end = cursor;
            is_float = true;
        }
    }

    let prefix = &s[..end];
    if is_float {
        return prefix.parse::<f64>().map(float_to_int).unwrap_or(0);
    }

    match prefix.parse::<i64>() {
        Ok(i) => i,
        Err(_) if prefix.starts_with('-') => i64::MIN,
        Err(_) => i64::MAX,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn boolean_falsy_values() {
        for value in [
            json!(null),
            json!(false),
            json!(0),
            json!(0.0),
            json!(""),
            json!("0"),
            json!([]),
            json!({}),
        ] {
            assert!(!boolean(&value), "{value} should be false");
        }
    }

    #[test]
    fn boolean_truthy_values() {
        for value in [
            json!(true),
            json!(-1),
            json!(0.5),
            json!("false"),
            json!("0.0"),
            json!(" "),
            json!([0]),
            json!({"a": null}),
        ] {
            assert!(boolean(&value), "{value} should be true");
        }
    }

    #[test]
    fn integer_from_strings() {
        assert_eq!(integer(&json!("12")), 12);
        assert_eq!(integer(&json!("  42")), 42);
        assert_eq!(integer(&json!("+5")), 5);
        assert_eq!(integer(&json!("-17px")), -17);
        assert_eq!(integer(&json!("1e3")), 1000);
        assert_eq!(integer(&json!("-4.9")), -4);
        assert_eq!(integer(&json!(".5")), 0);
        assert_eq!(integer(&json!("7.")), 7);
        assert_eq!(integer(&json!("12e")), 12);
        assert_eq!(integer(&json!("0x1A")), 0);
        assert_eq!(integer(&json!("abc")), 0);
        assert_eq!(integer(&json!("")), 0);
        assert_eq!(integer(&json!("-")), 0);
    }

    #[test]
    fn integer_saturates() {
        assert_eq!(integer(&json!("99999999999999999999999")), i64::MAX);
        assert_eq!(integer(&json!("-99999999999999999999999")), i64::MIN);
        assert_eq!(integer(&json!(u64::MAX)), i64::MAX);
        assert_eq!(integer(&json!("1e999")), 0);
    }

    #[test]
    fn integer_from_other_shapes() {
        assert_eq!(integer(&json!(null)), 0);
        assert_eq!(integer(&json!(false)), 0);
        assert_eq!(integer(&json!(true)), 1);
        assert_eq!(integer(&json!(-3.7)), -3);
        assert_eq!(integer(&json!([])), 0);
        assert_eq!(integer(&json!([1, 2])), 1);
        assert_eq!(integer(&json!({"a": 1})), 1);
    }

    #[test]
    fn array_wraps_scalars() {
        assert_eq!(array(&json!(null)), json!([]));
        assert_eq!(array(&json!("a")), json!(["a"]));
        assert_eq!(array(&json!(3)), json!([3]));
        assert_eq!(array(&json!(["a", "b"])), json!(["a", "b"]));
        assert_eq!(array(&json!({"k": "v"})), json!({"k": "v"}));
    }

    #[test]
    fn string_rendering() {
        assert_eq!(string(&json!(null)), "");
        assert_eq!(string(&json!(true)), "1");
        assert_eq!(string(&json!(false)), "");
        assert_eq!(string(&json!(12)), "12");
        assert_eq!(string(&json!(1.5)), "1.5");
        assert_eq!(string(&json!(2.0)), "2");
        assert_eq!(string(&json!("as is")), "as is");
        assert_eq!(string(&json!([1, "a"])), r#"[1,"a"]"#);
    }
}
