use serde_json::Value;

/// Returns true for values the nested-override export must skip entirely.
///
/// The save payload contract treats `null` and the empty string as "no
/// value here": removal is expressed by an `unset` op, never by writing an
/// empty scalar into the nested tree.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use pipedash_util::is_blank_value;
///
/// assert!(is_blank_value(&json!(null)));
/// assert!(is_blank_value(&json!("")));
/// assert!(!is_blank_value(&json!(0)));
/// assert!(!is_blank_value(&json!(false)));
/// ```
pub fn is_blank_value(v: &Value) -> bool {
    match v {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn null_is_blank() {
        assert!(is_blank_value(&json!(null)));
    }

    #[test]
    fn empty_string_is_blank() {
        assert!(is_blank_value(&json!("")));
    }

    #[test]
    fn zero_and_false_are_not_blank() {
        assert!(!is_blank_value(&json!(0)));
        assert!(!is_blank_value(&json!(false)));
    }

    #[test]
    fn empty_containers_are_not_blank() {
        assert!(!is_blank_value(&json!([])));
        assert!(!is_blank_value(&json!({})));
    }
}
