// Interpretation of raw answer values
use serde_json::Value;

/// Absent, null, blank strings and empty selections count as unanswered.
pub fn is_answered(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::String(s)) => !s.trim().is_empty(),
        Some(Value::Array(items)) => !items.is_empty(),
        Some(_) => true,
    }
}

/// A rating is a whole number from 1 to 5. `4.0` is accepted, `4.5` and `"4"` are not.
pub fn rating_value(value: &Value) -> Option<u8> {
    let n = value.as_f64()?;
    if n.fract() != 0.0 || !(1.0..=5.0).contains(&n) {
        return None;
    }
    Some(n as u8)
}

/// Canonical form used to compare answers structurally: integral numbers lose their
/// fractional part and selections compare as sets.
pub fn canonical(value: &Value) -> Value {
    match value {
        Value::Number(n) => match n.as_f64() {
            Some(f) if f.fract() == 0.0 && f.abs() < 9.0e15 => Value::from(f as i64),
            _ => value.clone(),
        },
        Value::Array(items) => {
            let mut items: Vec<Value> = items.iter().map(canonical).collect();
            items.sort_by_cached_key(|v| v.to_string());
            items.dedup();
            Value::Array(items)
        }
        _ => value.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn unanswered_shapes() {
        assert!(!is_answered(None));
        assert!(!is_answered(Some(&Value::Null)));
        assert!(!is_answered(Some(&json!(""))));
        assert!(!is_answered(Some(&json!("   "))));
        assert!(!is_answered(Some(&json!([]))));
        assert!(is_answered(Some(&json!("ok"))));
        assert!(is_answered(Some(&json!(0))));
        assert!(is_answered(Some(&json!(["a"]))));
    }

    #[test]
    fn ratings_outside_range_or_fractional_are_rejected() {
        assert_eq!(rating_value(&json!(5)), Some(5));
        assert_eq!(rating_value(&json!(1.0)), Some(1));
        assert_eq!(rating_value(&json!(0)), None);
        assert_eq!(rating_value(&json!(6)), None);
        assert_eq!(rating_value(&json!(4.5)), None);
        assert_eq!(rating_value(&json!("4")), None);
        assert_eq!(rating_value(&json!(-3)), None);
    }

    #[test]
    fn selections_compare_as_sets() {
        assert_eq!(canonical(&json!(["b", "a"])), canonical(&json!(["a", "b", "a"])));
        assert_ne!(canonical(&json!(["a"])), canonical(&json!(["a", "b"])));
        assert_eq!(canonical(&json!(4.0)), json!(4));
        assert_eq!(canonical(&json!(2.5)), json!(2.5));
    }
}
