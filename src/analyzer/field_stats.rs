use crate::analyzer::answers::{canonical, is_answered};
use crate::analyzer::report::{FieldAnalytics, ValueCount};
use crate::model::{Field, Response};
use crate::utils::mean;
use serde_json::Value;
use std::collections::HashMap;

/// Distribution, most common answer and numeric mean for one field.
pub fn analyze_field(field: &Field, responses: &[Response], limit: usize) -> FieldAnalytics {
    let values: Vec<&Value> = responses
        .iter()
        .filter_map(|r| r.answer(&field.id))
        .filter(|v| is_answered(Some(*v)))
        .collect();

    let distribution = value_distribution(&values);
    let most_common_response = distribution.first().map(|entry| entry.value.clone());

    let numbers: Vec<f64> = values.iter().filter_map(|v| v.as_f64()).collect();

    FieldAnalytics {
        field_id: field.id.clone(),
        field_label: field.label.clone(),
        field_type: field.field_type,
        response_count: values.len(),
        most_common_response,
        average_value: mean(&numbers),
        response_distribution: distribution.into_iter().take(limit).collect(),
    }
}

/// Counts distinct answers in one forward pass, then orders by count descending.
/// The sort is stable, so equal counts keep first-seen order.
pub fn value_distribution(values: &[&Value]) -> Vec<ValueCount> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut entries: Vec<ValueCount> = Vec::new();

    for value in values {
        let value = canonical(value);
        let key = value.to_string();
        match index.get(&key) {
            Some(&i) => entries[i].count += 1,
            None => {
                index.insert(key, entries.len());
                entries.push(ValueCount { value, count: 1 });
            }
        }
    }

    entries.sort_by(|a, b| b.count.cmp(&a.count));
    entries
}
