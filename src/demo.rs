// Sample data for the offline demo
use crate::model::{Field, FieldType, Form, Response, StorageError};
use crate::storage::FeedbackWriter;
use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use rand::seq::IndexedRandom;
use serde_json::{json, Value};
use std::collections::BTreeMap;

pub const SAMPLE_FORM_ID: &str = "sample-1";

const SAMPLE_ANSWERS: [(i64, &str, i64); 7] = [
    (5, "Excellent product! Love the new features.", 6),
    (4, "Good overall, but could use better documentation", 5),
    (5, "Outstanding quality and customer support", 4),
    (3, "Average experience, some bugs need fixing", 3),
    (4, "Great product, minor UI improvements needed", 2),
    (5, "Perfect! Exceeds all my expectations", 1),
    (2, "Not satisfied, needs major improvements", 0),
];

const RANDOM_TEXTS: [&str; 7] = [
    "Great experience overall!",
    "Could use some improvements",
    "Excellent service, very satisfied",
    "Average experience, room for growth",
    "Outstanding quality and support",
    "Good but could be faster",
    "Terrible onboarding, I almost gave up",
];

pub fn sample_form(now: DateTime<Utc>) -> Form {
    Form {
        id: SAMPLE_FORM_ID.to_string(),
        user_id: "1".to_string(),
        title: "Product Feedback Survey".to_string(),
        description: "Help us improve our product with your valuable feedback".to_string(),
        fields: vec![
            Field::new("rating-field", FieldType::Rating, "How would you rate our product?", 1).required(),
            Field::new("feedback-field", FieldType::LongText, "What can we improve?", 2)
                .with_placeholder("Share your thoughts and suggestions..."),
            Field::new("channel-field", FieldType::SingleSelect, "How did you hear about us?", 3)
                .with_options(&["Search", "Friend", "Social media", "Other"]),
        ],
        is_active: true,
        created_at: now,
        updated_at: now,
    }
}

/// Inserts the sample form with one response per day over the last week.
pub async fn seed_sample_data(store: &dyn FeedbackWriter, now: DateTime<Utc>) -> Result<Form, StorageError> {
    let form = sample_form(now);
    store.insert_form(form.clone()).await?;

    for (i, (rating, text, days)) in SAMPLE_ANSWERS.iter().enumerate() {
        let mut answers = BTreeMap::new();
        answers.insert("rating-field".to_string(), json!(rating));
        answers.insert("feedback-field".to_string(), json!(text));
        store
            .insert_response(Response {
                id: format!("sample-response-{}", i + 1),
                form_id: form.id.clone(),
                answers,
                created_at: now - Duration::days(*days),
            })
            .await?;
    }

    Ok(form)
}

/// Random answers for every field of `form`, spread over the last 30 days.
pub fn random_responses<R: Rng + ?Sized>(form: &Form, count: usize, now: DateTime<Utc>, rng: &mut R) -> Vec<Response> {
    (0..count)
        .map(|i| {
            let answers = form
                .fields
                .iter()
                .filter_map(|field| random_answer(field, rng).map(|v| (field.id.clone(), v)))
                .collect();
            Response {
                id: format!("{}-random-{}", form.id, i + 1),
                form_id: form.id.clone(),
                answers,
                created_at: now - Duration::seconds(rng.random_range(0..30 * 24 * 3600)),
            }
        })
        .collect()
}

fn random_answer<R: Rng + ?Sized>(field: &Field, rng: &mut R) -> Option<Value> {
    // Optional fields are skipped now and then.
    if !field.required && rng.random_bool(0.25) {
        return None;
    }
    let options = field.options.as_deref().unwrap_or_default();
    match field.field_type {
        FieldType::Rating => Some(json!(rng.random_range(1..=5))),
        FieldType::Text | FieldType::LongText => RANDOM_TEXTS.choose(rng).map(|t| json!(t)),
        FieldType::SingleSelect => options.choose(rng).map(|o| json!(o)),
        FieldType::MultiSelect => {
            let picked: Vec<&String> = options.iter().filter(|_| rng.random_bool(0.5)).collect();
            Some(json!(picked))
        }
    }
}
