use crate::analyzer::answers::rating_value;
use crate::analyzer::report::{RatingCount, RatingFieldSummary};
use crate::model::{Field, Response};
use crate::utils::{mean, round2};

/// Valid ratings of the given fields, pooled, in response-then-field order.
pub fn collect_ratings<'a, I>(fields: &[&Field], responses: I) -> Vec<u8>
where
    I: IntoIterator<Item = &'a Response>,
{
    responses
        .into_iter()
        .flat_map(move |response| {
            fields
                .iter()
                .filter_map(move |field| response.answer(&field.id).and_then(rating_value))
        })
        .collect()
}

/// Always five entries, ratings 1 to 5 ascending, zero-filled.
pub fn distribution(ratings: &[u8]) -> Vec<RatingCount> {
    let mut counts = [0usize; 5];
    for &rating in ratings {
        if (1..=5).contains(&rating) {
            counts[(rating - 1) as usize] += 1;
        }
    }
    counts
        .iter()
        .enumerate()
        .map(|(i, &count)| RatingCount { rating: i as u8 + 1, count })
        .collect()
}

pub fn raw_average(ratings: &[u8]) -> Option<f64> {
    let values: Vec<f64> = ratings.iter().map(|&r| f64::from(r)).collect();
    mean(&values)
}

/// Mean rounded to two decimals, `None` when there is nothing to average.
pub fn average(ratings: &[u8]) -> Option<f64> {
    raw_average(ratings).map(round2)
}

/// Breakdown for each rating field separately, in form order.
pub fn per_field(fields: &[&Field], responses: &[Response]) -> Vec<RatingFieldSummary> {
    fields
        .iter()
        .map(|field| {
            let ratings = collect_ratings(&[*field], responses);
            RatingFieldSummary {
                field_id: field.id.clone(),
                field_label: field.label.clone(),
                average_rating: average(&ratings),
                rating_distribution: distribution(&ratings),
            }
        })
        .collect()
}
