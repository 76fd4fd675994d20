use crate::analyzer::ratings::{collect_ratings, raw_average};
use crate::analyzer::report::Trends;
use crate::model::{Field, Response};
use crate::utils::round2;
use chrono::{DateTime, Duration, Utc};

/// Compares the last `window_days` against the window right before it.
pub fn compute_trends(
    responses: &[Response],
    rating_fields: &[&Field],
    now: DateTime<Utc>,
    window_days: u32,
    response_rate: f64,
) -> Trends {
    let window = Duration::days(i64::from(window_days));
    let recent_start = now - window;
    let previous_start = recent_start - window;

    let recent: Vec<&Response> = responses.iter().filter(|r| r.created_at >= recent_start).collect();
    let previous: Vec<&Response> = responses
        .iter()
        .filter(|r| r.created_at >= previous_start && r.created_at < recent_start)
        .collect();

    let response_growth = growth(recent.len(), previous.len());

    let recent_avg = raw_average(&collect_ratings(rating_fields, recent.iter().copied()));
    let previous_avg = raw_average(&collect_ratings(rating_fields, previous.iter().copied()));
    let rating_trend = match (recent_avg, previous_avg) {
        (Some(r), Some(p)) => r - p,
        _ => 0.0,
    };

    Trends {
        response_growth: round2(response_growth),
        rating_trend: round2(rating_trend),
        popularity_trend: response_rate,
    }
}

/// Percent change. With no previous data, any new data counts as 100% growth.
fn growth(recent: usize, previous: usize) -> f64 {
    if previous == 0 {
        return if recent > 0 { 100.0 } else { 0.0 };
    }
    (recent as f64 - previous as f64) / previous as f64 * 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::FieldType;
    use serde_json::json;

    fn rated(id: &str, rating: i64, days_ago: i64, now: DateTime<Utc>) -> Response {
        Response {
            id: id.into(),
            form_id: "f".into(),
            answers: [("rate".to_string(), json!(rating))].into_iter().collect(),
            created_at: now - Duration::days(days_ago) - Duration::hours(1),
        }
    }

    #[test]
    fn growth_handles_empty_previous_window() {
        assert_eq!(growth(0, 0), 0.0);
        assert_eq!(growth(3, 0), 100.0);
        assert_eq!(growth(3, 2), 50.0);
        assert_eq!(growth(1, 2), -50.0);
    }

    #[test]
    fn compares_adjacent_windows() {
        let now = Utc::now();
        let field = Field::new("rate", FieldType::Rating, "Rate", 1);
        let responses = vec![
            rated("a", 5, 0, now),
            rated("b", 4, 2, now),
            rated("c", 2, 8, now),
            rated("d", 3, 20, now),
        ];
        let trends = compute_trends(&responses, &[&field], now, 7, 12.5);

        assert_eq!(trends.response_growth, 100.0);
        assert_eq!(trends.rating_trend, 2.5);
        assert_eq!(trends.popularity_trend, 12.5);
    }

    #[test]
    fn rating_trend_is_zero_when_a_window_lacks_ratings() {
        let now = Utc::now();
        let field = Field::new("rate", FieldType::Rating, "Rate", 1);
        let responses = vec![rated("a", 5, 0, now), rated("b", 9, 9, now)];
        let trends = compute_trends(&responses, &[&field], now, 7, 0.0);

        assert_eq!(trends.rating_trend, 0.0);
        assert_eq!(trends.response_growth, 0.0);
    }
}
