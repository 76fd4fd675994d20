use crate::analyzer::answers::is_answered;
use crate::analyzer::estimates::{response_rate, EngagementEstimator, PlaceholderEstimator};
use crate::analyzer::field_stats::analyze_field;
use crate::analyzer::ratings;
use crate::analyzer::report::AnalyticsReport;
use crate::analyzer::sentiment::SentimentClassifier;
use crate::analyzer::time_buckets::{self, to_local};
use crate::analyzer::trends::compute_trends;
use crate::config::AnalyticsConfig;
use crate::model::{Field, FieldType, Form, Response};
use crate::utils::round2;
use chrono::{DateTime, FixedOffset, Offset, Utc};
use serde_json::Value;
use std::sync::Arc;

/// Upper bounds for the configured windows, roughly ten years.
const MAX_WINDOW_DAYS: u32 = 3660;
const MAX_MONTH_WINDOW: u32 = 120;

/// Trait defining the interface for a response analyzer.
pub trait Analyzer: Send + Sync {
    /// Builds the full report for `form` from `responses` as of `now`.
    fn analyze(&self, form: &Form, responses: &[Response], now: DateTime<Utc>) -> AnalyticsReport;
}

/// Implementation of the response analyzer. Holds only configuration, so every call is a
/// pure function of its arguments.
pub struct AnalyzerImpl {
    config: AnalyticsConfig,
    zone: FixedOffset,
    sentiment: SentimentClassifier,
    estimator: Arc<dyn EngagementEstimator>,
}

impl AnalyzerImpl {
    pub fn new(mut config: AnalyticsConfig) -> Self {
        config.date_window_days = config.date_window_days.min(MAX_WINDOW_DAYS);
        config.trend_window_days = config.trend_window_days.min(MAX_WINDOW_DAYS);
        config.month_window = config.month_window.min(MAX_MONTH_WINDOW);

        let estimator = Arc::new(PlaceholderEstimator::new(config.estimates.clone()));
        // Offsets of a day or more are invalid; bucket in UTC then.
        let zone = FixedOffset::east_opt(config.utc_offset_minutes.saturating_mul(60))
            .unwrap_or_else(|| Utc.fix());
        Self {
            sentiment: SentimentClassifier::new(&config.sentiment),
            zone,
            config,
            estimator,
        }
    }

    pub fn with_estimator(mut self, estimator: Arc<dyn EngagementEstimator>) -> Self {
        self.estimator = estimator;
        self
    }
}

impl Analyzer for AnalyzerImpl {
    fn analyze(&self, form: &Form, responses: &[Response], now: DateTime<Utc>) -> AnalyticsReport {
        let responses = in_report_order(responses);
        let total_responses = responses.len();

        let rating_fields: Vec<&Field> = form.fields_of(|t| t == FieldType::Rating).collect();
        let text_fields: Vec<&Field> = form.fields_of(FieldType::is_text).collect();

        let pooled = ratings::collect_ratings(&rating_fields, &responses);

        // Every string answer is classified, blank ones included; only non-blank ones are quoted.
        let texts: Vec<&str> = responses
            .iter()
            .flat_map(|r| text_fields.iter().filter_map(move |f| r.answer(&f.id).and_then(Value::as_str)))
            .collect();
        let top_feedback = texts
            .iter()
            .filter(|t| !t.trim().is_empty())
            .map(|t| t.to_string())
            .take(self.config.top_feedback_limit)
            .collect();

        let local_now = to_local(&now, &self.zone);
        let stamps: Vec<DateTime<FixedOffset>> =
            responses.iter().map(|r| to_local(&r.created_at, &self.zone)).collect();

        let response_rate = response_rate(self.estimator.as_ref(), total_responses);

        AnalyticsReport {
            total_responses,
            response_rate,
            average_rating: ratings::average(&pooled),
            rating_distribution: ratings::distribution(&pooled),
            rating_fields: ratings::per_field(&rating_fields, &responses),
            top_feedback,
            responses_by_date: time_buckets::by_date(&stamps, local_now, self.config.date_window_days),
            responses_by_hour: time_buckets::by_hour(&stamps),
            responses_by_day_of_week: time_buckets::by_day_of_week(&stamps),
            responses_by_month: time_buckets::by_month(&stamps, local_now, self.config.month_window),
            field_analytics: form
                .fields
                .iter()
                .map(|f| analyze_field(f, &responses, self.config.distribution_limit))
                .collect(),
            completion_rate: completion_rate(form, &responses),
            device_analytics: self.estimator.device_split(total_responses),
            sentiment_analysis: self.sentiment.tally(texts.iter().copied()),
            trends: compute_trends(
                &responses,
                &rating_fields,
                now,
                self.config.trend_window_days,
                response_rate,
            ),
        }
    }
}

/// Newest first, ties by id, so the report does not depend on the store's return order.
fn in_report_order(responses: &[Response]) -> Vec<Response> {
    let mut ordered = responses.to_vec();
    ordered.sort_by(|a, b| b.created_at.cmp(&a.created_at).then_with(|| a.id.cmp(&b.id)));
    ordered
}

/// Share of responses answering every required field, in percent.
/// A form without required fields makes every response complete.
pub fn completion_rate(form: &Form, responses: &[Response]) -> f64 {
    if responses.is_empty() {
        return 0.0;
    }
    let required: Vec<&Field> = form.fields.iter().filter(|f| f.required).collect();
    let complete = responses
        .iter()
        .filter(|r| required.iter().all(|f| is_answered(r.answer(&f.id))))
        .count();
    round2(complete as f64 / responses.len() as f64 * 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::report::{RatingCount, SentimentCounts};
    use chrono::{Duration, TimeZone};
    use serde_json::{json, Value};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 18, 15, 0, 0).unwrap()
    }

    fn survey(fields: Vec<Field>) -> Form {
        Form {
            id: "form-1".into(),
            user_id: "user-1".into(),
            title: "Product Feedback Survey".into(),
            description: String::new(),
            fields,
            is_active: true,
            created_at: now(),
            updated_at: now(),
        }
    }

    fn response(n: usize, answers: Vec<(&str, Value)>) -> Response {
        Response {
            id: format!("resp-{:02}", n),
            form_id: "form-1".into(),
            answers: answers.into_iter().map(|(k, v)| (k.to_string(), v)).collect(),
            created_at: now() - Duration::hours(n as i64),
        }
    }

    fn analyzer() -> AnalyzerImpl {
        AnalyzerImpl::new(AnalyticsConfig::default())
    }

    #[test]
    fn empty_form_has_zero_filled_buckets() {
        let form = survey(vec![Field::new("rate", FieldType::Rating, "Rate", 1).required()]);
        let report = analyzer().analyze(&form, &[], now());

        assert_eq!(report.total_responses, 0);
        assert_eq!(report.average_rating, None);
        assert_eq!(report.completion_rate, 0.0);
        assert_eq!(report.sentiment_analysis, None);
        assert_eq!(report.responses_by_date.len(), 30);
        assert_eq!(report.responses_by_hour.len(), 24);
        assert_eq!(report.responses_by_day_of_week.len(), 7);
        assert_eq!(report.responses_by_month.len(), 12);
        assert!(report.responses_by_date.iter().all(|b| b.count == 0));
        assert_eq!(report.rating_distribution.iter().map(|c| c.count).sum::<usize>(), 0);
        assert_eq!(report.trends.response_growth, 0.0);
        assert_eq!(report.response_rate, 0.0);
    }

    #[test]
    fn rating_average_and_distribution() {
        let form = survey(vec![Field::new("rate", FieldType::Rating, "Rate", 1)]);
        let responses: Vec<Response> = [5, 4, 5, 3, 2]
            .iter()
            .enumerate()
            .map(|(i, r)| response(i, vec![("rate", json!(r))]))
            .collect();
        let report = analyzer().analyze(&form, &responses, now());

        assert_eq!(report.average_rating, Some(3.8));
        let counts: Vec<usize> = report.rating_distribution.iter().map(|c| c.count).collect();
        assert_eq!(counts, vec![0, 1, 1, 1, 2]);
        assert_eq!(report.rating_fields.len(), 1);
        assert_eq!(report.rating_fields[0].average_rating, Some(3.8));
    }

    #[test]
    fn out_of_range_ratings_are_dropped() {
        let form = survey(vec![Field::new("rate", FieldType::Rating, "Rate", 1)]);
        let responses = vec![
            response(0, vec![("rate", json!(0))]),
            response(1, vec![("rate", json!(6))]),
            response(2, vec![("rate", json!("five"))]),
            response(3, vec![("rate", json!(4))]),
        ];
        let report = analyzer().analyze(&form, &responses, now());

        assert_eq!(report.average_rating, Some(4.0));
        assert_eq!(report.rating_distribution.iter().map(|c| c.count).sum::<usize>(), 1);
        assert_eq!(report.total_responses, 4);
    }

    #[test]
    fn new_five_star_response_only_moves_the_top_bucket() {
        let form = survey(vec![Field::new("rate", FieldType::Rating, "Rate", 1)]);
        let mut responses = vec![
            response(0, vec![("rate", json!(3))]),
            response(1, vec![("rate", json!(1))]),
        ];
        let before = analyzer().analyze(&form, &responses, now()).rating_distribution;
        responses.push(response(2, vec![("rate", json!(5))]));
        let after = analyzer().analyze(&form, &responses, now()).rating_distribution;

        assert_eq!(after[4].count, before[4].count + 1);
        assert_eq!(&after[..4], &before[..4]);
        assert_eq!(after[4], RatingCount { rating: 5, count: 1 });
    }

    #[test]
    fn completion_rate_counts_required_answers() {
        let form = survey(vec![
            Field::new("comment", FieldType::Text, "Comment", 1).required(),
            Field::new("extra", FieldType::Text, "Extra", 2),
        ]);
        let responses = vec![
            response(0, vec![("comment", json!("Works"))]),
            response(1, vec![("comment", json!("Fine")), ("extra", json!("more"))]),
            response(2, vec![("comment", json!(""))]),
        ];
        assert_eq!(analyzer().analyze(&form, &responses, now()).completion_rate, 66.67);

        let optional_only = survey(vec![Field::new("extra", FieldType::Text, "Extra", 1)]);
        assert_eq!(completion_rate(&optional_only, &responses), 100.0);
    }

    #[test]
    fn sentiment_over_text_answers() {
        let form = survey(vec![Field::new("comment", FieldType::LongText, "Comment", 1)]);
        let responses = vec![
            response(0, vec![("comment", json!("I love this"))]),
            response(1, vec![("comment", json!("This is terrible"))]),
            response(2, vec![("comment", json!("It's fine"))]),
        ];
        let report = analyzer().analyze(&form, &responses, now());

        assert_eq!(
            report.sentiment_analysis,
            Some(SentimentCounts { positive: 1, neutral: 1, negative: 1 })
        );
    }

    #[test]
    fn blank_text_answers_count_as_neutral_but_are_not_quoted() {
        let form = survey(vec![Field::new("comment", FieldType::Text, "Comment", 1)]);
        let responses = vec![
            response(0, vec![("comment", json!(""))]),
            response(1, vec![("comment", json!("   "))]),
            response(2, vec![("comment", json!(""))]),
            response(3, vec![("comment", json!(null))]),
        ];
        let report = analyzer().analyze(&form, &responses, now());

        assert_eq!(
            report.sentiment_analysis,
            Some(SentimentCounts { positive: 0, neutral: 3, negative: 0 })
        );
        assert!(report.top_feedback.is_empty());
    }

    #[test]
    fn top_feedback_is_a_head_slice_newest_first() {
        let form = survey(vec![
            Field::new("a", FieldType::Text, "A", 1),
            Field::new("b", FieldType::LongText, "B", 2),
        ]);
        let responses: Vec<Response> = (0..8)
            .map(|i| response(i, vec![("a", json!(format!("a{}", i))), ("b", json!(format!("b{}", i)))]))
            .rev()
            .collect();
        let report = analyzer().analyze(&form, &responses, now());

        assert_eq!(report.top_feedback.len(), 10);
        assert_eq!(&report.top_feedback[..3], &["a0", "b0", "a1"]);
        assert_eq!(report.top_feedback[9], "b4");
    }

    #[test]
    fn report_is_independent_of_input_order() {
        let form = survey(vec![
            Field::new("rate", FieldType::Rating, "Rate", 1),
            Field::new("pick", FieldType::SingleSelect, "Pick", 2),
        ]);
        let mut responses: Vec<Response> = (0..6)
            .map(|i| response(i, vec![("rate", json!(i % 5 + 1)), ("pick", json!(if i % 2 == 0 { "x" } else { "y" }))]))
            .collect();
        let forward = analyzer().analyze(&form, &responses, now());
        responses.reverse();
        let backward = analyzer().analyze(&form, &responses, now());

        assert_eq!(forward, backward);
        assert_eq!(forward, analyzer().analyze(&form, &responses, now()));
    }

    #[test]
    fn offset_zone_shifts_hour_buckets() {
        let form = survey(vec![]);
        let responses = vec![response(0, vec![])];
        let config = AnalyticsConfig { utc_offset_minutes: -300, ..AnalyticsConfig::default() };
        let report = AnalyzerImpl::new(config).analyze(&form, &responses, now());

        assert_eq!(report.responses_by_hour[10].count, 1);
        assert_eq!(report.completion_rate, 100.0);
    }

    #[test]
    fn invalid_offset_falls_back_to_utc() {
        let config = AnalyticsConfig { utc_offset_minutes: 24 * 60, ..AnalyticsConfig::default() };
        assert_eq!(AnalyzerImpl::new(config).zone, Utc.fix());
    }

    #[test]
    fn oversized_windows_are_clamped() {
        let form = survey(vec![Field::new("rate", FieldType::Rating, "Rate", 1)]);
        let responses = vec![response(0, vec![("rate", json!(4))])];
        let config = AnalyticsConfig {
            date_window_days: u32::MAX,
            trend_window_days: u32::MAX,
            month_window: u32::MAX,
            ..AnalyticsConfig::default()
        };
        let report = AnalyzerImpl::new(config).analyze(&form, &responses, now());

        assert_eq!(report.responses_by_date.len(), MAX_WINDOW_DAYS as usize);
        assert_eq!(report.responses_by_month.len(), MAX_MONTH_WINDOW as usize);
        assert_eq!(report.responses_by_date.last().map(|b| b.count), Some(1));
        assert_eq!(report.trends.response_growth, 100.0);
    }
}
