// Output types of one analytics computation. Serialized as camelCase JSON for dashboards and exports.
use crate::model::FieldType;
use chrono::NaiveDate;
use serde::Serialize;
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsReport {
    pub total_responses: usize,
    /// Estimate: responses over synthetic view count, see `EngagementEstimator`.
    pub response_rate: f64,
    /// Mean of all valid ratings pooled across every rating field.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub average_rating: Option<f64>,
    pub rating_distribution: Vec<RatingCount>,
    pub rating_fields: Vec<RatingFieldSummary>,
    /// First text answers in response order. Not ranked.
    pub top_feedback: Vec<String>,
    pub responses_by_date: Vec<DateCount>,
    pub responses_by_hour: Vec<HourCount>,
    pub responses_by_day_of_week: Vec<DayCount>,
    pub responses_by_month: Vec<MonthCount>,
    pub field_analytics: Vec<FieldAnalytics>,
    pub completion_rate: f64,
    pub device_analytics: DeviceAnalytics,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sentiment_analysis: Option<SentimentCounts>,
    pub trends: Trends,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RatingCount {
    pub rating: u8,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingFieldSummary {
    pub field_id: String,
    pub field_label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub average_rating: Option<f64>,
    pub rating_distribution: Vec<RatingCount>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateCount {
    pub date: NaiveDate,
    pub count: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HourCount {
    pub hour: u32,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayCount {
    pub day: &'static str,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthCount {
    /// `YYYY-MM`
    pub month: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValueCount {
    pub value: Value,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldAnalytics {
    pub field_id: String,
    pub field_label: String,
    pub field_type: FieldType,
    pub response_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub most_common_response: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub average_value: Option<f64>,
    pub response_distribution: Vec<ValueCount>,
}

/// Synthetic split of total responses. `estimated` is always true until user agents are tracked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DeviceAnalytics {
    pub desktop: usize,
    pub mobile: usize,
    pub tablet: usize,
    pub unknown: usize,
    pub estimated: bool,
}

impl DeviceAnalytics {
    pub fn total(&self) -> usize {
        self.desktop + self.mobile + self.tablet + self.unknown
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SentimentCounts {
    pub positive: usize,
    pub neutral: usize,
    pub negative: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Trends {
    pub response_growth: f64,
    pub rating_trend: f64,
    /// Same value as `response_rate`, kept for dashboard compatibility.
    pub popularity_trend: f64,
}
