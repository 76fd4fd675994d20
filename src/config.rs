use serde::Deserialize;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid config: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(tag = "backend", rename_all = "lowercase")]
pub enum StorageConfig {
    #[default]
    Memory,
    Sqlite { path: String },
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SentimentConfig {
    pub positive: Vec<String>,
    pub negative: Vec<String>,
}

fn words(list: &[&str]) -> Vec<String> {
    list.iter().map(|w| w.to_string()).collect()
}

impl Default for SentimentConfig {
    fn default() -> Self {
        Self {
            positive: words(&["good", "great", "excellent", "amazing", "love", "perfect", "wonderful", "fantastic"]),
            negative: words(&["bad", "terrible", "awful", "hate", "horrible", "worst", "disappointing"]),
        }
    }
}

/// Shares of total responses per device class. Placeholder until user agents are captured.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DeviceSplit {
    pub desktop: f64,
    pub mobile: f64,
    pub tablet: f64,
    pub unknown: f64,
}

impl Default for DeviceSplit {
    fn default() -> Self {
        Self { desktop: 0.6, mobile: 0.3, tablet: 0.08, unknown: 0.02 }
    }
}

/// Inputs of the synthetic view/device formulas. Not measured data.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EstimateConfig {
    pub views_base: u64,
    pub views_per_response: u64,
    pub device_split: DeviceSplit,
}

impl Default for EstimateConfig {
    fn default() -> Self {
        Self { views_base: 100, views_per_response: 3, device_split: DeviceSplit::default() }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AnalyticsConfig {
    /// Offset of the reference time zone used for all calendar bucketing.
    pub utc_offset_minutes: i32,
    pub date_window_days: u32,
    pub month_window: u32,
    pub trend_window_days: u32,
    pub top_feedback_limit: usize,
    pub distribution_limit: usize,
    pub sentiment: SentimentConfig,
    pub estimates: EstimateConfig,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            utc_offset_minutes: 0,
            date_window_days: 30,
            month_window: 12,
            trend_window_days: 7,
            top_feedback_limit: 10,
            distribution_limit: 10,
            sentiment: SentimentConfig::default(),
            estimates: EstimateConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub log_level: String,
    pub storage: StorageConfig,
    pub seed_demo: bool,
    pub demo_random_responses: usize,
    pub export_dir: String,
    pub analytics: AnalyticsConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            storage: StorageConfig::default(),
            seed_demo: true,
            demo_random_responses: 0,
            export_dir: "exports".to_string(),
            analytics: AnalyticsConfig::default(),
        }
    }
}

pub fn load_config(path: impl AsRef<Path>) -> Result<AppConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config: AppConfig = serde_json::from_str(&content)?;
    Ok(config)
}

/// Like [`load_config`], but a missing file yields `Ok(None)`. Any other failure,
/// unreadable file or invalid content, is still an error.
pub fn load_optional_config(path: impl AsRef<Path>) -> Result<Option<AppConfig>, ConfigError> {
    match load_config(path) {
        Ok(config) => Ok(Some(config)),
        Err(ConfigError::Io(e)) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e),
    }
}
