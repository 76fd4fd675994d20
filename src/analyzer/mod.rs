// Analyzer module: aggregates submodules for the different parts of a report.

pub mod aggregate;
pub mod answers;
pub mod estimates;
pub mod field_stats;
pub mod ratings;
pub mod report;
pub mod sentiment;
pub mod time_buckets;
pub mod trends;

// Re-export the main Analyzer implementation for ease of use.
pub use aggregate::{Analyzer, AnalyzerImpl};
pub use estimates::{EngagementEstimator, PlaceholderEstimator};
pub use report::AnalyticsReport;
