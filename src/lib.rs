//! Response analytics for feedback forms.
//!
//! [`service::AnalyticsService`] reads a form and its responses through the repository
//! traits in [`storage`] and turns them into an [`analyzer::AnalyticsReport`]: rating
//! averages and distributions, time-bucketed counts, completion rate, keyword sentiment
//! and week-over-week trends.

pub mod analyzer;
pub mod config;
pub mod demo;
pub mod export;
pub mod model;
pub mod observability;
pub mod service;
pub mod storage;
pub mod utils;

pub use analyzer::AnalyticsReport;
pub use model::{AnalyticsError, Field, FieldType, Form, Response, StorageError};
pub use service::AnalyticsService;
