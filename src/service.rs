use crate::analyzer::{Analyzer, AnalyzerImpl, AnalyticsReport, EngagementEstimator};
use crate::config::AnalyticsConfig;
use crate::export::AnalyticsExport;
use crate::model::{AnalyticsError, Form};
use crate::observability;
use crate::storage::{FormRepository, ResponseRepository};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use std::time::Instant;

pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Always returns the same instant. Makes repeated reports comparable.
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Entry point for the presentation layer: fetches a form and its responses and
/// recomputes the report from scratch on every call.
pub struct AnalyticsService {
    forms: Arc<dyn FormRepository>,
    responses: Arc<dyn ResponseRepository>,
    analyzer: AnalyzerImpl,
    clock: Arc<dyn Clock>,
}

impl AnalyticsService {
    pub fn new(
        forms: Arc<dyn FormRepository>,
        responses: Arc<dyn ResponseRepository>,
        config: AnalyticsConfig,
    ) -> Self {
        Self {
            forms,
            responses,
            analyzer: AnalyzerImpl::new(config),
            clock: Arc::new(SystemClock),
        }
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Replaces the placeholder view/device formulas.
    pub fn with_estimator(mut self, estimator: Arc<dyn EngagementEstimator>) -> Self {
        self.analyzer = self.analyzer.with_estimator(estimator);
        self
    }

    pub async fn compute_analytics(&self, form_id: &str) -> Result<AnalyticsReport, AnalyticsError> {
        let (_, report) = self.load_and_analyze(form_id).await?;
        Ok(report)
    }

    /// Report plus form title and export time, ready to serialize for download.
    pub async fn export(&self, form_id: &str) -> Result<AnalyticsExport, AnalyticsError> {
        let (form, report) = self.load_and_analyze(form_id).await?;
        Ok(AnalyticsExport::new(&form.title, report, self.clock.now()))
    }

    async fn load_and_analyze(&self, form_id: &str) -> Result<(Form, AnalyticsReport), AnalyticsError> {
        let started = Instant::now();
        observability::computing(form_id);

        // The response read only needs the id, so both reads run concurrently.
        let (form, responses) = futures::try_join!(
            self.forms.get_form_by_id(form_id),
            self.responses.get_responses(form_id)
        )
        .map_err(|e| {
            observability::store_failed(form_id, &e);
            AnalyticsError::StoreUnavailable(e)
        })?;

        let Some(form) = form else {
            observability::form_missing(form_id);
            return Err(AnalyticsError::NotFound(form_id.to_string()));
        };

        let report = self.analyzer.analyze(&form, &responses, self.clock.now());
        observability::report_ready(form_id, &report, started.elapsed());
        Ok((form, report))
    }
}
