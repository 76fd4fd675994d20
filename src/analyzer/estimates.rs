// Synthetic engagement metrics. Nothing here is measured: form views and devices are not
// tracked yet, so these formulas stand in and can be swapped through `EngagementEstimator`.
use crate::analyzer::report::DeviceAnalytics;
use crate::config::EstimateConfig;
use crate::utils::round2;

pub trait EngagementEstimator: Send + Sync {
    fn estimated_views(&self, total_responses: usize) -> u64;
    fn device_split(&self, total_responses: usize) -> DeviceAnalytics;
}

/// `views = views_base + total * views_per_response`, devices by fixed shares, floor-rounded.
pub struct PlaceholderEstimator {
    config: EstimateConfig,
}

impl PlaceholderEstimator {
    pub fn new(config: EstimateConfig) -> Self {
        Self { config }
    }
}

impl EngagementEstimator for PlaceholderEstimator {
    fn estimated_views(&self, total_responses: usize) -> u64 {
        self.config.views_base + total_responses as u64 * self.config.views_per_response
    }

    fn device_split(&self, total_responses: usize) -> DeviceAnalytics {
        let split = &self.config.device_split;
        let share = |fraction: f64| (total_responses as f64 * fraction.max(0.0)).floor() as usize;
        let mut devices = DeviceAnalytics {
            desktop: share(split.desktop),
            mobile: share(split.mobile),
            tablet: share(split.tablet),
            unknown: share(split.unknown),
            estimated: true,
        };
        cap_to_total(&mut devices, total_responses);
        devices
    }
}

/// Trims the smallest classes first until the buckets no longer exceed `total`.
fn cap_to_total(devices: &mut DeviceAnalytics, total: usize) {
    let mut excess = devices.total().saturating_sub(total);
    for bucket in [&mut devices.unknown, &mut devices.tablet, &mut devices.mobile, &mut devices.desktop] {
        let cut = excess.min(*bucket);
        *bucket -= cut;
        excess -= cut;
    }
}

/// Percentage of estimated views that turned into responses.
pub fn response_rate(estimator: &dyn EngagementEstimator, total_responses: usize) -> f64 {
    let views = estimator.estimated_views(total_responses);
    if views == 0 {
        return 0.0;
    }
    round2(total_responses as f64 / views as f64 * 100.0)
}
