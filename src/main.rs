use chrono::Utc;
use feedback_analytics::config::{load_optional_config, AppConfig};
use feedback_analytics::demo::{random_responses, seed_sample_data};
use feedback_analytics::model::AnalyticsError;
use feedback_analytics::observability::init_logging;
use feedback_analytics::service::AnalyticsService;
use feedback_analytics::storage::{open_store, Store};
use std::path::Path;
use tracing::{error, info, warn};

const DEFAULT_CONFIG: &str = "config.json";

#[tokio::main]
async fn main() {
    let config_path = std::env::args().nth(1).unwrap_or_else(|| DEFAULT_CONFIG.to_string());

    // Load configuration from file; only a missing file falls back to defaults
    let (config, from_file) = match load_optional_config(&config_path) {
        Ok(Some(cfg)) => (cfg, true),
        Ok(None) => (AppConfig::default(), false),
        Err(e) => {
            init_logging("info");
            error!("Failed to load config {}: {}", config_path, e);
            return;
        }
    };

    init_logging(&config.log_level);
    if !from_file {
        warn!("Config file {} not found, using defaults", config_path);
    }

    let store = match open_store(&config.storage) {
        Ok(s) => s,
        Err(e) => {
            error!("Failed to initialize storage: {}", e);
            return;
        }
    };
    info!("Storage backend: {}", store.backend_name());

    if config.seed_demo {
        if let Err(e) = seed(&store, &config).await {
            error!("Failed to seed demo data: {}", e);
            return;
        }
    }

    let service = AnalyticsService::new(store.forms(), store.responses(), config.analytics.clone());

    let forms = match store.forms().list_forms(None).await {
        Ok(forms) => forms,
        Err(e) => {
            error!("Failed to list forms: {}", e);
            return;
        }
    };
    info!("Forms to analyze: {}", forms.len());

    for form in forms {
        match service.export(&form.id).await {
            Ok(export) => {
                info!(
                    "{}: {} responses, avg rating {:?}, completion {:.2}%",
                    form.title,
                    export.analytics.total_responses,
                    export.analytics.average_rating,
                    export.analytics.completion_rate
                );
                match export.write_to_dir(Path::new(&config.export_dir)) {
                    Ok(path) => info!("Saved export: {}", path.display()),
                    Err(e) => warn!("Failed to write export for {}: {}", form.id, e),
                }
            }
            // Deleted between listing and reading.
            Err(AnalyticsError::NotFound(_)) => continue,
            Err(e) => warn!("Analytics failed for {}: {}", form.id, e),
        }
    }
}

/// Inserts the sample form and, if configured, extra random responses for it.
async fn seed(store: &Store, config: &AppConfig) -> Result<(), feedback_analytics::StorageError> {
    let writer = store.writer();
    let now = Utc::now();
    let form = seed_sample_data(writer.as_ref(), now).await?;

    let extra = random_responses(&form, config.demo_random_responses, now, &mut rand::rng());
    info!("Seeding sample form '{}' with {} extra responses", form.title, extra.len());
    for response in extra {
        writer.insert_response(response).await?;
    }
    Ok(())
}
