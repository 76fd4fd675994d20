// JSON export of a report, as offered for download next to the dashboard
use crate::analyzer::AnalyticsReport;
use crate::utils::file_stem;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Serialize, Serializer};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("cannot serialize export: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("cannot write export: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsExport {
    /// Form title.
    pub form: String,
    pub analytics: AnalyticsReport,
    #[serde(serialize_with = "iso_millis")]
    pub exported_at: DateTime<Utc>,
}

fn iso_millis<S: Serializer>(at: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&at.to_rfc3339_opts(SecondsFormat::Millis, true))
}

impl AnalyticsExport {
    pub fn new(form_title: &str, analytics: AnalyticsReport, exported_at: DateTime<Utc>) -> Self {
        Self {
            form: form_title.to_string(),
            analytics,
            exported_at,
        }
    }

    pub fn to_json_pretty(&self) -> Result<String, ExportError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// `<title>_analytics.json`, with the title reduced to a safe single path component.
    pub fn file_name(&self) -> String {
        format!("{}_analytics.json", file_stem(&self.form))
    }

    /// Writes the export into `dir`, creating it if needed, and returns the file path.
    pub fn write_to_dir(&self, dir: &Path) -> Result<PathBuf, ExportError> {
        fs::create_dir_all(dir)?;
        let path = dir.join(self.file_name());
        fs::write(&path, self.to_json_pretty()?)?;
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::{Analyzer, AnalyzerImpl};
    use crate::config::AnalyticsConfig;
    use crate::model::Form;
    use chrono::TimeZone;
    use serde_json::Value;

    fn export() -> AnalyticsExport {
        titled("Product  Feedback Survey")
    }

    fn titled(title: &str) -> AnalyticsExport {
        let now = Utc.with_ymd_and_hms(2025, 5, 1, 8, 30, 0).unwrap();
        let form = Form {
            id: "f".into(),
            user_id: "u".into(),
            title: title.into(),
            description: String::new(),
            fields: vec![],
            is_active: true,
            created_at: now,
            updated_at: now,
        };
        let report = AnalyzerImpl::new(AnalyticsConfig::default()).analyze(&form, &[], now);
        AnalyticsExport::new(&form.title, report, now)
    }

    #[test]
    fn json_has_form_analytics_and_timestamp() {
        let json: Value = serde_json::from_str(&export().to_json_pretty().unwrap()).unwrap();
        assert_eq!(json["form"], "Product  Feedback Survey");
        assert_eq!(json["exportedAt"], "2025-05-01T08:30:00.000Z");
        assert_eq!(json["analytics"]["totalResponses"], 0);
        assert_eq!(json["analytics"]["responsesByDate"].as_array().unwrap().len(), 30);
        assert_eq!(json["analytics"]["responsesByDate"][29]["date"], "2025-05-01");
        assert!(json["analytics"].get("averageRating").is_none());
        assert!(json["analytics"].get("sentimentAnalysis").is_none());
        assert_eq!(json["analytics"]["deviceAnalytics"]["estimated"], true);
    }

    #[test]
    fn writes_named_file() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("exports");
        let path = export().write_to_dir(&target).unwrap();

        assert_eq!(path.file_name().unwrap(), "Product_Feedback_Survey_analytics.json");
        let written: Value = serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap();
        assert_eq!(written["form"], "Product  Feedback Survey");
    }

    #[test]
    fn hostile_titles_stay_inside_the_export_dir() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("a").join("exports");

        for title in ["../../escaped", "Q1/Q2 review", "/etc/passwd"] {
            let path = titled(title).write_to_dir(&target).unwrap();
            assert_eq!(path.parent(), Some(target.as_path()));
            assert!(path.is_file());
        }
        assert_eq!(fs::read_dir(&target).unwrap().count(), 3);
        assert!(!dir.path().join("escaped_analytics.json").exists());
    }
}
