use std::path::PathBuf;

use serde::Deserialize;

/// Which timestamp scheme goes into generated file names.
///
/// The legacy exporters used both; date-only is the canonical default and
/// the two are interchangeable for callers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilenameStamp {
    /// `lusoi_batch_report_2023-11-01.xlsx`
    #[default]
    Date,
    /// `lusoi_batch_report_2023-11-01_14-05-09.xlsx`
    DateTime,
}

/// Report output settings, injected by the host application.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Directory the artifact files are written into.
    pub output_dir: PathBuf,
    /// Leading segment of every generated file name.
    pub file_prefix: String,
    pub filename_stamp: FilenameStamp,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            file_prefix: "lusoi".to_string(),
            filename_stamp: FilenameStamp::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sane() {
        let config = ReportConfig::default();
        assert_eq!(config.file_prefix, "lusoi");
        assert_eq!(config.filename_stamp, FilenameStamp::Date);
    }

    #[test]
    fn deserializes_from_host_settings() {
        let config: ReportConfig = serde_json::from_str(
            r#"{"output_dir":"/tmp/reports","filename_stamp":"date_time"}"#,
        )
        .unwrap();
        assert_eq!(config.output_dir, PathBuf::from("/tmp/reports"));
        assert_eq!(config.file_prefix, "lusoi");
        assert_eq!(config.filename_stamp, FilenameStamp::DateTime);
    }
}
