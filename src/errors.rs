use std::path::PathBuf;

/// Errors surfaced by report generation.
///
/// Only [`ReportError::NoData`] is user-actionable; everything else is an
/// internal serialization failure the caller reports generically. Missing
/// foreign-key references are never errors — assemblers degrade those to
/// "Unknown" labels per row.
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("no {0} records available to report")]
    NoData(&'static str),

    #[error("spreadsheet error: {0}")]
    Spreadsheet(#[from] xlsxwriter::XlsxError),

    #[error("document error: {0}")]
    Document(#[from] lopdf::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("output path is not valid UTF-8: {}", .0.display())]
    InvalidPath(PathBuf),
}

impl ReportError {
    /// True when the report was refused because its primary collection was
    /// empty. Callers show a "nothing to report" notice for this case and a
    /// generic failure notice for everything else.
    pub fn is_no_data(&self) -> bool {
        matches!(self, Self::NoData(_))
    }

    /// Returns the message suitable for an end-user notification.
    /// Serialization failures return a generic message to avoid leaking
    /// backend detail into the UI.
    pub fn user_message(&self) -> String {
        match self {
            Self::NoData(domain) => format!("No {domain} data available to export"),
            _ => "Failed to generate report".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_data_is_distinguishable() {
        let err = ReportError::NoData("batch");
        assert!(err.is_no_data());
        assert_eq!(err.user_message(), "No batch data available to export");
    }

    #[test]
    fn serialization_failures_hide_backend_detail() {
        let err = ReportError::Io(std::io::Error::other("disk on fire"));
        assert!(!err.is_no_data());
        assert_eq!(err.user_message(), "Failed to generate report");
    }
}
