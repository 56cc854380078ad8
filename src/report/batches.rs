//! Batch report: one table of every batch with its headline figures.

use tracing::instrument;

use crate::entities::Batch;
use crate::errors::ReportError;

use super::{
    base_name, render, CellValue, ReportArtifact, ReportContext, ReportDocument, ReportFormat,
    Row, Section,
};

pub(crate) const DOMAIN: &str = "batch";

/// Builds the denormalized batch rows.
pub fn rows(batches: &[Batch]) -> Vec<Row> {
    batches
        .iter()
        .map(|batch| {
            vec![
                CellValue::Text(batch.name.clone()),
                CellValue::Integer(i64::from(batch.bird_count)),
                CellValue::Text(batch.status.clone()),
                CellValue::Date(batch.created_at.date_naive()),
                CellValue::notes(&batch.notes),
            ]
        })
        .collect()
}

/// Assembles and writes the batch report.
#[instrument(skip_all, fields(format = %format, batches = batches.len()))]
pub fn generate(
    ctx: &ReportContext,
    format: ReportFormat,
    batches: &[Batch],
) -> Result<ReportArtifact, ReportError> {
    if batches.is_empty() {
        return Err(ReportError::NoData(DOMAIN));
    }

    let doc = ReportDocument {
        title: "Lusoi Farm - Batch Report".to_string(),
        base_name: base_name(ctx, DOMAIN),
        sections: vec![Section {
            title: "Batches".to_string(),
            columns: vec!["Name", "Bird Count", "Status", "Created At", "Notes"],
            rows: rows(batches),
        }],
    };
    render(ctx, format, doc)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ReportConfig;
    use assert_matches::assert_matches;
    use chrono::{TimeZone, Utc};

    fn batch(id: &str, name: &str) -> Batch {
        Batch {
            id: id.to_string(),
            name: name.to_string(),
            bird_count: 500,
            status: "Laying".to_string(),
            created_at: Utc.with_ymd_and_hms(2023, 10, 1, 8, 0, 0).unwrap(),
            notes: None,
        }
    }

    #[test]
    fn rows_carry_headline_figures() {
        let built = rows(&[batch("1", "Batch A")]);
        assert_eq!(
            built,
            vec![vec![
                CellValue::Text("Batch A".into()),
                CellValue::Integer(500),
                CellValue::Text("Laying".into()),
                CellValue::Date(chrono::NaiveDate::from_ymd_opt(2023, 10, 1).unwrap()),
                CellValue::Missing,
            ]]
        );
    }

    #[test]
    fn rows_are_idempotent() {
        let batches = vec![batch("1", "Batch A"), batch("2", "Batch B")];
        assert_eq!(rows(&batches), rows(&batches));
    }

    #[test]
    fn empty_batches_refuse_to_generate() {
        let ctx = ReportContext::new(ReportConfig::default());
        let err = generate(&ctx, ReportFormat::Excel, &[]).unwrap_err();
        assert_matches!(err, ReportError::NoData("batch"));
    }
}
