//! Vaccination report: administered doses, the vaccine register, and the
//! upcoming schedule as three sections of one document.

use chrono::{DateTime, Utc};
use tracing::instrument;

use crate::entities::{Batch, Vaccine, VaccinationRecord};
use crate::errors::ReportError;

use super::{
    base_name, index_by_id, label_or_unknown, render, CellValue, ReportArtifact, ReportContext,
    ReportDocument, ReportFormat, Row, Section,
};

pub(crate) const DOMAIN: &str = "vaccination";

/// Builds the administered-dose rows.
pub fn record_rows(
    records: &[VaccinationRecord],
    vaccines: &[Vaccine],
    batches: &[Batch],
) -> Vec<Row> {
    let vaccines_by_id = index_by_id(vaccines, |v| v.id.as_str());
    let batches_by_id = index_by_id(batches, |b| b.id.as_str());

    records
        .iter()
        .map(|record| {
            vec![
                CellValue::Date(record.date),
                label_or_unknown(
                    batches_by_id
                        .get(record.batch_id.as_str())
                        .map(|b| b.name.as_str()),
                    "Batch",
                ),
                label_or_unknown(
                    vaccines_by_id
                        .get(record.vaccine_id.as_str())
                        .map(|v| v.name.as_str()),
                    "Vaccine",
                ),
                CellValue::Date(record.next_scheduled_date.date_naive()),
                CellValue::notes(&record.notes),
            ]
        })
        .collect()
}

/// Builds the vaccine register rows.
pub fn vaccine_rows(vaccines: &[Vaccine]) -> Vec<Row> {
    vaccines
        .iter()
        .map(|vaccine| {
            vec![
                CellValue::Text(vaccine.name.clone()),
                CellValue::Integer(i64::from(vaccine.interval_days)),
            ]
        })
        .collect()
}

/// Builds the upcoming-schedule rows: doses whose next scheduled date is
/// strictly after `now`, ascending by due date.
pub fn upcoming_rows(
    records: &[VaccinationRecord],
    vaccines: &[Vaccine],
    batches: &[Batch],
    now: DateTime<Utc>,
) -> Vec<Row> {
    let vaccines_by_id = index_by_id(vaccines, |v| v.id.as_str());
    let batches_by_id = index_by_id(batches, |b| b.id.as_str());

    let mut upcoming: Vec<&VaccinationRecord> = records
        .iter()
        .filter(|record| record.next_scheduled_date > now)
        .collect();
    upcoming.sort_by_key(|record| record.next_scheduled_date);

    upcoming
        .into_iter()
        .map(|record| {
            vec![
                CellValue::Date(record.next_scheduled_date.date_naive()),
                label_or_unknown(
                    batches_by_id
                        .get(record.batch_id.as_str())
                        .map(|b| b.name.as_str()),
                    "Batch",
                ),
                label_or_unknown(
                    vaccines_by_id
                        .get(record.vaccine_id.as_str())
                        .map(|v| v.name.as_str()),
                    "Vaccine",
                ),
            ]
        })
        .collect()
}

/// Assembles and writes the three-section vaccination report. The
/// upcoming cutoff is the injected `ctx.generated_at`, not the wall clock.
#[instrument(skip_all, fields(format = %format, records = records.len()))]
pub fn generate(
    ctx: &ReportContext,
    format: ReportFormat,
    records: &[VaccinationRecord],
    vaccines: &[Vaccine],
    batches: &[Batch],
) -> Result<ReportArtifact, ReportError> {
    if records.is_empty() {
        return Err(ReportError::NoData(DOMAIN));
    }

    let doc = ReportDocument {
        title: "Lusoi Farm - Vaccination Report".to_string(),
        base_name: base_name(ctx, DOMAIN),
        sections: vec![
            Section {
                title: "Vaccination Records".to_string(),
                columns: vec!["Date", "Batch", "Vaccine", "Next Scheduled Date", "Notes"],
                rows: record_rows(records, vaccines, batches),
            },
            Section {
                title: "Vaccines".to_string(),
                columns: vec!["Name", "Interval (Days)"],
                rows: vaccine_rows(vaccines),
            },
            Section {
                title: "Upcoming Vaccinations".to_string(),
                columns: vec!["Due Date", "Batch", "Vaccine"],
                rows: upcoming_rows(records, vaccines, batches, ctx.generated_at),
            },
        ],
    };
    render(ctx, format, doc)
}
