//! Egg collection report: daily pickups joined to their batch, with the
//! derived whole-plus-broken total.

use tracing::instrument;

use crate::entities::{Batch, EggCollection};
use crate::errors::ReportError;

use super::{
    base_name, index_by_id, label_or_unknown, render, CellValue, ReportArtifact, ReportContext,
    ReportDocument, ReportFormat, Row, Section,
};

pub(crate) const DOMAIN: &str = "egg_collection";

/// Builds the denormalized egg-collection rows. Dangling `batch_id`s
/// degrade to an `Unknown Batch` label; the row is always kept.
pub fn rows(collections: &[EggCollection], batches: &[Batch]) -> Vec<Row> {
    let batches_by_id = index_by_id(batches, |b| b.id.as_str());

    collections
        .iter()
        .map(|collection| {
            let batch = batches_by_id
                .get(collection.batch_id.as_str())
                .map(|b| b.name.as_str());
            vec![
                CellValue::Date(collection.date),
                label_or_unknown(batch, "Batch"),
                CellValue::Integer(i64::from(collection.whole_count)),
                CellValue::Integer(i64::from(collection.broken_count)),
                CellValue::Integer(collection.total_count() as i64),
                CellValue::notes(&collection.notes),
            ]
        })
        .collect()
}

/// Assembles and writes the egg-collection report.
#[instrument(skip_all, fields(format = %format, collections = collections.len()))]
pub fn generate(
    ctx: &ReportContext,
    format: ReportFormat,
    collections: &[EggCollection],
    batches: &[Batch],
) -> Result<ReportArtifact, ReportError> {
    if collections.is_empty() {
        return Err(ReportError::NoData(DOMAIN));
    }

    let doc = ReportDocument {
        title: "Lusoi Farm - Egg Collection Report".to_string(),
        base_name: base_name(ctx, DOMAIN),
        sections: vec![Section {
            title: "Egg Collection Records".to_string(),
            columns: vec![
                "Date",
                "Batch",
                "Whole Eggs",
                "Broken Eggs",
                "Total Eggs",
                "Notes",
            ],
            rows: rows(collections, batches),
        }],
    };
    render(ctx, format, doc)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone, Utc};
    use proptest::prelude::*;

    fn batch_a() -> Batch {
        Batch {
            id: "1".to_string(),
            name: "Batch A".to_string(),
            bird_count: 500,
            status: "Laying".to_string(),
            created_at: Utc.with_ymd_and_hms(2023, 10, 1, 8, 0, 0).unwrap(),
            notes: None,
        }
    }

    fn collection(batch_id: &str, whole: u32, broken: u32) -> EggCollection {
        EggCollection {
            id: "c1".to_string(),
            batch_id: batch_id.to_string(),
            date: NaiveDate::from_ymd_opt(2023, 11, 1).unwrap(),
            whole_count: whole,
            broken_count: broken,
            notes: None,
        }
    }

    #[test]
    fn joins_batch_and_derives_total() {
        // The canonical scenario: 450 whole + 10 broken on Nov 1st.
        let built = rows(&[collection("1", 450, 10)], &[batch_a()]);
        assert_eq!(
            built,
            vec![vec![
                CellValue::Date(NaiveDate::from_ymd_opt(2023, 11, 1).unwrap()),
                CellValue::Text("Batch A".into()),
                CellValue::Integer(450),
                CellValue::Integer(10),
                CellValue::Integer(460),
                CellValue::Missing,
            ]]
        );
        assert_eq!(built[0][0].to_string(), "Nov 01, 2023");
    }

    #[test]
    fn dangling_batch_becomes_unknown_label() {
        let built = rows(&[collection("99", 10, 0)], &[batch_a()]);
        assert_eq!(built[0][1], CellValue::Text("Unknown Batch".into()));
    }

    proptest! {
        #[test]
        fn total_is_always_whole_plus_broken(whole in 0u32..10_000, broken in 0u32..10_000) {
            let built = rows(&[collection("1", whole, broken)], &[batch_a()]);
            prop_assert_eq!(
                &built[0][4],
                &CellValue::Integer(i64::from(whole) + i64::from(broken))
            );
        }
    }
}
