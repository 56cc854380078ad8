//! Feed management report: consumption, store inventory, and the feed
//! type register as three sections of one document.

use tracing::instrument;

use crate::entities::{Batch, FeedConsumption, FeedInventory, FeedType};
use crate::errors::ReportError;

use super::{
    base_name, index_by_id, label_or_unknown, render, CellValue, ReportArtifact, ReportContext,
    ReportDocument, ReportFormat, Row, Section,
};

pub(crate) const DOMAIN: &str = "feed";

/// Builds the feed-consumption rows. `batch_id: None` renders as `-`;
/// a dangling id degrades to `Unknown Batch`.
pub fn consumption_rows(
    consumption: &[FeedConsumption],
    feed_types: &[FeedType],
    batches: &[Batch],
) -> Vec<Row> {
    let feed_types_by_id = index_by_id(feed_types, |t| t.id.as_str());
    let batches_by_id = index_by_id(batches, |b| b.id.as_str());

    consumption
        .iter()
        .map(|record| {
            let feed_type = feed_types_by_id
                .get(record.feed_type_id.as_str())
                .map(|t| t.name.as_str());
            let batch_cell = match &record.batch_id {
                None => CellValue::Missing,
                Some(id) => label_or_unknown(
                    batches_by_id.get(id.as_str()).map(|b| b.name.as_str()),
                    "Batch",
                ),
            };
            vec![
                CellValue::Date(record.date),
                label_or_unknown(feed_type, "Feed Type"),
                batch_cell,
                CellValue::Quantity(record.quantity_kg),
                CellValue::notes(&record.notes),
            ]
        })
        .collect()
}

/// Builds the store-inventory rows.
pub fn inventory_rows(inventory: &[FeedInventory], feed_types: &[FeedType]) -> Vec<Row> {
    let feed_types_by_id = index_by_id(feed_types, |t| t.id.as_str());

    inventory
        .iter()
        .map(|record| {
            let feed_type = feed_types_by_id
                .get(record.feed_type_id.as_str())
                .map(|t| t.name.as_str());
            vec![
                CellValue::Date(record.date),
                label_or_unknown(feed_type, "Feed Type"),
                CellValue::Quantity(record.quantity_kg),
                CellValue::notes(&record.notes),
            ]
        })
        .collect()
}

/// Builds the feed type register rows.
pub fn feed_type_rows(feed_types: &[FeedType]) -> Vec<Row> {
    feed_types
        .iter()
        .map(|feed_type| {
            vec![
                CellValue::Text(feed_type.name.clone()),
                CellValue::Text(feed_type.bird_type.clone()),
                CellValue::notes(&feed_type.description),
            ]
        })
        .collect()
}

/// Assembles and writes the three-section feed report. Consumption is the
/// primary collection; the inventory and register sections may be empty.
#[instrument(skip_all, fields(format = %format, consumption = consumption.len()))]
pub fn generate(
    ctx: &ReportContext,
    format: ReportFormat,
    consumption: &[FeedConsumption],
    inventory: &[FeedInventory],
    feed_types: &[FeedType],
    batches: &[Batch],
) -> Result<ReportArtifact, ReportError> {
    if consumption.is_empty() {
        return Err(ReportError::NoData(DOMAIN));
    }

    let doc = ReportDocument {
        title: "Lusoi Farm - Feed Management Report".to_string(),
        base_name: base_name(ctx, DOMAIN),
        sections: vec![
            Section {
                title: "Feed Consumption".to_string(),
                columns: vec!["Date", "Feed Type", "Batch", "Quantity (Kg)", "Notes"],
                rows: consumption_rows(consumption, feed_types, batches),
            },
            Section {
                title: "Feed Inventory".to_string(),
                columns: vec!["Date", "Feed Type", "Quantity (Kg)", "Notes"],
                rows: inventory_rows(inventory, feed_types),
            },
            Section {
                title: "Feed Types".to_string(),
                columns: vec!["Name", "Bird Type", "Description"],
                rows: feed_type_rows(feed_types),
            },
        ],
    };
    render(ctx, format, doc)
}
