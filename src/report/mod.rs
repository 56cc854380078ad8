//! Report core: shared row/section types, the per-domain assemblers, and
//! the dispatch seam the host UI calls into.
//!
//! Assemblers are pure functions over the collections they are handed.
//! All wall-clock input arrives through [`ReportContext::generated_at`];
//! given identical inputs and context, an assembler yields identical cell
//! content (only file-name stamps vary with the clock).

use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use strum::{Display, EnumString};
use tracing::info;

use crate::config::{FilenameStamp, ReportConfig};
use crate::entities::{
    Batch, Customer, EggCollection, FeedConsumption, FeedInventory, FeedType, Order, Product,
    Sale, Vaccine, VaccinationRecord,
};
use crate::errors::ReportError;
use crate::export;
use crate::format;

pub mod batches;
pub mod customers;
pub mod egg_collection;
pub mod feed;
pub mod sales;
pub mod vaccination;

/// Output encoding, selected by the host UI. Parses from the selector
/// strings `"excel"` and `"pdf"`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum ReportFormat {
    Excel,
    Pdf,
}

impl ReportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            Self::Excel => "xlsx",
            Self::Pdf => "pdf",
        }
    }
}

/// Which domain report to assemble.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReportKind {
    Batches,
    EggCollection,
    Feed,
    Vaccination,
    Sales,
    Customers,
}

/// One typed report cell. The Excel exporter writes numeric variants as
/// numbers; everywhere else the `Display` form is the cell content.
#[derive(Clone, Debug, PartialEq)]
pub enum CellValue {
    Text(String),
    Integer(i64),
    /// A physical quantity (kilograms, units); rendered without grouping.
    Quantity(Decimal),
    /// A monetary amount; rendered via [`format::currency`].
    Money(Decimal),
    /// A calendar date; rendered as `Mon DD, YYYY`.
    Date(NaiveDate),
    /// An absent optional value; rendered as `-`.
    Missing,
}

impl CellValue {
    /// Text cell from an optional notes field.
    pub fn notes(notes: &Option<String>) -> Self {
        match notes {
            Some(text) if !text.is_empty() => Self::Text(text.clone()),
            _ => Self::Missing,
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.write_str(text),
            Self::Integer(value) => write!(f, "{value}"),
            Self::Quantity(value) => write!(f, "{}", value.normalize()),
            Self::Money(value) => f.write_str(&format::currency(*value)),
            Self::Date(date) => f.write_str(&format::long_date(*date)),
            Self::Missing => f.write_str("-"),
        }
    }
}

/// One row of a report table.
pub type Row = Vec<CellValue>;

/// A titled sub-table: one worksheet in a workbook, one titled table in a
/// PDF document.
#[derive(Clone, Debug, PartialEq)]
pub struct Section {
    pub title: String,
    pub columns: Vec<&'static str>,
    pub rows: Vec<Row>,
}

/// Assembled report content handed to an exporter.
#[derive(Clone, Debug, PartialEq)]
pub struct ReportDocument {
    /// Document title, e.g. `Lusoi Farm - Batch Report`.
    pub title: String,
    /// File-name stem without stamp or extension,
    /// e.g. `lusoi_batch_report`.
    pub base_name: String,
    pub sections: Vec<Section>,
}

/// Explicitly injected clock and output settings.
#[derive(Clone, Debug)]
pub struct ReportContext {
    pub config: ReportConfig,
    /// The "current moment" for this call: file-name stamps, the PDF
    /// subtitle, and the upcoming-vaccination cutoff all read this.
    pub generated_at: DateTime<Utc>,
}

impl ReportContext {
    pub fn new(config: ReportConfig) -> Self {
        Self {
            config,
            generated_at: Utc::now(),
        }
    }

    pub fn with_generated_at(mut self, at: DateTime<Utc>) -> Self {
        self.generated_at = at;
        self
    }
}

/// What a successful generation wrote.
#[derive(Clone, Debug)]
pub struct ReportArtifact {
    pub path: PathBuf,
    pub format: ReportFormat,
    pub sections: usize,
    pub rows: usize,
}

/// Borrowed views of the host application's entity collections. The host
/// fills in whatever the requested report needs; unrelated collections can
/// stay empty.
#[derive(Clone, Copy, Debug, Default)]
pub struct FarmData<'a> {
    pub batches: &'a [Batch],
    pub egg_collections: &'a [EggCollection],
    pub feed_types: &'a [FeedType],
    pub feed_consumption: &'a [FeedConsumption],
    pub feed_inventory: &'a [FeedInventory],
    pub vaccines: &'a [Vaccine],
    pub vaccination_records: &'a [VaccinationRecord],
    pub products: &'a [Product],
    pub sales: &'a [Sale],
    pub customers: &'a [Customer],
    pub orders: &'a [Order],
}

/// Assembles the requested domain report and writes it in the requested
/// format. This is the single entry point the host UI dispatches to.
pub fn generate(
    ctx: &ReportContext,
    kind: ReportKind,
    format: ReportFormat,
    data: &FarmData<'_>,
) -> Result<ReportArtifact, ReportError> {
    match kind {
        ReportKind::Batches => batches::generate(ctx, format, data.batches),
        ReportKind::EggCollection => {
            egg_collection::generate(ctx, format, data.egg_collections, data.batches)
        }
        ReportKind::Feed => feed::generate(
            ctx,
            format,
            data.feed_consumption,
            data.feed_inventory,
            data.feed_types,
            data.batches,
        ),
        ReportKind::Vaccination => vaccination::generate(
            ctx,
            format,
            data.vaccination_records,
            data.vaccines,
            data.batches,
        ),
        ReportKind::Sales => {
            sales::generate(ctx, format, data.sales, data.customers, data.products)
        }
        ReportKind::Customers => {
            customers::generate(ctx, format, data.customers, data.sales, data.orders)
        }
    }
}

/// Serializes an assembled document through the chosen exporter and
/// returns the written artifact.
pub(crate) fn render(
    ctx: &ReportContext,
    format: ReportFormat,
    doc: ReportDocument,
) -> Result<ReportArtifact, ReportError> {
    let stamp = match ctx.config.filename_stamp {
        FilenameStamp::Date => format::file_date(ctx.generated_at),
        FilenameStamp::DateTime => format::file_timestamp(ctx.generated_at),
    };
    let file_name = format!("{}_{}.{}", doc.base_name, stamp, format.extension());
    let path = ctx.config.output_dir.join(file_name);

    match format {
        ReportFormat::Excel => export::excel::write_workbook(&path, &doc)?,
        ReportFormat::Pdf => export::pdf::write_document(&path, &doc, ctx.generated_at)?,
    }

    let rows = doc.sections.iter().map(|s| s.rows.len()).sum();
    info!(
        path = %path.display(),
        sections = doc.sections.len(),
        rows,
        "report written"
    );
    Ok(ReportArtifact {
        path,
        format,
        sections: doc.sections.len(),
        rows,
    })
}

/// Builds the file-name stem `{prefix}_{domain}_report`.
pub(crate) fn base_name(ctx: &ReportContext, domain: &str) -> String {
    format!("{}_{}_report", ctx.config.file_prefix, domain)
}

/// Indexes a collection by string id for foreign-key joins.
pub(crate) fn index_by_id<'a, T, F>(items: &'a [T], id: F) -> HashMap<&'a str, &'a T>
where
    F: Fn(&'a T) -> &'a str,
{
    items.iter().map(|item| (id(item), item)).collect()
}

/// Joins a foreign key to its display name, degrading to a literal
/// `Unknown <entity>` label when the id is dangling. Never fails, never
/// drops the row.
pub(crate) fn label_or_unknown(name: Option<&str>, entity: &str) -> CellValue {
    match name {
        Some(name) => CellValue::Text(name.to_string()),
        None => CellValue::Text(format!("Unknown {entity}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use std::str::FromStr;

    #[test]
    fn format_parses_ui_selector_strings() {
        assert_eq!(ReportFormat::from_str("excel").unwrap(), ReportFormat::Excel);
        assert_eq!(ReportFormat::from_str("pdf").unwrap(), ReportFormat::Pdf);
        assert!(ReportFormat::from_str("csv").is_err());
        assert_eq!(ReportFormat::Excel.extension(), "xlsx");
    }

    #[test]
    fn cell_display_forms() {
        assert_eq!(CellValue::Text("Batch A".into()).to_string(), "Batch A");
        assert_eq!(CellValue::Integer(460).to_string(), "460");
        assert_eq!(CellValue::Quantity(dec!(12.50)).to_string(), "12.5");
        assert_eq!(CellValue::Money(dec!(1250)).to_string(), "1,250.00");
        assert_eq!(
            CellValue::Date(NaiveDate::from_ymd_opt(2023, 11, 1).unwrap()).to_string(),
            "Nov 01, 2023"
        );
        assert_eq!(CellValue::Missing.to_string(), "-");
    }

    #[test]
    fn notes_cell_treats_empty_as_missing() {
        assert_eq!(CellValue::notes(&None), CellValue::Missing);
        assert_eq!(CellValue::notes(&Some(String::new())), CellValue::Missing);
        assert_eq!(
            CellValue::notes(&Some("treated".into())),
            CellValue::Text("treated".into())
        );
    }

    #[test]
    fn unknown_labels_are_domain_specific() {
        assert_eq!(
            label_or_unknown(None, "Batch"),
            CellValue::Text("Unknown Batch".into())
        );
        assert_eq!(
            label_or_unknown(Some("Layers Mash"), "Feed Type"),
            CellValue::Text("Layers Mash".into())
        );
    }
}
