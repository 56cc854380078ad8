//! Lusoi Reports Library
//!
//! This crate provides the report-generation core for the Lusoi farm
//! operations suite. It joins in-memory farm entity collections (batches,
//! egg collections, feed, vaccinations, sales, customers, orders) into
//! denormalized report rows and serializes them as either a multi-sheet
//! Excel workbook or a paginated PDF document.
//!
//! The host application owns the data; every entry point here is a pure
//! function of the collections it is handed plus an injected clock. Two
//! overlapping calls share nothing but their immutable inputs.
#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]
#![warn(clippy::all, clippy::perf, clippy::dbg_macro)]

// Core modules
pub mod config;
pub mod entities;
pub mod errors;
pub mod export;
pub mod format;
pub mod report;

pub mod prelude {
    pub use crate::config::{FilenameStamp, ReportConfig};
    pub use crate::entities::*;
    pub use crate::errors::ReportError;
    pub use crate::report::{
        generate, CellValue, FarmData, ReportArtifact, ReportContext, ReportFormat, ReportKind,
        Section,
    };
}
