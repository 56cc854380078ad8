//! Format-specific serializers. Exporters have no domain knowledge: they
//! take an assembled [`crate::report::ReportDocument`] and write bytes.

pub mod excel;
pub mod pdf;
