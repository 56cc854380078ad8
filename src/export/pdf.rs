//! Paginated-document exporter: serializes a report document as a
//! multi-page A4 PDF via raw lopdf content streams.
//!
//! Layout is tracked in millimetres on a 210x297 page with a top-down
//! cursor, then converted to PDF points (origin bottom-left) when the
//! operations are emitted. Sections auto-break near the bottom of the
//! page; table bodies paginate themselves and repeat the header row after
//! each break.

use std::path::Path;

use chrono::{DateTime, Utc};
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream, StringFormat};

use crate::errors::ReportError;
use crate::report::{ReportDocument, Section};

const PAGE_WIDTH: f32 = 210.0;
const PAGE_HEIGHT: f32 = 297.0;
const MARGIN: f32 = 14.0;
const PT_PER_MM: f32 = 72.0 / 25.4;

/// A section title landing past this cursor position starts a new page.
const SECTION_BREAK_AT: f32 = 230.0;
/// Table rows never extend past this cursor position.
const BODY_BREAK_AT: f32 = 280.0;

const TITLE_SIZE: f32 = 18.0;
const SUBTITLE_SIZE: f32 = 11.0;
const SECTION_TITLE_SIZE: f32 = 14.0;
const HEADER_SIZE: f32 = 10.0;
const BODY_SIZE: f32 = 9.0;

const HEADER_ROW_HEIGHT: f32 = 8.0;
const BODY_ROW_HEIGHT: f32 = 7.0;
const CELL_PADDING: f32 = 2.0;

const BLACK: [f32; 3] = [0.0, 0.0, 0.0];
const WHITE: [f32; 3] = [1.0, 1.0, 1.0];
/// Brand header fill, RGB 60,108,64.
const BRAND_GREEN: [f32; 3] = [60.0 / 255.0, 108.0 / 255.0, 64.0 / 255.0];

const FONT_REGULAR: &str = "F1";
const FONT_BOLD: &str = "F2";

/// Writes `doc` as a PDF at `path`. The document is fully serialized to a
/// buffer before anything touches the filesystem, so a failed build never
/// leaves a partial file.
pub(crate) fn write_document(
    path: &Path,
    doc: &ReportDocument,
    generated_at: DateTime<Utc>,
) -> Result<(), ReportError> {
    let mut composer = PageComposer::new();
    composer.title_block(&doc.title, generated_at);
    for section in &doc.sections {
        composer.section(section);
    }

    let bytes = assemble(composer.finish())?;
    std::fs::write(path, bytes)?;
    Ok(())
}

/// Accumulates content-stream operations page by page, tracking a
/// top-down cursor in millimetres.
struct PageComposer {
    pages: Vec<Vec<Operation>>,
    ops: Vec<Operation>,
    cursor: f32,
}

impl PageComposer {
    fn new() -> Self {
        Self {
            pages: Vec::new(),
            ops: Vec::new(),
            cursor: MARGIN,
        }
    }

    /// Flushes the current page and resets the cursor to the top margin.
    fn new_page(&mut self) {
        self.pages.push(std::mem::take(&mut self.ops));
        self.cursor = MARGIN;
    }

    /// Closes composition and returns the per-page operation lists.
    fn finish(mut self) -> Vec<Vec<Operation>> {
        self.pages.push(self.ops);
        self.pages
    }

    /// Document title and generation timestamp, drawn once at the top of
    /// page 1.
    fn title_block(&mut self, title: &str, generated_at: DateTime<Utc>) {
        self.cursor = 20.0;
        self.text(MARGIN, self.cursor, TITLE_SIZE, FONT_BOLD, BLACK, title);
        self.cursor += 8.0;
        let subtitle = format!(
            "Generated on: {}",
            generated_at.format("%b %d, %Y %H:%M UTC")
        );
        self.text(MARGIN, self.cursor, SUBTITLE_SIZE, FONT_REGULAR, BLACK, &subtitle);
        self.cursor += 4.0;
    }

    /// Renders a section title plus its table. Starts a fresh page when
    /// the title would land in the near-bottom band.
    fn section(&mut self, section: &Section) {
        if self.cursor > SECTION_BREAK_AT {
            self.new_page();
        }
        self.cursor += 10.0;
        self.text(
            MARGIN,
            self.cursor,
            SECTION_TITLE_SIZE,
            FONT_BOLD,
            BLACK,
            &section.title,
        );
        self.cursor += 3.0;

        let column_count = section.columns.len().max(1);
        let column_width = (PAGE_WIDTH - 2.0 * MARGIN) / column_count as f32;

        self.header_row(&section.columns, column_width);
        for row in &section.rows {
            if self.cursor + BODY_ROW_HEIGHT > BODY_BREAK_AT {
                self.new_page();
                self.header_row(&section.columns, column_width);
            }
            let baseline = self.cursor + BODY_ROW_HEIGHT - 2.0;
            for (i, cell) in row.iter().enumerate() {
                let x = MARGIN + i as f32 * column_width + CELL_PADDING;
                let text = fit_text(&cell.to_string(), column_width, BODY_SIZE);
                self.text(x, baseline, BODY_SIZE, FONT_REGULAR, BLACK, &text);
            }
            self.cursor += BODY_ROW_HEIGHT;
        }
    }

    /// Brand-filled header row with white bold labels.
    fn header_row(&mut self, columns: &[&'static str], column_width: f32) {
        let table_width = PAGE_WIDTH - 2.0 * MARGIN;
        self.fill_rect(MARGIN, self.cursor, table_width, HEADER_ROW_HEIGHT, BRAND_GREEN);
        let baseline = self.cursor + HEADER_ROW_HEIGHT - 2.5;
        for (i, label) in columns.iter().enumerate() {
            let x = MARGIN + i as f32 * column_width + CELL_PADDING;
            let text = fit_text(label, column_width, HEADER_SIZE);
            self.text(x, baseline, HEADER_SIZE, FONT_BOLD, WHITE, &text);
        }
        self.cursor += HEADER_ROW_HEIGHT;
    }

    /// Emits one text run with its baseline at `y` millimetres from the
    /// page top.
    fn text(&mut self, x: f32, y: f32, size: f32, font: &str, color: [f32; 3], content: &str) {
        let [r, g, b] = color;
        self.ops.push(Operation::new("BT", vec![]));
        self.ops
            .push(Operation::new("rg", vec![r.into(), g.into(), b.into()]));
        self.ops
            .push(Operation::new("Tf", vec![font.into(), size.into()]));
        self.ops.push(Operation::new(
            "Td",
            vec![
                (x * PT_PER_MM).into(),
                ((PAGE_HEIGHT - y) * PT_PER_MM).into(),
            ],
        ));
        self.ops.push(Operation::new(
            "Tj",
            vec![Object::String(win_ansi(content), StringFormat::Literal)],
        ));
        self.ops.push(Operation::new("ET", vec![]));
    }

    /// Fills a rectangle whose top edge sits `y` millimetres from the
    /// page top.
    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32, color: [f32; 3]) {
        let [r, g, b] = color;
        self.ops
            .push(Operation::new("rg", vec![r.into(), g.into(), b.into()]));
        self.ops.push(Operation::new(
            "re",
            vec![
                (x * PT_PER_MM).into(),
                ((PAGE_HEIGHT - y - height) * PT_PER_MM).into(),
                (width * PT_PER_MM).into(),
                (height * PT_PER_MM).into(),
            ],
        ));
        self.ops.push(Operation::new("f", vec![]));
    }
}

/// Builds the final PDF object tree around the composed pages and returns
/// the serialized bytes.
fn assemble(pages: Vec<Vec<Operation>>) -> Result<Vec<u8>, ReportError> {
    let mut pdf = Document::with_version("1.5");
    let pages_id = pdf.new_object_id();

    let font_regular = pdf.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
        "Encoding" => "WinAnsiEncoding",
    });
    let font_bold = pdf.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica-Bold",
        "Encoding" => "WinAnsiEncoding",
    });
    let resources_id = pdf.add_object(dictionary! {
        "Font" => dictionary! {
            FONT_REGULAR => font_regular,
            FONT_BOLD => font_bold,
        },
    });

    let mut kids: Vec<Object> = Vec::with_capacity(pages.len());
    for operations in pages {
        let content = Content { operations };
        let stream_id = pdf.add_object(Stream::new(dictionary! {}, content.encode()?));
        let page_id = pdf.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => stream_id,
        });
        kids.push(page_id.into());
    }

    let count = kids.len() as i64;
    pdf.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
            "Resources" => resources_id,
            "MediaBox" => vec![
                0.into(),
                0.into(),
                (PAGE_WIDTH * PT_PER_MM).into(),
                (PAGE_HEIGHT * PT_PER_MM).into(),
            ],
        }),
    );
    let catalog_id = pdf.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    pdf.trailer.set("Root", catalog_id);
    pdf.compress();

    let mut bytes = Vec::new();
    pdf.save_to(&mut bytes)?;
    Ok(bytes)
}

/// Truncates cell text so it stays inside its column. Helvetica averages
/// roughly half the point size per glyph, which is close enough for a
/// report grid.
fn fit_text(text: &str, column_width: f32, size: f32) -> String {
    let usable = (column_width - 2.0 * CELL_PADDING) * PT_PER_MM;
    let max_chars = (usable / (size * 0.5)).floor() as usize;
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    if max_chars <= 3 {
        return ".".repeat(max_chars);
    }
    let kept: String = text.chars().take(max_chars - 3).collect();
    format!("{kept}...")
}

/// Encodes text for a WinAnsi-declared Type1 font. Code points outside
/// Latin-1 fall back to `?`, with the common cp1252 punctuation mapped to
/// its byte value.
fn win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match c {
            '\u{2026}' => 0x85, // ellipsis
            '\u{2018}' => 0x91,
            '\u{2019}' => 0x92,
            '\u{201C}' => 0x93,
            '\u{201D}' => 0x94,
            '\u{2013}' => 0x96, // en dash
            '\u{2014}' => 0x97, // em dash
            c if (c as u32) <= 0xFF => c as u8,
            _ => b'?',
        })
        .collect()
}
