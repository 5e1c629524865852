//! PDF export.
//!
//! Lays the ledger out as a gridded table on landscape US-letter pages.
//! Layout coordinates are millimetres measured from the bottom-left corner
//! of the page, as printpdf expects.

#![allow(clippy::float_arithmetic)]

use printpdf::path::PaintMode;
use printpdf::{
    BuiltinFont, Color, IndirectFontRef, Line, Mm, PdfDocument, PdfDocumentReference,
    PdfLayerReference, Point, Rect, Rgb,
};

use super::{
    ExportError, HEADERS, OPENING_BALANCE_LABEL, SHEET_TITLE, SheetRow, entry_cells,
    format_amount, group_heading, sheet_rows,
};
use crate::reports::LedgerReport;

const MM_PER_INCH: f32 = 25.4;
const MM_PER_POINT: f32 = MM_PER_INCH / 72.0;

const PAGE_WIDTH: f32 = 11.0 * MM_PER_INCH;
const PAGE_HEIGHT: f32 = 8.5 * MM_PER_INCH;
const MARGIN_X: f32 = 0.75 * MM_PER_INCH;
const MARGIN_Y: f32 = 0.5 * MM_PER_INCH;

const COLUMN_WIDTHS: [f32; 6] = [
    1.2 * MM_PER_INCH,
    1.2 * MM_PER_INCH,
    2.5 * MM_PER_INCH,
    0.8 * MM_PER_INCH,
    0.8 * MM_PER_INCH,
    1.0 * MM_PER_INCH,
];
const DESCRIPTION_COLUMN: usize = 2;

const TITLE_SIZE: f32 = 14.0;
const HEADER_SIZE: f32 = 12.0;
const BODY_SIZE: f32 = 10.0;
const BODY_LEADING: f32 = 12.0 * MM_PER_POINT;
const CELL_PADDING: f32 = 4.0 * MM_PER_POINT;
const HEADER_HEIGHT: f32 = 24.0 * MM_PER_POINT;
const GRID_THICKNESS: f32 = 1.0;

/// Average Helvetica glyph advance, in ems.
const AVERAGE_GLYPH_EM: f32 = 0.5;

/// Characters that fit one description line at body size.
const DESCRIPTION_WRAP: usize = 34;

const HEADER_RGB: (f32, f32, f32) = (90.0 / 255.0, 155.0 / 255.0, 213.0 / 255.0);

/// Encodes a report as a PDF document.
///
/// # Errors
///
/// Returns `ExportError::Pdf` if fonts cannot be embedded or the document
/// cannot be serialized.
pub fn write_pdf(report: &LedgerReport) -> Result<Vec<u8>, ExportError> {
    let title = format!("{SHEET_TITLE} - {}", report.partner.name);
    let (doc, page, layer) =
        PdfDocument::new(&title, Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Layer 1");
    let layer = doc.get_page(page).get_layer(layer);

    let regular = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| ExportError::Pdf(e.to_string()))?;
    let bold = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(|e| ExportError::Pdf(e.to_string()))?;

    {
        let mut table = TableWriter {
            doc: &doc,
            layer,
            regular,
            bold,
            cursor: PAGE_HEIGHT - MARGIN_Y,
        };

        table.title(&title);
        table.header();

        for row in sheet_rows(report) {
            let cells = match row {
                SheetRow::Opening(amount) => single_line([
                    OPENING_BALANCE_LABEL.to_string(),
                    String::new(),
                    String::new(),
                    String::new(),
                    String::new(),
                    format_amount(amount),
                ]),
                SheetRow::Group(label) => single_line([
                    group_heading(label),
                    String::new(),
                    String::new(),
                    String::new(),
                    String::new(),
                    String::new(),
                ]),
                SheetRow::Entry(entry) => {
                    let mut cells = single_line(entry_cells(report, entry));
                    cells[DESCRIPTION_COLUMN] = wrap_description(entry.entry.label_or_empty());
                    cells
                }
            };
            table.row(&cells);
        }
    }

    doc.save_to_bytes()
        .map_err(|e| ExportError::Pdf(e.to_string()))
}

type CellLines = [Vec<String>; 6];

fn single_line(cells: [String; 6]) -> CellLines {
    cells.map(|cell| vec![cell])
}

fn wrap_description(label: &str) -> Vec<String> {
    textwrap::wrap(label, DESCRIPTION_WRAP)
        .into_iter()
        .map(|line| line.into_owned())
        .collect()
}

#[allow(clippy::cast_precision_loss)]
fn text_width(text: &str, size: f32) -> f32 {
    text.chars().count() as f32 * size * AVERAGE_GLYPH_EM * MM_PER_POINT
}

fn table_width() -> f32 {
    COLUMN_WIDTHS.iter().sum()
}

fn table_left() -> f32 {
    MARGIN_X + (PAGE_WIDTH - 2.0 * MARGIN_X - table_width()) / 2.0
}

fn rgb((r, g, b): (f32, f32, f32)) -> Color {
    Color::Rgb(Rgb::new(r, g, b, None))
}

struct TableWriter<'a> {
    doc: &'a PdfDocumentReference,
    layer: PdfLayerReference,
    regular: IndirectFontRef,
    bold: IndirectFontRef,
    /// Top edge of the next row.
    cursor: f32,
}

impl TableWriter<'_> {
    fn title(&mut self, title: &str) {
        let baseline = self.cursor - TITLE_SIZE * MM_PER_POINT;
        let x = (PAGE_WIDTH - text_width(title, TITLE_SIZE)) / 2.0;
        self.layer
            .use_text(title, TITLE_SIZE, Mm(x), Mm(baseline), &self.bold);
        self.cursor = baseline - 2.0 * TITLE_SIZE * MM_PER_POINT;
    }

    fn header(&mut self) {
        let top = self.cursor;
        let bottom = top - HEADER_HEIGHT;
        let left = table_left();

        self.layer.set_fill_color(rgb(HEADER_RGB));
        self.layer.add_rect(
            Rect::new(Mm(left), Mm(bottom), Mm(left + table_width()), Mm(top))
                .with_mode(PaintMode::Fill),
        );

        self.layer.set_fill_color(rgb((1.0, 1.0, 1.0)));
        let baseline = top - CELL_PADDING - HEADER_SIZE * MM_PER_POINT;
        let mut x = left;
        for (header, width) in HEADERS.iter().zip(COLUMN_WIDTHS) {
            let offset = (width - text_width(header, HEADER_SIZE)) / 2.0;
            self.layer
                .use_text(*header, HEADER_SIZE, Mm(x + offset), Mm(baseline), &self.bold);
            x += width;
        }
        self.layer.set_fill_color(rgb((0.0, 0.0, 0.0)));

        self.grid(top, bottom);
        self.cursor = bottom;
    }

    fn row(&mut self, cells: &CellLines) {
        let lines = cells.iter().map(Vec::len).max().unwrap_or(1).max(1);
        #[allow(clippy::cast_precision_loss)]
        let height = lines as f32 * BODY_LEADING + 2.0 * CELL_PADDING;

        if self.cursor - height < MARGIN_Y {
            self.page_break();
        }

        let top = self.cursor;
        let bottom = top - height;
        let mut x = table_left();
        for (cell, width) in cells.iter().zip(COLUMN_WIDTHS) {
            let mut baseline = top - CELL_PADDING - BODY_SIZE * MM_PER_POINT;
            for line in cell {
                let offset = ((width - text_width(line, BODY_SIZE)) / 2.0).max(CELL_PADDING);
                self.layer.use_text(
                    line.as_str(),
                    BODY_SIZE,
                    Mm(x + offset),
                    Mm(baseline),
                    &self.regular,
                );
                baseline -= BODY_LEADING;
            }
            x += width;
        }

        self.grid(top, bottom);
        self.cursor = bottom;
    }

    fn page_break(&mut self) {
        let (page, layer) = self
            .doc
            .add_page(Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Layer 1");
        self.layer = self.doc.get_page(page).get_layer(layer);
        self.cursor = PAGE_HEIGHT - MARGIN_Y;
        self.header();
    }

    fn grid(&self, top: f32, bottom: f32) {
        self.layer.set_outline_color(rgb((0.0, 0.0, 0.0)));
        self.layer.set_outline_thickness(GRID_THICKNESS);

        let mut x = table_left();
        for width in COLUMN_WIDTHS {
            self.layer.add_line(Line {
                points: vec![
                    (Point::new(Mm(x), Mm(bottom)), false),
                    (Point::new(Mm(x + width), Mm(bottom)), false),
                    (Point::new(Mm(x + width), Mm(top)), false),
                    (Point::new(Mm(x), Mm(top)), false),
                ],
                is_closed: true,
            });
            x += width;
        }
    }
}
