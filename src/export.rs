//! CSV and PDF renderings of a seating arrangement.
//!
//! Both formats carry the same four columns: room, seat number (1-based
//! within the room), student id and department. Rooms appear in room order
//! and students in seating order.
//!
//! The PDF uses the standard Type1 Helvetica fonts with their built-in
//! encoding, so characters outside printable ASCII are written as `?`.
//! The CSV keeps the text untouched.

use crate::data::RoomAssignments;
use crate::error::ExportError;
use chrono::{DateTime, Local};
use pdf_writer::{Content, Finish, Name, Pdf, Rect, Ref, Str};

pub const HEADER: [&str; 4] = ["Room", "Seat Number", "Student ID", "Department"];

/// One exported seat.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportRow {
    pub room: String,
    pub seat_number: usize,
    pub student_id: String,
    pub department: String,
}

impl ExportRow {
    fn cells(&self) -> [String; 4] {
        [
            self.room.clone(),
            self.seat_number.to_string(),
            self.student_id.clone(),
            self.department.clone(),
        ]
    }
}

pub fn export_rows(assignments: &RoomAssignments) -> Vec<ExportRow> {
    assignments
        .iter()
        .flat_map(|(room, students)| {
            students.iter().enumerate().map(move |(i, student)| ExportRow {
                room: room.clone(),
                seat_number: i + 1,
                student_id: student.student_id.clone(),
                department: student.department.clone(),
            })
        })
        .collect()
}

/// `seating_arrangement_<timestamp>.<extension>`
pub fn download_name(extension: &str, now: DateTime<Local>) -> String {
    format!(
        "seating_arrangement_{}.{}",
        now.format("%Y%m%d_%H%M%S"),
        extension
    )
}

pub fn to_csv(assignments: &RoomAssignments) -> Result<Vec<u8>, ExportError> {
    let rows = export_rows(assignments);
    let mut writer = csv::Writer::from_writer(Vec::new());
    // header goes out explicitly so an empty arrangement still gets one
    writer.write_record(HEADER)?;
    for row in &rows {
        writer.write_record(row.cells())?;
    }
    writer.into_inner().map_err(|e| ExportError::Io(e.into_error()))
}

// US Letter, in points
const PAGE_WIDTH: f32 = 612.0;
const PAGE_HEIGHT: f32 = 792.0;
const MARGIN: f32 = 54.0;
const HEADER_HEIGHT: f32 = 28.0;
const ROW_HEIGHT: f32 = 20.0;
const COLUMN_WIDTHS: [f32; 4] = [110.0, 110.0, 140.0, 150.0];
const HEADER_FONT_SIZE: f32 = 14.0;
const BODY_FONT_SIZE: f32 = 12.0;

const GREY: (f32, f32, f32) = (0.5, 0.5, 0.5);
const WHITESMOKE: (f32, f32, f32) = (0.96, 0.96, 0.96);
const BEIGE: (f32, f32, f32) = (0.96, 0.96, 0.86);
const BLACK: (f32, f32, f32) = (0.0, 0.0, 0.0);

fn rows_per_page() -> usize {
    ((PAGE_HEIGHT - 2.0 * MARGIN - HEADER_HEIGHT) / ROW_HEIGHT) as usize
}

/// Renders the arrangement as a paginated table, repeating the header on
/// every page.
pub fn to_pdf(assignments: &RoomAssignments) -> Vec<u8> {
    let rows: Vec<[String; 4]> = export_rows(assignments).iter().map(ExportRow::cells).collect();
    let pages: Vec<&[[String; 4]]> = if rows.is_empty() {
        vec![&rows[..]]
    } else {
        rows.chunks(rows_per_page()).collect()
    };

    let mut pdf = Pdf::new();
    let catalog_id = Ref::new(1);
    let page_tree_id = Ref::new(2);
    let font_id = Ref::new(3);
    let bold_font_id = Ref::new(4);
    let page_ids: Vec<Ref> = (0..pages.len()).map(|i| Ref::new(5 + 2 * i as i32)).collect();

    pdf.catalog(catalog_id).pages(page_tree_id);
    pdf.pages(page_tree_id)
        .kids(page_ids.iter().copied())
        .count(pages.len() as i32);

    for (page_rows, page_id) in pages.iter().zip(&page_ids) {
        let content_id = Ref::new(page_id.get() + 1);

        let mut page = pdf.page(*page_id);
        page.media_box(Rect::new(0.0, 0.0, PAGE_WIDTH, PAGE_HEIGHT));
        page.parent(page_tree_id);
        page.contents(content_id);
        let mut resources = page.resources();
        resources
            .fonts()
            .pair(Name(b"F1"), font_id)
            .pair(Name(b"F2"), bold_font_id);
        resources.finish();
        page.finish();

        let content_data = render_table_page(page_rows);
        pdf.stream(content_id, &content_data);
    }

    pdf.type1_font(font_id).base_font(Name(b"Helvetica"));
    pdf.type1_font(bold_font_id).base_font(Name(b"Helvetica-Bold"));

    pdf.finish()
}

fn render_table_page(rows: &[[String; 4]]) -> Vec<u8> {
    let mut content = Content::new();
    let table_width: f32 = COLUMN_WIDTHS.iter().sum();
    let left = (PAGE_WIDTH - table_width) / 2.0;
    let top = PAGE_HEIGHT - MARGIN;
    let body_top = top - HEADER_HEIGHT;
    let bottom = body_top - ROW_HEIGHT * rows.len() as f32;

    // backgrounds
    set_fill(&mut content, GREY);
    content.rect(left, body_top, table_width, HEADER_HEIGHT);
    content.fill_nonzero();
    if !rows.is_empty() {
        set_fill(&mut content, BEIGE);
        content.rect(left, bottom, table_width, body_top - bottom);
        content.fill_nonzero();
    }

    // grid
    content.set_stroke_rgb(BLACK.0, BLACK.1, BLACK.2);
    content.set_line_width(1.0);
    content.rect(left, bottom, table_width, top - bottom);
    let mut y = body_top;
    for _ in 0..=rows.len() {
        content.move_to(left, y);
        content.line_to(left + table_width, y);
        y -= ROW_HEIGHT;
    }
    let mut x = left;
    for width in &COLUMN_WIDTHS[..COLUMN_WIDTHS.len() - 1] {
        x += width;
        content.move_to(x, top);
        content.line_to(x, bottom);
    }
    content.stroke();

    // text
    set_fill(&mut content, WHITESMOKE);
    let header: [String; 4] = HEADER.map(String::from);
    draw_row(&mut content, &header, left, body_top, HEADER_HEIGHT, Name(b"F2"), HEADER_FONT_SIZE);

    set_fill(&mut content, BLACK);
    for (i, row) in rows.iter().enumerate() {
        let row_bottom = body_top - ROW_HEIGHT * (i + 1) as f32;
        draw_row(&mut content, row, left, row_bottom, ROW_HEIGHT, Name(b"F1"), BODY_FONT_SIZE);
    }

    content.finish()
}

/// One byte per character, printable ASCII only.
fn pdf_text(cell: &str) -> Vec<u8> {
    cell.chars()
        .map(|c| {
            if c.is_ascii() && !c.is_ascii_control() {
                c as u8
            } else {
                b'?'
            }
        })
        .collect()
}

fn set_fill(content: &mut Content, (r, g, b): (f32, f32, f32)) {
    content.set_fill_rgb(r, g, b);
}

fn draw_row(
    content: &mut Content,
    cells: &[String; 4],
    left: f32,
    row_bottom: f32,
    row_height: f32,
    font: Name,
    font_size: f32,
) {
    let mut x = left;
    for (cell, width) in cells.iter().zip(COLUMN_WIDTHS) {
        let text = pdf_text(cell);
        // Helvetica glyphs average roughly half an em
        let text_width = text.len() as f32 * font_size * 0.5;
        let text_x = x + ((width - text_width) / 2.0).max(2.0);
        let text_y = row_bottom + (row_height - font_size) / 2.0 + font_size * 0.2;
        content.begin_text();
        content.set_font(font, font_size);
        content.next_line(text_x, text_y);
        content.show(Str(&text));
        content.end_text();
        x += width;
    }
}
