//! Paragraph and table builders for the report body

use crate::styles::{
    fonts, BODY_SIZE, CONTENT_WIDTH_DXA, HEADER_FILL, HEADING_1, HEADING_2, HEADING_3, SOURCE_SIZE,
    TABLE_SIZE, TEXT_COLOR,
};
use crate::table::NormalizedTable;
use docx_rs::{
    AlignmentType, BreakType, LineSpacing, Paragraph, Run, Shading, ShdType, Table, TableCell,
    TableRow, VAlignType, WidthType,
};

/// Shown in an evidence block when the category has no saved text
pub const NO_DESCRIPTION: &str = "No hay descripción disponible.";

/// Plain Arial Narrow run
pub fn text_run(text: &str, size: usize) -> Run {
    Run::new()
        .add_text(text)
        .fonts(fonts())
        .size(size)
        .color(TEXT_COLOR)
}

/// One run with a line break between each line
pub fn lines_run(lines: &[&str], size: usize) -> Run {
    let mut run = Run::new().fonts(fonts()).size(size).color(TEXT_COLOR);
    for (i, line) in lines.iter().enumerate() {
        if i > 0 {
            run = run.add_break(BreakType::TextWrapping);
        }
        run = run.add_text(*line);
    }
    run
}

fn tight() -> LineSpacing {
    LineSpacing::new().before(0).after(0)
}

fn titled(style: &str, text: &str) -> Paragraph {
    Paragraph::new()
        .style(style)
        .add_run(text_run(text, BODY_SIZE).bold())
        .align(AlignmentType::Left)
}

/// Chapter title
pub fn heading(text: &str) -> Paragraph {
    titled(HEADING_1, text)
}

/// Per-stop section title
pub fn subheading(text: &str) -> Paragraph {
    titled(HEADING_2, text)
}

/// Justified body paragraph
pub fn body_text(text: &str) -> Paragraph {
    Paragraph::new()
        .add_run(text_run(text, BODY_SIZE))
        .align(AlignmentType::Both)
}

pub fn spacer() -> Paragraph {
    Paragraph::new().line_spacing(tight())
}

pub fn page_break() -> Paragraph {
    Paragraph::new().add_run(Run::new().add_break(BreakType::Page))
}

/// Bold centred caption above a figure or table
pub fn caption(label: &str) -> Paragraph {
    Paragraph::new()
        .add_run(text_run(label, TABLE_SIZE).bold())
        .align(AlignmentType::Center)
        .line_spacing(tight())
}

/// Bold centred source line below a figure or table
pub fn source_line(text: &str, size: usize) -> Paragraph {
    Paragraph::new()
        .add_run(text_run(text, size).bold())
        .align(AlignmentType::Center)
        .line_spacing(tight())
}

/// Centred paragraph around a picture run
pub fn centered(run: Run) -> Paragraph {
    Paragraph::new()
        .add_run(run)
        .align(AlignmentType::Center)
        .line_spacing(tight())
}

fn shaded(cell: TableCell) -> TableCell {
    cell.shading(Shading::new().shd_type(ShdType::Clear).color("auto").fill(HEADER_FILL))
}

fn grid_cell(text: &str, bold: bool, width: usize) -> TableCell {
    let run = if bold {
        text_run(text, TABLE_SIZE).bold()
    } else {
        text_run(text, TABLE_SIZE)
    };
    TableCell::new()
        .add_paragraph(
            Paragraph::new()
                .add_run(run)
                .align(AlignmentType::Center)
                .line_spacing(tight()),
        )
        .vertical_align(VAlignType::Center)
        .width(width, WidthType::Dxa)
}

/// Grid table: shaded bold header row, one row per record, 9 pt cells
pub fn data_table(table: &NormalizedTable) -> Table {
    let width = table.width().max(1);
    let column = CONTENT_WIDTH_DXA / width;

    let header = TableRow::new(
        table
            .headers
            .iter()
            .map(|h| shaded(grid_cell(h, true, column)))
            .collect(),
    );
    let body = table.rows.iter().map(|row| {
        TableRow::new(row.iter().map(|v| grid_cell(v, false, column)).collect())
    });

    Table::new(std::iter::once(header).chain(body).collect()).set_grid(vec![column; width])
}

/// One-column evidence block: shaded title, one row per picture paragraph,
/// description last.
pub fn evidence_table(title: &str, pictures: Vec<Paragraph>, description: &str) -> Table {
    let title_row = TableRow::new(vec![shaded(
        TableCell::new()
            .add_paragraph(
                Paragraph::new()
                    .style(HEADING_3)
                    .add_run(text_run(title, BODY_SIZE).bold())
                    .align(AlignmentType::Center),
            )
            .width(CONTENT_WIDTH_DXA, WidthType::Dxa),
    )]);

    let picture_rows = pictures.into_iter().map(|p| {
        TableRow::new(vec![TableCell::new()
            .add_paragraph(p)
            .width(CONTENT_WIDTH_DXA, WidthType::Dxa)])
    });

    let text = match description.trim() {
        "" => NO_DESCRIPTION,
        text => text,
    };
    let description_row = TableRow::new(vec![TableCell::new()
        .add_paragraph(body_text(text))
        .width(CONTENT_WIDTH_DXA, WidthType::Dxa)]);

    let rows = std::iter::once(title_row)
        .chain(picture_rows)
        .chain(std::iter::once(description_row))
        .collect();

    Table::new(rows).set_grid(vec![CONTENT_WIDTH_DXA])
}

/// Table caption, grid and source line
pub fn captioned_table(label: &str, table: &NormalizedTable, source: &str) -> Vec<Block> {
    vec![
        Block::Paragraph(caption(label)),
        Block::Table(data_table(table)),
        Block::Paragraph(source_line(source, SOURCE_SIZE)),
    ]
}

/// A top-level body element
#[derive(Debug)]
pub enum Block {
    Paragraph(Paragraph),
    Table(Table),
}

impl From<Paragraph> for Block {
    fn from(p: Paragraph) -> Self {
        Block::Paragraph(p)
    }
}

impl From<Table> for Block {
    fn from(t: Table) -> Self {
        Block::Table(t)
    }
}
