//! Cover page, running header and footer

use crate::elements::{lines_run, text_run, Block};
use crate::picture::{Picture, LOGO_WIDTH_IN};
use crate::styles::{BODY_SIZE, CONTENT_WIDTH_DXA, FOOTER_SIZE, SOURCE_SIZE};
use chrono::{Datelike, NaiveDate};
use docx_rs::{
    AlignmentType, BreakType, FieldCharType, Footer, Header, InstrPAGE, InstrText, Paragraph, Run,
    Table, TableBorder, TableBorderPosition, TableCell, TableRow, VAlignType, WidthType,
};
use paradero_core::models::ProjectInfo;

pub const COVER_TITLE: &str = "MEJORAMIENTO DE PARADAS DE TRANSPORTE PÚBLICO";

const COVER_CONTACT: [&str; 3] = [
    "Avenida Presidente Riesco 5335 Oficina 606, Las Condes",
    "Teléfono: (56 2) 2 657 16 25",
    "contacto@mho.cl - www.mho.cl",
];

const FOOTER_CONTACT: [&str; 4] = [
    "Presidente Riesco 5335 Of. 606, Las Condes",
    "Teléfono: (56 2) 2 657 1625",
    "contacto@mho.cl",
    "www.mho.cl",
];

const MONTHS: [&str; 12] = [
    "ENERO",
    "FEBRERO",
    "MARZO",
    "ABRIL",
    "MAYO",
    "JUNIO",
    "JULIO",
    "AGOSTO",
    "SEPTIEMBRE",
    "OCTUBRE",
    "NOVIEMBRE",
    "DICIEMBRE",
];

/// `OCTUBRE 2026`
pub fn cover_date(date: NaiveDate) -> String {
    format!("{} {}", MONTHS[date.month0() as usize], date.year())
}

fn upper(value: &Option<String>) -> String {
    value.as_deref().unwrap_or_default().trim().to_uppercase()
}

/// Title lines; missing fields leave their slot empty
pub fn cover_title(info: &ProjectInfo) -> Vec<String> {
    let measure: Vec<String> = [
        "MEDIDA DE MITIGACIÓN".to_string(),
        upper(&info.mitigacion),
        upper(&info.estudio),
    ]
    .into_iter()
    .filter(|part| !part.is_empty())
    .collect();
    vec![
        COVER_TITLE.to_string(),
        measure.join(" "),
        upper(&info.proyecto),
        upper(&info.comuna),
    ]
}

fn blank_lines(count: usize) -> impl Iterator<Item = Block> {
    (0..count).map(|_| Block::Paragraph(Paragraph::new()))
}

/// Cover page, ending with a page break
pub fn cover(info: &ProjectInfo, date: NaiveDate) -> Vec<Block> {
    let title = cover_title(info);
    let title: Vec<&str> = title.iter().map(String::as_str).collect();

    let mut blocks: Vec<Block> = blank_lines(6).collect();
    blocks.push(
        Paragraph::new()
            .add_run(lines_run(&title, BODY_SIZE).bold())
            .align(AlignmentType::Center)
            .into(),
    );
    blocks.extend(blank_lines(8));
    blocks.push(
        Paragraph::new()
            .add_run(text_run(&cover_date(date), BODY_SIZE).bold())
            .align(AlignmentType::Center)
            .into(),
    );
    blocks.extend(blank_lines(2));
    blocks.push(
        Paragraph::new()
            .add_run(lines_run(&COVER_CONTACT, SOURCE_SIZE))
            .align(AlignmentType::Center)
            .into(),
    );
    blocks.push(Paragraph::new().add_run(Run::new().add_break(BreakType::Page)).into());
    blocks
}

fn half_width_cell(paragraph: Paragraph) -> TableCell {
    TableCell::new()
        .add_paragraph(paragraph)
        .vertical_align(VAlignType::Center)
        .width(CONTENT_WIDTH_DXA / 2, WidthType::Dxa)
}

fn band(left: Paragraph, right: Paragraph, rule: TableBorderPosition) -> Table {
    Table::new(vec![TableRow::new(vec![
        half_width_cell(left),
        half_width_cell(right),
    ])])
    .set_grid(vec![CONTENT_WIDTH_DXA / 2; 2])
    .clear_all_border()
    .set_border(TableBorder::new(rule).size(6).color("000000"))
}

fn page_number() -> Run {
    Run::new()
        .size(SOURCE_SIZE)
        .add_field_char(FieldCharType::Begin, false)
        .add_instr_text(InstrText::PAGE(InstrPAGE::new()))
        .add_field_char(FieldCharType::Separate, false)
        .add_text("1")
        .add_field_char(FieldCharType::End, false)
}

/// Project name on the left, page number on the right, rule below
pub fn running_header(info: &ProjectInfo) -> Header {
    let title = format!("Informe de Paradero - {}", info.proyecto());
    Header::new().add_table(band(
        Paragraph::new().add_run(text_run(&title, SOURCE_SIZE)),
        Paragraph::new()
            .add_run(page_number())
            .align(AlignmentType::Right),
        TableBorderPosition::Bottom,
    ))
}

/// Logo on the left when available, contact text on the right, rule above
pub fn running_footer(logo: Option<&Picture>) -> Footer {
    let mut logo_cell = Paragraph::new().align(AlignmentType::Right);
    if let Some(logo) = logo {
        logo_cell = logo_cell.add_run(logo.run(LOGO_WIDTH_IN));
    }

    Footer::new().add_table(band(
        logo_cell,
        Paragraph::new()
            .add_run(lines_run(&FOOTER_CONTACT, FOOTER_SIZE))
            .align(AlignmentType::Left),
        TableBorderPosition::Top,
    ))
}
