//! Fonts, sizes and named paragraph styles shared by every report element.
//!
//! Sizes are in half-points, the unit `docx-rs` expects.

use docx_rs::{AlignmentType, RunFonts, Style, StyleType};

pub const FONT: &str = "Arial Narrow";

pub const BODY_SIZE: usize = 22;
pub const TABLE_SIZE: usize = 18;
pub const SOURCE_SIZE: usize = 16;
pub const FOOTER_SIZE: usize = 14;

/// Fill of table header rows and evidence titles
pub const HEADER_FILL: &str = "D9D9D9";
pub const TEXT_COLOR: &str = "000000";

pub const HEADING_1: &str = "Heading1";
pub const HEADING_2: &str = "Heading2";
pub const HEADING_3: &str = "Heading3";

/// Usable page width in twentieths of a point (6.5 in)
pub const CONTENT_WIDTH_DXA: usize = 9360;

pub fn fonts() -> RunFonts {
    RunFonts::new()
        .ascii(FONT)
        .hi_ansi(FONT)
        .east_asia(FONT)
        .cs(FONT)
}

fn heading(id: &str, name: &str, size: usize, align: AlignmentType) -> Style {
    Style::new(id, StyleType::Paragraph)
        .name(name)
        .fonts(fonts())
        .size(size)
        .bold()
        .color(TEXT_COLOR)
        .align(align)
}

/// Heading styles 1-3: bold Arial Narrow, black
pub fn heading_styles() -> Vec<Style> {
    vec![
        heading(HEADING_1, "Heading 1", BODY_SIZE, AlignmentType::Both),
        heading(HEADING_2, "Heading 2", BODY_SIZE, AlignmentType::Both),
        heading(HEADING_3, "Heading 3", BODY_SIZE, AlignmentType::Both),
    ]
}
