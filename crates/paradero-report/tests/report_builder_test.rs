//! Render reports against an in-memory Drive and read them back

use chrono::NaiveDate;
use docx_rs::{
    DocumentChild, Paragraph, ParagraphChild, RunChild, Table, TableCellContent, TableChild,
    TableRowChild,
};
use image::{ImageBuffer, ImageFormat, Rgb, RgbImage};
use paradero_core::models::{AnalysisEntry, CharacteristicRow, DriveFileIds, ProjectInfo, StopRecord};
use paradero_report::{ReportBuilder, ReportRequest};
use paradero_store::MemoryFileStore;
use std::io::Cursor;

fn png() -> Vec<u8> {
    let img: RgbImage = ImageBuffer::from_pixel(8, 4, Rgb([10, 120, 200]));
    let mut out = Cursor::new(Vec::new());
    img.write_to(&mut out, ImageFormat::Png).unwrap();
    out.into_inner()
}

fn workbook() -> Vec<u8> {
    let mut book = rust_xlsxwriter::Workbook::new();

    let stops = book.add_worksheet();
    stops.set_name("Paradas").unwrap();
    stops.write_string(0, 0, "Código").unwrap();
    stops.write_string(0, 1, "Servicios").unwrap();
    stops.write_string(1, 0, "PA1").unwrap();
    stops.write_string(1, 1, "D09, 506").unwrap();

    let summary = book.add_worksheet();
    summary.set_name("Resumen").unwrap();
    summary.write_string(0, 0, "Paradero").unwrap();
    summary.write_string(0, 1, "Estado").unwrap();
    summary.write_string(1, 0, "PA1").unwrap();
    summary.write_string(1, 1, "Regular").unwrap();

    book.save_to_buffer().unwrap()
}

fn info() -> ProjectInfo {
    ProjectInfo {
        proyecto: Some("Mall Oriente".into()),
        comuna: Some("Ñuñoa".into()),
        estudio: Some("IMIV".into()),
        mitigacion: Some("N°3".into()),
        resolucion: Some("1234".into()),
        ..Default::default()
    }
}

fn all_ids() -> DriveFileIds {
    DriveFileIds {
        tablas_id: Some("tablas".into()),
        logo_id: Some("logo".into()),
        img_ubicacion_proyecto_id: Some("ubicacion".into()),
        img_ubicacion_paradas_id: Some("paradas".into()),
    }
}

fn drive() -> MemoryFileStore {
    MemoryFileStore::new()
        .with_file("tablas", workbook())
        .with_file("logo", png())
        .with_file("ubicacion", png())
        .with_file("paradas", png())
        .with_file("foto1", png())
        .with_file("foto2", png())
}

fn stop(codigo: &str, with_table: bool) -> StopRecord {
    let mut stop = StopRecord::new(codigo, "Av. Grecia 1200");
    stop.analisis.insert(
        "general".into(),
        AnalysisEntry::new("Paradero con refugio metálico.", vec!["foto1".into(), "foto2".into()]),
    );
    stop.analisis.insert("senal".into(), AnalysisEntry::new("", vec!["foto1".into()]));
    if with_table {
        stop.tabla = vec![CharacteristicRow::new("Posee refugio", "Sí", "")];
    }
    stop
}

async fn render(files: &MemoryFileStore, request: ReportRequest) -> Vec<u8> {
    ReportBuilder::new(files)
        .dated(NaiveDate::from_ymd_opt(2026, 10, 17).unwrap())
        .build(&request)
        .await
        .unwrap()
}

/// Text content of a generated document
struct Contents {
    paragraphs: Vec<String>,
    tables: Vec<Vec<Vec<String>>>,
    pictures: usize,
}

impl Contents {
    fn read(bytes: &[u8]) -> Self {
        let docx = docx_rs::read_docx(bytes).unwrap();
        let mut contents = Contents {
            paragraphs: Vec::new(),
            tables: Vec::new(),
            pictures: 0,
        };
        for child in &docx.document.children {
            match child {
                DocumentChild::Paragraph(p) => {
                    contents.pictures += pictures(p);
                    contents.paragraphs.push(paragraph_text(p));
                }
                DocumentChild::Table(t) => {
                    contents.pictures += table_pictures(t);
                    contents.tables.push(table_text(t));
                }
                _ => {}
            }
        }
        contents
    }

    fn has_paragraph(&self, text: &str) -> bool {
        self.paragraphs.iter().any(|p| p == text)
    }

    fn position(&self, text: &str) -> usize {
        self.paragraphs
            .iter()
            .position(|p| p == text)
            .unwrap_or_else(|| panic!("missing paragraph {:?}", text))
    }

    fn captions(&self) -> Vec<&str> {
        self.paragraphs
            .iter()
            .map(String::as_str)
            .filter(|p| p.starts_with("Figura ") || p.starts_with("Cuadro "))
            .collect()
    }

    fn evidence_titles(&self) -> Vec<&str> {
        self.tables
            .iter()
            .filter(|t| t[0].len() == 1)
            .map(|t| t[0][0].as_str())
            .collect()
    }
}

fn paragraph_text(paragraph: &Paragraph) -> String {
    paragraph
        .children
        .iter()
        .filter_map(|child| match child {
            ParagraphChild::Run(run) => Some(
                run.children
                    .iter()
                    .filter_map(|c| match c {
                        RunChild::Text(text) => Some(text.text.clone()),
                        _ => None,
                    })
                    .collect::<String>(),
            ),
            _ => None,
        })
        .collect()
}

fn pictures(paragraph: &Paragraph) -> usize {
    paragraph
        .children
        .iter()
        .map(|child| match child {
            ParagraphChild::Run(run) => run
                .children
                .iter()
                .filter(|c| matches!(c, RunChild::Drawing(_)))
                .count(),
            _ => 0,
        })
        .sum()
}

fn cell_paragraphs(table: &Table) -> Vec<Vec<Vec<&Paragraph>>> {
    table
        .rows
        .iter()
        .map(|row| {
            let TableChild::TableRow(row) = row;
            row.cells
                .iter()
                .map(|cell| {
                    let TableRowChild::TableCell(cell) = cell;
                    cell.children
                        .iter()
                        .filter_map(|c| match c {
                            TableCellContent::Paragraph(p) => Some::<&Paragraph>(p),
                            _ => None,
                        })
                        .collect()
                })
                .collect()
        })
        .collect()
}

fn table_text(table: &Table) -> Vec<Vec<String>> {
    cell_paragraphs(table)
        .into_iter()
        .map(|row| {
            row.into_iter()
                .map(|cell| cell.into_iter().map(paragraph_text).collect::<Vec<_>>().join("\n"))
                .collect()
        })
        .collect()
}

fn table_pictures(table: &Table) -> usize {
    cell_paragraphs(table)
        .into_iter()
        .flatten()
        .flatten()
        .map(pictures)
        .sum()
}

#[tokio::test]
async fn test_full_report_sequence() {
    let files = drive();
    let request = ReportRequest {
        info: info(),
        stops: vec![stop("PA1", true), stop("PA2", true)],
        file_ids: all_ids(),
    };

    let contents = Contents::read(&render(&files, request).await);

    assert!(contents.has_paragraph("OCTUBRE 2026"));
    assert!(contents.paragraphs.iter().any(|p| p.contains("MALL ORIENTE")));
    let headings = [
        "ÍNDICE GENERAL",
        "1. ANTECEDENTES",
        "2. DESCRIPCIÓN DEL PROYECTO",
        "3. INSPECCIÓN Y DESCRIPCIÓN DE PARADEROS INVOLUCRADOS",
        "3.1 PA1 - Av. Grecia 1200",
        "3.2 PA2 - Av. Grecia 1200",
        "4. INFORMACIÓN DE PARADAS DE TRANSPORTE PÚBLICO",
        "5. MEDIDA DE MITIGACIÓN",
    ];
    let positions: Vec<usize> = headings.iter().map(|h| contents.position(h)).collect();
    assert!(positions.windows(2).all(|w| w[0] < w[1]), "{:?}", positions);

    assert_eq!(
        contents.captions(),
        vec![
            "Figura 2.1. Ubicación del Proyecto",
            "Figura 3.1. Ubicación Paradas de Transporte Público en Estudio",
            "Cuadro 3.1. Tabla de Características del Paradero",
            "Cuadro 3.2. Tabla de Características del Paradero",
            "Cuadro 4.1. Información de Paradas de Transporte Público",
            "Cuadro 5.1. Resumen estado de Paraderos",
        ]
    );
    assert!(contents.has_paragraph("Elaboración Propia en base a Google Earth"));
    assert!(contents.has_paragraph("Elaboración Propia en base DTPM - RED movilidad - Terreno"));

    // Two location figures, and per stop two general photos plus one signage photo
    assert_eq!(contents.pictures, 2 + 2 * 3);
}

#[tokio::test]
async fn test_chapter_one_uses_project_fields_and_placeholders() {
    let files = drive();
    let request = ReportRequest {
        info: info(),
        stops: vec![],
        file_ids: all_ids(),
    };

    let contents = Contents::read(&render(&files, request).await);

    assert!(contents.paragraphs.iter().any(|p| p.starts_with(
        "El presente estudio, tiene por objetivo dar cumplimiento a la medida de mitigación N°3 del IMIV aprobado para Mall Oriente."
    )));
    assert!(contents
        .paragraphs
        .iter()
        .any(|p| p.contains("con fecha [Fecha Resolución], en la comuna Ñuñoa.")));
    assert!(contents.has_paragraph("[Descripción de la Medida]"));
    assert!(contents
        .paragraphs
        .iter()
        .any(|p| p.starts_with("El proyecto Mall Oriente, se ubica en [Ubicación del Proyecto], comuna de Ñuñoa, [Región].")));
}

#[tokio::test]
async fn test_evidence_blocks_and_tables() {
    let files = drive();
    let request = ReportRequest {
        info: info(),
        stops: vec![stop("PA1", true)],
        file_ids: all_ids(),
    };

    let contents = Contents::read(&render(&files, request).await);

    // Refugio y andén has no images, so only two evidence blocks
    assert_eq!(
        contents.evidence_titles(),
        vec![
            "Imagen general del paradero",
            "Evidencia Fotográfica de Señal y Demarcación",
        ]
    );

    let general = &contents.tables[0];
    assert_eq!(general.len(), 4);
    assert_eq!(general[3][0], "Paradero con refugio metálico.");
    let senal = &contents.tables[1];
    assert_eq!(senal.last().unwrap()[0], "No hay descripción disponible.");

    let characteristics = &contents.tables[2];
    assert_eq!(characteristics[0], vec!["Característica", "Cumplimiento", "Observación"]);
    assert_eq!(characteristics[1], vec!["Posee refugio", "Sí", ""]);

    let paradas = &contents.tables[3];
    assert_eq!(paradas[0], vec!["Código", "Servicios"]);
    assert_eq!(paradas[1], vec!["PA1", "D09, 506"]);
    let resumen = &contents.tables[4];
    assert_eq!(resumen[1], vec!["PA1", "Regular"]);
}

#[tokio::test]
async fn test_empty_table_keeps_evidence_blocks() {
    let files = drive();
    let request = ReportRequest {
        info: info(),
        stops: vec![stop("PA1", false)],
        file_ids: all_ids(),
    };

    let contents = Contents::read(&render(&files, request).await);

    assert_eq!(contents.evidence_titles().len(), 2);
    assert!(!contents
        .captions()
        .contains(&"Cuadro 3.1. Tabla de Características del Paradero"));
    assert!(contents
        .captions()
        .contains(&"Cuadro 4.1. Información de Paradas de Transporte Público"));
}

#[tokio::test]
async fn test_stop_without_images_has_no_evidence_tables() {
    let files = drive();
    let request = ReportRequest {
        info: info(),
        stops: vec![StopRecord::new("PA9", "Sin ubicación")],
        file_ids: all_ids(),
    };

    let contents = Contents::read(&render(&files, request).await);

    assert!(contents.has_paragraph("3.1 PA9 - Sin ubicación"));
    assert!(contents.evidence_titles().is_empty());
}

#[tokio::test]
async fn test_missing_tables_id_renders_error_text() {
    let files = drive();
    let request = ReportRequest {
        info: info(),
        stops: vec![],
        file_ids: DriveFileIds {
            tablas_id: None,
            ..all_ids()
        },
    };

    let contents = Contents::read(&render(&files, request).await);

    let errors = contents
        .paragraphs
        .iter()
        .filter(|p| *p == "[ERROR: No se recibió 'tablas_id' para cargar las tablas desde Drive.]")
        .count();
    assert_eq!(errors, 2);
    assert!(contents.tables.is_empty());
}

#[tokio::test]
async fn test_unreadable_spreadsheet_renders_detail() {
    let files = drive().with_download_failure("tablas", "connection reset");
    let request = ReportRequest {
        info: info(),
        stops: vec![],
        file_ids: all_ids(),
    };

    let contents = Contents::read(&render(&files, request).await);

    assert!(contents.has_paragraph(
        "[ERROR: No se pudo leer 'Tablas.xlsx' desde Drive. Detalle: Drive request failed: connection reset]"
    ));
    // Downloaded once for both chapters
    assert_eq!(files.downloads().iter().filter(|id| *id == "tablas").count(), 1);
}

#[tokio::test]
async fn test_failed_images_render_placeholders() {
    let files = drive()
        .with_file("ubicacion", b"not an image".to_vec())
        .with_download_failure("foto2", "timeout");
    let request = ReportRequest {
        info: info(),
        stops: vec![stop("PA1", false)],
        file_ids: DriveFileIds {
            img_ubicacion_paradas_id: Some("desconocido".into()),
            ..all_ids()
        },
    };

    let contents = Contents::read(&render(&files, request).await);

    assert!(contents.has_paragraph("[Error al cargar imagen ID: ubicacion]"));
    assert!(contents.has_paragraph("[Error al cargar imagen ID: desconocido]"));
    // Captions are still numbered for failed figures
    assert!(contents.captions().contains(&"Figura 3.1. Ubicación Paradas de Transporte Público en Estudio"));
    assert_eq!(contents.tables[0][2][0], "[Error al cargar imagen ID: foto2]");
}

#[tokio::test]
async fn test_no_file_ids_still_produces_document() {
    let files = MemoryFileStore::new();
    let request = ReportRequest {
        info: ProjectInfo::default(),
        stops: vec![stop("PA1", true)],
        file_ids: DriveFileIds::default(),
    };

    let contents = Contents::read(&render(&files, request).await);

    assert!(contents
        .paragraphs
        .iter()
        .any(|p| p.starts_with("MEJORAMIENTO DE PARADAS DE TRANSPORTE PÚBLICO")));
    assert!(contents.captions().iter().all(|c| !c.starts_with("Figura")));
    assert_eq!(contents.tables[0][1][0], "[Error al cargar imagen ID: foto1]");
    assert_eq!(contents.pictures, 0);
}
