//! Report assembly.
//!
//! One [`ReportBuilder::build`] call owns its [`Numbering`] and its body
//! blocks, so concurrent builds never share caption counters. Missing
//! pictures and spreadsheet problems become visible placeholders in the
//! document; only packaging failures abort the build.

use crate::elements::{
    body_text, caption, captioned_table, centered, evidence_table, heading, page_break,
    source_line, spacer, subheading, Block,
};
use crate::layout::{cover, running_footer, running_header};
use crate::numbering::Numbering;
use crate::picture::{Picture, EVIDENCE_WIDTH_IN, FIGURE_WIDTH_IN};
use crate::spreadsheet::{Workbook, STOPS_SHEET, SUMMARY_SHEET};
use crate::styles::{fonts, heading_styles, BODY_SIZE, TABLE_SIZE};
use crate::table::TableInput;
use chrono::{Local, NaiveDate};
use docx_rs::{Docx, Footer, Header};
use paradero_core::error::{ParaderoError, Result};
use paradero_core::models::{
    AnalysisEntry, Category, DriveFileIds, Lookup, ProjectInfo, StopRecord, WellKnownFile,
};
use paradero_store::FileStore;
use std::io::Cursor;

const INDEX_TITLE: &str = "ÍNDICE GENERAL";

const GOOGLE_EARTH_SOURCE: &str = "Elaboración Propia en base a Google Earth";
const OWN_SOURCE: &str = "Elaboración Propia";
const TABLES_SOURCE: &str = "Elaboración Propia en base DTPM - RED movilidad - Terreno";

const MISSING_TABLES_ID: &str =
    "[ERROR: No se recibió 'tablas_id' para cargar las tablas desde Drive.]";

/// Evidence block titles, in report order
pub const EVIDENCE_BLOCKS: [(Category, &str); 3] = [
    (Category::General, "Imagen general del paradero"),
    (Category::RefugioAnden, "Evidencia Fotográfica de Refugio y Andén"),
    (Category::Senal, "Evidencia Fotográfica de Señal y Demarcación"),
];

pub fn image_placeholder(file_id: &str) -> String {
    format!("[Error al cargar imagen ID: {}]", file_id)
}

pub fn tables_error(detail: &str) -> String {
    format!(
        "[ERROR: No se pudo leer 'Tablas.xlsx' desde Drive. Detalle: {}]",
        detail
    )
}

/// Everything one report needs
#[derive(Debug, Clone, Default)]
pub struct ReportRequest {
    pub info: ProjectInfo,
    pub stops: Vec<StopRecord>,
    pub file_ids: DriveFileIds,
}

/// The spreadsheet behind chapters 4 and 5, downloaded at most once
enum Tables {
    NotProvided,
    Failed(String),
    Loaded(Workbook),
}

/// Body blocks plus the caption counters of one build
struct Body {
    blocks: Vec<Block>,
    numbering: Numbering,
}

impl Body {
    fn new() -> Self {
        Self {
            blocks: Vec::new(),
            numbering: Numbering::new(),
        }
    }

    fn push(&mut self, block: impl Into<Block>) {
        self.blocks.push(block.into());
    }

    fn text(&mut self, text: &str) {
        self.push(body_text(text));
    }

    fn chapter(&mut self, number: u32, title: &str) {
        self.numbering.enter_chapter(number);
        self.push(heading(&format!("{}. {}", number, title)));
    }

    /// Caption, picture or placeholder, source line
    fn figure(&mut self, description: &str, file_id: &str, picture: Option<Picture>, source: &str) {
        let label = self.numbering.next_figure(description);
        self.push(caption(&label));
        match picture {
            Some(picture) => self.push(centered(picture.run(FIGURE_WIDTH_IN))),
            None => self.text(&image_placeholder(file_id)),
        }
        self.push(source_line(source, TABLE_SIZE));
    }

    fn table(&mut self, description: &str, input: &TableInput, source: &str) {
        let label = self.numbering.next_table(description);
        let table = input.normalize();
        tracing::debug!(caption = %label, rows = table.rows.len(), columns = table.width(), "Table added");
        self.blocks.extend(captioned_table(&label, &table, source));
    }

    fn sheet_table(&mut self, tables: &mut Tables, sheet: &str, description: &str) {
        match tables {
            Tables::NotProvided => self.text(MISSING_TABLES_ID),
            Tables::Failed(detail) => self.text(&tables_error(detail)),
            Tables::Loaded(book) => match book.sheet(sheet) {
                Ok(input) => self.table(description, &input, TABLES_SOURCE),
                Err(e) => {
                    tracing::warn!(error = %e, sheet, "Sheet unavailable");
                    self.text(&tables_error(&e.to_string()));
                }
            },
        }
    }
}

/// Renders inspection reports, downloading pictures and the spreadsheet
/// through a [`FileStore`].
pub struct ReportBuilder<'a> {
    files: &'a dyn FileStore,
    date: NaiveDate,
}

impl<'a> ReportBuilder<'a> {
    pub fn new(files: &'a dyn FileStore) -> Self {
        Self {
            files,
            date: Local::now().date_naive(),
        }
    }

    /// Date shown on the cover
    pub fn dated(mut self, date: NaiveDate) -> Self {
        self.date = date;
        self
    }

    async fn fetch(&self, file_id: &str) -> Result<Vec<u8>> {
        match self.files.download(file_id).await {
            Lookup::Found(bytes) => Ok(bytes),
            Lookup::NotFound => Err(ParaderoError::not_found(format!("Drive file {}", file_id))),
            Lookup::TransportError(reason) => Err(ParaderoError::upstream("Drive", reason)),
        }
    }

    async fn picture(&self, file_id: &str) -> Option<Picture> {
        match self.fetch(file_id).await.and_then(|bytes| Picture::decode(&bytes)) {
            Ok(picture) => Some(picture),
            Err(e) => {
                tracing::warn!(error = %e, file_id, "Picture unavailable");
                None
            }
        }
    }

    async fn tables(&self, ids: &DriveFileIds) -> Tables {
        let Some(id) = ids.get(WellKnownFile::Tables) else {
            return Tables::NotProvided;
        };
        match self.fetch(id).await.and_then(Workbook::from_bytes) {
            Ok(book) => Tables::Loaded(book),
            Err(e) => {
                tracing::warn!(error = %e, file_id = id, "Spreadsheet unavailable");
                Tables::Failed(e.to_string())
            }
        }
    }

    async fn location_figure(
        &self,
        body: &mut Body,
        ids: &DriveFileIds,
        file: WellKnownFile,
        description: &str,
    ) {
        if let Some(id) = ids.get(file) {
            let picture = self.picture(id).await;
            body.figure(description, id, picture, GOOGLE_EARTH_SOURCE);
        }
    }

    async fn evidence(&self, body: &mut Body, title: &str, entry: Option<&AnalysisEntry>) {
        let Some(entry) = entry.filter(|e| !e.image_ids.is_empty()) else {
            return;
        };

        let mut pictures = Vec::with_capacity(entry.image_ids.len());
        for id in &entry.image_ids {
            pictures.push(match self.picture(id).await {
                Some(picture) => centered(picture.run(EVIDENCE_WIDTH_IN)),
                None => body_text(&image_placeholder(id)),
            });
        }
        body.push(evidence_table(title, pictures, &entry.description));
    }

    async fn stop_section(&self, body: &mut Body, index: usize, stop: &StopRecord) {
        tracing::debug!(index, codigo = %stop.codigo, "Rendering stop");
        body.push(page_break());
        body.push(subheading(&stop.heading(index)));
        body.push(spacer());

        for (category, title) in EVIDENCE_BLOCKS {
            self.evidence(body, title, stop.analisis.get(category.key())).await;
            body.push(page_break());
        }

        if !stop.tabla.is_empty() {
            body.table(
                "Tabla de Características del Paradero",
                &TableInput::characteristics(&stop.tabla),
                OWN_SOURCE,
            );
        }
    }

    /// Render the full report as `.docx` bytes
    pub async fn build(&self, request: &ReportRequest) -> Result<Vec<u8>> {
        let info = &request.info;
        let ids = &request.file_ids;
        let mut body = Body::new();

        let logo = match ids.get(WellKnownFile::Logo) {
            Some(id) => self.picture(id).await,
            None => None,
        };

        body.blocks.extend(cover(info, self.date));
        body.push(heading(INDEX_TITLE));
        body.push(page_break());

        body.chapter(1, "ANTECEDENTES");
        body.push(spacer());
        body.text(&format!(
            "El presente estudio, tiene por objetivo dar cumplimiento a la medida de mitigación {} del {} aprobado para {}. \
             Las mitigaciones que se abordan a continuación tienen relación con el mantenimiento y reparación de la \
             infraestructura y elementos de las paradas de transporte público, según lo estipulado en el {} aprobado \
             mediante Resolución Exenta {}, con fecha {}, en la comuna {}.",
            info.mitigacion(),
            info.estudio(),
            info.proyecto(),
            info.estudio(),
            info.resolucion(),
            info.fecha(),
            info.comuna(),
        ));
        body.push(spacer());
        body.text(&format!(
            "Respecto a las medidas de mitigación mencionadas, se expone lo siguiente en el {} aprobado:",
            info.estudio()
        ));
        body.push(spacer());
        body.text(info.medida_mitigacion());
        body.push(page_break());

        body.chapter(2, "DESCRIPCIÓN DEL PROYECTO");
        body.text(&format!(
            "El proyecto {}, se ubica en {}, comuna de {}, {}. En la siguiente figura N°2.1, se podrá visualizar la \
             ubicación del proyecto:",
            info.proyecto(),
            info.ubi_proyecto(),
            info.comuna(),
            info.region(),
        ));
        body.push(spacer());
        self.location_figure(&mut body, ids, WellKnownFile::ProjectLocation, "Ubicación del Proyecto")
            .await;
        body.push(page_break());

        body.chapter(3, "INSPECCIÓN Y DESCRIPCIÓN DE PARADEROS INVOLUCRADOS");
        body.push(spacer());
        body.text(
            "En este apartado se reporta la situación actual de las paradas en estudio, catastradas en las visitas \
             a terreno. En la figura siguiente se muestra la ubicación actual de cada paradero:",
        );
        self.location_figure(
            &mut body,
            ids,
            WellKnownFile::StopsLocation,
            "Ubicación Paradas de Transporte Público en Estudio",
        )
        .await;
        for (i, stop) in request.stops.iter().enumerate() {
            self.stop_section(&mut body, i + 1, stop).await;
        }

        let mut tables = self.tables(ids).await;

        body.push(page_break());
        body.chapter(4, "INFORMACIÓN DE PARADAS DE TRANSPORTE PÚBLICO");
        body.push(spacer());
        body.text(
            "En la siguiente tabla se reportan los servicios de bus que utilizan cada parada en estudio, con su \
             respectivo destino:",
        );
        body.push(spacer());
        body.sheet_table(&mut tables, STOPS_SHEET, "Información de Paradas de Transporte Público");

        body.push(page_break());
        body.chapter(5, "MEDIDA DE MITIGACIÓN");
        body.push(spacer());
        body.text(&format!(
            "En función de la información recopilada en terreno, se presenta una tabla resumen con las mejoras a \
             ejecutar de acuerdo con lo indicado en la aprobación del {} aprobado mediante {}. El cuadro que se \
             presenta a continuación, indica un resumen con el estado de los paraderos revisados en la minuta y \
             posteriormente se mencionan los elementos que requieren intervención.",
            info.estudio(),
            info.resolucion(),
        ));
        body.push(spacer());
        body.sheet_table(&mut tables, SUMMARY_SHEET, "Resumen estado de Paraderos");

        let block_count = body.blocks.len();
        let bytes = self.package(info, body, logo.as_ref())?;
        tracing::info!(
            stops = request.stops.len(),
            blocks = block_count,
            bytes = bytes.len(),
            "Report generated"
        );
        Ok(bytes)
    }

    fn package(&self, info: &ProjectInfo, body: Body, logo: Option<&Picture>) -> Result<Vec<u8>> {
        let mut docx = Docx::new()
            .default_fonts(fonts())
            .default_size(BODY_SIZE)
            .header(running_header(info))
            .footer(running_footer(logo))
            .first_header(Header::new())
            .first_footer(Footer::new());
        for style in heading_styles() {
            docx = docx.add_style(style);
        }
        for block in body.blocks {
            docx = match block {
                Block::Paragraph(p) => docx.add_paragraph(p),
                Block::Table(t) => docx.add_table(t),
            };
        }

        let mut out = Cursor::new(Vec::new());
        docx.build()
            .pack(&mut out)
            .map_err(|e| ParaderoError::Document(e.to_string()))?;
        Ok(out.into_inner())
    }
}
