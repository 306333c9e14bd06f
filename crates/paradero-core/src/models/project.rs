use serde::{Deserialize, Serialize};

/// Project-level fields shown on the cover and in chapters 1 and 2.
///
/// Every field is optional; missing or blank values render as a bracketed
/// placeholder so an incomplete form still yields a readable document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectInfo {
    #[serde(default)]
    pub proyecto: Option<String>,
    #[serde(default)]
    pub comuna: Option<String>,
    #[serde(default)]
    pub estudio: Option<String>,
    #[serde(default)]
    pub resolucion: Option<String>,
    #[serde(default)]
    pub fecha: Option<String>,
    #[serde(default)]
    pub mitigacion: Option<String>,
    #[serde(default)]
    pub medida_mitigacion: Option<String>,
    #[serde(default)]
    pub ubi_proyecto: Option<String>,
    #[serde(default)]
    pub region: Option<String>,

    /// Only used to locate the project folder
    #[serde(default)]
    pub folder_name: Option<String>,
}

fn or_placeholder<'a>(value: &'a Option<String>, placeholder: &'a str) -> &'a str {
    match value.as_deref().map(str::trim) {
        Some(v) if !v.is_empty() => v,
        _ => placeholder,
    }
}

impl ProjectInfo {
    pub fn proyecto(&self) -> &str {
        or_placeholder(&self.proyecto, "[Nombre del Proyecto]")
    }

    pub fn comuna(&self) -> &str {
        or_placeholder(&self.comuna, "[Comuna]")
    }

    pub fn estudio(&self) -> &str {
        or_placeholder(&self.estudio, "[Tipo de Estudio]")
    }

    pub fn mitigacion(&self) -> &str {
        or_placeholder(&self.mitigacion, "[N° Mitigación]")
    }

    pub fn resolucion(&self) -> &str {
        or_placeholder(&self.resolucion, "[N° Resolución]")
    }

    pub fn fecha(&self) -> &str {
        or_placeholder(&self.fecha, "[Fecha Resolución]")
    }

    pub fn medida_mitigacion(&self) -> &str {
        or_placeholder(&self.medida_mitigacion, "[Descripción de la Medida]")
    }

    pub fn ubi_proyecto(&self) -> &str {
        or_placeholder(&self.ubi_proyecto, "[Ubicación del Proyecto]")
    }

    pub fn region(&self) -> &str {
        or_placeholder(&self.region, "[Región]")
    }

    /// Trimmed folder name, `None` when absent or blank
    pub fn folder_name(&self) -> Option<&str> {
        self.folder_name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
    }

    /// Name used for the downloaded file
    pub fn file_stem(&self) -> &str {
        or_placeholder(&self.proyecto, "Proyecto")
    }
}
