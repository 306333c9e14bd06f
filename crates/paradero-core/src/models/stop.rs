use super::analysis::AnalysisMap;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

pub const DEFAULT_CODE: &str = "S/C";
pub const DEFAULT_LOCATION: &str = "Sin ubicación";

/// One row of a stop's characteristics table
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacteristicRow {
    #[serde(default, deserialize_with = "lenient_text")]
    pub caracteristica: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub cumplimiento: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub observacion: String,
}

impl CharacteristicRow {
    pub fn new(
        caracteristica: impl Into<String>,
        cumplimiento: impl Into<String>,
        observacion: impl Into<String>,
    ) -> Self {
        Self {
            caracteristica: caracteristica.into(),
            cumplimiento: cumplimiento.into(),
            observacion: observacion.into(),
        }
    }

    pub fn cells(&self) -> [String; 3] {
        [
            self.caracteristica.trim().to_string(),
            self.cumplimiento.trim().to_string(),
            self.observacion.trim().to_string(),
        ]
    }
}

/// Accept strings, numbers and booleans; `null` becomes empty
fn lenient_text<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => String::new(),
        Value::String(s) => s,
        other => other.to_string(),
    })
}

/// A stop as it goes into chapter 3
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "StopPayload")]
pub struct StopRecord {
    pub codigo: String,
    pub ubicacion: String,
    pub analisis: AnalysisMap,
    pub tabla: Vec<CharacteristicRow>,
}

impl StopRecord {
    pub fn new(codigo: impl Into<String>, ubicacion: impl Into<String>) -> Self {
        Self {
            codigo: codigo.into(),
            ubicacion: ubicacion.into(),
            analisis: AnalysisMap::new(),
            tabla: Vec::new(),
        }
    }

    pub fn heading(&self, index: usize) -> String {
        format!("3.{} {} - {}", index, self.codigo, self.ubicacion)
    }
}

#[derive(Debug, Default, Deserialize)]
struct StopInfo {
    codigo: Option<String>,
    ubicacion: Option<String>,
}

/// Wire shape; the code and location may be nested or flat
#[derive(Debug, Default, Deserialize)]
struct StopPayload {
    #[serde(alias = "infoParadero")]
    info_paradero: Option<StopInfo>,
    codigo: Option<String>,
    codigo_paradero: Option<String>,
    ubicacion: Option<String>,
    ubicacion_paradero: Option<String>,
    analisis: Option<AnalysisMap>,
    tabla: Option<Vec<CharacteristicRow>>,
}

fn first_present(candidates: [Option<String>; 3], default: &str) -> String {
    candidates
        .into_iter()
        .flatten()
        .find(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}

impl From<StopPayload> for StopRecord {
    fn from(payload: StopPayload) -> Self {
        let info = payload.info_paradero.unwrap_or_default();
        Self {
            codigo: first_present(
                [info.codigo, payload.codigo, payload.codigo_paradero],
                DEFAULT_CODE,
            ),
            ubicacion: first_present(
                [info.ubicacion, payload.ubicacion, payload.ubicacion_paradero],
                DEFAULT_LOCATION,
            ),
            analisis: payload.analisis.unwrap_or_default(),
            tabla: payload.tabla.unwrap_or_default(),
        }
    }
}
