//! Rubric extraction: turn saved descriptions into the characteristics mapping

use crate::ports::Generator;
use paradero_core::error::{ParaderoError, Result};
use paradero_core::models::{missing_baseline, AnalysisMap, Category, Characteristic};
use serde_json::{Map, Value};

pub const MISSING_DESCRIPTION: &str = "No disponible.";

/// Fail unless every baseline category has a saved description
pub fn ensure_baseline(analysis: &AnalysisMap) -> Result<()> {
    let missing = missing_baseline(analysis);
    if missing.is_empty() {
        return Ok(());
    }
    let keys: Vec<&str> = missing.iter().map(Category::key).collect();
    Err(ParaderoError::Precondition(format!(
        "Primero debe generar y guardar las 3 descripciones (faltan: {}).",
        keys.join(", ")
    )))
}

fn description<'a>(analysis: &'a AnalysisMap, category: Category) -> &'a str {
    analysis
        .get(category.key())
        .map(|entry| entry.description.as_str())
        .unwrap_or(MISSING_DESCRIPTION)
}

/// The three saved descriptions as one labelled context block
pub fn compose_context(analysis: &AnalysisMap) -> String {
    format!(
        "Descripción General: {}\n\nDescripción de Refugio y Andén: {}\n\nDescripción de Señal y Demarcación: {}",
        description(analysis, Category::General),
        description(analysis, Category::RefugioAnden),
        description(analysis, Category::Senal),
    )
}

fn option_line(characteristic: &Characteristic) -> String {
    let options: Vec<String> = characteristic
        .options
        .iter()
        .map(|o| format!("'{}'", o))
        .collect();
    format!(
        "- Para '{}', elige una de estas opciones: [{}]\n",
        characteristic.name,
        options.join(", ")
    )
}

pub fn build_extraction_prompt(context: &str, rubric: &[Characteristic]) -> String {
    let options: String = rubric.iter().map(option_line).collect();

    let special_rules: String = rubric
        .iter()
        .filter(|c| c.compound)
        .map(|c| {
            format!(
                "REGLA ESPECIAL: Para la característica '{}', el valor en el JSON debe ser un objeto con dos claves: \
                 'seleccion' (con la opción elegida) y 'comentario' (con una observación MUY BREVE de máximo 5 palabras, \
                 como 'Falta limpieza' o 'Estructura en buen estado').\n",
                c.name
            )
        })
        .collect();

    format!(
        "Eres un analista técnico que extrae datos estructurados de informes de inspección. A continuación te entrego el contexto completo \
         de un paradero de autobús:\n\n--- CONTEXTO ---\n{context}\n\n--- FIN DEL CONTEXTO ---\n\n\
         Tu tarea es leer el contexto y rellenar un objeto JSON. Para cada característica de la siguiente lista, elige la opción que mejor la describa.\n\
         Lista de características y sus opciones permitidas:\n{options}\n\
         {special_rules}\
         Responde únicamente con un objeto JSON válido, sin explicaciones ni texto adicional."
    )
}

/// Remove Markdown code fences around a model reply
pub fn strip_code_fences(text: &str) -> String {
    text.trim()
        .replace("```json", "")
        .replace("```JSON", "")
        .replace("```", "")
        .trim()
        .to_string()
}

/// Parse a model reply that must be a single JSON object
pub fn parse_extraction(text: &str) -> Result<Map<String, Value>> {
    let cleaned = strip_code_fences(text);
    match serde_json::from_str::<Value>(&cleaned) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(other) => Err(ParaderoError::ExtractionParse(format!(
            "expected a JSON object, got {}",
            json_kind(&other)
        ))),
        Err(e) => Err(ParaderoError::ExtractionParse(e.to_string())),
    }
}

/// Extracted names the rubric does not know, or whose choice is not one of its options.
/// Compound characteristics are checked on their `seleccion`.
pub fn off_rubric(fields: &Map<String, Value>, rubric: &[Characteristic]) -> Vec<String> {
    fields
        .iter()
        .filter(|&(name, value)| {
            let Some(characteristic) = rubric.iter().find(|c| c.name == name.trim()) else {
                return true;
            };
            let selected = match value.get("seleccion") {
                Some(selected) if characteristic.compound => selected,
                _ => value,
            };
            !selected.as_str().is_some_and(|v| characteristic.allows(v))
        })
        .map(|(name, _)| name.clone())
        .collect()
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// One text-only generation call, parsed into the characteristics mapping.
/// Not retried on failure.
pub async fn extract_fields(
    generator: &dyn Generator,
    context: &str,
    rubric: &[Characteristic],
) -> Result<Map<String, Value>> {
    let prompt = build_extraction_prompt(context, rubric);
    let reply = generator.generate(&prompt, &[]).await?;

    let fields = parse_extraction(&reply).inspect_err(|e| {
        tracing::error!(error = %e, reply_chars = reply.len(), "Extraction reply rejected");
    })?;

    let unexpected = off_rubric(&fields, rubric);
    if !unexpected.is_empty() {
        tracing::warn!(fields = ?unexpected, "Extracted values outside the rubric");
    }

    tracing::info!(fields = fields.len(), "Characteristics extracted");
    Ok(fields)
}
