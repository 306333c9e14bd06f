//! Prompt templates for photo description

use paradero_core::models::Category;

/// Used for categories without a dedicated template
pub const FALLBACK_PROMPT: &str = "Describe la imagen.";

/// Stop code used in the general prompt when the caller sends none
pub const UNSPECIFIED_CODE: &str = "No especificado";

const GENERAL_TEMPLATE: &str = "Eres un asistente experto en ingeniería de transporte y vialidad, especializado en la evaluación de paraderos de autobuses. Tu tarea es analizar la imagen proporcionada para el paradero con código {codigo_paradero} y generar una descripción técnica y concisa. En tu descripción, debes identificar claramente la presencia y el estado de los siguientes elementos: refugio, andén, banca, señal informativa, demarcación en el pavimento, y si existe o no huella podo táctil. Finalmente, basándote en todos los elementos observados, determina si el paradero parece cumplir o no con el estándar de diseño del DTPM (Directorio de Transporte Público Metropolitano) y justifica brevemente por qué. Formato: Párrafo único y directo. No uses listas ni puntos.";

const REFUGIO_ANDEN_PROMPT: &str = concat!(
    "Eres un inspector de infraestructura de transporte. Analiza la(s) imagen(es) de un refugio y andén de paradero. ",
    "En tu descripción, evalúa los siguientes puntos clave: ",
    "1. Refugio: Estado general de la estructura, materiales y su limpieza (busca rayados o basura). ",
    "2. Techumbre: Condición y protección que ofrece contra sol y lluvia. ",
    "3. Andén: Estado del pavimento y, muy importante, la presencia o ausencia de baldosas y huellas podo táctiles. ",
    "4. Iluminación: Indica si se observa o no iluminación artificial. ",
    "Genera un párrafo único y conciso que resuma tus hallazgos."
);

const SENAL_PROMPT: &str = concat!(
    "Eres un asistente técnico que describe evidencia visual para un informe. Tu única tarea es describir el estado de la ",
    "señalización y demarcación de un paradero de bus, basándote exclusivamente en la imagen proporcionada. ",
    "1. Sobre la señal (el letrero y su poste): Describe su estado físico. ¿Se ve nuevo, desgastado, dañado o rayado? ",
    "2. Sobre la normativa de la señal: Visualmente, ¿el diseño del letrero (colores, tipografía) parece cumplir con los estándares gráficos del DTPM? ",
    "3. Sobre la demarcación en el pavimento: Describe lo que ves en el suelo. ¿Hay un 'cajón de detención' pintado para el bus? ¿Está visible o desgastado? ",
    "Reglas importantes: No incluyas un título en tu respuesta. No sugieras inspecciones adicionales. Sintetiza todo en un solo párrafo."
);

/// Prompt for a category key. Only the general prompt uses the stop code.
pub fn prompt_for(prompt_type: &str, codigo_paradero: Option<&str>) -> String {
    match Category::from_key(prompt_type) {
        Some(Category::General) => {
            let codigo = codigo_paradero
                .map(str::trim)
                .filter(|c| !c.is_empty())
                .unwrap_or(UNSPECIFIED_CODE);
            GENERAL_TEMPLATE.replace("{codigo_paradero}", codigo)
        }
        Some(Category::RefugioAnden) => REFUGIO_ANDEN_PROMPT.to_string(),
        Some(Category::Senal) => SENAL_PROMPT.to_string(),
        None => FALLBACK_PROMPT.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_general_prompt_embeds_code() {
        let prompt = prompt_for("general", Some("PA1234"));
        assert!(prompt.contains("paradero con código PA1234 y generar"));
        assert!(!prompt.contains("{codigo_paradero}"));
    }

    #[test]
    fn test_general_prompt_default_code() {
        assert!(prompt_for("general", None).contains("código No especificado"));
        assert!(prompt_for("general", Some("  ")).contains("código No especificado"));
    }

    #[test]
    fn test_category_prompts() {
        assert!(prompt_for("refugio_anden", Some("X")).starts_with("Eres un inspector"));
        assert!(prompt_for("senal", None).contains("cajón de detención"));
        assert!(!prompt_for("senal", Some("PA1")).contains("PA1"));
    }

    #[test]
    fn test_unknown_category_falls_back() {
        assert_eq!(prompt_for("techumbre", Some("PA1")), FALLBACK_PROMPT);
    }
}
