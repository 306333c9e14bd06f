/// One row of the inspection rubric
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Characteristic {
    pub name: &'static str,
    pub options: &'static [&'static str],

    /// The AI answers `{seleccion, comentario}` instead of a bare option
    pub compound: bool,
}

impl Characteristic {
    const fn simple(name: &'static str, options: &'static [&'static str]) -> Self {
        Self {
            name,
            options,
            compound: false,
        }
    }

    pub fn allows(&self, value: &str) -> bool {
        self.options.contains(&value.trim())
    }
}

const YES_NO: &[&str] = &["Sí", "No"];

/// The fixed characteristic catalogue, in table order
pub const RUBRIC: &[Characteristic] = &[
    Characteristic::simple("Posee refugio", YES_NO),
    Characteristic::simple("Estándar del refugio", &["DTPM", "No es DTPM", "N.A."]),
    Characteristic {
        name: "Estado de conservación del refugio",
        options: &["Sin refugio presente", "Deficiente", "Regular", "Bueno"],
        compound: true,
    },
    Characteristic::simple("Posee basurero", YES_NO),
    Characteristic::simple("Posee señal de parada", YES_NO),
    Characteristic::simple("Señal cumple norma gráfica", &["Sí", "No", "N.A."]),
    Characteristic::simple(
        "Estado de conservación de la señal",
        &["Sin señal presente", "Deficiente", "Regular", "Bueno"],
    ),
    Characteristic::simple("Iluminación", &["Sin iluminación presente", "Deficiente", "Buena"]),
    Characteristic::simple("Posee andén", YES_NO),
    Characteristic::simple(
        "Estado de conservación del andén",
        &["Sin andén presente", "Deficiente", "Regular", "Bueno"],
    ),
    Characteristic::simple("Posee conexión a la vereda", YES_NO),
    Characteristic::simple("Posee huella podo táctil al borde del andén", YES_NO),
    Characteristic::simple("Demarcación del cajón de parada", &["Sí posee", "No posee"]),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rubric_shape() {
        assert_eq!(RUBRIC.len(), 13);
        assert_eq!(RUBRIC[0].name, "Posee refugio");
        assert_eq!(RUBRIC[12].name, "Demarcación del cajón de parada");

        let compound: Vec<_> = RUBRIC.iter().filter(|c| c.compound).map(|c| c.name).collect();
        assert_eq!(compound, vec!["Estado de conservación del refugio"]);
    }

    #[test]
    fn test_allows() {
        let lighting = RUBRIC[7];
        assert_eq!(lighting.name, "Iluminación");
        assert!(lighting.allows("Buena"));
        assert!(lighting.allows(" Buena "));
        assert!(!lighting.allows("Bueno"));
    }
}
