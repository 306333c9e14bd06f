/// Chapter-relative figure and table counters for one report build
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Numbering {
    chapter: u32,
    figure: u32,
    table: u32,
}

impl Default for Numbering {
    fn default() -> Self {
        Self {
            chapter: 1,
            figure: 1,
            table: 1,
        }
    }
}

impl Numbering {
    pub fn new() -> Self {
        Self::default()
    }

    /// Switch chapter; both counters restart at 1
    pub fn enter_chapter(&mut self, chapter: u32) {
        self.chapter = chapter;
        self.figure = 1;
        self.table = 1;
    }

    /// `Figura {chapter}.{n}. {description}`, then advance
    pub fn next_figure(&mut self, description: &str) -> String {
        let label = format!("Figura {}.{}. {}", self.chapter, self.figure, description.trim());
        self.figure += 1;
        label
    }

    /// `Cuadro {chapter}.{n}. {description}`, then advance
    pub fn next_table(&mut self, description: &str) -> String {
        let label = format!("Cuadro {}.{}. {}", self.chapter, self.table, description.trim());
        self.table += 1;
        label
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_labels_and_reset() {
        let mut numbering = Numbering::new();
        numbering.enter_chapter(2);
        assert_eq!(numbering.next_figure("Ubicación del Proyecto"), "Figura 2.1. Ubicación del Proyecto");
        assert_eq!(numbering.next_figure("Otra"), "Figura 2.2. Otra");
        assert_eq!(numbering.next_table(" Resumen "), "Cuadro 2.1. Resumen");

        numbering.enter_chapter(3);
        assert_eq!(numbering.next_figure("Mapa"), "Figura 3.1. Mapa");
        assert_eq!(numbering.next_table("Tabla"), "Cuadro 3.1. Tabla");
    }

    proptest! {
        #[test]
        fn prop_captions_increase_by_one(figures in 1usize..20, tables in 1usize..20, chapter in 1u32..9) {
            let mut numbering = Numbering::new();
            numbering.enter_chapter(chapter);
            for n in 1..=figures {
                let expected = format!("Figura {}.{}. x", chapter, n);
                prop_assert_eq!(numbering.next_figure("x"), expected);
            }
            for n in 1..=tables {
                let expected = format!("Cuadro {}.{}. x", chapter, n);
                prop_assert_eq!(numbering.next_table("x"), expected);
            }
        }
    }
}
