use serde::{Deserialize, Serialize};

/// Outcome of a remote lookup.
///
/// Storage operations never raise; they report which of the three cases
/// happened and leave the placeholder-or-error decision to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup<T> {
    Found(T),
    NotFound,
    TransportError(String),
}

impl<T> Lookup<T> {
    /// Discard the failure reason
    pub fn found(self) -> Option<T> {
        match self {
            Lookup::Found(value) => Some(value),
            _ => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Lookup<U> {
        match self {
            Lookup::Found(value) => Lookup::Found(f(value)),
            Lookup::NotFound => Lookup::NotFound,
            Lookup::TransportError(reason) => Lookup::TransportError(reason),
        }
    }
}

/// Where a name query is allowed to look
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SearchScope {
    /// The service account's own root only
    #[default]
    Default,
    /// Own root plus every shared drive the account can see
    AllDrives,
    /// Exactly one shared drive
    SharedDrive(String),
}

/// A file entry as listed from a folder
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DriveFile {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub mime_type: Option<String>,
    #[serde(default)]
    pub web_view_link: Option<String>,
}

impl DriveFile {
    pub fn is_image(&self) -> bool {
        self.mime_type.as_deref().is_some_and(|m| m.starts_with("image/"))
    }
}

/// Files the report expects next to the photos in the project folder
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WellKnownFile {
    Tables,
    Logo,
    ProjectLocation,
    StopsLocation,
}

impl WellKnownFile {
    pub const ALL: [WellKnownFile; 4] = [
        WellKnownFile::Tables,
        WellKnownFile::Logo,
        WellKnownFile::ProjectLocation,
        WellKnownFile::StopsLocation,
    ];

    /// File names tried in order; the first hit wins
    pub fn candidates(&self) -> &'static [&'static str] {
        match self {
            WellKnownFile::Tables => &["Tablas.xlsx"],
            WellKnownFile::Logo => &["logo2.jpg", "logo2.png", "logo.jpg", "logo.png"],
            WellKnownFile::ProjectLocation => &["ubicacion.png", "ubicacion.jpg"],
            WellKnownFile::StopsLocation => {
                &["ubicacion_paraderos.png", "ubicacion_paraderos.jpg"]
            }
        }
    }
}

/// Resolved identifiers of the well-known files
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DriveFileIds {
    #[serde(default, alias = "tablas")]
    pub tablas_id: Option<String>,
    #[serde(default, alias = "logo")]
    pub logo_id: Option<String>,
    #[serde(default, alias = "ubicacion_proyecto")]
    pub img_ubicacion_proyecto_id: Option<String>,
    #[serde(default, alias = "ubicacion_paradas")]
    pub img_ubicacion_paradas_id: Option<String>,
}

impl DriveFileIds {
    pub fn get(&self, file: WellKnownFile) -> Option<&str> {
        let slot = match file {
            WellKnownFile::Tables => &self.tablas_id,
            WellKnownFile::Logo => &self.logo_id,
            WellKnownFile::ProjectLocation => &self.img_ubicacion_proyecto_id,
            WellKnownFile::StopsLocation => &self.img_ubicacion_paradas_id,
        };
        slot.as_deref().filter(|id| !id.trim().is_empty())
    }

    pub fn set(&mut self, file: WellKnownFile, id: Option<String>) {
        let slot = match file {
            WellKnownFile::Tables => &mut self.tablas_id,
            WellKnownFile::Logo => &mut self.logo_id,
            WellKnownFile::ProjectLocation => &mut self.img_ubicacion_proyecto_id,
            WellKnownFile::StopsLocation => &mut self.img_ubicacion_paradas_id,
        };
        *slot = id;
    }

    pub fn is_empty(&self) -> bool {
        WellKnownFile::ALL.iter().all(|f| self.get(*f).is_none())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_image() {
        let file = |mime: Option<&str>| DriveFile {
            id: "1".into(),
            name: "x".into(),
            mime_type: mime.map(String::from),
            web_view_link: None,
        };
        assert!(file(Some("image/jpeg")).is_image());
        assert!(!file(Some("application/pdf")).is_image());
        assert!(!file(None).is_image());
    }

    #[test]
    fn test_file_ids_accept_legacy_aliases() {
        let ids: DriveFileIds =
            serde_json::from_str(r#"{"tablas": "t1", "logo_id": "l1", "ubicacion_paradas": "p1"}"#)
                .unwrap();
        assert_eq!(ids.get(WellKnownFile::Tables), Some("t1"));
        assert_eq!(ids.get(WellKnownFile::Logo), Some("l1"));
        assert_eq!(ids.get(WellKnownFile::StopsLocation), Some("p1"));
        assert_eq!(ids.get(WellKnownFile::ProjectLocation), None);
    }

    #[test]
    fn test_blank_ids_count_as_empty() {
        let mut ids = DriveFileIds::default();
        assert!(ids.is_empty());
        ids.set(WellKnownFile::Logo, Some("  ".into()));
        assert!(ids.is_empty());
        ids.set(WellKnownFile::Logo, Some("abc".into()));
        assert!(!ids.is_empty());
    }

    #[test]
    fn test_lookup_map_keeps_failure() {
        let failed: Lookup<u8> = Lookup::TransportError("timeout".into());
        assert_eq!(failed.map(|v| v + 1), Lookup::TransportError("timeout".into()));
        assert_eq!(Lookup::Found(1).map(|v| v + 1).found(), Some(2));
    }
}
