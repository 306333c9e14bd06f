use paradero_core::models::{DriveFileIds, ProjectInfo, StopRecord};
use serde::Deserialize;

/// Folder listing request; a folder id wins over a folder name
#[derive(Debug, Default, Deserialize)]
pub struct ListImagesRequest {
    #[serde(default)]
    pub info_proyecto: Option<ProjectInfo>,
    #[serde(default)]
    pub folder_name: Option<String>,
    #[serde(default)]
    pub folder_id: Option<String>,
}

impl ListImagesRequest {
    pub fn folder_id(&self) -> Option<&str> {
        non_blank(self.folder_id.as_deref())
    }

    /// `info_proyecto.folder_name` first, then the top-level `folder_name`
    pub fn folder_name(&self) -> Option<&str> {
        self.info_proyecto
            .as_ref()
            .and_then(ProjectInfo::folder_name)
            .or_else(|| non_blank(self.folder_name.as_deref()))
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct AnalyzeImageRequest {
    #[serde(default)]
    pub image_ids: Option<Vec<String>>,
    #[serde(default)]
    pub prompt_type: Option<String>,
    #[serde(default)]
    pub codigo_paradero: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct SaveDescriptionRequest {
    #[serde(default)]
    pub draft_id: Option<String>,
    #[serde(default, alias = "type")]
    pub prompt_type: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image_ids: Option<Vec<String>>,
}

#[derive(Debug, Default, Deserialize)]
pub struct FillTableRequest {
    #[serde(default)]
    pub draft_id: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct GenerateReportRequest {
    #[serde(default)]
    pub draft_id: Option<String>,
    #[serde(default)]
    pub info_proyecto: Option<ProjectInfo>,
    #[serde(default)]
    pub paraderos: Option<Vec<StopRecord>>,
    #[serde(default)]
    pub drive_file_ids: Option<DriveFileIds>,
}

/// Trimmed value, `None` when absent or blank
pub fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_folder_name_precedence() {
        let request: ListImagesRequest = serde_json::from_str(
            r#"{"info_proyecto": {"folder_name": " Proyecto A "}, "folder_name": "Proyecto B"}"#,
        )
        .unwrap();
        assert_eq!(request.folder_name(), Some("Proyecto A"));

        let request: ListImagesRequest =
            serde_json::from_str(r#"{"info_proyecto": null, "folder_name": "Proyecto B"}"#).unwrap();
        assert_eq!(request.folder_name(), Some("Proyecto B"));
        assert_eq!(request.folder_id(), None);
    }

    #[test]
    fn test_legacy_type_key() {
        let request: SaveDescriptionRequest =
            serde_json::from_str(r#"{"type": "senal", "description": "Señal nueva", "image_ids": null}"#)
                .unwrap();
        assert_eq!(request.prompt_type.as_deref(), Some("senal"));
        assert_eq!(request.image_ids, None);
    }
}
