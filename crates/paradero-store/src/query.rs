//! Drive search query and parameter builders
//!
//! Everything here is pure so the exact strings sent to Drive can be tested
//! without a network.

use paradero_core::models::{DriveFile, SearchScope};
use reqwest::Url;

pub const FOLDER_MIME_TYPE: &str = "application/vnd.google-apps.folder";

/// Upper bound of images returned for one folder
pub const IMAGE_PAGE_SIZE: u32 = 200;

pub const RESOLVE_FIELDS: &str = "files(id,name)";
pub const IMAGE_FIELDS: &str = "files(id,name,mimeType,webViewLink)";

/// Quote a value for use inside a Drive query literal
pub fn escape_literal(value: &str) -> String {
    value.replace('\\', "\\\\").replace('\'', "\\'")
}

/// Exclude trashed items unless the query already talks about trash
pub fn scoped_query(query: &str) -> String {
    if query.to_lowercase().contains("trashed") {
        query.to_string()
    } else {
        format!("({}) and trashed = false", query)
    }
}

pub fn folder_query(folder_name: &str) -> String {
    format!(
        "name = '{}' and mimeType = '{}'",
        escape_literal(folder_name.trim()),
        FOLDER_MIME_TYPE
    )
}

pub fn file_in_folder_query(folder_id: &str, file_name: &str) -> String {
    format!(
        "'{}' in parents and name = '{}'",
        escape_literal(folder_id),
        escape_literal(file_name)
    )
}

pub fn images_query(folder_id: &str) -> String {
    format!(
        "'{}' in parents and mimeType contains 'image/' and trashed = false",
        escape_literal(folder_id)
    )
}

/// Flags that widen or narrow a search to shared drives
pub fn scope_params(scope: &SearchScope) -> Vec<(&'static str, String)> {
    match scope {
        SearchScope::Default => Vec::new(),
        SearchScope::AllDrives => vec![
            ("supportsAllDrives", "true".to_string()),
            ("includeItemsFromAllDrives", "true".to_string()),
            ("corpora", "allDrives".to_string()),
        ],
        SearchScope::SharedDrive(drive_id) => vec![
            ("supportsAllDrives", "true".to_string()),
            ("includeItemsFromAllDrives", "true".to_string()),
            ("corpora", "drive".to_string()),
            ("driveId", drive_id.clone()),
        ],
    }
}

/// `files.list` parameters for a single-match lookup
pub fn resolve_params(query: &str, scope: &SearchScope) -> Vec<(&'static str, String)> {
    let mut params = vec![
        ("q", scoped_query(query)),
        ("fields", RESOLVE_FIELDS.to_string()),
        ("spaces", "drive".to_string()),
        ("pageSize", "1".to_string()),
    ];
    params.extend(scope_params(scope));
    params
}

/// `files.list` parameters for the images of a folder, across all drives
pub fn images_params(folder_id: &str) -> Vec<(&'static str, String)> {
    vec![
        ("q", images_query(folder_id)),
        ("fields", IMAGE_FIELDS.to_string()),
        ("pageSize", IMAGE_PAGE_SIZE.to_string()),
        ("supportsAllDrives", "true".to_string()),
        ("includeItemsFromAllDrives", "true".to_string()),
    ]
}

/// Drop anything that is not an image, whatever the server returned
pub fn filter_images(files: Vec<DriveFile>) -> Vec<DriveFile> {
    files.into_iter().filter(DriveFile::is_image).collect()
}

/// Drive ids only use URL-safe characters; anything else never reaches the API
pub fn is_file_id(id: &str) -> bool {
    !id.is_empty()
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

/// `{api_base}/files/{id}?alt=media`, the id pushed as one encoded path segment
pub fn media_url(api_base: &str, file_id: &str) -> Result<Url, String> {
    let mut url =
        Url::parse(&format!("{}/files", api_base)).map_err(|e| format!("Invalid Drive URL: {}", e))?;
    url.path_segments_mut()
        .map_err(|_| format!("Invalid Drive URL: {} cannot hold a path", api_base))?
        .push(file_id);
    url.query_pairs_mut()
        .append_pair("alt", "media")
        .append_pair("supportsAllDrives", "true");
    Ok(url)
}
