use serde::Serialize;

/// Update descriptor assembled from an appcast document.
///
/// Every field starts empty; elements absent from the feed leave the
/// corresponding field untouched.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct Appcast {
    pub download_url: String,
    pub version: String,
    pub short_version_string: String,
    pub title: String,
    pub description: String,
    pub release_notes_url: String,
}
