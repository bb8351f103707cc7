//! Object key construction.

use uuid::Uuid;

/// Strip a client-supplied filename down to a safe key component.
///
/// Keeps alphanumerics, dashes, underscores and dots; everything else
/// becomes an underscore. Leading dots are dropped so a key can never
/// reference a hidden or relative path segment.
pub fn sanitize_filename(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '.' {
                c
            } else {
                '_'
            }
        })
        .collect();

    let cleaned = cleaned.trim_start_matches('.').to_string();
    if cleaned.is_empty() {
        "upload".to_string()
    } else {
        cleaned
    }
}

/// Build a unique object key for a client upload.
pub fn unique_upload_key(filename: &str) -> String {
    format!("uploads/{}_{}", Uuid::new_v4(), sanitize_filename(filename))
}

/// Build a unique object key for a published artifact.
pub fn unique_output_key(request_id: &Uuid, extension: &str) -> String {
    format!("outputs/{}.{}", request_id, extension)
}
