//! URL resolution for manifests and the resources they reference.

use url::Url;

use crate::ManifestError;


fn is_absolute_url(s: &str) -> bool {
    s.starts_with("http://") ||
        s.starts_with("https://") ||
        s.starts_with("file://") ||
        s.starts_with("ftp://")
}

fn invalid_url(why: &str, e: impl std::error::Error) -> ManifestError {
    ManifestError::InvalidUrl(format!("{why}: {e}"))
}

/// Truncate a manifest URI at its last path segment, dropping any query and fragment. The result
/// is the base against which relative references inside the document are resolved, unless the
/// document declares its own BaseURL.
pub fn normalize_base_url(uri: &str) -> Result<String, ManifestError> {
    let mut url = Url::parse(uri)
        .map_err(|e| invalid_url("parsing manifest URI", e))?;
    url.set_query(None);
    url.set_fragment(None);
    if let Ok(mut segments) = url.path_segments_mut() {
        segments.pop();
        segments.push("");
    }
    Ok(url.to_string())
}

/// Resolve a possibly-relative reference against a base URL. An empty reference resolves to the
/// base itself, and an already-absolute reference is returned unchanged.
pub fn resolve_url(base: &str, reference: &str) -> Result<String, ManifestError> {
    if reference.is_empty() {
        return Ok(base.to_string());
    }
    if is_absolute_url(reference) {
        return Ok(reference.to_string());
    }
    let base = Url::parse(base)
        .map_err(|e| invalid_url("parsing base URL", e))?;
    let joined = base.join(reference)
        .map_err(|e| invalid_url("joining URL reference", e))?;
    Ok(joined.to_string())
}
