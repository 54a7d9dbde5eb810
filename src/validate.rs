//! Cross-entity identifier checks over an assembled manifest.

use std::collections::HashSet;

use crate::ManifestError;
use crate::assemble::Manifest;


// Identifiers must be unique so that a playback engine can correlate entities across manifest
// updates. Duplicate period ids, or duplicate adaptation-set ids within one period, abort
// assembly.
pub(crate) fn check_manifest_ids(manifest: &Manifest) -> Result<(), ManifestError> {
    let mut period_ids = HashSet::new();
    for period in &manifest.periods {
        if !period_ids.insert(period.id.as_str()) {
            return Err(ManifestError::DuplicateId(format!("Period {}", period.id)));
        }
        let mut adaptation_ids = HashSet::new();
        for adaptation in &period.adaptations {
            if let Some(id) = adaptation.id {
                if !adaptation_ids.insert(id) {
                    return Err(ManifestError::DuplicateId(
                        format!("AdaptationSet {id} in Period {}", period.id)));
                }
            }
        }
    }
    Ok(())
}
