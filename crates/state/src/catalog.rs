//! Activity catalog loading and seeding.

use std::path::Path;

use busters_model::{builtin_catalog, Catalog};
use tracing::info;

use crate::persistence::{read_json_or_default, write_json_atomic};
use crate::StoreError;

/// Read the catalog; missing or undecodable files read as empty.
pub fn load_catalog(path: &Path) -> Catalog {
    read_json_or_default(path, "activity catalog")
}

/// Read the catalog, substituting the built-in seed when it is empty.
pub fn load_catalog_or_builtin(path: &Path) -> Catalog {
    let catalog = load_catalog(path);
    if catalog.is_empty() {
        info!(target: "busters::state", path = %path.display(), "catalog empty, using built-in activities");
        return builtin_catalog();
    }
    catalog
}

/// Write the built-in catalog to `path`.
///
/// An existing file is left alone unless `force` is set. Returns whether the
/// file was written.
pub fn seed_catalog(path: &Path, force: bool) -> Result<bool, StoreError> {
    if path.exists() && !force {
        info!(target: "busters::state", path = %path.display(), "catalog exists, not overwriting");
        return Ok(false);
    }
    let catalog = builtin_catalog();
    write_json_atomic(path, &catalog)?;
    info!(target: "busters::state", path = %path.display(), activities = catalog.len(), "seeded catalog");
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("activities.json");
        assert!(seed_catalog(&path, false).unwrap());

        let catalog = load_catalog(&path);
        assert_eq!(catalog, builtin_catalog());
        assert_eq!(catalog.keys().next().map(String::as_str), Some("activity1"));
    }

    #[test]
    fn seed_respects_existing_file_unless_forced() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("activities.json");
        std::fs::write(&path, "{}").unwrap();

        assert!(!seed_catalog(&path, false).unwrap());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "{}");

        assert!(seed_catalog(&path, true).unwrap());
        assert_eq!(load_catalog(&path).len(), 30);
    }

    #[test]
    fn empty_catalog_falls_back_to_builtin() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("activities.json");
        std::fs::write(&path, "{}").unwrap();
        assert!(load_catalog(&path).is_empty());
        assert_eq!(load_catalog_or_builtin(&path).len(), 30);
    }

    #[test]
    fn custom_catalog_is_used_as_is() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("activities.json");
        std::fs::write(
            &path,
            r#"{"picnic": {"name": "Picnic", "duration": 90, "cost": 15.0, "people": 2, "mood": "relaxed", "description": "Eat outside."}}"#,
        )
        .unwrap();
        let catalog = load_catalog_or_builtin(&path);
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog["picnic"].name, "Picnic");
    }
}
