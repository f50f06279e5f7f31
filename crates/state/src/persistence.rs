use std::io::Write;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::warn;

use crate::StoreError;

/// Read a JSON document, falling back to `T::default()` when the file is
/// missing or does not decode. Never fails.
pub(crate) fn read_json_or_default<T>(path: &Path, what: &str) -> T
where
    T: DeserializeOwned + Default,
{
    let text = match std::fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!(target: "busters::state", path = %path.display(), "{what} not found, starting empty");
            return T::default();
        }
        Err(e) => {
            warn!(target: "busters::state", path = %path.display(), error = %e, "failed to read {what}, starting empty");
            return T::default();
        }
    };
    match serde_json::from_str(&text) {
        Ok(doc) => doc,
        Err(e) => {
            warn!(target: "busters::state", path = %path.display(), error = %e, "failed to decode {what}, starting empty");
            T::default()
        }
    }
}

/// Write `value` as pretty JSON, atomically: a temp file in the same
/// directory is renamed over the target.
pub(crate) fn write_json_atomic<T: Serialize + ?Sized>(
    path: &Path,
    value: &T,
) -> Result<(), StoreError> {
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(parent).map_err(|e| StoreError::io(parent, e))?;

    let data = serde_json::to_string_pretty(value)?;
    let mut tmp = tempfile::NamedTempFile::new_in(parent).map_err(|e| StoreError::io(parent, e))?;
    let written = writeln!(tmp, "{data}").and_then(|()| tmp.flush());
    written.map_err(|e| StoreError::io(tmp.path(), e))?;
    tmp.persist(path).map_err(|e| StoreError::io(path, e.error))?;
    Ok(())
}
