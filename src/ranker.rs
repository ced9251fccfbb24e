//! Imágenes más recientes de un directorio, ordenadas por fecha de
//! modificación y enriquecidas con su sidecar JSON opcional.

use std::{
    fs,
    path::{Path, PathBuf},
    time::SystemTime,
};

use anyhow::{anyhow, Context, Result};
use chrono::{DateTime, Utc};
use serde_json::Value;
use tracing::{debug, warn};

use crate::{
    images::{file_name, format_title, list_images, public_url},
    models::{ImageRecord, SidecarMetadata},
};

struct Candidate {
    path: PathBuf,
    name: String,
    modified: DateTime<Utc>,
}

/// Devuelve como mucho `limit` imágenes de `dir`, la más reciente primero.
/// Los empates de fecha se resuelven por nombre de fichero.
pub fn rank_recent(
    dir: &Path,
    url_prefix: &str,
    limit: usize,
    extensions: &[&str],
) -> Result<Vec<ImageRecord>> {
    if !dir.exists() {
        debug!("Directorio de recientes inexistente: {}", dir.display());
        return Ok(Vec::new());
    }

    let mut candidates: Vec<Candidate> = list_images(dir, extensions)?
        .into_iter()
        .map(|path| Candidate {
            name: file_name(&path),
            modified: modified_or_epoch(&path),
            path,
        })
        .collect();

    candidates.sort_by(|a, b| b.modified.cmp(&a.modified).then_with(|| a.name.cmp(&b.name)));
    candidates.truncate(limit);

    let records = candidates
        .into_iter()
        .map(|candidate| {
            let mut record = ImageRecord::new(
                public_url(url_prefix, &candidate.name),
                format_title(&candidate.name),
                None,
            );
            match load_sidecar(&candidate.path) {
                Ok(Some(sidecar)) => record.merge_sidecar(sidecar),
                Ok(None) => {}
                Err(err) => warn!(
                    "Metadatos JSON inválidos para {}: {:#}",
                    candidate.name, err
                ),
            }
            record
        })
        .collect();

    Ok(records)
}

/// Fecha de modificación; sin fecha legible la imagen queda al final.
fn modified_or_epoch(path: &Path) -> DateTime<Utc> {
    let modified = fs::metadata(path)
        .and_then(|m| m.modified())
        .unwrap_or(SystemTime::UNIX_EPOCH);
    DateTime::<Utc>::from(modified)
}

/// Lee `<imagen>.json` si existe. Sólo se acepta un objeto JSON.
pub fn load_sidecar(image_path: &Path) -> Result<Option<SidecarMetadata>> {
    let sidecar_path = image_path.with_extension("json");
    if !sidecar_path.is_file() {
        return Ok(None);
    }

    let raw = fs::read_to_string(&sidecar_path)
        .with_context(|| format!("No se pudo leer {}", sidecar_path.display()))?;
    let value = serde_json::from_str::<Value>(&raw)
        .with_context(|| format!("JSON mal formado en {}", sidecar_path.display()))?;
    if !value.is_object() {
        return Err(anyhow!(
            "{} no contiene un objeto JSON",
            sidecar_path.display()
        ));
    }
    let metadata = serde_json::from_value::<SidecarMetadata>(value)
        .with_context(|| format!("Campos inválidos en {}", sidecar_path.display()))?;
    Ok(Some(metadata))
}
