//! Escaneo de las carpetas de categoría de la galería.
//!
//! Cada directorio se escanea de forma aislada: un fallo de E/S en una
//! categoría deja su lista vacía sin afectar al resto.

use std::{fs, path::Path};

use anyhow::{Context, Result};
use tracing::{debug, warn};

use crate::{
    config::CategorySource,
    images::{file_name, format_title, list_images, public_url},
    models::{GalleryScan, ImageRecord},
};

/// Escanea un único directorio. Si no existe devuelve una lista vacía.
pub fn scan_directory(
    dir: &Path,
    url_prefix: &str,
    extensions: &[&str],
    category: Option<&str>,
) -> Result<Vec<ImageRecord>> {
    if !dir.exists() {
        debug!("Directorio inexistente, sin imágenes: {}", dir.display());
        return Ok(Vec::new());
    }

    let records = list_images(dir, extensions)?
        .iter()
        .map(|path| {
            let name = file_name(path);
            ImageRecord::new(
                public_url(url_prefix, &name),
                format_title(&name),
                category.map(str::to_string),
            )
        })
        .collect::<Vec<_>>();

    debug!("{} imágenes en {}", records.len(), dir.display());
    Ok(records)
}

/// Escanea todas las categorías configuradas bajo `public_root`, creando
/// las carpetas que falten.
pub fn scan_categories(
    sources: &[CategorySource],
    public_root: &Path,
    extensions: &[&str],
) -> GalleryScan {
    let mut scan = GalleryScan::default();

    for source in sources {
        let dir = public_root.join(&source.folder);
        let records = match scan_category(source, &dir, extensions) {
            Ok(records) => records,
            Err(err) => {
                warn!("Error leyendo la categoría '{}': {:#}", source.label, err);
                Vec::new()
            }
        };
        scan.all.extend(records.iter().cloned());
        scan.categories.insert(source.key.clone(), records);
    }

    scan
}

fn scan_category(
    source: &CategorySource,
    dir: &Path,
    extensions: &[&str],
) -> Result<Vec<ImageRecord>> {
    ensure_directory(dir)?;
    scan_directory(dir, &source.folder, extensions, Some(&source.label))
}

fn ensure_directory(dir: &Path) -> Result<()> {
    if !dir.is_dir() {
        fs::create_dir_all(dir)
            .with_context(|| format!("No se pudo crear el directorio {}", dir.display()))?;
        debug!("Creado directorio de categoría {}", dir.display());
    }
    Ok(())
}
