//! Modelos de dominio (metadatos de las imágenes servidas a la galería).

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Metadatos de una imagen descubierta en disco.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImageRecord {
    /// Ruta pública (URL) del recurso, no la ruta en el sistema de archivos.
    /// El frontend la consume como `src`.
    #[serde(rename = "src")]
    pub path: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl ImageRecord {
    pub fn new(path: String, title: String, category: Option<String>) -> Self {
        Self {
            path,
            title,
            description: None,
            link: None,
            category,
        }
    }

    /// Mezcla superficial de un sidecar: sólo `title`, `description` y `link`.
    /// `path` y `category` no se tocan nunca.
    pub fn merge_sidecar(&mut self, sidecar: SidecarMetadata) {
        if let Some(title) = sidecar.title.filter(|t| !t.trim().is_empty()) {
            self.title = title;
        }
        if sidecar.description.is_some() {
            self.description = sidecar.description;
        }
        if sidecar.link.is_some() {
            self.link = sidecar.link;
        }
    }
}

/// Contenido de `<imagen>.json` junto a una imagen. Las claves desconocidas
/// se ignoran.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SidecarMetadata {
    pub title: Option<String>,
    pub description: Option<String>,
    pub link: Option<String>,
}

/// Resultado de escanear todas las categorías de la galería.
#[derive(Debug, Clone, Default, Serialize)]
pub struct GalleryScan {
    #[serde(flatten)]
    pub categories: BTreeMap<String, Vec<ImageRecord>>,
    pub all: Vec<ImageRecord>,
}

/// Respuesta de `/api/images`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ImagesResponse {
    pub gallery: Vec<ImageRecord>,
    pub recent: Vec<ImageRecord>,
}
