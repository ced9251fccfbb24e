//! Carga y gestión de configuración del servidor de la galería.

use std::env;
use std::path::PathBuf;

use anyhow::{anyhow, Result};

/// Carpeta de categoría servida por `/api/gallery`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CategorySource {
    /// Clave en la respuesta JSON (ej: "nft").
    pub key: String,
    /// Etiqueta que se asigna a cada imagen (ej: "NFT").
    pub label: String,
    /// Subcarpeta dentro del directorio público.
    pub folder: String,
}

impl CategorySource {
    pub fn new(key: &str, label: &str, folder: &str) -> Self {
        Self {
            key: key.to_string(),
            label: label.to_string(),
            folder: folder.to_string(),
        }
    }
}

/// Categorías de la galería, en el orden en que se concatenan en `all`.
pub fn default_gallery_sources() -> Vec<CategorySource> {
    vec![
        CategorySource::new("nft", "NFT", "nft"),
        CategorySource::new("memecoin", "MEMECOIN PROJECT", "memecoin_project"),
        CategorySource::new("junglebay", "JUNGLEBAY", "junglebay"),
        // Carpeta original de la galería, se mantiene por compatibilidad.
        CategorySource::new("gallery", "Gallery", "gallery"),
    ]
}

/// Configuración completa de la aplicación.
#[derive(Clone, Debug)]
pub struct AppConfig {
    pub server_addr: String,
    /// Raíz de los ficheros estáticos; las rutas públicas cuelgan de aquí.
    pub public_dir: PathBuf,
    pub gallery_sources: Vec<CategorySource>,
    pub gallery_folder: String,
    pub recent_folder: String,
    pub recent_limit: usize,
    pub open_browser: bool,
}

impl AppConfig {
    /// Carga la configuración desde variables de entorno (usando .env si existe).
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let server_addr =
            env::var("SERVER_ADDR").unwrap_or_else(|_| "127.0.0.1:3000".to_string());
        let public_dir =
            PathBuf::from(env::var("PUBLIC_DIR").unwrap_or_else(|_| "public".to_string()));
        let recent_limit = parse_limit(env::var("RECENT_LIMIT").ok().as_deref())?;
        let open_browser = parse_bool(env::var("OPEN_BROWSER").ok().as_deref())?;

        Ok(Self {
            server_addr,
            open_browser,
            recent_limit,
            ..Self::with_public_dir(public_dir)
        })
    }

    /// Configuración por defecto sobre un directorio público concreto.
    pub fn with_public_dir(public_dir: impl Into<PathBuf>) -> Self {
        Self {
            server_addr: "127.0.0.1:3000".to_string(),
            public_dir: public_dir.into(),
            gallery_sources: default_gallery_sources(),
            gallery_folder: "gallery".to_string(),
            recent_folder: "recent".to_string(),
            recent_limit: 3,
            open_browser: false,
        }
    }

    pub fn recent_dir(&self) -> PathBuf {
        self.public_dir.join(&self.recent_folder)
    }

    pub fn gallery_dir(&self) -> PathBuf {
        self.public_dir.join(&self.gallery_folder)
    }
}

fn parse_limit(raw: Option<&str>) -> Result<usize> {
    let Some(raw) = raw else {
        return Ok(3);
    };
    match raw.trim().parse::<usize>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(anyhow!("RECENT_LIMIT debe ser un entero positivo: {raw}")),
    }
}

fn parse_bool(raw: Option<&str>) -> Result<bool> {
    match raw.map(|s| s.trim().to_lowercase()) {
        None => Ok(false),
        Some(v) => match v.as_str() {
            "1" | "true" | "yes" | "on" => Ok(true),
            "0" | "false" | "no" | "off" | "" => Ok(false),
            other => Err(anyhow!("OPEN_BROWSER no es un booleano válido: {other}")),
        },
    }
}
