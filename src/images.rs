//! Utilidades comunes para descubrir imágenes en disco: whitelist de
//! extensiones, listado ordenado de un directorio y derivación de títulos.

use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use tracing::warn;
use walkdir::WalkDir;

/// Extensiones aceptadas por `/api/gallery`.
pub const BASIC_IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png"];

/// Extensiones aceptadas por `/api/images` y por las imágenes recientes.
pub const EXTENDED_IMAGE_EXTENSIONS: &[&str] =
    &["jpg", "jpeg", "png", "gif", "webp", "svg", "bmp"];

/// Comprueba la extensión (sin distinguir mayúsculas) contra la whitelist.
/// Se mira lo que sigue al último punto del nombre, así que `.png` cuenta.
pub fn is_image(path: &Path, extensions: &[&str]) -> bool {
    path.file_name()
        .and_then(std::ffi::OsStr::to_str)
        .and_then(|name| name.rsplit_once('.'))
        .map(|(_, ext)| {
            let ext = ext.to_lowercase();
            !ext.is_empty() && extensions.iter().any(|allowed| *allowed == ext)
        })
        .unwrap_or(false)
}

/// Lista los ficheros de imagen de un único nivel de `dir`, ordenados por nombre.
///
/// Un error sobre el propio directorio se propaga; una entrada ilegible
/// (ej: enlace simbólico roto) se omite con un aviso.
pub fn list_images(dir: &Path, extensions: &[&str]) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(anyhow!("{} no es un directorio", dir.display()));
    }

    let mut images = Vec::new();
    let walker = WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by_file_name();

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) if err.depth() > 0 => {
                warn!("Omitiendo entrada ilegible en {}: {}", dir.display(), err);
                continue;
            }
            Err(err) => {
                return Err(err)
                    .with_context(|| format!("No se pudo leer el directorio {}", dir.display()))
            }
        };
        if entry.file_type().is_file() && is_image(entry.path(), extensions) {
            images.push(entry.into_path());
        }
    }

    Ok(images)
}

pub fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| path.to_string_lossy().to_string())
}

/// Construye la ruta pública `/<prefijo>/<fichero>`.
pub fn public_url(url_prefix: &str, file_name: &str) -> String {
    let prefix = url_prefix.trim_matches('/');
    if prefix.is_empty() {
        format!("/{file_name}")
    } else {
        format!("/{prefix}/{file_name}")
    }
}

/// Convierte un nombre de fichero en un título legible.
///
/// `my-cool_Image.PNG` → `My Cool Image`. Si el resultado queda vacío
/// (ej: `--.jpg`) se devuelve el nombre completo.
pub fn format_title(file_name: &str) -> String {
    let stem = match file_name.rfind('.') {
        Some(idx) if idx + 1 < file_name.len() => &file_name[..idx],
        _ => file_name,
    };

    let spaced = stem.replace(|c: char| c == '-' || c == '_', " ");
    let collapsed = spaced.split_whitespace().collect::<Vec<_>>().join(" ");

    let mut title = String::with_capacity(collapsed.len());
    let mut prev_is_word = false;
    for ch in collapsed.chars() {
        if ch.is_alphanumeric() && !prev_is_word {
            title.extend(ch.to_uppercase());
        } else {
            title.push(ch);
        }
        prev_is_word = ch.is_alphanumeric();
    }

    if title.is_empty() {
        file_name.to_string()
    } else {
        title
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn title_from_mixed_separators() {
        assert_eq!(format_title("my-cool_Image.PNG"), "My Cool Image");
    }

    #[test]
    fn title_collapses_repeated_separators() {
        assert_eq!(format_title("a--b__c.jpg"), "A B C");
        assert_eq!(format_title("  spaced   out .png"), "Spaced Out");
    }

    #[test]
    fn title_strips_only_last_extension() {
        assert_eq!(format_title("archive.v2.jpeg"), "Archive.V2");
        assert_eq!(format_title("project1.jpg"), "Project1");
    }

    #[test]
    fn empty_title_falls_back_to_file_name() {
        assert_eq!(format_title("--.jpg"), "--.jpg");
        assert_eq!(format_title(".png"), ".png");
    }

    #[test]
    fn title_is_deterministic() {
        let name = "sunset_over-the_bay.webp";
        assert_eq!(format_title(name), format_title(name));
        assert_eq!(format_title(name), "Sunset Over The Bay");
    }

    #[test]
    fn extension_check_ignores_case() {
        assert!(is_image(Path::new("x.JPG"), BASIC_IMAGE_EXTENSIONS));
        assert!(is_image(Path::new("x.Jpeg"), BASIC_IMAGE_EXTENSIONS));
        assert!(!is_image(Path::new("x.gif"), BASIC_IMAGE_EXTENSIONS));
        assert!(is_image(Path::new("x.gif"), EXTENDED_IMAGE_EXTENSIONS));
        assert!(!is_image(Path::new("x.json"), EXTENDED_IMAGE_EXTENSIONS));
        assert!(!is_image(Path::new("jpg"), EXTENDED_IMAGE_EXTENSIONS));
        assert!(!is_image(Path::new("photo."), EXTENDED_IMAGE_EXTENSIONS));
    }

    #[test]
    fn bare_extension_names_are_images() {
        assert!(is_image(Path::new(".png"), BASIC_IMAGE_EXTENSIONS));
        assert!(is_image(Path::new("dir/.JPEG"), BASIC_IMAGE_EXTENSIONS));
    }

    #[test]
    fn public_url_normalises_slashes() {
        assert_eq!(public_url("recent", "a.jpg"), "/recent/a.jpg");
        assert_eq!(public_url("/nft/", "b.png"), "/nft/b.png");
        assert_eq!(public_url("", "c.png"), "/c.png");
    }

    #[test]
    fn listing_filters_and_sorts_by_name() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["c.png", "a.JPG", "notes.txt", "b.json", "d.gif"] {
            fs::write(dir.path().join(name), "x").unwrap();
        }
        fs::create_dir(dir.path().join("sub.png")).unwrap();

        let names: Vec<String> = list_images(dir.path(), BASIC_IMAGE_EXTENSIONS)
            .unwrap()
            .iter()
            .map(|p| file_name(p))
            .collect();
        assert_eq!(names, ["a.JPG", "c.png"]);
    }

    #[test]
    fn listing_missing_directory_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(list_images(&dir.path().join("nope"), BASIC_IMAGE_EXTENSIONS).is_err());
    }

    #[test]
    fn listing_a_regular_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("cover.jpg");
        fs::write(&file, "x").unwrap();
        assert!(list_images(&file, BASIC_IMAGE_EXTENSIONS).is_err());
    }

    #[cfg(unix)]
    #[test]
    fn listing_follows_symlinks_and_skips_broken_ones() {
        use std::os::unix::fs::symlink;

        let dir = tempfile::tempdir().unwrap();
        let store = tempfile::tempdir().unwrap();
        let real = store.path().join("real.png");
        fs::write(&real, "x").unwrap();
        symlink(&real, dir.path().join("link.png")).unwrap();
        symlink(store.path().join("gone.png"), dir.path().join("broken.png")).unwrap();
        fs::write(dir.path().join("plain.jpg"), "x").unwrap();

        let names: Vec<String> = list_images(dir.path(), BASIC_IMAGE_EXTENSIONS)
            .unwrap()
            .iter()
            .map(|p| file_name(p))
            .collect();
        assert_eq!(names, ["link.png", "plain.jpg"]);
    }
}
