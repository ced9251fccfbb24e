use axum::{
    extract::{Json, State},
    http::StatusCode,
    routing::get,
    Router,
};
use serde_json::json;
use tokio::task::spawn_blocking;
use tracing::{error, warn};

use crate::{
    app_state::AppState,
    images::{BASIC_IMAGE_EXTENSIONS, EXTENDED_IMAGE_EXTENSIONS},
    models::{GalleryScan, ImageRecord, ImagesResponse},
    ranker, scanner,
};

type ApiError = (StatusCode, Json<serde_json::Value>);

// --- Router ---

pub fn create_router(app_state: AppState) -> Router {
    Router::new()
        .route("/api/gallery", get(gallery_handler))
        .route("/api/images", get(images_handler))
        .route("/api/recent-images", get(recent_images_handler))
        .with_state(app_state)
}

// --- Handlers ---

#[axum::debug_handler]
async fn gallery_handler(State(state): State<AppState>) -> Result<Json<GalleryScan>, ApiError> {
    let config = state.config.clone();
    let scan = spawn_blocking(move || {
        scanner::scan_categories(
            &config.gallery_sources,
            &config.public_dir,
            BASIC_IMAGE_EXTENSIONS,
        )
    })
    .await
    .map_err(|e| {
        error!("Error leyendo los directorios de la galería: {}", e);
        internal_error("Failed to read image directories")
    })?;

    Ok(Json(scan))
}

#[axum::debug_handler]
async fn images_handler(State(state): State<AppState>) -> Result<Json<ImagesResponse>, ApiError> {
    let config = state.config.clone();
    let response = spawn_blocking(move || {
        let scan = |dir: std::path::PathBuf, prefix: &str| {
            scanner::scan_directory(&dir, prefix, EXTENDED_IMAGE_EXTENSIONS, None).unwrap_or_else(
                |err| {
                    warn!("Error leyendo {}: {:#}", dir.display(), err);
                    Vec::new()
                },
            )
        };
        ImagesResponse {
            gallery: scan(config.gallery_dir(), config.gallery_folder.as_str()),
            recent: scan(config.recent_dir(), config.recent_folder.as_str()),
        }
    })
    .await
    .map_err(|e| {
        error!("Error obteniendo las imágenes: {}", e);
        internal_error("Failed to fetch images")
    })?;

    Ok(Json(response))
}

#[axum::debug_handler]
async fn recent_images_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<ImageRecord>>, ApiError> {
    let config = state.config.clone();
    let result = spawn_blocking(move || {
        ranker::rank_recent(
            &config.recent_dir(),
            &config.recent_folder,
            config.recent_limit,
            EXTENDED_IMAGE_EXTENSIONS,
        )
    })
    .await;

    match result {
        Ok(Ok(records)) => Ok(Json(records)),
        Ok(Err(e)) => {
            error!("Error leyendo las imágenes recientes: {:#}", e);
            Err(internal_error("Failed to read recent images"))
        }
        Err(e) => {
            error!("Error leyendo las imágenes recientes: {}", e);
            Err(internal_error("Failed to read recent images"))
        }
    }
}

fn internal_error(message: &str) -> ApiError {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": message })),
    )
}
