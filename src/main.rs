// Módulos de la aplicación
mod api;
mod app_state;
mod config;
mod images;
mod models;
mod ranker;
mod scanner;

use crate::app_state::AppState;
use anyhow::{Context, Result};
use axum::Router;
use tokio::signal;
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Cargar configuración (incluye .env) e inicializar logging
    let cfg = config::AppConfig::from_env().context("Error al cargar la configuración")?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
    info!(?cfg, "Configuración cargada");

    // 2. Crear estado compartido de la aplicación
    let app_state = AppState::new(cfg);
    let public_dir = app_state.config.public_dir.clone();
    let server_addr = app_state.config.server_addr.clone();
    let open_browser = app_state.config.open_browser;

    // 3. API de imágenes + ficheros estáticos del directorio público
    let app = Router::new()
        .merge(api::create_router(app_state))
        .fallback_service(ServeDir::new(&public_dir))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        );

    // 4. Iniciar el servidor
    let listener = tokio::net::TcpListener::bind(&server_addr)
        .await
        .with_context(|| format!("No se pudo escuchar en {server_addr}"))?;
    let server_url = format!("http://{}", server_addr);
    info!("🚀 Servidor escuchando en {} (sirviendo {})", &server_url, public_dir.display());

    if open_browser && webbrowser::open(&server_url).is_err() {
        info!("No se pudo abrir el navegador. Por favor, accede a {} manualmente.", server_url);
    }

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            signal::ctrl_c().await.ok();
            info!("Señal de apagado recibida, iniciando cierre del servidor.");
        })
        .await?;

    info!("✅ Servidor cerrado correctamente.");
    Ok(())
}
