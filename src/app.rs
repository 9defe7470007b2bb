use axum::{extract::DefaultBodyLimit, Router};
use sqlx::PgPool;
use tower_http::{services::ServeDir, trace::TraceLayer};

use crate::{
    config::AppConfig,
    database,
    error::Result,
    routes,
    services::{auth::AuthGate, image_store::ImageStore},
    views::IMAGE_URL_PREFIX,
};

#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub images: ImageStore,
    pub auth: AuthGate,
}

pub async fn build(config: &AppConfig) -> Result<Router> {
    let images = ImageStore::new(&config.storage.upload_dir);
    images.ensure_root().await?;

    let pool = database::create_pool(&config.database).await?;

    let state = AppState {
        db: pool,
        images,
        auth: AuthGate::new(&config.auth),
    };

    Ok(router(state, config.server.max_body_size))
}

pub fn router(state: AppState, max_body_size: usize) -> Router {
    let image_files = ServeDir::new(state.images.root());

    routes::create_router(state.clone())
        .nest_service(IMAGE_URL_PREFIX, image_files)
        .layer(DefaultBodyLimit::max(max_body_size))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
