mod admin;
mod catalog;
mod health;
mod login;

use axum::{middleware, routing::get, Router};

use crate::{middleware::admin_middleware, AppState};

pub fn create_router(state: AppState) -> Router<AppState> {
    let admin_routes = Router::new()
        .route("/dashboard", get(admin::dashboard))
        .route(
            "/add",
            get(admin::add_product_form).post(admin::create_product),
        )
        .route("/delete/{id}", get(admin::delete_product))
        .route_layer(middleware::from_fn_with_state(state, admin_middleware));

    Router::new()
        .route("/", get(catalog::home))
        .route("/login", get(login::login_form).post(login::login_user))
        .route("/logout", get(login::logout))
        .route("/admin", get(login::admin_redirect))
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
        .merge(admin_routes)
}
