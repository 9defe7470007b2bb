use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::CookieJar;

use crate::AppState;

/// Lets the request through only with a valid admin session; everyone else is
/// sent to the login page before the handler runs. The verified claims are
/// attached to the request for the handler.
pub async fn admin_middleware(
    State(state): State<AppState>,
    jar: CookieJar,
    mut req: Request,
    next: Next,
) -> Response {
    let Some(claims) = state.auth.session(&jar) else {
        tracing::debug!("Unauthenticated request to {}", req.uri().path());
        return Redirect::to("/login").into_response();
    };

    req.extensions_mut().insert(claims);

    next.run(req).await
}
