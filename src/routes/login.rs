use axum::{
    extract::State,
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use axum_extra::extract::cookie::CookieJar;

use crate::{
    error::Result,
    models::LoginRequest,
    services::auth::{LoginOutcome, INVALID_CREDENTIALS},
    views, AppState,
};

pub async fn login_form() -> Html<String> {
    Html(views::login(None).into_string())
}

pub async fn login_user(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(payload): Form<LoginRequest>,
) -> Result<Response> {
    match state
        .auth
        .attempt_login(&payload.username, &payload.password)
    {
        LoginOutcome::Granted => {
            tracing::info!("Admin {} logged in", payload.username);
            let jar = state.auth.grant(jar)?;
            Ok((jar, Redirect::to("/dashboard")).into_response())
        }
        LoginOutcome::Denied => {
            tracing::warn!("Rejected login attempt for {:?}", payload.username);
            Ok(Html(views::login(Some(INVALID_CREDENTIALS)).into_string()).into_response())
        }
    }
}

pub async fn logout(State(state): State<AppState>, jar: CookieJar) -> (CookieJar, Redirect) {
    (state.auth.logout(jar), Redirect::to("/login"))
}

pub async fn admin_redirect() -> Redirect {
    Redirect::to("/login")
}
