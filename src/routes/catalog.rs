use axum::{extract::State, response::Html};

use crate::{error::Result, queries::product_queries, views, AppState};

pub async fn home(State(state): State<AppState>) -> Result<Html<String>> {
    let products = product_queries::list_products(&state.db).await?;

    Ok(Html(views::index(&products).into_string()))
}
