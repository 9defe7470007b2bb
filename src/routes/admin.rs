use axum::{
    body::Bytes,
    extract::{rejection::PathRejection, Multipart, Path, State},
    response::{Html, Redirect},
    Extension,
};

use crate::{
    error::{AppError, Result},
    models::{NewProduct, SessionClaims},
    queries::product_queries,
    views, AppState,
};

pub async fn dashboard(State(state): State<AppState>) -> Result<Html<String>> {
    let products = product_queries::list_products(&state.db).await?;

    Ok(Html(views::dashboard(&products).into_string()))
}

pub async fn add_product_form() -> Html<String> {
    Html(views::add_product().into_string())
}

struct ProductForm {
    name: Option<String>,
    description: Option<String>,
    price: Option<String>,
    image: Option<(String, Bytes)>,
}

async fn read_product_form(mut multipart: Multipart) -> Result<ProductForm> {
    let mut form = ProductForm {
        name: None,
        description: None,
        price: None,
        image: None,
    };

    while let Some(field) = multipart.next_field().await? {
        let field_name = field.name().unwrap_or_default().to_string();
        match field_name.as_str() {
            "name" => form.name = Some(field.text().await?),
            "description" => form.description = Some(field.text().await?),
            "price" => form.price = Some(field.text().await?),
            "image" => {
                let filename = field.file_name().unwrap_or_default().to_string();
                let bytes = field.bytes().await?;
                // browsers send an empty part when no file was chosen
                if !filename.is_empty() {
                    form.image = Some((filename, bytes));
                }
            }
            _ => {}
        }
    }

    Ok(form)
}

pub async fn create_product(
    State(state): State<AppState>,
    Extension(session): Extension<SessionClaims>,
    multipart: Multipart,
) -> Result<Redirect> {
    let form = read_product_form(multipart).await?;

    let name = form
        .name
        .ok_or_else(|| AppError::BadRequest("name is required".to_string()))?;
    let price = form
        .price
        .ok_or_else(|| AppError::BadRequest("price is required".to_string()))?;

    let image = match form.image {
        Some((filename, bytes)) => Some(state.images.save(&bytes, &filename).await?),
        None => None,
    };

    let new_product = NewProduct {
        name,
        description: form.description,
        price,
        image,
    };

    let product = match product_queries::insert_product(&state.db, &new_product).await {
        Ok(product) => product,
        Err(e) => {
            if let Some(ref image) = new_product.image {
                if let Err(cleanup) = state.images.delete(image).await {
                    tracing::warn!("Could not remove orphaned image {}: {}", image, cleanup);
                }
            }
            return Err(e);
        }
    };

    tracing::info!(
        "Product {} ({}) added by {}",
        product.id,
        product.name,
        session.sub
    );

    Ok(Redirect::to("/dashboard"))
}

pub async fn delete_product(
    State(state): State<AppState>,
    Extension(session): Extension<SessionClaims>,
    id: std::result::Result<Path<i32>, PathRejection>,
) -> Result<Redirect> {
    let Path(id) = id.map_err(|e| {
        tracing::debug!("Unroutable delete target: {}", e);
        AppError::NotFound("No such product".to_string())
    })?;

    let image = product_queries::remove_product(&state.db, id).await?;

    if let Some(image) = image {
        state.images.delete(&image).await?;
    }

    tracing::info!("Product {} deleted by {}", id, session.sub);

    Ok(Redirect::to("/dashboard"))
}
