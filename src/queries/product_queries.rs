use sqlx::{PgExecutor, PgPool};

use crate::{
    error::Result,
    models::{NewProduct, Product},
};

pub async fn ensure_schema(pool: &PgPool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS products (
            id SERIAL PRIMARY KEY,
            name TEXT NOT NULL,
            description TEXT,
            price TEXT,
            image TEXT
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

pub async fn list_products(pool: &PgPool) -> Result<Vec<Product>> {
    let products = sqlx::query_as::<_, Product>(
        "SELECT id, name, description, price, image FROM products ORDER BY id ASC",
    )
    .fetch_all(pool)
    .await?;

    Ok(products)
}

pub async fn insert_product(pool: &PgPool, req: &NewProduct) -> Result<Product> {
    let product = sqlx::query_as::<_, Product>(
        r#"
        INSERT INTO products (name, description, price, image)
        VALUES ($1, $2, $3, $4)
        RETURNING id, name, description, price, image
        "#,
    )
    .bind(&req.name)
    .bind(&req.description)
    .bind(&req.price)
    .bind(&req.image)
    .fetch_one(pool)
    .await?;

    Ok(product)
}

/// Image filename of a product; `None` when the row is missing or has no image.
pub async fn get_image_of<'e, E>(executor: E, id: i32) -> Result<Option<String>>
where
    E: PgExecutor<'e>,
{
    let image: Option<Option<String>> =
        sqlx::query_scalar("SELECT image FROM products WHERE id = $1 FOR UPDATE")
            .bind(id)
            .fetch_optional(executor)
            .await?;

    Ok(image.flatten().filter(|name| !name.is_empty()))
}

pub async fn delete_product<'e, E>(executor: E, id: i32) -> Result<u64>
where
    E: PgExecutor<'e>,
{
    let result = sqlx::query("DELETE FROM products WHERE id = $1")
        .bind(id)
        .execute(executor)
        .await?;

    Ok(result.rows_affected())
}

/// Deletes a product and hands back the image file it owned.
///
/// The image lookup and the row delete share one transaction, with the row
/// locked, so the returned name always belongs to the row that was removed.
/// Unlinking the file is left to the caller once the commit has succeeded.
pub async fn remove_product(pool: &PgPool, id: i32) -> Result<Option<String>> {
    let mut tx = pool.begin().await?;

    let image = get_image_of(&mut *tx, id).await?;
    let deleted = delete_product(&mut *tx, id).await?;

    tx.commit().await?;

    if deleted == 0 {
        tracing::debug!("Product {} was already gone", id);
    }

    Ok(image)
}
