//! Server-rendered pages. Every interpolated value goes through maud's
//! escaping.

use axum::http::StatusCode;
use maud::{html, Markup, PreEscaped, DOCTYPE};

use crate::models::Product;

pub const IMAGE_URL_PREFIX: &str = "/static/images";

const STYLE: &str = "body{font-family:sans-serif;max-width:960px;margin:0 auto;padding:1rem}\
.grid{display:grid;grid-template-columns:repeat(auto-fill,minmax(220px,1fr));gap:1rem}\
.card{border:1px solid #ddd;border-radius:6px;padding:.75rem}\
.card img{max-width:100%;height:auto}\
.flash{background:#fdecea;color:#a12622;padding:.5rem;border-radius:4px}\
table{width:100%;border-collapse:collapse}td,th{border-bottom:1px solid #eee;padding:.4rem;text-align:left}";

fn layout(title: &str, body: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (title) }
                style { (PreEscaped(STYLE)) }
            }
            body {
                header {
                    nav {
                        a href="/" { "Catalog" }
                        " | "
                        a href="/login" { "Admin" }
                    }
                }
                main { (body) }
            }
        }
    }
}

fn image_src(filename: &str) -> String {
    format!("{}/{}", IMAGE_URL_PREFIX, filename)
}

pub fn index(products: &[Product]) -> Markup {
    layout(
        "Products",
        html! {
            h1 { "Products" }
            @if products.is_empty() {
                p { "No products yet." }
            } @else {
                div class="grid" {
                    @for product in products {
                        div class="card" {
                            @if let Some(image) = &product.image {
                                img src=(image_src(image)) alt=(product.name);
                            }
                            h2 { (product.name) }
                            @if let Some(description) = &product.description {
                                p { (description) }
                            }
                            @if let Some(price) = &product.price {
                                p class="price" { (price) }
                            }
                        }
                    }
                }
            }
        },
    )
}

pub fn login(flash: Option<&str>) -> Markup {
    layout(
        "Admin login",
        html! {
            h1 { "Admin login" }
            @if let Some(message) = flash {
                p class="flash" { (message) }
            }
            form method="post" action="/login" {
                label { "Username " input type="text" name="username" required; }
                br;
                label { "Password " input type="password" name="password" required; }
                br;
                button type="submit" { "Log in" }
            }
        },
    )
}

pub fn dashboard(products: &[Product]) -> Markup {
    layout(
        "Dashboard",
        html! {
            h1 { "Dashboard" }
            p {
                a href="/add" { "Add product" }
                " | "
                a href="/logout" { "Log out" }
            }
            table {
                thead {
                    tr { th { "ID" } th { "Name" } th { "Price" } th { "Image" } th {} }
                }
                tbody {
                    @for product in products {
                        tr {
                            td { (product.id) }
                            td { (product.name) }
                            td { (product.price.as_deref().unwrap_or("")) }
                            td {
                                @if let Some(image) = &product.image {
                                    img src=(image_src(image)) alt=(product.name) width="64";
                                }
                            }
                            td { a href=(format!("/delete/{}", product.id)) { "Delete" } }
                        }
                    }
                }
            }
        },
    )
}

pub fn add_product() -> Markup {
    layout(
        "Add product",
        html! {
            h1 { "Add product" }
            form method="post" action="/add" enctype="multipart/form-data" {
                label { "Name " input type="text" name="name" required; }
                br;
                label { "Description " textarea name="description" {} }
                br;
                label { "Price " input type="text" name="price" required; }
                br;
                label { "Image " input type="file" name="image" accept="image/*"; }
                br;
                button type="submit" { "Save" }
            }
            p { a href="/dashboard" { "Back to dashboard" } }
        },
    )
}

pub fn error_page(status: StatusCode, message: &str) -> Markup {
    layout(
        "Error",
        html! {
            h1 { (status.as_u16()) " " (status.canonical_reason().unwrap_or("Error")) }
            p { (message) }
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn product_fields_are_escaped() {
        let products = vec![Product {
            id: 1,
            name: "<script>alert(1)</script>".to_string(),
            description: None,
            price: Some("9.99".to_string()),
            image: None,
        }];

        let page = index(&products).into_string();
        assert!(!page.contains("<script>alert(1)</script>"));
        assert!(page.contains("&lt;script&gt;"));
        assert!(page.contains("9.99"));
    }

    #[test]
    fn images_point_at_the_static_mount() {
        let products = vec![Product {
            id: 7,
            name: "Lamp".to_string(),
            description: Some("Bright".to_string()),
            price: Some("12".to_string()),
            image: Some("lamp.png".to_string()),
        }];

        let page = dashboard(&products).into_string();
        assert!(page.contains("/static/images/lamp.png"));
        assert!(page.contains("/delete/7"));
    }

    #[test]
    fn login_shows_flash_only_when_given() {
        assert!(login(Some("Invalid credentials")).into_string().contains("Invalid credentials"));
        assert!(!login(None).into_string().contains("class=\"flash\""));
    }
}
