use reqwest::Method;

use crate::{
    api::ApiClient,
    dto::products::{AvailabilityQuery, CreateProductRequest, ProductQuery, UpdateProductRequest},
    error::{ClientError, ClientResult},
    models::Product,
    response::Page,
};

pub async fn list_products(api: &ApiClient, query: &ProductQuery) -> ClientResult<Page<Product>> {
    api.get("/products", None, query).await
}

pub async fn fetch_product_by_slug(api: &ApiClient, slug: &str) -> ClientResult<Product> {
    if slug.trim().is_empty() {
        return Err(ClientError::NotFound);
    }
    api.get(&format!("/products/by-slug/{slug}"), None, &())
        .await
}

pub async fn create_product(
    api: &ApiClient,
    token: &str,
    payload: &CreateProductRequest,
) -> ClientResult<Product> {
    let product: Product = api.post("/products", Some(token), payload).await?;
    tracing::info!(product_id = %product.id, "product created");
    Ok(product)
}

pub async fn update_product(
    api: &ApiClient,
    token: &str,
    product_id: &str,
    payload: &UpdateProductRequest,
) -> ClientResult<Product> {
    api.patch(&format!("/products/{product_id}"), Some(token), payload)
        .await
}

pub async fn delete_product(api: &ApiClient, token: &str, product_id: &str) -> ClientResult<()> {
    let path = format!("/products/{product_id}");
    let builder = api.request(Method::DELETE, &path, Some(token));
    api.execute(Method::DELETE, &path, builder).await
}

/// Marks a product (un)available at one store.
pub async fn update_product_availability(
    api: &ApiClient,
    token: &str,
    product_id: &str,
    store_code: &str,
    available: bool,
) -> ClientResult<()> {
    let path = format!("/products/{product_id}/availability");
    let builder = api
        .request(Method::PATCH, &path, Some(token))
        .query(&AvailabilityQuery {
            store_code: store_code.to_string(),
            available,
        });
    api.execute(Method::PATCH, &path, builder).await
}
