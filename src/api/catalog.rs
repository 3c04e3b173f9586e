use reqwest::Method;

use crate::{
    api::ApiClient,
    dto::catalog::{CreateCategoryRequest, CreateDiscountRequest, CreateStoreRequest, UpdateStoreRequest},
    error::ClientResult,
    models::{Category, Discount, Store},
    response::{Page, Pagination},
};

pub async fn list_categories(api: &ApiClient) -> ClientResult<Vec<Category>> {
    api.get("/categories", None, &()).await
}

pub async fn create_category(
    api: &ApiClient,
    token: &str,
    payload: &CreateCategoryRequest,
) -> ClientResult<Category> {
    api.post("/categories", Some(token), payload).await
}

pub async fn list_stores(api: &ApiClient) -> ClientResult<Vec<Store>> {
    api.get("/stores", None, &()).await
}

pub async fn create_store(
    api: &ApiClient,
    token: &str,
    payload: &CreateStoreRequest,
) -> ClientResult<Store> {
    api.post("/stores", Some(token), payload).await
}

pub async fn update_store(
    api: &ApiClient,
    token: &str,
    store_id: &str,
    payload: &UpdateStoreRequest,
) -> ClientResult<Store> {
    api.patch(&format!("/stores/{store_id}"), Some(token), payload)
        .await
}

pub async fn list_discounts(
    api: &ApiClient,
    token: &str,
    pagination: &Pagination,
) -> ClientResult<Page<Discount>> {
    api.get("/discounts", Some(token), pagination).await
}

pub async fn create_discount(
    api: &ApiClient,
    token: &str,
    payload: &CreateDiscountRequest,
) -> ClientResult<Discount> {
    api.post("/discounts", Some(token), payload).await
}

pub async fn delete_discount(api: &ApiClient, token: &str, discount_id: &str) -> ClientResult<()> {
    let path = format!("/discounts/{discount_id}");
    let builder = api.request(Method::DELETE, &path, Some(token));
    api.execute(Method::DELETE, &path, builder).await
}
