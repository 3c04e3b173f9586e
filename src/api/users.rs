use reqwest::Method;

use crate::{
    api::ApiClient,
    dto::{
        auth::UpdateProfileRequest,
        users::{AssignStaffQuery, UserListQuery},
    },
    error::ClientResult,
    models::User,
    response::Page,
};

pub async fn fetch_current_user(api: &ApiClient, token: &str) -> ClientResult<User> {
    api.get("/users/me", Some(token), &()).await
}

pub async fn update_profile(
    api: &ApiClient,
    token: &str,
    user_id: &str,
    payload: &UpdateProfileRequest,
) -> ClientResult<User> {
    api.patch(&format!("/users/{user_id}"), Some(token), payload)
        .await
}

pub async fn list_users(
    api: &ApiClient,
    token: &str,
    query: &UserListQuery,
) -> ClientResult<Page<User>> {
    api.get("/users", Some(token), query).await
}

pub async fn assign_staff_to_store(
    api: &ApiClient,
    token: &str,
    user_id: &str,
    store_code: &str,
) -> ClientResult<()> {
    let path = format!("/users/assign-staff/{user_id}");
    let builder = api
        .request(Method::PATCH, &path, Some(token))
        .query(&AssignStaffQuery {
            store_code: store_code.to_string(),
        })
        .json(&serde_json::json!({}));
    api.execute(Method::PATCH, &path, builder).await?;
    tracing::info!(user_id, store_code, "staff assigned");
    Ok(())
}
