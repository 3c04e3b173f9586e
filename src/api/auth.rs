use crate::{
    api::ApiClient,
    dto::auth::{AuthResponse, LoginRequest, RegisterRequest},
    error::{ClientError, ClientResult},
};

pub async fn login(api: &ApiClient, payload: &LoginRequest) -> ClientResult<AuthResponse> {
    if payload.phone_num_or_email.trim().is_empty() || payload.password.is_empty() {
        return Err(ClientError::BadRequest(
            "Phone number or email and password are required".into(),
        ));
    }
    let resp: AuthResponse = api.post("/auth/login", None, payload).await?;
    tracing::info!(user_id = %resp.user.id, "logged in");
    Ok(resp)
}

pub async fn register(api: &ApiClient, payload: &RegisterRequest) -> ClientResult<AuthResponse> {
    if payload.missing_field().is_some() {
        return Err(ClientError::BadRequest(
            "Please fill out all fields to continue.".into(),
        ));
    }
    let resp: AuthResponse = api.post("/auth/register", None, payload).await?;
    tracing::info!(user_id = %resp.user.id, "account created");
    Ok(resp)
}
