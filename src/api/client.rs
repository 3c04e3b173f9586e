use std::time::Instant;

use reqwest::{Method, RequestBuilder, Response};
use serde::{Serialize, de::DeserializeOwned};
use tracing::Instrument;
use uuid::Uuid;

use crate::{
    config::ClientConfig,
    error::{ClientError, ClientResult},
    response::ErrorBody,
};

pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Thin wrapper over `reqwest` for the backend's REST API.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> ClientResult<Self> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("fnb-storefront/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config(config: &ClientConfig) -> ClientResult<Self> {
        Self::new(config.api_base_url.clone())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub(crate) fn request(&self, method: Method, path: &str, token: Option<&str>) -> RequestBuilder {
        let builder = self
            .http
            .request(method, format!("{}{}", self.base_url, path));
        match token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    pub(crate) async fn get<T, Q>(&self, path: &str, token: Option<&str>, query: &Q) -> ClientResult<T>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let builder = self.request(Method::GET, path, token).query(query);
        let response = self.send(Method::GET, path, builder).await?;
        Ok(response.json().await?)
    }

    pub(crate) async fn post<T, B>(&self, path: &str, token: Option<&str>, body: &B) -> ClientResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let builder = self.request(Method::POST, path, token).json(body);
        let response = self.send(Method::POST, path, builder).await?;
        Ok(response.json().await?)
    }

    pub(crate) async fn patch<T, B>(&self, path: &str, token: Option<&str>, body: &B) -> ClientResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let builder = self.request(Method::PATCH, path, token).json(body);
        let response = self.send(Method::PATCH, path, builder).await?;
        Ok(response.json().await?)
    }

    /// For endpoints whose response body the client has no use for.
    pub(crate) async fn execute(&self, method: Method, path: &str, builder: RequestBuilder) -> ClientResult<()> {
        self.send(method, path, builder).await?;
        Ok(())
    }

    pub(crate) async fn send(
        &self,
        method: Method,
        path: &str,
        builder: RequestBuilder,
    ) -> ClientResult<Response> {
        let request_id = Uuid::new_v4().to_string();
        let span = tracing::info_span!(
            "api_request",
            method = %method,
            path = %path,
            request_id = %request_id
        );

        async move {
            let started = Instant::now();
            tracing::debug!("request started");
            let response = builder
                .header(REQUEST_ID_HEADER, &request_id)
                .send()
                .await?;
            let status = response.status();
            tracing::info!(
                status = %status,
                ms = %started.elapsed().as_millis(),
                "request finished"
            );

            if status.is_success() {
                return Ok(response);
            }

            let raw = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ErrorBody>(&raw)
                .ok()
                .and_then(ErrorBody::into_message)
                .or_else(|| {
                    let raw = raw.trim();
                    (!raw.is_empty() && !raw.starts_with('{') && !raw.starts_with('<'))
                        .then(|| raw.to_string())
                });
            tracing::warn!(status = %status, message = message.as_deref().unwrap_or("-"), "request failed");

            Err(ClientError::Api {
                status: status.as_u16(),
                message,
            })
        }
        .instrument(span)
        .await
    }
}
