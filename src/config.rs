use std::env;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8080/api";
pub const DEFAULT_STORAGE_URL: &str = "sqlite://fnb-storefront.db?mode=rwc";

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub api_base_url: String,
    pub storage_url: String,
}

impl ClientConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let api_base_url = env::var("FNB_API_BASE_URL")
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or_else(|_| DEFAULT_API_BASE_URL.to_string());
        let storage_url =
            env::var("FNB_STORAGE_URL").unwrap_or_else(|_| DEFAULT_STORAGE_URL.to_string());
        if api_base_url.is_empty() {
            anyhow::bail!("FNB_API_BASE_URL must not be empty");
        }
        Ok(Self {
            api_base_url,
            storage_url,
        })
    }
}
