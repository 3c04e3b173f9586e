use reqwest::{
    Method,
    multipart::{Form, Part},
};
use serde::Deserialize;

use crate::{
    api::ApiClient,
    error::{ClientError, ClientResult},
};

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadedFile {
    pub url: String,
}

pub async fn upload_image(
    api: &ApiClient,
    token: &str,
    file_name: &str,
    content_type: &str,
    bytes: Vec<u8>,
) -> ClientResult<UploadedFile> {
    if !content_type.starts_with("image/") {
        return Err(ClientError::BadRequest("File is not image".into()));
    }

    let part = Part::bytes(bytes)
        .file_name(file_name.to_string())
        .mime_str(content_type)?;
    let form = Form::new().part("file", part);

    let path = "/storage/files/upload";
    let builder = api.request(Method::POST, path, Some(token)).multipart(form);
    let response = api.send(Method::POST, path, builder).await?;
    Ok(response.json().await?)
}

/// Best-effort content type from a file extension.
pub fn guess_image_type(file_name: &str) -> Option<&'static str> {
    let ext = file_name.rsplit_once('.')?.1.to_ascii_lowercase();
    match ext.as_str() {
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "gif" => Some("image/gif"),
        "webp" => Some("image/webp"),
        "svg" => Some("image/svg+xml"),
        _ => None,
    }
}
