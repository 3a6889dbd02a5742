use std::time::Duration;

use reqwest::multipart::{Form, Part};
use serde_json::Value;
use upload_logging::upload_debug;
use uploader_core::FileRef;

use crate::{UploadError, UploadResult};

pub const DEFAULT_ENDPOINT: &str = "http://localhost:3333/api/upload";
pub const DEFAULT_FIELD_NAME: &str = "video";

#[derive(Debug, Clone)]
pub struct UploadSettings {
    pub endpoint: String,
    /// Name of the single multipart part carrying the file.
    pub field_name: String,
    /// `None` leaves the transport's own behaviour in place.
    pub request_timeout: Option<Duration>,
}

impl Default for UploadSettings {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            field_name: DEFAULT_FIELD_NAME.to_string(),
            request_timeout: None,
        }
    }
}

#[async_trait::async_trait]
pub trait Uploader: Send + Sync {
    async fn upload(&self, file: &FileRef) -> UploadResult;
}

#[derive(Debug, Clone)]
pub struct ReqwestUploader {
    settings: UploadSettings,
}

impl ReqwestUploader {
    pub fn new(settings: UploadSettings) -> Self {
        Self { settings }
    }

    fn build_client(&self) -> Result<reqwest::Client, UploadError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = self.settings.request_timeout {
            builder = builder.timeout(timeout);
        }
        builder
            .build()
            .map_err(|err| UploadError::transport(err.to_string()))
    }

    fn build_form(&self, file: &FileRef) -> Result<Form, UploadError> {
        let mime = file
            .mime_type()
            .parse::<mime::Mime>()
            .unwrap_or(mime::APPLICATION_OCTET_STREAM);
        // `Bytes` is shared, so the file contents are not copied into the form.
        let body = reqwest::Body::from(file.bytes().clone());
        let part = Part::stream_with_length(body, file.size())
            .file_name(file.name().to_string())
            .mime_str(mime.as_ref())
            .map_err(|err| UploadError::transport(err.to_string()))?;
        Ok(Form::new().part(self.settings.field_name.clone(), part))
    }
}

#[async_trait::async_trait]
impl Uploader for ReqwestUploader {
    async fn upload(&self, file: &FileRef) -> UploadResult {
        let endpoint = url::Url::parse(&self.settings.endpoint).map_err(|err| {
            UploadError::transport(format!("invalid endpoint {}: {err}", self.settings.endpoint))
        })?;
        let client = self.build_client()?;
        let form = self.build_form(file)?;

        upload_debug!(
            "POST {} field={} name={} bytes={}",
            endpoint,
            self.settings.field_name,
            file.name(),
            file.size()
        );

        let response = client
            .post(endpoint)
            .multipart(form)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            // A body that cannot be read is treated like one that cannot be parsed.
            let body = response.bytes().await.ok();
            return Err(UploadError::Http {
                status: status.as_u16(),
                message: failure_message(status.as_u16(), body.as_deref()),
            });
        }

        let body = response.bytes().await.map_err(map_reqwest_error)?;
        Ok(success_payload(&body))
    }
}

/// Message for a non-2xx response: the body's `error` field, or `HTTP Error: <status>`.
pub fn failure_message(status: u16, body: Option<&[u8]>) -> String {
    let parsed = body.and_then(|bytes| serde_json::from_slice::<Value>(bytes).ok());
    match parsed.as_ref().and_then(|value| value.get("error")) {
        Some(Value::String(message)) => message.clone(),
        Some(Value::Null) | None => format!("HTTP Error: {status}"),
        Some(other) => other.to_string(),
    }
}

/// A non-JSON 2xx body is a success with a `null` payload. It does not raise a
/// second, error notification after the success one.
fn success_payload(body: &[u8]) -> Value {
    match serde_json::from_slice(body) {
        Ok(value) => value,
        Err(err) => {
            upload_debug!("Success body is not JSON ({} bytes): {}", body.len(), err);
            Value::Null
        }
    }
}

fn map_reqwest_error(err: reqwest::Error) -> UploadError {
    if err.is_timeout() {
        return UploadError::transport(format!("request timed out: {err}"));
    }
    if err.is_connect() {
        return UploadError::transport(format!("could not connect: {err}"));
    }
    UploadError::transport(err.to_string())
}
