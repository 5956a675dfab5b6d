/// API client — the only place that talks to the resume analysis server.
///
/// Two endpoints make up the whole contract:
///   POST {base}/api/upload-resume   multipart field `file` -> AnalysisResult
///   GET  {base}/resumes                                    -> [ResumeRecord]
///
/// Requests are never retried; a failure is reported once and left to the view.
use async_trait::async_trait;
use reqwest::{multipart, Client, Response};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::Config;
use crate::errors::ClientError;
use crate::file::SelectedFile;
use crate::models::{AnalysisResult, ResumeRecord};

pub const UPLOAD_PATH: &str = "/api/upload-resume";
pub const RESUMES_PATH: &str = "/resumes";
/// Multipart field name the server reads the PDF from.
pub const UPLOAD_FIELD: &str = "file";

/// Seam between the views and the network, so sessions can run against fakes.
#[async_trait]
pub trait ResumeApi: Send + Sync {
    async fn upload_resume(&self, file: &SelectedFile) -> Result<AnalysisResult, ClientError>;
    async fn list_resumes(&self) -> Result<Vec<ResumeRecord>, ClientError>;
}

#[derive(Clone)]
pub struct HttpResumeApi {
    client: Client,
    base_url: String,
}

impl HttpResumeApi {
    pub fn new(config: &Config) -> Result<Self, ClientError> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[async_trait]
impl ResumeApi for HttpResumeApi {
    async fn upload_resume(&self, file: &SelectedFile) -> Result<AnalysisResult, ClientError> {
        let part = multipart::Part::bytes(file.bytes.to_vec())
            .file_name(file.name.clone())
            .mime_str(&file.content_type)?;
        let form = multipart::Form::new().part(UPLOAD_FIELD, part);

        debug!(file = %file.name, bytes = file.size(), "Uploading resume");
        let response = self
            .client
            .post(self.url(UPLOAD_PATH))
            .multipart(form)
            .send()
            .await?;

        decode_json(response).await
    }

    async fn list_resumes(&self) -> Result<Vec<ResumeRecord>, ClientError> {
        debug!("Fetching resume history");
        let response = self.client.get(self.url(RESUMES_PATH)).send().await?;
        decode_json(response).await
    }
}

async fn decode_json<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
    let status = response.status();

    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        let detail = error_detail(&body);
        warn!("API returned {}: {}", status, detail);
        return Err(ClientError::Status {
            status: status.as_u16(),
            detail,
        });
    }

    let body = response.bytes().await?;
    Ok(serde_json::from_slice(&body)?)
}

/// Pulls the message out of `{"detail": ...}` error bodies, falling back to the raw text.
fn error_detail(body: &str) -> String {
    match serde_json::from_str::<Value>(body) {
        Ok(Value::Object(map)) => match map.get("detail") {
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
            None => body.to_string(),
        },
        _ => body.to_string(),
    }
}
