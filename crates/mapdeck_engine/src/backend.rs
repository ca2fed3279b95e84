use std::time::Duration;

use deck_logging::{deck_debug, deck_info};
use futures_util::StreamExt;
use mapdeck_core::{CourseMap, FailureKind, FetchError, JobKind, Settings, Stats};
use reqwest::header::CONTENT_TYPE;
use reqwest::{StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::{DecodeError, StreamDecoder};

#[derive(Debug, Clone)]
pub struct BackendSettings {
    pub base_url: Url,
    pub connect_timeout: Duration,
    /// Applies to the JSON calls only. Job streams and the folder picker wait
    /// indefinitely.
    pub request_timeout: Duration,
}

impl BackendSettings {
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url,
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
        }
    }
}

/// Receives a job's stream as it is consumed.
pub trait JobSink: Send + Sync {
    /// The backend accepted the job; output follows.
    fn opened(&self);
    /// Decoded text, in stream order.
    fn output(&self, text: String);
}

#[async_trait::async_trait]
pub trait Backend: Send + Sync {
    async fn load_settings(&self) -> Result<Settings, FetchError>;
    async fn save_settings(&self, settings: &Settings) -> Result<(), FetchError>;
    async fn fetch_stats(&self) -> Result<Stats, FetchError>;
    /// `Ok(None)` when the backend answers non-OK: no map has been made yet.
    async fn fetch_map(&self) -> Result<Option<CourseMap>, FetchError>;
    /// `Ok(None)` when the operator cancelled the dialog.
    async fn pick_folder(&self) -> Result<Option<String>, FetchError>;
    /// Starts `kind` and consumes its output stream until it ends.
    async fn run_job(&self, kind: JobKind, sink: &dyn JobSink) -> Result<(), FetchError>;
}

#[derive(Debug, Deserialize)]
struct FolderReply {
    #[serde(default)]
    folder: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ReqwestBackend {
    settings: BackendSettings,
    client: reqwest::Client,
}

impl ReqwestBackend {
    pub fn new(settings: BackendSettings) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .build()
            .map_err(|err| FetchError::new(FailureKind::Network, err.to_string()))?;
        Ok(Self { settings, client })
    }

    fn endpoint(&self, name: &str) -> Result<Url, FetchError> {
        let mut base = self.settings.base_url.clone();
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        base.join(&format!("api/{name}"))
            .map_err(|err| FetchError::new(FailureKind::Network, err.to_string()))
    }

    async fn get_json<T: DeserializeOwned>(&self, name: &str) -> Result<T, FetchError> {
        let response = self
            .client
            .get(self.endpoint(name)?)
            .timeout(self.settings.request_timeout)
            .send()
            .await
            .map_err(map_reqwest_error)?;
        let response = ensure_success(response)?;
        read_json(response).await
    }
}

#[async_trait::async_trait]
impl Backend for ReqwestBackend {
    async fn load_settings(&self) -> Result<Settings, FetchError> {
        self.get_json("settings").await
    }

    async fn save_settings(&self, settings: &Settings) -> Result<(), FetchError> {
        let body = serde_json::to_vec(settings)
            .map_err(|err| FetchError::new(FailureKind::MalformedJson, err.to_string()))?;
        let response = self
            .client
            .post(self.endpoint("settings")?)
            .timeout(self.settings.request_timeout)
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
            .map_err(map_reqwest_error)?;
        ensure_success(response)?;
        Ok(())
    }

    async fn fetch_stats(&self) -> Result<Stats, FetchError> {
        self.get_json("stats").await
    }

    async fn fetch_map(&self) -> Result<Option<CourseMap>, FetchError> {
        let response = self
            .client
            .get(self.endpoint("map")?)
            .timeout(self.settings.request_timeout)
            .send()
            .await
            .map_err(map_reqwest_error)?;
        if !response.status().is_success() {
            deck_debug!("map not available: {}", response.status());
            return Ok(None);
        }
        read_json(response).await.map(Some)
    }

    async fn pick_folder(&self) -> Result<Option<String>, FetchError> {
        let response = self
            .client
            .get(self.endpoint("pick-folder")?)
            .send()
            .await
            .map_err(map_reqwest_error)?;
        let reply: FolderReply = read_json(ensure_success(response)?).await?;
        Ok(reply.folder.filter(|folder| !folder.is_empty()))
    }

    async fn run_job(&self, kind: JobKind, sink: &dyn JobSink) -> Result<(), FetchError> {
        let response = self
            .client
            .post(self.endpoint(kind.endpoint())?)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if status == StatusCode::CONFLICT {
            return Err(FetchError::new(FailureKind::AlreadyRunning, status.to_string()));
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FetchError::new(
                FailureKind::HttpStatus(status.as_u16()),
                status_with_reason(status, &body),
            ));
        }
        deck_info!("{kind:?} stream opened");
        sink.opened();

        let mut decoder = StreamDecoder::new();
        let mut received: u64 = 0;
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk =
                chunk.map_err(|err| FetchError::new(FailureKind::Stream, err.to_string()))?;
            received += chunk.len() as u64;
            let text = decoder
                .push(&chunk)
                .map_err(|err| decode_failure(sink, err))?;
            if !text.is_empty() {
                sink.output(text);
            }
        }
        let tail = decoder
            .finish()
            .map_err(|err| decode_failure(sink, err))?;
        if !tail.is_empty() {
            sink.output(tail);
        }
        deck_info!("{kind:?} stream ended after {received} bytes");
        Ok(())
    }
}

const MAX_REASON_CHARS: usize = 200;

/// Status line plus the start of the server's explanation, if it sent one.
fn status_with_reason(status: StatusCode, body: &str) -> String {
    let body = body.trim();
    if body.is_empty() {
        return status.to_string();
    }
    let mut reason: String = body.chars().take(MAX_REASON_CHARS).collect();
    if body.chars().count() > MAX_REASON_CHARS {
        reason.push_str("...");
    }
    format!("{status}: {reason}")
}

fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, FetchError> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(FetchError::new(
            FailureKind::HttpStatus(status.as_u16()),
            status.to_string(),
        ))
    }
}

async fn read_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, FetchError> {
    let bytes = response.bytes().await.map_err(map_reqwest_error)?;
    serde_json::from_slice(&bytes)
        .map_err(|err| FetchError::new(FailureKind::MalformedJson, err.to_string()))
}

/// Forwards the text that preceded a bad sequence, then fails the job.
fn decode_failure(sink: &dyn JobSink, err: DecodeError) -> FetchError {
    let message = err.to_string();
    let decoded = err.into_decoded();
    if !decoded.is_empty() {
        sink.output(decoded);
    }
    FetchError::new(FailureKind::Decode, message)
}

fn map_reqwest_error(err: reqwest::Error) -> FetchError {
    if err.is_timeout() {
        return FetchError::new(FailureKind::Timeout, err.to_string());
    }
    FetchError::new(FailureKind::Network, err.to_string())
}
