use crate::domain::monitoring::detector::{DetectorError, DetectorOutcome, SourceRef, UpdateDetector};
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};

/// A thin client against the external detector service. The actual
/// LLM-plus-web-search logic lives outside this crate; this adapter only
/// talks JSON over HTTP to whatever implements the contract.
pub struct HttpUpdateDetector {
    http: reqwest::Client,
    endpoint: String,
}

impl HttpUpdateDetector {
    pub fn new(endpoint: String, timeout: Duration) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { http, endpoint })
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
enum RemoteStatus {
    UpdateFound,
    NoUpdate,
    Error,
}

#[derive(Debug, Deserialize)]
struct RemoteSource {
    title: String,
    url: String,
    content: String,
    published_date: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RemoteResponse {
    status: RemoteStatus,
    summary: Option<String>,
    #[serde(default)]
    sources: Vec<RemoteSource>,
    error_message: Option<String>,
}

#[async_trait]
impl UpdateDetector for HttpUpdateDetector {
    async fn check(&self, target_value: &str) -> Result<DetectorOutcome, DetectorError> {
        debug!(target_value, "calling update detector");
        let response = self
            .http
            .post(&self.endpoint)
            .json(&serde_json::json!({ "hscode": target_value }))
            .send()
            .await
            .map_err(|e| classify_transport_error(&e))?;

        if response.status() == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(DetectorError::RateLimited);
        }
        if !response.status().is_success() {
            return Err(DetectorError::Internal(format!(
                "detector returned HTTP {}",
                response.status()
            )));
        }

        let body: RemoteResponse = response
            .json()
            .await
            .map_err(|e| DetectorError::Malformed(e.to_string()))?;

        match body.status {
            RemoteStatus::NoUpdate => Ok(DetectorOutcome::NoUpdate),
            RemoteStatus::Error => Err(DetectorError::Internal(
                body.error_message.unwrap_or_else(|| "unspecified detector error".into()),
            )),
            RemoteStatus::UpdateFound => {
                let summary = body.summary.filter(|s| !s.trim().is_empty()).ok_or_else(|| {
                    DetectorError::Malformed("UPDATE_FOUND with empty summary".into())
                })?;
                if body.sources.is_empty() {
                    return Err(DetectorError::Malformed(
                        "UPDATE_FOUND with no sources".into(),
                    ));
                }
                let sources = body
                    .sources
                    .into_iter()
                    .map(|s| SourceRef {
                        title: s.title,
                        url: s.url,
                        content: s.content,
                        published_date: s.published_date,
                    })
                    .collect();
                Ok(DetectorOutcome::UpdateFound { summary, sources })
            }
        }
    }
}

fn classify_transport_error(err: &reqwest::Error) -> DetectorError {
    if err.is_timeout() {
        warn!("detector call timed out");
        DetectorError::Timeout
    } else {
        DetectorError::Internal(err.to_string())
    }
}
