//! Client for the external model-generation service.
//!
//! The service accepts a free-text description plus generation-strategy
//! flags and answers with a server-side path to a generated JSON
//! document, which is then loaded through the normal load path. Anything
//! beyond this request/response surface is out of scope here.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default service endpoint.
pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";

/// How the description is divided into generatable units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DivStrategy {
    Gene,
    Clip,
    Prefabs,
}

/// How separately generated units are merged into one model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MergeStrategy {
    Params,
    Hand,
}

/// Request body for the generation endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct GenerateRequest {
    /// Free-text description of the desired model.
    pub desire: String,
    /// Generate the model in one piece instead of dividing it.
    pub whole: bool,
    pub div: DivStrategy,
    pub merge: MergeStrategy,
}

impl GenerateRequest {
    /// Whole-model generation with the default strategies.
    pub fn whole(desire: impl Into<String>) -> Self {
        Self {
            desire: desire.into(),
            whole: true,
            div: DivStrategy::Gene,
            merge: MergeStrategy::Hand,
        }
    }

    /// Divided generation with explicit strategies.
    pub fn divided(desire: impl Into<String>, div: DivStrategy, merge: MergeStrategy) -> Self {
        Self {
            desire: desire.into(),
            whole: false,
            div,
            merge,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
struct GenerateResponse {
    status: String,
    #[serde(default)]
    path: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

/// Outcome of a generation request that reached the service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerateOutcome {
    /// Path of the generated document on the serving host.
    Generated { path: String },
    /// The service reported a failure.
    Failed { message: String },
}

#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("generation request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("generation succeeded but the response carries no file path")]
    MissingPath,
}

/// HTTP client for the generation service.
pub struct GenerateClient {
    base_url: String,
    http: reqwest::Client,
}

impl GenerateClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            http: reqwest::Client::new(),
        }
    }

    /// Post a generation request and interpret the service's verdict.
    pub async fn generate(
        &self,
        request: &GenerateRequest,
    ) -> Result<GenerateOutcome, GenerateError> {
        let response = self
            .http
            .post(format!("{}/api/generate", self.base_url))
            .json(request)
            .send()
            .await?;
        let body: GenerateResponse = response.json().await?;
        outcome(body)
    }
}

impl Default for GenerateClient {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

fn outcome(body: GenerateResponse) -> Result<GenerateOutcome, GenerateError> {
    if body.status == "success" {
        let path = body.path.ok_or(GenerateError::MissingPath)?;
        Ok(GenerateOutcome::Generated { path })
    } else {
        Ok(GenerateOutcome::Failed {
            message: body
                .message
                .unwrap_or_else(|| "generation failed".to_string()),
        })
    }
}
