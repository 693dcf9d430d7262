use crate::error::AnswerError;
use crate::models::SearchHit;
use crate::tokenizer::split_words;
use crate::traits::AnswerService;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;

pub const FALLBACK_CONTEXTS: usize = 3;
pub const FALLBACK_MAX_WORDS: usize = 300;
pub const FALLBACK_SUFFIX: &str = " ...";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AnswerContext {
    pub text: String,
    pub page: u32,
    pub score: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AnswerRequest {
    pub question: String,
    pub contexts: Vec<AnswerContext>,
}

impl AnswerRequest {
    pub fn from_hits(question: &str, hits: &[SearchHit]) -> Self {
        Self {
            question: question.to_string(),
            contexts: hits
                .iter()
                .map(|hit| AnswerContext {
                    text: hit.text.clone(),
                    page: hit.page_number,
                    score: hit.score,
                })
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
struct AnswerResponse {
    #[serde(default)]
    answer: Option<String>,
}

#[derive(Debug, Clone)]
pub struct AnswerEndpointConfig {
    pub endpoint: String,
    pub api_key: Option<String>,
    pub timeout: Option<Duration>,
}

impl AnswerEndpointConfig {
    /// Builds a config when `endpoint` is non-blank; a blank key is ignored.
    pub fn from_parts(
        endpoint: Option<&str>,
        api_key: Option<&str>,
        timeout: Option<Duration>,
    ) -> Option<Self> {
        let endpoint = endpoint?.trim();
        if endpoint.is_empty() {
            return None;
        }

        let api_key = api_key
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .map(str::to_string);

        Some(Self {
            endpoint: endpoint.to_string(),
            api_key,
            timeout,
        })
    }
}

/// HTTP client for an answer service speaking the
/// `{question, contexts}` -> `{answer}` JSON protocol.
pub struct RemoteAnswerClient {
    endpoint: Url,
    api_key: Option<String>,
    client: Client,
}

impl RemoteAnswerClient {
    pub fn new(config: &AnswerEndpointConfig) -> Result<Self, AnswerError> {
        let endpoint = Url::parse(&config.endpoint)?;
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            endpoint,
            api_key: config.api_key.clone(),
            client: builder.build()?,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl AnswerService for RemoteAnswerClient {
    async fn answer(&self, request: &AnswerRequest) -> Result<String, AnswerError> {
        let mut call = self
            .client
            .post(self.endpoint.clone())
            .header("content-type", "application/json")
            .json(request);

        if let Some(api_key) = &self.api_key {
            call = call.bearer_auth(api_key);
        }

        let response = call.send().await?;
        if !response.status().is_success() {
            return Err(AnswerError::BackendResponse {
                backend: self.endpoint.to_string(),
                details: response.status().to_string(),
            });
        }

        let body = response.text().await?;
        parse_answer(&body)
    }
}

pub(crate) fn parse_answer(body: &str) -> Result<String, AnswerError> {
    let parsed: AnswerResponse = serde_json::from_str(body)?;
    parsed
        .answer
        .filter(|answer| !answer.trim().is_empty())
        .ok_or(AnswerError::MissingAnswer)
}

/// Local answer used when no service is configured or the service failed:
/// the first words of the best three chunks.
pub fn extractive_answer(hits: &[SearchHit]) -> String {
    let combined = hits
        .iter()
        .take(FALLBACK_CONTEXTS)
        .map(|hit| hit.text.as_str())
        .collect::<Vec<_>>()
        .join(" ");

    let words = split_words(&combined)
        .take(FALLBACK_MAX_WORDS)
        .collect::<Vec<_>>()
        .join(" ");

    format!("{words}{FALLBACK_SUFFIX}")
}
