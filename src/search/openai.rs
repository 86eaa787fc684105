//! OpenAI Responses API client using the `web_search` tool.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::{SearchClient, SearchError, SearchResult};
use crate::classifier::keywords::all_keywords;
use crate::constants::DEFAULT_MAX_ITEMS;
use crate::normalizer::RawPayload;

pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_OPENAI_MODEL: &str = "gpt-4o-mini";
const MAX_OUTPUT_TOKENS: u32 = 2000;

#[derive(Debug, Clone)]
pub struct OpenAiConfig {
    /// `None` makes every search fail with [`SearchError::NotConfigured`].
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
    pub max_articles: usize,
    /// Transport-level timeout for one HTTP request.
    pub request_timeout: Duration,
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_OPENAI_MODEL.to_string(),
            base_url: DEFAULT_OPENAI_BASE_URL.to_string(),
            max_articles: DEFAULT_MAX_ITEMS,
            request_timeout: Duration::from_secs(120),
        }
    }
}

pub struct OpenAiSearchClient {
    http: reqwest::Client,
    config: OpenAiConfig,
}

impl std::fmt::Debug for OpenAiSearchClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiSearchClient")
            .field("model", &self.config.model)
            .field("base_url", &self.config.base_url)
            .field("configured", &self.is_configured())
            .finish()
    }
}

impl OpenAiSearchClient {
    pub fn new(config: OpenAiConfig) -> SearchResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| SearchError::Transport(e.to_string()))?;
        Ok(Self { http, config })
    }

    pub fn is_configured(&self) -> bool {
        self.config
            .api_key
            .as_deref()
            .is_some_and(|k| !k.trim().is_empty())
    }

    fn endpoint(&self) -> String {
        format!("{}/responses", self.config.base_url.trim_end_matches('/'))
    }

    fn request_body(&self, company: &str, window_days: u32) -> ResponsesRequest<'_> {
        ResponsesRequest {
            model: &self.config.model,
            input: vec![
                InputMessage {
                    role: "system",
                    content: system_prompt(self.config.max_articles),
                },
                InputMessage {
                    role: "user",
                    content: user_prompt(company, window_days),
                },
            ],
            tools: vec![ToolSpec { kind: "web_search" }],
            max_output_tokens: MAX_OUTPUT_TOKENS,
        }
    }
}

/// Request body for `POST /responses`.
#[derive(Debug, Serialize)]
struct ResponsesRequest<'a> {
    model: &'a str,
    input: Vec<InputMessage>,
    tools: Vec<ToolSpec>,
    max_output_tokens: u32,
}

#[derive(Debug, Serialize)]
struct InputMessage {
    role: &'static str,
    content: String,
}

#[derive(Debug, Serialize)]
struct ToolSpec {
    #[serde(rename = "type")]
    kind: &'static str,
}

/// The subset of a Responses API reply this client reads. Unknown fields and
/// output item types are ignored.
#[derive(Debug, Default, Deserialize)]
struct ResponsesReply {
    #[serde(default)]
    output_text: Option<String>,
    #[serde(default)]
    output: Vec<OutputItem>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum OutputItem {
    Message {
        #[serde(default)]
        content: Vec<ContentPart>,
    },
    #[serde(other)]
    Other,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ContentPart {
    OutputText { text: String },
    #[serde(other)]
    Other,
}

impl ResponsesReply {
    /// The `output_text` shortcut, else every `output_text` part of every message joined.
    fn text(self) -> Option<String> {
        if let Some(text) = self.output_text.filter(|t| !t.is_empty()) {
            return Some(text);
        }

        let parts: Vec<String> = self
            .output
            .into_iter()
            .filter_map(|item| match item {
                OutputItem::Message { content } => Some(content),
                OutputItem::Other => None,
            })
            .flatten()
            .filter_map(|part| match part {
                ContentPart::OutputText { text } => Some(text),
                ContentPart::Other => None,
            })
            .collect();

        (!parts.is_empty()).then(|| parts.join("\n"))
    }
}

#[async_trait]
impl SearchClient for OpenAiSearchClient {
    async fn search(&self, company: &str, window_days: u32) -> SearchResult<RawPayload> {
        let Some(api_key) = self.config.api_key.as_deref().filter(|k| !k.trim().is_empty())
        else {
            return Err(SearchError::NotConfigured);
        };

        debug!(company, window_days, model = %self.config.model, "Calling web search");

        let response = self
            .http
            .post(self.endpoint())
            .bearer_auth(api_key)
            .json(&self.request_body(company, window_days))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), "Web search request rejected");
            return Err(status_error(status, &body));
        }

        let reply: ResponsesReply = response.json().await?;
        let text = reply.text().ok_or_else(|| {
            SearchError::InvalidResponse("response contains no output text".to_string())
        })?;

        Ok(RawPayload::Text(text))
    }

    fn name(&self) -> &'static str {
        "openai_web_search"
    }
}

fn status_error(status: StatusCode, body: &str) -> SearchError {
    let snippet: String = body.chars().take(200).collect();
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => SearchError::Auth {
            status: status.as_u16(),
        },
        StatusCode::TOO_MANY_REQUESTS => SearchError::Quota(snippet),
        _ => SearchError::Transport(format!("status {}: {}", status.as_u16(), snippet)),
    }
}

fn system_prompt(max_articles: usize) -> String {
    format!(
        "You are an ESG research assistant. Use the web_search tool to find recent news \
         describing environmental, social or governance risks involving the requested company. \
         Return only valid JSON with the keys \"overview\" (a two-sentence summary of the \
         company's business) and \"articles\" (a list of objects with the keys title, \
         description, url, source and published_at in ISO 8601). Include up to {max_articles} \
         distinct articles from credible outlets, focusing on controversies rather than press releases."
    )
}

fn user_prompt(company: &str, window_days: u32) -> String {
    format!(
        "Company: {company}\nTime horizon: last {window_days} days.\nRelevant ESG keywords: {}.\n\
         Summarise the ESG risk each article highlights in its description.",
        all_keywords().join(", ")
    )
}
