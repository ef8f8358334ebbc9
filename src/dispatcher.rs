use serde::Deserialize;
use serde_json::{Value, json};
use thiserror::Error;

use crate::config::Config;

const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Placeholder recorded when a tool_use segment carries no readable query.
const MISSING_QUERY: &str = "N/A";

/// Any failure during the one remote call: transport, auth, rate limit, or an
/// undecodable body. No distinction is drawn between transient and permanent
/// causes and nothing is retried.
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("request to completion endpoint failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("completion endpoint returned {status}: {message}")]
    Api {
        status: reqwest::StatusCode,
        message: String,
    },
    #[error("failed to decode completion response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// What one dispatch produced: the concatenated prose and, in order, the web
/// searches the remote service chose to run. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchOutcome {
    pub text: String,
    pub tool_invocations: Vec<ToolInvocation>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolInvocation {
    pub query: String,
}

/// One typed unit of the completion response. Tags other than text and
/// tool_use are deliberately ignored.
#[derive(Debug, Deserialize)]
#[serde(tag = "type")]
enum ContentBlock {
    #[serde(rename = "text")]
    Text { text: String },
    #[serde(rename = "tool_use")]
    ToolUse {
        #[serde(default)]
        input: Option<Value>,
    },
    #[serde(other)]
    Other,
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    #[serde(default)]
    content: Vec<ContentBlock>,
}

/// Sends composed prompts to the Anthropic Messages API with the hosted web
/// search tool enabled. Holds its own client and credentials so a test can
/// point one at a local stand-in server.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
    model: String,
    max_tokens: u32,
}

impl Dispatcher {
    pub fn new(config: &Config) -> Dispatcher {
        Dispatcher {
            http: reqwest::Client::new(),
            api_key: config.anthropic_api_key.clone(),
            base_url: config.anthropic_base_url.clone(),
            model: config.model.clone(),
            max_tokens: config.max_tokens,
        }
    }

    /// One blocking round-trip: POST the prompt as a single user turn, then
    /// partition the returned segment list. No retry, no timeout override.
    pub async fn dispatch(&self, prompt: &str) -> Result<SearchOutcome, DispatchError> {
        let url = format!("{}/v1/messages", self.base_url.trim_end_matches('/'));

        let body = json!({
            "model": self.model,
            "max_tokens": self.max_tokens,
            "tools": [
                {
                    "type": "web_search_20250305",
                    "name": "web_search"
                }
            ],
            "messages": [
                {
                    "role": "user",
                    "content": prompt
                }
            ]
        });

        let response = self
            .http
            .post(url)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        let payload = response.text().await?;
        if !status.is_success() {
            log::error!("completion endpoint rejected request: {status}");
            return Err(DispatchError::Api {
                status,
                message: payload,
            });
        }

        let parsed: MessagesResponse = serde_json::from_str(&payload)?;
        Ok(partition_response(parsed))
    }
}

/// Split the ordered segment list into prose and tool-invocation records,
/// preserving order within each.
fn partition_response(response: MessagesResponse) -> SearchOutcome {
    let mut text = String::new();
    let mut tool_invocations = Vec::new();

    for block in response.content {
        match block {
            ContentBlock::Text { text: t } => text.push_str(&t),
            ContentBlock::ToolUse { input } => {
                let query = input
                    .as_ref()
                    .and_then(|i| i.get("query"))
                    .and_then(Value::as_str)
                    .unwrap_or(MISSING_QUERY)
                    .to_string();
                tool_invocations.push(ToolInvocation { query });
            }
            ContentBlock::Other => {}
        }
    }

    SearchOutcome {
        text,
        tool_invocations,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(body: serde_json::Value) -> SearchOutcome {
        let response: MessagesResponse = serde_json::from_value(body).unwrap();
        partition_response(response)
    }

    #[test]
    fn text_segments_concatenate_in_order() {
        let outcome = parse(json!({
            "content": [
                { "type": "text", "text": "Average price is " },
                { "type": "tool_use", "id": "tu_1", "name": "web_search",
                  "input": { "query": "nashville daycare prices" } },
                { "type": "text", "text": "$250/week." }
            ]
        }));
        assert_eq!(outcome.text, "Average price is $250/week.");
        assert_eq!(
            outcome.tool_invocations,
            vec![ToolInvocation {
                query: "nashville daycare prices".to_string()
            }]
        );
    }

    #[test]
    fn tool_use_without_input_gets_sentinel() {
        let outcome = parse(json!({
            "content": [
                { "type": "tool_use", "id": "tu_1", "name": "web_search" }
            ]
        }));
        assert_eq!(outcome.tool_invocations[0].query, "N/A");
    }

    #[test]
    fn tool_use_with_non_string_query_gets_sentinel() {
        let outcome = parse(json!({
            "content": [
                { "type": "tool_use", "input": { "query": 42 } }
            ]
        }));
        assert_eq!(outcome.tool_invocations[0].query, "N/A");
    }

    #[test]
    fn unknown_segment_kinds_are_ignored() {
        let outcome = parse(json!({
            "content": [
                { "type": "citation", "url": "https://example.com" },
                { "type": "text", "text": "hello" },
                { "type": "web_search_tool_result", "content": [] }
            ]
        }));
        assert_eq!(outcome.text, "hello");
        assert!(outcome.tool_invocations.is_empty());
    }

    #[test]
    fn empty_content_yields_empty_outcome() {
        let outcome = parse(json!({ "content": [] }));
        assert!(outcome.text.is_empty());
        assert!(outcome.tool_invocations.is_empty());
    }

    #[test]
    fn invocation_order_is_preserved() {
        let outcome = parse(json!({
            "content": [
                { "type": "tool_use", "input": { "query": "first" } },
                { "type": "text", "text": "mid" },
                { "type": "tool_use", "input": { "query": "second" } }
            ]
        }));
        let queries: Vec<&str> = outcome
            .tool_invocations
            .iter()
            .map(|t| t.query.as_str())
            .collect();
        assert_eq!(queries, vec!["first", "second"]);
    }
}
