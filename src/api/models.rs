use serde::Serialize;

use crate::dispatcher::SearchOutcome;

pub use crate::prompt::SearchRequest;

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub text: String,
    pub tool_invocations: Vec<ToolInvocationRecord>,
    /// Human-readable "last updated" caption; presentation only.
    pub last_updated: String,
}

#[derive(Debug, Serialize)]
pub struct ToolInvocationRecord {
    pub query: String,
}

impl SearchResponse {
    pub fn from_outcome(outcome: SearchOutcome, last_updated: String) -> SearchResponse {
        SearchResponse {
            text: outcome.text,
            tool_invocations: outcome
                .tool_invocations
                .into_iter()
                .map(|t| ToolInvocationRecord { query: t.query })
                .collect(),
            last_updated,
        }
    }
}
