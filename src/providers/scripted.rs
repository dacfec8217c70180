//! In-memory providers for unit tests.

use crate::error::ProviderError;
use crate::providers::{ContentBlock, LlmProvider};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;

/// Replays a fixed list of replies and records every request.
///
/// A reply of `Err(status)` is returned as `ProviderError::Status`. Running out
/// of replies yields `ProviderError::MissingContent`.
pub(crate) struct ScriptedProvider {
    replies: Mutex<VecDeque<Result<String, u16>>>,
    requests: Mutex<Vec<Vec<ContentBlock>>>,
}

impl ScriptedProvider {
    pub(crate) fn new(replies: &[&str]) -> Self {
        Self::with_results(replies.iter().map(|r| Ok(*r)).collect())
    }

    pub(crate) fn with_results(replies: Vec<Result<&str, u16>>) -> Self {
        ScriptedProvider {
            replies: Mutex::new(
                replies
                    .into_iter()
                    .map(|r| r.map(str::to_string))
                    .collect(),
            ),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn requests(&self) -> Vec<Vec<ContentBlock>> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl LlmProvider for ScriptedProvider {
    fn provider_name(&self) -> &str {
        "scripted"
    }

    async fn send(&self, content: Vec<ContentBlock>) -> Result<String, ProviderError> {
        self.requests.lock().unwrap().push(content);
        match self.replies.lock().unwrap().pop_front() {
            Some(Ok(text)) => Ok(text),
            Some(Err(status)) => Err(ProviderError::Status {
                status,
                body: String::new(),
            }),
            None => Err(ProviderError::MissingContent("scripted".to_string())),
        }
    }
}

/// Never answers, so a request sent to it stays in flight.
pub(crate) struct StalledProvider;

#[async_trait]
impl LlmProvider for StalledProvider {
    fn provider_name(&self) -> &str {
        "stalled"
    }

    async fn send(&self, _content: Vec<ContentBlock>) -> Result<String, ProviderError> {
        std::future::pending().await
    }
}
