//! Mock chatbot backend for tests.
//!
//! Configurable to return queued replies, inject errors, and simulate
//! latency; captures every request for verification.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use tokio::time::sleep;

use crate::chat::{ChatBackend, ChatReply, ChatRequest};
use crate::error::ChatError;

/// One configured mock outcome, consumed in order.
#[derive(Debug, Clone)]
enum MockOutcome {
    Reply(String),
    Unreachable(String),
}

/// Mock `ChatBackend`.
///
/// With an empty queue it echoes the incoming message, so long trial
/// scenarios don't need twenty queued replies.
#[derive(Clone, Default)]
pub struct MockChatBackend {
    outcomes: Arc<Mutex<VecDeque<MockOutcome>>>,
    delay: Duration,
    calls: Arc<Mutex<Vec<ChatRequest>>>,
}

impl MockChatBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a successful reply.
    pub fn with_reply(self, reply: impl Into<String>) -> Self {
        self.outcomes
            .lock()
            .unwrap()
            .push_back(MockOutcome::Reply(reply.into()));
        self
    }

    /// Queue a network-style failure.
    pub fn with_failure(self, reason: impl Into<String>) -> Self {
        self.outcomes
            .lock()
            .unwrap()
            .push_back(MockOutcome::Unreachable(reason.into()));
        self
    }

    /// Simulate per-request latency.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// All requests seen so far.
    pub fn calls(&self) -> Vec<ChatRequest> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl ChatBackend for MockChatBackend {
    async fn complete(&self, request: ChatRequest) -> Result<ChatReply, ChatError> {
        if !self.delay.is_zero() {
            sleep(self.delay).await;
        }

        let message = request.message.clone();
        self.calls.lock().unwrap().push(request);

        let outcome = self.outcomes.lock().unwrap().pop_front();
        match outcome {
            Some(MockOutcome::Reply(reply)) => Ok(ChatReply { reply }),
            Some(MockOutcome::Unreachable(reason)) => Err(ChatError::RequestFailed { reason }),
            None => Ok(ChatReply {
                reply: format!("You said: {message}"),
            }),
        }
    }

    fn name(&self) -> &str {
        "mock"
    }
}
