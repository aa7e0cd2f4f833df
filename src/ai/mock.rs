//! Scripted mock runner for testing the pipeline without a live model

use crate::ai::backend::{BackendError, TextRunner};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;

/// A single scripted reply: either a completion or a transport error
#[derive(Debug, Clone)]
pub struct MockReply {
    pub text: String,
    pub error: Option<BackendError>,
}

impl MockReply {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            error: None,
        }
    }

    pub fn error(error: BackendError) -> Self {
        Self {
            text: String::new(),
            error: Some(error),
        }
    }
}

/// Runner that replays a scripted queue of replies in order.
///
/// Each `run` call consumes the next reply and records the prompt it was
/// given, so tests can assert both what the pipeline sent and how it handled
/// the completion. An exhausted queue is a test bug and returns
/// `BackendError::Other` so the failure is visible.
pub struct MockRunner {
    replies: Mutex<VecDeque<MockReply>>,
    prompts: Mutex<Vec<String>>,
    name: String,
}

impl MockRunner {
    pub fn new() -> Self {
        Self::with_name("MockRunner")
    }

    pub fn with_name(name: impl Into<String>) -> Self {
        Self {
            replies: Mutex::new(VecDeque::new()),
            prompts: Mutex::new(Vec::new()),
            name: name.into(),
        }
    }

    pub fn add_reply(&self, reply: MockReply) {
        self.replies.lock().unwrap().push_back(reply);
    }

    pub fn add_replies(&self, replies: impl IntoIterator<Item = MockReply>) {
        let mut queue = self.replies.lock().unwrap();
        for reply in replies {
            queue.push_back(reply);
        }
    }

    pub fn remaining_replies(&self) -> usize {
        self.replies.lock().unwrap().len()
    }

    /// Prompts received so far, in call order
    pub fn recorded_prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

impl Default for MockRunner {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TextRunner for MockRunner {
    async fn run(&self, prompt: &str) -> Result<String, BackendError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        let reply = self.replies.lock().unwrap().pop_front();

        match reply {
            Some(MockReply {
                error: Some(error), ..
            }) => Err(error),
            Some(MockReply { text, .. }) => Ok(text),
            None => Err(BackendError::Other {
                message: "MockRunner: no scripted replies remaining".to_string(),
            }),
        }
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_replies_consumed_in_order() {
        let runner = MockRunner::new();
        runner.add_replies(vec![MockReply::text("first"), MockReply::text("second")]);

        assert_eq!(runner.remaining_replies(), 2);
        assert_eq!(runner.run("one").await.unwrap(), "first");
        assert_eq!(runner.run("two").await.unwrap(), "second");
        assert_eq!(runner.remaining_replies(), 0);
        assert_eq!(runner.recorded_prompts(), vec!["one", "two"]);
    }

    #[tokio::test]
    async fn test_scripted_error() {
        let runner = MockRunner::new();
        runner.add_reply(MockReply::error(BackendError::TimeoutError {
            seconds: 60,
        }));

        let err = runner.run("p").await.unwrap_err();
        assert!(matches!(err, BackendError::TimeoutError { seconds: 60 }));
    }

    #[tokio::test]
    async fn test_exhausted_queue_is_an_error() {
        let runner = MockRunner::with_name("empty");
        assert_eq!(runner.name(), "empty");

        let err = runner.run("p").await.unwrap_err();
        assert!(matches!(err, BackendError::Other { .. }));
    }
}
