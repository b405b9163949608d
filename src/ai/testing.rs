use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use super::{CompletionService, PostGenerator};
use crate::error::{AppError, Result};

pub enum Reply {
    Text(&'static str),
    Fail,
    Hang,
}

/// Plays back canned replies in order and records the prompts it saw.
pub struct ScriptedCompletion {
    replies: Mutex<VecDeque<Reply>>,
    pub prompts: Mutex<Vec<String>>,
}

impl ScriptedCompletion {
    pub fn new(replies: Vec<Reply>) -> Arc<Self> {
        Arc::new(Self {
            replies: Mutex::new(replies.into()),
            prompts: Mutex::new(Vec::new()),
        })
    }
}

#[async_trait]
impl CompletionService for ScriptedCompletion {
    fn name(&self) -> &str {
        "Scripted"
    }

    async fn complete(&self, _model: &str, prompt: &str) -> Result<String> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        let reply = self.replies.lock().unwrap().pop_front();
        match reply {
            Some(Reply::Text(text)) => Ok(text.to_string()),
            Some(Reply::Hang) => {
                tokio::time::sleep(Duration::from_secs(30)).await;
                Ok(String::new())
            }
            Some(Reply::Fail) | None => Err(AppError::UpstreamStatus {
                status: 503,
                body: "unavailable".to_string(),
            }),
        }
    }
}

/// A generator over `script` with a short timeout.
pub fn generator(script: &Arc<ScriptedCompletion>) -> PostGenerator {
    let service: Arc<dyn CompletionService> = script.clone();
    PostGenerator::new(
        Some((service, "test-model".to_string())),
        Duration::from_millis(200),
    )
}
