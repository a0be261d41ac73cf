use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::application::ports::{TranslationBackend, TranslationError, TranslationRequest};

enum Behavior {
    /// Returns `[label:target] original-text` so assertions can see both the
    /// routed backend and the text it received.
    Echo(String),
    Fixed(String),
    Fail(String),
}

pub struct MockTranslationBackend {
    behavior: Behavior,
    requests: Mutex<Vec<TranslationRequest>>,
}

impl MockTranslationBackend {
    pub fn echoing(label: &str) -> Self {
        Self {
            behavior: Behavior::Echo(label.to_string()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn returning(text: &str) -> Self {
        Self {
            behavior: Behavior::Fixed(text.to_string()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(reason: &str) -> Self {
        Self {
            behavior: Behavior::Fail(reason.to_string()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub async fn call_count(&self) -> usize {
        self.requests.lock().await.len()
    }

    pub async fn requests(&self) -> Vec<TranslationRequest> {
        self.requests.lock().await.clone()
    }
}

#[async_trait]
impl TranslationBackend for MockTranslationBackend {
    async fn translate(&self, request: &TranslationRequest) -> Result<String, TranslationError> {
        self.requests.lock().await.push(request.clone());

        match &self.behavior {
            Behavior::Echo(label) => Ok(format!(
                "[{}:{}] {}",
                label,
                request.target_lang.as_str(),
                request.text
            )),
            Behavior::Fixed(text) => Ok(text.clone()),
            Behavior::Fail(reason) => Err(TranslationError::ApiRequestFailed(reason.clone())),
        }
    }
}
