//! Fake backends for unit tests.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use super::backend::{BackendError, TextBackend};
use super::rate_limit::Unthrottled;
use super::{RetryPolicy, StructuredClient};

#[derive(Default)]
struct Script {
    replies: VecDeque<Result<String, BackendError>>,
    models: Vec<String>,
    prompts: Vec<String>,
}

/// Replays a fixed sequence of replies, one per call, and records what it was asked.
#[derive(Clone, Default)]
pub struct ScriptedBackend {
    script: Arc<Mutex<Script>>,
}

impl ScriptedBackend {
    pub fn new(replies: Vec<Result<String, BackendError>>) -> Self {
        Self {
            script: Arc::new(Mutex::new(Script {
                replies: replies.into(),
                ..Default::default()
            })),
        }
    }

    pub fn call_count(&self) -> usize {
        self.script.lock().unwrap().models.len()
    }

    pub fn models(&self) -> Vec<String> {
        self.script.lock().unwrap().models.clone()
    }

    pub fn prompts(&self) -> Vec<String> {
        self.script.lock().unwrap().prompts.clone()
    }
}

#[async_trait]
impl TextBackend for ScriptedBackend {
    async fn generate(&self, model: &str, prompt: &str) -> Result<String, BackendError> {
        let mut script = self.script.lock().unwrap();
        script.models.push(model.to_string());
        script.prompts.push(prompt.to_string());
        script
            .replies
            .pop_front()
            .unwrap_or_else(|| panic!("ScriptedBackend ran out of replies"))
    }
}

type DelayFn = Box<dyn Fn(&str) -> Duration + Send + Sync>;

/// Answers each prompt with a closure, for tests where calls run concurrently.
///
/// With `with_delay`, each call sleeps before answering, so the closure runs in completion order.
pub struct FnBackend<F> {
    respond: F,
    delay: Option<DelayFn>,
    calls: Mutex<Vec<String>>,
}

impl<F> FnBackend<F>
where
    F: Fn(&str) -> Result<String, BackendError> + Send + Sync,
{
    pub fn new(respond: F) -> Self {
        Self {
            respond,
            delay: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn with_delay(mut self, delay: impl Fn(&str) -> Duration + Send + Sync + 'static) -> Self {
        self.delay = Some(Box::new(delay));
        self
    }

    pub fn prompts(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl<F> TextBackend for FnBackend<F>
where
    F: Fn(&str) -> Result<String, BackendError> + Send + Sync,
{
    async fn generate(&self, _model: &str, prompt: &str) -> Result<String, BackendError> {
        self.calls.lock().unwrap().push(prompt.to_string());
        match &self.delay {
            Some(delay) => tokio::time::sleep(delay(prompt)).await,
            None => tokio::task::yield_now().await,
        }
        (self.respond)(prompt)
    }
}

/// A client with the default retry policy and no request pacing.
pub fn test_client(backend: impl TextBackend + 'static) -> StructuredClient {
    StructuredClient::new(
        Arc::new(backend),
        Arc::new(Unthrottled),
        RetryPolicy::default(),
    )
}

/// Pulls the value of a `- LABEL: value` line out of a prompt.
pub fn prompt_field<'a>(prompt: &'a str, label: &str) -> Option<&'a str> {
    let marker = format!("- {label}: ");
    prompt
        .lines()
        .find_map(|line| line.trim_start().strip_prefix(marker.as_str()))
        .map(str::trim)
}
