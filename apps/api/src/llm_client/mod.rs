//! Structured generation client: the single point of entry for all model calls.
//!
//! ARCHITECTURAL RULE: generators never talk to a `TextBackend` directly.
//! Every call goes through `StructuredClient`, which owns retry, pacing and JSON parsing.
//!
//! Models: a primary model for every attempt but the last, a fallback model for the last one.
use std::sync::Arc;
use std::time::Duration;

use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{info, warn};

pub mod backend;
pub mod prompts;
pub mod rate_limit;
#[cfg(test)]
pub mod testing;

use backend::{BackendError, TextBackend};
use prompts::compose_prompt;
use rate_limit::RateLimiter;

pub const PRIMARY_MODEL: &str = "gemini-2.0-flash-exp";
/// Reserved for the final attempt.
pub const FALLBACK_MODEL: &str = "gemini-flash-latest";
const MAX_RETRIES: u32 = 3;

#[derive(Debug, Error)]
pub enum LlmError {
    /// The model answered, but not with locatable/valid JSON. Never retried.
    #[error("Failed to parse AI response as JSON: {message}")]
    Parse { message: String, raw: String },

    #[error("Max retries exceeded after {attempts} attempts: {last_error}")]
    RetriesExhausted { attempts: u32, last_error: String },
}

/// Attempt budget and wait schedule for `StructuredClient`.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    pub max_retries: u32,
    /// Wait before attempt `n` is `backoff_step * n`.
    pub backoff_step: Duration,
    /// Replaces the backoff after a rate-limited attempt.
    pub rate_limit_wait: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: MAX_RETRIES,
            backoff_step: Duration::from_secs(5),
            rate_limit_wait: Duration::from_secs(30),
        }
    }
}

impl RetryPolicy {
    fn wait_before(&self, attempt: u32, previous_rate_limited: bool) -> Duration {
        if previous_rate_limited {
            self.rate_limit_wait
        } else {
            self.backoff_step * attempt
        }
    }
}

/// Turns a (system instruction, user message) pair into a typed value.
#[derive(Clone)]
pub struct StructuredClient {
    backend: Arc<dyn TextBackend>,
    limiter: Arc<dyn RateLimiter>,
    policy: RetryPolicy,
}

impl StructuredClient {
    pub fn new(
        backend: Arc<dyn TextBackend>,
        limiter: Arc<dyn RateLimiter>,
        policy: RetryPolicy,
    ) -> Self {
        Self {
            backend,
            limiter,
            policy,
        }
    }

    /// Calls the model with the default attempt budget and parses its reply as `T`.
    pub async fn generate_structured<T: DeserializeOwned>(
        &self,
        system: &str,
        user_message: &str,
    ) -> Result<T, LlmError> {
        self.generate_structured_with_retries(system, user_message, self.policy.max_retries)
            .await
    }

    /// Retries only backend failures. A reply that fails to parse is returned immediately.
    pub async fn generate_structured_with_retries<T: DeserializeOwned>(
        &self,
        system: &str,
        user_message: &str,
        max_retries: u32,
    ) -> Result<T, LlmError> {
        let prompt = compose_prompt(system, user_message);
        let attempts = max_retries.max(1);

        let mut last_error: Option<BackendError> = None;
        let mut previous_rate_limited = false;

        for attempt in 0..attempts {
            if attempt > 0 {
                let delay = self.policy.wait_before(attempt, previous_rate_limited);
                if previous_rate_limited {
                    warn!("Rate limited, waiting {}ms before retry...", delay.as_millis());
                } else {
                    info!(
                        "Retry attempt {}/{}, waiting {}ms...",
                        attempt + 1,
                        attempts,
                        delay.as_millis()
                    );
                }
                tokio::time::sleep(delay).await;
            }

            let model = if attempt + 1 == attempts {
                FALLBACK_MODEL
            } else {
                PRIMARY_MODEL
            };

            self.limiter.acquire().await;
            info!("--> Using model {} (attempt {}/{})", model, attempt + 1, attempts);

            match self.backend.generate(model, &prompt).await {
                Ok(text) => {
                    return parse_json_response(&text).inspect_err(|e| {
                        if let LlmError::Parse { message, raw } = e {
                            let head: String = raw.chars().take(200).collect();
                            warn!("Unparseable reply from {model}: {message}; reply began {head:?}");
                        }
                    });
                }
                Err(e) => {
                    warn!("Attempt {} ({}) failed: {}", attempt + 1, model, e);
                    previous_rate_limited = e.is_rate_limited();
                    last_error = Some(e);
                }
            }
        }

        Err(LlmError::RetriesExhausted {
            attempts,
            last_error: last_error
                .map(|e| e.to_string())
                .unwrap_or_else(|| "no attempt was made".to_string()),
        })
    }
}

// ────────────────────────────────────────────────────────────────────────────
// JSON extraction
// ────────────────────────────────────────────────────────────────────────────

/// Extracts and deserializes the JSON document embedded in a model reply.
pub fn parse_json_response<T: DeserializeOwned>(text: &str) -> Result<T, LlmError> {
    let json = extract_json(text).ok_or_else(|| LlmError::Parse {
        message: "no JSON object or array found".to_string(),
        raw: text.to_string(),
    })?;

    serde_json::from_str(json).map_err(|e| LlmError::Parse {
        message: e.to_string(),
        raw: text.to_string(),
    })
}

/// Strips code fences, then returns the first balanced `{...}` or `[...]` span.
///
/// Falls back to the whole reply when the fenced body holds no JSON.
pub fn extract_json(text: &str) -> Option<&str> {
    let text = text.trim();
    first_balanced_span(strip_json_fences(text)).or_else(|| first_balanced_span(text))
}

/// Returns the body of the first closed ```json ... ``` or ``` ... ``` block, or the trimmed
/// input when there is no closing fence.
fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    let Some(open) = text.find("```") else {
        return text;
    };
    let after_open = &text[open + 3..];
    let body = after_open.strip_prefix("json").unwrap_or(after_open);
    match body.find("```") {
        Some(close) => body[..close].trim(),
        None => text,
    }
}

fn first_balanced_span(text: &str) -> Option<&str> {
    let start = text.find(['{', '['])?;

    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, ch) in text[start..].char_indices() {
        if in_string {
            match ch {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }

        match ch {
            '"' => in_string = true,
            '{' | '[' => depth += 1,
            '}' | ']' => {
                depth = depth.checked_sub(1)?;
                if depth == 0 {
                    return Some(&text[start..start + offset + ch.len_utf8()]);
                }
            }
            _ => {}
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::backend::BackendError;
    use super::testing::{test_client, ScriptedBackend};
    use super::*;
    use serde_json::{json, Value};

    #[test]
    fn test_strip_json_fences_with_json_tag() {
        let input = "```json\n{\"key\": \"value\"}\n```";
        assert_eq!(strip_json_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_strip_json_fences_without_tag() {
        let input = "```\n{\"key\": \"value\"}\n```";
        assert_eq!(strip_json_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_strip_json_fences_no_fences() {
        let input = "{\"key\": \"value\"}";
        assert_eq!(strip_json_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_lone_fence_is_not_treated_as_an_opening_fence() {
        let input = "{\"a\": 1}\n```";
        assert_eq!(strip_json_fences(input), input);
        let value: Value = parse_json_response(input).unwrap();
        assert_eq!(value, json!({"a": 1}));
    }

    #[test]
    fn test_fence_markers_inside_a_json_string_are_kept() {
        let input = r#"{"suggestions": ["Remove the ``` markers"]}"#;
        let value: Value = parse_json_response(input).unwrap();
        assert_eq!(value["suggestions"][0], "Remove the ``` markers");
    }

    #[test]
    fn test_fenced_block_without_json_falls_back_to_whole_reply() {
        let input = "Use ```cargo test``` to check: {\"ok\": true}";
        let value: Value = parse_json_response(input).unwrap();
        assert_eq!(value, json!({"ok": true}));
    }

    #[test]
    fn test_fenced_and_unfenced_replies_extract_identically() {
        let documents = [
            r#"{"content": "Backend engineer with 6 years of Rust"}"#,
            r#"[{"id": "exp-1", "bullets": ["Built X", "Shipped Y"]}]"#,
            r#"{"nested": {"list": [1, 2, {"deep": "}"}]}, "quote": "say \"hi\""}"#,
        ];
        for doc in documents {
            let plain: Value = parse_json_response(doc).unwrap();
            for fenced in [
                format!("```json\n{doc}\n```"),
                format!("```\n{doc}\n```"),
                format!("Here you go:\n```json\n{doc}\n```\nGood luck!"),
            ] {
                let unwrapped: Value = parse_json_response(&fenced).unwrap();
                assert_eq!(unwrapped, plain, "fencing changed the result for {fenced}");
            }
        }
    }

    #[test]
    fn test_extract_json_skips_surrounding_prose() {
        let reply = "Sure! The analysis is {\"jobTitle\": \"SRE\"}, hope that helps.";
        assert_eq!(extract_json(reply), Some("{\"jobTitle\": \"SRE\"}"));
    }

    #[test]
    fn test_extract_json_ignores_brackets_inside_strings() {
        let reply = r#"{"text": "use {braces} and [brackets]", "n": 1} trailing }"#;
        assert_eq!(
            extract_json(reply),
            Some(r#"{"text": "use {braces} and [brackets]", "n": 1}"#)
        );
    }

    #[test]
    fn test_extract_json_prefers_whichever_opener_comes_first() {
        assert_eq!(extract_json("[1, {\"a\": 2}]"), Some("[1, {\"a\": 2}]"));
        assert_eq!(extract_json("{\"a\": [1]} [2]"), Some("{\"a\": [1]}"));
    }

    #[test]
    fn test_unbalanced_reply_is_a_parse_error_carrying_raw_text() {
        let reply = "{\"content\": \"cut off mid";
        match parse_json_response::<Value>(reply) {
            Err(LlmError::Parse { raw, .. }) => assert_eq!(raw, reply),
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn test_reply_without_json_is_a_parse_error() {
        let err = parse_json_response::<Value>("I cannot help with that.").unwrap_err();
        assert!(err.to_string().starts_with("Failed to parse AI response as JSON"));
    }

    #[test]
    fn test_wrong_shape_is_a_parse_error() {
        #[derive(Debug, serde::Deserialize)]
        #[allow(dead_code)]
        struct Summary {
            content: String,
        }
        let err = parse_json_response::<Summary>("{\"text\": \"no content field\"}").unwrap_err();
        assert!(matches!(err, LlmError::Parse { .. }));
    }

    #[tokio::test(start_paused = true)]
    async fn test_two_rate_limits_then_success_makes_three_calls() {
        let backend = ScriptedBackend::new(vec![
            Err(BackendError::RateLimited("quota exhausted".into())),
            Err(BackendError::Api {
                status: 500,
                message: "got 429 from upstream".into(),
            }),
            Ok("```json\n{\"content\": \"third\"}\n```".into()),
        ]);
        let client = test_client(backend.clone());

        let started = tokio::time::Instant::now();
        let value: Value = client.generate_structured("sys", "user").await.unwrap();

        assert_eq!(value, json!({"content": "third"}));
        assert_eq!(backend.call_count(), 3);
        assert_eq!(
            backend.models(),
            vec![PRIMARY_MODEL, PRIMARY_MODEL, FALLBACK_MODEL]
        );
        // Two fixed rate-limit waits replace the 5s/10s backoff.
        assert_eq!(started.elapsed(), Duration::from_secs(60));
    }

    #[tokio::test(start_paused = true)]
    async fn test_transient_failures_use_linear_backoff() {
        let backend = ScriptedBackend::new(vec![
            Err(BackendError::Api {
                status: 503,
                message: "unavailable".into(),
            }),
            Err(BackendError::EmptyContent),
            Ok("{\"ok\": true}".into()),
        ]);
        let client = test_client(backend.clone());

        let started = tokio::time::Instant::now();
        let value: Value = client.generate_structured("sys", "user").await.unwrap();

        assert_eq!(value, json!({"ok": true}));
        assert_eq!(started.elapsed(), Duration::from_secs(5 + 10));
    }

    #[tokio::test(start_paused = true)]
    async fn test_first_attempt_does_not_wait() {
        let backend = ScriptedBackend::new(vec![Ok("{\"ok\": true}".into())]);
        let client = test_client(backend.clone());

        let started = tokio::time::Instant::now();
        let _: Value = client.generate_structured("sys", "user").await.unwrap();

        assert_eq!(started.elapsed(), Duration::ZERO);
        assert_eq!(backend.models(), vec![PRIMARY_MODEL]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_parse_failure_is_not_retried() {
        let backend = ScriptedBackend::new(vec![
            Ok("not json at all".into()),
            Ok("{\"never\": \"reached\"}".into()),
        ]);
        let client = test_client(backend.clone());

        let result: Result<Value, _> = client.generate_structured("sys", "user").await;

        assert!(matches!(result, Err(LlmError::Parse { .. })));
        assert_eq!(backend.call_count(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_exhausted_attempts_report_last_backend_error() {
        let backend = ScriptedBackend::new(vec![
            Err(BackendError::EmptyContent),
            Err(BackendError::EmptyContent),
            Err(BackendError::Api {
                status: 400,
                message: "model not found".into(),
            }),
        ]);
        let client = test_client(backend.clone());

        let err = client
            .generate_structured::<Value>("sys", "user")
            .await
            .unwrap_err();

        match err {
            LlmError::RetriesExhausted {
                attempts,
                last_error,
            } => {
                assert_eq!(attempts, 3);
                assert!(last_error.contains("model not found"));
            }
            other => panic!("expected RetriesExhausted, got {other:?}"),
        }
        assert_eq!(backend.call_count(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_single_attempt_budget_goes_straight_to_fallback() {
        let backend = ScriptedBackend::new(vec![Ok("[]".into())]);
        let client = test_client(backend.clone());

        let value: Vec<Value> = client
            .generate_structured_with_retries("sys", "user", 1)
            .await
            .unwrap();

        assert!(value.is_empty());
        assert_eq!(backend.models(), vec![FALLBACK_MODEL]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_prompt_joins_system_and_user_message() {
        let backend = ScriptedBackend::new(vec![Ok("{}".into())]);
        let client = test_client(backend.clone());

        let _: Value = client
            .generate_structured("You are an analyst.", "Analyze this.")
            .await
            .unwrap();

        let prompt = &backend.prompts()[0];
        assert!(prompt.starts_with("You are an analyst."));
        assert!(prompt.ends_with("User Request:\nAnalyze this."));
    }
}
