use crate::{
    completion::{CompletionProvider, CompletionRequest},
    error::LLMError,
    test_support::ScriptedLLM,
};

use super::{ResilienceConfig, ResilientLLM};

fn fast_config(max_attempts: usize) -> ResilienceConfig {
    ResilienceConfig {
        max_attempts,
        base_delay_ms: 1,
        max_delay_ms: 2,
        jitter: false,
    }
}

#[tokio::test]
async fn retries_transient_errors_until_success() {
    let inner = ScriptedLLM::default();
    inner.push_error(LLMError::HttpError("connection reset".into()));
    inner.push_reply("Paris");
    let llm = ResilientLLM::new(Box::new(inner), fast_config(3));

    let out = llm.complete(&CompletionRequest::new("capital?")).await.unwrap();
    assert_eq!(out.text, "Paris");
}

#[tokio::test]
async fn auth_errors_are_not_retried() {
    let inner = ScriptedLLM::default();
    inner.push_error(LLMError::AuthError("bad key".into()));
    inner.push_reply("never reached");
    let llm = ResilientLLM::new(Box::new(inner), fast_config(3));

    let err = llm
        .complete(&CompletionRequest::new("capital?"))
        .await
        .unwrap_err();
    assert!(matches!(err, LLMError::AuthError(_)));
}

#[tokio::test]
async fn exhausting_attempts_reports_last_error() {
    let inner = ScriptedLLM::default();
    inner.push_error(LLMError::HttpError("timeout".into()));
    inner.push_error(LLMError::ProviderError("overloaded".into()));
    let llm = ResilientLLM::new(Box::new(inner), fast_config(2));

    let err = llm
        .complete(&CompletionRequest::new("capital?"))
        .await
        .unwrap_err();
    match err {
        LLMError::RetryExceeded {
            attempts,
            last_error,
        } => {
            assert_eq!(attempts, 2);
            assert!(last_error.contains("overloaded"));
        }
        other => panic!("unexpected error: {other}"),
    }
}
