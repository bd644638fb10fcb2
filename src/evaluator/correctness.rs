use std::sync::Arc;

use async_trait::async_trait;

use super::error::EvalError;
use super::parse::score_and_reasoning;
use super::prompts::{render, CORRECTNESS_SYSTEM, CORRECTNESS_USER, NO_REFERENCE_ANSWER};
use super::types::{EvaluationResult, Evaluator};
use crate::chat::{ChatMessage, ChatProvider};
use crate::LLMProvider;

pub const DEFAULT_CORRECTNESS_THRESHOLD: f64 = 4.0;

/// Grades an answer from 1 to 5 against an optional reference answer.
pub struct CorrectnessEvaluator {
    llm: Arc<dyn LLMProvider>,
    threshold: f64,
}

impl CorrectnessEvaluator {
    pub fn new(llm: Arc<dyn LLMProvider>) -> Self {
        Self {
            llm,
            threshold: DEFAULT_CORRECTNESS_THRESHOLD,
        }
    }

    pub fn threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }
}

#[async_trait]
impl Evaluator for CorrectnessEvaluator {
    fn name(&self) -> &'static str {
        "correctness"
    }

    async fn evaluate(
        &self,
        query: &str,
        response: Option<&str>,
        contexts: &[String],
        reference: Option<&str>,
    ) -> Result<EvaluationResult, EvalError> {
        if query.is_empty() {
            return Err(EvalError::MissingInput("query"));
        }
        let Some(answer) = response else {
            return Err(EvalError::MissingInput("response"));
        };

        let user = render(
            CORRECTNESS_USER,
            &[
                ("query", query),
                ("reference_answer", reference.unwrap_or(NO_REFERENCE_ANSWER)),
                ("generated_answer", answer),
            ],
        );
        let messages = [
            ChatMessage::system().content(CORRECTNESS_SYSTEM).build(),
            ChatMessage::user().content(user).build(),
        ];
        let verdict = self.llm.chat_text(&messages).await?;

        let result = EvaluationResult::new(query, response, contexts);
        Ok(match score_and_reasoning(&verdict) {
            Ok((score, reasoning)) => EvaluationResult {
                passing: Some(score >= self.threshold),
                score: Some(score),
                feedback: Some(reasoning),
                ..result
            },
            Err(reason) => {
                log::warn!("correctness judge returned an unparseable verdict: {reason}");
                EvaluationResult {
                    feedback: Some(verdict),
                    ..result
                }
                .invalid(reason)
            }
        })
    }
}
