//! LLM-judged evaluation of generated answers.
//!
//! Each evaluator sends one or more judge prompts to an [`LLMProvider`] and
//! turns the judge's free-text verdict into an [`EvaluationResult`]. Parsing
//! failures are reported as invalid results; provider failures are returned
//! as [`EvalError`]s so callers can decide how to degrade.
//!
//! [`LLMProvider`]: crate::LLMProvider

mod answer_relevancy;
mod correctness;
mod error;
mod faithfulness;
mod parse;
pub mod prompts;
mod refine;
mod relevancy;
mod suite;
mod types;

pub use answer_relevancy::AnswerRelevancyEvaluator;
pub use correctness::{CorrectnessEvaluator, DEFAULT_CORRECTNESS_THRESHOLD};
pub use error::EvalError;
pub use faithfulness::FaithfulnessEvaluator;
pub use relevancy::RelevancyEvaluator;
pub use suite::{EvaluationOutcome, EvaluationSuite};
pub use types::{EvaluationResult, Evaluator};
