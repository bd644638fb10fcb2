use thiserror::Error;

use crate::error::LLMError;

/// Errors raised by evaluators.
#[derive(Debug, Error)]
pub enum EvalError {
    /// A required input (query, response or contexts) was not supplied
    #[error("{0} must be provided")]
    MissingInput(&'static str),
    /// The judge call failed
    #[error("judge request failed: {0}")]
    Provider(#[from] LLMError),
    /// The judge rejected the answer and the evaluator was asked to fail hard
    #[error("{evaluator}: the response is invalid")]
    Rejected { evaluator: &'static str },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages() {
        assert_eq!(
            EvalError::MissingInput("contexts").to_string(),
            "contexts must be provided"
        );
        assert_eq!(
            EvalError::Rejected {
                evaluator: "faithfulness"
            }
            .to_string(),
            "faithfulness: the response is invalid"
        );
        let err: EvalError = LLMError::HttpError("timeout".into()).into();
        assert_eq!(err.to_string(), "judge request failed: HTTP error: timeout");
    }
}
