//! Extracting verdicts from judge output.

use std::sync::OnceLock;

use regex::Regex;

static LEADING_NUMBER: OnceLock<Option<Regex>> = OnceLock::new();
static RESULT_TAG: OnceLock<Option<Regex>> = OnceLock::new();

fn leading_number() -> Option<&'static Regex> {
    LEADING_NUMBER
        .get_or_init(|| Regex::new(r"^[^0-9\-]*(-?\d+(?:\.\d+)?)").ok())
        .as_ref()
}

fn result_tag() -> Option<&'static Regex> {
    RESULT_TAG
        .get_or_init(|| Regex::new(r"\[RESULT\]\s*(\d+)").ok())
        .as_ref()
}

/// Splits a correctness verdict into the score on the first non-empty line
/// and the reasoning that follows it.
pub(crate) fn score_and_reasoning(text: &str) -> Result<(f64, String), String> {
    let trimmed = text.trim_start();
    let (first, rest) = trimmed.split_once('\n').unwrap_or((trimmed, ""));
    let pattern = leading_number().ok_or_else(|| "score pattern failed to compile".to_string())?;
    let score = pattern
        .captures(first.trim())
        .and_then(|c| c.get(1))
        .and_then(|m| m.as_str().parse::<f64>().ok())
        .ok_or_else(|| format!("could not parse a score from '{}'", first.trim()))?;
    Ok((score, rest.trim_start_matches('\n').trim_end().to_string()))
}

/// The integer after the last `[RESULT]` tag.
pub(crate) fn result_score(text: &str) -> Option<u32> {
    result_tag()?
        .captures_iter(text)
        .last()
        .and_then(|c| c.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

pub(crate) fn is_yes(text: &str) -> bool {
    text.to_lowercase().contains("yes")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn patterns_compile() {
        assert!(leading_number().is_some());
        assert!(result_tag().is_some());
    }
    use rstest::rstest;

    #[rstest]
    #[case("4.5\nThe answer is correct.", 4.5, "The answer is correct.")]
    #[case("5\n\nFully correct and relevant.", 5.0, "Fully correct and relevant.")]
    #[case("Score: 3\nPartially right.", 3.0, "Partially right.")]
    #[case("  2", 2.0, "")]
    fn parses_score_and_reasoning(#[case] text: &str, #[case] score: f64, #[case] reasoning: &str) {
        let (s, r) = score_and_reasoning(text).unwrap();
        assert_eq!(s, score);
        assert_eq!(r, reasoning);
    }

    #[test]
    fn missing_score_is_an_error() {
        let err = score_and_reasoning("The answer looks fine.\n4").unwrap_err();
        assert!(err.contains("The answer looks fine."));
    }

    #[rstest]
    #[case("Matches the subject.\n[RESULT] 2", Some(2))]
    #[case("[RESULT]1", Some(1))]
    #[case("first [RESULT] 0 then [RESULT] 1", Some(1))]
    #[case("no verdict", None)]
    fn parses_result_tag(#[case] text: &str, #[case] expected: Option<u32>) {
        assert_eq!(result_score(text), expected);
    }

    #[rstest]
    #[case("YES", true)]
    #[case("Yes, it is supported.", true)]
    #[case("NO", false)]
    #[case("", false)]
    fn detects_yes(#[case] text: &str, #[case] expected: bool) {
        assert_eq!(is_yes(text), expected);
    }
}
