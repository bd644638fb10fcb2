//! Turning raw judge output into a displayable confidence value.

/// Normalizes an evaluator score, falling back to ratio hints in the judge's
/// feedback text when the numeric channel is unusable.
///
/// Rules, first match wins:
///
/// 1. a score strictly greater than zero is returned unchanged (no range check);
/// 2. feedback containing `"2/2"` gives `1.0`;
/// 3. feedback containing `"1/2"` gives `0.5`;
/// 4. feedback containing `"0/2"` gives `0.0`;
/// 5. anything else gives `0.0`.
///
/// # Known quirk
///
/// A present score of exactly `0.0` is treated the same as a missing one, so a
/// genuine zero from the judge can be overridden by a ratio found in the
/// feedback. Some judges report `0.0` when they failed to emit a score at all,
/// and callers depend on the fallback kicking in for that case.
///
/// ```
/// use rag_eval::score::normalize;
///
/// assert_eq!(normalize(Some(0.8), Some("Result: 0/2")), 0.8);
/// assert_eq!(normalize(Some(0.0), Some("Result: 2/2")), 1.0);
/// assert_eq!(normalize(None, Some("Result: 1/2")), 0.5);
/// assert_eq!(normalize(None, None), 0.0);
/// ```
pub fn normalize(score: Option<f64>, feedback: Option<&str>) -> f64 {
    if let Some(score) = score.filter(|s| *s > 0.0) {
        return score;
    }
    match feedback {
        Some(text) if text.contains("2/2") => 1.0,
        Some(text) if text.contains("1/2") => 0.5,
        Some(text) if text.contains("0/2") => 0.0,
        _ => 0.0,
    }
}

/// Rescales a 1-5 correctness score by dividing by four when it is above one.
///
/// Scores at or below one are assumed to be normalized already and are
/// returned as-is; a missing score counts as zero. Note that a top score of 5
/// maps to `1.25`.
pub fn scale_correctness(score: Option<f64>) -> f64 {
    let raw = score.unwrap_or(0.0);
    if raw > 1.0 {
        raw / 4.0
    } else {
        raw
    }
}
