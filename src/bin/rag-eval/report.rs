//! Plain-text rendering of workflow reports.

use std::fmt::Write;

use rag_eval::evaluator::EvaluationOutcome;
use rag_eval::rag::{preview, MetadataMode, Response};
use rag_eval::workflow::{AskReport, BatchRow, MetricSummary, MetricsBlock};

const NODE_PREVIEW_CHARS: usize = 100;

/// `True`/`False`/`None`, as the reports have always printed them.
fn flag(value: Option<bool>) -> String {
    match value {
        Some(true) => "True".to_string(),
        Some(false) => "False".to_string(),
        None => "None".to_string(),
    }
}

fn number(value: Option<f64>) -> String {
    value.map_or_else(|| "None".to_string(), |v| format!("{v:?}"))
}

fn metric_lines(out: &mut String, title: &str, metric: &MetricSummary) {
    let _ = writeln!(out, "{:<20}: {}", format!("{title} Passing"), flag(metric.passing));
    let _ = writeln!(out, "{:<20}: {}", format!("{title} Score"), number(metric.score));
    if let Some(err) = &metric.error {
        let _ = writeln!(out, "{:<20}: {err}", format!("{title} Error"));
    }
}

pub fn render_batch(rows: &[BatchRow]) -> String {
    let mut out = String::new();
    for (idx, row) in rows.iter().enumerate() {
        let _ = writeln!(out, "\n--- Evaluation Result {} ---", idx + 1);
        let _ = writeln!(out, "{:<20}: {}", "Query", row.query);
        let _ = writeln!(out, "{:<20}: {}", "Response", row.response);
        metric_lines(&mut out, "Correctness", &row.correctness);
        metric_lines(&mut out, "Faithfulness", &row.faithfulness);
        metric_lines(&mut out, "Relevancy", &row.relevancy);
    }
    out
}

pub fn render_ask(report: &AskReport) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "LLM Response\n{}\n", report.response);
    match &report.metrics {
        MetricsBlock::Scored(metrics) => {
            let _ = writeln!(out, "Evaluation Metrics");
            for (name, metric) in [
                ("Faithfulness", &metrics.faithfulness),
                ("Relevancy", &metrics.relevancy),
                ("Correctness", &metrics.correctness),
            ] {
                let _ = writeln!(out, "{name} Score: {:.2}", metric.score);
                let _ = writeln!(out, "> {}", metric.feedback);
            }
        }
        MetricsBlock::Failed(err) => {
            let _ = writeln!(out, "Evaluation failed: {err}");
        }
    }
    out
}

pub fn render_source_nodes(response: &Response) -> String {
    if response.source_nodes.is_empty() {
        return "  No source nodes retrieved.\n".to_string();
    }
    let mut out = String::new();
    for (i, source) in response.source_nodes.iter().enumerate() {
        let content = source.node.get_content(MetadataMode::All);
        let _ = writeln!(
            out,
            "  Node {} (Score: {:.4}): {}...",
            i + 1,
            source.score,
            preview(content.trim(), NODE_PREVIEW_CHARS)
        );
    }
    out
}

fn title_for(name: &str) -> &str {
    match name {
        "faithfulness" => "Faithfulness",
        "answer_relevancy" => "Answer Relevancy",
        "relevancy" => "Relevancy",
        "correctness" => "Correctness",
        other => other,
    }
}

pub fn render_evaluations(evaluations: &[(&'static str, EvaluationOutcome)]) -> String {
    let mut out = String::new();
    for (name, outcome) in evaluations {
        let title = title_for(name);
        match outcome {
            EvaluationOutcome::Completed(result) => {
                let _ = writeln!(out, "\n{title} Result:");
                let _ = writeln!(out, "  Passing: {}", flag(result.passing));
                let _ = writeln!(out, "  Score: {}", number(result.score));
                let _ = writeln!(out, "  Feedback: {}", result.feedback.as_deref().unwrap_or("None"));
                if let Some(reason) = &result.invalid_reason {
                    let _ = writeln!(out, "  Invalid: {reason}");
                }
            }
            EvaluationOutcome::Unavailable(err) => {
                let _ = writeln!(out, "\n{title} Result: Evaluation failed ({err}).");
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use rag_eval::evaluator::EvaluationResult;
    use rag_eval::rag::{Node, NodeWithScore};
    use rag_eval::workflow::{AskMetrics, ScoredMetric};

    fn metric(name: &'static str, passing: Option<bool>, score: Option<f64>) -> MetricSummary {
        MetricSummary {
            name,
            passing,
            score,
            error: None,
        }
    }

    #[test]
    fn batch_rows_use_aligned_labels() {
        let rows = vec![BatchRow {
            query: "What is capital of France".into(),
            response: "Paris".into(),
            correctness: metric("correctness", Some(true), Some(5.0)),
            faithfulness: metric("faithfulness", Some(false), Some(0.0)),
            relevancy: metric("relevancy", None, None),
        }];
        let text = render_batch(&rows);
        assert!(text.starts_with("\n--- Evaluation Result 1 ---\n"));
        assert!(text.contains("Query               : What is capital of France\n"));
        assert!(text.contains("Correctness Passing : True\n"));
        assert!(text.contains("Correctness Score   : 5.0\n"));
        assert!(text.contains("Faithfulness Passing: False\n"));
        assert!(text.contains("Relevancy Score     : None\n"));
    }

    #[test]
    fn ask_report_prints_two_decimals() {
        let scored = |score| ScoredMetric {
            score,
            feedback: "ok".into(),
        };
        let report = AskReport {
            query: "q".into(),
            response: "Paris".into(),
            metrics: MetricsBlock::Scored(AskMetrics {
                faithfulness: scored(1.0),
                relevancy: scored(0.5),
                correctness: scored(1.25),
            }),
        };
        let text = render_ask(&report);
        assert!(text.contains("Faithfulness Score: 1.00\n> ok"));
        assert!(text.contains("Relevancy Score: 0.50"));
        assert!(text.contains("Correctness Score: 1.25"));
    }

    #[test]
    fn source_nodes_show_score_and_preview() {
        let response = Response {
            response: Some("answer".into()),
            source_nodes: vec![NodeWithScore {
                node: Node {
                    id: "d#0".into(),
                    document_id: "d".into(),
                    text: "Faithfulness checks grounding.".into(),
                    metadata: Default::default(),
                },
                score: 0.87654,
            }],
        };
        assert_eq!(
            render_source_nodes(&response),
            "  Node 1 (Score: 0.8765): Faithfulness checks grounding....\n"
        );
    }

    #[test]
    fn unavailable_evaluation_is_reported() {
        let evaluations = vec![
            (
                "faithfulness",
                EvaluationOutcome::Unavailable("judge request failed: timeout".into()),
            ),
            (
                "answer_relevancy",
                EvaluationOutcome::Completed(EvaluationResult {
                    score: Some(1.0),
                    feedback: Some("[RESULT] 2".into()),
                    ..EvaluationResult::default()
                }),
            ),
        ];
        let text = render_evaluations(&evaluations);
        assert!(text.contains("Faithfulness Result: Evaluation failed (judge request failed: timeout)."));
        assert!(text.contains("Answer Relevancy Result:\n  Passing: None\n  Score: 1.0\n  Feedback: [RESULT] 2"));
    }
}
