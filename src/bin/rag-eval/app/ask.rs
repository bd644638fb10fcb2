use anyhow::Context;
use rag_eval::workflow::ask::DEFAULT_QUERY;
use rag_eval::workflow::AskWorkflow;

use crate::args::{AskArgs, CliArgs};
use crate::config::AppConfig;
use crate::provider::Providers;
use crate::report::render_ask;

pub async fn run(args: &CliArgs, ask: &AskArgs, config: &AppConfig) -> anyhow::Result<()> {
    let providers = Providers::from_config(config, args, None)?;
    let query = ask.query.as_deref().unwrap_or(DEFAULT_QUERY);
    let reference = ask
        .reference
        .clone()
        .unwrap_or_else(|| config.evaluation.reference_answer.clone());

    let report = AskWorkflow::new(providers.llm, providers.judge)
        .reference(reference)
        .correctness_threshold(config.evaluation.correctness_threshold)
        .run(query)
        .await
        .context("failed to get a response from the LLM")?;

    if args.json {
        super::print_json(&report)
    } else {
        print!("{}", render_ask(&report));
        Ok(())
    }
}
