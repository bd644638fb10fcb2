use std::io::{self, BufRead, Write};

use anyhow::Context;
use rag_eval::workflow::context_eval::{FRANCE_CONTEXT, SAMPLE_QUERIES};
use rag_eval::workflow::{ContextEvaluation, NoContext, StaticContext, ASSISTANT_SYSTEM_PROMPT};

use crate::args::{BatchArgs, CliArgs};
use crate::config::AppConfig;
use crate::provider::Providers;
use crate::report::render_batch;

fn prompt_queries(count: usize) -> anyhow::Result<Vec<String>> {
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    let mut queries = Vec::with_capacity(count);
    for i in 0..count {
        print!("Enter query {}: ", i + 1);
        io::stdout().flush()?;
        let line = lines
            .next()
            .context("stdin closed before all queries were entered")??;
        queries.push(line.trim().to_string());
    }
    Ok(queries)
}

fn collect_queries(batch: &BatchArgs, config: &AppConfig) -> anyhow::Result<Vec<String>> {
    if !batch.queries.is_empty() {
        return Ok(batch.queries.clone());
    }
    if batch.sample {
        return Ok(SAMPLE_QUERIES.iter().map(|q| q.to_string()).collect());
    }
    if !config.evaluation.queries.is_empty() {
        return Ok(config.evaluation.queries.clone());
    }
    prompt_queries(batch.count)
}

pub async fn run(args: &CliArgs, batch: &BatchArgs, config: &AppConfig) -> anyhow::Result<()> {
    let queries = collect_queries(batch, config)?;
    let providers = Providers::from_config(config, args, Some(ASSISTANT_SYSTEM_PROMPT))?;

    let workflow = if batch.no_context {
        ContextEvaluation::new(providers.llm, providers.judge, NoContext)
    } else {
        let context = match &batch.context_file {
            Some(path) => std::fs::read_to_string(path)
                .with_context(|| format!("failed to read context file {}", path.display()))?,
            None => config
                .evaluation
                .context
                .clone()
                .unwrap_or_else(|| FRANCE_CONTEXT.to_string()),
        };
        ContextEvaluation::new(providers.llm, providers.judge, StaticContext(context))
    }
    .correctness_threshold(config.evaluation.correctness_threshold);

    let rows = workflow
        .run(&queries[..])
        .await
        .context("failed to get a response from the LLM")?;

    if args.json {
        super::print_json(&rows)
    } else {
        print!("{}", render_batch(&rows));
        Ok(())
    }
}
