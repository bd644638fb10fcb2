use std::path::PathBuf;

use anyhow::Context;
use rag_eval::rag::{Document, DocumentReader, ServiceContext};
use rag_eval::workflow::rag::{DEFAULT_RAG_QUERY, RagReport};
use rag_eval::workflow::RagEvaluation;

use crate::args::{CliArgs, RagArgs};
use crate::config::AppConfig;
use crate::provider::Providers;
use crate::report::{render_evaluations, render_source_nodes};

const SNIPPET_CHARS: usize = 150;
const DEFAULT_DATA_DIR: &str = "data";

/// Prints stage banners unless the report goes out as JSON.
struct Stages {
    quiet: bool,
}

impl Stages {
    fn say(&self, text: impl AsRef<str>) {
        if !self.quiet {
            println!("{}", text.as_ref());
        }
    }
}

fn input_paths(rag: &RagArgs, config: &AppConfig) -> Vec<PathBuf> {
    if !rag.paths.is_empty() {
        return rag.paths.clone();
    }
    if !config.evaluation.documents.is_empty() {
        return config.evaluation.documents.iter().map(PathBuf::from).collect();
    }
    vec![PathBuf::from(DEFAULT_DATA_DIR)]
}

fn load_documents(paths: &[PathBuf], recursive: bool) -> anyhow::Result<Vec<Document>> {
    let mut documents = Vec::new();
    for path in paths {
        let loaded = DocumentReader::for_path(path)
            .recursive(recursive)
            .load_data()
            .with_context(|| format!("error loading documents from {}", path.display()))?;
        documents.extend(loaded);
    }
    Ok(documents)
}

pub async fn run(args: &CliArgs, rag: &RagArgs, config: &AppConfig) -> anyhow::Result<()> {
    let stages = Stages { quiet: args.json };

    stages.say("--- 1. Setup and Configuration ---");
    let providers = Providers::from_config(config, args, None)?;
    let retrieval = &config.retrieval;
    let ctx = ServiceContext::new(providers.llm, providers.embed)
        .chunk_size(retrieval.chunk_size)
        .chunk_overlap(retrieval.chunk_overlap)
        .embed_batch_size(retrieval.embed_batch_size);
    let top_k = rag.top_k.unwrap_or(retrieval.top_k);

    stages.say("\n--- 2. Load Data ---");
    let paths = input_paths(rag, config);
    let documents = load_documents(&paths, rag.recursive)?;
    let shown = paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ");
    stages.say(format!("Successfully loaded {} document(s) from {shown}", documents.len()));
    if let Some(first) = documents.first() {
        stages.say(format!("Content Snippet: {}...", first.snippet(SNIPPET_CHARS)));
        stages.say(format!("Metadata: {}", serde_json::to_string(&first.metadata)?));
    }

    stages.say("\n--- 3. Create Vector Store Index ---");
    let workflow = RagEvaluation::new(ctx, providers.judge).top_k(top_k);
    let engine = workflow
        .build_engine(&documents)
        .await
        .context("error creating index")?;
    stages.say(format!(
        "Vector index created with {} nodes (similarity_top_k={top_k}).",
        engine.index().len()
    ));

    stages.say("\n--- 4. Query the Index ---");
    let query = rag
        .query
        .clone()
        .or_else(|| config.evaluation.rag_query.clone())
        .unwrap_or_else(|| DEFAULT_RAG_QUERY.to_string());
    stages.say(format!("Query: {query}"));
    let response = engine.query(&query).await.context("error querying index")?;
    stages.say(format!(
        "\nGenerated Response:\n{}",
        response.response.as_deref().unwrap_or("No response generated.")
    ));
    stages.say("\nSource Nodes Retrieved:");
    if !stages.quiet {
        print!("{}", render_source_nodes(&response));
    }

    stages.say("\n--- 5. Execute Evaluation ---");
    stages.say(format!("Evaluators: {}", workflow.evaluator_names().join(", ")));
    let evaluations = workflow.evaluate(&query, &response).await;

    let report = RagReport {
        query,
        response,
        evaluations,
    };
    if args.json {
        return super::print_json(&report);
    }

    println!("\n--- 6. Display Evaluation Results ---");
    println!("Original Query: {}", report.query);
    println!("Retrieved Response: {}", report.response);
    print!("{}", render_evaluations(&report.evaluations));
    println!("\n--- Finished ---");
    Ok(())
}
