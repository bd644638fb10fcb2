use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "rag-eval",
    version,
    about = "Query LLMs over local documents and grade the answers with LLM judges"
)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Command,
    /// Config file (default: ~/.config/rag-eval/config.toml)
    #[arg(long, short = 'c', global = true)]
    pub config: Option<PathBuf>,
    /// Backend for answering and judging: ollama or openai
    #[arg(long, short = 'b', global = true)]
    pub backend: Option<String>,
    #[arg(long, short = 'm', global = true)]
    pub model: Option<String>,
    #[arg(long, global = true)]
    pub base_url: Option<String>,
    /// Print the report as JSON
    #[arg(long, global = true)]
    pub json: bool,
    /// Mirror debug logs to stderr
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Answer several queries and grade correctness, faithfulness and relevancy
    Batch(BatchArgs),
    /// Answer one query and show normalized judge scores
    Ask(AskArgs),
    /// Index documents, answer a query from them and grade the answer
    Rag(RagArgs),
}

#[derive(Args, Debug)]
pub struct BatchArgs {
    /// Queries to evaluate; prompted on stdin when omitted
    pub queries: Vec<String>,
    /// Number of queries to prompt for
    #[arg(long, default_value_t = 3)]
    pub count: usize,
    /// Use the bundled sample queries instead of prompting
    #[arg(long)]
    pub sample: bool,
    /// Send queries without any context
    #[arg(long, conflicts_with = "context_file")]
    pub no_context: bool,
    /// Read the context text from a file
    #[arg(long)]
    pub context_file: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct AskArgs {
    pub query: Option<String>,
    /// Reference answer used as faithfulness context
    #[arg(long)]
    pub reference: Option<String>,
}

#[derive(Args, Debug)]
pub struct RagArgs {
    /// Files or directories to index
    pub paths: Vec<PathBuf>,
    #[arg(long, short = 'q')]
    pub query: Option<String>,
    /// Number of source nodes to retrieve
    #[arg(long)]
    pub top_k: Option<usize>,
    /// Descend into subdirectories
    #[arg(long, short = 'r')]
    pub recursive: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn global_flags_follow_subcommand() {
        let args = CliArgs::parse_from([
            "rag-eval", "batch", "--no-context", "--backend", "openai", "Q1", "Q2",
        ]);
        assert_eq!(args.backend.as_deref(), Some("openai"));
        let Command::Batch(batch) = args.command else {
            panic!("expected batch");
        };
        assert!(batch.no_context);
        assert_eq!(batch.queries, vec!["Q1", "Q2"]);
        assert_eq!(batch.count, 3);
    }

    #[test]
    fn no_context_conflicts_with_context_file() {
        let parsed = CliArgs::try_parse_from([
            "rag-eval", "batch", "--no-context", "--context-file", "ctx.txt",
        ]);
        assert!(parsed.is_err());
    }

    #[test]
    fn rag_accepts_paths_and_top_k() {
        let args = CliArgs::parse_from(["rag-eval", "rag", "data", "--top-k", "4", "--json"]);
        assert!(args.json);
        let Command::Rag(rag) = args.command else {
            panic!("expected rag");
        };
        assert_eq!(rag.paths, vec![PathBuf::from("data")]);
        assert_eq!(rag.top_k, Some(4));
    }
}
