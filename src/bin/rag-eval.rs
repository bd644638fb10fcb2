#[path = "rag-eval/app/mod.rs"]
mod app;
#[path = "rag-eval/args.rs"]
mod args;
#[path = "rag-eval/config/mod.rs"]
mod config;
#[path = "rag-eval/logging.rs"]
mod logging;
#[path = "rag-eval/provider.rs"]
mod provider;
#[path = "rag-eval/report.rs"]
mod report;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    app::run().await
}
