mod app;
mod evaluation;
mod logging;
mod provider;
mod retrieval;

const DEFAULT_LOG_ROTATE_SIZE: u64 = 10 * 1024 * 1024;
const DEFAULT_LOG_ROTATE_KEEP: usize = 5;

pub use app::AppConfig;
use evaluation::EvaluationConfig;
pub use logging::LoggingConfig;
pub use provider::{EmbeddingConfig, ProviderConfig};
use retrieval::RetrievalConfig;
