use serde::{Deserialize, Serialize};

use super::{EmbeddingConfig, EvaluationConfig, LoggingConfig, ProviderConfig, RetrievalConfig};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct AppConfig {
    /// Model that answers queries
    pub llm: ProviderConfig,
    pub embedding: EmbeddingConfig,
    /// Grading model; the answering model's connection is reused when absent
    pub judge: Option<ProviderConfig>,
    pub retrieval: RetrievalConfig,
    pub evaluation: EvaluationConfig,
    pub logging: LoggingConfig,
}
