//! Turning config sections and CLI overrides into providers.

use std::collections::BTreeMap;
use std::str::FromStr;
use std::sync::Arc;

use anyhow::{anyhow, Context};
use rag_eval::builder::{LLMBackend, LLMBuilder};
use rag_eval::LLMProvider;

use crate::args::CliArgs;
use crate::config::{AppConfig, EmbeddingConfig, ProviderConfig};

const LOCAL_TIMEOUT_SECONDS: u64 = 120;
const REMOTE_TIMEOUT_SECONDS: u64 = 30;

/// Connections used by one command.
pub struct Providers {
    pub llm: Arc<dyn LLMProvider>,
    pub embed: Arc<dyn LLMProvider>,
    pub judge: Arc<dyn LLMProvider>,
}

/// API keys read from the environment, each variable at most once.
#[derive(Default)]
struct ApiKeys {
    cache: BTreeMap<String, String>,
}

impl ApiKeys {
    fn for_backend(&mut self, backend: LLMBackend, env_override: Option<&str>) -> anyhow::Result<Option<String>> {
        if !backend.requires_api_key() {
            return Ok(None);
        }
        let var = env_override
            .or(backend.default_api_key_env())
            .ok_or_else(|| anyhow!("no API key variable known for backend {backend}"))?;
        if let Some(key) = self.cache.get(var) {
            return Ok(Some(key.clone()));
        }
        let key = std::env::var(var)
            .ok()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| {
                anyhow!("{var} environment variable not set.\nPlease set it using: export {var}='YOUR_API_KEY'")
            })?;
        log::info!("{var} found");
        self.cache.insert(var.to_string(), key.clone());
        Ok(Some(key))
    }
}

pub fn parse_backend(name: Option<&str>) -> anyhow::Result<LLMBackend> {
    let name = name.unwrap_or("ollama");
    LLMBackend::from_str(name).with_context(|| format!("invalid backend '{name}'"))
}

fn default_timeout(backend: LLMBackend) -> u64 {
    match backend {
        LLMBackend::Ollama => LOCAL_TIMEOUT_SECONDS,
        LLMBackend::OpenAI => REMOTE_TIMEOUT_SECONDS,
    }
}

fn builder_for(
    backend: LLMBackend,
    cfg: &ProviderConfig,
    keys: &mut ApiKeys,
) -> anyhow::Result<LLMBuilder> {
    let mut builder = LLMBuilder::new()
        .backend(backend)
        .timeout_seconds(cfg.timeout_seconds.unwrap_or(default_timeout(backend)));
    if let Some(key) = keys.for_backend(backend, cfg.api_key_env.as_deref())? {
        builder = builder.api_key(key);
    }
    if let Some(url) = &cfg.base_url {
        builder = builder.base_url(url);
    }
    if let Some(model) = &cfg.model {
        builder = builder.model(model);
    }
    if let Some(temperature) = cfg.temperature {
        builder = builder.temperature(temperature);
    }
    if let Some(max_tokens) = cfg.max_tokens {
        builder = builder.max_tokens(max_tokens);
    }
    if let Some(system) = &cfg.system {
        builder = builder.system(system);
    }
    if let Some(resilience) = &cfg.resilience {
        builder = builder.resilience(resilience.clone());
    }
    Ok(builder)
}

/// `[llm]` with the command-line flags applied on top.
pub fn answering_config(config: &AppConfig, args: &CliArgs) -> ProviderConfig {
    let mut cfg = config.llm.clone();
    if args.backend.is_some() {
        cfg.backend = args.backend.clone();
    }
    if args.model.is_some() {
        cfg.model = args.model.clone();
    }
    if args.base_url.is_some() {
        cfg.base_url = args.base_url.clone();
    }
    cfg
}

/// `[judge]`, or the answering connection without its system prompt.
///
/// This differs from the Python batch script, which graded with the
/// answering model and its system prompt. A `[judge]` section with its own
/// `system` key grades with a system prompt again.
pub fn judge_config(config: &AppConfig, answering: &ProviderConfig) -> ProviderConfig {
    config.judge.clone().unwrap_or_else(|| ProviderConfig {
        system: None,
        ..answering.clone()
    })
}

fn embedding_builder(
    answering: &ProviderConfig,
    embedding: &EmbeddingConfig,
    keys: &mut ApiKeys,
) -> anyhow::Result<LLMBuilder> {
    let backend = parse_backend(embedding.backend.as_deref().or(answering.backend.as_deref()))?;
    let inherit = embedding.backend.is_none() || embedding.backend == answering.backend;
    let cfg = ProviderConfig {
        backend: Some(backend.to_string()),
        api_key_env: embedding
            .api_key_env
            .clone()
            .or_else(|| inherit.then(|| answering.api_key_env.clone()).flatten()),
        base_url: embedding
            .base_url
            .clone()
            .or_else(|| inherit.then(|| answering.base_url.clone()).flatten()),
        timeout_seconds: embedding.timeout_seconds.or(answering.timeout_seconds),
        ..ProviderConfig::default()
    };
    let mut builder = builder_for(backend, &cfg, keys)?;
    if let Some(model) = &embedding.model {
        builder = builder.embedding_model(model);
    }
    Ok(builder)
}

impl Providers {
    /// Builds every connection, reading API keys before any request is made.
    /// `default_system` applies to the answering model when `[llm]` sets none.
    pub fn from_config(
        config: &AppConfig,
        args: &CliArgs,
        default_system: Option<&str>,
    ) -> anyhow::Result<Self> {
        let mut keys = ApiKeys::default();
        let mut answering = answering_config(config, args);
        let judging = judge_config(config, &answering);
        if answering.system.is_none() {
            answering.system = default_system.map(str::to_string);
        }

        let llm_backend = parse_backend(answering.backend.as_deref())?;
        let llm: Arc<dyn LLMProvider> = builder_for(llm_backend, &answering, &mut keys)?
            .build()
            .context("failed to build the answering model")?
            .into();

        let embed: Arc<dyn LLMProvider> = embedding_builder(&answering, &config.embedding, &mut keys)?
            .build()
            .context("failed to build the embedding model")?
            .into();

        let judge_backend = parse_backend(judging.backend.as_deref().or(answering.backend.as_deref()))?;
        let judge: Arc<dyn LLMProvider> = builder_for(judge_backend, &judging, &mut keys)?
            .build()
            .context("failed to build the judge model")?
            .into();

        Ok(Self { llm, embed, judge })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn cli_flags_override_llm_section() {
        let mut config = AppConfig::default();
        config.llm.model = Some("llama3".into());
        config.llm.system = Some("Be brief.".into());
        let args = CliArgs::parse_from(["rag-eval", "--model", "llama3.1", "ask"]);

        let answering = answering_config(&config, &args);
        assert_eq!(answering.model.as_deref(), Some("llama3.1"));

        let judge = judge_config(&config, &answering);
        assert_eq!(judge.model.as_deref(), Some("llama3.1"));
        assert_eq!(judge.system, None);
    }

    #[test]
    fn explicit_judge_section_wins() {
        let config = AppConfig {
            judge: Some(ProviderConfig {
                model: Some("gpt-4o".into()),
                ..ProviderConfig::default()
            }),
            ..AppConfig::default()
        };
        let answering = ProviderConfig::default();
        assert_eq!(judge_config(&config, &answering).model.as_deref(), Some("gpt-4o"));
    }

    #[test]
    fn ollama_needs_no_key() {
        let mut keys = ApiKeys::default();
        assert_eq!(keys.for_backend(LLMBackend::Ollama, None).unwrap(), None);
    }

    #[test]
    fn missing_openai_key_is_reported_by_name() {
        let mut keys = ApiKeys::default();
        let err = keys
            .for_backend(LLMBackend::OpenAI, Some("RAG_EVAL_TEST_UNSET_KEY"))
            .unwrap_err();
        assert!(err
            .to_string()
            .starts_with("RAG_EVAL_TEST_UNSET_KEY environment variable not set."));
    }

    #[test]
    fn unknown_backend_is_rejected() {
        assert!(parse_backend(Some("anthropic")).is_err());
        assert_eq!(parse_backend(None).unwrap(), LLMBackend::Ollama);
    }
}
