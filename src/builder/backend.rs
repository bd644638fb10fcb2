use crate::error::LLMError;

/// Supported LLM backend providers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LLMBackend {
    OpenAI,
    Ollama,
}

impl LLMBackend {
    /// Whether requests to this backend need an API key.
    pub fn requires_api_key(&self) -> bool {
        matches!(self, LLMBackend::OpenAI)
    }

    /// Environment variable conventionally holding the backend's API key.
    pub fn default_api_key_env(&self) -> Option<&'static str> {
        match self {
            LLMBackend::OpenAI => Some("OPENAI_API_KEY"),
            LLMBackend::Ollama => None,
        }
    }
}

impl std::fmt::Display for LLMBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            LLMBackend::OpenAI => "openai",
            LLMBackend::Ollama => "ollama",
        };
        f.write_str(name)
    }
}

impl std::str::FromStr for LLMBackend {
    type Err = LLMError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "openai" => Ok(LLMBackend::OpenAI),
            "ollama" => Ok(LLMBackend::Ollama),
            _ => Err(LLMError::InvalidRequest(format!(
                "Unknown LLM backend: {s}"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_case_insensitively() {
        assert_eq!("Ollama".parse::<LLMBackend>().unwrap(), LLMBackend::Ollama);
        assert_eq!("OPENAI".parse::<LLMBackend>().unwrap(), LLMBackend::OpenAI);
        assert!("anthropic".parse::<LLMBackend>().is_err());
    }

    #[test]
    fn display_round_trips_through_from_str() {
        for backend in [LLMBackend::OpenAI, LLMBackend::Ollama] {
            assert_eq!(backend.to_string().parse::<LLMBackend>().unwrap(), backend);
        }
    }
}
