use serde::{Deserialize, Serialize};

/// Configuration for retry and backoff behavior.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ResilienceConfig {
    /// Maximum number of attempts including the first one
    pub max_attempts: usize,
    /// Initial backoff delay in milliseconds
    pub base_delay_ms: u64,
    /// Maximum backoff delay in milliseconds
    pub max_delay_ms: u64,
    /// Whether to shave a deterministic jitter off each delay
    pub jitter: bool,
}

const DEFAULT_MAX_ATTEMPTS: usize = 3;
const DEFAULT_BASE_DELAY_MS: u64 = 500;
const DEFAULT_MAX_DELAY_MS: u64 = 8_000;

impl ResilienceConfig {
    /// Default settings: three attempts, 0.5 s doubling up to 8 s.
    pub fn defaults() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            base_delay_ms: DEFAULT_BASE_DELAY_MS,
            max_delay_ms: DEFAULT_MAX_DELAY_MS,
            jitter: true,
        }
    }

    /// Settings that never retry.
    pub fn disabled() -> Self {
        Self {
            max_attempts: 1,
            ..Self::defaults()
        }
    }

    /// Delay before retry number `attempt_index` (zero based).
    pub fn delay_ms(&self, attempt_index: usize) -> u64 {
        let mut delay = self
            .base_delay_ms
            .saturating_mul(1u64 << attempt_index.min(16))
            .min(self.max_delay_ms);
        if self.jitter {
            let span = (delay / 2).max(1);
            let jitter = ((attempt_index as u64)
                .wrapping_mul(6364136223846793005)
                .wrapping_add(1))
                % span;
            delay = delay.saturating_sub(jitter);
        }
        delay
    }
}

impl Default for ResilienceConfig {
    fn default() -> Self {
        Self::defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delays_double_and_cap() {
        let cfg = ResilienceConfig {
            jitter: false,
            ..ResilienceConfig::defaults()
        };
        assert_eq!(cfg.delay_ms(0), 500);
        assert_eq!(cfg.delay_ms(1), 1_000);
        assert_eq!(cfg.delay_ms(4), 8_000);
        assert_eq!(cfg.delay_ms(40), 8_000);
    }

    #[test]
    fn jitter_never_exceeds_half_the_delay() {
        let cfg = ResilienceConfig::defaults();
        for idx in 0..8 {
            let plain = ResilienceConfig {
                jitter: false,
                ..cfg.clone()
            }
            .delay_ms(idx);
            let jittered = cfg.delay_ms(idx);
            assert!(jittered <= plain);
            assert!(jittered >= plain / 2);
        }
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let cfg: ResilienceConfig = toml::from_str("max_attempts = 5").unwrap();
        assert_eq!(cfg.max_attempts, 5);
        assert_eq!(cfg.base_delay_ms, 500);
    }
}
