//! The text-generation boundary.
//!
//! Drafting talks to a [`TextGenerator`]: something that can count the
//! tokens of a prompt and continue it under a set of sampling parameters,
//! returning one or more result records. Tests plug in a scripted generator;
//! real use goes through [`ProviderGenerator`], which adapts any
//! `edgequake_llm` provider (OpenAI, Anthropic, Gemini, Ollama, …).

use crate::config::GenerationConfig;
use crate::error::ProposalError;
use async_trait::async_trait;
use edgequake_llm::{ChatMessage, CompletionOptions, LLMProvider, ProviderFactory};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

/// Sampling parameters for one generation call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationParams {
    pub do_sample: bool,
    /// Upper bound on prompt tokens plus generated tokens.
    pub max_length: usize,
    pub temperature: f32,
    pub top_p: f32,
    /// Echo the prompt in front of the generated text.
    pub return_full_text: bool,
}

impl GenerationParams {
    /// Parameters for a prompt of `prompt_tokens` tokens under `config`.
    pub fn for_prompt(prompt_tokens: usize, config: &GenerationConfig) -> Self {
        Self {
            do_sample: config.do_sample,
            max_length: prompt_tokens + config.max_new_tokens,
            temperature: config.temperature,
            top_p: config.top_p,
            return_full_text: config.return_full_text,
        }
    }
}

/// One result record from a generator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedSequence {
    pub generated_text: String,
}

/// A text-generation capability with a tokenizer.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Number of tokens `text` occupies for this generator's model.
    fn count_tokens(&self, text: &str) -> usize;

    /// Continue `prompt`. Implementations return at least one sequence on
    /// success; only the first is used by the drafting pipeline.
    async fn generate(
        &self,
        prompt: &str,
        params: &GenerationParams,
    ) -> Result<Vec<GeneratedSequence>, ProposalError>;
}

static RE_TOKEN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\w+|[^\w\s]").unwrap());

/// Word-piece estimate of a token count: each word and each punctuation
/// mark counts as one token.
pub fn approximate_token_count(text: &str) -> usize {
    RE_TOKEN.find_iter(text).count()
}

/// [`TextGenerator`] over an `edgequake_llm` provider.
///
/// Providers take a generation budget rather than a total length, so the
/// budget is recovered as `max_length - count_tokens(prompt)`. The formatted
/// prompt is sent as a single user turn; the role tags inside it carry the
/// conversation structure.
pub struct ProviderGenerator {
    provider: Arc<dyn LLMProvider>,
}

impl ProviderGenerator {
    pub fn new(provider: Arc<dyn LLMProvider>) -> Self {
        Self { provider }
    }

    /// Resolve a provider from `config` (see [`resolve_provider`]).
    pub fn from_config(config: &GenerationConfig) -> Result<Self, ProposalError> {
        resolve_provider(config).map(Self::new)
    }

    fn build_options(&self, prompt: &str, params: &GenerationParams) -> CompletionOptions {
        let budget = params
            .max_length
            .saturating_sub(self.count_tokens(prompt))
            .max(1);
        let (temperature, top_p) = if params.do_sample {
            (params.temperature, Some(params.top_p))
        } else {
            (0.0, None)
        };
        CompletionOptions {
            temperature: Some(temperature),
            top_p,
            max_tokens: Some(budget),
            ..Default::default()
        }
    }
}

#[async_trait]
impl TextGenerator for ProviderGenerator {
    fn count_tokens(&self, text: &str) -> usize {
        approximate_token_count(text)
    }

    async fn generate(
        &self,
        prompt: &str,
        params: &GenerationParams,
    ) -> Result<Vec<GeneratedSequence>, ProposalError> {
        let options = self.build_options(prompt, params);
        let messages = vec![ChatMessage::user(prompt.to_string())];

        let response = self
            .provider
            .chat(&messages, Some(&options))
            .await
            .map_err(generation_failed)?;

        debug!(
            "{} input tokens, {} output tokens",
            response.prompt_tokens, response.completion_tokens
        );

        let generated_text = if params.return_full_text {
            format!("{}{}", prompt, response.content)
        } else {
            response.content
        };
        Ok(vec![GeneratedSequence { generated_text }])
    }
}

/// Provider errors keep their message and nothing else.
fn generation_failed(e: impl std::fmt::Display) -> ProposalError {
    ProposalError::GenerationFailed {
        message: format!("{}", e),
    }
}

/// Instantiate a named provider with the given model.
fn create_provider(
    provider_name: &str,
    model: &str,
) -> Result<Arc<dyn LLMProvider>, ProposalError> {
    ProviderFactory::create_llm_provider(provider_name, model).map_err(|e| {
        ProposalError::ProviderNotConfigured {
            provider: provider_name.to_string(),
            hint: format!("{e}"),
        }
    })
}

/// Resolve the LLM provider, from most-specific to least-specific.
///
/// 1. **Pre-built provider** (`config.provider`), used as-is.
/// 2. **Named provider + model** (`config.provider_name`); the factory reads
///    the matching API key (`OPENAI_API_KEY`, …) from the environment.
/// 3. **Environment pair** (`EDGEQUAKE_LLM_PROVIDER` + `EDGEQUAKE_MODEL`).
/// 4. **Full auto-detection** via `ProviderFactory::from_env`.
pub fn resolve_provider(config: &GenerationConfig) -> Result<Arc<dyn LLMProvider>, ProposalError> {
    if let Some(ref provider) = config.provider {
        return Ok(Arc::clone(provider));
    }

    if let Some(ref name) = config.provider_name {
        let model = config.model.as_deref().unwrap_or("gpt-4.1-nano");
        return create_provider(name, model);
    }

    if let (Ok(prov), Ok(model)) = (
        std::env::var("EDGEQUAKE_LLM_PROVIDER"),
        std::env::var("EDGEQUAKE_MODEL"),
    ) {
        if !prov.is_empty() && !model.is_empty() {
            return create_provider(&prov, &model);
        }
    }

    let (llm_provider, _embedding) =
        ProviderFactory::from_env().map_err(|e| ProposalError::ProviderNotConfigured {
            provider: "auto".to_string(),
            hint: format!(
                "No LLM provider could be auto-detected from environment.\n\
                Set OPENAI_API_KEY, ANTHROPIC_API_KEY, or configure a provider.\n\
                Error: {}",
                e
            ),
        })?;

    Ok(llm_provider)
}

#[cfg(test)]
mod tests {
    use super::*;
    use edgequake_llm::MockProvider;

    fn mock_generator() -> ProviderGenerator {
        ProviderGenerator::new(Arc::new(MockProvider::new()))
    }

    fn sampling_params(max_length: usize) -> GenerationParams {
        GenerationParams {
            do_sample: true,
            max_length,
            temperature: 0.7,
            top_p: 0.9,
            return_full_text: false,
        }
    }

    const PROMPT: &str = "<|system|>\nS</s>\n<|user|>\nU</s>\n<|assistant|>\n";

    #[test]
    fn build_options_sends_budget_not_total_length() {
        let gen = mock_generator();
        let prompt_tokens = gen.count_tokens(PROMPT);
        let opts = gen.build_options(PROMPT, &sampling_params(prompt_tokens + 500));
        assert_eq!(opts.max_tokens, Some(500));
        assert_eq!(opts.temperature, Some(0.7));
        assert_eq!(opts.top_p, Some(0.9));
    }

    #[test]
    fn build_options_budget_never_zero() {
        let gen = mock_generator();
        let opts = gen.build_options(PROMPT, &sampling_params(1));
        assert_eq!(opts.max_tokens, Some(1));
    }

    #[test]
    fn build_options_greedy_drops_top_p() {
        let gen = mock_generator();
        let params = GenerationParams {
            do_sample: false,
            ..sampling_params(600)
        };
        let opts = gen.build_options(PROMPT, &params);
        assert_eq!(opts.temperature, Some(0.0));
        assert_eq!(opts.top_p, None);
    }

    #[test]
    fn full_text_prepends_prompt() {
        let gen = mock_generator();
        let plain = tokio_test::block_on(gen.generate(PROMPT, &sampling_params(600))).unwrap();
        let full = tokio_test::block_on(gen.generate(
            PROMPT,
            &GenerationParams {
                return_full_text: true,
                ..sampling_params(600)
            },
        ))
        .unwrap();

        assert_eq!(plain.len(), 1);
        assert_eq!(plain[0].generated_text, "Mock response");
        assert_eq!(
            full[0].generated_text,
            format!("{}{}", PROMPT, plain[0].generated_text)
        );
    }

    #[test]
    fn provider_error_becomes_generation_failed() {
        let err = generation_failed("503 Service Unavailable");
        match err {
            ProposalError::GenerationFailed { message } => {
                assert_eq!(message, "503 Service Unavailable")
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn token_estimate_counts_words_and_punctuation() {
        assert_eq!(approximate_token_count(""), 0);
        assert_eq!(approximate_token_count("Hello, world!"), 4);
        assert_eq!(approximate_token_count("<|user|>\nU</s>\n"), 10);
    }

    #[test]
    fn params_add_budget_to_prompt_length() {
        let params = GenerationParams::for_prompt(42, &GenerationConfig::default());
        assert_eq!(params.max_length, 542);
        assert!(params.do_sample);
        assert_eq!(params.temperature, 0.7);
        assert_eq!(params.top_p, 0.9);
        assert!(!params.return_full_text);
    }
}
