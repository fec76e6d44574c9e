//! Configuration for drafting proposal text with a language model.
//!
//! All generation behaviour is controlled through [`GenerationConfig`], built
//! via its [`GenerationConfigBuilder`]. The defaults reproduce the sampling
//! setup the drafting workflow was tuned with: sampling on, temperature 0.7,
//! nucleus 0.9, a 500-token budget, and only new text returned.

use crate::error::ProposalError;
use crate::progress::ProgressCallback;
use edgequake_llm::LLMProvider;
use std::fmt;
use std::sync::Arc;

/// Configuration for a drafting call.
///
/// # Example
/// ```rust
/// use sales_proposal::GenerationConfig;
///
/// let config = GenerationConfig::builder()
///     .max_new_tokens(300)
///     .temperature(0.5)
///     .build()
///     .unwrap();
/// assert_eq!(config.top_p, 0.9);
/// ```
#[derive(Clone)]
pub struct GenerationConfig {
    /// Tokens the model may generate beyond the prompt. Default: 500.
    ///
    /// The total length limit sent to the generator is the prompt's token
    /// count plus this budget.
    pub max_new_tokens: usize,

    /// Sampling temperature. Default: 0.7.
    pub temperature: f32,

    /// Nucleus sampling probability. Default: 0.9.
    pub top_p: f32,

    /// Sample instead of greedy decoding. Default: true.
    pub do_sample: bool,

    /// Return the prompt echoed in front of the generated text. Default: false.
    pub return_full_text: bool,

    /// Custom system prompt. If None, uses [`crate::prompts::DEFAULT_SYSTEM_PROMPT`].
    pub system_prompt: Option<String>,

    /// LLM model identifier, e.g. "gpt-4.1-nano". If None, uses provider default.
    pub model: Option<String>,

    /// LLM provider name (e.g. "openai", "anthropic", "ollama").
    pub provider_name: Option<String>,

    /// Pre-constructed LLM provider. Takes precedence over `provider_name`.
    pub provider: Option<Arc<dyn LLMProvider>>,

    /// Run [`crate::pipeline::postprocess::clean_generated_text`] on drafted
    /// sections. Default: false.
    pub clean_output: bool,

    /// Per-section progress events during [`crate::draft::draft_proposal`].
    pub progress_callback: Option<ProgressCallback>,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            max_new_tokens: 500,
            temperature: 0.7,
            top_p: 0.9,
            do_sample: true,
            return_full_text: false,
            system_prompt: None,
            model: None,
            provider_name: None,
            provider: None,
            clean_output: false,
            progress_callback: None,
        }
    }
}

impl fmt::Debug for GenerationConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GenerationConfig")
            .field("max_new_tokens", &self.max_new_tokens)
            .field("temperature", &self.temperature)
            .field("top_p", &self.top_p)
            .field("do_sample", &self.do_sample)
            .field("return_full_text", &self.return_full_text)
            .field("system_prompt", &self.system_prompt)
            .field("model", &self.model)
            .field("provider_name", &self.provider_name)
            .field("provider", &self.provider.as_ref().map(|_| "<dyn LLMProvider>"))
            .field("clean_output", &self.clean_output)
            .field(
                "progress_callback",
                &self.progress_callback.as_ref().map(|_| "<dyn DraftProgressCallback>"),
            )
            .finish()
    }
}

impl GenerationConfig {
    /// Create a new builder for `GenerationConfig`.
    pub fn builder() -> GenerationConfigBuilder {
        GenerationConfigBuilder {
            config: Self::default(),
        }
    }

    /// The system prompt in effect: the override, or the built-in default.
    pub fn effective_system_prompt(&self) -> &str {
        self.system_prompt
            .as_deref()
            .unwrap_or(crate::prompts::DEFAULT_SYSTEM_PROMPT)
    }
}

/// Builder for [`GenerationConfig`].
#[derive(Debug)]
pub struct GenerationConfigBuilder {
    config: GenerationConfig,
}

impl GenerationConfigBuilder {
    pub fn max_new_tokens(mut self, n: usize) -> Self {
        self.config.max_new_tokens = n;
        self
    }

    pub fn temperature(mut self, t: f32) -> Self {
        self.config.temperature = t.clamp(0.0, 2.0);
        self
    }

    pub fn top_p(mut self, p: f32) -> Self {
        self.config.top_p = p.clamp(0.0, 1.0);
        self
    }

    pub fn do_sample(mut self, v: bool) -> Self {
        self.config.do_sample = v;
        self
    }

    pub fn return_full_text(mut self, v: bool) -> Self {
        self.config.return_full_text = v;
        self
    }

    pub fn system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.config.system_prompt = Some(prompt.into());
        self
    }

    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.config.model = Some(model.into());
        self
    }

    pub fn provider_name(mut self, name: impl Into<String>) -> Self {
        self.config.provider_name = Some(name.into());
        self
    }

    pub fn provider(mut self, provider: Arc<dyn LLMProvider>) -> Self {
        self.config.provider = Some(provider);
        self
    }

    pub fn clean_output(mut self, v: bool) -> Self {
        self.config.clean_output = v;
        self
    }

    pub fn progress_callback(mut self, cb: ProgressCallback) -> Self {
        self.config.progress_callback = Some(cb);
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<GenerationConfig, ProposalError> {
        let c = &self.config;
        if c.max_new_tokens == 0 {
            return Err(ProposalError::InvalidConfig(
                "max_new_tokens must be ≥ 1".into(),
            ));
        }
        if c.do_sample && c.top_p <= 0.0 {
            return Err(ProposalError::InvalidConfig(format!(
                "top_p must be > 0 when sampling, got {}",
                c.top_p
            )));
        }
        Ok(self.config)
    }
}
