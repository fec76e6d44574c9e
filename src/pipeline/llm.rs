//! Draft one section of text with the configured generator.
//!
//! Intentionally thin: prompt wording lives in [`crate::prompts`] and the
//! serialisation in [`super::format`]. There is no retry and no fallback
//! text. If the generator fails, the error reaches the caller unchanged.

use crate::config::GenerationConfig;
use crate::error::ProposalError;
use crate::generator::{GenerationParams, TextGenerator};
use crate::pipeline::format::{build_conversation, format_chat_prompt};
use std::time::Instant;
use tracing::{debug, info};

/// The exact text handed to the generator for `prompt` under `config`.
pub fn formatted_section_prompt(prompt: &str, config: &GenerationConfig) -> String {
    format_chat_prompt(&build_conversation(config.effective_system_prompt(), prompt))
}

/// Generate proposal text for one user prompt.
///
/// ## Message Layout
///
/// 1. **System message** — [`crate::prompts::DEFAULT_SYSTEM_PROMPT`] or the
///    configured override
/// 2. **User message** — `prompt`
///
/// followed by an open assistant tag. The length limit is the formatted
/// prompt's token count plus `config.max_new_tokens`.
///
/// # Returns
/// The first sequence's `generated_text`, unmodified.
///
/// # Errors
/// Whatever the generator returns, or [`ProposalError::EmptyGeneration`]
/// when it returns no sequences.
pub async fn generate_proposal_section(
    generator: &dyn TextGenerator,
    prompt: &str,
    config: &GenerationConfig,
) -> Result<String, ProposalError> {
    let start = Instant::now();
    let formatted = formatted_section_prompt(prompt, config);
    let prompt_tokens = generator.count_tokens(&formatted);
    let params = GenerationParams::for_prompt(prompt_tokens, config);
    debug!(
        "Prompt: {} tokens, max_length {}",
        prompt_tokens, params.max_length
    );

    let sequences = generator.generate(&formatted, &params).await?;
    let text = sequences
        .into_iter()
        .next()
        .map(|s| s.generated_text)
        .ok_or(ProposalError::EmptyGeneration)?;

    info!(
        "Generated {} bytes in {}ms",
        text.len(),
        start.elapsed().as_millis()
    );
    Ok(text)
}

/// Synchronous wrapper around [`generate_proposal_section`].
///
/// Creates a temporary tokio runtime internally, so it must not be called
/// from inside an async context.
pub fn generate_proposal_section_sync(
    generator: &dyn TextGenerator,
    prompt: &str,
    config: &GenerationConfig,
) -> Result<String, ProposalError> {
    tokio::runtime::Runtime::new()
        .map_err(|e| ProposalError::Internal(format!("Failed to create tokio runtime: {}", e)))?
        .block_on(generate_proposal_section(generator, prompt, config))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::GeneratedSequence;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Records what it was asked and replies with canned sequences.
    struct Recorder {
        reply: Result<Vec<&'static str>, &'static str>,
        seen: Mutex<Option<(String, GenerationParams)>>,
    }

    impl Recorder {
        fn replying(reply: Vec<&'static str>) -> Self {
            Self {
                reply: Ok(reply),
                seen: Mutex::new(None),
            }
        }
    }

    #[async_trait]
    impl TextGenerator for Recorder {
        fn count_tokens(&self, text: &str) -> usize {
            text.len()
        }

        async fn generate(
            &self,
            prompt: &str,
            params: &GenerationParams,
        ) -> Result<Vec<GeneratedSequence>, ProposalError> {
            *self.seen.lock().unwrap() = Some((prompt.to_string(), params.clone()));
            match &self.reply {
                Ok(texts) => Ok(texts
                    .iter()
                    .map(|t| GeneratedSequence {
                        generated_text: t.to_string(),
                    })
                    .collect()),
                Err(msg) => Err(ProposalError::GenerationFailed {
                    message: msg.to_string(),
                }),
            }
        }
    }

    #[test]
    fn sends_formatted_prompt_and_sampling_setup() {
        let gen = Recorder::replying(vec!["Draft"]);
        let config = GenerationConfig::builder().system_prompt("S").build().unwrap();

        let text =
            tokio_test::block_on(generate_proposal_section(&gen, "U", &config)).unwrap();
        assert_eq!(text, "Draft");

        let (prompt, params) = gen.seen.lock().unwrap().clone().unwrap();
        assert_eq!(prompt, "<|system|>\nS</s>\n<|user|>\nU</s>\n<|assistant|>\n");
        assert_eq!(params.max_length, prompt.len() + 500);
        assert!(params.do_sample);
        assert_eq!(params.temperature, 0.7);
        assert_eq!(params.top_p, 0.9);
        assert!(!params.return_full_text);
    }

    #[test]
    fn default_system_prompt_is_used() {
        let gen = Recorder::replying(vec!["x"]);
        tokio_test::block_on(generate_proposal_section(
            &gen,
            "U",
            &GenerationConfig::default(),
        ))
        .unwrap();
        let (prompt, _) = gen.seen.lock().unwrap().clone().unwrap();
        assert!(prompt.starts_with(&format!(
            "<|system|>\n{}</s>\n",
            crate::prompts::DEFAULT_SYSTEM_PROMPT
        )));
    }

    #[test]
    fn only_first_sequence_is_returned() {
        let gen = Recorder::replying(vec!["first", "second"]);
        let text = tokio_test::block_on(generate_proposal_section(
            &gen,
            "U",
            &GenerationConfig::default(),
        ))
        .unwrap();
        assert_eq!(text, "first");
    }

    #[test]
    fn generated_text_is_not_trimmed() {
        let gen = Recorder::replying(vec!["  padded </s>\n"]);
        let text = tokio_test::block_on(generate_proposal_section(
            &gen,
            "U",
            &GenerationConfig::default(),
        ))
        .unwrap();
        assert_eq!(text, "  padded </s>\n");
    }

    #[test]
    fn empty_result_list_is_an_error() {
        let gen = Recorder::replying(vec![]);
        let err = tokio_test::block_on(generate_proposal_section(
            &gen,
            "U",
            &GenerationConfig::default(),
        ))
        .unwrap_err();
        assert!(matches!(err, ProposalError::EmptyGeneration));
    }

    #[test]
    fn generator_failure_propagates_unchanged() {
        let gen = Recorder {
            reply: Err("model unavailable"),
            seen: Mutex::new(None),
        };
        let err = generate_proposal_section_sync(&gen, "U", &GenerationConfig::default())
            .unwrap_err();
        match err {
            ProposalError::GenerationFailed { message } => assert_eq!(message, "model unavailable"),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
