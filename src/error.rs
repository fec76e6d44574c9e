//! Error types for the sales-proposal library.
//!
//! A single [`ProposalError`] covers every failure the library can report.
//! Nothing is caught or translated internally: a missing proposal field, a
//! failed generation call and an unwritable output file all surface to the
//! caller unchanged, so the host (notebook, CLI, service) decides how to
//! present them.

use std::path::PathBuf;
use thiserror::Error;

/// All errors returned by the sales-proposal library.
#[derive(Debug, Error)]
pub enum ProposalError {
    // ── Data errors ───────────────────────────────────────────────────────
    /// A required proposal field was absent from the supplied mapping.
    #[error("Missing proposal field '{field}'\nEvery proposal needs: title, customer, salesperson, date, executive_summary, problem_statement, proposed_solution, benefits, pricing_terms, conclusion.")]
    MissingField { field: String },

    // ── LLM errors ────────────────────────────────────────────────────────
    /// The configured provider is not initialised (missing API key etc.).
    #[error("LLM provider '{provider}' is not configured.\n{hint}")]
    ProviderNotConfigured { provider: String, hint: String },

    /// The text-generation capability raised an error.
    #[error("Text generation failed: {message}")]
    GenerationFailed { message: String },

    /// The generator returned no result records at all.
    #[error("Text generation returned no sequences")]
    EmptyGeneration,

    // ── I/O errors ────────────────────────────────────────────────────────
    /// Could not create or write the output HTML file.
    #[error("Failed to write output file '{path}': {source}")]
    OutputWriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Config errors ─────────────────────────────────────────────────────
    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // ── Catch-all ─────────────────────────────────────────────────────────
    /// Unexpected internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_field_display() {
        let e = ProposalError::MissingField {
            field: "benefits".into(),
        };
        let msg = e.to_string();
        assert!(msg.contains("'benefits'"), "got: {msg}");
    }

    #[test]
    fn output_write_failed_keeps_source() {
        let e = ProposalError::OutputWriteFailed {
            path: PathBuf::from("sales_proposal.html"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only"),
        };
        assert!(e.to_string().contains("sales_proposal.html"));
        assert!(std::error::Error::source(&e).is_some());
    }

    #[test]
    fn provider_not_configured_display() {
        let e = ProposalError::ProviderNotConfigured {
            provider: "openai".into(),
            hint: "Set OPENAI_API_KEY".into(),
        };
        assert!(e.to_string().contains("openai"));
        assert!(e.to_string().contains("OPENAI_API_KEY"));
    }
}
