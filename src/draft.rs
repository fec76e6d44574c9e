//! Draft a whole proposal, one section after another.
//!
//! Sections are generated strictly in document order with one generator
//! call each. There is no retry: the first failure aborts the draft and is
//! returned to the caller, after the progress callback has seen it.

use crate::config::GenerationConfig;
use crate::error::ProposalError;
use crate::generator::TextGenerator;
use crate::pipeline::{llm, postprocess};
use crate::prompts::section_prompt;
use crate::proposal::{ProposalData, ProposalHeader, ProposalSection, SectionNotes};
use std::time::Instant;
use tracing::{info, warn};

/// Draft the text of a single section from the header and notes.
pub async fn draft_section(
    generator: &dyn TextGenerator,
    section: ProposalSection,
    header: &ProposalHeader,
    notes: &str,
    config: &GenerationConfig,
) -> Result<String, ProposalError> {
    let prompt = section_prompt(section, header, notes);
    let text = llm::generate_proposal_section(generator, &prompt, config).await?;
    if config.clean_output {
        Ok(postprocess::clean_generated_text(&text))
    } else {
        Ok(text)
    }
}

/// Draft all six sections and assemble a [`ProposalData`].
///
/// Sections without an entry in `notes` are drafted from the header alone.
pub async fn draft_proposal(
    generator: &dyn TextGenerator,
    header: &ProposalHeader,
    notes: &SectionNotes,
    config: &GenerationConfig,
) -> Result<ProposalData, ProposalError> {
    let start = Instant::now();
    let total = ProposalSection::ALL.len();
    info!("Drafting {} sections for '{}'", total, header.title);

    if let Some(ref cb) = config.progress_callback {
        cb.on_draft_start(total);
    }

    let mut drafted: Vec<String> = Vec::with_capacity(total);
    for (i, section) in ProposalSection::ALL.into_iter().enumerate() {
        let index = i + 1;
        if let Some(ref cb) = config.progress_callback {
            cb.on_section_start(section, index, total);
        }

        let section_notes = notes.get(&section).map(String::as_str).unwrap_or("");
        match draft_section(generator, section, header, section_notes, config).await {
            Ok(text) => {
                if let Some(ref cb) = config.progress_callback {
                    cb.on_section_complete(section, index, total, text.len());
                }
                drafted.push(text);
            }
            Err(e) => {
                warn!("{}: drafting failed: {}", section, e);
                if let Some(ref cb) = config.progress_callback {
                    cb.on_section_error(section, index, total, &e.to_string());
                }
                return Err(e);
            }
        }
    }

    if let Some(ref cb) = config.progress_callback {
        cb.on_draft_complete(total, drafted.len());
    }

    let sections: [String; 6] = drafted
        .try_into()
        .map_err(|v: Vec<String>| {
            ProposalError::Internal(format!("expected {} sections, drafted {}", total, v.len()))
        })?;

    info!(
        "Draft complete: {} sections in {}ms",
        total,
        start.elapsed().as_millis()
    );
    Ok(ProposalData::from_parts(header.clone(), sections))
}

/// Synchronous wrapper around [`draft_proposal`].
///
/// Creates a temporary tokio runtime internally.
pub fn draft_proposal_sync(
    generator: &dyn TextGenerator,
    header: &ProposalHeader,
    notes: &SectionNotes,
    config: &GenerationConfig,
) -> Result<ProposalData, ProposalError> {
    tokio::runtime::Runtime::new()
        .map_err(|e| ProposalError::Internal(format!("Failed to create tokio runtime: {}", e)))?
        .block_on(draft_proposal(generator, header, notes, config))
}
