//! Prompts for drafting proposal sections.
//!
//! Every prompt lives here so tests can inspect them directly without a
//! model. Callers can override the system prompt via
//! [`crate::config::GenerationConfig::system_prompt`]; the constant below is
//! used only when no override is provided.

use crate::proposal::{ProposalHeader, ProposalSection};

/// Default system prompt describing the assistant's role.
pub const DEFAULT_SYSTEM_PROMPT: &str =
    "You are an assistant that helps salespeople create professional sales proposals.";

/// Build the user prompt for drafting one section.
///
/// `notes` is the salesperson's free-form input for that section; it is
/// appended verbatim when non-empty.
pub fn section_prompt(section: ProposalSection, header: &ProposalHeader, notes: &str) -> String {
    let task = match section {
        ProposalSection::ExecutiveSummary => format!(
            "Write a concise executive summary for a sales proposal titled \"{}\" prepared for {}. \
Highlight the customer's main need and the value of our offer in one or two paragraphs.",
            header.title, header.customer
        ),
        ProposalSection::ProblemStatement => format!(
            "Describe the business problem {} is facing, as the problem statement of a sales proposal titled \"{}\". \
Be specific about the impact of the problem.",
            header.customer, header.title
        ),
        ProposalSection::ProposedSolution => format!(
            "Describe our proposed solution for {} in a sales proposal titled \"{}\". \
Explain how it addresses the problem and how it will be delivered.",
            header.customer, header.title
        ),
        ProposalSection::Benefits => format!(
            "List the key benefits {} will gain from the proposed solution in the sales proposal \"{}\". \
Focus on measurable outcomes.",
            header.customer, header.title
        ),
        ProposalSection::PricingTerms => format!(
            "Write the pricing and terms section of the sales proposal \"{}\" for {}. \
Present the pricing clearly and state payment terms and validity.",
            header.title, header.customer
        ),
        ProposalSection::Conclusion => format!(
            "Write a persuasive conclusion for the sales proposal \"{}\" to {}, signed by {}. \
Summarise the value and include a clear call to action.",
            header.title, header.customer, header.salesperson
        ),
    };

    let notes = notes.trim();
    if notes.is_empty() {
        task
    } else {
        format!("{task}\n\nUse the following notes:\n{notes}")
    }
}
