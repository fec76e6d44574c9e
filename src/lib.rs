//! # sales-proposal
//!
//! Draft a sales proposal with a text-generation model and render it to a
//! standalone HTML document.
//!
//! ## Components
//!
//! ```text
//! notes ──▶ prompts ──▶ format ──▶ TextGenerator ──▶ section text
//!                                                         │
//! form widgets (notebook host)                            ▼
//!                                 ProposalData ──▶ render ──▶ save ──▶ FileLink
//! ```
//!
//! * **Prompt formatting** — [`pipeline::format`] serialises a system + user
//!   conversation with `<|role|>` delimiters; [`generate_proposal_section`]
//!   hands it to a [`TextGenerator`] and returns only the new text.
//! * **Widgets** — [`widgets`] builds declarative heading / text-area /
//!   button descriptors for a notebook front end.
//! * **Rendering** — [`render_html`] fills the fixed HTML template;
//!   [`save_and_download_html`] writes `sales_proposal.html` and returns a
//!   [`FileLink`].
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use sales_proposal::{render_html, save_and_download_html, ProposalData};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let data = ProposalData {
//!         title: "Cloud Migration".into(),
//!         customer: "Acme Corp".into(),
//!         salesperson: "Jordan Lee".into(),
//!         date: "March 3, 2024".into(),
//!         executive_summary: "We move Acme's workloads to the cloud.".into(),
//!         problem_statement: "Ageing on-premise servers.".into(),
//!         proposed_solution: "A phased migration over two quarters.".into(),
//!         benefits: "Lower hosting cost and faster releases.".into(),
//!         pricing_terms: "$120,000, payable quarterly.".into(),
//!         conclusion: "We can start in April.".into(),
//!     };
//!     let link = save_and_download_html(&render_html(&data))?;
//!     println!("{}", link.to_html());
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `proposal` binary (clap + anyhow + tracing-subscriber + indicatif) |

// ── Modules ──────────────────────────────────────────────────────────────

pub mod config;
pub mod draft;
pub mod error;
pub mod generator;
pub mod pipeline;
pub mod progress;
pub mod prompts;
pub mod proposal;
pub mod widgets;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use config::{GenerationConfig, GenerationConfigBuilder};
pub use draft::{draft_proposal, draft_proposal_sync, draft_section};
pub use error::ProposalError;
pub use generator::{GeneratedSequence, GenerationParams, ProviderGenerator, TextGenerator};
pub use pipeline::format::{build_conversation, format_chat_prompt, ChatMessage, ChatRole};
pub use pipeline::llm::{generate_proposal_section, generate_proposal_section_sync};
pub use pipeline::render::{footer_year, render_html};
pub use pipeline::save::{save_and_download_html, save_html_to, FileLink, OUTPUT_FILENAME};
pub use progress::{DraftProgressCallback, NoopProgressCallback, ProgressCallback};
pub use proposal::{ProposalData, ProposalHeader, ProposalSection, SectionNotes};
pub use widgets::{
    create_button, create_section_heading, create_text_area, create_text_area_with, ButtonStyle,
    TextAreaOptions, Widget,
};
