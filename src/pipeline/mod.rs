//! Pipeline stages from a section prompt to a saved HTML file.
//!
//! Each submodule implements exactly one step and is callable on its own.
//!
//! ## Data Flow
//!
//! ```text
//! prompt ──▶ format ──▶ llm ──▶ postprocess      (per section, optional)
//! ProposalData ──▶ render ──▶ save ──▶ FileLink
//! ```
//!
//! 1. [`format`]      — role-tagged chat prompt serialisation
//! 2. [`llm`]         — invoke the text generator with the sampling setup
//! 3. [`postprocess`] — optional cleanup of leaked chat markers
//! 4. [`render`]      — fill the HTML template
//! 5. [`save`]        — write the document and return a download link

pub mod format;
pub mod llm;
pub mod postprocess;
pub mod render;
pub mod save;
