//! Progress-callback trait for per-section drafting events.
//!
//! Inject an [`Arc<dyn DraftProgressCallback>`] via
//! [`crate::config::GenerationConfigBuilder::progress_callback`] to receive
//! events while [`crate::draft::draft_proposal`] works through the six
//! sections. A notebook can update a status label from it; the CLI drives a
//! spinner.
//!
//! # Example
//!
//! ```rust
//! use sales_proposal::{DraftProgressCallback, GenerationConfig, ProposalSection};
//! use std::sync::{Arc, atomic::{AtomicUsize, Ordering}};
//!
//! struct CountingCallback {
//!     drafted: AtomicUsize,
//! }
//!
//! impl DraftProgressCallback for CountingCallback {
//!     fn on_section_complete(&self, section: ProposalSection, _index: usize, _total: usize, len: usize) {
//!         self.drafted.fetch_add(1, Ordering::SeqCst);
//!         eprintln!("{section} drafted ({len} bytes)");
//!     }
//! }
//!
//! let config = GenerationConfig::builder()
//!     .progress_callback(Arc::new(CountingCallback { drafted: AtomicUsize::new(0) }))
//!     .build()
//!     .unwrap();
//! ```

use crate::proposal::ProposalSection;
use std::sync::Arc;

/// Called by the drafting loop as it processes each section.
///
/// All methods have default no-op implementations so callers only override
/// what they care about. `index` is 1-based.
pub trait DraftProgressCallback: Send + Sync {
    /// Called once before the first section is drafted.
    fn on_draft_start(&self, total_sections: usize) {
        let _ = total_sections;
    }

    /// Called just before the generator is invoked for a section.
    fn on_section_start(&self, section: ProposalSection, index: usize, total: usize) {
        let _ = (section, index, total);
    }

    /// Called when a section was drafted; `text_len` is its byte length.
    fn on_section_complete(
        &self,
        section: ProposalSection,
        index: usize,
        total: usize,
        text_len: usize,
    ) {
        let _ = (section, index, total, text_len);
    }

    /// Called when drafting a section failed. Drafting stops after this.
    fn on_section_error(&self, section: ProposalSection, index: usize, total: usize, error: &str) {
        let _ = (section, index, total, error);
    }

    /// Called once after every section was drafted successfully.
    fn on_draft_complete(&self, total_sections: usize, drafted: usize) {
        let _ = (total_sections, drafted);
    }
}

/// A no-op implementation for callers that don't need progress events.
pub struct NoopProgressCallback;

impl DraftProgressCallback for NoopProgressCallback {}

/// Convenience alias matching the type stored in [`crate::config::GenerationConfig`].
pub type ProgressCallback = Arc<dyn DraftProgressCallback>;
