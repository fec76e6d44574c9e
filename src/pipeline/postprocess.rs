//! Post-processing: deterministic cleanup of generated section text.
//!
//! Chat-tuned models prompted with role-tagged text sometimes keep going
//! past their own turn: they emit the `</s>` end marker literally, or start
//! an imaginary `<|user|>` reply. These rules cut that residue off without
//! touching the prose. They run only when
//! [`crate::config::GenerationConfig::clean_output`] is set; the single-call
//! API returns generated text verbatim.
//!
//! ## Rule Order
//!
//! Line endings are normalised first so the tag regex sees `\n`, the text is
//! cut at the first leaked role tag before end markers are stripped, and
//! whitespace is trimmed last.

use once_cell::sync::Lazy;
use regex::Regex;

/// Apply all cleanup rules to raw generated text.
///
/// 1. Normalise line endings (CRLF → LF)
/// 2. Cut at the first leaked role tag (`<|system|>`, `<|user|>`, `<|assistant|>`)
/// 3. Strip `</s>` end-of-turn markers
/// 4. Trim surrounding whitespace
pub fn clean_generated_text(input: &str) -> String {
    let s = normalise_line_endings(input);
    let s = cut_at_role_tag(&s);
    let s = strip_end_markers(s);
    s.trim().to_string()
}

// ── Rule 1: Normalise line endings ───────────────────────────────────────────

fn normalise_line_endings(input: &str) -> String {
    input.replace("\r\n", "\n").replace('\r', "\n")
}

// ── Rule 2: Cut at leaked role tag ───────────────────────────────────────────

static RE_ROLE_TAG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<\|(?:system|user|assistant)\|>").unwrap());

fn cut_at_role_tag(input: &str) -> &str {
    match RE_ROLE_TAG.find(input) {
        Some(m) => &input[..m.start()],
        None => input,
    }
}

// ── Rule 3: Strip end markers ────────────────────────────────────────────────

fn strip_end_markers(input: &str) -> String {
    input.replace(crate::pipeline::format::END_OF_TURN, "")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_text_is_unchanged() {
        let input = "Acme will cut hosting costs by 30%.";
        assert_eq!(clean_generated_text(input), input);
    }

    #[test]
    fn strips_end_marker_and_whitespace() {
        assert_eq!(
            clean_generated_text("\n  Our solution scales.</s>\n"),
            "Our solution scales."
        );
    }

    #[test]
    fn cuts_at_leaked_user_turn() {
        let input = "Pricing is $10k.</s>\n<|user|>\nThanks! Now write the conclusion.";
        assert_eq!(clean_generated_text(input), "Pricing is $10k.");
    }

    #[test]
    fn normalises_crlf() {
        assert_eq!(clean_generated_text("a\r\nb\rc"), "a\nb\nc");
    }

    #[test]
    fn keeps_inner_paragraph_breaks() {
        assert_eq!(clean_generated_text("One.\n\nTwo.</s>"), "One.\n\nTwo.");
    }
}
