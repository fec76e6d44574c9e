//! HTML rendering: fill the proposal template.
//!
//! The document is a single self-contained HTML5 page with an inline
//! stylesheet, so it opens offline in any browser with no extra assets.
//!
//! Field text is interpolated **verbatim**. Nothing is HTML-escaped, so
//! proposal text may carry its own markup (`<ul>`, `<strong>`). Do not feed
//! untrusted input through [`render_html`]: a `<script>` in any field ends up
//! in the document as-is.

use crate::proposal::{ProposalData, ProposalSection};
use tracing::debug;

/// Inline stylesheet embedded in every document.
pub const STYLESHEET: &str = r#"        body {
            font-family: Arial, sans-serif;
            line-height: 1.6;
            color: #333;
            max-width: 800px;
            margin: 0 auto;
            padding: 20px;
        }
        h1, h2, h3 {
            color: #2c3e50;
        }
        .header {
            text-align: center;
            margin-bottom: 30px;
            border-bottom: 2px solid #3498db;
            padding-bottom: 10px;
        }
        .date {
            text-align: right;
            color: #7f8c8d;
        }
        .section {
            margin-bottom: 25px;
        }
        .footer {
            margin-top: 40px;
            padding-top: 20px;
            border-top: 1px solid #bdc3c7;
            text-align: center;
            font-size: 0.9em;
            color: #7f8c8d;
        }
"#;

/// Year shown in the copyright footer.
///
/// Textual, not calendar-aware: with a comma in `date` it is whatever follows
/// the last comma, trimmed (`"March 3, 2024"` → `"2024"`); otherwise the
/// whole string (`"2024-03-03"` → `"2024-03-03"`).
pub fn footer_year(date: &str) -> &str {
    match date.rfind(',') {
        Some(idx) => date[idx + 1..].trim(),
        None => date,
    }
}

/// Render `data` into a complete HTML document.
///
/// Deterministic: identical input yields byte-identical output.
pub fn render_html(data: &ProposalData) -> String {
    let mut sections = String::new();
    for section in ProposalSection::ALL {
        sections.push_str(&format!(
            "    <div class=\"section\">\n        <h2>{}</h2>\n        <p>{}</p>\n    </div>\n\n",
            section.heading(),
            data.section(section)
        ));
    }

    let html = format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <style>
{style}    </style>
</head>
<body>
    <div class="header">
        <h1>{title}</h1>
        <p>Prepared for: <strong>{customer}</strong></p>
        <p>Prepared by: {salesperson}</p>
        <p class="date">{date}</p>
    </div>

{sections}    <div class="footer">
        <p>© {year} - Confidential</p>
    </div>
</body>
</html>
"#,
        title = data.title,
        style = STYLESHEET,
        customer = data.customer,
        salesperson = data.salesperson,
        date = data.date,
        sections = sections,
        year = footer_year(&data.date),
    );

    debug!("Rendered proposal '{}' → {} bytes", data.title, html.len());
    html
}
