//! The proposal record and its six content sections.
//!
//! [`ProposalData`] is the flat set of ten text fields the renderer
//! consumes. It is built fresh for every document, either as a typed struct
//! or from a string-keyed map (the shape a notebook form naturally produces).
//! The map path is where absence can creep in, so it fails fast with
//! [`ProposalError::MissingField`] instead of rendering an empty paragraph.

use crate::error::ProposalError;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;

/// Every key a proposal mapping must carry, in template order.
pub const REQUIRED_FIELDS: [&str; 10] = [
    "title",
    "customer",
    "salesperson",
    "date",
    "executive_summary",
    "problem_statement",
    "proposed_solution",
    "benefits",
    "pricing_terms",
    "conclusion",
];

/// The text of one sales proposal, ready for rendering.
///
/// Not `Default`: every field must be supplied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProposalData {
    pub title: String,
    pub customer: String,
    pub salesperson: String,
    /// Free-form date text; the footer year is derived from it textually.
    pub date: String,
    pub executive_summary: String,
    pub problem_statement: String,
    pub proposed_solution: String,
    pub benefits: String,
    pub pricing_terms: String,
    pub conclusion: String,
}

impl ProposalData {
    /// Build from a string-keyed mapping. Extra keys are ignored.
    ///
    /// # Errors
    /// [`ProposalError::MissingField`] naming the first absent key, checked
    /// in [`REQUIRED_FIELDS`] order.
    pub fn from_map<S>(map: &HashMap<String, String, S>) -> Result<Self, ProposalError>
    where
        S: std::hash::BuildHasher,
    {
        Self::from_lookup(|key| map.get(key).cloned())
    }

    /// Same as [`ProposalData::from_map`] for an ordered map.
    pub fn from_btree(map: &BTreeMap<String, String>) -> Result<Self, ProposalError> {
        Self::from_lookup(|key| map.get(key).cloned())
    }

    fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self, ProposalError> {
        let field = |key: &str| {
            get(key).ok_or_else(|| ProposalError::MissingField {
                field: key.to_string(),
            })
        };

        Ok(Self {
            title: field("title")?,
            customer: field("customer")?,
            salesperson: field("salesperson")?,
            date: field("date")?,
            executive_summary: field("executive_summary")?,
            problem_statement: field("problem_statement")?,
            proposed_solution: field("proposed_solution")?,
            benefits: field("benefits")?,
            pricing_terms: field("pricing_terms")?,
            conclusion: field("conclusion")?,
        })
    }

    /// Assemble a proposal from its header and the six section bodies.
    pub fn from_parts(header: ProposalHeader, sections: [String; 6]) -> Self {
        let [executive_summary, problem_statement, proposed_solution, benefits, pricing_terms, conclusion] =
            sections;
        Self {
            title: header.title,
            customer: header.customer,
            salesperson: header.salesperson,
            date: header.date,
            executive_summary,
            problem_statement,
            proposed_solution,
            benefits,
            pricing_terms,
            conclusion,
        }
    }

    /// The body text of one content section.
    pub fn section(&self, section: ProposalSection) -> &str {
        match section {
            ProposalSection::ExecutiveSummary => &self.executive_summary,
            ProposalSection::ProblemStatement => &self.problem_statement,
            ProposalSection::ProposedSolution => &self.proposed_solution,
            ProposalSection::Benefits => &self.benefits,
            ProposalSection::PricingTerms => &self.pricing_terms,
            ProposalSection::Conclusion => &self.conclusion,
        }
    }

    pub fn header(&self) -> ProposalHeader {
        ProposalHeader {
            title: self.title.clone(),
            customer: self.customer.clone(),
            salesperson: self.salesperson.clone(),
            date: self.date.clone(),
        }
    }
}

/// The four fields shown in the document header.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProposalHeader {
    pub title: String,
    pub customer: String,
    pub salesperson: String,
    pub date: String,
}

/// Free-form notes per section, used as drafting input.
pub type SectionNotes = BTreeMap<ProposalSection, String>;

/// One of the six content sections, in document order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProposalSection {
    ExecutiveSummary,
    ProblemStatement,
    ProposedSolution,
    Benefits,
    PricingTerms,
    Conclusion,
}

impl ProposalSection {
    /// All sections in the order they appear in the rendered document.
    pub const ALL: [ProposalSection; 6] = [
        ProposalSection::ExecutiveSummary,
        ProposalSection::ProblemStatement,
        ProposalSection::ProposedSolution,
        ProposalSection::Benefits,
        ProposalSection::PricingTerms,
        ProposalSection::Conclusion,
    ];

    /// Heading text used in the document and the form.
    pub fn heading(self) -> &'static str {
        match self {
            ProposalSection::ExecutiveSummary => "Executive Summary",
            ProposalSection::ProblemStatement => "Problem Statement",
            ProposalSection::ProposedSolution => "Proposed Solution",
            ProposalSection::Benefits => "Benefits",
            ProposalSection::PricingTerms => "Pricing and Terms",
            ProposalSection::Conclusion => "Conclusion",
        }
    }

    /// Key of this section in a proposal mapping.
    pub fn key(self) -> &'static str {
        match self {
            ProposalSection::ExecutiveSummary => "executive_summary",
            ProposalSection::ProblemStatement => "problem_statement",
            ProposalSection::ProposedSolution => "proposed_solution",
            ProposalSection::Benefits => "benefits",
            ProposalSection::PricingTerms => "pricing_terms",
            ProposalSection::Conclusion => "conclusion",
        }
    }

    /// Parse a section from its key or a dashed variant (`pricing-terms`).
    pub fn from_key(s: &str) -> Option<Self> {
        let normalised = s.trim().to_lowercase().replace('-', "_");
        Self::ALL.into_iter().find(|sec| sec.key() == normalised)
    }
}

impl fmt::Display for ProposalSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.heading())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_map() -> HashMap<String, String> {
        REQUIRED_FIELDS
            .iter()
            .map(|k| (k.to_string(), format!("{k} text")))
            .collect()
    }

    #[test]
    fn from_map_reads_every_field() {
        let data = ProposalData::from_map(&full_map()).unwrap();
        assert_eq!(data.title, "title text");
        assert_eq!(data.pricing_terms, "pricing_terms text");
        assert_eq!(data.conclusion, "conclusion text");
    }

    #[test]
    fn from_map_missing_key_fails_fast() {
        let mut map = full_map();
        map.remove("benefits");
        match ProposalData::from_map(&map) {
            Err(ProposalError::MissingField { field }) => assert_eq!(field, "benefits"),
            other => panic!("expected MissingField, got {other:?}"),
        }
    }

    #[test]
    fn from_btree_matches_from_map() {
        let btree: BTreeMap<String, String> = full_map().into_iter().collect();
        assert_eq!(
            ProposalData::from_btree(&btree).unwrap(),
            ProposalData::from_map(&full_map()).unwrap()
        );
    }

    #[test]
    fn json_missing_key_fails_to_deserialise() {
        let mut map = full_map();
        map.remove("pricing_terms");
        let json = serde_json::to_string(&map).unwrap();

        let err = serde_json::from_str::<ProposalData>(&json).unwrap_err();
        assert!(err.to_string().contains("pricing_terms"), "got: {err}");
    }

    #[test]
    fn json_with_all_keys_deserialises() {
        let json = serde_json::to_string(&full_map()).unwrap();
        let data: ProposalData = serde_json::from_str(&json).unwrap();
        assert_eq!(data, ProposalData::from_map(&full_map()).unwrap());
    }

    #[test]
    fn from_map_ignores_extra_keys() {
        let mut map = full_map();
        map.insert("notes".into(), "internal".into());
        assert!(ProposalData::from_map(&map).is_ok());
    }

    #[test]
    fn empty_string_is_present_not_missing() {
        let mut map = full_map();
        map.insert("benefits".into(), String::new());
        let data = ProposalData::from_map(&map).unwrap();
        assert_eq!(data.benefits, "");
    }

    #[test]
    fn section_keys_match_required_fields() {
        let keys: Vec<&str> = ProposalSection::ALL.iter().map(|s| s.key()).collect();
        assert_eq!(keys, &REQUIRED_FIELDS[4..]);
    }

    #[test]
    fn from_key_accepts_dashes() {
        assert_eq!(
            ProposalSection::from_key("pricing-terms"),
            Some(ProposalSection::PricingTerms)
        );
        assert_eq!(ProposalSection::from_key("appendix"), None);
    }

    #[test]
    fn from_parts_places_sections_in_order() {
        let header = ProposalHeader {
            title: "T".into(),
            customer: "C".into(),
            salesperson: "S".into(),
            date: "D".into(),
        };
        let data = ProposalData::from_parts(
            header.clone(),
            ["1", "2", "3", "4", "5", "6"].map(String::from),
        );
        assert_eq!(data.header(), header);
        for (i, section) in ProposalSection::ALL.iter().enumerate() {
            assert_eq!(data.section(*section), (i + 1).to_string());
        }
    }
}
