//! Fixed section set and prompt templates.
//!
//! Prompt wording is data, not logic: each section has one instructional
//! template interpolating the topic and paper type. The section set and its
//! document order never change.

use std::fmt;
use std::str::FromStr;

/// The seven fixed sections of a generated paper, in document order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    Abstract,
    Introduction,
    LiteratureReview,
    Methodology,
    ResultsDiscussion,
    Conclusion,
    References,
}

impl Section {
    /// All sections in final document order
    pub const ALL: &'static [Section] = &[
        Section::Abstract,
        Section::Introduction,
        Section::LiteratureReview,
        Section::Methodology,
        Section::ResultsDiscussion,
        Section::Conclusion,
        Section::References,
    ];

    /// Stable key used to associate results with sections
    pub const fn key(&self) -> &'static str {
        match self {
            Self::Abstract => "abstract",
            Self::Introduction => "introduction",
            Self::LiteratureReview => "literature_review",
            Self::Methodology => "methodology",
            Self::ResultsDiscussion => "results_discussion",
            Self::Conclusion => "conclusion",
            Self::References => "references",
        }
    }

    /// Heading as rendered in the assembled document
    pub const fn heading(&self) -> &'static str {
        match self {
            Self::Abstract => "Abstract",
            Self::Introduction => "1. Introduction",
            Self::LiteratureReview => "2. Literature Review",
            Self::Methodology => "3. Methodology",
            Self::ResultsDiscussion => "4. Results and Discussion",
            Self::Conclusion => "5. Conclusion",
            Self::References => "References",
        }
    }

    /// Human-readable name for status lines
    pub const fn display_name(&self) -> &'static str {
        match self {
            Self::Abstract => "Abstract",
            Self::Introduction => "Introduction",
            Self::LiteratureReview => "Literature Review",
            Self::Methodology => "Methodology",
            Self::ResultsDiscussion => "Results and Discussion",
            Self::Conclusion => "Conclusion",
            Self::References => "References",
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Supported paper types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PaperType {
    #[default]
    ResearchPaper,
    ReviewPaper,
    CaseStudy,
    TechnicalReport,
}

impl PaperType {
    pub const ALL: &'static [PaperType] = &[
        PaperType::ResearchPaper,
        PaperType::ReviewPaper,
        PaperType::CaseStudy,
        PaperType::TechnicalReport,
    ];

    /// Label as shown in the type picker
    pub const fn label(&self) -> &'static str {
        match self {
            Self::ResearchPaper => "Research Paper",
            Self::ReviewPaper => "Review Paper",
            Self::CaseStudy => "Case Study",
            Self::TechnicalReport => "Technical Report",
        }
    }

    /// Lowercase form interpolated into prompts
    pub fn prompt_label(&self) -> String {
        self.label().to_lowercase()
    }

    pub fn all_labels() -> Vec<&'static str> {
        Self::ALL.iter().map(Self::label).collect()
    }
}

impl FromStr for PaperType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace(['-', '_'], " ");
        Self::ALL
            .iter()
            .find(|t| t.prompt_label() == normalized)
            .copied()
            .ok_or_else(|| {
                format!(
                    "unknown paper type '{}' (available: {})",
                    s,
                    Self::all_labels().join(", ")
                )
            })
    }
}

impl fmt::Display for PaperType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Build the prompt for one section
pub fn section_prompt(
    section: Section,
    topic: &str,
    paper_type: PaperType,
    include_citations: bool,
) -> String {
    let base = format!(
        "You are writing an academic {} paper on the topic: '{}'. ",
        paper_type.prompt_label(),
        topic
    );

    match section {
        Section::Abstract => format!(
            "{base}Write a comprehensive abstract (200-250 words) that summarizes the entire \
             paper. Include the research problem, methodology, key findings, and conclusions."
        ),
        Section::Introduction => format!(
            "{base}Write a detailed introduction (400-500 words) that: 1) Provides background \
             context, 2) States the research problem clearly, 3) Explains the significance of \
             the study, 4) Outlines the paper structure."
        ),
        Section::LiteratureReview => {
            let citation_instruction = if include_citations {
                "Includes relevant citations and references."
            } else {
                "Synthesizes the field in prose without inline citations."
            };
            format!(
                "{base}Write a thorough literature review (600-800 words) that: 1) Reviews \
                 existing research in this field, 2) Identifies gaps in current knowledge, \
                 3) Positions this work within the broader academic context, 4) {citation_instruction}"
            )
        }
        Section::Methodology => format!(
            "{base}Write a detailed methodology section (400-600 words) that: 1) Describes the \
             research approach and design, 2) Explains data collection methods, 3) Outlines \
             analysis techniques, 4) Discusses limitations and assumptions."
        ),
        Section::ResultsDiscussion => format!(
            "{base}Write a comprehensive results and discussion section (800-1000 words) that: \
             1) Presents key findings clearly, 2) Analyzes and interprets results, 3) Compares \
             findings with existing literature, 4) Discusses implications and significance."
        ),
        Section::Conclusion => format!(
            "{base}Write a strong conclusion (300-400 words) that: 1) Summarizes main findings, \
             2) Discusses broader implications, 3) Suggests areas for future research, \
             4) Provides final thoughts on the topic."
        ),
        Section::References => {
            let count = if include_citations { "15-20" } else { "8-10" };
            format!(
                "{base}Generate a list of {count} realistic academic references in APA format \
                 that would be appropriate for this paper. Include a mix of journal articles, \
                 books, and recent publications."
            )
        }
    }
}

/// Build every section's prompt, in document order
pub fn section_prompts(
    topic: &str,
    paper_type: PaperType,
    include_citations: bool,
) -> Vec<(Section, String)> {
    Section::ALL
        .iter()
        .map(|&section| {
            (
                section,
                section_prompt(section, topic, paper_type, include_citations),
            )
        })
        .collect()
}
