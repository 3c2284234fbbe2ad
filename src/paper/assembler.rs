//! Final document assembly.
//!
//! Pure formatting: the section map, topic, and author are rendered into
//! one markdown document with a fixed heading order and metadata block.
//! Missing sections render as empty bodies under their headings.

use crate::paper::orchestrator::SectionResults;
use crate::paper::prompts::Section;
use crate::validation::sanitize_filename;

use chrono::{DateTime, Local};
use std::fmt::Write as FmtWrite;

/// An assembled paper, created once per successful generation run
#[derive(Debug, Clone)]
pub struct Document {
    topic: String,
    author: String,
    generated_at: DateTime<Local>,
    markdown: String,
}

impl Document {
    /// Assemble the final document from collected section texts
    pub fn assemble(sections: &SectionResults, topic: &str, author: &str) -> Self {
        let generated_at = Local::now();
        let markdown = format_paper(sections, topic, author, generated_at);
        Self {
            topic: topic.to_string(),
            author: author.to_string(),
            generated_at,
            markdown,
        }
    }

    /// The raw structured text
    pub fn as_markdown(&self) -> &str {
        &self.markdown
    }

    /// The same text wrapped for literal display
    pub fn for_display(&self) -> String {
        format!("```markdown\n{}\n```", self.markdown)
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }

    pub fn author(&self) -> &str {
        &self.author
    }

    pub const fn generated_at(&self) -> DateTime<Local> {
        self.generated_at
    }

    /// Whitespace-delimited word count of the assembled text
    pub fn word_count(&self) -> usize {
        self.markdown.split_whitespace().count()
    }

    /// Sanitized topic prefix plus generation timestamp
    pub fn file_stem(&self) -> String {
        format!(
            "{}_{}",
            sanitize_filename(&self.topic),
            self.generated_at.format("%Y%m%d_%H%M%S")
        )
    }

    pub fn markdown_filename(&self) -> String {
        format!("{}.md", self.file_stem())
    }

    pub fn text_filename(&self) -> String {
        format!("{}.txt", self.file_stem())
    }
}

fn section_body<'a>(sections: &'a SectionResults, section: Section) -> &'a str {
    sections.get(&section).map_or("", String::as_str)
}

/// Render the fixed paper template
fn format_paper(
    sections: &SectionResults,
    topic: &str,
    author: &str,
    generated_at: DateTime<Local>,
) -> String {
    let mut paper = String::new();

    write!(paper, "# {topic}\n\n").expect("writing to string should never fail");
    write!(
        paper,
        "**Author:** {author}  \n**Date:** {}\n\n",
        generated_at.format("%B %d, %Y")
    )
    .expect("writing to string should never fail");

    for &section in Section::ALL {
        write!(
            paper,
            "---\n\n## {}\n\n{}\n\n",
            section.heading(),
            section_body(sections, section)
        )
        .expect("writing to string should never fail");
    }

    paper.push_str(
        "---\n\n*This paper was generated using AI assistance and should be used as a \
         starting point for academic research.*",
    );

    paper
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_sections_render_as_empty_bodies() {
        let sections = SectionResults::new();
        let document = Document::assemble(&sections, "Topic of record", "AI Generated");
        let markdown = document.as_markdown();
        assert!(markdown.contains("## Abstract"));
        assert!(markdown.contains("## References"));
        assert!(markdown.starts_with("# Topic of record"));
    }

    #[test]
    fn display_form_wraps_the_same_text() {
        let sections = SectionResults::new();
        let document = Document::assemble(&sections, "Another topic here", "AI Generated");
        let display = document.for_display();
        assert!(display.starts_with("```markdown\n"));
        assert!(display.contains(document.as_markdown()));
    }
}
