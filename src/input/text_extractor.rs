//! Text extraction from various file formats

use crate::error::{Result, ResumeRankerError};
use crate::input::file_detector::FileType;
use pulldown_cmark::{html, Parser};
use regex::Regex;
use std::sync::OnceLock;

pub trait TextExtractor {
    fn extract(&self, bytes: &[u8]) -> Result<String>;
}

pub struct PdfExtractor;

impl TextExtractor for PdfExtractor {
    fn extract(&self, bytes: &[u8]) -> Result<String> {
        pdf_extract::extract_text_from_mem(bytes).map_err(|e| {
            ResumeRankerError::Parse(format!("Failed to extract text from PDF: {}", e))
        })
    }
}

pub struct PlainTextExtractor;

impl TextExtractor for PlainTextExtractor {
    fn extract(&self, bytes: &[u8]) -> Result<String> {
        String::from_utf8(bytes.to_vec()).map_err(|e| {
            ResumeRankerError::Parse(format!("Text file is not valid UTF-8: {}", e))
        })
    }
}

pub struct MarkdownExtractor;

impl TextExtractor for MarkdownExtractor {
    fn extract(&self, bytes: &[u8]) -> Result<String> {
        let markdown_content = PlainTextExtractor.extract(bytes)?;

        let parser = Parser::new(&markdown_content);
        let mut html_output = String::new();
        html::push_html(&mut html_output, parser);

        Ok(self.html_to_text(&html_output))
    }
}

impl MarkdownExtractor {
    fn html_to_text(&self, html: &str) -> String {
        static TAG_REGEX: OnceLock<Regex> = OnceLock::new();
        let tag_regex = TAG_REGEX.get_or_init(|| Regex::new(r"<[^>]*>").expect("Invalid tag regex"));

        let text = html.replace("<br>", "\n").replace("</p>", "\n\n");

        // Entities are decoded only after every tag is gone
        let stripped = tag_regex.replace_all(&text, "\n");
        let clean_text = stripped
            .replace("&nbsp;", " ")
            .replace("&lt;", "<")
            .replace("&gt;", ">")
            .replace("&quot;", "\"")
            .replace("&#39;", "'")
            .replace("&amp;", "&");

        let lines: Vec<&str> = clean_text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();

        lines.join("\n")
    }
}

impl FileType {
    /// Convert file content of this type to plain text
    pub fn extract_text(&self, bytes: &[u8]) -> Result<String> {
        match self {
            FileType::Pdf => PdfExtractor.extract(bytes),
            FileType::Text => PlainTextExtractor.extract(bytes),
            FileType::Markdown => MarkdownExtractor.extract(bytes),
        }
    }
}

/// Decode a document, choosing the extractor from the filename's extension
pub fn parse(bytes: &[u8], filename: &str) -> Result<String> {
    FileType::from_filename(filename)?.extract_text(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text() {
        let text = parse("Senior Rust engineer".as_bytes(), "job.txt").unwrap();
        assert_eq!(text, "Senior Rust engineer");
    }

    #[test]
    fn test_invalid_utf8_text_is_parse_error() {
        assert!(matches!(
            parse(&[0xc3, 0x28], "resume.txt"),
            Err(ResumeRankerError::Parse(_))
        ));
    }

    #[test]
    fn test_markdown_formatting_removed() {
        let markdown = "# John Doe\n\n## Skills\n\n* **Rust** & Python\n* Node.js\n";
        let text = parse(markdown.as_bytes(), "resume.md").unwrap();

        assert!(text.contains("John Doe"));
        assert!(text.contains("Rust"));
        assert!(text.contains("& Python"));
        assert!(text.contains("Node.js"));
        assert!(!text.contains("**"));
        assert!(!text.contains("##"));
        assert!(!text.contains('<'));
    }

    #[test]
    fn test_markdown_keeps_escaped_angle_brackets() {
        let markdown = "Experience < 5 years in Rust\n\nSkills: **Python** and Go\n";
        let text = parse(markdown.as_bytes(), "cv.md").unwrap();

        assert!(text.contains("Experience < 5 years in Rust"));
        assert!(text.contains("Python"));
        assert!(text.contains("and Go"));
    }

    #[test]
    fn test_corrupt_pdf_is_parse_error() {
        assert!(matches!(
            parse(b"definitely not a pdf", "resume.pdf"),
            Err(ResumeRankerError::Parse(_))
        ));
    }

    #[test]
    fn test_unknown_extension() {
        assert!(matches!(
            parse(b"whatever", "resume.xyz"),
            Err(ResumeRankerError::UnsupportedFormat(_))
        ));
    }
}
