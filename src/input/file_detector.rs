//! File type detection

use crate::error::{Result, ResumeRankerError};
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileType {
    Pdf,
    Text,
    Markdown,
}

impl FileType {
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "pdf" => Some(FileType::Pdf),
            "txt" => Some(FileType::Text),
            "md" | "markdown" => Some(FileType::Markdown),
            _ => None,
        }
    }

    /// Detect from the extension of `filename`
    pub fn from_filename(filename: &str) -> Result<Self> {
        let extension = Path::new(filename)
            .extension()
            .and_then(|ext| ext.to_str())
            .ok_or_else(|| ResumeRankerError::UnsupportedFormat(
                format!("File has no extension: {}", filename)
            ))?;

        Self::from_extension(extension).ok_or_else(|| {
            ResumeRankerError::UnsupportedFormat(format!(
                "Unsupported file format '{}' for: {}",
                extension, filename
            ))
        })
    }
}
