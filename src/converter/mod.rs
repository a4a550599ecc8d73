pub mod codeblocks;
pub mod pandoc;
pub mod pdf_to_markdown;

pub use pandoc::PandocRenderer;
pub use pdf_to_markdown::PdfToMarkdown;

use crate::error::Result;
use std::path::Path;

/// Target format for the Markdown rendering direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocFormat {
    Pdf,
    Docx,
}

impl DocFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            DocFormat::Pdf => "pdf",
            DocFormat::Docx => "docx",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "pdf" => Some(DocFormat::Pdf),
            "docx" => Some(DocFormat::Docx),
            _ => None,
        }
    }
}

impl std::fmt::Display for DocFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.extension())
    }
}

/// Narrow capability interface over an external conversion engine.
///
/// The batch driver only depends on this trait; swapping one engine for
/// another (a different extraction library, a different renderer) must not
/// change the driver.
pub trait Converter {
    fn name(&self) -> &str;

    fn source_extension(&self) -> &str;

    fn target_extension(&self) -> &str;

    /// Produce the output artifact at `dest`, overwriting any existing file.
    fn convert(&self, source: &Path, dest: &Path) -> Result<()>;
}
