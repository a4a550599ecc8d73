use crate::converter::{codeblocks, Converter};
use crate::error::{KbConvertError, Result};
use std::fs;
use std::path::Path;

/// PDF → Markdown converter backed by the `pdf-extract` crate.
///
/// Layout analysis is entirely the extraction library's problem; this type
/// only shapes the extracted text into Markdown (title heading, code-block
/// fencing, whitespace cleanup).
pub struct PdfToMarkdown {
    default_code_language: Option<String>,
}

impl PdfToMarkdown {
    pub fn new() -> Self {
        Self {
            default_code_language: None,
        }
    }

    pub fn with_default_code_language(mut self, lang: Option<String>) -> Self {
        self.default_code_language = lang;
        self
    }

    fn build_markdown(&self, source: &Path, text: &str) -> String {
        let title = source
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("documento");

        let body = codeblocks::format_code_blocks(text, self.default_code_language.as_deref());

        codeblocks::clean_markdown(&format!("# {}\n\n{}", title, body))
    }
}

impl Default for PdfToMarkdown {
    fn default() -> Self {
        Self::new()
    }
}

impl Converter for PdfToMarkdown {
    fn name(&self) -> &str {
        "pdf2md"
    }

    fn source_extension(&self) -> &str {
        "pdf"
    }

    fn target_extension(&self) -> &str {
        "md"
    }

    fn convert(&self, source: &Path, dest: &Path) -> Result<()> {
        let text =
            pdf_extract::extract_text(source).map_err(|e| KbConvertError::Extraction {
                path: source.to_path_buf(),
                message: e.to_string(),
            })?;

        let markdown = self.build_markdown(source, &text);

        fs::write(dest, markdown)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_markdown_has_title_heading() {
        let converter = PdfToMarkdown::new();
        let markdown =
            converter.build_markdown(Path::new("temas/guia_docente.pdf"), "Contenido del curso.");

        assert!(markdown.starts_with("# guia_docente\n"));
        assert!(markdown.contains("Contenido del curso."));
        assert!(markdown.ends_with('\n'));
    }

    #[test]
    fn test_markdown_is_nonempty_for_empty_extraction() {
        let converter = PdfToMarkdown::new();
        let markdown = converter.build_markdown(Path::new("vacio.pdf"), "");

        assert!(markdown.starts_with("# vacio"));
        assert!(!markdown.trim().is_empty());
    }

    #[test]
    fn test_code_listing_gets_fenced() {
        let converter = PdfToMarkdown::new();
        let text = "Ejemplo de clase:\n\npublic class Hola {\n    public static void main(String[] args) {\n        System.out.println(\"hola\");\n    }\n}";
        let markdown = converter.build_markdown(Path::new("tema3.pdf"), text);

        assert!(markdown.contains("```java"));
    }

    #[test]
    fn test_default_language_hint_applied() {
        let converter =
            PdfToMarkdown::new().with_default_code_language(Some("java".to_string()));
        let text = "x = compute(1)\ny = combine(x)";
        let markdown = converter.build_markdown(Path::new("notas.pdf"), text);

        assert!(markdown.contains("```java"));
    }

    #[test]
    fn test_extraction_failure_on_garbage_input() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let source = temp_dir.path().join("corrupt.pdf");
        let dest = temp_dir.path().join("corrupt.md");
        std::fs::write(&source, b"this is not a pdf at all").unwrap();

        let converter = PdfToMarkdown::new();
        let result = converter.convert(&source, &dest);

        assert!(matches!(result, Err(KbConvertError::Extraction { .. })));
        assert!(!dest.exists());
    }

    #[test]
    fn test_converter_metadata() {
        let converter = PdfToMarkdown::new();
        assert_eq!(converter.source_extension(), "pdf");
        assert_eq!(converter.target_extension(), "md");
        assert_eq!(
            PathBuf::from("a.pdf").with_extension(converter.target_extension()),
            PathBuf::from("a.md")
        );
    }
}
