use crate::converter::{Converter, DocFormat};
use crate::error::{KbConvertError, Result};
use std::io::ErrorKind;
use std::path::Path;
use std::process::Command;

/// Markdown → PDF/DOCX renderer that shells out to the `pandoc` executable.
///
/// pandoc picks the writer from the output extension, so the same invocation
/// covers both target formats.
pub struct PandocRenderer {
    format: DocFormat,
}

impl PandocRenderer {
    pub fn new(format: DocFormat) -> Self {
        Self { format }
    }

    pub fn format(&self) -> DocFormat {
        self.format
    }
}

impl Converter for PandocRenderer {
    fn name(&self) -> &str {
        match self.format {
            DocFormat::Pdf => "md2pdf",
            DocFormat::Docx => "md2docx",
        }
    }

    fn source_extension(&self) -> &str {
        "md"
    }

    fn target_extension(&self) -> &str {
        self.format.extension()
    }

    fn convert(&self, source: &Path, dest: &Path) -> Result<()> {
        let output = Command::new("pandoc")
            .arg(source)
            .arg("--standalone")
            .arg("-o")
            .arg(dest)
            .output()
            .map_err(|e| {
                if e.kind() == ErrorKind::NotFound {
                    KbConvertError::ToolMissing {
                        tool: "pandoc".to_string(),
                    }
                } else {
                    KbConvertError::Render {
                        path: source.to_path_buf(),
                        message: format!("failed to execute pandoc: {}", e),
                    }
                }
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(KbConvertError::Render {
                path: source.to_path_buf(),
                message: format!("pandoc exited with {}: {}", output.status, stderr.trim()),
            });
        }

        Ok(())
    }
}
