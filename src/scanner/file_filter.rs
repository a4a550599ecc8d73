use crate::config::FilterConfig;
use std::path::Path;

/// Decides which files and directories take part in a batch run.
///
/// Eligibility is a single case-insensitive extension match: the scanner is
/// constructed for one converter direction at a time, so there is exactly one
/// source extension to look for.
pub struct FileFilter {
    source_extension: String,
    max_file_size: u64,
    exclude_dirs: Vec<String>,
}

impl FileFilter {
    pub fn new(source_extension: &str, config: &FilterConfig) -> Self {
        Self {
            source_extension: source_extension.trim_start_matches('.').to_lowercase(),
            max_file_size: config.max_file_size,
            exclude_dirs: config.exclude_dirs.clone(),
        }
    }

    pub fn is_source_file(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|s| s.to_str())
            .map(|ext| ext.to_lowercase() == self.source_extension)
            .unwrap_or(false)
    }

    pub fn should_traverse_directory(&self, path: &Path) -> bool {
        if let Some(dir_name) = path.file_name().and_then(|s| s.to_str()) {
            let dir_name_lower = dir_name.to_lowercase();

            if self
                .exclude_dirs
                .iter()
                .any(|exclude| exclude.to_lowercase() == dir_name_lower)
            {
                return false;
            }

            // Skip hidden directories
            if dir_name.starts_with('.') && dir_name != "." && dir_name != ".." {
                return false;
            }
        }

        true
    }

    pub fn is_size_allowed(&self, size: u64) -> bool {
        size <= self.max_file_size
    }

    pub fn source_extension(&self) -> &str {
        &self.source_extension
    }
}
