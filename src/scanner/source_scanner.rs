use crate::config::FilterConfig;
use crate::error::{KbConvertError, Result};
use crate::scanner::file_filter::FileFilter;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// A single eligible source file found during discovery.
#[derive(Debug, Clone)]
pub struct SourceFile {
    pub source_path: PathBuf,
    pub relative_path: PathBuf,
    pub filename: String,
    pub size: u64,
}

impl SourceFile {
    pub fn new(source_path: PathBuf, relative_path: PathBuf, size: u64) -> Self {
        let filename = source_path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("")
            .to_string();

        Self {
            source_path,
            relative_path,
            filename,
            size,
        }
    }

    pub fn display_path(&self) -> String {
        self.relative_path.display().to_string()
    }
}

/// Recursive discovery of conversion sources under a root directory.
pub struct SourceScanner {
    filter: FileFilter,
    max_depth: usize,
}

impl SourceScanner {
    pub fn new(source_extension: &str, config: &FilterConfig) -> Self {
        Self {
            filter: FileFilter::new(source_extension, config),
            max_depth: config.max_depth,
        }
    }

    /// Enumerate every eligible file under `root`.
    ///
    /// An empty result is not an error: an empty directory is a valid batch
    /// of zero jobs. Traversal order is not guaranteed by the filesystem, so
    /// results are sorted by relative path for stable operator output.
    pub fn scan_directory<P: AsRef<Path>>(&self, root: P) -> Result<Vec<SourceFile>> {
        let root_path = root.as_ref();

        if !root_path.exists() {
            return Err(KbConvertError::TargetNotFound {
                path: root_path.to_path_buf(),
            });
        }

        if !root_path.is_dir() {
            return Err(KbConvertError::NotADirectory {
                path: root_path.to_path_buf(),
            });
        }

        let mut sources = Vec::new();

        let walker = WalkDir::new(root_path)
            .max_depth(self.max_depth)
            .follow_links(false)
            .into_iter()
            .filter_entry(|e| self.should_traverse(e));

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                // Unreadable subtrees are skipped, not fatal
                Err(_) => continue,
            };

            if !entry.file_type().is_file() {
                continue;
            }

            if let Some(source) = self.process_file(&entry, root_path)? {
                sources.push(source);
            }
        }

        sources.sort_by(|a, b| a.relative_path.cmp(&b.relative_path));

        Ok(sources)
    }

    /// Validate a single explicit file target and wrap it as a one-element batch.
    pub fn scan_single_file<P: AsRef<Path>>(&self, path: P) -> Result<Vec<SourceFile>> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(KbConvertError::TargetNotFound {
                path: path.to_path_buf(),
            });
        }

        if !self.filter.is_source_file(path) {
            return Err(KbConvertError::WrongExtension {
                path: path.to_path_buf(),
                expected: self.filter.source_extension().to_string(),
            });
        }

        let size = std::fs::metadata(path)?.len();
        let relative_path = path
            .file_name()
            .map(PathBuf::from)
            .unwrap_or_else(|| path.to_path_buf());

        Ok(vec![SourceFile::new(path.to_path_buf(), relative_path, size)])
    }

    fn should_traverse(&self, entry: &DirEntry) -> bool {
        if entry.depth() > self.max_depth {
            return false;
        }

        if entry.file_type().is_file() || entry.depth() == 0 {
            return true;
        }

        if entry.file_type().is_dir() {
            return self.filter.should_traverse_directory(entry.path());
        }

        true
    }

    fn process_file(&self, entry: &DirEntry, root_path: &Path) -> Result<Option<SourceFile>> {
        let path = entry.path();

        if !self.filter.is_source_file(path) {
            return Ok(None);
        }

        let metadata = entry.metadata().map_err(|e| KbConvertError::InvalidPath {
            path: format!("{}: {}", path.display(), e),
        })?;

        if !self.filter.is_size_allowed(metadata.len()) {
            return Ok(None);
        }

        let relative_path =
            path.strip_prefix(root_path)
                .map_err(|_| KbConvertError::InvalidPath {
                    path: path.display().to_string(),
                })?;

        Ok(Some(SourceFile::new(
            path.to_path_buf(),
            relative_path.to_path_buf(),
            metadata.len(),
        )))
    }

    pub fn get_statistics(&self, sources: &[SourceFile]) -> ScanStatistics {
        ScanStatistics {
            total_files: sources.len(),
            total_size: sources.iter().map(|s| s.size).sum(),
        }
    }
}

#[derive(Debug, Default)]
pub struct ScanStatistics {
    pub total_files: usize,
    pub total_size: u64,
}

impl ScanStatistics {
    pub fn display_summary(&self) -> String {
        format!(
            "Scan results: {} files, {} bytes total",
            self.total_files, self.total_size
        )
    }
}
