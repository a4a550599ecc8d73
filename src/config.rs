use crate::error::{KbConvertError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub roots: RootsConfig,
    pub filters: FilterConfig,
    pub conversion: ConversionConfig,
}

/// Default directories processed when neither -f nor -d is given.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RootsConfig {
    pub knowledge_base: PathBuf,
    pub exercises: PathBuf,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct FilterConfig {
    pub max_file_size: u64,
    pub exclude_dirs: Vec<String>,
    pub max_depth: usize,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct ConversionConfig {
    /// Fallback fence tag when code-block language detection is inconclusive.
    pub default_code_language: Option<String>,
    pub output_format: Option<String>,
}

impl Default for RootsConfig {
    fn default() -> Self {
        Self {
            knowledge_base: PathBuf::from("base_de_conocimiento"),
            exercises: PathBuf::from("enunciados_sinteticos"),
        }
    }
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            max_file_size: 50 * 1024 * 1024, // 50MB
            exclude_dirs: vec![
                ".git".to_string(),
                "node_modules".to_string(),
                "target".to_string(),
                ".venv".to_string(),
                "venv".to_string(),
                "__pycache__".to_string(),
            ],
            max_depth: 10,
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(KbConvertError::Config {
                message: format!("Configuration file not found: {}", path.display()),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| KbConvertError::Config {
            message: format!("Failed to read config file {}: {}", path.display(), e),
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| KbConvertError::Config {
            message: format!("Failed to parse config file {}: {}", path.display(), e),
        })?;

        Ok(config)
    }

    pub fn load_with_defaults<P: AsRef<Path>>(config_path: Option<P>) -> Result<Self> {
        match config_path {
            Some(path) => Self::load_from_file(path),
            None => {
                let default_paths = ["kbconvert.toml", ".kbconvert.toml"];

                for default_path in &default_paths {
                    if Path::new(default_path).exists() {
                        return Self::load_from_file(default_path);
                    }
                }

                Ok(Self::default())
            }
        }
    }

    pub fn merge_with_cli_args(&mut self, overrides: &CliOverrides) {
        if let Some(max_size) = overrides.max_file_size {
            self.filters.max_file_size = max_size;
        }

        if let Some(ref exclude) = overrides.exclude {
            self.filters.exclude_dirs.extend(exclude.clone());
        }

        if let Some(ref lang) = overrides.default_code_language {
            self.conversion.default_code_language = Some(lang.clone());
        }

        if let Some(ref format) = overrides.output_format {
            self.conversion.output_format = Some(format.clone());
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.filters.max_file_size == 0 {
            return Err(KbConvertError::Config {
                message: "Maximum file size must be greater than 0".to_string(),
            });
        }

        if self.filters.max_depth == 0 {
            return Err(KbConvertError::Config {
                message: "Maximum directory depth must be greater than 0".to_string(),
            });
        }

        if let Some(ref format) = self.conversion.output_format {
            if !matches!(format.as_str(), "pdf" | "docx") {
                return Err(KbConvertError::Config {
                    message: format!("Unsupported output format: {} (use pdf or docx)", format),
                });
            }
        }

        Ok(())
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let content = toml::to_string_pretty(self).map_err(|e| KbConvertError::Config {
            message: format!("Failed to serialize config: {}", e),
        })?;

        std::fs::write(path, content).map_err(|e| KbConvertError::Config {
            message: format!("Failed to write config file {}: {}", path.display(), e),
        })?;

        Ok(())
    }

    pub fn create_sample_config() -> String {
        let sample_config = Self::default();
        toml::to_string_pretty(&sample_config).unwrap_or_else(|_| String::new())
    }
}

#[derive(Debug, Default)]
pub struct CliOverrides {
    pub max_file_size: Option<u64>,
    pub exclude: Option<Vec<String>>,
    pub default_code_language: Option<String>,
    pub output_format: Option<String>,
}

impl CliOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_file_size(mut self, max_size: Option<u64>) -> Self {
        self.max_file_size = max_size;
        self
    }

    pub fn with_exclude(mut self, exclude: Option<Vec<String>>) -> Self {
        self.exclude = exclude;
        self
    }

    pub fn with_default_code_language(mut self, lang: Option<String>) -> Self {
        self.default_code_language = lang;
        self
    }

    pub fn with_output_format(mut self, format: Option<String>) -> Self {
        self.output_format = format;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(
            config.roots.knowledge_base,
            PathBuf::from("base_de_conocimiento")
        );
        assert!(config.filters.exclude_dirs.contains(&".git".to_string()));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        let mut config = Config::default();
        assert!(config.validate().is_ok());

        config.filters.max_file_size = 0;
        assert!(config.validate().is_err());

        config.filters.max_file_size = 1024;
        config.conversion.output_format = Some("odt".to_string());
        assert!(config.validate().is_err());

        config.conversion.output_format = Some("docx".to_string());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_file_operations() {
        let config = Config::default();
        let temp_file = NamedTempFile::new().unwrap();

        config.save_to_file(temp_file.path()).unwrap();

        let loaded_config = Config::load_from_file(temp_file.path()).unwrap();
        assert_eq!(config.filters.max_depth, loaded_config.filters.max_depth);
        assert_eq!(config.roots.exercises, loaded_config.roots.exercises);
    }

    #[test]
    fn test_missing_config_file() {
        let result = Config::load_from_file("/nonexistent/kbconvert.toml");
        assert!(result.is_err());
    }

    #[test]
    fn test_malformed_config_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(temp_file, "[roots").unwrap();

        let result = Config::load_from_file(temp_file.path());
        assert!(matches!(result, Err(KbConvertError::Config { .. })));
    }

    #[test]
    fn test_cli_overrides() {
        let mut config = Config::default();

        let overrides = CliOverrides::new()
            .with_default_code_language(Some("java".to_string()))
            .with_exclude(Some(vec!["drafts".to_string()]));

        config.merge_with_cli_args(&overrides);

        assert_eq!(
            config.conversion.default_code_language.as_deref(),
            Some("java")
        );
        assert!(config.filters.exclude_dirs.contains(&"drafts".to_string()));
    }

    #[test]
    fn test_sample_config_generation() {
        let sample = Config::create_sample_config();
        assert!(sample.contains("[roots]"));
        assert!(sample.contains("[filters]"));
        assert!(sample.contains("knowledge_base"));
    }
}
