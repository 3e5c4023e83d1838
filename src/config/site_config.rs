use crate::core::ConfigProvider;
use crate::utils::error::{BlogError, Result};
use crate::utils::validation::{
    validate_non_empty_string, validate_path, validate_positive_number, validate_url, Validate,
};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

const DEFAULT_TIMEOUT_SECONDS: u64 = 30;
const DEFAULT_DOCUMENT_TYPE: &str = "posts";
const DEFAULT_PAGE_SIZE: usize = 2;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    pub source: SourceConfig,
    #[serde(default)]
    pub listing: ListingConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    pub endpoint: String,
    pub access_token: Option<String>,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListingConfig {
    pub document_type: Option<String>,
    pub page_size: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub output_path: String,
}

impl SiteConfig {
    /// Loads configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(BlogError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// Parses configuration, substituting `${VAR}` references from the environment.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| BlogError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| BlogError::ConfigError {
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// A token that still reads `${VAR}` was never set; treat it as absent.
    fn effective_access_token(&self) -> Option<&str> {
        self.source
            .access_token
            .as_deref()
            .filter(|token| !token.is_empty() && !token.starts_with("${"))
    }
}

impl ConfigProvider for SiteConfig {
    fn api_endpoint(&self) -> &str {
        &self.source.endpoint
    }

    fn access_token(&self) -> Option<&str> {
        self.effective_access_token()
    }

    fn timeout_seconds(&self) -> u64 {
        self.source
            .timeout_seconds
            .unwrap_or(DEFAULT_TIMEOUT_SECONDS)
    }

    fn output_path(&self) -> &str {
        &self.output.output_path
    }

    fn document_type(&self) -> &str {
        self.listing
            .document_type
            .as_deref()
            .unwrap_or(DEFAULT_DOCUMENT_TYPE)
    }

    fn page_size(&self) -> usize {
        self.listing.page_size.unwrap_or(DEFAULT_PAGE_SIZE)
    }
}

impl Validate for SiteConfig {
    fn validate(&self) -> Result<()> {
        validate_url("source.endpoint", &self.source.endpoint)?;
        validate_path("output.output_path", &self.output.output_path)?;
        validate_positive_number("listing.page_size", self.page_size(), 1)?;
        validate_non_empty_string("listing.document_type", self.document_type())?;
        if let Some(timeout) = self.source.timeout_seconds {
            validate_positive_number("source.timeout_seconds", timeout as usize, 1)?;
        }
        Ok(())
    }
}
