use crate::config::{
    DEFAULT_ARCHIVE_NAME, DEFAULT_RETRY_ATTEMPTS, DEFAULT_RETRY_DELAY_SECONDS,
    DEFAULT_TIMEOUT_SECONDS,
};
use crate::core::ConfigProvider;
use crate::utils::error::{EtlError, Result};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use std::sync::LazyLock;

static ENV_VAR_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{([^}]+)\}").expect("env var pattern is valid"));

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub pipeline: PipelineConfig,
    pub source: SourceConfig,
    #[serde(default)]
    pub extract: ExtractConfig,
    pub load: LoadConfig,
    pub monitoring: Option<MonitoringConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    pub name: String,
    pub description: Option<String>,
    pub version: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    pub endpoint: String,
    pub timeout_seconds: Option<u64>,
    pub retry_attempts: Option<u32>,
    pub retry_delay_seconds: Option<u64>,
    pub headers: Option<HashMap<String, String>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExtractConfig {
    /// Replaces the built-in relevance keywords when present.
    pub keywords: Option<Vec<String>>,
    pub max_records: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoadConfig {
    pub output_path: String,
    #[serde(default = "default_output_formats")]
    pub output_formats: Vec<String>,
    pub compression: Option<CompressionConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompressionConfig {
    pub enabled: bool,
    pub filename: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitoringConfig {
    pub enabled: bool,
    pub json_logs: Option<bool>,
}

fn default_output_formats() -> Vec<String> {
    vec!["csv".to_string()]
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(EtlError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| EtlError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${CATALOGUE_URL})，未設定的保留原文
    fn substitute_env_vars(content: &str) -> String {
        ENV_VAR_PATTERN
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }

    pub fn monitoring_enabled(&self) -> bool {
        self.monitoring.as_ref().map(|m| m.enabled).unwrap_or(false)
    }

    pub fn json_logs(&self) -> bool {
        self.monitoring
            .as_ref()
            .and_then(|m| m.json_logs)
            .unwrap_or(false)
    }
}

impl ConfigProvider for TomlConfig {
    fn api_endpoint(&self) -> &str {
        &self.source.endpoint
    }

    fn output_path(&self) -> &str {
        &self.load.output_path
    }

    fn output_formats(&self) -> &[String] {
        &self.load.output_formats
    }

    fn timeout_seconds(&self) -> u64 {
        self.source.timeout_seconds.unwrap_or(DEFAULT_TIMEOUT_SECONDS)
    }

    fn retry_attempts(&self) -> u32 {
        self.source.retry_attempts.unwrap_or(DEFAULT_RETRY_ATTEMPTS)
    }

    fn retry_delay_seconds(&self) -> u64 {
        self.source
            .retry_delay_seconds
            .unwrap_or(DEFAULT_RETRY_DELAY_SECONDS)
    }

    fn compression_filename(&self) -> Option<&str> {
        self.load
            .compression
            .as_ref()
            .filter(|c| c.enabled)
            .map(|c| c.filename.as_deref().unwrap_or(DEFAULT_ARCHIVE_NAME))
    }

    fn headers(&self) -> Option<&HashMap<String, String>> {
        self.source.headers.as_ref()
    }

    fn keywords(&self) -> Option<&[String]> {
        self.extract.keywords.as_deref()
    }

    fn max_records(&self) -> Option<usize> {
        self.extract.max_records
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_url("source.endpoint", &self.source.endpoint)?;
        validation::validate_path("load.output_path", &self.load.output_path)?;
        validation::validate_output_formats("load.output_formats", &self.load.output_formats)?;
        validation::validate_positive_number("source.timeout_seconds", self.timeout_seconds(), 1)?;

        if let Some(max_records) = self.extract.max_records {
            validation::validate_positive_number("extract.max_records", max_records as u64, 1)?;
        }

        if let Some(keywords) = &self.extract.keywords {
            if keywords.is_empty() {
                return Err(EtlError::MissingConfigError {
                    field: "extract.keywords".to_string(),
                });
            }
            for keyword in keywords {
                validation::validate_non_empty_string("extract.keywords", keyword)?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const BASIC: &str = r#"
[pipeline]
name = "tcas-tuition"

[source]
endpoint = "https://example.com/courses.json"

[load]
output_path = "./output"
"#;

    #[test]
    fn test_parse_basic_toml_config() {
        let config = TomlConfig::from_toml_str(BASIC).unwrap();

        assert_eq!(config.pipeline.name, "tcas-tuition");
        assert_eq!(config.api_endpoint(), "https://example.com/courses.json");
        assert_eq!(config.output_formats(), &["csv".to_string()]);
        assert_eq!(config.timeout_seconds(), DEFAULT_TIMEOUT_SECONDS);
        assert_eq!(config.retry_attempts(), DEFAULT_RETRY_ATTEMPTS);
        assert!(config.keywords().is_none());
        assert!(config.compression_filename().is_none());
        assert!(!config.monitoring_enabled());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_full_toml_config() {
        let toml_content = r#"
[pipeline]
name = "tcas-tuition"
description = "Computer engineering and AI fees"
version = "68"

[source]
endpoint = "https://example.com/courses.json"
timeout_seconds = 10
retry_attempts = 5
retry_delay_seconds = 1

[source.headers]
User-Agent = "tuition-etl"

[extract]
keywords = ["วิศวกรรมคอม", "Data Science"]
max_records = 500

[load]
output_path = "./output"
output_formats = ["csv", "json"]

[load.compression]
enabled = true

[monitoring]
enabled = true
json_logs = true
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.timeout_seconds(), 10);
        assert_eq!(config.retry_attempts(), 5);
        assert_eq!(config.retry_delay_seconds(), 1);
        assert_eq!(
            config.headers().unwrap().get("User-Agent").unwrap(),
            "tuition-etl"
        );
        assert_eq!(config.keywords().unwrap().len(), 2);
        assert_eq!(config.max_records(), Some(500));
        assert_eq!(config.compression_filename(), Some(DEFAULT_ARCHIVE_NAME));
        assert!(config.monitoring_enabled());
        assert!(config.json_logs());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("TUITION_TEST_ENDPOINT", "https://test.api.com/courses.json");

        let toml_content = r#"
[pipeline]
name = "test"

[source]
endpoint = "${TUITION_TEST_ENDPOINT}"

[load]
output_path = "./output"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.source.endpoint, "https://test.api.com/courses.json");

        std::env::remove_var("TUITION_TEST_ENDPOINT");
    }

    #[test]
    fn test_config_validation() {
        let invalid_url = BASIC.replace("https://example.com/courses.json", "invalid-url");
        let config = TomlConfig::from_toml_str(&invalid_url).unwrap();
        assert!(config.validate().is_err());

        let bad_format = format!("{}output_formats = [\"xlsx\"]\n", BASIC);
        let config = TomlConfig::from_toml_str(&bad_format).unwrap();
        assert!(config.validate().is_err());

        let empty_keywords = format!("{}\n[extract]\nkeywords = []\n", BASIC);
        let config = TomlConfig::from_toml_str(&empty_keywords).unwrap();
        assert!(matches!(
            config.validate(),
            Err(EtlError::MissingConfigError { .. })
        ));
    }

    #[test]
    fn test_malformed_toml_is_config_error() {
        let err = TomlConfig::from_toml_str("[pipeline\nname = ").unwrap_err();
        assert!(matches!(err, EtlError::ConfigValidationError { .. }));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(BASIC.as_bytes()).unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.pipeline.name, "tcas-tuition");
    }
}
