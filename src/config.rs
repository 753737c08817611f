//! Runtime configuration from `STROKECHECK_*` environment variables.

use std::path::PathBuf;

use crate::adapters::artifact::{DEFAULT_COLUMNS_FILE, DEFAULT_MODEL_FILE};
use crate::domain::SchemaPolicy;

/// Where log output goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogMode {
    /// File when stdout is a terminal (the TUI owns it), stdout otherwise
    Auto,
    File,
    Stdout,
}

impl LogMode {
    fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "file" => Self::File,
            "stdout" => Self::Stdout,
            _ => Self::Auto,
        }
    }

    /// Resolve to "log to file?" given whether stdout is interactive.
    #[must_use]
    pub fn use_file(self, interactive: bool) -> bool {
        match self {
            Self::File => true,
            Self::Stdout => false,
            Self::Auto => interactive,
        }
    }
}

/// Application settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Directory holding the model artifacts (`STROKECHECK_MODEL_DIR`)
    pub model_dir: PathBuf,
    /// Classifier file name (`STROKECHECK_MODEL_FILE`)
    pub model_file: String,
    /// Feature schema file name (`STROKECHECK_COLUMNS_FILE`)
    pub columns_file: String,
    /// `STROKECHECK_LOG_MODE`: auto | file | stdout
    pub log_mode: LogMode,
    /// `STROKECHECK_LOG_FILE`
    pub log_file: PathBuf,
    /// `STROKECHECK_STRICT_SCHEMA=true` refuses schema drift instead of zero-filling
    pub schema_policy: SchemaPolicy,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            model_dir: PathBuf::from("models"),
            model_file: DEFAULT_MODEL_FILE.to_string(),
            columns_file: DEFAULT_COLUMNS_FILE.to_string(),
            log_mode: LogMode::Auto,
            log_file: PathBuf::from("strokecheck.log"),
            schema_policy: SchemaPolicy::ZeroFill,
        }
    }
}

fn parse_bool(value: &str) -> bool {
    matches!(value, "1" | "true" | "TRUE" | "yes" | "YES")
}

impl AppConfig {
    /// Read settings from the process environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build settings from any variable source; unset variables keep defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(dir) = lookup("STROKECHECK_MODEL_DIR") {
            config.model_dir = PathBuf::from(dir);
        }
        if let Some(file) = lookup("STROKECHECK_MODEL_FILE") {
            config.model_file = file;
        }
        if let Some(file) = lookup("STROKECHECK_COLUMNS_FILE") {
            config.columns_file = file;
        }
        if let Some(mode) = lookup("STROKECHECK_LOG_MODE") {
            config.log_mode = LogMode::parse(&mode);
        }
        if let Some(file) = lookup("STROKECHECK_LOG_FILE") {
            config.log_file = PathBuf::from(file);
        }
        if lookup("STROKECHECK_STRICT_SCHEMA").is_some_and(|v| parse_bool(&v)) {
            config.schema_policy = SchemaPolicy::Strict;
        }
        config
    }

    #[must_use]
    pub fn model_path(&self) -> PathBuf {
        self.model_dir.join(&self.model_file)
    }

    #[must_use]
    pub fn columns_path(&self) -> PathBuf {
        self.model_dir.join(&self.columns_file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> AppConfig {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]);
        assert_eq!(config.model_path(), PathBuf::from("models/stroke_model.json"));
        assert_eq!(config.columns_path(), PathBuf::from("models/model_columns.json"));
        assert_eq!(config.schema_policy, SchemaPolicy::ZeroFill);
        assert_eq!(config.log_mode, LogMode::Auto);
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("STROKECHECK_MODEL_DIR", "/opt/models"),
            ("STROKECHECK_COLUMNS_FILE", "columns.json"),
            ("STROKECHECK_LOG_MODE", "STDOUT"),
            ("STROKECHECK_STRICT_SCHEMA", "yes"),
        ]);
        assert_eq!(config.columns_path(), PathBuf::from("/opt/models/columns.json"));
        assert_eq!(config.log_mode, LogMode::Stdout);
        assert_eq!(config.schema_policy, SchemaPolicy::Strict);
    }

    #[test]
    fn test_log_mode_resolution() {
        assert!(LogMode::Auto.use_file(true));
        assert!(!LogMode::Auto.use_file(false));
        assert!(LogMode::File.use_file(false));
        assert!(!LogMode::Stdout.use_file(true));
        assert_eq!(LogMode::parse("bogus"), LogMode::Auto);
    }

    #[test]
    fn test_strict_schema_needs_truthy_value() {
        let config = config_from(&[("STROKECHECK_STRICT_SCHEMA", "no")]);
        assert_eq!(config.schema_policy, SchemaPolicy::ZeroFill);
    }
}
