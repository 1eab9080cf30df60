//! SK-006: `sake.yaml` loading and validation.
//!
//! The file is optional; a missing file means defaults. Validation checks:
//! - script is a bare file name (it lives directly in the working directory)
//! - toolchain program and link prefix are non-empty
//! - library name is non-empty
//! - at least one place to look for the library

use super::types::*;
use std::path::{Path, PathBuf};

/// Validation error.
#[derive(Debug, Clone)]
pub struct ValidationError {
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

/// Parse a sake.yaml file from disk.
pub fn parse_config_file(path: &Path) -> Result<SakeConfig, String> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("failed to read {}: {}", path.display(), e))?;
    parse_config(&content)
}

/// Parse a sake.yaml from a string.
pub fn parse_config(yaml: &str) -> Result<SakeConfig, String> {
    if yaml.trim().is_empty() {
        return Ok(SakeConfig::default());
    }
    serde_yaml_ng::from_str(yaml).map_err(|e| format!("YAML parse error: {}", e))
}

/// Validate a parsed config. Returns a list of errors (empty = valid).
pub fn validate_config(config: &SakeConfig) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    let mut fail = |message: String| errors.push(ValidationError { message });

    if config.script.is_empty() {
        fail("script must not be empty".to_string());
    } else if Path::new(&config.script).components().count() != 1 {
        fail(format!(
            "script must be a file name in the working directory, got \"{}\"",
            config.script
        ));
    }

    if config.toolchain.program.is_empty() {
        fail("toolchain.program must not be empty".to_string());
    }
    if config.toolchain.link_flag_prefix.is_empty() {
        fail("toolchain.link_flag_prefix must not be empty".to_string());
    }
    if config.toolchain.search_path_flags.iter().any(|f| f.is_empty()) {
        fail("toolchain.search_path_flags must not contain empty flags".to_string());
    }

    if config.library.name.is_empty() {
        fail("library.name must not be empty".to_string());
    }
    if config.library.candidates.is_empty() && config.library.override_dir.is_none() {
        fail("library.candidates is empty and no override_dir is set".to_string());
    }

    errors
}

/// Load the configuration for a working directory and apply the
/// environment override. Validation errors are folded into one message.
pub fn load_config(working_dir: &Path) -> Result<SakeConfig, String> {
    let path = working_dir.join(CONFIG_FILE_NAME);
    let config = if path.is_file() {
        tracing::debug!(path = %path.display(), "loading config");
        parse_config_file(&path)?
    } else {
        SakeConfig::default()
    };
    let env_dir = std::env::var_os(LIBRARIES_PATH_ENV).map(PathBuf::from);
    let config = apply_env_override(config, env_dir);

    let errors = validate_config(&config);
    if errors.is_empty() {
        return Ok(config);
    }
    let messages: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
    Err(format!("invalid {}: {}", path.display(), messages.join("; ")))
}

/// The environment-supplied libraries path takes precedence over the file.
pub fn apply_env_override(mut config: SakeConfig, env_dir: Option<PathBuf>) -> SakeConfig {
    if let Some(dir) = env_dir.filter(|d| !d.as_os_str().is_empty()) {
        config.library.override_dir = Some(dir);
    }
    config
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sk006_parse_full() {
        let yaml = r#"
script: Tasks.swift
toolchain:
  program: /usr/bin/swiftc
  search_path_flags: ["-L"]
library:
  name: TaskKit
  candidates: [build/out]
  override_dir: /opt/taskkit
"#;
        let config = parse_config(yaml).unwrap();
        assert_eq!(config.script, "Tasks.swift");
        assert_eq!(config.toolchain.program, "/usr/bin/swiftc");
        assert_eq!(config.toolchain.search_path_flags, vec!["-L"]);
        assert_eq!(config.toolchain.link_flag_prefix, "-l");
        assert_eq!(config.library.name, "TaskKit");
        assert_eq!(config.library.candidates, vec![PathBuf::from("build/out")]);
        assert_eq!(config.library.override_dir, Some(PathBuf::from("/opt/taskkit")));
        assert!(validate_config(&config).is_empty());
    }

    #[test]
    fn test_sk006_empty_is_default() {
        assert_eq!(parse_config("").unwrap(), SakeConfig::default());
        assert_eq!(parse_config("\n  \n").unwrap(), SakeConfig::default());
    }

    #[test]
    fn test_sk006_parse_error() {
        let err = parse_config("script: [unclosed").unwrap_err();
        assert!(err.contains("YAML parse error"));
    }

    #[test]
    fn test_sk006_validate_script_must_be_bare_name() {
        let config = SakeConfig {
            script: "tasks/Sakefile.swift".to_string(),
            ..SakeConfig::default()
        };
        let errors = validate_config(&config);
        assert_eq!(errors.len(), 1);
        assert!(errors[0].message.contains("file name"));
    }

    #[test]
    fn test_sk006_validate_collects_all() {
        let mut config = SakeConfig::default();
        config.script.clear();
        config.toolchain.program.clear();
        config.library.name.clear();
        config.library.candidates.clear();
        let errors = validate_config(&config);
        assert_eq!(errors.len(), 4);
    }

    #[test]
    fn test_sk006_validate_override_alone_is_enough() {
        let mut config = SakeConfig::default();
        config.library.candidates.clear();
        config.library.override_dir = Some(PathBuf::from("/opt/lib"));
        assert!(validate_config(&config).is_empty());
    }

    #[test]
    fn test_sk006_env_override() {
        let config = apply_env_override(SakeConfig::default(), Some(PathBuf::from("/env/lib")));
        assert_eq!(config.library.override_dir, Some(PathBuf::from("/env/lib")));

        let mut from_file = SakeConfig::default();
        from_file.library.override_dir = Some(PathBuf::from("/file/lib"));
        let kept = apply_env_override(from_file.clone(), None);
        assert_eq!(kept, from_file);
        let kept = apply_env_override(from_file.clone(), Some(PathBuf::new()));
        assert_eq!(kept, from_file);
    }

    #[test]
    fn test_sk006_load_missing_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_config(dir.path()).unwrap();
        assert_eq!(config.script, "Sakefile.swift");
    }

    #[test]
    fn test_sk006_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("sake.yaml"), "script: Build.swift\n").unwrap();
        let config = load_config(dir.path()).unwrap();
        assert_eq!(config.script, "Build.swift");
    }

    #[test]
    fn test_sk006_load_invalid_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("sake.yaml"), "script: \"\"\n").unwrap();
        let err = load_config(dir.path()).unwrap_err();
        assert!(err.contains("sake.yaml"));
        assert!(err.contains("script must not be empty"));
    }
}
