//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::LedgerConfig;
use super::secret::secret_string;
use crate::domain::errors::LedgerError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into LedgerConfig
/// 4. Applies environment variable overrides (SALESLEDGER_* prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns [`LedgerError::Configuration`] if the file is missing or
/// unreadable, a referenced variable is unset, parsing fails, or validation
/// fails.
///
/// # Examples
///
/// ```no_run
/// use salesledger::config::loader::load_config;
///
/// let config = load_config("salesledger.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<LedgerConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(LedgerError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        LedgerError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    let contents = substitute_env_vars(&contents)?;

    let mut config: LedgerConfig = toml::from_str(&contents)
        .map_err(|e| LedgerError::Configuration(format!("Failed to parse TOML: {e}")))?;

    apply_env_overrides(&mut config);

    config.validate().map_err(|e| {
        LedgerError::Configuration(format!("Configuration validation failed: {e}"))
    })?;

    Ok(config)
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// Comment lines are left untouched. Every missing variable is reported.
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
        .map_err(|e| LedgerError::Other(format!("Invalid substitution pattern: {e}")))?;
    let mut lines = Vec::new();
    let mut missing_vars: Vec<String> = Vec::new();

    for line in input.lines() {
        if line.trim_start().starts_with('#') {
            lines.push(line.to_string());
            continue;
        }

        let mut processed_line = line.to_string();
        for cap in re.captures_iter(line) {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    processed_line = processed_line.replace(&format!("${{{var_name}}}"), &value);
                }
                Err(_) => {
                    if !missing_vars.iter().any(|v| v == var_name) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        lines.push(processed_line);
    }

    if !missing_vars.is_empty() {
        return Err(LedgerError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(lines.join("\n"))
}

/// Applies environment variable overrides using the SALESLEDGER_* prefix
///
/// Variables follow the pattern SALESLEDGER_<SECTION>_<KEY>, for example
/// SALESLEDGER_API_TOKEN or SALESLEDGER_REPORT_TIMEZONE. Unparseable numeric
/// values are ignored and leave the file value in place.
fn apply_env_overrides(config: &mut LedgerConfig) {
    if let Ok(val) = std::env::var("SALESLEDGER_APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }

    if let Ok(val) = std::env::var("SALESLEDGER_API_DOMAIN_PREFIX") {
        config.api.domain_prefix = val;
    }
    if let Ok(val) = std::env::var("SALESLEDGER_API_TOKEN") {
        config.api.token = secret_string(val);
    }
    if let Ok(val) = std::env::var("SALESLEDGER_API_BASE_URL") {
        config.api.base_url = Some(val);
    }
    if let Ok(val) = std::env::var("SALESLEDGER_API_PAGE_SIZE") {
        if let Ok(size) = val.parse() {
            config.api.page_size = size;
        }
    }
    if let Ok(val) = std::env::var("SALESLEDGER_API_TIMEOUT_SECONDS") {
        if let Ok(secs) = val.parse() {
            config.api.timeout_seconds = secs;
        }
    }
    if let Ok(val) = std::env::var("SALESLEDGER_API_TLS_VERIFY") {
        config.api.tls_verify = val.parse().unwrap_or(true);
    }

    if let Ok(val) = std::env::var("SALESLEDGER_REPORT_TIMEZONE") {
        config.report.timezone = val;
    }
    if let Ok(val) = std::env::var("SALESLEDGER_REPORT_OUTPUT_DIR") {
        config.report.output_dir = val;
    }
    if let Ok(val) = std::env::var("SALESLEDGER_REPORT_MAX_CONCURRENCY") {
        if let Ok(concurrency) = val.parse() {
            config.report.max_concurrency = concurrency;
        }
    }

    if let Ok(val) = std::env::var("SALESLEDGER_LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled = val.parse().unwrap_or(false);
    }
    if let Ok(val) = std::env::var("SALESLEDGER_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_substitute_env_vars() {
        std::env::set_var("SALESLEDGER_LOADER_TEST_VAR", "test_value");
        let input = "token = \"${SALESLEDGER_LOADER_TEST_VAR}\"";
        let result = substitute_env_vars(input).unwrap();
        assert_eq!(result, "token = \"test_value\"");
        std::env::remove_var("SALESLEDGER_LOADER_TEST_VAR");
    }

    #[test]
    fn test_substitute_env_vars_missing() {
        std::env::remove_var("SALESLEDGER_LOADER_MISSING_VAR");
        let input = "token = \"${SALESLEDGER_LOADER_MISSING_VAR}\"";
        let err = substitute_env_vars(input).unwrap_err();
        assert!(err.to_string().contains("SALESLEDGER_LOADER_MISSING_VAR"));
    }

    #[test]
    fn test_substitute_env_vars_skips_comments() {
        std::env::remove_var("SALESLEDGER_LOADER_COMMENTED_VAR");
        let input = "# token = \"${SALESLEDGER_LOADER_COMMENTED_VAR}\"\nkey = 1";
        let result = substitute_env_vars(input).unwrap();
        assert!(result.contains("${SALESLEDGER_LOADER_COMMENTED_VAR}"));
    }

    #[test]
    fn test_load_config_missing_file() {
        let result = load_config("nonexistent.toml");
        assert!(matches!(result, Err(LedgerError::Configuration(_))));
    }

    #[test]
    fn test_load_config_valid() {
        let toml_content = r#"
[application]
log_level = "debug"

[api]
domain_prefix = "loaderstore"
token = "secret-token"

[report]
timezone = "Pacific/Auckland"
"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(toml_content.as_bytes()).unwrap();
        temp_file.flush().unwrap();

        let config = load_config(temp_file.path()).unwrap();
        assert_eq!(config.application.log_level, "debug");
        assert_eq!(config.api.domain_prefix, "loaderstore");
        assert_eq!(config.api.token.expose_secret(), "secret-token");
        assert_eq!(config.api.page_size, 10_000);
        assert_eq!(config.report.timezone, "Pacific/Auckland");
        assert_eq!(config.report.output_dir, ".");
    }

    #[test]
    fn test_load_config_invalid_timezone() {
        let toml_content = r#"
[api]
domain_prefix = "loaderstore"
token = "secret-token"

[report]
timezone = "Nowhere/Special"
"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(toml_content.as_bytes()).unwrap();
        temp_file.flush().unwrap();

        let err = load_config(temp_file.path()).unwrap_err();
        assert!(err.to_string().contains("Nowhere/Special"));
    }
}
