use crate::models::PortalConfig;
use std::fs;
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};

/// Environment variable naming the session store key
pub const ENV_STORAGE_KEY: &str = "PORTAL_DB_KEY";
/// Environment variable holding the privileged faculty secret
pub const ENV_FACULTY_SECRET: &str = "PORTAL_FACULTY_PASS";
/// Environment variable holding the token signing secret
pub const ENV_JWT_SECRET: &str = "JWT_SECRET";

/// Load configuration from a YAML file
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Arc<PortalConfig>, String> {
    let path = path.as_ref();
    info!("Loading configuration from: {}", path.display());

    // Read the file
    let contents = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read config file '{}': {}", path.display(), e))?;

    let config = parse_config(&contents, |name| std::env::var(name).ok())?;

    info!(
        "Configuration loaded: storage key '{}', {} course(s), faculty login {}",
        config.storage_key,
        config.grade_scheme.len(),
        if config.faculty_secret().is_some() {
            "enabled"
        } else {
            "disabled"
        }
    );

    Ok(Arc::new(config))
}

/// Load configuration with fallback options
pub fn load_config_with_fallback() -> Result<Arc<PortalConfig>, String> {
    // Try loading from environment variable first
    if let Ok(config_path) = std::env::var("CONFIG_PATH") {
        match load_config(&config_path) {
            Ok(config) => return Ok(config),
            Err(e) => warn!(
                "Failed to load config from CONFIG_PATH ({}): {}",
                config_path, e
            ),
        }
    }

    // Try common config file locations
    let paths = vec!["config.yaml", "config.yml"];

    for path in paths {
        if Path::new(path).exists() {
            match load_config(path) {
                Ok(config) => return Ok(config),
                Err(e) => warn!("Failed to load config from '{}': {}", path, e),
            }
        }
    }

    // No file: defaults plus environment
    info!("No configuration file found, using defaults and environment");
    let mut config = PortalConfig::default();
    apply_env_overrides(&mut config, |name| std::env::var(name).ok());
    config.validate()?;
    Ok(Arc::new(config))
}

/// Parse YAML, apply environment overrides and validate
pub fn parse_config<F>(contents: &str, lookup: F) -> Result<PortalConfig, String>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config: PortalConfig = serde_yaml::from_str(contents)
        .map_err(|e| format!("Failed to parse YAML config: {}", e))?;

    apply_env_overrides(&mut config, lookup);

    // Validate the configuration
    config.validate()?;

    Ok(config)
}

/// Environment values win over file values
pub fn apply_env_overrides<F>(config: &mut PortalConfig, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(key) = lookup(ENV_STORAGE_KEY).filter(|v| !v.is_empty()) {
        config.storage_key = key;
    }

    if let Some(secret) = lookup(ENV_FACULTY_SECRET) {
        config.faculty_secret = Some(secret);
    }

    if let Some(secret) = lookup(ENV_JWT_SECRET).filter(|v| !v.is_empty()) {
        config.jwt_secret = secret;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CourseRange, StorageConfig};
    use std::collections::HashMap;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn test_load_valid_config() {
        let yaml = r#"
storage_key: "test_db"
faculty_secret: "lecturer"
response_delay_ms: 0
storage:
  type: file
  path: "/tmp/portal.json"
grade_scheme:
  - course: "Compilers"
    min: 50
    max: 90
"#;

        let config = parse_config(yaml, no_env).unwrap();
        assert_eq!(config.storage_key, "test_db");
        assert_eq!(config.faculty_secret(), Some("lecturer"));
        assert_eq!(config.response_delay_ms, 0);
        assert_eq!(
            config.storage,
            StorageConfig::File {
                path: "/tmp/portal.json".to_string()
            }
        );
        assert_eq!(config.grade_scheme, vec![CourseRange::new("Compilers", 50, 90)]);
        assert_eq!(config.student_id_length, 9);
        assert_eq!(config.min_password_length, 6);
    }

    #[test]
    fn test_empty_document_uses_defaults() {
        let config = parse_config("{}", no_env).unwrap();
        assert_eq!(config.storage_key, "college_backup_db");
        assert_eq!(config.faculty_secret(), None);
        assert_eq!(config.storage, StorageConfig::Memory);
        assert_eq!(config.grade_scheme.len(), 3);
        assert_eq!(config.response_delay_ms, 800);
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = [
            (ENV_STORAGE_KEY, "env_db"),
            (ENV_FACULTY_SECRET, "from-env"),
        ]
        .into_iter()
        .collect();

        let config = parse_config("storage_key: file_db\n", |name| {
            env.get(name).map(|v| v.to_string())
        })
        .unwrap();

        assert_eq!(config.storage_key, "env_db");
        assert_eq!(config.faculty_secret(), Some("from-env"));
    }

    #[test]
    fn test_empty_faculty_secret_is_unset() {
        let config = parse_config("faculty_secret: \"\"\n", no_env).unwrap();
        assert_eq!(config.faculty_secret(), None);
    }

    #[test]
    fn test_config_validation_bad_range() {
        let yaml = r#"
grade_scheme:
  - course: "Broken"
    min: 90
    max: 60
"#;
        let result = parse_config(yaml, no_env);
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("Broken"));
    }

    #[test]
    fn test_config_validation_empty_scheme() {
        let result = parse_config("grade_scheme: []\n", no_env);
        assert!(result.unwrap_err().contains("at least one course"));
    }

    #[test]
    fn test_config_validation_score_above_100() {
        let yaml = r#"
grade_scheme:
  - course: "Overflow"
    min: 90
    max: 120
"#;
        assert!(parse_config(yaml, no_env).is_err());
    }
}
