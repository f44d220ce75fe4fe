use std::path::{Path, PathBuf};
use log::debug;

use crate::config::types::Config;
use crate::config::validation;
use crate::utils::error::{BoxResult, BlogtagsError};
use crate::utils::fs;

/// Configuration file names to look for
const CONFIG_FILES: [&str; 4] = ["_config.yml", "_config.yaml", "_config.toml", "_config.json"];

/// Load site configuration from config files.
///
/// Files are merged in order, later keys overriding earlier ones, and the
/// result is validated before it is returned.
pub fn load_config<P: AsRef<Path>>(
    source_dir: P,
    config_files: Option<Vec<PathBuf>>
) -> BoxResult<Config> {
    let config_paths = match config_files {
        Some(paths) => paths,
        None => find_default_config_files(&source_dir),
    };

    let mut merged = serde_yaml::Value::Mapping(serde_yaml::Mapping::new());
    if config_paths.is_empty() {
        debug!("No configuration files found, using defaults");
    } else {
        for path in config_paths {
            debug!("Loading configuration from {}", path.display());
            let value = read_config_file(&path)?;
            merge_values(&mut merged, value);
        }
    }

    let mut config: Config = serde_yaml::from_value(merged)
        .map_err(|e| BlogtagsError::Config(format!("Invalid configuration: {}", e)))?;

    // Relative source paths are taken from the directory we were pointed at
    if config.source == PathBuf::from(".") {
        config.source = source_dir.as_ref().to_path_buf();
    }
    if config.destination.is_relative() {
        config.destination = config.source.join(&config.destination);
    }

    validation::validate_config(&config)?;

    debug!("Configuration loaded: {:?}", config);
    Ok(config)
}

/// Find default configuration files
fn find_default_config_files<P: AsRef<Path>>(source_dir: P) -> Vec<PathBuf> {
    CONFIG_FILES
        .iter()
        .map(|name| source_dir.as_ref().join(name))
        .filter(|path| path.exists())
        .collect()
}

/// Read one configuration file into a generic YAML value
fn read_config_file(config_path: &Path) -> BoxResult<serde_yaml::Value> {
    if !config_path.exists() {
        return Err(BlogtagsError::Config(format!(
            "Configuration file not found: {}", config_path.display()
        )).into());
    }

    let content = fs::read_file(config_path)
        .map_err(|e| BlogtagsError::Config(format!(
            "Failed to read configuration file {}: {}", config_path.display(), e
        )))?;

    let ext = config_path
        .extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .unwrap_or_else(|| "yml".to_string());

    match ext.as_str() {
        "yml" | "yaml" => parse_yaml_config(&content, config_path),
        "toml" => parse_toml_config(&content, config_path),
        "json" => parse_json_config(&content, config_path),
        other => Err(BlogtagsError::Config(format!(
            "Unsupported configuration file format: {}", other
        )).into()),
    }
}

/// Parse a YAML configuration file
fn parse_yaml_config(content: &str, path: &Path) -> BoxResult<serde_yaml::Value> {
    // An empty file is a valid, empty configuration
    if content.trim().is_empty() {
        return Ok(serde_yaml::Value::Mapping(serde_yaml::Mapping::new()));
    }

    serde_yaml::from_str(content)
        .map_err(|e| BlogtagsError::Config(format!(
            "Failed to parse YAML configuration ({}): {}", path.display(), e
        )).into())
}

/// Parse a TOML configuration file
fn parse_toml_config(content: &str, path: &Path) -> BoxResult<serde_yaml::Value> {
    let value: toml::Value = toml::from_str(content)
        .map_err(|e| BlogtagsError::Config(format!(
            "Failed to parse TOML configuration ({}): {}", path.display(), e
        )))?;
    Ok(serde_yaml::to_value(value)?)
}

/// Parse a JSON configuration file
fn parse_json_config(content: &str, path: &Path) -> BoxResult<serde_yaml::Value> {
    let value: serde_json::Value = serde_json::from_str(content)
        .map_err(|e| BlogtagsError::Config(format!(
            "Failed to parse JSON configuration ({}): {}", path.display(), e
        )))?;
    Ok(serde_yaml::to_value(value)?)
}

/// Deep-merge `source` into `target`; mappings merge key by key, anything else replaces
fn merge_values(target: &mut serde_yaml::Value, source: serde_yaml::Value) {
    match (target, source) {
        (serde_yaml::Value::Mapping(target_map), serde_yaml::Value::Mapping(source_map)) => {
            for (key, value) in source_map {
                match target_map.get_mut(&key) {
                    Some(existing) => merge_values(existing, value),
                    None => {
                        target_map.insert(key, value);
                    }
                }
            }
        }
        (target, source) => *target = source,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_load_defaults_without_config_file() {
        let dir = TempDir::new().unwrap();
        let config = load_config(dir.path(), None).unwrap();

        assert_eq!(config.source, dir.path());
        assert_eq!(config.destination, dir.path().join("_site"));
        assert_eq!(config.base_url, "");
    }

    #[test]
    fn test_later_files_override_earlier_ones() {
        let dir = TempDir::new().unwrap();
        let yml = dir.path().join("_config.yml");
        let toml = dir.path().join("_config.toml");
        std::fs::write(&yml, "title: First\nbaseurl: /a\nsocial:\n  github: me\n").unwrap();
        std::fs::write(&toml, "title = \"Second\"\n[social]\ntwitter = \"me2\"\n").unwrap();

        let config = load_config(dir.path(), Some(vec![yml, toml])).unwrap();

        assert_eq!(config.title, "Second");
        assert_eq!(config.base_url, "/a");
        let social = config.custom.get("social").unwrap();
        assert_eq!(social["github"].as_str(), Some("me"));
        assert_eq!(social["twitter"].as_str(), Some("me2"));
    }

    #[test]
    fn test_json_config() {
        let dir = TempDir::new().unwrap();
        let json = dir.path().join("_config.json");
        std::fs::write(&json, r#"{"baseurl": "/docs", "tag_dir": "topics"}"#).unwrap();

        let config = load_config(dir.path(), Some(vec![json])).unwrap();
        assert_eq!(config.base_url, "/docs");
        assert_eq!(config.tag_dir, "topics");
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let result = load_config(dir.path(), Some(vec![dir.path().join("nope.yml")]));
        assert!(result.is_err());
    }
}
