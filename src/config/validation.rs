use std::collections::HashSet;
use log::{warn, info};

use crate::config::Config;
use crate::utils::error::{BoxResult, BlogtagsError};
use crate::utils::fs;

/// Validate the configuration
pub fn validate_config(config: &Config) -> BoxResult<()> {
    validate_source_directory(config)?;
    validate_layouts_directory(config);
    validate_plaques(config)?;
    validate_tag_dir(config)?;

    Ok(())
}

/// Validate the source directory
fn validate_source_directory(config: &Config) -> BoxResult<()> {
    let source = &config.source;

    if !source.exists() {
        return Err(BlogtagsError::Config(format!(
            "Source directory does not exist: {}", source.display()
        )).into());
    }

    if !fs::is_directory(source) {
        return Err(BlogtagsError::Config(format!(
            "Source path is not a directory: {}", source.display()
        )).into());
    }

    info!("Source directory: {}", source.display());
    Ok(())
}

/// A missing layouts directory only disables layouts and tag pages
fn validate_layouts_directory(config: &Config) {
    let layouts = config.layouts_path();
    if !layouts.exists() {
        warn!("Layouts directory does not exist: {}", layouts.display());
    }
}

/// Plaque names must be usable as tag names and must not collide
fn validate_plaques(config: &Config) -> BoxResult<()> {
    let mut seen = HashSet::new();

    for plaque in &config.plaques {
        let valid = !plaque.name.is_empty()
            && plaque.name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(BlogtagsError::Config(format!(
                "Invalid plaque name '{}': use letters, digits, '_' or '-'", plaque.name
            )).into());
        }

        if !seen.insert(plaque.name.as_str()) {
            return Err(BlogtagsError::Config(format!(
                "Plaque '{}' is configured more than once", plaque.name
            )).into());
        }
    }

    Ok(())
}

/// The tag directory is joined under the destination and must stay inside it
fn validate_tag_dir(config: &Config) -> BoxResult<()> {
    let tag_dir = config.tag_dir.trim_matches('/');
    if tag_dir.is_empty() || tag_dir.split('/').any(|part| part == "..") {
        return Err(BlogtagsError::Config(format!(
            "Invalid tag_dir '{}'", config.tag_dir
        )).into());
    }
    Ok(())
}
