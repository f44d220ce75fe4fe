use std::path::PathBuf;

use crate::config::PlaqueConfig;

/// Default source directory
pub fn default_source() -> PathBuf {
    PathBuf::from(".")
}

/// Default destination directory
pub fn default_destination() -> PathBuf {
    PathBuf::from("_site")
}

/// Default layouts directory
pub fn default_layouts_dir() -> PathBuf {
    PathBuf::from("_layouts")
}

/// Default posts directory
pub fn default_posts_dir() -> PathBuf {
    PathBuf::from("_posts")
}

/// Default site title
pub fn default_site_title() -> String {
    "Your awesome site".to_string()
}

/// Default markdown extensions
pub fn default_markdown_extensions() -> Vec<String> {
    vec!["md".to_string(), "markdown".to_string()]
}

/// The `tldr` and `note` plaques
pub fn default_plaques() -> Vec<PlaqueConfig> {
    vec![
        PlaqueConfig {
            name: "tldr".to_string(),
            heading: "TL;DR".to_string(),
        },
        PlaqueConfig {
            name: "note".to_string(),
            heading: "Note".to_string(),
        },
    ]
}

/// Default directory for tag index pages
pub fn default_tag_dir() -> String {
    "tags".to_string()
}

/// Default layout for tag index pages
pub fn default_tag_layout() -> String {
    "tagpage".to_string()
}
