use std::collections::HashMap;
use std::path::PathBuf;
use serde::{Serialize, Deserialize};
use liquid::Object;
use liquid::model::Value;

use crate::config::defaults;
use crate::front_matter::yaml_to_liquid;

/// A titled callout block such as `{% tldr %}...{% endtldr %}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaqueConfig {
    /// Tag name, also used as the CSS class of the box
    pub name: String,

    /// Text of the `<h5>` heading
    pub heading: String,
}

/// Site configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Source directory of the site
    #[serde(default = "defaults::default_source")]
    pub source: PathBuf,

    /// Destination directory for generated pages
    #[serde(default = "defaults::default_destination")]
    pub destination: PathBuf,

    /// Layouts directory, relative to the source
    #[serde(default = "defaults::default_layouts_dir")]
    pub layouts_dir: PathBuf,

    /// Posts directory, relative to the source
    #[serde(default = "defaults::default_posts_dir")]
    pub posts_dir: PathBuf,

    /// Base URL for the site
    #[serde(default, alias = "baseurl")]
    pub base_url: String,

    /// Site title
    #[serde(default = "defaults::default_site_title")]
    pub title: String,

    /// Site description
    #[serde(default)]
    pub description: String,

    /// URL for site
    #[serde(default)]
    pub url: Option<String>,

    /// Markdown extensions
    #[serde(default = "defaults::default_markdown_extensions")]
    pub markdown_ext: Vec<String>,

    /// Callout blocks to register
    #[serde(default = "defaults::default_plaques")]
    pub plaques: Vec<PlaqueConfig>,

    /// Directory the tag index pages are written to
    #[serde(default = "defaults::default_tag_dir")]
    pub tag_dir: String,

    /// Layout used for tag index pages
    #[serde(default = "defaults::default_tag_layout")]
    pub tag_layout: String,

    /// Any other top-level keys, exposed to templates as `site.<key>`
    #[serde(flatten)]
    pub custom: HashMap<String, serde_yaml::Value>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            source: defaults::default_source(),
            destination: defaults::default_destination(),
            layouts_dir: defaults::default_layouts_dir(),
            posts_dir: defaults::default_posts_dir(),
            base_url: String::new(),
            title: defaults::default_site_title(),
            description: String::new(),
            url: None,
            markdown_ext: defaults::default_markdown_extensions(),
            plaques: defaults::default_plaques(),
            tag_dir: defaults::default_tag_dir(),
            tag_layout: defaults::default_tag_layout(),
            custom: HashMap::new(),
        }
    }
}

impl Config {
    /// Absolute layouts directory
    pub fn layouts_path(&self) -> PathBuf {
        self.source.join(&self.layouts_dir)
    }

    /// Absolute posts directory
    pub fn posts_path(&self) -> PathBuf {
        self.source.join(&self.posts_dir)
    }

    /// Whether a file extension (without dot) is treated as Markdown
    pub fn is_markdown_ext(&self, ext: &str) -> bool {
        self.markdown_ext.iter().any(|e| e.eq_ignore_ascii_case(ext))
    }

    /// Convert the config into the `site` object seen by templates
    pub fn to_liquid(&self) -> Object {
        let mut site = Object::new();

        for (key, value) in &self.custom {
            site.insert(key.clone().into(), yaml_to_liquid(value));
        }

        site.insert("title".into(), Value::scalar(self.title.clone()));
        site.insert("description".into(), Value::scalar(self.description.clone()));
        site.insert("baseurl".into(), Value::scalar(self.base_url.clone()));
        site.insert("url".into(), Value::scalar(self.url.clone().unwrap_or_default()));

        site
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use liquid::ValueView;

    #[test]
    fn test_defaults_register_tldr_and_note() {
        let config = Config::default();
        let names: Vec<_> = config.plaques.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["tldr", "note"]);
        assert_eq!(config.plaques[0].heading, "TL;DR");
        assert_eq!(config.tag_layout, "tagpage");
    }

    #[test]
    fn test_baseurl_alias_and_custom_keys() {
        let yaml = "baseurl: /blog\nauthor: Someone\nplaques:\n  - name: warning\n    heading: Careful\n";
        let config: Config = serde_yaml::from_str(yaml).unwrap();

        assert_eq!(config.base_url, "/blog");
        assert_eq!(config.plaques, vec![PlaqueConfig {
            name: "warning".to_string(),
            heading: "Careful".to_string(),
        }]);

        let site = config.to_liquid();
        assert_eq!(site.get("author").unwrap().to_kstr().as_str(), "Someone");
        assert_eq!(site.get("baseurl").unwrap().to_kstr().as_str(), "/blog");
    }
}
