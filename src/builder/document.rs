use std::path::Path;
use liquid::Object;
use liquid::model::Value;

use crate::config::Config;
use crate::front_matter::{self, yaml_to_liquid};
use crate::site::Post;
use crate::utils::error::BoxResult;
use crate::utils::fs;

/// Anything that gets rendered to an output page
#[derive(Debug, Clone)]
pub struct Document {
    /// Body without front matter
    pub body: String,
    pub markdown: bool,
    pub layout: Option<String>,
    /// Output path below the site root
    pub url: String,
    /// The `page` object seen by templates
    pub page: Object,
}

impl Document {
    pub fn from_post(post: &Post) -> Self {
        Document {
            body: post.content.clone(),
            markdown: post.markdown,
            layout: post.layout.clone(),
            url: post.url.clone(),
            page: post.to_liquid(),
        }
    }

    /// Load a standalone page; its url is its path below the source directory
    pub fn from_page_file(path: &Path, config: &Config) -> BoxResult<Self> {
        let raw = fs::read_file(path)?;
        let (front_matter, body) = front_matter::parse(&raw)?;

        let ext = path
            .extension()
            .map(|ext| ext.to_string_lossy().to_string())
            .unwrap_or_default();
        let markdown = config.is_markdown_ext(&ext);

        let relative = path.strip_prefix(&config.source).unwrap_or(path);
        let mut url = format!("/{}", relative.to_string_lossy().replace('\\', "/"));
        if markdown {
            url = format!("{}html", url.trim_end_matches(ext.as_str()));
        }
        if let Some(permalink) = &front_matter.permalink {
            url = permalink.clone();
        }

        let mut page = Object::new();
        for (key, value) in &front_matter.custom {
            page.insert(key.clone().into(), yaml_to_liquid(value));
        }
        if let Some(id) = &front_matter.id {
            page.insert("id".into(), Value::scalar(id.clone()));
        }
        if let Some(title) = &front_matter.title {
            page.insert("title".into(), Value::scalar(title.clone()));
        }
        let tags = front_matter.tags.iter().map(|t| Value::scalar(t.clone())).collect();
        page.insert("tags".into(), Value::Array(tags));
        page.insert("url".into(), Value::scalar(url.clone()));

        Ok(Document {
            body: body.to_string(),
            markdown,
            layout: front_matter.layout,
            url,
            page,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use liquid::ValueView;
    use tempfile::TempDir;

    #[test]
    fn test_page_url_from_path() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir_all(dir.path().join("about")).unwrap();
        let path = dir.path().join("about/index.md");
        std::fs::write(&path, "---\ntitle: About\nlayout: default\n---\n# Me").unwrap();

        let config = Config {
            source: dir.path().to_path_buf(),
            ..Config::default()
        };
        let doc = Document::from_page_file(&path, &config).unwrap();

        assert_eq!(doc.url, "/about/index.html");
        assert!(doc.markdown);
        assert_eq!(doc.layout.as_deref(), Some("default"));
        assert_eq!(doc.body, "# Me");
        assert_eq!(doc.page.get("title").unwrap().to_kstr().as_str(), "About");
        assert!(doc.page.get("id").is_none());
    }

    #[test]
    fn test_post_document_uses_post_url() {
        let post = Post::parse("2020-01-02-intro.html", "<p>x</p>", &Config::default()).unwrap();
        let doc = Document::from_post(&post);
        assert_eq!(doc.url, "/2020/01/02/intro.html");
        assert!(!doc.markdown);
        assert_eq!(doc.page.get("id").unwrap().to_kstr().as_str(), "/2020/01/02/intro");
    }
}
