//! Site model: configuration, posts and the tag map
//!
//! A `SiteIndex` is built once per run and shared read-only with the
//! Liquid tags through an `Arc`.

mod loader;
mod post;

pub use loader::load_site;
pub use post::Post;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use liquid::Object;
use liquid::model::Value;

use crate::config::Config;
use crate::inline::PostLookup;

/// Loaded site: config, posts (newest first) and tag -> post mapping
#[derive(Debug, Clone)]
pub struct SiteIndex {
    config: Config,
    posts: Vec<Post>,
    tags: BTreeMap<String, Vec<usize>>,
}

impl SiteIndex {
    /// Build the index; posts are sorted newest first
    pub fn new(config: Config, mut posts: Vec<Post>) -> Self {
        posts.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| a.slug.cmp(&b.slug)));

        let mut tags: BTreeMap<String, Vec<usize>> = BTreeMap::new();
        for (idx, post) in posts.iter().enumerate() {
            for tag in &post.tags {
                let entry = tags.entry(tag.clone()).or_default();
                // A tag repeated in one post still counts the post once
                if entry.last() != Some(&idx) {
                    entry.push(idx);
                }
            }
        }

        Self { config, posts, tags }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    /// Tag names in lexical order with the number of posts carrying them
    pub fn tag_counts(&self) -> impl Iterator<Item = (&str, usize)> {
        self.tags.iter().map(|(tag, posts)| (tag.as_str(), posts.len()))
    }

    /// Posts carrying `tag`, newest first
    pub fn posts_tagged(&self, tag: &str) -> Vec<&Post> {
        self.tags
            .get(tag)
            .map(|indices| indices.iter().map(|&idx| &self.posts[idx]).collect())
            .unwrap_or_default()
    }

    /// URL of the index page for `tag`
    pub fn tag_url(&self, tag: &str) -> String {
        tag_url(&self.config.base_url, &self.config.tag_dir, tag)
    }

    /// Find the post loaded from `path`
    pub fn post_by_source(&self, path: &Path) -> Option<&Post> {
        let wanted = path.canonicalize().ok();
        self.posts.iter().find(|post| {
            post.source == path
                || (wanted.is_some() && post.source.canonicalize().ok() == wanted)
        })
    }

    /// The `site` object seen by templates
    pub fn site_object(&self) -> Object {
        let mut site = self.config.to_liquid();

        let posts: Vec<Value> = self
            .posts
            .iter()
            .map(|post| Value::Object(post.to_liquid()))
            .collect();
        site.insert("posts".into(), Value::Array(posts));

        let mut tags = Object::new();
        for tag in self.tags.keys() {
            let tagged = self
                .posts_tagged(tag)
                .into_iter()
                .map(|post| Value::Object(post.to_liquid()))
                .collect();
            tags.insert(tag.clone().into(), Value::Array(tagged));
        }
        site.insert("tags".into(), Value::Object(tags));

        site.insert("time".into(), Value::scalar(chrono::Utc::now().to_rfc3339()));

        site
    }
}

/// `<base_url>/<tag_dir>/<tag>/`, with the tag percent-encoded
pub fn tag_url(base_url: &str, tag_dir: &str, tag: &str) -> String {
    format!(
        "{}/{}/{}/",
        base_url.trim_end_matches('/'),
        tag_dir.trim_matches('/'),
        urlencoding::encode(tag)
    )
}

/// `<tag_dir>/<tag>` on disk, using the raw tag; `None` for tags that are
/// empty or would leave the tag directory
pub fn tag_output_dir(tag_dir: &str, tag: &str) -> Option<PathBuf> {
    if tag.is_empty() || tag == "." || tag == ".." || tag.contains('/') || tag.contains('\\') {
        return None;
    }
    Some(PathBuf::from(tag_dir.trim_matches('/')).join(tag))
}

impl PostLookup for SiteIndex {
    fn lookup_post_path_by_id(&self, id: &str) -> Option<&str> {
        self.posts
            .iter()
            .find(|post| post.id == id)
            .map(|post| post.url.as_str())
    }
}
