use std::path::PathBuf;
use liquid::Object;
use liquid::model::Value;
use log::{debug, info, warn};

use crate::builder::RenderEnv;
use crate::generator::Generator;
use crate::liquid::create_globals;
use crate::site::{tag_output_dir, tag_url, Post, SiteIndex};
use crate::utils::error::BoxResult;
use crate::utils::fs;

/// One `/<tag_dir>/<tag>/` page
#[derive(Debug)]
pub struct TagIndexPage<'a> {
    pub tag: &'a str,
    /// Percent-encoded link path
    pub url: String,
    /// Directory below the destination, named after the raw tag
    pub dir: PathBuf,
    pub posts: Vec<&'a Post>,
}

impl<'a> TagIndexPage<'a> {
    /// `None` when the tag cannot be used as a directory name
    pub fn new(site: &'a SiteIndex, tag: &'a str) -> Option<Self> {
        let tag_dir = &site.config().tag_dir;
        Some(TagIndexPage {
            tag,
            url: tag_url("", tag_dir, tag),
            dir: tag_output_dir(tag_dir, tag)?,
            posts: site.posts_tagged(tag),
        })
    }

    pub fn title(&self) -> String {
        format!("Posts Tagged #{}", self.tag)
    }

    /// The `page` object seen by the tag layout
    pub fn to_liquid(&self) -> Object {
        let mut page = Object::new();
        page.insert("tag".into(), Value::scalar(self.tag.to_string()));
        page.insert("title".into(), Value::scalar(self.title()));
        page.insert("url".into(), Value::scalar(self.url.clone()));
        let posts = self
            .posts
            .iter()
            .map(|post| Value::Object(post.to_liquid()))
            .collect();
        page.insert("posts".into(), Value::Array(posts));
        page
    }
}

/// Writes an index page for every tag using the configured tag layout
pub struct TagGenerator;

impl Generator for TagGenerator {
    fn name(&self) -> &str {
        "tag_index"
    }

    fn generate(&self, env: &RenderEnv) -> BoxResult<Vec<PathBuf>> {
        let config = env.site.config();
        let layout = config.tag_layout.as_str();

        if !env.layouts.has_layout(layout) {
            debug!("No '{}' layout, skipping tag pages", layout);
            return Ok(Vec::new());
        }

        let mut written = Vec::new();
        for (tag, _) in env.site.tag_counts() {
            let page = match TagIndexPage::new(env.site, tag) {
                Some(page) => page,
                None => {
                    warn!("Skipping tag page for '{}': not usable as a directory name", tag);
                    continue;
                }
            };
            let globals = create_globals(&env.site_object, page.to_liquid());
            let html = env.layouts.render("", layout, &globals)?;

            let path = config.destination.join(&page.dir).join("index.html");
            fs::write_file(&path, &html)?;
            debug!("Wrote tag page {}", path.display());
            written.push(path);
        }

        info!("Generated {} tag pages", written.len());
        Ok(written)
    }
}
