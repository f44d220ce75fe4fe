use std::io::Write;
use std::sync::Arc;
use liquid_core::{Error, ParseTag, Renderable, Runtime, TagReflection, TagTokenIter};

use crate::site::SiteIndex;

/// Font size of a tag in the cloud, growing with the number of posts
pub fn font_size(post_count: usize) -> usize {
    10 + post_count * 2
}

/// Render `(tag, url, post count)` entries as links separated by ` | `
pub fn render_tag_cloud<'a, I>(tags: I) -> String
where
    I: IntoIterator<Item = (&'a str, String, usize)>,
{
    tags.into_iter()
        .map(|(tag, url, count)| {
            format!(
                "<a href=\"{}\" style=\"font-size: {}px\">{}</a>",
                html_escape::encode_double_quoted_attribute(&url),
                font_size(count),
                html_escape::encode_text(tag)
            )
        })
        .collect::<Vec<_>>()
        .join(" | ")
}

/// `{% tag_cloud %}`: every tag of the site sized by its post count
#[derive(Debug, Clone)]
pub struct TagCloudTag {
    site: Arc<SiteIndex>,
}

impl TagCloudTag {
    pub fn new(site: Arc<SiteIndex>) -> Self {
        Self { site }
    }
}

struct TagCloudTagReflection;

impl TagReflection for TagCloudTagReflection {
    fn tag(&self) -> &str {
        "tag_cloud"
    }

    fn description(&self) -> &str {
        "Lists all tags of the site with a font size proportional to their use"
    }
}

impl ParseTag for TagCloudTag {
    fn reflection(&self) -> &dyn TagReflection {
        &TagCloudTagReflection
    }

    fn parse(&self, mut arguments: TagTokenIter, _options: &liquid_core::parser::Language) -> Result<Box<dyn Renderable>, Error> {
        arguments.expect_nothing()?;
        Ok(Box::new(TagCloudRenderer { site: self.site.clone() }))
    }
}

/// Renderer for the tag cloud
#[derive(Debug)]
struct TagCloudRenderer {
    site: Arc<SiteIndex>,
}

impl Renderable for TagCloudRenderer {
    fn render_to(&self, writer: &mut dyn Write, _runtime: &dyn Runtime) -> Result<(), Error> {
        let cloud = render_tag_cloud(
            self.site
                .tag_counts()
                .map(|(tag, count)| (tag, self.site.tag_url(tag), count)),
        );

        writer.write_all(cloud.as_bytes())
            .map_err(|e| Error::with_msg(format!("Failed to write to output: {}", e)))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::site::Post;

    #[test]
    fn test_font_size_grows_by_two_per_post() {
        assert_eq!(font_size(0), 10);
        assert_eq!(font_size(1), 12);
        assert_eq!(font_size(5), 20);
    }

    #[test]
    fn test_render_tag_cloud_joins_with_bars() {
        let cloud = render_tag_cloud(vec![
            ("cmake", "/tags/cmake/".to_string(), 3),
            ("c&c", "/tags/c%26c/".to_string(), 1),
        ]);
        assert_eq!(
            cloud,
            "<a href=\"/tags/cmake/\" style=\"font-size: 16px\">cmake</a> | \
             <a href=\"/tags/c%26c/\" style=\"font-size: 12px\">c&amp;c</a>"
        );
    }

    #[test]
    fn test_tag_cloud_tag_uses_site_tags() {
        let config = Config {
            base_url: "/blog".to_string(),
            ..Config::default()
        };
        let posts = vec![
            Post::parse("2020-01-01-a.md", "---\ntags: [rust, cmake]\n---\n", &config).unwrap(),
            Post::parse("2020-01-02-b.md", "---\ntags: [rust]\n---\n", &config).unwrap(),
        ];
        let site = Arc::new(SiteIndex::new(config, posts));

        let parser = liquid::ParserBuilder::with_stdlib()
            .tag(TagCloudTag::new(site))
            .build()
            .unwrap();
        let output = parser
            .parse("{% tag_cloud %}")
            .unwrap()
            .render(&liquid::Object::new())
            .unwrap();

        assert_eq!(
            output,
            "<a href=\"/blog/tags/cmake/\" style=\"font-size: 12px\">cmake</a> | \
             <a href=\"/blog/tags/rust/\" style=\"font-size: 14px\">rust</a>"
        );
    }
}
