use std::io::Write;
use std::sync::Arc;
use liquid_core::model::ScalarCow;
use liquid_core::{Error, ParseTag, Renderable, Runtime, TagReflection, TagTokenIter, ValueView};
use log::debug;

use crate::site::SiteIndex;

/// Render `(tag, url)` pairs as the inline tag list of a post
pub fn render_tag_list<'a, I>(tags: I) -> String
where
    I: IntoIterator<Item = (&'a str, String)>,
{
    let links: Vec<String> = tags
        .into_iter()
        .map(|(tag, url)| {
            format!(
                "<a href=\"{}\"> #{}</a>",
                html_escape::encode_double_quoted_attribute(&url),
                html_escape::encode_text(tag)
            )
        })
        .collect();

    if links.is_empty() {
        return String::new();
    }

    format!(" • <span class=\"tags\">{}</span>", links.join(" "))
}

/// `{% tags page %}`: links to the index pages of the tags of a post.
///
/// The argument names the variable holding the post, `page` when omitted.
#[derive(Debug, Clone)]
pub struct TagListTag {
    site: Arc<SiteIndex>,
}

impl TagListTag {
    pub fn new(site: Arc<SiteIndex>) -> Self {
        Self { site }
    }
}

struct TagListTagReflection;

impl TagReflection for TagListTagReflection {
    fn tag(&self) -> &str {
        "tags"
    }

    fn description(&self) -> &str {
        "Lists the tags of a post as links to their index pages"
    }
}

impl ParseTag for TagListTag {
    fn reflection(&self) -> &dyn TagReflection {
        &TagListTagReflection
    }

    fn parse(&self, mut arguments: TagTokenIter, _options: &liquid_core::parser::Language) -> Result<Box<dyn Renderable>, Error> {
        let variable = match arguments.next() {
            Some(token) => token.as_str().trim().to_string(),
            None => "page".to_string(),
        };
        arguments.expect_nothing()?;

        let path: Vec<String> = variable.split('.').map(str::to_string).collect();
        debug!("tags tag: reading tags of '{}'", variable);

        Ok(Box::new(TagListRenderer {
            site: self.site.clone(),
            path,
        }))
    }
}

/// Renderer for the tag list
#[derive(Debug)]
struct TagListRenderer {
    site: Arc<SiteIndex>,
    path: Vec<String>,
}

impl TagListRenderer {
    fn tags(&self, runtime: &dyn Runtime) -> Vec<String> {
        let mut path: Vec<ScalarCow<'_>> = self.path.iter().map(|s| ScalarCow::from(s.as_str())).collect();
        path.push(ScalarCow::from("tags"));

        let value = match runtime.try_get(&path) {
            Some(value) => value,
            None => return Vec::new(),
        };

        if let Some(array) = value.as_array() {
            array.values().map(|tag| tag.to_kstr().to_string()).collect()
        } else if value.is_nil() {
            Vec::new()
        } else {
            // Jekyll also accepts a space separated string
            value.to_kstr().split_whitespace().map(str::to_string).collect()
        }
    }
}

impl Renderable for TagListRenderer {
    fn render_to(&self, writer: &mut dyn Write, runtime: &dyn Runtime) -> Result<(), Error> {
        let tags = self.tags(runtime);
        let output = render_tag_list(tags.iter().map(|tag| (tag.as_str(), self.site.tag_url(tag))));

        writer.write_all(output.as_bytes())
            .map_err(|e| Error::with_msg(format!("Failed to write to output: {}", e)))?;
        Ok(())
    }
}
