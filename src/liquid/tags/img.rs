use std::io::Write;
use std::sync::Arc;
use liquid_core::model::ScalarCow;
use liquid_core::runtime::Template;
use liquid_core::{Error, ParseTag, Renderable, Runtime, TagReflection, TagTokenIter, ValueView};
use log::{debug, warn};

use crate::inline::{self, ImgContext, PageRef};
use crate::liquid::preprocess::decode_img_markup;
use crate::site::SiteIndex;

/// `{% img filename [post_id] %}`: image linked to itself, stored under
/// `assets/<post directory>/`
#[derive(Debug, Clone)]
pub struct ImgTag {
    site: Arc<SiteIndex>,
}

impl ImgTag {
    pub fn new(site: Arc<SiteIndex>) -> Self {
        Self { site }
    }
}

struct ImgTagReflection;

impl TagReflection for ImgTagReflection {
    fn tag(&self) -> &str {
        "img"
    }

    fn description(&self) -> &str {
        "Links an image stored in the assets directory of a post"
    }
}

impl ParseTag for ImgTag {
    fn reflection(&self) -> &dyn TagReflection {
        &ImgTagReflection
    }

    fn parse(&self, arguments: TagTokenIter, options: &liquid_core::parser::Language) -> Result<Box<dyn Renderable>, Error> {
        let raw = arguments
            .map(|token| token.as_str().to_string())
            .collect::<Vec<_>>()
            .join(" ");
        let markup = decode_img_markup(&raw).map_err(Error::with_msg)?;
        debug!("img tag: parsing markup '{}'", markup);

        // Variables in the markup are substituted at render time
        let template = if markup.contains("{{") || markup.contains("{%") {
            Some(Template::new(liquid_core::parser::parse(&markup, options)?))
        } else {
            None
        };

        Ok(Box::new(ImgTagRenderer {
            site: self.site.clone(),
            markup,
            template,
        }))
    }
}

/// Renderer for the img tag
#[derive(Debug)]
struct ImgTagRenderer {
    site: Arc<SiteIndex>,
    markup: String,
    template: Option<Template>,
}

impl Renderable for ImgTagRenderer {
    fn render_to(&self, writer: &mut dyn Write, runtime: &dyn Runtime) -> Result<(), Error> {
        let markup = match &self.template {
            Some(template) => template.render(runtime)?,
            None => self.markup.clone(),
        };

        let page = current_page(runtime);
        let ctx = ImgContext {
            base_url: self.site.base_url(),
            page: &page,
            posts: self.site.as_ref(),
        };

        let output = match inline::render_img(&markup, &ctx) {
            Ok(html) => html,
            Err(e) => {
                warn!("img tag on page {}: {}", page.url, e);
                e.to_string()
            }
        };

        writer.write_all(output.as_bytes())
            .map_err(|e| Error::with_msg(format!("Failed to write to output: {}", e)))?;
        Ok(())
    }
}

/// Read `page.id` and `page.url` from the render runtime
fn current_page(runtime: &dyn Runtime) -> PageRef {
    let lookup = |field: &'static str| {
        let path = [ScalarCow::from("page"), ScalarCow::from(field)];
        runtime
            .try_get(&path)
            .filter(|value| !value.is_nil())
            .map(|value| value.to_kstr().to_string())
            .filter(|value| !value.is_empty())
    };

    PageRef {
        id: lookup("id"),
        url: lookup("url").unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use crate::config::Config;
    use crate::liquid::{create_globals, create_parser, render_liquid};
    use crate::site::{Post, SiteIndex};
    use liquid::model::Value;
    use liquid::Object;
    use std::sync::Arc;

    fn site(base_url: &str) -> Arc<SiteIndex> {
        let config = Config {
            base_url: base_url.to_string(),
            ..Config::default()
        };
        let post = Post::parse(
            "2020-05-05-intro.md",
            "---\nid: 42\nslug: /posts/2020/intro\n---\n",
            &config,
        )
        .unwrap();
        Arc::new(SiteIndex::new(config, vec![post]))
    }

    fn page(id: Option<&str>, url: &str) -> Object {
        let mut page = Object::new();
        if let Some(id) = id {
            page.insert("id".into(), Value::scalar(id.to_string()));
        }
        page.insert("url".into(), Value::scalar(url.to_string()));
        page
    }

    fn render(site: &Arc<SiteIndex>, page: Object, template: &str) -> String {
        let parser = create_parser(site.clone()).unwrap();
        let globals = create_globals(&site.site_object(), page);
        render_liquid(template, &parser, &globals).unwrap()
    }

    #[test]
    fn test_img_defaults_to_current_post() {
        let site = site("/site");
        let output = render(&site, page(Some("42"), "/posts/2020/intro.html"), "{% img diagram.png %}");
        assert_eq!(
            output,
            r#"<a href="/site/assets/posts/2020/diagram.png" target="blank"><img src="/site/assets/posts/2020/diagram.png" /></a>"#
        );
    }

    #[test]
    fn test_img_with_quoted_name_and_post_id() {
        let site = site("");
        let output = render(&site, page(None, "/about/"), "{% img 'a b.png' 42 %}");
        assert_eq!(
            output,
            r#"<a href="/assets/posts/2020/a b.png" target="blank"><img src="/assets/posts/2020/a b.png" /></a>"#
        );
    }

    #[test]
    fn test_img_unknown_post_uses_page_url() {
        let site = site("");
        let output = render(&site, page(None, "/about/index.html"), "{% img me.jpg 999 %}");
        assert!(output.contains(r#"href="/assets/about/me.jpg""#));
    }

    #[test]
    fn test_img_without_argument_renders_error() {
        let site = site("");
        let output = render(&site, page(None, "/"), "{% img %}");
        assert_eq!(output, "Error processing input, expected syntax: {% img filename post_id %}");
    }

    #[test]
    fn test_img_with_too_many_arguments_renders_error() {
        let site = site("");
        let output = render(&site, page(None, "/"), "{% img a.png 1 2 %}");
        assert!(output.starts_with("Error processing input:"));
    }

    #[test]
    fn test_img_unterminated_quote_renders_error() {
        let site = site("");
        let output = render(&site, page(None, "/"), "<p>{% img 'unterminated.png 12 %}</p>");
        assert_eq!(output, "<p>Error processing input: unterminated quote in ''unterminated.png 12'</p>");
    }

    #[test]
    fn test_img_apostrophe_in_unquoted_name() {
        let site = site("");
        let output = render(&site, page(None, "/about/index.html"), "{% img it's.png %}");
        assert_eq!(
            output,
            r#"<a href="/assets/about/it's.png" target="blank"><img src="/assets/about/it's.png" /></a>"#
        );
    }

    #[test]
    fn test_img_markup_variables_are_substituted() {
        let site = site("/site");
        let mut globals = page(Some("42"), "/posts/2020/intro.html");
        globals.insert("image".into(), Value::scalar("chart.png"));

        let output = render(&site, globals.clone(), "{% img {{ page.image }} %}");
        assert_eq!(
            output,
            r#"<a href="/site/assets/posts/2020/chart.png" target="blank"><img src="/site/assets/posts/2020/chart.png" /></a>"#
        );

        let output = render(&site, globals, "{%- img \"{{ page.image }}\" {{ page.id }} -%}");
        assert!(output.starts_with(r#"<a href="/site/assets/posts/2020/chart.png""#));
    }

    #[test]
    fn test_img_quoted_name_with_whitespace_in_page() {
        let site = site("");
        let output = render(
            &site,
            page(Some("42"), "/posts/2020/intro.html"),
            "See {% img \"graph  detail.png\" %} here",
        );
        assert_eq!(
            output,
            r#"See <a href="/assets/posts/2020/graph  detail.png" target="blank"><img src="/assets/posts/2020/graph  detail.png" /></a> here"#
        );
    }
}
