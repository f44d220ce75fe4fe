use std::path::{Path, PathBuf};
use std::sync::Arc;
use liquid::{Object, Parser};
use log::{debug, info};

use crate::builder::Document;
use crate::generator::{Generator, TagGenerator};
use crate::layout::LayoutRenderer;
use crate::liquid::{create_globals, create_parser, render_liquid};
use crate::markdown::{create_comrak_options, render_markdown};
use crate::site::SiteIndex;
use crate::utils::error::BoxResult;
use crate::utils::fs;

/// Shared state for rendering pages of one site
pub struct RenderEnv<'a> {
    pub site: &'a SiteIndex,
    pub site_object: Object,
    pub layouts: LayoutRenderer<'a>,
}

impl<'a> RenderEnv<'a> {
    pub fn new(site: &'a SiteIndex, parser: &'a Parser) -> Self {
        RenderEnv {
            site,
            site_object: site.site_object(),
            layouts: LayoutRenderer::new(site.config().layouts_path(), parser),
        }
    }

    fn parser(&self) -> &Parser {
        self.layouts.parser()
    }

    /// Render a document: Liquid, then Markdown, then its layout
    pub fn render_document(&self, document: &Document) -> BoxResult<String> {
        let globals = create_globals(&self.site_object, document.page.clone());

        let mut output = render_liquid(&document.body, self.parser(), &globals)?;

        if document.markdown {
            output = render_markdown(&output, &create_comrak_options());
        }

        if let Some(layout) = &document.layout {
            output = self.layouts.render(&output, layout, &globals)?;
        }

        Ok(output)
    }
}

/// Summary of a build
#[derive(Debug, Default)]
pub struct BuildReport {
    pub posts: usize,
    pub generated: Vec<PathBuf>,
}

/// File a url is written to: directory urls get an `index.html`
pub fn output_path(destination: &Path, url: &str) -> PathBuf {
    let relative = url.trim_start_matches('/');
    let mut path = destination.join(relative);
    if url.ends_with('/') || relative.is_empty() {
        path.push("index.html");
    }
    path
}

/// Render every post and run the generators
pub fn build_site(site: Arc<SiteIndex>) -> BoxResult<BuildReport> {
    let parser = create_parser(site.clone())?;
    let env = RenderEnv::new(&site, &parser);
    let destination = &site.config().destination;
    let mut report = BuildReport::default();

    fs::create_directory(destination)?;

    for post in site.posts() {
        debug!("Rendering post {}", post.id);
        let document = Document::from_post(post);
        let html = env.render_document(&document)?;
        fs::write_file(output_path(destination, &document.url), &html)?;
        report.posts += 1;
    }

    let generators: Vec<Box<dyn Generator>> = vec![Box::new(TagGenerator)];
    for generator in generators {
        info!("Running generator: {}", generator.name());
        report.generated.extend(generator.generate(&env)?);
    }

    info!(
        "Rendered {} posts and {} generated pages into {}",
        report.posts,
        report.generated.len(),
        destination.display()
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_path() {
        let dest = Path::new("/out");
        assert_eq!(output_path(dest, "/2020/01/02/a.html"), PathBuf::from("/out/2020/01/02/a.html"));
        assert_eq!(output_path(dest, "/tags/rust/"), PathBuf::from("/out/tags/rust/index.html"));
        assert_eq!(output_path(dest, "/"), PathBuf::from("/out/index.html"));
    }
}
