use std::path::Path;
use log::{debug, info};

use crate::builder::{Document, RenderEnv};
use crate::cli::commands::SiteOptions;
use crate::liquid::create_parser;
use crate::utils::error::BoxResult;
use crate::utils::fs;

/// Handle the render command: one file to stdout or `output`
pub fn handle_render_command(options: &SiteOptions, file: &Path, output: Option<&Path>) -> BoxResult<()> {
    let html = render_file(options, file)?;

    match output {
        Some(path) => {
            fs::write_file(path, &html)?;
            info!("Wrote {}", path.display());
        }
        None => print!("{}", html),
    }

    Ok(())
}

/// Render a post, or any other file as a standalone page
pub fn render_file(options: &SiteOptions, file: &Path) -> BoxResult<String> {
    let site = options.load_site()?;
    let parser = create_parser(site.clone())?;
    let env = RenderEnv::new(&site, &parser);

    let document = match site.post_by_source(file) {
        Some(post) => {
            debug!("Rendering post {}", post.id);
            Document::from_post(post)
        }
        None => {
            debug!("{} is not a post, rendering it as a page", file.display());
            Document::from_page_file(file, site.config())?
        }
    };

    env.render_document(&document)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_render_page_with_tags() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        std::fs::create_dir_all(root.join("_posts")).unwrap();
        std::fs::write(
            root.join("_posts/2021-05-06-cmake.md"),
            "---\ntags: cmake\n---\nbody\n",
        )
        .unwrap();
        std::fs::write(
            root.join("about.html"),
            "---\ntags: [cmake]\n---\n{% tags %}|{% note %}hi{% endnote %}",
        )
        .unwrap();

        let options = SiteOptions {
            source: Some(root.to_path_buf()),
            ..SiteOptions::default()
        };
        let html = render_file(&options, &root.join("about.html")).unwrap();

        assert_eq!(
            html,
            " • <span class=\"tags\"><a href=\"/tags/cmake/\"> #cmake</a></span>|<div class=\"note\"><h5>Note</h5><p>hi</p></div>"
        );
    }

    #[test]
    fn test_render_post_uses_post_url() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        std::fs::create_dir_all(root.join("_posts")).unwrap();
        let post = root.join("_posts/2021-05-06-cmake.html");
        std::fs::write(&post, "---\ntitle: CMake\n---\n{{ page.url }} {% img x.png %}").unwrap();

        let options = SiteOptions {
            source: Some(root.to_path_buf()),
            ..SiteOptions::default()
        };
        let html = render_file(&options, &post).unwrap();

        assert_eq!(
            html,
            "/2021/05/06/cmake.html <a href=\"/assets/2021/05/06/x.png\" target=\"blank\"><img src=\"/assets/2021/05/06/x.png\" /></a>"
        );
    }
}
