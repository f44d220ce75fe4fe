use log::info;

use crate::builder;
use crate::cli::commands::SiteOptions;
use crate::utils::error::BoxResult;

/// Handle the build command
pub fn handle_build_command(options: &SiteOptions) -> BoxResult<()> {
    let site = options.load_site()?;

    info!("Building site...");
    let report = builder::build_site(site.clone())?;
    info!(
        "Site built successfully at {} ({} posts, {} tag pages)",
        site.config().destination.display(),
        report.posts,
        report.generated.len()
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_build_writes_posts_and_tag_pages() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        std::fs::create_dir_all(root.join("_posts")).unwrap();
        std::fs::create_dir_all(root.join("_layouts")).unwrap();
        std::fs::write(root.join("_config.yml"), "baseurl: /site\n").unwrap();
        std::fs::write(
            root.join("_layouts/tagpage.html"),
            "{% for post in page.posts %}{{ post.url }}{% endfor %}",
        )
        .unwrap();
        std::fs::write(
            root.join("_posts/2020-03-04-intro.md"),
            "---\nid: 42\nslug: /posts/2020/intro\ntags: rust\n---\n{% img diagram.png %}\n",
        )
        .unwrap();

        let options = SiteOptions {
            source: Some(root.to_path_buf()),
            ..SiteOptions::default()
        };
        handle_build_command(&options).unwrap();

        let post = std::fs::read_to_string(root.join("_site/posts/2020/intro.html")).unwrap();
        assert!(post.contains(
            "<a href=\"/site/assets/posts/2020/diagram.png\" target=\"blank\"><img src=\"/site/assets/posts/2020/diagram.png\" /></a>"
        ));

        let tag_page = std::fs::read_to_string(root.join("_site/tags/rust/index.html")).unwrap();
        assert_eq!(tag_page, "/posts/2020/intro.html");
    }
}
