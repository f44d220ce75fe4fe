use log::{debug, info, warn};
use walkdir::WalkDir;

use crate::config::Config;
use crate::site::{Post, SiteIndex};
use crate::utils::error::BoxResult;

/// Load every post below the posts directory into a `SiteIndex`.
///
/// Files whose name does not follow `YYYY-MM-DD-title.ext` are skipped, the
/// same way Jekyll ignores them.
pub fn load_site(config: &Config) -> BoxResult<SiteIndex> {
    let posts_dir = config.posts_path();
    let mut posts = Vec::new();

    if !posts_dir.exists() {
        warn!("Posts directory does not exist: {}", posts_dir.display());
        return Ok(SiteIndex::new(config.clone(), posts));
    }

    for entry in WalkDir::new(&posts_dir).follow_links(true) {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }

        let name = entry.file_name().to_string_lossy();
        if name.starts_with('.') || name.starts_with('_') {
            continue;
        }

        match Post::from_file(entry.path(), config) {
            Ok(post) => {
                debug!("Loaded post {} ({})", post.id, entry.path().display());
                posts.push(post);
            }
            Err(e) => warn!("Skipping {}: {}", entry.path().display(), e),
        }
    }

    info!("Loaded {} posts from {}", posts.len(), posts_dir.display());
    Ok(SiteIndex::new(config.clone(), posts))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_load_site_reads_posts() {
        let dir = TempDir::new().unwrap();
        let posts = dir.path().join("_posts");
        fs::create_dir_all(posts.join("nested")).unwrap();
        fs::write(posts.join("2020-01-02-intro.md"), "---\ntags: rust\n---\nHi").unwrap();
        fs::write(posts.join("nested/2021-02-03-deep.md"), "Deep").unwrap();
        fs::write(posts.join("README.md"), "not a post").unwrap();

        let config = Config {
            source: dir.path().to_path_buf(),
            ..Config::default()
        };
        let site = load_site(&config).unwrap();

        assert_eq!(site.posts().len(), 2);
        assert_eq!(site.posts()[0].slug, "deep");
        assert_eq!(site.posts()[1].source, posts.join("2020-01-02-intro.md"));
    }

    #[test]
    fn test_missing_posts_dir_gives_empty_site() {
        let dir = TempDir::new().unwrap();
        let config = Config {
            source: dir.path().to_path_buf(),
            ..Config::default()
        };
        assert!(load_site(&config).unwrap().posts().is_empty());
    }
}
