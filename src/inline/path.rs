use once_cell::sync::Lazy;
use regex::Regex;

// Paths ending in `.ext` point at a file rather than a directory
static FILE_SUFFIX: Lazy<Regex> = Lazy::new(|| Regex::new(r"\.\w+$").unwrap());

/// Asset location split into the directory under `assets/` and the file name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPath {
    pub directory: String,
    pub filename: String,
}

impl ResolvedPath {
    /// Build from the location of a post or page and the image filename
    pub fn new(directory_or_file: &str, filename: &str) -> Self {
        Self {
            directory: resolve_directory(directory_or_file).to_string(),
            filename: filename.to_string(),
        }
    }

    /// Full URL of the asset below the site's base URL
    pub fn url(&self, base_url: &str) -> String {
        asset_url(base_url, &self.directory, &self.filename)
    }
}

/// Replace a file-like path with its parent directory, leave directories alone
pub fn resolve_directory(path: &str) -> &str {
    if FILE_SUFFIX.is_match(path) {
        dirname(path)
    } else {
        path
    }
}

/// `File.dirname` semantics: `/a/b.html` -> `/a`, `b.html` -> `.`, `/b.html` -> `/`
fn dirname(path: &str) -> &str {
    let trimmed = path.trim_end_matches('/');
    match trimmed.rfind('/') {
        None => ".",
        Some(idx) => {
            let parent = trimmed[..idx].trim_end_matches('/');
            if parent.is_empty() {
                "/"
            } else {
                parent
            }
        }
    }
}

/// Join `<base_url>/assets/<directory>/<filename>` without empty or `.` segments
pub fn asset_url(base_url: &str, directory: &str, filename: &str) -> String {
    let mut url = base_url.trim_end_matches('/').to_string();

    let segments = ["assets", directory, filename]
        .into_iter()
        .flat_map(|part| part.split('/'))
        .filter(|segment| !segment.is_empty() && *segment != ".");

    for segment in segments {
        url.push('/');
        url.push_str(segment);
    }

    url
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_path_resolves_to_parent() {
        assert_eq!(resolve_directory("/blog/post.html"), "/blog");
        assert_eq!(resolve_directory("/2020/01/02/intro.html"), "/2020/01/02");
        assert_eq!(resolve_directory("/post.html"), "/");
        assert_eq!(resolve_directory("post.html"), ".");
    }

    #[test]
    fn test_directory_path_is_unchanged() {
        assert_eq!(resolve_directory("/blog/"), "/blog/");
        assert_eq!(resolve_directory("/posts/2020/intro"), "/posts/2020/intro");
        assert_eq!(resolve_directory(""), "");
    }

    #[test]
    fn test_asset_url_normalizes_separators() {
        assert_eq!(
            asset_url("/site", "/posts/2020", "diagram.png"),
            "/site/assets/posts/2020/diagram.png"
        );
        assert_eq!(asset_url("/site/", "/blog/", "a.png"), "/site/assets/blog/a.png");
        assert_eq!(asset_url("", "/blog//x/", "a.png"), "/assets/blog/x/a.png");
        assert_eq!(asset_url("/", ".", "a.png"), "/assets/a.png");
    }

    #[test]
    fn test_asset_url_keeps_spaces_in_filename() {
        assert_eq!(asset_url("", "/notes", "a b.png"), "/assets/notes/a b.png");
    }

    #[test]
    fn test_resolved_path_never_contains_file() {
        let resolved = ResolvedPath::new("/posts/2020/intro.html", "diagram.png");
        assert_eq!(resolved.directory, "/posts/2020");
        assert_eq!(resolved.filename, "diagram.png");
        assert_eq!(resolved.url("/site"), "/site/assets/posts/2020/diagram.png");
    }
}
