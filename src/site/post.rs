use std::path::{Path, PathBuf};
use chrono::NaiveDate;
use liquid::Object;
use liquid::model::Value;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::config::Config;
use crate::front_matter::{self, yaml_to_liquid, FrontMatter};
use crate::utils::error::{BoxResult, BlogtagsError};

// `2020-01-02-some-title.md`
static POST_FILENAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{4}-\d{2}-\d{2})-(.+)\.(\w+)$").unwrap());

/// A blog post loaded from the posts directory
#[derive(Debug, Clone)]
pub struct Post {
    /// Unique id, matched by the `img` tag's second argument
    pub id: String,
    pub slug: String,
    /// Output path below the site root, e.g. `/2020/01/02/intro.html`
    pub url: String,
    pub title: String,
    pub date: NaiveDate,
    pub tags: Vec<String>,
    pub categories: Vec<String>,
    pub layout: Option<String>,
    /// Body without front matter, before any rendering
    pub content: String,
    pub source: PathBuf,
    /// Whether the body is Markdown
    pub markdown: bool,
    pub front_matter: FrontMatter,
}

impl Post {
    /// Load a post from a `YYYY-MM-DD-title.ext` file
    pub fn from_file(path: &Path, config: &Config) -> BoxResult<Post> {
        let content = crate::utils::fs::read_file(path)?;
        let filename = path
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_default();

        let mut post = Post::parse(&filename, &content, config)?;
        post.source = path.to_path_buf();
        Ok(post)
    }

    /// Build a post from its file name and raw contents
    pub fn parse(filename: &str, raw: &str, config: &Config) -> BoxResult<Post> {
        let captures = POST_FILENAME.captures(filename).ok_or_else(|| {
            BlogtagsError::Generic(format!(
                "Post filename '{}' does not match YYYY-MM-DD-title.ext", filename
            ))
        })?;

        let (front_matter, body) = front_matter::parse(raw)?;

        let date_str = front_matter.date.as_deref().unwrap_or(&captures[1]);
        let date = parse_date(date_str).ok_or_else(|| {
            BlogtagsError::FrontMatter(format!("Invalid date '{}' in {}", date_str, filename))
        })?;

        let slug = front_matter
            .slug
            .clone()
            .unwrap_or_else(|| captures[2].to_string());
        let categories = front_matter.categories.clone();

        let id = front_matter
            .id
            .clone()
            .unwrap_or_else(|| format!("{}/{}", date_path(&categories, date), slug));
        let url = post_url(&front_matter, &categories, date, &slug);

        Ok(Post {
            id,
            url,
            title: front_matter.title.clone().unwrap_or_else(|| slug.replace('-', " ")),
            date,
            tags: front_matter.tags.clone(),
            categories,
            layout: front_matter.layout.clone(),
            content: body.to_string(),
            source: PathBuf::from(filename),
            markdown: config.is_markdown_ext(&captures[3]),
            slug,
            front_matter,
        })
    }

    /// The `page` / `post` object seen by templates
    pub fn to_liquid(&self) -> Object {
        let mut obj = Object::new();

        for (key, value) in &self.front_matter.custom {
            obj.insert(key.clone().into(), yaml_to_liquid(value));
        }

        obj.insert("id".into(), Value::scalar(self.id.clone()));
        obj.insert("slug".into(), Value::scalar(self.slug.clone()));
        obj.insert("url".into(), Value::scalar(self.url.clone()));
        obj.insert("title".into(), Value::scalar(self.title.clone()));
        obj.insert("date".into(), Value::scalar(self.date.format("%Y-%m-%d").to_string()));
        obj.insert("tags".into(), string_array(&self.tags));
        obj.insert("categories".into(), string_array(&self.categories));
        if let Some(layout) = &self.layout {
            obj.insert("layout".into(), Value::scalar(layout.clone()));
        }

        obj
    }
}

fn string_array(items: &[String]) -> Value {
    Value::Array(items.iter().map(|s| Value::scalar(s.clone())).collect())
}

/// Accepts `YYYY-MM-DD` optionally followed by a time
fn parse_date(s: &str) -> Option<NaiveDate> {
    let day = s.trim().get(..10)?;
    NaiveDate::parse_from_str(day, "%Y-%m-%d").ok()
}

/// `/<categories>/<yyyy>/<mm>/<dd>`
fn date_path(categories: &[String], date: NaiveDate) -> String {
    let mut path = String::new();
    for category in categories {
        path.push('/');
        path.push_str(category);
    }
    path.push_str(&date.format("/%Y/%m/%d").to_string());
    path
}

fn post_url(front_matter: &FrontMatter, categories: &[String], date: NaiveDate, slug: &str) -> String {
    if let Some(permalink) = &front_matter.permalink {
        if permalink.starts_with('/') {
            return permalink.clone();
        }
        return format!("/{}", permalink);
    }

    // A slug that already is a path is used as the output location
    if slug.starts_with('/') {
        return format!("{}.html", slug.trim_end_matches('/'));
    }

    format!("{}/{}.html", date_path(categories, date), slug)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_and_urls_from_filename() {
        let post = Post::parse("2020-01-02-intro.md", "---\ntitle: Intro\n---\nHello", &Config::default()).unwrap();

        assert_eq!(post.slug, "intro");
        assert_eq!(post.id, "/2020/01/02/intro");
        assert_eq!(post.url, "/2020/01/02/intro.html");
        assert_eq!(post.title, "Intro");
        assert!(post.markdown);
        assert_eq!(post.content, "Hello");
    }

    #[test]
    fn test_front_matter_overrides() {
        let raw = "---\nid: 42\nslug: /posts/2020/intro\ncategories: cpp\ntags: [cmake, build]\n---\n";
        let post = Post::parse("2020-03-04-whatever.html", raw, &Config::default()).unwrap();

        assert_eq!(post.id, "42");
        assert_eq!(post.url, "/posts/2020/intro.html");
        assert_eq!(post.tags, vec!["cmake", "build"]);
        assert!(!post.markdown);
    }

    #[test]
    fn test_categories_prefix_path_and_permalink_wins() {
        let post = Post::parse("2021-07-08-a-b.md", "---\ncategories: [cpp, tools]\n---\n", &Config::default()).unwrap();
        assert_eq!(post.id, "/cpp/tools/2021/07/08/a-b");
        assert_eq!(post.title, "a b");

        let post = Post::parse("2021-07-08-a-b.md", "---\npermalink: custom/\n---\n", &Config::default()).unwrap();
        assert_eq!(post.url, "/custom/");
    }

    #[test]
    fn test_front_matter_date_overrides_filename() {
        let post = Post::parse("2021-07-08-x.md", "---\ndate: 2022-01-01 10:00:00\n---\n", &Config::default()).unwrap();
        assert_eq!(post.date, NaiveDate::from_ymd_opt(2022, 1, 1).unwrap());
    }

    #[test]
    fn test_bad_filename_is_rejected() {
        assert!(Post::parse("about.md", "", &Config::default()).is_err());
    }
}
