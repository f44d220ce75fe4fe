//! Inline `img` tag arguments and asset path resolution.
//!
//! `{% img filename [post_id] %}` links an image stored under
//! `assets/<post directory>/`. The post id defaults to the page being
//! rendered; an id that matches no post falls back to the page's own url.

mod parser;
mod path;

pub use parser::{parse_argument, ArgumentError, TagArgument};
pub use path::ResolvedPath;

use log::debug;

/// Read-only view of the site's posts keyed by id
pub trait PostLookup {
    /// Output path of the post with the given id, `None` when no post matches
    fn lookup_post_path_by_id(&self, id: &str) -> Option<&str>;
}

/// The page currently being rendered
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageRef {
    pub id: Option<String>,
    pub url: String,
}

/// Everything the `img` tag needs from the site for one render call
pub struct ImgContext<'a> {
    pub base_url: &'a str,
    pub page: &'a PageRef,
    pub posts: &'a dyn PostLookup,
}

/// Resolve the asset URL for a parsed argument
pub fn resolve_asset(argument: &TagArgument, ctx: &ImgContext<'_>) -> ResolvedPath {
    let identifier = argument.identifier_or(ctx.page.id.as_deref());

    let location = match identifier {
        Some(id) => match ctx.posts.lookup_post_path_by_id(id) {
            Some(path) => path,
            None => {
                debug!("img: no post with id '{}', using page url {}", id, ctx.page.url);
                ctx.page.url.as_str()
            }
        },
        None => ctx.page.url.as_str(),
    };

    ResolvedPath::new(location, &argument.filename)
}

/// Render an image wrapped in a link to itself
pub fn render_img_html(url: &str) -> String {
    let url = html_escape::encode_double_quoted_attribute(url);
    format!(r#"<a href="{url}" target="blank"><img src="{url}" /></a>"#)
}

/// Parse the raw markup and render the tag output.
///
/// Parse failures are returned as the error text so that a broken tag shows
/// up on the page instead of failing the whole build.
pub fn render_img(raw: &str, ctx: &ImgContext<'_>) -> Result<String, ArgumentError> {
    let argument = parse_argument(raw)?;
    let resolved = resolve_asset(&argument, ctx);
    Ok(render_img_html(&resolved.url(ctx.base_url)))
}
