use crate::front_matter::FrontMatter;
use crate::utils::error::{BoxResult, BlogtagsError};

/// Split a document into its front matter and body.
///
/// Documents without a leading `---` block get default front matter and the
/// whole input as body.
pub fn parse(content: &str) -> BoxResult<(FrontMatter, &str)> {
    let rest = match content
        .strip_prefix("---\n")
        .or_else(|| content.strip_prefix("---\r\n"))
    {
        Some(rest) => rest,
        None => return Ok((FrontMatter::default(), content)),
    };

    // The closing delimiter may directly follow the opening one
    let (yaml, after) = if let Some(after) = rest.strip_prefix("---") {
        ("", after)
    } else {
        match rest.find("\n---") {
            Some(end) => (&rest[..end], &rest[end + 4..]),
            None => return Ok((FrontMatter::default(), content)),
        }
    };

    // Drop the remainder of the closing delimiter line
    let body = match after.find('\n') {
        Some(newline) => &after[newline + 1..],
        None => "",
    };

    if yaml.trim().is_empty() {
        return Ok((FrontMatter::default(), body));
    }

    let front_matter = serde_yaml::from_str::<FrontMatter>(yaml)
        .map_err(|e| BlogtagsError::FrontMatter(e.to_string()))?;

    Ok((front_matter, body))
}
