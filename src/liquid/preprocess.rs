use std::borrow::Cow;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use log::debug;

// `{% img <markup> %}`, whitespace control dashes included
static IMG_TAG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)\{%(-?)\s*img(?:\s+(.*?))?\s*(-?)%\}").unwrap());

/// Rewrite every `img` tag so its markup reaches the tag as one string literal.
///
/// The markup is free text (unbalanced quotes, apostrophes, `{{ var }}`)
/// that the Liquid tag grammar would reject, so it is percent-encoded into
/// `{% img "<encoded>" %}` and decoded again by [`decode_img_markup`].
pub fn preprocess_liquid(content: &str) -> Cow<'_, str> {
    IMG_TAG.replace_all(content, |caps: &Captures| {
        let markup = caps.get(2).map_or("", |m| m.as_str());
        debug!("Preprocessing img tag markup '{}'", markup);
        format!(
            "{{%{} img \"{}\" {}%}}",
            &caps[1],
            urlencoding::encode(markup),
            &caps[3]
        )
    })
}

/// Recover the original markup from the tag's argument text
pub fn decode_img_markup(arguments: &str) -> Result<String, String> {
    let arguments = arguments.trim();
    match arguments
        .strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
    {
        Some(encoded) => urlencoding::decode(encoded)
            .map(|markup| markup.into_owned())
            .map_err(|e| format!("img markup is not valid UTF-8: {}", e)),
        None => Ok(arguments.to_string()),
    }
}
