use std::error::Error;
use std::fmt;

/// Message rendered in place of the tag when no argument was given
pub const MISSING_ARGUMENT_MESSAGE: &str =
    "Error processing input, expected syntax: {% img filename post_id %}";

/// Parsed inline argument of the `img` tag
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagArgument {
    /// Image filename, never empty
    pub filename: String,
    /// Post id the image belongs to, if one was given
    pub identifier: Option<String>,
}

impl TagArgument {
    /// Identifier given in the markup, or `default` when none was supplied
    pub fn identifier_or<'a>(&'a self, default: Option<&'a str>) -> Option<&'a str> {
        self.identifier.as_deref().or(default)
    }
}

/// Errors raised while parsing an inline argument
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArgumentError {
    /// The tag was used without any argument
    MissingArgument,
    /// The argument could not be split into filename and identifier
    MalformedArgument(String),
}

impl fmt::Display for ArgumentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgumentError::MissingArgument => write!(f, "{}", MISSING_ARGUMENT_MESSAGE),
            ArgumentError::MalformedArgument(why) => {
                write!(f, "Error processing input: {}", why)
            }
        }
    }
}

impl Error for ArgumentError {}

/// Parse `filename [post_id]`, where the filename may be wrapped in single or
/// double quotes to allow whitespace inside it.
pub fn parse_argument(raw: &str) -> Result<TagArgument, ArgumentError> {
    let input = raw.trim();
    let first = match input.chars().next() {
        Some(c) => c,
        None => return Err(ArgumentError::MissingArgument),
    };

    if first == '"' || first == '\'' {
        parse_quoted(input, first)
    } else {
        parse_unquoted(input)
    }
}

fn parse_quoted(input: &str, quote: char) -> Result<TagArgument, ArgumentError> {
    // Quote characters are ASCII so byte offsets are char boundaries
    let last = input.rfind(quote).unwrap_or(0);
    if last == 0 {
        return Err(ArgumentError::MalformedArgument(format!(
            "unterminated quote in '{}'",
            input
        )));
    }

    let filename = &input[1..last];
    if filename.trim().is_empty() {
        return Err(ArgumentError::MalformedArgument(
            "quoted filename is empty".to_string(),
        ));
    }

    let rest = input[last + 1..].trim();
    if rest.split_whitespace().count() > 1 {
        return Err(ArgumentError::MalformedArgument(format!(
            "expected a single post id after the filename, found '{}'",
            rest
        )));
    }

    Ok(TagArgument {
        filename: filename.to_string(),
        identifier: non_empty(rest),
    })
}

fn parse_unquoted(input: &str) -> Result<TagArgument, ArgumentError> {
    let tokens: Vec<&str> = input.split_whitespace().collect();
    match tokens.as_slice() {
        [filename] => Ok(TagArgument {
            filename: filename.to_string(),
            identifier: None,
        }),
        [filename, identifier] => Ok(TagArgument {
            filename: filename.to_string(),
            identifier: Some(identifier.to_string()),
        }),
        _ => Err(ArgumentError::MalformedArgument(format!(
            "expected 'filename post_id', got {} arguments",
            tokens.len()
        ))),
    }
}

fn non_empty(s: &str) -> Option<String> {
    if s.is_empty() {
        None
    } else {
        Some(s.to_string())
    }
}
