use std::error::Error;
use std::fmt;
use std::io;

/// Common result type for blogtags operations
pub type BoxResult<T> = Result<T, Box<dyn Error>>;

/// Error types for blogtags operations
#[derive(Debug)]
pub enum BlogtagsError {
    /// IO error wrapper
    Io(io::Error),
    /// Configuration error
    Config(String),
    /// Template processing error
    Template(String),
    /// Front matter parsing error
    FrontMatter(String),
    /// Generic error message
    Generic(String),
}

impl fmt::Display for BlogtagsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BlogtagsError::Io(err) => write!(f, "IO error: {}", err),
            BlogtagsError::Config(msg) => write!(f, "Configuration error: {}", msg),
            BlogtagsError::Template(msg) => write!(f, "Template error: {}", msg),
            BlogtagsError::FrontMatter(msg) => write!(f, "Front matter error: {}", msg),
            BlogtagsError::Generic(msg) => write!(f, "{}", msg),
        }
    }
}

impl Error for BlogtagsError {}

impl From<io::Error> for BlogtagsError {
    fn from(err: io::Error) -> Self {
        BlogtagsError::Io(err)
    }
}

impl From<liquid::Error> for BlogtagsError {
    fn from(err: liquid::Error) -> Self {
        BlogtagsError::Template(err.to_string())
    }
}

impl From<String> for BlogtagsError {
    fn from(msg: String) -> Self {
        BlogtagsError::Generic(msg)
    }
}

impl From<&str> for BlogtagsError {
    fn from(msg: &str) -> Self {
        BlogtagsError::Generic(msg.to_string())
    }
}
