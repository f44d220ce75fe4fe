//! Generators write pages that have no source file of their own

mod tag_index;

pub use tag_index::TagGenerator;

use std::path::PathBuf;

use crate::builder::RenderEnv;
use crate::utils::error::BoxResult;

/// A page generator run after every post has been rendered
pub trait Generator {
    /// Name used in log output
    fn name(&self) -> &str;

    /// Write the generated pages and return their paths
    fn generate(&self, env: &RenderEnv) -> BoxResult<Vec<PathBuf>>;
}
