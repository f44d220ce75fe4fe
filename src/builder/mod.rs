mod document;
mod site;

pub use document::Document;
pub use site::{build_site, output_path, RenderEnv};
