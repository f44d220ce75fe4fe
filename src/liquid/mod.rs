pub mod preprocess;
pub mod tags;

use std::sync::Arc;
use liquid::{Object, Parser, ParserBuilder, ValueView};
use liquid::model::Value;

use crate::site::SiteIndex;
use crate::utils::error::{BoxResult, BlogtagsError};

/// Parse and render content with Liquid
pub fn render_liquid(content: &str, parser: &Parser, globals: &Object) -> BoxResult<String> {
    let template = parser.parse(&preprocess::preprocess_liquid(content))
        .map_err(|e| BlogtagsError::Template(format!("Error parsing Liquid template: {}", e)))?;

    match template.render(globals) {
        Ok(result) => Ok(result),
        Err(e) => {
            log::debug!("Error rendering Liquid template: {}", e);
            log::debug!("Available globals:");
            for (key, value) in globals.iter() {
                if value.is_object() {
                    log::debug!("- {}: (object)", key);
                } else {
                    log::debug!("- {}: {:?}", key, value);
                }
            }

            Err(BlogtagsError::Template(format!("Error rendering Liquid template: {}", e)).into())
        }
    }
}

/// Create a Liquid parser with the stdlib and the site's custom tags
pub fn create_parser(site: Arc<SiteIndex>) -> BoxResult<Parser> {
    let registry = tags::default_registry(site)
        .map_err(BlogtagsError::Template)?;

    let parser = registry.install(ParserBuilder::with_stdlib()).build()?;

    Ok(parser)
}

/// Globals for rendering one page: `site` and `page`
pub fn create_globals(site: &Object, page: Object) -> Object {
    let mut globals = Object::new();
    globals.insert("site".into(), Value::Object(site.clone()));
    globals.insert("page".into(), Value::Object(page));
    globals
}
