mod img;
mod plaque;
mod tag_cloud;
mod tag_list;

pub use img::ImgTag;
pub use plaque::PlaqueBlock;
pub use tag_cloud::TagCloudTag;
pub use tag_list::TagListTag;

use std::collections::HashMap;
use std::sync::Arc;
use liquid::ParserBuilder;
use liquid_core::{ParseBlock, ParseTag};
use log::{debug, info};

use crate::site::SiteIndex;

/// A registered tag handler
pub enum TagHandler {
    /// Single tag, `{% name ... %}`
    Tag(Box<dyn ParseTag>),
    /// Block tag, `{% name %}...{% endname %}`
    Block(Box<dyn ParseBlock>),
}

impl TagHandler {
    pub fn description(&self) -> &str {
        match self {
            TagHandler::Tag(tag) => tag.reflection().description(),
            TagHandler::Block(block) => block.reflection().description(),
        }
    }

    pub fn is_block(&self) -> bool {
        matches!(self, TagHandler::Block(_))
    }
}

/// Table of tag name -> handler, filled once at start up and installed on a
/// Liquid parser
pub struct TagRegistry {
    handlers: HashMap<String, TagHandler>,
    /// Registration order, for deterministic listing
    load_order: Vec<String>,
}

impl TagRegistry {
    pub fn new() -> Self {
        Self {
            handlers: HashMap::new(),
            load_order: Vec::new(),
        }
    }

    /// Register a single tag under its reflected name
    pub fn register_tag<T: ParseTag + 'static>(&mut self, tag: T) -> Result<(), String> {
        let name = tag.reflection().tag().to_string();
        self.insert(name, TagHandler::Tag(Box::new(tag)))
    }

    /// Register a block tag under its start tag name
    pub fn register_block<B: ParseBlock + 'static>(&mut self, block: B) -> Result<(), String> {
        let name = block.reflection().start_tag().to_string();
        let end = block.reflection().end_tag().to_string();
        if self.handlers.contains_key(&end) {
            return Err(format!("Tag '{}' is already registered", end));
        }
        self.insert(name, TagHandler::Block(Box::new(block)))
    }

    fn insert(&mut self, name: String, handler: TagHandler) -> Result<(), String> {
        if self.handlers.contains_key(&name) {
            return Err(format!("Tag '{}' is already registered", name));
        }

        debug!("Registering tag: {}", name);
        self.load_order.push(name.clone());
        self.handlers.insert(name, handler);
        Ok(())
    }

    /// Registered handlers in registration order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &TagHandler)> {
        self.load_order
            .iter()
            .filter_map(|name| self.handlers.get(name).map(|handler| (name.as_str(), handler)))
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    /// Install every handler on the parser builder
    pub fn install(mut self, parser_builder: ParserBuilder) -> ParserBuilder {
        let mut parser_builder = parser_builder;
        for name in std::mem::take(&mut self.load_order) {
            parser_builder = match self.handlers.remove(&name) {
                Some(TagHandler::Tag(tag)) => parser_builder.tag(tag),
                Some(TagHandler::Block(block)) => parser_builder.block(block),
                None => parser_builder,
            };
        }
        parser_builder
    }
}

impl Default for TagRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Registry holding `img`, `tag_cloud`, `tags` and the configured plaques
pub fn default_registry(site: Arc<SiteIndex>) -> Result<TagRegistry, String> {
    let mut registry = TagRegistry::new();

    registry.register_tag(ImgTag::new(site.clone()))?;
    registry.register_tag(TagCloudTag::new(site.clone()))?;
    registry.register_tag(TagListTag::new(site.clone()))?;

    for plaque in &site.config().plaques {
        registry.register_block(PlaqueBlock::from(plaque))?;
    }

    info!("Registered {} custom tags", registry.len());
    Ok(registry)
}
