use std::path::PathBuf;
use liquid::{Object, Parser};
use liquid::model::Value;
use log::debug;

use crate::front_matter::{self, yaml_to_liquid};
use crate::liquid::preprocess::preprocess_liquid;
use crate::utils::error::{BoxResult, BlogtagsError};
use crate::utils::fs;

/// Layouts nested deeper than this are assumed to form a cycle
const MAX_LAYOUT_DEPTH: usize = 16;

/// Layout renderer for Jekyll-style layouts
pub struct LayoutRenderer<'a> {
    /// Layout directory
    layouts_dir: PathBuf,

    /// Liquid parser with the site's custom tags
    parser: &'a Parser,
}

impl<'a> LayoutRenderer<'a> {
    pub fn new(layouts_dir: PathBuf, parser: &'a Parser) -> Self {
        LayoutRenderer { layouts_dir, parser }
    }

    /// Parser the layouts are rendered with
    pub fn parser(&self) -> &'a Parser {
        self.parser
    }

    /// Whether a layout with this name exists
    pub fn has_layout(&self, name: &str) -> bool {
        self.find_layout(name).is_ok()
    }

    /// Render content with a layout and any parent layouts it names
    pub fn render(&self, content: &str, layout_name: &str, globals: &Object) -> BoxResult<String> {
        let mut output = content.to_string();
        let mut next = Some(layout_name.to_string());
        let mut depth = 0;

        while let Some(name) = next {
            depth += 1;
            if depth > MAX_LAYOUT_DEPTH {
                return Err(BlogtagsError::Template(format!(
                    "Layout nesting deeper than {} levels, starting at '{}'", MAX_LAYOUT_DEPTH, layout_name
                )).into());
            }

            let layout_path = self.find_layout(&name)?;
            debug!("Using layout: {}", layout_path.display());

            let raw = fs::read_file(&layout_path)?;
            let (layout_front_matter, template_source) = front_matter::parse(&raw)?;

            let template = self.parser.parse(&preprocess_liquid(template_source))
                .map_err(|e| BlogtagsError::Template(format!(
                    "Failed to parse layout {}: {}", name, e
                )))?;

            let mut layout_vars = Object::new();
            for (key, value) in &layout_front_matter.custom {
                layout_vars.insert(key.clone().into(), yaml_to_liquid(value));
            }

            let mut render_globals = globals.clone();
            render_globals.insert("content".into(), Value::scalar(output));
            render_globals.insert("layout".into(), Value::Object(layout_vars));

            output = template.render(&render_globals)
                .map_err(|e| BlogtagsError::Template(format!(
                    "Failed to render layout {}: {}", name, e
                )))?;

            next = layout_front_matter.layout;
        }

        Ok(output)
    }

    /// Find a layout file by name
    fn find_layout(&self, name: &str) -> BoxResult<PathBuf> {
        let layout_path = self.layouts_dir.join(name);

        // If the layout doesn't have an extension, try common extensions
        if layout_path.extension().is_none() {
            for ext in &["html", "liquid"] {
                let with_ext = self.layouts_dir.join(format!("{}.{}", name, ext));
                if with_ext.exists() {
                    return Ok(with_ext);
                }
            }
        }

        if layout_path.is_file() {
            return Ok(layout_path);
        }

        Err(BlogtagsError::Template(format!("Layout not found: {}", name)).into())
    }
}
