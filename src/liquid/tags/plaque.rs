use std::io::Write;
use liquid_core::runtime::Template;
use liquid_core::{BlockReflection, Error, ParseBlock, Renderable, Runtime, TagBlock, TagTokenIter};

use crate::config::PlaqueConfig;

/// Callout box block, e.g. `{% tldr %}...{% endtldr %}`
#[derive(Debug, Clone)]
pub struct PlaqueBlock {
    reflection: PlaqueReflection,
}

impl PlaqueBlock {
    pub fn new(name: &str, heading: &str) -> Self {
        Self {
            reflection: PlaqueReflection {
                start_tag: name.to_string(),
                end_tag: format!("end{}", name),
                heading: heading.to_string(),
                description: format!("Renders a \"{}\" callout box", heading),
            },
        }
    }
}

impl From<&PlaqueConfig> for PlaqueBlock {
    fn from(config: &PlaqueConfig) -> Self {
        PlaqueBlock::new(&config.name, &config.heading)
    }
}

#[derive(Debug, Clone)]
struct PlaqueReflection {
    start_tag: String,
    end_tag: String,
    heading: String,
    description: String,
}

impl BlockReflection for PlaqueReflection {
    fn start_tag(&self) -> &str {
        &self.start_tag
    }

    fn end_tag(&self) -> &str {
        &self.end_tag
    }

    fn description(&self) -> &str {
        &self.description
    }
}

impl ParseBlock for PlaqueBlock {
    fn reflection(&self) -> &dyn BlockReflection {
        &self.reflection
    }

    fn parse(&self, mut arguments: TagTokenIter, mut tokens: TagBlock<'_, '_>, options: &liquid_core::parser::Language) -> Result<Box<dyn Renderable>, Error> {
        arguments.expect_nothing()?;

        let body = Template::new(tokens.parse_all(options)?);
        tokens.assert_empty();

        Ok(Box::new(PlaqueRenderer {
            class: self.reflection.start_tag.clone(),
            heading: html_escape::encode_text(&self.reflection.heading).to_string(),
            body,
        }))
    }
}

/// Renderer for a plaque block
#[derive(Debug)]
struct PlaqueRenderer {
    class: String,
    heading: String,
    body: Template,
}

impl Renderable for PlaqueRenderer {
    fn render_to(&self, writer: &mut dyn Write, runtime: &dyn Runtime) -> Result<(), Error> {
        write!(writer, "<div class=\"{}\"><h5>{}</h5><p>", self.class, self.heading)
            .map_err(|e| Error::with_msg(format!("Failed to write to output: {}", e)))?;
        self.body.render_to(writer, runtime)?;
        writer.write_all(b"</p></div>")
            .map_err(|e| Error::with_msg(format!("Failed to write to output: {}", e)))?;
        Ok(())
    }
}
