use crate::cli::commands::SiteOptions;
use crate::liquid::tags::{default_registry, TagRegistry};
use crate::utils::error::{BoxResult, BlogtagsError};

/// Handle the tags command
pub fn handle_tags_command(options: &SiteOptions) -> BoxResult<()> {
    let config = options.load_config()?;
    let site = std::sync::Arc::new(crate::site::SiteIndex::new(config, Vec::new()));
    let registry = default_registry(site).map_err(BlogtagsError::Template)?;

    print!("{}", describe_tags(&registry));
    Ok(())
}

/// One line per registered tag, in registration order
pub fn describe_tags(registry: &TagRegistry) -> String {
    let mut out = String::new();
    for (name, handler) in registry.iter() {
        let usage = if handler.is_block() {
            format!("{{% {} %}}...{{% end{} %}}", name, name)
        } else {
            format!("{{% {} %}}", name)
        };
        out.push_str(&format!("{:<28} {}\n", usage, handler.description()));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use crate::config::Config;
    use crate::site::SiteIndex;

    #[test]
    fn test_describe_tags() {
        let site = Arc::new(SiteIndex::new(Config::default(), Vec::new()));
        let listing = describe_tags(&default_registry(site).unwrap());
        let lines: Vec<_> = listing.lines().collect();

        assert_eq!(lines.len(), 5);
        assert!(lines[0].starts_with("{% img %}"));
        assert!(lines[3].starts_with("{% tldr %}...{% endtldr %}"));
    }
}
