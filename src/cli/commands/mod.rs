mod build;
mod render;
mod tags;

pub use build::handle_build_command;
pub use render::handle_render_command;
pub use tags::handle_tags_command;

use std::path::PathBuf;
use std::sync::Arc;

use crate::config::{self, Config};
use crate::site::{self, SiteIndex};
use crate::utils::error::BoxResult;

/// Options shared by every command
#[derive(Debug, Default)]
pub struct SiteOptions {
    pub source: Option<PathBuf>,
    pub destination: Option<PathBuf>,
    pub config_files: Option<Vec<PathBuf>>,
    pub baseurl: Option<String>,
}

impl SiteOptions {
    /// Load the configuration, with command line values taking precedence
    pub fn load_config(&self) -> BoxResult<Config> {
        let source = self.source.clone().unwrap_or_else(|| PathBuf::from("."));
        let mut config = config::load_config(&source, self.config_files.clone())?;

        if let Some(destination) = &self.destination {
            config.destination = destination.clone();
        }
        if let Some(base) = &self.baseurl {
            config.base_url = base.clone();
        }

        Ok(config)
    }

    /// Load the configuration and every post
    pub fn load_site(&self) -> BoxResult<Arc<SiteIndex>> {
        let config = self.load_config()?;
        Ok(Arc::new(site::load_site(&config)?))
    }
}
