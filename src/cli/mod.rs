pub mod types;
pub mod commands;
pub mod logging;

use clap::Parser;

use commands::SiteOptions;
use types::{Cli, Commands};

/// Run the command-line interface, returning the process exit code
pub fn run() -> i32 {
    let cli = Cli::parse();

    logging::init_logging(cli.debug);
    logging::configure_backtrace(cli.trace);

    let mut options = SiteOptions {
        source: cli.source.clone(),
        destination: cli.destination.clone(),
        ..SiteOptions::default()
    };

    let result = match &cli.command {
        Some(Commands::Build { config, baseurl }) => {
            options.config_files = config.clone();
            options.baseurl = baseurl.clone();
            commands::handle_build_command(&options)
        }
        Some(Commands::Render { file, output, config }) => {
            options.config_files = config.clone();
            commands::handle_render_command(&options, file, output.as_deref())
        }
        Some(Commands::Tags {}) => commands::handle_tags_command(&options),
        // Default to build command if none provided
        None => commands::handle_build_command(&options),
    };

    match result {
        Ok(()) => 0,
        Err(e) => {
            log::error!("{}", e);
            1
        }
    }
}
