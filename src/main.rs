// Module declarations
mod builder;
mod cli;
mod config;
mod front_matter;
mod generator;
mod inline;
mod layout;
mod liquid;
mod markdown;
mod site;
mod utils;

fn main() {
    std::process::exit(cli::run());
}
