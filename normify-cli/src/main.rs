use clap::Parser;
use normify_core::config_template;
use std::io::{self, IsTerminal};
use std::process;

mod cli;
mod run;

use cli::Cli;

fn main() {
    let cli = Cli::parse();
    let use_color = !cli.no_color && io::stdout().is_terminal();

    if let Some(format) = cli.show_template {
        print!("{}", config_template(format.into()));
        return;
    }

    if let Err(e) = run::handle_run(&cli, use_color) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
